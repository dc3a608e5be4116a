//! Grouping of dataset rows into the four display categories.
//!
//! The marker encoder numbers points by their position inside these groups
//! and the selection resolver reads the same groups back, so both sides see
//! one ordering by construction.

use truckscout_core::{CompanyRecord, DisplayCategory};

/// Row indices per display category, in dataset order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryPartition {
    groups: [Vec<usize>; 4],
}

impl CategoryPartition {
    /// Row indices of one category. Empty categories yield an empty slice.
    pub fn rows(&self, category: DisplayCategory) -> &[usize] {
        &self.groups[category.layer_index()]
    }

    /// Categories with their rows, in layer order.
    pub fn iter(&self) -> impl Iterator<Item = (DisplayCategory, &[usize])> {
        DisplayCategory::ORDERED
            .into_iter()
            .map(move |category| (category, self.rows(category)))
    }

    /// Total number of rows across all categories.
    pub fn total(&self) -> usize {
        self.groups.iter().map(Vec::len).sum()
    }
}

/// Partition records by display category, keeping their relative order.
pub fn partition_by_category(records: &[CompanyRecord]) -> CategoryPartition {
    let mut partition = CategoryPartition::default();
    for (row, record) in records.iter().enumerate() {
        partition.groups[record.display_category().layer_index()].push(row);
    }
    partition
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::record;
    use truckscout_core::{BusinessCategory, CompetitorIndicator};

    #[test]
    fn test_rows_keep_dataset_order() {
        let records = vec![
            record(1, BusinessCategory::LogisticsCompany, CompetitorIndicator::NoBrandInformation),
            record(2, BusinessCategory::Dealership, CompetitorIndicator::NoBrandInformation),
            record(3, BusinessCategory::LogisticsCompany, CompetitorIndicator::NoBrandInformation),
            record(4, BusinessCategory::LogisticsCompany, CompetitorIndicator::FleetIncludesBrand),
        ];
        let partition = partition_by_category(&records);
        assert_eq!(partition.rows(DisplayCategory::NoBrandInformation), &[0, 2]);
        assert_eq!(partition.rows(DisplayCategory::Dealership), &[1]);
        assert_eq!(partition.rows(DisplayCategory::FleetIncludesBrand), &[3]);
        assert!(partition.rows(DisplayCategory::FleetLikelyExcludesBrand).is_empty());
        assert_eq!(partition.total(), records.len());
    }

    #[test]
    fn test_dealership_indicator_is_ignored() {
        let records = vec![record(
            9,
            BusinessCategory::Dealership,
            CompetitorIndicator::FleetIncludesBrand,
        )];
        let partition = partition_by_category(&records);
        assert_eq!(partition.rows(DisplayCategory::Dealership), &[0]);
        assert!(partition.rows(DisplayCategory::FleetIncludesBrand).is_empty());
    }

    #[test]
    fn test_iter_yields_all_four_layers() {
        let partition = partition_by_category(&[]);
        let categories: Vec<_> = partition.iter().map(|(c, _)| c).collect();
        assert_eq!(categories, DisplayCategory::ORDERED.to_vec());
    }
}
