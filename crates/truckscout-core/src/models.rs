//! Core data models for truckscout.
//!
//! These types are shared across all truckscout crates and represent
//! the core domain entities.

use serde::{Deserialize, Serialize};

use crate::defaults;

// =============================================================================
// CATEGORIES
// =============================================================================

/// Business classification of a dataset row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BusinessCategory {
    LogisticsCompany,
    Dealership,
}

impl BusinessCategory {
    /// Raw category label marking a dealership row.
    pub const RAW_DEALER: &'static str = "dealer";

    /// Map a raw dataset label; unmapped or missing labels are logistics companies.
    pub fn from_raw(raw: Option<&str>) -> Self {
        match raw {
            Some(Self::RAW_DEALER) => Self::Dealership,
            _ => Self::LogisticsCompany,
        }
    }
}

/// Fleet-brand indicator of a logistics company.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompetitorIndicator {
    FleetIncludesBrand,
    FleetLikelyExcludesBrand,
    NoBrandInformation,
}

impl CompetitorIndicator {
    /// Parse the dataset label. Missing or unrecognised labels mean no
    /// brand information, so every logistics row has a display group.
    pub fn from_label(label: Option<&str>) -> Self {
        match label.map(str::trim) {
            Some(l) if l == DisplayCategory::FleetIncludesBrand.label() => {
                Self::FleetIncludesBrand
            }
            Some(l) if l == DisplayCategory::FleetLikelyExcludesBrand.label() => {
                Self::FleetLikelyExcludesBrand
            }
            _ => Self::NoBrandInformation,
        }
    }

    pub fn display_category(&self) -> DisplayCategory {
        match self {
            Self::FleetIncludesBrand => DisplayCategory::FleetIncludesBrand,
            Self::FleetLikelyExcludesBrand => DisplayCategory::FleetLikelyExcludesBrand,
            Self::NoBrandInformation => DisplayCategory::NoBrandInformation,
        }
    }
}

/// One of the four marker groups, in map layer order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayCategory {
    FleetIncludesBrand,
    FleetLikelyExcludesBrand,
    NoBrandInformation,
    Dealership,
}

impl DisplayCategory {
    /// Layer order. Layer indices reported by map clicks index into this.
    pub const ORDERED: [DisplayCategory; 4] = [
        DisplayCategory::FleetIncludesBrand,
        DisplayCategory::FleetLikelyExcludesBrand,
        DisplayCategory::NoBrandInformation,
        DisplayCategory::Dealership,
    ];

    pub fn layer_index(&self) -> usize {
        match self {
            Self::FleetIncludesBrand => 0,
            Self::FleetLikelyExcludesBrand => 1,
            Self::NoBrandInformation => 2,
            Self::Dealership => 3,
        }
    }

    pub fn from_layer_index(index: usize) -> Option<Self> {
        Self::ORDERED.get(index).copied()
    }

    /// Legend label, also the dataset's competitor indicator text.
    pub fn label(&self) -> &'static str {
        match self {
            Self::FleetIncludesBrand => "Logistic Company (fleet includes Mercedes trucks)",
            Self::FleetLikelyExcludesBrand => {
                "Logistic Company (fleet likely does not include Mercedes trucks)"
            }
            Self::NoBrandInformation => "Logistic Company (no brand information of fleet)",
            Self::Dealership => "MB Truck Niederlassung",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            Self::FleetIncludesBrand => defaults::COLOR_FLEET_INCLUDES_BRAND,
            Self::FleetLikelyExcludesBrand => defaults::COLOR_FLEET_EXCLUDES_BRAND,
            Self::NoBrandInformation => defaults::COLOR_NO_BRAND_INFORMATION,
            Self::Dealership => defaults::COLOR_DEALERSHIP,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Dealership => defaults::SYMBOL_SQUARE,
            _ => defaults::SYMBOL_CIRCLE,
        }
    }

    pub fn is_logistics(&self) -> bool {
        !matches!(self, Self::Dealership)
    }
}

// =============================================================================
// COMPANY RECORD
// =============================================================================

/// One normalized dataset row: a logistics company or a dealership.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyRecord {
    /// Unique after normalization.
    pub place_id: i64,
    pub category: BusinessCategory,
    pub competitor_indicator: CompetitorIndicator,
    /// Indicator label as it appeared in the dataset.
    pub competitor_indicator_text: String,
    pub lat: f64,
    pub long: f64,
    /// Raw revenue in millions of euros.
    pub revenue: Option<f64>,
    /// Revenue clamped for marker sizing.
    pub capped_revenue: f64,
    pub formatted_revenue: String,
    pub name: String,
    pub address: String,
    pub website: String,
    pub phone: String,
    pub mail: String,
    pub short_description: String,
    pub company_summary: String,
    pub financials_description: String,
    /// JSON object mapping year to revenue amount.
    pub financials: String,
    pub financials_source: String,
    pub fleet_content: String,
    pub fleet_images: Vec<String>,
}

impl CompanyRecord {
    pub fn display_category(&self) -> DisplayCategory {
        match self.category {
            BusinessCategory::Dealership => DisplayCategory::Dealership,
            BusinessCategory::LogisticsCompany => self.competitor_indicator.display_category(),
        }
    }
}

// =============================================================================
// CHAT TYPES
// =============================================================================

/// Author of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::System => "system",
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

/// A role-tagged chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_business_category_from_raw() {
        assert_eq!(
            BusinessCategory::from_raw(Some("dealer")),
            BusinessCategory::Dealership
        );
        assert_eq!(
            BusinessCategory::from_raw(Some("client")),
            BusinessCategory::LogisticsCompany
        );
        assert_eq!(
            BusinessCategory::from_raw(Some("supplier")),
            BusinessCategory::LogisticsCompany
        );
        assert_eq!(
            BusinessCategory::from_raw(None),
            BusinessCategory::LogisticsCompany
        );
    }

    #[test]
    fn test_competitor_indicator_from_label() {
        assert_eq!(
            CompetitorIndicator::from_label(Some(
                "Logistic Company (fleet includes Mercedes trucks)"
            )),
            CompetitorIndicator::FleetIncludesBrand
        );
        assert_eq!(
            CompetitorIndicator::from_label(Some(
                "Logistic Company (fleet likely does not include Mercedes trucks)"
            )),
            CompetitorIndicator::FleetLikelyExcludesBrand
        );
        assert_eq!(
            CompetitorIndicator::from_label(Some("something else")),
            CompetitorIndicator::NoBrandInformation
        );
        assert_eq!(
            CompetitorIndicator::from_label(None),
            CompetitorIndicator::NoBrandInformation
        );
    }

    #[test]
    fn test_display_category_layer_index_roundtrip() {
        for (i, category) in DisplayCategory::ORDERED.iter().enumerate() {
            assert_eq!(category.layer_index(), i);
            assert_eq!(DisplayCategory::from_layer_index(i), Some(*category));
        }
        assert_eq!(DisplayCategory::from_layer_index(4), None);
    }

    #[test]
    fn test_only_dealership_uses_square_symbol() {
        for category in DisplayCategory::ORDERED {
            assert_eq!(
                category.symbol() == defaults::SYMBOL_SQUARE,
                !category.is_logistics()
            );
        }
    }

    #[test]
    fn test_role_serialization() {
        let msg = ChatMessage::assistant("hi");
        let json = serde_json::to_string(&msg).unwrap();
        assert_eq!(json, r#"{"role":"assistant","content":"hi"}"#);
    }
}
