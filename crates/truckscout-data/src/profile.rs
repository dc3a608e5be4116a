//! Company profile view model.

use serde::Serialize;
use serde_json::Value;
use tracing::warn;

use truckscout_core::{defaults, CompanyRecord, Error, Result};

/// Bar chart of annual revenue.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinancialSeries {
    pub title: &'static str,
    pub x_label: &'static str,
    pub y_label: &'static str,
    /// Years, in the order they appear in the source document.
    pub years: Vec<String>,
    pub amounts: Vec<f64>,
}

/// Parse the financial blob into a year-ordered series.
///
/// An empty blob means no chart. Anything else must be a JSON object whose
/// values are numbers.
pub fn parse_financials(blob: &str) -> Result<Option<FinancialSeries>> {
    let blob = blob.trim();
    if blob.is_empty() {
        return Ok(None);
    }

    let value: Value = serde_json::from_str(blob)
        .map_err(|e| Error::Parse(format!("financials are not valid JSON: {}", e)))?;
    let object = match value {
        Value::Object(object) => object,
        Value::Null => return Ok(None),
        _ => {
            return Err(Error::Parse(
                "financials must map years to amounts".to_string(),
            ))
        }
    };

    let mut years = Vec::with_capacity(object.len());
    let mut amounts = Vec::with_capacity(object.len());
    for (year, amount) in object {
        let amount = amount.as_f64().ok_or_else(|| {
            Error::Parse(format!("financial amount for {} is not a number", year))
        })?;
        years.push(year);
        amounts.push(amount);
    }

    Ok(Some(FinancialSeries {
        title: defaults::FINANCIAL_CHART_TITLE,
        x_label: defaults::FINANCIAL_CHART_X_LABEL,
        y_label: defaults::FINANCIAL_CHART_Y_LABEL,
        years,
        amounts,
    }))
}

/// A fleet image reference.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileImage {
    pub index: usize,
    pub path: String,
    pub url: String,
}

/// Everything shown in the company details panel.
#[derive(Debug, Clone, Serialize)]
pub struct CompanyProfile {
    pub place_id: i64,
    pub name: String,
    pub short_description: String,
    pub website: String,
    pub phone: String,
    pub mail: String,
    pub address: String,
    pub company_summary: String,
    pub formatted_revenue: String,
    pub financials_description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub financials: Option<FinancialSeries>,
    /// Set when the financial blob could not be parsed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub financials_error: Option<String>,
    pub financials_source: String,
    pub fleet_content: String,
    pub fleet_images: Vec<ProfileImage>,
    pub fleet_source: String,
}

impl CompanyProfile {
    /// Render a record. A malformed financial blob is reported inline and
    /// does not prevent the rest of the profile from rendering.
    pub fn render(record: &CompanyRecord) -> Self {
        let (financials, financials_error) = match parse_financials(&record.financials) {
            Ok(series) => (series, None),
            Err(e) => {
                warn!(place_id = record.place_id, error = %e, "Financials could not be parsed");
                (None, Some(e.to_string()))
            }
        };

        let fleet_images = record
            .fleet_images
            .iter()
            .enumerate()
            .map(|(index, path)| ProfileImage {
                index,
                path: path.clone(),
                url: format!(
                    "/api/v1/companies/{}/images/{}",
                    record.place_id, index
                ),
            })
            .collect();

        Self {
            place_id: record.place_id,
            name: record.name.clone(),
            short_description: record.short_description.clone(),
            website: record.website.clone(),
            phone: record.phone.clone(),
            mail: record.mail.clone(),
            address: record.address.clone(),
            company_summary: record.company_summary.clone(),
            formatted_revenue: record.formatted_revenue.clone(),
            financials_description: record.financials_description.clone(),
            financials,
            financials_error,
            financials_source: record.financials_source.clone(),
            fleet_content: record.fleet_content.clone(),
            fleet_images,
            fleet_source: record.website.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::record;
    use truckscout_core::{BusinessCategory, CompetitorIndicator};

    #[test]
    fn test_series_keeps_document_order() {
        let series = parse_financials(r#"{"2021": 10, "2022": 15}"#)
            .unwrap()
            .unwrap();
        assert_eq!(series.years, vec!["2021", "2022"]);
        assert_eq!(series.amounts, vec![10.0, 15.0]);
    }

    #[test]
    fn test_series_not_sorted() {
        let series = parse_financials(r#"{"2023": 1.5, "2019": 2}"#)
            .unwrap()
            .unwrap();
        assert_eq!(series.years, vec!["2023", "2019"]);
    }

    #[test]
    fn test_empty_blob_has_no_chart() {
        assert!(parse_financials("").unwrap().is_none());
        assert!(parse_financials("  ").unwrap().is_none());
        assert!(parse_financials("null").unwrap().is_none());
    }

    #[test]
    fn test_malformed_blob_is_parse_error() {
        assert!(matches!(parse_financials("{2021: 10"), Err(Error::Parse(_))));
        assert!(matches!(parse_financials("[1, 2]"), Err(Error::Parse(_))));
        assert!(matches!(
            parse_financials(r#"{"2021": "ten"}"#),
            Err(Error::Parse(_))
        ));
    }

    #[test]
    fn test_profile_reports_parse_error_inline() {
        let mut r = record(
            3,
            BusinessCategory::LogisticsCompany,
            CompetitorIndicator::NoBrandInformation,
        );
        r.financials = "not json".into();
        let profile = CompanyProfile::render(&r);
        assert!(profile.financials.is_none());
        assert!(profile.financials_error.unwrap().starts_with("Parse error"));
        assert_eq!(profile.name, r.name);
    }

    #[test]
    fn test_profile_without_images() {
        let r = record(
            3,
            BusinessCategory::LogisticsCompany,
            CompetitorIndicator::NoBrandInformation,
        );
        let profile = CompanyProfile::render(&r);
        assert!(profile.fleet_images.is_empty());
    }

    #[test]
    fn test_profile_image_urls() {
        let mut r = record(
            8,
            BusinessCategory::LogisticsCompany,
            CompetitorIndicator::NoBrandInformation,
        );
        r.fleet_images = vec!["a.png".into(), "b.jpg".into()];
        let profile = CompanyProfile::render(&r);
        assert_eq!(profile.fleet_images[1].url, "/api/v1/companies/8/images/1");
        assert_eq!(profile.fleet_images[1].path, "b.jpg");
    }
}
