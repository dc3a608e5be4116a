//! Dataset loading and normalization.
//!
//! The dataset is a JSON array with one object per company or dealership.
//! Loading validates the column set, assigns dealership identifiers, derives
//! the display columns and drops duplicate identifiers (first occurrence
//! wins). The result is immutable for the rest of the process.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};
use tracing::{debug, info, instrument};

use truckscout_core::{
    defaults, BusinessCategory, CompanyRecord, CompetitorIndicator, Error, Result,
};

use crate::partition::{partition_by_category, CategoryPartition};

/// Columns every dataset row must carry (values may be null).
pub const REQUIRED_COLUMNS: &[&str] = &[
    "category",
    "place_id",
    "lat",
    "long",
    "Latest Revenue Number",
    "competitor_indicator_text",
    "name",
    "vicinity",
    "website",
    "phone",
    "mail",
    "short_description",
    "company_info_processed_summary",
    "financials_description",
    "financials",
    "financials_source",
    "fleet_content",
    "fleet_images",
];

/// A dataset row as stored on disk, before normalization.
#[derive(Debug, Clone, Deserialize)]
pub struct RawCompanyRow {
    pub category: Option<String>,
    pub place_id: Option<Value>,
    pub lat: Option<f64>,
    pub long: Option<f64>,
    #[serde(rename = "Latest Revenue Number")]
    pub revenue: Option<f64>,
    #[serde(deserialize_with = "lenient_text")]
    pub competitor_indicator_text: String,
    #[serde(deserialize_with = "lenient_text")]
    pub name: String,
    #[serde(deserialize_with = "lenient_text")]
    pub vicinity: String,
    #[serde(deserialize_with = "lenient_text")]
    pub website: String,
    #[serde(deserialize_with = "lenient_text")]
    pub phone: String,
    #[serde(deserialize_with = "lenient_text")]
    pub mail: String,
    #[serde(deserialize_with = "lenient_text")]
    pub short_description: String,
    #[serde(deserialize_with = "lenient_text")]
    pub company_info_processed_summary: String,
    #[serde(deserialize_with = "lenient_text")]
    pub financials_description: String,
    #[serde(deserialize_with = "lenient_text")]
    pub financials: String,
    #[serde(deserialize_with = "lenient_text")]
    pub financials_source: String,
    #[serde(deserialize_with = "lenient_text")]
    pub fleet_content: String,
    #[serde(default)]
    pub fleet_images: Option<Vec<String>>,
}

/// Accept strings, numbers and null for free-text columns.
fn lenient_text<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s,
        Some(other) => other.to_string(),
    })
}

/// Clamp raw revenue into the marker range. Missing revenue counts as zero.
pub fn cap_revenue(revenue: Option<f64>) -> f64 {
    let value = revenue
        .filter(|v| !v.is_nan())
        .unwrap_or(0.0);
    value.clamp(defaults::REVENUE_CAP_MIN, defaults::REVENUE_CAP_MAX)
}

/// Human-readable revenue. Zero is treated like a missing figure.
pub fn format_revenue(revenue: Option<f64>) -> String {
    match revenue {
        Some(v) if v != 0.0 && !v.is_nan() => format!("{:?} {}", v, defaults::REVENUE_SUFFIX),
        _ => defaults::REVENUE_NOT_AVAILABLE.to_string(),
    }
}

fn parse_place_id(row: usize, value: Option<&Value>) -> Result<i64> {
    let invalid = || {
        Error::Data(format!(
            "row {}: place_id must be an integral number for non-dealer rows",
            row
        ))
    };
    match value {
        Some(Value::Number(n)) => {
            if let Some(id) = n.as_i64() {
                Ok(id)
            } else {
                match n.as_f64() {
                    Some(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => Ok(f as i64),
                    _ => Err(invalid()),
                }
            }
        }
        Some(Value::String(s)) => s.trim().parse::<i64>().map_err(|_| invalid()),
        _ => Err(invalid()),
    }
}

fn check_columns(row: usize, object: &Map<String, Value>) -> Result<()> {
    for column in REQUIRED_COLUMNS {
        if !object.contains_key(*column) {
            return Err(Error::Data(format!(
                "row {}: missing required column '{}'",
                row, column
            )));
        }
    }
    Ok(())
}

/// The normalized, read-only dataset.
#[derive(Debug, Clone)]
pub struct Dataset {
    records: Vec<CompanyRecord>,
    partition: CategoryPartition,
    by_place_id: HashMap<i64, usize>,
}

impl Dataset {
    /// Build from already-normalized records. Duplicate identifiers after
    /// the first are dropped.
    pub fn from_records(records: Vec<CompanyRecord>) -> Self {
        let mut by_place_id = HashMap::with_capacity(records.len());
        let mut kept = Vec::with_capacity(records.len());
        for record in records {
            if by_place_id.contains_key(&record.place_id) {
                debug!(place_id = record.place_id, "Dropping duplicate place_id");
                continue;
            }
            by_place_id.insert(record.place_id, kept.len());
            kept.push(record);
        }
        let partition = partition_by_category(&kept);
        Self {
            records: kept,
            partition,
            by_place_id,
        }
    }

    /// Normalize raw JSON rows.
    pub fn from_rows(rows: Vec<Value>) -> Result<Self> {
        let mut records = Vec::with_capacity(rows.len());
        let mut dealer_counter: i64 = 0;

        for (index, value) in rows.into_iter().enumerate() {
            let object = match value {
                Value::Object(object) => object,
                _ => {
                    return Err(Error::Data(format!("row {}: expected a JSON object", index)))
                }
            };
            check_columns(index, &object)?;

            let is_dealer = object.get("category").and_then(Value::as_str)
                == Some(BusinessCategory::RAW_DEALER);
            let place_id = if is_dealer {
                let id = dealer_counter;
                dealer_counter += 1;
                id
            } else {
                parse_place_id(index, object.get("place_id"))?
            };

            let raw: RawCompanyRow = serde_json::from_value(Value::Object(object))
                .map_err(|e| Error::Data(format!("row {}: {}", index, e)))?;
            records.push(normalize_row(index, place_id, raw)?);
        }

        Ok(Self::from_records(records))
    }

    /// Parse and normalize a JSON document.
    pub fn from_json_slice(bytes: &[u8]) -> Result<Self> {
        let document: Value = serde_json::from_slice(bytes)
            .map_err(|e| Error::Data(format!("dataset is not valid JSON: {}", e)))?;
        match document {
            Value::Array(rows) => Self::from_rows(rows),
            _ => Err(Error::Data(
                "dataset must be a JSON array of row objects".to_string(),
            )),
        }
    }

    pub fn records(&self) -> &[CompanyRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Record at a row index.
    pub fn get(&self, row: usize) -> Option<&CompanyRecord> {
        self.records.get(row)
    }

    /// Record by identifier.
    pub fn find(&self, place_id: i64) -> Option<&CompanyRecord> {
        self.by_place_id
            .get(&place_id)
            .and_then(|row| self.records.get(*row))
    }

    /// Row indices grouped by display category, shared by encoder and resolver.
    pub fn partition(&self) -> &CategoryPartition {
        &self.partition
    }

    /// Mean latitude and longitude, or the origin for an empty dataset.
    pub fn center(&self) -> (f64, f64) {
        if self.records.is_empty() {
            return (0.0, 0.0);
        }
        let n = self.records.len() as f64;
        let lat = self.records.iter().map(|r| r.lat).sum::<f64>() / n;
        let long = self.records.iter().map(|r| r.long).sum::<f64>() / n;
        (lat, long)
    }
}

fn normalize_row(index: usize, place_id: i64, raw: RawCompanyRow) -> Result<CompanyRecord> {
    let category = BusinessCategory::from_raw(raw.category.as_deref());
    let lat = raw
        .lat
        .ok_or_else(|| Error::Data(format!("row {}: lat is null", index)))?;
    let long = raw
        .long
        .ok_or_else(|| Error::Data(format!("row {}: long is null", index)))?;

    let (capped_revenue, formatted_revenue) = match category {
        BusinessCategory::Dealership => (
            defaults::DEALERSHIP_CAPPED_REVENUE,
            defaults::DEALERSHIP_REVENUE_TEXT.to_string(),
        ),
        BusinessCategory::LogisticsCompany => {
            (cap_revenue(raw.revenue), format_revenue(raw.revenue))
        }
    };

    Ok(CompanyRecord {
        place_id,
        category,
        competitor_indicator: CompetitorIndicator::from_label(Some(
            raw.competitor_indicator_text.as_str(),
        )),
        competitor_indicator_text: raw.competitor_indicator_text,
        lat,
        long,
        revenue: raw.revenue,
        capped_revenue,
        formatted_revenue,
        name: raw.name,
        address: raw.vicinity,
        website: raw.website,
        phone: raw.phone,
        mail: raw.mail,
        short_description: raw.short_description,
        company_summary: raw.company_info_processed_summary,
        financials_description: raw.financials_description,
        financials: raw.financials,
        financials_source: raw.financials_source,
        fleet_content: raw.fleet_content,
        fleet_images: raw.fleet_images.unwrap_or_default(),
    })
}

/// Load and normalize the dataset file.
#[instrument(fields(subsystem = "data", component = "loader", op = "load"))]
pub async fn load_dataset(path: &Path) -> Result<Dataset> {
    let bytes = tokio::fs::read(path).await.map_err(|e| {
        Error::Data(format!("cannot read dataset {}: {}", path.display(), e))
    })?;
    let dataset = Dataset::from_json_slice(&bytes)?;
    info!(
        row_count = dataset.len(),
        path = %path.display(),
        "Dataset loaded"
    );
    Ok(dataset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(category: &str, place_id: Value, revenue: Value) -> Value {
        json!({
            "category": category,
            "place_id": place_id,
            "lat": 48.1,
            "long": 11.5,
            "Latest Revenue Number": revenue,
            "competitor_indicator_text": "Logistic Company (fleet includes Mercedes trucks)",
            "name": "Spedition",
            "vicinity": "Hauptstr. 1",
            "website": "https://example.com",
            "phone": "+49 89 1",
            "mail": "info@example.com",
            "short_description": "",
            "company_info_processed_summary": "",
            "financials_description": "",
            "financials": "{}",
            "financials_source": "",
            "fleet_content": "",
            "fleet_images": []
        })
    }

    #[test]
    fn test_cap_revenue_bounds() {
        assert_eq!(cap_revenue(None), 5.0);
        assert_eq!(cap_revenue(Some(0.0)), 5.0);
        assert_eq!(cap_revenue(Some(-12.0)), 5.0);
        assert_eq!(cap_revenue(Some(17.5)), 17.5);
        assert_eq!(cap_revenue(Some(1e12)), 30.0);
        assert_eq!(cap_revenue(Some(f64::NAN)), 5.0);
    }

    #[test]
    fn test_format_revenue() {
        assert_eq!(format_revenue(Some(12.5)), "12.5 Million €");
        assert_eq!(format_revenue(Some(30.0)), "30.0 Million €");
        assert_eq!(format_revenue(Some(42.0)), "42.0 Million €");
        assert_eq!(format_revenue(Some(0.0)), "N/A");
        assert_eq!(format_revenue(None), "N/A");
    }

    #[test]
    fn test_dealers_get_sequential_ids() {
        let rows = vec![
            row("client", json!(100), json!(10)),
            row("dealer", Value::Null, Value::Null),
            row("dealer", json!(999), Value::Null),
        ];
        let dataset = Dataset::from_rows(rows).unwrap();
        let ids: Vec<i64> = dataset.records().iter().map(|r| r.place_id).collect();
        assert_eq!(ids, vec![100, 0, 1]);
    }

    #[test]
    fn test_dealership_revenue_is_constant() {
        let rows = vec![row("dealer", Value::Null, json!(500))];
        let dataset = Dataset::from_rows(rows).unwrap();
        let record = &dataset.records()[0];
        assert_eq!(record.category, BusinessCategory::Dealership);
        assert_eq!(record.capped_revenue, 12.0);
        assert_eq!(record.formatted_revenue, defaults::DEALERSHIP_REVENUE_TEXT);
    }

    #[test]
    fn test_unknown_category_defaults_to_logistics() {
        let mut r = row("client", json!(1), json!(3));
        r["category"] = Value::Null;
        let dataset = Dataset::from_rows(vec![r]).unwrap();
        assert_eq!(
            dataset.records()[0].category,
            BusinessCategory::LogisticsCompany
        );
    }

    #[test]
    fn test_duplicates_keep_first_occurrence() {
        let mut first = row("client", json!(7), json!(10));
        first["name"] = json!("First");
        let mut second = row("client", json!(7), json!(20));
        second["name"] = json!("Second");
        let dataset = Dataset::from_rows(vec![first, second]).unwrap();
        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset.find(7).unwrap().name, "First");
    }

    #[test]
    fn test_dealer_id_colliding_with_client_is_dropped() {
        let rows = vec![
            row("client", json!(0), json!(10)),
            row("dealer", Value::Null, Value::Null),
        ];
        let dataset = Dataset::from_rows(rows).unwrap();
        assert_eq!(dataset.len(), 1);
        assert_eq!(
            dataset.find(0).unwrap().category,
            BusinessCategory::LogisticsCompany
        );
    }

    #[test]
    fn test_missing_column_is_data_error() {
        let mut r = row("client", json!(1), json!(1));
        r.as_object_mut().unwrap().remove("fleet_content");
        let err = Dataset::from_rows(vec![r]).unwrap_err();
        match err {
            Error::Data(msg) => assert!(msg.contains("fleet_content")),
            other => panic!("Expected Data error, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_place_id_for_client_is_data_error() {
        let r = row("client", Value::Null, json!(1));
        assert!(matches!(
            Dataset::from_rows(vec![r]),
            Err(Error::Data(_))
        ));
    }

    #[test]
    fn test_integral_float_and_string_place_ids() {
        let rows = vec![
            row("client", json!(3.0), json!(1)),
            row("client", json!("4"), json!(1)),
        ];
        let dataset = Dataset::from_rows(rows).unwrap();
        assert!(dataset.find(3).is_some());
        assert!(dataset.find(4).is_some());
    }

    #[test]
    fn test_numeric_phone_is_kept_as_text() {
        let mut r = row("client", json!(1), json!(1));
        r["phone"] = json!(498912345);
        let dataset = Dataset::from_rows(vec![r]).unwrap();
        assert_eq!(dataset.records()[0].phone, "498912345");
    }

    #[test]
    fn test_null_images_become_empty() {
        let mut r = row("client", json!(1), json!(1));
        r["fleet_images"] = Value::Null;
        let dataset = Dataset::from_rows(vec![r]).unwrap();
        assert!(dataset.records()[0].fleet_images.is_empty());
    }

    #[test]
    fn test_non_array_document_rejected() {
        let err = Dataset::from_json_slice(br#"{"rows": []}"#).unwrap_err();
        assert!(matches!(err, Error::Data(_)));
    }

    #[test]
    fn test_center_is_mean_position() {
        let mut a = row("client", json!(1), json!(1));
        a["lat"] = json!(48.0);
        a["long"] = json!(10.0);
        let mut b = row("client", json!(2), json!(1));
        b["lat"] = json!(50.0);
        b["long"] = json!(12.0);
        let dataset = Dataset::from_rows(vec![a, b]).unwrap();
        assert_eq!(dataset.center(), (49.0, 11.0));
    }
}
