//! Map marker encoding.
//!
//! Produces exactly four layers in [`DisplayCategory::ORDERED`] order, one
//! per display category, including empty ones. The map client numbers
//! layers by emission order, so dropping an empty layer would shift every
//! later layer index.

use serde::Serialize;
use tracing::{debug, instrument};

use truckscout_core::{defaults, CompanyRecord, DisplayCategory};

use crate::Dataset;

/// One marker on the map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerPoint {
    /// Identifier of the record behind the marker, for click cross-checks.
    pub place_id: i64,
    pub lat: f64,
    pub long: f64,
    pub size: f64,
    pub hover_text: String,
}

/// A group of markers sharing category, color and symbol.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerLayer {
    pub layer_index: usize,
    pub category: DisplayCategory,
    pub name: &'static str,
    pub color: &'static str,
    pub symbol: &'static str,
    pub points: Vec<MarkerPoint>,
}

/// Everything a map client needs to draw the dashboard map.
#[derive(Debug, Clone, Serialize)]
pub struct MapView {
    pub center_lat: f64,
    pub center_long: f64,
    pub zoom: f64,
    pub style: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    pub layers: Vec<MarkerLayer>,
}

/// Map capped revenue linearly from the size domain onto the marker range.
pub fn marker_size(capped_revenue: f64) -> f64 {
    (capped_revenue - defaults::SIZE_DOMAIN_MIN)
        / (defaults::SIZE_DOMAIN_MAX - defaults::SIZE_DOMAIN_MIN)
        * (defaults::MARKER_SIZE_MAX - defaults::MARKER_SIZE_MIN)
        + defaults::MARKER_SIZE_MIN
}

/// Hover label; revenue is shown for logistics companies only.
pub fn hover_text(record: &CompanyRecord, category: DisplayCategory) -> String {
    let mut text = format!(
        "{}<br>Website: {}<br>Address: {}",
        record.name, record.website, record.address
    );
    if category.is_logistics() {
        text.push_str("<br>Latest Revenue: ");
        text.push_str(&record.formatted_revenue);
    }
    text
}

/// Encode the dataset into the four ordered marker layers.
#[instrument(skip(dataset), fields(subsystem = "data", component = "encoder", op = "encode_layers", row_count = dataset.len()))]
pub fn encode_layers(dataset: &Dataset) -> Vec<MarkerLayer> {
    let layers: Vec<MarkerLayer> = dataset
        .partition()
        .iter()
        .map(|(category, rows)| MarkerLayer {
            layer_index: category.layer_index(),
            category,
            name: category.label(),
            color: category.color(),
            symbol: category.symbol(),
            points: rows
                .iter()
                .filter_map(|row| dataset.get(*row))
                .map(|record| MarkerPoint {
                    place_id: record.place_id,
                    lat: record.lat,
                    long: record.long,
                    size: marker_size(record.capped_revenue),
                    hover_text: hover_text(record, category),
                })
                .collect(),
        })
        .collect();

    debug!(
        layer_sizes = ?layers.iter().map(|l| l.points.len()).collect::<Vec<_>>(),
        "Encoded marker layers"
    );
    layers
}

/// Encode the full map view.
pub fn map_view(dataset: &Dataset, access_token: Option<String>) -> MapView {
    let (center_lat, center_long) = dataset.center();
    MapView {
        center_lat,
        center_long,
        zoom: defaults::MAP_ZOOM,
        style: defaults::MAP_STYLE,
        access_token,
        layers: encode_layers(dataset),
    }
}
