//! Map click resolution.
//!
//! A click reports the layer it hit and the marker's position inside that
//! layer. Resolution reads the same [`CategoryPartition`] the encoder used,
//! so a position always refers to the marker that was drawn there.
//!
//! [`CategoryPartition`]: crate::partition::CategoryPartition

use serde::{Deserialize, Serialize};
use tracing::{debug, error, instrument};

use truckscout_core::{CompanyRecord, DisplayCategory, Error, Result};

use crate::Dataset;

/// A click event from the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapClick {
    pub layer_index: usize,
    pub position_index: usize,
    /// Identifier the client saw under the cursor, if it tracks one.
    #[serde(default)]
    pub expected_place_id: Option<i64>,
}

impl MapClick {
    pub fn new(layer_index: usize, position_index: usize) -> Self {
        Self {
            layer_index,
            position_index,
            expected_place_id: None,
        }
    }
}

/// The record behind a click, with its identifier for cross-checking.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedSelection<'a> {
    pub place_id: i64,
    pub category: DisplayCategory,
    pub record: &'a CompanyRecord,
}

/// Resolve a click to exactly one record.
#[instrument(skip(dataset), fields(subsystem = "data", component = "resolver", op = "resolve"))]
pub fn resolve(dataset: &Dataset, click: MapClick) -> Result<ResolvedSelection<'_>> {
    let category = DisplayCategory::from_layer_index(click.layer_index).ok_or_else(|| {
        error!(
            layer_index = click.layer_index,
            "Map click names a layer that was never emitted"
        );
        Error::UnknownLayer(click.layer_index)
    })?;

    let rows = dataset.partition().rows(category);
    let record = rows
        .get(click.position_index)
        .and_then(|row| dataset.get(*row))
        .ok_or_else(|| {
            error!(
                layer_index = click.layer_index,
                position_index = click.position_index,
                layer_len = rows.len(),
                "Map click position outside its layer"
            );
            Error::SelectionOutOfRange {
                layer: click.layer_index,
                position: click.position_index,
                len: rows.len(),
            }
        })?;

    if let Some(expected) = click.expected_place_id {
        if expected != record.place_id {
            error!(
                expected_place_id = expected,
                place_id = record.place_id,
                "Resolved record does not match the clicked marker"
            );
            return Err(Error::InvalidInput(format!(
                "clicked marker {} resolved to place {}",
                expected, record.place_id
            )));
        }
    }

    debug!(place_id = record.place_id, name = %record.name, "Selection resolved");
    Ok(ResolvedSelection {
        place_id: record.place_id,
        category,
        record,
    })
}
