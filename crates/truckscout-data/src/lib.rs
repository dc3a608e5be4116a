//! # truckscout-data
//!
//! Dataset side of the truckscout dashboard:
//! - loading and normalizing the company dataset
//! - grouping rows into the four display categories
//! - encoding marker layers for the map
//! - resolving map clicks back to company records
//! - rendering company profiles and reading fleet images

pub mod dataset;
pub mod image_store;
pub mod markers;
pub mod partition;
pub mod profile;
pub mod selection;

pub use dataset::{cap_revenue, format_revenue, load_dataset, Dataset, REQUIRED_COLUMNS};
pub use image_store::{FilesystemImageStore, StoredImage};
pub use markers::{encode_layers, hover_text, map_view, marker_size, MapView, MarkerLayer, MarkerPoint};
pub use partition::{partition_by_category, CategoryPartition};
pub use profile::{parse_financials, CompanyProfile, FinancialSeries, ProfileImage};
pub use selection::{resolve, MapClick, ResolvedSelection};
