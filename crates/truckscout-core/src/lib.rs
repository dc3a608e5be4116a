//! # truckscout-core
//!
//! Core types, traits, and defaults for the truckscout sales dashboard.
//!
//! This crate provides the company record model, the fixed display
//! categories shared by the marker encoder and the selection resolver, chat
//! message types, and the chat backend trait that other truckscout crates
//! depend on.

pub mod defaults;
pub mod error;
pub mod models;
pub mod traits;

// Re-export commonly used types at crate root
pub use error::{Error, Result};
pub use models::*;
pub use traits::*;
