//! HTTP handlers for truckscout-api.

pub mod assistant;
pub mod companies;
pub mod health;
pub mod map;
pub mod outreach;
pub mod sessions;
pub mod topics;
