//! # truckscout-inference
//!
//! Chat-completion backends for truckscout.
//!
//! This crate provides:
//! - An OpenAI-compatible HTTP backend implementing [`ChatBackend`]
//! - A deterministic mock backend (feature `mock`) for tests
//!
//! # Feature Flags
//!
//! - `mock`: Enable the mock backend for dependent crates' tests
//!
//! # Example
//!
//! ```rust,no_run
//! use truckscout_inference::OpenAIBackend;
//! use truckscout_core::{ChatBackend, ChatMessage};
//!
//! #[tokio::main]
//! async fn main() {
//!     let backend = OpenAIBackend::from_env().unwrap();
//!     let reply = backend.complete(&[ChatMessage::user("Hello")]).await.unwrap();
//! }
//! ```

pub mod openai;

// Mock chat backend for testing
#[cfg(any(test, feature = "mock"))]
pub mod mock;

// Re-export core types
pub use truckscout_core::{ChatBackend, ChatMessage, Error, Result, Role};

pub use openai::{OpenAIBackend, OpenAIConfig};
