//! OpenAI-compatible chat backend.
//!
//! Works with any endpoint that speaks the OpenAI chat-completions API,
//! including:
//!
//! - OpenAI cloud API
//! - Azure OpenAI
//! - Ollama (in OpenAI compatibility mode)
//! - vLLM
//! - LM Studio
//!
//! # Example
//!
//! ```rust,no_run
//! use truckscout_core::{ChatBackend, ChatMessage};
//! use truckscout_inference::openai::{OpenAIBackend, OpenAIConfig};
//!
//! #[tokio::main]
//! async fn main() {
//!     // From environment variables
//!     let backend = OpenAIBackend::from_env().unwrap();
//!
//!     // Or with custom config
//!     let config = OpenAIConfig {
//!         base_url: "http://localhost:11434/v1".to_string(), // Ollama
//!         api_key: None, // Not needed for local
//!         gen_model: "llama3".to_string(),
//!         timeout_seconds: 120,
//!         skip_tls_verify: false,
//!     };
//!     let backend = OpenAIBackend::new(config).unwrap();
//!
//!     let reply = backend
//!         .complete(&[ChatMessage::user("Hello!")])
//!         .await
//!         .unwrap();
//!     println!("{}", reply.content);
//! }
//! ```

mod backend;
mod error;
mod types;

pub use backend::{OpenAIBackend, OpenAIConfig};
pub use error::{to_service_error, OpenAIErrorCode};
pub use types::*;
