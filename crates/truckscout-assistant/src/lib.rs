//! # truckscout-assistant
//!
//! The conversational side of the dashboard. An [`AssistantSession`] owns the
//! transcript and forwards it, together with a fixed sales preamble and the
//! selected company's profile, to a [`ChatBackend`](truckscout_core::ChatBackend).
//! Replies that read like a letter are turned into a downloadable email by
//! the [`OutreachComposer`].

pub mod outreach;
pub mod prompts;
pub mod session;

pub use outreach::{
    extract_subject, looks_like_letter, strip_code_fence, OutreachArtifact, OutreachComposer,
};
pub use session::{reveal_stream, reveal_words, AssistantSession, Turn};
