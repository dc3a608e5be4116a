//! The assistant conversation.

use std::time::Duration;

use futures::stream::{self, Stream, StreamExt};
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use truckscout_core::{defaults, ChatBackend, ChatMessage, CompanyRecord, Error, Result};

use crate::outreach::{into_service_error, looks_like_letter, OutreachArtifact, OutreachComposer};
use crate::prompts::{company_context, system_preamble};

/// Split a reply into the words revealed one at a time, each followed by a space.
pub fn reveal_words(text: &str) -> Vec<String> {
    text.split(' ').map(|word| format!("{} ", word)).collect()
}

/// Stream the words of `text` in order, pausing `delay` between them.
pub fn reveal_stream(text: &str, delay: Duration) -> impl Stream<Item = String> {
    stream::iter(reveal_words(text).into_iter().enumerate()).then(move |(i, word)| async move {
        if i > 0 && !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        word
    })
}

/// Outcome of one user message: the reply plus what happened to outreach.
#[derive(Debug, Clone, Serialize)]
pub struct Turn {
    pub reply: String,
    pub words: Vec<String>,
    /// Subject of the email composed from this reply, if any.
    pub outreach_subject: Option<String>,
    /// Why a letter-like reply produced no email.
    pub outreach_error: Option<String>,
}

/// One user's conversation with the assistant.
///
/// The transcript is append-only and starts with the greeting. The pending
/// outreach artifact always belongs to the latest letter-like reply; a
/// letter that fails to compose leaves none.
#[derive(Debug, Clone)]
pub struct AssistantSession {
    transcript: Vec<ChatMessage>,
    pending_outreach: Option<OutreachArtifact>,
}

impl Default for AssistantSession {
    fn default() -> Self {
        Self::new()
    }
}

impl AssistantSession {
    pub fn new() -> Self {
        Self {
            transcript: vec![ChatMessage::assistant(defaults::ASSISTANT_GREETING)],
            pending_outreach: None,
        }
    }

    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    pub fn pending_outreach(&self) -> Option<&OutreachArtifact> {
        self.pending_outreach.as_ref()
    }

    /// Messages sent to the backend: preamble, optional company context, transcript.
    pub fn build_context(&self, selected: Option<&CompanyRecord>) -> Vec<ChatMessage> {
        let mut context = system_preamble();
        if let Some(record) = selected {
            context.push(company_context(record));
        }
        context.extend(self.transcript.iter().cloned());
        context
    }

    /// Send a user message and return the assistant's reply.
    ///
    /// The user message is recorded before dispatch. On failure the
    /// transcript keeps it, gains no reply, and `Error::Service` is returned.
    #[instrument(skip(self, backend, user_text, selected), fields(subsystem = "assistant", component = "session", op = "send", place_id = selected.map(|r| r.place_id), transcript_len = self.transcript.len()))]
    pub async fn send(
        &mut self,
        backend: &dyn ChatBackend,
        user_text: &str,
        selected: Option<&CompanyRecord>,
    ) -> Result<String> {
        self.transcript.push(ChatMessage::user(user_text));
        let context = self.build_context(selected);
        debug!(context_len = context.len(), "Dispatching chat completion");

        let reply = backend.complete(&context).await.map_err(|e| {
            warn!(error = %e, "Assistant reply failed");
            into_service_error(e)
        })?;

        self.transcript
            .push(ChatMessage::assistant(reply.content.clone()));
        Ok(reply.content)
    }

    /// Send a message and compose an outreach email when the reply reads as a letter.
    ///
    /// Only the reply itself can fail the turn. Outreach problems, including
    /// a letter with no selected company to address, end up in
    /// [`Turn::outreach_error`] and clear any earlier pending artifact.
    pub async fn converse(
        &mut self,
        backend: &dyn ChatBackend,
        composer: &OutreachComposer,
        user_text: &str,
        selected: Option<&CompanyRecord>,
    ) -> Result<Turn> {
        let reply = self.send(backend, user_text, selected).await?;
        let mut turn = Turn {
            words: reveal_words(&reply),
            reply,
            outreach_subject: None,
            outreach_error: None,
        };

        if !looks_like_letter(&turn.reply) {
            return Ok(turn);
        }

        let outcome = match selected {
            Some(record) => composer.compose(backend, &turn.reply, &record.mail).await,
            None => Err(Error::InvalidInput(
                "no company selected to address the letter to".to_string(),
            )),
        };
        match outcome {
            Ok(artifact) => {
                info!(subject = %artifact.subject, "Outreach letter ready for download");
                turn.outreach_subject = Some(artifact.subject.clone());
                self.pending_outreach = Some(artifact);
            }
            Err(e) => {
                warn!(error = %e, "Outreach composition failed");
                self.pending_outreach = None;
                turn.outreach_error = Some(e.to_string());
            }
        }
        Ok(turn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use truckscout_core::Role;

    #[test]
    fn test_new_session_has_greeting() {
        let session = AssistantSession::new();
        assert_eq!(
            session.transcript(),
            &[ChatMessage::assistant("Hello, how can I help you today?")]
        );
        assert!(session.pending_outreach().is_none());
    }

    #[test]
    fn test_reveal_words_keeps_order_and_spacing() {
        assert_eq!(reveal_words("Guten Tag  Team"), vec!["Guten ", "Tag ", " ", "Team "]);
        assert_eq!(reveal_words(""), vec![" "]);
        assert_eq!(reveal_words("a b c").concat(), "a b c ");
    }

    #[tokio::test(start_paused = true)]
    async fn test_reveal_stream_paces_words() {
        let started = tokio::time::Instant::now();
        let words: Vec<String> = reveal_stream("one two three", Duration::from_millis(20))
            .collect()
            .await;
        assert_eq!(words, vec!["one ", "two ", "three "]);
        assert!(started.elapsed() >= Duration::from_millis(40));
    }

    #[test]
    fn test_context_without_selection() {
        let session = AssistantSession::new();
        let context = session.build_context(None);
        assert_eq!(context.len(), 4);
        assert!(context[..3].iter().all(|m| m.role == Role::System));
        assert_eq!(context[3].role, Role::Assistant);
    }
}
