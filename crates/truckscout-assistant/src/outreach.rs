//! Outreach letter detection and email composition.
//!
//! A reply "looks like a letter" when it contains one of the salutation
//! markers in [`defaults::LETTER_MARKERS`]. This is a plain substring check
//! and knows nothing about intent: a chat answer quoting "Dear ..." will
//! trigger composition too.

use lettre::message::{Mailbox, MultiPart};
use lettre::Message;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use truckscout_core::{defaults, ChatBackend, ChatMessage, Error, Result};

use crate::prompts::HTML_FORMAT_INSTRUCTION;

static SUBJECT_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Subject: (.+?)\n").expect("valid subject pattern"));

static SUBJECT_LINE_GERMAN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Betreff: (.+?)\n").expect("valid subject pattern"));

/// True when the reply contains a letter salutation marker.
pub fn looks_like_letter(reply: &str) -> bool {
    defaults::LETTER_MARKERS
        .iter()
        .any(|marker| reply.contains(marker))
}

/// Subject line from a labeled `Subject:`/`Betreff:` line, else the fallback.
pub fn extract_subject(reply: &str) -> String {
    SUBJECT_LINE
        .captures(reply)
        .or_else(|| SUBJECT_LINE_GERMAN.captures(reply))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| defaults::FALLBACK_SUBJECT.to_string())
}

/// Remove a Markdown code fence wrapped around the whole text.
pub fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // drop the info string (```html)
    let body = match rest.find('\n') {
        Some(pos) => &rest[pos + 1..],
        None => return trimmed,
    };
    body.trim_end()
        .strip_suffix("```")
        .unwrap_or(body)
        .trim()
}

/// A complete email message ready for download.
#[derive(Debug, Clone, Serialize)]
pub struct OutreachArtifact {
    #[serde(skip)]
    pub bytes: Vec<u8>,
    pub filename: String,
    pub mime_type: String,
    pub subject: String,
    pub recipient: String,
}

/// Turns letter-like replies into multipart emails.
#[derive(Debug, Clone)]
pub struct OutreachComposer {
    sender: String,
}

impl Default for OutreachComposer {
    fn default() -> Self {
        Self::new(defaults::OUTREACH_SENDER)
    }
}

impl OutreachComposer {
    pub fn new(sender: impl Into<String>) -> Self {
        Self {
            sender: sender.into(),
        }
    }

    pub fn sender(&self) -> &str {
        &self.sender
    }

    /// Format `reply` as HTML via the backend and wrap it in an email to `recipient`.
    ///
    /// Addresses are checked before the backend is called. A failed
    /// formatting call yields `Error::Service` and no artifact.
    #[instrument(skip(self, backend, reply), fields(subsystem = "assistant", component = "outreach", op = "compose", reply_len = reply.len()))]
    pub async fn compose(
        &self,
        backend: &dyn ChatBackend,
        reply: &str,
        recipient: &str,
    ) -> Result<OutreachArtifact> {
        let from = parse_mailbox(&self.sender, "sender")?;
        let to = parse_mailbox(recipient, "recipient")?;
        let subject = extract_subject(reply);

        let messages = [
            ChatMessage::system(HTML_FORMAT_INSTRUCTION),
            ChatMessage::assistant(reply),
        ];
        let formatted = backend.complete(&messages).await.map_err(|e| {
            warn!(error = %e, "HTML formatting call failed");
            into_service_error(e)
        })?;
        let html = strip_code_fence(&formatted.content).to_string();
        debug!(html_len = html.len(), "Received HTML rendering");

        let message = Message::builder()
            .from(from)
            .to(to)
            .subject(subject.clone())
            .multipart(MultiPart::alternative_plain_html(
                defaults::PLAIN_TEXT_FALLBACK.to_string(),
                html,
            ))
            .map_err(|e| Error::Internal(format!("Failed to build email: {}", e)))?;

        let bytes = message.formatted();
        info!(subject = %subject, size = bytes.len(), "Outreach email composed");

        Ok(OutreachArtifact {
            bytes,
            filename: defaults::OUTREACH_FILENAME.to_string(),
            mime_type: defaults::OUTREACH_MIME_TYPE.to_string(),
            subject,
            recipient: recipient.to_string(),
        })
    }
}

fn parse_mailbox(address: &str, which: &str) -> Result<Mailbox> {
    address
        .trim()
        .parse::<Mailbox>()
        .map_err(|e| Error::InvalidInput(format!("invalid {} address '{}': {}", which, address, e)))
}

pub(crate) fn into_service_error(e: Error) -> Error {
    match e {
        Error::Service(msg) => Error::Service(msg),
        other => Error::Service(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letter_markers() {
        assert!(looks_like_letter("Dear Mr. Huber,\nthank you"));
        assert!(looks_like_letter("Sehr geehrte Damen und Herren,"));
        assert!(looks_like_letter("Sehr geehrter Herr Maier"));
        assert!(!looks_like_letter("The fleet has 40 tractors."));
        assert!(!looks_like_letter("dear friend"));
    }

    #[test]
    fn test_subject_english_first() {
        let reply = "Betreff: Probefahrt\nSubject: Test drive\nDear team";
        assert_eq!(extract_subject(reply), "Test drive");
    }

    #[test]
    fn test_subject_german() {
        let reply = "Betreff: Einladung zur Probefahrt\n\nSehr geehrte Damen und Herren";
        assert_eq!(extract_subject(reply), "Einladung zur Probefahrt");
    }

    #[test]
    fn test_subject_needs_line_end() {
        assert_eq!(extract_subject("Subject: trailing"), defaults::FALLBACK_SUBJECT);
    }

    #[test]
    fn test_subject_fallback() {
        assert_eq!(
            extract_subject("Dear team, hello"),
            "Welcome from Mercedes-Benz Trucks!"
        );
    }

    #[test]
    fn test_strip_code_fence() {
        assert_eq!(strip_code_fence("```html\n<p>Hi</p>\n```"), "<p>Hi</p>");
        assert_eq!(strip_code_fence("```\n<p>Hi</p>\n```\n"), "<p>Hi</p>");
        assert_eq!(strip_code_fence("  <p>Hi</p>  "), "<p>Hi</p>");
        assert_eq!(strip_code_fence("```"), "```");
    }

    #[test]
    fn test_invalid_addresses_rejected() {
        assert!(matches!(
            parse_mailbox("not an address", "recipient"),
            Err(Error::InvalidInput(_))
        ));
        assert!(matches!(parse_mailbox("", "recipient"), Err(Error::InvalidInput(_))));
        assert!(parse_mailbox("info@spedition.example", "recipient").is_ok());
    }

    #[test]
    fn test_into_service_error_keeps_message() {
        let err = into_service_error(Error::Serialization("bad json".to_string()));
        match err {
            Error::Service(msg) => assert!(msg.contains("bad json")),
            other => panic!("unexpected {:?}", other),
        }
    }
}
