// src/services/chat_client.rs
//! Message-list state for one chat session.
//!
//! A send moves the client from [`SendState::Idle`] to [`SendState::Pending`]
//! and back. Submissions made while pending are dropped, not queued.
//! `clear()` during a send bumps the generation so the late reply is
//! discarded instead of landing in the fresh transcript.

use crate::message::ChatMessage;
use crate::services::transport::{ClientError, RelayReply, RelayTransport};

pub const GREETING: &str = "Hello! I'm your thirdweb AI assistant. I can help you with blockchain transactions, smart contracts, and Web3 development. What would you like to do today?";
pub const EMPTY_REPLY_FALLBACK: &str = "I'm sorry, I couldn't process your request. Please try again.";
pub const SEND_FAILURE: &str = "Sorry, I encountered an error while processing your request. Please check your API configuration and try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendState {
    Idle,
    Pending,
}

/// Ticket for one in-flight relay call, handed back to [`ChatClient::finish`].
#[derive(Debug)]
#[must_use]
pub struct PendingSend {
    pub text: String,
    generation: u64,
}

#[derive(Debug)]
pub struct ChatClient {
    messages: Vec<ChatMessage>,
    draft: String,
    state: SendState,
    generation: u64,
}

impl Default for ChatClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatClient {
    pub fn new() -> Self {
        Self {
            messages: vec![ChatMessage::assistant(GREETING)],
            draft: String::new(),
            state: SendState::Idle,
            generation: 0,
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    pub fn state(&self) -> SendState {
        self.state
    }

    pub fn is_pending(&self) -> bool {
        self.state == SendState::Pending
    }

    /// Guard plus optimistic append. Returns `None` when the send is dropped.
    pub fn begin_submit(&mut self, text: &str) -> Option<PendingSend> {
        let trimmed = text.trim();
        if trimmed.is_empty() || self.is_pending() {
            return None;
        }

        self.messages.push(ChatMessage::user(trimmed));
        self.draft.clear();
        self.state = SendState::Pending;

        Some(PendingSend {
            text: trimmed.to_string(),
            generation: self.generation,
        })
    }

    /// Record the outcome of a send and return to idle.
    ///
    /// Returns the appended message, or `None` if the transcript was cleared
    /// while the call was in flight.
    pub fn finish(
        &mut self,
        ticket: PendingSend,
        outcome: Result<RelayReply, ClientError>,
    ) -> Option<&ChatMessage> {
        self.state = SendState::Idle;

        if ticket.generation != self.generation {
            tracing::debug!("dropping relay reply for a cleared conversation");
            return None;
        }

        let message = match outcome {
            Ok(reply) => ChatMessage::assistant(
                reply
                    .response
                    .filter(|r| !r.is_empty())
                    .unwrap_or_else(|| EMPTY_REPLY_FALLBACK.to_string()),
            ),
            Err(err) => {
                tracing::warn!(error = %err, "error sending message");
                ChatMessage::assistant_error(SEND_FAILURE)
            }
        };
        self.messages.push(message);
        self.messages.last()
    }

    /// Submit `text` through `transport`. A dropped submission never calls it.
    pub async fn submit<T>(&mut self, transport: &T, text: &str) -> Option<&ChatMessage>
    where
        T: RelayTransport + ?Sized,
    {
        let ticket = self.begin_submit(text)?;
        let outcome = transport.send(&ticket.text).await;
        self.finish(ticket, outcome)
    }

    /// Submit the current draft.
    pub async fn submit_draft<T>(&mut self, transport: &T) -> Option<&ChatMessage>
    where
        T: RelayTransport + ?Sized,
    {
        let draft = std::mem::take(&mut self.draft);
        let ticket = match self.begin_submit(&draft) {
            Some(ticket) => ticket,
            None => {
                self.draft = draft;
                return None;
            }
        };
        let outcome = transport.send(&ticket.text).await;
        self.finish(ticket, outcome)
    }

    /// Reset to the greeting. Leaves the draft and any pending send alone.
    pub fn clear(&mut self) {
        self.messages = vec![ChatMessage::assistant(GREETING)];
        self.generation += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::MessageRole;

    #[test]
    fn starts_with_greeting() {
        let client = ChatClient::new();
        assert_eq!(client.messages().len(), 1);
        assert_eq!(client.messages()[0].role, MessageRole::Assistant);
        assert_eq!(client.messages()[0].content, GREETING);
        assert_eq!(client.state(), SendState::Idle);
    }

    #[test]
    fn blank_input_is_ignored() {
        let mut client = ChatClient::new();
        assert!(client.begin_submit("").is_none());
        assert!(client.begin_submit("   ").is_none());
        assert_eq!(client.messages().len(), 1);
        assert!(!client.is_pending());
    }

    #[test]
    fn optimistic_append_before_reply() {
        let mut client = ChatClient::new();
        client.set_draft("  gm  ");
        let ticket = client.begin_submit("  gm  ").unwrap();
        assert_eq!(ticket.text, "gm");
        assert_eq!(client.messages().len(), 2);
        assert_eq!(client.messages()[1].role, MessageRole::User);
        assert_eq!(client.messages()[1].content, "gm");
        assert!(client.draft().is_empty());
        assert!(client.is_pending());
        let _ = client.finish(ticket, Ok(RelayReply::default()));
    }

    #[test]
    fn second_submit_while_pending_is_dropped() {
        let mut client = ChatClient::new();
        let ticket = client.begin_submit("first").unwrap();
        assert!(client.begin_submit("second").is_none());
        assert_eq!(client.messages().len(), 2);
        let _ = client.finish(ticket, Ok(RelayReply::default()));
    }

    #[test]
    fn empty_reply_uses_fallback() {
        let mut client = ChatClient::new();
        let ticket = client.begin_submit("hi").unwrap();
        let msg = client
            .finish(ticket, Ok(RelayReply { response: Some(String::new()) }))
            .unwrap();
        assert_eq!(msg.content, EMPTY_REPLY_FALLBACK);
        assert!(!msg.is_error);
    }

    #[test]
    fn failure_appends_flagged_message() {
        let mut client = ChatClient::new();
        let ticket = client.begin_submit("hi").unwrap();
        let msg = client.finish(ticket, Err(ClientError::Status(503))).unwrap();
        assert_eq!(msg.content, SEND_FAILURE);
        assert!(msg.is_error);
        assert!(!client.is_pending());
    }

    #[test]
    fn clear_is_idempotent() {
        let mut client = ChatClient::new();
        for text in ["a", "b", "c"] {
            let ticket = client.begin_submit(text).unwrap();
            let _ = client.finish(ticket, Ok(RelayReply { response: Some("ok".into()) }));
        }
        assert_eq!(client.messages().len(), 7);
        client.clear();
        assert_eq!(client.messages().len(), 1);
        client.clear();
        assert_eq!(client.messages().len(), 1);
        assert_eq!(client.messages()[0].content, GREETING);
    }

    #[test]
    fn reply_after_clear_is_discarded() {
        let mut client = ChatClient::new();
        let ticket = client.begin_submit("slow question").unwrap();
        client.clear();
        assert!(client.is_pending());
        assert!(client.finish(ticket, Ok(RelayReply { response: Some("late".into()) })).is_none());
        assert_eq!(client.messages().len(), 1);
        assert!(!client.is_pending());
    }
}
