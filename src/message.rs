// src/message.rs
use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Body of `POST /api/relay-chat`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelayRequest {
    pub message: String,
}

/// Successful relay body. `usage` serializes as `null` when upstream sent none.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelayResponse {
    pub response: String,
    #[serde(default)]
    pub usage: Option<Value>,
}

/// Failure body. `response` is always something the client can render as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    pub response: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

/// One entry of the transcript held by the chat client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: String,
    pub role: MessageRole,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub is_error: bool,
}

impl ChatMessage {
    fn new(role: MessageRole, content: impl Into<String>, is_error: bool) -> Self {
        Self {
            // v7 ids sort by creation time
            id: Uuid::now_v7().to_string(),
            role,
            content: content.into(),
            timestamp: Utc::now(),
            is_error,
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(MessageRole::User, content, false)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(MessageRole::Assistant, content, false)
    }

    pub fn assistant_error(content: impl Into<String>) -> Self {
        Self::new(MessageRole::Assistant, content, true)
    }

    /// Local `HH:MM`, the way the widget labels bubbles.
    pub fn display_time(&self) -> String {
        self.timestamp.with_timezone(&Local).format("%H:%M").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relay_response_keeps_null_usage() {
        let body = RelayResponse { response: "hello".into(), usage: None };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json, serde_json::json!({ "response": "hello", "usage": null }));
    }

    #[test]
    fn chat_message_uses_camel_case_flag() {
        let msg = ChatMessage::assistant_error("oops");
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["isError"], true);
        assert_eq!(json["role"], "assistant");
    }

    #[test]
    fn ids_are_unique() {
        let a = ChatMessage::user("a");
        let b = ChatMessage::user("b");
        assert_ne!(a.id, b.id);
        assert_eq!(a.display_time().len(), 5);
    }
}
