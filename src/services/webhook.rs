// src/services/webhook.rs
use serde_json::Value;

/// Mini-app lifecycle events we know about.
#[derive(Debug, Clone, PartialEq)]
pub enum WebhookEvent {
    UserConnected(Value),
    UserDisconnected(Value),
    Unknown(Option<String>),
}

impl WebhookEvent {
    pub fn from_payload(payload: &Value) -> Self {
        let data = payload.get("data").cloned().unwrap_or(Value::Null);
        match payload.get("type").and_then(Value::as_str) {
            Some("user.connected") => WebhookEvent::UserConnected(data),
            Some("user.disconnected") => WebhookEvent::UserDisconnected(data),
            other => WebhookEvent::Unknown(other.map(str::to_string)),
        }
    }
}

/// Log the payload and the event it carries.
pub fn record(payload: &Value) -> WebhookEvent {
    tracing::info!(payload = %payload, "webhook received");

    let event = WebhookEvent::from_payload(payload);
    match &event {
        WebhookEvent::UserConnected(data) => tracing::info!(data = %data, "user connected"),
        WebhookEvent::UserDisconnected(data) => tracing::info!(data = %data, "user disconnected"),
        WebhookEvent::Unknown(kind) => tracing::info!(kind = ?kind, "unknown webhook event"),
    }
    event
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn recognises_connection_events() {
        let ev = WebhookEvent::from_payload(&json!({ "type": "user.connected", "data": { "fid": 1 } }));
        assert_eq!(ev, WebhookEvent::UserConnected(json!({ "fid": 1 })));

        let ev = WebhookEvent::from_payload(&json!({ "type": "user.disconnected" }));
        assert_eq!(ev, WebhookEvent::UserDisconnected(Value::Null));
    }

    #[test]
    fn anything_else_is_unknown() {
        assert_eq!(
            record(&json!({ "type": "frame.added" })),
            WebhookEvent::Unknown(Some("frame.added".into()))
        );
        assert_eq!(record(&json!([1, 2, 3])), WebhookEvent::Unknown(None));
    }
}
