//! The Bot API response envelope.
//!
//! Every answer has the shape `{"ok": true, "result": ...}` or
//! `{"ok": false, "error_code": ..., "description": ..., "parameters": {...}}`.

use serde_json::Value;
use tbo_types::deserialize::{self, Field, FromWire};
use tbo_types::types::Message;

use crate::errors::{ApiError, InvocationError};

/// Extracts `result` from a raw response body.
pub(crate) fn unwrap_envelope(method: &str, body: &str) -> Result<Value, InvocationError> {
    let malformed = |reason: &str| InvocationError::MalformedResponse {
        method: method.to_owned(),
        reason: reason.to_owned(),
    };

    let value: Value = serde_json::from_str(body).map_err(|e| malformed(&e.to_string()))?;
    let Value::Object(mut envelope) = value else {
        return Err(malformed("not a JSON object"));
    };
    let ok = envelope
        .get("ok")
        .and_then(Value::as_bool)
        .ok_or_else(|| malformed("missing `ok`"))?;

    if !ok {
        let params = envelope.get("parameters");
        return Err(InvocationError::Api(ApiError {
            method: method.to_owned(),
            code: envelope
                .get("error_code")
                .and_then(Value::as_i64)
                .and_then(|c| i32::try_from(c).ok())
                .unwrap_or_default(),
            description: envelope
                .get("description")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_owned(),
            retry_after: params.and_then(|p| p.get("retry_after")).and_then(Value::as_u64),
            migrate_to_chat_id: params.and_then(|p| p.get("migrate_to_chat_id")).and_then(Value::as_i64),
        }));
    }

    envelope.remove("result").ok_or_else(|| malformed("missing `result`"))
}

/// Outcome of an `edit_message_*` call: the edited message for chat
/// messages, plain `true` for inline messages.
#[derive(Clone, Debug, PartialEq)]
pub enum EditResult {
    Message(Box<Message>),
    Done,
}

impl FromWire for EditResult {
    fn from_wire(value: &Value, at: Field) -> deserialize::Result<Self> {
        match value {
            Value::Bool(true) => Ok(Self::Done),
            Value::Object(_)  => Message::from_wire(value, at).map(|m| Self::Message(Box::new(m))),
            _                 => Err(at.invalid("message or true")),
        }
    }
}
