//! Server-push event payloads.
//!
//! Each subscription frame carries one JSON object describing a chat event.
//! Decoding happens once, at the transport boundary; everything downstream
//! works with the typed [`ChatEvent`]. The legacy raw-string frame format is
//! not accepted.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when a frame payload is not a well-formed event.
///
/// Decode failures are recoverable: the frame is dropped and the
/// subscription stays up.
#[derive(Debug, Error)]
#[error("malformed event payload: {0}")]
pub struct DecodeError(#[from] serde_json::Error);

/// Classification tag carried by every event.
///
/// Routing is exhaustive: tags this client does not recognize deserialize as
/// [`MessageKind::Chat`] and get the standard message treatment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String")]
pub enum MessageKind {
    /// A user joined the room.
    #[serde(rename = "WELCOME_MESSAGE")]
    Welcome,

    /// A user left the room.
    #[serde(rename = "LEAVE_MESSAGE")]
    Leave,

    /// A regular chat message. Catch-all for unrecognized tags.
    #[serde(rename = "MESSAGE")]
    Chat,
}

impl From<String> for MessageKind {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "WELCOME_MESSAGE" => Self::Welcome,
            "LEAVE_MESSAGE" => Self::Leave,
            _ => Self::Chat,
        }
    }
}

/// One decoded unit of server-pushed data. Immutable once decoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatEvent {
    /// Event classification tag.
    #[serde(rename = "messageType")]
    pub message_type: MessageKind,

    /// Human-readable event text.
    pub message: String,

    /// Creation timestamp as an ISO-8601 string. Kept verbatim; the only
    /// consumer is the display-time extraction in [`ChatEvent::time_label`].
    pub created: String,
}

impl ChatEvent {
    /// Decode one frame payload.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError`] if the payload is not a well-formed event
    /// object, including the legacy raw-string frame format.
    pub fn decode(payload: &str) -> Result<Self, DecodeError> {
        Ok(serde_json::from_str(payload)?)
    }

    /// Time-of-day portion of `created`, truncated to whole seconds.
    ///
    /// Display-only transform: the substring after the date/time separator,
    /// cut before any fractional part or timezone designator. No timezone
    /// conversion. Returns an empty label when `created` has no separator.
    pub fn time_label(&self) -> &str {
        let Some((_, time)) = self.created.split_once('T') else {
            return "";
        };
        let end = time.find(['.', 'Z', '+', '-']).unwrap_or(time.len());
        &time[..end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_json_object_form() {
        let event = ChatEvent::decode(
            r#"{"messageType":"WELCOME_MESSAGE","message":"Alice joined","created":"2024-01-02T12:20:05Z"}"#,
        )
        .unwrap();

        assert_eq!(event.message_type, MessageKind::Welcome);
        assert_eq!(event.message, "Alice joined");
        assert_eq!(event.created, "2024-01-02T12:20:05Z");
    }

    #[test]
    fn unrecognized_tag_routes_to_chat() {
        let event = ChatEvent::decode(
            r#"{"messageType":"SOMETHING_NEW","message":"hi","created":"2024-01-02T12:20:05Z"}"#,
        )
        .unwrap();

        assert_eq!(event.message_type, MessageKind::Chat);
    }

    #[test]
    fn message_tag_routes_to_chat() {
        let event = ChatEvent::decode(
            r#"{"messageType":"MESSAGE","message":"hi","created":"2024-01-02T12:20:05Z"}"#,
        )
        .unwrap();

        assert_eq!(event.message_type, MessageKind::Chat);
    }

    #[test]
    fn kind_serializes_to_wire_tags() {
        assert_eq!(serde_json::to_string(&MessageKind::Welcome).unwrap(), r#""WELCOME_MESSAGE""#);
        assert_eq!(serde_json::to_string(&MessageKind::Leave).unwrap(), r#""LEAVE_MESSAGE""#);
        assert_eq!(serde_json::to_string(&MessageKind::Chat).unwrap(), r#""MESSAGE""#);
    }

    #[test]
    fn legacy_raw_string_frame_is_rejected() {
        assert!(ChatEvent::decode("User Logged in: abcd").is_err());
        assert!(ChatEvent::decode(r#""just a json string""#).is_err());
    }

    #[test]
    fn missing_field_is_rejected() {
        assert!(ChatEvent::decode(r#"{"messageType":"MESSAGE","message":"hi"}"#).is_err());
    }

    #[test]
    fn time_label_truncates_to_whole_seconds() {
        let mut event = ChatEvent {
            message_type: MessageKind::Chat,
            message: String::new(),
            created: "2024-01-02T12:20:05.123Z".to_string(),
        };
        assert_eq!(event.time_label(), "12:20:05");

        event.created = "2024-01-02T12:20:05Z".to_string();
        assert_eq!(event.time_label(), "12:20:05");

        event.created = "2024-01-02T12:20:05+02:00".to_string();
        assert_eq!(event.time_label(), "12:20:05");

        event.created = "2024-01-02T12:20:05-07:00".to_string();
        assert_eq!(event.time_label(), "12:20:05");
    }

    #[test]
    fn time_label_without_separator_is_empty() {
        let event = ChatEvent {
            message_type: MessageKind::Chat,
            message: String::new(),
            created: "12:20:05".to_string(),
        };
        assert_eq!(event.time_label(), "");
    }
}
