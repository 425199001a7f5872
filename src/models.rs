
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Layout of the server-assigned `date` field, microsecond precision.
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// Largest form body the HTTP front accepts.
pub const MAX_FORM_SIZE: usize = 1024 * 1024;

/// Largest frame the endpoint accepts. JSON escaping can at most double the
/// length of a decoded form value, so any accepted form fits in one frame.
pub const MAX_FRAME_SIZE: usize = 2 * MAX_FORM_SIZE;

/// The `{username, message}` frame the HTTP front relays to the endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessagePayload {
    pub username: String,
    pub message: String,
}

/// A stored chat message. Documents are append-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub date: String,
    pub username: String,
    pub message: String,
}

impl ChatMessage {
    /// Stamps a received payload with the time it arrived.
    pub fn received(payload: MessagePayload, at: DateTime<Local>) -> Self {
        ChatMessage {
            date: at.format(DATE_FORMAT).to_string(),
            username: payload.username,
            message: payload.message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDateTime, TimeZone};

    #[test]
    fn date_has_microsecond_precision() {
        let at = Local.with_ymd_and_hms(2024, 3, 9, 7, 5, 1).unwrap();
        let payload = MessagePayload {
            username: "alice".to_owned(),
            message: "hello".to_owned(),
        };

        let stamped = ChatMessage::received(payload, at);

        assert_eq!(stamped.date, "2024-03-09 07:05:01.000000");
        assert_eq!(stamped.username, "alice");
        assert_eq!(stamped.message, "hello");
    }

    #[test]
    fn date_parses_back_with_its_own_format() {
        let stamped = ChatMessage::received(
            MessagePayload {
                username: "bob".to_owned(),
                message: "hi".to_owned(),
            },
            Local::now(),
        );

        assert_eq!(stamped.date.len(), 26);
        assert!(NaiveDateTime::parse_from_str(&stamped.date, DATE_FORMAT).is_ok());
    }

    #[test]
    fn payload_ignores_extra_keys() {
        let payload: MessagePayload =
            serde_json::from_str(r#"{"username":"a","message":"b","room":"x"}"#).unwrap();
        assert_eq!(payload.username, "a");
        assert_eq!(payload.message, "b");
    }

    #[test]
    fn payload_requires_both_keys() {
        assert!(serde_json::from_str::<MessagePayload>(r#"{"username":"a"}"#).is_err());
        assert!(serde_json::from_str::<MessagePayload>(r#"{"username":"a","message":1}"#).is_err());
    }
}
