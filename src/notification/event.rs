//! The webhook payload describing a message sent to the bot.

use super::error::HandlerError;
use crate::spark::message::{MessageId, PersonEmail, PersonId};
use serde::Deserialize;

/// The anticipated payload supplied in webhook requests. Only `data` is of
/// interest, the rest describes the webhook itself.
///
/// <https://developer.webex.com/docs/api/guides/webhooks#handling-requests-from-webex>
#[derive(Debug, PartialEq, Deserialize)]
pub struct Notification {
    pub data: NotificationData,
}

/// A reference to the message which was sent, along with its sender. Note that
/// the message content isn't included.
#[derive(Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationData {
    #[serde(deserialize_with = "crate::de::non_empty")]
    pub person_email: PersonEmail,
    #[serde(deserialize_with = "crate::de::non_empty")]
    pub id: MessageId,
    #[serde(deserialize_with = "crate::de::non_empty")]
    pub person_id: PersonId,
}

/// Decode a raw request body, failing with [HandlerError::MalformedEvent] if
/// any required field is absent or empty.
pub fn decode(body: &[u8]) -> Result<NotificationData, HandlerError> {
    serde_json::from_slice::<Notification>(body)
        .map(|n| n.data)
        .map_err(|e| HandlerError::MalformedEvent(e.to_string()))
}
