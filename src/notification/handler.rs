//! Reply to a single notification: fetch the message it references, then send
//! the sender a fixed reply.

use super::{error::HandlerError, event::NotificationData};
use crate::spark::{
    api::SparkClient,
    message::{PersonEmail, PersonId, Reply},
};
use tracing::{debug, error};

/// Put together the reply, which is the same regardless of the content of
/// the message being replied to.
pub fn compose_reply(sender: &PersonEmail, recipient: PersonId) -> Reply {
    Reply {
        markdown: format!("I'm *very* excited by your message, {}", sender),
        person_id: recipient,
    }
}

/// Fetch the message and then reply to its sender. Either both calls succeed
/// or the notification has failed; nothing is retried.
pub async fn handle(client: &SparkClient, event: NotificationData) -> Result<(), HandlerError> {
    let NotificationData {
        person_email,
        id,
        person_id,
    } = event;

    let fetched = client.get_message(&id).await;
    let msg = match fetched {
        Ok(msg) => msg,
        Err(e) => {
            error!(
                sender = %person_email,
                message_id = %id,
                status = ?e.status(),
                "Error getting message from {}: {}",
                person_email,
                e
            );

            return Err(HandlerError::UpstreamFetch { id, source: e });
        }
    };

    match &msg.text {
        Some(text) => debug!("Fetched message content: {:?}", text),
        None => debug!("Fetched message {} has no text content", id),
    }

    let reply = compose_reply(&person_email, person_id);

    client.post_message(&reply).await.map_err(|e| {
        error!(
            sender = %person_email,
            message_id = %id,
            status = ?e.status(),
            "Error replying to {}: {}",
            person_email,
            e
        );

        HandlerError::UpstreamSend {
            recipient: reply.person_id,
            source: e,
        }
    })
}
