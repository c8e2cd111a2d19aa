//! Read messages sent to the bot, and send direct messages back.

use super::{api::*, error::SparkError};
use reqwest::multipart::Form;
use serde::Deserialize;
use std::fmt;

/// The opaque ID of a message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MessageId(pub String);

/// The opaque ID of a person, usable as the recipient of a direct message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PersonId(pub String);

/// The email address a person is known by.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PersonEmail(pub String);

macro_rules! impl_newtype {
    ($($t:ident),*) => {
        $(
            /// Format without the surrounding newtype wrapper.
            impl fmt::Display for $t {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    write!(f, "{}", self.0)
                }
            }

            impl From<String> for $t {
                fn from(x: String) -> Self {
                    $t(x)
                }
            }
        )*
    };
}

impl_newtype!(MessageId, PersonId, PersonEmail);

/// The parts of a message we care about.
///
/// <https://developer.webex.com/docs/api/v1/messages/get-message-details>
#[derive(Debug, PartialEq, Deserialize)]
pub struct Message {
    /// Absent for messages that only carry files or cards.
    #[serde(default)]
    pub text: Option<String>,
}

/// A direct message to a single person, formatted with Markdown.
#[derive(Debug, PartialEq)]
pub struct Reply {
    pub markdown: String,
    pub person_id: PersonId,
}

impl Reply {
    /// <https://developer.webex.com/docs/api/v1/messages/create-a-message>
    fn to_form(&self) -> Form {
        Form::new()
            .text("markdown", self.markdown.clone())
            .text("personId", self.person_id.0.clone())
    }
}

impl SparkClient {
    /// Fetch a message's details. The notification the bot receives only
    /// references the message, it doesn't include its content.
    pub async fn get_message(&self, id: &MessageId) -> Result<Message, SparkError> {
        let res = self.get(&["messages", id.0.as_str()]).send().await?;

        Ok(check_status(res).await?.json().await?)
    }

    /// Send a reply as a multipart form.
    pub async fn post_message(&self, reply: &Reply) -> Result<(), SparkError> {
        let res = self
            .post(&["messages"])
            .multipart(reply.to_form())
            .send()
            .await?;

        check_status(res).await.map(|_| ())
    }
}
