//! Receive webhook notifications of messages sent to the bot, and reply to
//! them.
//!
//! The webhook must be created externally against the bot's account, with
//! `resource` set to `messages` and `event` set to `created`, and with this
//! server's `/message` endpoint as the target URL. Supplying a secret when
//! creating the webhook enables signature verification, see [signature].

pub mod error;
pub mod event;
pub mod handler;
pub mod router;
pub mod signature;
