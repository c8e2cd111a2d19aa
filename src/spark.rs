//! Talk to the Webex (née Cisco Spark) messaging API on behalf of the bot.
//!
//! Only the two calls the bot needs are supported: reading a message by its
//! ID, and sending a direct message to a person. See [message].

pub mod api;
pub mod auth;
pub mod error;
pub mod message;
