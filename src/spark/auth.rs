//! Helpers around the bot's use of Bearer Authentication.

use std::fmt;

/// A newtype wrapper around the bot's access token.
#[derive(Clone, PartialEq, Eq)]
pub struct BotToken(pub String);

/// Never print the token itself, not even in debug output.
impl fmt::Debug for BotToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BotToken(..)")
    }
}

/// Convert a bot access token to a `Bearer` `Authorization` header value.
///
/// ```
/// let token = BotToken("abc123".into());
/// assert_eq!(to_auth_header_val(&token), "Bearer abc123");
/// ```
pub fn to_auth_header_val(t: &BotToken) -> String {
    format!("Bearer {}", t.0)
}
