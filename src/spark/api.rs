//! A client for the messaging API, and the helpers it's built from.

use super::{auth::*, error::SparkError};
use url::Url;

/// The base URL of the messaging API.
pub const API_BASE: &str = "https://api.ciscospark.com/v1";

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// An authenticated client for the messaging API. Cloning is cheap and shares
/// the underlying connection pool, as per [reqwest::Client].
#[derive(Clone, Debug)]
pub struct SparkClient {
    http: reqwest::Client,
    base: Url,
    token: BotToken,
}

impl SparkClient {
    /// The base URL must be usable as a base, i.e. not something like a
    /// `data:` URL. This is checked when parsing configuration.
    pub fn new(base: Url, token: BotToken) -> Result<Self, SparkError> {
        let http = reqwest::Client::builder().user_agent(USER_AGENT).build()?;

        Ok(SparkClient { http, base, token })
    }

    /// Create a GET request to any API endpoint, handling authentication.
    pub(super) fn get(&self, segments: &[&str]) -> reqwest::RequestBuilder {
        self.http
            .get(endpoint(&self.base, segments))
            .header(reqwest::header::AUTHORIZATION, to_auth_header_val(&self.token))
    }

    /// Create a POST request to any API endpoint, handling authentication.
    pub(super) fn post(&self, segments: &[&str]) -> reqwest::RequestBuilder {
        self.http
            .post(endpoint(&self.base, segments))
            .header(reqwest::header::AUTHORIZATION, to_auth_header_val(&self.token))
    }
}

/// Append path segments to the base URL, percent-encoding each of them. A
/// trailing slash on the base is tolerated.
///
/// ```
/// let base = Url::parse("https://api.ciscospark.com/v1/").unwrap();
/// assert_eq!(
///     endpoint(&base, &["messages", "abc"]).as_str(),
///     "https://api.ciscospark.com/v1/messages/abc"
/// );
/// ```
pub fn endpoint(base: &Url, segments: &[&str]) -> Url {
    let mut url = base.clone();

    // Cannot-be-a-base URLs are rejected at startup, so this always applies.
    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty().extend(segments);
    }

    url
}

/// The API signals failure purely through HTTP status codes. Anything other
/// than a 2xx is turned into a [SparkError], keeping the body for context.
pub(super) async fn check_status(res: reqwest::Response) -> Result<reqwest::Response, SparkError> {
    let status = res.status();
    if status.is_success() {
        return Ok(res);
    }

    let body = res.text().await.unwrap_or_else(|_| String::from("<empty>"));

    Err(SparkError::Status { status, body })
}
