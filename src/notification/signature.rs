//! Helpers around the use of a shared secret to authenticate webhook requests.
//!
//! Requests are validated with a secret that's given to the messaging platform
//! when creating the webhook. The secret is used to sign the request body with
//! HMAC-SHA1, the hex digest of which is included in a header. We'll compare
//! our own signature against it to know if the request really came from the
//! platform.
//!
//! <https://developer.webex.com/docs/api/guides/webhooks#auth>

use axum::http::HeaderMap;
use hmac::{Hmac, Mac};
use sha1::Sha1;
use std::fmt;

type HmacSha1 = Hmac<Sha1>;

/// The header carrying the request signature.
pub const SIGNATURE_HEADER: &str = "x-spark-signature";

/// A newtype wrapper around the webhook secret.
#[derive(Clone)]
pub struct WebhookSecret(pub String);

impl fmt::Debug for WebhookSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WebhookSecret(..)")
    }
}

/// Why a request failed validation.
#[derive(Debug, PartialEq, Eq)]
pub enum SignatureError {
    Missing,
    Invalid,
}

/// Validate a request's body against the signature in its headers.
pub fn validate_request_signature(
    secret: &WebhookSecret,
    body: &[u8],
    headers: &HeaderMap,
) -> Result<(), SignatureError> {
    let sig = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or(SignatureError::Missing)?;

    if is_valid_signature(secret, body, sig) {
        Ok(())
    } else {
        Err(SignatureError::Invalid)
    }
}

/// Compare a valid signature for a payload against that offered alongside it
/// in a request, in constant time. Requests which fail this predicate, or
/// which don't have a signature at all, should be considered unauthenticated.
pub fn is_valid_signature(secret: &WebhookSecret, payload: &[u8], sig: &str) -> bool {
    let Ok(sig) = hex::decode(sig.trim()) else {
        return false;
    };

    HmacSha1::new_from_slice(secret.0.as_bytes())
        .map(|mut mac| {
            mac.update(payload);
            mac.verify_slice(&sig).is_ok()
        })
        .unwrap_or(false)
}

/// Generate a valid signature with our secret for a payload.
#[cfg(test)]
pub fn gen_signature(secret: &WebhookSecret, payload: &[u8]) -> Option<String> {
    HmacSha1::new_from_slice(secret.0.as_bytes())
        .map(|mut mac| {
            mac.update(payload);
            hex::encode(mac.finalize().into_bytes())
        })
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    const VALID_SIG: &str = "a7272d4a533fe615b20378ab499440c1822ae7bd";

    fn secret() -> WebhookSecret {
        WebhookSecret(String::from("foobar"))
    }

    #[test]
    fn test_is_valid_signature() {
        let payload = b"a wild payload appeared";

        assert!(is_valid_signature(&secret(), payload, VALID_SIG));
        assert!(is_valid_signature(
            &secret(),
            payload,
            &VALID_SIG.to_uppercase()
        ));
        assert!(!is_valid_signature(&secret(), payload, "invalid signature"));
        assert!(!is_valid_signature(&secret(), b"another payload", VALID_SIG));
        assert!(!is_valid_signature(
            &WebhookSecret(String::from("not foobar")),
            payload,
            VALID_SIG
        ));
    }

    /// As a sanity check you can get the same output in Python:
    ///
    /// ```python
    /// hmac.new(b"foobar", b"a wild payload appeared", hashlib.sha1).hexdigest()
    /// ```
    #[test]
    fn test_gen_signature() {
        assert_eq!(
            gen_signature(&secret(), b"a wild payload appeared"),
            Some(VALID_SIG.to_owned())
        );
    }

    #[test]
    fn test_validate_request_signature() {
        let payload = b"a wild payload appeared";

        let mut headers = HeaderMap::new();
        assert_eq!(
            validate_request_signature(&secret(), payload, &headers),
            Err(SignatureError::Missing)
        );

        headers.insert(SIGNATURE_HEADER, HeaderValue::from_static("deadbeef"));
        assert_eq!(
            validate_request_signature(&secret(), payload, &headers),
            Err(SignatureError::Invalid)
        );

        headers.insert(SIGNATURE_HEADER, HeaderValue::from_static(VALID_SIG));
        assert_eq!(
            validate_request_signature(&secret(), payload, &headers),
            Ok(())
        );
    }
}
