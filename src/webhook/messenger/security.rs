//! Security utilities for Messenger webhook requests
//!
//! Two checks live here:
//! - the subscription handshake compares the presented verify token with the
//!   configured one
//! - payloads may be authenticated through the `X-Hub-Signature-256` header,
//!   an HMAC-SHA256 of the raw request body keyed with the app secret and
//!   formatted as `sha256=<hex_signature>`
//!
//! Both comparisons are constant-time.

use crate::consts;
use hmac::{Hmac, Mac};
use log::{error, warn};
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// Checks a subscription handshake: mode must be "subscribe" and the token
/// must equal the configured verify token.
pub fn verify_subscription(mode: &str, presented_token: &str, verify_token: &str) -> bool {
    let token_matches: bool = presented_token
        .as_bytes()
        .ct_eq(verify_token.as_bytes())
        .into();

    mode == consts::SUBSCRIBE_MODE && token_matches
}

/// Verifies the X-Hub-Signature-256 header against the raw request body
///
/// # Arguments
///
/// * `signature_header` - The header value (e.g., "sha256=abc123...")
/// * `payload` - The raw request body bytes
/// * `app_secret` - The app secret
///
/// # Returns
///
/// `true` only when the header is well formed and the signature matches
pub fn verify_signature(signature_header: &str, payload: &[u8], app_secret: &str) -> bool {
    let Some(signature_hex) = signature_header.strip_prefix(consts::SIGNATURE_PREFIX) else {
        warn!("Invalid signature header format: expected 'sha256=' prefix");
        return false;
    };

    let expected_signature = match hex::decode(signature_hex) {
        Ok(sig) => sig,
        Err(e) => {
            warn!("Failed to decode signature hex: {e}");
            return false;
        }
    };

    let mut mac = match HmacSha256::new_from_slice(app_secret.as_bytes()) {
        Ok(m) => m,
        Err(e) => {
            error!("Failed to create HMAC instance: {e}");
            return false;
        }
    };

    mac.update(payload);
    let computed_signature = mac.finalize().into_bytes();

    let is_valid: bool = computed_signature.ct_eq(&expected_signature[..]).into();

    if !is_valid {
        warn!("Webhook signature verification failed: signatures do not match");
    }

    is_valid
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn sign(payload: &[u8], secret: &str) -> String {
        let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).unwrap();
        mac.update(payload);
        format!("sha256={}", hex::encode(mac.finalize().into_bytes()))
    }

    #[test]
    fn test_verify_subscription() {
        assert!(verify_subscription("subscribe", "token", "token"));
        assert!(!verify_subscription("subscribe", "wrong", "token"));
        assert!(!verify_subscription("unsubscribe", "token", "token"));
        assert!(!verify_subscription("", "", "token"));
    }

    #[test]
    fn test_verify_signature_valid() {
        let payload = b"{\"object\":\"page\"}";
        let header = sign(payload, "test_secret");

        assert!(verify_signature(&header, payload, "test_secret"));
    }

    #[test]
    fn test_verify_signature_wrong_secret() {
        let payload = b"{\"object\":\"page\"}";
        let header = sign(payload, "wrong_secret");

        assert!(!verify_signature(&header, payload, "test_secret"));
    }

    #[test]
    fn test_verify_signature_invalid_header_format() {
        let payload = b"{\"object\":\"page\"}";

        assert!(!verify_signature("abc123", payload, "test_secret"));
        assert!(!verify_signature("sha1=abc123", payload, "test_secret"));
        assert!(!verify_signature("sha256=zzzzz", payload, "test_secret"));
    }

    #[test]
    fn test_verify_signature_tampered_payload() {
        let header = sign(b"{\"object\":\"page\"}", "test_secret");

        assert!(!verify_signature(&header, b"{\"object\":\"group\"}", "test_secret"));
    }
}
