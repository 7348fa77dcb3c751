//! Token Codec
//!
//! Signs a principal's identity into an opaque, tamper-evident bearer
//! token and verifies presented tokens back into claims.
//!
//! Token format: `b64url(claims JSON) . b64url(HMAC-SHA256(claims JSON))`.
//! The signature covers the exact payload bytes, so any mutation of the
//! encoded claims invalidates it. Validation is stateless: no session
//! table, no shared storage, just the process-wide secret and the clock.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::Utc;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use thiserror::Error;

use crate::application::config::AuthConfig;
use crate::domain::entity::principal::Principal;

type HmacSha256 = Hmac<Sha256>;

/// Claims carried inside a token
///
/// Timestamps are whole-second UNIX epoch values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Canonical username of the principal
    pub subject: String,
    /// Issuance time (seconds since epoch)
    pub issued_at: i64,
    /// Hard expiry (seconds since epoch); strict `now > expires_at`
    pub expires_at: i64,
}

/// Token validation failures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenError {
    /// Token string could not be decoded into payload + signature
    #[error("malformed token")]
    Malformed,

    /// Embedded signature does not match the payload
    #[error("token signature mismatch")]
    SignatureMismatch,

    /// Token is past its expiry
    #[error("token expired")]
    Expired,
}

/// Stateless token issue/validate service
#[derive(Clone)]
pub struct TokenCodec {
    secret: [u8; 32],
    ttl_secs: i64,
}

impl TokenCodec {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            secret: config.token_secret,
            ttl_secs: config.token_ttl_secs(),
        }
    }

    /// Issue a signed token for a principal
    ///
    /// Pure function of the principal, the process secret and the clock.
    pub fn issue(&self, principal: &Principal) -> String {
        let now = Utc::now().timestamp();
        let claims = Claims {
            subject: principal.username.canonical().to_string(),
            issued_at: now,
            expires_at: now + self.ttl_secs,
        };

        let payload =
            serde_json::to_vec(&claims).expect("claims serialize to JSON infallibly");

        let mut mac = HmacSha256::new_from_slice(&self.secret)
            .expect("HMAC can take key of any size");
        mac.update(&payload);
        let signature = mac.finalize().into_bytes();

        format!(
            "{}.{}",
            URL_SAFE_NO_PAD.encode(&payload),
            URL_SAFE_NO_PAD.encode(signature)
        )
    }

    /// Validate a token against the current clock
    pub fn validate(&self, token: &str) -> Result<Claims, TokenError> {
        self.validate_at(token, Utc::now().timestamp())
    }

    /// Validate a token at an explicit timestamp
    ///
    /// The signature is checked in constant time before the claims are
    /// even parsed; expiry is a hard boundary with no skew compensation.
    pub fn validate_at(&self, token: &str, now: i64) -> Result<Claims, TokenError> {
        let parts: Vec<&str> = token.split('.').collect();
        if parts.len() != 2 {
            return Err(TokenError::Malformed);
        }

        let payload = URL_SAFE_NO_PAD
            .decode(parts[0])
            .map_err(|_| TokenError::Malformed)?;
        let signature = URL_SAFE_NO_PAD
            .decode(parts[1])
            .map_err(|_| TokenError::Malformed)?;

        let mut mac = HmacSha256::new_from_slice(&self.secret)
            .expect("HMAC can take key of any size");
        mac.update(&payload);
        mac.verify_slice(&signature)
            .map_err(|_| TokenError::SignatureMismatch)?;

        let claims: Claims =
            serde_json::from_slice(&payload).map_err(|_| TokenError::Malformed)?;

        if now > claims.expires_at {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::Username;
    use platform::password::ClearTextPassword;

    fn codec() -> TokenCodec {
        TokenCodec::new(&AuthConfig::with_random_secret())
    }

    fn principal(name: &str) -> Principal {
        let hash = ClearTextPassword::new("Secret123".to_string())
            .unwrap()
            .hash(None)
            .unwrap();
        Principal::new(Username::new(name).unwrap(), None, hash)
    }

    #[test]
    fn test_issue_then_validate_round_trip() {
        let codec = codec();
        let principal = principal("Alice");

        let token = codec.issue(&principal);
        assert!(!token.is_empty());

        let claims = codec.validate(&token).unwrap();
        assert_eq!(claims.subject, "alice"); // canonical form
        assert_eq!(claims.expires_at, claims.issued_at + 86400);
    }

    #[test]
    fn test_any_signature_byte_flip_fails() {
        let codec = codec();
        let token = codec.issue(&principal("alice"));

        let (payload_b64, sig_b64) = token.split_once('.').unwrap();
        let sig = URL_SAFE_NO_PAD.decode(sig_b64).unwrap();

        for i in 0..sig.len() {
            let mut tampered = sig.clone();
            tampered[i] ^= 0x01;
            let forged = format!("{}.{}", payload_b64, URL_SAFE_NO_PAD.encode(&tampered));
            assert_eq!(
                codec.validate(&forged),
                Err(TokenError::SignatureMismatch),
                "byte {i} flip not detected"
            );
        }
    }

    #[test]
    fn test_payload_tamper_fails() {
        let codec = codec();
        let token = codec.issue(&principal("alice"));

        let (payload_b64, sig_b64) = token.split_once('.').unwrap();
        let mut payload = URL_SAFE_NO_PAD.decode(payload_b64).unwrap();
        // alice -> blice
        let pos = payload.windows(5).position(|w| w == b"alice").unwrap();
        payload[pos] = b'b';

        let forged = format!("{}.{}", URL_SAFE_NO_PAD.encode(&payload), sig_b64);
        assert_eq!(codec.validate(&forged), Err(TokenError::SignatureMismatch));
    }

    #[test]
    fn test_expiry_is_strict() {
        let codec = codec();
        let token = codec.issue(&principal("alice"));
        let claims = codec.validate(&token).unwrap();

        // Exactly at expiry the token is still valid (now > expires_at is strict)
        assert!(codec.validate_at(&token, claims.expires_at).is_ok());
        // One second past, it is not
        assert_eq!(
            codec.validate_at(&token, claims.expires_at + 1),
            Err(TokenError::Expired)
        );
    }

    #[test]
    fn test_malformed_tokens() {
        let codec = codec();
        assert_eq!(codec.validate(""), Err(TokenError::Malformed));
        assert_eq!(codec.validate("garbage"), Err(TokenError::Malformed));
        assert_eq!(codec.validate("a.b.c"), Err(TokenError::Malformed));
        assert_eq!(codec.validate("!!!.???"), Err(TokenError::Malformed));
    }

    #[test]
    fn test_wrong_secret_fails() {
        let issuing = codec();
        let verifying = codec();

        let token = issuing.issue(&principal("alice"));
        assert_eq!(
            verifying.validate(&token),
            Err(TokenError::SignatureMismatch)
        );
    }
}
