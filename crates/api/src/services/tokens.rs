//! Opaque bearer token issuance and verification.
//!
//! Tokens are HMAC-SHA256 signed claim blobs: a base64url-encoded JSON
//! payload, a `.`, and the hex-encoded signature over the payload. They
//! carry the resolved [`Identity`] plus issue and expiry timestamps, and
//! are verified on every authenticated request.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::Utc;
use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use thiserror::Error;

use crate::models::Identity;

type HmacSha256 = Hmac<Sha256>;

/// Errors that can occur validating a bearer token.
#[derive(Debug, Error)]
pub enum TokenError {
    /// The token has passed its expiry timestamp.
    #[error("token expired")]
    Expired,

    /// The token does not have the expected shape.
    #[error("malformed token")]
    Malformed,

    /// The signature does not verify against the configured key.
    #[error("bad token signature")]
    BadSignature,

    /// Claims could not be serialized or deserialized.
    #[error("token encoding error: {0}")]
    Encoding(#[from] serde_json::Error),
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    identity: Identity,
    iat: i64,
    exp: i64,
}

/// Issues and verifies signed bearer tokens.
#[derive(Clone)]
pub struct TokenIssuer {
    secret: SecretString,
    ttl_secs: i64,
}

impl TokenIssuer {
    /// Create a new issuer from the configured signing secret and
    /// token lifetime in seconds.
    #[must_use]
    pub const fn new(secret: SecretString, ttl_secs: i64) -> Self {
        Self { secret, ttl_secs }
    }

    fn mac(&self) -> HmacSha256 {
        // HMAC accepts keys of any length.
        #[allow(clippy::expect_used)]
        HmacSha256::new_from_slice(self.secret.expose_secret().as_bytes())
            .expect("HMAC key of any length is valid")
    }

    /// Issue a token for a resolved identity.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Encoding` if the claims fail to serialize.
    pub fn issue(&self, identity: &Identity) -> Result<String, TokenError> {
        self.issue_at(identity, Utc::now().timestamp())
    }

    fn issue_at(&self, identity: &Identity, iat: i64) -> Result<String, TokenError> {
        let claims = Claims {
            identity: identity.clone(),
            iat,
            exp: iat + self.ttl_secs,
        };

        let payload = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&claims)?);

        let mut mac = self.mac();
        mac.update(payload.as_bytes());
        let signature = hex::encode(mac.finalize().into_bytes());

        Ok(format!("{payload}.{signature}"))
    }

    /// Verify a token and return the identity it carries.
    ///
    /// The signature is checked before the payload is decoded, and in
    /// constant time.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Malformed` for structurally invalid tokens,
    /// `TokenError::BadSignature` when the signature does not verify, and
    /// `TokenError::Expired` for valid but stale tokens.
    pub fn verify(&self, token: &str) -> Result<Identity, TokenError> {
        let (payload, signature_hex) = token.split_once('.').ok_or(TokenError::Malformed)?;
        let signature = hex::decode(signature_hex).map_err(|_| TokenError::Malformed)?;

        let mut mac = self.mac();
        mac.update(payload.as_bytes());
        mac.verify_slice(&signature)
            .map_err(|_| TokenError::BadSignature)?;

        let bytes = URL_SAFE_NO_PAD
            .decode(payload)
            .map_err(|_| TokenError::Malformed)?;
        let claims: Claims = serde_json::from_slice(&bytes)?;

        if Utc::now().timestamp() > claims.exp {
            return Err(TokenError::Expired);
        }

        Ok(claims.identity)
    }
}
