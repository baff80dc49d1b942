//! Stateless bearer token issuance and verification.
//!
//! Tokens are HS256 JWTs signed with the process-wide secret from the
//! configuration. Nothing is persisted server-side: a token is valid for
//! its full window unless the secret is rotated, which invalidates every
//! outstanding token at once. Verification lives behind [`TokenIssuer`] so
//! a revocation list could be added later without touching call sites.

use chrono::Utc;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::JwtConfig;

/// Claims carried by an issued token: the subject's id and admin flag,
/// plus the standard timing/issuer claims.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub admin: bool,
    pub iss: String,
    pub iat: i64,
    pub exp: i64,
}

/// Why a presented token was rejected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum VerificationError {
    /// Past the validity window.
    #[error("token expired")]
    Expired,
    /// Structurally valid but the signature does not match recomputation.
    #[error("invalid signature")]
    InvalidSignature,
    /// The token structure cannot be parsed at all.
    #[error("malformed token")]
    Malformed,
}

/// Issues and verifies the signed tokens minted at login.
///
/// Built from injected [`JwtConfig`], never from a global, so tests can
/// run with distinct secrets.
pub struct TokenIssuer {
    config: JwtConfig,
}

impl TokenIssuer {
    pub fn new(config: JwtConfig) -> Self {
        TokenIssuer { config }
    }

    /// Mint a token for the given subject, valid for the configured window
    /// from now.
    pub fn issue(&self, subject: &str, admin: bool) -> String {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: subject.to_string(),
            admin,
            iss: self.config.iss.clone(),
            iat: now,
            exp: now + self.config.exp,
        };

        let encoding_key = EncodingKey::from_secret(self.config.secret.as_ref());
        encode(&Header::default(), &claims, &encoding_key).expect("Failed to encode JWT")
    }

    /// Verify a token string and return its claims.
    ///
    /// Expiry is checked with zero leeway, so the window boundary is exact.
    pub fn verify(&self, token: &str) -> Result<Claims, VerificationError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_aud = false;

        let decoding_key = DecodingKey::from_secret(self.config.secret.as_ref());
        decode::<Claims>(token, &decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => VerificationError::Expired,
                ErrorKind::InvalidSignature => VerificationError::InvalidSignature,
                _ => VerificationError::Malformed,
            })
    }
}
