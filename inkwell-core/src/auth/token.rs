//! Session tokens: HS256 JWTs carrying `sub`, `iat` and `exp`
//!
//! Validity is a pure function of (token, time, secret). There is no
//! server-side session state, so a token lives until it expires.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use tracing::debug;

use crate::config::AuthConfig;
use crate::error::Result;

use super::types::JwtClaims;

/// The only accepted signing algorithm
pub const TOKEN_ALGORITHM: Algorithm = Algorithm::HS256;

/// Issues and validates signed, time-limited session tokens
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenService {
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(TOKEN_ALGORITHM);
        // Expiry is checked against the caller's clock in `validate_at`.
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            encoding: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
            ttl: config.token_ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issue a token for `subject`, valid for the configured TTL from now
    pub fn issue(&self, subject: &str) -> Result<String> {
        self.issue_at(subject, Utc::now())
    }

    /// Issue a token as if the current time were `now`
    pub fn issue_at(&self, subject: &str, now: DateTime<Utc>) -> Result<String> {
        let claims = JwtClaims {
            sub: subject.to_string(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };
        Ok(encode(&Header::new(TOKEN_ALGORITHM), &claims, &self.encoding)?)
    }

    /// Validate a token and return its subject
    pub fn validate(&self, token: &str) -> Option<String> {
        self.validate_at(token, Utc::now())
    }

    /// Validate a token against the clock value `now`.
    ///
    /// Every failure collapses to `None`; the reason is only logged.
    pub fn validate_at(&self, token: &str, now: DateTime<Utc>) -> Option<String> {
        let claims = match decode::<JwtClaims>(token, &self.decoding, &self.validation) {
            Ok(data) => data.claims,
            Err(e) => {
                debug!(reason = ?e.kind(), "Token rejected");
                return None;
            }
        };

        if now.timestamp() >= claims.exp {
            debug!(sub = %claims.sub, exp = claims.exp, "Token rejected: expired");
            return None;
        }

        Some(claims.sub)
    }
}
