//! Configuration for Inkwell authentication
//!
//! Built once at startup and shared read-only afterwards. Nothing in the
//! request path reads the environment.

use std::fmt;

use chrono::Duration;

use crate::error::{InkwellError, Result};

/// Environment variable holding the token signing secret
pub const ENV_SECRET_KEY: &str = "SECRET_KEY";

/// Environment variable holding the token lifetime in minutes
pub const ENV_TOKEN_TTL_MINUTES: &str = "ACCESS_TOKEN_EXPIRE_MINUTES";

/// Default token lifetime
pub const DEFAULT_TOKEN_TTL_MINUTES: u32 = 30;

/// Server secret used to sign session tokens. Never printed.
#[derive(Clone)]
pub struct SecretKey(String);

impl SecretKey {
    /// Rejects empty and whitespace-only secrets
    pub fn new(secret: impl Into<String>) -> Result<Self> {
        let secret = secret.into();
        if secret.trim().is_empty() {
            return Err(InkwellError::Config(format!("{ENV_SECRET_KEY} is not set")));
        }
        Ok(Self(secret))
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretKey(***)")
    }
}

/// Authentication configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Token signing secret
    pub secret: SecretKey,

    /// Lifetime of issued access tokens
    pub token_ttl: Duration,
}

impl AuthConfig {
    /// Create config with the default token lifetime
    pub fn new(secret: impl Into<String>) -> Result<Self> {
        Ok(Self {
            secret: SecretKey::new(secret)?,
            token_ttl: Duration::minutes(DEFAULT_TOKEN_TTL_MINUTES as i64),
        })
    }

    /// Override token lifetime
    pub fn with_token_ttl(mut self, ttl: Duration) -> Self {
        self.token_ttl = ttl;
        self
    }

    /// Override token lifetime in minutes
    pub fn with_token_ttl_minutes(self, minutes: u32) -> Self {
        self.with_token_ttl(Duration::minutes(minutes as i64))
    }

    /// Read configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let secret = lookup(ENV_SECRET_KEY).unwrap_or_default();
        let config = Self::new(secret)?;

        match lookup(ENV_TOKEN_TTL_MINUTES) {
            Some(raw) => Ok(config.with_token_ttl_minutes(parse_ttl_minutes(&raw)?)),
            None => Ok(config),
        }
    }
}

fn parse_ttl_minutes(raw: &str) -> Result<u32> {
    match raw.trim().parse::<u32>() {
        Ok(minutes) if minutes > 0 => Ok(minutes),
        _ => Err(InkwellError::Config(format!(
            "{ENV_TOKEN_TTL_MINUTES} must be a positive integer, got {raw:?}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_default_ttl() {
        let cfg = AuthConfig::new("s3cret").unwrap();
        assert_eq!(cfg.token_ttl, Duration::minutes(30));
    }

    #[test]
    fn test_empty_secret_is_fatal() {
        assert!(matches!(AuthConfig::new(""), Err(InkwellError::Config(_))));
        assert!(matches!(AuthConfig::new("   "), Err(InkwellError::Config(_))));
        assert!(matches!(
            AuthConfig::from_lookup(lookup(&[(ENV_SECRET_KEY, "")])),
            Err(InkwellError::Config(_))
        ));
        assert!(matches!(
            AuthConfig::from_lookup(lookup(&[])),
            Err(InkwellError::Config(_))
        ));
    }

    #[test]
    fn test_ttl_from_lookup() {
        let cfg = AuthConfig::from_lookup(lookup(&[
            (ENV_SECRET_KEY, "s3cret"),
            (ENV_TOKEN_TTL_MINUTES, "5"),
        ]))
        .unwrap();
        assert_eq!(cfg.token_ttl, Duration::minutes(5));
    }

    #[test]
    fn test_invalid_ttl_is_fatal() {
        for bad in ["0", "-3", "ten", ""] {
            let result = AuthConfig::from_lookup(lookup(&[
                (ENV_SECRET_KEY, "s3cret"),
                (ENV_TOKEN_TTL_MINUTES, bad),
            ]));
            assert!(matches!(result, Err(InkwellError::Config(_))), "accepted {bad:?}");
        }
    }

    #[test]
    fn test_secret_debug_is_redacted() {
        let cfg = AuthConfig::new("hunter2").unwrap();
        let printed = format!("{cfg:?}");
        assert!(!printed.contains("hunter2"));
        assert!(printed.contains("SecretKey(***)"));
    }
}
