//! Process settings, read once at startup

use std::net::{IpAddr, SocketAddr};

use inkwell_core::config::{AuthConfig, ENV_SECRET_KEY};
use inkwell_core::{InkwellError, Result};
use url::Url;

pub const ENV_DATABASE_URL: &str = "DATABASE_URL";
pub const ENV_HOST: &str = "HOST";
pub const ENV_PORT: &str = "PORT";

const REQUIRED: [&str; 2] = [ENV_SECRET_KEY, ENV_DATABASE_URL];
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8000;
const REDACTED_URL: &str = "<redacted>";

#[derive(Debug, Clone)]
pub struct Settings {
    pub auth: AuthConfig,
    pub database_url: String,
    pub bind_addr: SocketAddr,
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Every missing required variable is reported in a single error.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let missing: Vec<&str> = REQUIRED
            .iter()
            .copied()
            .filter(|key| lookup(*key).map_or(true, |v| v.trim().is_empty()))
            .collect();
        if !missing.is_empty() {
            return Err(InkwellError::Config(format!(
                "missing required environment variables: {}",
                missing.join(", ")
            )));
        }

        let auth = AuthConfig::from_lookup(&lookup)?;
        let database_url = lookup(ENV_DATABASE_URL).unwrap_or_default();

        let host = lookup(ENV_HOST).unwrap_or_else(|| DEFAULT_HOST.to_string());
        let host: IpAddr = host
            .parse()
            .map_err(|_| InkwellError::Config(format!("{ENV_HOST} is not an IP address: {host:?}")))?;
        let port = match lookup(ENV_PORT) {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| InkwellError::Config(format!("{ENV_PORT} is not a port: {raw:?}")))?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            auth,
            database_url,
            bind_addr: SocketAddr::new(host, port),
        })
    }

    /// Database URL safe for logs
    pub fn redacted_database_url(&self) -> String {
        match Url::parse(&self.database_url) {
            Ok(mut url) if url.password().is_some() => match url.set_password(Some("***")) {
                Ok(()) => url.to_string(),
                Err(()) => REDACTED_URL.to_string(),
            },
            Ok(_) => self.database_url.clone(),
            // Unparseable URLs may still carry credentials before an '@'
            Err(_) if self.database_url.contains('@') => REDACTED_URL.to_string(),
            Err(_) => self.database_url.clone(),
        }
    }
}
