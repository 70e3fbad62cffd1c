//! AuthService: registration and login flows
//!
//! Stateless apart from the immutable hasher and token service, so one
//! instance is shared by every request. Argon2 work runs on the blocking
//! pool to keep the async workers free.
//!
//! # Usage
//!
//! ```rust,no_run
//! use inkwell_core::auth::{AuthService, RegistrationGrant};
//! use inkwell_core::{AuthConfig, Store};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let auth = AuthService::new(&AuthConfig::new("my-production-secret")?);
//!     let store = Store::connect("sqlite://inkwell.db").await?;
//!     let mut session = store.session().await?;
//!
//!     // Anyone may register while the registry is empty
//!     let grant = auth
//!         .resolver()
//!         .admin_or_bootstrap(&mut session, None)
//!         .await?
//!         .into_grant()?;
//!     let admin = auth.register(&mut session, &grant, "root@example.com", "s3cret").await?;
//!
//!     // Login → JWT token
//!     let token = auth.login(&mut session, "root@example.com", "s3cret").await?;
//!
//!     // Resolve on each request
//!     let me = auth
//!         .resolver()
//!         .require_identity(&mut session, Some(&token.access_token))
//!         .await?
//!         .into_identity()?;
//!     assert_eq!(me, admin);
//!
//!     Ok(())
//! }
//! ```

use std::sync::Arc;

use tokio::task;
use tracing::{info, warn};

use crate::config::AuthConfig;
use crate::error::{InkwellError, Result};

use super::password::CredentialHasher;
use super::registry::AccountRegistry;
use super::resolver::AccessResolver;
use super::token::TokenService;
use super::types::{AccessToken, Identity, NewIdentity, RegistrationGrant};

pub struct AuthService {
    hasher: Arc<CredentialHasher>,
    tokens: Arc<TokenService>,
    resolver: AccessResolver,
}

impl AuthService {
    pub fn new(config: &AuthConfig) -> Self {
        let tokens = Arc::new(TokenService::new(config));
        Self {
            hasher: Arc::new(CredentialHasher::new()),
            resolver: AccessResolver::new(tokens.clone()),
            tokens,
        }
    }

    pub fn resolver(&self) -> &AccessResolver {
        &self.resolver
    }

    pub fn tokens(&self) -> &TokenService {
        &self.tokens
    }

    /// Create an identity under an already resolved grant
    pub async fn register<R>(
        &self,
        registry: &mut R,
        grant: &RegistrationGrant,
        email: &str,
        password: &str,
    ) -> Result<Identity>
    where
        R: AccountRegistry + ?Sized,
    {
        let email = email.trim();
        if email.is_empty() || !email.contains('@') {
            return Err(InkwellError::InvalidInput("Invalid email address".into()));
        }
        if password.is_empty() {
            return Err(InkwellError::InvalidInput("Password must not be empty".into()));
        }

        // Cheap early exit; the unique constraint still decides under races
        if registry.find_by_email(email).await?.is_some() {
            return Err(InkwellError::DuplicateIdentity);
        }

        let hashed_password = self.hash_password(password.to_string()).await?;
        let new = NewIdentity { email: email.to_string(), hashed_password };

        match registry.create_identity(new, grant).await? {
            Some(identity) => {
                info!(user_id = identity.id, role = %identity.role, "Identity registered");
                Ok(identity)
            }
            None => {
                warn!("Bootstrap registration lost to a concurrent registration");
                Err(InkwellError::Forbidden)
            }
        }
    }

    /// Check credentials and issue an access token.
    ///
    /// Unknown email and wrong password are indistinguishable to the caller.
    pub async fn login<R>(&self, registry: &mut R, email: &str, password: &str) -> Result<AccessToken>
    where
        R: AccountRegistry + ?Sized,
    {
        let stored = registry.find_by_email(email.trim()).await?;

        let hasher = self.hasher.clone();
        let password = password.to_string();
        let stored_hash = stored.as_ref().map(|s| s.hashed_password.clone());
        let verified = task::spawn_blocking(move || match stored_hash {
            Some(hash) => hasher.verify(&password, &hash),
            None => hasher.verify_decoy(&password),
        })
        .await?;

        let identity = match stored {
            Some(stored) if verified => stored.identity,
            _ => return Err(InkwellError::InvalidCredentials),
        };

        let token = self.tokens.issue(&identity.subject())?;
        info!(user_id = identity.id, "Login successful");
        Ok(AccessToken::bearer(token))
    }

    async fn hash_password(&self, password: String) -> Result<String> {
        let hasher = self.hasher.clone();
        task::spawn_blocking(move || hasher.hash(&password)).await?
    }
}
