//! Access control resolution
//!
//! Three policies built from one "decode and look up" step:
//!
//! ```text
//! mode                 empty registry  no token          bad token     unknown sub      non-admin
//! require_identity     -               NotAuthenticated  InvalidToken  UnknownIdentity  ok
//! require_admin        -               NotAuthenticated  InvalidToken  UnknownIdentity  Forbidden
//! admin_or_bootstrap   Open            Forbidden         InvalidToken  UnknownIdentity  Forbidden
//! ```
//!
//! The resolver classifies; mapping to a wire status is the caller's job.

use std::sync::Arc;

use tracing::debug;

use crate::error::{InkwellError, Result};

use super::registry::AccountRegistry;
use super::token::TokenService;
use super::types::{Identity, RegistrationGrant};

/// Why a request was turned away
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    NotAuthenticated,
    InvalidToken,
    UnknownIdentity,
    Forbidden,
}

impl From<Rejection> for InkwellError {
    fn from(rejection: Rejection) -> Self {
        match rejection {
            Rejection::NotAuthenticated => InkwellError::AuthenticationRequired,
            Rejection::InvalidToken => InkwellError::InvalidToken,
            Rejection::UnknownIdentity => InkwellError::UnknownIdentity,
            Rejection::Forbidden => InkwellError::Forbidden,
        }
    }
}

/// Outcome of an access check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Authenticated(Identity),
    /// Registry is empty, registration is open to anyone
    Open,
    Rejected(Rejection),
}

impl Resolution {
    /// The resolved identity, or the rejection as an error
    pub fn into_identity(self) -> Result<Identity> {
        match self {
            Self::Authenticated(identity) => Ok(identity),
            Self::Open => Err(InkwellError::AuthenticationRequired),
            Self::Rejected(rejection) => Err(rejection.into()),
        }
    }

    /// Permission to register, for outcomes of `admin_or_bootstrap`
    pub fn into_grant(self) -> Result<RegistrationGrant> {
        match self {
            Self::Open => Ok(RegistrationGrant::Bootstrap),
            Self::Authenticated(identity) if identity.role.is_admin() => {
                Ok(RegistrationGrant::Admin(identity))
            }
            Self::Authenticated(_) => Err(InkwellError::Forbidden),
            Self::Rejected(rejection) => Err(rejection.into()),
        }
    }
}

/// Derives identities from bearer tokens and applies access policies
#[derive(Clone)]
pub struct AccessResolver {
    tokens: Arc<TokenService>,
}

impl AccessResolver {
    pub fn new(tokens: Arc<TokenService>) -> Self {
        Self { tokens }
    }

    /// Any valid, known identity
    pub async fn require_identity<R>(&self, registry: &mut R, bearer: Option<&str>) -> Result<Resolution>
    where
        R: AccountRegistry + ?Sized,
    {
        self.authenticate(registry, bearer).await
    }

    /// A valid, known identity with the admin role
    pub async fn require_admin<R>(&self, registry: &mut R, bearer: Option<&str>) -> Result<Resolution>
    where
        R: AccountRegistry + ?Sized,
    {
        Ok(admin_only(self.authenticate(registry, bearer).await?))
    }

    /// Open while the registry is empty, admin-only afterwards
    pub async fn admin_or_bootstrap<R>(&self, registry: &mut R, bearer: Option<&str>) -> Result<Resolution>
    where
        R: AccountRegistry + ?Sized,
    {
        if registry.is_empty().await? {
            debug!("Registry empty, registration open");
            return Ok(Resolution::Open);
        }
        if bearer.is_none() {
            return Ok(Resolution::Rejected(Rejection::Forbidden));
        }
        self.require_admin(registry, bearer).await
    }

    async fn authenticate<R>(&self, registry: &mut R, bearer: Option<&str>) -> Result<Resolution>
    where
        R: AccountRegistry + ?Sized,
    {
        let Some(token) = bearer else {
            return Ok(Resolution::Rejected(Rejection::NotAuthenticated));
        };
        let Some(subject) = self.tokens.validate(token) else {
            return Ok(Resolution::Rejected(Rejection::InvalidToken));
        };
        let Ok(id) = subject.parse::<i64>() else {
            debug!(sub = %subject, "Token subject is not an identity id");
            return Ok(Resolution::Rejected(Rejection::UnknownIdentity));
        };

        Ok(match registry.find_by_id(id).await? {
            Some(identity) => Resolution::Authenticated(identity),
            None => Resolution::Rejected(Rejection::UnknownIdentity),
        })
    }
}

fn admin_only(resolution: Resolution) -> Resolution {
    match resolution {
        Resolution::Authenticated(identity) if !identity.role.is_admin() => {
            Resolution::Rejected(Rejection::Forbidden)
        }
        other => other,
    }
}

/// Extract the token from an `Authorization` header value.
///
/// Anything other than `Bearer <token>` counts as no credentials.
pub fn bearer_token(header: Option<&str>) -> Option<&str> {
    let (scheme, token) = header?.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}
