//! Account registry boundary
//!
//! The resolver and the registration/login flows only talk to identities
//! through this trait. `StoreSession` is the SQLite implementation.

use async_trait::async_trait;

use crate::error::Result;

use super::types::{Identity, NewIdentity, RegistrationGrant, StoredIdentity};

#[async_trait]
pub trait AccountRegistry: Send {
    /// True when no identity has been created yet
    async fn is_empty(&mut self) -> Result<bool>;

    async fn find_by_id(&mut self, id: i64) -> Result<Option<Identity>>;

    async fn find_by_email(&mut self, email: &str) -> Result<Option<StoredIdentity>>;

    /// Insert a new identity, deciding its role atomically with the insert.
    ///
    /// The first identity ever created is an admin, every later one a user.
    /// Under `RegistrationGrant::Bootstrap` the insert only happens while the
    /// registry is still empty; `Ok(None)` means another registration won.
    /// A taken email fails with `InkwellError::DuplicateIdentity`.
    async fn create_identity(
        &mut self,
        new: NewIdentity,
        grant: &RegistrationGrant,
    ) -> Result<Option<Identity>>;
}
