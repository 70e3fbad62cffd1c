//! Authentication module: credentials, session tokens, and access control
//!
//! Identities live in the SQLite `users` table behind [`AccountRegistry`].

pub mod password;
pub mod registry;
pub mod resolver;
pub mod service;
pub mod token;
pub mod types;

pub use password::CredentialHasher;
pub use registry::AccountRegistry;
pub use resolver::{bearer_token, AccessResolver, Rejection, Resolution};
pub use service::AuthService;
pub use token::{TokenService, TOKEN_ALGORITHM};
pub use types::{AccessToken, Identity, NewIdentity, RegistrationGrant, Role, StoredIdentity};
