//! # Inkwell Core
//!
//! Authentication, access control, and persistence for the Inkwell notes
//! backend.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────┐
//! │               inkwell-core                │
//! ├───────────────────────────────────────────┤
//! │  AuthService (register, login)            │
//! │  AccessResolver (identity, admin,         │
//! │                  admin-or-bootstrap)      │
//! ├──────────────────┬────────────────────────┤
//! │ CredentialHasher │     TokenService       │
//! │   (argon2id)     │  (HS256 JWT, fixed TTL)│
//! ├──────────────────┴────────────────────────┤
//! │  AccountRegistry  ◄── StoreSession        │
//! │  Store (sqlx SQLite pool: users, notes)   │
//! └───────────────────────────────────────────┘
//! ```
//!
//! ## Features
//!
//! - **Self-bootstrapping**: the first registered identity becomes admin;
//!   after that only admins can register new identities
//! - **Race-free bootstrap**: the "registry is empty" check and the insert
//!   are one SQL statement
//! - **Opaque failures**: token problems collapse to one outcome, login
//!   failures to another
//! - **Railway Programming**: all operations return `Result<T, InkwellError>`

pub mod auth;
pub mod config;
pub mod error;
pub mod store;

// Re-exports for convenience
pub use auth::{AccessResolver, AuthService, Identity, Resolution, Role};
pub use config::AuthConfig;
pub use error::{InkwellError, Result};
pub use store::{Note, Store, StoreSession};
