//! Credential hashing with Argon2id
//!
//! Hashes are PHC strings carrying their own random salt and parameters.
//! These calls are deliberately slow; async callers go through
//! `AuthService`, which moves them onto the blocking pool.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use tracing::warn;

use crate::error::{InkwellError, Result};

/// Well-formed Argon2id hash that matches no password, used when the
/// decoy cannot be computed at startup.
const FALLBACK_DECOY: &str = "$argon2id$v=19$m=19456,t=2,p=1$c29tZXNhbHRzb21lc2FsdA$BwgJCgsMDQ4PEBESExQVFhcYGRobHB0eHyAhIiMkJSY";

/// One-way password hasher
pub struct CredentialHasher {
    argon2: Argon2<'static>,
    decoy: String,
}

impl Default for CredentialHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl CredentialHasher {
    pub fn new() -> Self {
        let argon2 = Argon2::default();
        let salt = SaltString::generate(&mut OsRng);
        let decoy = match argon2.hash_password(b"inkwell-decoy-credential", &salt) {
            Ok(hash) => hash.to_string(),
            Err(e) => {
                warn!(error = %e, "Decoy hash failed, using built-in decoy");
                FALLBACK_DECOY.to_string()
            }
        };
        Self { argon2, decoy }
    }

    /// Hash a plaintext password with a fresh salt
    pub fn hash(&self, plaintext: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        self.argon2
            .hash_password(plaintext.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| InkwellError::Internal(format!("password hashing failed: {e}")))
    }

    /// Check a plaintext against a stored hash. Malformed hashes never verify.
    pub fn verify(&self, plaintext: &str, stored_hash: &str) -> bool {
        let parsed = match PasswordHash::new(stored_hash) {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!(error = %e, "Stored password hash is malformed");
                return false;
            }
        };
        self.argon2
            .verify_password(plaintext.as_bytes(), &parsed)
            .is_ok()
    }

    /// Spend the cost of a real verification and fail.
    ///
    /// Used when no stored hash exists, so an unknown account takes as long
    /// to reject as a wrong password.
    pub fn verify_decoy(&self, plaintext: &str) -> bool {
        let _ = self.verify(plaintext, &self.decoy);
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_then_verify() {
        let hasher = CredentialHasher::new();
        let hash = hasher.hash("correct horse battery staple").unwrap();
        assert!(hasher.verify("correct horse battery staple", &hash));
        assert!(!hasher.verify("correct horse battery stapler", &hash));
    }

    #[test]
    fn test_same_plaintext_hashes_differ() {
        let hasher = CredentialHasher::new();
        let a = hasher.hash("p@ss").unwrap();
        let b = hasher.hash("p@ss").unwrap();
        assert_ne!(a, b);
        assert!(hasher.verify("p@ss", &a));
        assert!(hasher.verify("p@ss", &b));
    }

    #[test]
    fn test_hash_is_argon2_phc_string() {
        let hash = CredentialHasher::new().hash("p@ss").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(!hash.contains("p@ss"));
    }

    #[test]
    fn test_malformed_hash_does_not_verify() {
        let hasher = CredentialHasher::new();
        assert!(!hasher.verify("anything", ""));
        assert!(!hasher.verify("anything", "not-a-phc-string"));
        assert!(!hasher.verify("anything", "$argon2id$v=19$broken"));
    }

    #[test]
    fn test_decoy_hashes_are_well_formed() {
        let hasher = CredentialHasher::new();
        let decoy = PasswordHash::new(&hasher.decoy).unwrap();
        assert_eq!(decoy.algorithm.as_str(), "argon2id");

        let fallback = PasswordHash::new(FALLBACK_DECOY).unwrap();
        assert_eq!(fallback.algorithm.as_str(), "argon2id");
        assert!(fallback.hash.is_some());
        assert!(!hasher.verify("inkwell-decoy-credential", FALLBACK_DECOY));
    }

    #[test]
    fn test_decoy_always_fails() {
        let hasher = CredentialHasher::new();
        assert!(!hasher.verify_decoy("inkwell-decoy-credential"));
        assert!(!hasher.verify_decoy("whatever"));
    }
}
