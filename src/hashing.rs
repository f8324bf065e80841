//! Password hashing with Argon2id.
//!
//! Digests are PHC strings (`$argon2id$v=19$...`) carrying their own salt and
//! parameters, so verification needs nothing but the stored string.

use argon2::{
    password_hash::{PasswordHash, PasswordHasher as _, PasswordVerifier as _, SaltString},
    Argon2,
};
use rand::rngs::OsRng;

#[derive(thiserror::Error, Debug)]
pub enum HashError {
    #[error("failed to hash password: {0}")]
    Hash(String),

    #[error("stored digest is malformed: {0}")]
    MalformedDigest(String),
}

/// One-way salted hashing of passwords.
///
/// Both methods are CPU-bound and blocking; async callers should run them on
/// a blocking thread.
pub trait PasswordHasher: Send + Sync {
    /// # Errors
    /// Returns [`HashError::Hash`] if the digest cannot be computed.
    fn hash(&self, password: &str) -> Result<String, HashError>;

    /// Returns `Ok(false)` on a mismatch.
    ///
    /// # Errors
    /// Returns [`HashError::MalformedDigest`] if `digest` is not a PHC string.
    fn verify(&self, digest: &str, password: &str) -> Result<bool, HashError>;
}

/// Argon2id with the crate's default parameters.
#[derive(Debug, Default, Clone, Copy)]
pub struct Argon2Hasher;

impl Argon2Hasher {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl PasswordHasher for Argon2Hasher {
    fn hash(&self, password: &str) -> Result<String, HashError> {
        let salt = SaltString::generate(&mut OsRng);

        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| HashError::Hash(e.to_string()))
    }

    fn verify(&self, digest: &str, password: &str) -> Result<bool, HashError> {
        let parsed =
            PasswordHash::new(digest).map_err(|e| HashError::MalformedDigest(e.to_string()))?;

        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }
}
