//! Registration and login.
//!
//! [`AuthHandler`] holds no per-request state: it owns an injected credential
//! store and password hasher and maps their outcomes onto [`AuthError`].
//! Argon2 work runs on tokio's blocking pool so a slow hash never stalls other
//! requests.

mod error;

pub use self::error::AuthError;

use crate::{
    hashing::{HashError, PasswordHasher},
    store::{CredentialStore, PublicAccount, StoreError},
};
use serde::Deserialize;
use std::{fmt, sync::Arc};
use tracing::{debug, error, instrument};
use utoipa::ToSchema;

/// Hashed once in [`AuthHandler::new`] and verified against when the username
/// is unknown, so both failure paths cost one Argon2 verification.
const DUMMY_PASSWORD: &str = "gatekeep-dummy-password";

/// Request body of `/register` and `/login`.
#[derive(ToSchema, Deserialize, Default, Clone)]
pub struct Credentials {
    pub username: Option<String>,
    pub password: Option<String>,
}

impl Credentials {
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: Some(username.into()),
            password: Some(password.into()),
        }
    }

    /// Both fields present and non-empty.
    fn require(&self) -> Result<(&str, &str), AuthError> {
        match (self.username.as_deref(), self.password.as_deref()) {
            (Some(username), Some(password)) if !username.is_empty() && !password.is_empty() => {
                Ok((username, password))
            }
            _ => Err(AuthError::Validation),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

pub struct AuthHandler {
    store: Arc<dyn CredentialStore>,
    hasher: Arc<dyn PasswordHasher>,
    dummy_digest: String,
}

impl fmt::Debug for AuthHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthHandler").finish_non_exhaustive()
    }
}

impl AuthHandler {
    /// Blocks for one hash of the dummy password; call it at startup, not
    /// per request.
    ///
    /// # Errors
    /// Returns the hasher's error if the dummy digest cannot be computed.
    pub fn new(
        store: Arc<dyn CredentialStore>,
        hasher: Arc<dyn PasswordHasher>,
    ) -> Result<Self, HashError> {
        let dummy_digest = hasher.hash(DUMMY_PASSWORD)?;

        Ok(Self {
            store,
            hasher,
            dummy_digest,
        })
    }

    #[must_use]
    pub fn store(&self) -> &Arc<dyn CredentialStore> {
        &self.store
    }

    /// Create an account and return its public fields.
    ///
    /// # Errors
    /// [`AuthError::Validation`] for a missing field, [`AuthError::Conflict`]
    /// if the username is taken, [`AuthError::StoreUnavailable`] if hashing or
    /// the store fails.
    #[instrument(skip(self))]
    pub async fn register(&self, credentials: &Credentials) -> Result<PublicAccount, AuthError> {
        let (username, password) = credentials.require()?;

        let digest = self.hash(password).await?;

        match self.store.create_account(username, &digest).await {
            Ok(account) => {
                debug!("Account created: {}", account.id);
                Ok(account.public())
            }
            Err(StoreError::Conflict) => {
                debug!("Username already exists");
                Err(AuthError::Conflict)
            }
            Err(StoreError::Unavailable(e)) => {
                error!("Error creating account: {}", e);
                Err(AuthError::StoreUnavailable)
            }
        }
    }

    /// Check a username and password.
    ///
    /// Unknown usernames and wrong passwords both yield
    /// [`AuthError::InvalidCredentials`].
    ///
    /// # Errors
    /// [`AuthError::Validation`] for a missing field,
    /// [`AuthError::InvalidCredentials`] on any credential mismatch,
    /// [`AuthError::StoreUnavailable`] if the lookup or verification fails.
    #[instrument(skip(self))]
    pub async fn login(&self, credentials: &Credentials) -> Result<PublicAccount, AuthError> {
        let (username, password) = credentials.require()?;

        let account = match self.store.find_by_username(username).await {
            Ok(account) => account,
            Err(e) => {
                error!("Error looking up account: {}", e);
                return Err(AuthError::StoreUnavailable);
            }
        };

        let Some(account) = account else {
            debug!("Unknown username");
            self.burn_verification(password).await;
            return Err(AuthError::InvalidCredentials);
        };

        if self.verify(&account.password_hash, password).await? {
            debug!("Login successful: {}", account.id);
            Ok(account.public())
        } else {
            debug!("Password mismatch");
            Err(AuthError::InvalidCredentials)
        }
    }

    async fn hash(&self, password: &str) -> Result<String, AuthError> {
        let hasher = self.hasher.clone();
        let password = password.to_string();

        match tokio::task::spawn_blocking(move || hasher.hash(&password)).await {
            Ok(Ok(digest)) => Ok(digest),
            Ok(Err(e)) => {
                error!("Error hashing password: {}", e);
                Err(AuthError::StoreUnavailable)
            }
            Err(e) => {
                error!("Hashing task failed: {}", e);
                Err(AuthError::StoreUnavailable)
            }
        }
    }

    async fn verify(&self, digest: &str, password: &str) -> Result<bool, AuthError> {
        let hasher = self.hasher.clone();
        let digest = digest.to_string();
        let password = password.to_string();

        match tokio::task::spawn_blocking(move || hasher.verify(&digest, &password)).await {
            Ok(Ok(matches)) => Ok(matches),
            Ok(Err(e)) => {
                error!("Error verifying password: {}", e);
                Err(AuthError::StoreUnavailable)
            }
            Err(e) => {
                error!("Verification task failed: {}", e);
                Err(AuthError::StoreUnavailable)
            }
        }
    }

    // result is ignored, the caller always answers InvalidCredentials
    async fn burn_verification(&self, password: &str) {
        let _ = self.verify(&self.dummy_digest, password).await;
    }
}
