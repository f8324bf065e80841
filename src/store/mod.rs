//! Credential store: the only owner of [`Account`] records.
//!
//! The auth handler receives an `Arc<dyn CredentialStore>` at construction so
//! the PostgreSQL store and the in-memory store are interchangeable.

use async_trait::async_trait;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

pub mod memory;
pub mod postgres;

pub use self::memory::MemoryStore;
pub use self::postgres::PgStore;

/// A stored account. Holds the password digest, so it is deliberately not
/// `Serialize`; use [`Account::public`] for anything leaving the process.
#[derive(Clone, PartialEq, Eq)]
pub struct Account {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
}

impl Account {
    #[must_use]
    pub fn public(&self) -> PublicAccount {
        PublicAccount {
            id: self.id,
            username: self.username.clone(),
        }
    }
}

impl std::fmt::Debug for Account {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Account")
            .field("id", &self.id)
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

/// Fields of an account that callers are allowed to see.
#[derive(ToSchema, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct PublicAccount {
    pub id: Uuid,
    pub username: String,
}

#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("username already exists")]
    Conflict,

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if is_unique_violation(&err) {
            Self::Conflict
        } else {
            Self::Unavailable(err.to_string())
        }
    }
}

/// SQLSTATE 23505
pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.code().is_some_and(|code| code.as_ref() == "23505"),
        _ => false,
    }
}

#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Create an account unless the username is already taken.
    ///
    /// # Errors
    /// [`StoreError::Conflict`] when the username exists,
    /// [`StoreError::Unavailable`] for any infrastructure failure.
    async fn create_account(&self, username: &str, password_hash: &str)
        -> Result<Account, StoreError>;

    /// # Errors
    /// [`StoreError::Unavailable`] if the store cannot be queried.
    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, StoreError>;

    /// Cheap liveness check used by `/health`.
    ///
    /// # Errors
    /// [`StoreError::Unavailable`] if the store cannot be reached.
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
