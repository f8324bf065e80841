use super::{Account, CredentialStore, StoreError};
use async_trait::async_trait;
use std::collections::{hash_map::Entry, HashMap};
use tokio::sync::RwLock;
use uuid::Uuid;

/// In-process credential store keyed by username.
///
/// Contents are lost on restart. Used by `--in-memory` runs and tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    accounts: RwLock<HashMap<String, Account>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.accounts.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.accounts.read().await.is_empty()
    }
}

#[async_trait]
impl CredentialStore for MemoryStore {
    async fn create_account(
        &self,
        username: &str,
        password_hash: &str,
    ) -> Result<Account, StoreError> {
        // check and insert under one write guard
        let mut accounts = self.accounts.write().await;

        match accounts.entry(username.to_string()) {
            Entry::Occupied(_) => Err(StoreError::Conflict),
            Entry::Vacant(slot) => {
                let account = Account {
                    id: Uuid::now_v7(),
                    username: username.to_string(),
                    password_hash: password_hash.to_string(),
                };
                slot.insert(account.clone());
                Ok(account)
            }
        }
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, StoreError> {
        Ok(self.accounts.read().await.get(username).cloned())
    }
}
