//! In-memory collaborator implementations.
//!
//! `MemoryStore` and `MemoryIdentity` back the integration tests and
//! are handy for embedding the vault without a database.  Both are
//! plain `Mutex<HashMap>` wrappers; per-row atomicity falls out of the
//! lock.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::errors::{Result, VaultError};
use crate::vault::credential::Credential;

use super::{CredentialPatch, CredentialStore, IdentityResolver};

/// An in-memory credential store.
#[derive(Default)]
pub struct MemoryStore {
    records: Mutex<HashMap<String, Credential>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, Credential>>> {
        self.records
            .lock()
            .map_err(|_| VaultError::Storage("store lock poisoned".into()))
    }
}

impl CredentialStore for MemoryStore {
    fn create(&self, record: Credential) -> Result<Credential> {
        let mut records = self.lock()?;
        records.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn find_many(&self, owner_id: &str) -> Result<Vec<Credential>> {
        let records = self.lock()?;
        let mut matching: Vec<Credential> = records
            .values()
            .filter(|c| c.owner_id == owner_id)
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(matching)
    }

    fn find_one(&self, id: &str, owner_id: &str) -> Result<Option<Credential>> {
        let records = self.lock()?;
        Ok(records
            .get(id)
            .filter(|c| c.owner_id == owner_id)
            .cloned())
    }

    fn update(&self, id: &str, patch: CredentialPatch) -> Result<Credential> {
        let mut records = self.lock()?;
        let record = records
            .get_mut(id)
            .ok_or_else(|| VaultError::Storage(format!("no row with id '{id}'")))?;
        patch.apply(record);
        Ok(record.clone())
    }

    fn delete(&self, id: &str) -> Result<()> {
        let mut records = self.lock()?;
        records
            .remove(id)
            .ok_or_else(|| VaultError::Storage(format!("no row with id '{id}'")))?;
        Ok(())
    }
}

/// An in-memory wallet-address to owner-id mapping.
#[derive(Default)]
pub struct MemoryIdentity {
    owners: Mutex<HashMap<String, String>>,
}

impl MemoryIdentity {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a wallet address as resolving to `owner_id`.
    pub fn register(&self, wallet_address: impl Into<String>, owner_id: impl Into<String>) {
        if let Ok(mut owners) = self.owners.lock() {
            owners.insert(wallet_address.into(), owner_id.into());
        }
    }
}

impl IdentityResolver for MemoryIdentity {
    fn resolve_owner(&self, wallet_address: &str) -> Result<Option<String>> {
        let owners = self
            .owners
            .lock()
            .map_err(|_| VaultError::Storage("identity lock poisoned".into()))?;
        Ok(owners.get(wallet_address).cloned())
    }
}
