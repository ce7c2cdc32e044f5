//! External collaborator interfaces.
//!
//! The vault core holds no storage of its own.  Persistence and
//! identity resolution are injected behind these traits so the service
//! can run against a real database in production and `MemoryStore` /
//! `MemoryIdentity` in tests.
//!
//! The store is assumed durable and atomic per row; the core adds no
//! retries around it.

pub mod memory;

use chrono::{DateTime, Utc};

use crate::crypto::SealedSecret;
use crate::errors::Result;
use crate::vault::credential::{Credential, CredentialType};

pub use memory::{MemoryIdentity, MemoryStore};

/// A partial update applied to a stored credential.
///
/// `None` means "leave the stored value unchanged".  Secret fields are
/// set-only: the service never clears a sealed value through a patch.
#[derive(Debug, Clone, Default)]
pub struct CredentialPatch {
    pub name: Option<String>,
    pub credential_type: Option<CredentialType>,
    pub username: Option<String>,
    pub url: Option<String>,
    pub notes: Option<String>,
    pub password: Option<SealedSecret>,
    pub seed_phrase: Option<SealedSecret>,
    pub private_key: Option<SealedSecret>,
    pub updated_at: Option<DateTime<Utc>>,
    pub last_accessed: Option<DateTime<Utc>>,
}

impl CredentialPatch {
    /// A patch that only bumps the access timestamp.
    pub fn touch(at: DateTime<Utc>) -> Self {
        Self {
            last_accessed: Some(at),
            ..Self::default()
        }
    }

    /// Apply this patch to a record in place.
    ///
    /// Store implementations can use this directly when they keep full
    /// records; SQL-backed stores will typically translate the patch to
    /// an UPDATE instead.
    pub fn apply(&self, credential: &mut Credential) {
        if let Some(name) = &self.name {
            credential.name = name.clone();
        }
        if let Some(credential_type) = self.credential_type {
            credential.credential_type = credential_type;
        }
        if let Some(username) = &self.username {
            credential.username = Some(username.clone());
        }
        if let Some(url) = &self.url {
            credential.url = Some(url.clone());
        }
        if let Some(notes) = &self.notes {
            credential.notes = Some(notes.clone());
        }
        if let Some(password) = &self.password {
            credential.password = Some(password.clone());
        }
        if let Some(seed_phrase) = &self.seed_phrase {
            credential.seed_phrase = Some(seed_phrase.clone());
        }
        if let Some(private_key) = &self.private_key {
            credential.private_key = Some(private_key.clone());
        }
        if let Some(updated_at) = self.updated_at {
            credential.updated_at = updated_at;
        }
        if let Some(last_accessed) = self.last_accessed {
            credential.last_accessed = Some(last_accessed);
        }
    }
}

/// Persistence collaborator for credential records.
pub trait CredentialStore: Send + Sync {
    /// Persist a new record and return it as stored.
    fn create(&self, record: Credential) -> Result<Credential>;

    /// All credentials for an owner, most-recently-updated first.
    fn find_many(&self, owner_id: &str) -> Result<Vec<Credential>>;

    /// Fetch one credential by id, scoped to its owner.
    ///
    /// Returns `Ok(None)` both when the id does not exist and when the
    /// record belongs to a different owner, so the service cannot leak
    /// the difference.
    fn find_one(&self, id: &str, owner_id: &str) -> Result<Option<Credential>>;

    /// Apply a partial update and return the updated record.
    fn update(&self, id: &str, patch: CredentialPatch) -> Result<Credential>;

    /// Remove a record permanently.  No tombstone of sealed bytes.
    fn delete(&self, id: &str) -> Result<()>;
}

/// Identity collaborator: resolves a wallet address to an owner id.
pub trait IdentityResolver: Send + Sync {
    /// Returns `Ok(None)` when the wallet address is unknown.
    fn resolve_owner(&self, wallet_address: &str) -> Result<Option<String>>;
}
