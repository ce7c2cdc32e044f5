//! High-level vault operations over injected collaborators.
//!
//! `CredentialVaultService` orchestrates ownership resolution, selective
//! per-field sealing on write, masking on read, access-time tracking,
//! and single-field decrypt-on-demand.  It holds no lock and no state
//! beyond the master key; the storage collaborator owns per-row
//! atomicity.

use std::sync::Arc;
use std::thread;

use chrono::Utc;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::crypto::envelope::{open, seal};
use crate::crypto::keys::MasterKey;
use crate::errors::{Result, VaultError};
use crate::policy::{self, SecretField};
use crate::store::{CredentialPatch, CredentialStore, IdentityResolver};

use super::credential::{
    CreateCredential, Credential, CredentialType, CredentialView, UpdateCredential,
};

/// The credential vault service.
///
/// Every operation is independently invocable and safe to run
/// concurrently with any other.  Nothing is held across calls.
pub struct CredentialVaultService {
    store: Arc<dyn CredentialStore>,
    identity: Arc<dyn IdentityResolver>,
    master_key: MasterKey,
}

impl CredentialVaultService {
    pub fn new(
        store: Arc<dyn CredentialStore>,
        identity: Arc<dyn IdentityResolver>,
        master_key: MasterKey,
    ) -> Self {
        Self {
            store,
            identity,
            master_key,
        }
    }

    // ------------------------------------------------------------------
    // Operations
    // ------------------------------------------------------------------

    /// List all of the caller's credentials, most-recently-updated
    /// first, as masked views.
    pub fn list(&self, wallet_address: &str) -> Result<Vec<CredentialView>> {
        let owner_id = self.resolve_owner(wallet_address)?;
        let records = self.store.find_many(&owner_id)?;

        self.touch_last_accessed(records.iter().map(|c| c.id.clone()).collect());

        Ok(records.iter().map(policy::mask_for_read).collect())
    }

    /// Fetch one credential as a masked view.
    ///
    /// A nonexistent id and an id owned by someone else both fail
    /// `NotFound`; the two cases are indistinguishable by design.
    pub fn get_by_id(&self, wallet_address: &str, id: &str) -> Result<CredentialView> {
        let owner_id = self.resolve_owner(wallet_address)?;
        let record = self.fetch_owned(id, &owner_id)?;

        self.touch_last_accessed(vec![record.id.clone()]);

        Ok(policy::mask_for_read(&record))
    }

    /// Create a credential, sealing every present non-empty secret
    /// field before anything is persisted.
    pub fn create(&self, wallet_address: &str, payload: CreateCredential) -> Result<CredentialView> {
        let owner_id = self.resolve_owner(wallet_address)?;

        // Validate before any storage or cipher call.
        let name = payload.name.trim();
        if name.is_empty() {
            return Err(VaultError::Validation("name must not be empty".into()));
        }
        let credential_type: CredentialType = payload.credential_type.parse()?;

        let now = Utc::now();
        let mut record = Credential {
            id: Uuid::new_v4().to_string(),
            owner_id,
            name: name.to_string(),
            credential_type,
            username: payload.username.clone(),
            url: payload.url.clone(),
            notes: payload.notes.clone(),
            password: None,
            seed_phrase: None,
            private_key: None,
            created_at: now,
            updated_at: now,
            last_accessed: None,
        };

        for field in SecretField::ALL {
            if let Some(value) = payload.secret_value(field) {
                if !value.is_empty() {
                    record.set_sealed_field(field, seal(value, &self.master_key)?);
                }
            }
        }

        let stored = self.store.create(record)?;
        debug!(id = %stored.id, "credential created");

        Ok(policy::mask_for_read(&stored))
    }

    /// Partially update a credential.
    ///
    /// Secret fields present in the payload are re-sealed and
    /// overwritten; absent fields retain their stored values.
    pub fn update(
        &self,
        wallet_address: &str,
        id: &str,
        payload: UpdateCredential,
    ) -> Result<CredentialView> {
        let owner_id = self.resolve_owner(wallet_address)?;
        let existing = self.fetch_owned(id, &owner_id)?;

        let mut patch = CredentialPatch {
            username: payload.username.clone(),
            url: payload.url.clone(),
            notes: payload.notes.clone(),
            updated_at: Some(Utc::now()),
            ..CredentialPatch::default()
        };

        if let Some(name) = &payload.name {
            let name = name.trim();
            if name.is_empty() {
                return Err(VaultError::Validation("name must not be empty".into()));
            }
            patch.name = Some(name.to_string());
        }
        if let Some(credential_type) = &payload.credential_type {
            patch.credential_type = Some(credential_type.parse()?);
        }

        // Seal exactly the secret fields the payload carries; all
        // sealing happens before the single persist call so a seal
        // failure leaves the record untouched.
        for field in SecretField::ALL {
            if let Some(value) = payload.secret_value(field) {
                if !value.is_empty() {
                    let sealed = seal(value, &self.master_key)?;
                    match field {
                        SecretField::Password => patch.password = Some(sealed),
                        SecretField::SeedPhrase => patch.seed_phrase = Some(sealed),
                        SecretField::PrivateKey => patch.private_key = Some(sealed),
                    }
                }
            }
        }

        let stored = self.store.update(&existing.id, patch)?;
        debug!(id = %stored.id, "credential updated");

        Ok(policy::mask_for_read(&stored))
    }

    /// Decrypt a single secret field and return the plaintext.
    ///
    /// The plaintext is decrypted transiently, returned exactly once,
    /// and never cached or logged.
    pub fn decrypt_field(
        &self,
        wallet_address: &str,
        id: &str,
        field_name: &str,
    ) -> Result<String> {
        let owner_id = self.resolve_owner(wallet_address)?;
        let record = self.fetch_owned(id, &owner_id)?;

        let field = policy::decryptable(field_name)?;
        let sealed = record.sealed_field(field).ok_or_else(|| {
            VaultError::Validation(format!("field '{field}' is not set on this credential"))
        })?;

        let plaintext = open(sealed, &self.master_key)?;

        self.touch_last_accessed(vec![record.id.clone()]);

        Ok(plaintext)
    }

    /// Permanently delete a credential.  Same merged `NotFound` rule as
    /// `get_by_id`.
    pub fn delete(&self, wallet_address: &str, id: &str) -> Result<()> {
        let owner_id = self.resolve_owner(wallet_address)?;
        let record = self.fetch_owned(id, &owner_id)?;

        self.store.delete(&record.id)?;
        debug!(id = %record.id, "credential deleted");

        Ok(())
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn resolve_owner(&self, wallet_address: &str) -> Result<String> {
        self.identity
            .resolve_owner(wallet_address)?
            .ok_or(VaultError::Unauthenticated)
    }

    fn fetch_owned(&self, id: &str, owner_id: &str) -> Result<Credential> {
        self.store
            .find_one(id, owner_id)?
            .ok_or(VaultError::NotFound)
    }

    /// Best-effort `last_accessed` bump on a detached thread.
    ///
    /// Must never block or fail the read path that triggered it; write
    /// errors are logged so operators can still observe them.
    fn touch_last_accessed(&self, ids: Vec<String>) {
        if ids.is_empty() {
            return;
        }
        let store = Arc::clone(&self.store);
        thread::spawn(move || {
            let now = Utc::now();
            for id in ids {
                if let Err(e) = store.update(&id, CredentialPatch::touch(now)) {
                    warn!(id = %id, error = %e, "failed to record credential access time");
                }
            }
        });
    }
}
