//! credvault — the confidentiality core of a credential vault.
//!
//! Secrets (account passwords, wallet seed phrases, private keys) are
//! attached to named credential records scoped to a blockchain-address
//! identity, sealed with envelope encryption before they reach storage,
//! and retrievable one field at a time.
//!
//! This crate provides:
//! - Envelope seal/open with AES-256-GCM and PBKDF2 key derivation (`crypto`)
//! - The closed secret-field allow-list and read masking (`policy`)
//! - The vault service orchestrating ownership, sealing, and masking (`vault`)
//! - Injected storage/identity collaborator traits (`store`)
//! - Master key configuration (`config`)
//!
//! HTTP routing, request shapes, and the relational schema are the
//! caller's concern; the storage layer and identity resolver are
//! injected behind traits.

pub mod config;
pub mod crypto;
pub mod errors;
pub mod policy;
pub mod store;
pub mod vault;

// Re-export the most commonly used types at the crate root.
pub use crypto::{open, seal, MasterKey, SealedSecret};
pub use errors::{Result, VaultError};
pub use policy::SecretField;
pub use store::{CredentialPatch, CredentialStore, IdentityResolver, MemoryIdentity, MemoryStore};
pub use vault::{
    CreateCredential, Credential, CredentialType, CredentialView, CredentialVaultService,
    UpdateCredential,
};
