//! Credential records and the vault service.

pub mod credential;
pub mod service;

pub use credential::{
    CreateCredential, Credential, CredentialType, CredentialView, UpdateCredential,
};
pub use service::CredentialVaultService;
