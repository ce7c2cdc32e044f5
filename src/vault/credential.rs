//! Credential record, masked view, and write payloads.
//!
//! `Credential` is the full stored record, including sealed secret
//! fields.  It never crosses the service boundary outward; read
//! responses are `CredentialView` projections produced by
//! `policy::mask_for_read`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::crypto::SealedSecret;
use crate::errors::{Result, VaultError};
use crate::policy::SecretField;

/// The kind of credential a record represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CredentialType {
    /// An ordinary account credential (site login, API key, ...).
    Standard,
    /// A blockchain wallet credential (seed phrase, private key).
    Wallet,
}

impl std::str::FromStr for CredentialType {
    type Err = VaultError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "standard" => Ok(CredentialType::Standard),
            "wallet" => Ok(CredentialType::Wallet),
            other => Err(VaultError::Validation(format!(
                "type must be 'standard' or 'wallet', got '{other}'"
            ))),
        }
    }
}

impl std::fmt::Display for CredentialType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            CredentialType::Standard => "standard",
            CredentialType::Wallet => "wallet",
        })
    }
}

/// A stored credential record.
///
/// Owned by exactly one owner.  Secret fields are either `None` or a
/// well-formed `SealedSecret`; plaintext is never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credential {
    pub id: String,
    pub owner_id: String,
    pub name: String,
    pub credential_type: CredentialType,

    // Non-secret metadata, stored untouched.
    pub username: Option<String>,
    pub url: Option<String>,
    pub notes: Option<String>,

    // Secret fields, sealed before persistence.
    pub password: Option<SealedSecret>,
    pub seed_phrase: Option<SealedSecret>,
    pub private_key: Option<SealedSecret>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub last_accessed: Option<DateTime<Utc>>,
}

impl Credential {
    /// The sealed value stored for a secret field, if any.
    pub fn sealed_field(&self, field: SecretField) -> Option<&SealedSecret> {
        match field {
            SecretField::Password => self.password.as_ref(),
            SecretField::SeedPhrase => self.seed_phrase.as_ref(),
            SecretField::PrivateKey => self.private_key.as_ref(),
        }
    }

    pub(crate) fn set_sealed_field(&mut self, field: SecretField, value: SealedSecret) {
        match field {
            SecretField::Password => self.password = Some(value),
            SecretField::SeedPhrase => self.seed_phrase = Some(value),
            SecretField::PrivateKey => self.private_key = Some(value),
        }
    }
}

/// The read-safe projection of a credential.
///
/// Secret fields are replaced by `has_*` booleans.  Serializes with
/// camelCase keys (`hasPassword`, ...) for callers that pass it
/// through to a JSON surface.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialView {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub credential_type: CredentialType,
    pub username: Option<String>,
    pub url: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub last_accessed: Option<DateTime<Utc>>,
    pub has_password: bool,
    pub has_seed_phrase: bool,
    pub has_private_key: bool,
}

/// Payload for creating a credential.
///
/// Secret fields arrive as plaintext and are sealed by the service
/// before anything reaches storage.  `credential_type` is a string so
/// an invalid type fails validation before any storage or cipher call.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCredential {
    pub name: String,
    #[serde(rename = "type")]
    pub credential_type: String,
    pub username: Option<String>,
    pub url: Option<String>,
    pub notes: Option<String>,
    pub password: Option<String>,
    pub seed_phrase: Option<String>,
    pub private_key: Option<String>,
}

impl CreateCredential {
    pub(crate) fn secret_value(&self, field: SecretField) -> Option<&str> {
        match field {
            SecretField::Password => self.password.as_deref(),
            SecretField::SeedPhrase => self.seed_phrase.as_deref(),
            SecretField::PrivateKey => self.private_key.as_deref(),
        }
    }
}

/// Payload for partially updating a credential.
///
/// Absent fields retain their stored values; present secret fields are
/// re-sealed and overwritten.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCredential {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub credential_type: Option<String>,
    pub username: Option<String>,
    pub url: Option<String>,
    pub notes: Option<String>,
    pub password: Option<String>,
    pub seed_phrase: Option<String>,
    pub private_key: Option<String>,
}

impl UpdateCredential {
    pub(crate) fn secret_value(&self, field: SecretField) -> Option<&str> {
        match field {
            SecretField::Password => self.password.as_deref(),
            SecretField::SeedPhrase => self.seed_phrase.as_deref(),
            SecretField::PrivateKey => self.private_key.as_deref(),
        }
    }
}
