//! The secret-field allow-list and read-side masking rule.
//!
//! `SecretField` is the single auditable definition of which credential
//! fields hold sealed secrets.  Everything that seals, opens, or masks
//! a secret field goes through this enum; no other module hardcodes
//! the field names.

use std::fmt;
use std::str::FromStr;

use crate::errors::{Result, VaultError};
use crate::vault::credential::{Credential, CredentialView};

/// The closed set of secret fields on a credential.
///
/// Never extended implicitly: any field name outside this set fails
/// `Policy` before the cipher is touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecretField {
    Password,
    SeedPhrase,
    PrivateKey,
}

impl SecretField {
    /// All secret fields, in a fixed order.
    pub const ALL: [SecretField; 3] = [
        SecretField::Password,
        SecretField::SeedPhrase,
        SecretField::PrivateKey,
    ];

    /// The wire name of the field, as it appears in payloads and
    /// decrypt requests.
    pub fn name(self) -> &'static str {
        match self {
            SecretField::Password => "password",
            SecretField::SeedPhrase => "seedPhrase",
            SecretField::PrivateKey => "privateKey",
        }
    }
}

impl fmt::Display for SecretField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SecretField {
    type Err = VaultError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "password" => Ok(SecretField::Password),
            "seedPhrase" => Ok(SecretField::SeedPhrase),
            "privateKey" => Ok(SecretField::PrivateKey),
            other => Err(VaultError::Policy(other.to_string())),
        }
    }
}

/// Check that `field_name` names a decryptable secret field.
pub fn decryptable(field_name: &str) -> Result<SecretField> {
    field_name.parse()
}

/// Project a credential into its read-safe form.
///
/// Each secret field is replaced by a boolean that reports whether a
/// sealed value is stored; neither sealed nor plaintext values ever
/// appear in the projection.
pub fn mask_for_read(credential: &Credential) -> CredentialView {
    CredentialView {
        id: credential.id.clone(),
        name: credential.name.clone(),
        credential_type: credential.credential_type,
        username: credential.username.clone(),
        url: credential.url.clone(),
        notes: credential.notes.clone(),
        created_at: credential.created_at,
        updated_at: credential.updated_at,
        last_accessed: credential.last_accessed,
        has_password: credential.password.is_some(),
        has_seed_phrase: credential.seed_phrase.is_some(),
        has_private_key: credential.private_key.is_some(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allow_list_accepts_the_three_secret_fields() {
        assert_eq!(decryptable("password").unwrap(), SecretField::Password);
        assert_eq!(decryptable("seedPhrase").unwrap(), SecretField::SeedPhrase);
        assert_eq!(decryptable("privateKey").unwrap(), SecretField::PrivateKey);
    }

    #[test]
    fn allow_list_rejects_everything_else() {
        for name in ["notes", "name", "Password", "seed_phrase", "", "id"] {
            let err = decryptable(name).unwrap_err();
            assert!(
                matches!(err, VaultError::Policy(_)),
                "'{name}' must fail the allow-list"
            );
        }
    }

    #[test]
    fn names_round_trip() {
        for field in SecretField::ALL {
            assert_eq!(decryptable(field.name()).unwrap(), field);
        }
    }
}
