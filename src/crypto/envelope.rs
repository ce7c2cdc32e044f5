//! Envelope seal/open of a single secret value.
//!
//! Each call to `seal` generates a fresh 64-byte salt, derives a
//! one-off AES-256 key from the master key via PBKDF2, encrypts with
//! AES-256-GCM under a fresh 16-byte IV, and packs everything into one
//! base64 blob.  `open` reverses the process and verifies the auth tag.
//!
//! Layout of the decoded blob:
//!   [ 64-byte salt | 16-byte IV | 16-byte auth tag | ciphertext ]
//!
//! The header layout is frozen so previously sealed values stay
//! openable.

use aes_gcm::aead::consts::U16;
use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::aes::Aes256;
use aes_gcm::{AeadCore, AesGcm, Nonce};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

use crate::crypto::kdf::{derive_value_key, generate_salt, SALT_LEN};
use crate::crypto::keys::MasterKey;
use crate::errors::{Result, VaultError};

/// AES-256-GCM with a 16-byte nonce, matching the blob layout.
type Aes256Gcm16 = AesGcm<Aes256, U16>;

/// Size of the IV in bytes.
const IV_LEN: usize = 16;

/// Size of the GCM authentication tag in bytes.
const TAG_LEN: usize = 16;

/// Size of the fixed header preceding the ciphertext.
const HEADER_LEN: usize = SALT_LEN + IV_LEN + TAG_LEN;

/// A sealed secret value: salt, IV, auth tag, and ciphertext packed
/// into a single base64 string.
///
/// This is the only form in which a secret field is ever persisted.
/// The inner text is stored verbatim by the storage collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SealedSecret(String);

impl SealedSecret {
    /// Wrap an already-encoded blob, e.g. when loading from storage.
    pub fn from_encoded(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    /// The base64 text form, as persisted.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Seal a plaintext value under the master key.
///
/// Non-deterministic: two seals of the same plaintext under the same
/// key never produce identical output, because both the salt and the
/// IV are freshly random.  This prevents fingerprinting of repeated
/// secrets across records.
pub fn seal(plaintext: &str, master_key: &MasterKey) -> Result<SealedSecret> {
    // Fresh salt, fresh per-value key.
    let salt = generate_salt();
    let mut key = derive_value_key(master_key.as_bytes(), &salt);

    let cipher = Aes256Gcm16::new_from_slice(&key)
        .map_err(|e| VaultError::Encryption(format!("invalid key length: {e}")))?;
    key.zeroize();

    // Fresh random 16-byte IV.
    let iv = Aes256Gcm16::generate_nonce(&mut aes_gcm::aead::OsRng);

    // The aead crate appends the 16-byte tag to the ciphertext.
    let mut ct_and_tag = cipher
        .encrypt(&iv, plaintext.as_bytes())
        .map_err(|e| VaultError::Encryption(format!("encryption error: {e}")))?;

    // Repack as salt || iv || tag || ciphertext.
    let tag_start = ct_and_tag.len() - TAG_LEN;
    let mut blob = Vec::with_capacity(HEADER_LEN + tag_start);
    blob.extend_from_slice(&salt);
    blob.extend_from_slice(&iv);
    blob.extend_from_slice(&ct_and_tag[tag_start..]);
    blob.extend_from_slice(&ct_and_tag[..tag_start]);
    ct_and_tag.zeroize();

    Ok(SealedSecret(BASE64.encode(blob)))
}

/// Open a sealed value, verifying the authentication tag.
///
/// Fails with `Format` if the blob is not valid base64 or is shorter
/// than the fixed header, and with `Decryption` if tag verification
/// fails.  No partial plaintext is ever returned on failure.
pub fn open(sealed: &SealedSecret, master_key: &MasterKey) -> Result<String> {
    let blob = BASE64
        .decode(sealed.as_str())
        .map_err(|e| VaultError::Format(format!("invalid base64: {e}")))?;

    if blob.len() < HEADER_LEN {
        return Err(VaultError::Format(format!(
            "blob is {} bytes, expected at least {HEADER_LEN}",
            blob.len()
        )));
    }

    // Slice the fixed-size header back out.
    let salt = &blob[..SALT_LEN];
    let iv = &blob[SALT_LEN..SALT_LEN + IV_LEN];
    let tag = &blob[SALT_LEN + IV_LEN..HEADER_LEN];
    let ciphertext = &blob[HEADER_LEN..];

    // Re-derive the per-value key with identical PBKDF2 parameters.
    let mut key = derive_value_key(master_key.as_bytes(), salt);
    let cipher = Aes256Gcm16::new_from_slice(&key).map_err(|_| VaultError::Decryption)?;
    key.zeroize();

    // The aead crate expects ciphertext || tag.
    let mut ct_and_tag = Vec::with_capacity(ciphertext.len() + TAG_LEN);
    ct_and_tag.extend_from_slice(ciphertext);
    ct_and_tag.extend_from_slice(tag);

    // Decrypt and verify the tag.  A mismatch means tampering or a
    // wrong master key; the two are indistinguishable here.
    let plaintext_bytes = cipher
        .decrypt(Nonce::<U16>::from_slice(iv), ct_and_tag.as_slice())
        .map_err(|_| VaultError::Decryption)?;

    String::from_utf8(plaintext_bytes).map_err(|e| {
        let mut bad_bytes = e.into_bytes();
        bad_bytes.zeroize();
        VaultError::Decryption
    })
}
