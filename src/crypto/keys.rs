//! The process-wide master key.
//!
//! The master key is opaque secret material supplied once at startup
//! (see `config`).  It is the root of all per-value key derivation and
//! is never persisted or logged by this crate.

use zeroize::Zeroize;

use crate::errors::{Result, VaultError};

/// A wrapper around the master key material that automatically zeroes
/// its memory when dropped.
///
/// Read-only for the process lifetime.  Rotating the key invalidates
/// `open()` on every value sealed under the old key.
#[derive(Zeroize)]
#[zeroize(drop)]
pub struct MasterKey {
    bytes: Vec<u8>,
}

impl MasterKey {
    /// Create a new `MasterKey` from raw material.
    ///
    /// Empty material is refused: operating on a missing key would
    /// silently seal everything under a trivially guessable secret.
    pub fn new(material: impl Into<Vec<u8>>) -> Result<Self> {
        let bytes = material.into();
        if bytes.is_empty() {
            return Err(VaultError::Config(
                "master key must not be empty".into(),
            ));
        }
        Ok(Self { bytes })
    }

    /// Access the raw key material (e.g. to feed PBKDF2).
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl std::fmt::Debug for MasterKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("MasterKey(<redacted>)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_material_is_rejected() {
        assert!(MasterKey::new("").is_err());
        assert!(MasterKey::new(Vec::new()).is_err());
    }

    #[test]
    fn debug_output_is_redacted() {
        let key = MasterKey::new("hunter2").unwrap();
        let printed = format!("{key:?}");
        assert!(!printed.contains("hunter2"));
    }
}
