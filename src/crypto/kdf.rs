//! Per-value key derivation using PBKDF2-HMAC-SHA512.
//!
//! Every sealed value gets its own 64-byte random salt, and the 32-byte
//! AES key is derived freshly from master key + salt on both the seal
//! and open paths.  Derived keys are never cached.

use pbkdf2::pbkdf2_hmac;
use rand::RngCore;
use sha2::Sha512;

/// Length of the per-value salt in bytes (512 bits).
pub const SALT_LEN: usize = 64;

/// Length of the derived key in bytes (256 bits, for AES-256).
pub const KEY_LEN: usize = 32;

/// PBKDF2 iteration count.
///
/// Frozen: changing this breaks `open()` on every previously sealed
/// value, exactly like rotating the master key.
pub const PBKDF2_ITERATIONS: u32 = 100_000;

/// Derive a 32-byte encryption key from the master key and a salt.
///
/// The same master key + salt always produces the same key, which is
/// what lets `open` reconstruct the key from the blob header.
pub fn derive_value_key(master_key: &[u8], salt: &[u8]) -> [u8; KEY_LEN] {
    let mut key = [0u8; KEY_LEN];
    pbkdf2_hmac::<Sha512>(master_key, salt, PBKDF2_ITERATIONS, &mut key);
    key
}

/// Generate a cryptographically random 64-byte salt.
pub fn generate_salt() -> [u8; SALT_LEN] {
    let mut salt = [0u8; SALT_LEN];
    rand::rngs::OsRng.fill_bytes(&mut salt);
    salt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_inputs_same_key() {
        let salt = generate_salt();
        let k1 = derive_value_key(b"master", &salt);
        let k2 = derive_value_key(b"master", &salt);
        assert_eq!(k1, k2, "same master key + salt must produce the same key");
    }

    #[test]
    fn different_salts_different_keys() {
        let salt1 = generate_salt();
        let salt2 = generate_salt();
        let k1 = derive_value_key(b"master", &salt1);
        let k2 = derive_value_key(b"master", &salt2);
        assert_ne!(k1, k2, "different salts must produce different keys");
    }

    #[test]
    fn different_master_keys_different_keys() {
        let salt = generate_salt();
        let k1 = derive_value_key(b"master-one", &salt);
        let k2 = derive_value_key(b"master-two", &salt);
        assert_ne!(k1, k2);
    }

    #[test]
    fn salts_are_random() {
        assert_ne!(generate_salt(), generate_salt());
    }
}
