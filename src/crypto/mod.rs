//! Cryptographic primitives for credvault.
//!
//! This module provides:
//! - Envelope seal/open of single values with AES-256-GCM (`envelope`)
//! - PBKDF2-HMAC-SHA512 per-value key derivation (`kdf`)
//! - The zeroizing master key wrapper (`keys`)

pub mod envelope;
pub mod kdf;
pub mod keys;

// Re-export the most commonly used items so callers can write:
//   use crate::crypto::{seal, open, MasterKey, ...};
pub use envelope::{open, seal, SealedSecret};
pub use kdf::{derive_value_key, generate_salt, PBKDF2_ITERATIONS, SALT_LEN};
pub use keys::MasterKey;
