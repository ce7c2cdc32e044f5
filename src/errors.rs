use thiserror::Error;

/// All errors that can occur in credvault.
#[derive(Debug, Error)]
pub enum VaultError {
    // --- Caller input errors ---
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Could not resolve an owner for the caller's wallet address")]
    Unauthenticated,

    /// Raised both when a credential does not exist and when it belongs
    /// to a different owner, so a caller cannot probe for records that
    /// are not theirs.
    #[error("Credential not found")]
    NotFound,

    #[error("Field '{0}' is not a decryptable secret field")]
    Policy(String),

    // --- Crypto errors ---
    #[error("Malformed sealed value: {0}")]
    Format(String),

    /// Tag verification failed. Covers both a tampered blob and a wrong
    /// master key; the two causes are deliberately not distinguished.
    #[error("Decryption failed: wrong master key or corrupted data")]
    Decryption,

    #[error("Encryption failed: {0}")]
    Encryption(String),

    // --- Config errors ---
    #[error("Config error: {0}")]
    Config(String),

    // --- Collaborator errors ---
    #[error("Storage error: {0}")]
    Storage(String),
}

/// Convenience type alias for credvault results.
pub type Result<T> = std::result::Result<T, VaultError>;
