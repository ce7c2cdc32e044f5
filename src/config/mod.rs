//! Process configuration.
//!
//! The only thing credvault needs configured is the master key.  It is
//! read from the `CREDVAULT_MASTER_KEY` environment variable, falling
//! back to a `credvault.toml` file in the given directory.  A missing
//! or empty key is a hard error: there is deliberately no built-in
//! default key, because running on a well-known key would silently
//! void every confidentiality guarantee.

use std::path::Path;

use serde::Deserialize;

use crate::crypto::keys::MasterKey;
use crate::errors::{Result, VaultError};

/// Environment variable consulted before the config file.
pub const MASTER_KEY_ENV: &str = "CREDVAULT_MASTER_KEY";

/// Name of the config file we look for.
const FILE_NAME: &str = "credvault.toml";

#[derive(Deserialize)]
struct FileConfig {
    master_key: Option<String>,
}

/// Loaded configuration.
pub struct Settings {
    master_key: String,
}

impl Settings {
    /// Load settings from the environment or `<dir>/credvault.toml`.
    pub fn load(dir: &Path) -> Result<Self> {
        let from_env = std::env::var(MASTER_KEY_ENV).ok();
        Self::from_sources(dir, from_env)
    }

    fn from_sources(dir: &Path, env_key: Option<String>) -> Result<Self> {
        if let Some(key) = env_key {
            return Self::with_key(key);
        }

        let config_path = dir.join(FILE_NAME);
        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path)
                .map_err(|e| VaultError::Config(format!("{}: {e}", config_path.display())))?;
            let parsed: FileConfig = toml::from_str(&contents).map_err(|e| {
                VaultError::Config(format!("failed to parse {}: {e}", config_path.display()))
            })?;
            if let Some(key) = parsed.master_key {
                return Self::with_key(key);
            }
        }

        Err(VaultError::Config(format!(
            "no master key configured: set {MASTER_KEY_ENV} or master_key in {FILE_NAME}; \
             refusing to start without one"
        )))
    }

    fn with_key(master_key: String) -> Result<Self> {
        if master_key.is_empty() {
            return Err(VaultError::Config("master key must not be empty".into()));
        }
        Ok(Self { master_key })
    }

    /// Build the process master key from the configured material.
    pub fn master_key(&self) -> Result<MasterKey> {
        MasterKey::new(self.master_key.as_str())
    }
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("master_key", &"<redacted>")
            .finish()
    }
}

// ── Tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn env_key_takes_precedence() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(FILE_NAME), "master_key = \"from-file\"\n").unwrap();

        let settings =
            Settings::from_sources(tmp.path(), Some("from-env".to_string())).unwrap();
        assert_eq!(settings.master_key, "from-env");
    }

    #[test]
    fn file_key_is_used_without_env() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(FILE_NAME), "master_key = \"from-file\"\n").unwrap();

        let settings = Settings::from_sources(tmp.path(), None).unwrap();
        assert_eq!(settings.master_key, "from-file");
    }

    #[test]
    fn missing_key_refuses_to_start() {
        let tmp = TempDir::new().unwrap();
        let result = Settings::from_sources(tmp.path(), None);
        assert!(matches!(result, Err(VaultError::Config(_))));
    }

    #[test]
    fn empty_env_key_is_rejected() {
        let tmp = TempDir::new().unwrap();
        let result = Settings::from_sources(tmp.path(), Some(String::new()));
        assert!(matches!(result, Err(VaultError::Config(_))));
    }

    #[test]
    fn empty_file_key_is_rejected() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(FILE_NAME), "master_key = \"\"\n").unwrap();

        let result = Settings::from_sources(tmp.path(), None);
        assert!(matches!(result, Err(VaultError::Config(_))));
    }

    #[test]
    fn invalid_toml_is_an_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(FILE_NAME), "not valid {{toml").unwrap();

        let result = Settings::from_sources(tmp.path(), None);
        assert!(matches!(result, Err(VaultError::Config(_))));
    }

    #[test]
    fn debug_output_is_redacted() {
        let settings = Settings::with_key("super-secret".to_string()).unwrap();
        let printed = format!("{settings:?}");
        assert!(!printed.contains("super-secret"));
    }
}
