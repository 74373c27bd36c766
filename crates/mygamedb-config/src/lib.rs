//! Configuration for myGameDatabase
//!
//! Holds the catalog store location, the table name and the user-facing
//! message texts. Values come from a TOML file when one is present and fall
//! back to built-in defaults otherwise.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    NotFound(PathBuf),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

/// Environment variable naming an explicit configuration file
pub const CONFIG_ENV_VAR: &str = "MYGAMEDB_CONFIG";

/// Configuration file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "mygamedb.toml";

/// Where and how the catalog is persisted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Database file
    #[serde(default = "default_store_path")]
    pub path: PathBuf,

    /// Table holding the game records
    #[serde(default = "default_table")]
    pub table: String,
}

fn default_store_path() -> PathBuf {
    PathBuf::from("myGameCollection.db")
}

fn default_table() -> String {
    "games".to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_store_path(),
            table: default_table(),
        }
    }
}

/// Texts shown by the dialogue loop
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageConfig {
    /// Printed when a menu choice is not one of the listed options
    #[serde(default = "default_invalid_response")]
    pub invalid_response: String,
}

fn default_invalid_response() -> String {
    "Invalid response".to_string()
}

impl Default for MessageConfig {
    fn default() -> Self {
        Self {
            invalid_response: default_invalid_response(),
        }
    }
}

/// Main myGameDatabase configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default)]
    pub store: StoreConfig,

    #[serde(default)]
    pub messages: MessageConfig,
}

impl CatalogConfig {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let contents = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        config.validate()?;

        tracing::debug!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    /// Load configuration from default locations
    pub fn load_default() -> Result<Self, ConfigError> {
        // An explicit file wins, and must exist
        if let Some(explicit) = std::env::var_os(CONFIG_ENV_VAR) {
            return Self::load(Path::new(&explicit));
        }

        let local = Path::new(DEFAULT_CONFIG_FILE);
        if local.exists() {
            return Self::load(local);
        }

        tracing::warn!("No configuration file found, using defaults");
        Ok(Self::default())
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let contents = toml::to_string_pretty(self)?;

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        std::fs::write(path, contents)?;
        tracing::info!("Configuration saved to {}", path.display());
        Ok(())
    }

    /// Check values that cannot be verified by deserialization alone
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.store.path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("store path is empty".to_string()));
        }

        if !is_sql_identifier(&self.store.table) {
            return Err(ConfigError::Invalid(format!(
                "table name {:?} is not a plain identifier",
                self.store.table
            )));
        }

        Ok(())
    }
}

/// Whether `name` can be used as an unquoted SQL identifier.
///
/// Table names cannot be bound as statement parameters, so they are limited
/// to ASCII letters, digits and underscores, not starting with a digit.
pub fn is_sql_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn test_default_config() {
        let config = CatalogConfig::default();
        assert_eq!(config.store.path, PathBuf::from("myGameCollection.db"));
        assert_eq!(config.store.table, "games");
        assert_eq!(config.messages.invalid_response, "Invalid response");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        let config_content = r#"
[store]
path = "collection.db"
table = "my_games"

[messages]
invalid_response = "Try again"
"#;
        write!(temp_file, "{}", config_content).unwrap();

        let config = CatalogConfig::load(temp_file.path()).unwrap();
        assert_eq!(config.store.path, PathBuf::from("collection.db"));
        assert_eq!(config.store.table, "my_games");
        assert_eq!(config.messages.invalid_response, "Try again");
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "[store]\ntable = \"collection\"\n").unwrap();

        let config = CatalogConfig::load(temp_file.path()).unwrap();
        assert_eq!(config.store.table, "collection");
        assert_eq!(config.store.path, PathBuf::from("myGameCollection.db"));
        assert_eq!(config.messages, MessageConfig::default());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("absent.toml");

        let err = CatalogConfig::load(&missing).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_load_rejects_bad_table_name() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "[store]\ntable = \"games; DROP TABLE games\"\n").unwrap();

        let err = CatalogConfig::load(temp_file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_save_config() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("mygamedb.toml");

        let mut config = CatalogConfig::default();
        config.store.table = "collection".to_string();
        config.save(&path).unwrap();

        let loaded = CatalogConfig::load(&path).unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_sql_identifier() {
        assert!(is_sql_identifier("games"));
        assert!(is_sql_identifier("_games2"));
        assert!(is_sql_identifier("tableName"));

        assert!(!is_sql_identifier(""));
        assert!(!is_sql_identifier("2games"));
        assert!(!is_sql_identifier("my games"));
        assert!(!is_sql_identifier("games\""));
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::NotFound(PathBuf::from("mygamedb.toml"));
        assert!(format!("{}", err).contains("not found"));

        let err = ConfigError::Invalid("test error".to_string());
        assert!(format!("{}", err).contains("Invalid"));
    }
}
