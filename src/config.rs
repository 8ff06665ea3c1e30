//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/partytree/partytree.toml`
//! 3. Explicit config file: `--config <file>`
//! 4. Environment variables: `PARTYTREE_*` prefix, `__` between sections
//!    (e.g. `PARTYTREE_SERVER__PORT=8080`)

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, File, FileFormat};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;
use crate::util::path::expand_env_vars;

/// Environment variable prefix for overrides.
pub const ENV_PREFIX: &str = "PARTYTREE";

/// What `create` does when the requested owner does not exist.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DanglingOwnerPolicy {
    /// Fail with `DanglingOwner`, nothing is written
    #[default]
    Reject,
    /// Persist the unresolved owner reference with an empty path
    Allow,
}

/// Storage engine selection.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Sqlite,
    Memory,
}

/// HTTP listener settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 3000,
        }
    }
}

impl ServerConfig {
    /// `host:port` for binding.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Base URL advertised in the API document.
    pub fn public_url(&self) -> String {
        format!("http://{}", self.bind_addr())
    }
}

/// Storage settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    /// SQLite database file (ignored by the memory backend)
    pub database: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Sqlite,
            database: default_database_path(),
        }
    }
}

/// Hierarchy rules.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct HierarchyConfig {
    pub dangling_owner: DanglingOwnerPolicy,
}

/// Shape of the random tree produced by `seed`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SeedConfig {
    /// Top-level parties
    pub roots: usize,
    /// Subsidiaries per root (inclusive range)
    pub subsidiaries_min: usize,
    pub subsidiaries_max: usize,
    /// Nested subsidiaries per subsidiary (inclusive range)
    pub nested_min: usize,
    pub nested_max: usize,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            roots: 5,
            subsidiaries_min: 2,
            subsidiaries_max: 5,
            nested_min: 1,
            nested_max: 3,
        }
    }
}

/// Unified configuration for partytree.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub hierarchy: HierarchyConfig,
    pub seed: SeedConfig,
}

/// Get the default database location (~/.partytree/partytree.db).
fn default_database_path() -> PathBuf {
    directories::BaseDirs::new()
        .map(|dirs| dirs.home_dir().join(".partytree").join("partytree.db"))
        .unwrap_or_else(|| PathBuf::from("~/.partytree/partytree.db"))
}

/// Get the XDG config directory for partytree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "partytree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("partytree.toml"))
}

impl Settings {
    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `config_file` - Optional explicit config file, must exist when given
    pub fn load(config_file: Option<&Path>) -> Result<Self, ApplicationError> {
        // 1. Compiled defaults
        let defaults = Config::try_from(&Self::default()).map_err(config_err)?;
        let mut builder = Config::builder().add_source(defaults);

        // 2. Global config
        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                builder = builder.add_source(
                    File::from(global_path)
                        .format(FileFormat::Toml)
                        .required(false),
                );
            }
        }

        // 3. Explicit file
        if let Some(path) = config_file {
            builder = builder.add_source(
                File::from(path.to_path_buf())
                    .format(FileFormat::Toml)
                    .required(true),
            );
        }

        // 4. Environment overrides
        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().map_err(config_err)?;
        let mut settings: Self = config.try_deserialize().map_err(config_err)?;

        // Expand ~ and $VAR in path-like fields
        settings.expand_paths();

        Ok(settings)
    }

    /// Expand shell variables and tilde in path-like fields.
    fn expand_paths(&mut self) {
        let expanded = expand_env_vars(self.storage.database.to_string_lossy().as_ref());
        self.storage.database = PathBuf::from(expanded);
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# partytree configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/partytree/partytree.toml
#   File:   partytree --config <file>
#   Env:    PARTYTREE_* environment variables, e.g. PARTYTREE_SERVER__PORT=8080

[server]
# host = "127.0.0.1"
# port = 3000

[storage]
# "sqlite" (durable) or "memory" (lost on exit)
# backend = "sqlite"
# database = "~/.partytree/partytree.db"

[hierarchy]
# Creating a party under an owner id that does not exist:
#   "reject" fails the request, "allow" stores it as a root-like party (empty path)
# dangling_owner = "reject"

[seed]
# roots = 5
# subsidiaries_min = 2
# subsidiaries_max = 5
# nested_min = 1
# nested_max = 3
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_defaults_then_sqlite_under_home_and_reject_policy() {
        let settings = Settings::default();
        assert_eq!(settings.storage.backend, StorageBackend::Sqlite);
        assert!(settings
            .storage
            .database
            .to_string_lossy()
            .contains(".partytree"));
        assert_eq!(
            settings.hierarchy.dangling_owner,
            DanglingOwnerPolicy::Reject
        );
        assert_eq!(settings.server.bind_addr(), "127.0.0.1:3000");
    }

    #[test]
    fn given_tilde_in_database_when_expand_paths_then_expands_to_home() {
        let mut settings = Settings::default();
        settings.storage.database = PathBuf::from("~/data/parties.db");

        settings.expand_paths();

        let home = std::env::var("HOME").expect("HOME should be set");
        let database = settings.storage.database.to_string_lossy();
        assert!(database.starts_with(&home), "{database}");
        assert!(!database.contains('~'), "{database}");
    }

    #[test]
    fn given_template_when_parsed_then_yields_defaults() {
        let parsed: Settings = toml::from_str(&Settings::template()).unwrap();
        assert_eq!(parsed, Settings::default());
    }

    #[test]
    fn given_settings_when_to_toml_then_round_trips() {
        let settings = Settings::default();
        let parsed: Settings = toml::from_str(&settings.to_toml().unwrap()).unwrap();
        assert_eq!(parsed, settings);
    }
}
