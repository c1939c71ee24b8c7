//! Configuration loading and typed config structures.
//!
//! The configuration lives in `bdsoil-config.yaml` next to the binary's
//! working directory (overridable with `--config`). Every field has a
//! default, so a missing file or a partial file is fine. `DATABASE_URL`
//! and `BDSOIL_DATA_DIR` override the file.

use std::path::{Path, PathBuf};
use std::time::Duration;

use bdsoil_catalog::CatalogSources;
use bdsoil_db::{IN_MEMORY_URL, SqliteConfig};
use bdsoil_geo::ProviderConfig;
use serde::Deserialize;

/// Default configuration file name.
pub const DEFAULT_CONFIG_FILE: &str = "bdsoil-config.yaml";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file {path}: {source}")]
    Io {
        /// File that could not be read.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AppConfig {
    /// Store location and pool size.
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Reference table locations.
    #[serde(default)]
    pub data: DataConfig,

    /// Geocoding endpoints and timing.
    #[serde(default)]
    pub geo: GeoConfig,

    /// Report output.
    #[serde(default)]
    pub report: ReportConfig,

    /// Log verbosity.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from a YAML file, falling back to defaults when
    /// the file does not exist. Environment overrides are applied either way.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file exists but cannot be read,
    /// or [`ConfigError::Yaml`] if it is not valid YAML.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let mut config = if path.exists() {
            let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            Self::from_yaml_str(&contents)?
        } else {
            Self::default()
        };
        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a YAML string, without environment overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yml::from_str(yaml)?)
    }

    /// Override settings from the process environment.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    /// Override settings from a variable lookup.
    ///
    /// - `DATABASE_URL` replaces `database.url`
    /// - `BDSOIL_DATA_DIR` re-roots the three reference table paths
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("DATABASE_URL") {
            self.database.url = url;
        }
        if let Some(dir) = lookup("BDSOIL_DATA_DIR") {
            let sources = CatalogSources::in_dir(Path::new(&dir));
            self.data = DataConfig {
                crops_csv: sources.crops_csv,
                fertilizer_csv: sources.fertilizer_csv,
                pest_csv: sources.pest_csv,
            };
        }
    }

    /// Reference table locations for the catalog loader.
    pub fn catalog_sources(&self) -> CatalogSources {
        CatalogSources {
            crops_csv: self.data.crops_csv.clone(),
            fertilizer_csv: self.data.fertilizer_csv.clone(),
            pest_csv: self.data.pest_csv.clone(),
        }
    }

    /// Pool settings for the store. An in-memory URL always gets a
    /// single connection so every query sees the same database.
    pub fn sqlite_config(&self) -> SqliteConfig {
        if self.database.url == IN_MEMORY_URL {
            return SqliteConfig::in_memory();
        }
        SqliteConfig::new(&self.database.url).with_max_connections(self.database.max_connections)
    }

    /// Endpoints and client settings for the geocoding providers.
    pub fn provider_config(&self) -> ProviderConfig {
        ProviderConfig {
            reverse_url: self.geo.reverse_url.clone(),
            primary_forward_url: self.geo.primary_forward_url.clone(),
            secondary_forward_url: self.geo.secondary_forward_url.clone(),
            user_agent: self.geo.user_agent.clone(),
            timeout: Duration::from_millis(self.geo.timeout_ms),
        }
    }

    /// Quiet period before a GPS edit is resolved.
    pub const fn debounce(&self) -> Duration {
        Duration::from_millis(self.geo.debounce_ms)
    }
}

/// Store settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DatabaseConfig {
    /// `SQLite` URL.
    #[serde(default = "default_database_url")]
    pub url: String,

    /// Maximum pool connections.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_database_url(),
            max_connections: default_max_connections(),
        }
    }
}

/// Reference table paths.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DataConfig {
    /// Crop table.
    #[serde(default = "default_crops_csv")]
    pub crops_csv: PathBuf,

    /// Fertilizer table.
    #[serde(default = "default_fertilizer_csv")]
    pub fertilizer_csv: PathBuf,

    /// Pest and disease table.
    #[serde(default = "default_pest_csv")]
    pub pest_csv: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            crops_csv: default_crops_csv(),
            fertilizer_csv: default_fertilizer_csv(),
            pest_csv: default_pest_csv(),
        }
    }
}

/// Geocoding settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GeoConfig {
    /// Nominatim reverse endpoint.
    #[serde(default = "default_reverse_url")]
    pub reverse_url: String,

    /// First IP location provider.
    #[serde(default = "default_primary_forward_url")]
    pub primary_forward_url: String,

    /// Second IP location provider.
    #[serde(default = "default_secondary_forward_url")]
    pub secondary_forward_url: String,

    /// HTTP user agent.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Per-request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Debounce quiet period in milliseconds.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

impl Default for GeoConfig {
    fn default() -> Self {
        Self {
            reverse_url: default_reverse_url(),
            primary_forward_url: default_primary_forward_url(),
            secondary_forward_url: default_secondary_forward_url(),
            user_agent: default_user_agent(),
            timeout_ms: default_timeout_ms(),
            debounce_ms: default_debounce_ms(),
        }
    }
}

/// Report output settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReportConfig {
    /// Directory report files are written to.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level used when `RUST_LOG` is unset (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

fn default_database_url() -> String {
    "sqlite://bdsoil.db".to_owned()
}

const fn default_max_connections() -> u32 {
    5
}

fn default_crops_csv() -> PathBuf {
    PathBuf::from("data/bangladesh_crops.csv")
}

fn default_fertilizer_csv() -> PathBuf {
    PathBuf::from("data/fertilizer_data.csv")
}

fn default_pest_csv() -> PathBuf {
    PathBuf::from("data/pest_disease_data.csv")
}

fn default_reverse_url() -> String {
    "https://nominatim.openstreetmap.org/reverse".to_owned()
}

fn default_primary_forward_url() -> String {
    "https://ipapi.co/json/".to_owned()
}

fn default_secondary_forward_url() -> String {
    "https://ipinfo.io/json".to_owned()
}

fn default_user_agent() -> String {
    "bdsoil-app-v1".to_owned()
}

const fn default_timeout_ms() -> u64 {
    10_000
}

const fn default_debounce_ms() -> u64 {
    800
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_log_level() -> String {
    "info".to_owned()
}
