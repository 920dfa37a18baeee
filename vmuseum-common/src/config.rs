//! Bootstrap configuration and data file resolution
//!
//! Every setting resolves in the same priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback)
//!
//! A missing TOML file is not an error: the services log a warning and start
//! with compiled defaults. A TOML file that exists but cannot be parsed is a
//! configuration error.

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Environment variable naming an explicit config file
pub const CONFIG_ENV_VAR: &str = "VMUSEUM_CONFIG";
/// Environment variable naming the catalog data file
pub const DATA_FILE_ENV_VAR: &str = "VMUSEUM_DATA_FILE";
/// Environment variable overriding the log level
pub const LOG_LEVEL_ENV_VAR: &str = "VMUSEUM_LOG";

const APP_DIR_NAME: &str = "vmuseum";
const CONFIG_FILE_NAME: &str = "config.toml";
const DATA_FILE_NAME: &str = "museum.json";

/// Bootstrap configuration loaded from TOML
///
/// All sections are optional; anything left out falls back to compiled defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub api: ApiSection,
    pub ui: UiSection,
    pub met: MetSection,
    pub admin: AdminSection,
    pub logging: LoggingConfig,
}

/// `[api]` - catalog REST service
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiSection {
    pub host: String,
    /// Default: 3000
    pub port: u16,
    /// Catalog data file; falls back to the platform data directory
    pub data_file: Option<PathBuf>,
}

impl Default for ApiSection {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            data_file: None,
        }
    }
}

/// `[ui]` - front-end server
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSection {
    pub host: String,
    /// Default: 8080
    pub port: u16,
    /// Base URL the browser uses to reach the catalog API
    pub api_url: String,
    /// Google Identity Services client id for the admin login page
    pub google_client_id: Option<String>,
}

impl Default for UiSection {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            api_url: "http://localhost:3000/api".to_string(),
            google_client_id: None,
        }
    }
}

/// `[met]` - Metropolitan Museum collection API integration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MetSection {
    pub base_url: String,
    pub user_agent: String,
    /// Free-text query for the artist seed search
    pub seed_query: String,
    /// Object IDs examined from the seed search
    pub seed_candidate_cap: usize,
    /// Maximum artists returned by one cache generation
    pub artist_list_cap: usize,
    /// Object IDs examined when listing works by artist
    pub works_id_cap: usize,
    /// Object IDs sampled for the featured works listing
    pub featured_sample_size: usize,
    pub search_timeout_ms: u64,
    pub object_timeout_ms: u64,
    pub validation_timeout_ms: u64,
    /// Concurrent "has works" searches during artist validation
    pub validation_concurrency: usize,
    pub cache_validity_secs: u64,
    /// Client-wide reqwest ceiling, independent of per-call timeouts
    pub request_timeout_secs: u64,
    pub works_limit_by_id: usize,
    pub works_limit_by_name: usize,
}

impl Default for MetSection {
    fn default() -> Self {
        Self {
            base_url: "https://collectionapi.metmuseum.org/public/collection/v1".to_string(),
            user_agent: concat!("vmuseum/", env!("CARGO_PKG_VERSION")).to_string(),
            seed_query: "artist".to_string(),
            seed_candidate_cap: 40,
            artist_list_cap: 50,
            works_id_cap: 50,
            featured_sample_size: 10,
            search_timeout_ms: 5000,
            object_timeout_ms: 3000,
            validation_timeout_ms: 3000,
            validation_concurrency: 8,
            cache_validity_secs: 3600,
            request_timeout_secs: 30,
            works_limit_by_id: 10,
            works_limit_by_name: 6,
        }
    }
}

/// `[admin]` - server-side gate for catalog mutations
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AdminSection {
    /// When false (default) mutations are not gated server-side
    pub require_login: bool,
    /// Google account emails allowed to mutate; empty means any signed-in account
    pub allowed_emails: Vec<String>,
}

/// `[logging]`
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl TomlConfig {
    /// Load configuration from a file
    ///
    /// Returns `Ok(None)` when the file does not exist.
    pub fn load_file(path: &Path) -> Result<Option<Self>> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content)
                .map(Some)
                .map_err(|e| Error::Config(format!("{}: {}", path.display(), e))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Error::Io(e)),
        }
    }
}

/// Load bootstrap configuration
///
/// Config file lookup: CLI path → `VMUSEUM_CONFIG` → platform config directory.
/// A missing file yields compiled defaults with a warning.
pub fn load_config(cli_path: Option<&Path>) -> Result<TomlConfig> {
    let path = cli_path
        .map(Path::to_path_buf)
        .or_else(|| std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from))
        .or_else(default_config_path);

    let Some(path) = path else {
        warn!("No configuration directory available, using compiled defaults");
        return Ok(TomlConfig::default());
    };

    match TomlConfig::load_file(&path)? {
        Some(config) => {
            info!("Loaded configuration from {}", path.display());
            Ok(config)
        }
        None => {
            warn!(
                "Config file {} not found, using compiled defaults",
                path.display()
            );
            Ok(TomlConfig::default())
        }
    }
}

/// Platform config file location (`~/.config/vmuseum/config.toml` on Linux)
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// OS-dependent default location of the catalog data file
pub fn default_data_file() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join(APP_DIR_NAME))
        .unwrap_or_else(|| PathBuf::from("./vmuseum_data"))
        .join(DATA_FILE_NAME)
}

/// Resolve the catalog data file: CLI → `VMUSEUM_DATA_FILE` → TOML → default
pub fn resolve_data_file(cli_arg: Option<&Path>, config: &TomlConfig) -> PathBuf {
    if let Some(path) = cli_arg {
        return path.to_path_buf();
    }

    if let Some(path) = std::env::var_os(DATA_FILE_ENV_VAR) {
        return PathBuf::from(path);
    }

    if let Some(path) = &config.api.data_file {
        return path.clone();
    }

    default_data_file()
}

/// Resolve a listening port: CLI → first parseable env var → configured value
///
/// Unparseable environment values are skipped with a warning.
pub fn resolve_port(cli_arg: Option<u16>, env_vars: &[&str], configured: u16) -> u16 {
    if let Some(port) = cli_arg {
        return port;
    }

    for name in env_vars {
        if let Ok(value) = std::env::var(name) {
            match value.trim().parse::<u16>() {
                Ok(port) => return port,
                Err(_) => warn!("Ignoring invalid port in {}: {:?}", name, value),
            }
        }
    }

    configured
}

/// Resolve the log level: CLI → `VMUSEUM_LOG` → TOML
pub fn resolve_log_level(cli_arg: Option<&str>, config: &TomlConfig) -> String {
    cli_arg
        .map(str::to_string)
        .or_else(|| std::env::var(LOG_LEVEL_ENV_VAR).ok())
        .filter(|level| !level.trim().is_empty())
        .unwrap_or_else(|| config.logging.level.clone())
}
