//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.rickdex/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::api::{DEFAULT_BASE_URL, ResourceKind};

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct RickdexConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub browse: BrowseConfig,
    #[serde(default)]
    pub notes: NotesConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ApiConfig {
    pub base_url: Option<String>,
    pub request_timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct BrowseConfig {
    pub initial_resource: Option<ResourceKind>,
    pub debounce_ms: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct NotesConfig {
    /// Absolute, or relative to `~/.rickdex/`
    pub path: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_DEBOUNCE_MS: u64 = 300;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
const DEFAULT_NOTES_FILE: &str = "notes.json";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub base_url: String,
    pub request_timeout: Option<Duration>,
    pub initial_resource: ResourceKind,
    pub initial_search: String,
    pub debounce: Duration,
    pub notes_path: Option<PathBuf>,
}

/// Values taken from the command line (None = not specified).
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub base_url: Option<String>,
    pub resource: Option<ResourceKind>,
    pub search: Option<String>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

// ============================================================================
// Loading
// ============================================================================

/// Returns `~/.rickdex`.
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".rickdex"))
}

/// Returns the path to `~/.rickdex/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Load config from `~/.rickdex/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `RickdexConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<RickdexConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(RickdexConfig::default());
        }
    };
    load_config_from(&path)
}

pub fn load_config_from(path: &Path) -> Result<RickdexConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(RickdexConfig::default());
    }

    let contents = fs::read_to_string(path)?;
    let config: RickdexConfig = toml::from_str(&contents)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# rickdex configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults -> this file -> env vars -> CLI flags.

# [api]
# base_url = "https://rickandmortyapi.com/api"   # Or set RICKDEX_BASE_URL
# request_timeout_secs = 30

# [browse]
# initial_resource = "characters"                # "characters", "episodes" or "locations"
# debounce_ms = 300

# [notes]
# path = "notes.json"                            # Relative to ~/.rickdex/
"#;

    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &RickdexConfig, cli: &CliOverrides) -> ResolvedConfig {
    resolve_with_env(config, cli, std::env::var("RICKDEX_BASE_URL").ok())
}

fn resolve_with_env(
    config: &RickdexConfig,
    cli: &CliOverrides,
    env_base_url: Option<String>,
) -> ResolvedConfig {
    // Base URL: CLI → env → config → default
    let base_url = cli
        .base_url
        .clone()
        .or(env_base_url)
        .or_else(|| config.api.base_url.clone())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
    let base_url = match Url::parse(&base_url) {
        Ok(_) => base_url,
        Err(e) => {
            warn!(
                "Ignoring invalid base URL {:?} ({}), using {}",
                base_url, e, DEFAULT_BASE_URL
            );
            DEFAULT_BASE_URL.to_string()
        }
    };

    // A zero timeout means "use the HTTP client's default"
    let request_timeout = match config.api.request_timeout_secs {
        Some(0) => None,
        Some(secs) => Some(Duration::from_secs(secs)),
        None => Some(Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS)),
    };

    let initial_resource = cli
        .resource
        .or(config.browse.initial_resource)
        .unwrap_or_default();

    let debounce = Duration::from_millis(config.browse.debounce_ms.unwrap_or(DEFAULT_DEBOUNCE_MS));

    ResolvedConfig {
        base_url,
        request_timeout,
        initial_resource,
        initial_search: cli.search.clone().unwrap_or_default(),
        debounce,
        notes_path: resolve_notes_path(config),
    }
}

/// Absolute paths are used as-is; relative ones live under `~/.rickdex/`.
fn resolve_notes_path(config: &RickdexConfig) -> Option<PathBuf> {
    let file = config
        .notes
        .path
        .as_deref()
        .unwrap_or(DEFAULT_NOTES_FILE);
    let path = Path::new(file);
    if path.is_absolute() {
        return Some(path.to_path_buf());
    }
    config_dir().map(|d| d.join(path))
}
