//! Configuration loading and path resolution
//!
//! Every path follows the same priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. OS-dependent default (fallback)

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::diagnostics::ToleranceTable;
use crate::{Error, Result};

/// Environment variable naming the config file
pub const CONFIG_ENV: &str = "FPC_CONFIG";
/// Environment variable naming the reading-log database
pub const DATABASE_ENV: &str = "FPC_DATABASE";

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5780;

/// Contents of `config.toml`; every key is optional
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub database_path: Option<PathBuf>,
    pub bind_addr: String,
    pub port: u16,
    /// `EnvFilter` directive used when `RUST_LOG` is unset
    pub log_level: Option<String>,
    /// Overrides for individual tolerance bands
    pub tolerances: ToleranceTable,
}

impl Default for TomlConfig {
    fn default() -> Self {
        Self {
            database_path: None,
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            port: DEFAULT_PORT,
            log_level: None,
            tolerances: ToleranceTable::default(),
        }
    }
}

/// Parse and validate config file contents
pub fn parse_config(content: &str) -> Result<TomlConfig> {
    let config: TomlConfig =
        toml::from_str(content).map_err(|e| Error::Config(format!("Invalid config file: {}", e)))?;
    config
        .tolerances
        .validate()
        .map_err(|e| Error::Config(format!("Invalid tolerances: {}", e)))?;
    Ok(config)
}

/// Load the config file.
///
/// A path given on the command line or in `FPC_CONFIG` must exist and parse.
/// Otherwise the platform default location is tried, and a missing file
/// falls back to built-in defaults.
pub fn load_config(cli_arg: Option<&Path>) -> Result<TomlConfig> {
    let explicit = cli_arg
        .map(Path::to_path_buf)
        .or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from));

    if let Some(path) = explicit {
        return read_config(&path);
    }

    match default_config_file() {
        Some(path) => read_config(&path),
        None => {
            warn!("No config file found, using built-in defaults");
            Ok(TomlConfig::default())
        }
    }
}

fn read_config(path: &Path) -> Result<TomlConfig> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Cannot read config file {}: {}", path.display(), e)))?;
    let config = parse_config(&content)?;
    info!("Loaded configuration from {}", path.display());
    Ok(config)
}

/// First existing config file in the platform search path
fn default_config_file() -> Option<PathBuf> {
    let user_config = dirs::config_dir().map(|d| d.join("fpc").join("config.toml"));
    let system_config = cfg!(target_os = "linux").then(|| PathBuf::from("/etc/fpc/config.toml"));

    user_config
        .into_iter()
        .chain(system_config)
        .find(|path| path.exists())
}

/// Reading-log database location
pub fn resolve_database_path(cli_arg: Option<&Path>, config: &TomlConfig) -> PathBuf {
    if let Some(path) = cli_arg {
        return path.to_path_buf();
    }

    if let Some(path) = std::env::var_os(DATABASE_ENV) {
        return PathBuf::from(path);
    }

    if let Some(path) = &config.database_path {
        return path.clone();
    }

    default_database_path()
}

/// Get OS-dependent default database path
fn default_database_path() -> PathBuf {
    // ~/.local/share/fpc, ~/Library/Application Support/fpc, %LOCALAPPDATA%\fpc
    dirs::data_local_dir()
        .map(|d| d.join("fpc").join("fpc.db"))
        .unwrap_or_else(|| PathBuf::from("./fpc_data/fpc.db"))
}
