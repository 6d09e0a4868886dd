//! Config file loading.
//!
//! The file is TOML holding the fields of [`GameConfig`]; anything left out
//! keeps its default. Lookup order:
//!
//! 1. an explicit path (the `--config` flag)
//! 2. `$TUI_BLOCKS_CONFIG`
//! 3. `<config_dir>/tui-blocks/config.toml`
//!
//! A missing file at the default location is not an error. A missing file
//! that was asked for explicitly is.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::core::{GameConfig, InvalidConfig};

pub const CONFIG_ENV_VAR: &str = "TUI_BLOCKS_CONFIG";

const APP_DIR: &str = "tui-blocks";
const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid config: {0}")]
    Invalid(#[from] InvalidConfig),
}

/// Where a config file is looked up, and whether it must exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigLocation {
    pub path: PathBuf,
    pub required: bool,
}

/// Resolve the config file location. `None` when no explicit path is given
/// and the platform has no config directory.
pub fn config_location(explicit: Option<&Path>) -> Option<ConfigLocation> {
    if let Some(path) = explicit {
        return Some(ConfigLocation {
            path: path.to_path_buf(),
            required: true,
        });
    }
    if let Some(path) = std::env::var_os(CONFIG_ENV_VAR).filter(|v| !v.is_empty()) {
        return Some(ConfigLocation {
            path: PathBuf::from(path),
            required: true,
        });
    }
    dirs::config_dir().map(|dir| ConfigLocation {
        path: dir.join(APP_DIR).join(CONFIG_FILE),
        required: false,
    })
}

/// Load the game config following the lookup order above.
pub fn load_config(explicit: Option<&Path>) -> Result<GameConfig, ConfigError> {
    let Some(location) = config_location(explicit) else {
        log::debug!("no config directory, using defaults");
        return Ok(GameConfig::default());
    };

    if !location.required && !location.path.exists() {
        log::debug!("{} not found, using defaults", location.path.display());
        return Ok(GameConfig::default());
    }

    let config = load_config_file(&location.path)?;
    log::info!("loaded config from {}", location.path.display());
    Ok(config)
}

/// Read, parse and validate a single config file.
pub fn load_config_file(path: &Path) -> Result<GameConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(&contents).map_err(|err| match err {
        ConfigError::Parse { source, .. } => ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        },
        other => other,
    })
}

/// Parse and validate config text.
pub fn parse_config(contents: &str) -> Result<GameConfig, ConfigError> {
    let config: GameConfig = toml::from_str(contents).map_err(|source| ConfigError::Parse {
        path: PathBuf::new(),
        source,
    })?;
    config.validate()?;
    Ok(config)
}
