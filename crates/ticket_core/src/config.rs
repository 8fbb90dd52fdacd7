//! Application configuration loaded from `app.properties`.
//!
//! # Responsibility
//! - Read data-file location, single-instance port and logging settings.
//! - Fall back to defaults when no configuration file exists.
//!
//! # Invariants
//! - A present but malformed setting is an error, never silently defaulted.
//! - Relative paths are anchored to the configuration file's directory.

use crate::logging::{default_log_level, normalize_level};
use crate::properties::{Properties, PropertiesError};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "app.properties";
pub const DEFAULT_DATA_FILE: &str = "ticket.properties";
pub const DEFAULT_LOCK_PORT: u16 = 54321;
pub const DEFAULT_LOG_DIR: &str = "logs";

const KEY_DATA_FILE: &str = "data_file";
const KEY_LOCK_PORT: &str = "lock_port";
const KEY_LOG_LEVEL: &str = "log_level";
const KEY_LOG_DIR: &str = "log_dir";

const LEGACY_KEY_DATA_FILE: &str = "fichero_datos";
const LEGACY_KEY_LOCK_PORT: &str = "puerto_bloqueo";
// Look-and-feel and window icon of the old form UI.
const IGNORED_KEYS: &[&str] = &["lnf", "ruta_favicon"];

#[derive(Debug)]
pub enum ConfigError {
    Read(PropertiesError),
    InvalidValue { key: &'static str, value: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Read(err) => write!(f, "failed to read configuration: {err}"),
            Self::InvalidValue { key, value } => {
                write!(f, "invalid configuration value for `{key}`: `{value}`")
            }
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Read(err) => Some(err),
            Self::InvalidValue { .. } => None,
        }
    }
}

/// Resolved application settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub data_file: PathBuf,
    pub lock_port: u16,
    pub log_level: String,
    pub log_dir: PathBuf,
    /// Keys present in the file that no setting reads, in file order.
    pub unknown_keys: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            lock_port: DEFAULT_LOCK_PORT,
            log_level: default_log_level().to_string(),
            log_dir: PathBuf::from(DEFAULT_LOG_DIR),
            unknown_keys: Vec::new(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from `path`.
    ///
    /// A missing file yields `AppConfig::default()` anchored to the file's
    /// directory.
    ///
    /// # Errors
    /// - `Read` when the file exists but cannot be read or parsed.
    /// - `InvalidValue` when the port or log level is not recognised.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let props = match Properties::load(path) {
            Ok(props) => props,
            Err(PropertiesError::Io(err)) if err.kind() == io::ErrorKind::NotFound => {
                info!(
                    "event=config_load module=config status=default path={}",
                    path.display()
                );
                Properties::new()
            }
            Err(err) => return Err(ConfigError::Read(err)),
        };

        let config = Self::from_properties(&props)?;
        let base = path.parent().unwrap_or_else(|| Path::new(""));
        Ok(config.resolve_paths(base))
    }

    /// Builds settings from already-parsed entries.
    ///
    /// Legacy `fichero_datos` / `puerto_bloqueo` keys are read when the
    /// current key is absent. Unknown keys are collected in `unknown_keys`.
    pub fn from_properties(props: &Properties) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(value) = setting(props, KEY_DATA_FILE, LEGACY_KEY_DATA_FILE) {
            config.data_file = PathBuf::from(value);
        }
        if let Some(value) = setting(props, KEY_LOCK_PORT, LEGACY_KEY_LOCK_PORT) {
            config.lock_port = value.parse().map_err(|_| ConfigError::InvalidValue {
                key: KEY_LOCK_PORT,
                value: value.to_string(),
            })?;
        }
        if let Some(value) = non_empty(props, KEY_LOG_LEVEL) {
            let level = normalize_level(value).map_err(|_| ConfigError::InvalidValue {
                key: KEY_LOG_LEVEL,
                value: value.to_string(),
            })?;
            config.log_level = level.to_string();
        }
        if let Some(value) = non_empty(props, KEY_LOG_DIR) {
            config.log_dir = PathBuf::from(value);
        }

        config.unknown_keys = props
            .iter()
            .map(|(key, _)| key)
            .filter(|key| !is_known_key(key))
            .map(str::to_string)
            .collect();

        Ok(config)
    }

    /// Anchors relative `data_file` and `log_dir` under `base`.
    pub fn resolve_paths(mut self, base: &Path) -> Self {
        if self.data_file.is_relative() {
            self.data_file = base.join(&self.data_file);
        }
        if self.log_dir.is_relative() {
            self.log_dir = base.join(&self.log_dir);
        }
        self
    }
}

fn setting<'a>(props: &'a Properties, key: &str, legacy_key: &str) -> Option<&'a str> {
    non_empty(props, key).or_else(|| non_empty(props, legacy_key))
}

fn is_known_key(key: &str) -> bool {
    [
        KEY_DATA_FILE,
        KEY_LOCK_PORT,
        KEY_LOG_LEVEL,
        KEY_LOG_DIR,
        LEGACY_KEY_DATA_FILE,
        LEGACY_KEY_LOCK_PORT,
    ]
    .contains(&key)
        || IGNORED_KEYS.contains(&key)
}

fn non_empty<'a>(props: &'a Properties, key: &str) -> Option<&'a str> {
    props
        .get(key)
        .map(str::trim)
        .filter(|value| !value.is_empty())
}
