use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

/// Default location of the configuration file, relative to the working directory
pub const DEFAULT_CONFIG_FILE: &str = "config.yaml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error(
        "Config file {0} does not exist! Please create a config file and either name it 'config.yaml' and put it in the working directory or specify it with --config"
    )]
    NotFound(PathBuf),

    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_yml::Error,
    },

    #[error("No config file location was set")]
    NotConfigured,

    #[error("Missing setting '{0}' in config file")]
    Missing(&'static str),
}

/// Parsed contents of the configuration file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    pub keycloak_url: Option<String>,
    pub pnc: PncConfig,
    #[allow(dead_code)]
    pub da: DaConfig,
    #[allow(dead_code)]
    pub indy: IndyConfig,
    pub keycloak: KeycloakConfig,
    #[allow(dead_code)]
    pub add_ons: HashMap<String, HashMap<String, serde_yml::Value>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PncConfig {
    pub url: Option<String>,
    #[allow(dead_code)]
    pub bifrost_baseurl: Option<String>,
}

#[allow(dead_code)]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DaConfig {
    pub url: Option<String>,
}

#[allow(dead_code)]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct IndyConfig {
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct KeycloakConfig {
    pub url: Option<String>,
    pub realm: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub client_secret: Option<String>,
    pub client_id: Option<String>,
}

impl Config {
    /// Load the configuration from `path`.
    ///
    /// A missing file is an error, an empty file yields the default configuration.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        if content.trim().is_empty() {
            warn!("Config file: {} has no content", path.display());
            return Ok(Self::default());
        }

        serde_yml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// The PNC base URL, required by every remote command
    pub fn pnc_url(&self) -> Result<&str, ConfigError> {
        self.pnc.url.as_deref().ok_or(ConfigError::Missing("pnc.url"))
    }

    /// The keycloak server URL, preferring the `keycloak` block over the top-level key
    pub fn effective_keycloak_url(&self) -> Option<&str> {
        self.keycloak
            .url
            .as_deref()
            .or(self.keycloak_url.as_deref())
    }
}

/// Holds the configuration location and the configuration, loaded at most once.
///
/// The store is created during startup and borrowed by everything that needs
/// the configuration. After the first successful [`ConfigStore::instance`] call
/// the configuration is fixed for the lifetime of the store.
#[derive(Debug, Default)]
pub struct ConfigStore {
    location: Option<PathBuf>,
    instance: OnceLock<Config>,
}

impl ConfigStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the file to load the configuration from.
    ///
    /// Has no effect once the configuration has been loaded.
    pub fn configure(&mut self, location: impl Into<PathBuf>) {
        let location = location.into();
        if self.instance.get().is_some() {
            warn!(
                "Ignoring config location {}: configuration is already loaded",
                location.display()
            );
            return;
        }
        debug!("Using config file {}", location.display());
        self.location = Some(location);
    }

    pub fn location(&self) -> Option<&Path> {
        self.location.as_deref()
    }

    /// Return the configuration, loading it on first access
    pub fn instance(&self) -> Result<&Config, ConfigError> {
        if let Some(config) = self.instance.get() {
            return Ok(config);
        }
        let location = self.location.as_deref().ok_or(ConfigError::NotConfigured)?;
        let config = Config::load(location)?;
        Ok(self.instance.get_or_init(|| config))
    }
}
