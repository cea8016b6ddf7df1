//! # TuneWeb Configuration Module
//!
//! This module provides configuration management for TuneWeb, including:
//! - Loading configuration from YAML files
//! - Merging with embedded default configuration
//! - Environment variable overrides
//! - Type-safe getters and setters for configuration values
//! - Thread-safe singleton access pattern
//!
//! ## Usage
//!
//! ```no_run
//! use twconfig::get_config;
//!
//! // Get the global configuration
//! let config = get_config();
//!
//! // Access configuration values
//! let market = config.get_spotify_market();
//!
//! // Update configuration values
//! config.set_spotify_market("FR")?;
//! # Ok::<(), anyhow::Error>(())
//! ```

use anyhow::{anyhow, Result};
use dirs::home_dir;
use lazy_static::lazy_static;
use serde_yaml::{Mapping, Value};
use std::{
    env, fs,
    path::PathBuf,
    sync::{Arc, Mutex},
};
use tracing::info;

// Configuration par défaut intégrée
const DEFAULT_CONFIG: &str = include_str!("tuneweb.yaml");

lazy_static! {
    static ref CONFIG: Arc<Config> =
        Arc::new(Config::load_config("").expect("Failed to load TuneWeb configuration"));
}

const ENV_CONFIG_DIR: &str = "TUNEWEB_CONFIG";
const ENV_PREFIX: &str = "TUNEWEB_CONFIG__";

// Default values for configuration
const DEFAULT_SPOTIFY_MARKET: &str = "ES";
const DEFAULT_SPOTIFY_API_BASE: &str = "https://api.spotify.com/v1";
const DEFAULT_SPOTIFY_TIMEOUT_SECS: u64 = 30;

/// Configuration manager for TuneWeb
///
/// This structure manages the application configuration, including:
/// - Loading configuration from YAML files
/// - Merging with default configuration
/// - Handling environment variable overrides
/// - Providing typed getters/setters for configuration values
///
/// # Examples
///
/// ```no_run
/// use twconfig::get_config;
///
/// let config = get_config();
/// let market = config.get_spotify_market();
/// println!("Spotify market: {}", market);
/// ```
#[derive(Debug)]
pub struct Config {
    values: Mutex<Value>,
    config_file: PathBuf,
}

impl Config {
    /// Loads the configuration from disk, merging over the embedded defaults.
    ///
    /// The configuration directory is resolved in order from: the `dir`
    /// argument (when non-empty), the `TUNEWEB_CONFIG` environment variable,
    /// then `~/.tuneweb`. A missing `config.yaml` is not an error; defaults
    /// apply. Environment variables prefixed with `TUNEWEB_CONFIG__` override
    /// individual keys (`TUNEWEB_CONFIG__SPOTIFY__MARKET=FR`).
    pub fn load_config(dir: &str) -> Result<Self> {
        let config_dir = if !dir.is_empty() {
            PathBuf::from(dir)
        } else if let Ok(from_env) = env::var(ENV_CONFIG_DIR) {
            PathBuf::from(from_env)
        } else {
            home_dir()
                .map(|home| home.join(".tuneweb"))
                .ok_or_else(|| anyhow!("Cannot determine home directory"))?
        };
        let config_file = config_dir.join("config.yaml");

        let mut values: Value = serde_yaml::from_str(DEFAULT_CONFIG)?;

        if config_file.exists() {
            let text = fs::read_to_string(&config_file)?;
            let user: Value = serde_yaml::from_str(&text)?;
            merge_values(&mut values, &user);
            info!("Loaded configuration from {:?}", config_file);
        }

        apply_env_overrides(&mut values);

        Ok(Self {
            values: Mutex::new(values),
            config_file,
        })
    }

    /// Returns the value at the given key path.
    ///
    /// Returns an error when the path is not present in the configuration
    /// tree; typed getters translate that into their default value.
    pub fn get_value(&self, path: &[&str]) -> Result<Value> {
        let values = self.values.lock().unwrap();
        let mut node = &*values;
        for key in path {
            node = node
                .get(*key)
                .ok_or_else(|| anyhow!("Configuration key not found: {}", path.join(".")))?;
        }
        Ok(node.clone())
    }

    /// Sets the value at the given key path and persists the file.
    ///
    /// Intermediate mappings are created as needed.
    pub fn set_value(&self, path: &[&str], value: Value) -> Result<()> {
        let (last, parents) = path
            .split_last()
            .ok_or_else(|| anyhow!("Empty configuration path"))?;

        {
            let mut values = self.values.lock().unwrap();
            let mut node = &mut *values;
            for key in parents {
                if node.get(*key).is_none() {
                    match node {
                        Value::Mapping(map) => {
                            map.insert(
                                Value::String((*key).to_string()),
                                Value::Mapping(Mapping::new()),
                            );
                        }
                        _ => return Err(anyhow!("Configuration node '{}' is not a mapping", key)),
                    }
                }
                node = node
                    .get_mut(*key)
                    .ok_or_else(|| anyhow!("Configuration key not found: {}", key))?;
            }
            match node {
                Value::Mapping(map) => {
                    map.insert(Value::String((*last).to_string()), value);
                }
                _ => return Err(anyhow!("Configuration node '{}' is not a mapping", last)),
            }
        }

        self.save()
    }

    /// Writes the current configuration tree to the user file.
    fn save(&self) -> Result<()> {
        let values = self.values.lock().unwrap();
        if let Some(parent) = self.config_file.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.config_file, serde_yaml::to_string(&*values)?)?;
        Ok(())
    }

    /// Path of the user configuration file backing this instance.
    pub fn config_file(&self) -> &PathBuf {
        &self.config_file
    }

    // ============ Spotify ============

    /// Market (ISO 3166-1 country code) used for catalog searches.
    pub fn get_spotify_market(&self) -> String {
        match self.get_value(&["spotify", "market"]) {
            Ok(Value::String(s)) if !s.is_empty() => s,
            _ => DEFAULT_SPOTIFY_MARKET.to_string(),
        }
    }

    pub fn set_spotify_market(&self, market: &str) -> Result<()> {
        self.set_value(&["spotify", "market"], Value::String(market.to_string()))
    }

    /// Base URL of the Spotify Web API (override for testing/proxying).
    pub fn get_spotify_api_base(&self) -> String {
        match self.get_value(&["spotify", "api_base"]) {
            Ok(Value::String(s)) if !s.is_empty() => s,
            _ => DEFAULT_SPOTIFY_API_BASE.to_string(),
        }
    }

    pub fn set_spotify_api_base(&self, api_base: &str) -> Result<()> {
        self.set_value(&["spotify", "api_base"], Value::String(api_base.to_string()))
    }

    /// HTTP request timeout, in seconds.
    pub fn get_spotify_timeout_secs(&self) -> u64 {
        match self.get_value(&["spotify", "timeout_secs"]) {
            Ok(Value::Number(n)) => n.as_u64().unwrap_or(DEFAULT_SPOTIFY_TIMEOUT_SECS),
            _ => DEFAULT_SPOTIFY_TIMEOUT_SECS,
        }
    }
}

/// Recursively merges `overlay` over `base` (mappings merge, scalars replace).
fn merge_values(base: &mut Value, overlay: &Value) {
    match (base, overlay) {
        (Value::Mapping(base_map), Value::Mapping(overlay_map)) => {
            for (key, value) in overlay_map {
                match base_map.get_mut(key) {
                    Some(existing) => merge_values(existing, value),
                    None => {
                        base_map.insert(key.clone(), value.clone());
                    }
                }
            }
        }
        (base, overlay) => *base = overlay.clone(),
    }
}

/// Applies `TUNEWEB_CONFIG__SECTION__KEY` environment overrides.
fn apply_env_overrides(values: &mut Value) {
    for (key, raw) in env::vars() {
        let Some(suffix) = key.strip_prefix(ENV_PREFIX) else {
            continue;
        };
        let path: Vec<String> = suffix.split("__").map(|s| s.to_lowercase()).collect();
        if path.iter().any(|segment| segment.is_empty()) {
            continue;
        }

        // Les valeurs sont parsées comme scalaires YAML (nombres, booléens),
        // sinon conservées telles quelles en chaîne
        let parsed: Value =
            serde_yaml::from_str(&raw).unwrap_or_else(|_| Value::String(raw.clone()));
        set_in_tree(values, &path, parsed);
        info!("Configuration override from environment: {}", key);
    }
}

fn set_in_tree(values: &mut Value, path: &[String], value: Value) {
    let Some((last, parents)) = path.split_last() else {
        return;
    };

    let mut node = values;
    for key in parents {
        if node.get(key.as_str()).is_none() {
            if let Value::Mapping(map) = node {
                map.insert(Value::String(key.clone()), Value::Mapping(Mapping::new()));
            } else {
                return;
            }
        }
        match node.get_mut(key.as_str()) {
            Some(next) => node = next,
            None => return,
        }
    }

    if let Value::Mapping(map) = node {
        map.insert(Value::String(last.clone()), value);
    }
}

/// Returns the global configuration singleton.
pub fn get_config() -> Arc<Config> {
    CONFIG.clone()
}
