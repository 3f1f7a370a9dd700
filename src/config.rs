//! Configuration — optional TOML file with a default for every key.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::launch::{DEFAULT_WRAPPER, LaunchResolver};
use crate::session::RestoreOptions;

/// Longest accepted settle delay.
pub const MAX_SETTLE_DELAY_MS: u64 = 120_000;

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Settings from `config.toml`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Wait after relaunching before windows are paired.
    pub settle_delay_ms: u64,
    pub session_file: PathBuf,
    pub rules_file: PathBuf,
    pub hyprland_config: PathBuf,
    /// Compositor control binary.
    pub hyprctl: String,
    /// Launch windows without a recovered command line from their class.
    pub resolve_missing_cmdline: bool,
    pub launch_wrapper: String,
    /// Extra class → executable entries for the launch resolver.
    pub overrides: HashMap<String, String>,
}

fn config_home() -> PathBuf {
    dirs::config_dir().unwrap_or_else(|| PathBuf::from(".config"))
}

fn data_home() -> PathBuf {
    dirs::data_dir().unwrap_or_else(|| PathBuf::from(".local/share"))
}

impl Default for Config {
    fn default() -> Self {
        Self {
            settle_delay_ms: 3000,
            session_file: data_home().join("hyprsession").join("session.json"),
            rules_file: config_home().join("hypr").join("hyprsession-rules.conf"),
            hyprland_config: config_home().join("hypr").join("hyprland.conf"),
            hyprctl: "hyprctl".into(),
            resolve_missing_cmdline: false,
            launch_wrapper: DEFAULT_WRAPPER.into(),
            overrides: HashMap::new(),
        }
    }
}

impl Config {
    /// Default location: `$XDG_CONFIG_HOME/hyprsession/config.toml`.
    pub fn default_path() -> PathBuf {
        config_home().join("hyprsession").join("config.toml")
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Load `explicit` (which must exist) or the default path (which may
    /// not).
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let (path, required) = match explicit {
            Some(path) => (path.to_path_buf(), true),
            None => (Self::default_path(), false),
        };
        match std::fs::read_to_string(&path) {
            Ok(raw) => {
                tracing::debug!(path = %path.display(), "config loaded");
                Self::from_toml_str(&raw)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && !required => Ok(Self::default()),
            Err(source) => Err(ConfigError::Read { path, source }),
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.settle_delay_ms > MAX_SETTLE_DELAY_MS {
            return Err(ConfigError::Invalid(format!(
                "settle_delay_ms must be at most {MAX_SETTLE_DELAY_MS}, got {}",
                self.settle_delay_ms
            )));
        }
        if self.hyprctl.trim().is_empty() {
            return Err(ConfigError::Invalid("hyprctl must not be empty".into()));
        }
        if self.launch_wrapper.trim().is_empty() {
            return Err(ConfigError::Invalid("launch_wrapper must not be empty".into()));
        }
        Ok(())
    }

    /// Apply a command-line settle delay override.
    pub fn with_settle_delay_ms(mut self, settle_delay_ms: Option<u64>) -> Result<Self, ConfigError> {
        if let Some(ms) = settle_delay_ms {
            self.settle_delay_ms = ms;
            self.validate()?;
        }
        Ok(self)
    }

    pub fn launch_resolver(&self) -> LaunchResolver {
        LaunchResolver::new(self.launch_wrapper.clone()).with_overrides(self.overrides.clone())
    }

    pub fn restore_options(&self) -> RestoreOptions {
        RestoreOptions {
            settle_delay: Duration::from_millis(self.settle_delay_ms),
            fallback: self.resolve_missing_cmdline.then(|| self.launch_resolver()),
        }
    }
}
