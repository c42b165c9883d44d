//! Startup settings for the Thrasybulus dashboard.
//!
//! Settings are read from `~/.config/thrasybulus/frontend.json5` when the file
//! exists. Command-line flags override file values. The file is never written
//! back; the dashboard keeps no state across sessions.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thrasybulus_shared::errors::{FrontendError, FrontendResult};
use thrasybulus_shared::{DEFAULT_HOST, DEFAULT_PORT};
use tracing::{debug, error, info, warn};

use crate::api_client::ApiEndpoint;

/// Configuration directory name
const CONFIG_DIR: &str = "thrasybulus";
/// Settings file name
const SETTINGS_FILE: &str = "frontend.json5";
/// Default per-request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Frontend settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FrontendSettings {
    /// Host running the backend service
    #[serde(default = "default_host")]
    pub backend_host: String,

    /// Backend service port
    #[serde(default = "default_port")]
    pub backend_port: u16,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout")]
    pub request_timeout_secs: u64,
}

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for FrontendSettings {
    fn default() -> Self {
        Self {
            backend_host: default_host(),
            backend_port: default_port(),
            request_timeout_secs: default_timeout(),
        }
    }
}

/// Values given on the command line. `None` keeps the settings value.
#[derive(Debug, Clone, Default)]
pub struct SettingsOverrides {
    pub backend_host: Option<String>,
    pub backend_port: Option<u16>,
    pub request_timeout_secs: Option<u64>,
}

impl FrontendSettings {
    /// Gets the path to the settings file.
    ///
    /// Returns `~/.config/thrasybulus/frontend.json5` on Linux.
    pub fn settings_path() -> Option<PathBuf> {
        dirs::config_dir().map(|config| config.join(CONFIG_DIR).join(SETTINGS_FILE))
    }

    /// Loads settings from the configuration file.
    ///
    /// Returns default settings if the file doesn't exist or can't be parsed.
    pub fn load() -> Self {
        let Some(path) = Self::settings_path() else {
            warn!("Could not determine config directory, using defaults");
            return Self::default();
        };

        if !path.exists() {
            debug!("Settings file does not exist, using defaults");
            return Self::default();
        }

        match Self::load_from(&path) {
            Ok(settings) => {
                info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                error!("{}", e);
                Self::default()
            }
        }
    }

    /// Reads and validates settings from `path`.
    pub fn load_from(path: &Path) -> FrontendResult<Self> {
        let content = fs::read_to_string(path).map_err(|source| FrontendError::SettingsRead {
            path: path.display().to_string(),
            source,
        })?;

        let mut settings: FrontendSettings =
            json5::from_str(&content).map_err(|e| FrontendError::SettingsParse {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;
        settings.validate();
        Ok(settings)
    }

    /// Replaces unusable values with defaults.
    fn validate(&mut self) {
        if self.backend_host.trim().is_empty() {
            warn!("Empty backend host, using {}", DEFAULT_HOST);
            self.backend_host = default_host();
        }
        if self.backend_port == 0 {
            warn!("Backend port 0 is invalid, using {}", DEFAULT_PORT);
            self.backend_port = default_port();
        }
        if self.request_timeout_secs == 0 {
            warn!(
                "Request timeout of 0s is invalid, using {}s",
                DEFAULT_TIMEOUT_SECS
            );
            self.request_timeout_secs = default_timeout();
        }
    }

    /// Applies command-line overrides on top of these settings.
    pub fn with_overrides(mut self, overrides: SettingsOverrides) -> Self {
        if let Some(host) = overrides.backend_host {
            self.backend_host = host;
        }
        if let Some(port) = overrides.backend_port {
            self.backend_port = port;
        }
        if let Some(timeout) = overrides.request_timeout_secs {
            self.request_timeout_secs = timeout;
        }
        self
    }

    /// Backend endpoint described by these settings.
    pub fn endpoint(&self) -> FrontendResult<ApiEndpoint> {
        ApiEndpoint::new(self.backend_host.clone(), self.backend_port)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }
}
