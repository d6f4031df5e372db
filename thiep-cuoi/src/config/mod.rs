//! Configuration management for thiep-cuoi
//!
//! Configuration is loaded from multiple sources with clear precedence:
//!
//! 1. Environment variables (highest priority, `THIEP_CUOI_` prefix, `__` for nesting)
//! 2. `./config.toml` (development)
//! 3. `~/.config/thiep-cuoi/{service}/config.toml` (user config, XDG)
//! 4. `/etc/thiep-cuoi/{service}/config.toml` (system config)
//! 5. Hardcoded defaults (fallback)
//!
//! Environment variable format: `THIEP_CUOI_SECTION__FIELD_NAME`, for example
//! `THIEP_CUOI_LOGGING__FORMAT=json`.
//!
//! # Example Configuration
//!
//! ```toml
//! # config.toml
//! [service]
//! name = "thiep-cuoi"
//!
//! [logging]
//! format = "json"
//! filter = "info,thiep_cuoi=debug"
//!
//! [cards]
//! extra_mandatory_fields = ["wedding_venue"]
//! ```

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Result, ThiepCuoiError};

const ENV_PREFIX: &str = "THIEP_CUOI_";

/// Service identity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceSettings {
    /// Service name, used in log output
    pub name: String,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            name: "thiep-cuoi".to_string(),
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Multi-line human readable output
    Pretty,
    /// One JSON object per event
    Json,
    /// Single-line human readable output
    Compact,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Output format
    pub format: LogFormat,

    /// `EnvFilter` directives used when `RUST_LOG` is unset
    pub filter: Option<String>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            format: if cfg!(debug_assertions) {
                LogFormat::Pretty
            } else {
                LogFormat::Json
            },
            filter: None,
        }
    }
}

/// Card customization settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CardSettings {
    /// Field names that must be non-blank in addition to the built-in
    /// `groom_name`, `bride_name` and `wedding_date`
    pub extra_mandatory_fields: Vec<String>,
}

/// Complete thiep-cuoi configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ThiepCuoiConfig {
    /// Service settings
    #[serde(default)]
    pub service: ServiceSettings,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingSettings,

    /// Card customization settings
    #[serde(default)]
    pub cards: CardSettings,
}

impl ThiepCuoiConfig {
    /// Load configuration for a specific service
    ///
    /// Searches for configuration in XDG-compliant locations with precedence:
    /// 1. Environment variables (`THIEP_CUOI_*`, use `__` for nesting)
    /// 2. `./config.toml`
    /// 3. `~/.config/thiep-cuoi/{service_name}/config.toml`
    /// 4. `/etc/thiep-cuoi/{service_name}/config.toml`
    /// 5. Defaults
    ///
    /// # Errors
    ///
    /// Returns [`ThiepCuoiError::Config`] if a configuration file cannot be
    /// parsed or a value has the wrong type.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use thiep_cuoi::config::ThiepCuoiConfig;
    ///
    /// # fn example() -> thiep_cuoi::Result<()> {
    /// let config = ThiepCuoiConfig::load_for_service("thiep-cuoi")?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn load_for_service(service_name: &str) -> Result<Self> {
        let mut figment = Self::defaults()?;

        let system_config = PathBuf::from("/etc/thiep-cuoi")
            .join(service_name)
            .join("config.toml");
        if system_config.exists() {
            figment = figment.merge(Toml::file(&system_config));
        }

        let user_config = Self::recommended_path(service_name);
        if user_config.exists() {
            figment = figment.merge(Toml::file(&user_config));
        }

        let local_config = PathBuf::from("./config.toml");
        if local_config.exists() {
            figment = figment.merge(Toml::file(&local_config));
        }

        Self::extract(figment.merge(Self::env()))
    }

    /// Load configuration from a specific file
    ///
    /// A missing file leaves the defaults in place. Environment variables
    /// still override the file.
    ///
    /// # Errors
    ///
    /// Returns [`ThiepCuoiError::Config`] if the file is not valid TOML or a
    /// value has the wrong type.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let figment = Self::defaults()?
            .merge(Toml::file(path.as_ref()))
            .merge(Self::env());
        Self::extract(figment)
    }

    /// Get the recommended XDG config path for a service
    ///
    /// # Example
    ///
    /// ```rust
    /// use thiep_cuoi::config::ThiepCuoiConfig;
    ///
    /// let path = ThiepCuoiConfig::recommended_path("thiep-cuoi");
    /// assert!(path.ends_with("config.toml"));
    /// ```
    #[must_use]
    pub fn recommended_path(service_name: &str) -> PathBuf {
        dirs::config_dir().map_or_else(
            || PathBuf::from("./config.toml"),
            |config_dir| {
                config_dir
                    .join("thiep-cuoi")
                    .join(service_name)
                    .join("config.toml")
            },
        )
    }

    fn defaults() -> Result<Figment> {
        let defaults = toml::to_string(&Self::default())
            .map_err(|e| ThiepCuoiError::Config(e.to_string()))?;
        Ok(Figment::new().merge(Toml::string(&defaults)))
    }

    fn env() -> Env {
        Env::prefixed(ENV_PREFIX).split("__").lowercase(true)
    }

    fn extract(figment: Figment) -> Result<Self> {
        figment
            .extract()
            .map_err(|e| ThiepCuoiError::Config(e.to_string()))
    }
}
