//! TOML-based service configuration.

use std::fs;
use std::net::{IpAddr, SocketAddr};
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::dispatch::DispatchSettings;

/// Top-level service configuration parsed from TOML.
///
/// Every section is optional and falls back to its defaults. Load from TOML
/// with [`ServiceConfig::from_toml_file`] or use [`ServiceConfig::default`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceConfig {
    /// HTTP listener settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Dispatch algorithm tunables.
    #[serde(default)]
    pub dispatch: DispatchConfig,
    /// Log filtering.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP listener settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    /// Interface to bind.
    pub host: IpAddr,
    /// TCP port (must be > 0).
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::from([0, 0, 0, 0]),
            port: 8888,
        }
    }
}

impl ServerConfig {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Dispatch algorithm tunables.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DispatchConfig {
    /// Base CO2 emission factor of gas-fired plants (ton/MWh, >= 0).
    pub co2_emission_factor: f64,
    /// Unmet load accepted as covered (MW, > 0).
    pub tolerance_mw: f64,
    /// Cap wind at its available output during redistribution.
    pub cap_wind_at_availability: bool,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        let settings = DispatchSettings::default();
        Self {
            co2_emission_factor: settings.co2_emission_factor,
            tolerance_mw: settings.tolerance_mw,
            cap_wind_at_availability: settings.cap_wind_at_availability,
        }
    }
}

impl From<&DispatchConfig> for DispatchSettings {
    fn from(c: &DispatchConfig) -> Self {
        Self {
            co2_emission_factor: c.co2_emission_factor,
            tolerance_mw: c.tolerance_mw,
            cap_wind_at_availability: c.cap_wind_at_availability,
        }
    }
}

/// Log filtering.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive used when `RUST_LOG` is unset.
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "powerplant_dispatch=info".to_string(),
        }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug, Error)]
#[error("config error: {field}: {message}")]
pub struct ConfigError {
    /// Dotted field path (e.g., `"server.port"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl ServiceConfig {
    /// Parses a configuration file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError {
            field: "config".to_string(),
            message: format!("cannot read \"{}\": {e}", path.display()),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError {
            field: "toml".to_string(),
            message: e.to_string(),
        })
    }

    /// Dispatcher settings described by the `[dispatch]` section.
    pub fn dispatch_settings(&self) -> DispatchSettings {
        DispatchSettings::from(&self.dispatch)
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if self.server.port == 0 {
            errors.push(ConfigError {
                field: "server.port".into(),
                message: "must be > 0".into(),
            });
        }

        let d = &self.dispatch;
        if !d.co2_emission_factor.is_finite() || d.co2_emission_factor < 0.0 {
            errors.push(ConfigError {
                field: "dispatch.co2_emission_factor".into(),
                message: "must be >= 0".into(),
            });
        }
        if !d.tolerance_mw.is_finite() || d.tolerance_mw <= 0.0 {
            errors.push(ConfigError {
                field: "dispatch.tolerance_mw".into(),
                message: "must be > 0".into(),
            });
        }

        if self.logging.filter.trim().is_empty() {
            errors.push(ConfigError {
                field: "logging.filter".into(),
                message: "must not be empty".into(),
            });
        }

        errors
    }
}
