//! # Engine Configuration
//!
//! Settings that shape a [`World`](crate::ecs::World): logging, the stage
//! viewport and what the host device can render with.
//!
//! [`DeviceCapabilities`] stands in for the usual "detected device" singleton.
//! It is created by whoever embeds the engine and handed to the world, which
//! consults it before creating a layer for a given backend.

use serde::{Deserialize, Serialize};

use crate::config::{Config, ConfigError};
use crate::ecs::BackendKind;

/// Rendering technologies the host can drive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceCapabilities {
    /// Canvas2D is available
    pub canvas: bool,
    /// DOM/CSS rendering is available
    pub dom: bool,
    /// WebGL is available (experimental)
    pub webgl: bool,
}

impl DeviceCapabilities {
    /// Canvas and DOM only, WebGL gated off
    pub const fn standard() -> Self {
        Self {
            canvas: true,
            dom: true,
            webgl: false,
        }
    }

    /// Every backend enabled
    pub const fn all() -> Self {
        Self {
            canvas: true,
            dom: true,
            webgl: true,
        }
    }

    /// Whether a layer of this backend can be created
    pub const fn supports(&self, backend: BackendKind) -> bool {
        match backend {
            BackendKind::Unassigned => true,
            BackendKind::Canvas => self.canvas,
            BackendKind::Dom => self.dom,
            BackendKind::WebGl => self.webgl,
        }
    }

    /// True when no backend at all is usable
    pub const fn is_headless(&self) -> bool {
        !(self.canvas || self.dom || self.webgl)
    }
}

impl Default for DeviceCapabilities {
    fn default() -> Self {
        Self::standard()
    }
}

/// Stage (viewport) dimensions in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StageConfig {
    /// Stage width
    pub width: f64,
    /// Stage height
    pub height: f64,
}

impl Default for StageConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
        }
    }
}

/// # Engine Configuration
///
/// Core engine behaviour configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Log filter passed to `env_logger` (e.g. `"info"`)
    pub log_level: String,
    /// Whether to enable debug features
    pub debug_mode: bool,
    /// What the host can render with
    pub capabilities: DeviceCapabilities,
    /// Default camera viewport
    pub stage: StageConfig,
}

impl EngineConfig {
    /// Create a new engine configuration
    pub fn new() -> Self {
        Self {
            log_level: "info".to_string(),
            debug_mode: cfg!(debug_assertions),
            capabilities: DeviceCapabilities::default(),
            stage: StageConfig::default(),
        }
    }

    /// Set log level
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Enable debug mode
    pub fn with_debug(mut self, enabled: bool) -> Self {
        self.debug_mode = enabled;
        self
    }

    /// Replace the device capabilities
    pub fn with_capabilities(mut self, capabilities: DeviceCapabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    /// Set the stage size
    pub fn with_stage(mut self, width: f64, height: f64) -> Self {
        self.stage = StageConfig { width, height };
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.stage.width <= 0.0 || self.stage.height <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "stage must have a positive size, got {}x{}",
                self.stage.width, self.stage.height
            )));
        }
        if self.capabilities.is_headless() {
            return Err(ConfigError::Invalid("no rendering backend is available".to_string()));
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl Config for EngineConfig {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigFormat;

    #[test]
    fn test_default_gates_webgl() {
        let config = EngineConfig::default();
        assert!(config.capabilities.supports(BackendKind::Canvas));
        assert!(config.capabilities.supports(BackendKind::Dom));
        assert!(!config.capabilities.supports(BackendKind::WebGl));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_toml_round_trip_keeps_capabilities() {
        let config = EngineConfig::new()
            .with_capabilities(DeviceCapabilities::all())
            .with_stage(320.0, 240.0);
        let text = config.to_string_with_format(ConfigFormat::Toml).unwrap();
        let parsed = EngineConfig::from_str_with_format(&text, ConfigFormat::Toml).unwrap();

        assert!(parsed.capabilities.webgl);
        assert_eq!(parsed.stage.width, 320.0);
    }

    #[test]
    fn test_partial_ron_falls_back_to_defaults() {
        let parsed = EngineConfig::from_str_with_format("(log_level: \"debug\")", ConfigFormat::Ron).unwrap();
        assert_eq!(parsed.log_level, "debug");
        assert_eq!(parsed.stage, StageConfig::default());
    }

    #[test]
    fn test_validate_rejects_headless_and_empty_stage() {
        let headless = EngineConfig::new().with_capabilities(DeviceCapabilities {
            canvas: false,
            dom: false,
            webgl: false,
        });
        assert!(matches!(headless.validate(), Err(ConfigError::Invalid(_))));

        let empty = EngineConfig::new().with_stage(0.0, 100.0);
        assert!(empty.validate().is_err());
    }

    #[test]
    fn test_unknown_extension_is_rejected() {
        let err = EngineConfig::load_from_file("settings.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedFormat(_)));
    }
}
