//! # Core Engine Module
//!
//! Shared configuration used to construct a [`World`](crate::ecs::World).

pub mod config;

// Re-export foundation modules for convenience
pub use crate::foundation;

pub use config::{DeviceCapabilities, EngineConfig, StageConfig};
pub use crate::config::{Config, ConfigError, ConfigFormat};
