//! pathopt Settings Crate
//!
//! Handles optimizer configuration, settings files and validation.

pub mod config;
pub mod error;

pub use config::{
    ArcSettings, Config, MergeSettings, PathDataSettings, TransformSettings, MAX_PRECISION,
};
pub use error::{ConfigError, ConfigResult, SettingsError, SettingsResult};
