//! Configuration for the path optimizer
//!
//! Provides configuration file handling and validation. Supports JSON and
//! TOML file formats.
//!
//! Configuration is organized into sections, one per optimizer stage:
//! - Path data settings (rounding, shorthand folding, arc fitting)
//! - Transform settings (matrix decomposition and short forms)
//! - Merge settings (joining sibling paths)

use crate::error::{ConfigError, SettingsError, SettingsResult};
use pathopt_core::{NumericFormatter, OutputFormat};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Largest number of decimals any precision setting accepts
pub const MAX_PRECISION: u8 = 20;

/// Arc fitting parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArcSettings {
    /// Multiple of the rounding error a fitted arc may deviate by
    pub threshold: f64,
    /// Percentage of the radius a fitted arc may deviate by
    pub tolerance: f64,
}

impl Default for ArcSettings {
    fn default() -> Self {
        Self {
            threshold: 2.5,
            tolerance: 0.5,
        }
    }
}

/// Path data optimization settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathDataSettings {
    /// Decimal places kept in coordinates; `None` disables rounding
    pub float_precision: Option<u8>,
    /// Decimal places kept in transform matrices before folding
    pub transform_precision: Option<u8>,
    /// Fold the element's `transform` into its path data
    pub apply_transforms: bool,
    /// Fold transforms into stroked paths, scaling the stroke
    pub apply_transforms_stroked: bool,
    /// Replace circular cubic curves with arcs
    pub make_arcs: bool,
    /// Tolerances for arc fitting
    pub arc_fitting: ArcSettings,
    /// Replace curves whose control points lie on the chord with lines
    pub straight_curves: bool,
    /// Use `h`/`v` for axis-aligned lines
    pub line_shorthands: bool,
    /// Use `s`/`t` when a control point mirrors the previous one
    pub curve_smooth_shorthands: bool,
    /// Drop segments that do not move the cursor
    pub remove_useless: bool,
    /// Sum consecutive `m`, `h` and `v` segments
    pub collapse_repeated: bool,
    /// Write a segment in absolute form when that is shorter
    pub utilize_absolute: bool,
    /// Write `.5` instead of `0.5`
    pub leading_zero: bool,
    /// Drop the separator before negative numbers
    pub negative_extra_space: bool,
    /// Drop the separators around arc flags
    pub compact_arc_flags: bool,
    /// Write every segment in absolute form
    pub force_absolute_path: bool,
}

impl Default for PathDataSettings {
    fn default() -> Self {
        Self {
            float_precision: Some(3),
            transform_precision: Some(5),
            apply_transforms: true,
            apply_transforms_stroked: true,
            make_arcs: true,
            arc_fitting: ArcSettings::default(),
            straight_curves: true,
            line_shorthands: true,
            curve_smooth_shorthands: true,
            remove_useless: true,
            collapse_repeated: true,
            utilize_absolute: false,
            leading_zero: true,
            negative_extra_space: true,
            compact_arc_flags: false,
            force_absolute_path: false,
        }
    }
}

impl PathDataSettings {
    /// Separator options for path data output
    pub fn output_format(&self) -> OutputFormat {
        OutputFormat {
            remove_leading_zero: self.leading_zero,
            negative_extra_space: self.negative_extra_space,
            compact_arc_flags: self.compact_arc_flags,
        }
    }

    /// Formatter for path coordinates
    pub fn formatter(&self) -> NumericFormatter {
        NumericFormatter::new(self.float_precision).with_output(self.output_format())
    }
}

/// Transform attribute settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformSettings {
    /// Rewrite transforms into their shortest named form
    pub convert_to_shorts: bool,
    /// Decimal places for angles; `None` follows `float_precision`
    pub deg_precision: Option<u8>,
    /// Decimal places for translations and rotation centers
    pub float_precision: Option<u8>,
    /// Decimal places for scale factors and matrix coefficients
    pub transform_precision: Option<u8>,
    /// Try to decompose matrices into named transforms
    pub matrix_to_transform: bool,
    /// `translate(10 0)` becomes `translate(10)`
    pub short_translate: bool,
    /// `scale(2 2)` becomes `scale(2)`
    pub short_scale: bool,
    /// `translate(cx cy) rotate(a) translate(-cx -cy)` becomes `rotate(a cx cy)`
    pub short_rotate: bool,
    /// Drop identity transforms
    pub remove_useless: bool,
    /// Multiply the list into a single matrix before converting
    pub collapse_into_one: bool,
    /// Write `.5` instead of `0.5`
    pub leading_zero: bool,
    /// Drop the separator before negative numbers
    pub negative_extra_space: bool,
}

impl Default for TransformSettings {
    fn default() -> Self {
        Self {
            convert_to_shorts: true,
            deg_precision: None,
            float_precision: Some(3),
            transform_precision: Some(5),
            matrix_to_transform: true,
            short_translate: true,
            short_scale: true,
            short_rotate: true,
            remove_useless: true,
            collapse_into_one: true,
            leading_zero: true,
            negative_extra_space: true,
        }
    }
}

impl TransformSettings {
    /// Separator options for transform arguments
    pub fn output_format(&self) -> OutputFormat {
        OutputFormat {
            remove_leading_zero: self.leading_zero,
            negative_extra_space: self.negative_extra_space,
            compact_arc_flags: false,
        }
    }

    /// Precision used for angles
    pub fn angle_precision(&self) -> Option<u8> {
        self.deg_precision.or(self.float_precision)
    }
}

/// Path merging settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeSettings {
    /// Merge even when the outlines overlap
    pub force: bool,
    /// Decimal places kept in the merged path data
    pub float_precision: Option<u8>,
    /// Drop the separators around arc flags
    pub compact_arc_flags: bool,
}

impl Default for MergeSettings {
    fn default() -> Self {
        Self {
            force: false,
            float_precision: Some(3),
            compact_arc_flags: false,
        }
    }
}

impl MergeSettings {
    /// Formatter for the merged path data
    pub fn formatter(&self) -> NumericFormatter {
        NumericFormatter::new(self.float_precision).with_output(OutputFormat {
            compact_arc_flags: self.compact_arc_flags,
            ..OutputFormat::default()
        })
    }
}

/// Complete optimizer configuration
///
/// Aggregates all settings sections and provides file I/O operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Path data settings
    pub path_data: PathDataSettings,
    /// Transform attribute settings
    pub transforms: TransformSettings,
    /// Path merging settings
    pub merge: MergeSettings,
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| SettingsError::LoadError(format!("{}: {}", path.display(), e)))?;

        let config: Self = match extension(path) {
            Some("json") => serde_json::from_str(&content)?,
            Some("toml") => toml::from_str(&content)?,
            other => {
                return Err(ConfigError::UnsupportedFormat(other.unwrap_or("").to_string()).into())
            }
        };

        config.validate()?;
        tracing::debug!("Loaded optimizer config from {}", path.display());
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match extension(path) {
            Some("json") => serde_json::to_string_pretty(self)?,
            Some("toml") => toml::to_string_pretty(self)
                .map_err(|e| SettingsError::SaveError(format!("Failed to serialize config: {}", e)))?,
            other => {
                return Err(ConfigError::UnsupportedFormat(other.unwrap_or("").to_string()).into())
            }
        };

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        let precisions = [
            ("path_data.float_precision", self.path_data.float_precision),
            (
                "path_data.transform_precision",
                self.path_data.transform_precision,
            ),
            ("transforms.deg_precision", self.transforms.deg_precision),
            ("transforms.float_precision", self.transforms.float_precision),
            (
                "transforms.transform_precision",
                self.transforms.transform_precision,
            ),
            ("merge.float_precision", self.merge.float_precision),
        ];
        for (key, value) in precisions {
            if let Some(p) = value {
                if p > MAX_PRECISION {
                    return Err(SettingsError::InvalidSetting {
                        key: key.to_string(),
                        reason: format!("must be <= {}", MAX_PRECISION),
                    });
                }
            }
        }

        let arcs = &self.path_data.arc_fitting;
        if !(arcs.threshold.is_finite() && arcs.threshold > 0.0) {
            return Err(ConfigError::ValueOutOfRange {
                key: "path_data.arc_fitting.threshold".to_string(),
                value: arcs.threshold.to_string(),
            }
            .into());
        }
        if !(arcs.tolerance.is_finite() && arcs.tolerance > 0.0) {
            return Err(ConfigError::ValueOutOfRange {
                key: "path_data.arc_fitting.tolerance".to_string(),
                value: arcs.tolerance.to_string(),
            }
            .into());
        }

        Ok(())
    }

    /// Merge another config, taking every section that differs from its default
    pub fn merge(&mut self, other: &Config) {
        if other.path_data != PathDataSettings::default() {
            self.path_data = other.path_data.clone();
        }
        if other.transforms != TransformSettings::default() {
            self.transforms = other.transforms.clone();
        }
        if other.merge != MergeSettings::default() {
            self.merge = other.merge.clone();
        }
    }
}

fn extension(path: &Path) -> Option<&str> {
    path.extension().and_then(|ext| ext.to_str())
}
