//! # pathopt
//!
//! A vector path optimizer for SVG documents:
//! - Path data simplification (shorthands, arcs, relative/absolute choice)
//! - Folding `transform` attributes into path coordinates
//! - Shortening transform lists
//! - Merging sibling paths whose outlines do not overlap
//!
//! ## Architecture
//!
//! pathopt is organized as a workspace with multiple crates:
//!
//! 1. **pathopt-core** - Numeric formatting, geometry primitives, errors
//! 2. **pathopt-settings** - Configuration sections and file I/O
//! 3. **pathopt-path** - Path data codec, transforms, simplification, overlap test
//! 4. **pathopt-optimizer** - Element processors driven by a document walker
//! 5. **pathopt** - This facade

pub use pathopt_core::{
    cleanup_out_data, format_number, strong_round, to_fixed, BoundingBox, Error, GeometryError,
    NumericFormatter, OutputFormat, ParseError, Point, Result,
};

pub use pathopt_settings::{
    ArcSettings, Config, ConfigError, MergeSettings, PathDataSettings, SettingsError,
    TransformSettings,
};

pub use pathopt_path::{
    apply_to_path, compose, decompose, intersects, optimize_transform_list, parse_path,
    parse_path_with_diagnostics, parse_transform_list, serialize, serialize_transform_list,
    simplify_program, to_absolute, to_relative, AffineMatrix, Command, NamedTransform, Opcode,
    PathProgram, SimplifyContext, TransformList,
};

pub use pathopt_optimizer::{
    apply_transforms, process_all, ComputedStyle, ConvertPathData, ConvertTransform, Element,
    ElementOutcome, ElementProcessor, MergePaths, Optimizer, ProcessorHandle, StyleValue,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize logging with the default configuration
///
/// Honors `RUST_LOG`, falling back to `info`, and writes to stderr so
/// that optimized output on stdout stays clean.
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_level(true)
                .with_line_number(true),
        )
        .try_init()?;

    tracing::debug!("pathopt {} logging initialized", VERSION);
    Ok(())
}
