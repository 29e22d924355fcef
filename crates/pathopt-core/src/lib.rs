//! # pathopt Core
//!
//! Core types and utilities shared by the pathopt crates: error types,
//! number rounding and rendering, and plane geometry primitives.

pub mod error;
pub mod geometry;
pub mod numeric;

pub use error::{Error, GeometryError, ParseError, Result};
pub use geometry::{BoundingBox, Point};
pub use numeric::{
    cleanup_out_data, format_number, remove_leading_zero, strong_round, to_fixed,
    NumericFormatter, OutputFormat,
};
