//! Error handling for pathopt
//!
//! Provides error types for the layers of the optimizer:
//! - Parse errors (path data and transform list text)
//! - Geometry errors (degenerate shapes and matrices)
//!
//! None of these abort an optimization pass. Parsers return the data read
//! before the error alongside it, and geometry routines fall back to leaving
//! the input untouched. All error types use `thiserror`.

use thiserror::Error;

/// Parse error type
///
/// Describes where and why a scanner stopped reading path data or a
/// transform list. The offset is a byte index into the input text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Path data does not start with a move command
    #[error("Path data must start with a move command, found '{found}' at offset {offset}")]
    MissingMoveTo {
        /// Byte offset of the offending character.
        offset: usize,
        /// The character found instead of `M`/`m`.
        found: char,
    },

    /// A character that is neither a command, a number nor a separator
    #[error("Unexpected character '{found}' at offset {offset}")]
    UnexpectedCharacter {
        /// Byte offset of the offending character.
        offset: usize,
        /// The unexpected character.
        found: char,
    },

    /// A comma where no argument separator is allowed
    #[error("Unexpected comma at offset {offset}")]
    UnexpectedComma {
        /// Byte offset of the comma.
        offset: usize,
    },

    /// A command letter arrived before the previous command had all its arguments
    #[error("Command '{command}' at offset {offset} is missing {missing} argument(s)")]
    IncompleteCommand {
        /// Byte offset where the truncated command ended.
        offset: usize,
        /// The command letter that was left incomplete.
        command: char,
        /// How many arguments were still expected.
        missing: usize,
    },

    /// A number that does not follow the number grammar
    #[error("Invalid number at offset {offset}")]
    InvalidNumber {
        /// Byte offset where the number was expected.
        offset: usize,
    },

    /// An arc flag that is not a single `0` or `1`
    #[error("Invalid arc flag '{found}' at offset {offset}")]
    InvalidFlag {
        /// Byte offset of the flag.
        offset: usize,
        /// The character found instead of a flag.
        found: char,
    },

    /// A number following a command that takes no arguments
    #[error("Command '{command}' takes no arguments (offset {offset})")]
    UnexpectedArgument {
        /// Byte offset of the number.
        offset: usize,
        /// The argument-less command letter.
        command: char,
    },

    /// Unknown transform function name
    #[error("Unknown transform '{name}' at offset {offset}")]
    UnknownTransform {
        /// Byte offset of the name.
        offset: usize,
        /// The unrecognized function name.
        name: String,
    },

    /// A transform function called with an unsupported argument count
    #[error("Transform '{name}' does not accept {found} argument(s) (offset {offset})")]
    ArgumentCount {
        /// Byte offset of the function name.
        offset: usize,
        /// The function name.
        name: String,
        /// Number of arguments supplied.
        found: usize,
    },

    /// A transform function whose argument list is not closed
    #[error("Unterminated transform '{name}' at offset {offset}")]
    Unterminated {
        /// Byte offset of the function name.
        offset: usize,
        /// The function name.
        name: String,
    },
}

impl ParseError {
    /// Byte offset at which the scanner stopped
    pub fn offset(&self) -> usize {
        match self {
            Self::MissingMoveTo { offset, .. }
            | Self::UnexpectedCharacter { offset, .. }
            | Self::UnexpectedComma { offset }
            | Self::IncompleteCommand { offset, .. }
            | Self::InvalidNumber { offset }
            | Self::InvalidFlag { offset, .. }
            | Self::UnexpectedArgument { offset, .. }
            | Self::UnknownTransform { offset, .. }
            | Self::ArgumentCount { offset, .. }
            | Self::Unterminated { offset, .. } => *offset,
        }
    }
}

/// Geometry error type
///
/// Degenerate inputs that make a geometric rewrite impossible.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// Matrix has a zero determinant and cannot be inverted or decomposed
    #[error("Singular matrix (determinant {determinant})")]
    SingularMatrix {
        /// The determinant that was found.
        determinant: f64,
    },

    /// Arc with a zero radius
    #[error("Arc has a zero radius")]
    ZeroRadius,

    /// Too few distinct points to form a convex polygon
    #[error("Degenerate hull with {points} point(s)")]
    DegenerateHull {
        /// Number of hull points.
        points: usize,
    },

    /// A computation produced NaN or infinity
    #[error("Non-finite value in {context}")]
    NonFinite {
        /// Where the value appeared.
        context: String,
    },
}

/// Main error type for pathopt
///
/// A unified error type that can represent any error from the core layers.
#[derive(Error, Debug)]
pub enum Error {
    /// Parse error
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Geometry error
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a parse error
    pub fn is_parse_error(&self) -> bool {
        matches!(self, Error::Parse(_))
    }

    /// Check if this is a geometry error
    pub fn is_geometry_error(&self) -> bool {
        matches!(self, Error::Geometry(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
