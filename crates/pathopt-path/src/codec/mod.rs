//! Path data text format: command model, scanner and writer.

pub mod command;
pub mod parser;
pub mod serializer;

pub use command::{round_args, Args, Axis, Command, Opcode, PathProgram};
pub use parser::{parse_path, parse_path_with_diagnostics};
pub use serializer::serialize;
