//! # pathopt Path
//!
//! Path data for the optimizer: the text codec, cursor normalization,
//! affine transforms, lossless simplification and the outline overlap
//! test used before merging paths.

pub mod codec;
pub mod curves;
pub mod intersect;
pub mod normalize;
pub mod simplify;
pub mod transform;

pub use codec::{parse_path, parse_path_with_diagnostics, serialize, Command, Opcode, PathProgram};
pub use intersect::{intersects, ConvexPolygon, GJK_ITERATION_LIMIT};
pub use normalize::{positioned, to_absolute, to_relative, PositionedCommand};
pub use simplify::{simplify_program, SimplifyContext};
pub use transform::{
    apply_to_path, compose, decompose, optimize_transform_list, parse_transform_list,
    serialize_transform_list, try_apply_to_path, AffineMatrix, NamedTransform, TransformList,
};
