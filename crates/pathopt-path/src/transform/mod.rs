//! Affine transforms: parsing, composition, application to path data and
//! decomposition back into named transforms.

pub mod apply;
pub mod decompose;
pub mod matrix;
pub mod parser;
pub mod shorten;

pub use apply::{apply_to_path, transform_arc, try_apply_to_path};
pub use decompose::decompose;
pub use matrix::{compose, serialize_transform_list, AffineMatrix, NamedTransform, TransformList};
pub use parser::{parse_transform_list, parse_transform_list_with_diagnostics};
pub use shorten::optimize_transform_list;
