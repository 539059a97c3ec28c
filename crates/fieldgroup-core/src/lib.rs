pub mod manifest;
pub mod source;
pub mod types;

pub use manifest::{parse_string, resolve, ManifestError};
pub use source::{normalize_field_name, FieldDescriptor, FieldSource};
pub use types::*;
