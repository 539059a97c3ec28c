//! Built-in lint rules.

pub mod extract_type;

pub use extract_type::ExtractTypeRule;
