use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Source location
// ---------------------------------------------------------------------------

/// Where a declaration lives. `line == 0` means the front end had no position.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct SourceLocation {
    pub file: String,
    pub line: usize,
    pub col: usize,
}

// ---------------------------------------------------------------------------
// Schema nodes (serialized to JSON with camelCase keys)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldNode {
    /// Name as declared, before normalization.
    pub name: String,
    pub loc: SourceLocation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeNode {
    pub name: String,
    pub source: String,
    pub line: usize,
    pub fields: Vec<FieldNode>,
}

/// One manifest file after loading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedFile {
    pub source: String,
    pub types: Vec<TypeNode>,
}

/// All type definitions collected from a set of manifest files.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaDocument {
    pub sources: Vec<String>,
    pub types: Vec<TypeNode>,
}

impl SchemaDocument {
    pub fn field_count(&self) -> usize {
        self.types.iter().map(|t| t.fields.len()).sum()
    }
}
