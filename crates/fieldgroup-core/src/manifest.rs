//! Field-manifest front end.
//!
//! A manifest lists type definitions and their fields in declaration order,
//! either as YAML or (for `.json` files) as JSON:
//!
//! ```yaml
//! types:
//!   - name: UserType
//!     line: 1
//!     fields:
//!       - registered_at
//!       - name: contact_phone
//!         line: 4
//! ```

use serde::Deserialize;
use thiserror::Error;

use crate::types::{FieldNode, ParsedFile, SchemaDocument, SourceLocation, TypeNode};

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("{file}: invalid YAML manifest: {source}")]
    Yaml {
        file: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("{file}: invalid JSON manifest: {source}")]
    Json {
        file: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("{file}: type #{index} has an empty name")]
    EmptyTypeName { file: String, index: usize },

    #[error("{file}: field #{index} of type \"{type_name}\" has an empty name")]
    EmptyFieldName {
        file: String,
        type_name: String,
        index: usize,
    },
}

// ---------------------------------------------------------------------------
// Raw manifest shape
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
struct RawManifest {
    #[serde(default)]
    types: Vec<RawType>,
}

#[derive(Debug, Deserialize)]
struct RawType {
    name: String,
    #[serde(default)]
    line: usize,
    #[serde(default)]
    fields: Vec<RawField>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawField {
    Name(String),
    Detailed {
        name: String,
        #[serde(default)]
        line: usize,
        #[serde(default)]
        col: usize,
    },
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Parse one manifest. JSON is used when `file` ends in `.json`, YAML otherwise.
pub fn parse_string(content: &str, file: &str) -> Result<ParsedFile, ManifestError> {
    let raw: RawManifest = if file.ends_with(".json") {
        serde_json::from_str(content).map_err(|source| ManifestError::Json {
            file: file.into(),
            source,
        })?
    } else if content.trim().is_empty() {
        RawManifest::default()
    } else {
        serde_yaml::from_str(content).map_err(|source| ManifestError::Yaml {
            file: file.into(),
            source,
        })?
    };

    let mut types = Vec::with_capacity(raw.types.len());
    for (index, raw_type) in raw.types.into_iter().enumerate() {
        types.push(build_type(raw_type, index, file)?);
    }

    Ok(ParsedFile {
        source: file.into(),
        types,
    })
}

fn build_type(raw: RawType, index: usize, file: &str) -> Result<TypeNode, ManifestError> {
    let name = raw.name.trim().to_string();
    if name.is_empty() {
        return Err(ManifestError::EmptyTypeName {
            file: file.into(),
            index,
        });
    }

    let mut fields = Vec::with_capacity(raw.fields.len());
    for (field_index, raw_field) in raw.fields.into_iter().enumerate() {
        let (field_name, line, col) = match raw_field {
            RawField::Name(n) => (n, 0, 0),
            RawField::Detailed { name, line, col } => (name, line, col),
        };
        let field_name = field_name.trim().to_string();
        if field_name.is_empty() {
            return Err(ManifestError::EmptyFieldName {
                file: file.into(),
                type_name: name,
                index: field_index,
            });
        }
        fields.push(FieldNode {
            name: field_name,
            loc: SourceLocation {
                file: file.into(),
                line,
                col: if line > 0 && col == 0 { 1 } else { col },
            },
        });
    }

    Ok(TypeNode {
        name,
        source: file.into(),
        line: raw.line,
        fields,
    })
}

/// Merge parsed files into one document, keeping file and declaration order.
pub fn resolve(files: &[ParsedFile]) -> SchemaDocument {
    let mut doc = SchemaDocument::default();

    for file in files {
        doc.sources.push(file.source.clone());
        for ty in &file.types {
            if let Some(existing) = doc.types.iter().find(|t| t.name == ty.name) {
                tracing::warn!(
                    type_name = %ty.name,
                    first = %existing.source,
                    again = %file.source,
                    "type defined more than once; each definition is linted separately"
                );
            }
            doc.types.push(ty.clone());
        }
    }

    doc
}
