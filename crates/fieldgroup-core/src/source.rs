//! Field descriptors and the capability that produces them.
//!
//! Rules never look at host syntax. A front end turns a type body into an
//! ordered list of [`FieldDescriptor`]s and hands back an opaque declaration
//! handle per field, which rules only pass through to their diagnostics.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

use crate::types::{SourceLocation, TypeNode};

static RE_ACRONYM_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([A-Z\d]+)([A-Z][a-z])").unwrap());

static RE_CAMEL_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([a-z\d])([A-Z])").unwrap());

/// One declared field of a type body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor<R> {
    /// Normalized snake_case name.
    pub name: String,
    pub declaration: R,
}

impl<R> FieldDescriptor<R> {
    pub fn new(name: impl Into<String>, declaration: R) -> Self {
        Self {
            name: name.into(),
            declaration,
        }
    }
}

/// Anything that can list the fields of a single type definition, in
/// declaration order.
pub trait FieldSource {
    type Declaration;

    fn field_descriptors(&self) -> Vec<FieldDescriptor<Self::Declaration>>;
}

impl FieldSource for TypeNode {
    type Declaration = SourceLocation;

    fn field_descriptors(&self) -> Vec<FieldDescriptor<SourceLocation>> {
        self.fields
            .iter()
            .map(|f| FieldDescriptor::new(normalize_field_name(&f.name), f.loc.clone()))
            .collect()
    }
}

impl<R: Clone> FieldSource for [FieldDescriptor<R>] {
    type Declaration = R;

    fn field_descriptors(&self) -> Vec<FieldDescriptor<R>> {
        self.to_vec()
    }
}

/// Convert a declared field name to snake_case.
///
/// Handles camelCase (`contactPhone`), runs of capitals (`HTTPHeader`) and
/// dashes. Names already in snake_case come back unchanged.
pub fn normalize_field_name(name: &str) -> String {
    let split: Cow<'_, str> = RE_ACRONYM_BOUNDARY.replace_all(name, "${1}_${2}");
    let split = RE_CAMEL_BOUNDARY.replace_all(&split, "${1}_${2}");
    split.replace('-', "_").to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FieldNode;

    #[test]
    fn snake_case_unchanged() {
        assert_eq!(normalize_field_name("contact_phone"), "contact_phone");
        assert_eq!(normalize_field_name("name"), "name");
    }

    #[test]
    fn camel_case_split() {
        assert_eq!(normalize_field_name("contactPhone"), "contact_phone");
        assert_eq!(
            normalize_field_name("contactFirstName"),
            "contact_first_name"
        );
        assert_eq!(normalize_field_name("address2Line"), "address2_line");
    }

    #[test]
    fn acronyms_and_dashes() {
        assert_eq!(normalize_field_name("HTTPHeader_value"), "http_header_value");
        assert_eq!(normalize_field_name("home-fax"), "home_fax");
    }

    #[test]
    fn digits_inside_capital_runs() {
        assert_eq!(normalize_field_name("V2APIKey"), "v2_api_key");
        assert_eq!(normalize_field_name("ABC1DEf"), "abc1_d_ef");
        assert_eq!(normalize_field_name("SHA256Digest"), "sha256_digest");
    }

    #[test]
    fn type_node_yields_normalized_descriptors() {
        let loc = |line| SourceLocation {
            file: "user.fields.yaml".into(),
            line,
            col: 1,
        };
        let ty = TypeNode {
            name: "UserType".into(),
            source: "user.fields.yaml".into(),
            line: 1,
            fields: vec![
                FieldNode {
                    name: "registeredAt".into(),
                    loc: loc(2),
                },
                FieldNode {
                    name: "contact_phone".into(),
                    loc: loc(3),
                },
            ],
        };

        let descriptors = ty.field_descriptors();
        assert_eq!(descriptors.len(), 2);
        assert_eq!(descriptors[0].name, "registered_at");
        assert_eq!(descriptors[0].declaration.line, 2);
        assert_eq!(descriptors[1].name, "contact_phone");
    }

    #[test]
    fn slice_source_preserves_order() {
        let fields = vec![FieldDescriptor::new("b_x", 0), FieldDescriptor::new("a_y", 1)];
        let out = fields.as_slice().field_descriptors();
        assert_eq!(out, fields);
    }
}
