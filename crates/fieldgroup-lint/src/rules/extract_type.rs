//! Rule: extract-type
//!
//! Flags groups of fields sharing a name prefix (e.g. `contact_phone`,
//! `contact_email`) and suggests moving them into a nested type exposed as a
//! single `contact` field.

use fieldgroup_core::{FieldSource, SchemaDocument, SourceLocation};

use crate::grouping::{report_extractions, ExtractTypeOptions, FieldDiagnostic};
use crate::{LintDiagnostic, LintRule, LintSeverity};

#[derive(Default)]
pub struct ExtractTypeRule {
    pub options: ExtractTypeOptions,
}

impl ExtractTypeRule {
    pub fn new(options: ExtractTypeOptions) -> Self {
        Self { options }
    }
}

impl LintRule for ExtractTypeRule {
    fn id(&self) -> &str {
        "extract-type"
    }

    fn description(&self) -> &str {
        "Fields sharing a name prefix should be extracted into a nested type"
    }

    fn default_severity(&self) -> LintSeverity {
        LintSeverity::Warning
    }

    fn check(&self, doc: &SchemaDocument) -> Vec<LintDiagnostic> {
        let mut diagnostics = Vec::new();

        for ty in &doc.types {
            let fields = ty.field_descriptors();
            let mut found: Vec<FieldDiagnostic<SourceLocation>> = Vec::new();
            report_extractions(&fields, &self.options, &mut found);

            tracing::debug!(
                type_name = %ty.name,
                fields = fields.len(),
                reported = found.len(),
                "checked type"
            );

            diagnostics.extend(found.into_iter().map(|d| LintDiagnostic {
                rule: self.id().into(),
                severity: self.default_severity(),
                type_name: ty.name.clone(),
                file: d.location.file,
                line: d.location.line,
                col: d.location.col,
                message: d.message,
            }));
        }

        diagnostics
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document(input: &str) -> SchemaDocument {
        let parsed = fieldgroup_core::parse_string(input, "test.fields.yaml").unwrap();
        fieldgroup_core::resolve(&[parsed])
    }

    const USER: &str = "\
types:
  - name: UserType
    line: 1
    fields:
      - name: registered_at
        line: 2
      - name: contact_phone
        line: 3
      - name: contactFirstName
        line: 4
      - name: contact_last_name
        line: 5
";

    #[test]
    fn detects_prefix_group() {
        let rule = ExtractTypeRule::new(ExtractTypeOptions::new(3, Vec::<String>::new()));
        let results = rule.check(&document(USER));
        assert_eq!(results.len(), 1);

        let d = &results[0];
        assert_eq!(d.rule, "extract-type");
        assert_eq!(d.type_name, "UserType");
        assert_eq!(d.line, 5);
        assert_eq!(d.col, 1);
        assert_eq!(
            d.message,
            "Consider moving contact_phone, contact_first_name, contact_last_name to a new \
             type and adding the 'contact' field instead"
        );
    }

    #[test]
    fn threshold_not_met() {
        let rule = ExtractTypeRule::new(ExtractTypeOptions::new(4, Vec::<String>::new()));
        assert!(rule.check(&document(USER)).is_empty());
    }

    #[test]
    fn default_prefixes_are_allowed() {
        let input = "types:\n  - name: Stats\n    fields: [min_price, min_weight, is_active, is_visible]\n";
        let rule = ExtractTypeRule::default();
        assert!(rule.check(&document(input)).is_empty());
    }

    #[test]
    fn types_are_checked_independently() {
        let input = "\
types:
  - name: A
    fields: [billing_city]
  - name: B
    fields: [billing_zip]
";
        let rule = ExtractTypeRule::default();
        assert!(rule.check(&document(input)).is_empty());
    }

    #[test]
    fn one_diagnostic_per_group_across_types() {
        let input = "\
types:
  - name: Order
    fields: [billing_city, billing_zip, shipping_city, shipping_zip]
  - name: Customer
    fields: [address_line, address_city]
";
        let rule = ExtractTypeRule::default();
        let results = rule.check(&document(input));
        let summary: Vec<(&str, bool)> = results
            .iter()
            .map(|d| (d.type_name.as_str(), d.message.contains("'billing'")))
            .collect();
        assert_eq!(
            summary,
            vec![("Order", true), ("Order", false), ("Customer", false)]
        );
    }
}
