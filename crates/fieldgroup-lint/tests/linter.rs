use fieldgroup_core::{parse_string, resolve, FieldDescriptor, SchemaDocument};
use fieldgroup_lint::*;
use pretty_assertions::assert_eq;

const CONTACTS: &str = "\
types:
  - name: ContactCard
    line: 10
    fields:
      - name: contact_home_phone
        line: 11
      - name: contact_home_fax
        line: 12
      - name: contact_work_phone
        line: 13
";

fn document(input: &str) -> SchemaDocument {
    resolve(&[parse_string(input, "contacts.fields.yaml").unwrap()])
}

#[test]
fn linter_reports_most_specific_group() {
    let linter = Linter::new(LintConfig::default()).unwrap();
    let results = linter.lint(&document(CONTACTS));

    assert_eq!(
        results,
        vec![LintDiagnostic {
            rule: "extract-type".into(),
            severity: LintSeverity::Warning,
            type_name: "ContactCard".into(),
            file: "contacts.fields.yaml".into(),
            line: 12,
            col: 1,
            message: "Consider moving contact_home_phone, contact_home_fax to a new type \
                      and adding the 'contact_home' field instead"
                .into(),
        }]
    );
}

#[test]
fn configured_error_level_applies() {
    let mut config = LintConfig::default();
    config.rules.insert("extract-type".into(), RuleLevel::Error);
    let linter = Linter::new(config).unwrap();
    let results = linter.lint(&document(CONTACTS));
    assert!(results.iter().all(|d| d.severity == LintSeverity::Error));
}

#[test]
fn disabled_rule_reports_nothing() {
    let mut config = LintConfig::default();
    config.rules.insert("extract-type".into(), RuleLevel::Off);
    let linter = Linter::new(config).unwrap();
    assert!(linter.lint(&document(CONTACTS)).is_empty());
}

#[test]
fn allow_listed_longer_prefix_falls_back_to_shorter() {
    let mut config = LintConfig::default();
    config.extract_type.prefixes.insert("contact_home".into());
    let linter = Linter::new(config).unwrap();
    let results = linter.lint(&document(CONTACTS));

    assert_eq!(results.len(), 1);
    assert!(results[0].message.contains("'contact'"));
    assert_eq!(results[0].line, 13);
}

#[test]
fn diagnostics_serialize_with_camel_case_keys() {
    let linter = Linter::default();
    let results = linter.lint(&document(CONTACTS));
    let json = serde_json::to_value(&results).unwrap();
    assert_eq!(json[0]["typeName"], "ContactCard");
    assert_eq!(json[0]["severity"], "warning");
}

#[test]
fn threshold_holds_for_every_group() {
    let names = [
        "order_total_net",
        "order_total_gross",
        "order_total_tax",
        "order_id",
        "order_status",
        "customer_name",
        "customer_email",
        "created_at",
    ];
    let fields: Vec<FieldDescriptor<usize>> = names
        .iter()
        .enumerate()
        .map(|(i, n)| FieldDescriptor::new(*n, i))
        .collect();

    for max_fields in 1..=4 {
        let options = ExtractTypeOptions::new(max_fields, Vec::<String>::new());
        let selection = find_extractions(&fields, &options);
        let reported: usize = selection.extractions.iter().map(|e| e.fields.len()).sum();

        assert_eq!(reported, selection.claimed.len(), "max_fields={max_fields}");
        for extraction in &selection.extractions {
            assert!(extraction.fields.len() >= max_fields);
            let last = extraction.fields.last().unwrap();
            assert_eq!(extraction.location, &last.declaration);
        }
    }
}

#[test]
fn allow_listed_prefix_never_reported() {
    let names = ["with_tax_total", "with_tax_rate", "with_fee", "with_discount"];
    let fields: Vec<FieldDescriptor<usize>> = names
        .iter()
        .enumerate()
        .map(|(i, n)| FieldDescriptor::new(*n, i))
        .collect();

    let mut sink: Vec<FieldDiagnostic<usize>> = Vec::new();
    let count = report_extractions(&fields, &ExtractTypeOptions::default(), &mut sink);

    assert_eq!(count, 1);
    assert!(sink[0].message.ends_with("adding the 'with_tax' field instead"));
    assert!(sink.iter().all(|d| !d.message.contains("'with'")));
}
