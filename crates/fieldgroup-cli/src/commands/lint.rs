use std::path::Path;

use fieldgroup_lint::{LintConfig, LintDiagnostic, LintSeverity, Linter};

use crate::build_document;
use crate::reader::read_project_config;

/// Command-line values that take precedence over the project config.
#[derive(Debug, Default)]
pub struct Overrides {
    pub max_fields: Option<usize>,
    pub prefixes: Vec<String>,
}

impl Overrides {
    fn apply(&self, config: &mut LintConfig) {
        if let Some(max_fields) = self.max_fields {
            config.extract_type.max_fields = max_fields;
        }
        config
            .extract_type
            .prefixes
            .extend(self.prefixes.iter().cloned());
    }
}

pub fn run_lint(
    input_path: &Path,
    format: &str,
    config_path: Option<&Path>,
    overrides: &Overrides,
) -> Result<(String, usize), String> {
    let project = read_project_config(input_path, config_path)?;
    let mut config = project.lint;
    overrides.apply(&mut config);

    let linter = Linter::new(config).map_err(|e| format!("Invalid configuration: {e}"))?;
    let doc = build_document(input_path, project.sources.as_deref())?;
    let results = linter.lint(&doc);

    let error_count = results
        .iter()
        .filter(|d| d.severity == LintSeverity::Error)
        .count();
    let file_count = doc.sources.len();

    let output = match format {
        "json" => serde_json::to_string_pretty(&serde_json::json!({
            "diagnostics": results,
            "summary": {
                "count": results.len(),
                "errors": error_count,
                "files": file_count,
                "types": doc.types.len(),
            }
        }))
        .map_err(|e| format!("JSON serialization error: {e}"))?,
        "sarif" => {
            let sarif = build_sarif(&results, &linter);
            serde_json::to_string_pretty(&sarif)
                .map_err(|e| format!("SARIF serialization error: {e}"))?
        }
        "human" => render_human(&results, file_count),
        other => {
            return Err(format!(
                "Unknown format \"{other}\" (expected human, json or sarif)"
            ))
        }
    };

    Ok((output, error_count))
}

fn sarif_level(severity: &LintSeverity) -> &'static str {
    match severity {
        LintSeverity::Error => "error",
        LintSeverity::Warning => "warning",
        LintSeverity::Info => "note",
    }
}

fn render_human(results: &[LintDiagnostic], file_count: usize) -> String {
    let mut lines: Vec<String> = Vec::new();

    for d in results {
        lines.push(format!(
            "{}:{}:{} {}[{}]: {}",
            d.file,
            d.line,
            d.col,
            d.severity.as_str(),
            d.rule,
            d.message
        ));
    }

    let count = results.len();
    let issue_word = if count == 1 { "issue" } else { "issues" };
    let file_word = if file_count == 1 { "file" } else { "files" };
    lines.push(format!(
        "{count} lint {issue_word} in {file_count} {file_word}."
    ));

    lines.join("\n")
}

fn build_sarif(results: &[LintDiagnostic], linter: &Linter) -> serde_json::Value {
    let rule_descriptors: Vec<serde_json::Value> = linter
        .rules()
        .iter()
        .map(|r| {
            serde_json::json!({
                "id": r.id(),
                "shortDescription": { "text": r.description() },
                "defaultConfiguration": {
                    "level": sarif_level(&r.default_severity())
                }
            })
        })
        .collect();

    let sarif_results: Vec<serde_json::Value> = results
        .iter()
        .map(|d| {
            // SARIF regions are 1-based; manifests without positions report line 0.
            let region = if d.line > 0 {
                serde_json::json!({ "startLine": d.line, "startColumn": d.col.max(1) })
            } else {
                serde_json::json!({})
            };
            serde_json::json!({
                "ruleId": d.rule,
                "level": sarif_level(&d.severity),
                "message": { "text": d.message },
                "locations": [{
                    "physicalLocation": {
                        "artifactLocation": { "uri": d.file },
                        "region": region
                    },
                    "logicalLocations": [{ "name": d.type_name, "kind": "type" }]
                }]
            })
        })
        .collect();

    serde_json::json!({
        "$schema": "https://raw.githubusercontent.com/oasis-tcs/sarif-spec/main/sarif-2.1/schema/sarif-schema-2.1.0.json",
        "version": "2.1.0",
        "runs": [{
            "tool": {
                "driver": {
                    "name": "fieldgroup",
                    "version": env!("CARGO_PKG_VERSION"),
                    "rules": rule_descriptors
                }
            },
            "results": sarif_results
        }]
    })
}
