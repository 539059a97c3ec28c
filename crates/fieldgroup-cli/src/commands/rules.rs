use fieldgroup_lint::Linter;

/// One line per built-in rule: id, default severity, description.
pub fn run_rules() -> String {
    let linter = Linter::default();
    linter
        .rules()
        .iter()
        .map(|r| {
            format!(
                "{:<16} {:<8} {}",
                r.id(),
                r.default_severity().as_str(),
                r.description()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
