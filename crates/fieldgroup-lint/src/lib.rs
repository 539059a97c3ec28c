//! fieldgroup linter: rules that look for field groups which should become
//! nested types.
//!
//! Provides a trait-based rule framework over a [`SchemaDocument`] and the
//! prefix-grouping algorithm used by the `extract-type` rule.

pub mod grouping;
mod rules;

use std::collections::HashMap;

use fieldgroup_core::SchemaDocument;
pub use grouping::{
    collect_prefix_groups, find_extractions, report_extractions, select_extractions,
    DiagnosticSink, ExtractTypeOptions, Extraction, FieldDiagnostic, PrefixGroup, Selection,
};
pub use rules::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Lint severity
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LintSeverity {
    Error,
    Warning,
    Info,
}

impl LintSeverity {
    /// Lowercase label used in human-readable output.
    pub fn as_str(&self) -> &'static str {
        match self {
            LintSeverity::Error => "error",
            LintSeverity::Warning => "warning",
            LintSeverity::Info => "info",
        }
    }
}

// ---------------------------------------------------------------------------
// Lint diagnostic
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LintDiagnostic {
    pub rule: String,
    pub severity: LintSeverity,
    pub type_name: String,
    pub file: String,
    pub line: usize,
    pub col: usize,
    pub message: String,
}

// ---------------------------------------------------------------------------
// Lint rule trait
// ---------------------------------------------------------------------------

/// Trait that all lint rules must implement.
pub trait LintRule: Send + Sync {
    /// Unique rule identifier (e.g., "extract-type").
    fn id(&self) -> &str;

    /// Human-readable description.
    fn description(&self) -> &str;

    /// Default severity.
    fn default_severity(&self) -> LintSeverity;

    /// Run the rule against every type in the document.
    fn check(&self, doc: &SchemaDocument) -> Vec<LintDiagnostic>;
}

// ---------------------------------------------------------------------------
// Lint configuration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleLevel {
    Off,
    #[default]
    Warn,
    Error,
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("extract-type: MaxFields must be at least 1 (got {0})")]
    InvalidMaxFields(usize),

    #[error("extract-type: Prefixes must not contain an empty string")]
    EmptyPrefix,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LintConfig {
    #[serde(default)]
    pub rules: HashMap<String, RuleLevel>,

    #[serde(default, rename = "extract-type")]
    pub extract_type: ExtractTypeOptions,
}

impl LintConfig {
    /// Check if a rule is enabled (not off).
    pub fn is_enabled(&self, rule_id: &str) -> bool {
        !matches!(self.rules.get(rule_id), Some(RuleLevel::Off))
    }

    /// Get the configured severity for a rule, or its default.
    pub fn severity_for(&self, rule: &dyn LintRule) -> LintSeverity {
        match self.rules.get(rule.id()) {
            Some(RuleLevel::Error) => LintSeverity::Error,
            Some(RuleLevel::Warn) => LintSeverity::Warning,
            Some(RuleLevel::Off) => LintSeverity::Warning,
            None => rule.default_severity(),
        }
    }

    /// Reject option values the rules cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.extract_type.max_fields == 0 {
            return Err(ConfigError::InvalidMaxFields(0));
        }
        if self.extract_type.prefixes.iter().any(|p| p.is_empty()) {
            return Err(ConfigError::EmptyPrefix);
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Linter engine
// ---------------------------------------------------------------------------

pub struct Linter {
    rules: Vec<Box<dyn LintRule>>,
    config: LintConfig,
}

impl Linter {
    /// Create a new linter with all built-in rules, configured from `config`.
    pub fn new(config: LintConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            rules: builtin_rules(&config),
            config,
        })
    }

    /// Get a reference to the registered rules.
    pub fn rules(&self) -> &[Box<dyn LintRule>] {
        &self.rules
    }

    /// Run all enabled rules against the document.
    pub fn lint(&self, doc: &SchemaDocument) -> Vec<LintDiagnostic> {
        let mut diagnostics = Vec::new();

        for rule in &self.rules {
            if !self.config.is_enabled(rule.id()) {
                tracing::debug!(rule = rule.id(), "rule disabled");
                continue;
            }

            let severity = self.config.severity_for(rule.as_ref());
            let mut results = rule.check(doc);
            for d in &mut results {
                d.severity = severity.clone();
            }
            tracing::debug!(rule = rule.id(), count = results.len(), "rule finished");
            diagnostics.extend(results);
        }

        diagnostics
    }
}

impl Default for Linter {
    fn default() -> Self {
        Self {
            rules: builtin_rules(&LintConfig::default()),
            config: LintConfig::default(),
        }
    }
}

/// Return all built-in lint rules.
fn builtin_rules(config: &LintConfig) -> Vec<Box<dyn LintRule>> {
    vec![Box::new(ExtractTypeRule::new(config.extract_type.clone()))]
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
