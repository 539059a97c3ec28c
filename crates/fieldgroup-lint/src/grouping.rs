//! Prefix grouping behind the `extract-type` rule.
//!
//! Two passes over one type body. [`collect_prefix_groups`] maps every
//! candidate prefix to the fields that start with it, and
//! [`select_extractions`] hands fields out longest prefix first so a broad
//! prefix such as `contact` cannot swallow fields that belong to the more
//! specific `contact_home`.

use std::collections::{BTreeSet, HashMap};

use fieldgroup_core::FieldDescriptor;
use serde::{Deserialize, Serialize};

const SEPARATOR: char = '_';

/// Minimum group size that triggers a report.
pub const DEFAULT_MAX_FIELDS: usize = 2;

/// Prefixes that read as ordinary words rather than a missing nested type.
pub const DEFAULT_PREFIXES: &[&str] = &["is", "with", "avg", "min", "max"];

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ExtractTypeOptions {
    /// Inclusive minimum number of fields a group needs to be reported.
    pub max_fields: usize,
    /// Allow-listed prefixes, never suggested as a new field name.
    pub prefixes: BTreeSet<String>,
}

impl Default for ExtractTypeOptions {
    fn default() -> Self {
        Self {
            max_fields: DEFAULT_MAX_FIELDS,
            prefixes: DEFAULT_PREFIXES.iter().map(|p| p.to_string()).collect(),
        }
    }
}

impl ExtractTypeOptions {
    pub fn new<I, S>(max_fields: usize, prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            max_fields,
            prefixes: prefixes.into_iter().map(Into::into).collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// A prefix and the positions (into the field list) of fields sharing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixGroup {
    pub prefix: String,
    pub fields: Vec<usize>,
}

/// A group selected for reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction<'a, R> {
    pub prefix: String,
    pub fields: Vec<&'a FieldDescriptor<R>>,
    /// Declaration of the last field in the group.
    pub location: &'a R,
}

impl<R> Extraction<'_, R> {
    pub fn message(&self) -> String {
        let names: Vec<&str> = self.fields.iter().map(|f| f.name.as_str()).collect();
        format!(
            "Consider moving {} to a new type and adding the '{}' field instead",
            names.join(", "),
            self.prefix
        )
    }
}

/// Result of the selector: the reported groups, in report order, and every
/// field position they claimed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection<'a, R> {
    pub extractions: Vec<Extraction<'a, R>>,
    pub claimed: BTreeSet<usize>,
}

/// A reported diagnostic: message plus the declaration it points at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldDiagnostic<R> {
    pub message: String,
    pub location: R,
}

/// Receives diagnostics in the order they are produced.
pub trait DiagnosticSink<R> {
    fn report(&mut self, message: String, location: &R);
}

impl<R: Clone> DiagnosticSink<R> for Vec<FieldDiagnostic<R>> {
    fn report(&mut self, message: String, location: &R) {
        self.push(FieldDiagnostic {
            message,
            location: location.clone(),
        });
    }
}

// ---------------------------------------------------------------------------
// Prefix extraction
// ---------------------------------------------------------------------------

/// Map each non-allow-listed prefix to the fields that carry it.
///
/// Groups come back in the order their prefix was first seen. A field lands in
/// one group per prefix length, so `contact_home_phone` is listed under both
/// `contact` and `contact_home`.
pub fn collect_prefix_groups<R>(
    fields: &[FieldDescriptor<R>],
    allowed: &BTreeSet<String>,
) -> Vec<PrefixGroup> {
    let mut groups: Vec<PrefixGroup> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for (position, field) in fields.iter().enumerate() {
        let segments: Vec<&str> = field.name.split(SEPARATOR).collect();
        if segments.len() < 2 {
            continue;
        }

        // Segments may be empty (`_a_b`, `a__b`); the separator goes back in
        // by position, not by whether the prefix is still empty.
        let mut prefix = String::new();
        for (i, segment) in segments[..segments.len() - 1].iter().enumerate() {
            if i > 0 {
                prefix.push(SEPARATOR);
            }
            prefix.push_str(segment);

            if allowed.contains(&prefix) {
                continue;
            }

            match index.get(&prefix) {
                Some(&slot) => groups[slot].fields.push(position),
                None => {
                    index.insert(prefix.clone(), groups.len());
                    groups.push(PrefixGroup {
                        prefix: prefix.clone(),
                        fields: vec![position],
                    });
                }
            }
        }
    }

    groups
}

// ---------------------------------------------------------------------------
// Group selection
// ---------------------------------------------------------------------------

/// Pick groups longest prefix first, removing fields already claimed by a
/// longer group. Groups left with fewer than `max_fields` fields are skipped
/// and their fields stay available to shorter prefixes.
pub fn select_extractions<'a, R>(
    fields: &'a [FieldDescriptor<R>],
    mut groups: Vec<PrefixGroup>,
    max_fields: usize,
) -> Selection<'a, R> {
    // Stable: equal lengths keep first-seen order.
    groups.sort_by(|a, b| b.prefix.chars().count().cmp(&a.prefix.chars().count()));

    let mut claimed: BTreeSet<usize> = BTreeSet::new();
    let mut extractions = Vec::new();

    for group in groups {
        let surviving: Vec<usize> = group
            .fields
            .into_iter()
            .filter(|p| !claimed.contains(p))
            .collect();

        if surviving.len() < max_fields {
            continue;
        }
        // Empty only when max_fields is zero.
        let Some(&last) = surviving.last() else {
            continue;
        };

        claimed.extend(surviving.iter().copied());
        extractions.push(Extraction {
            prefix: group.prefix,
            fields: surviving.iter().map(|&p| &fields[p]).collect(),
            location: &fields[last].declaration,
        });
    }

    Selection {
        extractions,
        claimed,
    }
}

/// Run both passes over one type body.
pub fn find_extractions<'a, R>(
    fields: &'a [FieldDescriptor<R>],
    options: &ExtractTypeOptions,
) -> Selection<'a, R> {
    let groups = collect_prefix_groups(fields, &options.prefixes);
    select_extractions(fields, groups, options.max_fields)
}

/// Run both passes and report each selected group to `sink`, longest prefix
/// first. Returns the number of diagnostics reported.
pub fn report_extractions<R, S>(
    fields: &[FieldDescriptor<R>],
    options: &ExtractTypeOptions,
    sink: &mut S,
) -> usize
where
    S: DiagnosticSink<R> + ?Sized,
{
    let selection = find_extractions(fields, options);
    for extraction in &selection.extractions {
        sink.report(extraction.message(), extraction.location);
    }
    selection.extractions.len()
}
