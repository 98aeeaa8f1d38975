// File: src/summary.rs
// Purpose: Consolidated pre-submit error list

use crate::rule::{Messages, Rules};
use crate::value::{Errors, Value, Values};
use serde::Serialize;
use std::fmt;

/// Why a field appears in the summary
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SummaryKind {
    /// The field has an error message
    Violation,
    /// Required, empty, and no error computed yet
    MissingRequired,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryEntry {
    pub field: String,
    pub label: String,
    pub message: String,
    pub kind: SummaryKind,
}

/// Problems to list above a form's action buttons.
///
/// Violations come first, then missing-required placeholders. Within each
/// group fields keep schema order; errors on unruled fields (e.g. a
/// server-side `_form` error) follow the ruled ones.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ErrorSummary {
    entries: Vec<SummaryEntry>,
}

impl ErrorSummary {
    pub fn collect(rules: &Rules, values: &Values, errors: &Errors) -> Self {
        let mut entries = Vec::new();

        for (name, rule) in rules.iter() {
            let label = rule.label_or(name).to_string();
            match errors.get(name).filter(|e| !e.is_empty()) {
                Some(error) => entries.push(SummaryEntry {
                    field: name.to_string(),
                    label,
                    message: error.clone(),
                    kind: SummaryKind::Violation,
                }),
                None if rule.required && values.get(name).map_or(true, Value::is_empty) => {
                    entries.push(SummaryEntry {
                        field: name.to_string(),
                        message: Messages::render(&rules.messages().missing_required, &label),
                        label,
                        kind: SummaryKind::MissingRequired,
                    })
                }
                None => {}
            }
        }

        for (name, error) in errors {
            if rules.get(name).is_none() && !error.is_empty() {
                entries.push(SummaryEntry {
                    field: name.clone(),
                    label: name.clone(),
                    message: error.clone(),
                    kind: SummaryKind::Violation,
                });
            }
        }

        // Stable: schema order survives inside each group
        entries.sort_by_key(|entry| entry.kind);
        Self { entries }
    }

    pub fn entries(&self) -> &[SummaryEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn violations(&self) -> impl Iterator<Item = &SummaryEntry> {
        self.entries
            .iter()
            .filter(|e| e.kind == SummaryKind::Violation)
    }
}

impl fmt::Display for ErrorSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, entry) in self.entries.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}: {}", entry.label, entry.message)?;
        }
        Ok(())
    }
}
