use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::reviewer::Issue;
use crate::rewriter::{AmbiguousAlias, Substitution};

/// Everything produced for one input: its issues, the renames applied, the
/// references that could not be resolved, and the rewritten text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileOutcome {
    pub name: String,
    pub issues: Vec<Issue>,
    pub substitutions: Vec<Substitution>,
    pub ambiguities: Vec<AmbiguousAlias>,
    pub rewritten: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Summary {
    pub total_files: usize,
    pub files_with_issues: usize,
    pub total_issues: usize,
    pub total_substitutions: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchReport {
    pub run_id: String,
    pub generated_at: DateTime<Utc>,
    pub summary: Summary,
    pub files: Vec<FileOutcome>,
}

impl BatchReport {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
