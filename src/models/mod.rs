//! Shared data models for findings and scan reports.

use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
/// Closed severity taxonomy for rules and findings.
///
/// `Danger` marks strong indicators of remote-code execution or irreversible
/// destructive actions, `Warning` marks risk-bearing operations that need
/// review, `Info` is a non-blocking contextual note.
pub enum Severity {
    Info,
    Warning,
    Danger,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Danger => "danger",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
/// One rule match at a specific line of a scanned file.
pub struct Finding {
    /// 1-indexed line number within the scanned text.
    pub line_no: usize,
    pub rule_id: String,
    pub severity: Severity,
    pub message: String,
}

#[derive(Debug, Serialize)]
/// Aggregate of all per-file findings produced by one scan invocation.
///
/// Only files with at least one finding appear as keys in `results`; the map
/// itself is always present, possibly empty. The report is fully determined
/// by the scanned contents and the rule table, so re-scanning unchanged input
/// yields an identical report.
pub struct Report {
    pub repo: String,
    #[serde(rename = "ref")]
    pub refname: Option<String>,
    pub results: BTreeMap<String, Vec<Finding>>,
}

impl Report {
    /// Total number of findings across all files.
    pub fn total_findings(&self) -> usize {
        self.results.values().map(|v| v.len()).sum()
    }

    /// Number of findings at the given severity.
    pub fn count_severity(&self, severity: Severity) -> usize {
        self.results
            .values()
            .flatten()
            .filter(|f| f.severity == severity)
            .count()
    }

    /// Whether any finding reached `danger` severity.
    pub fn has_danger(&self) -> bool {
        self.count_severity(Severity::Danger) > 0
    }
}
