//! Scan orchestration: acquire a checkout, discover candidate files, analyze
//! each one, and aggregate findings into a report.
//!
//! Acquisition failure aborts the invocation with no report. Everything after
//! a successful acquisition is resilient: a file that cannot be read is
//! reported to the diagnostics sink and skipped, never failing the scan.
//! Per-file analysis runs on the rayon pool; completion order is irrelevant
//! because results land in a sorted map keyed by relative path.

use crate::acquire::{self, AcquireCheckout, AcquireError};
use crate::analyze::analyze;
use crate::discover;
use crate::models::{Finding, Report};
use crate::rules::RuleTable;
use rayon::prelude::*;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Repo identifier recorded in reports produced from a local directory.
pub const LOCAL_REPO_ID: &str = "local-scan";

#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error(transparent)]
    Acquire(#[from] AcquireError),

    #[error("invalid glob pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        source: glob::PatternError,
    },
}

/// What to scan: a remote repository reference or an existing directory.
pub enum ScanTarget<'a> {
    Remote {
        repo: &'a str,
        refname: Option<&'a str>,
    },
    Local(&'a Path),
}

/// Per-invocation scan options.
pub struct ScanOptions {
    /// Glob patterns selecting candidate files, relative to the checkout.
    pub globs: Vec<String>,
    /// Persist a remote checkout instead of removing it (debugging aid).
    pub keep_checkout: bool,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            globs: vec![discover::DEFAULT_GLOB.to_string()],
            keep_checkout: false,
        }
    }
}

/// Explicit diagnostics sink for non-fatal conditions, passed into the
/// orchestrator so tests can capture output deterministically.
pub trait Diagnostics: Sync {
    fn warn(&self, message: &str);
}

/// Production sink forwarding to the `log` facade.
pub struct LogDiagnostics;

impl Diagnostics for LogDiagnostics {
    fn warn(&self, message: &str) {
        log::warn!("{}", message);
    }
}

/// A completed scan: the report, plus the checkout path when the caller asked
/// to keep it around.
pub struct ScanOutcome {
    pub report: Report,
    pub kept_checkout: Option<PathBuf>,
}

/// Run a full scan of `target` and aggregate findings into a report.
///
/// Patterns are validated before any acquisition work so a configuration
/// mistake never triggers a clone. A temporary checkout created here is owned
/// exclusively by this invocation and released exactly once, on every exit
/// path, by `Checkout`'s drop; concurrent scans each acquire their own.
pub fn scan(
    acquirer: &dyn AcquireCheckout,
    target: ScanTarget<'_>,
    options: &ScanOptions,
    diagnostics: &dyn Diagnostics,
    table: &RuleTable,
) -> Result<ScanOutcome, ScanError> {
    let patterns = discover::compile_patterns(&options.globs)
        .map_err(|(pattern, source)| ScanError::Pattern { pattern, source })?;

    let (checkout, repo_id, refname) = match target {
        ScanTarget::Local(path) => (acquire::local_checkout(path)?, LOCAL_REPO_ID.to_string(), None),
        ScanTarget::Remote { repo, refname } => (
            acquirer.acquire(repo, refname)?,
            repo.to_string(),
            refname.map(|r| r.to_string()),
        ),
    };

    let files = discover::discover(checkout.path(), &patterns);
    log::info!("scanning {} candidate file(s) in {}", files.len(), repo_id);
    let results = analyze_files(checkout.path(), &files, table, diagnostics);

    let kept_checkout = if options.keep_checkout {
        checkout.into_persistent()
    } else {
        None
    };
    Ok(ScanOutcome {
        report: Report {
            repo: repo_id,
            refname,
            results,
        },
        kept_checkout,
    })
}

/// Read and analyze each discovered file, keeping only non-empty results.
///
/// Undecodable bytes are substituted rather than failing the file; a read
/// error (permission denied, race-deleted file, I/O error) skips that single
/// file after reporting it to the sink.
fn analyze_files(
    root: &Path,
    files: &[PathBuf],
    table: &RuleTable,
    diagnostics: &dyn Diagnostics,
) -> BTreeMap<String, Vec<Finding>> {
    files
        .par_iter()
        .filter_map(|rel| {
            let bytes = match fs::read(root.join(rel)) {
                Ok(bytes) => bytes,
                Err(err) => {
                    diagnostics.warn(&format!("could not read {}: {}", rel.display(), err));
                    return None;
                }
            };
            let text = String::from_utf8_lossy(&bytes);
            let findings = analyze(table, &text);
            if findings.is_empty() {
                None
            } else {
                Some((rel.to_string_lossy().to_string(), findings))
            }
        })
        .collect()
}
