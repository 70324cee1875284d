//! Built-in rule table for risky shell idioms.
//!
//! Rules are conservative line-based heuristics: false positives are
//! acceptable and findings are meant for manual review. The table is ordered,
//! constructed once at startup, validated (unique ids, compilable patterns),
//! and never mutated afterwards. No rule's evaluation depends on another's
//! outcome.

use crate::models::Severity;
use regex::Regex;
use std::collections::HashSet;

/// A named pattern, severity, and message describing one risky shell idiom.
pub struct Rule {
    pub id: &'static str,
    pub severity: Severity,
    pub pattern: Regex,
    pub message: &'static str,
}

/// Rule descriptors as (id, severity, pattern, message). Declaration order is
/// the tie-break order for findings on the same line.
const BUILTIN: &[(&str, Severity, &str, &str)] = &[
    (
        "R001",
        Severity::Danger,
        r"source\s+<\(\s*curl",
        "Remote source via curl: executes remote code",
    ),
    (
        "R002",
        Severity::Danger,
        r"curl\s+.*\|\s*(sh|bash)",
        "Piped curl to shell",
    ),
    (
        "R003",
        Severity::Danger,
        r"wget\s+.*-O\s*-\s*\|\s*(sh|bash)",
        "Piped wget to shell",
    ),
    (
        "R004",
        Severity::Danger,
        r"rm\s+-rf\s+/\b",
        "Dangerous rm -rf / pattern",
    ),
    (
        "R005",
        Severity::Danger,
        r"\bdd\s+if=",
        "Potential raw disk write with dd",
    ),
    (
        "R006",
        Severity::Warning,
        r"mkfs\.",
        "Filesystem creation (mkfs)",
    ),
    (
        "R007",
        Severity::Warning,
        r"chmod\s+4755",
        "SUID bit being set (chmod 4755)",
    ),
    (
        "R008",
        Severity::Warning,
        r"chmod\s+777",
        "World-writable permissions (chmod 777)",
    ),
    (
        "R009",
        Severity::Warning,
        r"ssh-copy-id|authorized_keys",
        "SSH key installation or authorized_keys modification",
    ),
    (
        "R010",
        Severity::Warning,
        r"base64\s+-d|openssl\s+enc\s+-d",
        "Decoding / executing encoded blobs",
    ),
    (
        "R011",
        Severity::Warning,
        r"apt-key\s+add",
        "Adding apt key to system (apt-key add)",
    ),
    (
        "R012",
        Severity::Warning,
        r"--allow-unauthenticated",
        "apt-get install with --allow-unauthenticated",
    ),
    (
        "R013",
        Severity::Warning,
        r"useradd|adduser|passwd\s",
        "User creation or password modification",
    ),
    (
        "R014",
        Severity::Warning,
        r"systemctl\s+(enable|start|restart|daemon-reload)",
        "systemd unit modification / control",
    ),
    (
        "R015",
        Severity::Warning,
        r"releases/download|\.deb\b|\.rpm\b|\.tar\.gz\b",
        "Downloading binary artifacts (inspect for checksums)",
    ),
    (
        "R016",
        Severity::Info,
        r"curl\s+https?://(raw\.githubusercontent|raw\.github\.com)",
        "Fetching raw content from GitHub raw; still check contents",
    ),
];

#[derive(Debug, thiserror::Error)]
/// Rule table construction failure. Fatal at process startup; never occurs
/// mid-scan since the table is validated once and immutable thereafter.
pub enum RuleTableError {
    #[error("duplicate rule id: {0}")]
    DuplicateId(String),

    #[error("rule {id} has an invalid pattern: {source}")]
    BadPattern { id: String, source: regex::Error },
}

/// Ordered, immutable collection of built-in rules.
pub struct RuleTable {
    rules: Vec<Rule>,
}

impl RuleTable {
    /// Build and validate the built-in table.
    pub fn builtin() -> Result<Self, RuleTableError> {
        Self::from_descriptors(BUILTIN)
    }

    fn from_descriptors(
        descriptors: &[(&'static str, Severity, &'static str, &'static str)],
    ) -> Result<Self, RuleTableError> {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut rules = Vec::with_capacity(descriptors.len());
        for &(id, severity, pattern, message) in descriptors {
            if !seen.insert(id) {
                return Err(RuleTableError::DuplicateId(id.to_string()));
            }
            let pattern = Regex::new(pattern).map_err(|source| RuleTableError::BadPattern {
                id: id.to_string(),
                source,
            })?;
            rules.push(Rule {
                id,
                severity,
                pattern,
                message,
            });
        }
        Ok(Self { rules })
    }

    /// Rules in declaration order.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }
}
