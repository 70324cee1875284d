//! Configuration discovery and effective settings resolution.
//!
//! Shellguard reads `shellguard.toml` from the start directory (or closest
//! ancestor) and merges it with CLI flags to produce an `Effective` config.
//! Defaults:
//! - `scan.globs`: `["**/*.sh"]`
//! - `report.out`: `report.json`
//! - `output`: `human`
//!
//! Overrides precedence: CLI > config file > defaults.

use crate::discover::DEFAULT_GLOB;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Default, Deserialize, Clone)]
/// Scan-related configuration section under `[scan]`.
pub struct ScanCfg {
    pub globs: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize, Clone)]
/// Report output configuration section under `[report]`.
pub struct ReportCfg {
    pub out: Option<String>,
}

#[derive(Debug, Default, Deserialize, Clone)]
/// Root configuration loaded from `shellguard.toml`.
pub struct ShellguardConfig {
    pub output: Option<String>,
    pub scan: Option<ScanCfg>,
    pub report: Option<ReportCfg>,
}

#[derive(Debug, Clone)]
/// Fully-resolved configuration used by commands after applying precedence.
pub struct Effective {
    pub globs: Vec<String>,
    pub out: PathBuf,
    pub output: String,
}

/// Walk upward from `start` until a `shellguard.toml` or a `.git` directory
/// marks the root; fall back to `start` itself.
pub fn detect_root(start: &Path) -> PathBuf {
    let mut cur = start;
    loop {
        if cur.join("shellguard.toml").exists() || cur.join(".git").exists() {
            return cur.to_path_buf();
        }
        match cur.parent() {
            Some(parent) => cur = parent,
            None => return start.to_path_buf(),
        }
    }
}

/// Load `ShellguardConfig` from `shellguard.toml` if present.
pub fn load_config(root: &Path) -> Option<ShellguardConfig> {
    let path = root.join("shellguard.toml");
    if !path.exists() {
        return None;
    }
    let text = fs::read_to_string(&path).ok()?;
    toml::from_str(&text).ok()
}

/// Resolve `Effective` by merging CLI flags, discovered config, and defaults.
pub fn resolve_effective(
    cli_globs: &[String],
    cli_out: Option<&str>,
    cli_output: Option<&str>,
    start: &Path,
) -> Effective {
    let root = detect_root(start);
    let cfg = load_config(&root).unwrap_or_default();

    let globs = if cli_globs.is_empty() {
        cfg.scan
            .and_then(|s| s.globs)
            .unwrap_or_else(|| vec![DEFAULT_GLOB.to_string()])
    } else {
        cli_globs.to_vec()
    };

    let out = cli_out
        .map(|s| s.to_string())
        .or(cfg.report.and_then(|r| r.out))
        .unwrap_or_else(|| "report.json".to_string());

    let output = cli_output
        .map(|s| s.to_string())
        .or(cfg.output)
        .unwrap_or_else(|| "human".to_string());

    Effective {
        globs,
        out: PathBuf::from(out),
        output,
    }
}
