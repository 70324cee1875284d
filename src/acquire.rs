//! Repository acquisition: resolving a reference into a readable checkout.
//!
//! Remote references are shallow-cloned (latest tree only, no history) into a
//! fresh temporary directory via the external `git` binary. The acquired
//! content is only ever opened for reading as text; nothing in it is executed,
//! sourced, or interpreted. Local paths are used in place and never cleaned
//! up by this module.

use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

#[derive(Debug, thiserror::Error)]
/// Acquisition failure. Fatal for the scan invocation that raised it; any
/// partially created temporary checkout is removed before this propagates.
pub enum AcquireError {
    #[error("failed to create temporary checkout directory: {0}")]
    TempDir(#[source] std::io::Error),

    #[error("failed to run git: {0}")]
    Spawn(#[source] std::io::Error),

    #[error("git clone failed: {stderr}")]
    Clone { stderr: String },

    #[error("not a directory: {}", .0.display())]
    NotADirectory(PathBuf),
}

/// A filesystem materialization of a repository's file tree.
///
/// A `Temporary` checkout owns its directory and releases it when dropped,
/// on every exit path from the surrounding scan, including unwinding. A
/// `Local` checkout borrows an existing directory and never removes it.
pub enum Checkout {
    Local(PathBuf),
    Temporary(TempDir),
}

impl Checkout {
    pub fn path(&self) -> &Path {
        match self {
            Checkout::Local(path) => path,
            Checkout::Temporary(dir) => dir.path(),
        }
    }

    /// Disarm cleanup of a temporary checkout and return its path. Returns
    /// `None` for local checkouts, which were never owned to begin with.
    pub fn into_persistent(self) -> Option<PathBuf> {
        match self {
            Checkout::Local(_) => None,
            Checkout::Temporary(dir) => Some(dir.keep()),
        }
    }
}

/// Narrow capability for turning a repository reference into a checkout, so
/// the orchestrator can be exercised in tests without network access.
pub trait AcquireCheckout {
    fn acquire(&self, repo: &str, refname: Option<&str>) -> Result<Checkout, AcquireError>;
}

/// Production acquirer shelling out to `git clone --depth 1`.
pub struct GitCli;

impl AcquireCheckout for GitCli {
    fn acquire(&self, repo: &str, refname: Option<&str>) -> Result<Checkout, AcquireError> {
        let url = resolve_repo_url(repo);
        let dest = tempfile::Builder::new()
            .prefix("shellguard-")
            .tempdir()
            .map_err(AcquireError::TempDir)?;
        log::info!(
            "cloning {} (ref={}) into {}",
            url,
            refname.unwrap_or("default"),
            dest.path().display()
        );
        let output = clone_command(&url, refname, dest.path())
            .output()
            .map_err(AcquireError::Spawn)?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            // `dest` drops here, removing the partial checkout.
            return Err(AcquireError::Clone { stderr });
        }
        Ok(Checkout::Temporary(dest))
    }
}

/// Use an already-materialized directory as a read-only checkout.
pub fn local_checkout(path: &Path) -> Result<Checkout, AcquireError> {
    if path.is_dir() {
        Ok(Checkout::Local(path.to_path_buf()))
    } else {
        Err(AcquireError::NotADirectory(path.to_path_buf()))
    }
}

/// Resolve a repository reference to a clonable URL. The `owner/name`
/// shorthand resolves against GitHub; any explicit URL scheme passes through.
pub fn resolve_repo_url(repo: &str) -> String {
    let explicit = ["http://", "https://", "git@", "ssh://", "file://"];
    if repo.contains('/') && !explicit.iter().any(|p| repo.starts_with(p)) {
        format!("https://github.com/{}.git", repo)
    } else {
        repo.to_string()
    }
}

fn clone_command(url: &str, refname: Option<&str>, dest: &Path) -> Command {
    let mut cmd = Command::new("git");
    cmd.args(["clone", "--depth", "1", "--no-tags"]);
    if let Some(refname) = refname {
        cmd.args(["--branch", refname]);
    }
    cmd.arg(url).arg(dest);
    cmd
}
