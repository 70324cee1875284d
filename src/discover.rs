//! Candidate file discovery under a checkout root.
//!
//! Walks the tree without following symlinks (bounding traversal on untrusted
//! checkouts) and matches each file's relative path against glob patterns.
//! `.git` metadata is skipped. Results are relative paths suitable as report
//! keys, sorted for deterministic output.

use glob::{MatchOptions, Pattern, PatternError};
use std::fs;
use std::path::{Path, PathBuf};

/// Default inclusion pattern: any shell script anywhere under the root.
pub const DEFAULT_GLOB: &str = "**/*.sh";

fn match_options() -> MatchOptions {
    MatchOptions {
        case_sensitive: true,
        require_literal_separator: false,
        require_literal_leading_dot: false,
    }
}

/// Compile glob patterns up front so a bad pattern fails the invocation
/// before any acquisition work happens.
pub fn compile_patterns(patterns: &[String]) -> Result<Vec<Pattern>, (String, PatternError)> {
    patterns
        .iter()
        .map(|p| Pattern::new(p).map_err(|e| (p.clone(), e)))
        .collect()
}

/// Enumerate files under `root` whose relative path matches any pattern.
pub fn discover(root: &Path, patterns: &[Pattern]) -> Vec<PathBuf> {
    let mut found = Vec::new();
    walk(root, root, patterns, &mut found);
    found.sort();
    found
}

fn walk(root: &Path, dir: &Path, patterns: &[Pattern], found: &mut Vec<PathBuf>) {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) => {
            log::warn!("could not list {}: {}", dir.display(), err);
            return;
        }
    };
    for entry in entries.flatten() {
        let file_type = match entry.file_type() {
            Ok(t) => t,
            Err(_) => continue,
        };
        // file_type comes from lstat: symlinks show as symlinks and are
        // never followed, neither as directories nor as candidate files.
        if file_type.is_symlink() {
            continue;
        }
        let path = entry.path();
        if file_type.is_dir() {
            if entry.file_name() == ".git" {
                continue;
            }
            walk(root, &path, patterns, found);
        } else if file_type.is_file() {
            let rel = pathdiff::diff_paths(&path, root).unwrap_or_else(|| path.clone());
            let opts = match_options();
            if patterns.iter().any(|p| p.matches_path_with(&rel, opts)) {
                found.push(rel);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn patterns(globs: &[&str]) -> Vec<Pattern> {
        let owned: Vec<String> = globs.iter().map(|s| s.to_string()).collect();
        compile_patterns(&owned).unwrap()
    }

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "echo hi\n").unwrap();
    }

    #[test]
    fn test_discovers_matching_files_recursively_and_sorted() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("zz.sh"));
        touch(&dir.path().join("install/setup.sh"));
        touch(&dir.path().join("README.md"));
        let found = discover(dir.path(), &patterns(&[DEFAULT_GLOB]));
        assert_eq!(
            found,
            vec![PathBuf::from("install/setup.sh"), PathBuf::from("zz.sh")]
        );
    }

    #[test]
    fn test_git_metadata_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join(".git/hooks/pre-commit.sh"));
        touch(&dir.path().join("a.sh"));
        let found = discover(dir.path(), &patterns(&[DEFAULT_GLOB]));
        assert_eq!(found, vec![PathBuf::from("a.sh")]);
    }

    #[test]
    fn test_multiple_patterns_union() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("a.sh"));
        touch(&dir.path().join("b.bash"));
        touch(&dir.path().join("c.txt"));
        let found = discover(dir.path(), &patterns(&["**/*.sh", "**/*.bash"]));
        assert_eq!(found, vec![PathBuf::from("a.sh"), PathBuf::from("b.bash")]);
    }

    #[test]
    fn test_empty_tree_yields_empty_set() {
        let dir = tempfile::tempdir().unwrap();
        assert!(discover(dir.path(), &patterns(&[DEFAULT_GLOB])).is_empty());
    }

    #[test]
    fn test_bad_pattern_is_reported_with_its_text() {
        let owned = vec!["scripts/[".to_string()];
        let (pattern, _) = compile_patterns(&owned).unwrap_err();
        assert_eq!(pattern, "scripts/[");
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinks_are_not_followed() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("real/a.sh"));
        std::os::unix::fs::symlink(dir.path().join("real"), dir.path().join("linkdir")).unwrap();
        std::os::unix::fs::symlink(
            dir.path().join("real/a.sh"),
            dir.path().join("linked.sh"),
        )
        .unwrap();
        let found = discover(dir.path(), &patterns(&[DEFAULT_GLOB]));
        assert_eq!(found, vec![PathBuf::from("real/a.sh")]);
    }
}
