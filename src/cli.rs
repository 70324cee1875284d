//! CLI argument parsing via `clap`.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "shellguard",
    version,
    about = "Shellguard — risky shell script auditor",
    long_about = "Shellguard flags risky idioms in shell helper scripts (remote code execution, destructive filesystem operations, permission changes, credential handling) using conservative line-based heuristics. Findings are meant for manual review before trusting a provisioning script.\n\nConfiguration precedence: CLI > shellguard.toml > defaults.",
    after_help = "Examples:\n  shellguard scan-remote community-scripts/ProxmoxVE --out report.json\n  shellguard scan-remote https://example.com/repo.git --ref v1.2 --keep-checkout\n  shellguard scan-local ./scripts --glob '**/*.sh' --output json\n  shellguard audit install.sh",
    arg_required_else_help = true
)]
/// Top-level CLI options and subcommands.
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand)]
/// Supported subcommands for scanning repositories and auditing scripts.
pub enum Commands {
    /// Show version
    #[command(about = "Show version", long_about = "Print the current shellguard version.")]
    Version,
    /// Scan a remote repository
    #[command(
        about = "Shallow-clone and scan a remote repository",
        long_about = "Shallow-clone a repository (git URL or GitHub owner/repo shorthand) into a temporary checkout, scan matching files, and write a JSON report. The checkout is read-only and removed afterwards unless --keep-checkout is set. Requires a git binary on PATH.",
        after_help = "Examples:\n  shellguard scan-remote owner/repo\n  shellguard scan-remote owner/repo --ref main --out audit.json"
    )]
    ScanRemote {
        #[arg(help = "Git URL or GitHub owner/repo shorthand")]
        repo: String,
        #[arg(long = "ref", help = "Branch or tag to check out")]
        refname: Option<String>,
        #[arg(long, help = "Write JSON report to this file (default: report.json)")]
        out: Option<String>,
        #[arg(long = "glob", help = "Glob pattern for candidate files (repeatable; default: **/*.sh)")]
        globs: Vec<String>,
        #[arg(long, help = "Output mode: human|json (default: human)")]
        output: Option<String>,
        #[arg(long, action = clap::ArgAction::SetTrue, help = "Keep the temporary checkout and print its path")]
        keep_checkout: bool,
    },
    /// Scan a local directory
    #[command(
        about = "Scan an already-materialized directory",
        long_about = "Scan an existing local directory of scripts and write a JSON report. The directory is never modified or removed.",
        after_help = "Examples:\n  shellguard scan-local ./scripts\n  shellguard scan-local . --glob 'install/*.sh' --output json"
    )]
    ScanLocal {
        #[arg(help = "Path to the directory to scan")]
        path: String,
        #[arg(long, help = "Write JSON report to this file (default: report.json)")]
        out: Option<String>,
        #[arg(long = "glob", help = "Glob pattern for candidate files (repeatable; default: **/*.sh)")]
        globs: Vec<String>,
        #[arg(long, help = "Output mode: human|json (default: human)")]
        output: Option<String>,
    },
    /// Audit a single script
    #[command(
        about = "Audit one script and print its findings",
        long_about = "Run the analyzer over a single script (file argument, or stdin when omitted) and print the findings. No repository acquisition or file discovery is involved.",
        after_help = "Examples:\n  shellguard audit install.sh\n  curl -s https://example.com/x.sh | shellguard audit --output json"
    )]
    Audit {
        #[arg(help = "Script file to audit (stdin when omitted)")]
        file: Option<String>,
        #[arg(long, help = "Output mode: human|json (default: human)")]
        output: Option<String>,
    },
}
