//! Shellguard CLI binary entry point.
//! Delegates to modules for scanning and auditing and prints results.

mod acquire;
mod analyze;
mod cli;
mod config;
mod discover;
mod models;
mod output;
mod rules;
mod scan;

use clap::Parser;
use cli::{Cli, Commands};
use scan::{LogDiagnostics, ScanOptions, ScanTarget};
use std::io::Read;
use std::path::Path;

fn main() {
    // RUST_LOG controls verbosity; defaults to warn so scan diagnostics
    // (skipped files) stay visible without drowning the summary.
    let _logger = flexi_logger::Logger::try_with_env_or_str("warn")
        .and_then(|logger| logger.start())
        .ok();
    let cli = Cli::parse();

    let table = match rules::RuleTable::builtin() {
        Ok(table) => table,
        Err(err) => {
            eprintln!("error: invalid rule configuration: {}", err);
            std::process::exit(2);
        }
    };
    log::debug!("rule table loaded: {} rule(s)", table.rules().len());

    match cli.cmd {
        Commands::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
        }
        Commands::ScanRemote {
            repo,
            refname,
            out,
            globs,
            output,
            keep_checkout,
        } => {
            let eff =
                config::resolve_effective(&globs, out.as_deref(), output.as_deref(), Path::new("."));
            let options = ScanOptions {
                globs: eff.globs.clone(),
                keep_checkout,
            };
            let target = ScanTarget::Remote {
                repo: &repo,
                refname: refname.as_deref(),
            };
            run_scan(target, &options, &eff, &table);
        }
        Commands::ScanLocal {
            path,
            out,
            globs,
            output,
        } => {
            let eff =
                config::resolve_effective(&globs, out.as_deref(), output.as_deref(), Path::new("."));
            let options = ScanOptions {
                globs: eff.globs.clone(),
                keep_checkout: false,
            };
            run_scan(ScanTarget::Local(Path::new(&path)), &options, &eff, &table);
        }
        Commands::Audit { file, output } => {
            let text = match read_script(file.as_deref()) {
                Ok(text) => text,
                Err(err) => {
                    eprintln!("error: could not read script: {}", err);
                    std::process::exit(2);
                }
            };
            let findings = analyze::analyze(&table, &text);
            let output = output.unwrap_or_else(|| "human".to_string());
            output::print_findings(&findings, &output);
            if findings.iter().any(|f| f.severity == models::Severity::Danger) {
                std::process::exit(1);
            }
        }
    }
}

fn run_scan(
    target: ScanTarget<'_>,
    options: &ScanOptions,
    eff: &config::Effective,
    table: &rules::RuleTable,
) {
    match scan::scan(&acquire::GitCli, target, options, &LogDiagnostics, table) {
        Ok(outcome) => {
            if let Err(err) = output::write_report(&eff.out, &outcome.report) {
                eprintln!("error: could not write {}: {}", eff.out.display(), err);
                std::process::exit(2);
            }
            output::print_report(&outcome.report, &eff.output);
            if eff.output != "json" {
                eprintln!("wrote report to {}", eff.out.display());
            }
            if let Some(kept) = outcome.kept_checkout {
                eprintln!("kept checkout at {}", kept.display());
            }
            if outcome.report.has_danger() {
                std::process::exit(1);
            }
        }
        Err(err) => {
            eprintln!("error: {}", err);
            std::process::exit(2);
        }
    }
}

fn read_script(file: Option<&str>) -> std::io::Result<String> {
    match file {
        Some(path) => {
            // Permissive decoding: replace undecodable bytes, never fail on them.
            let bytes = std::fs::read(path)?;
            Ok(String::from_utf8_lossy(&bytes).into_owned())
        }
        None => {
            let mut bytes = Vec::new();
            std::io::stdin().read_to_end(&mut bytes)?;
            Ok(String::from_utf8_lossy(&bytes).into_owned())
        }
    }
}
