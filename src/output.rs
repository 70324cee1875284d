//! Output rendering for scan reports and single-script audits.
//!
//! Supports `human` (default) and `json` outputs. The JSON report shape is
//! stable: `{repo, ref, results: {path: [finding...]}}`.

use crate::models::{Finding, Report, Severity};
use owo_colors::OwoColorize;
use serde_json::Value as JsonVal;
use std::fs;
use std::io;
use std::path::Path;

fn use_colors(output: &str) -> bool {
    output != "json" && std::env::var_os("NO_COLOR").is_none()
}

fn severity_badge(severity: Severity, color: bool) -> String {
    let badge = format!("⟦{}⟧", severity.as_str());
    if !color {
        return badge;
    }
    match severity {
        Severity::Danger => badge.red().bold().to_string(),
        Severity::Warning => badge.yellow().bold().to_string(),
        Severity::Info => badge.blue().bold().to_string(),
    }
}

fn severity_icon(severity: Severity) -> String {
    match severity {
        Severity::Danger => "✖".red().to_string(),
        Severity::Warning => "▲".yellow().to_string(),
        Severity::Info => "◆".blue().to_string(),
    }
}

/// Print a scan report in the requested format.
pub fn print_report(report: &Report, output: &str) {
    match output {
        "json" => println!(
            "{}",
            serde_json::to_string_pretty(&compose_report_json(report)).unwrap()
        ),
        _ => {
            let color = use_colors(output);
            for (file, findings) in &report.results {
                for finding in findings {
                    print_finding_line(file, finding, color);
                }
            }
            let summary = format!(
                "— Summary — findings={} danger={} warnings={} infos={} files={}",
                report.total_findings(),
                report.count_severity(Severity::Danger),
                report.count_severity(Severity::Warning),
                report.count_severity(Severity::Info),
                report.results.len()
            );
            if color {
                println!("{}", summary.bold());
            } else {
                println!("{}", summary);
            }
        }
    }
}

/// Print a single-script finding sequence (audit command).
pub fn print_findings(findings: &[Finding], output: &str) {
    match output {
        "json" => println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({ "findings": findings })).unwrap()
        ),
        _ => {
            let color = use_colors(output);
            for finding in findings {
                print_finding_line("<script>", finding, color);
            }
            let summary = format!("— {} finding(s)", findings.len());
            if color {
                println!("{}", summary.bold());
            } else {
                println!("{}", summary);
            }
        }
    }
}

fn print_finding_line(file: &str, finding: &Finding, color: bool) {
    let badge = severity_badge(finding.severity, color);
    let location = format!("{}:{}", file, finding.line_no);
    let location = if color {
        location.bold().to_string()
    } else {
        location
    };
    if color {
        println!(
            "{} {} {} ❲{}❳ — {}",
            severity_icon(finding.severity),
            badge,
            location,
            finding.rule_id,
            finding.message
        );
    } else {
        let icon = match finding.severity {
            Severity::Danger => "✖",
            Severity::Warning => "▲",
            Severity::Info => "◆",
        };
        println!(
            "{} {} {} ❲{}❳ — {}",
            icon, badge, location, finding.rule_id, finding.message
        );
    }
}

/// Compose the report JSON object (pure) for testing/snapshot purposes.
pub fn compose_report_json(report: &Report) -> JsonVal {
    serde_json::to_value(report).unwrap()
}

/// Write the JSON report to `path`, creating parent directories as needed.
pub fn write_report(path: &Path, report: &Report) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let text = serde_json::to_string_pretty(report)
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
    fs::write(path, text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn sample_report() -> Report {
        let mut results = BTreeMap::new();
        results.insert(
            "install/setup.sh".to_string(),
            vec![Finding {
                line_no: 3,
                rule_id: "R002".into(),
                severity: Severity::Danger,
                message: "Piped curl to shell".into(),
            }],
        );
        Report {
            repo: "owner/repo".into(),
            refname: Some("main".into()),
            results,
        }
    }

    #[test]
    fn test_compose_report_json_shape() {
        let out = compose_report_json(&sample_report());
        assert_eq!(out["repo"], "owner/repo");
        assert_eq!(out["ref"], "main");
        let finding = &out["results"]["install/setup.sh"][0];
        assert_eq!(finding["line_no"], 3);
        assert_eq!(finding["rule_id"], "R002");
        assert_eq!(finding["severity"], "danger");
        assert_eq!(finding["message"], "Piped curl to shell");
    }

    #[test]
    fn test_compose_report_json_empty_results_present() {
        let report = Report {
            repo: "local-scan".into(),
            refname: None,
            results: BTreeMap::new(),
        };
        let out = compose_report_json(&report);
        assert!(out["ref"].is_null());
        assert_eq!(out["results"], serde_json::json!({}));
    }

    #[test]
    fn test_write_report_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let out_path = dir.path().join("nested/audit/report.json");
        write_report(&out_path, &sample_report()).unwrap();
        let text = fs::read_to_string(&out_path).unwrap();
        let parsed: JsonVal = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed["repo"], "owner/repo");
    }
}
