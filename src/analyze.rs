//! Pure line-based analyzer mapping script text to ordered findings.

use crate::models::Finding;
use crate::rules::RuleTable;

/// Analyze script text against the rule table.
///
/// Splits the text into 1-indexed lines (terminator-agnostic) and tests every
/// rule against every line in isolation; rules never span lines. A rule that
/// matches a line emits exactly one finding for that line no matter how many
/// occurrences the line contains, so output is bounded by lines × rules.
/// Distinct rules may all fire on one line and all such findings are kept.
///
/// Findings come out in line-ascending order, ties broken by rule declaration
/// order. The function is deterministic and side-effect-free, so it can be
/// called concurrently across files without synchronization.
pub fn analyze(table: &RuleTable, text: &str) -> Vec<Finding> {
    let mut findings = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        for rule in table.rules() {
            if rule.pattern.is_match(line) {
                findings.push(Finding {
                    line_no: idx + 1,
                    rule_id: rule.id.to_string(),
                    severity: rule.severity,
                    message: rule.message.to_string(),
                });
            }
        }
    }
    findings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Severity;

    fn table() -> RuleTable {
        RuleTable::builtin().unwrap()
    }

    fn by_rule<'a>(findings: &'a [Finding], rule_id: &str) -> Vec<&'a Finding> {
        findings.iter().filter(|f| f.rule_id == rule_id).collect()
    }

    #[test]
    fn test_detects_remote_source() {
        let findings = analyze(&table(), "source <(curl -fsSL https://example.com/x)\necho hi");
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].rule_id, "R001");
        assert_eq!(findings[0].severity, Severity::Danger);
        assert_eq!(findings[0].line_no, 1);
    }

    #[test]
    fn test_detects_piped_curl_and_rm() {
        let findings = analyze(
            &table(),
            "curl -s http://x/install.sh | bash\nsudo rm -rf /tmp/test\n",
        );
        let piped = by_rule(&findings, "R002");
        assert_eq!(piped.len(), 1);
        assert_eq!(piped[0].line_no, 1);
        assert_eq!(piped[0].severity, Severity::Danger);
        let rm = by_rule(&findings, "R004");
        assert_eq!(rm.len(), 1);
        assert_eq!(rm[0].line_no, 2);
        assert_eq!(rm[0].severity, Severity::Danger);
    }

    #[test]
    fn test_one_finding_per_rule_per_line() {
        let findings = analyze(&table(), "curl a | sh; curl b | sh");
        assert_eq!(by_rule(&findings, "R002").len(), 1);
    }

    #[test]
    fn test_multiple_rules_on_one_line_kept_in_declaration_order() {
        let findings = analyze(&table(), "curl x | bash && rm -rf /opt/app");
        assert_eq!(findings.len(), 2);
        assert_eq!(findings[0].rule_id, "R002");
        assert_eq!(findings[1].rule_id, "R004");
        assert_eq!(findings[0].line_no, findings[1].line_no);
    }

    #[test]
    fn test_line_numbers_are_non_decreasing() {
        let text = "chmod 777 /srv\nuseradd bot\nchmod 4755 /usr/bin/tool\n";
        let findings = analyze(&table(), text);
        assert!(!findings.is_empty());
        assert!(findings.windows(2).all(|w| w[0].line_no <= w[1].line_no));
    }

    #[test]
    fn test_deterministic_for_identical_input() {
        let text = "wget http://x -O - | sh\napt-key add key.asc\n";
        assert_eq!(analyze(&table(), text), analyze(&table(), text));
    }

    #[test]
    fn test_terminator_agnostic_line_splitting() {
        let findings = analyze(&table(), "echo ok\r\ncurl x | sh\r\n");
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].line_no, 2);
        assert_eq!(findings[0].rule_id, "R002");
    }

    #[test]
    fn test_empty_and_benign_input_yield_no_findings() {
        assert!(analyze(&table(), "").is_empty());
        assert!(analyze(&table(), "echo hello\nls -la\n").is_empty());
    }
}
