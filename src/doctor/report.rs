// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Presentation layer for diagnostic results

use super::{CheckResult, CheckStatus};

/// Number of checks that failed
pub fn failure_count(results: &[CheckResult]) -> usize {
    results.iter().filter(|r| r.status == CheckStatus::Fail).count()
}

/// Render results as a human-readable report with a summary block
pub fn render_text(results: &[CheckResult]) -> String {
    let mut out = String::new();

    out.push_str("Curator Diagnostic Report\n");
    out.push_str(&"=".repeat(50));
    out.push('\n');

    for result in results {
        out.push_str(&format!("{}: {}: {}\n", result.status, result.name, result.detail));
    }

    let passed = results.iter().filter(|r| r.status == CheckStatus::Pass).count();
    let warned = results.iter().filter(|r| r.status == CheckStatus::Warn).count();
    let failed = failure_count(results);

    out.push_str(&"=".repeat(50));
    out.push('\n');
    out.push_str(&format!("{} passed, {} warnings, {} failed\n", passed, warned, failed));

    if failed == 0 {
        out.push_str("All checks passed. The organizer should work.\n");
    } else {
        out.push_str("Some checks failed. Check the errors above.\n");
    }

    out
}

/// Render results as a pretty-printed JSON array
pub fn render_json(results: &[CheckResult]) -> crate::Result<String> {
    Ok(serde_json::to_string_pretty(results)?)
}

/// Render results as one JSON object per line
pub fn render_jsonl(results: &[CheckResult]) -> crate::Result<String> {
    let mut out = String::new();
    for result in results {
        out.push_str(&serde_json::to_string(result)?);
        out.push('\n');
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<CheckResult> {
        vec![
            CheckResult {
                name: "file-discovery".to_string(),
                status: CheckStatus::Pass,
                detail: "3 files found".to_string(),
            },
            CheckResult {
                name: "engine-reachability".to_string(),
                status: CheckStatus::Fail,
                detail: "connection refused".to_string(),
            },
        ]
    }

    #[test]
    fn text_report_includes_lines_and_summary() {
        let text = render_text(&sample());
        assert!(text.contains("PASS: file-discovery: 3 files found"));
        assert!(text.contains("FAIL: engine-reachability: connection refused"));
        assert!(text.contains("1 passed, 0 warnings, 1 failed"));
        assert!(text.contains("Some checks failed"));
    }

    #[test]
    fn all_passing_report_says_so() {
        let results = vec![CheckResult {
            name: "type-planning".to_string(),
            status: CheckStatus::Pass,
            detail: "generated 3 operations".to_string(),
        }];
        assert!(render_text(&results).contains("All checks passed"));
    }

    #[test]
    fn failure_count_counts_only_failures() {
        assert_eq!(failure_count(&sample()), 1);
        assert_eq!(failure_count(&[]), 0);
    }

    #[test]
    fn json_round_trips() {
        let json = render_json(&sample()).unwrap();
        let parsed: Vec<CheckResult> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[1].status, CheckStatus::Fail);
    }

    #[test]
    fn jsonl_is_one_record_per_line() {
        let jsonl = render_jsonl(&sample()).unwrap();
        assert_eq!(jsonl.trim().lines().count(), 2);
    }
}
