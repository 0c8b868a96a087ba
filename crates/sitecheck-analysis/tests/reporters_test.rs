//! Reporter output tests: console, JSON, JUnit.

use sitecheck_analysis::enforcement::{
    available_formats, create_reporter, CheckResult, Severity, ViolationSink,
};

fn sample_results() -> Vec<CheckResult> {
    let mut sink = ViolationSink::new("content/single-h1", Severity::Error);
    sink.push("about/index.html", Some(12), "2 <h1> headings (expected exactly one)");
    sink.push("writing/a&b.html", None, "no <h1> heading");
    let failed = CheckResult::fail("content/single-h1", 4, sink.into_violations());

    let mut sink = ViolationSink::new("a11y/decorative-alt", Severity::Warning);
    sink.push("index.html", Some(30), "<img src=\"rule.png\"> has alt=\"spacer\"");
    let warned = CheckResult::warn("a11y/decorative-alt", 4, sink.into_violations());

    let mut sink = ViolationSink::new("external/html-validator", Severity::Error);
    sink.push("public", None, "html5validator found errors:\n\nline one\nline two\n\nFix them.");
    let tool = CheckResult::fail("external/html-validator", 0, sink.into_violations());

    vec![
        CheckResult::pass("structure/doctype", 4, "4 document(s) checked, no violations".to_string()),
        failed,
        warned,
        CheckResult::skipped("jsonld/article-schema", "No applicable documents".to_string()),
        CheckResult::errored("external/link-checker", "[TOOL_MISSING] htmltest command not found".to_string()),
        tool,
    ]
}

#[test]
fn every_advertised_format_has_a_reporter() {
    for format in available_formats() {
        let reporter = create_reporter(format, false).unwrap();
        assert_eq!(reporter.name(), *format);
    }
    assert!(create_reporter("sarif", false).is_none());
}

// ─── Console ────────────────────────────────────────────────────────────

#[test]
fn console_lists_each_check_and_violation() {
    let out = create_reporter("console", false).unwrap().generate(&sample_results()).unwrap();

    assert!(out.contains("sitecheck Corpus Report"));
    assert!(out.contains("✓ structure/doctype: 4 document(s) checked, no violations\n"));
    assert!(out.contains("✗ content/single-h1: 2 violation(s) in 2 document(s)\n"));
    assert!(out.contains("  error: about/index.html:12: 2 <h1> headings (expected exactly one)\n"));
    assert!(out.contains("  error: writing/a&b.html: no <h1> heading\n"));
    assert!(out.contains("⚠ a11y/decorative-alt: advisory: 1 violation(s) in 1 document(s)\n"));
    assert!(out.contains("  warning: index.html:30: "));
    assert!(out.contains("⊘ jsonld/article-schema: No applicable documents\n"));
    assert!(out.contains("⚡ external/link-checker: Check errored: [TOOL_MISSING]"));
    assert!(out.contains("found errors:\n      \n      line one\n      line two"));
    assert!(out.contains("Summary: 3/6 checks passed, 2 failed, 1 warned, 1 skipped, 1 errored, 4 violations"));
    assert!(out.ends_with("Result: FAILED ✗\n"));
    assert!(!out.contains("\x1b["));
}

#[test]
fn console_colors_severities_when_enabled() {
    let out = create_reporter("console", true).unwrap().generate(&sample_results()).unwrap();
    assert!(out.contains("\x1b[31merror\x1b[0m"));
    assert!(out.contains("\x1b[33mwarning\x1b[0m"));
}

#[test]
fn console_passes_when_only_advisories() {
    let results: Vec<CheckResult> = sample_results()
        .into_iter()
        .filter(|r| r.passed)
        .collect();
    let out = create_reporter("console", false).unwrap().generate(&results).unwrap();
    assert!(out.ends_with("Result: PASSED ✓\n"));
}

// ─── JSON ───────────────────────────────────────────────────────────────

#[test]
fn json_report_structure() {
    let out = create_reporter("json", false).unwrap().generate(&sample_results()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();

    assert_eq!(value["overall_passed"], false);
    assert_eq!(value["total_violations"], 4);
    assert_eq!(value["check_count"], 6);

    let checks = value["checks"].as_array().unwrap();
    assert_eq!(checks[1]["check_id"], "content/single-h1");
    assert_eq!(checks[1]["status"], "failed");
    assert_eq!(checks[1]["violations"][0]["file"], "about/index.html");
    assert_eq!(checks[1]["violations"][0]["line"], 12);
    assert_eq!(checks[1]["violations"][1]["line"], serde_json::Value::Null);
    assert_eq!(checks[2]["violations"][0]["severity"], "warning");
    assert_eq!(checks[3]["status"], "skipped");
    assert_eq!(checks[4]["error"], "[TOOL_MISSING] htmltest command not found");
}

// ─── JUnit ──────────────────────────────────────────────────────────────

#[test]
fn junit_counts_only_enforced_failures() {
    let out = create_reporter("junit", false).unwrap().generate(&sample_results()).unwrap();

    assert!(out.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n"));
    assert!(out.contains("<testsuites name=\"sitecheck\" tests=\"7\" failures=\"3\" errors=\"1\""));
    assert!(out.contains("<testsuite name=\"content/single-h1\" tests=\"2\" failures=\"2\" errors=\"0\""));
    assert!(out.contains("<testsuite name=\"a11y/decorative-alt\" tests=\"1\" failures=\"0\""));
    assert!(out.contains("<system-out>warning: &lt;img src=&quot;rule.png&quot;&gt;"));
    assert!(out.contains("<skipped message=\"No applicable documents\" />"));
    assert!(out.contains("<error message=\"[TOOL_MISSING] htmltest command not found\" />"));
    assert!(out.contains("name=\"writing/a&amp;b.html\""));
    assert!(out.contains("<failure message=\"html5validator found errors:\" type=\"error\">"));
    assert!(out.trim_end().ends_with("</testsuites>"));
}

#[test]
fn junit_strips_control_characters_from_tool_output() {
    let mut sink = ViolationSink::new("external/html-validator", Severity::Error);
    sink.push("public", None, "html5validator found errors:\n\x1b[31mindex.html:3:\x1b[0m\tstray end tag\x07");
    let results = vec![CheckResult::fail("external/html-validator", 0, sink.into_violations())];
    let out = create_reporter("junit", false).unwrap().generate(&results).unwrap();

    assert!(!out.chars().any(|c| c < ' ' && !matches!(c, '\t' | '\n' | '\r')));
    assert!(out.contains("[31mindex.html:3:[0m\tstray end tag"));
}
