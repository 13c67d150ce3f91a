/*!
 * Tests for worklist building, progress lines and the run summary
 */

use std::collections::HashSet;
use std::path::PathBuf;
use std::time::Duration;
use translate_all::app_controller::{build_worklist, format_progress_line, Controller, RunSummary};
use translate_all::providers::SupportedLanguage;
use translate_all::translation::JobOutcome;

fn languages(codes: &[&str]) -> Vec<SupportedLanguage> {
    codes.iter().map(|c| SupportedLanguage::new(*c)).collect()
}

fn codes(worklist: &[SupportedLanguage]) -> Vec<&str> {
    worklist.iter().map(|l| l.code.as_str()).collect()
}

fn exclusions(codes: &[&str]) -> HashSet<String> {
    codes.iter().map(|c| c.to_string()).collect()
}

#[test]
fn test_build_worklist_should_skip_source_language() {
    let worklist = build_worklist(&languages(&["en", "fr", "de"]), "en", &HashSet::new());
    assert_eq!(codes(&worklist), vec!["fr", "de"]);
}

#[test]
fn test_build_worklist_should_skip_excluded_codes_in_any_listing_order() {
    let exclude = exclusions(&["ja", "fr", "ja"]);
    for listing in [
        vec!["en", "fr", "de", "ja", "es"],
        vec!["ja", "es", "en", "de", "fr"],
        vec!["es", "de", "fr", "ja", "en"],
    ] {
        let worklist = build_worklist(&languages(&listing), "en", &exclude);
        let mut scheduled = codes(&worklist);
        scheduled.sort();
        assert_eq!(scheduled, vec!["de", "es"]);
    }
}

#[test]
fn test_build_worklist_exclusion_should_be_case_sensitive() {
    let worklist = build_worklist(&languages(&["en", "FR", "fr"]), "en", &exclusions(&["fr"]));
    assert_eq!(codes(&worklist), vec!["FR"]);
}

#[test]
fn test_build_worklist_should_drop_duplicate_listings() {
    let worklist = build_worklist(&languages(&["fr", "de", "fr"]), "en", &HashSet::new());
    assert_eq!(codes(&worklist), vec!["fr", "de"]);
}

#[test]
fn test_build_worklist_should_keep_display_names() {
    let supported = vec![SupportedLanguage::new("fr").with_name("French"), SupportedLanguage::new("en")];
    let worklist = build_worklist(&supported, "en", &HashSet::new());
    assert_eq!(worklist[0].display_name.as_deref(), Some("French"));
}

#[test]
fn test_format_progress_line_for_success_should_include_optional_name() {
    let success = JobOutcome::Success("text".to_string());
    assert_eq!(format_progress_line(3, 10, "fr", Some("French"), &success), "[3/10] ✅ fr (French)");
    assert_eq!(format_progress_line(3, 10, "fr", None, &success), "[3/10] ✅ fr");
}

#[test]
fn test_format_progress_line_for_failure_should_include_error() {
    let failure = JobOutcome::Failure("quota exceeded".to_string());
    assert_eq!(
        format_progress_line(4, 10, "ja", Some("Japanese"), &failure),
        "[4/10] ❌ ja — quota exceeded"
    );
}

fn summary(failures: Vec<(&str, &str)>) -> RunSummary {
    let failures: Vec<(String, String)> = failures
        .into_iter()
        .map(|(code, error)| (code.to_string(), error.to_string()))
        .collect();
    RunSummary {
        source_language: "en".to_string(),
        supported_count: 4,
        total: 3,
        succeeded: 3 - failures.len(),
        failures,
        outputs: vec![PathBuf::from("out/input.fr.txt")],
    }
}

#[test]
fn test_render_summary_without_failures_should_report_success() {
    let rendered = summary(Vec::new()).render();
    assert_eq!(
        rendered,
        "Done.\nSource language: en\nSupported languages: 4; targets attempted: 3\nSucceeded: 3/3\nAll languages translated successfully."
    );
}

#[test]
fn test_render_summary_with_failures_should_list_each_failure() {
    let report = summary(vec![("de", "boom"), ("ja", "quota")]);
    assert_eq!(report.failed(), 2);
    assert!(!report.all_succeeded());

    let rendered = report.render();
    assert!(rendered.contains("Succeeded: 1/3"));
    assert!(rendered.contains("Some languages failed:\n  - de: boom\n  - ja: quota"));
    assert!(!rendered.contains("All languages translated successfully."));
}

#[test]
fn test_format_duration_should_pick_largest_unit() {
    assert_eq!(Controller::format_duration(Duration::from_millis(3042)), "3.042s");
    assert_eq!(Controller::format_duration(Duration::from_secs(125)), "2m 5s");
    assert_eq!(Controller::format_duration(Duration::from_secs(3725)), "1h 2m 5s");
}
