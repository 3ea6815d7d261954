// src/application/report.rs
//
// Run report rendering
//
// Text output mirrors what a user reads after a run: a summary block, then
// one line per record.

use crate::domain::{MatchStatus, RunReport};
use crate::error::AppResult;

const ACTION_WIDTH: usize = 14;

/// Plain-text report.
pub fn render_text(report: &RunReport) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "Collection: {} ({})\n",
        report.collection_label, report.collection_id
    ));
    out.push_str(&format!("Folder: {}\n", report.folder));
    out.push_str(&format!("Mode: {}\n", report.mode));
    out.push_str(&format!("Docs scanned: {}\n", report.summary.scanned));
    out.push_str(&format!("Matched: {}\n", report.summary.matched));
    if !report.is_dry_run() {
        out.push_str(&format!("Updated: {}\n", report.summary.updated));
        if report.summary.failed_updates > 0 {
            out.push_str(&format!("Failed: {}\n", report.summary.failed_updates));
        }
    }
    out.push_str(&"-".repeat(40));
    out.push('\n');

    for result in &report.results {
        let action = result.action_label(report.mode, report.promote_first);
        out.push_str(&format!("{:<width$} | {}", action, result.record_name, width = ACTION_WIDTH));
        if let Some(path) = &result.resolved_path {
            out.push_str(&format!(" → {}", path));
        }
        out.push('\n');
        if result.status == MatchStatus::NoMatch {
            out.push_str(&format!("    candidates: {}\n", result.candidates.join(", ")));
        }
    }

    out
}

/// Pretty JSON report.
pub fn render_json(report: &RunReport) -> AppResult<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CandidatePath, MatchResult, MatchTier, RunMode};
    use uuid::Uuid;

    fn report(mode: RunMode, promote_first: bool) -> RunReport {
        let results = vec![
            MatchResult::matched(
                Uuid::new_v4(),
                "Goblin Warrior".into(),
                CandidatePath::new("art/goblin-warrior.webp"),
                MatchTier::Slug,
                false,
            ),
            MatchResult::matched(
                Uuid::new_v4(),
                "Dire Wolf".into(),
                CandidatePath::new("art/dire-wolf.png"),
                MatchTier::Slug,
                true,
            ),
            MatchResult::no_match(
                Uuid::new_v4(),
                "Unknown Beast".into(),
                vec!["unknown-beast".into(), "unknownbeast".into()],
            ),
            MatchResult::skipped(Uuid::new_v4(), "Journal".into()),
        ];
        RunReport::new(Uuid::nil(), "Adversaries".into(), "art".into(), mode, promote_first, results)
    }

    #[test]
    fn test_dry_run_text() {
        let text = render_text(&report(RunMode::DryRun, false));

        assert!(text.contains("Mode: Dry Run\n"));
        assert!(text.contains("Docs scanned: 4\n"));
        assert!(text.contains("Matched: 1\n"));
        assert!(!text.contains("Updated:"));
        assert!(text.contains("would update   | Goblin Warrior → art/goblin-warrior.webp\n"));
        assert!(text.contains("already set    | Dire Wolf → art/dire-wolf.png\n"));
        assert!(text.contains("no match       | Unknown Beast\n    candidates: unknown-beast, unknownbeast\n"));
        assert!(text.contains("skipped (no img field) | Journal\n"));
    }

    #[test]
    fn test_applied_text_shows_updates() {
        let mut report = report(RunMode::Applied, true);
        report.summary.updated = 1;

        let text = render_text(&report);
        assert!(text.contains("Mode: Applied\n"));
        assert!(text.contains("Updated: 1\n"));
        assert!(text.contains("import+update  | Goblin Warrior"));
    }

    #[test]
    fn test_json_render() {
        let json = render_json(&report(RunMode::DryRun, false)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["mode"], "dry_run");
        assert_eq!(value["results"][0]["status"], "matched_new");
        assert_eq!(value["results"][0]["resolved_path"], "art/goblin-warrior.webp");
        assert_eq!(value["summary"]["scanned"], 4);
    }
}
