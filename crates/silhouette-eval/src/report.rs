use silhouette_core::{Candidate, ParameterGroup, style_signature};
use silhouette_generate::{Completion, GenerationReport};

use crate::stats::RunStats;

/// Number of accepted variants listed in the preview.
pub const PREVIEW_LIMIT: usize = 3;

/// Render a deterministic markdown report for one generation request.
pub fn render_report(
    report: &GenerationReport,
    candidates: &[Candidate],
    stats: &RunStats,
) -> String {
    let mut lines = Vec::new();

    lines.push("# Silhouette Generation Report".to_string());
    lines.push(String::new());
    lines.push("## Run summary".to_string());
    lines.push(format!("- run_id: {}", report.run_id));
    lines.push(format!("- seed: {}", report.seed));
    lines.push(format!("- target: {}", report.target));
    lines.push(format!("- max_attempts: {}", report.max_attempts));
    lines.push(format!("- status: {}", status_line(report)));
    lines.push(String::new());

    lines.push("## Base configuration".to_string());
    lines.push("| group | value | label |".to_string());
    lines.push("| --- | --- | --- |".to_string());
    let labels = report.base.labels();
    for (group, label) in ParameterGroup::ALL.iter().zip(labels) {
        lines.push(format!(
            "| {} | {} | {} |",
            group,
            report.base.value(*group),
            label
        ));
    }
    if !report.base_valid {
        lines.push(String::new());
        lines.push(
            "> The base selection matches a forbidden combination and was never accepted."
                .to_string(),
        );
    }
    lines.push(String::new());

    lines.push("## Style signature".to_string());
    lines.push(style_signature(report.base.shoulder, report.base.collar));
    lines.push(String::new());

    lines.push("## Variations".to_string());
    lines.extend(variation_preview(candidates));
    lines.push(String::new());

    lines.push("## Counters".to_string());
    lines.push("| counter | value |".to_string());
    lines.push("| --- | --- |".to_string());
    let counters = &report.counters;
    for (name, value) in [
        ("attempts", counters.attempts),
        ("sampled", counters.sampled),
        ("exhaustive", counters.exhaustive),
        ("valid", counters.valid),
        ("rejected", counters.rejected),
        ("remaining", stats.summary.remaining),
    ] {
        lines.push(format!("| {name} | {value} |"));
    }
    lines.push(String::new());

    if !report.rejections_by_reason.is_empty() {
        lines.push("## Rejections".to_string());
        for (reason, count) in &report.rejections_by_reason {
            lines.push(format!("- {reason}: {count}"));
        }
        for (combo, count) in &report.rejections_by_combo {
            lines.push(format!("  - ({combo}): {count}"));
        }
        lines.push(String::new());
    }

    if !report.warnings.is_empty() {
        lines.push("## Warnings".to_string());
        for warning in &report.warnings {
            lines.push(format!("- {}: {}", warning.code, warning.message));
        }
        lines.push(String::new());
    }

    lines.push("## Recommendations".to_string());
    lines.extend(recommendations(report));
    lines.join("\n")
}

/// `10/10 valid · 4 rejected over 14 attempts`
pub fn status_line(report: &GenerationReport) -> String {
    format!(
        "{}/{} valid · {} rejected over {} attempts",
        report.counters.valid, report.target, report.counters.rejected, report.counters.attempts
    )
}

/// The first few accepted variants, with an ellipsis when more exist.
pub fn variation_preview(candidates: &[Candidate]) -> Vec<String> {
    if candidates.is_empty() {
        return vec!["No valid variation was produced.".to_string()];
    }

    let mut lines: Vec<String> = candidates
        .iter()
        .take(PREVIEW_LIMIT)
        .enumerate()
        .map(|(index, candidate)| format!("- {}", candidate.describe(index + 1)))
        .collect();
    if candidates.len() > PREVIEW_LIMIT {
        lines.push("- ...".to_string());
    }
    lines
}

fn recommendations(report: &GenerationReport) -> Vec<String> {
    let mut lines = Vec::new();
    if !report.base_valid {
        lines.push("- pick a base outside the forbidden combinations to keep it in the batch.".to_string());
    }
    if let Completion::Partial { produced, target } = report.completion {
        lines.push(format!(
            "- only {produced} of {target} silhouettes exist under the current constraints; relax the forbidden list or lower the target."
        ));
    }
    if report.fallback_used && report.is_complete() {
        lines.push("- sampling under-delivered; raise max_attempts or the mutation rates to rely less on the sweep.".to_string());
    }
    if lines.is_empty() {
        lines.push("- batch complete; reuse the seed to reproduce these drawings.".to_string());
    }
    lines
}

#[cfg(test)]
mod tests {
    use silhouette_core::all_candidates;
    use silhouette_generate::{GenerateOptions, GenerationIssue, RejectionReason};

    use super::*;

    fn report() -> GenerationReport {
        let mut report = GenerationReport::new(
            "run-1".to_string(),
            42,
            Candidate::default(),
            &GenerateOptions::default(),
        );
        for _ in 0..12 {
            report.record_attempt(false);
        }
        for _ in 0..10 {
            report.record_accept();
        }
        report.record_rejection(RejectionReason::Duplicate, None);
        report.record_rejection(RejectionReason::Duplicate, None);
        report
    }

    #[test]
    fn preview_lists_three_and_an_ellipsis() {
        let candidates: Vec<Candidate> = all_candidates().take(5).collect();
        let lines = variation_preview(&candidates);
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("- #1 · Sharp shoulders"));
        assert_eq!(lines[3], "- ...");
    }

    #[test]
    fn preview_without_candidates_says_so() {
        assert_eq!(variation_preview(&[]), vec!["No valid variation was produced."]);
    }

    #[test]
    fn short_preview_has_no_ellipsis() {
        let candidates: Vec<Candidate> = all_candidates().take(2).collect();
        assert_eq!(variation_preview(&candidates).len(), 2);
    }

    #[test]
    fn report_is_deterministic_and_complete() {
        let report = report();
        let stats = RunStats::from_report(&report);
        let candidates: Vec<Candidate> = all_candidates().take(10).collect();

        let first = render_report(&report, &candidates, &stats);
        let second = render_report(&report, &candidates, &stats);
        assert_eq!(first, second);
        assert!(first.contains("- status: 10/10 valid · 2 rejected over 12 attempts"));
        assert!(first.contains("| collar | asym | Asymmetric collar |"));
        assert!(first.contains("Structural tension + Bold asymmetry"));
        assert!(first.contains("| remaining | 48 |"));
        assert!(first.contains("- duplicate: 2"));
        assert!(first.contains("reuse the seed"));
    }

    #[test]
    fn partial_runs_get_a_recommendation() {
        let mut report = report();
        report.completion = Completion::Partial {
            produced: 9,
            target: 10,
        };
        report.record_warning(GenerationIssue::warning(
            "insufficient_valid_candidates",
            "produced 9 of 10 silhouettes",
        ));
        let stats = RunStats::from_report(&report);
        let text = render_report(&report, &[], &stats);
        assert!(text.contains("only 9 of 10 silhouettes"));
        assert!(text.contains("- insufficient_valid_candidates: produced 9 of 10 silhouettes"));
        assert!(text.contains("No valid variation was produced."));
    }
}
