use serde::{Deserialize, Serialize};

use silhouette_generate::{GenerationReport, MAX_ATTEMPTS};

/// Stats contract version for `stats.json`.
pub const STATS_VERSION: &str = "0.1";

/// Three-way split of the attempt budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsSummary {
    pub valid: u64,
    pub rejected: u64,
    /// Unused part of the attempt budget, never negative.
    pub remaining: u64,
}

/// Summarize counters against the default attempt budget.
pub fn summarize(attempts: u64, valid: u64, rejected: u64) -> StatsSummary {
    summarize_with_budget(attempts, valid, rejected, MAX_ATTEMPTS)
}

pub fn summarize_with_budget(
    attempts: u64,
    valid: u64,
    rejected: u64,
    max_attempts: u32,
) -> StatsSummary {
    StatsSummary {
        valid,
        rejected,
        remaining: u64::from(max_attempts).saturating_sub(attempts),
    }
}

/// Summary plus the context needed to title a chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStats {
    pub stats_version: String,
    pub run_id: String,
    pub summary: StatsSummary,
    pub target: usize,
    pub attempts: u64,
    pub max_attempts: u32,
}

impl RunStats {
    pub fn from_report(report: &GenerationReport) -> Self {
        let counters = &report.counters;
        Self {
            stats_version: STATS_VERSION.to_string(),
            run_id: report.run_id.clone(),
            summary: summarize_with_budget(
                counters.attempts,
                counters.valid,
                counters.rejected,
                report.max_attempts,
            ),
            target: report.target,
            attempts: counters.attempts,
            max_attempts: report.max_attempts,
        }
    }

    /// `Analysis: 10/10 valid · 14/60 attempts`
    pub fn title(&self) -> String {
        format!(
            "Analysis: {}/{} valid · {}/{} attempts",
            self.summary.valid, self.target, self.attempts, self.max_attempts
        )
    }

    /// `Stats: 10 valid, 4 rejected, 46 attempts remaining.`
    pub fn caption(&self) -> String {
        format!(
            "Stats: {} valid, {} rejected, {} attempts remaining.",
            self.summary.valid, self.summary.rejected, self.summary.remaining
        )
    }
}
