use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use silhouette_core::{Candidate, ForbiddenCombo, ParameterGroup};

/// Number of silhouettes a generation request aims for.
pub const TARGET_SILHOUETTES: usize = 10;
/// Ceiling on randomized tries per generation request.
pub const MAX_ATTEMPTS: u32 = 60;

/// Per-group redraw probabilities used by the sampling phase.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct MutationRates {
    /// Chance that a group is redrawn on a given attempt.
    pub group_rate: f64,
    /// Waist redraw chance on the first attempt.
    pub waist_rate: f64,
    /// Extra waist chance reached at the end of the attempt budget.
    pub waist_ramp: f64,
}

impl Default for MutationRates {
    fn default() -> Self {
        Self {
            group_rate: 0.35,
            waist_rate: 0.5,
            waist_ramp: 0.4,
        }
    }
}

impl MutationRates {
    /// Redraw probability for `group` on `attempt` (0-based) out of `max_attempts`.
    pub fn rate_for(&self, group: ParameterGroup, attempt: u32, max_attempts: u32) -> f64 {
        let rate = match group {
            ParameterGroup::Waist => {
                let progress = if max_attempts == 0 {
                    0.0
                } else {
                    f64::from(attempt) / f64::from(max_attempts)
                };
                self.waist_rate + self.waist_ramp * progress
            }
            _ => self.group_rate,
        };
        rate.clamp(0.0, 1.0)
    }
}

/// Options for the generation engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct GenerateOptions {
    /// Number of distinct candidates to produce.
    pub target: usize,
    /// Maximum randomized attempts before the exhaustive sweep.
    pub max_attempts: u32,
    pub mutation: MutationRates,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            target: TARGET_SILHOUETTES,
            max_attempts: MAX_ATTEMPTS,
            mutation: MutationRates::default(),
        }
    }
}

/// Attempt accounting for one generation request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationCounters {
    /// Tries across both phases.
    pub attempts: u64,
    pub valid: u64,
    pub rejected: u64,
    /// Tries spent in the randomized phase.
    pub sampled: u64,
    /// Tries spent in the exhaustive sweep.
    pub exhaustive: u64,
}

/// Whether the request reached its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Completion {
    Complete,
    /// Best effort: the space held fewer valid, distinct candidates than requested.
    Partial { produced: usize, target: usize },
}

/// Why a tried candidate was not accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectionReason {
    Forbidden,
    Duplicate,
}

impl RejectionReason {
    pub fn as_str(self) -> &'static str {
        match self {
            RejectionReason::Forbidden => "forbidden",
            RejectionReason::Duplicate => "duplicate",
        }
    }
}

/// Structured generation issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationIssue {
    pub level: String,
    pub code: String,
    pub message: String,
}

impl GenerationIssue {
    pub fn warning(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level: "warning".to_string(),
            code: code.into(),
            message: message.into(),
        }
    }
}

/// Report for a generation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationReport {
    pub run_id: String,
    pub seed: u64,
    pub base: Candidate,
    /// False when the base selection matches a forbidden combination.
    pub base_valid: bool,
    pub target: usize,
    pub max_attempts: u32,
    pub counters: GenerationCounters,
    pub completion: Completion,
    pub fallback_used: bool,
    pub rejections_by_reason: BTreeMap<String, u64>,
    pub rejections_by_combo: BTreeMap<String, u64>,
    pub warnings: Vec<GenerationIssue>,
    pub duration_ms: u64,
}

impl GenerationReport {
    pub fn new(run_id: String, seed: u64, base: Candidate, options: &GenerateOptions) -> Self {
        Self {
            run_id,
            seed,
            base,
            base_valid: true,
            target: options.target,
            max_attempts: options.max_attempts,
            counters: GenerationCounters::default(),
            completion: Completion::Complete,
            fallback_used: false,
            rejections_by_reason: BTreeMap::new(),
            rejections_by_combo: BTreeMap::new(),
            warnings: Vec::new(),
            duration_ms: 0,
        }
    }

    pub fn record_attempt(&mut self, exhaustive: bool) {
        self.counters.attempts += 1;
        if exhaustive {
            self.counters.exhaustive += 1;
        } else {
            self.counters.sampled += 1;
        }
    }

    pub fn record_accept(&mut self) {
        self.counters.valid += 1;
    }

    pub fn record_rejection(&mut self, reason: RejectionReason, combo: Option<&ForbiddenCombo>) {
        self.counters.rejected += 1;
        *self
            .rejections_by_reason
            .entry(reason.as_str().to_string())
            .or_insert(0) += 1;
        if let Some(combo) = combo {
            *self.rejections_by_combo.entry(combo.describe()).or_insert(0) += 1;
        }
    }

    pub fn record_warning(&mut self, issue: GenerationIssue) {
        self.warnings.push(issue);
    }

    pub fn is_complete(&self) -> bool {
        self.completion == Completion::Complete
    }
}
