use std::collections::HashSet;
use std::time::Instant;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, warn};

use silhouette_core::{
    Candidate, CandidateKey, ConstraintSet, all_candidates, space_size, validate_constraints,
};

use crate::errors::GenerationError;
use crate::model::{
    Completion, GenerateOptions, GenerationIssue, GenerationReport, RejectionReason,
};
use crate::mutation::mutate;

/// Result of a generation request.
#[derive(Debug, Clone)]
pub struct GenerationResult {
    /// Accepted candidates in acceptance order.
    pub candidates: Vec<Candidate>,
    pub report: GenerationReport,
}

impl GenerationResult {
    /// Number of candidates missing from the target, if any.
    pub fn shortfall(&self) -> Option<usize> {
        match self.report.completion {
            Completion::Complete => None,
            Completion::Partial { produced, target } => Some(target - produced),
        }
    }
}

/// Entry point for generating candidate batches from a base selection.
#[derive(Debug, Clone)]
pub struct GenerationEngine {
    options: GenerateOptions,
    constraints: ConstraintSet,
}

impl GenerationEngine {
    /// Engine using the built-in forbidden combinations.
    pub fn new(options: GenerateOptions) -> Result<Self, GenerationError> {
        Self::with_constraints(options, ConstraintSet::default())
    }

    pub fn with_constraints(
        options: GenerateOptions,
        constraints: ConstraintSet,
    ) -> Result<Self, GenerationError> {
        validate_options(&options)?;
        validate_constraints(&constraints)?;
        Ok(Self {
            options,
            constraints,
        })
    }

    pub fn options(&self) -> &GenerateOptions {
        &self.options
    }

    pub fn constraints(&self) -> &ConstraintSet {
        &self.constraints
    }

    /// Generate up to `target` distinct valid candidates around `base`.
    ///
    /// The seed fully determines the output for a given base and options.
    pub fn run(&self, base: &Candidate, seed: u64) -> GenerationResult {
        self.run_with_id(uuid::Uuid::new_v4().to_string(), base, seed)
    }

    /// Same as [`run`](Self::run) with a caller-chosen run id.
    pub fn run_with_id(&self, run_id: String, base: &Candidate, seed: u64) -> GenerationResult {
        let start = Instant::now();
        let mut report = GenerationReport::new(run_id.clone(), seed, *base, &self.options);
        let mut state = BatchState::default();

        info!(
            run_id = %run_id,
            base = %base.key(),
            seed,
            target = self.options.target,
            max_attempts = self.options.max_attempts,
            "generation started"
        );

        if let Some(combo) = self.constraints.first_violation(base) {
            report.base_valid = false;
            let message = format!(
                "base selection {} matches forbidden combination ({})",
                base.key(),
                combo.describe()
            );
            warn!(run_id = %run_id, combo = %combo.describe(), "base selection is forbidden");
            report.record_warning(GenerationIssue::warning("base_forbidden", message));
        }

        self.sample(base, seed, &mut state, &mut report);
        info!(
            run_id = %run_id,
            valid = state.candidates.len(),
            attempts = report.counters.sampled,
            "sampling phase finished"
        );

        if state.candidates.len() < self.options.target {
            report.fallback_used = true;
            self.sweep(&mut state, &mut report);
            info!(
                run_id = %run_id,
                valid = state.candidates.len(),
                attempts = report.counters.exhaustive,
                "exhaustive phase finished"
            );
        }

        let produced = state.candidates.len();
        if produced < self.options.target {
            report.completion = Completion::Partial {
                produced,
                target: self.options.target,
            };
            let message = format!(
                "produced {produced} of {} silhouettes; the constrained space is exhausted",
                self.options.target
            );
            warn!(run_id = %run_id, produced, target = self.options.target, "insufficient valid candidates");
            report.record_warning(GenerationIssue::warning(
                "insufficient_valid_candidates",
                message,
            ));
        }

        debug_assert_eq!(
            report.counters.rejected,
            report.counters.attempts - report.counters.valid
        );
        report.duration_ms = start.elapsed().as_millis() as u64;

        info!(
            run_id = %run_id,
            valid = report.counters.valid,
            rejected = report.counters.rejected,
            attempts = report.counters.attempts,
            duration_ms = report.duration_ms,
            "generation completed"
        );

        GenerationResult {
            candidates: state.candidates,
            report,
        }
    }

    /// Bounded rejection sampling; the first attempt is the base itself.
    fn sample(
        &self,
        base: &Candidate,
        seed: u64,
        state: &mut BatchState,
        report: &mut GenerationReport,
    ) {
        let max_attempts = self.options.max_attempts;
        let mut attempt = 0_u32;

        while state.candidates.len() < self.options.target && attempt < max_attempts {
            let candidate = if attempt == 0 {
                *base
            } else {
                let mut rng = ChaCha8Rng::seed_from_u64(hash_attempt_seed(seed, attempt));
                mutate(
                    base,
                    attempt,
                    max_attempts,
                    &self.options.mutation,
                    &mut rng,
                )
            };
            attempt += 1;

            report.record_attempt(false);
            state.attempted.insert(candidate.key());
            self.consider(candidate, state, report);
        }
    }

    /// Deterministic sweep of the full space, skipping anything already tried.
    fn sweep(&self, state: &mut BatchState, report: &mut GenerationReport) {
        for candidate in all_candidates() {
            if state.candidates.len() >= self.options.target {
                break;
            }

            let key = candidate.key();
            if state.seen.contains(&key) || !state.attempted.insert(key) {
                continue;
            }

            report.record_attempt(true);
            self.consider(candidate, state, report);
        }
    }

    fn consider(&self, candidate: Candidate, state: &mut BatchState, report: &mut GenerationReport) {
        if let Some(combo) = self.constraints.first_violation(&candidate) {
            debug!(candidate = %candidate.key(), combo = %combo.describe(), "candidate forbidden");
            report.record_rejection(RejectionReason::Forbidden, Some(combo));
            return;
        }

        let key = candidate.key();
        if !state.seen.insert(key) {
            debug!(candidate = %candidate.key(), "candidate duplicate");
            report.record_rejection(RejectionReason::Duplicate, None);
            return;
        }

        state.candidates.push(candidate);
        report.record_accept();
    }
}

#[derive(Default)]
struct BatchState {
    candidates: Vec<Candidate>,
    seen: HashSet<CandidateKey>,
    attempted: HashSet<CandidateKey>,
}

fn validate_options(options: &GenerateOptions) -> Result<(), GenerationError> {
    if options.target == 0 {
        return Err(GenerationError::InvalidOptions(
            "target must be > 0".to_string(),
        ));
    }
    if options.target > space_size() {
        return Err(GenerationError::InvalidOptions(format!(
            "target must be <= {} (size of the parameter space)",
            space_size()
        )));
    }
    if options.max_attempts == 0 {
        return Err(GenerationError::InvalidOptions(
            "max_attempts must be > 0".to_string(),
        ));
    }

    let rates = &options.mutation;
    for (name, value) in [
        ("group_rate", rates.group_rate),
        ("waist_rate", rates.waist_rate),
        ("waist_ramp", rates.waist_ramp),
    ] {
        if !(0.0..=1.0).contains(&value) {
            return Err(GenerationError::InvalidOptions(format!(
                "mutation.{name} must be within [0, 1]"
            )));
        }
    }

    Ok(())
}

fn hash_attempt_seed(seed: u64, attempt: u32) -> u64 {
    let mut hash = seed ^ u64::from(attempt).wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= 0xcbf29ce484222325;
    hash = hash.wrapping_mul(0x100000001b3);
    hash
}
