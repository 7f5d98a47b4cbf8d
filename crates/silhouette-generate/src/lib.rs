//! Candidate generation engine for silhouettes.
//!
//! Turns one base selection into a bounded list of distinct, rule-valid
//! candidates: seeded mutation with rejection sampling first, then a
//! deterministic sweep of the parameter space when sampling under-delivers.

pub mod engine;
pub mod errors;
pub mod model;
pub mod mutation;

pub use engine::{GenerationEngine, GenerationResult};
pub use errors::GenerationError;
pub use model::{
    Completion, GenerateOptions, GenerationCounters, GenerationIssue, GenerationReport,
    MAX_ATTEMPTS, MutationRates, RejectionReason, TARGET_SILHOUETTES,
};
