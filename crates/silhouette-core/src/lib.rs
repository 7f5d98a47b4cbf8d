//! Core contracts for the silhouette engine.
//!
//! This crate defines the parameter enumerations, the static rule table,
//! candidates and their keys, and the forbidden-combination validator shared
//! by the generator, the renderer and the CLI.

pub mod candidate;
pub mod constraints;
pub mod error;
pub mod params;
pub mod rules;
pub mod space;
pub mod validation;

pub use candidate::{Candidate, CandidateKey, DEFAULT_CANDIDATE};
pub use constraints::{BUILTIN_CONSTRAINTS, ConstraintSet, ForbiddenCombo};
pub use error::{Error, Result};
pub use params::{Collar, Length, ParameterGroup, Shoulder, Sleeve, Waist};
pub use rules::{
    CollarRule, LengthRule, RuleEntry, ShoulderRule, SleeveRule, WaistRule, label_of, metrics_of,
    style_signature,
};
pub use space::{all_candidates, count_valid, space_size};
pub use validation::validate_constraints;

/// Current rule table contract version.
pub const RULES_VERSION: &str = "0.1";
