use thiserror::Error;

use crate::params::ParameterGroup;

/// Core error type shared across silhouette crates.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// A value outside the group's enumeration.
    #[error("unknown value '{value}' for parameter group '{group}'")]
    UnknownParameterValue { group: ParameterGroup, value: String },
    /// A parameter group name that does not exist.
    #[error("unknown parameter group: {0}")]
    UnknownGroup(String),
    /// The forbidden-combination set violates internal invariants.
    #[error("invalid constraint: {0}")]
    InvalidConstraint(String),
}

/// Convenience alias for results returned by silhouette crates.
pub type Result<T> = std::result::Result<T, Error>;
