use thiserror::Error;

/// Errors emitted when configuring the generation engine.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("invalid options: {0}")]
    InvalidOptions(String),
    #[error(transparent)]
    Core(#[from] silhouette_core::Error),
}
