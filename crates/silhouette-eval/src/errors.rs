use thiserror::Error;

/// Errors emitted by stats displays.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DisplayError {
    #[error("charting unavailable: {0}")]
    ChartingUnavailable(String),
}
