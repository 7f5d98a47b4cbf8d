use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExportError {
    #[error("nothing to export: generate silhouettes before building a lookbook")]
    EmptyExportTarget,
    #[error("export unavailable: {0}")]
    ExportUnavailable(String),
}
