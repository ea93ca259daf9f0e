use tardis_history::HistoryError;
use tardis_path::PathError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TardisError {
    #[error("invalid argument: {0}")]
    InvalidArgument(#[from] HistoryError),
    #[error("path resolution failed: {0}")]
    PathResolution(#[from] PathError),
    #[error("state conversion failed: {0}")]
    Serde(#[from] serde_json::Error),
}
