use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("preference file is not a JSON object: {0}")]
    Corrupt(std::path::PathBuf),

    #[error("failed to persist {path}: {source}")]
    Persist {
        path: std::path::PathBuf,
        source: std::io::Error,
    },
}
