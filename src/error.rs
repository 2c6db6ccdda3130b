use thiserror::Error;

#[derive(Error, Debug)]
pub enum StarcheckError {
    #[error("insufficient data: need at least {needed} timestamps, got {got}")]
    InsufficientData { needed: usize, got: usize },

    #[error("degenerate input: all intervals are identical (zero variance)")]
    DegenerateInput,

    #[error("timestamps not in ascending order at index {0}")]
    UnorderedTimestamps(usize),

    #[error("snapshot file not found: {0}")]
    SnapshotNotFound(String),

    #[error("config file not found: {0}")]
    ConfigNotFound(String),

    #[error("invalid config: {0}")]
    ConfigInvalid(String),

    #[error("config parse error: {0}")]
    ConfigParse(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("toml parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, StarcheckError>;
