use thiserror::Error;

#[derive(Debug, Error)]
pub enum GalleryError {
    #[error("failed to fetch {path}: {reason}")]
    Fetch { path: String, reason: String },

    #[error("fetching {path} returned status {status}")]
    Status { path: String, status: u16 },

    #[error("fetching {path} timed out after {after_ms}ms")]
    Timeout { path: String, after_ms: u32 },

    #[error("store access for key `{key}` failed: {reason}")]
    Store { key: String, reason: String },

    #[error("failed to serialize prompts: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("clipboard write failed: {0}")]
    Clipboard(String),

    #[error("no prompt with source id `{0}`")]
    UnknownRecord(String),

    #[error("a prompt with source id `{0}` already exists")]
    DuplicateId(String),

    #[error("invalid prompt: {0}")]
    InvalidDraft(&'static str),
}

pub type Result<T, E = GalleryError> = std::result::Result<T, E>;
