use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Source not found: {0}")]
    SourceNotFound(String),

    #[error("Invalid interval: must be at least 1 second")]
    InvalidInterval,

    #[error("Invalid hotkey '{input}': {message}")]
    InvalidHotkey { input: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Check if this error is a "file not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Io(e) if e.kind() == std::io::ErrorKind::NotFound)
    }

    /// Check if this error means the target source does not exist
    pub fn is_source_missing(&self) -> bool {
        matches!(self, Error::SourceNotFound(_))
    }
}
