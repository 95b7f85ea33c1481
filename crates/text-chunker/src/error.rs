use thiserror::Error;

/// Result type for chunker operations
pub type Result<T> = std::result::Result<T, ChunkerError>;

/// Errors that can occur while loading or splitting documents
#[derive(Error, Debug)]
pub enum ChunkerError {
    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// IO error occurred
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Path is neither a `.txt` file nor a directory
    #[error("Unsupported file: {0}")]
    UnsupportedFile(String),

    /// Invalid cleanup pattern
    #[error("Pattern error: {0}")]
    PatternError(#[from] regex::Error),

    /// Empty content
    #[error("Empty content provided")]
    EmptyContent,

    /// Directory walk failed
    #[error("{0}")]
    Other(String),
}

impl ChunkerError {
    /// Create an invalid config error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Create an unsupported file error
    pub fn unsupported_file(path: impl Into<String>) -> Self {
        Self::UnsupportedFile(path.into())
    }
}
