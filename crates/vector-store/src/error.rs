use thiserror::Error;

pub type Result<T> = std::result::Result<T, VectorStoreError>;

#[derive(Error, Debug)]
pub enum VectorStoreError {
    #[error("Embedding error: {0}")]
    EmbeddingError(String),

    #[error("Invalid vector dimension: expected {expected}, got {actual}")]
    InvalidDimension { expected: usize, actual: usize },

    #[error("Cosine similarity is undefined for a zero-magnitude vector")]
    ZeroMagnitude,

    #[error("Similarity '{0}' produced a non-finite score")]
    NonFiniteScore(&'static str),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("No embedding provider configured for this database")]
    MissingEmbedder,

    #[error("Embedding provider returned {actual} vectors for {expected} texts")]
    EmbeddingCountMismatch { expected: usize, actual: usize },
}

impl VectorStoreError {
    pub fn embedding(msg: impl Into<String>) -> Self {
        Self::EmbeddingError(msg.into())
    }

    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }
}
