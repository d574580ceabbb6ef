//! Celestia error types.

/// Errors that can occur in the Celestia module.
#[derive(Debug, thiserror::Error)]
pub enum CelestiaError {
    /// Invalid configuration or caller input (namespace, commitment, height).
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Failed to connect to the Celestia node.
    #[error("failed to connect to Celestia: {0}")]
    ConnectionFailed(String),

    /// Failed to submit blob, or the node returned an unusable height.
    #[error("submission failed: {0}")]
    SubmissionFailed(String),

    /// Blob not found.
    #[error("blob not found at height {height}")]
    BlobNotFound {
        /// Celestia height.
        height: u64,
    },

    /// Failed to fetch or decode a blob.
    #[error("retrieval failed: {0}")]
    RetrievalFailed(String),
}

impl CelestiaError {
    /// Whether this error happened while fetching a blob.
    #[must_use]
    pub fn is_retrieval(&self) -> bool {
        matches!(self, Self::BlobNotFound { .. } | Self::RetrievalFailed(_))
    }
}
