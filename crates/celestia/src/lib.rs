//! Celestia DA module.
//!
//! This crate submits payloads as namespaced blobs to a Celestia node and
//! reads them back by commitment and height. Commitments and namespace
//! encoding come from `celestia-types`; the node is reached through
//! `celestia-rpc`.

#![warn(missing_docs)]

mod client;
mod error;
pub mod hex_codec;
mod node;
#[cfg(any(test, feature = "test-util"))]
pub mod testing;

pub use client::{commitment_bytes, CelestiaDa, COMMITMENT_LEN};
pub use error::CelestiaError;
pub use node::{BlobNode, RpcNode};

/// Result type for Celestia operations.
pub type Result<T> = std::result::Result<T, CelestiaError>;

/// Outcome of a successful blob submission.
///
/// The commitment only identifies the blob together with the height and the
/// namespace it was submitted under; callers must keep that pairing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlobSubmission {
    /// Celestia block height where the blob was included.
    pub height: u64,

    /// Blob commitment.
    pub commitment: Vec<u8>,
}

impl BlobSubmission {
    /// Commitment as lowercase hex.
    #[must_use]
    pub fn commitment_hex(&self) -> String {
        hex_codec::encode_commitment(&self.commitment)
    }
}
