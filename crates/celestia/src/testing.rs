//! In-memory Celestia node for tests.
//!
//! Available behind the `test-util` feature or in `#[cfg(test)]` within this
//! crate. Blobs land at consecutive heights starting from 1 and are kept in
//! memory for later `get_blob` calls.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use celestia_types::blob::Commitment;
use celestia_types::nmt::Namespace;
use celestia_types::Blob;
use tokio::sync::Mutex;

use crate::node::BlobNode;
use crate::{CelestiaError, Result};

/// A fake node that stores blobs in memory.
#[derive(Default)]
pub struct MemoryNode {
    /// Included blobs, keyed by height.
    blocks: Mutex<BTreeMap<u64, Vec<Blob>>>,
    /// Report height 0 for every submit.
    zero_height: bool,
    /// Fail every submit with a transport-style error.
    fail_submits: bool,
    submit_calls: AtomicUsize,
    get_calls: AtomicUsize,
}

impl MemoryNode {
    /// Create an empty node.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every submit report inclusion at height 0.
    #[must_use]
    pub fn with_zero_height(mut self) -> Self {
        self.zero_height = true;
        self
    }

    /// Make every submit fail.
    #[must_use]
    pub fn with_failing_submits(mut self) -> Self {
        self.fail_submits = true;
        self
    }

    /// Number of `submit_blob` calls received.
    pub fn submit_calls(&self) -> usize {
        self.submit_calls.load(Ordering::SeqCst)
    }

    /// Number of `get_blob` calls received.
    pub fn get_calls(&self) -> usize {
        self.get_calls.load(Ordering::SeqCst)
    }

    /// Total calls that would have crossed the network.
    pub fn network_calls(&self) -> usize {
        self.submit_calls() + self.get_calls()
    }

    /// Highest height with an included blob, 0 if none.
    pub async fn head(&self) -> u64 {
        self.blocks.lock().await.keys().next_back().copied().unwrap_or(0)
    }
}

#[async_trait::async_trait]
impl BlobNode for MemoryNode {
    async fn submit_blob(&self, blob: &Blob) -> Result<u64> {
        self.submit_calls.fetch_add(1, Ordering::SeqCst);

        if self.fail_submits {
            return Err(CelestiaError::SubmissionFailed("connection refused".into()));
        }

        let mut blocks = self.blocks.lock().await;
        let height = blocks.keys().next_back().copied().unwrap_or(0) + 1;
        blocks.insert(height, vec![blob.clone()]);

        if self.zero_height {
            return Ok(0);
        }
        Ok(height)
    }

    async fn get_blob(
        &self,
        height: u64,
        namespace: Namespace,
        commitment: Commitment,
    ) -> Result<Blob> {
        self.get_calls.fetch_add(1, Ordering::SeqCst);

        let blocks = self.blocks.lock().await;
        let head = blocks.keys().next_back().copied().unwrap_or(0);
        if height > head {
            return Err(CelestiaError::RetrievalFailed(format!(
                "height {height} is beyond the local head {head}"
            )));
        }

        blocks
            .get(&height)
            .and_then(|blobs| {
                blobs.iter().find(|b| b.namespace == namespace && b.commitment == commitment)
            })
            .cloned()
            .ok_or(CelestiaError::BlobNotFound { height })
    }
}
