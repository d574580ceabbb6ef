//! Node capability and its JSON-RPC implementation.

use celestia_rpc::{BlobClient, Client as RpcClient, HeaderClient, TxConfig};
use celestia_types::blob::Commitment;
use celestia_types::nmt::Namespace;
use celestia_types::Blob;

use crate::{CelestiaError, Result};

/// The blob operations the adapter needs from a Celestia node.
///
/// Kept narrow so tests can swap in an in-memory node.
#[async_trait::async_trait]
pub trait BlobNode: Send + Sync {
    /// Submit a blob and return the height it was included at.
    ///
    /// # Errors
    ///
    /// Returns `SubmissionFailed` on transport or node errors.
    async fn submit_blob(&self, blob: &Blob) -> Result<u64>;

    /// Fetch the blob identified by `commitment` at `height` in `namespace`.
    ///
    /// # Errors
    ///
    /// Returns `BlobNotFound` if the node has no such blob, otherwise
    /// `RetrievalFailed`.
    async fn get_blob(&self, height: u64, namespace: Namespace, commitment: Commitment)
        -> Result<Blob>;
}

/// A Celestia node reached over JSON-RPC.
pub struct RpcNode {
    client: RpcClient,
}

impl RpcNode {
    /// Connect to the node at `url` and check that it answers.
    ///
    /// An empty `auth_token` connects without an `Authorization` header.
    /// HTTP clients are lazy, so the node's local head is fetched once to
    /// surface unreachable nodes and rejected tokens here.
    ///
    /// # Errors
    ///
    /// Returns `ConnectionFailed` if the client cannot be built or the node
    /// does not answer.
    pub async fn connect(url: &str, auth_token: &str) -> Result<Self> {
        let auth = if auth_token.is_empty() { None } else { Some(auth_token) };
        let client = RpcClient::new(url, auth, None, None)
            .await
            .map_err(|e| CelestiaError::ConnectionFailed(format!("rpc client: {e}")))?;

        let head = client
            .header_local_head()
            .await
            .map_err(|e| CelestiaError::ConnectionFailed(format!("node did not answer: {e}")))?;
        tracing::debug!(url, local_head = %head.height(), "Celestia node reachable");

        Ok(Self { client })
    }
}

#[async_trait::async_trait]
impl BlobNode for RpcNode {
    async fn submit_blob(&self, blob: &Blob) -> Result<u64> {
        self.client
            .blob_submit(std::slice::from_ref(blob), TxConfig::default())
            .await
            .map_err(|e| CelestiaError::SubmissionFailed(e.to_string()))
    }

    async fn get_blob(
        &self,
        height: u64,
        namespace: Namespace,
        commitment: Commitment,
    ) -> Result<Blob> {
        self.client
            .blob_get(height, namespace, commitment)
            .await
            .map_err(|e| classify_get_error(height, &e.to_string()))
    }
}

/// Map a `blob.Get` failure message onto our error kinds.
///
/// The node reports a missing blob as a plain RPC error whose message
/// contains "not found"; there is no dedicated error code.
fn classify_get_error(height: u64, message: &str) -> CelestiaError {
    if message.contains("not found") {
        CelestiaError::BlobNotFound { height }
    } else {
        CelestiaError::RetrievalFailed(message.to_string())
    }
}
