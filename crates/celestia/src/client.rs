//! Celestia DA client implementation.
//!
//! Wraps payloads into namespaced blobs, submits them through a [`BlobNode`]
//! and reads them back by commitment and height.

use blobctl_types::{ConfigError, DaConfig};
use celestia_types::blob::Commitment;
use celestia_types::nmt::Namespace;
use celestia_types::{AppVersion, Blob};

use crate::hex_codec::{decode_namespace, encode_commitment};
use crate::node::{BlobNode, RpcNode};
use crate::{BlobSubmission, CelestiaError, Result};

/// Commitment length in bytes.
pub const COMMITMENT_LEN: usize = 32;

/// Celestia DA client.
///
/// Holds one node connection and the namespace every blob is tagged with.
/// Calls are independent; nothing beyond the connection is shared between
/// them.
pub struct CelestiaDa<N = RpcNode> {
    config: DaConfig,
    namespace: Namespace,
    node: N,
}

impl CelestiaDa<RpcNode> {
    /// Validate the config and connect to the node it points at.
    ///
    /// The namespace is checked first, so a bad namespace never opens a
    /// connection.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` for a blank or malformed namespace and
    /// `ConnectionFailed` if the node cannot be reached.
    pub async fn connect(config: DaConfig) -> Result<Self> {
        let namespace = Self::parse_config(&config)?;
        let node = RpcNode::connect(&config.rpc, &config.auth_token).await?;

        tracing::info!(rpc = %config.rpc, namespace = %config.namespace_id, "Connected to Celestia node");

        Ok(Self { config, namespace, node })
    }
}

impl<N: BlobNode> CelestiaDa<N> {
    /// Build a client on top of an already connected node.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` for a blank or malformed namespace.
    pub fn with_node(config: DaConfig, node: N) -> Result<Self> {
        let namespace = Self::parse_config(&config)?;
        Ok(Self { config, namespace, node })
    }

    fn parse_config(config: &DaConfig) -> Result<Namespace> {
        config.validate().map_err(|e| match e {
            ConfigError::Invalid(reason) => CelestiaError::InvalidConfig(reason),
            other => CelestiaError::InvalidConfig(other.to_string()),
        })?;
        decode_namespace(&config.namespace_id)
    }

    /// Submit `payload` as a blob in our namespace.
    ///
    /// The commitment is computed locally before the blob is sent.
    ///
    /// # Errors
    ///
    /// Returns `SubmissionFailed` if the payload is empty, the blob cannot
    /// be built, the node rejects it, or the node reports inclusion at
    /// height 0.
    pub async fn submit(&self, payload: Vec<u8>) -> Result<BlobSubmission> {
        let size = payload.len();
        if size == 0 {
            return Err(CelestiaError::SubmissionFailed("blob payload is empty".into()));
        }
        let blob = Blob::new(self.namespace, payload, None, AppVersion::latest())
            .map_err(|e| CelestiaError::SubmissionFailed(format!("failed to create blob: {e}")))?;
        let commitment = commitment_bytes(&blob);

        tracing::debug!(
            namespace = %self.config.namespace_id,
            size,
            commitment = %encode_commitment(&commitment),
            "Submitting blob to Celestia"
        );

        let height = self.node.submit_blob(&blob).await?;
        if height == 0 {
            return Err(CelestiaError::SubmissionFailed(
                "node reported inclusion at height 0".into(),
            ));
        }

        tracing::info!(
            namespace = %self.config.namespace_id,
            height,
            commitment = %encode_commitment(&commitment),
            "Blob submitted to Celestia"
        );

        Ok(BlobSubmission { height, commitment })
    }

    /// Fetch the payload of the blob identified by `commitment` at `height`.
    ///
    /// The returned bytes are not checked against the commitment.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` for height 0 or a commitment that is not 32
    /// bytes, both without contacting the node. Node failures surface as
    /// `BlobNotFound` or `RetrievalFailed`.
    pub async fn read(&self, commitment: &[u8], height: u64) -> Result<Vec<u8>> {
        if height == 0 {
            return Err(CelestiaError::InvalidConfig("height must be non-zero".into()));
        }
        let hash: [u8; COMMITMENT_LEN] = commitment.try_into().map_err(|_| {
            CelestiaError::InvalidConfig(format!(
                "commitment must be {COMMITMENT_LEN} bytes, got {}",
                commitment.len()
            ))
        })?;
        let commitment_hex = encode_commitment(commitment);

        tracing::info!(
            namespace = %self.config.namespace_id,
            commitment = %commitment_hex,
            height,
            "Requesting data from Celestia"
        );

        let blob = self.node.get_blob(height, self.namespace, Commitment::new(hash)).await?;

        tracing::info!(
            namespace = %self.config.namespace_id,
            commitment = %commitment_hex,
            height,
            size = blob.data.len(),
            "Fetched data from Celestia"
        );

        Ok(blob.data)
    }

    /// The namespace blobs are submitted under.
    #[must_use]
    pub fn namespace(&self) -> Namespace {
        self.namespace
    }

    /// The underlying node.
    #[must_use]
    pub fn node(&self) -> &N {
        &self.node
    }
}

/// Commitment of a blob as raw bytes.
#[must_use]
pub fn commitment_bytes(blob: &Blob) -> Vec<u8> {
    let hash: [u8; COMMITMENT_LEN] = blob.commitment.into();
    hash.to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hex_codec::decode_commitment;
    use crate::testing::MemoryNode;

    fn config() -> DaConfig {
        DaConfig { auth_token: "token".into(), ..DaConfig::default() }
    }

    fn client() -> CelestiaDa<MemoryNode> {
        CelestiaDa::with_node(config(), MemoryNode::new()).unwrap()
    }

    #[tokio::test]
    async fn test_submit_then_read_roundtrip() {
        let da = client();
        let payload = b"hello celestia".to_vec();

        let submission = da.submit(payload.clone()).await.unwrap();
        assert!(submission.height > 0);
        assert_eq!(submission.commitment.len(), COMMITMENT_LEN);

        let fetched = da.read(&submission.commitment, submission.height).await.unwrap();
        assert_eq!(fetched, payload);
    }

    #[tokio::test]
    async fn test_commitment_hex_survives_read_path() {
        let da = client();
        let payload = vec![0xde, 0xad, 0xbe, 0xef];

        let submission = da.submit(payload.clone()).await.unwrap();
        let decoded = decode_commitment(&submission.commitment_hex()).unwrap();
        assert_eq!(decoded, submission.commitment);

        let fetched = da.read(&decoded, submission.height).await.unwrap();
        assert_eq!(fetched, payload);
    }

    #[tokio::test]
    async fn test_repeated_reads_return_same_bytes() {
        let da = client();
        let payload: Vec<u8> = (0..=255).collect();
        let submission = da.submit(payload.clone()).await.unwrap();

        let first = da.read(&submission.commitment, submission.height).await.unwrap();
        let second = da.read(&submission.commitment, submission.height).await.unwrap();
        assert_eq!(first, payload);
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_submits_land_at_increasing_heights() {
        let da = client();
        let a = da.submit(b"a".to_vec()).await.unwrap();
        let b = da.submit(b"b".to_vec()).await.unwrap();
        assert!(b.height > a.height);
        assert_eq!(da.node().head().await, b.height);
        assert_ne!(a.commitment, b.commitment);

        assert_eq!(da.read(&a.commitment, a.height).await.unwrap(), b"a");
        assert_eq!(da.read(&b.commitment, b.height).await.unwrap(), b"b");
    }

    #[tokio::test]
    async fn test_commitment_matches_library_computation() {
        let da = client();
        let payload = b"commitment".to_vec();
        let expected =
            Blob::new(da.namespace(), payload.clone(), None, AppVersion::latest()).unwrap();

        let submission = da.submit(payload).await.unwrap();
        assert_eq!(submission.commitment, commitment_bytes(&expected));
    }

    #[tokio::test]
    async fn test_zero_height_is_an_error() {
        let da = CelestiaDa::with_node(config(), MemoryNode::new().with_zero_height()).unwrap();

        let err = da.submit(b"payload".to_vec()).await.unwrap_err();
        assert!(matches!(err, CelestiaError::SubmissionFailed(_)));
        assert!(err.to_string().contains("height 0"));
    }

    #[tokio::test]
    async fn test_empty_payload_rejected_locally() {
        let da = client();
        let err = da.submit(Vec::new()).await.unwrap_err();
        assert!(matches!(err, CelestiaError::SubmissionFailed(_)));
        assert_eq!(da.node().network_calls(), 0);
    }

    #[tokio::test]
    async fn test_submit_transport_error() {
        let da = CelestiaDa::with_node(config(), MemoryNode::new().with_failing_submits()).unwrap();

        let err = da.submit(b"payload".to_vec()).await.unwrap_err();
        assert!(matches!(err, CelestiaError::SubmissionFailed(_)));
        assert_eq!(da.node().submit_calls(), 1);
    }

    #[test]
    fn test_empty_namespace_rejected_without_network() {
        let cfg = DaConfig { namespace_id: String::new(), ..config() };
        let node = MemoryNode::new();

        let err = CelestiaDa::with_node(cfg, node).err().unwrap();
        assert!(matches!(err, CelestiaError::InvalidConfig(_)));
    }

    #[tokio::test]
    async fn test_connect_rejects_empty_namespace_before_connecting() {
        // Unroutable endpoint: reaching the network would fail differently.
        let cfg = DaConfig {
            rpc: "http://127.0.0.1:1".into(),
            namespace_id: String::new(),
            ..config()
        };

        let err = CelestiaDa::connect(cfg).await.err().unwrap();
        assert!(matches!(err, CelestiaError::InvalidConfig(_)));
    }

    #[test]
    fn test_invalid_namespace_hex_rejected() {
        let cfg = DaConfig { namespace_id: "xyz".into(), ..config() };
        let err = CelestiaDa::with_node(cfg, MemoryNode::new()).err().unwrap();
        assert!(err.to_string().contains("invalid namespace hex"));
    }

    #[tokio::test]
    async fn test_read_height_zero_rejected_locally() {
        let da = client();
        let err = da.read(&[0u8; COMMITMENT_LEN], 0).await.unwrap_err();
        assert!(matches!(err, CelestiaError::InvalidConfig(_)));
        assert_eq!(da.node().network_calls(), 0);
    }

    #[tokio::test]
    async fn test_read_short_commitment_rejected_locally() {
        let da = client();
        let err = da.read(&[1, 2, 3], 1).await.unwrap_err();
        assert!(err.to_string().contains("got 3"));
        assert_eq!(da.node().get_calls(), 0);
    }

    #[tokio::test]
    async fn test_read_unknown_commitment_not_found() {
        let da = client();
        let submission = da.submit(b"present".to_vec()).await.unwrap();

        let err = da.read(&[7u8; COMMITMENT_LEN], submission.height).await.unwrap_err();
        assert!(matches!(err, CelestiaError::BlobNotFound { height } if height == submission.height));
    }

    #[tokio::test]
    async fn test_read_beyond_head_fails() {
        let da = client();
        let err = da.read(&[7u8; COMMITMENT_LEN], 42).await.unwrap_err();
        assert!(matches!(err, CelestiaError::RetrievalFailed(_)));
    }

    #[tokio::test]
    async fn test_read_other_namespace_not_found() {
        let node = MemoryNode::new();
        let writer = CelestiaDa::with_node(config(), node).unwrap();
        let submission = writer.submit(b"scoped".to_vec()).await.unwrap();

        // Same node, different namespace.
        let other = DaConfig { namespace_id: "0badc0de".into(), ..config() };
        let reader = CelestiaDa::with_node(other, writer.node).unwrap();

        let err = reader.read(&submission.commitment, submission.height).await.unwrap_err();
        assert!(matches!(err, CelestiaError::BlobNotFound { .. }));
    }
}
