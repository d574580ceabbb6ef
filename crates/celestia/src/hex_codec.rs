//! Hex conversions for namespaces and commitments.

use celestia_types::nmt::Namespace;

use crate::{CelestiaError, Result};

/// Encode commitment bytes as lowercase hex.
#[must_use]
pub fn encode_commitment(commitment: &[u8]) -> String {
    hex::encode(commitment)
}

/// Decode a hex commitment string.
///
/// Length is not checked here; the adapter rejects anything that is not a
/// 32-byte digest before touching the network.
///
/// # Errors
///
/// Returns `InvalidConfig` if the string is blank or not valid hex.
pub fn decode_commitment(commitment_hex: &str) -> Result<Vec<u8>> {
    if commitment_hex.is_empty() {
        return Err(CelestiaError::InvalidConfig("commitment cannot be blank".into()));
    }
    hex::decode(commitment_hex)
        .map_err(|e| CelestiaError::InvalidConfig(format!("invalid commitment hex: {e}")))
}

/// Parse a v0 blob namespace from its hex-encoded user bytes.
///
/// # Errors
///
/// Returns `InvalidConfig` if the string is blank, not valid hex, or rejected
/// by the namespace rules (e.g. longer than 10 bytes).
pub fn decode_namespace(namespace_hex: &str) -> Result<Namespace> {
    if namespace_hex.is_empty() {
        return Err(CelestiaError::InvalidConfig("namespace id cannot be blank".into()));
    }
    let bytes = hex::decode(namespace_hex)
        .map_err(|e| CelestiaError::InvalidConfig(format!("invalid namespace hex: {e}")))?;
    Namespace::new_v0(&bytes)
        .map_err(|e| CelestiaError::InvalidConfig(format!("invalid namespace: {e}")))
}
