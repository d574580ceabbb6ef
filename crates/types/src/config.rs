//! Configuration types.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Namespace used when none is configured (hex-encoded, v0 user bytes).
pub const DEFAULT_NAMESPACE: &str = "000008e5f679bf7116cb";

/// RPC endpoint of a locally running Celestia node.
pub const DEFAULT_RPC_URL: &str = "http://localhost:26658";

/// Celestia DA client configuration.
///
/// Immutable once handed to the adapter. Every field can come from a TOML
/// file and be overridden on the command line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct DaConfig {
    /// Celestia node JSON-RPC endpoint (e.g., "http://localhost:26658").
    #[serde(default = "default_rpc")]
    pub rpc: String,

    /// Namespace for submitted blobs (hex-encoded, max 10 bytes).
    /// Left-padded to Celestia's v0 namespace format.
    #[serde(default = "default_namespace_id")]
    pub namespace_id: String,

    /// Bearer token for the node's RPC (empty string if not set).
    #[serde(default)]
    pub auth_token: String,
}

fn default_rpc() -> String {
    DEFAULT_RPC_URL.to_string()
}

fn default_namespace_id() -> String {
    DEFAULT_NAMESPACE.to_string()
}

impl Default for DaConfig {
    fn default() -> Self {
        Self { rpc: default_rpc(), namespace_id: default_namespace_id(), auth_token: String::new() }
    }
}

impl DaConfig {
    /// Load configuration from a TOML file.
    ///
    /// Missing keys fall back to their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        toml::from_str(&content).map_err(ConfigError::Parse)
    }

    /// Validate the configuration.
    ///
    /// Only checks presence; hex and namespace rules are enforced where the
    /// namespace is decoded.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first blank field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rpc.is_empty() {
            return Err(ConfigError::Invalid("rpc endpoint cannot be blank".into()));
        }
        if self.namespace_id.is_empty() {
            return Err(ConfigError::Invalid("namespace id cannot be blank".into()));
        }
        Ok(())
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error in config file.
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    /// A field failed validation.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}
