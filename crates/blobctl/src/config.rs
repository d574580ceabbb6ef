//! Configuration resolution.

use std::path::Path;

use blobctl_types::{ConfigError, DaConfig};

/// Values given on the command line; `None` means "not given".
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    /// RPC endpoint.
    pub rpc: Option<String>,
    /// Hex namespace id.
    pub namespace_id: Option<String>,
    /// Bearer token.
    pub auth_token: Option<String>,
}

/// Build the adapter config: defaults, then the optional TOML file, then flags.
///
/// # Errors
///
/// Returns an error if the config file cannot be read or parsed.
pub fn resolve(path: Option<&Path>, overrides: Overrides) -> Result<DaConfig, ConfigError> {
    let base = match path {
        Some(path) => {
            tracing::debug!(path = %path.display(), "Loading configuration");
            DaConfig::load(path)?
        }
        None => DaConfig::default(),
    };

    Ok(DaConfig {
        rpc: overrides.rpc.unwrap_or(base.rpc),
        namespace_id: overrides.namespace_id.unwrap_or(base.namespace_id),
        auth_token: overrides.auth_token.unwrap_or(base.auth_token),
    })
}
