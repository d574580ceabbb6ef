//! Shared types for the Celestia blob client.
//!
//! This crate holds the configuration model used by the DA adapter and the
//! command-line front end.

#![warn(missing_docs)]

mod config;

pub use config::{ConfigError, DaConfig, DEFAULT_NAMESPACE, DEFAULT_RPC_URL};
