//! Command-line interface.

use std::future::Future;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use blobctl_celestia::hex_codec::{decode_commitment, encode_commitment};
use blobctl_celestia::{BlobNode, CelestiaDa, CelestiaError};
use blobctl_types::{ConfigError, DaConfig};
use clap::{Parser, ValueEnum};
use eyre::Result;

use crate::config::{self, Overrides};
use crate::files;

/// Submit a file as a blob to a Celestia node, or read one back.
#[derive(Debug, Parser)]
#[command(name = "blobctl")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Mode of operation: submit or read.
    #[arg(long, default_value = "submit")]
    mode: String,

    /// Path to the file (input for submit, output for read).
    #[arg(long)]
    file: Option<PathBuf>,

    /// Hex commitment of the blob to read.
    #[arg(long)]
    commitment: Option<String>,

    /// Target namespace (hex) [default: 000008e5f679bf7116cb].
    #[arg(long)]
    namespace: Option<String>,

    /// Auth token for the node.
    #[arg(long, env = "CELESTIA_NODE_AUTH_TOKEN", hide_env_values = true)]
    auth: Option<String>,

    /// Celestia height to fetch a blob from.
    #[arg(long, default_value_t = 0)]
    height: u64,

    /// Celestia node RPC endpoint [default: http://localhost:26658].
    #[arg(long, env = "CELESTIA_NODE_RPC")]
    rpc: Option<String>,

    /// TOML file with `rpc`, `namespace-id` and `auth-token` defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Exit with a non-zero status when the operation fails.
    #[arg(long)]
    fail_on_error: bool,

    /// Log level (trace, debug, info, warn, error). `RUST_LOG` takes precedence.
    #[arg(long, default_value = "warn")]
    log_level: String,
}

/// Operation selected by `--mode`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Submit the file as a blob.
    Submit,
    /// Read a blob into the file.
    Read,
}

/// A fully validated request, ready to run against a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Adapter configuration.
    pub config: DaConfig,
    /// Input or output file.
    pub file: PathBuf,
    /// What to do.
    pub operation: Operation,
}

/// Operation with its mode-specific inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// Submit the file contents.
    Submit,
    /// Fetch a blob and write it to the file.
    Read {
        /// Decoded commitment.
        commitment: Vec<u8>,
        /// Inclusion height, never 0.
        height: u64,
    },
}

/// A failed invocation. `Display` is the line printed for the user.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// No auth token from flag, env or config file.
    #[error("Please supply auth token")]
    MissingAuth,

    /// No `--file`.
    #[error("Please provide a filename using --file=<filename>")]
    MissingFile,

    /// `--mode` is neither `submit` nor `read`.
    #[error("Invalid mode. Please specify either 'read' or 'submit'.")]
    InvalidMode(String),

    /// Read mode without `--commitment`.
    #[error("Please provide commitment using --commitment=<commitment>")]
    MissingCommitment,

    /// Read mode without a non-zero `--height`.
    #[error("Please provide height using --height=<height>")]
    MissingHeight,

    /// `--commitment` is not hex.
    #[error("Error decoding hex string for commitment: {0}")]
    InvalidCommitment(#[source] CelestiaError),

    /// Config file could not be loaded.
    #[error("Error loading configuration: {0}")]
    Config(#[from] ConfigError),

    /// Adapter construction failed.
    #[error("Error creating Celestia client: {0}")]
    Connect(#[source] CelestiaError),

    /// Input file could not be read.
    #[error("Error reading file: {0}")]
    ReadFile(#[source] std::io::Error),

    /// Blob submission failed.
    #[error("Error submitting blob to Celestia: {0}")]
    Submit(#[source] CelestiaError),

    /// Blob retrieval failed.
    #[error("Error reading from Celestia: {0}")]
    Retrieve(#[source] CelestiaError),

    /// Output file could not be written.
    #[error("Error writing to file: {0}")]
    WriteFile(#[source] std::io::Error),

    /// Writing to stdout failed.
    #[error("Error writing output: {0}")]
    Output(#[source] std::io::Error),
}

impl Cli {
    /// Filter directive for the log subscriber.
    #[must_use]
    pub fn log_level(&self) -> &str {
        &self.log_level
    }

    /// Execute the CLI command.
    ///
    /// Failures are printed to stdout. The exit status stays 0 unless
    /// `--fail-on-error` is set.
    ///
    /// # Errors
    ///
    /// Returns an error only if stdout itself cannot be written.
    pub async fn run(self) -> Result<ExitCode> {
        let mut stdout = std::io::stdout();
        self.run_with(CelestiaDa::connect, &mut stdout).await
    }

    /// Validate, build the client with `connect`, execute and report to `out`.
    ///
    /// `connect` is only called once every local check has passed.
    async fn run_with<N, F, Fut, W>(&self, connect: F, out: &mut W) -> Result<ExitCode>
    where
        N: BlobNode,
        F: FnOnce(DaConfig) -> Fut,
        Fut: Future<Output = blobctl_celestia::Result<CelestiaDa<N>>>,
        W: Write,
    {
        let outcome = match self.invocation() {
            Ok(invocation) => match connect(invocation.config.clone()).await {
                Ok(da) => execute(&da, &invocation, out).await,
                Err(e) => Err(CliError::Connect(e)),
            },
            Err(e) => Err(e),
        };

        let Err(err) = outcome else {
            return Ok(ExitCode::SUCCESS);
        };

        tracing::debug!(error = ?err, "Operation failed");
        writeln!(out, "{err}")?;
        Ok(if self.fail_on_error { ExitCode::FAILURE } else { ExitCode::SUCCESS })
    }

    /// Validate flags and build the request, without touching the network.
    ///
    /// # Errors
    ///
    /// Returns the first missing or malformed input.
    pub fn invocation(&self) -> std::result::Result<Invocation, CliError> {
        let overrides = Overrides {
            rpc: self.rpc.clone(),
            namespace_id: self.namespace.clone(),
            auth_token: self.auth.clone(),
        };
        let config = config::resolve(self.config.as_deref(), overrides)?;

        if config.auth_token.is_empty() {
            return Err(CliError::MissingAuth);
        }
        let file = match &self.file {
            Some(file) if !file.as_os_str().is_empty() => file.clone(),
            _ => return Err(CliError::MissingFile),
        };

        let mode = <Mode as ValueEnum>::from_str(&self.mode, false)
            .map_err(|_| CliError::InvalidMode(self.mode.clone()))?;

        let operation = match mode {
            Mode::Submit => Operation::Submit,
            Mode::Read => {
                let commitment = match self.commitment.as_deref() {
                    Some(c) if !c.is_empty() => c,
                    _ => return Err(CliError::MissingCommitment),
                };
                if self.height == 0 {
                    return Err(CliError::MissingHeight);
                }
                let commitment = decode_commitment(commitment).map_err(CliError::InvalidCommitment)?;
                Operation::Read { commitment, height: self.height }
            }
        };

        Ok(Invocation { config, file, operation })
    }
}

/// Run a validated request against `da`, writing the report to `out`.
///
/// # Errors
///
/// Returns the failure to report to the user.
pub async fn execute<N, W>(
    da: &CelestiaDa<N>,
    invocation: &Invocation,
    out: &mut W,
) -> std::result::Result<(), CliError>
where
    N: BlobNode,
    W: Write,
{
    let file = &invocation.file;

    match &invocation.operation {
        Operation::Submit => {
            let data = files::read_payload(file).await.map_err(CliError::ReadFile)?;
            writeln!(out, "Successfully read {} bytes from {}", data.len(), file.display())
                .map_err(CliError::Output)?;

            let submission = da.submit(data).await.map_err(CliError::Submit)?;
            writeln!(out, "Successfully submitted blob to Celestia").map_err(CliError::Output)?;
            writeln!(out, "Height: {}", submission.height).map_err(CliError::Output)?;
            writeln!(out, "Commitment string: {}", submission.commitment_hex())
                .map_err(CliError::Output)?;
        }
        Operation::Read { commitment, height } => {
            let namespace = &invocation.config.namespace_id;
            let commitment_hex = encode_commitment(commitment);
            writeln!(
                out,
                "Requesting data from Celestia namespace {namespace} commitment {commitment_hex} height {height}"
            )
            .map_err(CliError::Output)?;

            // Local rejections (e.g. a commitment of the wrong length) are input errors.
            let data = da.read(commitment, *height).await.map_err(|e| {
                if e.is_retrieval() {
                    CliError::Retrieve(e)
                } else {
                    CliError::InvalidCommitment(e)
                }
            })?;
            writeln!(
                out,
                "Successfully fetched data from Celestia namespace {namespace} height {height} commitment {commitment_hex}"
            )
            .map_err(CliError::Output)?;

            files::write_payload(file, &data).await.map_err(CliError::WriteFile)?;
            writeln!(out, "File written successfully!").map_err(CliError::Output)?;
        }
    }
    Ok(())
}
