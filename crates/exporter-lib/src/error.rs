//! Error types for external tool invocation
//!
//! Malformed responses are deliberately not represented here: the decoder
//! absorbs them into zero-valued samples. The only recoverable error class
//! the poll loop sees is a failed RPC invocation, which skips that data
//! source until the next scheduled cycle.

use std::time::Duration;
use thiserror::Error;

/// Failure to obtain output from the SPDK RPC tool.
#[derive(Debug, Error)]
pub enum RpcError {
    /// The tool process could not be spawned or its output not captured.
    #[error("failed to run {command}: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The tool ran but exited non-zero.
    #[error("{command} exited with {status}")]
    NonZeroExit {
        command: String,
        status: std::process::ExitStatus,
    },

    /// The tool did not finish within the invocation timeout.
    #[error("{command} timed out after {timeout:?}")]
    Timeout { command: String, timeout: Duration },
}
