//! SPDK RPC tool invocation
//!
//! The poll loop talks to the external tool through the [`StatSource`]
//! trait so tests can substitute a mock. The production implementation
//! shells out to SPDK's `rpc.py` and captures stdout, with each invocation
//! bounded by a timeout so a hung tool cannot stall the loop forever.

use crate::error::RpcError;
use async_trait::async_trait;
use std::path::PathBuf;
use std::time::Duration;
use tokio::process::Command;

/// Default bound on a single RPC invocation.
pub const DEFAULT_RPC_TIMEOUT: Duration = Duration::from_secs(30);

/// Source of raw statistics documents.
#[async_trait]
pub trait StatSource: Send + Sync {
    /// Fetch the per-bdev I/O statistics document.
    async fn fetch_iostat(&self) -> Result<Vec<u8>, RpcError>;

    /// Fetch the cache-tier statistics document for the configured
    /// cache instance.
    async fn fetch_cache_stats(&self) -> Result<Vec<u8>, RpcError>;
}

/// [`StatSource`] backed by the SPDK `rpc.py` command-line tool.
pub struct SpdkRpc {
    rpc_path: PathBuf,
    cache_instance: String,
    timeout: Duration,
}

impl SpdkRpc {
    pub fn new(rpc_path: impl Into<PathBuf>, cache_instance: impl Into<String>) -> Self {
        Self {
            rpc_path: rpc_path.into(),
            cache_instance: cache_instance.into(),
            timeout: DEFAULT_RPC_TIMEOUT,
        }
    }

    /// Override the per-invocation timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    async fn run(&self, args: &[&str]) -> Result<Vec<u8>, RpcError> {
        let command = format!("{} {}", self.rpc_path.display(), args.join(" "));

        let output = tokio::time::timeout(
            self.timeout,
            Command::new(&self.rpc_path).args(args).output(),
        )
        .await
        .map_err(|_| RpcError::Timeout {
            command: command.clone(),
            timeout: self.timeout,
        })?
        .map_err(|source| RpcError::Spawn {
            command: command.clone(),
            source,
        })?;

        if !output.status.success() {
            return Err(RpcError::NonZeroExit {
                command,
                status: output.status,
            });
        }

        Ok(output.stdout)
    }
}

#[async_trait]
impl StatSource for SpdkRpc {
    async fn fetch_iostat(&self) -> Result<Vec<u8>, RpcError> {
        self.run(&["get_bdevs_iostat"]).await
    }

    async fn fetch_cache_stats(&self) -> Result<Vec<u8>, RpcError> {
        self.run(&["get_ocf_stats", &self.cache_instance]).await
    }
}
