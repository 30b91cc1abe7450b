//! Exporter configuration, parsed from command-line flags

use clap::Parser;
use std::time::Duration;

/// Prometheus exporter for SPDK bdev I/O and OCF cache statistics
#[derive(Debug, Parser)]
#[command(name = "spdk-exporter")]
#[command(author, version, about, long_about = None)]
pub struct ExporterConfig {
    /// The port number to provide metrics on
    #[arg(long, env = "SPDK_EXPORTER_PORT", default_value_t = 2113)]
    pub port: u16,

    /// The number of seconds to sleep in between metric collections
    #[arg(long, env = "SPDK_EXPORTER_SLEEP", default_value_t = 1)]
    pub sleep: u64,

    /// Turns on diagnostic logging
    #[arg(long)]
    pub log: bool,

    /// Diagnostic log file location
    #[arg(long, default_value = "/tmp/spdk_exporter.out")]
    pub logfile: String,

    /// Path to the SPDK rpc.py tool
    #[arg(long, env = "SPDK_RPC_PATH", default_value = "/root/spdk/scripts/rpc.py")]
    pub rpc_path: String,

    /// Name of the OCF cache instance to query
    #[arg(long, default_value = "Cache1")]
    pub cache_instance: String,

    /// Timeout in seconds for a single RPC invocation
    #[arg(long, default_value_t = 30)]
    pub rpc_timeout: u64,
}

impl ExporterConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.sleep.max(1))
    }

    pub fn rpc_timeout(&self) -> Duration {
        Duration::from_secs(self.rpc_timeout)
    }
}
