//! Library for the SPDK metrics exporter
//!
//! This crate provides the core functionality for:
//! - Schema-tolerant decoding of SPDK RPC output
//! - Flattening of OCF cache-tier statistics
//! - Prometheus metric surfaces
//! - The periodic collection loop
//! - The optional diagnostic log sink

pub mod decode;
pub mod diaglog;
pub mod error;
pub mod flatten;
pub mod metrics;
pub mod models;
pub mod poll;
pub mod rpc;

pub use diaglog::DiagLogger;
pub use error::RpcError;
pub use metrics::ExporterMetrics;
pub use models::*;
pub use poll::PollLoop;
pub use rpc::{SpdkRpc, StatSource, DEFAULT_RPC_TIMEOUT};
