//! Wire models for SPDK RPC output
//!
//! These mirror the JSON emitted by `rpc.py get_bdevs_iostat` and
//! `rpc.py get_ocf_stats`. Every field carries `#[serde(default)]` so a
//! partial or truncated document still decodes, with missing values
//! degrading to zero.

use serde::Deserialize;

/// Per-bdev I/O counters from one iostat sample
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct BdevIoStat {
    pub name: String,
    pub bytes_read: f64,
    pub num_read_ops: f64,
    pub bytes_written: f64,
    pub num_write_ops: f64,
    pub bytes_unmapped: f64,
    pub num_unmap_ops: f64,
    pub read_latency_ticks: f64,
    pub write_latency_ticks: f64,
    pub unmap_latency_ticks: f64,
}

/// One polling cycle's iostat result: tick rate plus all bdevs
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct IoStatSample {
    pub tick_rate: f64,
    pub bdevs: Vec<BdevIoStat>,
}

/// Tick-rate-only view of a bdev record, used by the bare-array fallback
/// decode to recover the tick rate when no wrapping object is present.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TickRateRecord {
    pub tick_rate: f64,
}

/// One (count, percentage, units) measurement node in the OCF stats tree.
///
/// `percentage` is reported as text by the RPC tool and may be empty or
/// garbled; it is parsed best-effort at flattening time. `units` is
/// informational only and is not republished.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct StatLeaf {
    pub count: f64,
    pub percentage: String,
    pub units: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CacheUsage {
    pub occupancy: StatLeaf,
    pub free: StatLeaf,
    pub clean: StatLeaf,
    pub dirty: StatLeaf,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CacheRequests {
    pub rd_hits: StatLeaf,
    pub rd_partial_misses: StatLeaf,
    pub rd_full_misses: StatLeaf,
    pub rd_total: StatLeaf,
    pub wr_hits: StatLeaf,
    pub wr_partial_misses: StatLeaf,
    pub wr_full_misses: StatLeaf,
    pub wr_total: StatLeaf,
    pub rd_pt: StatLeaf,
    pub wr_pt: StatLeaf,
    pub serviced: StatLeaf,
    pub total: StatLeaf,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CacheBlocks {
    pub core_volume_rd: StatLeaf,
    pub core_volume_wr: StatLeaf,
    pub core_volume_total: StatLeaf,
    pub cache_volume_rd: StatLeaf,
    pub cache_volume_wr: StatLeaf,
    pub cache_volume_total: StatLeaf,
    pub volume_rd: StatLeaf,
    pub volume_wr: StatLeaf,
    pub volume_total: StatLeaf,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CacheErrors {
    pub core_volume_rd: StatLeaf,
    pub core_volume_wr: StatLeaf,
    pub core_volume_total: StatLeaf,
    pub cache_volume_rd: StatLeaf,
    pub cache_volume_wr: StatLeaf,
    pub cache_volume_total: StatLeaf,
    pub total: StatLeaf,
}

/// Full OCF cache-tier statistics tree for one cache instance
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CacheTierStat {
    pub usage: CacheUsage,
    pub requests: CacheRequests,
    pub blocks: CacheBlocks,
    pub errors: CacheErrors,
}
