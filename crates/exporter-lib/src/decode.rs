//! Schema-tolerant decoding of SPDK RPC output
//!
//! SPDK versions differ in how `get_bdevs_iostat` shapes its output: newer
//! releases wrap the device list in an object with a top-level `tick_rate`,
//! older ones emit a bare array of per-bdev records (each carrying its own
//! `tick_rate`). Decoding tries the candidate shapes in order and takes the
//! first that yields devices; nothing here ever returns an error. Garbage
//! input produces a zero-valued sample and the caller publishes nothing new.

use crate::models::{BdevIoStat, CacheTierStat, IoStatSample, TickRateRecord};
use tracing::debug;

/// Decode iostat output, trying the wrapped-object shape first and the
/// bare-array shape second.
pub fn decode_iostat(raw: &[u8]) -> IoStatSample {
    let mut sample = serde_json::from_slice::<IoStatSample>(raw).unwrap_or_default();
    if !sample.bdevs.is_empty() {
        return sample;
    }

    // Fallback for the unwrapped shape: the document is an array of bdev
    // records, and the tick rate rides along on each element. The first
    // element's tick rate wins; a top-level tick rate from the primary
    // attempt survives if the array carries none.
    match serde_json::from_slice::<Vec<BdevIoStat>>(raw) {
        Ok(bdevs) => sample.bdevs = bdevs,
        Err(e) => {
            debug!(error = %e, "iostat output matched neither known shape");
            return sample;
        }
    }

    if let Ok(rates) = serde_json::from_slice::<Vec<TickRateRecord>>(raw) {
        if let Some(first) = rates.first() {
            sample.tick_rate = first.tick_rate;
        }
    }

    sample
}

/// Decode OCF cache-tier statistics. Malformed JSON yields a zero-valued
/// tree rather than an error.
pub fn decode_cache_stats(raw: &[u8]) -> CacheTierStat {
    serde_json::from_slice(raw).unwrap_or_else(|e| {
        debug!(error = %e, "cache stats output did not decode, using zero tree");
        CacheTierStat::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const WRAPPED: &str = r#"{
        "tick_rate": 2100000000,
        "bdevs": [
            {
                "name": "Nvme0n1",
                "bytes_read": 4096,
                "num_read_ops": 1,
                "bytes_written": 8192,
                "num_write_ops": 2,
                "bytes_unmapped": 0,
                "num_unmap_ops": 0,
                "read_latency_ticks": 500,
                "write_latency_ticks": 900,
                "unmap_latency_ticks": 0
            },
            {
                "name": "Malloc0",
                "bytes_read": 1024,
                "num_read_ops": 4,
                "bytes_written": 0,
                "num_write_ops": 0,
                "bytes_unmapped": 512,
                "num_unmap_ops": 1,
                "read_latency_ticks": 10,
                "write_latency_ticks": 0,
                "unmap_latency_ticks": 3
            }
        ]
    }"#;

    const BARE_ARRAY: &str = r#"[
        {
            "name": "Nvme0n1",
            "tick_rate": 1000,
            "bytes_read": 4096,
            "num_read_ops": 1,
            "bytes_written": 8192,
            "num_write_ops": 2,
            "bytes_unmapped": 0,
            "num_unmap_ops": 0,
            "read_latency_ticks": 500,
            "write_latency_ticks": 900,
            "unmap_latency_ticks": 0
        },
        {
            "name": "Malloc0",
            "tick_rate": 9999,
            "bytes_read": 1024,
            "num_read_ops": 4,
            "bytes_written": 0,
            "num_write_ops": 0,
            "bytes_unmapped": 512,
            "num_unmap_ops": 1,
            "read_latency_ticks": 10,
            "write_latency_ticks": 0,
            "unmap_latency_ticks": 3
        }
    ]"#;

    #[test]
    fn decodes_wrapped_object_shape() {
        let sample = decode_iostat(WRAPPED.as_bytes());

        assert_eq!(sample.tick_rate, 2_100_000_000.0);
        assert_eq!(sample.bdevs.len(), 2);
        assert_eq!(sample.bdevs[0].name, "Nvme0n1");
        assert_eq!(sample.bdevs[0].bytes_read, 4096.0);
        assert_eq!(sample.bdevs[0].write_latency_ticks, 900.0);
        assert_eq!(sample.bdevs[1].name, "Malloc0");
        assert_eq!(sample.bdevs[1].num_unmap_ops, 1.0);
    }

    #[test]
    fn falls_back_to_bare_array_shape() {
        let sample = decode_iostat(BARE_ARRAY.as_bytes());

        assert_eq!(sample.bdevs.len(), 2);
        assert_eq!(sample.bdevs[0].name, "Nvme0n1");
        assert_eq!(sample.bdevs[1].bytes_unmapped, 512.0);
        // First element's tick rate wins
        assert_eq!(sample.tick_rate, 1000.0);
    }

    #[test]
    fn wrapped_shape_with_empty_bdevs_keeps_top_level_tick_rate() {
        // The object decodes fine but carries no devices, so the bare-array
        // attempt runs and finds nothing. The top-level tick rate survives.
        let sample = decode_iostat(br#"{"tick_rate": 500, "bdevs": []}"#);
        assert!(sample.bdevs.is_empty());
        assert_eq!(sample.tick_rate, 500.0);
    }

    #[test]
    fn garbage_iostat_yields_zero_sample() {
        for raw in [&b"not json at all"[..], b"", b"{\"half\": ", b"42"] {
            let sample = decode_iostat(raw);
            assert!(sample.bdevs.is_empty());
            assert_eq!(sample.tick_rate, 0.0);
        }
    }

    #[test]
    fn missing_bdev_fields_default_to_zero() {
        let sample = decode_iostat(
            br#"{"tick_rate": 100, "bdevs": [{"name": "Nvme0n1", "bytes_read": 7}]}"#,
        );
        assert_eq!(sample.bdevs.len(), 1);
        assert_eq!(sample.bdevs[0].bytes_read, 7.0);
        assert_eq!(sample.bdevs[0].num_write_ops, 0.0);
        assert_eq!(sample.bdevs[0].unmap_latency_ticks, 0.0);
    }

    #[test]
    fn decodes_cache_stats() {
        let stats = decode_cache_stats(
            br#"{
                "usage": {
                    "occupancy": {"count": 100, "percentage": "12.5", "units": "4KiB blocks"},
                    "dirty": {"count": 3, "percentage": "0.1", "units": "4KiB blocks"}
                },
                "requests": {
                    "rd_hits": {"count": 9, "percentage": "90.0", "units": "Requests"}
                }
            }"#,
        );

        assert_eq!(stats.usage.occupancy.count, 100.0);
        assert_eq!(stats.usage.occupancy.percentage, "12.5");
        assert_eq!(stats.usage.dirty.count, 3.0);
        assert_eq!(stats.requests.rd_hits.count, 9.0);
        // Untouched leaves stay zero-valued
        assert_eq!(stats.usage.free.count, 0.0);
        assert_eq!(stats.blocks.volume_total.count, 0.0);
        assert!(stats.errors.total.percentage.is_empty());
    }

    #[test]
    fn garbage_cache_stats_yield_zero_tree() {
        let stats = decode_cache_stats(b"][ nonsense");
        assert_eq!(stats.usage.occupancy.count, 0.0);
        assert_eq!(stats.requests.total.count, 0.0);
    }
}
