//! The collection loop
//!
//! Drives the fixed cycle: fetch iostat, decode and publish; fetch cache
//! stats, decode, flatten and publish; sleep; repeat. Each data source
//! fails independently — an invocation error skips that source for the
//! current cycle and the next attempt is the next scheduled tick. No error
//! escapes the loop.

use crate::decode::{decode_cache_stats, decode_iostat};
use crate::diaglog::DiagLogger;
use crate::flatten::flatten_cache_stats;
use crate::metrics::ExporterMetrics;
use crate::rpc::StatSource;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::interval;
use tracing::{debug, info, warn};

/// Periodic poll of the RPC tool, publishing into the shared metric
/// surfaces.
pub struct PollLoop {
    source: Arc<dyn StatSource>,
    metrics: Arc<ExporterMetrics>,
    diag: DiagLogger,
    poll_interval: Duration,
}

impl PollLoop {
    pub fn new(
        source: Arc<dyn StatSource>,
        metrics: Arc<ExporterMetrics>,
        diag: DiagLogger,
        poll_interval: Duration,
    ) -> Self {
        Self {
            source,
            metrics,
            diag,
            poll_interval,
        }
    }

    /// Run the loop forever. Intended to be spawned as a background task;
    /// it ends only when the process does.
    pub async fn run(self) {
        info!(
            interval_secs = self.poll_interval.as_secs(),
            "starting collection loop"
        );

        let mut ticker = interval(self.poll_interval);
        let mut cycle = 0u64;

        loop {
            ticker.tick().await;
            self.run_cycle().await;
            cycle += 1;

            if cycle % 60 == 0 {
                debug!(cycles = cycle, "collection loop still running");
            }
        }
    }

    /// One full cycle: both sources, each isolated from the other's
    /// failures.
    pub async fn run_cycle(&self) {
        match self.source.fetch_iostat().await {
            Ok(raw) => {
                self.diag
                    .log(&format!("SPDK IOSTAT DATA:\n{}", String::from_utf8_lossy(&raw)));
                self.publish_iostat(&raw);
            }
            Err(e) => {
                warn!(error = %e, "iostat fetch failed, skipping this cycle");
                self.diag.log(&format!("IOSTAT FETCH FAILED: {e}"));
            }
        }

        match self.source.fetch_cache_stats().await {
            Ok(raw) => {
                self.diag
                    .log(&format!("SPDK OCF DATA:\n{}", String::from_utf8_lossy(&raw)));
                self.publish_cache_stats(&raw);
            }
            Err(e) => {
                warn!(error = %e, "cache stats fetch failed, skipping this cycle");
                self.diag.log(&format!("OCF FETCH FAILED: {e}"));
            }
        }
    }

    fn publish_iostat(&self, raw: &[u8]) {
        let sample = decode_iostat(raw);

        self.metrics.add_tick_rate(sample.tick_rate);
        for bdev in &sample.bdevs {
            self.metrics.record_bdev(bdev);
        }

        debug!(
            bdevs = sample.bdevs.len(),
            tick_rate = sample.tick_rate,
            "published iostat sample"
        );
    }

    fn publish_cache_stats(&self, raw: &[u8]) {
        let stats = decode_cache_stats(raw);
        for flat in flatten_cache_stats(&stats) {
            self.metrics.record_cache_stat(&flat);
        }
    }
}
