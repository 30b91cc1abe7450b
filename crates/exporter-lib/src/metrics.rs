//! Prometheus metric surfaces for the exporter
//!
//! All metrics live in an explicitly constructed [`prometheus::Registry`]
//! owned by [`ExporterMetrics`], which is built once at startup and shared
//! via `Arc` between the poll loop (single writer) and the HTTP exposition
//! handler (many readers). Prometheus metric types are internally
//! synchronized, so concurrent set/encode is safe.

use crate::flatten::FlatStat;
use crate::models::BdevIoStat;
use prometheus::{
    proto::MetricFamily, Counter, GaugeVec, Opts, Registry,
};

/// The long-lived metric surfaces: nine per-bdev gauges, the additive tick
/// rate, and the two cache-tier gauge families.
pub struct ExporterMetrics {
    registry: Registry,

    bytes_read: GaugeVec,
    num_read_ops: GaugeVec,
    bytes_written: GaugeVec,
    num_write_ops: GaugeVec,
    bytes_unmapped: GaugeVec,
    unmapped_ops: GaugeVec,
    read_latency_ticks: GaugeVec,
    write_latency_ticks: GaugeVec,
    unmap_latency_ticks: GaugeVec,

    // Tick rate is deliberately additive across cycles, not an overwrite.
    // Carried over from the source behavior as a contract.
    tick_rate: Counter,

    ocf_count: GaugeVec,
    ocf_percentage: GaugeVec,
}

fn bdev_gauge(registry: &Registry, name: &str, help: &str) -> prometheus::Result<GaugeVec> {
    let gauge = GaugeVec::new(Opts::new(name, help), &["bdev_name"])?;
    registry.register(Box::new(gauge.clone()))?;
    Ok(gauge)
}

fn cache_gauge(registry: &Registry, name: &str, help: &str) -> prometheus::Result<GaugeVec> {
    let gauge = GaugeVec::new(Opts::new(name, help), &["category", "subcategory"])?;
    registry.register(Box::new(gauge.clone()))?;
    Ok(gauge)
}

impl ExporterMetrics {
    /// Build the metric surfaces and register them all with a fresh registry.
    pub fn new() -> prometheus::Result<Self> {
        let registry = Registry::new();

        let tick_rate = Counter::new("spdk_tick_rate", "The tick rate")?;
        registry.register(Box::new(tick_rate.clone()))?;

        Ok(Self {
            bytes_read: bdev_gauge(&registry, "spdk_bytes_read", "Number of bytes read")?,
            num_read_ops: bdev_gauge(&registry, "spdk_num_read_ops", "Number of read operations")?,
            bytes_written: bdev_gauge(
                &registry,
                "spdk_bytes_written",
                "Number of bytes written",
            )?,
            num_write_ops: bdev_gauge(
                &registry,
                "spdk_num_write_ops",
                "Number of write operations",
            )?,
            bytes_unmapped: bdev_gauge(
                &registry,
                "spdk_bytes_unmapped",
                "Number of bytes unmapped",
            )?,
            unmapped_ops: bdev_gauge(&registry, "spdk_unmapped_ops", "Number of unmapped ops")?,
            read_latency_ticks: bdev_gauge(
                &registry,
                "spdk_read_latency_ticks",
                "Number of read latency ticks",
            )?,
            write_latency_ticks: bdev_gauge(
                &registry,
                "spdk_write_latency_ticks",
                "Number of write latency ticks",
            )?,
            unmap_latency_ticks: bdev_gauge(
                &registry,
                "spdk_unmap_latency_ticks",
                "Number of unmap latency ticks",
            )?,
            tick_rate,
            ocf_count: cache_gauge(&registry, "spdk_ocf_count", "OCF count value")?,
            ocf_percentage: cache_gauge(&registry, "spdk_ocf_percentage", "OCF percentage value")?,
            registry,
        })
    }

    /// Overwrite all nine per-bdev gauges for one device. Series are keyed
    /// by device name and persist for the process lifetime.
    pub fn record_bdev(&self, bdev: &BdevIoStat) {
        let labels = &[bdev.name.as_str()];
        self.bytes_read.with_label_values(labels).set(bdev.bytes_read);
        self.num_read_ops.with_label_values(labels).set(bdev.num_read_ops);
        self.bytes_written.with_label_values(labels).set(bdev.bytes_written);
        self.num_write_ops.with_label_values(labels).set(bdev.num_write_ops);
        self.bytes_unmapped.with_label_values(labels).set(bdev.bytes_unmapped);
        self.unmapped_ops.with_label_values(labels).set(bdev.num_unmap_ops);
        self.read_latency_ticks
            .with_label_values(labels)
            .set(bdev.read_latency_ticks);
        self.write_latency_ticks
            .with_label_values(labels)
            .set(bdev.write_latency_ticks);
        self.unmap_latency_ticks
            .with_label_values(labels)
            .set(bdev.unmap_latency_ticks);
    }

    /// Add one cycle's tick-rate reading to the running total.
    pub fn add_tick_rate(&self, tick_rate: f64) {
        self.tick_rate.inc_by(tick_rate);
    }

    /// Publish one flattened cache-tier measurement. The count gauge is
    /// always overwritten; the percentage gauge is only touched when a
    /// percentage was actually parsed, so a garbled reading leaves the
    /// previous value in place.
    pub fn record_cache_stat(&self, stat: &FlatStat) {
        let labels = &[stat.category, stat.subcategory];
        self.ocf_count.with_label_values(labels).set(stat.count);
        if let Some(pct) = stat.percentage {
            self.ocf_percentage.with_label_values(labels).set(pct);
        }
    }

    /// Snapshot all metric families for exposition.
    pub fn gather(&self) -> Vec<MetricFamily> {
        self.registry.gather()
    }
}
