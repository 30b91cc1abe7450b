//! Flattening of the OCF cache-tier statistics tree
//!
//! The tree has a closed, fixed set of leaves. A single declarative table
//! maps each (category, subcategory) pair to its accessor, which keeps the
//! tracked set auditable in one place and drives the flattening iterator in
//! a stable order: usage, requests, blocks, errors.

use crate::models::{CacheTierStat, StatLeaf};

/// One flattened cache-tier measurement.
///
/// `percentage` is `None` when the source leaf's percentage text was empty
/// or not a valid number; the caller must leave the corresponding gauge
/// untouched in that case rather than resetting it.
#[derive(Debug, Clone, PartialEq)]
pub struct FlatStat {
    pub category: &'static str,
    pub subcategory: &'static str,
    pub count: f64,
    pub percentage: Option<f64>,
}

type LeafAccessor = fn(&CacheTierStat) -> &StatLeaf;

/// The closed enumeration of tracked cache-tier leaves, in publication order.
const CACHE_STAT_TABLE: &[(&str, &str, LeafAccessor)] = &[
    ("usage", "occupancy", |s| &s.usage.occupancy),
    ("usage", "free", |s| &s.usage.free),
    ("usage", "clean", |s| &s.usage.clean),
    ("usage", "dirty", |s| &s.usage.dirty),
    ("requests", "rd_hits", |s| &s.requests.rd_hits),
    ("requests", "rd_partial_misses", |s| &s.requests.rd_partial_misses),
    ("requests", "rd_full_misses", |s| &s.requests.rd_full_misses),
    ("requests", "rd_total", |s| &s.requests.rd_total),
    ("requests", "wr_hits", |s| &s.requests.wr_hits),
    ("requests", "wr_partial_misses", |s| &s.requests.wr_partial_misses),
    ("requests", "wr_full_misses", |s| &s.requests.wr_full_misses),
    ("requests", "wr_total", |s| &s.requests.wr_total),
    ("requests", "rd_pt", |s| &s.requests.rd_pt),
    ("requests", "wr_pt", |s| &s.requests.wr_pt),
    ("requests", "serviced", |s| &s.requests.serviced),
    ("requests", "total", |s| &s.requests.total),
    ("blocks", "core_volume_rd", |s| &s.blocks.core_volume_rd),
    ("blocks", "core_volume_wr", |s| &s.blocks.core_volume_wr),
    ("blocks", "core_volume_total", |s| &s.blocks.core_volume_total),
    ("blocks", "cache_volume_rd", |s| &s.blocks.cache_volume_rd),
    ("blocks", "cache_volume_wr", |s| &s.blocks.cache_volume_wr),
    ("blocks", "cache_volume_total", |s| &s.blocks.cache_volume_total),
    ("blocks", "volume_rd", |s| &s.blocks.volume_rd),
    ("blocks", "volume_wr", |s| &s.blocks.volume_wr),
    ("blocks", "volume_total", |s| &s.blocks.volume_total),
    ("errors", "core_volume_rd", |s| &s.errors.core_volume_rd),
    ("errors", "core_volume_wr", |s| &s.errors.core_volume_wr),
    ("errors", "core_volume_total", |s| &s.errors.core_volume_total),
    ("errors", "cache_volume_rd", |s| &s.errors.cache_volume_rd),
    ("errors", "cache_volume_wr", |s| &s.errors.cache_volume_wr),
    ("errors", "cache_volume_total", |s| &s.errors.cache_volume_total),
    ("errors", "total", |s| &s.errors.total),
];

/// Number of tracked (category, subcategory) pairs.
pub const CACHE_STAT_COUNT: usize = CACHE_STAT_TABLE.len();

/// Flatten a cache-tier statistics tree into per-leaf measurements.
///
/// Emits exactly one [`FlatStat`] per tracked leaf, in table order. The
/// percentage text is parsed best-effort; anything that is not a number
/// becomes `None`.
pub fn flatten_cache_stats(stats: &CacheTierStat) -> impl Iterator<Item = FlatStat> + '_ {
    CACHE_STAT_TABLE.iter().map(move |&(category, subcategory, accessor)| {
        let leaf = accessor(stats);
        FlatStat {
            category,
            subcategory,
            count: leaf.count,
            percentage: leaf.percentage.trim().parse::<f64>().ok(),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emits_every_leaf_exactly_once_in_stable_order() {
        let stats = CacheTierStat::default();
        let flat: Vec<FlatStat> = flatten_cache_stats(&stats).collect();

        assert_eq!(flat.len(), CACHE_STAT_COUNT);
        assert_eq!(flat.len(), 32);

        // Category blocks appear contiguously and in order
        let categories: Vec<&str> = flat.iter().map(|f| f.category).collect();
        let mut deduped = categories.clone();
        deduped.dedup();
        assert_eq!(deduped, ["usage", "requests", "blocks", "errors"]);

        // No (category, subcategory) pair repeats
        let mut pairs: Vec<(&str, &str)> =
            flat.iter().map(|f| (f.category, f.subcategory)).collect();
        pairs.sort();
        pairs.dedup();
        assert_eq!(pairs.len(), CACHE_STAT_COUNT);

        assert_eq!(flat[0].subcategory, "occupancy");
        assert_eq!(flat[4].subcategory, "rd_hits");
        assert_eq!(flat[31].category, "errors");
        assert_eq!(flat[31].subcategory, "total");
    }

    #[test]
    fn zero_tree_flattens_to_zero_counts_and_no_percentages() {
        let stats = CacheTierStat::default();
        for flat in flatten_cache_stats(&stats) {
            assert_eq!(flat.count, 0.0);
            assert_eq!(flat.percentage, None);
        }
    }

    #[test]
    fn parses_percentage_text_best_effort() {
        let mut stats = CacheTierStat::default();
        stats.usage.occupancy.count = 812.0;
        stats.usage.occupancy.percentage = "49.6".to_string();
        stats.usage.free.percentage = "not-a-number".to_string();
        stats.usage.clean.percentage = String::new();
        stats.usage.dirty.percentage = " 0.1 ".to_string();

        let flat: Vec<FlatStat> = flatten_cache_stats(&stats).take(4).collect();

        assert_eq!(flat[0].count, 812.0);
        assert_eq!(flat[0].percentage, Some(49.6));
        assert_eq!(flat[1].percentage, None);
        assert_eq!(flat[2].percentage, None);
        assert_eq!(flat[3].percentage, Some(0.1));
    }
}
