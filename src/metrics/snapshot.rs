#[derive(Debug, Default, Clone, Copy)]
pub struct CacheMetricsSnapshot {
    pub get_calls: u64,
    pub get_hits: u64,
    pub get_misses: u64,

    pub add_calls: u64,
    pub add_updates: u64,
    pub add_new: u64,

    pub evict_calls: u64,
    pub evicted_entries: u64,
    pub evicted_bytes: u64,

    pub remove_oldest_calls: u64,
    pub remove_oldest_found: u64,

    pub peek_calls: u64,
    pub peek_found: u64,
    pub peek_oldest_calls: u64,
    pub peek_oldest_found: u64,

    pub touch_calls: u64,
    pub touch_found: u64,

    // gauges captured at snapshot time
    pub cache_len: usize,
    pub used_bytes: u64,
    pub max_bytes: u64,
}
