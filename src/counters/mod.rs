use crate::data_count::DataCount;
use serde::Serialize;

pub mod avl;
pub mod bst;
pub mod hash_table;

pub use avl::AvlTree;
pub use bst::BinarySearchTree;
pub use hash_table::HashTable;

#[cfg(target_os = "linux")]
use procfs::process::Process;

// Sampling /proc on every word would dominate the run time.
const MEMORY_SAMPLE_INTERVAL: u64 = 4096;

pub fn get_memory_usage_bytes() -> Option<u64> {
    #[cfg(target_os = "linux")]
    {
        Process::myself()
            .ok()
            .and_then(|p| p.status().ok())
            .map(|s| s.vmrss.unwrap_or(0) * 1024) // VmRSS is in KB
    }
    #[cfg(not(target_os = "linux"))]
    {
        None
    }
}

/// Structural summary of a backend, logged alongside the run stats.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Shape {
    Tree { height: i64 },
    Buckets { buckets: usize, load_factor: f64 },
}

// Core trait for the associative counter backends (without memory tracking)
pub trait CounterCore<K> {
    fn new() -> Self
    where
        Self: Sized;

    /// Adds one occurrence of `key`, creating its entry on first sight.
    fn inc_count(&mut self, key: K);

    /// Every entry exactly once, in a backend-defined order.
    fn get_counts(&self) -> Vec<DataCount<K>>;

    fn unique_count(&self) -> usize;
    fn total_count(&self) -> u64;
    fn shape(&self) -> Shape;
}

// Wrapper that adds peak memory tracking to any word counter
pub struct MemoryTrackedCounter<C: CounterCore<String>> {
    inner: C,
    peak_memory: u64,
    since_sample: u64,
}

impl<C: CounterCore<String>> MemoryTrackedCounter<C> {
    pub fn new() -> Self {
        let mut counter = MemoryTrackedCounter {
            inner: C::new(),
            peak_memory: 0,
            since_sample: 0,
        };
        counter.update_peak_memory();
        counter
    }

    fn update_peak_memory(&mut self) {
        if let Some(current_mem) = get_memory_usage_bytes() {
            self.peak_memory = self.peak_memory.max(current_mem);
        }
        self.since_sample = 0;
    }

    pub fn peak_memory_bytes(&self) -> Option<u64> {
        if self.peak_memory > 0 { Some(self.peak_memory) } else { None }
    }
}

// Driver-facing trait for all word counters with memory tracking
pub trait Counter {
    fn inc_count(&mut self, word: String);
    fn get_counts(&mut self) -> Vec<DataCount<String>>;
    fn unique_count(&self) -> usize;
    fn total_count(&self) -> u64;
    fn shape(&self) -> Shape;
    fn peak_memory_bytes(&self) -> Option<u64>;
}

impl<C: CounterCore<String>> Counter for MemoryTrackedCounter<C> {
    fn inc_count(&mut self, word: String) {
        self.inner.inc_count(word);
        self.since_sample += 1;
        if self.since_sample >= MEMORY_SAMPLE_INTERVAL {
            self.update_peak_memory();
        }
    }

    fn get_counts(&mut self) -> Vec<DataCount<String>> {
        let counts = self.inner.get_counts();
        self.update_peak_memory();
        counts
    }

    fn unique_count(&self) -> usize {
        self.inner.unique_count()
    }

    fn total_count(&self) -> u64 {
        self.inner.total_count()
    }

    fn shape(&self) -> Shape {
        self.inner.shape()
    }

    fn peak_memory_bytes(&self) -> Option<u64> {
        MemoryTrackedCounter::peak_memory_bytes(self)
    }
}
