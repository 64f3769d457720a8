use super::{CounterCore, Shape};
use crate::data_count::DataCount;
use log::trace;
use rustc_hash::FxBuildHasher;
use std::hash::{BuildHasher, Hash};

const INITIAL_BUCKETS: usize = 16;
// Resize once entries / buckets exceeds 3/4.
const LOAD_FACTOR_NUM: usize = 3;
const LOAD_FACTOR_DEN: usize = 4;

// Separate-chaining hash table that accepts any hasher (FxHash by default)
pub struct HashTable<K, S = FxBuildHasher> {
    buckets: Vec<Vec<DataCount<K>>>,
    size: usize,
    total: u64,
    hasher: S,
}

impl<K: Hash, S: BuildHasher> HashTable<K, S> {
    fn bucket_index(&self, key: &K, bucket_count: usize) -> usize {
        (self.hasher.hash_one(key) % bucket_count as u64) as usize
    }

    fn resize(&mut self) {
        let new_count = self.buckets.len() * 2;
        trace!("resizing hash table from {} to {} buckets", self.buckets.len(), new_count);

        let mut buckets: Vec<Vec<DataCount<K>>> = (0..new_count).map(|_| Vec::new()).collect();
        for entry in std::mem::take(&mut self.buckets).into_iter().flatten() {
            let index = self.bucket_index(&entry.key, new_count);
            buckets[index].push(entry);
        }
        self.buckets = buckets;
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    pub fn load_factor(&self) -> f64 {
        self.size as f64 / self.buckets.len() as f64
    }
}

impl<K: Hash + Eq + Clone, S: BuildHasher + Default> CounterCore<K> for HashTable<K, S> {
    fn new() -> Self {
        HashTable {
            buckets: (0..INITIAL_BUCKETS).map(|_| Vec::new()).collect(),
            size: 0,
            total: 0,
            hasher: S::default(),
        }
    }

    fn inc_count(&mut self, key: K) {
        self.total += 1;

        let index = self.bucket_index(&key, self.buckets.len());
        let bucket = &mut self.buckets[index];
        if let Some(entry) = bucket.iter_mut().find(|entry| entry.key == key) {
            entry.count += 1;
            return;
        }

        bucket.push(DataCount::new(key, 1));
        self.size += 1;

        if self.size * LOAD_FACTOR_DEN > self.buckets.len() * LOAD_FACTOR_NUM {
            self.resize();
        }
    }

    fn get_counts(&self) -> Vec<DataCount<K>> {
        self.buckets.iter().flatten().cloned().collect()
    }

    fn unique_count(&self) -> usize {
        self.size
    }

    fn total_count(&self) -> u64 {
        self.total
    }

    fn shape(&self) -> Shape {
        Shape::Buckets {
            buckets: self.bucket_count(),
            load_factor: self.load_factor(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{BTreeMap, HashSet};
    use std::hash::BuildHasherDefault;

    fn snapshot<S: BuildHasher + Default>(table: &HashTable<String, S>) -> BTreeMap<String, u64> {
        let mut map = BTreeMap::new();
        for dc in table.get_counts() {
            assert!(map.insert(dc.key, dc.count).is_none(), "entry duplicated");
        }
        map
    }

    // Every key lands in bucket 0, so each lookup is a full chain scan.
    #[derive(Default)]
    struct ConstantHasher;

    impl std::hash::Hasher for ConstantHasher {
        fn finish(&self) -> u64 {
            0
        }

        fn write(&mut self, _bytes: &[u8]) {}
    }

    #[test]
    fn test_resize_preserves_entries() {
        let mut table = HashTable::<String>::new();
        // 12 entries sit exactly on the 0.75 threshold of 16 buckets.
        for i in 0..12 {
            for _ in 0..=i % 3 {
                table.inc_count(format!("w{}", i));
            }
        }
        assert_eq!(table.bucket_count(), INITIAL_BUCKETS);
        let before = snapshot(&table);

        table.inc_count("w12".to_string());
        assert_eq!(table.bucket_count(), INITIAL_BUCKETS * 2);
        assert!(table.load_factor() <= 0.75);

        let mut after = snapshot(&table);
        assert_eq!(after.remove("w12"), Some(1));
        assert_eq!(after, before);
    }

    #[test]
    fn test_load_factor_stays_bounded() {
        let mut table = HashTable::<String>::new();
        for i in 0..5000 {
            table.inc_count(i.to_string());
            assert!(table.load_factor() <= 0.75);
        }
        assert_eq!(table.bucket_count(), 8192);
        assert_eq!(table.unique_count(), 5000);
    }

    #[test]
    fn test_collisions_chain_by_value() {
        let mut table = HashTable::<String, BuildHasherDefault<ConstantHasher>>::new();
        for word in ["x", "y", "x", "z", "y", "x"] {
            table.inc_count(word.to_string());
        }
        let counts = snapshot(&table);
        assert_eq!(counts.get("x"), Some(&3));
        assert_eq!(counts.get("y"), Some(&2));
        assert_eq!(counts.get("z"), Some(&1));
        assert_eq!(table.buckets[0].len(), 3);
    }

    #[test]
    fn test_works_with_ahash() {
        let mut table = HashTable::<String, ahash::RandomState>::new();
        for i in 0..100 {
            table.inc_count(format!("k{}", i % 40));
        }
        let keys: HashSet<String> = table.get_counts().into_iter().map(|dc| dc.key).collect();
        assert_eq!(keys.len(), 40);
        assert_eq!(table.total_count(), 100);
    }
}
