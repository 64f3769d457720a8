use serde::Serialize;

/// A key paired with the number of times it has been counted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DataCount<K> {
    pub key: K,
    pub count: u64,
}

impl<K> DataCount<K> {
    pub fn new(key: K, count: u64) -> Self {
        DataCount { key, count }
    }
}
