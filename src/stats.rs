use serde::{Deserialize, Serialize};

/// Counters maintained by a trie as a side effect of its operations.
///
/// Every counter only ever grows; a fresh trie is the only way to start over.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    /// Nodes ever created, including the root.
    pub node_count: u64,
    /// Completed insertions.
    pub query_count: u64,
    pub hits: u64,
    pub misses: u64,
    /// Membership tests performed; always `hits + misses`.
    pub seeks: u64,
    /// Sum of the byte lengths of all inserted keys.
    pub queries_size_raw_bytes: u64,
    /// Nodes created by insertions, one unit each.
    pub queries_size_actual_bytes: u64,
    /// Insertions cut short by a full node. Only a capped fan-out can truncate.
    pub truncated_inserts: u64,
}

impl Default for Stats {
    fn default() -> Self {
        Stats {
            node_count: 1,
            query_count: 0,
            hits: 0,
            misses: 0,
            seeks: 0,
            queries_size_raw_bytes: 0,
            queries_size_actual_bytes: 0,
            truncated_inserts: 0,
        }
    }
}

impl Stats {
    /// Fraction of seeks that found their key, `0.0` before the first seek.
    pub fn hit_rate(&self) -> f64 {
        ratio(self.hits, self.seeks)
    }

    /// Fraction of seeks that missed, `0.0` before the first seek.
    pub fn miss_rate(&self) -> f64 {
        ratio(self.misses, self.seeks)
    }

    /// `1 - actual / raw`, or `None` while nothing has been inserted.
    ///
    /// Bit tries usually report a negative saving for small inputs: each raw
    /// byte can cost up to eight nodes until prefixes start to be shared.
    pub fn space_saved(&self) -> Option<f64> {
        if self.queries_size_raw_bytes == 0 {
            return None;
        }
        Some(1.0 - self.queries_size_actual_bytes as f64 / self.queries_size_raw_bytes as f64)
    }

    /// Average number of nodes created per insertion.
    pub fn nodes_per_query(&self) -> f64 {
        ratio(self.queries_size_actual_bytes, self.query_count)
    }
}

fn ratio(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64
    }
}
