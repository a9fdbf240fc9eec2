//! A prefix-sharing binary trie over byte strings.
//!
//! This crate provides [`QGraph`], which expands every byte of a key into
//! eight bits and stores the resulting bit path from a shared root. Keys
//! with common leading bits reuse the same nodes, and the trie keeps
//! counters that show how much storage that sharing saves.
//!
//! # Features
//!
//! - Insertion and membership tests in O(8k) for a key of k bytes
//! - Uncounted lookups returning a node handle for attaching metadata
//! - Raw vs. materialized size accounting and hit/miss statistics
//! - A byte-branching variant ([`ByteTrie`]) with a per-node child cap
//! - Pluggable event observer, logging through `tracing` by default
//!
//! # Examples
//!
//! ```
//! use qgraph::QGraph;
//!
//! let mut graph = QGraph::new();
//! for query in ["foo", "bar", "baz", "zoo"] {
//!     graph.insert(query);
//! }
//!
//! assert!(graph.contains("baz"));
//! assert_eq!(graph.query_count(), 4);
//! assert_eq!(graph.node_count(), 69);
//! assert_eq!(graph.queries_size_raw_bytes(), 12);
//! ```

mod as_bytes;
mod bit_key;
mod branching;
mod config;
mod error;
mod metadata;
mod node;
mod observer;
mod stats;
mod trie;

pub use as_bytes::AsBytes;
pub use bit_key::{is_bit_string, Bit, BitKey};
pub use branching::{Binary, Branching, ByteChildren, ByteFanout, DEFAULT_MAX_CHILDREN, MAX_FANOUT};
pub use config::{Config, Fanout, Index};
pub use error::{Error, Result};
pub use metadata::{Metadata, Primitive};
pub use node::NodeId;
pub use observer::{Inserted, NodeCreated, NoopObserver, Observer, Seeked, TracingObserver};
pub use stats::Stats;
pub use trie::{ByteTrie, NodeRef, QGraph, Trie};

#[cfg(test)]
mod proptest_qgraph;
