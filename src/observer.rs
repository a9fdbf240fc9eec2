//! Event hooks fired by trie operations.
//!
//! A trie owns one boxed [`Observer`]. The default, [`TracingObserver`],
//! forwards every event to `tracing`; install a subscriber to see them.

use tracing::{debug, trace};

use crate::node::NodeId;

/// A node was materialized during an insertion.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct NodeCreated {
    pub node: NodeId,
    pub parent: NodeId,
    /// Depth of the new node; children of the root are at depth 1.
    pub depth: usize,
}

/// An insertion finished.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Inserted {
    /// Node the key's path ended on.
    pub node: NodeId,
    pub raw_len: usize,
    pub path_len: usize,
    pub nodes_created: usize,
    /// The path stopped early at a full node.
    pub truncated: bool,
}

/// A counted membership test finished.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Seeked {
    pub raw_len: usize,
    pub path_len: usize,
    pub hit: bool,
}

/// Receives trie events. Every method defaults to doing nothing.
pub trait Observer {
    fn node_created(&mut self, _event: NodeCreated) {}

    fn inserted(&mut self, _event: Inserted) {}

    fn seeked(&mut self, _event: Seeked) {}
}

/// Discards every event.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoopObserver;

impl Observer for NoopObserver {}

/// Emits each event through `tracing`.
#[derive(Copy, Clone, Debug, Default)]
pub struct TracingObserver;

impl Observer for TracingObserver {
    fn node_created(&mut self, event: NodeCreated) {
        trace!(
            node = event.node.index(),
            parent = event.parent.index(),
            depth = event.depth,
            "created node"
        );
    }

    fn inserted(&mut self, event: Inserted) {
        debug!(
            node = event.node.index(),
            raw_len = event.raw_len,
            path_len = event.path_len,
            nodes_created = event.nodes_created,
            truncated = event.truncated,
            "inserted key"
        );
    }

    fn seeked(&mut self, event: Seeked) {
        debug!(
            raw_len = event.raw_len,
            path_len = event.path_len,
            hit = event.hit,
            "seek finished"
        );
    }
}
