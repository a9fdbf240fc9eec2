//! Construction-time settings.

use serde::{Deserialize, Serialize};

use crate::as_bytes::AsBytes;
use crate::branching::{Branching, ByteFanout, DEFAULT_MAX_CHILDREN};
use crate::error::Result;
use crate::node::NodeId;
use crate::observer::NoopObserver;
use crate::stats::Stats;
use crate::trie::{ByteTrie, QGraph, Trie};

/// Node fan-out of the index.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Fanout {
    /// One node per bit; two children at most.
    #[default]
    Binary,
    /// One node per byte; at most `max_children` children.
    Byte,
}

/// Configuration for building an [`Index`].
///
/// # Examples
///
/// ```
/// use qgraph::{Config, Fanout};
///
/// let config = Config::from_json(r#"{ "fanout": "byte", "max_children": 64 }"#).unwrap();
/// assert_eq!(config.fanout, Fanout::Byte);
/// assert_eq!(config.initial_capacity, 1024);
///
/// let mut index = config.build().unwrap();
/// index.insert("foo");
/// assert!(index.contains("foo"));
/// assert_eq!(index.stats().node_count, 4);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub fanout: Fanout,
    /// Number of nodes to reserve up front.
    pub initial_capacity: usize,
    /// Per-node child cap, used by [`Fanout::Byte`] only.
    pub max_children: usize,
    /// Forward trie events to `tracing`.
    pub trace_events: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fanout: Fanout::Binary,
            initial_capacity: 1024,
            max_children: DEFAULT_MAX_CHILDREN,
            trace_events: true,
        }
    }
}

impl Config {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.fanout == Fanout::Byte {
            ByteFanout::new(self.max_children)?;
        }
        Ok(())
    }

    /// Builds an empty index.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`](crate::Error::InvalidConfig) if the
    /// byte fan-out cap is out of range.
    pub fn build(&self) -> Result<Index> {
        let index = match self.fanout {
            Fanout::Binary => {
                let graph = QGraph::with_capacity(self.initial_capacity);
                Index::Binary(self.observe(graph))
            }
            Fanout::Byte => {
                let fanout = ByteFanout::new(self.max_children)?;
                let trie = Trie::with_branching(fanout, self.initial_capacity);
                Index::Byte(self.observe(trie))
            }
        };
        Ok(index)
    }

    fn observe<B: Branching>(&self, trie: Trie<B>) -> Trie<B> {
        if self.trace_events {
            trie
        } else {
            trie.with_observer(NoopObserver)
        }
    }
}

/// A trie whose fan-out was picked at runtime.
#[derive(Debug)]
pub enum Index {
    Binary(QGraph),
    Byte(ByteTrie),
}

impl Index {
    pub fn insert<K: AsBytes>(&mut self, key: K) {
        match self {
            Index::Binary(graph) => graph.insert(key),
            Index::Byte(trie) => trie.insert(key),
        }
    }

    pub fn contains<K: AsBytes>(&mut self, key: K) -> bool {
        match self {
            Index::Binary(graph) => graph.contains(key),
            Index::Byte(trie) => trie.contains(key),
        }
    }

    pub fn lookup<K: AsBytes>(&mut self, key: K) -> Option<NodeId> {
        match self {
            Index::Binary(graph) => graph.lookup(key),
            Index::Byte(trie) => trie.lookup(key),
        }
    }

    pub fn delete<K: AsBytes>(&mut self, key: K) -> Result<()> {
        match self {
            Index::Binary(graph) => graph.delete(key),
            Index::Byte(trie) => trie.delete(key),
        }
    }

    pub fn stats(&self) -> &Stats {
        match self {
            Index::Binary(graph) => graph.stats(),
            Index::Byte(trie) => trie.stats(),
        }
    }

    pub fn fanout(&self) -> Fanout {
        match self {
            Index::Binary(_) => Fanout::Binary,
            Index::Byte(_) => Fanout::Byte,
        }
    }
}
