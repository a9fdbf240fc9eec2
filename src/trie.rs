use std::fmt;

use crate::as_bytes::AsBytes;
use crate::branching::{Binary, Branching, ByteFanout};
use crate::error::{Error, Result};
use crate::metadata::Metadata;
use crate::node::{NodeId, TrieNode};
use crate::observer::{Inserted, NodeCreated, Observer, Seeked, TracingObserver};
use crate::stats::Stats;

/// Binary trie over the bits of each key: the qgraph.
pub type QGraph<P = Metadata> = Trie<Binary, P>;

/// Byte-labelled trie with a capped number of children per node.
pub type ByteTrie<P = Metadata> = Trie<ByteFanout, P>;

/// A prefix-sharing trie that indexes byte strings as label paths.
///
/// Nodes live in an arena and are addressed by [`NodeId`]. A cursor walks the
/// arena during each operation and is back on the root whenever control
/// returns to the caller, so operations can be issued back to back.
///
/// Nodes only mark that a path exists; a key is found whenever its whole path
/// exists, including when it is a proper prefix of a longer inserted key.
///
/// # Examples
///
/// ```
/// use qgraph::QGraph;
///
/// let mut graph = QGraph::new();
/// graph.insert("foo");
/// graph.insert("bar");
///
/// assert!(graph.contains("foo"));
/// assert!(!graph.contains("zoo"));
///
/// // "foo" and "bar" share their first five bits.
/// assert_eq!(graph.node_count(), 1 + 24 + 19);
/// assert_eq!(graph.seeks(), 2);
/// assert_eq!(graph.hits(), 1);
/// ```
pub struct Trie<B: Branching, P = Metadata> {
    nodes: Vec<TrieNode<B::Label, B::Children, P>>,
    branching: B,
    cursor: Option<NodeId>,
    last_hit: Option<NodeId>,
    stats: Stats,
    observer: Box<dyn Observer>,
}

impl QGraph {
    /// Creates an empty binary trie holding only its root.
    ///
    /// # Examples
    ///
    /// ```
    /// # use qgraph::QGraph;
    /// let graph = QGraph::new();
    /// assert_eq!(graph.node_count(), 1);
    /// assert_eq!(graph.query_count(), 0);
    /// ```
    pub fn new() -> Self {
        Trie::with_branching(Binary, 0)
    }

    /// Creates an empty binary trie with room for `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> Self {
        Trie::with_branching(Binary, capacity)
    }
}

impl ByteTrie {
    /// Creates an empty byte trie with the default child cap.
    pub fn new() -> Self {
        Trie::with_branching(ByteFanout::default(), 0)
    }

    /// Creates an empty byte trie whose nodes hold at most `max_children`
    /// children.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] unless `1 <= max_children <= 256`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use qgraph::ByteTrie;
    /// let mut trie = ByteTrie::with_max_children(1).unwrap();
    /// trie.insert("ab");
    /// trie.insert("b"); // the root is full
    ///
    /// assert!(trie.contains("ab"));
    /// assert!(!trie.contains("b"));
    /// assert_eq!(trie.stats().truncated_inserts, 1);
    /// ```
    pub fn with_max_children(max_children: usize) -> Result<Self> {
        Ok(Trie::with_branching(ByteFanout::new(max_children)?, 0))
    }
}

impl<B: Branching + Default, P> Default for Trie<B, P> {
    fn default() -> Self {
        Self::with_branching(B::default(), 0)
    }
}

impl<B: Branching, P> Trie<B, P> {
    /// Creates an empty trie using `branching`, reserving room for
    /// `capacity` nodes. Events go to a [`TracingObserver`].
    pub fn with_branching(branching: B, capacity: usize) -> Self {
        let mut nodes = Vec::with_capacity(capacity.max(1));
        nodes.push(TrieNode::root());
        Trie {
            nodes,
            branching,
            cursor: Some(NodeId::ROOT),
            last_hit: None,
            stats: Stats::default(),
            observer: Box::new(TracingObserver),
        }
    }

    /// Replaces the event observer.
    pub fn with_observer(mut self, observer: impl Observer + 'static) -> Self {
        self.observer = Box::new(observer);
        self
    }

    pub fn set_observer(&mut self, observer: impl Observer + 'static) {
        self.observer = Box::new(observer);
    }

    pub fn branching(&self) -> &B {
        &self.branching
    }

    /// Inserts a key, creating the nodes its path is missing.
    ///
    /// Inserting a key again creates nothing but still counts as a query.
    /// The empty key has an empty path and only counts as a query.
    ///
    /// # Examples
    ///
    /// ```
    /// # use qgraph::QGraph;
    /// let mut graph = QGraph::new();
    /// graph.insert("foo");
    /// graph.insert("foo");
    ///
    /// assert_eq!(graph.node_count(), 25);
    /// assert_eq!(graph.query_count(), 2);
    /// ```
    pub fn insert<K: AsBytes>(&mut self, key: K) {
        let bytes = key.as_bytes_vec();
        let path = self.branching.encode(&bytes);
        self.stats.queries_size_raw_bytes += bytes.len() as u64;

        self.cursor = Some(NodeId::ROOT);
        let mut current = NodeId::ROOT;
        let mut created = 0;
        let mut truncated = false;

        for (depth, &label) in path.iter().enumerate() {
            let children = &self.nodes[current.0].children;
            current = match self.branching.child(children, label) {
                Some(next) => next,
                None if self.branching.has_room(children) => {
                    created += 1;
                    self.create_child(current, label, depth + 1)
                }
                None => {
                    truncated = true;
                    break;
                }
            };
            self.cursor = Some(current);
        }

        if truncated {
            self.stats.truncated_inserts += 1;
        }
        self.stats.query_count += 1;
        self.observer.inserted(Inserted {
            node: current,
            raw_len: bytes.len(),
            path_len: path.len(),
            nodes_created: created,
            truncated,
        });
        self.reset_cursor();
    }

    /// Counted membership test.
    ///
    /// Every call is a seek and is recorded as either a hit or a miss. The
    /// empty key is never found: the root is a sentinel, not an entry.
    ///
    /// # Examples
    ///
    /// ```
    /// # use qgraph::QGraph;
    /// let mut graph = QGraph::new();
    /// graph.insert("foo");
    ///
    /// assert!(!graph.contains("bar"));
    /// assert_eq!(graph.misses(), 1);
    /// assert_eq!(graph.hits() + graph.misses(), graph.seeks());
    /// ```
    pub fn contains<K: AsBytes>(&mut self, key: K) -> bool {
        self.stats.seeks += 1;
        let bytes = key.as_bytes_vec();
        let path = self.branching.encode(&bytes);

        let found = self.seek(&path);
        match found {
            Some(node) => {
                self.stats.hits += 1;
                self.last_hit = Some(node);
            }
            None => self.stats.misses += 1,
        }

        self.observer.seeked(Seeked {
            raw_len: bytes.len(),
            path_len: path.len(),
            hit: found.is_some(),
        });
        found.is_some()
    }

    /// Finds the node a key's path ends on.
    ///
    /// Walks exactly like [`contains`](Self::contains) but leaves the
    /// hit/miss/seek counters alone.
    ///
    /// # Examples
    ///
    /// ```
    /// # use qgraph::QGraph;
    /// let mut graph = QGraph::new();
    /// graph.insert("zoo");
    ///
    /// let node = graph.lookup("zoo").unwrap();
    /// assert!(graph.node(node).unwrap().is_leaf());
    /// assert_eq!(graph.lookup("nothing"), None);
    /// assert_eq!(graph.seeks(), 0);
    /// ```
    pub fn lookup<K: AsBytes>(&mut self, key: K) -> Option<NodeId> {
        let bytes = key.as_bytes_vec();
        let path = self.branching.encode(&bytes);
        self.seek(&path)
    }

    /// Deletion is not supported; the trie is left untouched.
    ///
    /// # Errors
    ///
    /// Always returns [`Error::Unsupported`].
    pub fn delete<K: AsBytes>(&mut self, _key: K) -> Result<()> {
        Err(Error::Unsupported {
            operation: "delete",
        })
    }

    /// Applies `f` to the payload of the node `key` ends on, creating a
    /// default payload first if the node has none.
    ///
    /// Returns `false`, without calling `f`, when the key is absent.
    ///
    /// # Examples
    ///
    /// ```
    /// # use qgraph::QGraph;
    /// let mut graph = QGraph::new();
    /// graph.insert("foo");
    ///
    /// assert!(graph.update("foo", |meta| {
    ///     meta.set("first_name", "Ava");
    /// }));
    /// assert!(!graph.update("bar", |meta| {
    ///     meta.set("visits", 1u64);
    /// }));
    ///
    /// let node = graph.lookup("foo").unwrap();
    /// assert!(graph.payload(node).unwrap().get("first_name").is_some());
    /// ```
    pub fn update<K, F>(&mut self, key: K, f: F) -> bool
    where
        K: AsBytes,
        F: FnOnce(&mut P),
        P: Default,
    {
        let Some(node) = self.lookup(key) else {
            return false;
        };
        f(self.nodes[node.0].payload.get_or_insert_with(P::default));
        true
    }

    pub fn payload(&self, id: NodeId) -> Option<&P> {
        self.nodes.get(id.0)?.payload.as_ref()
    }

    pub fn payload_mut(&mut self, id: NodeId) -> Option<&mut P> {
        self.nodes.get_mut(id.0)?.payload.as_mut()
    }

    /// Attaches `payload` to a node, returning the one it replaces.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not produced by this trie.
    pub fn set_payload(&mut self, id: NodeId, payload: P) -> Option<P> {
        self.nodes[id.0].payload.replace(payload)
    }

    pub fn take_payload(&mut self, id: NodeId) -> Option<P> {
        self.nodes.get_mut(id.0)?.payload.take()
    }

    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    pub fn node(&self, id: NodeId) -> Option<NodeRef<'_, B, P>> {
        let node = self.nodes.get(id.0)?;
        Some(NodeRef {
            id,
            node,
            branching: &self.branching,
        })
    }

    /// Node matched by the most recent successful [`contains`](Self::contains).
    pub fn last_hit(&self) -> Option<NodeId> {
        self.last_hit
    }

    /// Node ids grouped by depth, breadth first; level 0 is the root.
    ///
    /// # Examples
    ///
    /// ```
    /// # use qgraph::QGraph;
    /// let mut graph = QGraph::new();
    /// graph.insert("01");
    /// graph.insert("00");
    ///
    /// let levels = graph.levels();
    /// assert_eq!(levels.iter().map(Vec::len).collect::<Vec<_>>(), vec![1, 1, 2]);
    /// ```
    pub fn levels(&self) -> Vec<Vec<NodeId>> {
        let mut levels = Vec::new();
        let mut frontier = vec![NodeId::ROOT];

        while !frontier.is_empty() {
            let next = frontier
                .iter()
                .flat_map(|id| self.branching.child_ids(&self.nodes[id.0].children))
                .collect();
            levels.push(std::mem::replace(&mut frontier, next));
        }

        levels
    }

    /// Number of nodes, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` while the trie holds only its root.
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    pub fn node_count(&self) -> u64 {
        self.stats.node_count
    }

    pub fn query_count(&self) -> u64 {
        self.stats.query_count
    }

    pub fn hits(&self) -> u64 {
        self.stats.hits
    }

    pub fn misses(&self) -> u64 {
        self.stats.misses
    }

    pub fn seeks(&self) -> u64 {
        self.stats.seeks
    }

    pub fn queries_size_raw_bytes(&self) -> u64 {
        self.stats.queries_size_raw_bytes
    }

    pub fn queries_size_actual_bytes(&self) -> u64 {
        self.stats.queries_size_actual_bytes
    }

    /// Read-only walk shared by `contains` and `lookup`.
    ///
    /// The cursor goes to `None` as soon as a slot is missing; the rest of
    /// the path is not examined.
    fn seek(&mut self, path: &[B::Label]) -> Option<NodeId> {
        self.cursor = Some(NodeId::ROOT);
        let mut walked = Vec::with_capacity(path.len());

        for &label in path {
            let Some(current) = self.cursor else {
                break;
            };
            self.cursor = self.branching.child(&self.nodes[current.0].children, label);
            if self.cursor.is_some() {
                walked.push(label);
            }
        }

        let found = match self.cursor {
            Some(node) if !path.is_empty() && walked.as_slice() == path => Some(node),
            _ => None,
        };
        self.reset_cursor();
        found
    }

    fn create_child(&mut self, parent: NodeId, label: B::Label, depth: usize) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(TrieNode::new(label));
        self.branching
            .attach(&mut self.nodes[parent.0].children, label, id);

        self.stats.node_count += 1;
        self.stats.queries_size_actual_bytes += 1;
        self.observer.node_created(NodeCreated {
            node: id,
            parent,
            depth,
        });
        id
    }

    fn reset_cursor(&mut self) {
        self.cursor = Some(NodeId::ROOT);
    }
}

impl<B: Branching, P, K: AsBytes> Extend<K> for Trie<B, P> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<B: Branching + Default, P, K: AsBytes> FromIterator<K> for Trie<B, P> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut trie = Trie::default();
        trie.extend(iter);
        trie
    }
}

impl<B: Branching + fmt::Debug, P> fmt::Debug for Trie<B, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Trie")
            .field("branching", &self.branching)
            .field("nodes", &self.nodes.len())
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}

/// Read-only view of one node.
pub struct NodeRef<'a, B: Branching, P> {
    id: NodeId,
    node: &'a TrieNode<B::Label, B::Children, P>,
    branching: &'a B,
}

impl<'a, B: Branching, P> NodeRef<'a, B, P> {
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Label of the edge into this node; `None` for the root.
    pub fn label(&self) -> Option<B::Label> {
        self.node.label
    }

    pub fn is_root(&self) -> bool {
        self.node.label.is_none()
    }

    pub fn is_leaf(&self) -> bool {
        self.degree() == 0
    }

    pub fn degree(&self) -> usize {
        self.branching.degree(&self.node.children)
    }

    pub fn child(&self, label: B::Label) -> Option<NodeId> {
        self.branching.child(&self.node.children, label)
    }

    pub fn children(&self) -> Vec<NodeId> {
        self.branching.child_ids(&self.node.children)
    }

    pub fn payload(&self) -> Option<&'a P> {
        self.node.payload.as_ref()
    }
}

impl<P> NodeRef<'_, Binary, P> {
    /// Child reached through a `0` bit.
    pub fn left(&self) -> Option<NodeId> {
        self.node.children[0]
    }

    /// Child reached through a `1` bit.
    pub fn right(&self) -> Option<NodeId> {
        self.node.children[1]
    }
}
