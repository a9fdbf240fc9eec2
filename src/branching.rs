//! Node fan-out strategies.
//!
//! The descent algorithm in [`Trie`](crate::Trie) is shared; a [`Branching`]
//! decides how a key becomes a label path and how a node stores its children.

use std::fmt;

use crate::bit_key::{Bit, BitKey};
use crate::error::{Error, Result};
use crate::node::{popcount, set_bit, test_bit, total_bits, NodeId};

/// Default per-node child cap of the byte-branching trie.
pub const DEFAULT_MAX_CHILDREN: usize = 30;

/// Largest possible fan-out of a byte-labelled node.
pub const MAX_FANOUT: usize = 256;

pub trait Branching {
    /// Edge label type.
    type Label: Copy + Eq + fmt::Debug;
    /// Per-node child storage.
    type Children: Default + Clone + fmt::Debug;

    /// Turns raw key bytes into the label path walked from the root.
    fn encode(&self, bytes: &[u8]) -> Vec<Self::Label>;

    fn child(&self, children: &Self::Children, label: Self::Label) -> Option<NodeId>;

    /// Whether another child may be attached.
    fn has_room(&self, children: &Self::Children) -> bool;

    /// Attaches `child` under `label`. The slot must be empty and the node
    /// must have room.
    fn attach(&self, children: &mut Self::Children, label: Self::Label, child: NodeId);

    /// Children in label order.
    fn child_ids(&self, children: &Self::Children) -> Vec<NodeId>;

    fn degree(&self, children: &Self::Children) -> usize {
        self.child_ids(children).len()
    }
}

/// Two-way branching over the bits of a [`BitKey`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Binary;

impl Branching for Binary {
    type Label = Bit;
    /// Left (`0`) and right (`1`) slots.
    type Children = [Option<NodeId>; 2];

    fn encode(&self, bytes: &[u8]) -> Vec<Bit> {
        BitKey::encode(bytes).bits().collect()
    }

    #[inline]
    fn child(&self, children: &Self::Children, label: Bit) -> Option<NodeId> {
        children[label.slot()]
    }

    #[inline]
    fn has_room(&self, _children: &Self::Children) -> bool {
        true
    }

    fn attach(&self, children: &mut Self::Children, label: Bit, child: NodeId) {
        debug_assert!(children[label.slot()].is_none());
        children[label.slot()] = Some(child);
    }

    fn child_ids(&self, children: &Self::Children) -> Vec<NodeId> {
        children.iter().flatten().copied().collect()
    }

    fn degree(&self, children: &Self::Children) -> usize {
        children.iter().filter(|c| c.is_some()).count()
    }
}

/// Children of a byte-labelled node: a presence bitmap plus a dense list
/// ordered by byte value.
#[derive(Clone, Debug, Default)]
pub struct ByteChildren {
    is_present: [u64; 4],
    children: Vec<NodeId>,
}

/// Up to 256-way branching on raw bytes, capped per node.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ByteFanout {
    max_children: usize,
}

impl ByteFanout {
    /// Creates a fan-out allowing at most `max_children` children per node.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] unless `1 <= max_children <= 256`.
    pub fn new(max_children: usize) -> Result<Self> {
        if max_children == 0 || max_children > MAX_FANOUT {
            return Err(Error::InvalidConfig(format!(
                "max_children must be within 1..={MAX_FANOUT}, got {max_children}"
            )));
        }
        Ok(ByteFanout { max_children })
    }

    pub fn max_children(&self) -> usize {
        self.max_children
    }
}

impl Default for ByteFanout {
    fn default() -> Self {
        ByteFanout {
            max_children: DEFAULT_MAX_CHILDREN,
        }
    }
}

impl Branching for ByteFanout {
    type Label = u8;
    type Children = ByteChildren;

    fn encode(&self, bytes: &[u8]) -> Vec<u8> {
        bytes.to_vec()
    }

    #[inline]
    fn child(&self, children: &ByteChildren, label: u8) -> Option<NodeId> {
        if !test_bit(&children.is_present, label) {
            return None;
        }
        let pos = popcount(&children.is_present, label) as usize;
        children.children.get(pos).copied()
    }

    #[inline]
    fn has_room(&self, children: &ByteChildren) -> bool {
        total_bits(&children.is_present) < self.max_children
    }

    fn attach(&self, children: &mut ByteChildren, label: u8, child: NodeId) {
        debug_assert!(!test_bit(&children.is_present, label));
        let pos = popcount(&children.is_present, label) as usize;
        children.children.insert(pos, child);
        set_bit(&mut children.is_present, label);
    }

    fn child_ids(&self, children: &ByteChildren) -> Vec<NodeId> {
        children.children.clone()
    }

    fn degree(&self, children: &ByteChildren) -> usize {
        children.children.len()
    }
}
