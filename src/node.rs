/// Index of a node inside a trie's arena.
///
/// Handles are only meaningful for the trie that produced them.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub(crate) const ROOT: NodeId = NodeId(0);

    /// Position of the node in creation order; the root is `0`.
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Clone, Debug)]
pub(crate) struct TrieNode<L, C, P> {
    /// Edge label leading into this node; `None` marks the root sentinel.
    pub(crate) label: Option<L>,
    pub(crate) children: C,
    pub(crate) payload: Option<P>,
}

impl<L, C: Default, P> TrieNode<L, C, P> {
    pub(crate) fn root() -> Self {
        TrieNode {
            label: None,
            children: C::default(),
            payload: None,
        }
    }

    pub(crate) fn new(label: L) -> Self {
        TrieNode {
            label: Some(label),
            children: C::default(),
            payload: None,
        }
    }
}

// Bit manipulation utilities for the 256-slot presence bitmap
pub(crate) fn set_bit(a: &mut [u64; 4], k: u8) {
    a[(k / 64) as usize] |= 1u64 << (k % 64);
}

pub(crate) fn test_bit(a: &[u64; 4], k: u8) -> bool {
    (a[(k / 64) as usize] >> (k % 64)) & 0x01 != 0
}

/// Number of set bits strictly below `k`.
pub(crate) fn popcount(a: &[u64; 4], k: u8) -> u16 {
    let word = (k / 64) as usize;
    let mut res: u16 = a.iter().take(word).map(|w| w.count_ones() as u16).sum();

    let below = k % 64;
    if below > 0 {
        res += (a[word] & ((1u64 << below) - 1)).count_ones() as u16;
    }

    res
}

pub(crate) fn total_bits(a: &[u64; 4]) -> usize {
    a.iter().map(|w| w.count_ones() as usize).sum()
}
