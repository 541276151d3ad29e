//! Huffman tree construction by forest reduction.
//!
//! # Algorithm
//!
//! 1. Create one leaf per symbol with a non-zero count, in symbol order
//! 2. Add a `PSEUDO_EOF` leaf of weight 1
//! 3. Pop the two lightest trees, join them under a new internal node
//!    (first popped on the left), push the result back
//! 4. Repeat until one tree remains
//!
//! Every tree gets a creation sequence number and ties on weight go to the
//! older tree, so identical counts always produce an identical tree.
//!
//! A forest that holds only the `PSEUDO_EOF` leaf (empty input) gets a
//! zero-weight placeholder leaf for symbol 0 before reduction. The root is
//! therefore always an internal node and every code is at least one bit.

use crate::format::PSEUDO_EOF;
use crate::frequency::FrequencyTable;
use huffpack_core::error::{HuffError, Result};
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

/// A node of the Huffman tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// A symbol (`0..=255` or `PSEUDO_EOF`).
    Leaf {
        /// Symbol value.
        symbol: u16,
        /// Occurrence count (0 for trees read from a tree header).
        weight: u64,
    },
    /// An inner node with exactly two children.
    Internal {
        /// Sum of the children's weights.
        weight: u64,
        /// Subtree reached by a `0` bit.
        left: Box<Node>,
        /// Subtree reached by a `1` bit.
        right: Box<Node>,
    },
}

impl Node {
    /// Create a leaf.
    pub fn leaf(symbol: u16, weight: u64) -> Self {
        Self::Leaf { symbol, weight }
    }

    /// Join two subtrees; the weight is the sum of theirs.
    pub fn internal(left: Node, right: Node) -> Self {
        Self::Internal {
            weight: left.weight() + right.weight(),
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Weight of this subtree.
    pub fn weight(&self) -> u64 {
        match self {
            Self::Leaf { weight, .. } | Self::Internal { weight, .. } => *weight,
        }
    }

    /// True for leaves.
    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf { .. })
    }

    fn leaf_count(&self) -> usize {
        match self {
            Self::Leaf { .. } => 1,
            Self::Internal { left, right, .. } => left.leaf_count() + right.leaf_count(),
        }
    }

    fn internal_count(&self) -> usize {
        match self {
            Self::Leaf { .. } => 0,
            Self::Internal { left, right, .. } => {
                1 + left.internal_count() + right.internal_count()
            }
        }
    }

    fn depth(&self) -> usize {
        match self {
            Self::Leaf { .. } => 0,
            Self::Internal { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }
}

/// A tree in the forest, ordered by `(weight, seq)`.
#[derive(Debug)]
struct ForestEntry {
    weight: u64,
    seq: u64,
    node: Node,
}

impl ForestEntry {
    fn key(&self) -> (u64, u64) {
        (self.weight, self.seq)
    }
}

impl PartialEq for ForestEntry {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for ForestEntry {}

impl PartialOrd for ForestEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ForestEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

/// Min-priority forest with creation-order tie breaking.
#[derive(Debug, Default)]
struct Forest {
    heap: BinaryHeap<Reverse<ForestEntry>>,
    next_seq: u64,
}

impl Forest {
    fn push(&mut self, node: Node) {
        let entry = ForestEntry {
            weight: node.weight(),
            seq: self.next_seq,
            node,
        };
        self.next_seq += 1;
        self.heap.push(Reverse(entry));
    }

    fn pop(&mut self) -> Option<Node> {
        self.heap.pop().map(|Reverse(entry)| entry.node)
    }

    fn len(&self) -> usize {
        self.heap.len()
    }
}

/// A Huffman tree whose root is always an internal node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    root: Node,
}

impl HuffmanTree {
    /// Build the tree for a frequency table.
    pub fn build(frequencies: &FrequencyTable) -> Self {
        let mut forest = Forest::default();
        for (symbol, count) in frequencies.iter_nonzero() {
            forest.push(Node::leaf(symbol as u16, count));
        }
        forest.push(Node::leaf(PSEUDO_EOF, 1));

        if forest.len() == 1 {
            forest.push(Node::leaf(0, 0));
        }

        let root = loop {
            let first = forest.pop().expect("BUG: forest is never empty during reduction");
            match forest.pop() {
                Some(second) => forest.push(Node::internal(first, second)),
                None => break first,
            }
        };

        tracing::trace!(
            leaves = root.leaf_count(),
            depth = root.depth(),
            weight = root.weight(),
            "built Huffman tree"
        );

        Self { root }
    }

    /// Wrap an existing root, e.g. one parsed from a tree header.
    ///
    /// A lone leaf cannot encode anything and is rejected.
    pub fn from_root(root: Node) -> Result<Self> {
        if root.is_leaf() {
            return Err(HuffError::invalid_tree("root is a leaf"));
        }
        Ok(Self { root })
    }

    /// The root node.
    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Total weight (input symbol count plus one for `PSEUDO_EOF`).
    pub fn weight(&self) -> u64 {
        self.root.weight()
    }

    /// Number of leaves.
    pub fn leaf_count(&self) -> usize {
        self.root.leaf_count()
    }

    /// Number of internal nodes, root included.
    pub fn internal_count(&self) -> usize {
        self.root.internal_count()
    }

    /// Length of the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        self.root.depth()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_symbol_gets_two_leaves() {
        let freq = FrequencyTable::from_bytes(b"aaaaa");
        let tree = HuffmanTree::build(&freq);

        assert_eq!(tree.leaf_count(), 2);
        assert_eq!(tree.internal_count(), 1);
        assert_eq!(tree.weight(), 6);
        assert_eq!(tree.depth(), 1);

        // PSEUDO_EOF (weight 1) is lighter and pops first.
        match tree.root() {
            Node::Internal { left, right, .. } => {
                assert_eq!(**left, Node::leaf(PSEUDO_EOF, 1));
                assert_eq!(**right, Node::leaf(b'a' as u16, 5));
            }
            Node::Leaf { .. } => panic!("root must be internal"),
        }
    }

    #[test]
    fn test_empty_input_placeholder() {
        let tree = HuffmanTree::build(&FrequencyTable::new());

        assert_eq!(tree.leaf_count(), 2);
        assert_eq!(tree.weight(), 1);
        match tree.root() {
            Node::Internal { left, right, .. } => {
                assert_eq!(**left, Node::leaf(0, 0));
                assert_eq!(**right, Node::leaf(PSEUDO_EOF, 1));
            }
            Node::Leaf { .. } => panic!("root must be internal"),
        }
    }

    #[test]
    fn test_ties_follow_creation_order() {
        // a, b and PSEUDO_EOF all weigh 1: a and b merge first.
        let tree = HuffmanTree::build(&FrequencyTable::from_bytes(b"ab"));
        let expected = Node::internal(
            Node::leaf(PSEUDO_EOF, 1),
            Node::internal(Node::leaf(b'a' as u16, 1), Node::leaf(b'b' as u16, 1)),
        );
        assert_eq!(tree.root(), &expected);
    }

    #[test]
    fn test_weights_and_counts() {
        let freq = FrequencyTable::from_bytes(b"abracadabra");
        let tree = HuffmanTree::build(&freq);

        assert_eq!(tree.weight(), 12);
        assert_eq!(tree.leaf_count(), 6);
        assert_eq!(tree.internal_count(), 5);
    }

    #[test]
    fn test_deterministic() {
        let data: Vec<u8> = (0..5000u32).map(|i| (i * i % 97) as u8).collect();
        let freq = FrequencyTable::from_bytes(&data);
        assert_eq!(HuffmanTree::build(&freq), HuffmanTree::build(&freq));
    }

    #[test]
    fn test_full_alphabet() {
        let data: Vec<u8> = (0..=255).collect();
        let tree = HuffmanTree::build(&FrequencyTable::from_bytes(&data));
        assert_eq!(tree.leaf_count(), 257);
        assert_eq!(tree.internal_count(), 256);
    }

    #[test]
    fn test_from_root_rejects_leaf() {
        let err = HuffmanTree::from_root(Node::leaf(PSEUDO_EOF, 0)).unwrap_err();
        assert!(err.is_format_error());
    }
}
