//! Huffman tree construction.
//!
//! Construction happens in two stages:
//! - [`Forest`]: one leaf per distinct symbol, held in a min-priority queue
//! - [`HuffmanTree`]: the result of repeatedly merging the two lightest trees
//!
//! # Tie-break
//!
//! Weight alone does not order nodes of equal frequency. Every node carries
//! a secondary `order` key: leaves take their symbol's first-seen position,
//! internal nodes take `S + n` where `S` is the number of leaves and `n` is
//! the merge that created them. The key is unique per node, so the same
//! frequency table always produces the same tree.
//!
//! # Storage
//!
//! Nodes live in an arena (`Vec<Node>`) and refer to their children by
//! index. Each internal node owns exactly its two children.

use crate::error::{Error, Result};
use crate::frequency::FrequencyTable;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Index of a node inside a tree's arena.
pub type NodeId = usize;

/// A node of the Huffman tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Node {
    /// A distinct input symbol and its occurrence count
    Leaf { symbol: u8, weight: u64 },

    /// Sum of its children's weights. `right` is `None` only for the root
    /// of a single-symbol tree.
    Internal {
        weight: u64,
        left: NodeId,
        right: Option<NodeId>,
    },
}

impl Node {
    pub fn weight(&self) -> u64 {
        match *self {
            Node::Leaf { weight, .. } | Node::Internal { weight, .. } => weight,
        }
    }
}

/// Heap entry: a node together with its priority key.
#[derive(Debug, Clone, Copy)]
struct Ranked {
    weight: u64,
    order: usize,
    id: NodeId,
}

// Implement ordering for the heap (min-heap: lightest, then earliest first)
impl PartialEq for Ranked {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Ranked {}

impl PartialOrd for Ranked {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Ranked {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering so BinaryHeap pops the minimum
        (other.weight, other.order).cmp(&(self.weight, self.order))
    }
}

/// Initial forest of single-leaf trees, ordered by weight then first-seen.
#[derive(Debug, Clone)]
pub struct Forest {
    nodes: Vec<Node>,
    heap: BinaryHeap<Ranked>,
}

impl Forest {
    /// Create one leaf per entry of `frequencies`.
    pub fn from_frequencies(frequencies: &FrequencyTable) -> Self {
        let mut nodes = Vec::with_capacity(frequencies.len() * 2);
        let mut heap = BinaryHeap::with_capacity(frequencies.len());

        for (order, (symbol, count)) in frequencies.iter().enumerate() {
            let weight = count as u64;
            let id = nodes.len();
            nodes.push(Node::Leaf { symbol, weight });
            heap.push(Ranked { weight, order, id });
        }

        Self { nodes, heap }
    }

    /// Number of trees currently in the forest.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Merge trees until a single root remains.
    ///
    /// # Errors
    /// Returns `Error::EmptyInput` if the forest holds no trees.
    pub fn into_tree(mut self) -> Result<HuffmanTree> {
        let leaves = self.heap.len();
        let mut merges = 0usize;

        if leaves == 1 {
            let only = self.heap.pop().ok_or(Error::EmptyInput)?;
            let root = self.push_internal(only.weight, only.id, None);
            tracing::trace!(weight = only.weight, "single-symbol tree");
            return Ok(HuffmanTree {
                nodes: self.nodes,
                root,
                leaves,
            });
        }

        loop {
            let first = self.heap.pop().ok_or(Error::EmptyInput)?;
            let Some(second) = self.heap.pop() else {
                return Ok(HuffmanTree {
                    nodes: self.nodes,
                    root: first.id,
                    leaves,
                });
            };

            let weight = first.weight + second.weight;
            let id = self.push_internal(weight, first.id, Some(second.id));
            tracing::trace!(
                left = first.id,
                right = second.id,
                weight,
                "merged nodes"
            );

            self.heap.push(Ranked {
                weight,
                order: leaves + merges,
                id,
            });
            merges += 1;
        }
    }

    fn push_internal(&mut self, weight: u64, left: NodeId, right: Option<NodeId>) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(Node::Internal {
            weight,
            left,
            right,
        });
        id
    }
}

/// A complete Huffman tree for one frequency table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    nodes: Vec<Node>,
    root: NodeId,
    leaves: usize,
}

impl HuffmanTree {
    /// Build the tree for `frequencies`.
    pub fn build(frequencies: &FrequencyTable) -> Result<Self> {
        Forest::from_frequencies(frequencies).into_tree()
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Look up a node by id.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    pub fn leaf_count(&self) -> usize {
        self.leaves
    }

    pub fn internal_count(&self) -> usize {
        self.nodes.len() - self.leaves
    }

    /// Length of the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        let mut max = 0;
        let mut stack = vec![(self.root, 0usize)];

        while let Some((id, depth)) = stack.pop() {
            match self.nodes[id] {
                Node::Leaf { .. } => max = max.max(depth),
                Node::Internal { left, right, .. } => {
                    stack.push((left, depth + 1));
                    if let Some(right) = right {
                        stack.push((right, depth + 1));
                    }
                }
            }
        }

        max
    }
}
