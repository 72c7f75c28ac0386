//! Code table derived from a Huffman tree.
//!
//! Codes are assigned only at leaves, so the table is prefix-free by
//! construction. Descending left appends `0`, descending right appends `1`.
//!
//! The table keeps both directions:
//! - forward: symbol -> code, used by the encoder
//! - reverse: code -> symbol, used by the decoder

use crate::bitio::BitPacker;
use crate::error::{Error, PayloadError, Result};
use crate::frequency::FrequencyTable;
use crate::tree::{HuffmanTree, Node};
use std::collections::HashMap;
use std::fmt;

/// A variable-length bit string, stored MSB-first in the low `len` bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Code {
    bits: u64,
    len: u8,
}

impl Code {
    /// Longest code a `Code` can hold.
    ///
    /// Counts are u32, so the total weight stays below 2^40 and the deepest
    /// possible Huffman tree is well short of this.
    pub const MAX_LEN: usize = 64;

    /// The zero-length code.
    pub const fn empty() -> Self {
        Self { bits: 0, len: 0 }
    }

    /// Append one bit, or `None` if the code is already `MAX_LEN` long.
    pub fn push(self, bit: bool) -> Option<Self> {
        if self.len() >= Self::MAX_LEN {
            return None;
        }
        Some(Self {
            bits: (self.bits << 1) | bit as u64,
            len: self.len + 1,
        })
    }

    pub fn bits(&self) -> u64 {
        self.bits
    }

    pub fn len(&self) -> usize {
        self.len as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// True if `self` is a (non-strict) prefix of `other`.
    pub fn is_prefix_of(&self, other: &Code) -> bool {
        if self.len > other.len {
            return false;
        }
        let shift = other.len - self.len;
        // shift can be 64 when self is empty
        other.bits.checked_shr(shift as u32).unwrap_or(0) == self.bits
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in (0..self.len()).rev() {
            let bit = (self.bits >> i) & 1;
            write!(f, "{}", bit)?;
        }
        Ok(())
    }
}

/// Forward and reverse code mappings, always mutually inverse.
#[derive(Debug, Clone)]
pub struct CodeTable {
    forward: HashMap<u8, Code>,
    reverse: HashMap<Code, u8>,
    max_len: usize,
}

impl CodeTable {
    /// Assign codes by a depth-first walk of `tree`.
    ///
    /// # Errors
    /// Returns `Error::CodeTooLong` if a leaf is deeper than `Code::MAX_LEN`.
    pub fn from_tree(tree: &HuffmanTree) -> Result<Self> {
        let mut forward = HashMap::with_capacity(tree.leaf_count());
        let mut reverse = HashMap::with_capacity(tree.leaf_count());
        let mut max_len = 0;

        let mut stack = vec![(tree.root(), Code::empty())];
        while let Some((id, code)) = stack.pop() {
            match *tree.node(id) {
                Node::Leaf { symbol, .. } => {
                    // The single-symbol root is internal, so leaves sit at depth >= 1
                    debug_assert!(!code.is_empty());
                    max_len = max_len.max(code.len());
                    forward.insert(symbol, code);
                    reverse.insert(code, symbol);
                }
                Node::Internal { left, right, .. } => {
                    let child = |bit| {
                        code.push(bit).ok_or(Error::CodeTooLong {
                            length: code.len() + 1,
                        })
                    };
                    // Right first so the left subtree is walked first
                    if let Some(right) = right {
                        stack.push((right, child(true)?));
                    }
                    stack.push((left, child(false)?));
                }
            }
        }

        Ok(Self {
            forward,
            reverse,
            max_len,
        })
    }

    /// Build the tree for `frequencies` and derive its codes.
    pub fn from_frequencies(frequencies: &FrequencyTable) -> Result<Self> {
        Self::from_tree(&HuffmanTree::build(frequencies)?)
    }

    /// Code assigned to `symbol`.
    pub fn code(&self, symbol: u8) -> Option<Code> {
        self.forward.get(&symbol).copied()
    }

    /// Symbol whose code is exactly `code`.
    pub fn symbol(&self, code: &Code) -> Option<u8> {
        self.reverse.get(code).copied()
    }

    /// Number of symbols with a code.
    pub fn len(&self) -> usize {
        self.forward.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }

    /// Length of the longest code.
    pub fn max_code_len(&self) -> usize {
        self.max_len
    }

    /// Iterate `(symbol, code)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, Code)> + '_ {
        self.forward.iter().map(|(&symbol, &code)| (symbol, code))
    }

    /// Append the code of every byte of `data` to `packer`, in input order.
    ///
    /// # Errors
    /// Returns `Error::UnknownSymbol` for a byte with no code.
    pub fn encode(&self, data: &[u8], packer: &mut BitPacker) -> Result<()> {
        for &symbol in data {
            let code = self.code(symbol).ok_or(Error::UnknownSymbol(symbol))?;
            packer.push_code(code)?;
        }
        Ok(())
    }

    /// Decode a bit sequence into exactly `expected` symbols.
    ///
    /// Bits accumulate into a candidate code; each time the candidate is a
    /// key of the reverse map its symbol is emitted and the candidate resets.
    ///
    /// # Errors
    /// - `PayloadError::InvalidCode` if the candidate reaches the longest
    ///   code length without matching
    /// - `PayloadError::TooManySymbols` if more than `expected` symbols decode
    /// - `PayloadError::UnresolvedCode` if bits are left over at the end
    /// - `PayloadError::TooFewSymbols` if fewer than `expected` symbols decode
    pub fn decode<I>(&self, bits: I, expected: u64) -> Result<Vec<u8>>
    where
        I: IntoIterator<Item = bool>,
    {
        let capacity = usize::try_from(expected).unwrap_or(usize::MAX).min(1 << 24);
        let mut output = Vec::with_capacity(capacity);
        let mut candidate = Code::empty();

        for (position, bit) in bits.into_iter().enumerate() {
            candidate = candidate
                .push(bit)
                .ok_or(PayloadError::InvalidCode { position })?;

            match self.symbol(&candidate) {
                Some(symbol) => {
                    if output.len() as u64 == expected {
                        return Err(PayloadError::TooManySymbols { expected }.into());
                    }
                    output.push(symbol);
                    candidate = Code::empty();
                }
                None if candidate.len() >= self.max_len => {
                    return Err(PayloadError::InvalidCode { position }.into());
                }
                None => {}
            }
        }

        if !candidate.is_empty() {
            return Err(PayloadError::UnresolvedCode {
                bits: candidate.len(),
            }
            .into());
        }

        if output.len() as u64 != expected {
            return Err(PayloadError::TooFewSymbols {
                expected,
                actual: output.len() as u64,
            }
            .into());
        }

        Ok(output)
    }
}
