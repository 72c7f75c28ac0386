//! Self-describing container serialization and parsing.
//!
//! A container holds everything decompression needs:
//! - Descriptor: the frequency table, from which the code table is rebuilt
//! - Payload: padding amount and packed code bits
//!
//! # Container Format
//!
//! ```text
//! +----------------------+
//! | symbol_count (4)     |  u32 little-endian, 1..=256
//! +----------------------+
//! | symbol (1)           |  \
//! | count (4)            |   } symbol_count times, first-seen order,
//! +----------------------+  /  count is u32 little-endian
//! | padding_amount (1)   |  u8, 1..=8
//! +----------------------+
//! | packed bits          |  MSB-first, byte-aligned
//! | (variable)           |
//! +----------------------+
//! ```
//!
//! Codes are never stored. The decoder feeds the descriptor through the same
//! deterministic tree construction and gets the identical code table.

use crate::bitio::{split_payload, BitUnpacker};
use crate::error::{ContainerError, Result};
use crate::frequency::{FrequencyTable, ALPHABET_SIZE};

/// Size of the `symbol_count` field in bytes
const SYMBOL_COUNT_SIZE: usize = 4;

/// Size of one `(symbol, count)` descriptor entry in bytes
const ENTRY_SIZE: usize = 5;

/// A parsed container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container {
    /// Occurrence counts in first-seen order
    pub frequencies: FrequencyTable,

    /// Padding byte followed by packed bits
    pub payload: Vec<u8>,
}

impl Container {
    /// Size of the descriptor (symbol count plus entries) in bytes.
    pub fn descriptor_len(&self) -> usize {
        SYMBOL_COUNT_SIZE + self.frequencies.len() * ENTRY_SIZE
    }

    /// Padding amount recorded in the payload header.
    pub fn padding(&self) -> Option<u8> {
        self.payload.first().copied()
    }

    /// Number of symbols decompression must produce.
    pub fn decoded_len(&self) -> u64 {
        self.frequencies.total()
    }

    /// Iterate the payload's data bits.
    pub fn bits(&self) -> Result<BitUnpacker<'_>> {
        BitUnpacker::new(&self.payload)
    }

    /// Serialize into the container byte format.
    pub fn serialize(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.descriptor_len() + self.payload.len());

        bytes.extend_from_slice(&(self.frequencies.len() as u32).to_le_bytes());
        for (symbol, count) in self.frequencies.iter() {
            bytes.push(symbol);
            bytes.extend_from_slice(&count.to_le_bytes());
        }
        bytes.extend_from_slice(&self.payload);

        bytes
    }

    /// Parse a container from bytes.
    ///
    /// # Errors
    /// - `ContainerError::Truncated` if the descriptor is cut short
    /// - `ContainerError::SymbolCountOutOfRange` if the count is 0 or > 256
    /// - `ContainerError::DuplicateSymbol` / `ZeroCount` for bad entries
    /// - `ContainerError::PaddingOutOfRange` / `PaddingExceedsPayload` for a
    ///   bad payload header
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        let header = take(bytes, 0, SYMBOL_COUNT_SIZE, "symbol count")?;
        let symbol_count = u32::from_le_bytes([header[0], header[1], header[2], header[3]]);

        if symbol_count == 0 || symbol_count as usize > ALPHABET_SIZE {
            return Err(ContainerError::SymbolCountOutOfRange(symbol_count).into());
        }

        let entries_len = symbol_count as usize * ENTRY_SIZE;
        let entries = take(bytes, SYMBOL_COUNT_SIZE, entries_len, "descriptor entries")?;
        let frequencies = FrequencyTable::from_pairs(entries.chunks_exact(ENTRY_SIZE).map(
            |entry| {
                let count = u32::from_le_bytes([entry[1], entry[2], entry[3], entry[4]]);
                (entry[0], count)
            },
        ))?;

        let payload = &bytes[SYMBOL_COUNT_SIZE + entries_len..];
        split_payload(payload)?;

        tracing::debug!(
            symbols = frequencies.len(),
            payload_bytes = payload.len(),
            "parsed container"
        );

        Ok(Self {
            frequencies,
            payload: payload.to_vec(),
        })
    }
}

/// Slice `len` bytes at `start`, or report which field was truncated.
fn take<'a>(bytes: &'a [u8], start: usize, len: usize, field: &'static str) -> Result<&'a [u8]> {
    bytes.get(start..start + len).ok_or_else(|| {
        ContainerError::Truncated {
            field,
            required: len,
            actual: bytes.len().saturating_sub(start),
        }
        .into()
    })
}
