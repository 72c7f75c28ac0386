//! Symbol frequency counting.
//!
//! A [`FrequencyTable`] records, for every distinct byte in the input, how
//! many times it occurs. Entries are kept in first-seen order: that order is
//! the tie-break key for tree construction and the order in which the
//! container descriptor lists its `(symbol, count)` pairs.

use crate::error::{ContainerError, Error, Result};

/// Number of distinct values a symbol can take.
pub const ALPHABET_SIZE: usize = 256;

/// Sentinel in `slots` for "symbol not seen yet".
const UNSEEN: u16 = u16::MAX;

/// Occurrence counts for each distinct symbol, in first-seen order.
///
/// # Invariants
/// - every count is positive
/// - every symbol appears at most once
/// - at least one symbol is present
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    /// `(symbol, count)` in the order symbols were first encountered
    entries: Vec<(u8, u32)>,
    /// Index into `entries` for each symbol, or `UNSEEN`
    slots: [u16; ALPHABET_SIZE],
}

impl FrequencyTable {
    /// Count every byte of `data`.
    ///
    /// # Errors
    /// - `Error::EmptyInput` if `data` is empty
    /// - `Error::InputTooLarge` if one symbol occurs more than `u32::MAX` times
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        if data.is_empty() {
            return Err(Error::EmptyInput);
        }

        let mut table = Self::empty();
        for &symbol in data {
            let idx = table.slot_or_insert(symbol);
            let count = &mut table.entries[idx].1;
            *count = count
                .checked_add(1)
                .ok_or(Error::InputTooLarge { symbol })?;
        }

        Ok(table)
    }

    /// Rebuild a table from descriptor pairs, keeping their order.
    ///
    /// # Errors
    /// - `ContainerError::SymbolCountOutOfRange` if `pairs` is empty
    /// - `ContainerError::DuplicateSymbol` if a symbol repeats
    /// - `ContainerError::ZeroCount` if a count is zero
    pub fn from_pairs<I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (u8, u32)>,
    {
        let mut table = Self::empty();
        for (symbol, count) in pairs {
            if count == 0 {
                return Err(ContainerError::ZeroCount(symbol).into());
            }
            if table.slots[symbol as usize] != UNSEEN {
                return Err(ContainerError::DuplicateSymbol(symbol).into());
            }
            table.slot_or_insert(symbol);
            let idx = table.entries.len() - 1;
            table.entries[idx].1 = count;
        }

        if table.entries.is_empty() {
            return Err(ContainerError::SymbolCountOutOfRange(0).into());
        }

        Ok(table)
    }

    fn empty() -> Self {
        Self {
            entries: Vec::new(),
            slots: [UNSEEN; ALPHABET_SIZE],
        }
    }

    fn slot_or_insert(&mut self, symbol: u8) -> usize {
        let slot = &mut self.slots[symbol as usize];
        if *slot == UNSEEN {
            *slot = self.entries.len() as u16;
            self.entries.push((symbol, 0));
        }
        *slot as usize
    }

    /// Count for `symbol`, or `None` if it never occurred.
    pub fn get(&self, symbol: u8) -> Option<u32> {
        match self.slots[symbol as usize] {
            UNSEEN => None,
            idx => Some(self.entries[idx as usize].1),
        }
    }

    /// Position of `symbol` in first-seen order.
    pub fn first_seen(&self, symbol: u8) -> Option<usize> {
        match self.slots[symbol as usize] {
            UNSEEN => None,
            idx => Some(idx as usize),
        }
    }

    /// Number of distinct symbols.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false for a constructed table; present for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of symbols counted.
    pub fn total(&self) -> u64 {
        self.entries.iter().map(|&(_, count)| count as u64).sum()
    }

    /// Iterate `(symbol, count)` pairs in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u32)> + '_ {
        self.entries.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_are_exact() {
        let table = FrequencyTable::from_bytes(b"abracadabra").unwrap();

        assert_eq!(table.get(b'a'), Some(5));
        assert_eq!(table.get(b'b'), Some(2));
        assert_eq!(table.get(b'r'), Some(2));
        assert_eq!(table.get(b'c'), Some(1));
        assert_eq!(table.get(b'd'), Some(1));
        assert_eq!(table.get(b'z'), None);
        assert_eq!(table.total(), 11);
        assert_eq!(table.len(), 5);
    }

    #[test]
    fn test_first_seen_order() {
        let table = FrequencyTable::from_bytes(b"cabbac").unwrap();
        let order: Vec<u8> = table.iter().map(|(s, _)| s).collect();

        assert_eq!(order, vec![b'c', b'a', b'b']);
        assert_eq!(table.first_seen(b'b'), Some(2));
    }

    #[test]
    fn test_empty_input() {
        assert!(matches!(
            FrequencyTable::from_bytes(b""),
            Err(Error::EmptyInput)
        ));
    }

    #[test]
    fn test_from_pairs_matches_counting() {
        let counted = FrequencyTable::from_bytes(b"hello").unwrap();
        let rebuilt = FrequencyTable::from_pairs(counted.iter()).unwrap();

        assert_eq!(counted, rebuilt);
    }

    #[test]
    fn test_from_pairs_rejects_duplicates() {
        let result = FrequencyTable::from_pairs([(b'a', 1), (b'b', 2), (b'a', 3)]);
        assert!(matches!(
            result,
            Err(Error::MalformedContainer(ContainerError::DuplicateSymbol(b'a')))
        ));
    }

    #[test]
    fn test_from_pairs_rejects_zero_count() {
        let result = FrequencyTable::from_pairs([(b'x', 0)]);
        assert!(matches!(
            result,
            Err(Error::MalformedContainer(ContainerError::ZeroCount(b'x')))
        ));
    }

    #[test]
    fn test_from_pairs_rejects_empty() {
        let result = FrequencyTable::from_pairs(std::iter::empty());
        assert!(matches!(
            result,
            Err(Error::MalformedContainer(
                ContainerError::SymbolCountOutOfRange(0)
            ))
        ));
    }

    #[test]
    fn test_full_alphabet() {
        let data: Vec<u8> = (0..=255).collect();
        let table = FrequencyTable::from_bytes(&data).unwrap();

        assert_eq!(table.len(), ALPHABET_SIZE);
        assert!(table.iter().all(|(_, count)| count == 1));
    }
}
