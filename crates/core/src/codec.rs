//! Compression and decompression pipelines.
//!
//! ```text
//! compress:   bytes -> FrequencyTable -> Forest -> HuffmanTree -> CodeTable
//!                   -> BitPacker -> Container -> container bytes
//! decompress: container bytes -> Container -> FrequencyTable -> CodeTable
//!                   -> BitUnpacker -> bytes
//! ```
//!
//! Each call owns its own tables and tree. A call either returns a complete
//! result or an error; nothing is produced partially.

use crate::bitio::BitPacker;
use crate::codebook::CodeTable;
use crate::container::Container;
use crate::error::Result;
use crate::frequency::FrequencyTable;
use crate::stats::CompressionStats;
use crate::tree::HuffmanTree;

/// Huffman codec over byte slices.
#[derive(Debug, Clone, Copy, Default)]
pub struct Codec;

impl Codec {
    /// Compress `data` into container bytes.
    ///
    /// # Errors
    /// Returns `Error::EmptyInput` if `data` is empty.
    pub fn compress(data: &[u8]) -> Result<Vec<u8>> {
        Self::compress_with_stats(data).map(|(bytes, _)| bytes)
    }

    /// Compress `data` and report where the container bytes went.
    pub fn compress_with_stats(data: &[u8]) -> Result<(Vec<u8>, CompressionStats)> {
        let frequencies = FrequencyTable::from_bytes(data)?;
        let tree = HuffmanTree::build(&frequencies)?;
        let table = CodeTable::from_tree(&tree)?;

        let mut packer = BitPacker::new();
        table.encode(data, &mut packer)?;
        let encoded_bits = packer.bit_len();

        let container = Container {
            frequencies,
            payload: packer.finish(),
        };
        let stats = CompressionStats::new(data.len(), table.max_code_len(), encoded_bits, &container);

        tracing::debug!(
            input_bytes = data.len(),
            symbols = stats.distinct_symbols,
            depth = tree.depth(),
            encoded_bits,
            padding = stats.padding_bits,
            container_bytes = stats.container_bytes(),
            "compressed"
        );

        Ok((container.serialize(), stats))
    }

    /// Decompress container bytes back into the original data.
    ///
    /// # Errors
    /// - `Error::MalformedContainer` if the descriptor or padding header is bad
    /// - `Error::CorruptPayload` if the bits do not decode to exactly the
    ///   number of symbols the descriptor records
    pub fn decompress(bytes: &[u8]) -> Result<Vec<u8>> {
        let container = Container::parse(bytes)?;
        let table = CodeTable::from_frequencies(&container.frequencies)?;

        let bits = container.bits()?;
        let encoded_bits = bits.len();
        let output = table.decode(bits, container.decoded_len())?;

        tracing::debug!(
            container_bytes = bytes.len(),
            encoded_bits,
            output_bytes = output.len(),
            "decompressed"
        );

        Ok(output)
    }
}

/// Shorthand for [`Codec::compress`].
pub fn compress(data: &[u8]) -> Result<Vec<u8>> {
    Codec::compress(data)
}

/// Shorthand for [`Codec::decompress`].
pub fn decompress(bytes: &[u8]) -> Result<Vec<u8>> {
    Codec::decompress(bytes)
}
