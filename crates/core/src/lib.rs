//! huffpack-core: lossless Huffman compression with a self-describing container
//!
//! This library provides every stage of the codec:
//! - Counts symbol frequencies in the input
//! - Builds a deterministic Huffman tree and derives a prefix-free code table
//! - Packs the encoded bits into bytes with explicit padding
//! - Writes a container that carries its own frequency descriptor, so
//!   decompression never depends on state from the compression run
//!
//! # Architecture
//!
//! - `frequency`: Symbol counting in first-seen order
//! - `tree`: Forest and Huffman tree construction (arena-backed)
//! - `codebook`: Code table derivation, encoding and decoding
//! - `bitio`: Bit-level writing/reading and payload padding
//! - `container`: Container serialization and parsing
//! - `codec`: The compress/decompress pipelines
//! - `stats`: Size accounting for a compression run
//!
//! # Example
//! ```
//! let container = huffpack_core::compress(b"abracadabra").unwrap();
//! let restored = huffpack_core::decompress(&container).unwrap();
//! assert_eq!(restored, b"abracadabra");
//! ```

pub mod bitio;
pub mod codebook;
pub mod codec;
pub mod container;
pub mod error;
pub mod frequency;
pub mod stats;
pub mod tree;

// Re-export commonly used types
pub use codec::{compress, decompress, Codec};
pub use error::{Error, Result};
pub use stats::CompressionStats;
