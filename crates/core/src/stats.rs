//! Size accounting for a single compression run.
//!
//! Gives visibility into where container bytes go:
//! - descriptor overhead (frequency table)
//! - payload (padding byte plus packed code bits)
//! - compression ratio against the input

use crate::container::Container;

/// Statistics for one `compress` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompressionStats {
    /// Bytes of input
    pub input_bytes: u64,

    /// Distinct symbols in the input
    pub distinct_symbols: usize,

    /// Length of the longest code
    pub max_code_len: usize,

    /// Encoded bit length before padding (`L`)
    pub encoded_bits: u64,

    /// Padding amount written to the payload (`P`)
    pub padding_bits: u8,

    /// Descriptor size in bytes
    pub descriptor_bytes: u64,

    /// Payload size in bytes, including the padding byte
    pub payload_bytes: u64,
}

impl CompressionStats {
    pub(crate) fn new(input_bytes: usize, max_code_len: usize, encoded_bits: usize, container: &Container) -> Self {
        Self {
            input_bytes: input_bytes as u64,
            distinct_symbols: container.frequencies.len(),
            max_code_len,
            encoded_bits: encoded_bits as u64,
            padding_bits: container.padding().unwrap_or(0),
            descriptor_bytes: container.descriptor_len() as u64,
            payload_bytes: container.payload.len() as u64,
        }
    }

    /// Total container size in bytes.
    pub fn container_bytes(&self) -> u64 {
        self.descriptor_bytes + self.payload_bytes
    }

    /// Container size relative to input (container / input).
    ///
    /// Returns 0.0 for empty input.
    pub fn compression_ratio(&self) -> f64 {
        if self.input_bytes == 0 {
            0.0
        } else {
            self.container_bytes() as f64 / self.input_bytes as f64
        }
    }

    /// Payload size relative to input, ignoring the descriptor.
    pub fn payload_ratio(&self) -> f64 {
        if self.input_bytes == 0 {
            0.0
        } else {
            self.payload_bytes as f64 / self.input_bytes as f64
        }
    }

    /// Average code length in bits per input symbol.
    pub fn bits_per_symbol(&self) -> f64 {
        if self.input_bytes == 0 {
            0.0
        } else {
            self.encoded_bits as f64 / self.input_bytes as f64
        }
    }

    /// Print a human-readable summary to stdout.
    pub fn print_summary(&self) {
        println!("\n=== Compression Summary ===");
        println!("Input:      {} bytes", self.input_bytes);
        println!("Container:  {} bytes", self.container_bytes());
        println!("  descriptor: {} bytes ({} symbols)", self.descriptor_bytes, self.distinct_symbols);
        println!("  payload:    {} bytes", self.payload_bytes);
        println!();
        println!("Encoded bits: {} (+{} padding)", self.encoded_bits, self.padding_bits);
        println!("Longest code: {} bits", self.max_code_len);
        println!("Bits/symbol:  {:.3}", self.bits_per_symbol());
        println!("Ratio:        {:.1}%", self.compression_ratio() * 100.0);
        println!();
    }

    /// Export as `key=value` lines (for parsing/testing).
    pub fn export_text(&self) -> String {
        format!(
            "input_bytes={}\n\
             distinct_symbols={}\n\
             max_code_len={}\n\
             encoded_bits={}\n\
             padding_bits={}\n\
             descriptor_bytes={}\n\
             payload_bytes={}\n\
             container_bytes={}\n\
             compression_ratio={:.4}\n",
            self.input_bytes,
            self.distinct_symbols,
            self.max_code_len,
            self.encoded_bits,
            self.padding_bits,
            self.descriptor_bytes,
            self.payload_bytes,
            self.container_bytes(),
            self.compression_ratio(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats() -> CompressionStats {
        CompressionStats {
            input_bytes: 1000,
            distinct_symbols: 4,
            max_code_len: 3,
            encoded_bits: 1750,
            padding_bits: 2,
            descriptor_bytes: 24,
            payload_bytes: 220,
        }
    }

    #[test]
    fn test_ratios() {
        let stats = stats();

        assert_eq!(stats.container_bytes(), 244);
        assert_eq!(stats.compression_ratio(), 0.244);
        assert_eq!(stats.payload_ratio(), 0.22);
        assert_eq!(stats.bits_per_symbol(), 1.75);
    }

    #[test]
    fn test_export_text() {
        let text = stats().export_text();

        assert!(text.contains("input_bytes=1000"));
        assert!(text.contains("container_bytes=244"));
        assert!(text.contains("compression_ratio=0.2440"));
    }
}
