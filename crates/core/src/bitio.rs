//! Bit-level packing of encoded symbols.
//!
//! [`BitWriter`] and [`BitReader`] move bits in and out of byte buffers in
//! MSB-first order. [`BitPacker`] and [`BitUnpacker`] build on them to
//! produce and consume the container payload.
//!
//! # Payload Layout
//!
//! ```text
//! +---------------------+
//! | padding amount (1)  |  u8, always 1..=8
//! +---------------------+
//! | packed bits         |  code bits MSB-first, then `padding` zero bits
//! +---------------------+
//! ```
//!
//! # Padding Rules
//! - `L mod 8 != 0`: pad with `8 - (L mod 8)` zero bits
//! - `L mod 8 == 0`: pad with a full byte of 8 zero bits
//!
//! Padding is never zero, so a padding byte of 0 is always malformed.
//!
//! # Example
//! ```
//! use huffpack_core::bitio::{BitPacker, BitUnpacker};
//! use huffpack_core::codebook::Code;
//!
//! let code = [true, false, true]
//!     .into_iter()
//!     .fold(Code::empty(), |c, bit| c.push(bit).unwrap());
//!
//! let mut packer = BitPacker::new();
//! packer.push_code(code).unwrap();
//! let payload = packer.finish();
//! assert_eq!(payload, vec![5, 0b1010_0000]);
//!
//! let bits: Vec<bool> = BitUnpacker::new(&payload).unwrap().collect();
//! assert_eq!(bits, vec![true, false, true]);
//! ```

use crate::codebook::Code;
use crate::error::{BitIoError, ContainerError, PayloadError, Result};

/// Writes bits MSB-first into a byte buffer.
///
/// # Invariants
/// - `bit_count` is always < 8
#[derive(Debug, Clone)]
pub struct BitWriter {
    /// Completed bytes
    bytes: Vec<u8>,
    /// Accumulator for the current partial byte (MSB-aligned)
    bit_buffer: u8,
    /// Number of bits in bit_buffer (0-7)
    bit_count: u8,
}

impl BitWriter {
    pub fn new() -> Self {
        Self {
            bytes: Vec::new(),
            bit_buffer: 0,
            bit_count: 0,
        }
    }

    /// Write the lowest `count` bits of `value`, MSB-first.
    ///
    /// Writing value=0b101 with count=3 writes bits 1, 0, 1 in that order.
    ///
    /// # Errors
    /// Returns `BitIoError::InvalidBitCount` if count > 64.
    pub fn write_bits(&mut self, value: u64, count: usize) -> Result<()> {
        if count > 64 {
            return Err(BitIoError::InvalidBitCount(count).into());
        }

        let mut remaining = count;
        while remaining > 0 {
            // How many bits fit in the current byte?
            let bits_to_write = remaining.min(8 - self.bit_count as usize);

            // Extract the top bits_to_write of the remaining bits
            let shift = remaining - bits_to_write;
            let mask = (1u64 << bits_to_write) - 1;
            let bits = ((value >> shift) & mask) as u8;

            self.bit_buffer |= bits << (8 - self.bit_count as usize - bits_to_write);
            self.bit_count += bits_to_write as u8;

            if self.bit_count == 8 {
                self.bytes.push(self.bit_buffer);
                self.bit_buffer = 0;
                self.bit_count = 0;
            }

            remaining = shift;
        }

        Ok(())
    }

    /// Finish writing and return the output bytes.
    ///
    /// A partial final byte is completed with trailing zeros.
    pub fn finish(mut self) -> Vec<u8> {
        if self.bit_count > 0 {
            self.bytes.push(self.bit_buffer);
        }
        self.bytes
    }

    /// Total number of bits written (including partial byte).
    pub fn bit_len(&self) -> usize {
        self.bytes.len() * 8 + self.bit_count as usize
    }
}

impl Default for BitWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Reads bits MSB-first from a byte buffer.
///
/// # Invariants
/// - `bit_position` never exceeds `data.len() * 8`
#[derive(Debug, Clone)]
pub struct BitReader<'a> {
    data: &'a [u8],
    /// Current bit position (0 = MSB of first byte)
    bit_position: usize,
}

impl<'a> BitReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            bit_position: 0,
        }
    }

    /// Read a single bit.
    ///
    /// # Errors
    /// Returns `BitIoError::UnexpectedEof` if no bits remain.
    pub fn read_bit(&mut self) -> Result<bool> {
        let byte = *self
            .data
            .get(self.bit_position / 8)
            .ok_or(BitIoError::UnexpectedEof)?;
        let bit = (byte >> (7 - self.bit_position % 8)) & 1;
        self.bit_position += 1;
        Ok(bit == 1)
    }

    pub fn bits_remaining(&self) -> usize {
        self.data.len() * 8 - self.bit_position
    }

    pub fn position(&self) -> usize {
        self.bit_position
    }
}

/// Number of zero bits appended to `bit_len` data bits.
///
/// Always in `1..=8`.
pub fn padding_for(bit_len: usize) -> u8 {
    match bit_len % 8 {
        0 => 8,
        rem => (8 - rem) as u8,
    }
}

/// Split a payload into its padding amount and packed bytes.
///
/// # Errors
/// - `ContainerError::Truncated` if the payload is empty
/// - `ContainerError::PaddingOutOfRange` if the amount is not in 1..=8
/// - `ContainerError::PaddingExceedsPayload` if no packed bytes follow
pub fn split_payload(payload: &[u8]) -> Result<(u8, &[u8])> {
    let (&padding, packed) = payload.split_first().ok_or(ContainerError::Truncated {
        field: "padding amount",
        required: 1,
        actual: 0,
    })?;

    if !(1..=8).contains(&padding) {
        return Err(ContainerError::PaddingOutOfRange(padding).into());
    }

    if packed.len() * 8 < padding as usize {
        return Err(ContainerError::PaddingExceedsPayload {
            padding,
            available: packed.len() * 8,
        }
        .into());
    }

    Ok((padding, packed))
}

/// Packs codes into a padded payload.
#[derive(Debug, Clone, Default)]
pub struct BitPacker {
    writer: BitWriter,
}

impl BitPacker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `code`'s bits after everything pushed so far.
    pub fn push_code(&mut self, code: Code) -> Result<()> {
        self.writer.write_bits(code.bits(), code.len())
    }

    /// Number of code bits pushed so far (`L`).
    pub fn bit_len(&self) -> usize {
        self.writer.bit_len()
    }

    /// Padding amount `finish` will write.
    pub fn padding(&self) -> u8 {
        padding_for(self.bit_len())
    }

    /// Produce the payload: padding byte, then the padded bits.
    ///
    /// The result is `1 + (L + P) / 8` bytes long.
    pub fn finish(self) -> Vec<u8> {
        let padding = self.padding();
        let packed = self.writer.finish();

        let mut payload = Vec::with_capacity(packed.len() + 2);
        payload.push(padding);
        payload.extend_from_slice(&packed);
        if padding == 8 {
            // Already aligned: the padding is a whole zero byte
            payload.push(0);
        }
        payload
    }
}

/// Iterates the data bits of a payload, with padding removed.
#[derive(Debug, Clone)]
pub struct BitUnpacker<'a> {
    reader: BitReader<'a>,
    len: usize,
}

impl<'a> BitUnpacker<'a> {
    /// Validate the padding header and prepare to read the data bits.
    ///
    /// # Errors
    /// - any error of [`split_payload`]
    /// - `PayloadError::NonZeroPadding` if a padding bit is set
    pub fn new(payload: &'a [u8]) -> Result<Self> {
        let (padding, packed) = split_payload(payload)?;

        // Padding is at most 8 bits, so it always sits in the last byte
        if let Some(&last) = packed.last() {
            let mask = (0xFFu16 >> (8 - padding as u16)) as u8;
            if last & mask != 0 {
                return Err(PayloadError::NonZeroPadding.into());
            }
        }

        Ok(Self {
            reader: BitReader::new(packed),
            len: packed.len() * 8 - padding as usize,
        })
    }

    /// Number of data bits (`L`).
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl Iterator for BitUnpacker<'_> {
    type Item = bool;

    fn next(&mut self) -> Option<bool> {
        if self.reader.position() >= self.len {
            return None;
        }
        self.reader.read_bit().ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.len - self.reader.position();
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for BitUnpacker<'_> {}
