//! Error types for the huffpack codec.
//!
//! All operations return structured errors rather than panicking. A corrupt
//! container is always reported; it never decodes to silently-wrong output.

use thiserror::Error;

/// Top-level error type for every codec operation.
///
/// Each variant corresponds to a specific failure domain:
/// - Empty input: nothing to build a tree from
/// - Malformed container: header or descriptor fields out of range
/// - Corrupt payload: the packed bits do not decode cleanly
/// - Bit I/O: misuse of the low-level bit reader/writer
#[derive(Debug, Error)]
pub enum Error {
    /// Compression was asked to encode zero symbols
    #[error("empty input: nothing to compress")]
    EmptyInput,

    /// A single symbol occurs more often than the descriptor can record
    #[error("symbol {symbol:#04x} occurs more than {max} times", max = u32::MAX)]
    InputTooLarge { symbol: u8 },

    /// Symbol has no code in the table it is being encoded against
    #[error("symbol {0:#04x} not in code table")]
    UnknownSymbol(u8),

    /// Code length exceeds what a `Code` can hold
    #[error("code length {length} exceeds maximum {max}", max = crate::codebook::Code::MAX_LEN)]
    CodeTooLong { length: usize },

    /// Container header or descriptor is truncated or inconsistent
    #[error("malformed container: {0}")]
    MalformedContainer(#[from] ContainerError),

    /// Packed payload does not decode to the symbols the descriptor promises
    #[error("corrupt payload: {0}")]
    CorruptPayload(#[from] PayloadError),

    /// Bit I/O operation failed (e.g., reading past end of buffer)
    #[error("bit I/O error: {0}")]
    BitIo(#[from] BitIoError),
}

/// Bit-level I/O errors.
#[derive(Debug, Error)]
pub enum BitIoError {
    /// Attempted to read past the end of the buffer
    #[error("unexpected end of bit stream")]
    UnexpectedEof,

    /// Invalid bit count (more than 64 bits in one call)
    #[error("invalid bit count: {0}")]
    InvalidBitCount(usize),
}

/// Container format errors (the `MalformedContainerError` family).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ContainerError {
    /// Not enough bytes for the field being read
    #[error("truncated {field}: need {required} bytes, got {actual}")]
    Truncated {
        field: &'static str,
        required: usize,
        actual: usize,
    },

    /// Symbol count is zero or larger than the byte alphabet
    #[error("symbol count {0} out of range 1..=256")]
    SymbolCountOutOfRange(u32),

    /// The same symbol is listed twice in the descriptor
    #[error("duplicate symbol {0:#04x} in descriptor")]
    DuplicateSymbol(u8),

    /// A descriptor entry carries a zero occurrence count
    #[error("symbol {0:#04x} has zero count")]
    ZeroCount(u8),

    /// Padding amount is outside 1..=8
    #[error("padding amount {0} out of range 1..=8")]
    PaddingOutOfRange(u8),

    /// Padding claims more bits than the payload holds
    #[error("padding of {padding} bits exceeds {available} payload bits")]
    PaddingExceedsPayload { padding: u8, available: usize },
}

/// Payload decoding errors (the `CorruptPayloadError` family).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PayloadError {
    /// Bits remained after the last complete code
    #[error("{bits} trailing bits do not form a complete code")]
    UnresolvedCode { bits: usize },

    /// Candidate grew longer than any code in the table
    #[error("no code matches at bit position {position}")]
    InvalidCode { position: usize },

    /// Decoded more symbols than the descriptor's total count
    #[error("decoded more than the expected {expected} symbols")]
    TooManySymbols { expected: u64 },

    /// Decoded fewer symbols than the descriptor's total count
    #[error("decoded length mismatch: expected {expected}, got {actual}")]
    TooFewSymbols { expected: u64, actual: u64 },

    /// Padding bits must all be zero
    #[error("padding bits are not zero")]
    NonZeroPadding,
}

/// Type alias for Result with our Error type
pub type Result<T> = std::result::Result<T, Error>;
