//! Integration tests for the full huffpack pipeline.
//!
//! These tests verify end-to-end behavior through the public API:
//! input -> compress -> container bytes -> decompress -> output, plus the
//! container-level guarantees (determinism, padding, corruption detection).

use huffpack_core::{
    bitio::padding_for,
    codebook::{Code, CodeTable},
    compress,
    container::Container,
    decompress,
    error::ContainerError,
    frequency::FrequencyTable,
    Codec, Error,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Random input with a skewed alphabet so codes vary in length.
fn skewed_input(rng: &mut ChaCha8Rng, len: usize) -> Vec<u8> {
    let alphabet_size: u16 = rng.gen_range(1..=256);
    (0..len)
        .map(|_| {
            // Square the draw to bias toward low symbols
            let r: f64 = rng.gen();
            ((r * r) * alphabet_size as f64) as u8
        })
        .collect()
}

/// Round trip across many seeded random inputs.
#[test]
fn test_round_trip_random() {
    let mut rng = ChaCha8Rng::seed_from_u64(42);

    for _ in 0..200 {
        let len = rng.gen_range(1..2000);
        let data = skewed_input(&mut rng, len);

        let compressed = compress(&data).expect("compression failed");
        let decoded = decompress(&compressed).expect("decompression failed");

        assert_eq!(decoded, data, "output doesn't match input");
    }
}

/// Round trip with every byte value present.
#[test]
fn test_all_symbols() {
    let data: Vec<u8> = (0..=255).cycle().take(256 * 3 + 17).collect();

    let compressed = compress(&data).unwrap();
    let container = Container::parse(&compressed).unwrap();
    assert_eq!(container.frequencies.len(), 256);

    assert_eq!(decompress(&compressed).unwrap(), data);
}

/// Compressing the same input twice gives byte-identical containers.
#[test]
fn test_deterministic_containers() {
    let mut rng = ChaCha8Rng::seed_from_u64(7);

    for _ in 0..50 {
        let len = rng.gen_range(1..500);
        let data: Vec<u8> = (0..len).map(|_| rng.gen_range(b'a'..=b'h')).collect();

        assert_eq!(compress(&data).unwrap(), compress(&data).unwrap());
    }
}

/// Rebuilding codes from a parsed descriptor gives the compressor's codes.
#[test]
fn test_descriptor_rebuilds_identical_codes() {
    let data = b"she sells sea shells by the sea shore";

    let original = CodeTable::from_frequencies(&FrequencyTable::from_bytes(data).unwrap()).unwrap();
    let container = Container::parse(&compress(data).unwrap()).unwrap();
    let rebuilt = CodeTable::from_frequencies(&container.frequencies).unwrap();

    for (symbol, code) in original.iter() {
        assert_eq!(rebuilt.code(symbol), Some(code));
    }
}

/// No code is a prefix of another for any distribution.
#[test]
fn test_prefix_free_random_distributions() {
    let mut rng = ChaCha8Rng::seed_from_u64(2024);

    for _ in 0..100 {
        let len = rng.gen_range(1..3000);
        let data = skewed_input(&mut rng, len);
        let table = CodeTable::from_frequencies(&FrequencyTable::from_bytes(&data).unwrap()).unwrap();
        let codes: Vec<Code> = table.iter().map(|(_, code)| code).collect();

        for (i, a) in codes.iter().enumerate() {
            assert!(!a.is_empty());
            for (j, b) in codes.iter().enumerate() {
                if i != j {
                    assert!(!a.is_prefix_of(b), "{} is a prefix of {}", a, b);
                }
            }
        }
    }
}

/// "aaaa" has one descriptor entry and decodes back to "aaaa".
#[test]
fn test_single_symbol() {
    let compressed = compress(b"aaaa").unwrap();
    let container = Container::parse(&compressed).unwrap();

    let pairs: Vec<(u8, u32)> = container.frequencies.iter().collect();
    assert_eq!(pairs, vec![(b'a', 4)]);
    // Four 1-bit codes plus four padding bits
    assert_eq!(container.padding(), Some(4));

    assert_eq!(decompress(&compressed).unwrap(), b"aaaa");
}

/// Byte-aligned encodings still carry a padding amount of 8.
#[test]
fn test_padding_boundary() {
    // 8 one-bit codes: exactly one byte of data
    let data = b"zzzzzzzz";
    let (compressed, stats) = Codec::compress_with_stats(data).unwrap();

    assert_eq!(stats.encoded_bits, 8);
    assert_eq!(stats.padding_bits, 8);
    assert_eq!(padding_for(8), 8);

    let container = Container::parse(&compressed).unwrap();
    assert_eq!(container.padding(), Some(8));
    // padding byte + data byte + full zero byte
    assert_eq!(container.payload, vec![8, 0, 0]);

    assert_eq!(decompress(&compressed).unwrap(), data);
}

/// Setting the padding byte to 9 is always a malformed container.
#[test]
fn test_padding_nine_is_malformed() {
    let mut rng = ChaCha8Rng::seed_from_u64(99);

    for _ in 0..50 {
        let len = rng.gen_range(1..300);
        let data = skewed_input(&mut rng, len);
        let mut compressed = compress(&data).unwrap();

        let padding_at = Container::parse(&compressed).unwrap().descriptor_len();
        compressed[padding_at] = 9;

        assert!(matches!(
            decompress(&compressed),
            Err(Error::MalformedContainer(ContainerError::PaddingOutOfRange(9)))
        ));
    }
}

/// Skewed input packs into fewer bytes than 8 bits per symbol.
#[test]
fn test_compression_ratio_sanity() {
    let data = b"aaaaaaaab";
    let (compressed, stats) = Codec::compress_with_stats(data).unwrap();

    let container = Container::parse(&compressed).unwrap();
    assert!(container.payload.len() < data.len());
    assert_eq!(stats.payload_bytes, container.payload.len() as u64);
}

/// Truncating or extending a container never yields silently wrong output.
#[test]
fn test_damaged_containers_fail() {
    let data = b"The quick brown fox jumps over the lazy dog. ".repeat(20);
    let compressed = compress(&data).unwrap();

    for cut in [1, 2, 5, compressed.len() / 2, compressed.len() - 1] {
        let result = decompress(&compressed[..cut]);
        assert!(result.is_err(), "truncation to {} bytes decoded", cut);
    }

    let mut extended = compressed.clone();
    extended.push(0xA5);
    assert!(decompress(&extended).is_err());
}

/// Empty input is rejected by compress.
#[test]
fn test_empty_input() {
    assert!(matches!(compress(&[]), Err(Error::EmptyInput)));
}
