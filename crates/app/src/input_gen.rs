//! Sample input generation for the `demo` command.
//!
//! Generated data mixes sections with different compressibility:
//! - runs of a single byte
//! - text-like data over a small alphabet
//! - short repeating patterns
//! - random bytes
//!
//! so the compression summary shows codes of varying length.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Generate `size_bytes` of mixed-compressibility data from `seed`.
pub fn generate_sample_data(seed: u64, size_bytes: usize) -> Vec<u8> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut data = Vec::with_capacity(size_bytes);

    let mut remaining = size_bytes;
    while remaining > 0 {
        let section = remaining.min(8192);

        match rng.gen_range(0..10u8) {
            // 30% runs of one byte
            0..=2 => {
                let byte: u8 = rng.gen();
                data.extend(std::iter::repeat(byte).take(section));
            }

            // 30% limited alphabet, text-like
            3..=5 => {
                let alphabet = b"abcdefghijklmnopqrstuvwxyz .!,\n";
                data.extend((0..section).map(|_| alphabet[rng.gen_range(0..alphabet.len())]));
            }

            // 20% repeating patterns
            6..=7 => {
                let pattern = generate_pattern(&mut rng);
                data.extend(pattern.iter().cycle().take(section));
            }

            // 20% random bytes
            _ => data.extend((0..section).map(|_| rng.gen::<u8>())),
        }

        remaining -= section;
    }

    data
}

fn generate_pattern(rng: &mut ChaCha8Rng) -> Vec<u8> {
    let len = rng.gen_range(4..=32);
    (0..len).map(|_| rng.gen()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_determinism() {
        assert_eq!(generate_sample_data(12345, 5000), generate_sample_data(12345, 5000));
    }

    #[test]
    fn test_different_seeds() {
        assert_ne!(generate_sample_data(1, 1000), generate_sample_data(2, 1000));
    }

    #[test]
    fn test_various_sizes() {
        for size in [0, 1, 100, 8192, 8193, 100000] {
            assert_eq!(generate_sample_data(999, size).len(), size);
        }
    }

    #[test]
    fn test_sample_round_trips() {
        let data = generate_sample_data(7, 20000);
        let compressed = huffpack_core::compress(&data).unwrap();

        assert_eq!(huffpack_core::decompress(&compressed).unwrap(), data);
    }
}
