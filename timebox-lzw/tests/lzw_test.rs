//! LZW integration tests.

use timebox_core::TimeboxError;
use timebox_lzw::{
    CodeTable, LzwConfig, LzwDecoder, LzwEncoder, compress_subblock, decompress_subblock,
};

/// Deterministic pseudo-random indices below `colors`.
fn lcg_indices(len: usize, colors: u16, mut seed: u64) -> Vec<u8> {
    (0..len)
        .map(|_| {
            seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
            ((seed >> 33) % u64::from(colors)) as u8
        })
        .collect()
}

#[test]
fn test_literals_map_to_themselves() {
    for (min_code_size, colors) in [(2u8, 4u16), (3, 8), (5, 32), (8, 256)] {
        let table = CodeTable::new(LzwConfig::new(min_code_size, colors).unwrap());
        for code in 0..colors {
            assert_eq!(table.indices(code).unwrap(), &[code as u8]);
        }
    }
}

#[test]
fn test_roundtrip_across_width_boundaries() {
    let config = LzwConfig::new(2, 4).unwrap();

    // Long runs keep producing the newest code, which walks the width up.
    let mut original = vec![0u8; 120];
    original.extend(std::iter::repeat_n(3u8, 120));

    let mut encoder = LzwEncoder::new(config).unwrap();
    let compressed = encoder.encode(&original).unwrap();
    assert!(
        encoder.code_width() >= config.initial_code_width() + 2,
        "width only reached {}",
        encoder.code_width()
    );

    let mut decoder = LzwDecoder::new(config);
    let decompressed = decoder
        .decode_subblock(&compressed)
        .expect("decompression failed");
    assert_eq!(decompressed, original);
    assert_eq!(decoder.code_width(), encoder.code_width());
}

#[test]
fn test_roundtrip_pseudo_random() {
    for (seed, (min_code_size, colors)) in [(2u8, 4u16), (3, 6), (4, 16), (8, 200)]
        .into_iter()
        .enumerate()
    {
        let config = LzwConfig::new(min_code_size, colors).unwrap();
        let original = lcg_indices(2000, colors, seed as u64 + 1);

        let compressed = compress_subblock(&original, config).expect("compression failed");
        let decompressed = decompress_subblock(&compressed, config).expect("decompression failed");
        assert_eq!(decompressed, original, "mismatch for {config:?}");
    }
}

#[test]
fn test_roundtrip_table_fills_up() {
    // Enough distinct pairs to exhaust all 4096 keys.
    let config = LzwConfig::GIF_8BIT;
    let original = lcg_indices(20_000, 256, 99);

    let compressed = compress_subblock(&original, config).unwrap();
    assert_eq!(decompress_subblock(&compressed, config).unwrap(), original);
}

#[test]
fn test_each_subblock_restarts() {
    let config = LzwConfig::new(3, 8).unwrap();
    let first = compress_subblock(&[1, 1, 1, 2, 2, 2], config).unwrap();
    let second = compress_subblock(&[7, 6, 5, 4], config).unwrap();

    let mut decoder = LzwDecoder::new(config);
    assert_eq!(
        decoder.decode_subblock(&first).unwrap(),
        vec![1, 1, 1, 2, 2, 2]
    );
    assert_eq!(decoder.decode_subblock(&second).unwrap(), vec![7, 6, 5, 4]);
}

#[test]
fn test_truncated_stream_is_truncated_input() {
    let config = LzwConfig::new(4, 16).unwrap();
    let compressed = compress_subblock(&lcg_indices(64, 16, 5), config).unwrap();

    let err = decompress_subblock(&compressed[..compressed.len() / 2], config).unwrap_err();
    let err: TimeboxError = err.into();
    assert!(err.is_truncation());
}
