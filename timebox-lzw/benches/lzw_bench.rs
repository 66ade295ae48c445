//! Sub-block LZW decode benchmarks.
//!
//! Sub-blocks hold at most 255 compressed bytes, so the interesting sizes are
//! small: a full sub-block of noisy pixels and of flat runs.

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;
use timebox_lzw::{LzwConfig, compress_subblock, decompress_subblock};

/// Type alias for pattern generator functions
type PatternGenerator = fn(usize) -> Vec<u8>;

mod patterns {
    /// A single color everywhere.
    pub fn flat(size: usize) -> Vec<u8> {
        vec![1; size]
    }

    /// Pseudo-random 16-color noise.
    pub fn noise(size: usize) -> Vec<u8> {
        let mut seed: u64 = 0x1234_5678_9ABC_DEF0;
        (0..size)
            .map(|_| {
                seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
                ((seed >> 33) % 16) as u8
            })
            .collect()
    }

    /// Horizontal stripes of an 11-pixel-wide image.
    pub fn stripes(size: usize) -> Vec<u8> {
        (0..size).map(|i| ((i / 11) % 4) as u8).collect()
    }
}

fn bench_decode(c: &mut Criterion) {
    let config = LzwConfig::new(4, 16).expect("valid config");
    let mut group = c.benchmark_group("decode_subblock");

    let cases: [(&str, PatternGenerator); 3] = [
        ("flat", patterns::flat),
        ("noise", patterns::noise),
        ("stripes", patterns::stripes),
    ];

    for (name, generate) in cases {
        for pixels in [121usize, 128, 512] {
            let indices = generate(pixels);
            let compressed = compress_subblock(&indices, config).expect("compression failed");

            group.throughput(Throughput::Elements(pixels as u64));
            group.bench_with_input(BenchmarkId::new(name, pixels), &compressed, |b, data| {
                b.iter(|| decompress_subblock(black_box(data), config))
            });
        }
    }

    group.finish();
}

criterion_group!(benches, bench_decode);
criterion_main!(benches);
