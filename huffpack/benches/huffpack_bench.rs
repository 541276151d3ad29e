//! Performance benchmarks for huffpack
//!
//! This benchmark suite evaluates:
//! - Compression/decompression throughput for both header formats
//! - Tree construction cost for different symbol distributions

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use huffpack::{FrequencyTable, HuffConfig, HuffmanTree, compress, decompress};
use std::hint::black_box;

/// Type alias for pattern generator functions
type PatternGenerator = fn(usize) -> Vec<u8>;

/// Generate test data patterns for benchmarking
mod test_data {
    /// Uniform data - one symbol
    pub fn uniform(size: usize) -> Vec<u8> {
        vec![0xAA; size]
    }

    /// Random data - all 256 symbols, close to uniform
    pub fn random(size: usize) -> Vec<u8> {
        let mut data = Vec::with_capacity(size);
        let mut seed: u64 = 0x123456789ABCDEF0;
        for _ in 0..size {
            seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
            data.push((seed >> 32) as u8);
        }
        data
    }

    /// Text-like data - realistic scenario
    pub fn text_like(size: usize) -> Vec<u8> {
        let text = b"The quick brown fox jumps over the lazy dog. \
                     Pack my box with five dozen liquor jugs. \
                     How vexingly quick daft zebras jump! ";
        let mut data = Vec::with_capacity(size);
        while data.len() < size {
            let remaining = size - data.len();
            let chunk_size = remaining.min(text.len());
            data.extend_from_slice(&text[..chunk_size]);
        }
        data
    }
}

const PATTERNS: [(&str, PatternGenerator); 3] = [
    ("uniform", test_data::uniform),
    ("random", test_data::random),
    ("text", test_data::text_like),
];

const SIZE: usize = 64 * 1024;

fn bench_compress(c: &mut Criterion) {
    let mut group = c.benchmark_group("compress");
    group.throughput(Throughput::Bytes(SIZE as u64));

    for (name, generator) in PATTERNS {
        let data = generator(SIZE);
        for config in [HuffConfig::COUNTS, HuffConfig::TREE] {
            let id = BenchmarkId::new(config.format.name(), name);
            group.bench_with_input(id, &data, |b, data| {
                b.iter(|| compress(black_box(data), config.with_force(true)).unwrap());
            });
        }
    }

    group.finish();
}

fn bench_decompress(c: &mut Criterion) {
    let mut group = c.benchmark_group("decompress");
    group.throughput(Throughput::Bytes(SIZE as u64));

    for (name, generator) in PATTERNS {
        let data = generator(SIZE);
        for config in [HuffConfig::COUNTS, HuffConfig::TREE] {
            let compressed = compress(&data, config.with_force(true)).unwrap();
            let id = BenchmarkId::new(config.format.name(), name);
            group.bench_with_input(id, &compressed, |b, compressed| {
                b.iter(|| decompress(black_box(compressed)).unwrap());
            });
        }
    }

    group.finish();
}

fn bench_tree_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("tree_build");

    for (name, generator) in PATTERNS {
        let freq = FrequencyTable::from_bytes(&generator(SIZE));
        group.bench_with_input(BenchmarkId::from_parameter(name), &freq, |b, freq| {
            b.iter(|| HuffmanTree::build(black_box(freq)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_compress, bench_decompress, bench_tree_build);
criterion_main!(benches);
