//! Criterion benchmarks for the ramdisk decompression core.
//!
//! Run with:
//!   cargo bench --bench unpack

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::io::Write;

use ramdisk::{decompress, detect};

/// Synthetic uncompressed ramdisk: cpio-style text headers interleaved with
/// stretches of binary filler, so both codecs get realistic redundancy.
fn synthetic_ramdisk(len: usize) -> Vec<u8> {
    let mut data = Vec::with_capacity(len + 128);
    let mut i = 0usize;
    while data.len() < len {
        data.extend_from_slice(b"07070100000000000081A400000000000000000000000100000000");
        data.extend_from_slice(&[(i % 251) as u8; 64]);
        i += 1;
    }
    data.truncate(len);
    data
}

fn gzip_fixture(data: &[u8]) -> Vec<u8> {
    let mut enc = flate2::write::GzEncoder::new(Vec::new(), flate2::Compression::default());
    enc.write_all(data).unwrap();
    enc.finish().unwrap()
}

fn lzma_fixture(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    lzma_rs::lzma_compress(&mut &data[..], &mut out).unwrap();
    out
}

fn bench_detect(c: &mut Criterion) {
    let gz = gzip_fixture(b"probe");
    let lz = lzma_fixture(b"probe");
    let junk = [0u8; 16];

    let mut group = c.benchmark_group("ramdisk_detect");
    group.bench_function("gzip", |b| b.iter(|| detect(&gz)));
    group.bench_function("lzma", |b| b.iter(|| detect(&lz)));
    group.bench_function("unrecognized", |b| b.iter(|| detect(&junk)));
    group.finish();
}

fn bench_decompress(c: &mut Criterion) {
    let mut group = c.benchmark_group("ramdisk_decompress");

    for &size in &[65_536usize, 1_048_576, 4_194_304] {
        let original = synthetic_ramdisk(size);

        // The payload is consumed per call; the clone inside the loop is
        // small next to the decode work being measured.

        // ── gzip path ────────────────────────────────────────────────────────
        {
            let payload = gzip_fixture(&original);
            group.throughput(Throughput::Bytes(size as u64));
            group.bench_with_input(
                BenchmarkId::new("gzip", size),
                &payload,
                |b, payload| b.iter(|| decompress(payload.clone()).unwrap()),
            );
        }

        // ── LZMA path ────────────────────────────────────────────────────────
        {
            let payload = lzma_fixture(&original);
            group.throughput(Throughput::Bytes(size as u64));
            group.bench_with_input(
                BenchmarkId::new("lzma", size),
                &payload,
                |b, payload| b.iter(|| decompress(payload.clone()).unwrap()),
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_detect, bench_decompress);
criterion_main!(benches);
