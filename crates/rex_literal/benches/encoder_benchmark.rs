use criterion::{criterion_group, criterion_main, Criterion};
use rex_literal::{literal_encode, xp_decode, EncodeOptions, Grid};
use std::hint::black_box;

fn generate_grid(width: u32, height: u32, stripe: u32) -> Grid {
    let colors: [[u8; 3]; 4] = [[255, 255, 255], [255, 0, 0], [0, 0, 255], [0, 0, 0]];
    let mut data = Vec::new();
    for field in [0xFFFF_FFFFu32, 1, width, height] {
        data.extend_from_slice(&field.to_le_bytes());
    }
    for col in 0..width {
        for row in 0..height {
            let ch = (b'a' as u32) + (col + row) % 26;
            data.extend_from_slice(&ch.to_le_bytes());
            data.extend_from_slice(&colors[((col / stripe) % 4) as usize]);
            data.extend_from_slice(&colors[((row / stripe + 1) % 4) as usize]);
        }
    }
    xp_decode(&data).expect("generated grid must decode")
}

fn bench_encode_flat(c: &mut Criterion) {
    // Wide stripes: few color switches
    let grid = generate_grid(80, 25, 40);
    let opts = EncodeOptions::default();

    c.bench_function("encode_80x25_flat", |b| {
        b.iter(|| {
            let result = literal_encode(black_box(&grid), &opts);
            assert!(result.is_ok());
            result
        })
    });
}

fn bench_encode_busy(c: &mut Criterion) {
    // Color changes on every cell
    let grid = generate_grid(80, 25, 1);
    let opts = EncodeOptions::default();

    c.bench_function("encode_80x25_busy", |b| {
        b.iter(|| {
            let result = literal_encode(black_box(&grid), &opts);
            assert!(result.is_ok());
            result
        })
    });
}

fn bench_encode_large(c: &mut Criterion) {
    let grid = generate_grid(200, 100, 5);
    let opts = EncodeOptions::default();

    c.bench_function("encode_200x100", |b| {
        b.iter(|| {
            let result = literal_encode(black_box(&grid), &opts);
            assert!(result.is_ok());
            result
        })
    });
}

criterion_group!(
    benches,
    bench_encode_flat,
    bench_encode_busy,
    bench_encode_large,
);
criterion_main!(benches);
