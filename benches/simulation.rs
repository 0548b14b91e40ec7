//! Performance benchmarks for LIFEBOARD

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use lifeboard::{codec, engine, patterns};

fn benchmark_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("step");

    for size in [32usize, 128, 512].iter() {
        let grid = patterns::random(*size, *size, 0.3, 42);

        group.bench_with_input(BenchmarkId::new("size", size), size, |b, _| {
            b.iter(|| engine::step(black_box(&grid)));
        });
    }

    group.finish();
}

fn benchmark_codec(c: &mut Criterion) {
    let grid = patterns::random(256, 256, 0.3, 42);
    let data = codec::encode(&grid);

    c.bench_function("encode_256", |b| {
        b.iter(|| codec::encode(black_box(&grid)));
    });

    c.bench_function("decode_256", |b| {
        b.iter(|| codec::decode(black_box(&data), 256, 256));
    });
}

fn benchmark_final_state(c: &mut Criterion) {
    let mut group = c.benchmark_group("find_final_state");

    // Oscillator: settles after two iterations
    let beacon = patterns::find("beacon").unwrap().place(64, 64);
    group.bench_function("beacon_64", |b| {
        b.iter(|| engine::find_final_state(black_box(&beacon), 0, 1000));
    });

    // Glider: runs to the cap, exercising the seen-set
    let glider = patterns::find("glider").unwrap().place(256, 256);
    group.bench_function("glider_256_cap_100", |b| {
        b.iter(|| engine::find_final_state(black_box(&glider), 0, 100));
    });

    group.finish();
}

criterion_group!(benches, benchmark_step, benchmark_codec, benchmark_final_state);
criterion_main!(benches);
