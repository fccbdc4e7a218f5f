//! Benchmark for the yespower algorithm

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use yespower_core::{Params, Yespower, evaluate_cached, hash};

fn bench_hash(c: &mut Criterion) {
    let params = Params::new(2048, 8);
    let mut hasher = Yespower::with_params(&params).unwrap();
    let input = [0x5au8; 80];

    c.bench_function("yespower_2048_8", |b| {
        b.iter(|| hasher.hash(black_box(&input), &params).unwrap())
    });
}

fn bench_hash_varying_input(c: &mut Criterion) {
    let params = Params::new(2048, 32).with_personalization("bench");

    c.bench_function("yespower_cached_varying", |b| {
        let mut nonce: u32 = 0;
        b.iter(|| {
            let mut input = [0u8; 80];
            input[76..].copy_from_slice(&nonce.to_le_bytes());
            nonce = nonce.wrapping_add(1);
            evaluate_cached(black_box(&input), &params).unwrap()
        })
    });
}

fn bench_hash_fresh_allocation(c: &mut Criterion) {
    let params = Params::new(1024, 8);

    c.bench_function("yespower_one_shot", |b| {
        b.iter(|| hash(black_box(b"one shot"), &params).unwrap())
    });
}

criterion_group!(
    benches,
    bench_hash,
    bench_hash_varying_input,
    bench_hash_fresh_allocation
);
criterion_main!(benches);
