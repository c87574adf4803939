//! SIKEp434 Benchmarks
//!
//! SIDH key generation and agreement plus the KEM, using the Criterion framework.

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use rand::rng;
use velu_core::Kem;
use velu_sike::{derive_secret, KeyVariant, PrivateKey, SikeP434};

/// Benchmark SIDH public key generation and secret derivation for both sides.
fn bench_sidh(c: &mut Criterion) {
    let mut group = c.benchmark_group("SIDH p434");

    group.throughput(Throughput::Elements(1));
    group.sample_size(20);

    let mut setup = rng();
    let ska = PrivateKey::generate(KeyVariant::SidhA, &mut setup).unwrap();
    let skb = PrivateKey::generate(KeyVariant::SidhB, &mut setup).unwrap();
    let pka = ska.public_key();
    let pkb = skb.public_key();

    group.bench_function("public key A", |b| b.iter(|| black_box(ska.public_key())));
    group.bench_function("public key B", |b| b.iter(|| black_box(skb.public_key())));
    group.bench_function("shared secret A", |b| {
        b.iter(|| black_box(derive_secret(&ska, &pkb).unwrap()))
    });
    group.bench_function("shared secret B", |b| {
        b.iter(|| black_box(derive_secret(&skb, &pka).unwrap()))
    });

    group.finish();
}

/// Benchmark the KEM through the `Kem` trait.
fn bench_kem(c: &mut Criterion) {
    let mut group = c.benchmark_group("SIKEp434");

    group.throughput(Throughput::Elements(1));
    group.sample_size(20);

    let mut setup = rng();
    let (dk, ek) = SikeP434::keygen(&mut setup).unwrap();
    let (ct, _) = SikeP434::encaps(&ek, &mut setup).unwrap();

    group.bench_function("KeyGen", |b| {
        b.iter(|| {
            let mut rng = rng();
            black_box(SikeP434::keygen(&mut rng).unwrap())
        })
    });

    group.bench_function("Encaps", |b| {
        b.iter(|| {
            let mut rng = rng();
            black_box(SikeP434::encaps(&ek, &mut rng).unwrap())
        })
    });

    group.bench_function("Decaps", |b| {
        b.iter(|| black_box(SikeP434::decaps(&dk, &ct).unwrap()))
    });

    group.finish();
}

criterion_group!(benches, bench_sidh, bench_kem);

criterion_main!(benches);
