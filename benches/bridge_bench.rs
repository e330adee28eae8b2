//! Bridge benchmarks using Criterion.
//!
//! Run with: `cargo bench --bench bridge_bench`

use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use vmbridge::{
    registry::ExternRegistry,
    Bridge, FuncRef, Handle, Val, ValType, V128,
};

fn signature(n: usize) -> (Vec<Val>, Vec<ValType>) {
    let vals: Vec<Val> = (0..n)
        .map(|i| match i % 5 {
            0 => Val::I32(i as i32),
            1 => Val::I64(i as i64),
            2 => Val::F32(i as f32),
            3 => Val::F64(i as f64),
            _ => Val::V128(V128::new(i as u64, !(i as u64))),
        })
        .collect();
    let types = vals.iter().map(Val::ty).collect();
    (vals, types)
}

fn bench_codec(c: &mut Criterion) {
    let bridge = Bridge::new();
    let mut group = c.benchmark_group("codec");

    for n in [1usize, 4, 16] {
        let (vals, types) = signature(n);
        group.bench_with_input(BenchmarkId::new("encode_all", n), &vals, |b, vals| {
            b.iter(|| black_box(bridge.encode_all(black_box(vals)).unwrap()))
        });
        let raws = bridge.encode_all(&vals).unwrap();
        group.bench_with_input(BenchmarkId::new("decode_all", n), &raws, |b, raws| {
            b.iter(|| black_box(bridge.decode_all(black_box(raws), &types).unwrap()))
        });
    }

    group.bench_function("funcref_roundtrip", |b| {
        b.iter(|| {
            let raw = bridge.encode(&Val::FuncRef(FuncRef::new(black_box(7)))).unwrap();
            black_box(bridge.decode(raw, ValType::FuncRef))
        })
    });

    group.finish();
}

fn bench_externref(c: &mut Criterion) {
    let mut group = c.benchmark_group("externref");

    group.bench_function("register_release", |b| {
        let reg = ExternRegistry::new();
        b.iter(|| {
            let h = reg.register(black_box(1u64));
            black_box(reg.release(h))
        })
    });

    group.bench_function("decode_live", |b| {
        let bridge = Bridge::new();
        let r = bridge.new_extern_ref(String::from("obj"));
        let raw = bridge.encode(&Val::ExternRef(r)).unwrap();
        b.iter(|| black_box(bridge.decode(black_box(raw), ValType::ExternRef)))
    });

    group.bench_function("lookup_miss", |b| {
        let reg = ExternRegistry::new();
        b.iter(|| black_box(reg.lookup(black_box(Handle(12345)))))
    });

    group.finish();
}

fn bench_contended_register(c: &mut Criterion) {
    c.bench_function("externref/contended_register_4x64", |b| {
        let reg = Arc::new(ExternRegistry::with_capacity(256));
        b.iter(|| {
            std::thread::scope(|s| {
                for t in 0..4u64 {
                    let reg = Arc::clone(&reg);
                    s.spawn(move || {
                        let hs: Vec<Handle> = (0..64).map(|i| reg.register(t * 64 + i)).collect();
                        for h in hs {
                            reg.release(h);
                        }
                    });
                }
            })
        })
    });
}

criterion_group!(benches, bench_codec, bench_externref, bench_contended_register);
criterion_main!(benches);
