//! Diagnosis Throughput Benchmark
//!
//! Measures one full diagnostic call per process, including JSON shape
//! validation, so regressions in the matcher chain show up as latency.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use fpc_common::diagnostics::{BwReading, Channels, ColorReading, Diagnostician};
use serde_json::{json, Value};

fn c41_reference() -> ColorReading {
    ColorReading {
        dmax: Channels::new(163, 245, 275),
        hd: Channels::new(172, 310, 336),
        ld: Channels::new(39, 94, 103),
        dmin: Channels::new(28, 74, 96),
        yellow_b: Some(101),
    }
}

fn c41_underactive() -> ColorReading {
    let reference = c41_reference();
    ColorReading {
        dmax: reference.dmax.map(|d| d - 10),
        hd: reference.hd.map(|d| d - 10),
        ld: reference.ld.map(|d| d - 5),
        ..reference
    }
}

fn bench_typed(c: &mut Criterion) {
    let diagnostician = Diagnostician::standard();
    let mut group = c.benchmark_group("diagnose_typed");

    let reference = c41_reference();
    for (name, reading) in [("c41_clean", c41_reference()), ("c41_underactive", c41_underactive())] {
        group.bench_with_input(BenchmarkId::from_parameter(name), &reading, |b, reading| {
            b.iter(|| diagnostician.diagnose_c41(black_box(reading), black_box(&reference)))
        });
    }

    let bw_reference = BwReading { dmax: 170, hd: 146, ld: 50, dmin: 30 };
    let bw_reading = BwReading { hd: 138, ..bw_reference };
    let history: Vec<BwReading> = (0..10)
        .map(|i| BwReading { ld: 60 - i, ..bw_reference })
        .collect();
    group.bench_function("bw_with_history", |b| {
        b.iter(|| diagnostician.diagnose_bw(black_box(&bw_reading), &bw_reference, black_box(&history)))
    });

    group.finish();
}

fn bench_json(c: &mut Criterion) {
    let reading: Value = serde_json::to_value(c41_underactive()).unwrap();
    let reference: Value = serde_json::to_value(c41_reference()).unwrap();
    let bw = json!({"dmax": 170, "hd": 146, "ld": 50, "dmin": 30});

    c.bench_function("diagnose_json_c41", |b| {
        b.iter(|| fpc_common::diagnose("c41", black_box(&reading), black_box(&reference)).unwrap())
    });
    c.bench_function("diagnose_json_bw", |b| {
        b.iter(|| fpc_common::diagnose("bw", black_box(&bw), black_box(&bw)).unwrap())
    });
}

criterion_group!(benches, bench_typed, bench_json);
criterion_main!(benches);
