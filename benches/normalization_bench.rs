//! Normalizer throughput benchmarks.
//!
//! Every cell of every sheet row may be normalized during a scan, so the
//! cost of rejecting a non-date matters as much as the cost of a hit.
//!
//! # Groups
//!
//! | Group | What it measures |
//! |-------|-----------------|
//! | `serial` | Numeric day-count cells |
//! | `text_hit` | Written dates resolved at different stages of the format list |
//! | `text_miss` | Names, titles and times that fall through every stage |
//!
//! # Viewing results
//!
//! ```sh
//! cargo bench --bench normalization_bench
//! open target/criterion/report/index.html
//! ```

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use seminar_feed::{CellValue, DateNormalizer};
use std::hint::black_box;

// ---------------------------------------------------------------------------
// Serial
// ---------------------------------------------------------------------------

fn serial_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("serial");
    let normalizer = DateNormalizer::new();
    group.throughput(Throughput::Elements(1));

    for (name, serial) in [("whole_day", 45810.0), ("with_time", 45810.5625), ("implausible", 1.0)] {
        let cell = CellValue::Number(serial);
        group.bench_with_input(BenchmarkId::new(name, serial), &cell, |b, cell| {
            b.iter(|| normalizer.normalize(black_box(cell)))
        });
    }
    group.finish();
}

// ---------------------------------------------------------------------------
// Text
// ---------------------------------------------------------------------------

fn text_hit_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("text_hit");
    let normalizer = DateNormalizer::new();
    group.throughput(Throughput::Elements(1));

    let inputs = [
        ("first_format", "21/11/2025"),
        ("short_year", "03.01.25"),
        ("iso", "2025-11-21"),
        ("month_name", "Senin, 17 November 2025"),
        ("weekday_and_time", "Jum'at, 21-11-2025 Pukul 13.00 WITA"),
        ("native_english", "January 3, 2025"),
        ("filler_retry", "Senn, 17 November 2025"),
    ];
    for (name, text) in inputs {
        let cell = CellValue::from(text);
        group.bench_with_input(BenchmarkId::new(name, text), &cell, |b, cell| {
            b.iter(|| normalizer.normalize(black_box(cell)))
        });
    }
    group.finish();
}

fn text_miss_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("text_miss");
    let normalizer = DateNormalizer::new();
    group.throughput(Throughput::Elements(1));

    let inputs = [
        ("name", "Andi Saputra"),
        ("title", "Rancang Bangun Sistem Informasi Akademik Berbasis Web"),
        ("room", "Ruang 301"),
        ("time_range", "13.00 - 15.00"),
        ("out_of_range", "21/11/2035"),
    ];
    for (name, text) in inputs {
        let cell = CellValue::from(text);
        group.bench_with_input(BenchmarkId::new(name, text), &cell, |b, cell| {
            b.iter(|| normalizer.normalize(black_box(cell)))
        });
    }
    group.finish();
}

// ---------------------------------------------------------------------------
// Criterion registration
// ---------------------------------------------------------------------------

criterion_group!(normalization_benches, serial_bench, text_hit_bench, text_miss_bench);
criterion_main!(normalization_benches);
