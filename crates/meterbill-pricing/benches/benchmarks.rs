//! Meterbill Performance Benchmarks
//!
//! Critical paths:
//! - Reading generation
//! - Per-plan cost aggregation
//! - Per-plan per-weekday cost aggregation

use std::sync::Arc;
use std::time::Duration;

use chrono::{TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use meterbill_common::{PricePlan, PricePlanCatalog, WeekdayZone};
use meterbill_pricing::{CostAggregator, CostPolicy, InMemoryReadingStore, ReadingGenerator};
use rust_decimal_macros::dec;

const METER_ID: &str = "smart-meter-bench";

fn catalog() -> PricePlanCatalog {
    PricePlanCatalog::new(vec![
        PricePlan::new("price-plan-0", dec!(10)),
        PricePlan::new("price-plan-1", dec!(2)),
        PricePlan::new("price-plan-2", dec!(1)),
    ])
    .expect("valid catalog")
}

fn aggregator_with(readings: usize) -> CostAggregator {
    let anchor = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
    let store = InMemoryReadingStore::new();
    store.store_readings(METER_ID, ReadingGenerator::seeded(7).generate_at(anchor, readings));

    let policy = CostPolicy {
        weekday_zone: WeekdayZone::Utc,
        ..CostPolicy::default()
    };
    CostAggregator::with_policy(Arc::new(store), catalog(), policy)
}

// ============ GENERATOR BENCHMARKS ============

fn bench_generator(c: &mut Criterion) {
    let mut group = c.benchmark_group("generator");
    group.measurement_time(Duration::from_secs(5));

    for count in [24usize, 24 * 7, 24 * 365].iter() {
        group.throughput(Throughput::Elements(*count as u64));
        group.bench_with_input(BenchmarkId::new("generate", count), count, |b, &count| {
            let mut generator = ReadingGenerator::seeded(1);
            b.iter(|| black_box(generator.generate(black_box(count))));
        });
    }

    group.finish();
}

// ============ AGGREGATION BENCHMARKS ============

fn bench_aggregation(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregation");
    group.measurement_time(Duration::from_secs(5));

    for count in [24usize, 24 * 7, 24 * 365].iter() {
        let aggregator = aggregator_with(*count);
        group.throughput(Throughput::Elements(*count as u64));

        group.bench_with_input(BenchmarkId::new("cost_per_plan", count), count, |b, _| {
            b.iter(|| black_box(aggregator.cost_per_plan(black_box(METER_ID)).unwrap()));
        });

        group.bench_with_input(BenchmarkId::new("cost_per_plan_per_day", count), count, |b, _| {
            b.iter(|| black_box(aggregator.cost_per_plan_per_day(black_box(METER_ID)).unwrap()));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_generator, bench_aggregation);
criterion_main!(benches);
