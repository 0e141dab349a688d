//! Criterion benchmarks for the itinerary planner.
//!
//! Measures full planning time for each projection strategy across lodging
//! counts, on a 500 km route with one vertex per kilometre.
//!
//! Run benchmarks with:
//! ```bash
//! cargo bench --package nightstop-core
//! ```

// Criterion macros generate code that triggers missing_docs warnings.
#![allow(missing_docs, reason = "Criterion macros generate undocumented code")]

use std::time::Duration;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use nightstop_core::{
    DynamicProgrammingPlanner, ItineraryPlanner, PlanRequest, PlanningConfig, ProjectionStrategy,
};


use bench_support::{BENCHMARK_SEED, generate_lodgings, generate_route};

/// Lodging counts to benchmark.
const LODGING_COUNTS: &[usize] = &[50, 200, 800];

/// Route vertices, about one per kilometre.
const ROUTE_VERTICES: usize = 500;

fn bench_plan_times(c: &mut Criterion) {
    let mut group = c.benchmark_group("plan_time");
    group.measurement_time(Duration::from_secs(5));

    let route = generate_route(ROUTE_VERTICES, BENCHMARK_SEED);
    for strategy in ProjectionStrategy::ALL {
        let planner =
            DynamicProgrammingPlanner::new(PlanningConfig::default().with_projection(strategy));
        for &count in LODGING_COUNTS {
            let request = PlanRequest {
                route: route.clone(),
                lodgings: generate_lodgings(&route, count, BENCHMARK_SEED),
            };
            let throughput_size = u64::try_from(count).unwrap_or(u64::MAX);
            group.throughput(Throughput::Elements(throughput_size));
            group.bench_with_input(
                BenchmarkId::new(strategy.as_str(), count),
                &request,
                |b, request| {
                    b.iter(|| {
                        #[expect(
                            clippy::let_underscore_must_use,
                            reason = "Benchmarking planning time, result is intentionally discarded"
                        )]
                        let _ = planner.plan(request);
                    });
                },
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_plan_times);
criterion_main!(benches);
