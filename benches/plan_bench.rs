//! Criterion benchmarks for the crew planner.
//!
//! Uses synthetic catalogs (ids 1..=n, RULs spread over the plan horizon)
//! to measure evaluation, crossover with repair, and full runs.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;
use u_crewplan::ga::crossover::crossover;
use u_crewplan::ga::{PlanConfig, PlanRunner};
use u_crewplan::models::{Job, Schedule};

fn synthetic_catalog(n: i64) -> Vec<Job> {
    let mut jobs: Vec<Job> = (1..=n).map(|id| Job::new(id, (id * 17) % 30)).collect();
    jobs.sort_by_key(|job| job.rul);
    jobs
}

// ===========================================================================
// Benchmarks
// ===========================================================================

fn bench_evaluate(c: &mut Criterion) {
    let mut group = c.benchmark_group("schedule_evaluate");

    for &n in &[25i64, 50, 100] {
        let config = PlanConfig::default();
        let model = config.service_model();
        let mut rng = StdRng::seed_from_u64(42);
        let schedule =
            Schedule::random(&synthetic_catalog(n), &model, config.insertion_policy(), &mut rng)
                .expect("balanced insertion");
        group.bench_with_input(BenchmarkId::from_parameter(n), &schedule, |b, s| {
            b.iter(|| {
                let mut s = s.clone();
                black_box(s.evaluate(&model))
            })
        });
    }
    group.finish();
}

fn bench_crossover(c: &mut Criterion) {
    let mut group = c.benchmark_group("crossover_repair");

    for &n in &[25i64, 50, 100] {
        let config = PlanConfig::default();
        let model = config.service_model();
        let policy = config.insertion_policy();
        let catalog = synthetic_catalog(n);
        let mut rng = StdRng::seed_from_u64(42);
        let parent_1 =
            Schedule::random(&catalog, &model, policy, &mut rng).expect("balanced insertion");
        let parent_2 =
            Schedule::random(&catalog, &model, policy, &mut rng).expect("balanced insertion");

        group.bench_function(BenchmarkId::from_parameter(n), |b| {
            b.iter(|| {
                let children = crossover(
                    black_box(&parent_1),
                    black_box(&parent_2),
                    &catalog,
                    &model,
                    policy,
                    &mut rng,
                );
                black_box(children)
            })
        });
    }
    group.finish();
}

fn bench_run(c: &mut Criterion) {
    let mut group = c.benchmark_group("plan_run");
    group.sample_size(10);

    for (n, pop, gen) in [(25i64, 50usize, 20usize), (50, 100, 20), (100, 100, 10)] {
        let catalog = synthetic_catalog(n);
        let config = PlanConfig {
            population_size: pop,
            generations: gen,
            seed: Some(42),
            ..PlanConfig::default()
        };
        group.bench_with_input(
            BenchmarkId::new(format!("n{}_p{}_g{}", n, pop, gen), n),
            &(catalog, config),
            |b, (catalog, config)| {
                b.iter(|| {
                    let result = PlanRunner::run(black_box(catalog.clone()), black_box(config));
                    black_box(result)
                })
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_evaluate, bench_crossover, bench_run);
criterion_main!(benches);
