//! Planning run execution.
//!
//! [`PlanRunner`] drives the generational loop:
//! initialization → (selection → crossover/repair → evaluation) × generations
//! → best feasible schedule.
//!
//! [`PlanRunner::run_many`] repeats independent runs and summarizes them.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::config::PlanConfig;
use super::population::{GenerationStats, Population};
use crate::error::{PlanError, Result};
use crate::models::{Job, Schedule};

/// Result of one planning run.
#[derive(Debug, Clone)]
pub struct PlanResult {
    /// Cheapest schedule within the plan horizon, if any.
    pub best: Option<Schedule>,

    /// Total cost of `best`.
    pub best_cost: Option<i64>,

    /// Number of generations executed.
    pub generations: usize,

    /// Lowest cost in the population (feasible or not): initial population
    /// first, then one entry per generation.
    pub cost_history: Vec<i64>,

    /// Statistics of the final generation.
    pub final_stats: GenerationStats,

    /// Plan horizon the run was judged against.
    pub max_plan_duration: i64,
}

impl PlanResult {
    /// The best feasible schedule.
    ///
    /// # Errors
    /// [`PlanError::NoFeasibleSolution`] if the run found none.
    pub fn into_best(self) -> Result<Schedule> {
        self.best.ok_or(PlanError::NoFeasibleSolution {
            max_plan_duration: self.max_plan_duration,
        })
    }
}

/// Summary of repeated independent runs.
#[derive(Debug, Clone)]
pub struct BatchSummary {
    /// Best feasible cost of each run, `None` for runs without one.
    pub run_costs: Vec<Option<i64>>,

    /// Mean of the feasible runs' best costs.
    pub mean_best_cost: Option<f64>,

    /// Cheapest schedule over all runs.
    pub best: Option<Schedule>,

    /// Number of runs whose best cost equals the overall best.
    pub best_cost_hits: usize,
}

impl BatchSummary {
    fn from_results(results: Vec<PlanResult>) -> Self {
        let run_costs: Vec<Option<i64>> = results.iter().map(|r| r.best_cost).collect();
        let feasible: Vec<i64> = run_costs.iter().flatten().copied().collect();
        let mean_best_cost = if feasible.is_empty() {
            None
        } else {
            Some(feasible.iter().sum::<i64>() as f64 / feasible.len() as f64)
        };

        let best = results
            .into_iter()
            .filter_map(|r| r.best)
            .min_by_key(Schedule::total_cost);
        let best_cost_hits = best.as_ref().map_or(0, |b| {
            feasible.iter().filter(|&&c| c == b.total_cost()).count()
        });

        Self {
            run_costs,
            mean_best_cost,
            best,
            best_cost_hits,
        }
    }

    /// Number of runs that found a feasible schedule.
    pub fn feasible_runs(&self) -> usize {
        self.run_costs.iter().flatten().count()
    }
}

/// Executes planning runs.
///
/// # Usage
///
/// ```no_run
/// use u_crewplan::ga::{PlanConfig, PlanRunner};
/// use u_crewplan::models::Job;
///
/// let catalog = vec![Job::new(1, 4), Job::new(2, 9), Job::new(3, 15)];
/// let config = PlanConfig::default().with_seed(42);
/// let result = PlanRunner::run(catalog, &config).unwrap();
/// println!("best cost: {:?}", result.best_cost);
/// ```
pub struct PlanRunner;

impl PlanRunner {
    /// Runs one search with a generator seeded from `config.seed`.
    pub fn run(catalog: Vec<Job>, config: &PlanConfig) -> Result<PlanResult> {
        let mut rng = create_rng(config.seed);
        Self::run_with_rng(catalog, config, &mut rng)
    }

    /// Runs one search drawing all randomness from `rng`.
    ///
    /// # Errors
    /// - [`PlanError::InvalidConfiguration`] / [`PlanError::InvalidCatalog`]
    ///   before the run starts.
    /// - [`PlanError::InsertionStarvation`] if balanced insertion gives up.
    pub fn run_with_rng<R: Rng>(
        catalog: Vec<Job>,
        config: &PlanConfig,
        rng: &mut R,
    ) -> Result<PlanResult> {
        let mut population = Population::new(catalog, config.clone())?;
        tracing::info!(
            jobs = population.catalog().len(),
            population_size = config.population_size,
            generations = config.generations,
            "starting crew planning run"
        );

        population.initialize(rng)?;
        let mut cost_history = Vec::with_capacity(config.generations + 1);
        let mut stats = population.stats();
        log_generation(&stats);
        cost_history.push(stats.best_cost);

        for _ in 0..config.generations {
            population.advance_generation(rng)?;
            stats = population.stats();
            log_generation(&stats);
            cost_history.push(stats.best_cost);
        }

        let best = population.best_feasible().cloned();
        match &best {
            Some(schedule) => tracing::info!(
                cost = schedule.total_cost(),
                max_crew_duration = schedule.max_crew_duration(),
                "crew planning run finished"
            ),
            None => tracing::warn!(
                max_plan_duration = config.max_plan_duration,
                "crew planning run finished without a feasible schedule"
            ),
        }

        Ok(PlanResult {
            best_cost: best.as_ref().map(Schedule::total_cost),
            best,
            generations: population.generation(),
            cost_history,
            final_stats: stats,
            max_plan_duration: config.max_plan_duration,
        })
    }

    /// Runs `runs` independent searches over the same catalog.
    ///
    /// Run `i` is seeded with `seed + i` (a random base seed when
    /// `config.seed` is `None`), so results do not depend on whether runs
    /// execute in parallel.
    pub fn run_many(catalog: &[Job], config: &PlanConfig, runs: usize) -> Result<BatchSummary> {
        if runs == 0 {
            return Err(PlanError::InvalidConfiguration(
                "runs must be at least 1".into(),
            ));
        }
        config.validate()?;

        let base_seed = config.seed.unwrap_or_else(rand::random);
        let run_one = |i: usize| {
            let run_config = config.clone().with_seed(base_seed.wrapping_add(i as u64));
            Self::run(catalog.to_vec(), &run_config)
        };

        let results = execute_runs(runs, config.parallel, run_one)?;
        let summary = BatchSummary::from_results(results);
        tracing::info!(
            runs,
            feasible_runs = summary.feasible_runs(),
            mean_best_cost = ?summary.mean_best_cost,
            best_cost_hits = summary.best_cost_hits,
            "crew planning batch finished"
        );
        Ok(summary)
    }
}

#[cfg(feature = "parallel")]
fn execute_runs<F>(runs: usize, parallel: bool, run_one: F) -> Result<Vec<PlanResult>>
where
    F: Fn(usize) -> Result<PlanResult> + Send + Sync,
{
    if parallel {
        (0..runs).into_par_iter().map(run_one).collect()
    } else {
        (0..runs).map(run_one).collect()
    }
}

#[cfg(not(feature = "parallel"))]
fn execute_runs<F>(runs: usize, _parallel: bool, run_one: F) -> Result<Vec<PlanResult>>
where
    F: Fn(usize) -> Result<PlanResult>,
{
    (0..runs).map(run_one).collect()
}

fn create_rng(seed: Option<u64>) -> StdRng {
    StdRng::seed_from_u64(seed.unwrap_or_else(rand::random))
}

fn log_generation(stats: &GenerationStats) {
    tracing::debug!(
        generation = stats.generation,
        best = stats.best_cost,
        mean = stats.mean_cost,
        worst = stats.worst_cost,
        feasible = stats.feasible,
        "generation evaluated"
    );
}

// ============================================================================
// Tests
// ============================================================================
