//! Population of candidate schedules and the generational step.
//!
//! [`Population`] owns the job catalog (sorted by RUL, read-only) and a
//! fixed-size set of evaluated schedules kept in ascending cost order. One
//! call to [`Population::advance_generation`] replaces the whole set:
//!
//! 1. The `elitism_size` cheapest schedules are copied unchanged.
//! 2. Parent pairs are drawn by tournament; each pair is either cloned
//!    (probability `1 - crossover_probability`) or recombined by
//!    [`crossover`](super::crossover::crossover).
//! 3. Children are appended until the population size is reached, then
//!    the new generation is sorted by cost.

use std::collections::HashSet;

use rand::Rng;

use super::config::PlanConfig;
use super::crossover::crossover;
use super::selection::tournament_pair;
use crate::error::{PlanError, Result};
use crate::models::{Job, Schedule, ServiceModel};

/// Cost summary of one generation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationStats {
    /// Generations advanced so far (0 = initial population).
    pub generation: usize,
    pub best_cost: i64,
    pub worst_cost: i64,
    pub mean_cost: f64,
    /// Schedules within the plan horizon.
    pub feasible: usize,
}

/// Fixed-size set of candidate schedules over a shared job catalog.
#[derive(Debug, Clone)]
pub struct Population {
    catalog: Vec<Job>,
    config: PlanConfig,
    model: ServiceModel,
    schedules: Vec<Schedule>,
    generation: usize,
}

impl Population {
    /// Creates an empty population for `catalog`.
    ///
    /// The catalog is sorted by ascending RUL.
    ///
    /// # Errors
    /// - [`PlanError::InvalidConfiguration`] if `config` fails validation.
    /// - [`PlanError::InvalidCatalog`] for an empty catalog, a non-positive
    ///   or repeated id, or a negative RUL.
    pub fn new(mut catalog: Vec<Job>, config: PlanConfig) -> Result<Self> {
        config.validate()?;
        validate_catalog(&catalog)?;
        catalog.sort_by_key(|job| job.rul);

        let model = config.service_model();
        Ok(Self {
            catalog,
            config,
            model,
            schedules: Vec::new(),
            generation: 0,
        })
    }

    pub fn catalog(&self) -> &[Job] {
        &self.catalog
    }

    pub fn config(&self) -> &PlanConfig {
        &self.config
    }

    pub fn model(&self) -> &ServiceModel {
        &self.model
    }

    /// Schedules in ascending cost order.
    pub fn schedules(&self) -> &[Schedule] {
        &self.schedules
    }

    pub fn len(&self) -> usize {
        self.schedules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schedules.is_empty()
    }

    /// Generations advanced since [`initialize`](Self::initialize).
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Fills the population with random, workload-balanced schedules.
    ///
    /// Replaces any existing schedules and resets the generation counter.
    pub fn initialize<R: Rng>(&mut self, rng: &mut R) -> Result<()> {
        let policy = self.config.insertion_policy();
        let schedules = (0..self.config.population_size)
            .map(|_| Schedule::random(&self.catalog, &self.model, policy, rng))
            .collect::<Result<Vec<_>>>()?;

        self.schedules = schedules;
        self.generation = 0;
        self.sort_by_cost();
        Ok(())
    }

    /// Draws two parent indices by tournament.
    ///
    /// # Panics
    /// Panics if the population holds fewer than two schedules.
    pub fn tournament_select<R: Rng>(&self, rng: &mut R) -> (usize, usize) {
        tournament_pair(&self.schedules, self.config.tournament_size, rng)
    }

    /// Replaces the population with the next generation.
    ///
    /// # Errors
    /// - [`PlanError::InvalidConfiguration`] if called before
    ///   [`initialize`](Self::initialize).
    /// - [`PlanError::InsertionStarvation`] from crossover repair.
    pub fn advance_generation<R: Rng>(&mut self, rng: &mut R) -> Result<()> {
        if self.schedules.len() < 2 {
            return Err(PlanError::InvalidConfiguration(
                "population must be initialized before advancing".into(),
            ));
        }
        let size = self.config.population_size;
        let policy = self.config.insertion_policy();

        let mut next: Vec<Schedule> = Vec::with_capacity(size);
        next.extend(self.schedules.iter().take(self.config.elitism_size).cloned());

        while next.len() < size {
            let (idx_1, idx_2) = self.tournament_select(rng);
            let parent_1 = &self.schedules[idx_1];
            let parent_2 = &self.schedules[idx_2];

            let recombined = if rng.random_bool(self.config.crossover_probability) {
                crossover(parent_1, parent_2, &self.catalog, &self.model, policy, rng)?
            } else {
                None
            };
            let (child_1, child_2) =
                recombined.unwrap_or_else(|| (parent_1.clone(), parent_2.clone()));

            next.push(child_1);
            if next.len() < size {
                next.push(child_2);
            }
        }

        self.schedules = next;
        self.generation += 1;
        self.sort_by_cost();
        Ok(())
    }

    /// Cheapest schedule whose longest crew fits `max_plan_duration`, or
    /// `None` if no schedule is feasible.
    pub fn best_feasible(&self) -> Option<&Schedule> {
        let horizon = self.config.max_plan_duration;
        self.schedules
            .iter()
            .filter(|schedule| schedule.is_feasible(horizon))
            .min_by_key(|schedule| schedule.total_cost())
    }

    /// Cost summary of the current generation.
    pub fn stats(&self) -> GenerationStats {
        let costs = self.schedules.iter().map(Schedule::total_cost);
        let best_cost = costs.clone().min().unwrap_or(0);
        let worst_cost = costs.clone().max().unwrap_or(0);
        let mean_cost = if self.schedules.is_empty() {
            0.0
        } else {
            costs.sum::<i64>() as f64 / self.schedules.len() as f64
        };
        let horizon = self.config.max_plan_duration;

        GenerationStats {
            generation: self.generation,
            best_cost,
            worst_cost,
            mean_cost,
            feasible: self
                .schedules
                .iter()
                .filter(|schedule| schedule.is_feasible(horizon))
                .count(),
        }
    }

    fn sort_by_cost(&mut self) {
        self.schedules.sort_by_key(Schedule::total_cost);
    }
}

fn validate_catalog(catalog: &[Job]) -> Result<()> {
    if catalog.is_empty() {
        return Err(PlanError::InvalidCatalog("catalog is empty".into()));
    }

    let mut seen = HashSet::with_capacity(catalog.len());
    for job in catalog {
        if job.id <= 0 {
            return Err(PlanError::InvalidCatalog(format!(
                "job id {} is not positive",
                job.id
            )));
        }
        if job.rul < 0 {
            return Err(PlanError::InvalidCatalog(format!(
                "job {} has negative rul {}",
                job.id, job.rul
            )));
        }
        if !seen.insert(job.id) {
            return Err(PlanError::InvalidCatalog(format!(
                "job id {} appears more than once",
                job.id
            )));
        }
    }
    Ok(())
}
