//! Planner configuration.
//!
//! [`PlanConfig`] holds every knob of a planning run: population sizing,
//! selection and crossover rates, insertion balance, the service model
//! tables and the plan horizon.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{PlanError, Result};
use crate::models::{BandTables, CrewType, InsertionPolicy, ServiceModel};

/// Configuration for the crew planning search.
///
/// # Defaults
///
/// ```
/// use u_crewplan::ga::PlanConfig;
///
/// let config = PlanConfig::default();
/// assert_eq!(config.population_size, 100);
/// assert_eq!(config.generations, 100);
/// assert_eq!(config.max_plan_duration, 30);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_crewplan::ga::PlanConfig;
///
/// let config = PlanConfig::default()
///     .with_population_size(40)
///     .with_elitism_size(4)
///     .with_tournament_size(6)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanConfig {
    /// Number of schedules per generation.
    pub population_size: usize,

    /// Number of generations to run. The sole termination condition.
    pub generations: usize,

    /// Lowest-cost schedules copied unchanged into the next generation.
    pub elitism_size: usize,

    /// Schedules drawn per tournament; the best two become parents.
    pub tournament_size: usize,

    /// Probability of recombining a parent pair (0.0–1.0).
    ///
    /// Otherwise both parents are cloned into the next generation.
    pub crossover_probability: f64,

    /// Maximum workload (days) a crew may exceed the lightest crew by and
    /// still accept a randomly inserted job.
    pub insertion_imbalance_threshold: i64,

    /// Crew draws per balanced insertion before reporting starvation.
    pub insertion_retry_limit: usize,

    /// Cap on a single late day's penalty.
    pub max_daily_cost: i64,

    /// Longest crew workload (days) a feasible schedule may have.
    pub max_plan_duration: i64,

    /// Id-banded duration and cost tables.
    pub bands: BandTables,

    /// Random seed for reproducibility.
    ///
    /// `None` seeds from OS entropy.
    pub seed: Option<u64>,

    /// Whether the multi-run driver executes runs in parallel.
    ///
    /// Only effective with the `parallel` feature.
    pub parallel: bool,
}

impl Default for PlanConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            generations: 100,
            elitism_size: 10,
            tournament_size: 5,
            crossover_probability: 0.9,
            insertion_imbalance_threshold: 5,
            insertion_retry_limit: 1000,
            max_daily_cost: 250,
            max_plan_duration: 30,
            bands: BandTables::default(),
            seed: None,
            parallel: true,
        }
    }
}

impl PlanConfig {
    /// Parses a configuration from JSON. Missing fields keep their defaults.
    pub fn from_json_str(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Loads a configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the number of generations.
    pub fn with_generations(mut self, n: usize) -> Self {
        self.generations = n;
        self
    }

    /// Sets the number of elites.
    pub fn with_elitism_size(mut self, n: usize) -> Self {
        self.elitism_size = n;
        self
    }

    /// Sets the tournament size.
    pub fn with_tournament_size(mut self, k: usize) -> Self {
        self.tournament_size = k;
        self
    }

    /// Sets the crossover probability.
    pub fn with_crossover_probability(mut self, p: f64) -> Self {
        self.crossover_probability = p.clamp(0.0, 1.0);
        self
    }

    /// Sets the insertion imbalance threshold (days).
    pub fn with_insertion_imbalance_threshold(mut self, days: i64) -> Self {
        self.insertion_imbalance_threshold = days;
        self
    }

    /// Sets the balanced insertion retry ceiling.
    pub fn with_insertion_retry_limit(mut self, n: usize) -> Self {
        self.insertion_retry_limit = n;
        self
    }

    /// Sets the daily penalty cap.
    pub fn with_max_daily_cost(mut self, cost: i64) -> Self {
        self.max_daily_cost = cost;
        self
    }

    /// Sets the plan horizon (days).
    pub fn with_max_plan_duration(mut self, days: i64) -> Self {
        self.max_plan_duration = days;
        self
    }

    /// Replaces the duration and cost tables.
    pub fn with_bands(mut self, bands: BandTables) -> Self {
        self.bands = bands;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Enables or disables parallel multi-run execution.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Builds the service model described by this configuration.
    pub fn service_model(&self) -> ServiceModel {
        ServiceModel::new(self.bands.clone(), self.max_daily_cost)
    }

    /// Balanced insertion parameters.
    pub fn insertion_policy(&self) -> InsertionPolicy {
        InsertionPolicy {
            imbalance_threshold: self.insertion_imbalance_threshold,
            retry_limit: self.insertion_retry_limit,
        }
    }

    /// Validates the configuration.
    ///
    /// # Errors
    /// [`PlanError::InvalidConfiguration`] naming the first offending knob.
    pub fn validate(&self) -> Result<()> {
        let invalid =
            |msg: &str| -> Result<()> { Err(PlanError::InvalidConfiguration(msg.into())) };

        if self.population_size < 2 {
            return invalid("population_size must be at least 2");
        }
        if self.generations == 0 {
            return invalid("generations must be at least 1");
        }
        if self.elitism_size >= self.population_size {
            return invalid("elitism_size must be smaller than population_size");
        }
        if self.tournament_size < 2 {
            return invalid("tournament_size must be at least 2");
        }
        if self.tournament_size > self.population_size {
            return invalid("tournament_size must not exceed population_size");
        }
        if !(0.0..=1.0).contains(&self.crossover_probability) {
            return invalid("crossover_probability must be within [0, 1]");
        }
        if self.insertion_imbalance_threshold < 0 {
            return invalid("insertion_imbalance_threshold must be non-negative");
        }
        if self.insertion_retry_limit == 0 {
            return invalid("insertion_retry_limit must be at least 1");
        }
        if self.max_daily_cost <= 0 {
            return invalid("max_daily_cost must be positive");
        }
        if self.max_plan_duration <= 0 {
            return invalid("max_plan_duration must be positive");
        }
        if self.bands.base_duration.is_empty()
            || self.bands.type_b_adjustment.is_empty()
            || self.bands.cost_factor.is_empty()
        {
            return invalid("band tables must not be empty");
        }
        if let Some(band) = self.bands.bands().find(|band| band.first > band.last) {
            return invalid(&format!(
                "band [{}, {}] starts after it ends",
                band.first, band.last
            ));
        }
        if self.bands.cost_factor.iter().any(|band| band.value <= 0) {
            return invalid("cost_factor bands must be positive");
        }

        let model = self.service_model();
        for id in self.bands.breakpoints() {
            for crew_type in [CrewType::A, CrewType::B] {
                let days = model.duration(crew_type, id);
                if days <= 0 {
                    return invalid(&format!(
                        "job {id} would take {days} days for a type {crew_type} crew"
                    ));
                }
            }
        }
        Ok(())
    }
}
