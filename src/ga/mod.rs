//! Genetic search over crew schedules.
//!
//! A population of complete schedules is evolved by tournament selection,
//! elitism and a crew-segment crossover followed by repair. Every schedule
//! in every generation assigns each catalog job exactly once; feasibility
//! against the plan horizon is only enforced when extracting the result.
//!
//! # Key Types
//!
//! - [`PlanConfig`]: Search parameters and service model tables
//! - [`Population`]: Schedules of one generation plus the generational step
//! - [`PlanRunner`]: Executes single runs and batches of runs
//! - [`PlanResult`] / [`BatchSummary`]: Run outcomes
//!
//! # Submodules
//!
//! - [`crossover`]: Crew-segment crossover and its cut-point rules
//!
//! # References
//!
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*
//! - Cheng, Gen & Tsujimura (1996), "A Tutorial Survey of Job-Shop Scheduling
//!   Problems using Genetic Algorithms"

mod config;
pub mod crossover;
mod population;
mod runner;
mod selection;

pub use config::PlanConfig;
pub use population::{GenerationStats, Population};
pub use runner::{BatchSummary, PlanResult, PlanRunner};
pub use selection::tournament_pair;
