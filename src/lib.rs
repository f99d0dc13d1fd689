//! Maintenance crew planning by genetic search.
//!
//! Assigns maintenance jobs (one per engine, each with a remaining-useful-life
//! deadline) to a fixed roster of four crews, two of each skill profile,
//! minimizing a convex, day-capped lateness penalty.
//!
//! - **Models**: jobs, crew plans, the id-banded duration/penalty model and
//!   candidate schedules with simulation-based evaluation and repair.
//! - **Genetic search**: tournament selection, elitism and a crew-segment
//!   crossover with repair, driven for a fixed number of generations.
//! - **IO**: catalog loading (JSON or semicolon-separated) and schedule
//!   reports.
//!
//! # Example
//!
//! ```no_run
//! use u_crewplan::ga::{PlanConfig, PlanRunner};
//! use u_crewplan::io;
//!
//! let config = PlanConfig::default().with_seed(42);
//! let catalog = io::load_catalog("predicted_rul.json", config.max_plan_duration)?;
//! let best = PlanRunner::run(catalog, &config)?.into_best()?;
//! io::write_report_file(&best, "best_schedule.csv")?;
//! # Ok::<(), u_crewplan::PlanError>(())
//! ```
//!
//! All randomness flows through an explicit generator, so seeded runs are
//! reproducible.

pub mod error;
pub mod ga;
pub mod io;
pub mod models;

pub use error::{PlanError, Result};
