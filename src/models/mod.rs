//! Domain model: jobs, crews, the service model and candidate schedules.
//!
//! # Key Types
//!
//! - [`Job`]: One engine's maintenance request with its RUL deadline
//! - [`CrewPlan`]: One crew's job queue, kept in RUL order
//! - [`ServiceModel`]: Id-banded duration and lateness-penalty functions
//! - [`Schedule`]: Four crew plans plus evaluation and repair

mod crew;
mod job;
mod schedule;
mod service;

pub use crew::{CrewPlan, CrewType};
pub use job::{Job, PLACEHOLDER_ID};
pub use schedule::{InsertionPolicy, Schedule, CREW_COUNT};
pub use service::{Band, BandTables, ServiceModel};
