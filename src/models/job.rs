//! Maintenance job model.
//!
//! A job is one engine's maintenance request. The identity (`id`, `rul`) is
//! supplied by the catalog; every other field is derived by
//! [`Schedule::evaluate`](super::Schedule::evaluate) and is overwritten on
//! each evaluation.

/// Id carried by placeholder jobs.
pub const PLACEHOLDER_ID: i64 = -1;

/// A maintenance job assigned to (at most) one crew.
///
/// Jobs are plain values: inserting into a [`CrewPlan`](super::CrewPlan)
/// stores a copy, so schedules that share ancestry never alias a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Job {
    /// Engine identifier. Negative ids mark placeholders.
    pub id: i64,
    /// Remaining useful life: the day by which the job should be finished.
    pub rul: i64,
    /// Service duration in days for the assigned crew.
    pub duration: i64,
    /// First working day (1-based).
    pub start: i64,
    /// Last working day (inclusive).
    pub end: i64,
    /// Days finished past `rul`, never negative.
    pub lateness: i64,
    /// Lateness penalty.
    pub cost: i64,
}

impl Job {
    /// Creates an unscheduled job.
    pub fn new(id: i64, rul: i64) -> Self {
        Self {
            id,
            rul,
            duration: 0,
            start: 0,
            end: 0,
            lateness: 0,
            cost: 0,
        }
    }

    /// Creates a placeholder that reserves a slot during repair.
    pub fn placeholder() -> Self {
        Self::new(PLACEHOLDER_ID, PLACEHOLDER_ID)
    }

    /// Whether this job is a repair placeholder.
    pub fn is_placeholder(&self) -> bool {
        self.id < 0
    }

    /// Replaces this job's identity, dropping any derived fields.
    pub(crate) fn assign(&mut self, other: &Job) {
        *self = Job::new(other.id, other.rul);
    }
}
