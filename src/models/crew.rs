//! Crew plans.
//!
//! A [`CrewPlan`] is one crew's queue of jobs. The queue is kept sorted by
//! ascending RUL after every mutation; evaluation simulates the jobs in that
//! order.

use serde::Serialize;
use std::fmt;

use super::Job;

/// Skill profile of a crew. Drives the duration model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CrewType {
    A,
    B,
}

impl fmt::Display for CrewType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CrewType::A => f.write_str("A"),
            CrewType::B => f.write_str("B"),
        }
    }
}

/// Ordered job queue of a single crew.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrewPlan {
    crew_type: CrewType,
    name: String,
    jobs: Vec<Job>,
    /// Last job's end day, 0 when empty. Refreshed by schedule evaluation.
    pub(crate) total_duration: i64,
}

impl CrewPlan {
    /// Creates an empty plan.
    pub fn new(crew_type: CrewType, name: impl Into<String>) -> Self {
        Self {
            crew_type,
            name: name.into(),
            jobs: Vec::new(),
            total_duration: 0,
        }
    }

    pub fn crew_type(&self) -> CrewType {
        self.crew_type
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Jobs in RUL order.
    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    /// Working days needed by this crew, as of the last evaluation.
    pub fn total_duration(&self) -> i64 {
        self.total_duration
    }

    /// Whether a real job with `id` is queued here.
    pub fn contains(&self, id: i64) -> bool {
        id >= 0 && self.jobs.iter().any(|job| job.id == id)
    }

    /// Queues a copy of `job` and restores RUL order.
    pub fn push(&mut self, job: &Job) {
        self.jobs.push(*job);
        self.sort_by_rul();
    }

    /// Queues a placeholder slot.
    pub fn push_placeholder(&mut self) {
        self.push(&Job::placeholder());
    }

    /// Stable sort by ascending RUL.
    pub fn sort_by_rul(&mut self) {
        self.jobs.sort_by_key(|job| job.rul);
    }

    pub(crate) fn jobs_mut(&mut self) -> &mut [Job] {
        &mut self.jobs
    }

    /// Drops every placeholder slot.
    pub(crate) fn strip_placeholders(&mut self) {
        self.jobs.retain(|job| !job.is_placeholder());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_keeps_rul_order() {
        let mut plan = CrewPlan::new(CrewType::A, "Team1");
        plan.push(&Job::new(1, 20));
        plan.push(&Job::new(2, 5));
        plan.push(&Job::new(3, 12));

        let ruls: Vec<i64> = plan.jobs().iter().map(|j| j.rul).collect();
        assert_eq!(ruls, vec![5, 12, 20]);
        assert_eq!(plan.len(), 3);
    }

    #[test]
    fn test_contains_ignores_placeholders() {
        let mut plan = CrewPlan::new(CrewType::A, "Team1");
        plan.push_placeholder();
        plan.push(&Job::new(10, 3));

        assert!(plan.contains(10));
        assert!(!plan.contains(11));
        assert!(!plan.contains(-1));
    }

    #[test]
    fn test_strip_placeholders() {
        let mut plan = CrewPlan::new(CrewType::A, "Team1");
        plan.push_placeholder();
        plan.push(&Job::new(10, 3));
        plan.push_placeholder();

        plan.strip_placeholders();
        assert_eq!(plan.len(), 1);
        assert_eq!(plan.jobs()[0].id, 10);
    }

    #[test]
    fn test_crew_type_display() {
        assert_eq!(CrewType::A.to_string(), "A");
        assert_eq!(CrewType::B.to_string(), "B");
    }
}
