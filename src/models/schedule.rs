//! Candidate schedule: one complete assignment of jobs to the four crews.
//!
//! A [`Schedule`] owns exactly four [`CrewPlan`]s (two Type-A, two Type-B)
//! and derives its cost and crew-duration extrema by simulation. The derived
//! fields are only valid after [`Schedule::evaluate`]; any structural change
//! requires a fresh evaluation.
//!
//! The schedule also provides the two insertion paths used by the search:
//!
//! - [`Schedule::add_job`]: insertion into a fixed crew with duplicate
//!   prevention (a duplicate becomes a placeholder slot).
//! - [`Schedule::insert_balanced`]: insertion into a random crew whose
//!   workload is within the imbalance threshold of the lightest crew.
//!
//! [`Schedule::repair`] combines both to restore a complete assignment after
//! crossover.

use std::collections::HashSet;

use rand::Rng;

use super::{CrewPlan, CrewType, Job, ServiceModel};
use crate::error::{PlanError, Result};

/// Number of crews in every schedule.
pub const CREW_COUNT: usize = 4;

/// Parameters of balanced random insertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InsertionPolicy {
    /// A crew accepts a job while its duration is at most
    /// `min_crew_duration + imbalance_threshold`.
    pub imbalance_threshold: i64,
    /// Crew draws before giving up with [`PlanError::InsertionStarvation`].
    pub retry_limit: usize,
}

/// One candidate assignment of jobs across the crew roster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule {
    crews: [CrewPlan; CREW_COUNT],
    total_cost: i64,
    min_crew_duration: i64,
    max_crew_duration: i64,
}

impl Default for Schedule {
    fn default() -> Self {
        Self::new()
    }
}

impl Schedule {
    /// Creates an empty schedule with the fixed roster
    /// `Team1 (A), Team2 (B), Team3 (A), Team4 (B)`.
    pub fn new() -> Self {
        Self {
            crews: [
                CrewPlan::new(CrewType::A, "Team1"),
                CrewPlan::new(CrewType::B, "Team2"),
                CrewPlan::new(CrewType::A, "Team3"),
                CrewPlan::new(CrewType::B, "Team4"),
            ],
            total_cost: 0,
            min_crew_duration: 0,
            max_crew_duration: 0,
        }
    }

    /// Builds an evaluated schedule by balanced random insertion of every
    /// catalog job, in catalog order.
    pub fn random<R: Rng>(
        catalog: &[Job],
        model: &ServiceModel,
        policy: InsertionPolicy,
        rng: &mut R,
    ) -> Result<Self> {
        let mut schedule = Self::new();
        for job in catalog {
            schedule.insert_balanced(job, model, policy, rng)?;
        }
        schedule.evaluate(model);
        Ok(schedule)
    }

    pub fn crews(&self) -> &[CrewPlan] {
        &self.crews
    }

    /// # Panics
    /// Panics if `index >= CREW_COUNT`.
    pub fn crew(&self, index: usize) -> &CrewPlan {
        &self.crews[index]
    }

    /// Sum of all job penalties, as of the last evaluation.
    pub fn total_cost(&self) -> i64 {
        self.total_cost
    }

    pub fn min_crew_duration(&self) -> i64 {
        self.min_crew_duration
    }

    pub fn max_crew_duration(&self) -> i64 {
        self.max_crew_duration
    }

    /// Whether every crew finishes within `max_plan_duration` days.
    pub fn is_feasible(&self, max_plan_duration: i64) -> bool {
        self.max_crew_duration <= max_plan_duration
    }

    /// Whether the real job `id` is assigned to any crew.
    pub fn contains_job(&self, id: i64) -> bool {
        self.crews.iter().any(|crew| crew.contains(id))
    }

    /// All job ids (placeholders included), sorted ascending.
    pub fn job_ids(&self) -> Vec<i64> {
        let mut ids: Vec<i64> = self
            .crews
            .iter()
            .flat_map(|crew| crew.jobs().iter().map(|job| job.id))
            .collect();
        ids.sort_unstable();
        ids
    }

    /// Total number of queued slots, placeholders included.
    pub fn job_count(&self) -> usize {
        self.crews.iter().map(CrewPlan::len).sum()
    }

    fn planned_ids(&self) -> HashSet<i64> {
        self.crews
            .iter()
            .flat_map(|crew| crew.jobs().iter())
            .filter(|job| !job.is_placeholder())
            .map(|job| job.id)
            .collect()
    }

    /// Queues a copy of `job` on crew `crew_index`.
    ///
    /// If the job is already assigned anywhere in this schedule, a
    /// placeholder is queued instead so the slot count is preserved.
    /// Returns `true` when the real job was queued.
    ///
    /// # Panics
    /// Panics if `crew_index >= CREW_COUNT`.
    pub fn add_job(&mut self, job: &Job, crew_index: usize) -> bool {
        if self.contains_job(job.id) {
            self.crews[crew_index].push_placeholder();
            false
        } else {
            self.crews[crew_index].push(job);
            true
        }
    }

    /// Sorts every crew plan by ascending RUL.
    pub fn sort_by_rul(&mut self) {
        for crew in &mut self.crews {
            crew.sort_by_rul();
        }
    }

    /// Simulates every crew and refreshes all derived fields.
    ///
    /// Each crew starts on day 1 and processes its jobs back to back in RUL
    /// order. Returns the new total cost.
    pub fn evaluate(&mut self, model: &ServiceModel) -> i64 {
        self.sort_by_rul();

        let mut total_cost = 0;
        for crew in &mut self.crews {
            let crew_type = crew.crew_type();
            let mut cursor = 1;
            for job in crew.jobs_mut() {
                job.duration = model.duration(crew_type, job.id);
                job.start = cursor;
                job.end = job.start + job.duration - 1;
                cursor = job.end + 1;
                job.lateness = (job.end - job.rul).max(0);
                job.cost = model.penalty(job.id, job.lateness);
                total_cost += job.cost;
            }
            crew.total_duration = cursor - 1;
        }

        self.total_cost = total_cost;
        self.update_duration_bounds();
        total_cost
    }

    /// Recomputes crew durations without simulating costs.
    ///
    /// A crew's duration is the sum of its job durations regardless of
    /// order, so this is enough to refresh the insertion baseline.
    fn refresh_durations(&mut self, model: &ServiceModel) {
        for crew in &mut self.crews {
            let crew_type = crew.crew_type();
            let duration: i64 = crew
                .jobs()
                .iter()
                .filter(|job| !job.is_placeholder())
                .map(|job| model.duration(crew_type, job.id))
                .sum();
            crew.total_duration = duration;
        }
        self.update_duration_bounds();
    }

    fn update_duration_bounds(&mut self) {
        let durations = self.crews.iter().map(CrewPlan::total_duration);
        self.min_crew_duration = durations.clone().min().unwrap_or(0);
        self.max_crew_duration = durations.max().unwrap_or(0);
    }

    /// Queues `job` on a random crew whose workload is within the
    /// imbalance threshold of the lightest crew.
    ///
    /// The crew durations are refreshed before drawing, so the lightest crew
    /// always qualifies when the threshold is non-negative. Returns the
    /// chosen crew index.
    ///
    /// # Errors
    /// [`PlanError::InsertionStarvation`] when `policy.retry_limit` draws
    /// find no qualifying crew.
    pub fn insert_balanced<R: Rng>(
        &mut self,
        job: &Job,
        model: &ServiceModel,
        policy: InsertionPolicy,
        rng: &mut R,
    ) -> Result<usize> {
        self.refresh_durations(model);
        let ceiling = self.min_crew_duration + policy.imbalance_threshold;

        for _ in 0..policy.retry_limit {
            let index = rng.random_range(0..CREW_COUNT);
            if self.crews[index].total_duration <= ceiling {
                self.crews[index].push(job);
                return Ok(index);
            }
        }

        Err(PlanError::InsertionStarvation {
            job_id: job.id,
            attempts: policy.retry_limit,
            threshold: policy.imbalance_threshold,
        })
    }

    /// Restores a complete assignment of `catalog`.
    ///
    /// 1. Placeholder slots are filled with unplanned catalog jobs, taken
    ///    from the end of the unplanned list.
    /// 2. Jobs still unplanned go through [`insert_balanced`](Self::insert_balanced).
    /// 3. Unfilled placeholders are dropped.
    ///
    /// Afterwards every catalog job appears exactly once. Derived fields are
    /// stale until the next [`evaluate`](Self::evaluate).
    pub fn repair<R: Rng>(
        &mut self,
        catalog: &[Job],
        model: &ServiceModel,
        policy: InsertionPolicy,
        rng: &mut R,
    ) -> Result<()> {
        let planned = self.planned_ids();
        let mut unplanned: Vec<Job> = catalog
            .iter()
            .filter(|job| !planned.contains(&job.id))
            .copied()
            .collect();

        for crew in &mut self.crews {
            for slot in crew.jobs_mut().iter_mut().filter(|job| job.is_placeholder()) {
                if let Some(job) = unplanned.pop() {
                    slot.assign(&job);
                }
            }
        }

        for job in &unplanned {
            self.insert_balanced(job, model, policy, rng)?;
        }

        for crew in &mut self.crews {
            crew.strip_placeholders();
            crew.sort_by_rul();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const POLICY: InsertionPolicy = InsertionPolicy {
        imbalance_threshold: 5,
        retry_limit: 1000,
    };

    fn catalog(n: i64) -> Vec<Job> {
        (1..=n).map(|id| Job::new(id, (id * 7) % 29)).collect()
    }

    #[test]
    fn test_roster_composition() {
        let schedule = Schedule::new();
        let types: Vec<CrewType> = schedule.crews().iter().map(|c| c.crew_type()).collect();
        assert_eq!(types, vec![CrewType::A, CrewType::B, CrewType::A, CrewType::B]);
        assert_eq!(schedule.crew(3).name(), "Team4");
    }

    #[test]
    fn test_single_job_on_time() {
        let model = ServiceModel::default();
        let mut schedule = Schedule::new();
        schedule.add_job(&Job::new(10, 5), 0);
        schedule.evaluate(&model);

        let job = schedule.crew(0).jobs()[0];
        assert_eq!(job.duration, 5);
        assert_eq!(job.start, 1);
        assert_eq!(job.end, 5);
        assert_eq!(job.lateness, 0);
        assert_eq!(job.cost, 0);
        assert_eq!(schedule.total_cost(), 0);
    }

    #[test]
    fn test_type_b_job_two_days_late() {
        let model = ServiceModel::default();
        let mut schedule = Schedule::new();
        // Type-B duration for id 30 is 6 days; rul 4 puts the end 2 days late.
        schedule.add_job(&Job::new(30, 4), 1);
        schedule.evaluate(&model);

        let job = schedule.crew(1).jobs()[0];
        assert_eq!(job.end, 6);
        assert_eq!(job.lateness, 2);
        assert_eq!(job.cost, 10);
        assert_eq!(schedule.total_cost(), 10);
    }

    #[test]
    fn test_evaluate_back_to_back_in_rul_order() {
        let model = ServiceModel::default();
        let mut schedule = Schedule::new();
        schedule.add_job(&Job::new(21, 20), 2);
        schedule.add_job(&Job::new(1, 3), 2);
        schedule.add_job(&Job::new(60, 9), 2);
        schedule.evaluate(&model);

        let jobs = schedule.crew(2).jobs();
        let ruls: Vec<i64> = jobs.iter().map(|j| j.rul).collect();
        assert_eq!(ruls, vec![3, 9, 20]);
        for pair in jobs.windows(2) {
            assert_eq!(pair[1].start, pair[0].end + 1);
        }
        assert_eq!(jobs[0].start, 1);
        // 5 + 4 + 3
        assert_eq!(schedule.crew(2).total_duration(), 12);
        assert_eq!(schedule.max_crew_duration(), 12);
        assert_eq!(schedule.min_crew_duration(), 0);
    }

    #[test]
    fn test_evaluate_is_idempotent() {
        let model = ServiceModel::default();
        let mut schedule = Schedule::new();
        for job in catalog(12) {
            schedule.add_job(&job, (job.id % 4) as usize);
        }
        let first = schedule.evaluate(&model);
        let snapshot = schedule.clone();
        let second = schedule.evaluate(&model);
        assert_eq!(first, second);
        assert_eq!(schedule, snapshot);
    }

    #[test]
    fn test_evaluating_clone_leaves_original_untouched() {
        let model = ServiceModel::default();
        let mut original = Schedule::new();
        original.add_job(&Job::new(30, 4), 1);
        original.add_job(&Job::new(10, 5), 1);

        let mut copy = original.clone();
        copy.evaluate(&model);
        assert_eq!(copy.crew(1).jobs()[0].cost, 10);

        for job in original.crew(1).jobs() {
            assert_eq!((job.start, job.end, job.lateness, job.cost), (0, 0, 0, 0));
        }
        assert_eq!(original.total_cost(), 0);
        assert_eq!(original.crew(1).total_duration(), 0);
    }

    #[test]
    fn test_add_job_duplicate_becomes_placeholder() {
        let mut schedule = Schedule::new();
        assert!(schedule.add_job(&Job::new(5, 10), 0));
        assert!(!schedule.add_job(&Job::new(5, 10), 3));

        assert_eq!(schedule.crew(3).len(), 1);
        assert!(schedule.crew(3).jobs()[0].is_placeholder());
        assert_eq!(schedule.job_ids(), vec![-1, 5]);
    }

    #[test]
    fn test_insert_balanced_prefers_lightest_crew() {
        let model = ServiceModel::default();
        let mut rng = StdRng::seed_from_u64(42);
        let mut schedule = Schedule::new();
        schedule.add_job(&Job::new(1, 5), 0);
        schedule.add_job(&Job::new(2, 5), 1);
        schedule.add_job(&Job::new(3, 5), 2);

        let policy = InsertionPolicy {
            imbalance_threshold: 0,
            retry_limit: 1000,
        };
        let index = schedule
            .insert_balanced(&Job::new(4, 5), &model, policy, &mut rng)
            .expect("lightest crew qualifies");
        assert_eq!(index, 3);
    }

    #[test]
    fn test_insert_balanced_never_stalls_from_empty() {
        let model = ServiceModel::default();
        let mut rng = StdRng::seed_from_u64(7);
        let mut schedule = Schedule::new();
        for job in catalog(60) {
            schedule
                .insert_balanced(&job, &model, POLICY, &mut rng)
                .expect("fresh baseline always admits a crew");
        }
        schedule.evaluate(&model);
        assert_eq!(schedule.job_ids(), (1..=60).collect::<Vec<_>>());
        // a crew only accepts work while within threshold of the lightest,
        // so the spread is bounded by threshold + longest single job
        assert!(schedule.max_crew_duration() - schedule.min_crew_duration() <= 5 + 7);
    }

    #[test]
    fn test_insert_balanced_starvation() {
        let model = ServiceModel::default();
        let mut rng = StdRng::seed_from_u64(1);
        let mut schedule = Schedule::new();
        let policy = InsertionPolicy {
            imbalance_threshold: -1,
            retry_limit: 16,
        };

        let err = schedule
            .insert_balanced(&Job::new(9, 4), &model, policy, &mut rng)
            .unwrap_err();
        assert!(matches!(
            err,
            PlanError::InsertionStarvation {
                job_id: 9,
                attempts: 16,
                threshold: -1
            }
        ));
        assert_eq!(schedule.job_count(), 0);
    }

    #[test]
    fn test_repair_fills_placeholders_and_inserts_rest() {
        let model = ServiceModel::default();
        let mut rng = StdRng::seed_from_u64(3);
        let jobs = catalog(8);
        let mut schedule = Schedule::new();
        schedule.add_job(&jobs[0], 0);
        schedule.add_job(&jobs[0], 1); // placeholder
        schedule.add_job(&jobs[0], 2); // placeholder
        schedule.add_job(&jobs[1], 3);

        schedule.repair(&jobs, &model, POLICY, &mut rng).unwrap();
        schedule.evaluate(&model);

        assert_eq!(schedule.job_ids(), (1..=8).collect::<Vec<_>>());
        // both placeholder slots received a real job
        assert!(!schedule.crew(1).is_empty());
        assert!(!schedule.crew(2).is_empty());
        for crew in schedule.crews() {
            let ruls: Vec<i64> = crew.jobs().iter().map(|j| j.rul).collect();
            let mut sorted = ruls.clone();
            sorted.sort();
            assert_eq!(ruls, sorted);
        }
    }

    #[test]
    fn test_repair_strips_unused_placeholders() {
        let model = ServiceModel::default();
        let mut rng = StdRng::seed_from_u64(3);
        let jobs = catalog(2);
        let mut schedule = Schedule::new();
        schedule.add_job(&jobs[0], 0);
        schedule.add_job(&jobs[1], 1);
        schedule.add_job(&jobs[1], 2);
        schedule.add_job(&jobs[0], 3);

        schedule.repair(&jobs, &model, POLICY, &mut rng).unwrap();
        assert_eq!(schedule.job_ids(), vec![1, 2]);
        assert!(schedule.crew(2).is_empty());
        assert!(schedule.crew(3).is_empty());
    }

    #[test]
    fn test_feasibility() {
        let model = ServiceModel::default();
        let mut schedule = Schedule::new();
        for id in 1..=7 {
            schedule.add_job(&Job::new(id, 30), 0);
        }
        schedule.evaluate(&model);
        assert_eq!(schedule.max_crew_duration(), 35);
        assert!(!schedule.is_feasible(30));
        assert!(schedule.is_feasible(35));
    }
}
