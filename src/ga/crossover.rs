//! Crew-segment crossover with repair.
//!
//! One crew is picked in each parent and their job queues are cut and
//! swapped:
//!
//! ```text
//! parent 1, crew i:  [a0 a1 | a2 a3 a4]      child 1, crew i:  [a0 a1 b3 b4]
//! parent 2, crew j:  [b0 b1 b2 | b3 b4]  ->  child 2, crew j:  [b0 b1 b2 a2 a3 a4]
//! ```
//!
//! The other three crews are inherited from the child's own parent. Every
//! insertion goes through [`Schedule::add_job`], so a job that would appear
//! twice leaves a placeholder instead. [`Schedule::repair`] then places the
//! jobs lost in the swap, and the children are evaluated.
//!
//! When the first parent's crew finishes earlier, the second parent's cut
//! moves one job further with probability 1/2, shifting work towards the
//! lighter crew.

use rand::Rng;

use crate::error::Result;
use crate::models::{InsertionPolicy, Job, Schedule, ServiceModel, CREW_COUNT};

/// Crew indices and cut positions of one crossover.
///
/// Child 1 keeps parent 1's crew `crew_1` up to and including `cut_1`;
/// child 2 keeps parent 2's crew `crew_2` up to and including `cut_2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrossoverPoints {
    pub crew_1: usize,
    pub crew_2: usize,
    pub cut_1: usize,
    pub cut_2: usize,
}

/// Draws crossover points, or `None` when either selected crew holds fewer
/// than two jobs.
pub fn choose_points<R: Rng>(
    parent_1: &Schedule,
    parent_2: &Schedule,
    rng: &mut R,
) -> Option<CrossoverPoints> {
    let crew_1 = rng.random_range(0..CREW_COUNT);
    let crew_2 = rng.random_range(0..CREW_COUNT);
    let plan_1 = parent_1.crew(crew_1);
    let plan_2 = parent_2.crew(crew_2);

    if plan_1.len() < 2 || plan_2.len() < 2 {
        return None;
    }

    let cut = rng.random_range(0..=plan_1.len().min(plan_2.len()) - 2);
    let mut cut_2 = cut;
    if plan_1.total_duration() < plan_2.total_duration()
        && rng.random_bool(0.5)
        && plan_2.len() > cut + 2
    {
        cut_2 += 1;
    }

    Some(CrossoverPoints {
        crew_1,
        crew_2,
        cut_1: cut,
        cut_2,
    })
}

/// Builds the two unrepaired children for `points`.
///
/// Children may contain placeholders and miss catalog jobs.
///
/// # Panics
/// Panics if a cut lies outside its crew's queue.
pub fn recombine(
    parent_1: &Schedule,
    parent_2: &Schedule,
    points: CrossoverPoints,
) -> (Schedule, Schedule) {
    let CrossoverPoints {
        crew_1,
        crew_2,
        cut_1,
        cut_2,
    } = points;
    let (head_1, tail_1) = parent_1.crew(crew_1).jobs().split_at(cut_1 + 1);
    let (head_2, tail_2) = parent_2.crew(crew_2).jobs().split_at(cut_2 + 1);

    let mut child_1 = Schedule::new();
    let mut child_2 = Schedule::new();

    for job in head_1.iter().chain(tail_2) {
        child_1.add_job(job, crew_1);
    }
    for job in head_2.iter().chain(tail_1) {
        child_2.add_job(job, crew_2);
    }

    for index in 0..CREW_COUNT {
        if index != crew_1 {
            for job in parent_1.crew(index).jobs() {
                child_1.add_job(job, index);
            }
        }
        if index != crew_2 {
            for job in parent_2.crew(index).jobs() {
                child_2.add_job(job, index);
            }
        }
    }

    (child_1, child_2)
}

/// Recombines two parents into two repaired, evaluated children.
///
/// Returns `Ok(None)` for a degenerate draw (a selected crew with fewer than
/// two jobs); the caller keeps the parents. Each child holds every
/// `catalog` job exactly once.
///
/// # Errors
/// Propagates [`PlanError::InsertionStarvation`](crate::PlanError) from repair.
pub fn crossover<R: Rng>(
    parent_1: &Schedule,
    parent_2: &Schedule,
    catalog: &[Job],
    model: &ServiceModel,
    policy: InsertionPolicy,
    rng: &mut R,
) -> Result<Option<(Schedule, Schedule)>> {
    let Some(points) = choose_points(parent_1, parent_2, rng) else {
        tracing::trace!("degenerate crossover draw, keeping parents");
        return Ok(None);
    };

    let (mut child_1, mut child_2) = recombine(parent_1, parent_2, points);
    for child in [&mut child_1, &mut child_2] {
        child.repair(catalog, model, policy, rng)?;
        child.evaluate(model);
    }

    Ok(Some((child_1, child_2)))
}
