//! Tournament parent selection.
//!
//! A tournament draws `k` distinct schedules (a shuffled prefix of the
//! population) and returns the two cheapest as a parent pair. Larger `k`
//! raises selection pressure.
//!
//! # References
//!
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"

use rand::seq::SliceRandom;
use rand::Rng;

use crate::models::Schedule;

/// Selects two parent indices by tournament.
///
/// `k` is clamped into `[2, population.len()]`. Ties keep the shuffled order.
/// The first index is never worse than the second.
///
/// # Complexity
/// O(n) per call (index shuffle)
///
/// # Panics
/// Panics if `population` has fewer than two schedules.
pub fn tournament_pair<R: Rng>(population: &[Schedule], k: usize, rng: &mut R) -> (usize, usize) {
    let n = population.len();
    assert!(n >= 2, "tournament needs at least two schedules");

    let mut candidates: Vec<usize> = (0..n).collect();
    candidates.shuffle(rng);
    candidates.truncate(k.clamp(2, n));
    candidates.sort_by_key(|&idx| population[idx].total_cost());

    (candidates[0], candidates[1])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Job, ServiceModel};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Schedules whose cost equals `2 · lateness` of a single id-30 job.
    fn make_population(latenesses: &[i64]) -> Vec<Schedule> {
        let model = ServiceModel::new(Default::default(), 2);
        latenesses
            .iter()
            .map(|&late| {
                let mut schedule = Schedule::new();
                // Type-A duration of id 30 is 3 days.
                schedule.add_job(&Job::new(30, 3 - late), 0);
                schedule.evaluate(&model);
                schedule
            })
            .collect()
    }

    #[test]
    fn test_full_tournament_returns_two_best() {
        let pop = make_population(&[5, 1, 0, 3]);
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..100 {
            let (a, b) = tournament_pair(&pop, 4, &mut rng);
            assert_eq!((a, b), (2, 1));
        }
    }

    #[test]
    fn test_pair_is_distinct_and_ordered() {
        let pop = make_population(&[4, 3, 2, 1, 0, 6]);
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..1000 {
            let (a, b) = tournament_pair(&pop, 3, &mut rng);
            assert_ne!(a, b);
            assert!(pop[a].total_cost() <= pop[b].total_cost());
        }
    }

    #[test]
    fn test_small_tournament_spreads_selection() {
        let pop = make_population(&[0, 1, 2, 3]);
        let mut rng = StdRng::seed_from_u64(42);

        let mut wins = [0u32; 4];
        let mut appearances = [0u32; 4];
        for _ in 0..4000 {
            let (a, b) = tournament_pair(&pop, 2, &mut rng);
            wins[a] += 1;
            appearances[a] += 1;
            appearances[b] += 1;
        }
        assert!(appearances.iter().all(|&c| c > 0), "appearances: {appearances:?}");
        assert_eq!(wins[3], 0, "worst schedule can never lead a pair");
        assert!(wins[0] > wins[1], "wins: {wins:?}");
    }

    #[test]
    fn test_oversized_k_is_clamped() {
        let pop = make_population(&[2, 0]);
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(tournament_pair(&pop, 10, &mut rng), (1, 0));
    }

    #[test]
    #[should_panic(expected = "tournament needs at least two schedules")]
    fn test_single_schedule_panics() {
        let pop = make_population(&[0]);
        let mut rng = StdRng::seed_from_u64(42);
        tournament_pair(&pop, 3, &mut rng);
    }
}
