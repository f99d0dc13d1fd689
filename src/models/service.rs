//! Service duration and lateness penalty model.
//!
//! Both quantities are pure functions of the job id (and crew type / lateness),
//! looked up in id-banded tables:
//!
//! - **Duration**: a base duration per id band; Type-B crews add a second
//!   id-banded adjustment on top.
//! - **Penalty**: for each late day `d`, `factor · d²` capped at
//!   `max_daily_cost`, summed over `d = 1..=lateness`. Convex in lateness
//!   but bounded per day.

use serde::{Deserialize, Serialize};

use super::CrewType;

/// An inclusive id range mapped to a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Band {
    pub first: i64,
    pub last: i64,
    pub value: i64,
}

impl Band {
    pub const fn new(first: i64, last: i64, value: i64) -> Self {
        Self { first, last, value }
    }

    fn covers(&self, id: i64) -> bool {
        self.first <= id && id <= self.last
    }
}

/// Looks up the band covering `id`. Ids outside every band take the last
/// band's value; an empty table yields 0.
fn lookup(bands: &[Band], id: i64) -> i64 {
    bands
        .iter()
        .find(|band| band.covers(id))
        .or_else(|| bands.last())
        .map_or(0, |band| band.value)
}

/// The three id-banded tables behind the service model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BandTables {
    /// Base service duration (days), applied as-is for Type-A crews.
    pub base_duration: Vec<Band>,
    /// Added to the base duration for Type-B crews.
    pub type_b_adjustment: Vec<Band>,
    /// Per-job penalty factor multiplying `d²`.
    pub cost_factor: Vec<Band>,
}

impl Default for BandTables {
    fn default() -> Self {
        Self {
            base_duration: vec![
                Band::new(1, 20, 5),
                Band::new(21, 55, 3),
                Band::new(56, 80, 4),
                Band::new(81, 100, 5),
            ],
            type_b_adjustment: vec![
                Band::new(1, 25, -1),
                Band::new(26, 70, 3),
                Band::new(71, 100, 2),
            ],
            cost_factor: vec![
                Band::new(1, 25, 4),
                Band::new(26, 45, 2),
                Band::new(46, 75, 5),
                Band::new(76, 100, 6),
            ],
        }
    }
}

impl BandTables {
    fn tables(&self) -> [&[Band]; 3] {
        [
            self.base_duration.as_slice(),
            self.type_b_adjustment.as_slice(),
            self.cost_factor.as_slice(),
        ]
    }

    /// Every band of every table.
    pub fn bands(&self) -> impl Iterator<Item = &Band> {
        self.tables().into_iter().flatten()
    }

    /// Positive ids at which some table may change value: id 1, every band
    /// start and the id just past every band end. Each positive id looks up
    /// the same values as the nearest breakpoint at or below it.
    pub(crate) fn breakpoints(&self) -> Vec<i64> {
        let mut ids: Vec<i64> = std::iter::once(1)
            .chain(
                self.bands()
                    .flat_map(|band| [band.first, band.last.saturating_add(1)]),
            )
            .filter(|&id| id >= 1)
            .collect();
        ids.sort_unstable();
        ids.dedup();
        ids
    }
}

/// Duration and penalty functions for one planning run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceModel {
    bands: BandTables,
    max_daily_cost: i64,
}

impl ServiceModel {
    pub fn new(bands: BandTables, max_daily_cost: i64) -> Self {
        Self {
            bands,
            max_daily_cost,
        }
    }

    pub fn max_daily_cost(&self) -> i64 {
        self.max_daily_cost
    }

    /// Service duration in days of job `job_id` for a crew of `crew_type`.
    pub fn duration(&self, crew_type: CrewType, job_id: i64) -> i64 {
        let base = lookup(&self.bands.base_duration, job_id);
        match crew_type {
            CrewType::A => base,
            CrewType::B => base + lookup(&self.bands.type_b_adjustment, job_id),
        }
    }

    /// Cost-band factor of job `job_id`.
    pub fn cost_factor(&self, job_id: i64) -> i64 {
        lookup(&self.bands.cost_factor, job_id)
    }

    /// Lateness penalty of job `job_id` finishing `lateness` days late.
    ///
    /// Zero when `lateness <= 0`.
    pub fn penalty(&self, job_id: i64, lateness: i64) -> i64 {
        if lateness <= 0 {
            return 0;
        }
        let factor = self.cost_factor(job_id);
        (1..=lateness)
            .map(|day| (factor * day * day).min(self.max_daily_cost))
            .sum()
    }
}

impl Default for ServiceModel {
    fn default() -> Self {
        Self::new(BandTables::default(), 250)
    }
}
