//! Job catalog loading.
//!
//! Two source formats are understood:
//!
//! - **JSON map** of engine id to predicted RUL: `{"1": 12, "7": 3.5}`
//! - **Semicolon-separated table** with `id` and `RUL` header columns (other
//!   columns are ignored). An id listed more than once keeps its smallest RUL.
//!
//! Fractional RULs are floored to whole days. Jobs with `rul >= max_plan_duration`
//! cannot be late within the plan horizon and are dropped. The result is
//! sorted by ascending RUL (ties by id).

use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{PlanError, Result};
use crate::models::Job;

/// Parses a JSON `{ "<id>": <rul>, ... }` map.
pub fn parse_json_catalog(text: &str, max_plan_duration: i64) -> Result<Vec<Job>> {
    let entries: BTreeMap<String, f64> = serde_json::from_str(text)?;

    let mut ruls = BTreeMap::new();
    for (key, rul) in entries {
        let id = parse_id(&key)?;
        ruls.insert(id, whole_days(id, rul)?);
    }
    Ok(finish(ruls, max_plan_duration))
}

/// Parses a semicolon-separated table with `id` and `RUL` columns.
pub fn parse_csv_catalog(text: &str, max_plan_duration: i64) -> Result<Vec<Job>> {
    let mut lines = text.lines().filter(|line| !line.trim().is_empty());
    let header = lines
        .next()
        .ok_or_else(|| PlanError::InvalidCatalog("catalog table is empty".into()))?;
    let columns: Vec<&str> = header.split(';').map(str::trim).collect();
    let id_col = column_index(&columns, "id")?;
    let rul_col = column_index(&columns, "rul")?;

    let mut ruls: BTreeMap<i64, i64> = BTreeMap::new();
    for (line_no, line) in lines.enumerate() {
        let fields: Vec<&str> = line.split(';').map(str::trim).collect();
        let (Some(id_field), Some(rul_field)) = (fields.get(id_col), fields.get(rul_col)) else {
            return Err(PlanError::InvalidCatalog(format!(
                "row {} has {} fields, expected at least {}",
                line_no + 1,
                fields.len(),
                id_col.max(rul_col) + 1
            )));
        };

        let id = parse_id(id_field)?;
        let rul: f64 = rul_field.parse().map_err(|_| {
            PlanError::InvalidCatalog(format!("job {id} has non-numeric rul {rul_field:?}"))
        })?;
        let rul = whole_days(id, rul)?;
        ruls.entry(id)
            .and_modify(|existing| *existing = (*existing).min(rul))
            .or_insert(rul);
    }
    Ok(finish(ruls, max_plan_duration))
}

/// Loads a catalog file: `.csv` files as tables, anything else as JSON.
pub fn load_catalog(path: impl AsRef<Path>, max_plan_duration: i64) -> Result<Vec<Job>> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)?;
    let is_table = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));

    let jobs = if is_table {
        parse_csv_catalog(&text, max_plan_duration)?
    } else {
        parse_json_catalog(&text, max_plan_duration)?
    };
    tracing::debug!(path = %path.display(), jobs = jobs.len(), "catalog loaded");
    Ok(jobs)
}

fn column_index(columns: &[&str], name: &str) -> Result<usize> {
    columns
        .iter()
        .position(|column| column.eq_ignore_ascii_case(name))
        .ok_or_else(|| PlanError::InvalidCatalog(format!("missing {name:?} column")))
}

fn parse_id(raw: &str) -> Result<i64> {
    let id: i64 = raw
        .trim()
        .parse()
        .map_err(|_| PlanError::InvalidCatalog(format!("engine id {raw:?} is not an integer")))?;
    if id <= 0 {
        return Err(PlanError::InvalidCatalog(format!(
            "engine id {id} is not positive"
        )));
    }
    Ok(id)
}

fn whole_days(id: i64, rul: f64) -> Result<i64> {
    if !rul.is_finite() || rul < 0.0 {
        return Err(PlanError::InvalidCatalog(format!(
            "job {id} has invalid rul {rul}"
        )));
    }
    Ok(rul.floor() as i64)
}

fn finish(ruls: BTreeMap<i64, i64>, max_plan_duration: i64) -> Vec<Job> {
    let mut jobs: Vec<Job> = ruls
        .into_iter()
        .filter(|&(_, rul)| rul < max_plan_duration)
        .map(|(id, rul)| Job::new(id, rul))
        .collect();
    jobs.sort_by_key(|job| (job.rul, job.id));
    jobs
}
