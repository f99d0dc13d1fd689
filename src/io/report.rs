//! Schedule report export.
//!
//! Flattens a schedule into one [`ReportRow`] per job, crew by crew, and
//! writes the rows as semicolon-separated text or JSON.
//!
//! # Example
//!
//! ```
//! use u_crewplan::io::report;
//! use u_crewplan::models::{Job, Schedule, ServiceModel};
//!
//! let mut schedule = Schedule::new();
//! schedule.add_job(&Job::new(10, 5), 0);
//! schedule.evaluate(&ServiceModel::default());
//!
//! let text = report::to_csv_string(&schedule);
//! assert!(text.starts_with("Team;Type;DaysOfWork;EngineID"));
//! assert!(text.contains("Team1;A;5;10;5;1;5;0;0"));
//! ```

use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::error::Result;
use crate::models::{CrewType, Schedule};

/// Column names, in field order.
pub const REPORT_COLUMNS: [&str; 9] = [
    "Team",
    "Type",
    "DaysOfWork",
    "EngineID",
    "RUL",
    "StartDay",
    "EndDay",
    "DaysLate",
    "Cost",
];

/// One job of an evaluated schedule, with its crew's context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRow {
    #[serde(rename = "Team")]
    pub crew: String,
    #[serde(rename = "Type")]
    pub crew_type: CrewType,
    #[serde(rename = "DaysOfWork")]
    pub crew_duration: i64,
    #[serde(rename = "EngineID")]
    pub job_id: i64,
    #[serde(rename = "RUL")]
    pub rul: i64,
    #[serde(rename = "StartDay")]
    pub start: i64,
    #[serde(rename = "EndDay")]
    pub end: i64,
    #[serde(rename = "DaysLate")]
    pub lateness: i64,
    #[serde(rename = "Cost")]
    pub cost: i64,
}

/// Rows for every job, crews in roster order, jobs in RUL order.
pub fn report_rows(schedule: &Schedule) -> Vec<ReportRow> {
    schedule
        .crews()
        .iter()
        .flat_map(|crew| {
            crew.jobs().iter().map(move |job| ReportRow {
                crew: crew.name().to_string(),
                crew_type: crew.crew_type(),
                crew_duration: crew.total_duration(),
                job_id: job.id,
                rul: job.rul,
                start: job.start,
                end: job.end,
                lateness: job.lateness,
                cost: job.cost,
            })
        })
        .collect()
}

/// Semicolon-separated report with a header line.
pub fn to_csv_string(schedule: &Schedule) -> String {
    let mut output = REPORT_COLUMNS.join(";");
    output.push('\n');

    for row in report_rows(schedule) {
        output.push_str(&format!(
            "{};{};{};{};{};{};{};{};{}\n",
            row.crew,
            row.crew_type,
            row.crew_duration,
            row.job_id,
            row.rul,
            row.start,
            row.end,
            row.lateness,
            row.cost,
        ));
    }
    output
}

/// Writes the semicolon-separated report to `writer`.
pub fn write_report<W: Write>(schedule: &Schedule, mut writer: W) -> Result<()> {
    writer.write_all(to_csv_string(schedule).as_bytes())?;
    Ok(())
}

/// Writes the semicolon-separated report to a file.
pub fn write_report_file(schedule: &Schedule, path: impl AsRef<Path>) -> Result<()> {
    std::fs::write(path, to_csv_string(schedule))?;
    Ok(())
}

/// Report rows as a pretty-printed JSON array.
pub fn report_json(schedule: &Schedule) -> Result<String> {
    Ok(serde_json::to_string_pretty(&report_rows(schedule))?)
}
