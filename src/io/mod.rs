//! Catalog input and schedule report output.
//!
//! Thin wrappers around the planner: [`catalog`] turns RUL predictions into
//! [`Job`](crate::models::Job)s, [`report`] flattens a finished
//! [`Schedule`](crate::models::Schedule) into per-job rows.

pub mod catalog;
pub mod report;

pub use catalog::{load_catalog, parse_csv_catalog, parse_json_catalog};
pub use report::{report_json, report_rows, write_report, write_report_file, ReportRow};
