//! gradesheet-report — Output writers.
//!
//! Serializes parsed records to JSON and flattened rows or statistics
//! tables to CSV.

pub mod csv_report;
pub mod json_report;

pub use csv_report::write_csv;
pub use json_report::{render_json, write_json};
