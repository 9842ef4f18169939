//! gradesheet-core — Exam-result parsing, validation, and statistics.
//!
//! This crate turns extracted result-sheet text into typed exam records,
//! checks question numbering for completeness, and aggregates accuracy
//! across files by question, section, and subsection.

pub mod config;
pub mod error;
pub mod extract;
pub mod model;
pub mod parser;
pub mod report;
pub mod statistics;
pub mod traits;

pub use error::{Error, Result};
