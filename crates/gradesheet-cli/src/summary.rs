//! Console summary table.

use comfy_table::{Cell, Table};

use gradesheet_core::model::QuestionRow;
use gradesheet_core::statistics::compute_section_stats;

/// Print per-section accuracy, weakest first, to stderr.
pub fn print_summary(rows: &[QuestionRow]) {
    let stats = compute_section_stats(rows);
    if stats.is_empty() {
        eprintln!("No question rows parsed.");
        return;
    }

    let mut table = Table::new();
    table.set_header(vec!["Section", "Attempts", "Correct", "Incorrect", "Accuracy"]);

    for s in &stats {
        table.add_row(vec![
            Cell::new(&s.key),
            Cell::new(s.attempts),
            Cell::new(s.correct),
            Cell::new(s.incorrect),
            Cell::new(format!("{:.1}%", s.accuracy * 100.0)),
        ]);
    }

    let total = rows.len();
    let correct = rows.iter().filter(|r| r.is_correct).count();
    eprintln!("\n{table}");
    eprintln!("{correct}/{total} correct across all parsed questions");
}
