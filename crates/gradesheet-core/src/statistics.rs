//! Cross-file aggregation and grouped accuracy statistics.
//!
//! Flattens every parsed question into a [`QuestionRow`] and rolls those
//! rows up by question id, section (`T3`), and subsection (`T3A`).

use std::collections::HashMap;

use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::model::{AggregateOutput, AggregateSummary, FileRecord, QuestionRow};
use crate::parser::QuestionIdParts;

/// The dimension a statistics table is grouped by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Grouping {
    /// The exact question id, e.g. `T3A04`.
    Question,
    /// Pool letter and section digit, e.g. `T3`.
    Section,
    /// Pool, section, and subsection letter, e.g. `T3A`.
    Subsection,
}

impl Grouping {
    /// Name of the key column in serialized output.
    pub fn key_field(self) -> &'static str {
        match self {
            Grouping::Question => "question_id",
            Grouping::Section => "section_id",
            Grouping::Subsection => "subsection_id",
        }
    }

    /// Derive the group key for a question id, or `None` to leave the row out.
    pub fn group_key(self, question_id: &str) -> Option<String> {
        match self {
            Grouping::Question => (!question_id.is_empty()).then(|| question_id.to_string()),
            Grouping::Section => QuestionIdParts::parse(question_id).map(|p| p.section_id()),
            Grouping::Subsection => QuestionIdParts::parse(question_id).map(|p| p.subsection_id()),
        }
    }
}

/// Attempt counts and accuracy for one group.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupStats {
    pub grouping: Grouping,
    pub key: String,
    pub attempts: u32,
    pub correct: u32,
    pub incorrect: u32,
    /// `correct / attempts`, rounded to 4 decimals.
    pub accuracy: f64,
}

impl Serialize for GroupStats {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("GroupStats", 5)?;
        s.serialize_field(self.grouping.key_field(), &self.key)?;
        s.serialize_field("attempts", &self.attempts)?;
        s.serialize_field("correct", &self.correct)?;
        s.serialize_field("incorrect", &self.incorrect)?;
        s.serialize_field("accuracy", &self.accuracy)?;
        s.end()
    }
}

/// Correct over attempts, rounded to 4 decimal places; 0.0 with no attempts.
pub fn accuracy(correct: u32, attempts: u32) -> f64 {
    if attempts == 0 {
        return 0.0;
    }
    (correct as f64 / attempts as f64 * 10_000.0).round() / 10_000.0
}

/// Flatten one file's exams into question-level rows.
pub fn flatten_questions(record: &FileRecord) -> Vec<QuestionRow> {
    let source = record.source();
    record
        .exams()
        .iter()
        .enumerate()
        .flat_map(|(i, exam)| {
            let test_number = exam.metadata.test_number.clone().unwrap_or_default();
            let element = exam.metadata.element;
            exam.questions.iter().map(move |q| QuestionRow {
                source: source.to_string(),
                exam_index_in_source: i + 1,
                test_number: test_number.clone(),
                element,
                number: q.number,
                question_id: q.question_id.clone(),
                selected: q.selected,
                correct: q.correct,
                is_correct: q.is_correct,
            })
        })
        .collect()
}

/// Group rows and compute per-group accuracy.
///
/// Rows are ordered weakest first: ascending accuracy, then descending
/// attempts, then ascending key.
pub fn compute_group_stats(rows: &[QuestionRow], grouping: Grouping) -> Vec<GroupStats> {
    let mut counts: HashMap<String, (u32, u32)> = HashMap::new();
    for row in rows {
        let Some(key) = grouping.group_key(&row.question_id) else {
            continue;
        };
        let entry = counts.entry(key).or_default();
        entry.0 += 1;
        if row.is_correct {
            entry.1 += 1;
        }
    }

    let mut stats: Vec<GroupStats> = counts
        .into_iter()
        .map(|(key, (attempts, correct))| GroupStats {
            grouping,
            key,
            attempts,
            correct,
            incorrect: attempts - correct,
            accuracy: accuracy(correct, attempts),
        })
        .collect();

    stats.sort_by(|a, b| {
        a.accuracy
            .total_cmp(&b.accuracy)
            .then_with(|| b.attempts.cmp(&a.attempts))
            .then_with(|| a.key.cmp(&b.key))
    });
    stats
}

/// Per-question statistics, e.g. `T3A04`.
pub fn compute_question_stats(rows: &[QuestionRow]) -> Vec<GroupStats> {
    compute_group_stats(rows, Grouping::Question)
}

/// Per-section statistics, e.g. `T3`.
pub fn compute_section_stats(rows: &[QuestionRow]) -> Vec<GroupStats> {
    compute_group_stats(rows, Grouping::Section)
}

/// Per-subsection statistics, e.g. `T3A`.
pub fn compute_subsection_stats(rows: &[QuestionRow]) -> Vec<GroupStats> {
    compute_group_stats(rows, Grouping::Subsection)
}

/// Combine the records of a multi-file run.
///
/// Question, correct, and incorrect totals are summed from each file's
/// own summary rather than recounted from the flattened rows.
pub fn build_aggregate(records: Vec<FileRecord>) -> AggregateOutput {
    let rows: Vec<QuestionRow> = records.iter().flat_map(flatten_questions).collect();

    let mut summary = AggregateSummary {
        total_input_files: records.len(),
        ..AggregateSummary::default()
    };
    for record in &records {
        let (questions, correct, incorrect) = record.totals();
        summary.total_exams_parsed += record.exams().len();
        summary.total_questions_parsed += questions;
        summary.correct += correct;
        summary.incorrect += incorrect;
    }

    tracing::info!(
        files = summary.total_input_files,
        exams = summary.total_exams_parsed,
        questions = summary.total_questions_parsed,
        "aggregated results"
    );

    AggregateOutput {
        sources: records.iter().map(|r| r.source().to_string()).collect(),
        summary,
        question_stats: compute_question_stats(&rows),
        section_stats: compute_section_stats(&rows),
        subsection_stats: compute_subsection_stats(&rows),
        results: records,
    }
}
