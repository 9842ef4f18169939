//! Core data model types for gradesheet.
//!
//! These are the records produced by the parsing pipeline: parsed question
//! rows, sparse exam metadata, per-exam and per-file records, and the
//! aggregate output of a multi-file run.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::Serialize;

use crate::statistics::GroupStats;

/// One answered question parsed from an exam block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionResult {
    /// 1-based position within the exam.
    pub number: u32,
    /// Pool item code, e.g. `T3A04`.
    pub question_id: String,
    /// Answer the candidate selected.
    pub selected: char,
    /// Correct answer; equals `selected` unless a correction was reported.
    pub correct: char,
    /// `selected == correct`.
    pub is_correct: bool,
}

impl QuestionResult {
    pub fn new(number: u32, question_id: impl Into<String>, selected: char, correct: char) -> Self {
        Self {
            number,
            question_id: question_id.into(),
            selected,
            correct,
            is_correct: selected == correct,
        }
    }
}

/// Header and footer facts found in an exam block.
///
/// Every field is optional; fields not present in the source text are
/// skipped during serialization rather than written as `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExamMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub candidate_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<Outcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reported_correct: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reported_total: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub element: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid_from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid_to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exam_started_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exam_started_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exam_graded_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exam_graded_by: Option<String>,
}

impl ExamMetadata {
    /// Keep only the candidate identity, as lifted onto a multi-exam file record.
    pub fn identity(&self) -> Self {
        Self {
            candidate_name: self.candidate_name.clone(),
            pin: self.pin.clone(),
            ..Self::default()
        }
    }
}

/// Pass/fail outcome printed on the result sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Outcome {
    Pass,
    Fail,
}

impl FromStr for Outcome {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PASS" => Ok(Outcome::Pass),
            "FAIL" => Ok(Outcome::Fail),
            other => Err(format!("unknown outcome: {other}")),
        }
    }
}

/// Totals and integrity checks for one exam.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExamSummary {
    pub total_questions_parsed: usize,
    pub correct: usize,
    pub incorrect: usize,
    /// Numbers in `1..=expected_total` that never appeared.
    pub missing_numbers: Vec<u32>,
    /// Numbers seen more than once, in first-duplicate-seen order.
    pub duplicate_numbers: Vec<u32>,
    /// Distinct numbers outside `1..=expected_total`, ascending.
    pub unexpected_numbers: Vec<u32>,
}

impl ExamSummary {
    /// Returns true if any numbering check flagged a problem.
    pub fn has_integrity_issues(&self) -> bool {
        !self.missing_numbers.is_empty()
            || !self.duplicate_numbers.is_empty()
            || !self.unexpected_numbers.is_empty()
    }
}

/// One exam block turned into a validated record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExamRecord {
    /// Absolute path of the document the block came from.
    pub source: String,
    pub metadata: ExamMetadata,
    pub summary: ExamSummary,
    /// Sorted ascending by `number`.
    pub questions: Vec<QuestionResult>,
}

/// Summed totals across the exams of a multi-exam file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MultiExamSummary {
    pub total_exams_parsed: usize,
    pub total_questions_parsed: usize,
    pub correct: usize,
    pub incorrect: usize,
}

/// A file that contained several concatenated exams.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MultiExamRecord {
    pub source: String,
    /// Candidate name and PIN from the first exam, when present.
    pub metadata: ExamMetadata,
    pub summary: MultiExamSummary,
    pub exams: Vec<ExamRecord>,
}

/// Parsed output for one input file.
///
/// Single-exam files serialize flat, without an `exams` wrapper.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FileRecord {
    Single(ExamRecord),
    Multi(MultiExamRecord),
}

impl FileRecord {
    pub fn source(&self) -> &str {
        match self {
            FileRecord::Single(exam) => &exam.source,
            FileRecord::Multi(multi) => &multi.source,
        }
    }

    /// The exams in this file; a single-exam record is its own only exam.
    pub fn exams(&self) -> &[ExamRecord] {
        match self {
            FileRecord::Single(exam) => std::slice::from_ref(exam),
            FileRecord::Multi(multi) => &multi.exams,
        }
    }

    /// The file's self-reported `(questions, correct, incorrect)` totals.
    pub fn totals(&self) -> (usize, usize, usize) {
        match self {
            FileRecord::Single(exam) => (
                exam.summary.total_questions_parsed,
                exam.summary.correct,
                exam.summary.incorrect,
            ),
            FileRecord::Multi(multi) => (
                multi.summary.total_questions_parsed,
                multi.summary.correct,
                multi.summary.incorrect,
            ),
        }
    }
}

/// One question flattened with the context of the exam it came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuestionRow {
    pub source: String,
    /// 1-based index of the exam within its source file.
    pub exam_index_in_source: usize,
    /// Empty when the exam reported no test number.
    pub test_number: String,
    pub element: Option<u32>,
    pub number: u32,
    pub question_id: String,
    pub selected: char,
    pub correct: char,
    pub is_correct: bool,
}

/// Run-wide totals of a multi-file aggregate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AggregateSummary {
    pub total_input_files: usize,
    pub total_exams_parsed: usize,
    pub total_questions_parsed: usize,
    pub correct: usize,
    pub incorrect: usize,
}

/// Combined output across several input files.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateOutput {
    pub sources: Vec<String>,
    pub summary: AggregateSummary,
    pub question_stats: Vec<GroupStats>,
    pub section_stats: Vec<GroupStats>,
    pub subsection_stats: Vec<GroupStats>,
    pub results: Vec<FileRecord>,
}

/// The JSON document a run emits: one file's record, or the aggregate.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RunOutput {
    File(FileRecord),
    Aggregate(AggregateOutput),
}

/// How an input document should be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputKind {
    /// Infer from the file extension.
    #[default]
    Auto,
    Pdf,
    Text,
}

impl InputKind {
    /// Resolve `Auto` against a path: `.pdf` (any case) is a PDF, anything else is text.
    pub fn resolve(self, path: &Path) -> InputKind {
        match self {
            InputKind::Auto => {
                let is_pdf = path
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));
                if is_pdf {
                    InputKind::Pdf
                } else {
                    InputKind::Text
                }
            }
            other => other,
        }
    }
}

impl FromStr for InputKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(InputKind::Auto),
            "pdf" => Ok(InputKind::Pdf),
            "text" | "txt" => Ok(InputKind::Text),
            other => Err(format!("unknown input type: {other}")),
        }
    }
}

impl fmt::Display for InputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputKind::Auto => write!(f, "auto"),
            InputKind::Pdf => write!(f, "pdf"),
            InputKind::Text => write!(f, "text"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn is_correct_follows_answers() {
        assert!(QuestionResult::new(1, "T1A01", 'B', 'B').is_correct);
        assert!(!QuestionResult::new(2, "T1A02", 'B', 'C').is_correct);
    }

    #[test]
    fn input_kind_auto_resolution() {
        assert_eq!(InputKind::Auto.resolve(Path::new("exam.pdf")), InputKind::Pdf);
        assert_eq!(InputKind::Auto.resolve(Path::new("EXAM.PDF")), InputKind::Pdf);
        assert_eq!(InputKind::Auto.resolve(Path::new("exam.txt")), InputKind::Text);
        assert_eq!(InputKind::Auto.resolve(Path::new("exam")), InputKind::Text);
        assert_eq!(InputKind::Pdf.resolve(Path::new("exam.txt")), InputKind::Pdf);
    }

    #[test]
    fn input_kind_from_str() {
        assert_eq!("PDF".parse::<InputKind>().unwrap(), InputKind::Pdf);
        assert_eq!("text".parse::<InputKind>().unwrap(), InputKind::Text);
        assert!("docx".parse::<InputKind>().is_err());
    }

    #[test]
    fn input_kind_display_parses_back() {
        for kind in [InputKind::Auto, InputKind::Pdf, InputKind::Text] {
            assert_eq!(kind.to_string().parse::<InputKind>().unwrap(), kind);
        }
    }

    #[test]
    fn metadata_omits_absent_fields() {
        let meta = ExamMetadata {
            pin: Some("1234".into()),
            element: Some(2),
            ..Default::default()
        };
        let json = serde_json::to_value(&meta).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), 2);
        assert_eq!(obj["pin"], "1234");
        assert_eq!(obj["element"], 2);
    }

    #[test]
    fn single_file_record_serializes_flat() {
        let record = FileRecord::Single(ExamRecord {
            source: "/tmp/a.txt".into(),
            metadata: ExamMetadata::default(),
            summary: ExamSummary::default(),
            questions: vec![QuestionResult::new(1, "T1A01", 'A', 'A')],
        });
        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("exams").is_none());
        assert_eq!(json["questions"][0]["selected"], "A");
        assert_eq!(json["questions"][0]["is_correct"], true);
    }
}
