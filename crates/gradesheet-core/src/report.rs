//! Exam and file record builders with numbering integrity checks.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::model::{
    ExamMetadata, ExamRecord, ExamSummary, FileRecord, MultiExamRecord, MultiExamSummary,
    QuestionResult,
};
use crate::parser::{parse_metadata, parse_questions, split_exam_blocks};

/// Build the validated record for one exam block.
pub fn build_exam_record(text: &str, source_path: &Path) -> ExamRecord {
    let questions = parse_questions(text);
    let metadata = parse_metadata(text);
    let summary = summarize(&questions, &metadata);

    if summary.has_integrity_issues() {
        tracing::warn!(
            source = %source_path.display(),
            missing = ?summary.missing_numbers,
            duplicates = ?summary.duplicate_numbers,
            unexpected = ?summary.unexpected_numbers,
            "question numbering is incomplete"
        );
    }

    ExamRecord {
        source: absolute_source(source_path),
        metadata,
        summary,
        questions,
    }
}

/// Build the record for one input file, which may hold several concatenated exams.
pub fn build_file_record(text: &str, source_path: &Path) -> FileRecord {
    let blocks = split_exam_blocks(text);
    if let [block] = blocks.as_slice() {
        return FileRecord::Single(build_exam_record(block, source_path));
    }

    let exams: Vec<ExamRecord> = blocks
        .iter()
        .map(|block| build_exam_record(block, source_path))
        .collect();

    let summary = MultiExamSummary {
        total_exams_parsed: exams.len(),
        total_questions_parsed: exams.iter().map(|e| e.summary.total_questions_parsed).sum(),
        correct: exams.iter().map(|e| e.summary.correct).sum(),
        incorrect: exams.iter().map(|e| e.summary.incorrect).sum(),
    };

    let metadata = exams
        .first()
        .map(|e| e.metadata.identity())
        .unwrap_or_default();

    FileRecord::Multi(MultiExamRecord {
        source: absolute_source(source_path),
        metadata,
        summary,
        exams,
    })
}

/// Compute totals and the missing/duplicate/unexpected number checks.
///
/// The expected total is the sheet's reported total when present, else
/// the highest question number seen. With no questions no checks run.
pub fn summarize(questions: &[QuestionResult], metadata: &ExamMetadata) -> ExamSummary {
    let total = questions.len();
    let correct = questions.iter().filter(|q| q.is_correct).count();

    let mut summary = ExamSummary {
        total_questions_parsed: total,
        correct,
        incorrect: total - correct,
        ..ExamSummary::default()
    };

    let Some(max_number) = questions.iter().map(|q| q.number).max() else {
        return summary;
    };

    let mut seen = HashSet::new();
    for q in questions {
        if !seen.insert(q.number) && !summary.duplicate_numbers.contains(&q.number) {
            summary.duplicate_numbers.push(q.number);
        }
    }

    let expected_total = metadata.reported_total.unwrap_or(max_number);

    summary.missing_numbers = (1..=expected_total).filter(|n| !seen.contains(n)).collect();

    let mut unexpected: Vec<u32> = seen
        .iter()
        .copied()
        .filter(|&n| n == 0 || n > expected_total)
        .collect();
    unexpected.sort_unstable();
    summary.unexpected_numbers = unexpected;

    summary
}

fn absolute_source(path: &Path) -> String {
    std::path::absolute(path)
        .unwrap_or_else(|_| PathBuf::from(path))
        .display()
        .to_string()
}
