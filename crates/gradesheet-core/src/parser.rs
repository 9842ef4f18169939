//! Result-sheet text parser.
//!
//! Splits extracted text into exam blocks and pulls question rows and
//! header/footer metadata out of each block. Every pattern is fixed and
//! tuned to the printed result-sheet layout; anything that does not match
//! is simply skipped. Digits are ASCII only, so a number the regex accepts
//! always parses and a question id it accepts always splits into parts.

use std::sync::LazyLock;

use regex::Regex;

use crate::model::{ExamMetadata, QuestionResult};

/// `17. T5B04: D (should be A)`
static QUESTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([0-9]{1,2})\.\s*([A-Z][0-9][A-Z][0-9]{2}):\s*([A-D])\s*(?:\(\s*should be\s*([A-D])\s*\))?")
        .expect("question pattern is valid")
});

/// Candidate header line, e.g. `Jane Q. Doe (PIN: 123456)`.
static HEADER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\s*(.+?)\s+\(PIN:\s*([0-9]+)\)\s*$").expect("header pattern is valid")
});

static OUTCOME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(FAIL|PASS)\b").expect("outcome pattern is valid"));

static SCORE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Test\s+(?:Failed|Passed)\s+-\s+([0-9]+)\s+out of\s+([0-9]+)")
        .expect("score pattern is valid")
});

static ELEMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Element\s+([0-9]+)").expect("element pattern is valid"));

static TEST_NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Test\s+#([0-9]+)").expect("test number pattern is valid"));

static VALIDITY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"valid\s+(.+?)\s+—\s+(.+?)\n").expect("validity pattern is valid")
});

static STARTED_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Exam started at\s+(.+?)\s+by\s+(\S+)").expect("started pattern is valid")
});

static GRADED_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Exam graded at\s+(.+?)\s+by\s+(\S+)").expect("graded pattern is valid")
});

/// Split extracted text into per-exam blocks.
///
/// Concatenated result documents repeat the `(PIN: ...)` candidate header,
/// and each occurrence starts a new block. Text with no header at all is
/// returned as a single block.
pub fn split_exam_blocks(text: &str) -> Vec<&str> {
    let starts: Vec<usize> = HEADER_RE.find_iter(text).map(|m| m.start()).collect();
    if starts.is_empty() {
        return vec![text];
    }

    let blocks: Vec<&str> = starts
        .iter()
        .enumerate()
        .map(|(i, &start)| {
            let end = starts.get(i + 1).copied().unwrap_or(text.len());
            text[start..end].trim()
        })
        .filter(|block| !block.is_empty())
        .collect();

    if blocks.is_empty() {
        vec![text]
    } else {
        blocks
    }
}

/// Parse all question-result rows from one exam block.
///
/// Rows come back sorted by question number, since two-column layouts are
/// extracted out of order. Duplicate numbers are kept for validation.
pub fn parse_questions(text: &str) -> Vec<QuestionResult> {
    let mut questions: Vec<QuestionResult> = QUESTION_RE
        .captures_iter(text)
        .filter_map(|caps| {
            let number = caps[1].parse::<u32>().ok()?;
            let selected = first_char(&caps[3])?;
            let correct = match caps.get(4) {
                Some(m) => first_char(m.as_str())?,
                None => selected,
            };
            Some(QuestionResult::new(number, &caps[2], selected, correct))
        })
        .collect();

    questions.sort_by_key(|q| q.number);
    tracing::debug!("parsed {} question rows", questions.len());
    questions
}

fn first_char(s: &str) -> Option<char> {
    s.chars().next()
}

/// Extract candidate and exam metadata from one exam block.
///
/// Each field comes from its own independent search; a miss leaves the
/// field unset.
pub fn parse_metadata(text: &str) -> ExamMetadata {
    let mut meta = ExamMetadata::default();

    if let Some(caps) = HEADER_RE.captures(text) {
        meta.candidate_name = Some(caps[1].trim().to_string());
        meta.pin = Some(caps[2].to_string());
    }

    if let Some(caps) = OUTCOME_RE.captures(text) {
        meta.outcome = caps[1].parse().ok();
    }

    if let Some(caps) = SCORE_RE.captures(text) {
        // Either both counts parse or neither is reported.
        if let (Ok(correct), Ok(total)) = (caps[1].parse(), caps[2].parse()) {
            meta.reported_correct = Some(correct);
            meta.reported_total = Some(total);
        }
    }

    if let Some(caps) = ELEMENT_RE.captures(text) {
        meta.element = caps[1].parse().ok();
    }

    if let Some(caps) = TEST_NUMBER_RE.captures(text) {
        meta.test_number = Some(caps[1].to_string());
    }

    if let Some(caps) = VALIDITY_RE.captures(text) {
        meta.valid_from = Some(caps[1].trim().to_string());
        meta.valid_to = Some(caps[2].trim().to_string());
    }

    if let Some(caps) = STARTED_RE.captures(text) {
        meta.exam_started_at = Some(caps[1].trim().to_string());
        meta.exam_started_by = Some(caps[2].to_string());
    }

    if let Some(caps) = GRADED_RE.captures(text) {
        meta.exam_graded_at = Some(caps[1].trim().to_string());
        meta.exam_graded_by = Some(caps[2].to_string());
    }

    meta
}

/// Pool, section, and subsection parts of a question id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestionIdParts {
    pub pool: char,
    pub section: char,
    pub subsection: char,
}

impl QuestionIdParts {
    /// Split an id like `T3A04`; returns `None` unless it has exactly that shape.
    pub fn parse(question_id: &str) -> Option<Self> {
        let bytes = question_id.as_bytes();
        if bytes.len() != 5 {
            return None;
        }
        let shape_ok = bytes[0].is_ascii_uppercase()
            && bytes[1].is_ascii_digit()
            && bytes[2].is_ascii_uppercase()
            && bytes[3].is_ascii_digit()
            && bytes[4].is_ascii_digit();
        shape_ok.then(|| Self {
            pool: bytes[0] as char,
            section: bytes[1] as char,
            subsection: bytes[2] as char,
        })
    }

    /// e.g. `T3`
    pub fn section_id(&self) -> String {
        format!("{}{}", self.pool, self.section)
    }

    /// e.g. `T3A`
    pub fn subsection_id(&self) -> String {
        format!("{}{}{}", self.pool, self.section, self.subsection)
    }
}
