//! JSON output.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

/// Render a value as JSON, indented when `pretty` is set.
pub fn render_json<T: Serialize>(value: &T, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    json.context("failed to serialize output")
}

/// Write a value as JSON to a file, followed by a newline.
pub fn write_json<T: Serialize>(value: &T, path: &Path, pretty: bool) -> Result<()> {
    let mut json = render_json(value, pretty)?;
    json.push('\n');
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, json)
        .with_context(|| format!("failed to write JSON to {}", path.display()))?;
    tracing::info!("JSON written to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use gradesheet_core::model::{ExamMetadata, ExamRecord, ExamSummary, FileRecord, QuestionResult};

    fn make_record() -> FileRecord {
        let questions = vec![
            QuestionResult::new(1, "T1A01", 'A', 'A'),
            QuestionResult::new(2, "T1A02", 'B', 'C'),
        ];
        FileRecord::Single(ExamRecord {
            source: "/tmp/sheet.txt".into(),
            metadata: ExamMetadata {
                candidate_name: Some("Jane Doe".into()),
                ..Default::default()
            },
            summary: gradesheet_core::report::summarize(&questions, &ExamMetadata::default()),
            questions,
        })
    }

    #[test]
    fn compact_json_keeps_field_order() {
        let json = render_json(&make_record(), false).unwrap();
        assert!(!json.contains('\n'));
        let source = json.find("\"source\"").unwrap();
        let metadata = json.find("\"metadata\"").unwrap();
        let summary = json.find("\"summary\"").unwrap();
        let questions = json.find("\"questions\"").unwrap();
        assert!(source < metadata && metadata < summary && summary < questions);
    }

    #[test]
    fn pretty_json_is_indented() {
        let json = render_json(&make_record(), true).unwrap();
        assert!(json.contains("\n  \"metadata\""));
    }

    #[test]
    fn write_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("result.json");

        write_json(&make_record(), &path, false).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.ends_with('\n'));

        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(value["metadata"]["candidate_name"], "Jane Doe");
        assert_eq!(value["summary"]["incorrect"], 1);
        assert_eq!(value["questions"][1]["correct"], "C");
    }

    #[test]
    fn summary_lists_serialize_empty() {
        let value = serde_json::to_value(ExamSummary::default()).unwrap();
        assert_eq!(value["missing_numbers"], serde_json::json!([]));
    }
}
