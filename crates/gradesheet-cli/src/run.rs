//! Parse every input, then write the requested outputs.

use std::path::PathBuf;

use anyhow::{Context, Result};

use gradesheet_core::config::load_config_from;
use gradesheet_core::extract::extract_text;
use gradesheet_core::model::{FileRecord, InputKind, QuestionRow, RunOutput};
use gradesheet_core::report::build_file_record;
use gradesheet_core::statistics::{
    build_aggregate, compute_question_stats, compute_section_stats, compute_subsection_stats,
    flatten_questions,
};
use gradesheet_report::{render_json, write_csv, write_json};

use crate::summary::print_summary;

pub struct RunOptions {
    pub inputs: Vec<PathBuf>,
    pub input_kind: InputKind,
    pub out: Option<PathBuf>,
    pub csv: Option<PathBuf>,
    pub stats_csv: Option<PathBuf>,
    pub section_stats_csv: Option<PathBuf>,
    pub subsection_stats_csv: Option<PathBuf>,
    pub pretty: bool,
    pub summary: bool,
    pub config: Option<PathBuf>,
}

pub fn execute(options: RunOptions) -> Result<()> {
    let config = load_config_from(options.config.as_deref())?;
    let pretty = options.pretty || config.pretty;

    // Nothing is written until every input has parsed.
    let mut records: Vec<FileRecord> = Vec::with_capacity(options.inputs.len());
    let mut rows: Vec<QuestionRow> = Vec::new();
    for path in &options.inputs {
        let text = extract_text(path, options.input_kind, &config.extractor)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let record = build_file_record(&text, path);

        let (questions, correct, _) = record.totals();
        tracing::info!(
            "{}: {} exam(s), {} questions, {} correct",
            path.display(),
            record.exams().len(),
            questions,
            correct
        );

        rows.extend(flatten_questions(&record));
        records.push(record);
    }

    let output = if records.len() == 1 {
        RunOutput::File(records.remove(0))
    } else {
        RunOutput::Aggregate(build_aggregate(records))
    };

    if let Some(path) = &options.csv {
        write_csv(path, &rows)?;
    }
    if let Some(path) = &options.stats_csv {
        write_csv(path, &compute_question_stats(&rows))?;
    }
    if let Some(path) = &options.section_stats_csv {
        write_csv(path, &compute_section_stats(&rows))?;
    }
    if let Some(path) = &options.subsection_stats_csv {
        write_csv(path, &compute_subsection_stats(&rows))?;
    }

    match &options.out {
        Some(path) => write_json(&output, path, pretty)?,
        None => println!("{}", render_json(&output, pretty)?),
    }

    if options.summary {
        print_summary(&rows);
    }

    Ok(())
}
