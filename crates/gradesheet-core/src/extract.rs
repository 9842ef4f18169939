//! Plain-text extraction from result documents.
//!
//! PDFs go through an external converter (Ghostscript `txtwrite` by
//! default) whose stdout is the extracted text; text files are read
//! directly.

use std::io::ErrorKind;
use std::path::Path;
use std::process::{Command, Stdio};

use crate::config::ExtractorConfig;
use crate::error::{Error, Result};
use crate::model::InputKind;
use crate::traits::TextExtractor;

/// Runs an external PDF-to-text converter and captures its stdout.
#[derive(Debug, Clone)]
pub struct GhostscriptExtractor {
    program: String,
    args: Vec<String>,
}

impl GhostscriptExtractor {
    pub fn new(config: &ExtractorConfig) -> Self {
        Self {
            program: config.program.clone(),
            args: config.args.clone(),
        }
    }
}

impl TextExtractor for GhostscriptExtractor {
    fn name(&self) -> &str {
        &self.program
    }

    fn extract(&self, path: &Path) -> Result<String> {
        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(path)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| Error::ExtractionFailure {
                tool: self.program.clone(),
                diagnostics: if e.kind() == ErrorKind::NotFound {
                    format!("{} is required but was not found in PATH", self.program)
                } else {
                    e.to_string()
                },
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(Error::ExtractionFailure {
                tool: self.program.clone(),
                diagnostics: if stderr.is_empty() {
                    format!("exited with {}", output.status)
                } else {
                    stderr
                },
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Reads a document that is already plain text.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextReader;

impl TextExtractor for PlainTextReader {
    fn name(&self) -> &str {
        "text"
    }

    fn extract(&self, path: &Path) -> Result<String> {
        std::fs::read_to_string(path).map_err(|e| Error::io(path, e))
    }
}

/// Extract text from `path`, resolving `InputKind::Auto` from its extension.
pub fn extract_text(path: &Path, kind: InputKind, config: &ExtractorConfig) -> Result<String> {
    let resolved = kind.resolve(path);
    tracing::debug!("reading {} as {resolved}", path.display());
    let text = match resolved {
        InputKind::Pdf => {
            let extractor = GhostscriptExtractor::new(config);
            tracing::debug!("extracting {} with {}", path.display(), extractor.name());
            extractor.extract(path)?
        }
        _ => PlainTextReader.extract(path)?,
    };
    tracing::debug!("extracted {} bytes from {}", text.len(), path.display());
    Ok(text)
}
