//! gradesheet configuration.
//!
//! Loaded from TOML; every field has a default so the tool runs without a
//! config file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Environment variable that overrides the extractor program.
pub const EXTRACTOR_PROGRAM_ENV: &str = "GRADESHEET_GS";

/// Top-level gradesheet configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GradesheetConfig {
    /// PDF text extraction settings.
    #[serde(default)]
    pub extractor: ExtractorConfig,
    /// Indent JSON output by default.
    #[serde(default)]
    pub pretty: bool,
}

/// External PDF-to-text converter invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractorConfig {
    /// Executable to run.
    #[serde(default = "default_program")]
    pub program: String,
    /// Arguments placed before the input path. Text must go to stdout.
    #[serde(default = "default_args")]
    pub args: Vec<String>,
}

fn default_program() -> String {
    "gs".to_string()
}

fn default_args() -> Vec<String> {
    ["-q", "-sDEVICE=txtwrite", "-o", "-"]
        .into_iter()
        .map(String::from)
        .collect()
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
            args: default_args(),
        }
    }
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order when no path is given:
/// 1. `gradesheet.toml` in the current directory
/// 2. `~/.config/gradesheet/config.toml`
///
/// Environment variable override: `GRADESHEET_GS`.
pub fn load_config_from(path: Option<&Path>) -> Result<GradesheetConfig> {
    let config_path = match path {
        Some(p) if p.exists() => Some(p.to_path_buf()),
        Some(p) => {
            return Err(Error::Config(format!(
                "config file not found: {}",
                p.display()
            )))
        }
        None => {
            let local = PathBuf::from("gradesheet.toml");
            if local.exists() {
                Some(local)
            } else {
                dirs_path()
                    .map(|dir| dir.join("config.toml"))
                    .filter(|global| global.exists())
            }
        }
    };

    let mut config = match config_path {
        Some(path) => {
            tracing::debug!("loading config from {}", path.display());
            let content = std::fs::read_to_string(&path).map_err(|e| Error::io(&path, e))?;
            parse_config_str(&content, &path)?
        }
        None => GradesheetConfig::default(),
    };

    if let Ok(program) = std::env::var(EXTRACTOR_PROGRAM_ENV) {
        if !program.trim().is_empty() {
            config.extractor.program = program;
        }
    }

    Ok(config)
}

/// Parse a TOML string into a config (useful for testing).
pub fn parse_config_str(content: &str, source_path: &Path) -> Result<GradesheetConfig> {
    toml::from_str(content).map_err(|e| {
        Error::Config(format!(
            "failed to parse config {}: {e}",
            source_path.display()
        ))
    })
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("gradesheet"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = GradesheetConfig::default();
        assert_eq!(config.extractor.program, "gs");
        assert_eq!(config.extractor.args, vec!["-q", "-sDEVICE=txtwrite", "-o", "-"]);
        assert!(!config.pretty);
    }

    #[test]
    fn parse_partial_config() {
        let toml_str = r#"
pretty = true

[extractor]
program = "/opt/ghostscript/bin/gs"
"#;
        let config = parse_config_str(toml_str, Path::new("gradesheet.toml")).unwrap();
        assert!(config.pretty);
        assert_eq!(config.extractor.program, "/opt/ghostscript/bin/gs");
        assert_eq!(config.extractor.args, default_args());
    }

    #[test]
    fn parse_malformed_config() {
        let err = parse_config_str("pretty = [", Path::new("bad.toml")).unwrap_err();
        assert_eq!(err.kind(), "ConfigError");
        assert!(err.to_string().contains("bad.toml"));
    }

    #[test]
    fn explicit_missing_config_is_an_error() {
        let err = load_config_from(Some(Path::new("/no/such/gradesheet.toml"))).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn explicit_config_file_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "[extractor]\nargs = [\"-dNOPAUSE\"]\n").unwrap();

        let config = load_config_from(Some(&path)).unwrap();
        assert_eq!(config.extractor.args, vec!["-dNOPAUSE"]);
    }
}
