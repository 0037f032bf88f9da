//! Optional YAML configuration.
//!
//! Every key has a default, so a missing file means "use defaults". The
//! file is looked up at `--config`, then `glossary.yaml` in the working
//! directory.

use crate::error::{GlossaryError, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "glossary.yaml";

/// Header line of the Vietnamese word/definition exports ("word, definition").
pub const DEFAULT_HEADER_PATTERN: &str = r"^\s*từ\s*,\s*định nghĩa";

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct GlossaryConfig {
    /// Language label that must occupy the source position of a record.
    pub canonical_language: String,
    /// Case-insensitive regexes for header lines the extractor skips.
    pub header_patterns: Vec<String>,
    /// Delimiter of the structured-parse dialect.
    pub structured_delimiter: char,
    /// Delimiter of four-field record files.
    pub record_delimiter: char,
    /// Extension of files picked up by consolidation, without the dot.
    pub input_extension: String,
}

impl Default for GlossaryConfig {
    fn default() -> Self {
        GlossaryConfig {
            canonical_language: "English".to_string(),
            header_patterns: vec![DEFAULT_HEADER_PATTERN.to_string()],
            structured_delimiter: ',',
            record_delimiter: ';',
            input_extension: "csv".to_string(),
        }
    }
}

impl GlossaryConfig {
    pub fn from_yaml(contents: &str, path: &Path) -> Result<Self> {
        let config: GlossaryConfig =
            serde_yaml::from_str(contents).map_err(|e| GlossaryError::Config {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        config.validate(path)?;
        Ok(config)
    }

    fn validate(&self, path: &Path) -> Result<()> {
        for (key, delimiter) in [
            ("structured_delimiter", self.structured_delimiter),
            ("record_delimiter", self.record_delimiter),
        ] {
            if !delimiter.is_ascii() {
                return Err(GlossaryError::Config {
                    path: path.to_path_buf(),
                    message: format!("{} must be a single ASCII character, got {:?}", key, delimiter),
                });
            }
        }
        Ok(())
    }
}

/// Load configuration from an explicit path, the default file, or defaults.
///
/// An explicit path that does not exist is an error; a missing default
/// file is not.
pub fn load_config(explicit: Option<&Path>) -> Result<GlossaryConfig> {
    let path = match explicit {
        Some(p) => {
            if !p.exists() {
                return Err(GlossaryError::MissingInput { path: p.to_path_buf() });
            }
            p.to_path_buf()
        }
        None => {
            let candidate = PathBuf::from(DEFAULT_CONFIG_FILE);
            if !candidate.exists() {
                return Ok(GlossaryConfig::default());
            }
            candidate
        }
    };

    let contents = fs::read_to_string(&path).map_err(|e| GlossaryError::io(&path, e))?;
    GlossaryConfig::from_yaml(&contents, &path)
}

/// ASCII delimiter as the byte the delimited reader/writer expects.
///
/// Validation guarantees ASCII for loaded configs; anything else falls back
/// to a comma.
pub fn delimiter_byte(delimiter: char) -> u8 {
    if delimiter.is_ascii() {
        delimiter as u8
    } else {
        b','
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_gives_defaults() {
        let config = GlossaryConfig::from_yaml("{}", Path::new("test.yaml")).unwrap();
        assert_eq!(config, GlossaryConfig::default());
    }

    #[test]
    fn partial_document_keeps_other_defaults() {
        let yaml = "canonical_language: Finnish\nrecord_delimiter: '|'\n";
        let config = GlossaryConfig::from_yaml(yaml, Path::new("test.yaml")).unwrap();
        assert_eq!(config.canonical_language, "Finnish");
        assert_eq!(config.record_delimiter, '|');
        assert_eq!(config.structured_delimiter, ',');
        assert_eq!(config.header_patterns, vec![DEFAULT_HEADER_PATTERN.to_string()]);
    }

    #[test]
    fn non_ascii_delimiter_is_rejected() {
        let yaml = "structured_delimiter: '§'\n";
        let err = GlossaryConfig::from_yaml(yaml, Path::new("test.yaml")).unwrap_err();
        assert!(matches!(err, GlossaryError::Config { .. }));
    }

    #[test]
    fn malformed_yaml_is_a_config_error() {
        let err = GlossaryConfig::from_yaml("header_patterns: [", Path::new("bad.yaml")).unwrap_err();
        assert!(matches!(err, GlossaryError::Config { .. }));
    }

    #[test]
    fn explicit_missing_file_is_missing_input() {
        let err = load_config(Some(Path::new("/nonexistent/glossary.yaml"))).unwrap_err();
        assert!(matches!(err, GlossaryError::MissingInput { .. }));
    }

    #[test]
    fn delimiter_byte_ascii() {
        assert_eq!(delimiter_byte(';'), b';');
        assert_eq!(delimiter_byte('é'), b',');
    }
}
