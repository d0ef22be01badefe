//! Lexer limits
//!
//! The limits are plain inputs to [`crate::lexer::tokenize`]. They can be read
//! from a JSON file and then overridden field by field from the command line.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("config field `{field}` must be at least 1")]
    ZeroLimit { field: &'static str },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LexerConfig {
    /// Longest identifier, in characters
    pub ident_max_len: usize,
    /// Most digits in a tile literal (sign excluded)
    pub int_max_digits: usize,
    /// Most digits before the `.` of a glass literal
    pub float_int_max_digits: usize,
    /// Most digits after the `.` of a glass literal
    pub float_frac_max_digits: usize,
    /// Keep over-long identifiers and numbers as flagged tokens instead of
    /// dropping them
    pub emit_token_on_length_error: bool,
    /// Attach the DFA steps to every token
    pub record_trace: bool,
}

impl Default for LexerConfig {
    fn default() -> Self {
        Self {
            ident_max_len: 15,
            int_max_digits: 19,
            float_int_max_digits: 19,
            float_frac_max_digits: 19,
            emit_token_on_length_error: false,
            record_trace: false,
        }
    }
}

impl LexerConfig {
    /// Load and validate a JSON config file. Missing fields take defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: LexerConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let limits = [
            ("ident_max_len", self.ident_max_len),
            ("int_max_digits", self.int_max_digits),
            ("float_int_max_digits", self.float_int_max_digits),
            ("float_frac_max_digits", self.float_frac_max_digits),
        ];
        match limits.iter().find(|(_, value)| *value == 0) {
            Some(&(field, _)) => Err(ConfigError::ZeroLimit { field }),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = LexerConfig::from_json(r#"{ "ident_max_len": 8 }"#).unwrap();
        assert_eq!(config.ident_max_len, 8);
        assert_eq!(config.int_max_digits, 19);
        assert!(!config.emit_token_on_length_error);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result = LexerConfig::from_json(r#"{ "case_sensitive": false }"#);
        assert!(matches!(result, Err(ConfigError::Json(_))));
    }

    #[test]
    fn test_zero_limit_rejected() {
        let result = LexerConfig::from_json(r#"{ "float_frac_max_digits": 0 }"#);
        assert!(matches!(
            result,
            Err(ConfigError::ZeroLimit {
                field: "float_frac_max_digits"
            })
        ));
    }

    #[test]
    fn test_missing_file() {
        let result = LexerConfig::load(Path::new("/nonexistent/blueprint.json"));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }
}
