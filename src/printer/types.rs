//! Printer Types
//!
//! Configuration and error types shared by the printer modules.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Size at which the buffered sink hands bytes to the caller's writer
pub const FLUSH_THRESHOLD: usize = 4096;
/// Buffers larger than this are dropped instead of returned to the pool
pub const MAX_POOLED_CAPACITY: usize = 64 * 1024;
/// Upper bound on idle buffers kept in the pool
pub const MAX_POOLED_BUFFERS: usize = 16;

/// Indentation style for nested constructs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Indentation {
    #[default]
    Tabs,
    /// N spaces per level; 0 behaves like tabs
    Spaces(usize),
}

/// Controls how a tree is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PrintConfig {
    pub indentation: Indentation,
}

impl PrintConfig {
    pub fn tabs() -> Self {
        Self {
            indentation: Indentation::Tabs,
        }
    }

    pub fn spaces(n: usize) -> Self {
        Self {
            indentation: Indentation::Spaces(n),
        }
    }

    /// Parse a TOML table such as `indentation = { spaces = 4 }`.
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(input)?)
    }

    /// Parse a JSON object such as `{"indentation": "tabs"}`.
    pub fn from_json_str(input: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(input)?)
    }

    /// Text emitted for one level of indentation.
    pub(crate) fn indent_unit(&self) -> IndentUnit {
        match self.indentation {
            Indentation::Tabs | Indentation::Spaces(0) => IndentUnit::Tab,
            Indentation::Spaces(n) => IndentUnit::Spaces(n),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum IndentUnit {
    Tab,
    Spaces(usize),
}

/// The only failure a print can have: the sink refused bytes.
#[derive(Debug, Error)]
pub enum PrintError {
    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid TOML printer configuration: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid JSON printer configuration: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_tabs() {
        assert_eq!(PrintConfig::default().indentation, Indentation::Tabs);
        assert_eq!(PrintConfig::default().indent_unit(), IndentUnit::Tab);
    }

    #[test]
    fn test_zero_spaces_means_tabs() {
        assert_eq!(PrintConfig::spaces(0).indent_unit(), IndentUnit::Tab);
        assert_eq!(PrintConfig::spaces(2).indent_unit(), IndentUnit::Spaces(2));
    }

    #[test]
    fn test_from_toml() {
        let config = PrintConfig::from_toml_str("indentation = { spaces = 4 }").unwrap();
        assert_eq!(config, PrintConfig::spaces(4));

        let config = PrintConfig::from_toml_str("indentation = \"tabs\"").unwrap();
        assert_eq!(config, PrintConfig::tabs());

        let config = PrintConfig::from_toml_str("").unwrap();
        assert_eq!(config, PrintConfig::default());
    }

    #[test]
    fn test_from_json() {
        let config = PrintConfig::from_json_str(r#"{"indentation": {"spaces": 2}}"#).unwrap();
        assert_eq!(config, PrintConfig::spaces(2));
    }

    #[test]
    fn test_invalid_config() {
        let err = PrintConfig::from_toml_str("indentation = \"wide\"").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
        assert!(err.to_string().starts_with("invalid TOML printer configuration"));

        let err = PrintConfig::from_json_str("{").unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }
}
