//! Error types for configuration resolution.

use std::path::PathBuf;

use thiserror::Error;

use crate::domain::{OptionKind, Source};

/// Result type alias using [`ConfigError`].
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors raised while loading or resolving configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A sourced value cannot be coerced to the option's declared kind.
    #[error("invalid value {raw:?} for option '{option}' from {origin}: expected {expected}")]
    ValueType { option: String, raw: String, expected: OptionKind, origin: Source },

    /// The config file exists but is not a well-formed mapping.
    #[error("failed to parse config file {}: {reason}", path.display())]
    FileParse { path: PathBuf, reason: String },

    /// The config file could not be read.
    #[error("failed to read config file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A lookup named an option that was never declared.
    #[error("option '{0}' is not declared")]
    Undeclared(String),
}

impl ConfigError {
    pub fn file_parse(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::FileParse { path: path.into(), reason: reason.to_string() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_type_message_names_option_and_raw_value() {
        let err = ConfigError::ValueType {
            option: "number".into(),
            raw: "seven".into(),
            expected: OptionKind::Integer,
            origin: Source::Env,
        };
        assert_eq!(
            err.to_string(),
            "invalid value \"seven\" for option 'number' from environment variable: expected integer"
        );
    }

    #[test]
    fn file_parse_message_includes_path() {
        let err = ConfigError::file_parse("stingoftheviper.toml", "expected a table");
        assert_eq!(
            err.to_string(),
            "failed to parse config file stingoftheviper.toml: expected a table"
        );
    }
}
