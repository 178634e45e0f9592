//! Option declarations and resolved values

use std::ffi::OsStr;
use std::fmt;

use serde_json::Value;

use crate::error::{ConfigError, Result};

/// Name of the magic number option.
pub const NUMBER: &str = "number";

/// Name of the favorite color option.
pub const FAVORITE_COLOR: &str = "favorite-color";

/// Value type an option accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    Integer,
    String,
}

impl fmt::Display for OptionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionKind::Integer => write!(f, "integer"),
            OptionKind::String => write!(f, "string"),
        }
    }
}

/// A typed option value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionValue {
    Integer(i64),
    String(String),
}

impl OptionValue {
    pub fn kind(&self) -> OptionKind {
        match self {
            OptionValue::Integer(_) => OptionKind::Integer,
            OptionValue::String(_) => OptionKind::String,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            OptionValue::Integer(n) => Some(*n),
            OptionValue::String(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            OptionValue::String(s) => Some(s),
            OptionValue::Integer(_) => None,
        }
    }
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionValue::Integer(n) => write!(f, "{}", n),
            OptionValue::String(s) => write!(f, "{}", s),
        }
    }
}

/// Where a resolved value came from, highest precedence first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Source {
    Flag,
    Env,
    File,
    Default,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Source::Flag => "command-line flag",
            Source::Env => "environment variable",
            Source::File => "config file",
            Source::Default => "default",
        };
        f.write_str(label)
    }
}

/// A named, typed option exposed on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionSpec {
    pub name: &'static str,
    pub shorthand: Option<char>,
    pub kind: OptionKind,
    pub default: OptionValue,
    pub description: &'static str,
}

impl OptionSpec {
    pub fn integer(
        name: &'static str,
        shorthand: Option<char>,
        default: i64,
        description: &'static str,
    ) -> Self {
        Self {
            name,
            shorthand,
            kind: OptionKind::Integer,
            default: OptionValue::Integer(default),
            description,
        }
    }

    pub fn string(
        name: &'static str,
        shorthand: Option<char>,
        default: &str,
        description: &'static str,
    ) -> Self {
        Self {
            name,
            shorthand,
            kind: OptionKind::String,
            default: OptionValue::String(default.to_string()),
            description,
        }
    }

    /// Environment variable bound to this option.
    ///
    /// Dashes are not valid in most shells' variable names, so `favorite-color`
    /// under prefix `STING` becomes `STING_FAVORITE_COLOR`.
    pub fn env_var(&self, prefix: &str) -> String {
        format!("{}_{}", prefix, self.name.replace('-', "_").to_ascii_uppercase())
    }

    /// Help line shown for the option's flag.
    pub fn help(&self, prefix: &str) -> String {
        format!("{} [env: {}] [default: {}]", self.description, self.env_var(prefix), self.default)
    }

    /// Parse a raw environment value into this option's kind.
    ///
    /// Values that are not valid UTF-8 are rejected for every kind.
    pub fn parse_env(&self, raw: &OsStr) -> Result<OptionValue> {
        let Some(text) = raw.to_str() else {
            return Err(self.type_error(&raw.to_string_lossy(), Source::Env));
        };
        match self.kind {
            OptionKind::String => Ok(OptionValue::String(text.to_string())),
            OptionKind::Integer => parse_integer(text)
                .map(OptionValue::Integer)
                .ok_or_else(|| self.type_error(text, Source::Env)),
        }
    }

    /// Coerce a config file value into this option's kind.
    ///
    /// Scalars render the way they would be typed on the command line, so a
    /// numeric string is a valid integer and a number is a valid string.
    /// Tables, arrays, and nulls are never accepted.
    pub fn coerce_file_value(&self, value: &Value) -> Result<OptionValue> {
        match (self.kind, value) {
            (OptionKind::Integer, Value::Number(n)) => n
                .as_i64()
                .map(OptionValue::Integer)
                .ok_or_else(|| self.type_error(&n.to_string(), Source::File)),
            (OptionKind::Integer, Value::String(s)) => parse_integer(s)
                .map(OptionValue::Integer)
                .ok_or_else(|| self.type_error(s, Source::File)),
            (OptionKind::String, Value::String(s)) => Ok(OptionValue::String(s.clone())),
            (OptionKind::String, Value::Number(n)) => Ok(OptionValue::String(n.to_string())),
            (OptionKind::String, Value::Bool(b)) => Ok(OptionValue::String(b.to_string())),
            (_, other) => Err(self.type_error(&other.to_string(), Source::File)),
        }
    }

    /// Check that a value handed over by the command layer matches this option's kind.
    pub fn check_flag_value(&self, value: &OptionValue) -> Result<OptionValue> {
        if value.kind() == self.kind {
            Ok(value.clone())
        } else {
            Err(self.type_error(&value.to_string(), Source::Flag))
        }
    }

    fn type_error(&self, raw: &str, origin: Source) -> ConfigError {
        ConfigError::ValueType {
            option: self.name.to_string(),
            raw: raw.to_string(),
            expected: self.kind,
            origin,
        }
    }
}

/// Parse a signed 64-bit integer, inferring the base from its prefix.
///
/// `0x`/`0X` is hexadecimal, `0o`/`0O` and a bare leading `0` are octal,
/// `0b`/`0B` is binary, anything else is decimal. Surrounding whitespace is
/// ignored.
pub fn parse_integer(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    let (sign, unsigned) = match raw.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", raw.strip_prefix('+').unwrap_or(raw)),
    };

    let (radix, digits) = if let Some(rest) = strip_radix_prefix(unsigned, 'x') {
        (16, rest)
    } else if let Some(rest) = strip_radix_prefix(unsigned, 'o') {
        (8, rest)
    } else if let Some(rest) = strip_radix_prefix(unsigned, 'b') {
        (2, rest)
    } else if unsigned.len() > 1 && unsigned.starts_with('0') {
        (8, &unsigned[1..])
    } else {
        (10, unsigned)
    };

    // from_str_radix would accept a second sign here.
    if digits.is_empty() || digits.starts_with(|c: char| c == '+' || c == '-') {
        return None;
    }
    i64::from_str_radix(&format!("{}{}", sign, digits), radix).ok()
}

fn strip_radix_prefix(s: &str, marker: char) -> Option<&str> {
    let rest = s.strip_prefix('0')?;
    rest.strip_prefix(marker).or_else(|| rest.strip_prefix(marker.to_ascii_uppercase()))
}

/// The options this program exposes, in declaration order.
pub fn declared_options() -> Vec<OptionSpec> {
    vec![
        OptionSpec::integer(NUMBER, Some('n'), 7, "What is the magic number?"),
        OptionSpec::string(FAVORITE_COLOR, Some('c'), "red", "What is your favorite color?"),
    ]
}
