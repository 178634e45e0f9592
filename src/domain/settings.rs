//! Typed settings produced by resolution

use super::options::{FAVORITE_COLOR, NUMBER};
use crate::config::Resolution;
use crate::error::{ConfigError, Result};

/// Final values for every declared option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub favorite_color: String,
    pub number: i64,
}

impl Settings {
    pub fn from_resolution(resolution: &Resolution) -> Result<Self> {
        let favorite_color = resolution
            .get(FAVORITE_COLOR)
            .and_then(|resolved| resolved.value.as_str())
            .ok_or_else(|| ConfigError::Undeclared(FAVORITE_COLOR.to_string()))?
            .to_string();
        let number = resolution
            .get(NUMBER)
            .and_then(|resolved| resolved.value.as_integer())
            .ok_or_else(|| ConfigError::Undeclared(NUMBER.to_string()))?;

        Ok(Self { favorite_color, number })
    }
}
