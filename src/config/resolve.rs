//! Layered option resolution
//!
//! Each option is resolved on its own from the highest-precedence source
//! that has a value: flag > environment > config file > default.

use std::collections::{BTreeMap, HashMap};
use std::ffi::{OsStr, OsString};

use super::loader::ConfigMap;
use crate::domain::{OptionSpec, OptionValue, Source};
use crate::error::Result;

/// Options explicitly set on the command line, keyed by option name.
pub type FlagValues = BTreeMap<String, OptionValue>;

/// Snapshot of the process environment. Values are kept raw so that
/// non-UTF-8 content is reported instead of skipped.
pub type Environment = HashMap<String, OsString>;

/// The final value of one option and the source that supplied it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedOption {
    pub name: &'static str,
    pub value: OptionValue,
    pub source: Source,
}

/// One resolved value per declared option, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    entries: Vec<ResolvedOption>,
}

impl Resolution {
    pub fn get(&self, name: &str) -> Option<&ResolvedOption> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResolvedOption> {
        self.entries.iter()
    }
}

pub struct ConfigResolver<'a> {
    options: &'a [OptionSpec],
    env_prefix: &'a str,
}

impl<'a> ConfigResolver<'a> {
    pub fn new(options: &'a [OptionSpec], env_prefix: &'a str) -> Self {
        Self { options, env_prefix }
    }

    /// Resolve every declared option. Fails on the first value that cannot
    /// be coerced; no partial resolution is returned.
    pub fn resolve(
        &self,
        flags: &FlagValues,
        env: &Environment,
        file: Option<&ConfigMap>,
    ) -> Result<Resolution> {
        let entries = self
            .options
            .iter()
            .map(|option| self.resolve_option(option, flags, env, file))
            .collect::<Result<Vec<_>>>()?;
        Ok(Resolution { entries })
    }

    fn resolve_option(
        &self,
        option: &OptionSpec,
        flags: &FlagValues,
        env: &Environment,
        file: Option<&ConfigMap>,
    ) -> Result<ResolvedOption> {
        let (value, source) = if let Some(value) = flags.get(option.name) {
            (option.check_flag_value(value)?, Source::Flag)
        } else if let Some(raw) = self.env_value(option, env) {
            (option.parse_env(raw)?, Source::Env)
        } else if let Some(value) = file.and_then(|cfg| cfg.get(option.name)) {
            (option.coerce_file_value(value)?, Source::File)
        } else {
            (option.default.clone(), Source::Default)
        };

        Ok(ResolvedOption { name: option.name, value, source })
    }

    // Empty variables count as unset.
    fn env_value<'e>(&self, option: &OptionSpec, env: &'e Environment) -> Option<&'e OsStr> {
        env.get(&option.env_var(self.env_prefix))
            .map(OsString::as_os_str)
            .filter(|raw| !raw.is_empty())
    }
}
