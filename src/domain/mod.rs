//! Core domain types
//!
//! Declared options, the values they resolve to, and the settings struct
//! handed to the output step.

pub mod options;
pub mod settings;

pub use options::{declared_options, OptionKind, OptionSpec, OptionValue, Source};
pub use settings::Settings;

/// Namespace token prepended to every environment variable, e.g. `STING_NUMBER`.
pub const ENV_PREFIX: &str = "STING";

/// Base name of the configuration file, without its extension.
pub const CONFIG_BASENAME: &str = "stingoftheviper";
