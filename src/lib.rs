//! stingoftheviper: layered configuration resolution
//!
//! Every option is resolved from the first source that has a value, in order:
//! command-line flag, `STING_*` environment variable, the `stingoftheviper`
//! config file in the working directory, and finally the built-in default.

pub mod cli;
pub mod config;
pub mod domain;
pub mod error;

pub use error::{ConfigError, Result};
