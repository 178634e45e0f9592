//! Configuration loading and merging
//!
//! Handles loading the config file and resolving each option from flags,
//! environment variables, the file, and defaults with proper precedence
//! (CLI > Env > File > Defaults).

pub mod loader;
pub mod resolve;

pub use loader::{load_config, load_config_file, ConfigFormat, ConfigMap};
pub use resolve::{ConfigResolver, Environment, FlagValues, Resolution, ResolvedOption};
