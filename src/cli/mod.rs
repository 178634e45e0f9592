//! Command-line interface for stingoftheviper
//!
//! Parses flags, resolves every option against the environment, the config
//! file in the working directory, and the defaults, then prints the result.

use anyhow::{Context, Result};
use clap::{CommandFactory, FromArgMatches, Parser};
use std::ffi::OsString;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod output;

use crate::config::{load_config, load_config_file, ConfigResolver, Environment, FlagValues};
use crate::domain::options::{parse_integer, FAVORITE_COLOR, NUMBER};
use crate::domain::{declared_options, OptionValue, Settings, CONFIG_BASENAME, ENV_PREFIX};

pub use output::write_settings;

/// Demonstrate how flags, environment variables, and a config file layer together
#[derive(Parser, Debug)]
#[command(name = "stingoftheviper")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[arg(
        id = "number",
        short = 'n',
        long = "number",
        value_name = "N",
        value_parser = parse_number,
        allow_negative_numbers = true
    )]
    pub number: Option<i64>,

    #[arg(id = "favorite-color", short = 'c', long = "favorite-color", value_name = "COLOR")]
    pub favorite_color: Option<String>,

    /// Read this config file instead of searching the working directory for stingoftheviper.{toml,yaml,yml,json}
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (sets log level to DEBUG)
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// The clap command with help text taken from the declared options.
    pub fn command_with_help() -> clap::Command {
        declared_options().into_iter().fold(Cli::command(), |cmd, option| {
            let help = option.help(ENV_PREFIX);
            cmd.mut_arg(option.name, |arg| arg.help(help))
        })
    }

    pub fn try_parse_args<I, T>(args: I) -> std::result::Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = Self::command_with_help().try_get_matches_from(args)?;
        Self::from_arg_matches(&matches)
    }

    /// Options the user set explicitly, keyed by option name.
    pub fn explicit_flags(&self) -> FlagValues {
        let mut flags = FlagValues::new();
        if let Some(number) = self.number {
            flags.insert(NUMBER.to_string(), OptionValue::Integer(number));
        }
        if let Some(color) = &self.favorite_color {
            flags.insert(FAVORITE_COLOR.to_string(), OptionValue::String(color.clone()));
        }
        flags
    }
}

fn parse_number(raw: &str) -> std::result::Result<i64, String> {
    parse_integer(raw)
        .ok_or_else(|| "expected an integer (decimal, 0x hex, 0o octal, 0b binary)".to_string())
}

pub fn run() -> Result<()> {
    let cli = Cli::try_parse_args(std::env::args_os()).unwrap_or_else(|e| e.exit());

    // RUST_LOG in the environment always takes precedence; --verbose falls back to DEBUG.
    let filter = if cli.verbose {
        EnvFilter::from_default_env().add_directive(Level::DEBUG.into())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .try_init();

    let env = process_environment();
    let cwd = std::env::current_dir().context("Failed to determine the current directory")?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    execute(&cli, &env, &cwd, &mut out)
}

/// Resolve all options and write the two result lines to `out`.
///
/// Nothing is written unless every option resolves.
pub fn execute<W: Write>(cli: &Cli, env: &Environment, cwd: &Path, out: &mut W) -> Result<()> {
    let file = match &cli.config {
        Some(path) => Some(load_config_file(&cwd.join(path))?),
        None => load_config(cwd, CONFIG_BASENAME)?,
    };

    let options = declared_options();
    let resolution = ConfigResolver::new(&options, ENV_PREFIX).resolve(
        &cli.explicit_flags(),
        env,
        file.as_ref(),
    )?;
    for resolved in resolution.iter() {
        tracing::debug!(
            option = resolved.name,
            value = %resolved.value,
            source = %resolved.source,
            "resolved"
        );
    }

    let settings = Settings::from_resolution(&resolution)?;
    write_settings(out, &settings).context("Failed to write output")?;
    Ok(())
}

// Values stay as raw OS strings; only the names need to be valid UTF-8.
fn process_environment() -> Environment {
    std::env::vars_os().filter_map(|(key, value)| Some((key.into_string().ok()?, value))).collect()
}
