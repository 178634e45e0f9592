//! stingoftheviper: resolve options from flags, environment, config file, and defaults

use anyhow::Result;

fn main() -> Result<()> {
    stingoftheviper::cli::run()
}
