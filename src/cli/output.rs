//! Result printing.

use std::io::{self, Write};

use crate::domain::Settings;

pub fn write_settings<W: Write>(out: &mut W, settings: &Settings) -> io::Result<()> {
    writeln!(out, "Your favorite color is: {}", settings.favorite_color)?;
    writeln!(out, "The magic number is: {}", settings.number)?;
    out.flush()
}
