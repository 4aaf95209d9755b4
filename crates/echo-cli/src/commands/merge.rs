//! Merge and format commands: render slot selections as display labels.

use std::io::Write;

use anyhow::{Result, anyhow};
use echo_core::{TimeInterval, merge_and_format};

/// Prints the merged display label for a selection of slot tokens.
pub fn run<W: Write>(writer: &mut W, tokens: &[String]) -> Result<()> {
    let label = merge_and_format(tokens)?;
    writeln!(writer, "{label}")?;
    Ok(())
}

/// Prints the display label of a single range after validating it.
pub fn format<W: Write>(writer: &mut W, start: f64, end: f64) -> Result<()> {
    let interval =
        TimeInterval::new(start, end).map_err(|reason| anyhow!("Invalid range {start}-{end}: {reason}"))?;
    writeln!(writer, "{}", interval.label())?;
    Ok(())
}
