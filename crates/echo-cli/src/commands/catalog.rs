//! Catalog command: show the fixed hourly slot options.

use std::io::Write;

use anyhow::Result;
use echo_core::hourly_catalog;

pub fn run<W: Write>(writer: &mut W, json: bool) -> Result<()> {
    let catalog = hourly_catalog();
    if json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&catalog)?)?;
        return Ok(());
    }
    for option in catalog {
        writeln!(writer, "{:<7}{}", option.value, option.label)?;
    }
    Ok(())
}
