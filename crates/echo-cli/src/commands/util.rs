//! Shared utilities for CLI commands.

use anyhow::Context;
use chrono::NaiveTime;
use echo_core::HourSelection;

/// Number of ID characters shown in listings.
pub const SHORT_ID_LEN: usize = 8;

/// Parse a wall-clock time as `HH:MM` (or `H:MM`).
pub fn parse_clock(s: &str) -> anyhow::Result<NaiveTime> {
    NaiveTime::parse_from_str(s.trim(), "%H:%M")
        .with_context(|| format!("Invalid time: {s}. Use HH:MM (e.g., 09:05)"))
}

/// Shortened task ID for display.
pub fn short_id(id: &str) -> &str {
    id.get(..SHORT_ID_LEN).unwrap_or(id)
}

/// Combines explicit slot tokens with whole-hour picks into one selection.
///
/// Hours are deduplicated and converted to one-hour tokens; out-of-range hours
/// are rejected.
pub fn build_selection(slots: &[String], hours: &[u32]) -> anyhow::Result<Vec<String>> {
    if let Some(hour) = hours.iter().find(|h| **h >= 24) {
        anyhow::bail!("Invalid hour: {hour}. Hours must be between 0 and 23");
    }
    let picked: HourSelection = hours.iter().copied().collect();
    let mut selection = slots.to_vec();
    selection.extend(picked.tokens());
    Ok(selection)
}
