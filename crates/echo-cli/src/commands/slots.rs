//! Slots command: list the time slots still available today.

use std::io::Write;
use std::time::Duration;

use anyhow::Result;
use chrono::NaiveTime;
use echo_core::{Granularity, SlotToken, format_hour, generate_slots};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct SlotJson {
    value: String,
    label: String,
}

/// Slot generation settings resolved from config and flags.
#[derive(Debug, Clone, Copy)]
pub struct SlotSettings {
    pub granularity: Granularity,
    pub end_of_day: f64,
}

fn write_slots<W: Write>(
    writer: &mut W,
    settings: SlotSettings,
    slots: &[SlotToken],
    json: bool,
) -> Result<()> {
    if json {
        let output: Vec<SlotJson> = slots
            .iter()
            .map(|slot| SlotJson {
                value: slot.to_string(),
                label: slot.interval().label(),
            })
            .collect();
        writeln!(writer, "{}", serde_json::to_string_pretty(&output)?)?;
        return Ok(());
    }

    if slots.is_empty() {
        writeln!(writer, "No slots available today.")?;
        return Ok(());
    }

    writeln!(
        writer,
        "Available slots ({}, until {}):",
        settings.granularity,
        format_hour(settings.end_of_day)
    )?;
    for slot in slots {
        writeln!(writer, "  {:<10}{}", slot.to_string(), slot.interval().label())?;
    }
    Ok(())
}

/// Prints the slots available at `now`.
pub fn run<W: Write>(
    writer: &mut W,
    now: NaiveTime,
    settings: SlotSettings,
    json: bool,
) -> Result<()> {
    let slots = generate_slots(now, settings.granularity, settings.end_of_day)?;
    write_slots(writer, settings, &slots, json)
}

/// Re-evaluates the available slots every `interval`, printing the list
/// whenever it changes.
///
/// `clock` supplies the current time on each tick. Runs until `max_ticks`
/// evaluations have happened, or forever when it is `None`.
pub fn watch<W, C>(
    writer: &mut W,
    mut clock: C,
    settings: SlotSettings,
    interval: Duration,
    max_ticks: Option<usize>,
) -> Result<()>
where
    W: Write,
    C: FnMut() -> NaiveTime,
{
    let mut previous: Option<Vec<SlotToken>> = None;
    let mut ticks = 0;

    loop {
        let now = clock();
        let slots = generate_slots(now, settings.granularity, settings.end_of_day)?;
        if previous.as_ref() != Some(&slots) {
            tracing::debug!(count = slots.len(), "available slots changed");
            writeln!(writer, "[{}]", now.format("%H:%M"))?;
            write_slots(writer, settings, &slots, false)?;
            writer.flush()?;
            previous = Some(slots);
        }

        ticks += 1;
        if max_ticks.is_some_and(|max| ticks >= max) {
            return Ok(());
        }
        std::thread::sleep(interval);
    }
}
