//! Status command for showing board totals and the rest of today's slots.

use std::io::Write;
use std::path::Path;

use anyhow::Result;
use chrono::NaiveTime;
use echo_core::{Quadrant, format_hour, generate_slots};
use echo_db::{Database, TASKS_KEY};

use super::slots::SlotSettings;

pub fn run<W: Write>(
    writer: &mut W,
    db: &Database,
    database_path: &Path,
    now: NaiveTime,
    settings: SlotSettings,
) -> Result<()> {
    let board = db.load_board()?;
    let slots = generate_slots(now, settings.granularity, settings.end_of_day)?;

    writeln!(writer, "Echo task board status")?;
    writeln!(writer, "Database: {}", database_path.display())?;
    if let Some(updated_at) = db.updated_at(TASKS_KEY)? {
        writeln!(writer, "Last saved: {updated_at}")?;
    }
    writeln!(
        writer,
        "Tasks: {} ({} completed)",
        board.total_tasks(),
        board.completed_tasks()
    )?;
    for quadrant in Quadrant::ALL {
        let tasks = board.tasks(quadrant);
        let open = tasks.iter().filter(|t| !t.completed).count();
        writeln!(writer, "- {}: {open} open", quadrant.title())?;
    }

    match slots.first() {
        Some(first) => writeln!(
            writer,
            "Slots left today: {} (next {}, day ends {})",
            slots.len(),
            format_hour(first.interval().start()),
            format_hour(settings.end_of_day)
        )?,
        None => writeln!(writer, "Slots left today: none")?,
    }

    Ok(())
}
