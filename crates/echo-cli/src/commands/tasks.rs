//! Task board commands: add, list, complete, edit, remove, and move tasks.
//!
//! Each command loads the board, applies one transition, and saves it back.

use std::io::Write;

use anyhow::{Context, Result};
use echo_core::{Quadrant, TaskBoard, TaskUpdate, merge_and_format};
use echo_db::Database;

use super::util::short_id;

fn load(db: &Database) -> Result<TaskBoard> {
    db.load_board().context("failed to load task board")
}

fn save(db: &Database, board: &TaskBoard) -> Result<()> {
    db.save_board(board).context("failed to save task board")
}

/// Adds a task scheduled in the merged `selection`.
pub fn add<W: Write>(
    writer: &mut W,
    db: &Database,
    quadrant: Quadrant,
    text: &str,
    selection: &[String],
) -> Result<()> {
    let times = merge_and_format(selection)?;
    let mut board = load(db)?;
    let task = board.add_task(quadrant, text, times)?;
    let (id, times) = (task.id.clone(), task.times.clone());
    save(db, &board)?;

    tracing::info!(task_id = %id, %quadrant, "added task");
    write!(writer, "Added {} to {}", short_id(&id), quadrant.title())?;
    if times.is_empty() {
        writeln!(writer)?;
    } else {
        writeln!(writer, " ({times})")?;
    }
    Ok(())
}

/// Prints the board grouped by quadrant, or as JSON.
pub fn list<W: Write>(writer: &mut W, db: &Database, json: bool) -> Result<()> {
    let board = load(db)?;
    if json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&board)?)?;
        return Ok(());
    }

    for quadrant in Quadrant::ALL {
        let tasks = board.tasks(quadrant);
        writeln!(writer, "{} ({})", quadrant.title(), tasks.len())?;
        if tasks.is_empty() {
            writeln!(writer, "  (empty)")?;
        }
        for task in tasks {
            let mark = if task.completed { 'x' } else { ' ' };
            write!(writer, "  [{mark}] {}  {}", short_id(&task.id), task.text)?;
            if task.times.is_empty() {
                writeln!(writer)?;
            } else {
                writeln!(writer, "  ({})", task.times)?;
            }
        }
    }
    writeln!(
        writer,
        "{} tasks, {} completed",
        board.total_tasks(),
        board.completed_tasks()
    )?;
    Ok(())
}

/// Toggles completion of the task matching `id`.
pub fn toggle<W: Write>(writer: &mut W, db: &Database, id: &str) -> Result<()> {
    let mut board = load(db)?;
    let (quadrant, _, task) = board.find(id)?;
    let task_id = task.id.clone();
    let completed = board.toggle_complete(quadrant, &task_id)?;
    save(db, &board)?;

    let state = if completed { "completed" } else { "reopened" };
    writeln!(writer, "Task {} {state}", short_id(&task_id))?;
    Ok(())
}

/// Edits the text or times of the task matching `id`.
pub fn edit<W: Write>(
    writer: &mut W,
    db: &Database,
    id: &str,
    text: Option<String>,
    selection: &[String],
    clear_times: bool,
) -> Result<()> {
    let times = if clear_times {
        Some(String::new())
    } else if selection.is_empty() {
        None
    } else {
        Some(merge_and_format(selection)?)
    };

    let mut board = load(db)?;
    let (quadrant, _, task) = board.find(id)?;
    let task_id = task.id.clone();
    let task = board.update_task(quadrant, &task_id, TaskUpdate { text, times })?;
    let summary = if task.times.is_empty() {
        task.text.clone()
    } else {
        format!("{} ({})", task.text, task.times)
    };
    save(db, &board)?;

    writeln!(writer, "Updated {}: {summary}", short_id(&task_id))?;
    Ok(())
}

/// Deletes the task matching `id`.
pub fn remove<W: Write>(writer: &mut W, db: &Database, id: &str) -> Result<()> {
    let mut board = load(db)?;
    let (quadrant, _, task) = board.find(id)?;
    let task_id = task.id.clone();
    let removed = board.delete_task(quadrant, &task_id)?;
    save(db, &board)?;

    writeln!(writer, "Deleted {}: {}", short_id(&removed.id), removed.text)?;
    Ok(())
}

/// Moves the task matching `id` into `to`, at `index` or at the end.
pub fn move_task<W: Write>(
    writer: &mut W,
    db: &Database,
    id: &str,
    to: Quadrant,
    index: Option<usize>,
) -> Result<()> {
    let mut board = load(db)?;
    let (from, from_index, task) = board.find(id)?;
    let task_id = task.id.clone();
    let to_index = index.unwrap_or_else(|| board.tasks(to).len());

    if !board.move_task(from, from_index, to, to_index) {
        anyhow::bail!(
            "Cannot move to position {to_index}: {} has {} tasks",
            to.title(),
            board.tasks(to).len()
        );
    }
    save(db, &board)?;

    writeln!(writer, "Moved {} to {}", short_id(&task_id), to.title())?;
    Ok(())
}

/// Deletes every completed task.
pub fn clear_completed<W: Write>(writer: &mut W, db: &Database) -> Result<()> {
    let mut board = load(db)?;
    let removed = board.clear_completed();
    save(db, &board)?;
    writeln!(writer, "Cleared {removed} completed tasks")?;
    Ok(())
}

/// Deletes every task.
pub fn reset<W: Write>(writer: &mut W, db: &Database) -> Result<()> {
    let mut board = load(db)?;
    let removed = board.total_tasks();
    board.reset();
    save(db, &board)?;
    writeln!(writer, "Removed {removed} tasks")?;
    Ok(())
}
