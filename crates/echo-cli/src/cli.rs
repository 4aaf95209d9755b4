//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use echo_core::Quadrant;

/// Eisenhower-matrix task board with time-slot scheduling.
///
/// Tasks live in one of four quadrants and may carry a merged time-of-day
/// label built from selected slots.
#[derive(Debug, Parser)]
#[command(name = "echo-board", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List the time slots still available today.
    Slots {
        /// Evaluate at this time of day (HH:MM) instead of now.
        #[arg(long, conflicts_with = "watch")]
        at: Option<String>,

        /// Slot width in minutes (30 or 60).
        #[arg(long)]
        granularity: Option<u32>,

        /// Hour of day after which no slots are offered (e.g. 23.5).
        #[arg(long)]
        end_of_day: Option<f64>,

        /// Output as JSON.
        #[arg(long, conflicts_with = "watch")]
        json: bool,

        /// Keep running and reprint the list whenever it changes.
        #[arg(long)]
        watch: bool,
    },

    /// Merge slot tokens (e.g. 9-10 10-11) into a display label.
    Merge {
        /// Slot tokens in `start-end` form.
        #[arg(required = true)]
        tokens: Vec<String>,
    },

    /// Format a single hour range, e.g. `format 9 10.5`.
    Format {
        /// Start hour (fractional hours allowed).
        start: f64,
        /// End hour (fractional hours allowed).
        end: f64,
    },

    /// Show the hourly slot catalog.
    Catalog {
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Add a task.
    Add {
        /// Task text.
        text: String,

        /// Quadrant: do, schedule, delegate, eliminate (or the full key).
        #[arg(short, long, default_value = "do")]
        quadrant: Quadrant,

        /// Slot token to schedule the task in (repeatable).
        #[arg(long = "slot")]
        slots: Vec<String>,

        /// Whole hour of day to schedule the task in (repeatable).
        #[arg(long = "hour")]
        hours: Vec<u32>,
    },

    /// Show all tasks grouped by quadrant.
    List {
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Toggle a task's completion.
    Done {
        /// Task ID or unique prefix.
        id: String,
    },

    /// Change a task's text or times.
    Edit {
        /// Task ID or unique prefix.
        id: String,

        /// New task text.
        #[arg(long)]
        text: Option<String>,

        /// Replace the task's times with these slot tokens (repeatable).
        #[arg(long = "slot")]
        slots: Vec<String>,

        /// Remove the task's times.
        #[arg(long, conflicts_with = "slots")]
        clear_times: bool,
    },

    /// Delete a task.
    Rm {
        /// Task ID or unique prefix.
        id: String,
    },

    /// Move a task to a quadrant.
    Mv {
        /// Task ID or unique prefix.
        id: String,

        /// Target quadrant.
        quadrant: Quadrant,

        /// Position in the target quadrant (defaults to the end).
        #[arg(long)]
        index: Option<usize>,
    },

    /// Delete all completed tasks.
    ClearCompleted,

    /// Delete all tasks.
    Reset,

    /// Show or replace the notes pad.
    Notes {
        /// Replace the notes with this text.
        #[arg(long)]
        set: Option<String>,
    },

    /// Show board totals and remaining slots.
    Status,
}
