//! Core domain logic for the Echo task organizer.
//!
//! This crate contains:
//! - Slots: decoding `start-end` tokens into time-of-day intervals
//! - Generation: listing the slots still available today
//! - Merging: collapsing a slot selection into display ranges
//! - Task board: the four-quadrant Eisenhower matrix and its transitions

pub mod catalog;
mod generate;
pub mod label;
mod merge;
pub mod slot;
pub mod task;

pub use catalog::{HourSelection, SlotOption, hourly_catalog};
pub use generate::{DEFAULT_END_OF_DAY, generate_slots};
pub use label::{format_hour, format_range};
pub use merge::{RANGE_SEPARATOR, format_merged, merge_and_format, merge_intervals, parse_selection};
pub use slot::{Granularity, IntervalError, SlotError, SlotToken, TimeInterval, TokenError};
pub use task::{BoardError, Quadrant, Task, TaskBoard, TaskUpdate};
