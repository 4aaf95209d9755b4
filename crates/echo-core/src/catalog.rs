//! The fixed hourly slot catalog and the hour-picker selection.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::label::{compact_hour_label, format_range};
use crate::slot::{SlotToken, TimeInterval};

/// One selectable entry of the hourly catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlotOption {
    /// Token submitted when the option is selected, e.g. `9-10`.
    pub value: String,
    /// Display label, e.g. `9:00 AM - 10:00 AM`.
    pub label: String,
    /// Starting hour of day.
    pub hour: u32,
}

/// The one-hour token starting at `hour`.
///
/// Hours past 23 wrap around the day.
pub fn hour_token(hour: u32) -> SlotToken {
    let start = f64::from(hour % 24);
    SlotToken::new(TimeInterval::from_bounds(start, start + 1.0))
}

/// Lists all 24 one-hour options of the day, from `0-1` to `23-24`.
pub fn hourly_catalog() -> Vec<SlotOption> {
    (0..24)
        .map(|hour| {
            let start = f64::from(hour);
            SlotOption {
                value: hour_token(hour).to_string(),
                label: format_range(start, start + 1.0),
                hour,
            }
        })
        .collect()
}

/// Set of whole hours picked on the hour grid.
///
/// Hours are kept deduplicated and ascending.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HourSelection {
    hours: BTreeSet<u32>,
}

impl HourSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects `hour` if it is not selected, otherwise deselects it.
    ///
    /// Returns whether the hour is selected afterwards. Hours outside `0..24`
    /// are ignored.
    pub fn toggle(&mut self, hour: u32) -> bool {
        if hour >= 24 {
            return false;
        }
        if self.hours.remove(&hour) {
            false
        } else {
            self.hours.insert(hour);
            true
        }
    }

    pub fn contains(&self, hour: u32) -> bool {
        self.hours.contains(&hour)
    }

    pub fn is_empty(&self) -> bool {
        self.hours.is_empty()
    }

    /// Selected hours in ascending order.
    pub fn hours(&self) -> impl Iterator<Item = u32> + '_ {
        self.hours.iter().copied()
    }

    /// Selection as one-hour slot tokens, ready for merging.
    pub fn tokens(&self) -> Vec<String> {
        self.hours().map(|hour| hour_token(hour).to_string()).collect()
    }

    /// Compact grid labels of the selected hours, e.g. `["9am", "2pm"]`.
    pub fn labels(&self) -> Vec<String> {
        self.hours().map(compact_hour_label).collect()
    }
}

impl FromIterator<u32> for HourSelection {
    fn from_iter<I: IntoIterator<Item = u32>>(iter: I) -> Self {
        let mut selection = Self::new();
        for hour in iter {
            if hour < 24 {
                selection.hours.insert(hour);
            }
        }
        selection
    }
}
