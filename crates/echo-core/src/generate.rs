//! Generation of the slots still available today.

use chrono::{NaiveTime, Timelike};

use crate::label::MINUTE_EPSILON;
use crate::slot::{Granularity, HOURS_PER_DAY, SlotError, SlotToken, TimeInterval};

/// Default end-of-day boundary (11:30 PM).
pub const DEFAULT_END_OF_DAY: f64 = 23.5;

const MINUTES_PER_HOUR: u32 = 60;

/// Converts an end-of-day hour value to whole minutes after validating it.
///
/// Partial minutes are dropped so that no slot can end after the boundary.
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "value is checked to lie within 0..=24 first"
)]
fn end_of_day_minutes(end_of_day: f64) -> Result<u32, SlotError> {
    if !end_of_day.is_finite() || !(0.0..=HOURS_PER_DAY).contains(&end_of_day) {
        return Err(SlotError::InvalidEndOfDay { value: end_of_day });
    }
    Ok((end_of_day * f64::from(MINUTES_PER_HOUR) + MINUTE_EPSILON).floor() as u32)
}

fn minutes_to_hours(minutes: u32) -> f64 {
    f64::from(minutes) / f64::from(MINUTES_PER_HOUR)
}

/// Rounds a minute-of-day value up to the next multiple of `step`.
///
/// Values already on a boundary are returned unchanged.
const fn round_up(minutes: u32, step: u32) -> u32 {
    minutes.div_ceil(step) * step
}

/// Lists the slots between `now` (rounded up to the next granularity boundary)
/// and `end_of_day`.
///
/// Only the hour and minute of `now` are considered. Every slot is exactly one
/// granularity wide and none extends past `end_of_day`; when `now` is at or past
/// that boundary the result is empty.
pub fn generate_slots(
    now: NaiveTime,
    granularity: Granularity,
    end_of_day: f64,
) -> Result<Vec<SlotToken>, SlotError> {
    let end = end_of_day_minutes(end_of_day)?;
    let step = granularity.minutes();
    let mut start = round_up(now.hour() * MINUTES_PER_HOUR + now.minute(), step);

    let mut slots = Vec::new();
    while start + step <= end {
        let interval =
            TimeInterval::from_bounds(minutes_to_hours(start), minutes_to_hours(start + step));
        slots.push(SlotToken::new(interval));
        start += step;
    }

    tracing::debug!(
        now = %now.format("%H:%M"),
        %granularity,
        end_of_day,
        count = slots.len(),
        "generated available slots"
    );
    Ok(slots)
}
