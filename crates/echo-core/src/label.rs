//! Twelve-hour clock labels for hour-of-day values.

use crate::slot::HOURS_PER_DAY;

/// Tolerance applied before flooring so that values such as `9.1 * 60`
/// do not lose a minute to floating-point representation.
pub(crate) const MINUTE_EPSILON: f64 = 1e-6;

/// Splits a fractional hour into whole hours and minutes.
///
/// Callers pass hours within `0..=24`. Release builds saturate a negative
/// value to midnight rather than failing.
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "hour values are validated to lie within 0..=24 before formatting"
)]
fn split_hour(hour: f64) -> (u32, u32) {
    debug_assert!(
        (0.0..=HOURS_PER_DAY).contains(&hour),
        "hour {hour} lies outside the day"
    );
    let total_minutes = (hour * 60.0 + MINUTE_EPSILON).floor() as u32;
    (total_minutes / 60, total_minutes % 60)
}

/// Formats an hour-of-day value as `H:MM AM/PM`.
///
/// `0` and `24` are both midnight (`12:00 AM`), `12` is noon, and the fractional
/// part becomes minutes (`9.5` is `9:30 AM`). No timezone conversion happens here.
pub fn format_hour(hour: f64) -> String {
    let (hours, minutes) = split_hour(hour);
    let hours = hours % 24;
    let period = if hours < 12 { "AM" } else { "PM" };
    let display = match hours % 12 {
        0 => 12,
        h => h,
    };
    format!("{display}:{minutes:02} {period}")
}

/// Formats a range as `"<start> - <end>"` using [`format_hour`] for each side.
pub fn format_range(start: f64, end: f64) -> String {
    format!("{} - {}", format_hour(start), format_hour(end))
}

/// Short label used by the hour-picker grid, e.g. `9am` or `12pm`.
pub fn compact_hour_label(hour: u32) -> String {
    let period = if hour % 24 >= 12 { "pm" } else { "am" };
    let display = match hour % 12 {
        0 => 12,
        h => h,
    };
    format!("{display}{period}")
}
