//! Time-of-day intervals and their string token encoding.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::label::format_range;

/// Number of hours in a day; the exclusive upper bound of any interval.
pub const HOURS_PER_DAY: f64 = 24.0;

/// Errors produced while decoding or generating time slots.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SlotError {
    /// A slot token could not be decoded into a valid interval.
    #[error("invalid slot token {token:?}: {reason}")]
    InvalidSlotToken { token: String, reason: TokenError },

    /// The requested slot width is not one of the supported granularities.
    #[error("unsupported granularity: {minutes} minutes (expected 30 or 60)")]
    UnsupportedGranularity { minutes: u32 },

    /// The end-of-day boundary lies outside the day.
    #[error("end of day must be between 0 and 24 hours, got {value}")]
    InvalidEndOfDay { value: f64 },
}

/// Why a pair of hour values does not form a [`TimeInterval`].
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum IntervalError {
    #[error("boundaries must be finite numbers")]
    NonFinite,
    #[error("boundaries must lie within 0 and 24")]
    OutsideDay,
    #[error("start must be before end")]
    StartNotBeforeEnd,
}

/// Why a string failed to decode as a [`SlotToken`].
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    #[error("missing '-' separator")]
    MissingSeparator,
    #[error("start is not a number")]
    StartNotNumber,
    #[error("end is not a number")]
    EndNotNumber,
    #[error(transparent)]
    Interval(#[from] IntervalError),
}

/// A half-open range of the day, `[start, end)`, measured in hours.
///
/// Boundaries may be fractional (`9.5` is 9:30). Construction guarantees
/// `0 <= start < end <= 24`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeInterval {
    start: f64,
    end: f64,
}

impl TimeInterval {
    /// Creates an interval after checking its bounds.
    pub fn new(start: f64, end: f64) -> Result<Self, IntervalError> {
        if !start.is_finite() || !end.is_finite() {
            return Err(IntervalError::NonFinite);
        }
        if start < 0.0 || end > HOURS_PER_DAY {
            return Err(IntervalError::OutsideDay);
        }
        if start >= end {
            return Err(IntervalError::StartNotBeforeEnd);
        }
        Ok(Self { start, end })
    }

    /// Builds an interval from bounds the caller has already validated.
    pub(crate) fn from_bounds(start: f64, end: f64) -> Self {
        debug_assert!(0.0 <= start && start < end && end <= HOURS_PER_DAY);
        Self { start, end }
    }

    /// Start of the interval in hours (inclusive).
    #[must_use]
    pub const fn start(self) -> f64 {
        self.start
    }

    /// End of the interval in hours (exclusive).
    #[must_use]
    pub const fn end(self) -> f64 {
        self.end
    }

    /// Returns true if `other` lies entirely within this interval.
    #[must_use]
    pub fn covers(self, other: Self) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Human-readable label, e.g. `9:00 AM - 10:00 AM`.
    #[must_use]
    pub fn label(self) -> String {
        format_range(self.start, self.end)
    }

    /// Widens the end boundary, used while merging contiguous intervals.
    pub(crate) fn extend_to(&mut self, end: f64) {
        if end > self.end {
            self.end = end;
        }
    }
}

/// Canonical `"<start>-<end>"` encoding of a [`TimeInterval`].
///
/// Numbers are written in their shortest decimal form (`9-10`, `9.5-10`). Parsing
/// tolerates zero padding and whitespace, so `"09-10"` and `" 9 - 10 "` both decode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlotToken(TimeInterval);

impl SlotToken {
    /// Wraps an interval as a token.
    #[must_use]
    pub const fn new(interval: TimeInterval) -> Self {
        Self(interval)
    }

    /// The interval this token identifies.
    #[must_use]
    pub const fn interval(self) -> TimeInterval {
        self.0
    }
}

impl From<TimeInterval> for SlotToken {
    fn from(interval: TimeInterval) -> Self {
        Self(interval)
    }
}

impl fmt::Display for SlotToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.0.start, self.0.end)
    }
}

impl FromStr for SlotToken {
    type Err = SlotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: TokenError| SlotError::InvalidSlotToken {
            token: s.to_string(),
            reason,
        };

        let (start, end) = s
            .split_once('-')
            .ok_or_else(|| invalid(TokenError::MissingSeparator))?;
        let start: f64 = start
            .trim()
            .parse()
            .map_err(|_| invalid(TokenError::StartNotNumber))?;
        let end: f64 = end
            .trim()
            .parse()
            .map_err(|_| invalid(TokenError::EndNotNumber))?;

        TimeInterval::new(start, end)
            .map(Self)
            .map_err(|err| invalid(err.into()))
    }
}

impl Serialize for SlotToken {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for SlotToken {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Width of a single generated slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Granularity {
    /// Thirty-minute slots.
    #[default]
    HalfHour,
    /// One-hour slots.
    Hour,
}

impl Granularity {
    /// Slot width in minutes.
    #[must_use]
    pub const fn minutes(self) -> u32 {
        match self {
            Self::HalfHour => 30,
            Self::Hour => 60,
        }
    }
}

impl TryFrom<u32> for Granularity {
    type Error = SlotError;

    fn try_from(minutes: u32) -> Result<Self, Self::Error> {
        match minutes {
            30 => Ok(Self::HalfHour),
            60 => Ok(Self::Hour),
            _ => Err(SlotError::UnsupportedGranularity { minutes }),
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} minutes", self.minutes())
    }
}
