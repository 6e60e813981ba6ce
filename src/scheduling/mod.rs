//! Availability, conflict, and pricing arithmetic.
//!
//! This module is the pure core of the service: every function here is
//! deterministic given its inputs and performs no I/O. Fetching the rows
//! (operating hours, blocked dates, bookings) and persisting admitted
//! bookings is the job of the services layer.
//!
//! # Time Representation
//!
//! All time arithmetic operates on **minutes since midnight** (`i32`).
//! Wall-clock values (`chrono::NaiveTime`) are converted at the boundary.
//! Never parse "HH:MM" into a decimal number: "10:45" is 645 minutes,
//! not 10.45 of anything.
//!
//! # Interval Semantics
//!
//! All intervals are half-open `[start, start + duration)`. A booking
//! ending at 11:00 and another starting at 11:00 do not overlap.

pub mod conflict;
pub mod pricing;
pub mod slots;

use chrono::{NaiveTime, Timelike};

/// A half-open time interval within one day, in minutes since midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    /// Start of the interval, minutes since midnight
    pub start: i32,

    /// Length of the interval in minutes (always positive)
    pub duration: i32,
}

impl Interval {
    pub fn new(start: i32, duration: i32) -> Self {
        Self { start, duration }
    }

    /// Exclusive end of the interval, minutes since midnight.
    pub fn end(&self) -> i32 {
        self.start + self.duration
    }
}

/// Convert a wall-clock time to minutes since midnight.
///
/// Seconds are truncated; the schedule domain has minute granularity.
pub fn minutes_from_midnight(time: NaiveTime) -> i32 {
    (time.num_seconds_from_midnight() / 60) as i32
}

/// Convert a wall-clock time to minutes since midnight, requiring
/// minute granularity.
///
/// Returns `None` when the time carries seconds or finer. Admission
/// uses this instead of [`minutes_from_midnight`]: checking a truncated
/// value while persisting the raw one would open a sub-minute overlap
/// window the conflict check never saw.
pub fn exact_minutes_from_midnight(time: NaiveTime) -> Option<i32> {
    if time.second() != 0 || time.nanosecond() != 0 {
        return None;
    }
    Some(minutes_from_midnight(time))
}

/// Convert minutes since midnight back to a wall-clock time.
///
/// Returns `None` if `minutes` falls outside a single day.
pub fn time_from_minutes(minutes: i32) -> Option<NaiveTime> {
    if !(0..24 * 60).contains(&minutes) {
        return None;
    }
    NaiveTime::from_hms_opt(minutes as u32 / 60, minutes as u32 % 60, 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_wall_clock_to_minutes() {
        let t = NaiveTime::from_hms_opt(10, 45, 0).unwrap();
        assert_eq!(minutes_from_midnight(t), 645);
    }

    #[test]
    fn truncates_seconds() {
        let t = NaiveTime::from_hms_opt(9, 30, 59).unwrap();
        assert_eq!(minutes_from_midnight(t), 570);
    }

    #[test]
    fn exact_conversion_rejects_sub_minute_times() {
        // 10:00:30 truncates to the 10:00 minute; an interval checked
        // as [10:00, 11:00) but stored as [10:00:30, 11:00:30) would
        // slip past an existing 11:00-12:00 booking while genuinely
        // overlapping it. The exact conversion refuses such inputs.
        let sub_minute = NaiveTime::from_hms_opt(10, 0, 30).unwrap();
        assert_eq!(exact_minutes_from_midnight(sub_minute), None);

        let whole = NaiveTime::from_hms_opt(10, 0, 0).unwrap();
        assert_eq!(exact_minutes_from_midnight(whole), Some(600));
    }

    #[test]
    fn converts_minutes_back_to_wall_clock() {
        assert_eq!(
            time_from_minutes(645),
            Some(NaiveTime::from_hms_opt(10, 45, 0).unwrap())
        );
        assert_eq!(time_from_minutes(0), Some(NaiveTime::MIN));
        assert_eq!(time_from_minutes(24 * 60), None);
        assert_eq!(time_from_minutes(-1), None);
    }

    #[test]
    fn interval_end_is_exclusive_bound() {
        let i = Interval::new(600, 90);
        assert_eq!(i.end(), 690);
    }
}
