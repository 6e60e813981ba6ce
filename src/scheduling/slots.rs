//! Slot generation for one venue-day.
//!
//! Given the day's operating hours, its blocked status, and the existing
//! non-cancelled bookings, produce the ordered sequence of fixed-length
//! candidate slots between open and close, each marked available or not.

use super::{Interval, conflict::intervals_overlap};

/// Operating hours for one day of the week, as stored per venue.
///
/// Times are minutes since midnight. When `is_closed` is true the
/// open/close values are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayHours {
    pub open: i32,
    pub close: i32,
    pub is_closed: bool,
}

/// One candidate booking slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    /// Slot start, minutes since midnight
    pub start: i32,

    /// False when the slot's interval overlaps an existing booking
    pub available: bool,
}

/// Generate the bookable slots for one venue-day.
///
/// # Closed Days
///
/// Returns an empty sequence when any of these hold:
/// - no operating-hours row exists for the day (`hours` is `None`)
/// - the row is marked `is_closed`
/// - the date is blocked (full-day override)
///
/// An empty result is the normal "venue closed" case, not an error.
///
/// # Slot Coverage
///
/// Slots step through `[open, close)` in `slot_minutes` increments and
/// stop once fewer than one full slot remains before close: hours
/// 09:00–17:30 with 60-minute slots yield starts 09:00..=16:00.
///
/// # Availability
///
/// A slot is unavailable iff its half-open interval overlaps any entry
/// of `bookings` (the caller passes only non-cancelled bookings). A slot
/// ending exactly when a booking starts, or starting exactly when one
/// ends, stays available.
pub fn generate_slots(
    hours: Option<DayHours>,
    date_blocked: bool,
    bookings: &[Interval],
    slot_minutes: i32,
) -> Vec<Slot> {
    let Some(hours) = hours else {
        return Vec::new();
    };

    if hours.is_closed || date_blocked || slot_minutes <= 0 {
        return Vec::new();
    }

    let mut slots = Vec::new();
    let mut start = hours.open;

    while start + slot_minutes <= hours.close {
        let candidate = Interval::new(start, slot_minutes);
        let taken = bookings.iter().any(|b| intervals_overlap(candidate, *b));

        slots.push(Slot {
            start,
            available: !taken,
        });

        start += slot_minutes;
    }

    slots
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open(open: i32, close: i32) -> Option<DayHours> {
        Some(DayHours {
            open,
            close,
            is_closed: false,
        })
    }

    #[test]
    fn empty_when_no_hours_row() {
        assert!(generate_slots(None, false, &[], 60).is_empty());
    }

    #[test]
    fn empty_when_day_marked_closed() {
        let hours = Some(DayHours {
            open: 9 * 60,
            close: 17 * 60,
            is_closed: true,
        });
        assert!(generate_slots(hours, false, &[], 60).is_empty());
    }

    #[test]
    fn empty_when_date_blocked() {
        assert!(generate_slots(open(9 * 60, 17 * 60), true, &[], 60).is_empty());
    }

    #[test]
    fn empty_when_hours_degenerate() {
        assert!(generate_slots(open(17 * 60, 9 * 60), false, &[], 60).is_empty());
        assert!(generate_slots(open(9 * 60, 9 * 60), false, &[], 60).is_empty());
    }

    #[test]
    fn covers_open_to_close_in_fixed_steps() {
        let slots = generate_slots(open(9 * 60, 12 * 60), false, &[], 60);
        let starts: Vec<i32> = slots.iter().map(|s| s.start).collect();
        assert_eq!(starts, vec![9 * 60, 10 * 60, 11 * 60]);
        assert!(slots.iter().all(|s| s.available));
    }

    #[test]
    fn drops_trailing_partial_slot() {
        // 09:00-17:30 with 60-minute slots: last full slot starts 16:00.
        let slots = generate_slots(open(9 * 60, 17 * 60 + 30), false, &[], 60);
        assert_eq!(slots.last().unwrap().start, 16 * 60);
        assert_eq!(slots.len(), 8);
    }

    #[test]
    fn marks_overlapping_slots_unavailable() {
        // Booking 10:30-12:00 blocks the 10:00 and 11:00 slots only.
        let booking = Interval::new(10 * 60 + 30, 90);
        let slots = generate_slots(open(9 * 60, 14 * 60), false, &[booking], 60);

        let availability: Vec<(i32, bool)> =
            slots.iter().map(|s| (s.start, s.available)).collect();
        assert_eq!(
            availability,
            vec![
                (9 * 60, true),
                (10 * 60, false),
                (11 * 60, false),
                (12 * 60, true),
                (13 * 60, true),
            ]
        );
    }

    #[test]
    fn slot_touching_booking_boundaries_stays_available() {
        // Booking 10:00-11:00. Slots 09:00 (ends at its start) and
        // 11:00 (starts at its end) remain available.
        let booking = Interval::new(10 * 60, 60);
        let slots = generate_slots(open(9 * 60, 12 * 60), false, &[booking], 60);

        assert!(slots[0].available);
        assert!(!slots[1].available);
        assert!(slots[2].available);
    }

    #[test]
    fn handles_non_hour_granularity() {
        // 90-minute slots over 09:00-13:00: starts 09:00, 10:30.
        let slots = generate_slots(open(9 * 60, 13 * 60), false, &[], 90);
        let starts: Vec<i32> = slots.iter().map(|s| s.start).collect();
        assert_eq!(starts, vec![9 * 60, 10 * 60 + 30]);
    }

    #[test]
    fn idempotent_for_identical_inputs() {
        let bookings = [Interval::new(10 * 60, 60), Interval::new(13 * 60, 120)];
        let first = generate_slots(open(8 * 60, 18 * 60), false, &bookings, 60);
        let second = generate_slots(open(8 * 60, 18 * 60), false, &bookings, 60);
        assert_eq!(first, second);
    }
}
