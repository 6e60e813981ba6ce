//! Booking admission: the overlap test and the admit/reject decision.
//!
//! This is the single authority on whether two bookings conflict. The
//! services layer runs it once when a proposal arrives and again inside
//! the admission transaction, so the decision it renders here is the
//! decision that gets persisted.

use super::Interval;
use uuid::Uuid;

/// An existing non-cancelled booking considered during admission.
#[derive(Debug, Clone, Copy)]
pub struct ExistingBooking {
    pub id: Uuid,
    pub interval: Interval,
}

/// Why a proposal was rejected.
///
/// Both variants are the same outcome internally (the booking is not
/// admitted); they differ only for user-facing messaging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// The exact start slot is already taken (typically a lost race
    /// for the same slot).
    SlotTaken { booking_id: Uuid },

    /// The proposal overlaps a booking with a different start time
    /// (e.g. it begins partway through a longer booking).
    Overlap { booking_id: Uuid },
}

/// Admission decision for a proposed booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    Admit,
    Reject(RejectReason),
}

/// Half-open interval overlap test.
///
/// `[a.start, a.end)` and `[b.start, b.end)` conflict iff
/// `a.start < b.end && b.start < a.end`. Touching endpoints do not
/// conflict: 10:00-11:00 and 11:00-12:00 coexist.
pub fn intervals_overlap(a: Interval, b: Interval) -> bool {
    a.start < b.end() && b.start < a.end()
}

/// Decide whether a proposed interval may be admitted against the
/// existing non-cancelled bookings for the same venue and date.
///
/// Returns [`Admission::Admit`] when no existing booking overlaps, or
/// [`Admission::Reject`] naming the first conflicting booking. An exact
/// start-time match is reported as [`RejectReason::SlotTaken`]; any
/// other overlap as [`RejectReason::Overlap`].
pub fn check_admission(proposed: Interval, existing: &[ExistingBooking]) -> Admission {
    for booking in existing {
        if !intervals_overlap(proposed, booking.interval) {
            continue;
        }

        let reason = if booking.interval.start == proposed.start {
            RejectReason::SlotTaken {
                booking_id: booking.id,
            }
        } else {
            RejectReason::Overlap {
                booking_id: booking.id,
            }
        };
        return Admission::Reject(reason);
    }

    Admission::Admit
}

#[cfg(test)]
mod tests {
    use super::*;

    fn existing(start: i32, duration: i32) -> ExistingBooking {
        ExistingBooking {
            id: Uuid::new_v4(),
            interval: Interval::new(start, duration),
        }
    }

    #[test]
    fn admits_into_empty_day() {
        let proposed = Interval::new(10 * 60, 60);
        assert_eq!(check_admission(proposed, &[]), Admission::Admit);
    }

    #[test]
    fn back_to_back_bookings_do_not_conflict() {
        // Existing 10:00-11:00, proposed 11:00-12:00.
        let taken = existing(10 * 60, 60);
        let proposed = Interval::new(11 * 60, 60);
        assert_eq!(check_admission(proposed, &[taken]), Admission::Admit);

        // And the mirror: proposed ends exactly at the existing start.
        let proposed = Interval::new(9 * 60, 60);
        assert_eq!(check_admission(proposed, &[taken]), Admission::Admit);
    }

    #[test]
    fn one_minute_overlap_rejects() {
        // Existing 10:00-11:00, proposed 10:59-11:59.
        let taken = existing(10 * 60, 60);
        let proposed = Interval::new(10 * 60 + 59, 60);

        match check_admission(proposed, &[taken]) {
            Admission::Reject(RejectReason::Overlap { booking_id }) => {
                assert_eq!(booking_id, taken.id);
            }
            other => panic!("expected overlap rejection, got {other:?}"),
        }
    }

    #[test]
    fn exact_slot_match_reports_slot_taken() {
        let taken = existing(10 * 60, 60);
        let proposed = Interval::new(10 * 60, 90);

        assert_eq!(
            check_admission(proposed, &[taken]),
            Admission::Reject(RejectReason::SlotTaken {
                booking_id: taken.id
            })
        );
    }

    #[test]
    fn partial_overlap_inside_longer_booking_rejects() {
        // A 90-minute booking starting 30 minutes into an existing one.
        // The single-column slot constraint would miss this case.
        let taken = existing(10 * 60, 120);
        let proposed = Interval::new(10 * 60 + 30, 90);

        assert_eq!(
            check_admission(proposed, &[taken]),
            Admission::Reject(RejectReason::Overlap {
                booking_id: taken.id
            })
        );
    }

    #[test]
    fn quarter_hour_minutes_use_integer_arithmetic() {
        // "10:45" is 645 minutes. Decimal-string parsing would treat it
        // as 10.45 hours and wrongly admit a 10:30-10:45 proposal.
        let taken = existing(10 * 60 + 45, 30);
        let proposed = Interval::new(10 * 60 + 30, 30);

        assert!(matches!(
            check_admission(proposed, &[taken]),
            Admission::Reject(RejectReason::Overlap { .. })
        ));
    }

    #[test]
    fn overlap_test_is_symmetric() {
        let cases = [
            (Interval::new(600, 60), Interval::new(630, 60)),
            (Interval::new(600, 60), Interval::new(660, 60)),
            (Interval::new(600, 120), Interval::new(630, 30)),
            (Interval::new(0, 1), Interval::new(0, 1)),
        ];
        for (a, b) in cases {
            assert_eq!(intervals_overlap(a, b), intervals_overlap(b, a));
        }
    }

    #[test]
    fn cancelled_bookings_are_the_callers_problem() {
        // check_admission sees only what it is given; the services layer
        // filters out cancelled rows before calling in.
        let proposed = Interval::new(10 * 60, 60);
        assert_eq!(check_admission(proposed, &[]), Admission::Admit);
    }
}
