//! Transfer validation between consecutive legs.
//!
//! Legs carry clock times without dates. When the next departure is earlier
//! on the clock than the previous arrival, the departure is taken to be the
//! following day. This is an approximation: it cannot represent a wait of
//! more than a day, and legs spanning several midnights are misread.

use chrono::{Duration, Weekday};
use tracing::trace;

use crate::domain::{ClockTime, ScheduleLeg, TimeError};

/// Default minimum transfer buffer (minutes).
pub const DEFAULT_MIN_BUFFER_MINS: i64 = 30;

/// Gap between an arrival and a later departure, wrapping past midnight.
///
/// Fails if either time is malformed.
pub fn transfer_gap(prev_arrival: &str, next_departure: &str) -> Result<Duration, TimeError> {
    let arrival = ClockTime::parse_hhmm(prev_arrival)?;
    let departure = ClockTime::parse_hhmm(next_departure)?;
    Ok(Duration::minutes(i64::from(arrival.minutes_until(departure))))
}

/// Check whether a transfer leaves at least `min_buffer_mins` to change.
///
/// Malformed time strings make the transfer invalid; they are never an error.
///
/// # Examples
///
/// ```
/// use route_planner::planner::is_valid_transfer;
///
/// assert!(is_valid_transfer("10:00", "10:45", 30));
/// assert!(!is_valid_transfer("10:00", "10:20", 30));
///
/// // Overnight: 23:50 -> 00:30 is a 40 minute wait
/// assert!(is_valid_transfer("23:50", "00:30", 30));
///
/// assert!(!is_valid_transfer("10:00", "soon", 30));
/// ```
pub fn is_valid_transfer(prev_arrival: &str, next_departure: &str, min_buffer_mins: i64) -> bool {
    match transfer_gap(prev_arrival, next_departure) {
        Ok(gap) => gap >= Duration::minutes(min_buffer_mins),
        Err(_) => false,
    }
}

/// Check whether a leg runs on the given weekday.
pub fn is_available(leg: &ScheduleLeg, day: Weekday) -> bool {
    leg.runs_on(day)
}

/// Decides which leg-to-leg transfers are usable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectionValidator {
    min_buffer: Duration,
    max_layover: Option<Duration>,
}

impl ConnectionValidator {
    /// Create a validator requiring at least `min_buffer` between legs.
    pub fn new(min_buffer: Duration) -> Self {
        Self {
            min_buffer,
            max_layover: None,
        }
    }

    /// Also reject transfers that wait longer than `max_layover`.
    pub fn with_max_layover(mut self, max_layover: Option<Duration>) -> Self {
        self.max_layover = max_layover;
        self
    }

    /// Returns the minimum buffer.
    pub fn min_buffer(&self) -> Duration {
        self.min_buffer
    }

    /// Check whether `next` can be caught after arriving on `prev`.
    ///
    /// Both legs must have readable departure and arrival times: a leg with
    /// malformed clock text is never chained. Only times are compared; the
    /// caller is responsible for `next` departing from the city `prev`
    /// arrives at.
    pub fn is_valid_transfer(&self, prev: &ScheduleLeg, next: &ScheduleLeg) -> bool {
        let gap = match chain_gap(prev, next) {
            Ok(gap) => gap,
            Err(e) => {
                trace!(
                    at = %next.origin(),
                    error = %e,
                    "Transfer rejected: unreadable time"
                );
                return false;
            }
        };

        if gap < self.min_buffer {
            trace!(
                at = %next.origin(),
                gap_mins = gap.num_minutes(),
                "Transfer rejected: buffer too short"
            );
            return false;
        }

        if let Some(max) = self.max_layover {
            if gap > max {
                trace!(
                    at = %next.origin(),
                    gap_mins = gap.num_minutes(),
                    "Transfer rejected: layover too long"
                );
                return false;
            }
        }

        true
    }

    /// Check whether a leg runs on the given weekday.
    pub fn is_available(&self, leg: &ScheduleLeg, day: Weekday) -> bool {
        is_available(leg, day)
    }
}

/// Transfer gap between two legs, requiring all four times to parse.
fn chain_gap(prev: &ScheduleLeg, next: &ScheduleLeg) -> Result<Duration, TimeError> {
    prev.departure_time()?;
    next.arrival_time()?;
    transfer_gap(prev.arrival_text(), next.departure_text())
}

impl Default for ConnectionValidator {
    fn default() -> Self {
        Self::new(Duration::minutes(DEFAULT_MIN_BUFFER_MINS))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leg(from: &str, to: &str, dep: &str, arr: &str) -> ScheduleLeg {
        ScheduleLeg::new("Test", from, to, dep, arr, 100.0)
    }

    #[test]
    fn buffer_boundary() {
        assert!(is_valid_transfer("10:00", "10:30", 30));
        assert!(!is_valid_transfer("10:00", "10:29", 30));
        assert!(is_valid_transfer("10:00", "10:00", 0));
    }

    #[test]
    fn overnight_wraparound() {
        assert!(is_valid_transfer("23:30", "00:15", 30));
        assert!(!is_valid_transfer("23:50", "00:10", 30));
        assert_eq!(
            transfer_gap("23:30", "00:15").unwrap(),
            Duration::minutes(45)
        );
    }

    #[test]
    fn earlier_departure_means_next_day() {
        // Departure just before arrival wraps to almost a day later
        assert_eq!(
            transfer_gap("10:00", "09:00").unwrap(),
            Duration::minutes(23 * 60)
        );
        assert!(is_valid_transfer("10:00", "09:00", 30));
    }

    #[test]
    fn malformed_times_are_invalid() {
        assert!(!is_valid_transfer("10:00", "10", 30));
        assert!(!is_valid_transfer("ten", "11:00", 30));
        assert!(!is_valid_transfer("", "", 0));
        assert!(transfer_gap("10:00", "1x:00").is_err());
    }

    #[test]
    fn validator_uses_leg_times() {
        let validator = ConnectionValidator::default();
        let first = leg("A", "B", "08:00", "10:00");

        assert!(validator.is_valid_transfer(&first, &leg("B", "C", "10:45", "13:00")));
        assert!(!validator.is_valid_transfer(&first, &leg("B", "C", "10:20", "13:00")));
        assert!(!validator.is_valid_transfer(&first, &leg("B", "C", "10.45", "13:00")));
    }

    #[test]
    fn malformed_leg_is_never_chained() {
        let validator = ConnectionValidator::default();

        // The times that meet at B are fine, but the other ends are not
        let bad_departure = leg("A", "B", "eight", "10:00");
        let bad_arrival = leg("B", "C", "10:45", "1pm");

        assert!(!validator.is_valid_transfer(&bad_departure, &leg("B", "C", "10:45", "13:00")));
        assert!(!validator.is_valid_transfer(&leg("A", "B", "08:00", "10:00"), &bad_arrival));
    }

    #[test]
    fn validator_max_layover() {
        let validator = ConnectionValidator::new(Duration::minutes(15))
            .with_max_layover(Some(Duration::hours(12)));
        let first = leg("A", "B", "08:00", "10:00");

        assert!(validator.is_valid_transfer(&first, &leg("B", "C", "10:15", "13:00")));
        assert!(validator.is_valid_transfer(&first, &leg("B", "C", "22:00", "23:00")));
        assert!(!validator.is_valid_transfer(&first, &leg("B", "C", "22:01", "23:00")));
    }

    #[test]
    fn availability() {
        let validator = ConnectionValidator::default();
        let friday_off = leg("X", "Y", "08:00", "10:00").with_unavailable_days([Weekday::Fri]);

        assert!(!validator.is_available(&friday_off, Weekday::Fri));
        assert!(validator.is_available(&friday_off, Weekday::Sat));
        assert!(is_available(&leg("X", "Y", "08:00", "10:00"), Weekday::Fri));
    }

    #[test]
    fn default_buffer_is_thirty_minutes() {
        assert_eq!(
            ConnectionValidator::default().min_buffer(),
            Duration::minutes(30)
        );
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    prop_compose! {
        fn valid_time()(hour in 0u32..24, minute in 0u32..60) -> String {
            format!("{:02}:{:02}", hour, minute)
        }
    }

    proptest! {
        /// A zero buffer accepts every well-formed pair
        #[test]
        fn zero_buffer_accepts_all(a in valid_time(), b in valid_time()) {
            prop_assert!(is_valid_transfer(&a, &b, 0));
        }

        /// Validity agrees with the computed gap
        #[test]
        fn agrees_with_gap(a in valid_time(), b in valid_time(), buffer in 0i64..180) {
            let gap = transfer_gap(&a, &b).unwrap();
            prop_assert_eq!(
                is_valid_transfer(&a, &b, buffer),
                gap >= Duration::minutes(buffer)
            );
        }

        /// A buffer of a full day or more is never satisfiable
        #[test]
        fn day_long_buffer_rejects_all(a in valid_time(), b in valid_time()) {
            prop_assert!(!is_valid_transfer(&a, &b, 1440));
        }
    }
}
