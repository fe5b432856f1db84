//! Clock time handling for schedule legs.
//!
//! Schedules carry departure and arrival times as bare "HH:MM" strings with
//! no date attached. A leg whose arrival is numerically earlier than its
//! departure is assumed to run overnight, so all arithmetic here wraps at
//! midnight rather than going negative.

use std::fmt;

use chrono::Duration;

/// Minutes in a day.
pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// Error returned when parsing an invalid time string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time: {reason}")]
pub struct TimeError {
    reason: &'static str,
}

impl TimeError {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// A wall-clock time of day, stored as minutes since midnight.
///
/// # Examples
///
/// ```
/// use route_planner::domain::ClockTime;
///
/// let time = ClockTime::parse_hhmm("14:30").unwrap();
/// assert_eq!(time.minutes_since_midnight(), 870);
/// assert_eq!(time.to_string(), "14:30");
///
/// // Single-digit hours are accepted, but output is always padded
/// assert_eq!(ClockTime::parse_hhmm("8:05").unwrap().to_string(), "08:05");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime(u16);

impl ClockTime {
    /// Parse a time from "HH:MM" (or "H:MM") format.
    ///
    /// Surrounding whitespace is ignored.
    ///
    /// ```
    /// use route_planner::domain::ClockTime;
    ///
    /// assert!(ClockTime::parse_hhmm("00:00").is_ok());
    /// assert!(ClockTime::parse_hhmm("23:59").is_ok());
    ///
    /// assert!(ClockTime::parse_hhmm("1430").is_err());
    /// assert!(ClockTime::parse_hhmm("14:3").is_err());
    /// assert!(ClockTime::parse_hhmm("25:00").is_err());
    /// assert!(ClockTime::parse_hhmm("ab:cd").is_err());
    /// ```
    pub fn parse_hhmm(s: &str) -> Result<Self, TimeError> {
        let s = s.trim();
        let (hours, minutes) = s
            .split_once(':')
            .ok_or_else(|| TimeError::new("expected HH:MM format"))?;

        if hours.is_empty() || hours.len() > 2 {
            return Err(TimeError::new("expected one or two hour digits"));
        }
        if minutes.len() != 2 {
            return Err(TimeError::new("expected two minute digits"));
        }

        let hour = parse_digits(hours).ok_or_else(|| TimeError::new("invalid hour digits"))?;
        if hour > 23 {
            return Err(TimeError::new("hour must be 0-23"));
        }

        let minute =
            parse_digits(minutes).ok_or_else(|| TimeError::new("invalid minute digits"))?;
        if minute > 59 {
            return Err(TimeError::new("minute must be 0-59"));
        }

        Ok(Self((hour * 60 + minute) as u16))
    }

    /// Returns the number of minutes since midnight (0-1439).
    pub fn minutes_since_midnight(&self) -> u32 {
        u32::from(self.0)
    }

    /// Returns the hour (0-23).
    pub fn hour(&self) -> u32 {
        self.minutes_since_midnight() / 60
    }

    /// Returns the minute (0-59).
    pub fn minute(&self) -> u32 {
        self.minutes_since_midnight() % 60
    }

    /// Minutes from `self` until `later`, wrapping past midnight.
    ///
    /// If `later` is numerically earlier than `self` it is taken to fall on
    /// the following day. The result is always in `0..1440`.
    ///
    /// ```
    /// use route_planner::domain::ClockTime;
    ///
    /// let arrive = ClockTime::parse_hhmm("23:30").unwrap();
    /// let depart = ClockTime::parse_hhmm("00:15").unwrap();
    /// assert_eq!(arrive.minutes_until(depart), 45);
    /// ```
    pub fn minutes_until(&self, later: ClockTime) -> u32 {
        let start = self.minutes_since_midnight();
        let mut end = later.minutes_since_midnight();
        if end < start {
            end += MINUTES_PER_DAY;
        }
        end - start
    }
}

impl fmt::Debug for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClockTime({:02}:{:02})", self.hour(), self.minute())
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

/// Parse one or two ASCII digits.
fn parse_digits(s: &str) -> Option<u32> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// Overnight-aware duration between two "HH:MM" strings.
///
/// Returns `None` if either string is malformed.
pub fn duration_between(start: &str, end: &str) -> Option<Duration> {
    let start = ClockTime::parse_hhmm(start).ok()?;
    let end = ClockTime::parse_hhmm(end).ok()?;
    Some(Duration::minutes(i64::from(start.minutes_until(end))))
}

/// Format a duration for display, e.g. "2h 30m", "2h" or "45m".
pub fn format_duration(duration: Duration) -> String {
    let total = duration.num_minutes().max(0);
    let hours = total / 60;
    let mins = total % 60;

    match (hours, mins) {
        (0, m) => format!("{m}m"),
        (h, 0) => format!("{h}h"),
        (h, m) => format!("{h}h {m}m"),
    }
}

/// Parse a duration label such as "4:30h" or "4:00" into minutes.
///
/// Schedule feeds describe leg durations this way. Returns `None` for
/// anything that isn't `H:MM` with an optional trailing `h`.
///
/// ```
/// use route_planner::domain::parse_duration_label;
///
/// assert_eq!(parse_duration_label("4:30h"), Some(270));
/// assert_eq!(parse_duration_label("12:05"), Some(725));
/// assert_eq!(parse_duration_label("soon"), None);
/// ```
pub fn parse_duration_label(label: &str) -> Option<u32> {
    let label = label.trim();
    let label = label.strip_suffix(['h', 'H']).unwrap_or(label).trim_end();
    let (hours, minutes) = label.split_once(':')?;

    let hours = parse_digits(hours)?;
    if minutes.len() != 2 {
        return None;
    }
    let minutes = parse_digits(minutes)?;
    if minutes > 59 {
        return None;
    }

    Some(hours * 60 + minutes)
}
