//! Schedule leg type.
//!
//! A `ScheduleLeg` is one scheduled departure between two cities: a bus or
//! train leaving at a fixed clock time every day it runs. Legs are accepted
//! exactly as the data source supplies them. Malformed clock text is kept
//! rather than rejected, so a bad record can still be listed and matched as
//! a direct trip; it just can never be chained into a connection.

use std::collections::HashSet;
use std::fmt;

use chrono::{Duration, Weekday};

use super::{City, ClockTime, TimeError, duration_between};

/// The kind of vehicle operating a leg.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TransportType {
    #[default]
    Bus,
    Train,
}

impl TransportType {
    /// Parse a transport type from feed text ("bus", "TRAIN", ...).
    ///
    /// Anything unrecognised is treated as a bus.
    pub fn parse(s: &str) -> Self {
        if s.trim().eq_ignore_ascii_case("train") {
            TransportType::Train
        } else {
            TransportType::Bus
        }
    }

    /// Returns the lowercase name of this transport type.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransportType::Bus => "bus",
            TransportType::Train => "train",
        }
    }
}

impl fmt::Display for TransportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parse a weekday name such as "Friday" or "fri", ignoring case.
pub fn parse_weekday(name: &str) -> Option<Weekday> {
    name.trim().parse().ok()
}

/// A single scheduled departure.
///
/// # Examples
///
/// ```
/// use route_planner::domain::ScheduleLeg;
/// use chrono::Weekday;
///
/// let leg = ScheduleLeg::new("Green Line", "Dhaka", "Sylhet", "22:30", "05:00", 850.0)
///     .with_unavailable_days([Weekday::Fri]);
///
/// // Duration is derived from the clock times, across midnight
/// assert_eq!(leg.duration_minutes(), 390);
/// assert!(!leg.runs_on(Weekday::Fri));
/// assert!(leg.runs_on(Weekday::Sat));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleLeg {
    service: String,
    transport: TransportType,
    origin: City,
    destination: City,
    departure: String,
    arrival: String,
    fare: f64,
    duration_minutes: u32,
    unavailable_days: HashSet<Weekday>,
}

impl ScheduleLeg {
    /// Construct a leg that runs every day.
    ///
    /// The duration is derived from the departure and arrival times,
    /// wrapping past midnight. If either time is malformed the duration
    /// is zero.
    pub fn new(
        service: impl Into<String>,
        origin: impl Into<String>,
        destination: impl Into<String>,
        departure: impl Into<String>,
        arrival: impl Into<String>,
        fare: f64,
    ) -> Self {
        let departure = departure.into();
        let arrival = arrival.into();
        let duration_minutes = duration_between(&departure, &arrival)
            .map(|d| d.num_minutes() as u32)
            .unwrap_or(0);

        Self {
            service: service.into(),
            transport: TransportType::default(),
            origin: City::new(origin),
            destination: City::new(destination),
            departure,
            arrival,
            fare,
            duration_minutes,
            unavailable_days: HashSet::new(),
        }
    }

    /// Set the transport type.
    pub fn with_transport(mut self, transport: TransportType) -> Self {
        self.transport = transport;
        self
    }

    /// Override the derived duration with one supplied by the data source.
    pub fn with_duration_minutes(mut self, minutes: u32) -> Self {
        self.duration_minutes = minutes;
        self
    }

    /// Mark the leg as not running on the given weekdays.
    pub fn with_unavailable_days(mut self, days: impl IntoIterator<Item = Weekday>) -> Self {
        self.unavailable_days.extend(days);
        self
    }

    /// Returns the service name (operator, bus or train name).
    pub fn service(&self) -> &str {
        &self.service
    }

    /// Returns the transport type.
    pub fn transport(&self) -> TransportType {
        self.transport
    }

    /// Returns the origin city.
    pub fn origin(&self) -> &City {
        &self.origin
    }

    /// Returns the destination city.
    pub fn destination(&self) -> &City {
        &self.destination
    }

    /// Returns the departure time text as supplied.
    pub fn departure_text(&self) -> &str {
        &self.departure
    }

    /// Returns the arrival time text as supplied.
    pub fn arrival_text(&self) -> &str {
        &self.arrival
    }

    /// Parses the departure time.
    pub fn departure_time(&self) -> Result<ClockTime, TimeError> {
        ClockTime::parse_hhmm(&self.departure)
    }

    /// Parses the arrival time.
    pub fn arrival_time(&self) -> Result<ClockTime, TimeError> {
        ClockTime::parse_hhmm(&self.arrival)
    }

    /// Returns the fare.
    pub fn fare(&self) -> f64 {
        self.fare
    }

    /// Returns the duration in minutes.
    pub fn duration_minutes(&self) -> u32 {
        self.duration_minutes
    }

    /// Returns the duration.
    pub fn duration(&self) -> Duration {
        Duration::minutes(i64::from(self.duration_minutes))
    }

    /// Returns the weekdays on which this leg does not run.
    pub fn unavailable_days(&self) -> &HashSet<Weekday> {
        &self.unavailable_days
    }

    /// Returns true if the leg runs on the given weekday.
    pub fn runs_on(&self, day: Weekday) -> bool {
        !self.unavailable_days.contains(&day)
    }

    /// Returns true if the leg connects two distinct cities and both of
    /// its clock times parse.
    pub fn is_well_formed(&self) -> bool {
        self.origin != self.destination
            && self.departure_time().is_ok()
            && self.arrival_time().is_ok()
    }
}

impl fmt::Display for ScheduleLeg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} → {} ({} - {}) {} {}",
            self.origin, self.destination, self.departure, self.arrival, self.transport, self.service
        )
    }
}
