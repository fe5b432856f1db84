//! Domain types for the route planner.
//!
//! This module contains the schedule and itinerary types the planner works
//! with. Legs are accepted as the data source supplies them; itineraries
//! enforce their structural invariants at construction time.

mod city;
mod error;
mod itinerary;
mod leg;
mod time;

pub use city::{City, canonical_key};
pub use error::DomainError;
pub use itinerary::Itinerary;
pub use leg::{ScheduleLeg, TransportType, parse_weekday};
pub use time::{
    ClockTime, MINUTES_PER_DAY, TimeError, duration_between, format_duration,
    parse_duration_label,
};
