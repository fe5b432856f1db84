//! Itinerary types.
//!
//! An `Itinerary` is a complete trip from origin to destination made of one
//! or more schedule legs taken back to back.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use chrono::Duration;

use super::{City, DomainError, ScheduleLeg};

/// A chain of legs from an origin to a destination.
///
/// Legs are held behind `Arc` so that partial paths can be cloned cheaply
/// while a search branches.
///
/// # Invariants
///
/// - At least one leg
/// - Consecutive legs connect (destination of one = origin of the next)
/// - No city is visited twice
///
/// Transfer buffers are not checked here: the minimum connection time is
/// search configuration, not a property of the legs themselves.
#[derive(Debug, Clone, PartialEq)]
pub struct Itinerary {
    legs: Vec<Arc<ScheduleLeg>>,
}

impl Itinerary {
    /// Construct an itinerary, validating the structural invariants.
    ///
    /// # Errors
    ///
    /// Returns `Err` if:
    /// - `legs` is empty
    /// - Consecutive legs don't share a city
    /// - Any city is visited more than once
    ///
    /// # Examples
    ///
    /// ```
    /// use route_planner::domain::{Itinerary, ScheduleLeg};
    /// use std::sync::Arc;
    ///
    /// let first = Arc::new(ScheduleLeg::new("Ena", "Dhaka", "Comilla", "08:00", "10:00", 100.0));
    /// let second = Arc::new(ScheduleLeg::new("Tisha", "Comilla", "Feni", "10:45", "12:00", 50.0));
    ///
    /// let itinerary = Itinerary::new(vec![first, second]).unwrap();
    ///
    /// assert_eq!(itinerary.leg_count(), 2);
    /// assert_eq!(itinerary.total_fare(), 150.0);
    /// assert_eq!(itinerary.to_string(), "Dhaka → Comilla → Feni");
    /// ```
    pub fn new(legs: Vec<Arc<ScheduleLeg>>) -> Result<Self, DomainError> {
        let first = legs.first().ok_or(DomainError::EmptyItinerary)?;

        for window in legs.windows(2) {
            let prev_dest = window[0].destination();
            let next_origin = window[1].origin();
            if prev_dest != next_origin {
                return Err(DomainError::LegsNotConnected(
                    prev_dest.clone(),
                    next_origin.clone(),
                ));
            }
        }

        let mut visited: HashSet<&City> = HashSet::with_capacity(legs.len() + 1);
        visited.insert(first.origin());
        for leg in &legs {
            if !visited.insert(leg.destination()) {
                return Err(DomainError::RepeatedCity(leg.destination().clone()));
            }
        }

        Ok(Itinerary { legs })
    }

    /// Returns all legs in order.
    pub fn legs(&self) -> &[Arc<ScheduleLeg>] {
        &self.legs
    }

    /// Returns the number of legs.
    pub fn leg_count(&self) -> usize {
        self.legs.len()
    }

    /// Returns the number of transfers (legs - 1).
    pub fn transfer_count(&self) -> usize {
        self.leg_count().saturating_sub(1)
    }

    /// Returns true if this is a single-leg itinerary.
    pub fn is_direct(&self) -> bool {
        self.leg_count() == 1
    }

    /// Returns the origin city.
    pub fn origin(&self) -> &City {
        // Safe: validated non-empty at construction
        self.legs[0].origin()
    }

    /// Returns the destination city.
    pub fn destination(&self) -> &City {
        // Safe: validated non-empty at construction
        self.legs[self.legs.len() - 1].destination()
    }

    /// Returns every city along the way, origin first.
    pub fn cities(&self) -> impl Iterator<Item = &City> {
        std::iter::once(self.origin()).chain(self.legs.iter().map(|leg| leg.destination()))
    }

    /// Returns the sum of leg fares.
    pub fn total_fare(&self) -> f64 {
        self.legs.iter().map(|leg| leg.fare()).sum()
    }

    /// Returns the sum of leg durations.
    ///
    /// Waiting time between legs is not included.
    pub fn total_duration(&self) -> Duration {
        self.legs.iter().map(|leg| leg.duration()).sum()
    }

    /// Returns the departure time text of the first leg.
    pub fn departure_text(&self) -> &str {
        self.legs[0].departure_text()
    }

    /// Returns the arrival time text of the last leg.
    pub fn arrival_text(&self) -> &str {
        self.legs[self.legs.len() - 1].arrival_text()
    }
}

impl fmt::Display for Itinerary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for city in self.cities() {
            if !first {
                f.write_str(" → ")?;
            }
            write!(f, "{city}")?;
            first = false;
        }
        Ok(())
    }
}
