//! Schedule index for itinerary search.
//!
//! Every leg departs from exactly one city, so the schedule becomes an
//! adjacency list keyed by canonical origin. Search only ever asks "what
//! leaves from here?", which this answers in O(1).

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tracing::debug;

use crate::domain::{ScheduleLeg, canonical_key};

/// Outbound legs from every city in a schedule.
///
/// An index is immutable once built. It can be kept by the caller as a
/// snapshot of a dataset and shared between threads for concurrent searches.
#[derive(Debug, Default)]
pub struct ScheduleIndex {
    /// Map from canonical origin -> legs departing from it, in input order.
    outbound: HashMap<String, Vec<Arc<ScheduleLeg>>>,

    /// Every city name, as first written, in first-seen order.
    cities: Vec<String>,

    /// Canonical keys of `cities`.
    city_keys: HashSet<String>,

    /// Total number of indexed legs.
    leg_count: usize,
}

impl ScheduleIndex {
    /// Build an index from a flat list of legs.
    ///
    /// Legs are never rejected here, even malformed ones; they are simply
    /// never matched as usable connections during search.
    ///
    /// # Examples
    ///
    /// ```
    /// use route_planner::domain::ScheduleLeg;
    /// use route_planner::planner::ScheduleIndex;
    ///
    /// let index = ScheduleIndex::build(vec![
    ///     ScheduleLeg::new("Ena", "Dhaka", "Comilla", "08:00", "10:00", 100.0),
    ///     ScheduleLeg::new("Tisha", "comilla", "Feni", "10:45", "12:00", 50.0),
    /// ]);
    ///
    /// assert_eq!(index.outbound_from("COMILLA").len(), 1);
    /// assert!(index.outbound_from("Feni").is_empty());
    /// assert_eq!(index.all_cities(), ["Dhaka", "Comilla", "Feni"]);
    /// ```
    pub fn build(legs: impl IntoIterator<Item = ScheduleLeg>) -> Self {
        let mut index = Self::default();

        for leg in legs {
            index.record_city(leg.origin().name());
            index.record_city(leg.destination().name());

            index
                .outbound
                .entry(leg.origin().key().to_string())
                .or_default()
                .push(Arc::new(leg));
            index.leg_count += 1;
        }

        debug!(
            cities = index.cities.len(),
            origins = index.outbound.len(),
            legs = index.leg_count,
            "Schedule index built"
        );

        index
    }

    fn record_city(&mut self, name: &str) {
        if self.city_keys.insert(canonical_key(name)) {
            self.cities.push(name.trim().to_string());
        }
    }

    /// Get the legs departing from a city, matched case-insensitively.
    ///
    /// Unknown cities have no outbound legs.
    pub fn outbound_from(&self, city: &str) -> &[Arc<ScheduleLeg>] {
        self.outbound_by_key(&canonical_key(city))
    }

    /// Get the legs departing from a city by canonical key.
    pub(crate) fn outbound_by_key(&self, key: &str) -> &[Arc<ScheduleLeg>] {
        self.outbound.get(key).map(|v| v.as_slice()).unwrap_or(&[])
    }

    /// Every city appearing as an origin or destination, spelled as first
    /// seen and in first-seen order.
    pub fn all_cities(&self) -> &[String] {
        &self.cities
    }

    /// Check whether a city appears anywhere in the schedule.
    pub fn contains_city(&self, city: &str) -> bool {
        self.city_keys.contains(&canonical_key(city))
    }

    /// Get the number of distinct cities.
    pub fn city_count(&self) -> usize {
        self.cities.len()
    }

    /// Get the total number of indexed legs.
    pub fn leg_count(&self) -> usize {
        self.leg_count
    }

    /// Returns true if the index holds no legs.
    pub fn is_empty(&self) -> bool {
        self.leg_count == 0
    }
}
