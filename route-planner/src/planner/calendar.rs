//! Exhaustive calendar enumeration.
//!
//! Breadth-first search over every leg that runs on the travel weekday,
//! collecting itineraries of every length up to the leg limit.

use std::collections::{HashSet, VecDeque};
use std::sync::Arc;

use chrono::Weekday;
use tracing::{debug, trace};

use crate::domain::{Itinerary, ScheduleLeg};

use super::search::{PathEnumerator, PathQuery, SearchContext, SearchError};

/// BFS state: partial itinerary ending at a city.
#[derive(Clone)]
struct CalendarState {
    city: String,
    legs: Vec<Arc<ScheduleLeg>>,
    visited: HashSet<String>,
}

/// Enumerates all itineraries running on one weekday.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarSearch {
    weekday: Weekday,
}

impl CalendarSearch {
    /// Create a calendar search for legs running on `weekday`.
    pub fn new(weekday: Weekday) -> Self {
        Self { weekday }
    }
}

impl PathEnumerator for CalendarSearch {
    fn enumerate(
        &self,
        query: &PathQuery,
        ctx: &mut SearchContext<'_>,
    ) -> Result<Vec<Itinerary>, SearchError> {
        let index = ctx.index;
        let mut found = Vec::new();
        let mut skipped_off_day = 0usize;

        let mut queue = VecDeque::from([CalendarState {
            city: query.origin.clone(),
            legs: Vec::new(),
            visited: HashSet::from([query.origin.clone()]),
        }]);

        while let Some(state) = queue.pop_front() {
            ctx.explore()?;

            for leg in index.outbound_by_key(&state.city) {
                if !ctx.validator.is_available(leg, self.weekday) {
                    trace!(service = leg.service(), from = %leg.origin(), "Leg not running");
                    skipped_off_day += 1;
                    continue;
                }

                let next = leg.destination().key();
                if state.visited.contains(next) {
                    continue;
                }
                if let Some(prev) = state.legs.last() {
                    if !ctx.validator.is_valid_transfer(prev, leg) {
                        continue;
                    }
                }

                let mut legs = state.legs.clone();
                legs.push(Arc::clone(leg));

                if next == query.destination {
                    match Itinerary::new(legs) {
                        Ok(itinerary) => found.push(itinerary),
                        Err(e) => trace!(error = %e, "Discarding malformed path"),
                    }
                } else if legs.len() < query.max_legs {
                    let mut visited = state.visited.clone();
                    visited.insert(next.to_string());
                    queue.push_back(CalendarState {
                        city: next.to_string(),
                        legs,
                        visited,
                    });
                }
            }
        }

        debug!(
            weekday = %self.weekday,
            found = found.len(),
            skipped_off_day,
            paths_explored = ctx.paths_explored(),
            "Calendar search complete"
        );

        Ok(found)
    }
}
