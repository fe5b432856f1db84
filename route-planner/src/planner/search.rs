//! Itinerary search.
//!
//! Finds chains of schedule legs from an origin city to a destination city.
//! Two enumeration policies are supported, and they deliberately disagree:
//!
//! - **Progressive widening** looks for direct legs first and only searches
//!   for longer itineraries when no shorter one exists. A cheaper route with
//!   more legs is never considered once a shorter route has been found.
//! - **Exhaustive calendar** enumerates every itinerary up to the leg limit
//!   that runs on a given travel date, mixing leg counts freely.

use std::time::Instant;

use chrono::{Datelike, NaiveDate};
use tracing::debug;

use crate::domain::{Itinerary, canonical_key};

use super::calendar::CalendarSearch;
use super::config::SearchConfig;
use super::connection::ConnectionValidator;
use super::index::ScheduleIndex;
use super::progressive::ProgressiveSearch;
use super::rank::{RankMetric, rank_and_truncate};

/// Error from itinerary search.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    /// The caller's deadline passed before enumeration finished
    #[error("search timed out after exploring {paths_explored} paths")]
    Timeout { paths_explored: usize },
}

/// How candidate itineraries are enumerated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchPolicy {
    /// Shallowest leg count that yields any itinerary wins; ranked by fare.
    ProgressiveWidening,

    /// Every itinerary running on `travel_date`; ranked by duration and
    /// capped.
    ExhaustiveCalendar { travel_date: NaiveDate },
}

impl SearchPolicy {
    /// Pick the policy used for a query with an optional travel date.
    pub fn for_travel_date(travel_date: Option<NaiveDate>) -> Self {
        match travel_date {
            Some(travel_date) => SearchPolicy::ExhaustiveCalendar { travel_date },
            None => SearchPolicy::ProgressiveWidening,
        }
    }

    /// Returns the metric results are ranked by.
    pub fn metric(&self) -> RankMetric {
        match self {
            SearchPolicy::ProgressiveWidening => RankMetric::TotalFare,
            SearchPolicy::ExhaustiveCalendar { .. } => RankMetric::TotalDuration,
        }
    }

    /// Returns the maximum number of results kept, if any.
    pub fn result_limit(&self, config: &SearchConfig) -> Option<usize> {
        match self {
            SearchPolicy::ProgressiveWidening => None,
            SearchPolicy::ExhaustiveCalendar { .. } => Some(config.calendar_max_results),
        }
    }
}

/// Request for itinerary search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    /// Where the trip starts (any case).
    pub origin: String,

    /// Where the trip ends (any case).
    pub destination: String,

    /// Maximum number of legs in an itinerary.
    pub max_legs: usize,

    /// Enumeration policy.
    pub policy: SearchPolicy,
}

impl SearchRequest {
    /// Create a new search request.
    pub fn new(
        origin: impl Into<String>,
        destination: impl Into<String>,
        max_legs: usize,
        policy: SearchPolicy,
    ) -> Self {
        Self {
            origin: origin.into(),
            destination: destination.into(),
            max_legs,
            policy,
        }
    }
}

/// Result of itinerary search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    /// Found itineraries, ranked best-first.
    pub itineraries: Vec<Itinerary>,

    /// Number of partial paths examined during search.
    pub paths_explored: usize,
}

impl SearchResult {
    /// Create an empty result.
    pub fn empty() -> Self {
        Self {
            itineraries: Vec::new(),
            paths_explored: 0,
        }
    }
}

/// A point in time after which search gives up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deadline(Instant);

impl Deadline {
    /// A deadline at the given instant.
    pub fn at(instant: Instant) -> Self {
        Self(instant)
    }

    /// A deadline `timeout` from now.
    pub fn after(timeout: std::time::Duration) -> Self {
        Self(Instant::now() + timeout)
    }

    /// Returns true once the deadline has passed.
    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.0
    }
}

/// Canonicalized endpoints and bound for one enumeration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathQuery {
    /// Canonical origin key.
    pub origin: String,
    /// Canonical destination key.
    pub destination: String,
    /// Maximum number of legs.
    pub max_legs: usize,
}

impl PathQuery {
    /// Build a query from raw city names.
    pub fn new(origin: &str, destination: &str, max_legs: usize) -> Self {
        Self {
            origin: canonical_key(origin),
            destination: canonical_key(destination),
            max_legs,
        }
    }
}

/// Shared state for a single enumeration: the index, the transfer rules,
/// and the exploration budget.
pub struct SearchContext<'a> {
    /// Index being searched.
    pub index: &'a ScheduleIndex,

    /// Transfer rules.
    pub validator: ConnectionValidator,

    deadline: Option<Deadline>,
    paths_explored: usize,
}

impl<'a> SearchContext<'a> {
    /// Create a context with no deadline.
    pub fn new(index: &'a ScheduleIndex, validator: ConnectionValidator) -> Self {
        Self {
            index,
            validator,
            deadline: None,
            paths_explored: 0,
        }
    }

    /// Abort enumeration once `deadline` passes.
    pub fn with_deadline(mut self, deadline: Option<Deadline>) -> Self {
        self.deadline = deadline;
        self
    }

    /// Record that one more partial path is being examined.
    ///
    /// Fails if the deadline has passed.
    pub fn explore(&mut self) -> Result<(), SearchError> {
        self.paths_explored += 1;
        match self.deadline {
            Some(deadline) if deadline.is_expired() => Err(SearchError::Timeout {
                paths_explored: self.paths_explored,
            }),
            _ => Ok(()),
        }
    }

    /// Returns the number of partial paths examined so far.
    pub fn paths_explored(&self) -> usize {
        self.paths_explored
    }
}

/// A strategy for enumerating candidate itineraries.
///
/// Implementations return itineraries in discovery order; ranking happens
/// afterwards.
pub trait PathEnumerator {
    /// Enumerate itineraries from `query.origin` to `query.destination`.
    fn enumerate(
        &self,
        query: &PathQuery,
        ctx: &mut SearchContext<'_>,
    ) -> Result<Vec<Itinerary>, SearchError>;
}

/// Itinerary planner over a schedule index.
pub struct Planner<'a> {
    index: &'a ScheduleIndex,
    config: &'a SearchConfig,
}

impl<'a> Planner<'a> {
    /// Create a new planner.
    pub fn new(index: &'a ScheduleIndex, config: &'a SearchConfig) -> Self {
        Self { index, config }
    }

    /// Find ranked itineraries for a request.
    ///
    /// Unknown cities, an empty schedule or an unsatisfiable request all
    /// produce an empty list.
    ///
    /// # Examples
    ///
    /// ```
    /// use route_planner::domain::ScheduleLeg;
    /// use route_planner::planner::{Planner, ScheduleIndex, SearchConfig, SearchPolicy, SearchRequest};
    ///
    /// let index = ScheduleIndex::build(vec![
    ///     ScheduleLeg::new("Ena", "A", "B", "08:00", "10:00", 100.0),
    ///     ScheduleLeg::new("Tisha", "B", "C", "10:45", "13:00", 50.0),
    /// ]);
    /// let config = SearchConfig::default();
    /// let planner = Planner::new(&index, &config);
    ///
    /// let request = SearchRequest::new("a", "c", 2, SearchPolicy::ProgressiveWidening);
    /// let itineraries = planner.find(&request);
    ///
    /// assert_eq!(itineraries.len(), 1);
    /// assert_eq!(itineraries[0].total_fare(), 150.0);
    /// ```
    pub fn find(&self, request: &SearchRequest) -> Vec<Itinerary> {
        self.search(request, None)
            .map(|result| result.itineraries)
            .unwrap_or_default()
    }

    /// Search for itineraries, giving up if `deadline` passes first.
    pub fn search(
        &self,
        request: &SearchRequest,
        deadline: Option<Deadline>,
    ) -> Result<SearchResult, SearchError> {
        let query = PathQuery::new(&request.origin, &request.destination, request.max_legs);

        if query.max_legs == 0
            || query.origin.is_empty()
            || query.destination.is_empty()
            || query.origin == query.destination
        {
            debug!(
                origin = %query.origin,
                destination = %query.destination,
                max_legs = query.max_legs,
                "Search request cannot match any itinerary"
            );
            return Ok(SearchResult::empty());
        }

        let validator = ConnectionValidator::new(self.config.min_connection())
            .with_max_layover(self.config.max_layover());
        let mut ctx = SearchContext::new(self.index, validator).with_deadline(deadline);

        let candidates = match request.policy {
            SearchPolicy::ProgressiveWidening => ProgressiveSearch.enumerate(&query, &mut ctx)?,
            SearchPolicy::ExhaustiveCalendar { travel_date } => {
                CalendarSearch::new(travel_date.weekday()).enumerate(&query, &mut ctx)?
            }
        };

        let candidate_count = candidates.len();
        let itineraries = rank_and_truncate(
            candidates,
            request.policy.metric(),
            request.policy.result_limit(self.config),
        );

        debug!(
            origin = %query.origin,
            destination = %query.destination,
            policy = ?request.policy,
            candidates = candidate_count,
            returned = itineraries.len(),
            paths_explored = ctx.paths_explored(),
            "Itinerary search complete"
        );

        Ok(SearchResult {
            itineraries,
            paths_explored: ctx.paths_explored(),
        })
    }
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod search_tests;
