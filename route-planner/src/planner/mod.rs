//! Itinerary planner.
//!
//! This module answers: "which chains of scheduled legs get me from this
//! city to that one?"
//!
//! A `ScheduleIndex` is built once from the flat list of legs and can then be
//! searched any number of times, from any number of threads. Each search
//! enumerates candidate paths under a `SearchPolicy`, checking every transfer
//! with a `ConnectionValidator`, and ranks what it finds.

mod calendar;
mod config;
mod connection;
mod index;
mod progressive;
mod rank;
mod search;

pub use calendar::CalendarSearch;
pub use config::SearchConfig;
pub use connection::{
    ConnectionValidator, DEFAULT_MIN_BUFFER_MINS, is_available, is_valid_transfer, transfer_gap,
};
pub use index::ScheduleIndex;
pub use progressive::ProgressiveSearch;
pub use rank::{RankMetric, rank_and_truncate, rank_itineraries};
pub use search::{
    Deadline, PathEnumerator, PathQuery, Planner, SearchContext, SearchError, SearchPolicy,
    SearchRequest, SearchResult,
};
