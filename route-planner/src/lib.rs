//! Bus and train itinerary planner.
//!
//! Answers: "which scheduled legs, taken back to back, get me from this
//! city to that one?"

pub mod domain;
pub mod feed;
pub mod planner;
