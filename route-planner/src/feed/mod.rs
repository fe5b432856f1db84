//! Schedule feed loading.
//!
//! Reads the unified bus/train schedule (a JSON array of records) and turns
//! it into schedule legs ready for indexing.

mod convert;
mod types;

use std::path::Path;

use tracing::debug;

use crate::domain::ScheduleLeg;

pub use types::ScheduleRecord;

/// Errors from reading a schedule feed.
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    /// The feed file could not be read
    #[error("failed to read schedule file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The feed is not a JSON array of schedule records
    #[error("invalid schedule JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Parse a schedule from JSON text.
///
/// Records are converted in order. Individual records with unusable times
/// or unknown days are kept; only JSON that doesn't match the record shape
/// is an error.
///
/// # Examples
///
/// ```
/// use route_planner::feed::parse_schedule;
///
/// let legs = parse_schedule(r#"[
///     {"type": "bus", "name": "Hanif", "start": "Dhaka", "destination": "Sylhet",
///      "startTime": "08:00", "arrivalTime": "13:30", "fare": 700}
/// ]"#).unwrap();
///
/// assert_eq!(legs.len(), 1);
/// assert_eq!(legs[0].duration_minutes(), 330);
/// ```
pub fn parse_schedule(json: &str) -> Result<Vec<ScheduleLeg>, FeedError> {
    let records: Vec<ScheduleRecord> = serde_json::from_str(json)?;
    let legs: Vec<ScheduleLeg> = records.into_iter().map(ScheduleLeg::from).collect();

    let malformed = legs.iter().filter(|leg| !leg.is_well_formed()).count();
    debug!(legs = legs.len(), malformed, "Parsed schedule feed");

    Ok(legs)
}

/// Load a schedule from a JSON file.
pub fn load_schedule(path: impl AsRef<Path>) -> Result<Vec<ScheduleLeg>, FeedError> {
    let path = path.as_ref();
    let data = std::fs::read_to_string(path).map_err(|source| FeedError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_schedule(&data)
}
