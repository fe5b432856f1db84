//! Search configuration for the itinerary planner.

use chrono::Duration;

/// Configuration parameters for itinerary search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    /// Minimum time required between arriving on one leg and departing on
    /// the next (minutes). Connections tighter than this are rejected.
    pub min_connection_mins: i64,

    /// Longest wait allowed between legs (minutes), if any.
    pub max_layover_mins: Option<i64>,

    /// Largest number of legs a caller should ask for.
    pub max_legs: usize,

    /// Number of itineraries kept by the calendar search after ranking.
    pub calendar_max_results: usize,
}

impl SearchConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(
        min_connection_mins: i64,
        max_layover_mins: Option<i64>,
        max_legs: usize,
        calendar_max_results: usize,
    ) -> Self {
        Self {
            min_connection_mins,
            max_layover_mins,
            max_legs,
            calendar_max_results,
        }
    }

    /// Returns the minimum connection time as a Duration.
    pub fn min_connection(&self) -> Duration {
        Duration::minutes(self.min_connection_mins)
    }

    /// Returns the maximum layover as a Duration, if one is set.
    pub fn max_layover(&self) -> Option<Duration> {
        self.max_layover_mins.map(Duration::minutes)
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            min_connection_mins: 30,
            max_layover_mins: None,
            max_legs: 3,
            calendar_max_results: 5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = SearchConfig::default();

        assert_eq!(config.min_connection_mins, 30);
        assert_eq!(config.max_layover_mins, None);
        assert_eq!(config.max_legs, 3);
        assert_eq!(config.calendar_max_results, 5);
    }

    #[test]
    fn duration_methods() {
        let config = SearchConfig::default();
        assert_eq!(config.min_connection(), Duration::minutes(30));
        assert_eq!(config.max_layover(), None);

        let config = SearchConfig::new(15, Some(720), 3, 5);
        assert_eq!(config.min_connection(), Duration::minutes(15));
        assert_eq!(config.max_layover(), Some(Duration::hours(12)));
    }

    #[test]
    fn custom_config() {
        let config = SearchConfig::new(20, Some(240), 2, 10);

        assert_eq!(config.min_connection_mins, 20);
        assert_eq!(config.max_layover_mins, Some(240));
        assert_eq!(config.max_legs, 2);
        assert_eq!(config.calendar_max_results, 10);
    }
}
