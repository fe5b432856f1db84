//! Itinerary ranking for search results.

use crate::domain::Itinerary;

/// What to minimise when ordering itineraries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankMetric {
    /// Sum of leg fares.
    TotalFare,
    /// Sum of leg durations.
    TotalDuration,
}

/// Rank itineraries cheapest-first (or fastest-first) by `metric`.
///
/// The sort is stable: itineraries that tie keep the order the search
/// produced them in.
pub fn rank_itineraries(mut itineraries: Vec<Itinerary>, metric: RankMetric) -> Vec<Itinerary> {
    match metric {
        RankMetric::TotalFare => {
            itineraries.sort_by(|a, b| a.total_fare().total_cmp(&b.total_fare()));
        }
        RankMetric::TotalDuration => {
            itineraries.sort_by_key(|itinerary| itinerary.total_duration());
        }
    }

    itineraries
}

/// Rank and keep at most `limit` itineraries, if a limit is given.
pub fn rank_and_truncate(
    itineraries: Vec<Itinerary>,
    metric: RankMetric,
    limit: Option<usize>,
) -> Vec<Itinerary> {
    let mut ranked = rank_itineraries(itineraries, metric);
    if let Some(limit) = limit {
        ranked.truncate(limit);
    }
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ScheduleLeg;
    use chrono::Duration;
    use std::sync::Arc;

    fn direct(service: &str, dep: &str, arr: &str, fare: f64) -> Itinerary {
        let leg = ScheduleLeg::new(service, "A", "B", dep, arr, fare);
        Itinerary::new(vec![Arc::new(leg)]).unwrap()
    }

    fn services(itineraries: &[Itinerary]) -> Vec<&str> {
        itineraries.iter().map(|i| i.legs()[0].service()).collect()
    }

    #[test]
    fn rank_by_fare() {
        let ranked = rank_itineraries(
            vec![
                direct("mid", "08:00", "10:00", 200.0),
                direct("cheap", "08:00", "12:00", 100.0),
                direct("dear", "08:00", "09:00", 300.0),
            ],
            RankMetric::TotalFare,
        );

        assert_eq!(services(&ranked), vec!["cheap", "mid", "dear"]);
    }

    #[test]
    fn rank_by_duration() {
        let ranked = rank_itineraries(
            vec![
                direct("mid", "08:00", "10:00", 200.0),
                direct("slow", "08:00", "12:00", 100.0),
                direct("fast", "08:00", "09:00", 300.0),
            ],
            RankMetric::TotalDuration,
        );

        assert_eq!(services(&ranked), vec!["fast", "mid", "slow"]);
        assert_eq!(ranked[0].total_duration(), Duration::minutes(60));
    }

    #[test]
    fn ties_keep_input_order() {
        let ranked = rank_itineraries(
            vec![
                direct("first", "08:00", "10:00", 100.0),
                direct("second", "09:00", "11:00", 100.0),
                direct("third", "07:00", "09:00", 100.0),
            ],
            RankMetric::TotalFare,
        );
        assert_eq!(services(&ranked), vec!["first", "second", "third"]);

        let ranked = rank_itineraries(ranked, RankMetric::TotalDuration);
        assert_eq!(services(&ranked), vec!["first", "second", "third"]);
    }

    #[test]
    fn truncate_to_limit() {
        let itineraries: Vec<_> = (0..8)
            .map(|i| direct(&format!("s{i}"), "08:00", "10:00", f64::from(8 - i)))
            .collect();

        let ranked = rank_and_truncate(itineraries.clone(), RankMetric::TotalFare, Some(5));
        assert_eq!(ranked.len(), 5);
        assert_eq!(ranked[0].total_fare(), 1.0);

        let ranked = rank_and_truncate(itineraries, RankMetric::TotalFare, None);
        assert_eq!(ranked.len(), 8);
    }

    #[test]
    fn empty_input() {
        assert!(rank_itineraries(vec![], RankMetric::TotalFare).is_empty());
        assert!(rank_and_truncate(vec![], RankMetric::TotalDuration, Some(5)).is_empty());
    }
}
