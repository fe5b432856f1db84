//! Progressive-widening enumeration.
//!
//! Runs an exact-depth depth-first search for one leg, then two, and so on
//! up to the limit, stopping at the first depth that yields anything.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::domain::{Itinerary, ScheduleLeg};

use super::search::{PathEnumerator, PathQuery, SearchContext, SearchError};

/// Shallowest-first enumeration.
///
/// Results all have the same leg count. Legs are not filtered by weekday.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProgressiveSearch;

impl PathEnumerator for ProgressiveSearch {
    fn enumerate(
        &self,
        query: &PathQuery,
        ctx: &mut SearchContext<'_>,
    ) -> Result<Vec<Itinerary>, SearchError> {
        // A path without repeated cities has at most one leg fewer than
        // there are cities
        let deepest = query
            .max_legs
            .min(ctx.index.city_count().saturating_sub(1));

        for depth in 1..=deepest {
            let mut found = Vec::new();
            let mut path = Vec::with_capacity(depth);
            let mut visited = HashSet::from([query.origin.clone()]);

            self.extend(
                query,
                ctx,
                &query.origin,
                depth,
                &mut path,
                &mut visited,
                &mut found,
            )?;

            debug!(
                depth,
                found = found.len(),
                paths_explored = ctx.paths_explored(),
                "Progressive search depth complete"
            );

            if !found.is_empty() {
                return Ok(found);
            }
        }

        Ok(Vec::new())
    }
}

impl ProgressiveSearch {
    /// Extend `path` from `current` until it holds exactly `depth` legs.
    #[allow(clippy::too_many_arguments)]
    fn extend(
        &self,
        query: &PathQuery,
        ctx: &mut SearchContext<'_>,
        current: &str,
        depth: usize,
        path: &mut Vec<Arc<ScheduleLeg>>,
        visited: &mut HashSet<String>,
        found: &mut Vec<Itinerary>,
    ) -> Result<(), SearchError> {
        ctx.explore()?;

        let index = ctx.index;
        let is_last_leg = path.len() + 1 == depth;

        for leg in index.outbound_by_key(current) {
            let next = leg.destination().key();

            if visited.contains(next) {
                continue;
            }
            if let Some(prev) = path.last() {
                if !ctx.validator.is_valid_transfer(prev, leg) {
                    continue;
                }
            }

            if is_last_leg {
                if next != query.destination {
                    continue;
                }
                path.push(Arc::clone(leg));
                match Itinerary::new(path.clone()) {
                    Ok(itinerary) => found.push(itinerary),
                    Err(e) => trace!(error = %e, "Discarding malformed path"),
                }
                path.pop();
            } else {
                // The destination ends a trip; never pass through it
                if next == query.destination {
                    continue;
                }
                path.push(Arc::clone(leg));
                visited.insert(next.to_string());
                self.extend(query, ctx, next, depth, path, visited, found)?;
                visited.remove(next);
                path.pop();
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::{ConnectionValidator, ScheduleIndex};

    fn leg(service: &str, from: &str, to: &str, dep: &str, arr: &str, fare: f64) -> ScheduleLeg {
        ScheduleLeg::new(service, from, to, dep, arr, fare)
    }

    fn run(index: &ScheduleIndex, from: &str, to: &str, max_legs: usize) -> Vec<Itinerary> {
        let mut ctx = SearchContext::new(index, ConnectionValidator::default());
        ProgressiveSearch
            .enumerate(&PathQuery::new(from, to, max_legs), &mut ctx)
            .unwrap()
    }

    #[test]
    fn stops_at_first_productive_depth() {
        let index = ScheduleIndex::build(vec![
            leg("Direct", "A", "C", "08:00", "12:00", 500.0),
            leg("First", "A", "B", "08:00", "09:00", 10.0),
            leg("Second", "B", "C", "10:00", "11:00", 10.0),
        ]);

        let found = run(&index, "A", "C", 3);
        assert_eq!(found.len(), 1);
        assert!(found[0].is_direct());
    }

    #[test]
    fn widens_when_shallower_depth_is_empty() {
        let index = ScheduleIndex::build(vec![
            leg("First", "A", "B", "08:00", "09:00", 10.0),
            leg("Second", "B", "C", "10:00", "11:00", 10.0),
            leg("Third", "C", "D", "12:00", "13:00", 10.0),
        ]);

        assert!(run(&index, "A", "D", 2).is_empty());

        let found = run(&index, "A", "D", 3);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].leg_count(), 3);
    }

    #[test]
    fn malformed_leg_is_direct_only() {
        let index = ScheduleIndex::build(vec![
            leg("Broken", "A", "B", "8am", "09:00", 10.0),
            leg("Onward", "B", "C", "10:00", "11:00", 10.0),
        ]);

        let direct = run(&index, "A", "B", 3);
        assert_eq!(direct.len(), 1);
        assert_eq!(direct[0].legs()[0].service(), "Broken");

        assert!(run(&index, "A", "C", 3).is_empty());
    }

    #[test]
    fn does_not_return_to_origin() {
        let index = ScheduleIndex::build(vec![
            leg("Out", "A", "B", "08:00", "09:00", 10.0),
            leg("Back", "B", "A", "10:00", "11:00", 10.0),
            leg("Again", "A", "C", "12:00", "13:00", 10.0),
        ]);

        assert_eq!(run(&index, "A", "C", 3).len(), 1);
        assert_eq!(run(&index, "B", "C", 3).len(), 1);
        assert!(run(&index, "A", "A", 3).is_empty());
    }

    #[test]
    fn depth_bounded_by_city_count() {
        // 10 minute transfer at B: no route, at any depth
        let index = ScheduleIndex::build(vec![
            leg("First", "A", "B", "08:00", "10:00", 10.0),
            leg("Second", "B", "C", "10:10", "11:00", 10.0),
        ]);

        let explored = |max_legs| {
            let mut ctx = SearchContext::new(&index, ConnectionValidator::default());
            let found = ProgressiveSearch
                .enumerate(&PathQuery::new("A", "C", max_legs), &mut ctx)
                .unwrap();
            assert!(found.is_empty());
            ctx.paths_explored()
        };

        assert_eq!(explored(2), 3);
        assert_eq!(explored(1_000), 3);
        assert_eq!(explored(usize::MAX), 3);
    }

    #[test]
    fn counts_explored_paths() {
        let index = ScheduleIndex::build(vec![leg("Direct", "A", "B", "08:00", "09:00", 10.0)]);
        let mut ctx = SearchContext::new(&index, ConnectionValidator::default());

        ProgressiveSearch
            .enumerate(&PathQuery::new("A", "B", 3), &mut ctx)
            .unwrap();
        assert_eq!(ctx.paths_explored(), 1);
    }
}
