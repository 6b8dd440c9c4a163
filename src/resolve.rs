// File: ./src/resolve.rs
// Filter-sort-limit pass that turns the component map into the "next up" list
use crate::model::{FeedComponent, UpcomingEvent};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

/// Select the next `limit` upcoming events from a parsed component map.
///
/// Keeps event components starting strictly after `now` (an event starting
/// exactly at `now` is no longer "upcoming"), sorted ascending by start.
/// The sort is stable and the map iterates in key order, so ties keep a
/// deterministic order without reading meaning into them. Pure: safe to call
/// repeatedly with any `now`.
pub fn resolve_next(
    components: &BTreeMap<String, FeedComponent>,
    now: DateTime<Utc>,
    limit: usize,
) -> Vec<UpcomingEvent> {
    let mut upcoming: Vec<&FeedComponent> = components
        .values()
        .filter(|c| c.is_event())
        .filter(|c| c.start.is_some_and(|start| start > now))
        .collect();
    upcoming.sort_by_key(|c| c.start);

    upcoming
        .into_iter()
        .take(limit)
        .filter_map(|c| UpcomingEvent::from_component(c, now))
        .collect()
}
