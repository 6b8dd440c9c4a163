// File: ./src/model/adapter.rs
// Shapes icalendar's parse output into the component map
use crate::error::{FeedError, FeedResult};
use crate::model::item::{ComponentKind, FeedComponent};
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use icalendar::{Calendar, CalendarComponent, CalendarDateTime, Component, DatePerhapsTime, EventLike};
use std::collections::BTreeMap;

/// Parse normalized feed text into a component map keyed by UID.
///
/// Components without a UID (timezone blocks routinely have none) get a
/// deterministic synthesized key so they stay representable. An empty
/// calendar is an empty map, not an error; a body the parser rejects is.
pub fn parse_components(text: &str) -> FeedResult<BTreeMap<String, FeedComponent>> {
    let calendar: Calendar = text.parse().map_err(FeedError::Parse)?;

    let mut components = BTreeMap::new();
    for (index, comp) in calendar.components.iter().enumerate() {
        let shaped = match comp {
            CalendarComponent::Event(e) => {
                let mut fc = shape(ComponentKind::Event, e, index);
                fc.start = e.get_start().and_then(to_instant);
                fc.end = e.get_end().and_then(to_instant);
                if fc.start.is_none() {
                    // An event we cannot place in time can never be ordered.
                    tracing::warn!(uid = %fc.uid, "dropping event without a usable DTSTART");
                    continue;
                }
                fc
            }
            CalendarComponent::Todo(t) => {
                let mut fc = shape(ComponentKind::Todo, t, index);
                fc.start = t.get_start().and_then(to_instant);
                fc.end = t.get_end().and_then(to_instant);
                fc
            }
            CalendarComponent::Venue(v) => shape(ComponentKind::Venue, v, index),
            CalendarComponent::Other(o) => {
                let kind = match o.component_kind().as_str() {
                    "VTIMEZONE" => ComponentKind::Timezone,
                    "VALARM" => ComponentKind::Alarm,
                    name => ComponentKind::Other(name.to_string()),
                };
                shape(kind, o, index)
            }
            _ => continue,
        };
        components.insert(shaped.uid.clone(), shaped);
    }
    Ok(components)
}

fn shape(kind: ComponentKind, comp: &impl Component, index: usize) -> FeedComponent {
    let uid = comp
        .get_uid()
        .map(str::to_string)
        .unwrap_or_else(|| format!("{}:{}", kind.tag(), index));
    FeedComponent {
        uid,
        summary: comp.get_summary().map(str::to_string),
        description: comp.get_description().map(str::to_string),
        location: comp
            .properties()
            .get("LOCATION")
            .map(|p| p.value().to_string()),
        start: None,
        end: None,
        kind,
    }
}

/// Normalize every ICS timestamp form to one comparable instant type.
///
/// UTC values pass through; TZID-qualified values resolve through chrono-tz;
/// floating values and unknown TZIDs are read in the viewer's local timezone;
/// all-day dates become local midnight.
fn to_instant(dpt: DatePerhapsTime) -> Option<DateTime<Utc>> {
    match dpt {
        DatePerhapsTime::Date(date) => local_midnight(date),
        DatePerhapsTime::DateTime(cdt) => match cdt {
            CalendarDateTime::Utc(dt) => Some(dt),
            CalendarDateTime::Floating(naive) => local_instant(naive),
            CalendarDateTime::WithTimezone { date_time, tzid } => match tzid.parse::<Tz>() {
                Ok(tz) => zoned_instant(date_time, tz),
                Err(_) => {
                    tracing::warn!(%tzid, "unknown TZID, reading as local time");
                    local_instant(date_time)
                }
            },
        },
    }
}

fn local_instant(naive: NaiveDateTime) -> Option<DateTime<Utc>> {
    // earliest() resolves DST gaps/folds to the first valid instant
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
}

fn zoned_instant(naive: NaiveDateTime, tz: Tz) -> Option<DateTime<Utc>> {
    tz.from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
}

fn local_midnight(date: NaiveDate) -> Option<DateTime<Utc>> {
    date.and_hms_opt(0, 0, 0).and_then(local_instant)
}
