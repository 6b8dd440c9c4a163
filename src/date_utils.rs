// File: src/date_utils.rs
// Human-relative start labels: "Today at 2:05 PM", "Tomorrow at ...", weekday names
use chrono::{DateTime, Duration, Local, NaiveDateTime, Utc};

/// Label an event start relative to `now`, in the viewer's local timezone.
///
/// The comparison is calendar-day identity (year-month-day), never elapsed
/// hours: an event at 11:59pm is "Today" from 12:01am the same day. Anything
/// past tomorrow gets the full weekday name; with only the nearest few events
/// ever shown, that is never ambiguous.
pub fn format_relative(start: DateTime<Utc>, now: DateTime<Utc>) -> String {
    format_relative_naive(
        start.with_timezone(&Local).naive_local(),
        now.with_timezone(&Local).naive_local(),
    )
}

fn format_relative_naive(start: NaiveDateTime, now: NaiveDateTime) -> String {
    let time = start.format("%-I:%M %p");
    let today = now.date();

    if start.date() == today {
        format!("Today at {}", time)
    } else if start.date() == today + Duration::days(1) {
        format!("Tomorrow at {}", time)
    } else {
        format!("{} at {}", start.format("%A"), time)
    }
}
