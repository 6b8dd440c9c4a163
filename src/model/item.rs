// File: ./src/model/item.rs
// Core data types shared across the crate
use crate::date_utils;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// ICS component classification. Only `Event` takes part in resolution;
/// the other kinds are kept so a feed round-trips without surprises.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub enum ComponentKind {
    Event,
    Todo,
    Venue,
    Timezone,
    Alarm,
    Other(String),
}

impl ComponentKind {
    /// ICS component name, used to synthesize keys for UID-less components.
    pub fn tag(&self) -> &str {
        match self {
            Self::Event => "VEVENT",
            Self::Todo => "VTODO",
            Self::Venue => "VVENUE",
            Self::Timezone => "VTIMEZONE",
            Self::Alarm => "VALARM",
            Self::Other(name) => name,
        }
    }
}

/// One parsed entity from the feed, timestamps already normalized to UTC.
///
/// `start` is always present for `Event` components; the adapter drops
/// events it cannot place in time. Text fields are commonly absent.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct FeedComponent {
    pub uid: String,
    pub kind: ComponentKind,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
}

impl FeedComponent {
    pub fn is_event(&self) -> bool {
        self.kind == ComponentKind::Event
    }
}

/// A component selected for display. Rebuilt wholesale on every resolution
/// pass; never patched in place.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct UpcomingEvent {
    pub uid: String,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub start: DateTime<Utc>,
    /// Human label for the start, e.g. "Today at 2:05 PM".
    pub when: String,
}

impl UpcomingEvent {
    /// Project a component for display. `None` when the component carries
    /// no start and therefore cannot be ordered.
    pub fn from_component(component: &FeedComponent, now: DateTime<Utc>) -> Option<Self> {
        let start = component.start?;
        Some(Self {
            uid: component.uid.clone(),
            summary: component.summary.clone(),
            description: component.description.clone(),
            location: component.location.clone(),
            start,
            when: date_utils::format_relative(start, now),
        })
    }
}
