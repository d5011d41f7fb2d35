//! The normalized event record produced by one parse.

use chrono::{DateTime, Local};
use serde::{Serialize, Serializer};

/// A resolved start or end time for an event.
///
/// Timezone-qualified times that convert successfully become [`Instant`]s;
/// date-only events carry the all-day sentinel; anything that could not be
/// converted keeps its wall-clock string untouched.
///
/// [`Instant`]: EventTime::Instant
#[derive(Debug, Clone, PartialEq)]
pub enum EventTime {
    /// A fully resolved instant, displayed in the viewer's local clock.
    Instant(DateTime<Local>),
    /// The event has no time-of-day component.
    AllDay,
    /// An unconverted wall-clock string such as `14:00`.
    Raw(String),
}

impl EventTime {
    /// Returns whether this is the all-day sentinel.
    #[must_use]
    pub const fn is_all_day(&self) -> bool {
        matches!(self, Self::AllDay)
    }
}

impl std::fmt::Display for EventTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Instant(dt) => write!(f, "{}", dt.format("%H:%M")),
            Self::AllDay => write!(f, "All day"),
            Self::Raw(s) => write!(f, "{s}"),
        }
    }
}

impl Serialize for EventTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Event priority, mapped from the numeric PRIORITY property.
///
/// Values 1-2 are high, 3-5 normal, 6-9 low. Any other token is carried
/// through verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Priority {
    High,
    Normal,
    Low,
    Other(String),
}

impl Priority {
    /// Maps a raw PRIORITY token to a tier.
    #[must_use]
    pub fn from_token(token: &str) -> Self {
        match token {
            "1" | "2" => Self::High,
            "3" | "4" | "5" => Self::Normal,
            "6" | "7" | "8" | "9" => Self::Low,
            other => Self::Other(other.to_string()),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::High => "High",
            Self::Normal => "Normal",
            Self::Low => "Low",
            Self::Other(s) => s,
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for Priority {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// The normalized event record.
///
/// Every field is optional; absent fields are omitted from serialized
/// output. Created once per parse call and immutable afterwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NormalizedEvent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    /// ISO `YYYY-MM-DD`, or the raw token when it could not be normalized.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<EventTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<EventTime>,

    /// Present iff `start_date` parsed as a calendar date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weekday: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub week_number: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub organizer: Option<String>,

    /// Attendee display strings in order of appearance. No dedup.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub participants: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recurrence: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
}

impl NormalizedEvent {
    /// Returns the date range for display: `"d"` when start and end match,
    /// `"d1 - d2"` otherwise.
    #[must_use]
    pub fn date_span(&self) -> Option<String> {
        span(self.start_date.as_deref(), self.end_date.as_deref())
    }

    /// Returns the time range for display, collapsing identical ends.
    #[must_use]
    pub fn time_span(&self) -> Option<String> {
        let start = self.start_time.as_ref().map(ToString::to_string);
        let end = self.end_time.as_ref().map(ToString::to_string);
        span(start.as_deref(), end.as_deref())
    }
}

fn span(start: Option<&str>, end: Option<&str>) -> Option<String> {
    match (start, end) {
        (Some(s), Some(e)) if s == e => Some(s.to_string()),
        (Some(s), Some(e)) => Some(format!("{s} - {e}")),
        (Some(s), None) => Some(s.to_string()),
        (None, _) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_tiers() {
        assert_eq!(Priority::from_token("1"), Priority::High);
        assert_eq!(Priority::from_token("5"), Priority::Normal);
        assert_eq!(Priority::from_token("9"), Priority::Low);
        assert_eq!(
            Priority::from_token("urgent"),
            Priority::Other("urgent".to_string())
        );
        assert_eq!(Priority::from_token("urgent").as_str(), "urgent");
    }

    #[test]
    fn date_span_collapses_equal_dates() {
        let event = NormalizedEvent {
            start_date: Some("2024-03-01".to_string()),
            end_date: Some("2024-03-01".to_string()),
            ..NormalizedEvent::default()
        };
        assert_eq!(event.date_span().as_deref(), Some("2024-03-01"));
    }

    #[test]
    fn date_span_keeps_distinct_dates() {
        let event = NormalizedEvent {
            start_date: Some("2024-03-01".to_string()),
            end_date: Some("2024-03-02".to_string()),
            ..NormalizedEvent::default()
        };
        assert_eq!(event.date_span().as_deref(), Some("2024-03-01 - 2024-03-02"));
    }

    #[test]
    fn all_day_time_span() {
        let event = NormalizedEvent {
            start_time: Some(EventTime::AllDay),
            end_time: Some(EventTime::AllDay),
            ..NormalizedEvent::default()
        };
        assert_eq!(event.time_span().as_deref(), Some("All day"));
    }

    #[test]
    fn absent_fields_are_omitted_from_json() {
        let event = NormalizedEvent {
            summary: Some("Standup".to_string()),
            ..NormalizedEvent::default()
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["summary"], "Standup");
        assert!(json.get("uid").is_none());
        assert!(json.get("participants").is_none());
    }
}
