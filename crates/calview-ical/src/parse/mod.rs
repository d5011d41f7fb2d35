//! Event assembly: one blob in, one normalized record out.

mod datetime;
mod fields;
mod rrule;
mod unfold;

use crate::error::{ParseError, ParseResult};
use crate::event::NormalizedEvent;
use crate::tz::TzResolver;

/// Parses a calendar blob into a normalized event record.
///
/// The blob is validated, un-folded once, and run through every field
/// extractor, the date/time resolver, and the recurrence decoder. Missing
/// fields stay absent; timezone or date problems degrade the affected
/// field instead of failing the parse.
///
/// ## Errors
///
/// Only [`ParseError::Empty`] (no input) and [`ParseError::NotACalendar`]
/// (no recognized begin marker) prevent a record from being produced.
#[tracing::instrument(skip(blob, tz), fields(blob_len = blob.len()))]
pub fn parse(blob: &str, tz: &TzResolver) -> ParseResult<NormalizedEvent> {
    validate(blob)?;

    let text = unfold::unfold_attendees(blob);
    tracing::debug!("Blob validated and unfolded");

    let schedule = datetime::resolve(&text, tz);

    let event = NormalizedEvent {
        summary: fields::summary(&text),
        start_date: schedule.start_date,
        end_date: schedule.end_date,
        start_time: schedule.start_time,
        end_time: schedule.end_time,
        weekday: schedule.weekday,
        week_number: schedule.week_number,
        organizer: Some(fields::organizer(&text)),
        participants: fields::participants(&text),
        description: fields::description(&text),
        location: fields::location(&text),
        uid: fields::uid(&text),
        recurrence: first_event_component(&text).and_then(recurrence),
        status: fields::status(&text),
        priority: fields::priority(&text),
    };

    tracing::debug!(summary = ?event.summary, "Event assembled");
    Ok(event)
}

/// The validity gate: non-empty input with a calendar or event marker.
fn validate(blob: &str) -> ParseResult<()> {
    if blob.is_empty() {
        return Err(ParseError::Empty);
    }
    if !blob.contains("BEGIN:VCALENDAR") && !blob.contains("BEGIN:VEVENT") {
        return Err(ParseError::NotACalendar);
    }
    Ok(())
}

/// Slices out the first `BEGIN:VEVENT`..`END:VEVENT` component.
///
/// Recurrence lookup is scoped to this slice, so an RRULE in a second
/// (unsupported) event component is not considered.
fn first_event_component(text: &str) -> Option<&str> {
    let start = text.find("BEGIN:VEVENT")? + "BEGIN:VEVENT".len();
    let end = text[start..].find("END:VEVENT")?;
    Some(&text[start..start + end])
}

/// Decodes the first RRULE line of an event component.
fn recurrence(component: &str) -> Option<String> {
    component
        .lines()
        .map(|line| line.trim_end_matches('\r'))
        .find_map(|line| line.strip_prefix("RRULE:"))
        .and_then(rrule::decode)
}
