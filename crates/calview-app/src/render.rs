//! Presentation of a normalized event record.
//!
//! Pure formatting: the record goes in, text comes out. Three modes are
//! supported, selected on the command line.

use calview_ical::NormalizedEvent;
use clap::ValueEnum;

/// Output mode for the rendered event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// Labeled multi-line form for reading in a terminal or mail client.
    Human,
    /// One-line summary plus location/organizer.
    Compact,
    /// Machine-readable JSON mirroring the record fields.
    Json,
}

/// Renders an event in the requested format.
///
/// `verbose` controls whether the UID is echoed in human mode.
///
/// ## Errors
///
/// Returns an error only when JSON serialization fails.
pub fn render(event: &NormalizedEvent, format: Format, verbose: bool) -> serde_json::Result<String> {
    match format {
        Format::Human => Ok(render_human(event, verbose)),
        Format::Compact => Ok(render_compact(event)),
        Format::Json => serde_json::to_string_pretty(event),
    }
}

fn render_human(event: &NormalizedEvent, verbose: bool) -> String {
    let mut out: Vec<String> = Vec::new();

    if let Some(summary) = &event.summary {
        out.push(format!("WHAT: {summary}"));
    }

    if let Some(dates) = event.date_span() {
        let mut when = dates;
        if let (Some(weekday), Some(week)) = (&event.weekday, &event.week_number) {
            when.push_str(&format!(" ({weekday} of week {week})"));
        }
        if let Some(times) = event.time_span() {
            when.push_str(&format!(", {times}"));
        }
        out.push(format!("WHEN: {when}"));
    }

    if let Some(location) = &event.location
        && !location.is_empty()
    {
        out.push(format!("WHERE: {location}"));
    }
    if let Some(recurrence) = &event.recurrence {
        out.push(format!("RECURRENCE: {recurrence}"));
    }
    if let Some(status) = &event.status {
        out.push(format!("STATUS: {status}"));
    }
    if let Some(priority) = &event.priority {
        out.push(format!("PRIORITY: {priority}"));
    }

    out.push(String::new());
    if let Some(organizer) = &event.organizer {
        out.push(format!("ORGANIZER: {organizer}"));
    }
    if !event.participants.is_empty() {
        out.push("PARTICIPANTS:".to_string());
        for participant in &event.participants {
            out.push(format!("   {participant}"));
        }
    }

    if let Some(description) = &event.description
        && !description.is_empty()
    {
        out.push(String::new());
        out.push("DESCRIPTION:".to_string());
        out.push(description.clone());
    }

    if verbose && let Some(uid) = &event.uid {
        out.push(String::new());
        out.push(format!("UID: {uid}"));
    }

    out.join("\n")
}

fn render_compact(event: &NormalizedEvent) -> String {
    let mut out: Vec<String> = Vec::new();

    out.push(format!(
        "{} | {} {}",
        event.summary.as_deref().unwrap_or_default(),
        event.date_span().unwrap_or_default(),
        event.time_span().unwrap_or_default(),
    ));
    if let Some(location) = &event.location {
        out.push(format!("Location: {location}"));
    }
    if let Some(organizer) = &event.organizer {
        out.push(format!("Organizer: {organizer}"));
    }

    out.join("\n")
}
