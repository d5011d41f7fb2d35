//! Field extractors for the event properties.
//!
//! Each logical field has appeared in several textual encodings over the
//! years, so extraction is an ordered cascade: the variants for a field are
//! tried in priority order and the first match wins. A field with no
//! matching variant stays absent; extraction never fails.

use crate::event::Priority;

/// Returns the value of the first line starting with `prefix`.
fn line_value<'a>(text: &'a str, prefix: &str) -> Option<&'a str> {
    text.lines()
        .map(|line| line.trim_end_matches('\r'))
        .find_map(|line| line.strip_prefix(prefix))
}

/// Returns the value after the colon of the first line starting with
/// `prefix`, for parameterized encodings like `SUMMARY;LANGUAGE=en:...`.
fn param_line_value<'a>(text: &'a str, prefix: &str) -> Option<&'a str> {
    text.lines()
        .map(|line| line.trim_end_matches('\r'))
        .find_map(|line| {
            let rest = line.strip_prefix(prefix)?;
            rest.split_once(':').map(|(_, value)| value)
        })
}

/// Replaces the first occurrence of `needle` (ASCII case-insensitive).
fn replace_first_ci(haystack: &str, needle: &str, replacement: &str) -> String {
    let lower = haystack.to_ascii_lowercase();
    if let Some(pos) = lower.find(&needle.to_ascii_lowercase()) {
        let mut out = String::with_capacity(haystack.len());
        out.push_str(&haystack[..pos]);
        out.push_str(replacement);
        out.push_str(&haystack[pos + needle.len()..]);
        out
    } else {
        haystack.to_string()
    }
}

/// Cleans up a captured text value.
///
/// Removes embedded fold artifacts (newline + single space), turns literal
/// `\n` sequences into real newlines, collapses blank-line runs, converts
/// the `" | "` separator some producers emit into a newline, and trims.
#[must_use]
pub fn clean_text(text: &str) -> String {
    let mut cleaned = text.replace("\n ", "").replace("\\n", "\n");

    while cleaned.contains("\n\n") {
        cleaned = cleaned.replace("\n\n", "\n");
    }

    cleaned.replace(" | ", "\n").trim().to_string()
}

/// Extracts SUMMARY, parameterized form before bare form.
#[must_use]
pub fn summary(text: &str) -> Option<String> {
    param_line_value(text, "SUMMARY;")
        .or_else(|| line_value(text, "SUMMARY:"))
        .map(clean_text)
}

/// Extracts LOCATION (bare form only).
#[must_use]
pub fn location(text: &str) -> Option<String> {
    line_value(text, "LOCATION:").map(clean_text)
}

/// Extracts the organizer as a display string.
///
/// The common-name form yields `"Name <addr>"`, the bare form `"<addr>"`.
/// An absent organizer yields the literal `"(None set)"`.
#[must_use]
pub fn organizer(text: &str) -> String {
    if let Some(value) = line_value(text, "ORGANIZER;CN=") {
        let mut org = replace_first_ci(value, ":mailto:", " <");
        org.push('>');
        org
    } else if let Some(value) = line_value(text, "ORGANIZER:") {
        let mut org = replace_first_ci(value, "MAILTO:", "<");
        org.push('>');
        org
    } else {
        "(None set)".to_string()
    }
}

/// Extracts UID, trimmed.
#[must_use]
pub fn uid(text: &str) -> Option<String> {
    line_value(text, "UID:").map(|v| v.trim().to_string())
}

/// Extracts STATUS, trimmed and capitalized (`CONFIRMED` becomes
/// `Confirmed`).
#[must_use]
pub fn status(text: &str) -> Option<String> {
    line_value(text, "STATUS:").map(|v| {
        let trimmed = v.trim();
        let mut chars = trimmed.chars();
        chars.next().map_or_else(String::new, |first| {
            first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
        })
    })
}

/// Extracts PRIORITY, mapping numeric values to tiers.
#[must_use]
pub fn priority(text: &str) -> Option<Priority> {
    line_value(text, "PRIORITY:").map(|v| Priority::from_token(v.trim()))
}

/// Extracts every attendee with a common-name segment containing an
/// address, in order of appearance.
///
/// The captured value has remaining fold artifacts removed and its
/// `:mailto:` separator rewritten to an angle-bracketed address, e.g.
/// `"Jane Doe <jane@example.com>"`.
#[must_use]
pub fn participants(text: &str) -> Vec<String> {
    text.lines()
        .map(|line| line.trim_end_matches('\r'))
        .filter(|line| line.starts_with("ATTENDEE"))
        .filter_map(|line| {
            let pos = line.find("CN=")?;
            let value = &line[pos + 3..];
            value.contains('@').then(|| {
                let mut entry = replace_first_ci(&value.replace("\n ", ""), ":mailto:", " <");
                entry.push('>');
                entry
            })
        })
        .collect()
}

/// Extracts the description block.
///
/// Three capture strategies are tried in order: parameterized form
/// terminated by the next UID line, bare form terminated by the next
/// SUMMARY line, and bare form terminated by the next line starting with
/// an uppercase field name. The first one that finds both its start and
/// its terminator wins.
#[must_use]
pub fn description(text: &str) -> Option<String> {
    capture_block(text, "DESCRIPTION;", |line| line.starts_with("UID"))
        .or_else(|| capture_block(text, "DESCRIPTION:", |line| line.starts_with("SUMMARY")))
        .or_else(|| {
            capture_block(text, "DESCRIPTION:", |line| {
                line.chars().next().is_some_and(|c| c.is_ascii_uppercase())
            })
        })
        .map(|block| clean_text(&block))
}

/// Captures multi-line text from the first line starting with `prefix`
/// until the first following line matching `terminator` (exclusive).
///
/// The value starts after the colon on the opening line. Fails when either
/// the opening line or the terminator is missing.
fn capture_block(text: &str, prefix: &str, terminator: impl Fn(&str) -> bool) -> Option<String> {
    let mut lines = text.lines().map(|line| line.trim_end_matches('\r'));

    let first = lines
        .by_ref()
        .find(|line| line.starts_with(prefix))
        .and_then(|line| line.split_once(':'))
        .map(|(_, value)| value)?;

    let mut block = first.to_string();
    for line in lines {
        if terminator(line) {
            return Some(block);
        }
        block.push('\n');
        block.push_str(line);
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_prefers_parameterized_form() {
        let text = "SUMMARY;LANGUAGE=en-US:Planning\nSUMMARY:Fallback\n";
        assert_eq!(summary(text).as_deref(), Some("Planning"));
    }

    #[test]
    fn summary_bare_form() {
        let text = "BEGIN:VEVENT\nSUMMARY:Team Sync\nEND:VEVENT\n";
        assert_eq!(summary(text).as_deref(), Some("Team Sync"));
    }

    #[test]
    fn summary_absent() {
        assert_eq!(summary("BEGIN:VEVENT\nEND:VEVENT\n"), None);
    }

    #[test]
    fn organizer_common_name_form() {
        let text = "ORGANIZER;CN=John Doe:mailto:john@example.com\n";
        assert_eq!(organizer(text), "John Doe <john@example.com>");
    }

    #[test]
    fn organizer_bare_form() {
        let text = "ORGANIZER:MAILTO:a@b.com\n";
        assert_eq!(organizer(text), "<a@b.com>");
    }

    #[test]
    fn organizer_defaults_when_absent() {
        assert_eq!(organizer("SUMMARY:x\n"), "(None set)");
    }

    #[test]
    fn participants_in_input_order() {
        let text = "ATTENDEE;ROLE=REQ-PARTICIPANT;CN=Jane Doe:mailto:jane@example.com\n\
                    ATTENDEE;CN=Bob:mailto:bob@example.com\n";
        assert_eq!(
            participants(text),
            vec![
                "Jane Doe <jane@example.com>".to_string(),
                "Bob <bob@example.com>".to_string(),
            ]
        );
    }

    #[test]
    fn participants_without_address_are_skipped() {
        let text = "ATTENDEE;CN=Room 101:urn:room-101\n";
        assert!(participants(text).is_empty());
    }

    #[test]
    fn participants_are_not_deduplicated() {
        let text = "ATTENDEE;CN=Bob:mailto:bob@example.com\n\
                    ATTENDEE;CN=Bob:mailto:bob@example.com\n";
        assert_eq!(participants(text).len(), 2);
    }

    #[test]
    fn description_terminated_by_uid() {
        let text = "DESCRIPTION;LANGUAGE=en:Agenda\\nItems here\nUID:abc\n";
        assert_eq!(description(text).as_deref(), Some("Agenda\nItems here"));
    }

    #[test]
    fn description_terminated_by_summary() {
        let text = "DESCRIPTION:Notes for the meeting\nSUMMARY:Sync\n";
        assert_eq!(description(text).as_deref(), Some("Notes for the meeting"));
    }

    #[test]
    fn description_terminated_by_next_field() {
        let text = "DESCRIPTION:Line one\nLOCATION:Room 4\n";
        assert_eq!(description(text).as_deref(), Some("Line one"));
    }

    #[test]
    fn description_spans_multiple_lines() {
        let text = "DESCRIPTION:first\nsecond\nthird\nSUMMARY:y\n";
        assert_eq!(description(text).as_deref(), Some("first\nsecond\nthird"));
    }

    #[test]
    fn status_is_capitalized() {
        assert_eq!(status("STATUS:CONFIRMED\n").as_deref(), Some("Confirmed"));
    }

    #[test]
    fn priority_tier_mapping() {
        assert_eq!(priority("PRIORITY:1\n"), Some(Priority::High));
        assert_eq!(priority("PRIORITY:4\n"), Some(Priority::Normal));
        assert_eq!(priority("PRIORITY:7\n"), Some(Priority::Low));
        assert_eq!(
            priority("PRIORITY:ASAP\n"),
            Some(Priority::Other("ASAP".to_string()))
        );
    }

    #[test]
    fn clean_text_pipe_separator_and_blank_lines() {
        assert_eq!(
            clean_text("part one | part two\\n\\n\\nmore"),
            "part one\npart two\nmore"
        );
    }

    #[test]
    fn clean_text_removes_fold_artifacts() {
        assert_eq!(clean_text("fol\n ded"), "folded");
    }
}
