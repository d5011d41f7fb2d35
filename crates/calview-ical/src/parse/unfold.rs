//! Continuation-line repair for attendee lines.
//!
//! Long ATTENDEE values are folded across lines, continuation lines
//! prefixed with a single space. Folding must be undone before the field
//! extractors run, since they match one logical line at a time.

/// Joins folded ATTENDEE continuation lines back into one logical line.
///
/// A line beginning with a single space is merged into the preceding line
/// when that logical line started with `ATTENDEE`; the newline and the
/// leading space are removed. Consecutive continuations all merge.
/// Everything else passes through unchanged. No matches is a no-op.
#[must_use]
pub fn unfold_attendees(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut in_attendee = false;

    for line in input.split_inclusive('\n') {
        let continuation = line.strip_prefix(' ');
        if in_attendee && let Some(rest) = continuation {
            // Drop the newline that ended the previous chunk, then the space.
            if out.ends_with('\n') {
                out.pop();
                if out.ends_with('\r') {
                    out.pop();
                }
            }
            out.push_str(rest);
        } else {
            in_attendee = line.starts_with("ATTENDEE");
            out.push_str(line);
        }
    }

    out
}
