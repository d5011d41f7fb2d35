//! Calendar invitation extraction.
//!
//! Takes a raw iCalendar/VCAL blob (as attached to meeting invitations)
//! and produces one normalized event record: start/end resolved across the
//! historical encodings of the format, folded lines repaired, vendor
//! timezone names translated, recurrence rules decoded to plain language.
//!
//! ```no_run
//! use calview_ical::{parse, TzResolver};
//!
//! let tz = TzResolver::new();
//! let event = parse("BEGIN:VEVENT\nSUMMARY:Standup\nEND:VEVENT\n", &tz)?;
//! assert_eq!(event.summary.as_deref(), Some("Standup"));
//! # Ok::<(), calview_ical::ParseError>(())
//! ```

pub mod error;
pub mod event;
pub mod parse;
pub mod tz;

pub use error::{ParseError, ParseResult};
pub use event::{EventTime, NormalizedEvent, Priority};
pub use parse::parse;
pub use tz::TzResolver;
