use thiserror::Error;

/// Errors that prevent a blob from producing an event record.
///
/// Everything else (missing fields, unresolvable timezones, unparseable
/// dates) degrades the affected field instead of failing the parse.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    #[error("empty input")]
    Empty,

    #[error("input is not a calendar: no BEGIN:VCALENDAR or BEGIN:VEVENT marker")]
    NotACalendar,
}

pub type ParseResult<T> = std::result::Result<T, ParseError>;
