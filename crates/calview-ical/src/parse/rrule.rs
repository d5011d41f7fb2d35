//! Recurrence rule decoding.
//!
//! Turns a semicolon-delimited RRULE value into a human-readable phrase.
//! Only the parts a reader cares about are decoded (FREQ, INTERVAL, COUNT,
//! UNTIL); everything else is ignored.

/// A recurrence rule reduced to its displayable parts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Rule {
    freq: Option<String>,
    interval: Option<String>,
    count: Option<String>,
    until: Option<String>,
}

impl Rule {
    /// Parses `KEY=VALUE` pairs. Unknown keys are skipped.
    fn parse(value: &str) -> Self {
        let mut rule = Self::default();

        for part in value.split(';') {
            let Some((key, val)) = part.split_once('=') else {
                continue;
            };
            match key.to_ascii_uppercase().as_str() {
                "FREQ" => rule.freq = Some(val.to_string()),
                "INTERVAL" => rule.interval = Some(val.to_string()),
                "COUNT" => rule.count = Some(val.to_string()),
                "UNTIL" => rule.until = Some(val.to_string()),
                _ => {}
            }
        }

        rule
    }
}

/// Decodes an RRULE value into a phrase like `"Weekly (10 times)"`.
///
/// `FREQ` is required; without it the rule is treated as absent. An
/// interval other than 1 renders as `"Every N <unit>s"`, COUNT appends
/// `" (N times)"`, UNTIL appends `" (until <date>)"`, and an unknown FREQ
/// passes through verbatim.
#[must_use]
pub fn decode(value: &str) -> Option<String> {
    let rule = Rule::parse(value);
    let freq = rule.freq?;
    let interval = rule.interval.as_deref().unwrap_or("1");

    let mut phrase = match freq.as_str() {
        "DAILY" => cadence("Daily", "days", interval),
        "WEEKLY" => cadence("Weekly", "weeks", interval),
        "MONTHLY" => cadence("Monthly", "months", interval),
        "YEARLY" => cadence("Yearly", "years", interval),
        other => other.to_string(),
    };

    if let Some(count) = rule.count {
        phrase.push_str(&format!(" ({count} times)"));
    }
    if let Some(until) = rule.until {
        phrase.push_str(&format!(" (until {})", until_date(&until)));
    }

    Some(phrase)
}

fn cadence(single: &str, unit: &str, interval: &str) -> String {
    if interval == "1" {
        single.to_string()
    } else {
        format!("Every {interval} {unit}")
    }
}

/// Formats an UNTIL token as a hyphenated date, dropping any time part.
fn until_date(token: &str) -> String {
    if token.contains('-') {
        return token.to_string();
    }

    let digits = token.as_bytes();
    if digits.len() >= 8 && digits[..8].iter().all(u8::is_ascii_digit) {
        format!("{}-{}-{}", &token[0..4], &token[4..6], &token[6..8])
    } else {
        token.to_string()
    }
}
