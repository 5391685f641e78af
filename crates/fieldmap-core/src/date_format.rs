//! Date format language used in mapping files
//!
//! Mapping files describe dates with single-letter codes (`Y-m-d`, `d/m/Y`,
//! `Y-m-d\TH:i:s`). This module translates them into chrono strftime strings
//! and provides the strict parse-then-reformat check used by the date
//! validator.
//!
//! Copyright (c) 2025 Fieldmap Team
//! Licensed under the Apache-2.0 license

use chrono::format::{parse, ParseResult, Parsed, StrftimeItems};
use chrono::NaiveDateTime;
use std::fmt::{Display, Write};

/// Default format for dates read from input
pub const DEFAULT_INPUT_FORMAT: &str = "Y-m-d";

/// Default format for dates written to output
pub const DEFAULT_OUTPUT_FORMAT: &str = "Y-m-d\\T00:00:00";

/// Year assumed when a format has no year field; a leap year so `29/02` parses
const FILL_YEAR: i64 = 2000;

/// Translate a mapping-file date format into a chrono strftime string.
///
/// `\x` escapes one character and `'...'` quotes a literal run. Letters with
/// no date meaning are copied through unchanged.
pub fn to_strftime(format: &str) -> String {
    let mut out = String::with_capacity(format.len() * 2);
    let mut chars = format.chars();
    let mut quoted = false;

    while let Some(c) = chars.next() {
        if quoted {
            if c == '\'' {
                quoted = false;
            } else {
                push_literal(&mut out, c);
            }
            continue;
        }

        let spec = match c {
            '\\' => {
                if let Some(escaped) = chars.next() {
                    push_literal(&mut out, escaped);
                }
                continue;
            }
            '\'' => {
                quoted = true;
                continue;
            }
            'd' => "%d",
            'j' => "%-d",
            'm' => "%m",
            'n' => "%-m",
            'Y' => "%Y",
            'y' => "%y",
            'H' => "%H",
            'G' => "%-H",
            'h' => "%I",
            'g' => "%-I",
            'i' => "%M",
            's' => "%S",
            'A' => "%p",
            'a' => "%P",
            'D' => "%a",
            'l' => "%A",
            'M' => "%b",
            'F' => "%B",
            other => {
                push_literal(&mut out, other);
                continue;
            }
        };
        out.push_str(spec);
    }

    out
}

fn push_literal(out: &mut String, c: char) {
    if c == '%' {
        out.push_str("%%");
    } else {
        out.push(c);
    }
}

/// Render a formatter, returning `None` if chrono rejects the items
fn render(formatted: impl Display) -> Option<String> {
    let mut out = String::new();
    write!(out, "{}", formatted).ok()?;
    Some(out)
}

/// Format a timestamp with a mapping-file date format
pub fn format_datetime(datetime: &NaiveDateTime, format: &str) -> Option<String> {
    let strftime = to_strftime(format);
    render(datetime.format(&strftime))
}

/// True when `value` parses with `format` and formats back to exactly `value`
pub fn round_trips(value: &str, format: &str) -> bool {
    let strftime = to_strftime(format);
    let mut parsed = Parsed::new();
    if parse(&mut parsed, value, StrftimeItems::new(&strftime)).is_err() {
        return false;
    }
    if fill_missing_date(&mut parsed).is_err() {
        return false;
    }

    let rendered = if let Ok(datetime) = parsed.to_naive_datetime_with_offset(0) {
        render(datetime.format(&strftime))
    } else if let Ok(date) = parsed.to_naive_date() {
        render(date.format(&strftime))
    } else if let Ok(time) = parsed.to_naive_time() {
        render(time.format(&strftime))
    } else {
        None
    };

    rendered.as_deref() == Some(value)
}

/// Fill date fields the format does not mention so a date can be built
fn fill_missing_date(parsed: &mut Parsed) -> ParseResult<()> {
    if parsed.year().is_none() && parsed.year_mod_100().is_none() {
        parsed.set_year(FILL_YEAR)?;
    }
    if parsed.month().is_none() {
        parsed.set_month(1)?;
    }
    if parsed.day().is_none() {
        parsed.set_day(1)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use proptest::prelude::*;

    #[test]
    fn test_translation() {
        assert_eq!(to_strftime("Y-m-d"), "%Y-%m-%d");
        assert_eq!(to_strftime("d/m/Y"), "%d/%m/%Y");
        assert_eq!(to_strftime("Y-m-d\\TH:i:s"), "%Y-%m-%dT%H:%M:%S");
        assert_eq!(to_strftime("Y-m-d'T'00:00:00"), "%Y-%m-%dT00:00:00");
        assert_eq!(to_strftime("Y%"), "%Y%%");
    }

    #[test]
    fn test_round_trip_default_format() {
        assert!(round_trips("2025-02-17", DEFAULT_INPUT_FORMAT));
        assert!(!round_trips("17/02/2025", DEFAULT_INPUT_FORMAT));
        assert!(!round_trips("2025-02-30", DEFAULT_INPUT_FORMAT));
        assert!(!round_trips("2025-2-17", DEFAULT_INPUT_FORMAT));
        assert!(!round_trips("invalid-date", DEFAULT_INPUT_FORMAT));
    }

    #[test]
    fn test_round_trip_custom_formats() {
        assert!(round_trips("17/02/2025", "d/m/Y"));
        assert!(round_trips("2025-02-17T10:30:00", "Y-m-d\\TH:i:s"));
        assert!(round_trips("10:30", "H:i"));
        assert!(!round_trips("2025-02-17 10:30", "Y-m-d"));
    }

    #[test]
    fn test_round_trip_partial_date_formats() {
        assert!(round_trips("02/2025", "m/Y"));
        assert!(round_trips("2025", "Y"));
        assert!(round_trips("2025-02", "Y-m"));
        assert!(round_trips("29/02", "d/m"));
        assert!(round_trips("25", "y"));
        assert!(!round_trips("13/2025", "m/Y"));
        assert!(!round_trips("2/2025", "m/Y"));
        assert!(!round_trips("31/02", "d/m"));
    }

    #[test]
    fn test_partial_format_accepts_formatted_timestamp() {
        let now = NaiveDate::from_ymd_opt(2025, 2, 17)
            .unwrap()
            .and_hms_opt(9, 5, 0)
            .unwrap();
        for format in ["m/Y", "Y", "H:i", "F Y"] {
            let text = format_datetime(&now, format).unwrap();
            assert!(round_trips(&text, format), "{text} should match {format}");
        }
    }

    #[test]
    fn test_format_datetime_output_default() {
        let dt = NaiveDate::from_ymd_opt(2025, 3, 4)
            .unwrap()
            .and_hms_opt(15, 20, 0)
            .unwrap();
        assert_eq!(
            format_datetime(&dt, DEFAULT_OUTPUT_FORMAT).unwrap(),
            "2025-03-04T00:00:00"
        );
        assert_eq!(format_datetime(&dt, "d/m/Y H:i").unwrap(), "04/03/2025 15:20");
    }

    proptest! {
        #[test]
        fn prop_formatted_dates_round_trip(days in 0i64..100_000) {
            let date = NaiveDate::from_ymd_opt(1900, 1, 1).unwrap() + chrono::Duration::days(days);
            for format in ["Y-m-d", "d/m/Y", "m.d.Y"] {
                let text = date.format(&to_strftime(format)).to_string();
                prop_assert!(round_trips(&text, format));
            }
        }
    }
}
