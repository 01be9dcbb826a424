//! PDF date strings (ISO 32000-1 Section 7.9.4)
//!
//! `D:YYYYMMDDHHmmSSOHH'mm'` where every field after the year is optional
//! and `O` is `+`, `-` or `Z`. Missing fields default to the start of the
//! period; a missing offset means UTC.

use crate::error::{PdfError, Result};
use crate::objects::Object;
use chrono::{DateTime, FixedOffset, NaiveDate, TimeZone, Utc};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PdfDate(DateTime<FixedOffset>);

impl PdfDate {
    pub fn new(datetime: DateTime<FixedOffset>) -> Self {
        Self(datetime)
    }

    pub fn from_utc(datetime: DateTime<Utc>) -> Self {
        Self(datetime.fixed_offset())
    }

    pub fn now() -> Self {
        Self::from_utc(Utc::now())
    }

    pub fn datetime(&self) -> DateTime<FixedOffset> {
        self.0
    }

    /// Parse the byte contents of a PDF string object.
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        let text = std::str::from_utf8(bytes)
            .map_err(|_| PdfError::InvalidDate("date is not ASCII".to_string()))?;
        let mut cursor = DateCursor::new(text.trim());

        cursor.skip_prefix("D:");

        let year = cursor
            .number(4)
            .ok_or_else(|| PdfError::InvalidDate(format!("missing year in {text:?}")))?;
        let month = cursor.number(2).unwrap_or(1);
        let day = cursor.number(2).unwrap_or(1);
        let hour = cursor.number(2).unwrap_or(0);
        let minute = cursor.number(2).unwrap_or(0);
        let second = cursor.number(2).unwrap_or(0);

        let offset_seconds = match cursor.next_char() {
            None | Some('Z') => 0,
            Some(sign @ ('+' | '-')) => {
                let hours = cursor.number(2).ok_or_else(|| {
                    PdfError::InvalidDate(format!("missing offset hours in {text:?}"))
                })?;
                cursor.skip_prefix("'");
                let minutes = cursor.number(2).unwrap_or(0);
                cursor.skip_prefix("'");
                let magnitude = (hours * 3600 + minutes * 60) as i32;
                if sign == '-' {
                    -magnitude
                } else {
                    magnitude
                }
            }
            Some(other) => {
                return Err(PdfError::InvalidDate(format!(
                    "unexpected character {other:?} in {text:?}"
                )))
            }
        };

        if !cursor.is_empty() {
            return Err(PdfError::InvalidDate(format!(
                "trailing characters in {text:?}"
            )));
        }

        let offset = FixedOffset::east_opt(offset_seconds)
            .ok_or_else(|| PdfError::InvalidDate(format!("offset out of range in {text:?}")))?;
        let naive = NaiveDate::from_ymd_opt(year as i32, month, day)
            .and_then(|date| date.and_hms_opt(hour, minute, second))
            .ok_or_else(|| PdfError::InvalidDate(format!("field out of range in {text:?}")))?;
        let datetime = offset
            .from_local_datetime(&naive)
            .single()
            .ok_or_else(|| PdfError::InvalidDate(format!("ambiguous local time in {text:?}")))?;

        Ok(Self(datetime))
    }

    /// String object holding the canonical date.
    pub fn to_object(&self) -> Object {
        Object::String(self.to_string().into_bytes())
    }
}

impl fmt::Display for PdfDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let offset = self.0.offset().local_minus_utc();
        let sign = if offset < 0 { '-' } else { '+' };
        let offset = offset.abs();
        write!(
            f,
            "{}{}{:02}'{:02}'",
            self.0.format("D:%Y%m%d%H%M%S"),
            sign,
            offset / 3600,
            (offset % 3600) / 60
        )
    }
}

struct DateCursor<'a> {
    rest: &'a str,
}

impl<'a> DateCursor<'a> {
    fn new(text: &'a str) -> Self {
        Self { rest: text }
    }

    fn skip_prefix(&mut self, prefix: &str) {
        if let Some(rest) = self.rest.strip_prefix(prefix) {
            self.rest = rest;
        }
    }

    /// Consume exactly `width` ASCII digits, or nothing.
    fn number(&mut self, width: usize) -> Option<u32> {
        let digits = self.rest.get(..width)?;
        if !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        self.rest = &self.rest[width..];
        digits.parse().ok()
    }

    fn next_char(&mut self) -> Option<char> {
        let mut chars = self.rest.chars();
        let ch = chars.next()?;
        self.rest = chars.as_str();
        Some(ch)
    }

    fn is_empty(&self) -> bool {
        self.rest.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_parse_full_date() {
        let date = PdfDate::parse(b"D:20231225153045+05'30'").unwrap();
        let dt = date.datetime();
        assert_eq!((dt.year(), dt.month(), dt.day()), (2023, 12, 25));
        assert_eq!((dt.hour(), dt.minute(), dt.second()), (15, 30, 45));
        assert_eq!(dt.offset().local_minus_utc(), 5 * 3600 + 30 * 60);
    }

    #[test]
    fn test_parse_partial_date_defaults() {
        let date = PdfDate::parse(b"D:2024").unwrap();
        assert_eq!(date.to_string(), "D:20240101000000+00'00'");

        let date = PdfDate::parse(b"20240615").unwrap();
        assert_eq!(date.to_string(), "D:20240615000000+00'00'");
    }

    #[test]
    fn test_parse_negative_offset_and_zulu() {
        let date = PdfDate::parse(b"D:20230101120000-08'00").unwrap();
        assert_eq!(date.datetime().offset().local_minus_utc(), -8 * 3600);
        assert_eq!(date.to_string(), "D:20230101120000-08'00'");

        let zulu = PdfDate::parse(b"D:20230101120000Z").unwrap();
        assert_eq!(zulu.to_string(), "D:20230101120000+00'00'");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(
            PdfDate::parse(b"yesterday"),
            Err(PdfError::InvalidDate(_))
        ));
        assert!(PdfDate::parse(b"D:20231345").is_err());
        assert!(PdfDate::parse(b"D:20230101120000+05'00'junk").is_err());
    }

    #[test]
    fn test_canonical_form_roundtrip() {
        let text = "D:20230615093000+02'00'";
        let date = PdfDate::parse(text.as_bytes()).unwrap();
        assert_eq!(date.to_string(), text);
        assert_eq!(date.to_object(), Object::String(text.as_bytes().to_vec()));
    }

    #[test]
    fn test_from_utc() {
        let dt = Utc.with_ymd_and_hms(2023, 12, 25, 15, 30, 45).unwrap();
        assert_eq!(PdfDate::from_utc(dt).to_string(), "D:20231225153045+00'00'");
    }
}
