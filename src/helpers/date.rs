//! Date helper functions

use chrono::{DateTime, FixedOffset, Locale, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use serde::Serialize;

use crate::config::SiteConfig;
use crate::content::ContentError;

/// A publication date as found in front-matter or built in code
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum DateValue {
    /// A calendar day with no time attached
    Date(NaiveDate),
    /// An instant with a known offset
    DateTime(DateTime<FixedOffset>),
    /// Unparsed text, e.g. `2023-07-04` or `2023-07-04 10:30:00`
    Text(String),
}

impl From<NaiveDate> for DateValue {
    fn from(date: NaiveDate) -> Self {
        DateValue::Date(date)
    }
}

impl From<DateTime<FixedOffset>> for DateValue {
    fn from(date: DateTime<FixedOffset>) -> Self {
        DateValue::DateTime(date)
    }
}

impl From<&str> for DateValue {
    fn from(text: &str) -> Self {
        DateValue::Text(text.to_string())
    }
}

/// Turns dates into display strings like `Jul 4, 2023`.
///
/// Holds no clock: the same value always formats to the same string.
#[derive(Debug, Clone)]
pub struct DateFormatter {
    locale: Locale,
    timezone: Tz,
    pattern: &'static str,
}

impl DateFormatter {
    /// Build a formatter for a locale tag (`en-US`, `es_ES`) and an IANA
    /// timezone. Unknown values fall back to `en_US` / UTC with a warning.
    pub fn new(locale: &str, timezone: &str) -> Self {
        let tag = locale.replace('-', "_");
        let (locale, tag) = match Locale::try_from(tag.as_str()) {
            Ok(locale) => (locale, tag),
            Err(_) => {
                tracing::warn!("Unknown locale {:?}, using en_US", tag);
                (Locale::en_US, "en_US".to_string())
            }
        };
        let timezone = timezone.parse::<Tz>().unwrap_or_else(|_| {
            tracing::warn!("Unknown timezone {:?}, using UTC", timezone);
            Tz::UTC
        });

        Self {
            pattern: month_day_pattern(&tag),
            locale,
            timezone,
        }
    }

    /// Formatter matching the site configuration
    pub fn from_config(config: &SiteConfig) -> Self {
        Self::new(&config.locale, &config.timezone)
    }

    /// Format a date value for display
    pub fn format(&self, value: &DateValue) -> Result<String, ContentError> {
        let day = self.calendar_day(value)?;
        let midnight = day
            .and_hms_opt(0, 0, 0)
            .ok_or_else(|| ContentError::InvalidDate {
                value: day.to_string(),
            })?;
        // Rendered at midnight UTC so the calendar day never shifts
        Ok(Utc
            .from_utc_datetime(&midnight)
            .format_localized(self.pattern, self.locale)
            .to_string())
    }

    /// Resolve a value to the calendar day it names in the site timezone
    pub fn calendar_day(&self, value: &DateValue) -> Result<NaiveDate, ContentError> {
        match value {
            DateValue::Date(d) => Ok(*d),
            DateValue::DateTime(dt) => Ok(dt.with_timezone(&self.timezone).date_naive()),
            DateValue::Text(s) => self.parse_text(s),
        }
    }

    fn parse_text(&self, s: &str) -> Result<NaiveDate, ContentError> {
        parse_date_string(s, &self.timezone).ok_or_else(|| ContentError::InvalidDate {
            value: s.to_string(),
        })
    }
}

impl Default for DateFormatter {
    fn default() -> Self {
        Self::new("en_US", "UTC")
    }
}

/// English puts the month first; the other locales we render read day first
fn month_day_pattern(locale_tag: &str) -> &'static str {
    if locale_tag.starts_with("en") {
        "%b %-d, %Y"
    } else {
        "%-d %b %Y"
    }
}

/// Parse a date string in various formats into a calendar day
fn parse_date_string(s: &str, tz: &Tz) -> Option<NaiveDate> {
    let s = s.trim();

    for fmt in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }

    // Wall-clock times are taken as site-local
    let formats = [
        "%Y-%m-%d %H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
    ];
    for fmt in formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }

    // Try RFC 3339 / ISO 8601 with an offset
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(tz).date_naive());
    }
    if let Ok(dt) = DateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S %z") {
        return Some(dt.with_timezone(tz).date_naive());
    }

    None
}

/// Format a date in ISO 8601 form for `<time datetime>` and meta tags
pub fn date_xml(date: &NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
