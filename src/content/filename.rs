//! Post filename codec
//!
//! Posts live in files named `<year>-<month>-<day>-<title>.<suffix>`. The
//! codec is purely syntactic: `2021-13-40-x` decodes fine, the date parts
//! are opaque strings.

use serde::Serialize;
use std::fmt;

use super::error::{ContentError, Result};

/// Separator between the components of a filename
const FILE_DELIMITER: char = '-';
/// Separator between the components of a route slug
const SLUG_DELIMITER: char = '/';

/// Structured identifier carried by a post filename
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct PostId {
    pub year: String,
    pub month: String,
    pub day: String,
    pub title_slug: String,
}

impl PostId {
    /// Build an identifier from route parameters.
    ///
    /// Rejects components that would not survive an encode/decode round
    /// trip: empty parts, `/` anywhere, `-` inside the date parts.
    pub fn new(year: &str, month: &str, day: &str, title_slug: &str) -> Result<Self> {
        for (name, part) in [("year", year), ("month", month), ("day", day)] {
            if part.is_empty() {
                return Err(ContentError::InvalidId(format!("{} is empty", name)));
            }
            if part.contains(FILE_DELIMITER) || part.contains(SLUG_DELIMITER) {
                return Err(ContentError::InvalidId(format!(
                    "{} {:?} contains a delimiter",
                    name, part
                )));
            }
        }
        if title_slug.is_empty() {
            return Err(ContentError::InvalidId("title is empty".to_string()));
        }
        if title_slug.contains(SLUG_DELIMITER) {
            return Err(ContentError::InvalidId(format!(
                "title {:?} contains '/'",
                title_slug
            )));
        }

        Ok(Self {
            year: year.to_string(),
            month: month.to_string(),
            day: day.to_string(),
            title_slug: title_slug.to_string(),
        })
    }

    /// Decode a content filename.
    ///
    /// The suffix is stripped when present. The first three `-` separated
    /// segments become the date parts and everything after the third `-`
    /// is kept whole as the title, dashes included.
    pub fn decode(filename: &str, suffix: &str) -> Result<Self> {
        let stem = filename.strip_suffix(suffix).unwrap_or(filename);

        let mut parts = stem.splitn(4, FILE_DELIMITER);
        match (parts.next(), parts.next(), parts.next(), parts.next()) {
            (Some(year), Some(month), Some(day), Some(title)) => {
                Self::new(year, month, day, title)
                    .map_err(|_| ContentError::MalformedFilename(filename.to_string()))
            }
            _ => Err(ContentError::MalformedFilename(filename.to_string())),
        }
    }

    /// On-disk basename without suffix: `year-month-day-title`
    pub fn encode(&self) -> String {
        format!(
            "{}{d}{}{d}{}{d}{}",
            self.year,
            self.month,
            self.day,
            self.title_slug,
            d = FILE_DELIMITER
        )
    }

    /// Full filename of the post with the given suffix
    pub fn file_name(&self, suffix: &str) -> String {
        format!("{}{}", self.encode(), suffix)
    }

    /// Public permalink segment: `year/month/day/title`
    pub fn to_slug(&self) -> String {
        format!(
            "{}{d}{}{d}{}{d}{}",
            self.year,
            self.month,
            self.day,
            self.title_slug,
            d = SLUG_DELIMITER
        )
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_slug())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SUFFIX: &str = ".html.markdown";

    #[test]
    fn test_decode_filename() {
        let id = PostId::decode("2021-01-05-hello.html.markdown", SUFFIX).unwrap();
        assert_eq!(id.year, "2021");
        assert_eq!(id.month, "01");
        assert_eq!(id.day, "05");
        assert_eq!(id.title_slug, "hello");
    }

    #[test]
    fn test_title_keeps_dashes() {
        let id = PostId::decode("2020-03-03-phoenix-live-view-part-1.html.markdown", SUFFIX)
            .unwrap();
        assert_eq!(id.title_slug, "phoenix-live-view-part-1");
        assert_eq!(id.to_slug(), "2020/03/03/phoenix-live-view-part-1");
    }

    #[test]
    fn test_decode_without_suffix() {
        let id = PostId::decode("2022-06-15-b", SUFFIX).unwrap();
        assert_eq!(id.encode(), "2022-06-15-b");
    }

    #[test]
    fn test_too_few_segments() {
        let err = PostId::decode("2021-01-hello.html.markdown", SUFFIX).unwrap_err();
        assert!(matches!(err, ContentError::MalformedFilename(_)));
        assert!(PostId::decode("notes.html.markdown", SUFFIX).is_err());
    }

    #[test]
    fn test_empty_title_rejected() {
        assert!(PostId::decode("2021-01-01-.html.markdown", SUFFIX).is_err());
    }

    #[test]
    fn test_no_range_validation() {
        let id = PostId::decode("2021-13-40-odd.html.markdown", SUFFIX).unwrap();
        assert_eq!(id.month, "13");
        assert_eq!(id.day, "40");
    }

    #[test]
    fn test_round_trip() {
        let ids = [
            PostId::new("2021", "01", "01", "a").unwrap(),
            PostId::new("1999", "12", "31", "with-many-dashes-in-it").unwrap(),
            PostId::new("2023", "7", "4", "unpadded").unwrap(),
            PostId::new("2024", "02", "29", "trailing-").unwrap(),
        ];
        for id in ids {
            let decoded = PostId::decode(&id.file_name(SUFFIX), SUFFIX).unwrap();
            assert_eq!(decoded, id);
        }
    }

    #[test]
    fn test_new_rejects_delimiters() {
        assert!(PostId::new("20-21", "01", "01", "a").is_err());
        assert!(PostId::new("2021", "01", "01", "a/b").is_err());
        assert!(PostId::new("2021", "0/1", "01", "a").is_err());
        assert!(PostId::new("", "01", "01", "a").is_err());
    }

    #[test]
    fn test_distinct_files_distinct_slugs() {
        let names = [
            "2021-01-01-a-b",
            "2021-01-01-a",
            "2021-01-01-b",
            "2021-01-10-a",
            "2021-11-01-a",
        ];
        let slugs: std::collections::HashSet<_> = names
            .iter()
            .map(|n| PostId::decode(n, SUFFIX).unwrap().to_slug())
            .collect();
        assert_eq!(slugs.len(), names.len());
    }
}
