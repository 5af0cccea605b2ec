//! Post and Page models

use indexmap::IndexMap;
use serde::Serialize;
use std::path::Path;

use super::error::{ContentError, Result};
use super::{FrontMatter, PostId};
use crate::helpers::{date_xml, estimate_reading_time, DateFormatter, ReadingTime};

/// Front-matter of a post after derived fields are computed
#[derive(Debug, Clone, Serialize)]
pub struct PostMeta {
    pub title: Option<String>,
    pub excerpt: Option<String>,
    /// Display date, e.g. `Jul 4, 2023`
    pub date: String,
    /// Same day as `YYYY-MM-DD`
    pub iso_date: String,
    pub reading_time: Option<ReadingTime>,
    pub tags: Vec<String>,
    pub image: Option<String>,
    #[serde(flatten)]
    pub extra: IndexMap<String, serde_yaml::Value>,
}

/// A blog post assembled from one content file
#[derive(Debug, Clone, Serialize)]
pub struct PostRecord {
    pub id: PostId,
    /// Routing key: `year/month/day/title`
    pub slug: String,
    pub meta: PostMeta,
    /// Raw markdown body
    pub body: String,
}

impl PostRecord {
    /// Combine a decoded filename with its parsed front-matter.
    ///
    /// `source` is only used to name the file in errors.
    pub fn assemble(
        id: PostId,
        front_matter: FrontMatter,
        body: &str,
        dates: &DateFormatter,
        words_per_minute: usize,
        source: &Path,
    ) -> Result<Self> {
        let date_value = front_matter
            .date
            .as_ref()
            .ok_or_else(|| ContentError::MissingDate(source.to_path_buf()))?;
        let day = dates.calendar_day(date_value)?;

        let meta = PostMeta {
            title: front_matter.title,
            excerpt: front_matter.excerpt,
            date: dates.format(&day.into())?,
            iso_date: date_xml(&day),
            reading_time: estimate_reading_time(body, words_per_minute),
            tags: front_matter.tags,
            image: front_matter.image,
            extra: front_matter.extra,
        };

        Ok(Self {
            slug: id.to_slug(),
            id,
            meta,
            body: body.to_string(),
        })
    }

    /// Title for display, falling back to the filename title
    pub fn display_title(&self) -> &str {
        self.meta
            .title
            .as_deref()
            .unwrap_or(&self.id.title_slug)
    }
}

/// A standalone page such as `about`
#[derive(Debug, Clone, Serialize)]
pub struct Page {
    pub title: String,
    pub description: Option<String>,
    /// Route without leading slash, e.g. `about`
    pub path: String,
    /// Raw markdown content
    pub raw: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn id() -> PostId {
        PostId::new("2023", "07", "04", "independence").unwrap()
    }

    #[test]
    fn test_assemble_computes_derived_fields() {
        let (fm, body) =
            FrontMatter::parse("---\ntitle: Hi\ndate: 2023-07-04\nlayout: wide\n---\none two three\n")
                .unwrap();
        let record = PostRecord::assemble(
            id(),
            fm,
            body,
            &DateFormatter::default(),
            250,
            &PathBuf::from("x"),
        )
        .unwrap();

        assert_eq!(record.slug, "2023/07/04/independence");
        assert_eq!(record.meta.date, "Jul 4, 2023");
        assert_eq!(record.meta.iso_date, "2023-07-04");
        assert_eq!(record.meta.reading_time.unwrap().to_string(), "1 min read");
        assert_eq!(record.meta.extra["layout"], serde_yaml::Value::from("wide"));
        assert_eq!(record.body, "one two three\n");
    }

    #[test]
    fn test_missing_date_fails() {
        let (fm, body) = FrontMatter::parse("---\ntitle: Undated\n---\nbody").unwrap();
        let err = PostRecord::assemble(
            id(),
            fm,
            body,
            &DateFormatter::default(),
            250,
            &PathBuf::from("undated.html.markdown"),
        )
        .unwrap_err();
        assert!(matches!(err, ContentError::MissingDate(_)));
    }

    #[test]
    fn test_empty_body_has_no_reading_time() {
        let (fm, body) = FrontMatter::parse("---\ndate: 2023-07-04\n---\n").unwrap();
        let record = PostRecord::assemble(
            id(),
            fm,
            body,
            &DateFormatter::default(),
            250,
            &PathBuf::from("x"),
        )
        .unwrap();
        assert!(record.meta.reading_time.is_none());
        assert_eq!(record.display_title(), "independence");
    }
}
