//! Front-matter parsing

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

use super::error::{ContentError, Result};
use crate::helpers::DateValue;

/// Custom deserializer that accepts a list of strings or one comma-separated
/// string. Tags are trimmed and empty entries dropped.
fn string_or_vec<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, SeqAccess, Visitor};
    use std::fmt;

    struct StringOrVec;

    impl<'de> Visitor<'de> for StringOrVec {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or a list of strings")
        }

        fn visit_str<E>(self, value: &str) -> std::result::Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(split_tags(value.split(',')))
        }

        fn visit_seq<S>(self, mut seq: S) -> std::result::Result<Self::Value, S::Error>
        where
            S: SeqAccess<'de>,
        {
            let mut vec = Vec::new();
            while let Some(item) = seq.next_element::<String>()? {
                vec.push(item);
            }
            Ok(split_tags(vec.iter().map(String::as_str)))
        }

        fn visit_none<E>(self) -> std::result::Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }

        fn visit_unit<E>(self) -> std::result::Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }
    }

    deserializer.deserialize_any(StringOrVec)
}

fn split_tags<'a>(tags: impl Iterator<Item = &'a str>) -> Vec<String> {
    tags.map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Accepts any scalar as a date. Interpretation happens later, in
/// [`crate::helpers::DateFormatter`], so a bad value fails only its file.
fn scalar_date<'de, D>(deserializer: D) -> std::result::Result<Option<DateValue>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, Visitor};
    use std::fmt;

    struct ScalarDate;

    impl<'de> Visitor<'de> for ScalarDate {
        type Value = Option<DateValue>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a date string")
        }

        fn visit_str<E>(self, value: &str) -> std::result::Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(DateValue::Text(value.to_string())))
        }

        fn visit_i64<E>(self, value: i64) -> std::result::Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(DateValue::Text(value.to_string())))
        }

        fn visit_u64<E>(self, value: u64) -> std::result::Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(DateValue::Text(value.to_string())))
        }

        fn visit_none<E>(self) -> std::result::Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }

        fn visit_unit<E>(self) -> std::result::Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }
    }

    deserializer.deserialize_any(ScalarDate)
}

/// Front-matter data from a post or page
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    pub title: Option<String>,
    pub excerpt: Option<String>,
    #[serde(deserialize_with = "scalar_date")]
    pub date: Option<DateValue>,
    #[serde(deserialize_with = "string_or_vec")]
    pub tags: Vec<String>,
    /// Hero image path
    pub image: Option<String>,

    /// Additional custom fields, in declaration order
    #[serde(flatten)]
    pub extra: IndexMap<String, serde_yaml::Value>,
}

impl FrontMatter {
    /// Split raw file text into front-matter and body.
    ///
    /// The metadata block must open on the first line. The body is returned
    /// verbatim, starting right after the closing delimiter line. Text
    /// without a metadata block comes back whole with empty front-matter.
    pub fn parse(content: &str) -> Result<(Self, &str)> {
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);

        if let Some(rest) = strip_delimiter_line(content, "---") {
            if let Some((yaml, body)) = split_block(rest, "---") {
                return Ok((Self::parse_yaml(yaml)?, body));
            }
        }

        if let Some(rest) = strip_delimiter_line(content, ";;;") {
            if let Some((json, body)) = split_block(rest, ";;;") {
                return Ok((Self::parse_json(json)?, body));
            }
        }

        // No complete front-matter block
        Ok((FrontMatter::default(), content))
    }

    fn parse_yaml(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(FrontMatter::default());
        }
        serde_yaml::from_str(yaml).map_err(|e| ContentError::FrontMatter(e.to_string()))
    }

    fn parse_json(json: &str) -> Result<Self> {
        let json = json.trim();
        if json.is_empty() {
            return Ok(FrontMatter::default());
        }
        // Both `{ ... }` and a bare list of members are accepted
        let parsed = if json.starts_with('{') {
            serde_json::from_str(json)
        } else {
            serde_json::from_str(&format!("{{{}}}", json))
        };
        parsed.map_err(|e| ContentError::FrontMatter(e.to_string()))
    }
}

/// If `content` starts with a line holding only `delimiter`, return the
/// text after that line.
fn strip_delimiter_line<'a>(content: &'a str, delimiter: &str) -> Option<&'a str> {
    let rest = content.strip_prefix(delimiter)?;
    let line_end = rest.find('\n').unwrap_or(rest.len());
    if !rest[..line_end].trim().is_empty() {
        return None;
    }
    Some(rest.get(line_end + 1..).unwrap_or(""))
}

/// Find the closing `delimiter` line. Returns (block, text after the line).
fn split_block<'a>(rest: &'a str, delimiter: &str) -> Option<(&'a str, &'a str)> {
    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == delimiter {
            return Some((&rest[..offset], &rest[offset + line.len()..]));
        }
        offset += line.len();
    }
    None
}
