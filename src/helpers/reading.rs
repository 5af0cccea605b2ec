//! Reading time estimation

use serde::{Serialize, Serializer};
use std::fmt;

/// Estimated minutes needed to read a post, always at least one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadingTime(u32);

impl ReadingTime {
    pub fn minutes(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for ReadingTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} min read", self.0)
    }
}

impl Serialize for ReadingTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Count whitespace-delimited words
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Estimate reading time at `words_per_minute`, rounding up.
///
/// Returns `None` when the body has no words.
pub fn estimate_reading_time(body: &str, words_per_minute: usize) -> Option<ReadingTime> {
    let words = word_count(body);
    if words == 0 || words_per_minute == 0 {
        return None;
    }
    let minutes = words.div_ceil(words_per_minute);
    Some(ReadingTime(u32::try_from(minutes).unwrap_or(u32::MAX)))
}
