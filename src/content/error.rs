//! Errors raised while ingesting a single content file

use std::path::PathBuf;
use thiserror::Error;

/// Failure to turn one content file into a post record.
///
/// Each variant is fatal for the file (or route) it names and for nothing
/// else; a missing content directory is not an error at all.
#[derive(Error, Debug)]
pub enum ContentError {
    /// Filename does not split into year, month, day and title
    #[error("malformed post filename {0:?}: expected <year>-<month>-<day>-<title>")]
    MalformedFilename(String),

    /// A post identifier component is empty or contains a delimiter
    #[error("invalid post identifier: {0}")]
    InvalidId(String),

    /// An advertised route has no backing file
    #[error("no content file for route {slug} (looked for {path:?})")]
    MissingPost { slug: String, path: PathBuf },

    /// Two content files resolve to the same route
    #[error("duplicate post slug {0}")]
    DuplicateSlug(String),

    /// Front-matter has no `date` field
    #[error("{0:?} has no `date` in its front-matter")]
    MissingDate(PathBuf),

    /// The `date` field is not a recognizable date
    #[error("unrecognized date {value:?}")]
    InvalidDate { value: String },

    /// The metadata block could not be deserialized
    #[error("invalid front-matter: {0}")]
    FrontMatter(String),

    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result alias for content ingestion
pub type Result<T> = std::result::Result<T, ContentError>;
