//! Content module - the ingestion pipeline from files on disk to post records
//!
//! A build reads the content directory once: each filename is decoded into
//! a [`PostId`], each file is split into [`FrontMatter`] and body, derived
//! fields are computed, and the resulting [`PostRecord`]s are ordered newest
//! first by [`loader::ContentLoader`].

mod error;
mod filename;
mod frontmatter;
pub mod loader;
mod markdown;
mod post;
mod project;

pub use error::ContentError;
pub use filename::PostId;
pub use frontmatter::FrontMatter;
pub use markdown::MarkdownRenderer;
pub use post::{Page, PostMeta, PostRecord};
pub use project::{load_projects, Project};
