//! Content loader - assembles post records from the content directory

use anyhow::Result;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::error::ContentError;
use super::{FrontMatter, Page, PostId, PostRecord};
use crate::config::SiteConfig;
use crate::helpers::DateFormatter;
use crate::Folio;

/// Loads posts and pages for one build
pub struct ContentLoader<'a> {
    config: &'a SiteConfig,
    content_dir: PathBuf,
    pages_dir: Option<PathBuf>,
    dates: DateFormatter,
}

impl<'a> ContentLoader<'a> {
    /// Create a loader for a site
    pub fn new(folio: &'a Folio) -> Self {
        Self {
            config: &folio.config,
            content_dir: folio.content_dir.clone(),
            pages_dir: Some(folio.pages_dir.clone()),
            dates: DateFormatter::from_config(&folio.config),
        }
    }

    /// Create a loader reading posts from an explicit directory, with no
    /// standalone pages
    pub fn for_dir<P: AsRef<Path>>(config: &'a SiteConfig, content_dir: P) -> Self {
        Self {
            config,
            content_dir: content_dir.as_ref().to_path_buf(),
            pages_dir: None,
            dates: DateFormatter::from_config(config),
        }
    }

    /// Read standalone pages from `pages_dir`
    pub fn with_pages_dir<P: AsRef<Path>>(mut self, pages_dir: P) -> Self {
        self.pages_dir = Some(pages_dir.as_ref().to_path_buf());
        self
    }

    /// Build the post listing, newest first, truncated to `limit`.
    ///
    /// A missing or unreadable content directory yields an empty listing.
    /// A file that cannot be turned into a record is logged and left out.
    pub fn build_listing(&self, limit: Option<usize>) -> Vec<PostRecord> {
        let mut posts: Vec<PostRecord> = self
            .content_files()
            .into_iter()
            .filter_map(|(filename, path)| match self.load_file(&filename, &path) {
                Ok(post) => Some(post),
                Err(e) => {
                    tracing::error!("Skipping post {:?}: {}", path, e);
                    None
                }
            })
            .collect();

        // Filenames sort chronologically; newest first is the reverse
        posts.reverse();
        if let Some(limit) = limit {
            posts.truncate(limit);
        }

        posts
    }

    /// Identifiers of every post route the site advertises
    pub fn routes(&self) -> Vec<PostId> {
        self.content_files()
            .into_iter()
            .filter_map(
                |(filename, _)| match PostId::decode(&filename, &self.config.content_suffix) {
                    Ok(id) => Some(id),
                    Err(e) => {
                        tracing::error!("Not advertising {:?}: {}", filename, e);
                        None
                    }
                },
            )
            .collect()
    }

    /// Build the record behind a single post route
    pub fn build_single(
        &self,
        year: &str,
        month: &str,
        day: &str,
        title_slug: &str,
    ) -> Result<PostRecord, ContentError> {
        let id = PostId::new(year, month, day, title_slug)?;
        self.build_post(id)
    }

    /// Build the record for an identifier. The file must exist.
    pub fn build_post(&self, id: PostId) -> Result<PostRecord, ContentError> {
        let path = self
            .content_dir
            .join(id.file_name(&self.config.content_suffix));

        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(ContentError::MissingPost {
                    slug: id.to_slug(),
                    path,
                })
            }
            Err(source) => return Err(ContentError::Io { path, source }),
        };

        self.assemble(id, &raw, &path)
    }

    fn load_file(&self, filename: &str, path: &Path) -> Result<PostRecord, ContentError> {
        let id = PostId::decode(filename, &self.config.content_suffix)?;
        let raw = fs::read_to_string(path).map_err(|source| ContentError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.assemble(id, &raw, path)
    }

    fn assemble(&self, id: PostId, raw: &str, path: &Path) -> Result<PostRecord, ContentError> {
        let (fm, body) = FrontMatter::parse(raw)?;
        PostRecord::assemble(
            id,
            fm,
            body,
            &self.dates,
            self.config.reading_speed(),
            path,
        )
    }

    /// Content files sorted by filename ascending
    fn content_files(&self) -> Vec<(String, PathBuf)> {
        match fs::metadata(&self.content_dir) {
            Ok(meta) if meta.is_dir() => {}
            Ok(_) => {
                tracing::warn!(
                    "Content path {:?} is not a directory, building with no posts",
                    self.content_dir
                );
                return Vec::new();
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::warn!(
                    "Content directory {:?} does not exist, building with no posts",
                    self.content_dir
                );
                return Vec::new();
            }
            Err(e) => {
                tracing::warn!(
                    "Content directory {:?} is unreadable ({}), building with no posts",
                    self.content_dir,
                    e
                );
                return Vec::new();
            }
        }

        let mut files = Vec::new();
        for entry in WalkDir::new(&self.content_dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!("Failed to read content directory entry: {}", e);
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }
            let Some(filename) = entry.file_name().to_str() else {
                tracing::warn!("Skipping non UTF-8 filename {:?}", entry.path());
                continue;
            };
            if filename.starts_with('.') || !filename.ends_with(&self.config.content_suffix) {
                tracing::debug!("Ignoring {:?}", entry.path());
                continue;
            }

            files.push((filename.to_string(), entry.path().to_path_buf()));
        }

        files
    }

    /// Load all standalone pages from the pages directory
    pub fn load_pages(&self) -> Result<Vec<Page>> {
        let Some(pages_dir) = self.pages_dir.as_ref().filter(|d| d.is_dir()) else {
            return Ok(Vec::new());
        };

        let mut pages = Vec::new();

        for entry in WalkDir::new(pages_dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if path.is_file() && is_markdown_file(path) {
                match load_page(path) {
                    Ok(page) => pages.push(page),
                    Err(e) => {
                        tracing::error!("Skipping page {:?}: {:#}", path, e);
                    }
                }
            }
        }

        Ok(pages)
    }
}

/// Load a single page from a file
fn load_page(path: &Path) -> Result<Page> {
    let content = fs::read_to_string(path)?;
    let (fm, body) = FrontMatter::parse(&content)?;

    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("untitled")
        .to_string();

    let title = fm.title.unwrap_or_else(|| {
        let mut chars = stem.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    });

    let path = slug::slugify(&stem);
    if path.is_empty() {
        anyhow::bail!("page name {:?} has no usable route", stem);
    }

    Ok(Page {
        title,
        description: fm.excerpt,
        path,
        raw: body.to_string(),
    })
}

/// Check if a file is a markdown file
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md" || e == "markdown")
        .unwrap_or(false)
}
