//! Site configuration (_config.yml)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Words read per minute when estimating reading time
pub const DEFAULT_WORDS_PER_MINUTE: usize = 250;

/// Main site configuration
///
/// Loaded once at startup and shared by reference; nothing mutates it
/// after [`SiteConfig::load`] returns.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub site_name: String,
    pub title: String,
    pub description: String,
    pub author: String,
    pub author_email: String,
    /// BCP 47 style tag, e.g. `en-US` or `es-ES`
    pub locale: String,
    /// IANA timezone used to display dates that carry a time
    pub timezone: String,

    // URL
    pub url: String,
    pub blog_route: String,

    // Directory
    pub content_dir: String,
    pub pages_dir: String,
    pub data_dir: String,
    pub static_dir: String,
    pub public_dir: String,

    // Writing
    pub content_suffix: String,
    pub words_per_minute: usize,
    pub highlight_theme: String,

    // Home page
    pub latest_posts: usize,

    // Layout
    #[serde(default)]
    pub menu: Vec<MenuItem>,
    #[serde(default)]
    pub social: SocialConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            site_name: "bigardone.dev".to_string(),
            title: "bigardone.dev".to_string(),
            description: String::new(),
            author: "Ricardo Garcia Vega".to_string(),
            author_email: "bigardone@gmail.com".to_string(),
            locale: "en-US".to_string(),
            timezone: "UTC".to_string(),

            url: "https://bigardone.dev".to_string(),
            blog_route: "blog".to_string(),

            content_dir: "blog".to_string(),
            pages_dir: "pages".to_string(),
            data_dir: "data".to_string(),
            static_dir: "static".to_string(),
            public_dir: "public".to_string(),

            content_suffix: ".html.markdown".to_string(),
            words_per_minute: DEFAULT_WORDS_PER_MINUTE,
            highlight_theme: "base16-ocean.dark".to_string(),

            latest_posts: 6,

            menu: vec![
                MenuItem::new("Home", "/"),
                MenuItem::new("Articles", "/blog/"),
            ],
            social: SocialConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {:?}", path))?;
        let config: SiteConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config {:?}", path))?;
        Ok(config)
    }

    /// Words per minute, never zero
    pub fn reading_speed(&self) -> usize {
        if self.words_per_minute == 0 {
            DEFAULT_WORDS_PER_MINUTE
        } else {
            self.words_per_minute
        }
    }
}

/// Navigation entry rendered in the header
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItem {
    pub title: String,
    pub route: String,
}

impl MenuItem {
    pub fn new(title: &str, route: &str) -> Self {
        Self {
            title: title.to_string(),
            route: route.to_string(),
        }
    }
}

/// Profile links rendered in the footer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SocialConfig {
    pub github: String,
    pub twitter: String,
    pub linkedin: String,
}

impl Default for SocialConfig {
    fn default() -> Self {
        Self {
            github: "https://github.com/bigardone".to_string(),
            twitter: "https://twitter.com/bigardone".to_string(),
            linkedin: "https://www.linkedin.com/in/ricardogarciavega/".to_string(),
        }
    }
}
