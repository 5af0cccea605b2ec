//! Built-in site templates using the Tera template engine
//!
//! All templates are embedded directly in the binary. Everything except
//! rendered Markdown is autoescaped.

use anyhow::Result;
use serde::Serialize;
use tera::{Context, Tera};

use crate::config::{MenuItem, SiteConfig, SocialConfig};
use crate::content::{PostRecord, Project};
use crate::helpers::{post_path, ShareLinks};

/// Template renderer with the embedded site theme
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all templates loaded
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        // Register all templates
        tera.add_raw_templates(vec![
            ("layout.html", include_str!("site/layout.html")),
            ("home.html", include_str!("site/home.html")),
            ("blog.html", include_str!("site/blog.html")),
            ("post.html", include_str!("site/post.html")),
            ("page.html", include_str!("site/page.html")),
            ("404.html", include_str!("site/404.html")),
            // Partials
            (
                "partials/header.html",
                include_str!("site/partials/header.html"),
            ),
            (
                "partials/footer.html",
                include_str!("site/partials/footer.html"),
            ),
            (
                "partials/heading.html",
                include_str!("site/partials/heading.html"),
            ),
            ("partials/tags.html", include_str!("site/partials/tags.html")),
            (
                "partials/post_meta.html",
                include_str!("site/partials/post_meta.html"),
            ),
            (
                "partials/post_card.html",
                include_str!("site/partials/post_card.html"),
            ),
            (
                "partials/project_card.html",
                include_str!("site/partials/project_card.html"),
            ),
            (
                "partials/share.html",
                include_str!("site/partials/share.html"),
            ),
        ])?;

        Ok(Self { tera })
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }
}

/// Data structures for template context

#[derive(Debug, Clone, Serialize)]
pub struct SiteData {
    pub site_name: String,
    pub title: String,
    pub description: String,
    pub url: String,
    pub author: String,
    /// `og:locale` form, e.g. `en_US`
    pub locale: String,
    /// `<html lang>` form, e.g. `en`
    pub lang: String,
    pub menu: Vec<MenuItem>,
    pub social: SocialConfig,
    pub current_year: String,
}

impl SiteData {
    pub fn new(config: &SiteConfig, current_year: i32) -> Self {
        let locale = config.locale.replace('-', "_");
        let lang = locale.split('_').next().unwrap_or("en").to_string();
        Self {
            site_name: config.site_name.clone(),
            title: config.title.clone(),
            description: config.description.clone(),
            url: config.url.clone(),
            author: config.author.clone(),
            locale,
            lang,
            menu: config.menu.clone(),
            social: config.social.clone(),
            current_year: current_year.to_string(),
        }
    }
}

/// A post as shown in listings
#[derive(Debug, Clone, Serialize)]
pub struct PostCardData {
    pub title: Option<String>,
    pub excerpt: Option<String>,
    pub date: String,
    pub iso_date: String,
    pub reading_time: Option<String>,
    pub tags: Vec<String>,
    pub href: String,
}

impl PostCardData {
    pub fn new(config: &SiteConfig, post: &PostRecord) -> Self {
        Self {
            title: post.meta.title.clone(),
            excerpt: post.meta.excerpt.clone(),
            date: post.meta.date.clone(),
            iso_date: post.meta.iso_date.clone(),
            reading_time: post.meta.reading_time.map(|r| r.to_string()),
            tags: post.meta.tags.clone(),
            href: post_path(config, &post.slug),
        }
    }
}

/// A post on its own page
#[derive(Debug, Clone, Serialize)]
pub struct PostPageData {
    pub title: String,
    pub excerpt: Option<String>,
    pub date: String,
    pub iso_date: String,
    pub reading_time: Option<String>,
    pub tags: Vec<String>,
    pub image: Option<String>,
    pub href: String,
    /// Absolute permalink
    pub url: String,
    pub share: ShareLinks,
}

impl PostPageData {
    pub fn new(config: &SiteConfig, post: &PostRecord) -> Self {
        let href = post_path(config, &post.slug);
        let url = format!("{}{}", config.url.trim_end_matches('/'), href);
        let title = post.display_title().to_string();
        Self {
            share: ShareLinks::new(&url, &title),
            title,
            excerpt: post.meta.excerpt.clone(),
            date: post.meta.date.clone(),
            iso_date: post.meta.iso_date.clone(),
            reading_time: post.meta.reading_time.map(|r| r.to_string()),
            tags: post.meta.tags.clone(),
            image: post.meta.image.clone(),
            href,
            url,
        }
    }

    /// schema.org `BlogPosting` markup for the page head
    pub fn json_ld(&self, config: &SiteConfig, description: &str) -> String {
        let value = serde_json::json!({
            "@context": "https://schema.org",
            "@type": "BlogPosting",
            "headline": format!("{} | {}", self.title, config.site_name),
            "description": description,
            "url": self.url,
            "image": self.image.iter().collect::<Vec<_>>(),
            "datePublished": self.iso_date,
            "dateModified": self.iso_date,
            "author": { "@type": "Person", "name": config.author },
            "publisher": {
                "@type": "Organization",
                "name": config.author,
                "logo": {
                    "@type": "ImageObject",
                    "url": format!("{}/images/logo.svg", config.url.trim_end_matches('/')),
                },
            },
        });
        // Keep a literal `</script>` in a title from closing the tag
        value.to_string().replace("</", "<\\/")
    }
}

/// A project as shown on the home page
#[derive(Debug, Clone, Serialize)]
pub struct ProjectCardData {
    pub name: String,
    pub description: String,
    pub image: String,
    pub project_url: String,
    /// Empty when the project has no public repository
    pub repo_url: String,
    pub tags: Vec<String>,
}

impl From<&Project> for ProjectCardData {
    fn from(project: &Project) -> Self {
        Self {
            name: project.name.clone(),
            description: project.description.clone(),
            image: project.image.clone(),
            project_url: project.project_url.clone(),
            repo_url: if project.has_repo() {
                project.repo_url.clone()
            } else {
                String::new()
            },
            tags: project.tags.clone(),
        }
    }
}
