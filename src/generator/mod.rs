//! Generator module - writes the static site using the built-in Tera templates

use anyhow::{Context as _, Result};
use chrono::Datelike;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use tera::Context;
use walkdir::WalkDir;

use crate::content::loader::ContentLoader;
use crate::content::{load_projects, ContentError, MarkdownRenderer, Page, PostRecord};
use crate::helpers::{post_output_path, url_for};
use crate::templates::{PostCardData, PostPageData, ProjectCardData, SiteData, TemplateRenderer};
use crate::Folio;

/// What a build produced
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BuildReport {
    pub posts: usize,
    pub pages: usize,
    /// Post and standalone pages that could not be built
    pub failed: usize,
}

/// Static site generator using Tera templates
pub struct Generator {
    folio: Folio,
    renderer: TemplateRenderer,
    markdown: MarkdownRenderer,
    site_data: SiteData,
}

impl Generator {
    /// Create a new generator
    pub fn new(folio: &Folio) -> Result<Self> {
        let renderer = TemplateRenderer::new()?;
        let markdown = MarkdownRenderer::with_theme(&folio.config.highlight_theme);
        let site_data = SiteData::new(&folio.config, chrono::Local::now().year());

        Ok(Self {
            folio: folio.clone(),
            renderer,
            markdown,
            site_data,
        })
    }

    /// Generate the entire site
    pub fn generate(&self) -> Result<BuildReport> {
        let loader = ContentLoader::new(&self.folio);

        // Ensure public directory exists
        fs::create_dir_all(&self.folio.public_dir)?;

        // Copy static assets (css, images, etc.)
        self.copy_static_assets()?;

        let listing = loader.build_listing(None);
        check_unique_slugs(&listing)?;

        self.generate_home(&loader)?;
        self.generate_blog_index(&listing)?;

        let mut report = BuildReport::default();
        for id in loader.routes() {
            let slug = id.to_slug();
            match loader
                .build_post(id)
                .map_err(anyhow::Error::from)
                .and_then(|post| self.generate_post_page(&post))
            {
                Ok(()) => report.posts += 1,
                Err(e) => {
                    tracing::error!("Failed to generate post {}: {:#}", slug, e);
                    report.failed += 1;
                }
            }
        }

        let mut page_routes = HashSet::new();
        for page in loader.load_pages()? {
            let route = url_for(&page.path);
            let result = if self.is_reserved_route(&route) {
                Err(anyhow::anyhow!("route {} is generated by the site itself", route))
            } else if !page_routes.insert(route.clone()) {
                Err(anyhow::anyhow!("route {} is already taken by another page", route))
            } else {
                self.generate_page(&page, &route)
            };

            match result {
                Ok(()) => report.pages += 1,
                Err(e) => {
                    tracing::error!("Failed to generate page {:?}: {:#}", page.title, e);
                    report.failed += 1;
                }
            }
        }

        self.generate_not_found()?;

        Ok(report)
    }

    /// Create a base context with common variables
    fn create_base_context(&self, title: &str, description: &str, current_path: &str) -> Context {
        let mut context = Context::new();
        context.insert("site", &self.site_data);
        context.insert("page_title", title);
        context.insert("description", description);
        context.insert("current_path", current_path);
        context
    }

    fn blog_path(&self) -> String {
        url_for(&self.folio.config.blog_route)
    }

    /// Routes owned by the home page, the article listing, posts and 404
    fn is_reserved_route(&self, route: &str) -> bool {
        route == "/" || route == "/404.html" || route.starts_with(&self.blog_path())
    }

    /// Home page: latest posts and the project showcase
    fn generate_home(&self, loader: &ContentLoader) -> Result<()> {
        let config = &self.folio.config;
        let posts: Vec<PostCardData> = loader
            .build_listing(Some(config.latest_posts))
            .iter()
            .map(|p| PostCardData::new(config, p))
            .collect();

        let projects: Vec<ProjectCardData> =
            match load_projects(&self.folio.data_dir.join("projects.yml")) {
                Ok(projects) => projects.iter().map(ProjectCardData::from).collect(),
                Err(e) => {
                    tracing::error!("Rendering the home page without projects: {:#}", e);
                    Vec::new()
                }
            };

        let mut context = self.create_base_context(&config.title, &config.description, "/");
        context.insert("posts", &posts);
        context.insert("projects", &projects);
        context.insert("blog_path", &self.blog_path());

        let html = self.renderer.render("home.html", &context)?;
        self.write_output("index.html", &html)
    }

    /// Every post, newest first
    fn generate_blog_index(&self, listing: &[PostRecord]) -> Result<()> {
        let config = &self.folio.config;
        let posts: Vec<PostCardData> = listing
            .iter()
            .map(|p| PostCardData::new(config, p))
            .collect();

        let blog_path = self.blog_path();
        let mut context = self.create_base_context("Articles", &config.description, &blog_path);
        context.insert("posts", &posts);

        let html = self.renderer.render("blog.html", &context)?;
        self.write_output(&format!("{}index.html", blog_path), &html)
    }

    /// A single post detail page
    fn generate_post_page(&self, post: &PostRecord) -> Result<()> {
        let config = &self.folio.config;
        let data = PostPageData::new(config, post);
        let description = post.meta.excerpt.as_deref().unwrap_or(&config.description);
        let content = self
            .markdown
            .render(&post.body)
            .with_context(|| format!("Failed to render markdown for {}", post.slug))?;

        let mut context = self.create_base_context(&data.title, description, &data.href);
        context.insert("json_ld", &data.json_ld(config, description));
        context.insert("content", &content);
        context.insert("post", &data);

        let html = self.renderer.render("post.html", &context)?;
        self.write_output(&post_output_path(config, &post.slug), &html)?;
        tracing::debug!("Generated post: {}", data.href);
        Ok(())
    }

    /// Generate a standalone page at `path`
    fn generate_page(&self, page: &Page, path: &str) -> Result<()> {
        let description = page
            .description
            .as_deref()
            .unwrap_or(&self.folio.config.description);
        let content = self.markdown.render(&page.raw)?;

        let mut context = self.create_base_context(&page.title, description, path);
        context.insert("content", &content);

        let html = self.renderer.render("page.html", &context)?;
        self.write_output(&format!("{}index.html", path), &html)?;
        tracing::debug!("Generated page: {}", path);
        Ok(())
    }

    fn generate_not_found(&self) -> Result<()> {
        let context = self.create_base_context(
            "Page Not Found",
            &self.folio.config.description,
            "/404.html",
        );
        let html = self.renderer.render("404.html", &context)?;
        self.write_output("404.html", &html)
    }

    /// Write a file under the public directory, creating parents
    fn write_output(&self, route: &str, html: &str) -> Result<()> {
        // Strip leading slash from path to avoid creating absolute paths
        let output_path = self.folio.public_dir.join(route.trim_start_matches('/'));
        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create dir {:?}", parent))?;
        }
        fs::write(&output_path, html)
            .with_context(|| format!("Failed to write {:?}", output_path))?;
        Ok(())
    }

    /// Copy the static directory to the public directory as-is
    fn copy_static_assets(&self) -> Result<()> {
        let static_dir = &self.folio.static_dir;
        if !static_dir.is_dir() {
            return Ok(());
        }

        for entry in WalkDir::new(static_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }

            let relative = path.strip_prefix(static_dir)?;
            copy_file(path, &self.folio.public_dir.join(relative))?;
        }

        Ok(())
    }
}

fn copy_file(from: &Path, to: &Path) -> Result<()> {
    if let Some(parent) = to.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::copy(from, to).with_context(|| format!("Failed to copy {:?}", from))?;
    Ok(())
}

/// Two posts published under the same route would overwrite each other
fn check_unique_slugs(posts: &[PostRecord]) -> Result<(), ContentError> {
    let mut seen = HashSet::new();
    for post in posts {
        if !seen.insert(post.slug.as_str()) {
            return Err(ContentError::DuplicateSlug(post.slug.clone()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(dir: &Path, name: &str, content: &str) {
        let path = dir.join(name);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn site() -> (tempfile::TempDir, Folio) {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "blog/2021-01-01-first.html.markdown",
            "---\ntitle: First\nexcerpt: The first one\ndate: 2021-01-01\ntags: elixir, phoenix\n---\nHello *world*\n",
        );
        write(
            dir.path(),
            "blog/2022-02-02-second.html.markdown",
            "---\ntitle: Second\ndate: 2022-02-02\n---\n```rust\nfn main() {}\n```\n",
        );
        write(dir.path(), "static/css/index.css", "body {}");
        let folio = Folio::new(dir.path()).unwrap();
        (dir, folio)
    }

    #[test]
    fn test_generate_writes_routes() {
        let (_dir, folio) = site();
        let report = Generator::new(&folio).unwrap().generate().unwrap();
        assert_eq!(report.posts, 2);
        assert_eq!(report.failed, 0);

        let public = &folio.public_dir;
        assert!(public.join("index.html").is_file());
        assert!(public.join("blog/index.html").is_file());
        assert!(public.join("404.html").is_file());
        assert!(public.join("css/index.css").is_file());

        let post = fs::read_to_string(public.join("blog/2021/01/01/first/index.html")).unwrap();
        assert!(post.contains("<em>world</em>"));
        assert!(post.contains("Jan 1, 2021"));
        assert!(post.contains("1 min read"));
        assert!(post.contains("application/ld+json"));
        assert!(post.contains("phoenix"));
    }

    #[test]
    fn test_blog_index_is_newest_first() {
        let (_dir, folio) = site();
        Generator::new(&folio).unwrap().generate().unwrap();

        let blog = fs::read_to_string(folio.public_dir.join("blog/index.html")).unwrap();
        let second = blog.find("Second").unwrap();
        let first = blog.find("First").unwrap();
        assert!(second < first);
    }

    #[test]
    fn test_bad_post_does_not_stop_build() {
        let (dir, folio) = site();
        write(
            dir.path(),
            "blog/2023-03-03-broken.html.markdown",
            "---\ntitle: [unclosed\n---\n",
        );

        let report = Generator::new(&folio).unwrap().generate().unwrap();
        assert_eq!(report.posts, 2);
        assert_eq!(report.failed, 1);
        assert!(folio.public_dir.join("blog/index.html").is_file());
    }

    #[test]
    fn test_duplicate_slugs_rejected() {
        let (_dir, folio) = site();
        let posts = ContentLoader::new(&folio).build_listing(None);
        assert!(check_unique_slugs(&posts).is_ok());

        let doubled = vec![posts[0].clone(), posts[0].clone()];
        assert!(matches!(
            check_unique_slugs(&doubled),
            Err(ContentError::DuplicateSlug(slug)) if slug == "2022/02/02/second"
        ));
    }

    #[test]
    fn test_pages_cannot_replace_generated_routes() {
        let (dir, folio) = site();
        write(dir.path(), "pages/blog.md", "---\ntitle: Takeover\n---\nnope");
        // Slugifies to nothing, which would be the home page
        write(dir.path(), "pages/_.md", "---\ntitle: Home takeover\n---\nnope");
        // Files are read in name order, so `about.markdown` claims `/about/`
        write(dir.path(), "pages/about.markdown", "---\ntitle: About\n---\nHi there.");
        write(dir.path(), "pages/about.md", "---\ntitle: Shadow\n---\nnope");

        let report = Generator::new(&folio).unwrap().generate().unwrap();
        assert_eq!(report.pages, 1);
        assert_eq!(report.failed, 2);

        let public = &folio.public_dir;
        let blog = fs::read_to_string(public.join("blog/index.html")).unwrap();
        assert!(blog.contains("First"));
        assert!(!blog.contains("Takeover"));
        let home = fs::read_to_string(public.join("index.html")).unwrap();
        assert!(home.contains("Second"));
        assert!(!home.contains("Home takeover"));
        let about = fs::read_to_string(public.join("about/index.html")).unwrap();
        assert!(about.contains("Hi there."));
    }

    #[test]
    fn test_broken_projects_file_keeps_building() {
        let (dir, folio) = site();
        write(dir.path(), "data/projects.yml", "- name: [unclosed\n");

        let report = Generator::new(&folio).unwrap().generate().unwrap();
        assert_eq!(report.posts, 2);

        let home = fs::read_to_string(folio.public_dir.join("index.html")).unwrap();
        assert!(home.contains("Second"));
        assert!(!home.contains("Latest projects"));
        assert!(folio
            .public_dir
            .join("blog/2021/01/01/first/index.html")
            .is_file());
    }

    #[test]
    fn test_reserved_characters_in_titles() {
        let (dir, folio) = site();
        write(
            dir.path(),
            "blog/2023-01-01-c#-tips.html.markdown",
            "---\ntitle: C sharp\ndate: 2023-01-01\n---\ntips\n",
        );

        let report = Generator::new(&folio).unwrap().generate().unwrap();
        assert_eq!(report.failed, 0);
        assert!(folio
            .public_dir
            .join("blog/2023/01/01/c#-tips/index.html")
            .is_file());

        // Autoescape renders `/` as `&#x2F;`
        let blog = fs::read_to_string(folio.public_dir.join("blog/index.html")).unwrap();
        assert!(blog.contains("01&#x2F;c%23-tips&#x2F;"));
    }
}
