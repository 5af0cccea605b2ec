//! List site content

use anyhow::Result;
use std::collections::BTreeMap;

use crate::content::load_projects;
use crate::content::loader::ContentLoader;
use crate::helpers::post_path;
use crate::Folio;

/// List site content by type
pub fn run(folio: &Folio, content_type: &str) -> Result<()> {
    let loader = ContentLoader::new(folio);

    match content_type {
        "post" | "posts" => {
            let posts = loader.build_listing(None);
            println!("Posts ({}):", posts.len());
            for post in posts {
                let reading = post
                    .meta
                    .reading_time
                    .map(|r| r.to_string())
                    .unwrap_or_default();
                println!(
                    "  {} - {} [{}] {}",
                    post.meta.date,
                    post.display_title(),
                    post.slug,
                    reading
                );
            }
        }
        "route" | "routes" => {
            let routes = loader.routes();
            println!("Routes ({}):", routes.len() + 2);
            println!("  /");
            println!("  /{}/", folio.config.blog_route.trim_matches('/'));
            for id in routes.iter().rev() {
                println!("  {}", post_path(&folio.config, &id.to_slug()));
            }
        }
        "tag" | "tags" => {
            let posts = loader.build_listing(None);
            let mut tags: BTreeMap<String, usize> = BTreeMap::new();
            for post in &posts {
                for tag in &post.meta.tags {
                    *tags.entry(tag.clone()).or_insert(0) += 1;
                }
            }
            println!("Tags ({}):", tags.len());
            let mut tags: Vec<_> = tags.into_iter().collect();
            tags.sort_by(|a, b| b.1.cmp(&a.1));
            for (tag, count) in tags {
                println!("  {} ({})", tag, count);
            }
        }
        "project" | "projects" => {
            let projects = load_projects(&folio.data_dir.join("projects.yml"))?;
            println!("Projects ({}):", projects.len());
            for project in projects {
                println!("  {} - {}", project.name, project.project_url);
            }
        }
        "page" | "pages" => {
            let pages = loader.load_pages()?;
            println!("Pages ({}):", pages.len());
            for page in pages {
                println!("  {} [/{}/]", page.title, page.path);
            }
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: post, route, tag, project, page",
                content_type
            );
        }
    }

    Ok(())
}
