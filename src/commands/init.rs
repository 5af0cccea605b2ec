//! Initialize a new site

use anyhow::Result;
use std::fs;
use std::path::Path;

use crate::Folio;

const CONFIG: &str = r#"# Site
site_name: my-site.dev
title: my-site.dev
description: ''
author: John Doe
author_email: john@example.com
locale: en-US
timezone: UTC

# URL
url: https://example.com
blog_route: blog

# Directory
content_dir: blog
pages_dir: pages
data_dir: data
static_dir: static
public_dir: public

# Writing
content_suffix: .html.markdown
words_per_minute: 250
highlight_theme: base16-ocean.dark

# Home page
latest_posts: 6

menu:
  - title: Home
    route: /
  - title: Articles
    route: /blog/
  - title: About
    route: /about/

social:
  github: ''
  twitter: ''
  linkedin: ''
"#;

const POST_SCAFFOLD: &str = r#"---
title: {{ title }}
excerpt:
date: {{ date }}
tags:
image:
---
"#;

const ABOUT_PAGE: &str = r#"---
title: About
excerpt: Who writes here
---

Hi, I write about the things I build.
"#;

const PROJECTS: &str = r#"- name: folio
  description: The static site generator that builds this site.
  image: /images/projects/folio.png
  repo_url: https://example.com/folio
  project_url: https://example.com
  tags:
    - rust
"#;

/// Initialize a new site in the given directory
pub fn init_site(target_dir: &Path) -> Result<()> {
    let config_path = target_dir.join("_config.yml");
    if config_path.exists() {
        anyhow::bail!("A site already exists in {:?}", target_dir);
    }

    // Create directory structure
    for dir in ["blog", "pages", "data", "static/css", "static/images", "scaffolds"] {
        fs::create_dir_all(target_dir.join(dir))?;
    }

    fs::write(&config_path, CONFIG)?;
    fs::write(target_dir.join("scaffolds/post.md"), POST_SCAFFOLD)?;
    fs::write(target_dir.join("pages/about.md"), ABOUT_PAGE)?;
    fs::write(target_dir.join("data/projects.yml"), PROJECTS)?;
    fs::write(target_dir.join("static/css/index.css"), "")?;

    // Create a sample post
    let today = chrono::Local::now().date_naive();
    let sample_post = format!(
        r#"---
title: Hello World
excerpt: The very first post
date: {}
tags: welcome
---

Welcome! This is your very first post. Create another one with:

```bash
$ folio new "My New Post"
```

Then build the site into `public/`:

```bash
$ folio generate
```
"#,
        today.format("%Y-%m-%d")
    );

    fs::write(
        target_dir.join(format!(
            "blog/{}-hello-world.html.markdown",
            today.format("%Y-%m-%d")
        )),
        sample_post,
    )?;

    Ok(())
}

/// Run the init command with an existing site
pub fn run(folio: &Folio) -> Result<()> {
    init_site(&folio.base_dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::loader::ContentLoader;

    #[test]
    fn test_init_site_builds() {
        let dir = tempfile::tempdir().unwrap();
        init_site(dir.path()).unwrap();

        let folio = Folio::new(dir.path()).unwrap();
        assert_eq!(folio.config.site_name, "my-site.dev");
        assert_eq!(folio.config.menu.len(), 3);

        let loader = ContentLoader::new(&folio);
        let posts = loader.build_listing(None);
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].meta.tags, vec!["welcome"]);
        assert_eq!(loader.load_pages().unwrap().len(), 1);
    }

    #[test]
    fn test_init_refuses_existing_site() {
        let dir = tempfile::tempdir().unwrap();
        init_site(dir.path()).unwrap();
        assert!(init_site(dir.path()).is_err());
    }
}
