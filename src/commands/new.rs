//! Create a new post

use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::fs;
use std::path::PathBuf;

use crate::content::PostId;
use crate::Folio;

/// Used when the site has no `scaffolds/post.md`
const DEFAULT_SCAFFOLD: &str = r#"---
title: {{ title }}
excerpt:
date: {{ date }}
tags:
image:
---
"#;

/// Create `<date>-<slugified title><suffix>` in the content directory
pub fn create_post(folio: &Folio, title: &str, date: NaiveDate) -> Result<PathBuf> {
    let id = PostId::new(
        &date.format("%Y").to_string(),
        &date.format("%m").to_string(),
        &date.format("%d").to_string(),
        &slug::slugify(title),
    )
    .with_context(|| format!("Cannot derive a filename from title {:?}", title))?;

    fs::create_dir_all(&folio.content_dir)?;
    let file_path = folio
        .content_dir
        .join(id.file_name(&folio.config.content_suffix));

    // Check if file already exists
    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    // Load scaffold template
    let scaffold_path = folio.base_dir.join("scaffolds").join("post.md");
    let scaffold = if scaffold_path.exists() {
        fs::read_to_string(&scaffold_path)?
    } else {
        DEFAULT_SCAFFOLD.to_string()
    };

    // Titles may hold YAML syntax such as `:`, so emit them as a YAML scalar
    let yaml_title = serde_yaml::to_string(title)?;
    let content = scaffold
        .replace("{{ title }}", yaml_title.trim_end())
        .replace("{{ date }}", &date.format("%Y-%m-%d").to_string());

    fs::write(&file_path, content)?;
    tracing::info!("Created post {:?}", file_path);

    Ok(file_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::FrontMatter;

    #[test]
    fn test_create_post() {
        let dir = tempfile::tempdir().unwrap();
        let folio = Folio::new(dir.path()).unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();

        let path = create_post(&folio, "Elixir: Phoenix & LiveView!", date).unwrap();
        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            "2024-03-09-elixir-phoenix-liveview.html.markdown"
        );

        let raw = fs::read_to_string(&path).unwrap();
        let (fm, _) = FrontMatter::parse(&raw).unwrap();
        assert_eq!(fm.title.as_deref(), Some("Elixir: Phoenix & LiveView!"));

        // Refuses to overwrite
        assert!(create_post(&folio, "Elixir: Phoenix & LiveView!", date).is_err());
    }

    #[test]
    fn test_title_without_slug_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let folio = Folio::new(dir.path()).unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert!(create_post(&folio, "!!!", date).is_err());
    }
}
