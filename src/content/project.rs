//! Portfolio projects shown on the home page

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// One showcased project, read from `data/projects.yml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Project {
    pub name: String,
    pub description: String,
    pub image: String,
    pub repo_url: String,
    pub project_url: String,
    pub tags: Vec<String>,
}

impl Project {
    /// Whether a repository link should be shown
    pub fn has_repo(&self) -> bool {
        !self.repo_url.trim().is_empty()
    }
}

/// Load projects from a YAML list. A missing file means no projects.
pub fn load_projects(path: &Path) -> Result<Vec<Project>> {
    if !path.exists() {
        tracing::debug!("No projects file at {:?}", path);
        return Ok(Vec::new());
    }

    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }
    let projects: Vec<Project> =
        serde_yaml::from_str(&content).with_context(|| format!("Failed to parse {:?}", path))?;

    Ok(projects)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_projects() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("projects.yml");
        fs::write(
            &path,
            r#"
- name: Phoenix CMS
  description: Headless CMS fun with Phoenix LiveView and Airtable
  image: /images/projects/phoenixcms.jpg
  repo_url: https://github.com/bigardone/phoenix-cms
  project_url: https://phoenixcms.herokuapp.com/
  tags: [elixir, phoenix, liveview]
- name: Talento IT
  project_url: https://talentoit.org/
"#,
        )
        .unwrap();

        let projects = load_projects(&path).unwrap();
        assert_eq!(projects.len(), 2);
        assert_eq!(projects[0].tags, vec!["elixir", "phoenix", "liveview"]);
        assert!(projects[0].has_repo());
        assert!(!projects[1].has_repo());
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let projects = load_projects(&dir.path().join("nope.yml")).unwrap();
        assert!(projects.is_empty());
    }
}
