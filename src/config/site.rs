//! Blog configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main blog configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BlogConfig {
    // Site
    pub title: String,
    pub author: String,
    pub copyright: String,

    // Directory
    /// Directory holding `posts.json` and the `<id>.md` bodies, also the URL prefix
    pub resources_dir: String,
    /// Key-value file backing the client-side cache
    pub cache_file: String,
    /// Where the download fallback drops `posts.json`
    pub downloads_dir: String,
    /// Preferred export target; when unset the download fallback is used
    pub export_path: Option<String>,

    // Writing
    #[serde(default)]
    pub new_post: NewPostConfig,

    // Layout
    #[serde(default)]
    pub sidebar: SidebarConfig,

    // Markdown
    #[serde(default)]
    pub highlight: HighlightConfig,
}

impl Default for BlogConfig {
    fn default() -> Self {
        Self {
            title: "My Blog".to_string(),
            author: "John Doe".to_string(),
            copyright: "© 2024 Creative Blog. All rights reserved.".to_string(),

            resources_dir: "resources".to_string(),
            cache_file: ".blog-cache/storage.json".to_string(),
            downloads_dir: "downloads".to_string(),
            export_path: None,

            new_post: NewPostConfig::default(),
            sidebar: SidebarConfig::default(),
            highlight: HighlightConfig::default(),
        }
    }
}

impl BlogConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: BlogConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }
}

/// Defaults applied to posts authored through the create form
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NewPostConfig {
    /// Title used when the form leaves the title empty
    pub title: String,
    /// Fixed read time in minutes
    pub read_time: u32,
    /// Number of body characters kept in the excerpt
    pub excerpt_length: usize,
}

impl Default for NewPostConfig {
    fn default() -> Self {
        Self {
            title: "New Post".to_string(),
            read_time: 5,
            excerpt_length: 100,
        }
    }
}

/// Sidebar navigation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SidebarConfig {
    /// Viewport width at or below which an open sidebar closes itself
    pub breakpoint: u32,
    pub links: Vec<NavLink>,
}

impl Default for SidebarConfig {
    fn default() -> Self {
        let link = |title: &str| NavLink {
            title: title.to_string(),
            href: "#".to_string(),
        };
        Self {
            breakpoint: 480,
            links: vec![link("Home"), link("About"), link("Blog"), link("Contact")],
        }
    }
}

/// A plain sidebar link
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NavLink {
    pub title: String,
    pub href: String,
}

/// Code block highlighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    pub enable: bool,
    pub line_number: bool,
    pub theme: String,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            enable: true,
            line_number: false,
            theme: "base16-ocean.dark".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BlogConfig::default();
        assert_eq!(config.title, "My Blog");
        assert_eq!(config.resources_dir, "resources");
        assert_eq!(config.new_post.read_time, 5);
        assert_eq!(config.new_post.excerpt_length, 100);
        assert_eq!(config.sidebar.breakpoint, 480);
        assert_eq!(config.sidebar.links.len(), 4);
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
title: Field Notes
resources_dir: assets
export_path: out/posts.json
new_post:
  title: Untitled
sidebar:
  breakpoint: 600
"#;
        let config: BlogConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "Field Notes");
        assert_eq!(config.resources_dir, "assets");
        assert_eq!(config.export_path.as_deref(), Some("out/posts.json"));
        assert_eq!(config.new_post.title, "Untitled");
        assert_eq!(config.new_post.read_time, 5);
        assert_eq!(config.sidebar.breakpoint, 600);
        assert_eq!(config.sidebar.links[0].title, "Home");
        assert_eq!(config.highlight.theme, "base16-ocean.dark");
    }
}
