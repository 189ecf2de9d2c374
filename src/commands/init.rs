//! Initialize a new blog

use anyhow::Result;
use chrono::{SecondsFormat, Utc};
use std::fs;
use std::path::Path;

use crate::content::{excerpt, Post};

const CONFIG_TEMPLATE: &str = r##"# blogfront configuration

# Site
title: My Blog
author: John Doe
copyright: © 2024 Creative Blog. All rights reserved.

# Directory
resources_dir: resources
cache_file: .blog-cache/storage.json
downloads_dir: downloads
# export_path: resources/posts.json

# Writing
new_post:
  title: New Post
  read_time: 5
  excerpt_length: 100

# Layout
sidebar:
  breakpoint: 480
  links:
    - { title: Home, href: "#" }
    - { title: About, href: "#" }
    - { title: Blog, href: "#" }
    - { title: Contact, href: "#" }

# Markdown
highlight:
  enable: true
  line_number: false
  theme: base16-ocean.dark
"##;

const SAMPLE_POST: &str = r#"# Hello World

Welcome to your new blog! Every post is a Markdown file next to `posts.json`,
named after the post id.

## Writing

Open **Create Post** in the sidebar, or run:

```bash
$ blogfront new --file my-post.md
```

## Serving

```bash
$ blogfront server
```
"#;

/// Initialize a new blog in the given directory
pub fn init_site(target_dir: &Path) -> Result<()> {
    let resources = target_dir.join("resources");
    fs::create_dir_all(&resources)?;

    fs::write(target_dir.join("_config.yml"), CONFIG_TEMPLATE)?;

    let now = Utc::now();
    let id = now.timestamp_millis().to_string();
    let post = Post {
        id: id.clone(),
        title: "Hello World".to_string(),
        date: now.to_rfc3339_opts(SecondsFormat::Millis, true),
        excerpt: excerpt("Welcome to your new blog! Every post is a Markdown file.", 100),
        read_time: 1,
        markdown: String::new(),
    };

    fs::write(
        resources.join("posts.json"),
        serde_json::to_string_pretty(&vec![post])?,
    )?;
    fs::write(resources.join(format!("{}.md", id)), SAMPLE_POST)?;

    Ok(())
}
