//! Create-post form

use chrono::{DateTime, Utc};

use super::html_escape;
use crate::config::NewPostConfig;
use crate::content::Post;
use crate::export::ExportTarget;

/// Result of submitting the form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Blank input; nothing happened
    Ignored,
    /// Post appended, cached and exported
    Created { post: Post, target: ExportTarget },
    /// Post appended and cached, but exporting failed
    ExportFailed { post: Post, message: String },
}

/// Form inputs and visibility of the create-post view
#[derive(Debug, Clone, Default)]
pub struct CreatePostForm {
    visible: bool,
    title: String,
    markdown: String,
}

impl CreatePostForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self) {
        self.visible = true;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Replace the current input values
    pub fn fill(&mut self, title: &str, markdown: &str) {
        self.title = title.to_string();
        self.markdown = markdown.to_string();
    }

    pub fn clear(&mut self) {
        self.title.clear();
        self.markdown.clear();
    }

    pub fn markdown(&self) -> &str {
        &self.markdown
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Whitespace-only input is never submitted
    pub fn is_blank(&self) -> bool {
        self.markdown.trim().is_empty()
    }

    /// Build the post the current input describes, `None` for blank input
    pub fn compose(
        &self,
        now: DateTime<Utc>,
        existing: &[Post],
        defaults: &NewPostConfig,
    ) -> Option<Post> {
        if self.is_blank() {
            return None;
        }
        Some(Post::compose(
            &self.markdown,
            Some(&self.title),
            now,
            existing,
            defaults,
        ))
    }

    /// Render the create-post view
    pub fn render(&self) -> String {
        let display = if self.visible { "block" } else { "none" };
        format!(
            r#"<div id="create-post-view" style="display: {display}">
  <form id="create-post-form" method="post" action="/create">
    <input type="text" id="post-title" name="title" placeholder="Title" value="{title}">
    <textarea id="markdown-input" name="markdown" placeholder="Enter markdown content...">{markdown}</textarea>
    <button type="submit">Create Post</button>
  </form>
</div>
"#,
            title = html_escape(&self.title),
            markdown = html_escape(&self.markdown),
        )
    }
}
