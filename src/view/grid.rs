//! Posts grid

use super::{html_escape, PostPreview};
use crate::content::Post;

/// The grid region: either a run of preview cards or an inline error
#[derive(Debug, Clone)]
pub struct PostsGrid {
    content: String,
    previews: usize,
    visible: bool,
}

impl PostsGrid {
    pub fn new() -> Self {
        Self {
            content: String::new(),
            previews: 0,
            visible: true,
        }
    }

    /// Clear the grid and add one preview per post, in order
    pub fn render(&mut self, posts: &[Post]) {
        self.content = posts
            .iter()
            .map(|post| PostPreview::new(post).render())
            .collect();
        self.previews = posts.len();
    }

    /// Replace the grid content with an error message
    pub fn display_error(&mut self, message: &str) {
        tracing::warn!("{}", message);
        self.content = format!(
            r#"<div class="error-message">
  <h3>Error:</h3>
  <p>{}</p>
</div>
"#,
            html_escape(message)
        );
        self.previews = 0;
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Number of preview cards currently shown
    pub fn preview_count(&self) -> usize {
        self.previews
    }

    pub fn has_error(&self) -> bool {
        self.content.contains(r#"class="error-message""#)
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// CSS `display` value for the grid
    pub fn display(&self) -> &'static str {
        if self.visible {
            "flex"
        } else {
            "none"
        }
    }
}

impl Default for PostsGrid {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::tests::sample_posts;

    #[test]
    fn test_render_keeps_order() {
        let mut grid = PostsGrid::new();
        grid.render(&sample_posts(3));

        assert_eq!(grid.preview_count(), 3);
        assert_eq!(grid.content().matches(r#"class="post-preview""#).count(), 3);
        let first = grid.content().find("Post 1").unwrap();
        let third = grid.content().find("Post 3").unwrap();
        assert!(first < third);
    }

    #[test]
    fn test_render_replaces_previous_content() {
        let mut grid = PostsGrid::new();
        grid.render(&sample_posts(3));
        grid.render(&[]);
        assert_eq!(grid.preview_count(), 0);
        assert!(grid.content().is_empty());
    }

    #[test]
    fn test_display_error() {
        let mut grid = PostsGrid::new();
        grid.render(&sample_posts(2));
        grid.display_error("Error loading post detail: <boom>");

        assert!(grid.has_error());
        assert_eq!(grid.preview_count(), 0);
        assert!(grid.content().contains("<p>Error loading post detail: &lt;boom&gt;</p>"));
    }

    #[test]
    fn test_display() {
        let mut grid = PostsGrid::new();
        assert_eq!(grid.display(), "flex");
        grid.set_visible(false);
        assert_eq!(grid.display(), "none");
    }
}
