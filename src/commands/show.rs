//! Render one post body

use anyhow::Result;

use crate::content::MarkdownRenderer;
use crate::Blog;

/// Fetch post `id` and return its body rendered as HTML
pub async fn render_post(blog: &Blog, id: &str) -> Result<String> {
    let markdown = blog.store().fetch_post_body(id).await?;
    let renderer = MarkdownRenderer::with_config(&blog.config.highlight);
    Ok(renderer.render(&markdown))
}
