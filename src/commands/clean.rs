//! Clear the cached post list

use anyhow::Result;

use crate::Blog;

/// Remove the cached copy of the post list
pub fn run(blog: &Blog) -> Result<()> {
    blog.store().clear_cache()?;
    tracing::info!("Cleared cached posts in {:?}", blog.cache_path);
    Ok(())
}
