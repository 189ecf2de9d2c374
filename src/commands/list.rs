//! List posts

use anyhow::Result;

use crate::view::format_date;
use crate::Blog;

/// Print the post list, falling back to the cache when the list is unreadable
pub async fn run(blog: &Blog) -> Result<()> {
    let posts = blog.store().load_posts().await;

    println!("Posts ({}):", posts.len());
    for post in posts {
        println!(
            "  {} - {} [{}] {} min read",
            format_date(&post.date),
            post.title,
            post.id,
            post.read_time
        );
    }

    Ok(())
}
