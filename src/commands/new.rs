//! Create a new post

use anyhow::Result;
use std::fs;
use std::path::Path;

use crate::view::SubmitOutcome;
use crate::Blog;

/// Where the body of the new post comes from
pub enum Body<'a> {
    Text(&'a str),
    File(&'a Path),
}

/// Create a post the same way the create form does
pub async fn create_post(
    blog: &Blog,
    title: Option<&str>,
    body: Body<'_>,
    save_to: Option<&Path>,
) -> Result<SubmitOutcome> {
    let markdown = match body {
        Body::Text(text) => text.to_string(),
        Body::File(path) => fs::read_to_string(path)?,
    };

    let app = blog.app(save_to);
    app.initialize().await;
    app.open_create_form().await;

    let outcome = app.submit_post(title.unwrap_or_default(), &markdown).await;
    match &outcome {
        SubmitOutcome::Ignored => println!("Nothing to post: the body is empty."),
        SubmitOutcome::Created { post, target } => {
            println!("Created: {} ({})", post.title, post.id);
            println!("Saved post list to {:?}", target.path());
        }
        SubmitOutcome::ExportFailed { post, message } => {
            println!("Created: {} ({})", post.title, post.id);
            anyhow::bail!("{}", message);
        }
    }

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::Post;

    #[tokio::test]
    async fn test_create_post_saves_to_target() {
        let dir = tempfile::tempdir().unwrap();
        crate::commands::init::init_site(dir.path()).unwrap();
        let blog = Blog::new(dir.path()).unwrap();
        let target = dir.path().join("export/posts.json");

        let outcome = create_post(&blog, Some("Second"), Body::Text("Body text"), Some(&target))
            .await
            .unwrap();
        assert!(matches!(outcome, SubmitOutcome::Created { .. }));

        let saved: Vec<Post> =
            serde_json::from_str(&fs::read_to_string(&target).unwrap()).unwrap();
        assert_eq!(saved.len(), 2);
        assert_eq!(saved[1].title, "Second");
        assert_eq!(blog.store().cached_posts().len(), 2);
    }

    #[tokio::test]
    async fn test_create_post_ignores_blank_body() {
        let dir = tempfile::tempdir().unwrap();
        let blog = Blog::new(dir.path()).unwrap();

        let outcome = create_post(&blog, None, Body::Text(" \n "), None)
            .await
            .unwrap();
        assert_eq!(outcome, SubmitOutcome::Ignored);
        assert!(!blog.downloads_dir.join("posts.json").exists());
    }
}
