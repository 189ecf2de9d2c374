//! Post preview cards

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use super::{html_escape, post_url};
use crate::content::Post;

/// Summary card for one post
pub struct PostPreview<'a> {
    post: &'a Post,
}

impl<'a> PostPreview<'a> {
    pub fn new(post: &'a Post) -> Self {
        Self { post }
    }

    /// Render the card; following its link opens the detail view for the post
    pub fn render(&self) -> String {
        let post = self.post;
        format!(
            r#"<div class="post-preview" data-post-id="{id}">
  <a class="preview-link" href="{href}">
    <h2>{title}</h2>
    <div class="metadata">
      <span class="date">{date}</span>
      <span class="read-time">{read_time} min read</span>
    </div>
    <p class="excerpt">{excerpt}</p>
  </a>
</div>
"#,
            id = html_escape(&post.id),
            href = post_url(&post.id),
            title = html_escape(&post.title),
            date = html_escape(&format_date(&post.date)),
            read_time = post.read_time,
            excerpt = html_escape(&post.excerpt),
        )
    }
}

/// Format a date string in long form (like "January 5, 2024").
///
/// Accepts RFC 3339 timestamps, bare `YYYY-MM-DD` dates and naive
/// `YYYY-MM-DDTHH:MM:SS` times; anything else renders as `Invalid Date`.
/// Timestamps keep the calendar day of their own offset.
pub fn format_date(date: &str) -> String {
    let date = date.trim();
    let day = DateTime::parse_from_rfc3339(date)
        .map(|d| d.date_naive())
        .or_else(|_| NaiveDate::parse_from_str(date, "%Y-%m-%d"))
        .or_else(|_| NaiveDateTime::parse_from_str(date, "%Y-%m-%dT%H:%M:%S%.f").map(|d| d.date()));

    match day {
        Ok(day) => day.format("%B %-d, %Y").to_string(),
        Err(_) => "Invalid Date".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2024-01-05"), "January 5, 2024");
        assert_eq!(format_date("2024-03-09T14:05:00.000Z"), "March 9, 2024");
        assert_eq!(format_date("2023-12-31T23:30:00-05:00"), "December 31, 2023");
        assert_eq!(format_date("2024-07-04T08:00:00"), "July 4, 2024");
        assert_eq!(format_date("yesterday"), "Invalid Date");
    }

    #[test]
    fn test_render_preview() {
        let post = Post {
            id: "42".to_string(),
            title: "Rust & <Friends>".to_string(),
            date: "2024-01-05".to_string(),
            excerpt: "A short look...".to_string(),
            read_time: 7,
            markdown: String::new(),
        };
        let html = PostPreview::new(&post).render();

        assert!(html.contains(r#"class="post-preview""#));
        assert!(html.contains(r#"href="/posts/42""#));
        assert!(html.contains("<h2>Rust &amp; &lt;Friends&gt;</h2>"));
        assert!(html.contains(r#"<span class="date">January 5, 2024</span>"#));
        assert!(html.contains("7 min read"));
        assert!(html.contains(r#"<p class="excerpt">A short look...</p>"#));
    }
}
