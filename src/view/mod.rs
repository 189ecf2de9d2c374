//! View layer
//!
//! Each piece of the page keeps its own presentation state and renders to an
//! HTML fragment; [`layout`] stitches the fragments into the page shell.

mod create;
mod detail;
mod grid;
pub mod layout;
mod preview;
mod sidebar;

pub use create::{CreatePostForm, SubmitOutcome};
pub use detail::{DetailView, ShowTicket, ViewMode};
pub use grid::PostsGrid;
pub use preview::{format_date, PostPreview};
pub use sidebar::{ClickTarget, Sidebar};

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

/// Characters escaped when a post id becomes a path segment
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Escape HTML special characters
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Detail route for a post id
pub fn post_url(id: &str) -> String {
    format!("/posts/{}", utf8_percent_encode(id, PATH_SEGMENT))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_escape() {
        assert_eq!(
            html_escape(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_post_url_encodes_id() {
        assert_eq!(post_url("1700000000000"), "/posts/1700000000000");
        assert_eq!(post_url("a b/c"), "/posts/a%20b%2Fc");
    }
}
