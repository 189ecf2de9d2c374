//! Content module - post records and markdown rendering

mod markdown;
mod post;

pub use markdown::MarkdownRenderer;
pub use post::{excerpt, Post};
