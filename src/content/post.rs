//! Post model

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::config::NewPostConfig;

/// Appended to every synthesized excerpt
const EXCERPT_OMISSION: &str = "...";

/// A blog post as stored in `posts.json` and the cache
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// Opaque identifier, unique within a list
    pub id: String,

    /// Post title
    pub title: String,

    /// Publication date (ISO-8601)
    pub date: String,

    /// Body preview shown on the card
    pub excerpt: String,

    /// Estimated read time in minutes
    pub read_time: u32,

    /// Full markdown body; the static list usually leaves it out
    #[serde(default)]
    pub markdown: String,
}

impl Post {
    /// Synthesize a new post from form input.
    ///
    /// The id is the millisecond timestamp of `now`, bumped until it does not
    /// collide with any id in `existing`.
    pub fn compose(
        markdown: &str,
        title: Option<&str>,
        now: DateTime<Utc>,
        existing: &[Post],
        defaults: &NewPostConfig,
    ) -> Self {
        let mut stamp = now.timestamp_millis();
        while existing.iter().any(|p| p.id == stamp.to_string()) {
            stamp += 1;
        }

        let title = title
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or(defaults.title.as_str());

        Self {
            id: stamp.to_string(),
            title: title.to_string(),
            date: now.to_rfc3339_opts(SecondsFormat::Millis, true),
            excerpt: excerpt(markdown, defaults.excerpt_length),
            read_time: defaults.read_time,
            markdown: markdown.to_string(),
        }
    }
}

/// First `length` characters of the body followed by an ellipsis
pub fn excerpt(markdown: &str, length: usize) -> String {
    let mut out: String = markdown.chars().take(length).collect();
    out.push_str(EXCERPT_OMISSION);
    out
}
