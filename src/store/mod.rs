//! Post store accessor
//!
//! Fetches the post list and individual post bodies from static resources.
//! The list is mirrored into client-side storage on every successful fetch
//! and served from there when the resource cannot be loaded.

mod fetcher;
mod storage;

pub use fetcher::{DirFetcher, FetchResponse, Fetcher, MemoryFetcher};
pub use storage::{FileStorage, MemoryStorage, Storage};

use crate::content::Post;
use crate::{Error, Result};

/// Storage key holding the cached post list
pub const POSTS_KEY: &str = "posts";

/// Where the list and the bodies live relative to the site root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceLayout {
    base: String,
}

impl ResourceLayout {
    /// `base` is a directory such as `resources` or `assets`
    pub fn new(base: &str) -> Self {
        Self {
            base: base.trim_matches('/').to_string(),
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    /// `/<base>/posts.json`
    pub fn posts_json(&self) -> String {
        format!("/{}/posts.json", self.base)
    }

    /// `/<base>/<id>.md`
    pub fn post_markdown(&self, id: &str) -> String {
        format!("/{}/{}.md", self.base, id)
    }
}

impl Default for ResourceLayout {
    fn default() -> Self {
        Self::new("resources")
    }
}

/// Loads posts through a [`Fetcher`] with a [`Storage`] fallback
pub struct PostStore<F, S> {
    fetcher: F,
    storage: S,
    layout: ResourceLayout,
}

impl<F: Fetcher, S: Storage> PostStore<F, S> {
    pub fn new(fetcher: F, storage: S, layout: ResourceLayout) -> Self {
        Self {
            fetcher,
            storage,
            layout,
        }
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn layout(&self) -> &ResourceLayout {
        &self.layout
    }

    /// Load the post list.
    ///
    /// One attempt against the list resource; on any failure the cached copy
    /// is returned, or an empty list when there is none.
    pub async fn load_posts(&self) -> Vec<Post> {
        match self.fetch_posts().await {
            Ok(posts) => {
                if let Err(e) = self.cache_posts(&posts) {
                    tracing::warn!("Failed to cache post list: {}", e);
                }
                tracing::debug!("Loaded {} posts from {}", posts.len(), self.layout.posts_json());
                posts
            }
            Err(e) => {
                tracing::info!("{}; falling back to cached posts", e);
                self.cached_posts()
            }
        }
    }

    /// Fetch the markdown body of one post
    pub async fn fetch_post_body(&self, id: &str) -> Result<String> {
        let response = self.fetcher.fetch(&self.layout.post_markdown(id)).await?;
        if !response.is_ok() {
            return Err(Error::PostLoad {
                id: id.to_string(),
                status: response.status,
                status_text: response.status_text,
            });
        }
        Ok(response.body)
    }

    /// Replace the cached copy of the list
    pub fn cache_posts(&self, posts: &[Post]) -> Result<()> {
        self.storage.set(POSTS_KEY, &serde_json::to_string(posts)?)
    }

    /// The cached copy of the list, empty when missing or unreadable
    pub fn cached_posts(&self) -> Vec<Post> {
        let cached = match self.storage.get(POSTS_KEY) {
            Ok(Some(cached)) => cached,
            Ok(None) => return Vec::new(),
            Err(e) => {
                tracing::warn!("Failed to read cached posts: {}", e);
                return Vec::new();
            }
        };
        serde_json::from_str(&cached).unwrap_or_else(|e| {
            tracing::warn!("Discarding unreadable cached posts: {}", e);
            Vec::new()
        })
    }

    /// Drop the cached copy
    pub fn clear_cache(&self) -> Result<()> {
        self.storage.remove(POSTS_KEY)
    }

    async fn fetch_posts(&self) -> Result<Vec<Post>> {
        let response = self.fetcher.fetch(&self.layout.posts_json()).await?;
        if !response.is_ok() {
            return Err(Error::ListLoad {
                status: response.status,
                status_text: response.status_text,
            });
        }
        Ok(serde_json::from_str(&response.body)?)
    }
}
