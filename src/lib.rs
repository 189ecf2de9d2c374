//! blogfront: a small Markdown blog front-end
//!
//! Lists post previews from a static `posts.json`, renders individual post
//! bodies from Markdown, and lets new posts be authored into a client-side
//! cache and an exported JSON file. The page is served locally, with every
//! UI event handled against one shared view state.

pub mod app;
pub mod commands;
pub mod config;
pub mod content;
pub mod error;
pub mod export;
pub mod server;
pub mod store;
pub mod view;

pub use error::{Error, Result};

use std::path::{Path, PathBuf};

use app::BlogApp;
use export::{FilePicker, FixedPicker, PostExporter};
use store::{DirFetcher, FileStorage, PostStore, ResourceLayout};

/// A blog page backed by the local filesystem
pub type LocalBlogApp = BlogApp<DirFetcher, FileStorage>;

/// The blog site rooted at a directory
#[derive(Clone)]
pub struct Blog {
    /// Blog configuration
    pub config: config::BlogConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Directory holding posts.json and the post bodies
    pub resources_dir: PathBuf,
    /// Key-value file backing the post cache
    pub cache_path: PathBuf,
    /// Download fallback directory
    pub downloads_dir: PathBuf,
}

impl Blog {
    /// Open the blog in a directory, reading `_config.yml` when present
    pub fn new<P: AsRef<Path>>(base_dir: P) -> anyhow::Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::BlogConfig::load(&config_path)?
        } else {
            config::BlogConfig::default()
        };

        Ok(Self::with_config(base_dir, config))
    }

    pub fn with_config(base_dir: PathBuf, config: config::BlogConfig) -> Self {
        let resources_dir = base_dir.join(&config.resources_dir);
        let cache_path = base_dir.join(&config.cache_file);
        let downloads_dir = base_dir.join(&config.downloads_dir);

        Self {
            config,
            base_dir,
            resources_dir,
            cache_path,
            downloads_dir,
        }
    }

    /// Post store reading resources relative to the base directory
    pub fn store(&self) -> PostStore<DirFetcher, FileStorage> {
        PostStore::new(
            DirFetcher::new(&self.base_dir),
            FileStorage::new(&self.cache_path),
            ResourceLayout::new(&self.config.resources_dir),
        )
    }

    /// Exporter writing to `save_to`, else the configured export path, else
    /// the downloads directory
    pub fn exporter(&self, save_to: Option<&Path>) -> PostExporter {
        let target = save_to.map(Path::to_path_buf).or_else(|| {
            self.config
                .export_path
                .as_ref()
                .map(|p| self.base_dir.join(p))
        });
        let picker = target.map(|path| Box::new(FixedPicker(path)) as Box<dyn FilePicker>);
        PostExporter::new(picker, &self.downloads_dir)
    }

    /// The page state machine for this blog
    pub fn app(&self, save_to: Option<&Path>) -> LocalBlogApp {
        BlogApp::new(self.config.clone(), self.store(), self.exporter(save_to))
    }
}
