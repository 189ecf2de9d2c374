//! Static resource fetching

use std::collections::HashMap;
use std::future::Future;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use crate::{Error, Result};

/// A completed fetch, successful or not
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    pub status: u16,
    pub status_text: String,
    pub body: String,
}

impl FetchResponse {
    /// 200 OK with the given body
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            status_text: "OK".to_string(),
            body: body.into(),
        }
    }

    /// 404 Not Found with an empty body
    pub fn not_found() -> Self {
        Self {
            status: 404,
            status_text: "Not Found".to_string(),
            body: String::new(),
        }
    }

    /// Whether the status is in the 2xx range
    pub fn is_ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Source of static resources addressed by slash-separated paths.
///
/// A response with any status is `Ok`; `Err` means the resource could not be
/// reached at all.
pub trait Fetcher: Send + Sync {
    fn fetch(&self, path: &str) -> impl Future<Output = Result<FetchResponse>> + Send;
}

/// Serves resources out of a directory on disk
#[derive(Debug, Clone)]
pub struct DirFetcher {
    root: PathBuf,
}

impl DirFetcher {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Map a resource path onto the root, refusing anything that escapes it
    fn resolve(&self, path: &str) -> Option<PathBuf> {
        let relative = Path::new(path.trim_start_matches('/'));
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if escapes {
            None
        } else {
            Some(self.root.join(relative))
        }
    }
}

impl Fetcher for DirFetcher {
    async fn fetch(&self, path: &str) -> Result<FetchResponse> {
        let Some(file) = self.resolve(path) else {
            tracing::debug!("Rejected resource path {}", path);
            return Ok(FetchResponse::not_found());
        };

        match tokio::fs::read_to_string(&file).await {
            Ok(body) => Ok(FetchResponse::ok(body)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(FetchResponse::not_found()),
            Err(e) => Err(Error::Transport(format!("{}: {}", file.display(), e))),
        }
    }
}

/// In-memory resources, switchable offline to simulate transport failures
#[derive(Debug, Default)]
pub struct MemoryFetcher {
    resources: Mutex<HashMap<String, FetchResponse>>,
    offline: AtomicBool,
}

impl MemoryFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `body` with 200 OK at `path`
    pub fn insert(&self, path: &str, body: impl Into<String>) {
        self.respond(path, FetchResponse::ok(body));
    }

    /// Serve an arbitrary response at `path`
    pub fn respond(&self, path: &str, response: FetchResponse) {
        if let Ok(mut resources) = self.resources.lock() {
            resources.insert(normalize(path), response);
        }
    }

    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }
}

impl Fetcher for MemoryFetcher {
    async fn fetch(&self, path: &str) -> Result<FetchResponse> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(Error::Transport("network unreachable".to_string()));
        }
        let resources = self
            .resources
            .lock()
            .map_err(|e| Error::Transport(e.to_string()))?;
        Ok(resources
            .get(&normalize(path))
            .cloned()
            .unwrap_or_else(FetchResponse::not_found))
    }
}

fn normalize(path: &str) -> String {
    path.trim_start_matches('/').to_string()
}
