//! Externalizing the post list to a JSON file
//!
//! The preferred path asks a [`FilePicker`] for a target and overwrites it.
//! Without a picker the list is dropped into the downloads directory as
//! `posts.json`, the way a browser download would.

use std::path::{Path, PathBuf};

use crate::content::Post;
use crate::{Error, Result};

/// Name suggested to the picker and used for downloads
pub const EXPORT_FILE_NAME: &str = "posts.json";

/// Chooses the file the post list is written to
pub trait FilePicker: Send + Sync {
    /// Returns the chosen path; an error aborts the export
    fn pick(&self, suggested_name: &str) -> Result<PathBuf>;
}

/// Always picks the same, preconfigured path
#[derive(Debug, Clone)]
pub struct FixedPicker(pub PathBuf);

impl FilePicker for FixedPicker {
    fn pick(&self, _suggested_name: &str) -> Result<PathBuf> {
        Ok(self.0.clone())
    }
}

/// How an export was carried out
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportTarget {
    /// Written to a file chosen by the picker
    Picked(PathBuf),
    /// Written through the download fallback
    Downloaded(PathBuf),
}

impl ExportTarget {
    pub fn path(&self) -> &Path {
        match self {
            ExportTarget::Picked(path) | ExportTarget::Downloaded(path) => path,
        }
    }
}

/// Writes the serialized post list to its external target
pub struct PostExporter {
    picker: Option<Box<dyn FilePicker>>,
    downloads_dir: PathBuf,
}

impl PostExporter {
    pub fn new<P: AsRef<Path>>(picker: Option<Box<dyn FilePicker>>, downloads_dir: P) -> Self {
        Self {
            picker,
            downloads_dir: downloads_dir.as_ref().to_path_buf(),
        }
    }

    /// Exporter that always uses the download fallback
    pub fn download_only<P: AsRef<Path>>(downloads_dir: P) -> Self {
        Self::new(None, downloads_dir)
    }

    pub fn has_picker(&self) -> bool {
        self.picker.is_some()
    }

    /// Serialize `posts` (two-space indented) and write them out
    pub async fn export(&self, posts: &[Post]) -> Result<ExportTarget> {
        let json = serde_json::to_string_pretty(posts)?;

        let target = match &self.picker {
            Some(picker) => ExportTarget::Picked(picker.pick(EXPORT_FILE_NAME)?),
            None => ExportTarget::Downloaded(self.downloads_dir.join(EXPORT_FILE_NAME)),
        };

        write_file(target.path(), &json)
            .await
            .map_err(|e| Error::Export(format!("{}: {}", target.path().display(), e)))?;

        tracing::info!("Exported {} posts to {:?}", posts.len(), target.path());
        Ok(target)
    }
}

async fn write_file(path: &Path, content: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(path, content).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::tests::sample_posts;

    struct CancelledPicker;

    impl FilePicker for CancelledPicker {
        fn pick(&self, _suggested_name: &str) -> Result<PathBuf> {
            Err(Error::Export("The user aborted a request.".to_string()))
        }
    }

    #[tokio::test]
    async fn test_export_to_picked_file() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("mine.json");
        std::fs::write(&target, "old").unwrap();

        let exporter = PostExporter::new(
            Some(Box::new(FixedPicker(target.clone()))),
            dir.path().join("downloads"),
        );
        let result = exporter.export(&sample_posts(2)).await.unwrap();

        assert_eq!(result, ExportTarget::Picked(target.clone()));
        let written = std::fs::read_to_string(&target).unwrap();
        assert!(written.starts_with("[\n  {\n    \"id\": \"1\""));
        let parsed: Vec<Post> = serde_json::from_str(&written).unwrap();
        assert_eq!(parsed, sample_posts(2));
        assert!(!dir.path().join("downloads").exists());
    }

    #[tokio::test]
    async fn test_export_download_fallback() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = PostExporter::download_only(dir.path().join("downloads"));
        assert!(!exporter.has_picker());

        let result = exporter.export(&sample_posts(1)).await.unwrap();
        assert_eq!(
            result,
            ExportTarget::Downloaded(dir.path().join("downloads/posts.json"))
        );
        assert!(result.path().exists());
    }

    #[tokio::test]
    async fn test_export_picker_failure() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = PostExporter::new(Some(Box::new(CancelledPicker)), dir.path());
        let err = exporter.export(&sample_posts(1)).await.unwrap_err();
        assert!(err.to_string().contains("aborted"));
    }
}
