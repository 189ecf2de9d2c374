//! Error types for blogfront

use thiserror::Error;

/// Result type alias using blogfront's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading, rendering or persisting posts
#[derive(Error, Debug)]
pub enum Error {
    /// The post list resource answered with a non-success status
    #[error("Failed to load posts from JSON: {status} {status_text}")]
    ListLoad { status: u16, status_text: String },

    /// A post body resource answered with a non-success status
    #[error("Failed to load post {id}: {status} {status_text}")]
    PostLoad {
        id: String,
        status: u16,
        status_text: String,
    },

    /// The resource could not be reached at all
    #[error("Transport error: {0}")]
    Transport(String),

    /// Client-side storage failure
    #[error("Storage error: {0}")]
    Storage(String),

    /// Writing the exported post list failed
    #[error("Export error: {0}")]
    Export(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_carry_status() {
        let err = Error::PostLoad {
            id: "42".to_string(),
            status: 404,
            status_text: "Not Found".to_string(),
        };
        assert_eq!(err.to_string(), "Failed to load post 42: 404 Not Found");

        let err = Error::ListLoad {
            status: 500,
            status_text: "Internal Server Error".to_string(),
        };
        assert!(err.to_string().starts_with("Failed to load posts from JSON: 500"));
    }
}
