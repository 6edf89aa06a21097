// Error type shared by every client operation: local validation failures
// and remote/transport failures, each carrying what failed.

use std::path::PathBuf;

use thiserror::Error;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, UploadflyError>;

/// Everything that can go wrong when talking to Uploadfly.
///
/// Argument, configuration and not-found errors are raised before any
/// network activity. `Upload` and `Delete` cover both non-success HTTP
/// statuses and transport failures; `status` is `None` for the latter.
#[derive(Error, Debug)]
pub enum UploadflyError {
    /// Bad or missing API key, or an unusable client configuration
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Missing or malformed call argument
    #[error("Invalid argument: {0}")]
    Argument(String),

    /// Local file path does not exist
    #[error("File does not exist: {}", .0.display())]
    NotFound(PathBuf),

    /// Upload request failed remotely or in transport
    #[error("{filename} failed to upload: {message}")]
    Upload {
        filename: String,
        status: Option<u16>,
        message: String,
    },

    /// Delete request failed remotely or in transport
    #[error("Failed to delete {file_url}: {message}")]
    Delete {
        file_url: String,
        status: Option<u16>,
        message: String,
    },
}

impl UploadflyError {
    /// HTTP status reported by the API, if the request got that far.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Upload { status, .. } | Self::Delete { status, .. } => *status,
            _ => None,
        }
    }

    /// True for errors raised locally, before anything hit the network.
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            Self::Configuration(_) | Self::Argument(_) | Self::NotFound(_)
        )
    }
}
