// Request inputs (files and per-operation options) and typed views of the
// API's responses.

use std::fmt;
use std::io::Read;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// A file to upload: either a path on disk, or an already open reader.
///
/// Paths are opened by the client and the handle is closed when the call
/// returns. A reader is owned by the call the same way and dropped with it.
pub enum FileInput {
    Path(PathBuf),
    Reader {
        /// Name reported to the API when no filename option is given
        name: String,
        reader: Box<dyn Read + Send>,
    },
}

impl FileInput {
    pub fn path(path: impl Into<PathBuf>) -> Self {
        FileInput::Path(path.into())
    }

    pub fn reader(name: impl Into<String>, reader: impl Read + Send + 'static) -> Self {
        FileInput::Reader {
            name: name.into(),
            reader: Box::new(reader),
        }
    }
}

impl fmt::Debug for FileInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileInput::Path(path) => f.debug_tuple("Path").field(path).finish(),
            FileInput::Reader { name, .. } => {
                f.debug_struct("Reader").field("name", name).finish_non_exhaustive()
            }
        }
    }
}

impl From<PathBuf> for FileInput {
    fn from(path: PathBuf) -> Self {
        FileInput::Path(path)
    }
}

impl From<&str> for FileInput {
    fn from(path: &str) -> Self {
        FileInput::Path(PathBuf::from(path))
    }
}

impl From<String> for FileInput {
    fn from(path: String) -> Self {
        FileInput::Path(PathBuf::from(path))
    }
}

/// Options for [`UploadflyClient::upload`](crate::UploadflyClient::upload).
#[derive(Debug, Clone, Default)]
pub struct UploadOptions {
    /// Name to store the file under; defaults to the file's own name
    pub filename: Option<String>,
}

impl UploadOptions {
    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }
}

/// Options for [`UploadflyClient::image_upload`](crate::UploadflyClient::image_upload).
///
/// Unset fields are sent as empty form fields, which the image endpoint
/// reads as "keep the original".
#[derive(Debug, Clone, Default)]
pub struct ImageUploadOptions {
    pub filename: Option<String>,
    /// Size cap understood by the API, e.g. `"2MB"`
    pub max_file_size: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

impl ImageUploadOptions {
    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    pub fn with_max_file_size(mut self, max_file_size: impl Into<String>) -> Self {
        self.max_file_size = Some(max_file_size.into());
        self
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }
}

/// Body returned by the upload endpoints.
///
/// The client hands back raw JSON; this is an optional typed view over it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UploadResponse {
    pub success: bool,
    pub status: u16,
    pub data: UploadedFile,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UploadedFile {
    pub url: String,
    pub path: String,
    #[serde(rename = "type")]
    pub content_type: String,
    /// Human readable, e.g. `"11.00 Bytes"`
    pub size: String,
    pub name: String,
}

/// Body returned by the delete endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DeleteResponse {
    pub success: bool,
    pub status: u16,
    pub data: DeleteMessage,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DeleteMessage {
    pub message: String,
}

impl UploadResponse {
    /// Interpret a pass-through body returned by an upload call.
    pub fn from_value(value: &serde_json::Value) -> serde_json::Result<Self> {
        Self::deserialize(value)
    }
}

impl DeleteResponse {
    /// Interpret a pass-through body returned by a delete call.
    pub fn from_value(value: &serde_json::Value) -> serde_json::Result<Self> {
        Self::deserialize(value)
    }
}
