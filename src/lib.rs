// Library root
// -----------
// Blocking client for the Uploadfly file hosting API. The binary
// (`main.rs`) drives the same client from an interactive terminal menu.
//
// Module responsibilities:
// - `api`: the client and its three operations (upload, image upload,
//   delete).
// - `transport`: the HTTP seam and the default reqwest-backed transport.
// - `types`: file inputs, per-operation options and typed response views.
// - `config` / `error`: client settings and the error taxonomy.
// - `ui`: terminal menu flows used by the binary.
pub mod api;
pub mod config;
pub mod error;
pub mod transport;
pub mod types;
pub mod ui;

pub use api::UploadflyClient;
pub use config::{ClientConfig, DEFAULT_BASE_URL};
pub use error::{Result, UploadflyError};
pub use transport::{FilePart, HttpTransport, MultipartBody, Transport, TransportResponse};
pub use types::{
    DeleteMessage, DeleteResponse, FileInput, ImageUploadOptions, UploadOptions, UploadResponse,
    UploadedFile,
};
