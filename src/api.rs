// API client module: the Uploadfly client itself. Each operation checks its
// arguments, builds one request, hands it to the transport and returns the
// decoded JSON body untouched.

use std::fs::File;
use std::io::{ErrorKind, Read};

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde_json::{json, Value};
use tracing::{debug, instrument};

use crate::config::ClientConfig;
use crate::error::{Result, UploadflyError};
use crate::transport::{FilePart, HttpTransport, MultipartBody, Transport, TransportResponse};
use crate::types::{FileInput, ImageUploadOptions, UploadOptions};

/// Uploadfly API client. Holds the API key and the endpoint it talks to;
/// both are fixed once the client is built.
///
/// The client keeps no per-call state, so one instance can be shared across
/// threads whenever its transport can.
#[derive(Clone)]
pub struct UploadflyClient<T = HttpTransport> {
    transport: T,
    config: ClientConfig,
    auth: HeaderValue,
}

/// A file ready to be sent: its default name and the owned handle.
struct OpenedFile {
    name: String,
    reader: Box<dyn Read + Send>,
}

impl UploadflyClient<HttpTransport> {
    /// Client for the production API.
    pub fn new(api_key: &str) -> Result<Self> {
        Self::with_config(api_key, ClientConfig::default())
    }

    /// Client using the default HTTP transport with custom settings.
    pub fn with_config(api_key: &str, config: ClientConfig) -> Result<Self> {
        let auth = bearer_header(api_key)?;
        let transport = HttpTransport::new(&config)
            .map_err(|e| UploadflyError::Configuration(format!("{:#}", e)))?;
        Self::assemble(auth, config, transport)
    }
}

impl<T: Transport> UploadflyClient<T> {
    /// Client sending its requests through `transport`.
    pub fn with_transport(api_key: &str, config: ClientConfig, transport: T) -> Result<Self> {
        let auth = bearer_header(api_key)?;
        Self::assemble(auth, config, transport)
    }

    fn assemble(auth: HeaderValue, config: ClientConfig, transport: T) -> Result<Self> {
        reqwest::Url::parse(&config.base_url).map_err(|e| {
            UploadflyError::Configuration(format!("Invalid base URL {}: {}", config.base_url, e))
        })?;
        Ok(Self {
            transport,
            config,
            auth,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Upload a file to `POST /upload`.
    ///
    /// `file` is a path or an open reader. The stored name is
    /// `options.filename` when set, otherwise the file's own name.
    #[instrument(skip(self, file, options))]
    pub fn upload(&self, file: impl Into<FileInput>, options: &UploadOptions) -> Result<Value> {
        let source = open_file(file.into())?;
        let filename = resolve_filename(options.filename.as_deref(), &source.name)?;

        let fields = vec![("filename", filename.clone())];
        self.send_upload("/upload", source, filename, fields)
    }

    /// Upload an image to `POST /image/upload` with optional resize hints.
    ///
    /// Unset hints go out as empty fields.
    #[instrument(skip(self, file, options))]
    pub fn image_upload(
        &self,
        file: impl Into<FileInput>,
        options: &ImageUploadOptions,
    ) -> Result<Value> {
        let source = open_file(file.into())?;
        let filename = resolve_filename(options.filename.as_deref(), &source.name)?;

        let fields = vec![
            ("filename", filename.clone()),
            ("maxFileSize", options.max_file_size.clone().unwrap_or_default()),
            ("width", options.width.map(|w| w.to_string()).unwrap_or_default()),
            ("height", options.height.map(|h| h.to_string()).unwrap_or_default()),
        ];
        self.send_upload("/image/upload", source, filename, fields)
    }

    /// Delete a previously uploaded file by its public URL.
    #[instrument(skip(self))]
    pub fn delete(&self, file_url: &str) -> Result<Value> {
        if file_url.is_empty() {
            return Err(UploadflyError::Argument(
                "A file url must be provided".to_string(),
            ));
        }

        let url = self.config.endpoint("/delete");
        let mut headers = self.auth_headers();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let body = json!({ "file_url": file_url });

        let fail = |status: Option<u16>, message: String| UploadflyError::Delete {
            file_url: file_url.to_string(),
            status,
            message,
        };

        debug!(%url, "sending delete request");
        let res = self
            .transport
            .delete_json(&url, &body, &headers)
            .map_err(|e| fail(None, format!("{:#}", e)))?;
        debug!(status = res.status(), "delete request finished");

        if !res.is_success() {
            return Err(fail(Some(res.status()), failure_message(&res)));
        }
        res.json()
            .map_err(|e| fail(Some(res.status()), format!("Invalid JSON in response: {}", e)))
    }

    fn send_upload(
        &self,
        path: &str,
        source: OpenedFile,
        filename: String,
        fields: Vec<(&'static str, String)>,
    ) -> Result<Value> {
        let url = self.config.endpoint(path);
        let body = MultipartBody {
            file: FilePart {
                field: "file",
                filename: filename.clone(),
                reader: source.reader,
            },
            fields,
        };

        let fail = |status: Option<u16>, message: String| UploadflyError::Upload {
            filename: filename.clone(),
            status,
            message,
        };

        // The body owns the file handle; it is gone once the transport returns.
        debug!(%url, %filename, "sending upload request");
        let res = self
            .transport
            .post_multipart(&url, body, &self.auth_headers())
            .map_err(|e| fail(None, format!("{:#}", e)))?;
        debug!(status = res.status(), %filename, "upload request finished");

        if !res.is_success() {
            return Err(fail(Some(res.status()), failure_message(&res)));
        }
        res.json()
            .map_err(|e| fail(Some(res.status()), format!("Invalid JSON in response: {}", e)))
    }

    /// Authorization header map sent with every request.
    fn auth_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, self.auth.clone());
        headers
    }
}

fn bearer_header(api_key: &str) -> Result<HeaderValue> {
    if api_key.is_empty() {
        return Err(UploadflyError::Configuration(
            "An API key is required.".to_string(),
        ));
    }
    let mut value = HeaderValue::from_str(&format!("Bearer {}", api_key)).map_err(|_| {
        UploadflyError::Configuration(
            "API key contains characters not allowed in an HTTP header".to_string(),
        )
    })?;
    value.set_sensitive(true);
    Ok(value)
}

/// Turn a `FileInput` into an owned, open handle.
fn open_file(input: FileInput) -> Result<OpenedFile> {
    match input {
        FileInput::Path(path) => {
            if path.as_os_str().is_empty() {
                return Err(UploadflyError::Argument("A file is required.".to_string()));
            }
            if path.is_dir() {
                return Err(UploadflyError::Argument(format!(
                    "{} is a directory, not a file",
                    path.display()
                )));
            }
            let file = File::open(&path).map_err(|e| match e.kind() {
                ErrorKind::NotFound => UploadflyError::NotFound(path.clone()),
                _ => UploadflyError::Argument(format!(
                    "Cannot open {}: {}",
                    path.display(),
                    e
                )),
            })?;
            let name = path
                .file_name()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
            Ok(OpenedFile {
                name,
                reader: Box::new(file),
            })
        }
        FileInput::Reader { name, reader } => Ok(OpenedFile { name, reader }),
    }
}

fn resolve_filename(requested: Option<&str>, default: &str) -> Result<String> {
    match requested {
        Some(name) => Ok(name.to_string()),
        None if default.is_empty() => Err(UploadflyError::Argument(
            "A filename is required when the file has no name of its own".to_string(),
        )),
        None => Ok(default.to_string()),
    }
}

fn failure_message(res: &TransportResponse) -> String {
    let text = res.text();
    let text = text.trim();
    if text.is_empty() {
        format!("HTTP {}", res.status())
    } else {
        format!("HTTP {} - {}", res.status(), text)
    }
}
