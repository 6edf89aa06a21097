// Transport seam: the client builds requests, a `Transport` sends them.
// `HttpTransport` is the default, a thin wrapper around reqwest's blocking
// client. Tests and embedders can plug in anything else that speaks HTTP.

use std::io::Read;
use std::sync::Arc;

use anyhow::{Context, Result};
use reqwest::blocking::{multipart, Client, Response};
use reqwest::header::HeaderMap;

use crate::config::ClientConfig;

/// Binary part of a multipart upload.
pub struct FilePart {
    /// Form field name
    pub field: &'static str,
    pub filename: String,
    /// Owned source; dropped (and the file closed) together with the body
    pub reader: Box<dyn Read + Send>,
}

/// A multipart/form-data body: one file part plus plain text fields.
pub struct MultipartBody {
    pub file: FilePart,
    pub fields: Vec<(&'static str, String)>,
}

/// Status and raw body of a finished HTTP exchange.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    status: u16,
    body: Vec<u8>,
}

impl TransportResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    /// True for any 2xx status.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Decode the body as JSON.
    pub fn json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::from_slice(&self.body)
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Minimal blocking HTTP client the Uploadfly client is written against.
///
/// Implementations return `Ok` for any response that arrived, whatever its
/// status; `Err` is reserved for failures to complete the exchange.
pub trait Transport: Send + Sync {
    /// POST a multipart body. The body (and the reader inside it) must be
    /// consumed or dropped before returning.
    fn post_multipart(
        &self,
        url: &str,
        body: MultipartBody,
        headers: &HeaderMap,
    ) -> Result<TransportResponse>;

    /// DELETE with a JSON body.
    fn delete_json(
        &self,
        url: &str,
        body: &serde_json::Value,
        headers: &HeaderMap,
    ) -> Result<TransportResponse>;
}

impl<T: Transport + ?Sized> Transport for Arc<T> {
    fn post_multipart(
        &self,
        url: &str,
        body: MultipartBody,
        headers: &HeaderMap,
    ) -> Result<TransportResponse> {
        (**self).post_multipart(url, body, headers)
    }

    fn delete_json(
        &self,
        url: &str,
        body: &serde_json::Value,
        headers: &HeaderMap,
    ) -> Result<TransportResponse> {
        (**self).delete_json(url, body, headers)
    }
}

/// Default transport backed by `reqwest::blocking`.
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Build the underlying reqwest client from the timeout and user agent
    /// in `config`.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn post_multipart(
        &self,
        url: &str,
        body: MultipartBody,
        headers: &HeaderMap,
    ) -> Result<TransportResponse> {
        let MultipartBody { file, fields } = body;

        // Content type follows the name the file is stored under, not the
        // local path.
        let mime = mime_guess::from_path(&file.filename).first_or_octet_stream();
        let part = multipart::Part::reader(file.reader)
            .file_name(file.filename)
            .mime_str(mime.as_ref())
            .context("Invalid content type for file part")?;

        let mut form = multipart::Form::new().part(file.field, part);
        for (name, value) in fields {
            form = form.text(name, value);
        }

        let res = self
            .client
            .post(url)
            .headers(headers.clone())
            .multipart(form)
            .send()
            .context("Failed to send upload request")?;
        read_response(res)
    }

    fn delete_json(
        &self,
        url: &str,
        body: &serde_json::Value,
        headers: &HeaderMap,
    ) -> Result<TransportResponse> {
        let res = self
            .client
            .delete(url)
            .headers(headers.clone())
            .json(body)
            .send()
            .context("Failed to send delete request")?;
        read_response(res)
    }
}

fn read_response(res: Response) -> Result<TransportResponse> {
    let status = res.status().as_u16();
    let body = res.bytes().context("Failed to read response body")?;
    Ok(TransportResponse::new(status, body.to_vec()))
}
