//! Executes `HttpRequest` values against the network.
//!
//! # Design
//! `Transport` is the single I/O seam of the crate. `ReqwestTransport` is the
//! default; tests and embedders can supply their own implementation through
//! `ApiClient::with_transport`.
//!
//! Non-2xx handling belongs here, not in the client. By default
//! `ReqwestTransport` raises on any status outside 200..300, which is what
//! the service's existing callers expect. Turn that off with
//! `http_status_as_error(false)` to get every response back as data.
//!
//! Building the reqwest client never panics. If it fails (for example the TLS
//! backend cannot initialise), the error is kept and returned by every
//! `execute` call.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::TransportError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).execute(request).await
    }
}

/// `Transport` backed by a `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    http: Result<reqwest::Client, Arc<reqwest::Error>>,
    http_status_as_error: bool,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::from_builder(reqwest::Client::builder())
    }

    pub fn with_client(http: reqwest::Client) -> Self {
        Self {
            http: Ok(http),
            http_status_as_error: true,
        }
    }

    /// A build failure is deferred to the first request.
    pub fn from_builder(builder: reqwest::ClientBuilder) -> Self {
        Self {
            http: builder.build().map_err(Arc::new),
            http_status_as_error: true,
        }
    }

    /// Whether a non-2xx status becomes `TransportError::Status`. Defaults
    /// to `true`.
    pub fn http_status_as_error(mut self, enabled: bool) -> Self {
        self.http_status_as_error = enabled;
        self
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let http = self
            .http
            .as_ref()
            .map_err(|err| TransportError::ClientInit(Arc::clone(err)))?;
        let mut builder = match request.method {
            HttpMethod::Get => http.get(&request.url),
            HttpMethod::Post => http.post(&request.url),
        };
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let status_text = reason_phrase(&response);
        let headers: Vec<(String, String)> = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|value| (name.as_str().to_string(), value.to_string()))
            })
            .collect();
        let body = response.text().await?;

        if self.http_status_as_error && !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
                status_text,
                headers,
                body,
            });
        }

        Ok(HttpResponse {
            status: status.as_u16(),
            status_text,
            headers,
            body,
        })
    }
}

/// The reason phrase the server sent. hyper only records it when it differs
/// from the canonical one, so fall back to that.
fn reason_phrase(response: &reqwest::Response) -> String {
    match response.extensions().get::<hyper::ext::ReasonPhrase>() {
        Some(reason) => String::from_utf8_lossy(reason.as_bytes()).into_owned(),
        None => response
            .status()
            .canonical_reason()
            .unwrap_or_default()
            .to_string(),
    }
}
