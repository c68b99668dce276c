//! Transport seam between the HTTP client wrapper and the network
//!
//! [`HttpClient`](super::HttpClient) builds a fully-resolved [`HttpRequest`] and hands
//! it to a [`Transport`]. Production uses [`ReqwestTransport`]; tests use the mock.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client as ReqwestClient, Method};
use serde_json::Value;

use crate::error::RequestError;

/// Per-request timeout applied by the reqwest transport
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// A request ready to go on the wire.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

/// Raw response as received from the wire.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub status_text: String,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends a single request. Implementations must not retry.
///
/// An `Err` means no response was received; a response with a failure status is
/// still an `Ok`.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, RequestError>;
}

/// reqwest-backed transport
pub struct ReqwestTransport {
    http: ReqwestClient,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self, RequestError> {
        let http = ReqwestClient::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("fleetop/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(RequestError::from)?;
        Ok(Self { http })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, RequestError> {
        let mut builder = self
            .http
            .request(request.method, &request.url)
            .query(&request.query);

        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        if let Some(body) = &request.body {
            let payload = serde_json::to_vec(body).map_err(|e| {
                RequestError::client(format!("Failed to serialize request body: {}", e))
            })?;
            builder = builder.body(payload);
        }

        let response = builder.send().await.map_err(RequestError::from)?;
        let status = response.status();
        let body = response.text().await.map_err(RequestError::from)?;

        Ok(HttpResponse {
            status: status.as_u16(),
            status_text: status
                .canonical_reason()
                .map(str::to_string)
                .unwrap_or_else(|| format!("HTTP {}", status.as_u16())),
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_creation() {
        assert!(ReqwestTransport::new().is_ok());
    }

    #[test]
    fn test_response_success_range() {
        let ok = HttpResponse {
            status: 204,
            status_text: "No Content".to_string(),
            body: String::new(),
        };
        let redirect = HttpResponse {
            status: 304,
            status_text: "Not Modified".to_string(),
            body: String::new(),
        };
        assert!(ok.is_success());
        assert!(!redirect.is_success());
    }

    #[tokio::test]
    async fn test_connection_refused_is_client_error() {
        let transport = ReqwestTransport::new().unwrap();
        let result = transport
            .send(HttpRequest {
                method: Method::GET,
                url: "http://127.0.0.1:1/cars".to_string(),
                headers: vec![],
                query: vec![],
                body: None,
            })
            .await;

        let err = result.unwrap_err();
        assert_eq!(err.code, crate::error::CLIENT_ERROR_CODE);
        assert!(!err.is_server_error());
    }
}
