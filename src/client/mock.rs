//! Mock transport for testing
//!
//! Serves canned responses per method and path, and records every request so tests
//! can assert on call counts, URLs, headers and bodies without touching the network.

use async_trait::async_trait;
use reqwest::{Method, StatusCode};
use serde_json::Value;
use tokio::sync::Mutex;

use super::transport::{HttpRequest, HttpResponse, Transport};
use crate::error::RequestError;

/// Base URL tests should give to clients backed by this mock
pub const MOCK_BASE_URL: &str = "http://fleet.test/api";

/// Canned responses for one method + path (relative to [`MOCK_BASE_URL`]).
///
/// Responses are served in order; the last one repeats once the queue is drained.
#[derive(Debug)]
struct MockRoute {
    method: Method,
    path: String,
    responses: Vec<HttpResponse>,
    served: usize,
}

/// Mock transport for testing.
///
/// # Example
/// ```ignore
/// let mock = Arc::new(MockTransport::new());
/// mock.respond_json("GET", "/cars", json!([])).await;
///
/// let client = HttpClient::with_transport("http://fleet.test/api", mock.clone());
/// let _: Vec<CarDto> = client.get("/cars", &RequestOptions::new()).await?;
/// assert_eq!(mock.calls_to("GET", "/cars").await, 1);
/// ```
#[derive(Debug, Default)]
pub struct MockTransport {
    routes: Mutex<Vec<MockRoute>>,
    /// Transport failure returned for every request (if set)
    error: Mutex<Option<RequestError>>,
    /// Captured requests for test assertions
    captured_requests: Mutex<Vec<HttpRequest>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a raw response for `method path`.
    pub async fn respond(&self, method: &str, path: &str, status: u16, body: &str) {
        let method = Method::from_bytes(method.as_bytes()).unwrap_or(Method::GET);
        let response = HttpResponse {
            status,
            status_text: StatusCode::from_u16(status)
                .ok()
                .and_then(|s| s.canonical_reason())
                .unwrap_or("Unknown")
                .to_string(),
            body: body.to_string(),
        };

        let mut routes = self.routes.lock().await;
        match routes
            .iter_mut()
            .find(|r| r.method == method && r.path == path)
        {
            Some(route) => route.responses.push(response),
            None => routes.push(MockRoute {
                method,
                path: path.to_string(),
                responses: vec![response],
                served: 0,
            }),
        }
    }

    /// Queue a 200 response with a JSON body.
    pub async fn respond_json(&self, method: &str, path: &str, body: Value) {
        self.respond(method, path, 200, &body.to_string()).await;
    }

    /// Fail every request at the transport level.
    pub async fn fail_with(&self, error: RequestError) {
        *self.error.lock().await = Some(error);
    }

    /// Total number of requests received.
    pub async fn call_count(&self) -> usize {
        self.captured_requests.lock().await.len()
    }

    /// Number of requests received for `method path`.
    pub async fn calls_to(&self, method: &str, path: &str) -> usize {
        self.captured_requests
            .lock()
            .await
            .iter()
            .filter(|r| r.method.as_str() == method && route_path(&r.url) == path)
            .count()
    }

    /// All requests received, in order.
    pub async fn captured_requests(&self) -> Vec<HttpRequest> {
        self.captured_requests.lock().await.clone()
    }
}

/// Path relative to [`MOCK_BASE_URL`]; URLs on other hosts are returned whole.
fn route_path(url: &str) -> &str {
    url.strip_prefix(MOCK_BASE_URL).unwrap_or(url)
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, RequestError> {
        self.captured_requests.lock().await.push(request.clone());

        if let Some(err) = self.error.lock().await.clone() {
            return Err(err);
        }

        let path = route_path(&request.url);
        let mut routes = self.routes.lock().await;
        let route = routes
            .iter_mut()
            .find(|r| r.method == request.method && r.path == path);

        match route {
            Some(route) => {
                let idx = route.served.min(route.responses.len() - 1);
                route.served += 1;
                Ok(route.responses[idx].clone())
            }
            None => Ok(HttpResponse {
                status: 404,
                status_text: "Not Found".to_string(),
                body: format!(r#"{{"error":"no mock for {} {}"}}"#, request.method, request.url),
            }),
        }
    }
}
