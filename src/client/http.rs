//! HTTP client wrapper with uniform headers, query flattening, retry and error
//! normalization.

use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock};

use log::debug;
use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::retry::{RetryConfigUpdate, RetryPolicy};
use super::transport::{HttpRequest, HttpResponse, ReqwestTransport, Transport};
use crate::error::RequestError;

/// Headers sent with every request unless the caller overrides them
pub const DEFAULT_HEADERS: [(&str, &str); 2] = [
    ("Content-Type", "application/json"),
    ("Accept", "application/json"),
];

/// A query parameter value. Every scalar is stringified; lists become repeated keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    One(String),
    Many(Vec<String>),
}

macro_rules! impl_param_from_scalar {
    ($($t:ty),*) => {
        $(
            impl From<$t> for ParamValue {
                fn from(value: $t) -> Self {
                    ParamValue::One(value.to_string())
                }
            }
        )*
    };
}

impl_param_from_scalar!(&str, String, bool, u16, u32, u64, usize, i32, i64, f64);

impl<T: ToString> From<Vec<T>> for ParamValue {
    fn from(values: Vec<T>) -> Self {
        ParamValue::Many(values.iter().map(ToString::to_string).collect())
    }
}

/// Per-request options shared by every verb.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub params: BTreeMap<String, ParamValue>,
    pub headers: Vec<(String, String)>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a query parameter.
    #[allow(dead_code)]
    pub fn param(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    /// Add every entry of an already-flat string map (e.g. pagination params).
    pub fn params(mut self, params: BTreeMap<String, String>) -> Self {
        for (name, value) in params {
            self.params.insert(name, ParamValue::One(value));
        }
        self
    }

    /// Add a header. Caller headers win over [`DEFAULT_HEADERS`].
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

/// JSON HTTP client against a configurable base URL.
///
/// Every verb goes through the same pipeline: resolve URL, merge headers, flatten
/// params, send, retry per the live [`RetryPolicy`], normalize failures into
/// [`RequestError`].
pub struct HttpClient {
    base_url: String,
    transport: Arc<dyn Transport>,
    retry: RwLock<RetryPolicy>,
}

impl HttpClient {
    /// Create a client backed by reqwest.
    pub fn new(base_url: impl Into<String>) -> Result<Self, RequestError> {
        let transport = ReqwestTransport::new()?;
        Ok(Self::with_transport(base_url, Arc::new(transport)))
    }

    /// Create a client over an arbitrary transport.
    pub fn with_transport(base_url: impl Into<String>, transport: Arc<dyn Transport>) -> Self {
        Self {
            base_url: base_url.into(),
            transport,
            retry: RwLock::new(RetryPolicy::default()),
        }
    }

    /// Replace the retry policy.
    pub fn with_retry_policy(self, policy: RetryPolicy) -> Self {
        Self {
            retry: RwLock::new(policy),
            ..self
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Merge fields into the live retry policy. In-flight requests keep the policy
    /// they started with.
    #[allow(dead_code)]
    pub fn configure_retry(&self, update: RetryConfigUpdate) {
        self.retry
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .apply(update);
    }

    /// Snapshot of the live retry policy.
    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Absolute URLs pass through; anything else is joined onto the base URL.
    pub fn resolve_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }

        let base = self.base_url.trim_end_matches('/');
        if path.starts_with('/') {
            format!("{}{}", base, path)
        } else {
            format!("{}/{}", base, path)
        }
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        options: &RequestOptions,
    ) -> Result<T, RequestError> {
        self.request(Method::GET, path, None, options).await
    }

    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        options: &RequestOptions,
    ) -> Result<T, RequestError> {
        let body = encode_body(body)?;
        self.request(Method::POST, path, Some(body), options).await
    }

    pub async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        options: &RequestOptions,
    ) -> Result<T, RequestError> {
        let body = encode_body(body)?;
        self.request(Method::PUT, path, Some(body), options).await
    }

    pub async fn patch<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        options: &RequestOptions,
    ) -> Result<T, RequestError> {
        let body = encode_body(body)?;
        self.request(Method::PATCH, path, Some(body), options).await
    }

    pub async fn delete<T: DeserializeOwned>(
        &self,
        path: &str,
        options: &RequestOptions,
    ) -> Result<T, RequestError> {
        self.request(Method::DELETE, path, None, options).await
    }

    async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        options: &RequestOptions,
    ) -> Result<T, RequestError> {
        let request = HttpRequest {
            url: self.resolve_url(path),
            headers: merge_headers(&options.headers),
            query: flatten_params(&options.params),
            method,
            body,
        };
        let label = format!("{} {}", request.method, request.url);
        let policy = self.retry_policy();
        let transport = &self.transport;

        debug!("{}", label);
        let response = policy
            .run(&label, || {
                let request = request.clone();
                async move {
                    let response = transport.send(request).await?;
                    if response.is_success() {
                        Ok(response)
                    } else {
                        Err(status_error(response))
                    }
                }
            })
            .await?;

        decode_body(response)
    }
}

fn encode_body<B: Serialize + ?Sized>(body: &B) -> Result<Value, RequestError> {
    serde_json::to_value(body)
        .map_err(|e| RequestError::client(format!("Failed to serialize request body: {}", e)))
}

/// Default headers first, then caller headers replacing any same-named default.
fn merge_headers(custom: &[(String, String)]) -> Vec<(String, String)> {
    let mut headers: Vec<(String, String)> = DEFAULT_HEADERS
        .iter()
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect();

    for (name, value) in custom {
        headers.retain(|(existing, _)| !existing.eq_ignore_ascii_case(name));
        headers.push((name.clone(), value.clone()));
    }

    headers
}

fn flatten_params(params: &BTreeMap<String, ParamValue>) -> Vec<(String, String)> {
    let mut query = Vec::new();
    for (name, value) in params {
        match value {
            ParamValue::One(v) => query.push((name.clone(), v.clone())),
            ParamValue::Many(values) => {
                query.extend(values.iter().map(|v| (name.clone(), v.clone())));
            }
        }
    }
    query
}

/// Normalize a failure status into a server error carrying the response body.
fn status_error(response: HttpResponse) -> RequestError {
    let details = if response.body.is_empty() {
        None
    } else {
        Some(serde_json::from_str(&response.body).unwrap_or(Value::String(response.body)))
    };
    RequestError::server(response.status, response.status_text, details)
}

fn decode_body<T: DeserializeOwned>(response: HttpResponse) -> Result<T, RequestError> {
    let parsed = if response.body.trim().is_empty() {
        serde_json::from_value(Value::Null)
    } else {
        serde_json::from_str(&response.body)
    };

    parsed.map_err(|e| {
        RequestError::client(format!("Failed to parse response: {}", e))
            .with_details(Value::String(response.body))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::mock::MockTransport;
    use crate::error::RequestErrorKind;
    use serde_json::json;
    use std::time::Duration;

    fn client(mock: &Arc<MockTransport>) -> HttpClient {
        HttpClient::with_transport("http://fleet.test/api/", mock.clone())
    }

    #[test]
    fn test_resolve_url() {
        let mock = Arc::new(MockTransport::new());
        let client = client(&mock);

        assert_eq!(client.resolve_url("/cars"), "http://fleet.test/api/cars");
        assert_eq!(client.resolve_url("cars/1"), "http://fleet.test/api/cars/1");
        assert_eq!(
            client.resolve_url("https://other.test/assets/fleet.json"),
            "https://other.test/assets/fleet.json"
        );
    }

    #[test]
    fn test_merge_headers_caller_wins() {
        let headers = merge_headers(&[
            ("accept".to_string(), "text/plain".to_string()),
            ("Authorization".to_string(), "Bearer t".to_string()),
        ]);

        assert_eq!(headers.len(), 3);
        assert!(headers.contains(&("Content-Type".to_string(), "application/json".to_string())));
        assert!(headers.contains(&("accept".to_string(), "text/plain".to_string())));
        assert!(!headers.iter().any(|(n, v)| n == "Accept" && v == "application/json"));
    }

    #[test]
    fn test_flatten_params_stringifies_and_repeats() {
        let options = RequestOptions::new()
            .param("page", 2usize)
            .param("active", true)
            .param("status", vec!["available", "rented"]);

        let query = flatten_params(&options.params);
        assert_eq!(
            query,
            vec![
                ("active".to_string(), "true".to_string()),
                ("page".to_string(), "2".to_string()),
                ("status".to_string(), "available".to_string()),
                ("status".to_string(), "rented".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_get_decodes_json() {
        let mock = Arc::new(MockTransport::new());
        mock.respond_json("GET", "/cars", json!([{"id": "1"}])).await;

        let cars: Value = client(&mock).get("/cars", &RequestOptions::new()).await.unwrap();

        assert_eq!(cars[0]["id"], "1");
        let captured = mock.captured_requests().await;
        assert_eq!(captured.len(), 1);
        assert_eq!(captured[0].url, "http://fleet.test/api/cars");
        assert!(
            captured[0]
                .headers
                .contains(&("Accept".to_string(), "application/json".to_string()))
        );
    }

    #[tokio::test]
    async fn test_post_sends_body() {
        let mock = Arc::new(MockTransport::new());
        mock.respond_json("POST", "/users/register", json!({"id": "u1"}))
            .await;

        let _: Value = client(&mock)
            .post("/users/register", &json!({"email": "a@b.io"}), &RequestOptions::new())
            .await
            .unwrap();

        let captured = mock.captured_requests().await;
        assert_eq!(captured[0].method, Method::POST);
        assert_eq!(captured[0].body, Some(json!({"email": "a@b.io"})));
    }

    #[tokio::test]
    async fn test_empty_body_decodes_as_unit() {
        let mock = Arc::new(MockTransport::new());
        mock.respond("DELETE", "/cars/1", 204, "").await;

        let result: Result<(), RequestError> =
            client(&mock).delete("/cars/1", &RequestOptions::new()).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_server_error_is_normalized() {
        let mock = Arc::new(MockTransport::new());
        mock.respond("GET", "/cars/404", 404, r#"{"error":"missing"}"#)
            .await;

        let err = client(&mock)
            .get::<Value>("/cars/404", &RequestOptions::new())
            .await
            .unwrap_err();

        assert_eq!(err.kind, RequestErrorKind::Server);
        assert_eq!(err.code, 404);
        assert_eq!(err.message, "Not Found");
        assert_eq!(err.details, Some(json!({"error": "missing"})));
        assert_eq!(mock.call_count().await, 1);
    }

    #[tokio::test]
    async fn test_invalid_json_is_client_error() {
        let mock = Arc::new(MockTransport::new());
        mock.respond("GET", "/cars", 200, "not json").await;

        let err = client(&mock)
            .get::<Value>("/cars", &RequestOptions::new())
            .await
            .unwrap_err();

        assert_eq!(err.kind, RequestErrorKind::Client);
        assert_eq!(err.code, crate::error::CLIENT_ERROR_CODE);
    }

    #[tokio::test(start_paused = true)]
    async fn test_retries_every_verb_until_budget_spent() {
        let mock = Arc::new(MockTransport::new());
        mock.respond("PATCH", "/cars/1/status", 503, "").await;

        let client = client(&mock);
        client.configure_retry(RetryConfigUpdate {
            max_retries: Some(3),
            base_delay: Some(Duration::from_millis(1000)),
            retryable_status_codes: Some([503].into_iter().collect()),
        });

        let start = tokio::time::Instant::now();
        let err = client
            .patch::<Value, _>("/cars/1/status", &json!({"status": "rented"}), &RequestOptions::new())
            .await
            .unwrap_err();

        assert_eq!(err.code, 503);
        assert_eq!(mock.call_count().await, 4);
        assert!(start.elapsed() >= Duration::from_millis(7000));
    }

    #[tokio::test]
    async fn test_transport_failure_is_not_retried() {
        let mock = Arc::new(MockTransport::new());
        mock.fail_with(RequestError::client("Failed to connect to API"))
            .await;

        let err = client(&mock)
            .get::<Value>("/cars", &RequestOptions::new())
            .await
            .unwrap_err();

        assert_eq!(err.kind, RequestErrorKind::Client);
        assert_eq!(mock.call_count().await, 1);
    }
}
