//! Cache key generation

/// Build a deterministic cache key from an endpoint path and query parameters.
///
/// Parameters are sorted by name (then value) so that keys are stable regardless of
/// the order callers supply them in. The key stays human-readable so that
/// invalidation can match on endpoint substrings.
pub fn cache_key(endpoint: &str, params: &[(&str, &str)]) -> String {
    if params.is_empty() {
        return endpoint.to_string();
    }

    let mut sorted_params: Vec<_> = params.iter().collect();
    sorted_params.sort();

    let query = sorted_params
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&");

    format!("{}?{}", endpoint, query)
}
