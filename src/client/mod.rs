//! Fleet API client
//!
//! - [`HttpClient`] - verb methods with header merging, query flattening, retry and
//!   error normalization
//! - [`RetryPolicy`] - exponential backoff on a whitelist of status codes
//! - [`Transport`] - the seam between the client and the network
//! - [`models`] - wire request/response bodies

pub mod http;
#[cfg(test)]
pub mod fixtures;
#[cfg(test)]
pub mod mock;
pub mod models;
pub mod pagination;
pub mod retry;
pub mod transport;

#[allow(unused_imports)]
pub use http::{DEFAULT_HEADERS, HttpClient, ParamValue, RequestOptions};
#[cfg(test)]
pub use mock::{MOCK_BASE_URL, MockTransport};
#[allow(unused_imports)]
pub use pagination::{PaginationParams, SortDirection, create_pagination_params};
#[allow(unused_imports)]
pub use retry::{RetryConfigUpdate, RetryPolicy};
#[allow(unused_imports)]
pub use transport::{HttpRequest, HttpResponse, ReqwestTransport, Transport};
