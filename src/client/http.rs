//! Shared HTTP header and status helpers.

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};

use crate::error::AgentCliError;

/// Build the default header set for a Kibana ApiKey-authenticated API.
///
/// `kbn-xsrf` is required by Kibana to bypass its cross-site request
/// forgery check on non-browser clients.
pub fn api_key_headers(api_key: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert("kbn-xsrf", HeaderValue::from_static("true"));
    if let Ok(val) = HeaderValue::from_str(&format!("ApiKey {api_key}")) {
        headers.insert(AUTHORIZATION, val);
    }
    headers
}

/// Turn a non-success HTTP status into an error carrying the body.
pub fn status_to_error(status: u16, body: &str) -> AgentCliError {
    AgentCliError::api(status, body)
}
