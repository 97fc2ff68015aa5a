//! Agent Builder API client.
//!
//! Wraps the two Agent Builder endpoints behind one pooled HTTP client.
//! Requests are issued one at a time and awaited to completion; there is no
//! retry or cancellation.

pub mod http;

use std::time::Duration;

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::config::Settings;
use crate::error::Result;

use self::http::{api_key_headers, status_to_error};

const AGENTS_PATH: &str = "/api/agent_builder/agents";
const CONVERSE_PATH: &str = "/api/agent_builder/converse";

/// Listing is fast; only converse turns get the configured (larger) timeout.
const LIST_TIMEOUT: Duration = Duration::from_secs(60);

/// One conversational turn, serialized as the converse endpoint's JSON body.
///
/// Optional fields that are `None` are omitted from the payload entirely,
/// never sent as `null`.
#[derive(Debug, Clone, Serialize)]
pub struct ConverseRequest {
    pub input: String,
    pub agent_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connector_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub configuration_overrides: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompts: Option<Value>,
}

impl ConverseRequest {
    /// A single-turn request with every optional field absent.
    pub fn new(input: impl Into<String>, agent_id: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            agent_id: agent_id.into(),
            conversation_id: None,
            connector_id: None,
            configuration_overrides: None,
            prompts: None,
        }
    }
}

/// Client for the Agent Builder (Kibana) API.
pub struct AgentBuilderClient {
    http: reqwest::Client,
    base_url: String,
    base_path: String,
    headers: reqwest::header::HeaderMap,
    converse_timeout: Duration,
}

impl AgentBuilderClient {
    /// Build a client from resolved settings.
    pub fn new(settings: &Settings) -> Result<Self> {
        let http = reqwest::Client::builder()
            .danger_accept_invalid_certs(!settings.tls_verify)
            .pool_max_idle_per_host(10)
            .build()?;

        let base_path = settings
            .space_id
            .as_deref()
            .map(|space| format!("/s/{space}"))
            .unwrap_or_default();

        Ok(Self {
            http,
            base_url: settings.base_url.clone(),
            base_path,
            headers: api_key_headers(&settings.api_key),
            converse_timeout: Duration::from_secs(settings.timeout_s),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}{}", self.base_url, self.base_path, path)
    }

    /// List the configured agents as raw JSON mappings.
    ///
    /// The endpoint has shipped several envelope shapes; all of them
    /// normalize to a flat list (see [`normalize_agent_listing`]).
    pub async fn list_agents(&self) -> Result<Vec<Value>> {
        let url = self.url(AGENTS_PATH);
        debug!(url = %url, "list_agents");

        let resp = self
            .http
            .get(&url)
            .headers(self.headers.clone())
            .timeout(LIST_TIMEOUT)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(status_to_error(status.as_u16(), &body));
        }

        let data: Value = resp.json().await?;
        Ok(normalize_agent_listing(data))
    }

    /// Send one conversational turn and return the raw response payload.
    pub async fn converse(&self, request: &ConverseRequest) -> Result<Value> {
        let url = self.url(CONVERSE_PATH);
        debug!(url = %url, agent_id = %request.agent_id, "converse");

        let resp = self
            .http
            .post(&url)
            .headers(self.headers.clone())
            .json(request)
            .timeout(self.converse_timeout)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(status_to_error(status.as_u16(), &body));
        }

        Ok(resp.json().await?)
    }
}

/// Flatten the agent-listing envelope variants into a plain list.
///
/// An object with a `results` or `agents` array yields that array; a bare
/// array yields itself; any other object is wrapped as a one-element list;
/// anything else yields an empty list.
pub fn normalize_agent_listing(data: Value) -> Vec<Value> {
    match data {
        Value::Object(mut obj) => {
            for key in ["results", "agents"] {
                if matches!(obj.get(key), Some(Value::Array(_))) {
                    if let Some(Value::Array(list)) = obj.remove(key) {
                        return list;
                    }
                }
            }
            vec![Value::Object(obj)]
        }
        Value::Array(list) => list,
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn listing_unwraps_results_envelope() {
        let data = json!({"results": [{"id": "a"}, {"id": "b"}]});
        assert_eq!(
            normalize_agent_listing(data),
            vec![json!({"id": "a"}), json!({"id": "b"})]
        );
    }

    #[test]
    fn listing_unwraps_agents_envelope() {
        let data = json!({"agents": [{"id": "a"}]});
        assert_eq!(normalize_agent_listing(data), vec![json!({"id": "a"})]);
    }

    #[test]
    fn listing_prefers_results_over_agents() {
        let data = json!({"results": [{"id": "r"}], "agents": [{"id": "a"}]});
        assert_eq!(normalize_agent_listing(data), vec![json!({"id": "r"})]);
    }

    #[test]
    fn listing_accepts_bare_array() {
        let data = json!([{"id": "a"}]);
        assert_eq!(normalize_agent_listing(data), vec![json!({"id": "a"})]);
    }

    #[test]
    fn listing_wraps_unrecognized_object() {
        let data = json!({"id": "solo"});
        assert_eq!(normalize_agent_listing(data), vec![json!({"id": "solo"})]);
    }

    #[test]
    fn listing_ignores_non_list_results_key() {
        let data = json!({"results": "nope"});
        assert_eq!(
            normalize_agent_listing(data),
            vec![json!({"results": "nope"})]
        );
    }

    #[test]
    fn listing_rejects_scalars() {
        assert!(normalize_agent_listing(json!(42)).is_empty());
        assert!(normalize_agent_listing(json!("agents")).is_empty());
        assert!(normalize_agent_listing(Value::Null).is_empty());
    }

    #[test]
    fn converse_request_omits_absent_optionals() {
        let body = serde_json::to_value(ConverseRequest::new("hi", "a1")).unwrap();
        assert_eq!(body, json!({"input": "hi", "agent_id": "a1"}));
    }

    #[test]
    fn converse_request_serializes_supplied_fields() {
        let mut request = ConverseRequest::new("hi", "a1");
        request.conversation_id = Some("c1".to_string());
        request.connector_id = Some("bedrock".to_string());
        request.configuration_overrides = Some(json!({"temperature": 0.2}));
        request.prompts = Some(json!({"system": "be brief"}));

        let body = serde_json::to_value(request).unwrap();
        assert_eq!(
            body,
            json!({
                "input": "hi",
                "agent_id": "a1",
                "conversation_id": "c1",
                "connector_id": "bedrock",
                "configuration_overrides": {"temperature": 0.2},
                "prompts": {"system": "be brief"},
            })
        );
    }
}
