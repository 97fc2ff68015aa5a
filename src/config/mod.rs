//! Environment-derived connection settings.
//!
//! Settings are resolved once per process, before any network operation,
//! and passed by reference into the client constructor. Each setting has a
//! fallback chain of environment variable names; the first set, non-empty
//! name wins.

use crate::error::{AgentCliError, Result};

const BASE_URL_VARS: [&str; 2] = ["ELASTICSEARCH_URL", "KIBANA_URL"];
const API_KEY_VARS: [&str; 3] = ["ELASTICSEARCH_API_KEY", "KIBANA_API_KEY", "API_KEY"];
const SPACE_ID_VARS: [&str; 2] = ["ELASTIC_SPACE_ID", "KIBANA_SPACE_ID"];
const VERIFY_SSL_VARS: [&str; 2] = ["ELASTIC_VERIFY_SSL", "KIBANA_VERIFY_SSL"];
const TIMEOUT_VARS: [&str; 2] = ["ELASTIC_TIMEOUT_S", "KIBANA_TIMEOUT_S"];
const DEFAULT_AGENT_VAR: &str = "DEFAULT_AGENT_ID";

const DEFAULT_AGENT_ID: &str = "elastic-ai-agent";
const DEFAULT_TIMEOUT_S: u64 = 300;

const MISSING_CONNECTION_HELP: &str = "\
Missing KIBANA_URL/ELASTICSEARCH_URL or KIBANA_API_KEY/ELASTICSEARCH_API_KEY
Add to .env:
  KIBANA_URL=https://your-kibana:5601
  KIBANA_API_KEY=...
Optional:
  KIBANA_SPACE_ID=default
  KIBANA_VERIFY_SSL=true
  DEFAULT_AGENT_ID=elastic-ai-agent";

/// Connection settings for the Agent Builder API.
///
/// Immutable once constructed; the client keeps its own copy of what it
/// needs, so no ambient environment lookups happen after load.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Kibana base URL, trailing slashes trimmed.
    pub base_url: String,
    /// API key forwarded verbatim in the `Authorization` header.
    pub api_key: String,
    /// Optional space id; prefixes all endpoint paths with `/s/{space}`.
    pub space_id: Option<String>,
    /// Whether to verify TLS certificates.
    pub tls_verify: bool,
    /// Request timeout for converse calls, in seconds.
    pub timeout_s: u64,
    /// Agent the chat shell starts with.
    pub default_agent_id: String,
}

impl Settings {
    /// Load settings from the process environment (reading `.env` if present).
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv(); // load .env if present, ignore error
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load settings through an explicit name → value lookup.
    ///
    /// Tests inject a map here instead of mutating the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = first_set(&lookup, &BASE_URL_VARS);
        let api_key = first_set(&lookup, &API_KEY_VARS);
        let (Some(base_url), Some(api_key)) = (base_url, api_key) else {
            return Err(AgentCliError::Configuration(
                MISSING_CONNECTION_HELP.to_string(),
            ));
        };

        let tls_verify = match first_set_named(&lookup, &VERIFY_SSL_VARS) {
            Some((_, value)) => parse_bool(&value),
            None => true,
        };

        let timeout_s = match first_set_named(&lookup, &TIMEOUT_VARS) {
            Some((name, value)) => value.trim().parse().map_err(|_| {
                AgentCliError::Configuration(format!(
                    "{name} must be a whole number of seconds (got {value:?})"
                ))
            })?,
            None => DEFAULT_TIMEOUT_S,
        };

        let default_agent_id = first_set(&lookup, &[DEFAULT_AGENT_VAR])
            .map(|v| v.trim().to_string())
            .unwrap_or_else(|| DEFAULT_AGENT_ID.to_string());

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            space_id: first_set(&lookup, &SPACE_ID_VARS),
            tls_verify,
            timeout_s,
            default_agent_id,
        })
    }
}

/// First set, non-empty value along a fallback chain.
fn first_set<F>(lookup: &F, names: &[&'static str]) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    first_set_named(lookup, names).map(|(_, value)| value)
}

fn first_set_named<F>(lookup: &F, names: &[&'static str]) -> Option<(&'static str, String)>
where
    F: Fn(&str) -> Option<String>,
{
    names.iter().find_map(|name| {
        lookup(name)
            .filter(|value| !value.trim().is_empty())
            .map(|value| (*name, value))
    })
}

/// Boolean-ish flag parsing: `1/true/yes/y/on` (trimmed, case-insensitive).
fn parse_bool(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "y" | "on"
    )
}
