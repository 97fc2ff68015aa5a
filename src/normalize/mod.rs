//! Best-effort extraction from loosely-shaped API payloads.
//!
//! The Agent Builder API has shipped several spellings for the same logical
//! fields. Each extractor walks an ordered candidate list and degrades to a
//! default instead of erroring; the orders are contract, kept exactly as
//! downstream consumers rely on them.

use serde_json::Value;

const ID_KEYS: [&str; 3] = ["id", "agent_id", "uuid"];
const NAME_KEYS: [&str; 3] = ["name", "title", "display_name"];
const DESCRIPTION_KEYS: [&str; 2] = ["description", "summary"];
const ANSWER_KEYS: [&str; 5] = ["response", "output", "text", "message", "answer"];

/// One agent listing entry, flattened from a raw mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentRow {
    pub id: String,
    pub name: String,
    pub description: String,
}

/// Flatten a raw agent mapping into id/name/description.
///
/// Missing fields degrade to defaults (`""`, `(unnamed)`, `""`); this never
/// fails, whatever the payload looks like.
pub fn format_agent_row(agent: &Value) -> AgentRow {
    AgentRow {
        id: first_usable(agent, &ID_KEYS).unwrap_or_default(),
        name: first_usable(agent, &NAME_KEYS).unwrap_or_else(|| "(unnamed)".to_string()),
        description: first_usable(agent, &DESCRIPTION_KEYS).unwrap_or_default(),
    }
}

/// Pull the assistant's reply text out of an arbitrary converse response.
///
/// Tries the known top-level answer keys in order, then scans a `messages`
/// array from the most recent entry backward for a non-blank `content`
/// string. Falls back to serializing the whole response so nothing is
/// silently dropped.
pub fn extract_assistant_text(resp: &Value) -> String {
    for key in ANSWER_KEYS {
        if let Some(Value::String(s)) = resp.get(key) {
            if !s.trim().is_empty() {
                return s.clone();
            }
        }
    }

    if let Some(Value::Array(messages)) = resp.get("messages") {
        for message in messages.iter().rev() {
            if let Some(Value::String(content)) = message.get("content") {
                if !content.trim().is_empty() {
                    return content.clone();
                }
            }
        }
    }

    resp.to_string()
}

/// First candidate key holding a usable value: a non-empty string, or a
/// number (stringified). Other types fall through to the next candidate.
fn first_usable(value: &Value, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| match value.get(key) {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}
