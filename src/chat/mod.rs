//! Interactive chat shell.
//!
//! A line-oriented loop over standard input: slash-commands are intercepted,
//! anything else is forwarded as a conversational turn. The loop is generic
//! over its reader/writer so tests can script it; the real binary passes
//! locked stdin/stdout.

use std::io::{BufRead, Write};

use serde_json::Value;

use crate::client::{AgentBuilderClient, ConverseRequest};
use crate::error::Result;
use crate::normalize::format_agent_row;

/// Process-lifetime conversation state.
///
/// Only the named transitions below mutate it: a failed turn leaves it
/// untouched, and the conversation id is cleared exactly on agent change or
/// explicit reset.
#[derive(Debug, Clone)]
pub struct ChatSession {
    pub agent_id: String,
    pub agent_name: String,
    pub conversation_id: Option<String>,
}

impl ChatSession {
    /// Fresh session on the given agent, no conversation yet.
    pub fn new(agent_id: impl Into<String>) -> Self {
        let agent_id = agent_id.into();
        Self {
            agent_name: agent_id.clone(),
            agent_id,
            conversation_id: None,
        }
    }

    /// Switch agents; any ongoing conversation is reset.
    pub fn select_agent(&mut self, id: impl Into<String>, name: impl Into<String>) {
        self.agent_id = id.into();
        self.agent_name = name.into();
        self.conversation_id = None;
    }

    /// Start over with the current agent.
    pub fn reset_conversation(&mut self) {
        self.conversation_id = None;
    }

    /// Adopt the conversation id from a successful converse response,
    /// keeping the current one when the response carries none.
    pub fn record_response(&mut self, resp: &Value) {
        if let Some(Value::String(id)) = resp.get("conversation_id") {
            if !id.is_empty() {
                self.conversation_id = Some(id.clone());
            }
        }
    }
}

const HELP: &str = "\
Commands:
  /elastic-agents  List agents and choose one
  /elastic-agent   Show current agent
  /elastic-new     Start a new conversation
  /elastic-help    Show this help
  /exit            Quit";

fn print_help(out: &mut impl Write) -> std::io::Result<()> {
    writeln!(out, "{HELP}")
}

fn truncate_description(desc: &str) -> String {
    if desc.chars().count() <= 80 {
        return desc.to_string();
    }
    let short: String = desc.chars().take(80).collect();
    format!("{short}…")
}

/// Prompt for a 1-based selection from a fetched agent listing.
///
/// Returns the chosen `(id, name)`, or `None` when the user cancels with a
/// blank line (or EOF). Unusable input reprompts instead of failing.
pub fn pick_agent(
    agents: &[Value],
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> Result<Option<(String, String)>> {
    if agents.is_empty() {
        writeln!(out, "No agents found from /api/agent_builder/agents")?;
        return Ok(None);
    }

    let rows: Vec<_> = agents.iter().map(format_agent_row).collect();
    writeln!(out, "Available agents:")?;
    for (idx, row) in rows.iter().enumerate() {
        let short = truncate_description(&row.description);
        if short.is_empty() {
            writeln!(out, "  [{}] {} ({})", idx + 1, row.name, row.id)?;
        } else {
            writeln!(out, "  [{}] {} ({}) — {}", idx + 1, row.name, row.id, short)?;
        }
    }

    loop {
        write!(out, "Pick agent number (Enter to cancel): ")?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let raw = line.trim();
        if raw.is_empty() {
            return Ok(None);
        }
        let Ok(n) = raw.parse::<usize>() else {
            writeln!(out, "Please enter a number")?;
            continue;
        };
        if n < 1 || n > rows.len() {
            writeln!(out, "Choose a number between 1 and {}", rows.len())?;
            continue;
        }
        let row = &rows[n - 1];
        if row.id.is_empty() {
            writeln!(out, "Selected agent has no id, choose another")?;
            continue;
        }
        return Ok(Some((row.id.clone(), row.name.clone())));
    }
}

/// Run the chat loop until `/exit`, `/quit`, or end of input.
pub async fn run_chat(
    client: &AgentBuilderClient,
    session: &mut ChatSession,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> Result<()> {
    writeln!(out, "Connected to Kibana")?;
    print_help(out)?;
    writeln!(
        out,
        "Current agent: {} ({})",
        session.agent_name, session.agent_id
    )?;

    loop {
        write!(out, "you> ")?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            writeln!(out, "Bye!")?;
            break;
        }
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        match trimmed.to_lowercase().as_str() {
            "/exit" | "/quit" => {
                writeln!(out, "Bye!")?;
                break;
            }
            "/elastic-help" => print_help(out)?,
            "/elastic-new" => {
                session.reset_conversation();
                writeln!(out, "(Started new conversation)")?;
            }
            "/elastic-agent" => writeln!(
                out,
                "Current agent: {} ({})",
                session.agent_name, session.agent_id
            )?,
            "/elastic-agents" => {
                let agents = match client.list_agents().await {
                    Ok(agents) => agents,
                    Err(e) => {
                        writeln!(out, "agent> [failed to list agents]")?;
                        writeln!(out, "{e}")?;
                        continue;
                    }
                };
                match pick_agent(&agents, input, out)? {
                    None => writeln!(out, "(No change)")?,
                    Some((id, name)) => {
                        session.select_agent(id, name);
                        writeln!(
                            out,
                            "(Selected agent: {} ({}); conversation reset)",
                            session.agent_name, session.agent_id
                        )?;
                    }
                }
            }
            _ => converse_turn(client, session, trimmed, out).await?,
        }
    }

    Ok(())
}

/// One free-text turn. Network failure is printed and swallowed so the loop
/// keeps going with the session unchanged.
async fn converse_turn(
    client: &AgentBuilderClient,
    session: &mut ChatSession,
    text: &str,
    out: &mut impl Write,
) -> Result<()> {
    let mut request = ConverseRequest::new(text, &session.agent_id);
    request.conversation_id = session.conversation_id.clone();

    let data = match client.converse(&request).await {
        Ok(data) => data,
        Err(e) => {
            writeln!(out, "agent> [chat failed]")?;
            writeln!(out, "{e}")?;
            return Ok(());
        }
    };

    session.record_response(&data);

    match data
        .get("response")
        .and_then(|r| r.get("message"))
        .and_then(Value::as_str)
    {
        Some(message) => writeln!(out, "agent> {message}")?,
        None => {
            writeln!(out, "agent> [no response.message found; dumping full response]")?;
            writeln!(out, "{}", serde_json::to_string_pretty(&data)?)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn new_session_starts_without_conversation() {
        let session = ChatSession::new("a1");
        assert_eq!(session.agent_id, "a1");
        assert_eq!(session.agent_name, "a1");
        assert!(session.conversation_id.is_none());
    }

    #[test]
    fn selecting_an_agent_resets_the_conversation() {
        let mut session = ChatSession::new("a1");
        session.conversation_id = Some("c1".to_string());
        session.select_agent("a2", "Second");
        assert_eq!(session.agent_id, "a2");
        assert_eq!(session.agent_name, "Second");
        assert!(session.conversation_id.is_none());
    }

    #[test]
    fn record_response_adopts_and_keeps_conversation_ids() {
        let mut session = ChatSession::new("a1");
        session.record_response(&json!({"conversation_id": "c1"}));
        assert_eq!(session.conversation_id.as_deref(), Some("c1"));

        // absent, empty, and non-string ids all keep the current one
        session.record_response(&json!({"response": {"message": "hi"}}));
        session.record_response(&json!({"conversation_id": ""}));
        session.record_response(&json!({"conversation_id": 7}));
        assert_eq!(session.conversation_id.as_deref(), Some("c1"));

        session.record_response(&json!({"conversation_id": "c2"}));
        assert_eq!(session.conversation_id.as_deref(), Some("c2"));
    }

    #[test]
    fn descriptions_truncate_at_eighty_chars() {
        let long = "x".repeat(100);
        let short = truncate_description(&long);
        assert_eq!(short.chars().count(), 81);
        assert!(short.ends_with('…'));
        assert_eq!(truncate_description("short"), "short");
    }

    #[test]
    fn picker_cancels_on_blank_input() {
        let agents = vec![json!({"id": "a1", "name": "One"})];
        let mut input = std::io::Cursor::new(b"\n".to_vec());
        let mut out = Vec::new();
        let picked = pick_agent(&agents, &mut input, &mut out).unwrap();
        assert!(picked.is_none());
    }

    #[test]
    fn picker_reprompts_on_bad_input_then_accepts() {
        let agents = vec![
            json!({"id": "a1", "name": "One"}),
            json!({"id": "a2", "name": "Two"}),
        ];
        let mut input = std::io::Cursor::new(b"abc\n9\n2\n".to_vec());
        let mut out = Vec::new();
        let picked = pick_agent(&agents, &mut input, &mut out).unwrap();
        assert_eq!(picked, Some(("a2".to_string(), "Two".to_string())));

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Please enter a number"));
        assert!(text.contains("Choose a number between 1 and 2"));
    }

    #[test]
    fn picker_skips_rows_without_ids() {
        let agents = vec![json!({"name": "NoId"}), json!({"id": "a2", "name": "Two"})];
        let mut input = std::io::Cursor::new(b"1\n2\n".to_vec());
        let mut out = Vec::new();
        let picked = pick_agent(&agents, &mut input, &mut out).unwrap();
        assert_eq!(picked, Some(("a2".to_string(), "Two".to_string())));

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Selected agent has no id, choose another"));
    }

    #[test]
    fn picker_reports_empty_listing() {
        let mut input = std::io::Cursor::new(Vec::<u8>::new());
        let mut out = Vec::new();
        let picked = pick_agent(&[], &mut input, &mut out).unwrap();
        assert!(picked.is_none());
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("No agents found"));
    }
}
