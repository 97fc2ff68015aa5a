//! CLI argument definitions.

use clap::{Parser, Subcommand};

/// Agent Builder CLI
#[derive(Parser, Debug)]
#[command(
    name = "agent-builder",
    version,
    about = "CLI for the Kibana Agent Builder API"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List Agent Builder agents
    ListAgents,
    /// Interactive chat with /elastic-* commands
    Chat,
    /// Send a converse request
    Converse(ConverseArgs),
}

/// Arguments for the `converse` subcommand.
#[derive(Parser, Debug)]
pub struct ConverseArgs {
    /// Agent to converse with
    #[arg(long)]
    pub agent_id: String,

    /// User input for this turn
    #[arg(long)]
    pub input: String,

    /// Continue an existing conversation
    #[arg(long)]
    pub conversation_id: Option<String>,

    /// Connector backing the turn
    #[arg(long)]
    pub connector_id: Option<String>,

    /// JSON object of configuration overrides
    #[arg(long)]
    pub configuration_overrides: Option<String>,

    /// JSON object of prompt overrides
    #[arg(long)]
    pub prompts: Option<String>,
}
