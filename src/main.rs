//! Agent Builder CLI binary entry point.

use clap::Parser;

use agent_builder_cli::chat::{run_chat, ChatSession};
use agent_builder_cli::cli::{Cli, Commands, ConverseArgs};
use agent_builder_cli::client::{AgentBuilderClient, ConverseRequest};
use agent_builder_cli::config::Settings;
use agent_builder_cli::error::{AgentCliError, Result};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    // Configuration resolves exactly once, before any network call.
    let settings = match Settings::from_env() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };

    let client = match AgentBuilderClient::new(&settings) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::ListAgents => handle_list_agents(&client).await,
        Commands::Chat => handle_chat(&client, &settings).await,
        Commands::Converse(args) => handle_converse(&client, args).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn handle_list_agents(client: &AgentBuilderClient) -> Result<()> {
    let agents = client.list_agents().await?;
    println!(
        "{}",
        serde_json::to_string_pretty(&serde_json::Value::Array(agents))?
    );
    Ok(())
}

async fn handle_chat(client: &AgentBuilderClient, settings: &Settings) -> Result<()> {
    let mut session = ChatSession::new(&settings.default_agent_id);
    let mut input = std::io::stdin().lock();
    let mut out = std::io::stdout();
    run_chat(client, &mut session, &mut input, &mut out).await
}

async fn handle_converse(client: &AgentBuilderClient, args: ConverseArgs) -> Result<()> {
    let mut request = ConverseRequest::new(args.input, args.agent_id);
    request.conversation_id = args.conversation_id;
    request.connector_id = args.connector_id;
    request.configuration_overrides = args
        .configuration_overrides
        .as_deref()
        .map(|raw| parse_json_arg("--configuration-overrides", raw))
        .transpose()?;
    request.prompts = args
        .prompts
        .as_deref()
        .map(|raw| parse_json_arg("--prompts", raw))
        .transpose()?;

    let result = client.converse(&request).await?;
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

fn parse_json_arg(flag: &str, raw: &str) -> Result<serde_json::Value> {
    serde_json::from_str(raw)
        .map_err(|e| AgentCliError::InvalidArgument(format!("{flag} is not valid JSON: {e}")))
}
