//! Agent Builder CLI — client for the Kibana Agent Builder API.
//!
//! Wraps the two Agent Builder endpoints (`GET /api/agent_builder/agents`,
//! `POST /api/agent_builder/converse`) behind a typed client, and layers a
//! small interactive chat shell plus one-shot subcommands on top.
//!
//! # Quick Start
//!
//! ```no_run
//! use agent_builder_cli::client::{AgentBuilderClient, ConverseRequest};
//! use agent_builder_cli::config::Settings;
//!
//! # async fn example() -> agent_builder_cli::error::Result<()> {
//! let settings = Settings::from_env()?;
//! let client = AgentBuilderClient::new(&settings)?;
//! let reply = client
//!     .converse(&ConverseRequest::new("Hello!", &settings.default_agent_id))
//!     .await?;
//! println!("{reply}");
//! # Ok(())
//! # }
//! ```

pub mod chat;
pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod normalize;
