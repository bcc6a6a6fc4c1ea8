use std::sync::Arc;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};

use kbsearch::config::CONFIG;
use kbsearch::logging::{self, LogTarget};
use kbsearch::{Coordinator, InteractionState, Query, SearchClient, ui};

#[derive(Debug, Parser)]
#[command(name = "kbsearch", version, about = "Ask the IT knowledge base a question")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Open the interactive search screen (default)
    Tui,
    /// Ask one question and print the answer
    Ask {
        #[arg(required = true, num_args = 1..)]
        question: Vec<String>,
    },
    /// Check that the backend is reachable
    Health,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Command::Tui);

    let target = match command {
        Command::Tui => LogTarget::Interactive,
        _ => LogTarget::Stderr,
    };
    logging::init(&CONFIG, target)?;

    let client = SearchClient::new(&CONFIG.api_base_url)
        .with_context(|| format!("cannot use backend address {:?}", CONFIG.api_base_url))?;
    tracing::info!(url = %client.search_url(), "search endpoint configured");

    match command {
        Command::Tui => ui::run(Arc::new(client)).await,
        Command::Ask { question } => ask(&client, &question.join(" ")).await,
        Command::Health => {
            let status = client.health().await.context("backend health check failed")?;
            println!("{status}");
            Ok(())
        }
    }
}

async fn ask(client: &SearchClient, question: &str) -> anyhow::Result<()> {
    let Some(query) = Query::parse(question) else {
        bail!("question cannot be empty");
    };

    let mut coordinator = Coordinator::new();
    coordinator.submit(client, query).await;

    match coordinator.state() {
        InteractionState::Success(result) => {
            print!("{}", ui::plain_text(result));
            Ok(())
        }
        InteractionState::Failed(message) => bail!("{message}"),
        other => bail!("search did not complete: {other:?}"),
    }
}
