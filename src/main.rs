use std::io::{Read, Write};

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tokpool_console::cli::{Cli, Commands, EnvCommands, TokenCommands};
use tokpool_console::client::ApiClient;
use tokpool_console::config;
use tokpool_console::console::{EnvForm, TableView, TokenConsole};
use tokpool_console::errors::ConsoleError;
use tokpool_console::notify::TerminalNotifier;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "tokpool_console=info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Cli::parse();
    let mut cfg = config::load()?;
    if let Some(base_url) = args.base_url {
        if let Err(e) = url::Url::parse(&base_url) {
            anyhow::bail!("--base-url is not a valid URL: {e}");
        }
        cfg.base_url = base_url;
    }

    let client = ApiClient::new(&cfg);

    match args.command {
        Commands::Token { command } => run_token(command, &cfg, client).await,
        Commands::Env { command } => run_env(command, client).await,
    }
}

async fn run_token(
    command: TokenCommands,
    cfg: &config::Config,
    client: ApiClient,
) -> anyhow::Result<()> {
    let page_size = match &command {
        TokenCommands::List {
            per_page: Some(size),
            ..
        } => *size,
        _ => cfg.page_size,
    };
    let mut console = TokenConsole::new(client, TableView, TerminalNotifier, page_size)?;

    match command {
        TokenCommands::List { page, .. } => {
            console.change_page(page).await?;
        }
        TokenCommands::Add { file } => {
            let raw = match file {
                Some(path) => std::fs::read_to_string(&path)?,
                None => {
                    let mut buf = String::new();
                    std::io::stdin().read_to_string(&mut buf)?;
                    buf
                }
            };
            console.add_tokens(&raw).await?;
        }
        TokenCommands::Delete { id, yes } => {
            console.stage_delete(id)?;
            if yes || confirm(&format!("delete token {id}? [y/N] "))? {
                console.confirm_delete().await?;
            } else {
                console.cancel_delete();
                println!("aborted");
            }
        }
        TokenCommands::Cleanup => {
            console.cleanup().await?;
        }
    }
    Ok(())
}

async fn run_env(command: EnvCommands, client: ApiClient) -> anyhow::Result<()> {
    let mut form = EnvForm::new(client, TerminalNotifier);

    match command {
        EnvCommands::Show => {
            form.load().await?;
            for (key, value) in form.entries() {
                println!(
                    "{:<28} {:<36} {}",
                    key.key,
                    key.description,
                    value.unwrap_or("(unset)")
                );
            }
        }
        EnvCommands::Save { pairs } => {
            form.load().await?;
            set_pairs(&mut form, &pairs)?;
            form.save().await?;
        }
        EnvCommands::Apply { pairs } => {
            form.load().await?;
            set_pairs(&mut form, &pairs)?;
            let resp = form.apply_live().await?;
            for (key, value) in &resp.updated {
                println!("{key} = {value}");
            }
        }
    }
    Ok(())
}

fn set_pairs(
    form: &mut EnvForm<ApiClient, TerminalNotifier>,
    pairs: &[String],
) -> Result<(), ConsoleError> {
    for pair in pairs {
        let Some((key, value)) = pair.split_once('=') else {
            return Err(ConsoleError::Validation(format!(
                "expected KEY=VALUE, got '{pair}'"
            )));
        };
        form.set(key, value)?;
    }
    Ok(())
}

fn confirm(prompt: &str) -> anyhow::Result<bool> {
    print!("{prompt}");
    std::io::stdout().flush()?;
    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;
    Ok(matches!(line.trim(), "y" | "Y" | "yes"))
}
