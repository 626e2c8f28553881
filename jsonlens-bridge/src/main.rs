use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::style::Stylize;
use tokio::io::{AsyncBufReadExt, AsyncReadExt, BufReader};

use jsonlens_bridge::cli::{Cli, Command, OutputFormat};
use jsonlens_bridge::session::Session;
use jsonlens_bridge::{util, view};
use jsonlens_core::{LensConfig, extract};

#[tokio::main]
async fn main() -> Result<()> {
    util::init_tracing();
    util::install_panic_hook();

    let cli = Cli::parse();
    let config =
        LensConfig::load_or_default(cli.config.as_deref()).context("Failed to load config")?;

    match cli.command.unwrap_or(Command::Repl) {
        Command::Extract { file, format } => run_extract(file.as_deref(), format).await,
        Command::Repl => run_repl(config).await,
    }
}

async fn run_extract(file: Option<&Path>, format: OutputFormat) -> Result<()> {
    let text = match file {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            tokio::io::stdin()
                .read_to_string(&mut buf)
                .await
                .context("Failed to read stdin")?;
            buf
        }
    };

    let blocks = extract(&text);
    tracing::info!(blocks = blocks.len(), bytes = text.len(), "extracted");
    print!("{}", view::render_blocks(&blocks, format.export_format()));
    Ok(())
}

async fn run_repl(config: LensConfig) -> Result<()> {
    let color = config.color;
    let mut session = Session::new(config);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("jsonlens {} · !help for commands", env!("CARGO_PKG_VERSION"));

    loop {
        print!("> ");
        std::io::stdout().flush().context("Failed to flush stdout")?;

        let Some(line) = lines.next_line().await.context("Failed to read stdin")? else {
            break;
        };

        match session.handle_line(&line).await {
            Ok(outcome) => {
                for out in &outcome.lines {
                    println!("{out}");
                }
                if outcome.quit {
                    break;
                }
            }
            Err(e) => {
                let msg = format!("error: {e:#}");
                if color {
                    eprintln!("{}", msg.red());
                } else {
                    eprintln!("{msg}");
                }
            }
        }

        if let Some(status) = session.take_update() {
            if color {
                println!("{}", status.dark_grey());
            } else {
                println!("{status}");
            }
        }
    }

    Ok(())
}
