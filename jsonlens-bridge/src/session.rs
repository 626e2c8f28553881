//! REPL session: the editor-surface collaborator of the history store.
//!
//! Owns the one store instance for the process, turns parsed commands into
//! store calls, and reports the snapshot published after each change.

use anyhow::{Context, Result, anyhow};
use jsonlens_core::{HistoryStore, LensConfig, Snapshot, format_json_in_text};
use tokio::sync::watch;

use crate::commands::{CommandParser, HELP, ReplCommand};
use crate::view;

/// Result of handling one input line.
#[derive(Debug, Default, PartialEq)]
pub struct Outcome {
    pub lines: Vec<String>,
    pub quit: bool,
}

impl Outcome {
    fn lines(lines: Vec<String>) -> Self {
        Self { lines, quit: false }
    }

    fn line(line: impl Into<String>) -> Self {
        Self::lines(vec![line.into()])
    }
}

#[derive(Debug)]
pub struct Session {
    store: HistoryStore,
    updates: watch::Receiver<Snapshot>,
    config: LensConfig,
}

impl Session {
    pub fn new(config: LensConfig) -> Self {
        let store = HistoryStore::from_config(&config.store);
        let updates = store.subscribe();
        Self {
            store,
            updates,
            config,
        }
    }

    pub fn store(&self) -> &HistoryStore {
        &self.store
    }

    /// Parse and run one line of input.
    pub async fn handle_line(&mut self, line: &str) -> Result<Outcome> {
        self.handle(CommandParser::parse(line)).await
    }

    pub async fn handle(&mut self, command: ReplCommand) -> Result<Outcome> {
        tracing::debug!(?command, "repl command");

        let outcome = match command {
            ReplCommand::Append(line) => {
                let text = join_line(self.store.text(), &line);
                self.store.set_text(text);
                Outcome::default()
            }
            ReplCommand::Set(text) => {
                self.store.set_text(text);
                Outcome::default()
            }
            ReplCommand::Paste(text) => {
                let pasted = if self.config.auto_format_paste {
                    format_json_in_text(&text)
                } else {
                    text
                };
                let text = join_line(self.store.text(), &pasted);
                self.store.set_text(text);
                Outcome::default()
            }
            ReplCommand::Load(path) => {
                let text = tokio::fs::read_to_string(&path)
                    .await
                    .with_context(|| format!("Failed to read {}", path.display()))?;
                self.store.set_text(text);
                Outcome::default()
            }
            ReplCommand::Undo => {
                if self.store.undo() {
                    Outcome::default()
                } else {
                    Outcome::line("Nothing to undo.")
                }
            }
            ReplCommand::Redo => {
                if self.store.redo() {
                    Outcome::default()
                } else {
                    Outcome::line("Nothing to redo.")
                }
            }
            ReplCommand::Clear => {
                self.store.clear();
                Outcome::default()
            }
            ReplCommand::Blocks => {
                Outcome::lines(view::block_cards(self.store.text(), self.store.blocks()))
            }
            ReplCommand::Show { number, format } => {
                let body = self.store.current().export_block(block_index(number)?, format)?;
                Outcome::lines(body.lines().map(str::to_string).collect())
            }
            ReplCommand::Tree(number) => {
                let entry = self.store.current();
                let block = entry.block(block_index(number)?)?;
                Outcome::lines(view::outline(&block.content, self.config.expand_level))
            }
            ReplCommand::History => Outcome::lines(view::history_lines(
                self.store.entries(),
                self.store.cursor(),
            )),
            ReplCommand::Status => Outcome::line(view::status_line(&self.store.snapshot())),
            ReplCommand::Help => Outcome::lines(HELP.lines().map(str::to_string).collect()),
            ReplCommand::Quit => Outcome {
                lines: Vec::new(),
                quit: true,
            },
            ReplCommand::Invalid(hint) => return Err(anyhow!(hint)),
        };

        Ok(outcome)
    }

    /// Status line for the latest published snapshot, if one arrived since
    /// the last call.
    pub fn take_update(&mut self) -> Option<String> {
        if !self.updates.has_changed().unwrap_or(false) {
            return None;
        }
        let snapshot = self.updates.borrow_and_update().clone();
        Some(view::status_line(&snapshot))
    }
}

fn block_index(number: usize) -> Result<usize> {
    number
        .checked_sub(1)
        .ok_or_else(|| anyhow!("block numbers start at 1"))
}

fn join_line(current: &str, line: &str) -> String {
    if current.is_empty() {
        line.to_string()
    } else {
        format!("{current}\n{line}")
    }
}
