use std::path::PathBuf;

use jsonlens_core::ExportFormat;

/// One line of REPL input, classified.
#[derive(Debug, PartialEq)]
pub enum ReplCommand {
    /// Plain text: appended to the current text as a new line.
    Append(String),
    Set(String),
    Paste(String),
    Load(PathBuf),
    Undo,
    Redo,
    Clear,
    Blocks,
    /// `number` is 1-based, as shown in block cards.
    Show { number: usize, format: ExportFormat },
    Tree(usize),
    History,
    Status,
    Help,
    Quit,
    /// A `!` command that could not be understood; holds a usage hint.
    Invalid(String),
}

pub struct CommandParser;

impl CommandParser {
    pub fn parse(input: &str) -> ReplCommand {
        let trimmed = input.trim();

        // `!!text` appends a literal line starting with `!`.
        if let Some(rest) = trimmed.strip_prefix("!!") {
            return ReplCommand::Append(format!("!{}", rest));
        }

        let Some(body) = trimmed.strip_prefix('!').map(str::trim_start) else {
            return ReplCommand::Append(input.to_string());
        };

        let parts: Vec<&str> = body.split_whitespace().collect();
        let Some(cmd) = parts.first().copied() else {
            return ReplCommand::Invalid("empty command, try !help".to_string());
        };
        // Everything after the command word, inner spacing preserved.
        let arg = body[cmd.len()..].trim().to_string();

        match cmd {
            "undo" | "u" => ReplCommand::Undo,
            "redo" | "r" => ReplCommand::Redo,
            "clear" => ReplCommand::Clear,
            "blocks" | "ls" => ReplCommand::Blocks,
            "history" => ReplCommand::History,
            "status" => ReplCommand::Status,
            "help" | "?" => ReplCommand::Help,
            "quit" | "exit" | "q" => ReplCommand::Quit,
            "set" => ReplCommand::Set(arg),
            "paste" => ReplCommand::Paste(arg),
            "load" => {
                if arg.is_empty() {
                    ReplCommand::Invalid("usage: !load <path>".to_string())
                } else {
                    ReplCommand::Load(PathBuf::from(arg))
                }
            }
            "show" => Self::parse_show(&parts[1..]),
            "tree" => match parts.get(1).and_then(|n| parse_number(n)) {
                Some(number) => ReplCommand::Tree(number),
                None => ReplCommand::Invalid("usage: !tree <n>".to_string()),
            },
            other => ReplCommand::Invalid(format!("unknown command !{}, try !help", other)),
        }
    }

    fn parse_show(args: &[&str]) -> ReplCommand {
        const USAGE: &str = "usage: !show <n> [json|text|md]";

        let Some(number) = args.first().and_then(|n| parse_number(n)) else {
            return ReplCommand::Invalid(USAGE.to_string());
        };
        let format = match args.get(1) {
            Some(f) => match f.parse::<ExportFormat>() {
                Ok(format) => format,
                Err(e) => return ReplCommand::Invalid(format!("{e}; {USAGE}")),
            },
            None => ExportFormat::Json,
        };
        ReplCommand::Show { number, format }
    }
}

/// Block numbers start at 1.
fn parse_number(s: &str) -> Option<usize> {
    s.trim_start_matches('#').parse::<usize>().ok().filter(|n| *n > 0)
}

pub const HELP: &str = "\
Type or paste text; each line is appended and re-scanned for JSON.

  !set <text>          replace the text
  !paste <text>        append, pretty-printing it if it is valid JSON
  !load <path>         replace the text with a file's contents
  !undo  !redo  !clear
  !blocks              list detected JSON blocks
  !show <n> [fmt]      print block n as json, text or md
  !tree <n>            outline block n
  !history             list history entries
  !status  !help  !quit
  !!text               append a line that starts with '!'";
