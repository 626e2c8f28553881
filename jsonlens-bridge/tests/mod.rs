use std::io::Write;

use clap::Parser;
use jsonlens_bridge::cli::{Cli, Command, OutputFormat};
use jsonlens_bridge::commands::{CommandParser, ReplCommand};
use jsonlens_bridge::session::Session;
use jsonlens_bridge::view;
use jsonlens_core::{ExportFormat, LensConfig, extract};

fn session() -> Session {
    Session::new(LensConfig::default())
}

// ============================================================================
// CommandParser Tests
// ============================================================================

#[test]
fn test_parse_plain_line_appends() {
    assert_eq!(
        CommandParser::parse("hello {\"a\":1}"),
        ReplCommand::Append("hello {\"a\":1}".to_string())
    );
}

#[test]
fn test_parse_empty_line_appends() {
    assert_eq!(CommandParser::parse(""), ReplCommand::Append(String::new()));
}

#[test]
fn test_parse_navigation() {
    assert_eq!(CommandParser::parse("!undo"), ReplCommand::Undo);
    assert_eq!(CommandParser::parse("!u"), ReplCommand::Undo);
    assert_eq!(CommandParser::parse("  !redo  "), ReplCommand::Redo);
    assert_eq!(CommandParser::parse("! clear"), ReplCommand::Clear);
}

#[test]
fn test_parse_set_keeps_inner_spacing() {
    assert_eq!(
        CommandParser::parse("!set a   b  {\"x\": 1}"),
        ReplCommand::Set("a   b  {\"x\": 1}".to_string())
    );
}

#[test]
fn test_parse_show_with_format() {
    assert_eq!(
        CommandParser::parse("!show 2 md"),
        ReplCommand::Show {
            number: 2,
            format: ExportFormat::Markdown
        }
    );
    assert_eq!(
        CommandParser::parse("!show #1"),
        ReplCommand::Show {
            number: 1,
            format: ExportFormat::Json
        }
    );
}

#[test]
fn test_parse_show_invalid() {
    assert!(matches!(CommandParser::parse("!show"), ReplCommand::Invalid(_)));
    assert!(matches!(CommandParser::parse("!show 0"), ReplCommand::Invalid(_)));
    assert!(matches!(
        CommandParser::parse("!show 1 yaml"),
        ReplCommand::Invalid(_)
    ));
}

#[test]
fn test_parse_load_requires_path() {
    assert!(matches!(CommandParser::parse("!load"), ReplCommand::Invalid(_)));
    assert_eq!(
        CommandParser::parse("!load notes.txt"),
        ReplCommand::Load("notes.txt".into())
    );
}

#[test]
fn test_parse_bang_escape() {
    assert_eq!(
        CommandParser::parse("!!important"),
        ReplCommand::Append("!important".to_string())
    );
}

#[test]
fn test_parse_unknown_command() {
    match CommandParser::parse("!frobnicate") {
        ReplCommand::Invalid(hint) => assert!(hint.contains("frobnicate")),
        other => panic!("Expected Invalid, got {:?}", other),
    }
}

// ============================================================================
// Session Tests
// ============================================================================

#[tokio::test]
async fn test_session_append_builds_text() {
    let mut s = session();
    s.handle_line("prefix").await.unwrap();
    s.handle_line("{\"a\":1}").await.unwrap();
    assert_eq!(s.store().text(), "prefix\n{\"a\":1}");
    assert_eq!(s.store().blocks().len(), 1);
    assert_eq!(s.store().entry_count(), 3);
}

#[tokio::test]
async fn test_session_undo_redo_messages() {
    let mut s = session();
    let out = s.handle_line("!undo").await.unwrap();
    assert_eq!(out.lines, vec!["Nothing to undo."]);

    s.handle_line("!set [1]").await.unwrap();
    assert!(s.handle_line("!undo").await.unwrap().lines.is_empty());
    assert_eq!(s.store().text(), "");
    assert!(s.handle_line("!redo").await.unwrap().lines.is_empty());
    assert_eq!(s.handle_line("!redo").await.unwrap().lines, vec!["Nothing to redo."]);
}

#[tokio::test]
async fn test_session_paste_auto_formats() {
    let mut s = session();
    s.handle_line("!paste {\"a\":[1,2]}").await.unwrap();
    assert_eq!(s.store().text(), "{\n  \"a\": [\n    1,\n    2\n  ]\n}");
    assert_eq!(s.store().blocks().len(), 1);
}

#[tokio::test]
async fn test_session_paste_without_auto_format() {
    let config = LensConfig {
        auto_format_paste: false,
        ..LensConfig::default()
    };
    let mut s = Session::new(config);
    s.handle_line("!paste {\"a\":1}").await.unwrap();
    assert_eq!(s.store().text(), "{\"a\":1}");
}

#[tokio::test]
async fn test_session_show_and_tree() {
    let mut s = session();
    s.handle_line("!set x {\"name\":\"Al\",\"tags\":[\"a\"]} y").await.unwrap();

    let out = s.handle_line("!show 1 text").await.unwrap();
    assert_eq!(out.lines, vec!["name: Al", "tags:", "  - a"]);

    let out = s.handle_line("!tree 1").await.unwrap();
    assert_eq!(out.lines[0], "▾ {} 2 props");

    let err = s.handle_line("!show 2").await.unwrap_err();
    assert!(err.to_string().contains("no block at index 1"));
}

#[tokio::test]
async fn test_session_blocks_listing() {
    let mut s = session();
    let out = s.handle_line("!blocks").await.unwrap();
    assert!(out.lines[0].contains("Paste text"));

    s.handle_line("just prose").await.unwrap();
    let out = s.handle_line("!blocks").await.unwrap();
    assert!(out.lines[0].starts_with("No JSON detected"));

    s.handle_line("!set {\"a\":1} [1,2,3]").await.unwrap();
    let out = s.handle_line("!blocks").await.unwrap();
    assert_eq!(out.lines.len(), 2);
    assert!(out.lines[0].starts_with("JSON #1 · Object · 1 props"));
    assert!(out.lines[1].starts_with("JSON #2 · Array · 3 items"));
}

#[tokio::test]
async fn test_session_clear_then_undo() {
    let mut s = session();
    s.handle_line("!set [true]").await.unwrap();
    s.handle_line("!clear").await.unwrap();
    assert_eq!(s.store().text(), "");
    s.handle_line("!undo").await.unwrap();
    assert_eq!(s.store().text(), "[true]");
}

#[tokio::test]
async fn test_session_load_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "log line\n{{\"level\":\"warn\"}}\n").unwrap();

    let mut s = session();
    s.handle_line(&format!("!load {}", file.path().display())).await.unwrap();
    assert_eq!(s.store().blocks().len(), 1);
}

#[tokio::test]
async fn test_session_load_missing_file() {
    let mut s = session();
    let err = s.handle_line("!load /definitely/not/here.json").await.unwrap_err();
    assert!(err.to_string().contains("Failed to read"));
    assert_eq!(s.store().entry_count(), 1);
}

#[tokio::test]
async fn test_session_status_updates_only_after_changes() {
    let mut s = session();
    assert_eq!(s.take_update(), None);

    s.handle_line("!undo").await.unwrap();
    assert_eq!(s.take_update(), None);

    s.handle_line("[1] {\"b\":2}").await.unwrap();
    let status = s.take_update().unwrap();
    assert!(status.starts_with("2 JSON blocks detected"));
    assert!(status.contains("undo ✓"));
    assert!(status.contains("redo ✗"));
    assert_eq!(s.take_update(), None);

    s.handle_line("!blocks").await.unwrap();
    assert_eq!(s.take_update(), None);
}

#[tokio::test]
async fn test_session_history_marks_cursor() {
    let mut s = session();
    s.handle_line("!set a").await.unwrap();
    s.handle_line("!set [1]").await.unwrap();
    s.handle_line("!undo").await.unwrap();

    let out = s.handle_line("!history").await.unwrap();
    assert_eq!(out.lines.len(), 3);
    assert!(out.lines[0].contains("(empty)"));
    assert!(out.lines[1].starts_with("→"));
    assert!(out.lines[2].contains("1 block(s)"));
}

#[tokio::test]
async fn test_session_quit() {
    let mut s = session();
    assert!(s.handle_line("!quit").await.unwrap().quit);
    assert!(!s.handle_line("!help").await.unwrap().quit);
}

#[tokio::test]
async fn test_session_respects_history_limit() {
    let mut config = LensConfig::default();
    config.store.history_limit = 3;
    let mut s = Session::new(config);
    for i in 0..10 {
        s.handle_line(&format!("!set {i}")).await.unwrap();
    }
    assert_eq!(s.store().entry_count(), 3);
    assert_eq!(s.store().text(), "9");
}

// ============================================================================
// Extract Rendering Tests
// ============================================================================

#[test]
fn test_render_blocks_summary() {
    let blocks = extract("a {\"k\":1} b [1]");
    let out = view::render_blocks(&blocks, None);
    assert_eq!(out.lines().count(), 2);
}

#[test]
fn test_render_blocks_json_has_headers() {
    let blocks = extract("a {\"k\":1} b");
    let out = view::render_blocks(&blocks, Some(ExportFormat::Json));
    assert!(out.starts_with("── JSON #1 · Object"));
    assert!(out.contains("\"k\": 1"));
}

#[test]
fn test_render_no_blocks_is_empty() {
    assert_eq!(view::render_blocks(&[], Some(ExportFormat::Text)), "");
}

// ============================================================================
// CLI Tests
// ============================================================================

#[test]
fn test_cli_defaults_to_repl() {
    let cli = Cli::try_parse_from(["jsonlens"]).unwrap();
    assert!(cli.command.is_none());
    assert!(cli.config.is_none());
}

#[test]
fn test_cli_extract_format() {
    let cli = Cli::try_parse_from(["jsonlens", "extract", "in.txt", "--format", "md"]).unwrap();
    match cli.command {
        Some(Command::Extract { file, format }) => {
            assert_eq!(file.unwrap().to_str(), Some("in.txt"));
            assert_eq!(format, OutputFormat::Md);
            assert_eq!(format.export_format(), Some(ExportFormat::Markdown));
        }
        other => panic!("Expected Extract, got {:?}", other),
    }
}

#[test]
fn test_cli_global_config_flag() {
    let cli = Cli::try_parse_from(["jsonlens", "repl", "--config", "c.json"]).unwrap();
    assert!(matches!(cli.command, Some(Command::Repl)));
    assert_eq!(cli.config.unwrap().to_str(), Some("c.json"));
}
