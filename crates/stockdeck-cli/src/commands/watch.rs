//! Line-driven interactive session.
//!
//! Reads one command per line from stdin and prints a frame after every
//! change. Fetch results are applied as soon as they arrive, even while
//! the prompt is idle.

use std::time::Duration;

use serde::Serialize;
use stockdeck_core::{
    Density, FetchOutcome, Orientation, RecordId, SortDirection, SortKey, WatchlistConfig,
    WatchlistSession,
};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::cli::{OutputFormat, WatchArgs};
use crate::error::CliError;
use crate::output::snapshot_frame;

use super::{build_session, to_view_state, CommandResult};

const POLL_INTERVAL: Duration = Duration::from_millis(50);

const HELP: &str = "\
commands:
  search <text>       filter by symbol (resets page)
  clear               clear the search
  sort <key>          change | capital | futures (resets page)
  dir [asc|desc]      toggle or set sort direction (resets page)
  orient <mode>       futures-first | capital-first
  density [mode]      toggle or set compact | grid
  next | prev         page navigation
  page <n>            jump to page n
  open <id> | close   open or close the detail view
  refresh | retry     fetch again
  help | quit";

#[derive(Debug, Clone, PartialEq)]
enum WatchCommand {
    Search(String),
    Sort(SortKey),
    Direction(Option<SortDirection>),
    Orient(Orientation),
    Density(Option<Density>),
    Next,
    Prev,
    Page(usize),
    Open(RecordId),
    Close,
    Refresh,
    Retry,
    Help,
    Quit,
}

fn parse_command(line: &str) -> Result<WatchCommand, String> {
    let line = line.trim();
    let (verb, rest) = line
        .split_once(char::is_whitespace)
        .map(|(verb, rest)| (verb, rest.trim()))
        .unwrap_or((line, ""));

    let command = match verb.to_ascii_lowercase().as_str() {
        "search" | "s" => WatchCommand::Search(rest.to_owned()),
        "clear" => WatchCommand::Search(String::new()),
        "sort" => WatchCommand::Sort(rest.parse().map_err(|e| format!("{e}"))?),
        "dir" | "direction" if rest.is_empty() => WatchCommand::Direction(None),
        "dir" | "direction" => {
            WatchCommand::Direction(Some(rest.parse().map_err(|e| format!("{e}"))?))
        }
        "orient" | "orientation" => WatchCommand::Orient(rest.parse().map_err(|e| format!("{e}"))?),
        "density" if rest.is_empty() => WatchCommand::Density(None),
        "density" => WatchCommand::Density(Some(rest.parse().map_err(|e| format!("{e}"))?)),
        "next" | "n" => WatchCommand::Next,
        "prev" | "p" => WatchCommand::Prev,
        "page" => WatchCommand::Page(
            rest.parse()
                .map_err(|_| format!("page expects a number, got '{rest}'"))?,
        ),
        "open" if !rest.is_empty() => {
            WatchCommand::Open(rest.parse().unwrap_or_else(|never| match never {}))
        }
        "open" => return Err(String::from("open expects a record id")),
        "close" => WatchCommand::Close,
        "refresh" | "r" => WatchCommand::Refresh,
        "retry" => WatchCommand::Retry,
        "help" | "?" => WatchCommand::Help,
        "quit" | "exit" | "q" => WatchCommand::Quit,
        other => return Err(format!("unknown command '{other}'; type 'help'")),
    };
    Ok(command)
}

/// Returns `false` when the session should end.
fn apply(session: &mut WatchlistSession, command: WatchCommand) -> bool {
    match command {
        WatchCommand::Search(query) => session.set_search_query(query),
        WatchCommand::Sort(key) => session.set_sort_key(key),
        WatchCommand::Direction(None) => session.toggle_sort_direction(),
        WatchCommand::Direction(Some(direction)) => session.set_sort_direction(direction),
        WatchCommand::Orient(orientation) => session.set_orientation(orientation),
        WatchCommand::Density(None) => session.toggle_density(),
        WatchCommand::Density(Some(density)) => session.set_density(density),
        WatchCommand::Next => session.next_page(),
        WatchCommand::Prev => session.prev_page(),
        WatchCommand::Page(page) => session.go_to_page(page),
        WatchCommand::Open(id) => session.select(id),
        WatchCommand::Close => session.close_detail(),
        WatchCommand::Refresh => {
            session.refresh();
        }
        WatchCommand::Retry => {
            session.retry();
        }
        WatchCommand::Help => println!("{HELP}"),
        WatchCommand::Quit => return false,
    }
    true
}

fn print_frame(session: &WatchlistSession, format: OutputFormat) -> Result<(), CliError> {
    let snapshot = session.snapshot();
    match format {
        OutputFormat::Table => println!("{}", snapshot_frame(&snapshot)),
        OutputFormat::Json => println!("{}", serde_json::to_string(&snapshot)?),
    }
    Ok(())
}

#[derive(Debug, Serialize)]
struct WatchSummary {
    commands: usize,
    fetches: usize,
    failed_fetches: usize,
}

pub async fn run(
    args: &WatchArgs,
    config: &WatchlistConfig,
    format: OutputFormat,
) -> Result<CommandResult, CliError> {
    let mut session = build_session(config, to_view_state(&args.view))?;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut poll = tokio::time::interval(POLL_INTERVAL);
    let mut warnings = Vec::new();
    let mut summary = WatchSummary {
        commands: 0,
        fetches: 0,
        failed_fetches: 0,
    };

    session.refresh();
    print_frame(&session, format)?;

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                if line.trim().is_empty() {
                    continue;
                }
                match parse_command(&line) {
                    Ok(command) => {
                        summary.commands += 1;
                        if !apply(&mut session, command) {
                            break;
                        }
                        print_frame(&session, format)?;
                    }
                    Err(message) => {
                        eprintln!("{message}");
                        warnings.push(message);
                    }
                }
            }
            _ = poll.tick(), if session.is_fetching() => {
                if let Some(outcome) = session.settle_if_finished().await {
                    summary.fetches += 1;
                    if matches!(outcome, FetchOutcome::Failed(_)) {
                        summary.failed_fetches += 1;
                    }
                    print_frame(&session, format)?;
                }
            }
        }
    }

    session.teardown();
    let data = serde_json::to_value(&summary)?;
    Ok(CommandResult::ok(data, session.source_id()).with_warnings(warnings))
}
