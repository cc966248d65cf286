//! Command-line surface over the dashboard core.
//!
//! Drives the library against a filesystem vault: render the dashboard
//! for a date, create daily or ad-hoc notes, and manage goal/task lists.

use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use chrono::NaiveDate;

use noteboard::ports::{ChoicePrompt, PromptProvider, TextPrompt};
use noteboard::services::capture;
use noteboard::services::dashboard::{render_and_commit, RenderSources};
use noteboard::services::goals::{add_item, remove_item, toggle_item, GoalList};
use noteboard::state::{AppState, FileDataStore};
use noteboard::vault::FsNoteHost;

const USAGE: &str = "\
noteboard: daily dashboard for a markdown note vault

Usage: noteboard [--vault <dir>] <command>

Commands:
  dashboard [YYYY-MM-DD]   render the dashboard (default: today) as JSON
  daily                    create today's daily note
  daily-pick               create a daily note for a chosen nearby date
  note                     create a note in a configured folder
  goal add <text> | done <id> | rm <id>
  task add <text> | done <id> | rm <id>
  config                   show current settings
  config folders <a,b,c> | daily <folder> | urls <list> | week-start <day>

The vault directory defaults to the current directory; data lives in
~/.noteboard/data.json.";

/// Prompts answered on stdin; empty input or EOF cancels.
struct StdioPrompts;

impl PromptProvider for StdioPrompts {
    fn prompt_text(&self, request: &TextPrompt) -> Option<String> {
        match &request.placeholder {
            Some(hint) => print!("{} [{}]: ", request.title, hint),
            None => print!("{}: ", request.title),
        }
        io::stdout().flush().ok()?;
        let line = io::stdin().lock().lines().next()?.ok()?;
        let line = line.trim().to_string();
        if line.is_empty() {
            None
        } else {
            Some(line)
        }
    }

    fn prompt_choice(&self, request: &ChoicePrompt) -> Option<usize> {
        println!("{}:", request.title);
        for (i, option) in request.options.iter().enumerate() {
            println!("  {}. {}", i + 1, option);
        }
        print!("> ");
        io::stdout().flush().ok()?;
        let line = io::stdin().lock().lines().next()?.ok()?;
        let picked: usize = line.trim().parse().ok()?;
        if picked >= 1 && picked <= request.options.len() {
            Some(picked - 1)
        } else {
            None
        }
    }
}

fn item_command(state: &AppState, list: GoalList, args: &[String]) -> Result<(), String> {
    match args.split_first() {
        Some((op, rest)) if op == "add" => {
            let text = rest.join(" ");
            match add_item(state, list, &text)? {
                Some(id) => println!("added {}", id),
                None => println!("nothing to add"),
            }
            Ok(())
        }
        Some((op, [id])) if op == "done" => toggle_item(state, list, id),
        Some((op, [id])) if op == "rm" => remove_item(state, list, id),
        _ => Err("expected: add <text> | done <id> | rm <id>".to_string()),
    }
}

fn config_command(state: &AppState, args: &[String]) -> Result<(), String> {
    let mut settings = state.settings_snapshot();
    match args.split_first() {
        None => {
            let json = serde_json::to_string_pretty(&settings)
                .map_err(|e| format!("Serialize error: {}", e))?;
            println!("{}", json);
            return Ok(());
        }
        Some((key, [value])) if key == "folders" => {
            settings.note_folders = value.split(',').map(|f| f.to_string()).collect();
        }
        Some((key, [value])) if key == "daily" => {
            settings.daily_note_folder = value.clone();
        }
        Some((key, [value])) if key == "urls" => {
            settings.calendar_urls = value.clone();
        }
        Some((key, [value])) if key == "week-start" => {
            settings.week_start = value.clone();
        }
        _ => {
            return Err(
                "expected: config [folders <a,b,c> | daily <folder> | urls <list> | week-start <day>]"
                    .to_string(),
            )
        }
    }
    state.update_settings(settings)
}

async fn run(args: Vec<String>) -> Result<(), String> {
    let mut vault_dir = ".".to_string();
    let mut rest: Vec<String> = Vec::new();
    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        if arg == "--vault" {
            vault_dir = iter.next().ok_or("--vault needs a directory")?;
        } else {
            rest.push(arg);
        }
    }

    let store = FileDataStore::new(FileDataStore::default_path()?);
    let state = AppState::load(Box::new(store));
    let host = FsNoteHost::new(vault_dir);
    let prompts = StdioPrompts;
    let today = chrono::Local::now().date_naive();

    let command = rest.first().cloned().unwrap_or_else(|| "dashboard".to_string());
    match command.as_str() {
        "dashboard" => {
            let selected = match rest.get(1) {
                Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                    .map_err(|e| format!("Invalid date {}: {}", raw, e))?,
                None => today,
            };
            let fetcher = noteboard::feeds::HttpFeedFetcher::new();
            let sources = RenderSources {
                host: &host,
                index: None,
                fetcher: &fetcher,
            };
            let view = render_and_commit(&state, &sources, selected)
                .await
                .ok_or("render superseded")?;
            let json = serde_json::to_string_pretty(&view)
                .map_err(|e| format!("Serialize error: {}", e))?;
            println!("{}", json);
            Ok(())
        }
        "daily" => {
            let path = capture::create_daily_note(&host, &state.settings_snapshot(), today)?;
            println!("{}", path);
            Ok(())
        }
        "daily-pick" => {
            match capture::create_daily_note_prompted(
                &host,
                &prompts,
                &state.settings_snapshot(),
                today,
            )? {
                Some(path) => println!("{}", path),
                None => println!("cancelled"),
            }
            Ok(())
        }
        "note" => {
            match capture::create_note_prompted(&host, &prompts, &state.settings_snapshot())? {
                Some(path) => println!("{}", path),
                None => println!("cancelled"),
            }
            Ok(())
        }
        "goal" => item_command(&state, GoalList::Goals, &rest[1..]),
        "task" => item_command(&state, GoalList::Tasks, &rest[1..]),
        "config" => config_command(&state, &rest[1..]),
        "help" | "--help" | "-h" => {
            println!("{}", USAGE);
            Ok(())
        }
        other => Err(format!("unknown command: {}\n\n{}", other, USAGE)),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();
    let args: Vec<String> = std::env::args().skip(1).collect();
    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("{}", message);
            ExitCode::FAILURE
        }
    }
}
