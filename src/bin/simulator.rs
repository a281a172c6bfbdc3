use clap::Parser;
use log::{debug, info, warn};
use serde_json::json;
use speller_core::corpus;
use speller_core::persistence::load_or_build;
use speller_core::{DisplayMode, EngineConfig, Speller, WordEngine};
use std::error::Error;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

/// Line-protocol driver: one command per stdin line, one JSON reply per
/// stdout line. Every reply is `{"state": <view>}`, plus `"committed"` after
/// a commit or `"error"` when the command was rejected; the greeting line
/// has the same shape.
#[derive(Parser, Debug)]
#[command(name = "simulator")]
#[command(about = "Drive a spelling session over stdin/stdout")]
struct Args {
    /// Text files to build the dictionary from (built-in word list if none)
    #[arg(short, long)]
    corpus: Vec<PathBuf>,

    /// Dictionary snapshot to load
    #[arg(long)]
    snapshot: Option<PathBuf>,

    /// JSON engine config
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    env_logger::Builder::from_default_env()
        .filter_level(args.log_level.parse().unwrap_or(log::LevelFilter::Info))
        .target(env_logger::Target::Stderr)
        .init();
    info!("--- Speller line protocol starting ---");

    let config = match &args.config {
        Some(path) => EngineConfig::from_json_file(path)?,
        None => EngineConfig::default(),
    };
    let build = || corpus::dictionary_from_paths(&args.corpus);
    let dictionary = match &args.snapshot {
        Some(path) => load_or_build(path, build)?,
        None => build()?,
    };
    let mut engine = WordEngine::new(Arc::new(dictionary), config)?;

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    writeln!(stdout, "{}", state_reply(&engine))?;
    stdout.flush()?;

    for line in stdin.lock().lines() {
        let input = line?;
        debug!("<- {:?}", input);
        let Some(reply) = handle_command(&mut engine, &input) else {
            info!("Received EXIT, shutting down.");
            break;
        };
        debug!("-> {}", reply);
        writeln!(stdout, "{}", reply)?;
        stdout.flush()?;
    }
    Ok(())
}

/// Runs one command and returns the JSON reply; `None` means stop.
fn handle_command<S: Speller>(speller: &mut S, input: &str) -> Option<serde_json::Value> {
    let parts: Vec<&str> = input.split_whitespace().collect();
    let command = parts.first().copied().unwrap_or("").to_uppercase();
    let arg = |i: usize| parts.get(i).and_then(|s| s.parse::<usize>().ok());

    let mut committed = None;
    match command.as_str() {
        "SELECT" => match (arg(1), arg(2)) {
            (Some(row), Some(col)) => {
                if let Err(e) = speller.select_cell(row, col) {
                    return Some(error_reply(speller, e.to_string()));
                }
            }
            _ => return Some(error_reply(speller, "usage: SELECT <row> <col>".to_string())),
        },
        "LETTER" => {
            let mut letters = parts.get(1).map(|s| s.chars()).into_iter().flatten();
            match (letters.next(), letters.next()) {
                (Some(letter), None) => {
                    if let Err(e) = speller.select_letter(letter) {
                        return Some(error_reply(speller, e.to_string()));
                    }
                }
                _ => return Some(error_reply(speller, "usage: LETTER <a-z>".to_string())),
            }
        }
        "UNDO" => {
            speller.undo();
        }
        "RESET" => speller.reset(),
        "TOGGLE" => {
            speller.toggle_unrestricted();
        }
        "MODE" => match parts.get(1).map(|s| s.to_lowercase()).as_deref() {
            Some("clear") => speller.set_display_mode(DisplayMode::Clearing),
            Some("shrink") => speller.set_display_mode(DisplayMode::Shrinking),
            _ => return Some(error_reply(speller, "usage: MODE clear|shrink".to_string())),
        },
        "COMMIT" => committed = speller.commit(),
        "STATE" => {}
        "EXIT" => return None,
        other => {
            warn!("Unknown command {:?}", other);
            return Some(error_reply(speller, format!("unknown command '{}'", other)));
        }
    }

    let mut reply = state_reply(speller);
    if let Some(word) = committed {
        reply["committed"] = json!(word);
    }
    Some(reply)
}

fn state_reply<S: Speller>(speller: &S) -> serde_json::Value {
    json!({ "state": speller.view() })
}

fn error_reply<S: Speller>(speller: &S, message: String) -> serde_json::Value {
    json!({ "error": message, "state": speller.view() })
}
