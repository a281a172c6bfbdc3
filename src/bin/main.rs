use clap::Parser;
use crossterm::{
    cursor, execute,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, ClearType},
};
use speller_core::corpus;
use speller_core::persistence::{load_or_build, save_dictionary};
use speller_core::selection::selectable_rows;
use speller_core::{
    Cell, Dictionary, EngineConfig, PointCursor, SelectionMethod, Sentence, WordEngine,
};
use std::error::Error;
use std::io::{stdin, stdout, Stdout, Write};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(name = "speller")]
#[command(about = "Spell words by picking a row, then a letter, from a shrinking letter grid")]
struct Args {
    /// Text files to build the dictionary from (built-in word list if none)
    #[arg(short, long)]
    corpus: Vec<PathBuf>,

    /// Dictionary snapshot to load; corpora are only read if it is unusable
    #[arg(long)]
    snapshot: Option<PathBuf>,

    /// Write the dictionary to this snapshot path before starting
    #[arg(long)]
    save_snapshot: Option<PathBuf>,

    /// JSON engine config
    #[arg(long)]
    config: Option<PathBuf>,

    /// clear, reduce or point (asked at startup when omitted)
    #[arg(short, long)]
    method: Option<SelectionMethod>,

    /// Offer every letter, not just the ones that continue a known word
    #[arg(long)]
    unrestricted: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

/// One line of user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    /// A 1-based row, column or letter number.
    Pick(usize),
    Done,
    Next,
    Undo,
    Toggle,
    /// Accept the 1-based suggestion directly.
    Suggest(usize),
    Quit,
}

fn parse_command(input: &str) -> Option<Command> {
    let input = input.trim().to_lowercase();
    match input.as_str() {
        "d" => Some(Command::Done),
        "n" => Some(Command::Next),
        "u" => Some(Command::Undo),
        "t" => Some(Command::Toggle),
        "q" | "exit" => Some(Command::Quit),
        s if s.starts_with('s') => s[1..].parse().ok().filter(|&n| n > 0).map(Command::Suggest),
        s => s.parse().ok().filter(|&n| n > 0).map(Command::Pick),
    }
}

struct CliSession {
    engine: WordEngine,
    method: SelectionMethod,
    sentence: Sentence,
    cursor: PointCursor,
    pending_row: Option<usize>,
    notice: Option<String>,
    out: Stdout,
}

impl CliSession {
    fn run(&mut self) -> Result<(), Box<dyn Error>> {
        loop {
            self.auto_row();
            self.render()?;
            let Some(line) = read_line()? else { break };
            let Some(command) = parse_command(&line) else {
                self.notice = Some("Not a valid choice! Please choose again".to_string());
                continue;
            };
            if command == Command::Quit {
                break;
            }
            self.apply(command);
        }
        self.finish_word();
        writeln!(self.out, "\nFinal sentence: {}", self.sentence.text())?;
        Ok(())
    }

    /// With a single row on screen there is nothing to choose between.
    fn auto_row(&mut self) {
        if self.method == SelectionMethod::Point || self.pending_row.is_some() {
            return;
        }
        let rows = selectable_rows(self.engine.grid());
        if rows.len() == 1 {
            self.pending_row = Some(rows[0]);
        }
    }

    fn apply(&mut self, command: Command) {
        match command {
            Command::Pick(n) => self.pick(n - 1),
            Command::Next => {
                if self.method == SelectionMethod::Point {
                    self.cursor.advance(self.engine.grid());
                }
            }
            Command::Done => self.finish_word(),
            Command::Undo => {
                if self.pending_row.take().is_none() {
                    self.engine.undo();
                    self.cursor.reset();
                }
            }
            Command::Toggle => {
                let notice = if self.engine.toggle_unrestricted() {
                    "All letters available"
                } else {
                    "Letters restricted to known words"
                };
                self.after_change();
                self.notice = Some(notice.to_string());
            }
            Command::Suggest(k) => {
                let chosen = self.engine.suggestions().get(k - 1).map(|w| w.to_string());
                match chosen {
                    Some(word) => {
                        self.sentence.push(word);
                        self.engine.reset();
                        self.after_change();
                    }
                    None => self.notice = Some(format!("No suggestion {}", k)),
                }
            }
            Command::Quit => {}
        }
    }

    fn pick(&mut self, index: usize) {
        let result = match (self.method, self.pending_row) {
            (SelectionMethod::Point, _) => self.cursor.choose(&mut self.engine, index),
            (_, None) => {
                if selectable_rows(self.engine.grid()).contains(&index) {
                    self.pending_row = Some(index);
                } else {
                    self.notice = Some("Not a valid row! Please choose again".to_string());
                }
                return;
            }
            (method, Some(row)) => method.choose(&mut self.engine, row, index),
        };
        match result {
            Ok(_) => {
                self.after_change();
                if self.engine.is_done() {
                    self.finish_word();
                }
            }
            Err(e) => self.notice = Some(format!("{}. Please choose again", e)),
        }
    }

    fn after_change(&mut self) {
        self.pending_row = None;
        self.cursor.reset();
    }

    fn finish_word(&mut self) {
        if let Some(word) = self.engine.commit() {
            self.notice = Some(format!("Done! Word: {}", word));
            self.sentence.push(word);
        }
        self.after_change();
    }

    fn render(&mut self) -> Result<(), Box<dyn Error>> {
        execute!(self.out, terminal::Clear(ClearType::All), cursor::MoveTo(0, 0))?;
        execute!(
            self.out,
            SetForegroundColor(Color::Cyan),
            Print(format!("Grid Speller ({})\n", self.method)),
            ResetColor,
            Print("Numbers pick. d: done word, u: undo, t: all letters, s<k>: take suggestion, q: quit\n\n")
        )?;
        writeln!(self.out, "Sentence so far: {}", self.sentence.text())?;
        writeln!(self.out, "Word so far: {}", self.engine.prefix())?;
        let suggestions: Vec<String> = self
            .engine
            .suggestions()
            .iter()
            .enumerate()
            .map(|(i, w)| format!("s{}:{}", i + 1, w))
            .collect();
        writeln!(
            self.out,
            "Suggestions ({}): {}\n",
            self.engine.candidate_count(),
            suggestions.join("  ")
        )?;

        match (self.method, self.pending_row) {
            (SelectionMethod::Point, _) => {
                let row = self.cursor.row();
                self.render_row(row)?;
                self.render_notice()?;
                write!(self.out, "Letter number, or n if the letter is not on this page > ")?;
            }
            (_, None) => {
                self.render_grid()?;
                self.render_notice()?;
                write!(self.out, "Row > ")?;
            }
            (SelectionMethod::Grid, Some(row)) => {
                self.render_grid()?;
                self.render_notice()?;
                write!(self.out, "Column for row {} > ", row + 1)?;
            }
            (SelectionMethod::GridPoint, Some(row)) => {
                self.render_row(row)?;
                self.render_notice()?;
                write!(self.out, "Letter number > ")?;
            }
        }
        self.out.flush()?;
        Ok(())
    }

    fn render_grid(&mut self) -> Result<(), Box<dyn Error>> {
        let grid = self.engine.grid();
        let header: Vec<String> = (1..=grid.cols()).map(|c| c.to_string()).collect();
        let mut lines = vec![format!("   | {}", header.join(" | "))];
        for (idx, row) in grid.iter_rows().enumerate() {
            let cells: Vec<String> = row.iter().map(display_cell).collect();
            lines.push(format!(" {} | {}", idx + 1, cells.join(" | ")));
        }
        for (idx, line) in lines.into_iter().enumerate() {
            let highlighted = idx > 0 && self.pending_row == Some(idx - 1);
            if highlighted {
                execute!(self.out, SetForegroundColor(Color::Yellow), Print(line), ResetColor, Print("\n"))?;
            } else {
                writeln!(self.out, "{}", line)?;
            }
        }
        writeln!(self.out)?;
        Ok(())
    }

    fn render_row(&mut self, row: usize) -> Result<(), Box<dyn Error>> {
        let letters = self.engine.row_non_empty(row)?;
        let numbers: Vec<String> = (1..=letters.len()).map(|n| n.to_string()).collect();
        let letters: Vec<String> = letters.iter().map(|c| c.to_ascii_uppercase().to_string()).collect();
        writeln!(self.out, "{}", numbers.join(" | "))?;
        execute!(
            self.out,
            SetForegroundColor(Color::Yellow),
            Print(letters.join(" | ")),
            ResetColor,
            Print("\n\n")
        )?;
        Ok(())
    }

    fn render_notice(&mut self) -> Result<(), Box<dyn Error>> {
        if let Some(notice) = self.notice.take() {
            execute!(self.out, SetForegroundColor(Color::Red), Print(notice), ResetColor, Print("\n"))?;
        }
        Ok(())
    }
}

fn display_cell(cell: &Cell) -> String {
    match cell {
        Cell::Letter(c) => c.to_ascii_uppercase().to_string(),
        Cell::Empty => " ".to_string(),
    }
}

/// `None` on end of input.
fn read_line() -> Result<Option<String>, Box<dyn Error>> {
    let mut input = String::new();
    if stdin().read_line(&mut input)? == 0 {
        return Ok(None);
    }
    Ok(Some(input))
}

fn choose_method() -> Result<SelectionMethod, Box<dyn Error>> {
    let choices: Vec<&str> = SelectionMethod::ALL.iter().map(|m| m.prompt()).collect();
    loop {
        print!("Choose method to pick letters {:?}: ", choices);
        stdout().flush()?;
        let Some(line) = read_line()? else {
            return Ok(SelectionMethod::Grid);
        };
        match line.parse() {
            Ok(method) => return Ok(method),
            Err(e) => println!("{}", e),
        }
    }
}

fn build_dictionary(args: &Args) -> speller_core::error::Result<Dictionary> {
    let build = || corpus::dictionary_from_paths(&args.corpus);
    match &args.snapshot {
        Some(path) => load_or_build(path, build),
        None => build(),
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    env_logger::Builder::from_default_env()
        .filter_level(args.log_level.parse().unwrap_or(log::LevelFilter::Warn))
        .init();

    let mut config = match &args.config {
        Some(path) => EngineConfig::from_json_file(path)?,
        None => EngineConfig::default(),
    };
    if args.unrestricted {
        config.restricted = false;
    }

    let dictionary = build_dictionary(&args)?;
    if let Some(path) = &args.save_snapshot {
        save_dictionary(&dictionary, path)?;
        println!("Dictionary saved to '{}'", path.display());
    }
    if dictionary.is_empty() {
        println!("No words found in the dictionary sources; nothing will be suggested.");
    }

    let method = match args.method {
        Some(method) => method,
        None => choose_method()?,
    };
    config.display_mode = method.display_mode();

    let mut session = CliSession {
        engine: WordEngine::new(Arc::new(dictionary), config)?,
        method,
        sentence: Sentence::new(),
        cursor: PointCursor::new(),
        pending_row: None,
        notice: None,
        out: stdout(),
    };
    session.run()
}
