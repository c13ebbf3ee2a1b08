//! Interactive search shell
//!
//! Loads the country list once, then treats every line as a search query.
//! Lines starting with ':' are shell commands.

use anyhow::Result;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Editor, Helper};
use tokio::sync::mpsc::UnboundedReceiver;

use crate::cli::commands::{drain_events, open_store};
use crate::config::Config;
use crate::fetcher::HttpFetcher;
use crate::store::{CountryStore, FetchState, StoreEvent};
use crate::view::{ListView, SEARCH_PLACEHOLDER};

/// Shell built-in commands
const COMMANDS: &[&str] = &[":retry", ":all", ":help", ":quit", ":exit"];

/// What a line of input asks for
#[derive(Debug, PartialEq, Eq)]
enum ShellInput {
    Search(String),
    All,
    Retry,
    Help,
    Quit,
    Unknown(String),
}

fn parse_input(line: &str) -> ShellInput {
    let line = line.trim();
    if line.is_empty() {
        return ShellInput::All;
    }

    match line {
        ":retry" | ":r" => ShellInput::Retry,
        ":all" | ":a" => ShellInput::All,
        ":help" | ":h" | ":?" => ShellInput::Help,
        ":quit" | ":q" | ":exit" => ShellInput::Quit,
        cmd if cmd.starts_with(':') => ShellInput::Unknown(cmd.to_string()),
        query => ShellInput::Search(query.to_string()),
    }
}

/// Completes ':' commands and shows the search placeholder on an empty line
#[derive(Default)]
struct ShellHelper;

impl Completer for ShellHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &rustyline::Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let prefix = &line[..pos];
        if !prefix.starts_with(':') || prefix.contains(' ') {
            return Ok((pos, vec![]));
        }

        let candidates = COMMANDS
            .iter()
            .filter(|cmd| cmd.starts_with(prefix))
            .map(|cmd| Pair {
                display: cmd.to_string(),
                replacement: cmd.to_string(),
            })
            .collect();
        Ok((0, candidates))
    }
}

impl Hinter for ShellHelper {
    type Hint = String;

    fn hint(&self, line: &str, _pos: usize, _ctx: &rustyline::Context<'_>) -> Option<String> {
        line.is_empty().then(|| SEARCH_PLACEHOLDER.to_string())
    }
}

impl Highlighter for ShellHelper {}
impl Validator for ShellHelper {}
impl Helper for ShellHelper {}

fn print_help() {
    println!(
        r#"Countries Interactive Shell

Type any text to filter by country name or capital.
An empty line shows every country.

Commands:
  :retry, :r      Fetch the list again
  :all, :a        Clear the search
  :help, :h       Show this help
  :quit, :q       Exit the shell
"#
    );
}

/// Store plus the view fed by its events
struct Session {
    store: CountryStore<HttpFetcher>,
    events: UnboundedReceiver<StoreEvent>,
    view: ListView,
}

impl Session {
    fn open(config: &Config) -> Result<Self> {
        let mut store = open_store(config)?;
        let events = store.subscribe();
        Ok(Self {
            store,
            events,
            view: ListView::new(config.display.show_region),
        })
    }

    fn render(&mut self) {
        drain_events(&mut self.events, &mut self.view);
        let text = self.view.render();
        if !text.is_empty() {
            println!("{}", text);
        }
    }

    /// Fetch (or re-fetch) and show progress, then the outcome
    async fn fetch(&mut self, retry: bool) {
        if retry {
            self.store.retry();
        } else {
            self.store.load();
        }
        self.render();
        self.store.settle().await;
        self.render();

        if self.store.state() == &FetchState::Loaded {
            println!("{} countries loaded.", self.store.all_countries().len());
        }
    }

    fn search(&mut self, query: Option<&str>) {
        self.store.update_search(query);
        self.render();

        if query.is_some() && self.store.state() == &FetchState::Loaded {
            println!(
                "{} of {} countries match.",
                self.view.items().len(),
                self.store.all_countries().len()
            );
        }
    }
}

/// Run the interactive shell
pub async fn run(config: &Config) -> Result<()> {
    println!("Countries Interactive Shell v{}", env!("CARGO_PKG_VERSION"));
    println!("Type to search, ':help' for commands, ':quit' to exit.\n");

    let editor_config = rustyline::Config::builder()
        .history_ignore_space(true)
        .completion_type(rustyline::CompletionType::List)
        .build();

    let mut rl = Editor::with_config(editor_config)?;
    rl.set_helper(Some(ShellHelper));

    let history = Config::history_path().ok();
    if let Some(path) = &history {
        let _ = rl.load_history(path);
    }

    let mut session = Session::open(config)?;
    session.fetch(false).await;

    loop {
        match rl.readline("search> ") {
            Ok(line) => {
                if !line.trim().is_empty() {
                    rl.add_history_entry(line.trim())?;
                }

                match parse_input(&line) {
                    ShellInput::Search(query) => session.search(Some(&query)),
                    ShellInput::All => session.search(None),
                    ShellInput::Retry => session.fetch(true).await,
                    ShellInput::Help => print_help(),
                    ShellInput::Quit => break,
                    ShellInput::Unknown(cmd) => {
                        println!("Unknown command: {} (try ':help')", cmd)
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!(":quit");
                break;
            }
            Err(err) => {
                tracing::error!("Readline failed: {:?}", err);
                eprintln!("Error: {:?}", err);
                break;
            }
        }
    }

    if let Some(path) = &history {
        if let Some(parent) = path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        if let Err(e) = rl.save_history(path) {
            tracing::warn!("Failed to save shell history: {}", e);
        }
    }

    Ok(())
}
