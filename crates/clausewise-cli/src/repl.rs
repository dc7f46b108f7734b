//! Interactive review session over an analyzed document.

use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use clausewise_analyzer::{ChatOutcome, ClauseAssistant};
use clausewise_domain::traits::LlmProvider;
use clausewise_domain::{CategoryFilter, ChatSession, ResultsView, SUGGESTED_QUESTIONS};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::fmt::Display;
use std::path::PathBuf;

/// Run the interactive review loop.
pub async fn run_review<L>(
    view: ResultsView,
    assistant: &ClauseAssistant<L>,
    config: &Config,
    formatter: &Formatter,
) -> Result<()>
where
    L: LlmProvider,
    L::Error: Display,
{
    println!(
        "{}",
        formatter.info("Review mode - Type 'help' for commands, 'exit' to quit")
    );
    println!();

    let editor_config = rustyline::Config::builder()
        .max_history_size(config.settings.history_size)
        .map_err(|e| CliError::Editor(e.to_string()))?
        .build();
    let mut editor = DefaultEditor::with_config(editor_config)
        .map_err(|e| CliError::Editor(format!("Failed to initialize editor: {}", e)))?;

    let history_path = get_history_path()?;
    let _ = editor.load_history(&history_path);

    let mut session = ReviewSession::new(view, assistant, formatter);

    loop {
        match editor.readline(&session.prompt()) {
            Ok(line) => {
                let line = line.trim();

                if line.is_empty() {
                    continue;
                }

                editor.add_history_entry(line).ok();

                match parse_repl_command(line, session.chat().is_open()) {
                    Ok(ReplCommand::Exit) => {
                        println!("{}", formatter.info("Goodbye!"));
                        break;
                    }
                    Ok(ReplCommand::Help) => {
                        print_help(formatter);
                    }
                    Ok(cmd) => {
                        if matches!(cmd, ReplCommand::Ask(_)) {
                            println!("{}", formatter.info("Waiting for an answer..."));
                        }
                        match session.execute(cmd).await {
                            Ok(output) => println!("{}", output),
                            Err(e) => eprintln!("{}", formatter.error(&e.to_string())),
                        }
                    }
                    Err(e) => {
                        eprintln!("{}", formatter.error(&e.to_string()));
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", formatter.info("Use 'exit' to quit"));
            }
            Err(ReadlineError::Eof) => {
                break;
            }
            Err(err) => {
                eprintln!("{}", formatter.error(&format!("Error: {}", err)));
                break;
            }
        }
    }

    editor.save_history(&history_path).ok();

    Ok(())
}

/// REPL command type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    /// Leave the session
    Exit,
    /// Show available commands
    Help,
    /// Change the category filter
    Filter(CategoryFilter),
    /// Change the search text; empty clears it
    Search(String),
    /// Show the filtered clause list
    List,
    /// Toggle the detail of one clause
    Expand(u32),
    /// Show the document overview
    Summary,
    /// Show the overall risks
    Risks,
    /// Print the plain-text report
    Report,
    /// Open a chat about one clause
    Select(u32),
    /// Close the chat
    Close,
    /// Ask about the selected clause
    Ask(String),
    /// Show the chat transcript
    Transcript,
}

/// Parse a REPL command line.
///
/// While a chat is open, a line is taken as a question unless it is a
/// well-formed command: a command that takes no argument must stand alone,
/// and one that takes an argument must have a valid one.
pub fn parse_repl_command(line: &str, chat_open: bool) -> Result<ReplCommand> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    if word.is_empty() {
        return Err(CliError::InvalidInput("Empty command".to_string()));
    }

    if word == "ask" {
        if rest.is_empty() {
            return Err(CliError::InvalidInput(
                "Usage: ask <question | suggestion number>".to_string(),
            ));
        }
        return Ok(ReplCommand::Ask(rest.to_string()));
    }

    match parse_command(word, rest) {
        Ok(cmd) if chat_open && !rest.is_empty() && !cmd.takes_argument() => {
            Ok(ReplCommand::Ask(line.to_string()))
        }
        Ok(cmd) => Ok(cmd),
        Err(_) if chat_open => Ok(ReplCommand::Ask(line.to_string())),
        Err(e) => Err(e),
    }
}

fn parse_command(word: &str, rest: &str) -> Result<ReplCommand> {
    match word {
        "exit" | "quit" | "q" => Ok(ReplCommand::Exit),
        "help" | "?" => Ok(ReplCommand::Help),
        "filter" => {
            let filter = CategoryFilter::parse(rest).ok_or_else(|| {
                CliError::InvalidInput("Usage: filter <all|safe|warning|danger>".to_string())
            })?;
            Ok(ReplCommand::Filter(filter))
        }
        "search" => Ok(ReplCommand::Search(rest.to_string())),
        "list" | "ls" => Ok(ReplCommand::List),
        "expand" => Ok(ReplCommand::Expand(parse_id(rest, "expand")?)),
        "summary" => Ok(ReplCommand::Summary),
        "risks" => Ok(ReplCommand::Risks),
        "report" => Ok(ReplCommand::Report),
        "select" => Ok(ReplCommand::Select(parse_id(rest, "select")?)),
        "close" => Ok(ReplCommand::Close),
        "transcript" => Ok(ReplCommand::Transcript),
        _ => Err(CliError::InvalidInput(format!(
            "Unknown command: {}. Type 'help' for available commands.",
            word
        ))),
    }
}

fn parse_id(arg: &str, command: &str) -> Result<u32> {
    arg.parse()
        .map_err(|_| CliError::InvalidInput(format!("Usage: {} <clause id>", command)))
}

impl ReplCommand {
    fn takes_argument(&self) -> bool {
        matches!(
            self,
            ReplCommand::Filter(_)
                | ReplCommand::Search(_)
                | ReplCommand::Expand(_)
                | ReplCommand::Select(_)
                | ReplCommand::Ask(_)
        )
    }
}

/// Review state: the results view plus the clause chat.
pub struct ReviewSession<'a, L> {
    view: ResultsView,
    chat: ChatSession,
    assistant: &'a ClauseAssistant<L>,
    formatter: &'a Formatter,
}

impl<'a, L> ReviewSession<'a, L>
where
    L: LlmProvider,
    L::Error: Display,
{
    /// Start a session with no clause selected.
    pub fn new(view: ResultsView, assistant: &'a ClauseAssistant<L>, formatter: &'a Formatter) -> Self {
        Self {
            view,
            chat: ChatSession::new(),
            assistant,
            formatter,
        }
    }

    /// The results view.
    pub fn view(&self) -> &ResultsView {
        &self.view
    }

    /// The clause chat.
    pub fn chat(&self) -> &ChatSession {
        &self.chat
    }

    /// Line editor prompt.
    pub fn prompt(&self) -> String {
        match self.chat.selected() {
            Some(clause) => format!("clausewise #{}> ", clause.id),
            None => "clausewise> ".to_string(),
        }
    }

    /// Execute one command, returning the text to print.
    pub async fn execute(&mut self, cmd: ReplCommand) -> Result<String> {
        let f = self.formatter;
        match cmd {
            ReplCommand::Exit | ReplCommand::Help => Ok(String::new()),
            ReplCommand::Filter(filter) => {
                self.view.set_category(filter);
                Ok(self.list())
            }
            ReplCommand::Search(query) => {
                self.view.set_query(query);
                Ok(self.list())
            }
            ReplCommand::List => Ok(self.list()),
            ReplCommand::Expand(id) => {
                self.require_clause(id)?;
                match self.view.toggle_expanded(id) {
                    Some(_) => Ok(self
                        .view
                        .expanded()
                        .map(|clause| f.format_clause_detail(clause))
                        .unwrap_or_default()),
                    None => Ok(f.info(&format!("Collapsed clause #{}", id))),
                }
            }
            ReplCommand::Summary => Ok(f.format_overview(&self.view)),
            ReplCommand::Risks => {
                if self.view.risks().is_empty() {
                    Ok(f.info("No overall risks listed."))
                } else {
                    Ok(f.format_risks(self.view.risks()))
                }
            }
            ReplCommand::Report => Ok(f.format_report(&self.view)),
            ReplCommand::Select(id) => {
                let clause = self.require_clause(id)?.clone();
                self.chat.select(clause);
                Ok(format!(
                    "{}\n{}",
                    f.format_transcript(&self.chat),
                    f.format_suggestions()
                ))
            }
            ReplCommand::Close => {
                self.chat.close();
                Ok(f.info("Chat closed."))
            }
            ReplCommand::Ask(input) => {
                let question = resolve_suggestion(&input);
                let outcome = self
                    .assistant
                    .ask(&mut self.chat, &question)
                    .await
                    .map_err(|rejection| CliError::InvalidInput(rejection.to_string()))?;
                match outcome {
                    ChatOutcome::Answered | ChatOutcome::Failed => Ok(self.last_exchange()),
                    ChatOutcome::Discarded => Ok(String::new()),
                }
            }
            ReplCommand::Transcript => Ok(f.format_transcript(&self.chat)),
        }
    }

    fn list(&self) -> String {
        format!(
            "{}\n{}",
            self.formatter.format_filter_bar(self.view.filter().category),
            self.formatter
                .format_clause_list(&self.view.visible_clauses(), &self.view.filter().query)
        )
    }

    fn require_clause(&self, id: u32) -> Result<&clausewise_domain::FlatClause> {
        self.view
            .clause(id)
            .ok_or_else(|| CliError::InvalidInput(format!("No clause with id {}", id)))
    }

    fn last_exchange(&self) -> String {
        if let Some(error) = self.chat.error() {
            return self.formatter.error(error);
        }
        self.chat
            .transcript()
            .last()
            .map(|message| format!("Assistant: {}", message.text))
            .unwrap_or_default()
    }
}

/// A bare suggestion number picks that suggested question.
fn resolve_suggestion(input: &str) -> String {
    match input.trim().parse::<usize>() {
        Ok(n) if (1..=SUGGESTED_QUESTIONS.len()).contains(&n) => SUGGESTED_QUESTIONS[n - 1].to_string(),
        _ => input.to_string(),
    }
}

fn get_history_path() -> Result<PathBuf> {
    let dir = Config::dir()?;
    std::fs::create_dir_all(&dir)?;
    Ok(dir.join("history.txt"))
}

fn print_help(formatter: &Formatter) {
    println!("{}", formatter.info("Available commands:"));
    println!();
    println!("  list, ls                       - Show the filtered clause list");
    println!("  filter <all|safe|warning|danger> - Filter clauses by category");
    println!("  search [text]                  - Search clause text and explanations (empty clears)");
    println!("  expand <id>                    - Show or hide the full detail of a clause");
    println!("  summary                        - Show the document overview");
    println!("  risks                          - Show the overall risks");
    println!("  report                         - Print a plain-text analysis report");
    println!("  select <id>                    - Ask questions about a clause");
    println!("  ask <question|1-4>             - Ask about the selected clause");
    println!("  transcript                     - Show the conversation so far");
    println!("  close                          - Close the clause chat");
    println!("  help, ?                        - Show this help");
    println!("  exit, quit, q                  - Exit review");
    println!();
    println!("  While a clause is selected, any line that is not a complete command is");
    println!("  sent as a question. Use 'ask' to force a line to be a question.");
    println!();
}
