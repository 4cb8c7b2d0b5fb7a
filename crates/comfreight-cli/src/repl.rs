//! Interactive REPL (Read-Eval-Print Loop) mode.
//!
//! One session owns one seeded store. Shipments created or changed here
//! live until the REPL exits.

use crate::cli::{AnalyzeArgs, CreateArgs, LogExceptionArgs, SearchArgs, ShowArgs};
use crate::commands;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use comfreight_analyzer::{Applied, ExceptionAnalyzer, ExceptionDraft};
use comfreight_domain::traits::{LlmProvider, ShipmentStore};
use comfreight_domain::TrackingId;
use comfreight_store::InMemoryStore;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::path::PathBuf;
use tracing::debug;

/// Run the interactive REPL.
pub async fn run_repl(config: &Config, formatter: &Formatter) -> Result<()> {
    println!(
        "{}",
        formatter.info("ComFreight REPL - Type 'help' for commands, 'exit' to quit")
    );

    let analyzer = match config.build_analyzer() {
        Ok(analyzer) => Some(analyzer),
        Err(CliError::MissingApiKey(var)) => {
            println!(
                "{}",
                formatter.warning(&format!("AI analysis disabled: set {} to enable it", var))
            );
            None
        }
        Err(e) => return Err(e),
    };
    println!();

    let mut session = ReplSession::new(InMemoryStore::seeded(), analyzer);

    // Initialize readline editor
    let editor_config = rustyline::Config::builder()
        .max_history_size(config.settings.history_size)?
        .build();
    let mut editor = DefaultEditor::with_config(editor_config)?;

    // Load history
    let history_path = get_history_path()?;
    let _ = editor.load_history(&history_path);

    loop {
        match editor.readline(&session.prompt()) {
            Ok(line) => {
                let line = line.trim();

                if line.is_empty() {
                    continue;
                }

                editor.add_history_entry(line).ok();

                match parse_repl_command(line) {
                    Ok(ReplCommand::Exit) => {
                        println!("{}", formatter.info("Goodbye!"));
                        break;
                    }
                    Ok(ReplCommand::Help) => {
                        print_help(formatter);
                    }
                    Ok(cmd) => {
                        if let Err(e) = session.execute(cmd, formatter).await {
                            eprintln!("{}", formatter.error(&e.to_string()));
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

    // Save history
    editor.save_history(&history_path).ok();

    Ok(())
}

/// REPL command type.
#[derive(Debug)]
pub enum ReplCommand {
    /// Leave the REPL
    Exit,
    /// Print usage
    Help,
    /// List all shipments
    List,
    /// Search shipments
    Search(String),
    /// Show one shipment
    Show(String),
    /// Show a shipment and open its exception form
    Open(String),
    /// Close the exception form
    Close,
    /// Create a shipment
    Create(CreateArgs),
    /// Log an exception directly, without analysis
    Log {
        /// Tracking id
        id: String,
        /// Problem description
        description: String,
    },
    /// Set the open form's description
    Describe(String),
    /// Analyze free text, or the open form's description when `None`
    Analyze(Option<String>),
    /// Log the open form as an exception
    Submit,
    /// Clear the open form
    Cancel,
    /// Show the open form
    Draft,
}

/// Parse a REPL command line.
pub fn parse_repl_command(line: &str) -> Result<ReplCommand> {
    let line = line.trim();
    let (head, rest) = line
        .split_once(char::is_whitespace)
        .map(|(head, rest)| (head, rest.trim()))
        .unwrap_or((line, ""));

    if head.is_empty() {
        return Err(CliError::InvalidInput("Empty command".to_string()));
    }

    match head {
        "exit" | "quit" | "q" => Ok(ReplCommand::Exit),
        "help" | "?" => Ok(ReplCommand::Help),
        "list" | "ls" => Ok(ReplCommand::List),
        "search" => Ok(ReplCommand::Search(rest.to_string())),
        "show" => Ok(ReplCommand::Show(required(rest, "show <id>")?)),
        "open" => Ok(ReplCommand::Open(required(rest, "open <id>")?)),
        "close" => Ok(ReplCommand::Close),
        "create" => parse_create_command(rest),
        "log" => parse_log_command(rest),
        "describe" => Ok(ReplCommand::Describe(required(rest, "describe <text>")?)),
        "analyze" => Ok(ReplCommand::Analyze(
            Some(rest.to_string()).filter(|text| !text.is_empty()),
        )),
        "submit" => Ok(ReplCommand::Submit),
        "cancel" => Ok(ReplCommand::Cancel),
        "draft" => Ok(ReplCommand::Draft),
        _ => Err(CliError::InvalidInput(format!(
            "Unknown command: {}. Type 'help' for available commands.",
            head
        ))),
    }
}

fn required(rest: &str, usage: &str) -> Result<String> {
    if rest.is_empty() {
        return Err(CliError::InvalidInput(format!("Usage: {}", usage)));
    }
    Ok(rest.to_string())
}

// Locations contain spaces and commas, so fields are separated by '|'
fn parse_create_command(rest: &str) -> Result<ReplCommand> {
    let fields: Vec<&str> = rest.split('|').map(str::trim).collect();
    let [origin, destination, carrier, eta] = fields.as_slice() else {
        return Err(CliError::InvalidInput(
            "Usage: create <origin> | <destination> | <carrier> | <eta>".to_string(),
        ));
    };

    Ok(ReplCommand::Create(CreateArgs {
        origin: origin.to_string(),
        destination: destination.to_string(),
        carrier: carrier.to_string(),
        eta: eta.to_string(),
    }))
}

fn parse_log_command(rest: &str) -> Result<ReplCommand> {
    let Some((id, description)) = rest.split_once(char::is_whitespace) else {
        return Err(CliError::InvalidInput(
            "Usage: log <id> <description>".to_string(),
        ));
    };

    Ok(ReplCommand::Log {
        id: id.to_string(),
        description: description.trim().to_string(),
    })
}

/// State of one REPL session.
pub struct ReplSession<L: LlmProvider> {
    store: InMemoryStore,
    analyzer: Option<ExceptionAnalyzer<L>>,
    selected: Option<TrackingId>,
    draft: ExceptionDraft,
}

impl<L> ReplSession<L>
where
    L: LlmProvider + Sync,
    L::Error: std::fmt::Display,
{
    /// Create a session over `store`.
    pub fn new(store: InMemoryStore, analyzer: Option<ExceptionAnalyzer<L>>) -> Self {
        Self {
            store,
            analyzer,
            selected: None,
            draft: ExceptionDraft::new(),
        }
    }

    /// The session's store.
    pub fn store(&self) -> &InMemoryStore {
        &self.store
    }

    /// Shipment whose exception form is open.
    pub fn selected(&self) -> Option<TrackingId> {
        self.selected
    }

    /// The open exception form.
    pub fn draft(&self) -> &ExceptionDraft {
        &self.draft
    }

    /// Prompt text, showing the open shipment.
    pub fn prompt(&self) -> String {
        match self.selected {
            Some(id) => format!("comfreight [{}]> ", id),
            None => "comfreight> ".to_string(),
        }
    }

    /// Execute one command.
    pub async fn execute(&mut self, cmd: ReplCommand, formatter: &Formatter) -> Result<()> {
        debug!("REPL command: {:?}", cmd);

        match cmd {
            ReplCommand::Exit | ReplCommand::Help => {}
            ReplCommand::List => {
                commands::execute_list(&self.store, formatter)?;
            }
            ReplCommand::Search(term) => {
                commands::execute_search(SearchArgs { term }, &self.store, formatter)?;
            }
            ReplCommand::Show(id) => {
                commands::execute_show(ShowArgs { id }, &self.store, formatter)?;
            }
            ReplCommand::Open(id) => {
                let shipment = commands::execute_show(ShowArgs { id }, &self.store, formatter)?;
                self.selected = Some(shipment.id);
                self.draft.reset();
                println!(
                    "{}",
                    formatter.info(&format!(
                        "Logging an exception for {}: 'describe', 'analyze', 'submit' or 'close'",
                        shipment.id
                    ))
                );
            }
            ReplCommand::Close => {
                self.selected = None;
                self.draft.reset();
            }
            ReplCommand::Create(args) => {
                commands::execute_create(args, &mut self.store, formatter)?;
            }
            ReplCommand::Log { id, description } => {
                let args = LogExceptionArgs {
                    id,
                    description,
                    analyze: false,
                };
                commands::execute_log_exception::<L>(args, &mut self.store, None, formatter)
                    .await?;
            }
            ReplCommand::Describe(text) => {
                self.require_selected()?;
                self.draft.set_description(text);
                println!("{}", formatter.success("Description updated"));
            }
            ReplCommand::Analyze(Some(description)) => {
                let analyzer = self.analyzer.as_ref().ok_or(CliError::AnalysisDisabled)?;
                commands::execute_analyze(AnalyzeArgs { description }, analyzer, formatter)
                    .await?;
            }
            ReplCommand::Analyze(None) => {
                self.require_selected()?;
                let analyzer = self.analyzer.as_ref().ok_or(CliError::AnalysisDisabled)?;
                println!("{}", formatter.info("Analyzing..."));
                match analyzer.analyze_draft(&mut self.draft).await? {
                    Applied::Analysis => {
                        if let Some(analysis) = self.draft.analysis() {
                            println!("{}", formatter.format_analysis(analysis)?);
                        }
                    }
                    Applied::Unavailable | Applied::Failed => {
                        let message = self.draft.error().unwrap_or_default();
                        eprintln!("{}", formatter.warning(message));
                    }
                    Applied::Discarded => {}
                }
            }
            ReplCommand::Submit => {
                let id = self.require_selected()?;
                let record = self.draft.submit(self.store.now())?;
                let shipment = self.store.log_exception(id, record)?;
                println!("{}", formatter.exception_logged(&shipment.id));
                println!("{}", formatter.format_shipment(&shipment)?);
            }
            ReplCommand::Cancel => {
                self.draft.reset();
            }
            ReplCommand::Draft => {
                self.require_selected()?;
                self.print_draft(formatter)?;
            }
        }

        Ok(())
    }

    fn require_selected(&self) -> Result<TrackingId> {
        self.selected.ok_or_else(|| {
            CliError::InvalidInput("No shipment open. Use 'open <id>' first.".to_string())
        })
    }

    fn print_draft(&self, formatter: &Formatter) -> Result<()> {
        let description = self.draft.description();
        if description.is_empty() {
            println!("Description: (empty)");
        } else {
            println!("Description: {}", description);
        }
        if let Some(analysis) = self.draft.analysis() {
            println!("{}", formatter.format_analysis(analysis)?);
        }
        if let Some(error) = self.draft.error() {
            println!("{}", formatter.warning(error));
        }
        Ok(())
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
    println!("  list                           - List shipments, newest first");
    println!("  search <term>                  - Search by id, origin or destination");
    println!("  show <id>                      - Show a shipment");
    println!("  create <o> | <d> | <c> | <eta> - Create a shipment");
    println!("    o: origin, d: destination, c: carrier");
    println!("    eta: estimated delivery (YYYY-MM-DD)");
    println!("  log <id> <description>         - Log an exception without analysis");
    println!("  analyze <description>          - Analyze text without logging it");
    println!();
    println!("  open <id>                      - Start an exception for a shipment");
    println!("  describe <text>                - Set the exception description");
    println!("  analyze                        - Analyze the description");
    println!("  draft                          - Show the exception being written");
    println!("  submit                         - Log the exception");
    println!("  cancel                         - Clear the description");
    println!("  close                          - Stop editing");
    println!();
    println!("  help, ?                        - Show this help");
    println!("  exit, quit, q                  - Exit REPL");
    println!();
}
