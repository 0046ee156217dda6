use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{debug, info};

use expense_tracker::cli::{
    handle_add_command, handle_categories_command, handle_list_command, handle_summary_command,
    AddArgs, SummaryArgs,
};
use expense_tracker::config::{paths::TrackerPaths, settings::Settings};
use expense_tracker::ledger::Ledger;
use expense_tracker::logging;
use expense_tracker::models::EntryKind;
use expense_tracker::shell::Session;

#[derive(Parser)]
#[command(
    name = "tracker",
    version,
    about = "Terminal-based personal income and expense ledger",
    long_about = "Expense Tracker records dated income and expense entries in a \
                  plain-text ledger file and summarises them month by month, \
                  either through an interactive menu or one-shot commands."
)]
struct Cli {
    /// Ledger file to use (defaults to the configured ledger file)
    #[arg(short, long, global = true, env = "EXPENSE_TRACKER_FILE")]
    file: Option<PathBuf>,

    /// Log progress to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive menu (default)
    #[command(alias = "ui")]
    Shell,

    /// Add an income or expense entry to the ledger file
    Add(AddArgs),

    /// Show the income/expense summary for a month
    Summary(SummaryArgs),

    /// List ledger entries
    #[command(alias = "ls")]
    List {
        /// Only show entries from this month (YYYY-MM)
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Show the configured categories
    Categories,

    /// Show current configuration and paths
    Config {
        /// Write the settings file with the current values
        #[arg(long)]
        write: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let paths = TrackerPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    let catalog = settings.category_catalog();
    let explicit_file = cli.file.is_some();
    let ledger_file = settings.ledger_file(&paths, cli.file);
    debug!(ledger = %ledger_file.display(), "resolved ledger file");

    match cli.command {
        None | Some(Commands::Shell) => {
            let mut ledger = Ledger::new();
            if explicit_file && ledger_file.exists() {
                ledger.load_file(&ledger_file)?;
            }

            let stdin = io::stdin();
            let stdout = io::stdout();
            let mut session = Session::new(ledger, catalog, stdin.lock(), stdout.lock())
                .with_currency_symbol(settings.currency_symbol.clone());
            session.run()?;
            info!(entries = session.ledger().len(), "session ended");
        }
        Some(Commands::Add(args)) => {
            handle_add_command(&ledger_file, &catalog, args)?;
        }
        Some(Commands::Summary(args)) => {
            handle_summary_command(&ledger_file, &settings.currency_symbol, args)?;
        }
        Some(Commands::List { month }) => {
            handle_list_command(&ledger_file, month, &settings.currency_symbol)?;
        }
        Some(Commands::Categories) => {
            handle_categories_command(&catalog);
        }
        Some(Commands::Config { write }) => {
            if write {
                paths.ensure_directories()?;
                settings.save(&paths)?;
                println!("Settings written to: {}", paths.settings_file().display());
                println!();
            }
            println!("Expense Tracker Configuration");
            println!("=============================");
            println!("Base directory: {}", paths.base_dir().display());
            println!("Settings file:  {}", paths.settings_file().display());
            println!("Ledger file:    {}", ledger_file.display());
            println!();
            println!("Settings:");
            println!("  Currency symbol:    {:?}", settings.currency_symbol);
            println!(
                "  Income categories:  {}",
                catalog.for_kind(EntryKind::Income).join(", ")
            );
            println!(
                "  Expense categories: {}",
                catalog.for_kind(EntryKind::Expense).join(", ")
            );
        }
    }

    Ok(())
}
