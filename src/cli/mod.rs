//! Command-line interface for scripts-run
//!
//! Plays the editor host: lists the script tree, mutates overrides, runs
//! scripts in per-root shells, and offers an interactive browser.

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod browse;
mod edit;
mod list;
mod prompt;
mod run;
mod utils;
mod versions;
mod workspace;

pub use workspace::WorkspaceArgs;

/// Discover and run package.json scripts across workspace folders
#[derive(Parser)]
#[command(name = "scripts-run")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    workspace: WorkspaceArgs,

    /// Enable verbose logging (sets log level to DEBUG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the script tree for every workspace root
    List(list::ListArgs),

    /// Add a user script (prompts for missing values)
    Add(edit::AddArgs),

    /// Delete one script
    Delete(edit::DeleteArgs),

    /// Delete every script under a root and clear its persisted overrides
    DeleteAll(edit::DeleteAllArgs),

    /// Run a script in its root's terminal
    Run(run::RunArgs),

    /// List installed node versions
    Versions(versions::VersionsArgs),

    /// Browse, run, and edit scripts interactively
    Browse,

    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG in the environment always takes precedence; --verbose falls back to DEBUG.
    let filter = if cli.verbose {
        EnvFilter::from_default_env().add_directive(Level::DEBUG.into())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    match cli.command {
        Commands::List(args) => list::run(args, &cli.workspace),
        Commands::Add(args) => edit::add(args, &cli.workspace),
        Commands::Delete(args) => edit::delete(args, &cli.workspace),
        Commands::DeleteAll(args) => edit::delete_all(args, &cli.workspace),
        Commands::Run(args) => run::run(args, &cli.workspace),
        Commands::Versions(args) => versions::run(args, &cli.workspace),
        Commands::Browse => browse::run(&cli.workspace),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "scripts-run", &mut std::io::stdout());
            Ok(())
        }
    }
}
