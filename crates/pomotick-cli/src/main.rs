use std::io;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use commands::config::ConfigAction;
use pomotick_core::Config;

mod commands;
mod logging;
mod notifier;
mod prompt;
mod tui;

#[derive(Parser)]
#[command(name = "pomotick", version, about = "Pomodoro timer for the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive timer (default)
    Run,
    /// Completed pomodoros and study minutes
    Stats {
        #[command(subcommand)]
        action: commands::stats::StatsAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Print shell completions
    Completions {
        shell: Shell,
    },
}

fn main() {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Run);

    if let Commands::Completions { shell } = command {
        clap_complete::generate(shell, &mut Cli::command(), "pomotick", &mut io::stdout());
        return;
    }

    let result: Result<(), Box<dyn std::error::Error>> = match Config::load() {
        Ok(config) => {
            logging::init(&config.log);
            tracing::debug!(version = env!("CARGO_PKG_VERSION"), "pomotick starting");
            match command {
                Commands::Run => commands::run::run(config),
                Commands::Stats { action } => commands::stats::run(action),
                Commands::Config { action } => commands::config::run(action),
                Commands::Completions { .. } => Ok(()),
            }
        }
        // A broken config file can still be reset.
        Err(_) if matches!(command, Commands::Config { action: ConfigAction::Reset }) => {
            commands::config::run(ConfigAction::Reset)
        }
        Err(e) => Err(e.into()),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
