use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use colored::*;

use vaultfmt_lib::exit_codes;
use vaultfmt_lib::host::Position;

mod commands;

#[derive(Parser)]
#[command(name = "vaultfmt", author, version, about, long_about = None)]
pub struct Cli {
    /// Vault root directory (holds the notes and .vaultfmt/data.json)
    #[arg(long, global = true, default_value = ".")]
    vault: PathBuf,

    /// Show detailed output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Only print errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Format one note in place (the "Run" command)
    Run {
        /// Note to open as the active view
        file: PathBuf,

        /// Cursor line to restore after formatting (zero-based)
        #[arg(long, default_value_t = 0)]
        line: usize,

        /// Cursor column to restore after formatting (zero-based, in characters)
        #[arg(long, default_value_t = 0)]
        ch: usize,
    },

    /// Format every note in the vault (the ribbon action)
    All {
        /// Skip files matched by .gitignore and .ignore files
        #[arg(long)]
        respect_gitignore: bool,
    },

    /// Show or edit the formatter options
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },

    /// List the registered command and ribbon action
    Commands,

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for (detected from $SHELL if omitted)
        shell: Option<Shell>,

        /// List available shells
        #[arg(long)]
        list: bool,
    },
}

#[derive(Subcommand)]
enum SettingsAction {
    /// Print the settings panel and the stored options
    Show,

    /// Replace the formatter options (saved only if the text is a JSON object)
    Set {
        /// JSON object with formatter options, e.g. '{"proseWrap": "always"}'
        options: String,
    },
}

fn init_logging(cli: &Cli) {
    let default_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "warn"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    init_logging(&cli);

    if cli.no_color {
        colored::control::set_override(false);
    }

    let result = match &cli.command {
        Commands::Run { file, line, ch } => {
            commands::run::handle_run(&cli.vault, file, Position::new(*line, *ch), cli.quiet).await
        }
        Commands::All { respect_gitignore } => {
            commands::all::handle_all(&cli.vault, *respect_gitignore, cli.quiet).await
        }
        Commands::Settings { action } => match action {
            SettingsAction::Show => commands::settings::handle_show(&cli.vault).await,
            SettingsAction::Set { options } => commands::settings::handle_set(&cli.vault, options, cli.quiet).await,
        },
        Commands::Commands => {
            commands::list::handle_commands();
            Ok(exit_codes::SUCCESS)
        }
        Commands::Completions { shell, list } => {
            commands::completions::handle_completions(*shell, *list);
            Ok(exit_codes::SUCCESS)
        }
    };

    match result {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("{}: {e:#}", "Error".red().bold());
            exit_codes::tool_error();
        }
    }
}
