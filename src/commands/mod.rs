//! Command handlers for the vaultfmt CLI.
//!
//! Each subcommand has its own module with a public handler function
//! that `main()` dispatches to. Handlers return the process exit code.

pub mod all;
pub mod completions;
pub mod list;
pub mod run;
pub mod settings;

use std::path::Path;

use anyhow::Context;
use colored::*;
use vaultfmt_lib::FormatterPlugin;
use vaultfmt_lib::host::Notifier;
use vaultfmt_lib::host::fs::JsonFileStore;

/// Shows plugin notifications on stderr.
pub struct ConsoleNotifier {
    quiet: bool,
}

impl ConsoleNotifier {
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }
}

impl Notifier for ConsoleNotifier {
    fn notify(&self, message: &str) {
        if !self.quiet {
            eprintln!("{} {message}", "Notice:".cyan().bold());
        }
    }
}

/// Load the plugin against the vault's data file.
pub async fn load_plugin(vault: &Path) -> anyhow::Result<FormatterPlugin<JsonFileStore>> {
    let store = JsonFileStore::for_vault(vault);
    let path = store.path().display().to_string();
    FormatterPlugin::load(store)
        .await
        .with_context(|| format!("failed to load plugin data from {path}"))
}
