//! Handler for the `all` command: the ribbon action over the whole vault.

use std::path::Path;
use std::time::Instant;

use colored::*;
use vaultfmt_lib::exit_codes;
use vaultfmt_lib::host::fs::FsVault;

use super::load_plugin;

pub async fn handle_all(vault_root: &Path, respect_gitignore: bool, quiet: bool) -> anyhow::Result<i32> {
    let plugin = load_plugin(vault_root).await?;
    let vault = FsVault::new(vault_root).respect_gitignore(respect_gitignore);

    let start = Instant::now();
    let code = match plugin.run_format_all(&vault).await {
        Ok(report) => {
            if !quiet {
                println!(
                    "{} Formatted {} of {} note(s) in {}ms",
                    "Success:".green().bold(),
                    report.changed,
                    report.processed,
                    start.elapsed().as_millis()
                );
            }
            exit_codes::SUCCESS
        }
        Err(e) => {
            eprintln!("{}: {e}", "Error".red().bold());
            exit_codes::TOOL_ERROR
        }
    };

    plugin.unload();
    Ok(code)
}
