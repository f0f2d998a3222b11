//! Handlers for `settings show` and `settings set`: the settings panel.

use std::path::Path;

use colored::*;
use vaultfmt_lib::SettingsCommit;
use vaultfmt_lib::exit_codes;

use super::load_plugin;

pub async fn handle_show(vault: &Path) -> anyhow::Result<i32> {
    let plugin = load_plugin(vault).await?;
    let panel = plugin.settings_panel();

    println!("{}", panel.heading.bold());
    println!();
    println!("{}", panel.field_name.bold());
    println!("{}{} <{}>", panel.description, panel.doc_link_text, panel.doc_link_href);
    println!();
    println!("{}", panel.value);

    plugin.unload();
    Ok(exit_codes::SUCCESS)
}

pub async fn handle_set(vault: &Path, options: &str, quiet: bool) -> anyhow::Result<i32> {
    let mut plugin = load_plugin(vault).await?;

    let code = match plugin.update_options(options).await? {
        SettingsCommit::Saved => {
            if !quiet {
                println!("{} Saved formatter options", "Success:".green().bold());
            }
            exit_codes::SUCCESS
        }
        SettingsCommit::Rejected { reason } => {
            eprintln!("{}: options not saved: {reason}", "Error".red().bold());
            exit_codes::TOOL_ERROR
        }
    };

    plugin.unload();
    Ok(code)
}
