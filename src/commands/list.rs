//! Handler for the `commands` command.

use colored::*;
use vaultfmt_lib::plugin::{COMMANDS, PLUGIN_ID, RIBBON_ACTIONS};

pub fn handle_commands() {
    println!("{}", "Commands:".bold());
    for command in COMMANDS {
        let hotkeys: Vec<String> = command.hotkeys.iter().map(ToString::to_string).collect();
        println!(
            "  {:<16} {:<8} {}",
            command.id.cyan(),
            command.name,
            hotkeys.join(", ").dimmed()
        );
    }

    println!("{}", "Ribbon actions:".bold());
    for action in RIBBON_ACTIONS {
        println!("  {:<16} {}", action.icon.cyan(), action.title);
    }

    println!();
    println!("Registered by plugin '{PLUGIN_ID}'");
}
