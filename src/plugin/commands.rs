//! What the plugin registers with its host: one command and one ribbon action.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modifier {
    /// Cmd on macOS, Ctrl elsewhere.
    Mod,
    Alt,
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Modifier::Mod => "Mod",
            Modifier::Alt => "Alt",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hotkey {
    pub modifiers: &'static [Modifier],
    pub key: char,
}

impl fmt::Display for Hotkey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for modifier in self.modifiers {
            write!(f, "{modifier}+")?;
        }
        write!(f, "{}", self.key.to_ascii_uppercase())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandSpec {
    pub id: &'static str,
    pub name: &'static str,
    pub hotkeys: &'static [Hotkey],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RibbonAction {
    pub icon: &'static str,
    pub title: &'static str,
}

/// Formats the active note.
pub const RUN_COMMAND: CommandSpec = CommandSpec {
    id: "vaultfmt-run",
    name: "Run",
    hotkeys: &[Hotkey {
        modifiers: &[Modifier::Mod, Modifier::Alt],
        key: 'l',
    }],
};

/// Formats every note in the vault.
pub const RUN_ALL_ACTION: RibbonAction = RibbonAction {
    icon: "dice",
    title: "Run vaultfmt on all notes",
};

pub const COMMANDS: &[CommandSpec] = &[RUN_COMMAND];

pub const RIBBON_ACTIONS: &[RibbonAction] = &[RUN_ALL_ACTION];
