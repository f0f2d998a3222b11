//! Format the Markdown notes of a vault through a small plugin surface.
//!
//! The crate models a note-taking host as a handful of collaborator traits
//! ([`host`]) and implements the plugin on top of them ([`plugin`]): a
//! single-document "Run" command, a ribbon action that formats every note,
//! and a settings record holding pass-through options for the Markdown
//! engine ([`formatter`]).

pub mod exit_codes;
pub mod formatter;
pub mod host;
pub mod plugin;
pub mod settings;
pub mod utils;

pub use formatter::{FormatError, FormatOptions, format, merge_options};
pub use plugin::{BatchReport, FormatterPlugin, PluginError, RunOutcome};
pub use settings::{Settings, SettingsCommit};
