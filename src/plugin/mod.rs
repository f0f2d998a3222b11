//! The formatter plugin: lifecycle, the "Run" command, the ribbon action and
//! the settings commit path.

pub mod commands;

use thiserror::Error;

use crate::formatter::{self, FormatError};
use crate::host::{DataStore, Notifier, StoreError, Vault, VaultError, Workspace};
use crate::settings::{self, Settings, SettingsCommit, SettingsPanel};

pub use commands::{COMMANDS, CommandSpec, RIBBON_ACTIONS, RibbonAction};

pub const PLUGIN_ID: &str = "vaultfmt";
pub const PLUGIN_NAME: &str = "vaultfmt";

/// Notification shown after the active note was formatted.
pub const FORMATTED_NOTICE: &str = "vaultfmt: formatted";

/// Why a single document in a batch could not be processed.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error(transparent)]
    Vault(#[from] VaultError),

    #[error(transparent)]
    Format(#[from] FormatError),
}

#[derive(Debug, Error)]
pub enum PluginError {
    #[error("Failed to list vault documents: {0}")]
    Enumerate(#[source] VaultError),

    #[error("Stopped at {path} after formatting {processed} note(s): {source}")]
    Batch {
        path: String,
        processed: usize,
        #[source]
        source: DocumentError,
    },

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Outcome of the single-document command.
#[derive(Debug)]
pub enum RunOutcome {
    /// No editable Markdown view was active; nothing happened.
    NoActiveView,
    Formatted,
    /// The document was left untouched.
    Failed(FormatError),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchReport {
    /// Documents read, formatted and written back.
    pub processed: usize,
    /// Documents whose content changed.
    pub changed: usize,
}

/// The loaded plugin. Owns its settings and the host store they live in.
pub struct FormatterPlugin<S> {
    store: S,
    settings: Settings,
}

impl<S: DataStore> FormatterPlugin<S> {
    /// Load settings from `store` and activate the plugin.
    pub async fn load(store: S) -> Result<Self, PluginError> {
        log::info!("Loading {PLUGIN_NAME}");
        let settings = Settings::load(&store).await?;
        log::debug!("[vaultfmt] Formatter options: {}", settings.options);
        Ok(Self { store, settings })
    }

    /// Deactivate the plugin and hand the store back to the host.
    pub fn unload(self) -> S {
        log::info!("Unloading {PLUGIN_NAME}");
        self.store
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn commands(&self) -> &'static [CommandSpec] {
        COMMANDS
    }

    pub fn ribbon_actions(&self) -> &'static [RibbonAction] {
        RIBBON_ACTIONS
    }

    pub fn settings_panel(&self) -> SettingsPanel {
        SettingsPanel::display(&self.settings)
    }

    /// Format `text` with the current settings.
    pub fn format_text(&self, text: &str) -> Result<String, FormatError> {
        formatter::format(text, &self.settings.options)
    }

    /// The "Run" command: reformat the active note in place.
    pub fn run_format<W, N>(&self, workspace: &mut W, notifier: &N) -> RunOutcome
    where
        W: Workspace + ?Sized,
        N: Notifier + ?Sized,
    {
        let Some(editor) = workspace.active_editable_document() else {
            log::debug!("[vaultfmt] No active Markdown view");
            return RunOutcome::NoActiveView;
        };

        let cursor = editor.get_cursor();
        editor.select_all();
        let text = editor.get_selection();

        match self.format_text(&text) {
            Ok(formatted) => {
                notifier.notify(FORMATTED_NOTICE);
                editor.replace_selection(&formatted);
                editor.set_cursor(cursor);
                RunOutcome::Formatted
            }
            Err(e) => {
                log::error!("[vaultfmt] {e}");
                notifier.notify(&e.to_string());
                // Drop the select-all so the view is as the user left it
                editor.set_cursor(cursor);
                RunOutcome::Failed(e)
            }
        }
    }

    /// The ribbon action: reformat every Markdown note, one at a time.
    ///
    /// Stops at the first note that cannot be read, formatted or written;
    /// notes after it are not touched.
    pub async fn run_format_all<V: Vault>(&self, vault: &V) -> Result<BatchReport, PluginError> {
        let files = vault.markdown_files().await.map_err(PluginError::Enumerate)?;
        let mut report = BatchReport::default();

        for file in files {
            log::debug!("[vaultfmt] Formatting {}", file.path());
            let abort = |source: DocumentError| PluginError::Batch {
                path: file.path().to_string(),
                processed: report.processed,
                source,
            };

            let content = vault.read(&file).await.map_err(|e| abort(e.into()))?;
            let formatted = self.format_text(&content).map_err(|e| abort(e.into()))?;
            vault.modify(&file, &formatted).await.map_err(|e| abort(e.into()))?;

            report.processed += 1;
            if formatted != content {
                report.changed += 1;
                log::info!("Formatted {}", file.path());
            }
        }

        log::info!("Formatted {} of {} note(s)", report.changed, report.processed);
        Ok(report)
    }

    /// Settings panel edit: keep `value` in memory, persist it only if it is
    /// a JSON object.
    pub async fn update_options(&mut self, value: &str) -> Result<SettingsCommit, PluginError> {
        self.settings.options = value.to_string();
        match settings::validate_options(value) {
            Ok(()) => {
                self.save_settings().await?;
                Ok(SettingsCommit::Saved)
            }
            Err(reason) => {
                log::debug!("[vaultfmt] Not saving formatter options: {reason}");
                Ok(SettingsCommit::Rejected { reason })
            }
        }
    }

    pub async fn save_settings(&self) -> Result<(), PluginError> {
        self.settings.save(&self.store).await?;
        Ok(())
    }
}
