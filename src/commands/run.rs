//! Handler for the `run` command: the single-note formatter.

use std::path::Path;

use anyhow::Context;
use vaultfmt_lib::RunOutcome;
use vaultfmt_lib::exit_codes;
use vaultfmt_lib::host::memory::{BufferEditor, SingleView};
use vaultfmt_lib::host::{Editor, Position, is_markdown_path};

use super::{ConsoleNotifier, load_plugin};

pub async fn handle_run(vault: &Path, file: &Path, cursor: Position, quiet: bool) -> anyhow::Result<i32> {
    let plugin = load_plugin(vault).await?;
    let original = tokio::fs::read_to_string(file)
        .await
        .with_context(|| format!("failed to read {}", file.display()))?;

    let mut workspace = if is_markdown_path(file) {
        SingleView::markdown(BufferEditor::new(original.clone()).with_cursor(cursor))
    } else {
        SingleView::empty()
    };

    let notifier = ConsoleNotifier::new(quiet);
    let code = match plugin.run_format(&mut workspace, &notifier) {
        RunOutcome::NoActiveView => {
            log::debug!("{} is not a Markdown note; nothing to do", file.display());
            exit_codes::SUCCESS
        }
        RunOutcome::Formatted => {
            if let Some(editor) = workspace.editor() {
                if editor.text() != original {
                    tokio::fs::write(file, editor.text())
                        .await
                        .with_context(|| format!("failed to write {}", file.display()))?;
                }
                let restored = editor.get_cursor();
                log::debug!("Cursor restored to {}:{}", restored.line, restored.ch);
            }
            exit_codes::SUCCESS
        }
        RunOutcome::Failed(_) => exit_codes::FORMAT_FAILED,
    };

    plugin.unload();
    Ok(code)
}
