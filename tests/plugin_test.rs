use pretty_assertions::assert_eq;
use serde_json::json;
use vaultfmt_lib::host::memory::{BufferEditor, MemoryStore, MemoryVault, RecordingNotifier, SingleView};
use vaultfmt_lib::host::{Editor, Position};
use vaultfmt_lib::plugin::{DocumentError, FORMATTED_NOTICE};
use vaultfmt_lib::{BatchReport, FormatError, FormatterPlugin, PluginError, RunOutcome, SettingsCommit};

async fn plugin_with_options(options: &str) -> FormatterPlugin<MemoryStore> {
    FormatterPlugin::load(MemoryStore::with_data(json!({ "options": options })))
        .await
        .expect("plugin to load")
}

#[tokio::test]
async fn test_load_defaults_when_store_is_empty() {
    let plugin = FormatterPlugin::load(MemoryStore::new()).await.unwrap();
    assert_eq!(plugin.settings().options, "{}");
    assert_eq!(plugin.commands().len(), 1);
    assert_eq!(plugin.ribbon_actions().len(), 1);
    let store = plugin.unload();
    assert_eq!(store.save_count(), 0);
}

#[tokio::test]
async fn test_run_without_active_view_is_a_no_op() {
    let plugin = plugin_with_options("{}").await;
    let mut workspace = SingleView::empty();
    let notifier = RecordingNotifier::new();

    let outcome = plugin.run_format(&mut workspace, &notifier);

    assert!(matches!(outcome, RunOutcome::NoActiveView));
    assert!(notifier.messages().is_empty());
    assert!(workspace.editor().is_none());
}

#[tokio::test]
async fn test_run_formats_active_view_and_restores_cursor() {
    let plugin = plugin_with_options("{}").await;
    let editor = BufferEditor::new("a  \n\n\nb").with_cursor(Position::new(0, 3));
    let mut workspace = SingleView::markdown(editor);
    let notifier = RecordingNotifier::new();

    let outcome = plugin.run_format(&mut workspace, &notifier);

    assert!(matches!(outcome, RunOutcome::Formatted));
    let editor = workspace.editor().unwrap();
    assert_eq!(editor.text(), "a\n\nb\n");
    // Column 3 no longer exists on line 0, so the editor clamps it
    assert_eq!(editor.get_cursor(), Position::new(0, 1));
    assert_eq!(notifier.messages(), vec![FORMATTED_NOTICE.to_string()]);
}

#[tokio::test]
async fn test_run_keeps_cursor_when_still_valid() {
    let plugin = plugin_with_options("{}").await;
    let editor = BufferEditor::new("# Title\ntext here").with_cursor(Position::new(0, 4));
    let mut workspace = SingleView::markdown(editor);
    let notifier = RecordingNotifier::new();

    plugin.run_format(&mut workspace, &notifier);

    let editor = workspace.editor().unwrap();
    assert_eq!(editor.text(), "# Title\n\ntext here\n");
    assert_eq!(editor.get_cursor(), Position::new(0, 4));
}

#[tokio::test]
async fn test_run_failure_leaves_document_untouched() {
    let plugin = plugin_with_options("{}").await;
    let original = "fine\nbroken \0 line\n";
    let mut workspace = SingleView::markdown(BufferEditor::new(original));
    let notifier = RecordingNotifier::new();

    let outcome = plugin.run_format(&mut workspace, &notifier);

    assert!(matches!(outcome, RunOutcome::Failed(FormatError::Unparseable { line: 2, column: 8 })));
    assert_eq!(workspace.editor().unwrap().text(), original);
    let messages = notifier.messages();
    assert_eq!(messages.len(), 1);
    assert!(messages[0].contains("NUL character"), "{messages:?}");
}

#[tokio::test]
async fn test_invalid_options_surface_on_run() {
    let mut plugin = plugin_with_options("{}").await;
    let commit = plugin.update_options("{bad").await.unwrap();
    assert!(matches!(commit, SettingsCommit::Rejected { .. }));

    let mut workspace = SingleView::markdown(BufferEditor::new("#  Title"));
    let notifier = RecordingNotifier::new();
    let outcome = plugin.run_format(&mut workspace, &notifier);

    assert!(matches!(outcome, RunOutcome::Failed(FormatError::InvalidJson(_))));
    assert_eq!(workspace.editor().unwrap().text(), "#  Title");
    assert!(notifier.messages()[0].starts_with("Invalid formatter options"));
}

#[tokio::test]
async fn test_rejected_options_are_not_persisted() {
    let mut plugin = plugin_with_options(r#"{"proseWrap": "never"}"#).await;

    let commit = plugin.update_options("{bad").await.unwrap();

    assert!(matches!(commit, SettingsCommit::Rejected { .. }));
    // The field keeps showing what was typed
    assert_eq!(plugin.settings().options, "{bad");
    assert_eq!(plugin.settings_panel().value, "{bad");
    let store = plugin.unload();
    assert_eq!(store.save_count(), 0);
    assert_eq!(store.data(), Some(json!({ "options": r#"{"proseWrap": "never"}"# })));
}

#[tokio::test]
async fn test_valid_options_are_persisted_immediately() {
    let mut plugin = plugin_with_options("{}").await;

    let commit = plugin.update_options(r#"{"printWidth": 100}"#).await.unwrap();

    assert_eq!(commit, SettingsCommit::Saved);
    assert_eq!(plugin.store().save_count(), 1);
    assert_eq!(
        plugin.store().data(),
        Some(json!({ "options": r#"{"printWidth": 100}"# }))
    );
}

#[tokio::test]
async fn test_options_apply_to_run() {
    let plugin = plugin_with_options(r#"{"proseWrap": "never"}"#).await;
    let mut workspace = SingleView::markdown(BufferEditor::new("one\ntwo\n"));

    plugin.run_format(&mut workspace, &RecordingNotifier::new());

    assert_eq!(workspace.editor().unwrap().text(), "one two\n");
}

#[tokio::test]
async fn test_batch_formats_every_note_in_order() {
    let plugin = plugin_with_options("{}").await;
    let vault = MemoryVault::new()
        .with_document("a.md", "# A\ntext")
        .with_document("image.png", "not markdown")
        .with_document("b.md", "# B\n\ntext\n");

    let report = plugin.run_format_all(&vault).await.unwrap();

    assert_eq!(report, BatchReport { processed: 2, changed: 1 });
    assert_eq!(vault.reads(), vec!["a.md", "b.md"]);
    // Unchanged notes are still written back
    assert_eq!(vault.writes(), vec!["a.md", "b.md"]);
    assert_eq!(vault.content("a.md").unwrap(), "# A\n\ntext\n");
    assert_eq!(vault.content("image.png").unwrap(), "not markdown");
}

#[tokio::test]
async fn test_batch_keeps_links_tags_and_embeds() {
    let plugin = plugin_with_options("{}").await;
    let daily = "# Daily\n\nSee [[Project Plan]] #todo\n\n- [ ] call about ![[scan_01.png]]\n";
    let vault = MemoryVault::new()
        .with_document("daily.md", daily)
        .with_document("plan.md", "#  Plan\nLinked from [[Daily|today]]!");

    let report = plugin.run_format_all(&vault).await.unwrap();

    assert_eq!(report, BatchReport { processed: 2, changed: 1 });
    assert_eq!(vault.content("daily.md").unwrap(), daily);
    assert_eq!(
        vault.content("plan.md").unwrap(),
        "# Plan\n\nLinked from [[Daily|today]]!\n"
    );
}

#[tokio::test]
async fn test_batch_stops_at_first_failure() {
    let plugin = plugin_with_options("{}").await;
    let vault = MemoryVault::new()
        .with_document("one.md", "#  First\ntext")
        .with_document("two.md", "bad \0 bytes")
        .with_document("three.md", "#  Third\ntext");

    let err = plugin.run_format_all(&vault).await.unwrap_err();

    match &err {
        PluginError::Batch { path, processed, source } => {
            assert_eq!(path, "two.md");
            assert_eq!(*processed, 1);
            assert!(matches!(source, DocumentError::Format(FormatError::Unparseable { .. })));
        }
        other => panic!("expected a batch error, got {other:?}"),
    }
    assert!(err.to_string().starts_with("Stopped at two.md after formatting 1 note(s)"));

    assert_eq!(vault.content("one.md").unwrap(), "# First\n\ntext\n");
    assert_eq!(vault.content("two.md").unwrap(), "bad \0 bytes");
    assert_eq!(vault.content("three.md").unwrap(), "#  Third\ntext");
    assert_eq!(vault.reads(), vec!["one.md", "two.md"]);
    assert_eq!(vault.writes(), vec!["one.md"]);
}

#[tokio::test]
async fn test_batch_with_invalid_options_touches_nothing() {
    let mut plugin = plugin_with_options("{}").await;
    plugin.update_options("[]").await.unwrap();
    let vault = MemoryVault::new().with_document("a.md", "#  A");

    let err = plugin.run_format_all(&vault).await.unwrap_err();

    assert!(matches!(
        err,
        PluginError::Batch {
            processed: 0,
            source: DocumentError::Format(FormatError::NotAnObject { .. }),
            ..
        }
    ));
    assert!(vault.writes().is_empty());
}

#[tokio::test]
async fn test_empty_vault_reports_nothing() {
    let plugin = plugin_with_options("{}").await;
    let report = plugin.run_format_all(&MemoryVault::new()).await.unwrap();
    assert_eq!(report, BatchReport::default());
}
