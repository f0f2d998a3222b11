//! In-memory host: a text buffer editor, a single-view workspace, a vault,
//! a data store and a notifier that records what it was asked to show.

use std::cell::{Cell, RefCell};

use serde_json::Value;

use super::{DataStore, Editor, Notifier, Position, StoreError, Vault, VaultError, VaultFile, Workspace};

/// A plain text buffer with a cursor and a selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BufferEditor {
    text: String,
    cursor: Position,
    /// Selected byte range.
    selection: Option<(usize, usize)>,
}

impl BufferEditor {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            cursor: Position::default(),
            selection: None,
        }
    }

    pub fn with_cursor(mut self, position: Position) -> Self {
        self.set_cursor(position);
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn into_text(self) -> String {
        self.text
    }

    /// Lines without their terminators. A trailing newline yields a final
    /// empty line, as in an editor.
    fn lines(&self) -> Vec<&str> {
        self.text
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line))
            .collect()
    }

    fn clamp(&self, position: Position) -> Position {
        let lines = self.lines();
        let line = position.line.min(lines.len() - 1);
        let ch = position.ch.min(lines[line].chars().count());
        Position { line, ch }
    }

    fn offset_of(&self, position: Position) -> usize {
        let position = self.clamp(position);
        let mut offset = 0;
        for (index, raw) in self.text.split('\n').enumerate() {
            if index == position.line {
                return offset
                    + raw
                        .char_indices()
                        .nth(position.ch)
                        .map_or(raw.strip_suffix('\r').unwrap_or(raw).len(), |(byte, _)| byte);
            }
            offset += raw.len() + 1;
        }
        self.text.len()
    }

    fn position_of(&self, offset: usize) -> Position {
        let before = &self.text[..offset];
        let line = before.matches('\n').count();
        let line_start = before.rfind('\n').map_or(0, |i| i + 1);
        Position {
            line,
            ch: before[line_start..].chars().count(),
        }
    }
}

impl Editor for BufferEditor {
    fn get_cursor(&self) -> Position {
        self.cursor
    }

    fn set_cursor(&mut self, position: Position) {
        self.cursor = self.clamp(position);
        self.selection = None;
    }

    fn select_all(&mut self) {
        self.selection = Some((0, self.text.len()));
        self.cursor = self.position_of(self.text.len());
    }

    fn get_selection(&self) -> String {
        self.selection
            .map(|(start, end)| self.text[start..end].to_string())
            .unwrap_or_default()
    }

    fn replace_selection(&mut self, text: &str) {
        let (start, end) = self.selection.take().unwrap_or_else(|| {
            let offset = self.offset_of(self.cursor);
            (offset, offset)
        });
        self.text.replace_range(start..end, text);
        self.cursor = self.position_of(start);
    }

    fn get_value(&self) -> String {
        self.text.clone()
    }
}

/// A workspace with at most one view.
#[derive(Debug, Clone, Default)]
pub struct SingleView {
    editor: Option<BufferEditor>,
}

impl SingleView {
    /// A workspace whose active view is an editable Markdown document.
    pub fn markdown(editor: BufferEditor) -> Self {
        Self { editor: Some(editor) }
    }

    /// A workspace with no active Markdown view.
    pub fn empty() -> Self {
        Self { editor: None }
    }

    pub fn editor(&self) -> Option<&BufferEditor> {
        self.editor.as_ref()
    }
}

impl Workspace for SingleView {
    fn active_editable_document(&mut self) -> Option<&mut dyn Editor> {
        self.editor.as_mut().map(|editor| editor as &mut dyn Editor)
    }
}

/// Documents kept in insertion order, which is also the enumeration order.
#[derive(Debug, Default)]
pub struct MemoryVault {
    documents: RefCell<Vec<(VaultFile, String)>>,
    reads: RefCell<Vec<String>>,
    writes: RefCell<Vec<String>>,
}

impl MemoryVault {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(self, path: &str, content: impl Into<String>) -> Self {
        self.documents.borrow_mut().push((VaultFile::new(path), content.into()));
        self
    }

    pub fn content(&self, path: &str) -> Option<String> {
        self.documents
            .borrow()
            .iter()
            .find(|(file, _)| file.path() == path)
            .map(|(_, content)| content.clone())
    }

    /// Paths passed to `read`, in call order.
    pub fn reads(&self) -> Vec<String> {
        self.reads.borrow().clone()
    }

    /// Paths passed to `modify`, in call order.
    pub fn writes(&self) -> Vec<String> {
        self.writes.borrow().clone()
    }
}

impl Vault for MemoryVault {
    async fn markdown_files(&self) -> Result<Vec<VaultFile>, VaultError> {
        Ok(self
            .documents
            .borrow()
            .iter()
            .map(|(file, _)| file.clone())
            .filter(VaultFile::is_markdown)
            .collect())
    }

    async fn read(&self, file: &VaultFile) -> Result<String, VaultError> {
        self.reads.borrow_mut().push(file.path().to_string());
        self.content(file.path()).ok_or_else(|| VaultError::NotFound {
            path: file.path().to_string(),
        })
    }

    async fn modify(&self, file: &VaultFile, content: &str) -> Result<(), VaultError> {
        self.writes.borrow_mut().push(file.path().to_string());
        let mut documents = self.documents.borrow_mut();
        let Some((_, existing)) = documents.iter_mut().find(|(f, _)| *f == *file) else {
            return Err(VaultError::NotFound {
                path: file.path().to_string(),
            });
        };
        *existing = content.to_string();
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    data: RefCell<Option<Value>>,
    saves: Cell<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_data(data: Value) -> Self {
        Self {
            data: RefCell::new(Some(data)),
            saves: Cell::new(0),
        }
    }

    pub fn data(&self) -> Option<Value> {
        self.data.borrow().clone()
    }

    pub fn save_count(&self) -> usize {
        self.saves.get()
    }
}

impl DataStore for MemoryStore {
    async fn load_data(&self) -> Result<Option<Value>, StoreError> {
        Ok(self.data())
    }

    async fn save_data(&self, data: &Value) -> Result<(), StoreError> {
        *self.data.borrow_mut() = Some(data.clone());
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct RecordingNotifier {
    messages: RefCell<Vec<String>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.borrow().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str) {
        self.messages.borrow_mut().push(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_cursor_clamps_to_document() {
        let mut editor = BufferEditor::new("ab\ncdef");
        editor.set_cursor(Position::new(0, 10));
        assert_eq!(editor.get_cursor(), Position::new(0, 2));
        editor.set_cursor(Position::new(7, 3));
        assert_eq!(editor.get_cursor(), Position::new(1, 3));
        editor.set_cursor(Position::new(9, 9));
        assert_eq!(editor.get_cursor(), Position::new(1, 4));
    }

    #[test]
    fn test_cursor_counts_characters() {
        let mut editor = BufferEditor::new("héllo\r\nwörld");
        editor.set_cursor(Position::new(0, 99));
        assert_eq!(editor.get_cursor(), Position::new(0, 5));
        editor.set_cursor(Position::new(1, 2));
        editor.replace_selection("X");
        assert_eq!(editor.text(), "héllo\r\nwöXrld");
    }

    #[test]
    fn test_select_all_and_replace() {
        let mut editor = BufferEditor::new("one\ntwo").with_cursor(Position::new(1, 1));
        editor.select_all();
        assert_eq!(editor.get_selection(), "one\ntwo");
        assert_eq!(editor.get_cursor(), Position::new(1, 3));

        editor.replace_selection("three\n");
        assert_eq!(editor.get_value(), "three\n");
        assert_eq!(editor.get_cursor(), Position::new(0, 0));
        assert_eq!(editor.get_selection(), "");
    }

    #[test]
    fn test_trailing_newline_has_empty_last_line() {
        let mut editor = BufferEditor::new("a\n");
        editor.set_cursor(Position::new(1, 5));
        assert_eq!(editor.get_cursor(), Position::new(1, 0));
    }

    #[test]
    fn test_empty_view_has_no_editor() {
        let mut view = SingleView::empty();
        assert!(view.active_editable_document().is_none());
        let mut view = SingleView::markdown(BufferEditor::new("x"));
        assert!(view.active_editable_document().is_some());
    }
}
