//! Collaborators the plugin consumes from its host application.
//!
//! The host owns the editor, the document store, transient notifications and
//! plugin data persistence. The plugin only sees them through these traits.
//! [`fs`] implements the document store and persistence on a directory tree,
//! [`memory`] implements everything in memory.

pub mod fs;
pub mod memory;

use std::io;
use std::path::Path;

use serde_json::Value;
use thiserror::Error;

/// Extensions the host treats as Markdown notes.
pub const MARKDOWN_EXTENSIONS: &[&str] = &["md", "markdown"];

pub fn is_markdown_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| MARKDOWN_EXTENSIONS.iter().any(|m| ext.eq_ignore_ascii_case(m)))
}

/// Zero-based cursor coordinates; `ch` counts characters, not bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Position {
    pub line: usize,
    pub ch: usize,
}

impl Position {
    pub fn new(line: usize, ch: usize) -> Self {
        Self { line, ch }
    }
}

/// An editable text document shown by the host.
pub trait Editor {
    fn get_cursor(&self) -> Position;

    /// Move the cursor. Coordinates past the end of a line or of the
    /// document are clamped to the nearest valid position.
    fn set_cursor(&mut self, position: Position);

    fn select_all(&mut self);

    fn get_selection(&self) -> String;

    /// Replace the selection and collapse the cursor to the start of the
    /// inserted text.
    fn replace_selection(&mut self, text: &str);

    fn get_value(&self) -> String;
}

/// The host's workspace of open views.
pub trait Workspace {
    /// The active view if it is an editable Markdown document.
    fn active_editable_document(&mut self) -> Option<&mut dyn Editor>;
}

/// A transient, user-visible message.
pub trait Notifier {
    fn notify(&self, message: &str);
}

/// A document known to the vault, identified by its vault-relative path.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VaultFile {
    path: String,
}

impl VaultFile {
    /// `path` uses `/` separators and is relative to the vault root.
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    pub fn from_relative_path(path: &Path) -> Self {
        let joined = path
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        Self::new(joined)
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn is_markdown(&self) -> bool {
        is_markdown_path(Path::new(&self.path))
    }
}

#[derive(Debug, Error)]
pub enum VaultError {
    #[error("Failed to access {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("{path} is not valid UTF-8 text")]
    InvalidUtf8 { path: String },

    #[error("No such document: {path}")]
    NotFound { path: String },

    #[error("Failed to list documents under {root}: {source}")]
    Walk {
        root: String,
        #[source]
        source: ignore::Error,
    },
}

/// The host's document store.
///
/// Every call is an await point; callers drive one call at a time.
#[allow(async_fn_in_trait)]
pub trait Vault {
    /// Every Markdown document, in the host's enumeration order.
    async fn markdown_files(&self) -> Result<Vec<VaultFile>, VaultError>;

    async fn read(&self, file: &VaultFile) -> Result<String, VaultError>;

    /// Replace the whole content of `file`.
    async fn modify(&self, file: &VaultFile, content: &str) -> Result<(), VaultError>;
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to access plugin data at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("Plugin data at {path} is not valid JSON: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Generic key-value persistence for plugin data.
#[allow(async_fn_in_trait)]
pub trait DataStore {
    /// The stored record, or `None` if nothing has been saved yet.
    async fn load_data(&self) -> Result<Option<Value>, StoreError>;

    async fn save_data(&self, data: &Value) -> Result<(), StoreError>;
}
