//! Filesystem host: a vault is a directory tree of Markdown notes.

use std::io;
use std::path::{Path, PathBuf};

use ignore::WalkBuilder;
use serde_json::Value;

use super::{DataStore, StoreError, Vault, VaultError, VaultFile};

/// Directory under the vault root holding plugin data.
pub const PLUGIN_DATA_DIR: &str = ".vaultfmt";
pub const PLUGIN_DATA_FILE: &str = "data.json";

#[derive(Debug, Clone)]
pub struct FsVault {
    root: PathBuf,
    respect_gitignore: bool,
}

impl FsVault {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            respect_gitignore: false,
        }
    }

    /// Skip files matched by `.gitignore`/`.ignore` files while listing.
    pub fn respect_gitignore(mut self, respect: bool) -> Self {
        self.respect_gitignore = respect;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, file: &VaultFile) -> PathBuf {
        file.path().split('/').fold(self.root.clone(), |path, part| path.join(part))
    }

    fn walk(&self) -> Result<Vec<VaultFile>, VaultError> {
        let mut builder = WalkBuilder::new(&self.root);
        builder
            .hidden(true)
            .git_ignore(self.respect_gitignore)
            .git_global(self.respect_gitignore)
            .git_exclude(self.respect_gitignore)
            .ignore(self.respect_gitignore)
            .parents(self.respect_gitignore)
            .require_git(false);

        let mut files = Vec::new();
        for entry in builder.build() {
            let entry = entry.map_err(|source| VaultError::Walk {
                root: self.root.display().to_string(),
                source,
            })?;
            if !entry.file_type().is_some_and(|t| t.is_file()) {
                continue;
            }
            let Ok(relative) = entry.path().strip_prefix(&self.root) else {
                continue;
            };
            let file = VaultFile::from_relative_path(relative);
            if file.is_markdown() {
                files.push(file);
            }
        }

        files.sort();
        log::debug!("[vaultfmt] Found {} Markdown file(s) under {}", files.len(), self.root.display());
        Ok(files)
    }
}

impl Vault for FsVault {
    async fn markdown_files(&self) -> Result<Vec<VaultFile>, VaultError> {
        self.walk()
    }

    async fn read(&self, file: &VaultFile) -> Result<String, VaultError> {
        let bytes = tokio::fs::read(self.resolve(file)).await.map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => VaultError::NotFound {
                path: file.path().to_string(),
            },
            _ => VaultError::Io {
                path: file.path().to_string(),
                source,
            },
        })?;
        String::from_utf8(bytes).map_err(|_| VaultError::InvalidUtf8 {
            path: file.path().to_string(),
        })
    }

    async fn modify(&self, file: &VaultFile, content: &str) -> Result<(), VaultError> {
        tokio::fs::write(self.resolve(file), content)
            .await
            .map_err(|source| VaultError::Io {
                path: file.path().to_string(),
                source,
            })
    }
}

/// Plugin data persisted as pretty-printed JSON.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<root>/.vaultfmt/data.json`
    pub fn for_vault(root: &Path) -> Self {
        Self::new(root.join(PLUGIN_DATA_DIR).join(PLUGIN_DATA_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.display().to_string(),
            source,
        }
    }
}

impl DataStore for JsonFileStore {
    async fn load_data(&self) -> Result<Option<Value>, StoreError> {
        let text = match tokio::fs::read_to_string(&self.path).await {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(self.io_error(e)),
        };
        serde_json::from_str(&text).map(Some).map_err(|source| StoreError::Json {
            path: self.path.display().to_string(),
            source,
        })
    }

    async fn save_data(&self, data: &Value) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| self.io_error(e))?;
        }
        let mut text = serde_json::to_string_pretty(data).map_err(|source| StoreError::Json {
            path: self.path.display().to_string(),
            source,
        })?;
        text.push('\n');
        tokio::fs::write(&self.path, text).await.map_err(|e| self.io_error(e))?;
        log::debug!("[vaultfmt] Saved plugin data to {}", self.path.display());
        Ok(())
    }
}
