//! Plugin settings: the persisted record and the settings panel model.

use serde_json::{Map, Value};

use crate::host::{DataStore, StoreError};

/// Options string used when nothing valid is stored.
pub const DEFAULT_OPTIONS: &str = "{}";

/// Where the option keys are documented.
pub const OPTIONS_DOC_URL: &str = "https://docs.rs/comrak/latest/comrak/struct.Options.html";

/// The persisted plugin record.
///
/// `options` is a JSON object literal handed to the formatter. Fields the
/// plugin does not know are kept in `extra` and written back unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub options: String,
    pub extra: Map<String, Value>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            options: DEFAULT_OPTIONS.to_string(),
            extra: Map::new(),
        }
    }
}

/// Result of committing an edit from the settings panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsCommit {
    /// The text was a JSON object and has been persisted.
    Saved,
    /// The text was kept in memory only; the stored value is unchanged.
    Rejected { reason: String },
}

impl Settings {
    /// Merge a stored record over the defaults.
    pub fn from_stored(data: Option<Value>) -> Self {
        let mut settings = Settings::default();

        match data {
            None | Some(Value::Null) => {}
            Some(Value::Object(mut record)) => {
                match record.remove("options") {
                    Some(Value::String(options)) => settings.options = options,
                    Some(other) => log::warn!("[vaultfmt] Ignoring non-string `options` in plugin data: {other}"),
                    None => {}
                }
                settings.extra = record;
            }
            Some(other) => log::warn!("[vaultfmt] Ignoring plugin data that is not a JSON object: {other}"),
        }

        if let Err(reason) = validate_options(&settings.options) {
            log::warn!("[vaultfmt] Stored formatter options are invalid ({reason}); using {DEFAULT_OPTIONS}");
            settings.options = DEFAULT_OPTIONS.to_string();
        }

        settings
    }

    /// Load from the host store. Unreadable JSON falls back to the defaults.
    pub async fn load<S: DataStore>(store: &S) -> Result<Self, StoreError> {
        match store.load_data().await {
            Ok(data) => Ok(Self::from_stored(data)),
            Err(StoreError::Json { path, source }) => {
                log::warn!("[vaultfmt] Plugin data at {path} is not valid JSON ({source}); using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(e),
        }
    }

    pub async fn save<S: DataStore>(&self, store: &S) -> Result<(), StoreError> {
        store.save_data(&self.to_value()).await
    }

    pub fn to_value(&self) -> Value {
        let mut record = self.extra.clone();
        record.insert("options".to_string(), Value::String(self.options.clone()));
        Value::Object(record)
    }
}

/// Check that `text` is a JSON object literal.
pub fn validate_options(text: &str) -> Result<(), String> {
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(_)) => Ok(()),
        Ok(_) => Err("formatter options must be a JSON object".to_string()),
        Err(e) => Err(e.to_string()),
    }
}

/// Render model of the settings panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsPanel {
    pub heading: &'static str,
    pub field_name: &'static str,
    pub description: &'static str,
    pub doc_link_text: &'static str,
    pub doc_link_href: &'static str,
    pub rows: u16,
    pub cols: u16,
    pub value: String,
}

impl SettingsPanel {
    pub fn display(settings: &Settings) -> Self {
        let value = if settings.options.is_empty() {
            DEFAULT_OPTIONS.to_string()
        } else {
            settings.options.clone()
        };

        Self {
            heading: "vaultfmt Settings",
            field_name: "Formatter Options",
            description: "See: ",
            doc_link_text: "Formatter Options",
            doc_link_href: OPTIONS_DOC_URL,
            rows: 8,
            cols: 40,
            value,
        }
    }
}
