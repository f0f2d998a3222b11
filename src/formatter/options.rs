//! Formatter options: user JSON merged with the fixed parser selection.

use std::num::NonZeroUsize;

use serde::Deserialize;
use serde_json::{Map, Value};

use super::FormatError;

/// Parser every merged option set is pinned to.
pub const MARKDOWN_PARSER: &str = "markdown";

/// Engine plugin every merged option set is pinned to.
pub const MARKDOWN_PLUGIN: &str = "markdown";

pub const DEFAULT_PRINT_WIDTH: NonZeroUsize = match NonZeroUsize::new(80) {
    Some(width) => width,
    None => NonZeroUsize::MIN,
};

/// Parse the persisted options string and pin `parser` and `plugins`.
///
/// User keys come first and keep their order; the fixed keys are written
/// last so they replace any user value of the same name. An empty string is
/// read as `{}`.
pub fn merge_options(options: &str) -> Result<Map<String, Value>, FormatError> {
    let source = if options.is_empty() { "{}" } else { options };
    let parsed: Value = serde_json::from_str(source).map_err(FormatError::InvalidJson)?;

    let Value::Object(mut merged) = parsed else {
        return Err(FormatError::NotAnObject {
            found: json_type_name(&parsed),
        });
    };

    merged.insert("parser".to_string(), Value::String(MARKDOWN_PARSER.to_string()));
    merged.insert(
        "plugins".to_string(),
        Value::Array(vec![Value::String(MARKDOWN_PLUGIN.to_string())]),
    );
    Ok(merged)
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Parser {
    Markdown,
}

/// How paragraphs are re-flowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProseWrap {
    /// Wrap paragraphs at `printWidth`.
    Always,
    /// Join every paragraph onto a single line.
    Never,
    /// Keep the author's line breaks.
    #[default]
    Preserve,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EndOfLine {
    #[default]
    Lf,
    Crlf,
    /// Keep the dominant ending of the input.
    Auto,
}

/// Typed view of a merged option set.
///
/// Keys the formatter does not know are ignored, so option sets written for
/// other tools pass through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormatOptions {
    pub parser: Parser,
    pub plugins: Vec<String>,
    #[serde(default = "default_print_width")]
    pub print_width: NonZeroUsize,
    #[serde(default)]
    pub prose_wrap: ProseWrap,
    #[serde(default)]
    pub end_of_line: EndOfLine,
}

fn default_print_width() -> NonZeroUsize {
    DEFAULT_PRINT_WIDTH
}

impl FormatOptions {
    pub fn from_merged(merged: Map<String, Value>) -> Result<Self, FormatError> {
        serde_json::from_value(Value::Object(merged)).map_err(FormatError::InvalidOptions)
    }

    /// Merge and type-check a persisted options string in one step.
    pub fn from_settings(options: &str) -> Result<Self, FormatError> {
        Self::from_merged(merge_options(options)?)
    }
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            parser: Parser::Markdown,
            plugins: vec![MARKDOWN_PLUGIN.to_string()],
            print_width: DEFAULT_PRINT_WIDTH,
            prose_wrap: ProseWrap::default(),
            end_of_line: EndOfLine::default(),
        }
    }
}
