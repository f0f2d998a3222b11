//! Formatter adapter around the `comrak` Markdown engine.
//!
//! [`format`] is a pure function of the document text and the persisted
//! options string: the options are merged with the fixed `markdown` parser
//! selection, the text is parsed into a CommonMark/GFM tree, and the tree is
//! written back out as canonical Markdown. Wiki links, embeds, tags and other
//! note syntax come out as written.

mod note_syntax;
pub mod options;
mod wrap;

use std::io;

use comrak::nodes::{AstNode, NodeValue};
use comrak::{Arena, ComrakOptions, format_commonmark, parse_document};
use thiserror::Error;

use crate::utils::line_ending::{LineEnding, detect_line_ending, normalize_line_ending};

pub use options::{EndOfLine, FormatOptions, ProseWrap, merge_options};

const FRONT_MATTER_DELIMITER: &str = "---";

/// Errors raised while preparing options or formatting a document
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("Invalid formatter options: {0}")]
    InvalidJson(#[source] serde_json::Error),

    #[error("Formatter options must be a JSON object, found {found}")]
    NotAnObject { found: &'static str },

    #[error("Invalid formatter option: {0}")]
    InvalidOptions(#[source] serde_json::Error),

    #[error("Unable to parse Markdown: unexpected NUL character at line {line}, column {column}")]
    Unparseable { line: usize, column: usize },

    #[error("Failed to render Markdown: {0}")]
    Render(#[from] io::Error),
}

/// Format `text` with the persisted `options` string.
pub fn format(text: &str, options: &str) -> Result<String, FormatError> {
    let options = FormatOptions::from_settings(options)?;
    format_with(text, &options)
}

/// Format `text` with already validated options.
pub fn format_with(text: &str, options: &FormatOptions) -> Result<String, FormatError> {
    ensure_parseable(text)?;

    let arena = Arena::new();
    let engine = engine_options(options);
    let root = parse_document(&arena, text, &engine);

    if options.prose_wrap == ProseWrap::Never {
        join_soft_breaks(root);
    }
    note_syntax::keep_note_syntax(&arena, root);
    if options.prose_wrap == ProseWrap::Always {
        wrap::pin_unsafe_breaks(&arena, root);
    }

    let mut output = Vec::with_capacity(text.len());
    format_commonmark(root, &engine, &mut output)?;
    let rendered =
        String::from_utf8(output).map_err(|e| FormatError::Render(io::Error::new(io::ErrorKind::InvalidData, e)))?;

    let target = match options.end_of_line {
        EndOfLine::Lf => LineEnding::Lf,
        EndOfLine::Crlf => LineEnding::Crlf,
        EndOfLine::Auto => detect_line_ending(text),
    };
    Ok(normalize_line_ending(&rendered, target))
}

/// Reject binary content: a NUL character never occurs in a text note.
fn ensure_parseable(text: &str) -> Result<(), FormatError> {
    for (index, line) in text.split('\n').enumerate() {
        if let Some(byte_offset) = line.find('\0') {
            return Err(FormatError::Unparseable {
                line: index + 1,
                column: line[..byte_offset].chars().count() + 1,
            });
        }
    }
    Ok(())
}

fn engine_options(options: &FormatOptions) -> ComrakOptions<'static> {
    let mut engine = ComrakOptions::default();
    engine.extension.table = true;
    engine.extension.strikethrough = true;
    engine.extension.tasklist = true;
    engine.extension.footnotes = true;
    engine.extension.front_matter_delimiter = Some(FRONT_MATTER_DELIMITER.to_string());
    // Bare URLs stay text: the autolink extension would rewrite `www.` hosts
    // into `[www.x](http://www.x)` and other URLs into `<...>`.
    engine.extension.autolink = false;
    engine.render.width = match options.prose_wrap {
        ProseWrap::Always => options.print_width.get(),
        ProseWrap::Never | ProseWrap::Preserve => 0,
    };
    engine
}

fn join_soft_breaks<'a>(root: &'a AstNode<'a>) {
    for node in root.descendants() {
        let mut ast = node.data.borrow_mut();
        if matches!(ast.value, NodeValue::SoftBreak) {
            ast.value = NodeValue::Text(" ".to_string());
        }
    }
}
