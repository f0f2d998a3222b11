//! Break points for `proseWrap: "always"`.
//!
//! The writer may break a line at any space in text. A break inside a table
//! row splits the row, and a break right before `-`, `+`, `=` or `~~~` makes
//! that word open a list, a setext underline or a fence. Those spaces are
//! pinned as raw inline nodes, which the writer never breaks.

use comrak::Arena;
use comrak::nodes::{AstNode, NodeValue};

use super::note_syntax::{Segment, push, replace_text};

pub(super) fn pin_unsafe_breaks<'a>(arena: &'a Arena<AstNode<'a>>, root: &'a AstNode<'a>) {
    let nodes: Vec<&'a AstNode<'a>> = root
        .descendants()
        .filter(|node| matches!(node.data.borrow().value, NodeValue::Text(_) | NodeValue::SoftBreak))
        .collect();

    for node in nodes {
        let segments = match &node.data.borrow().value {
            NodeValue::Text(text) => Some(pin_spaces(text, in_table(node))),
            _ => None,
        };

        match segments {
            Some(segments) => replace_text(arena, node, segments),
            // A soft break renders as a breakable space too
            None if next_text_starts_block(node) => {
                node.data.borrow_mut().value = NodeValue::HtmlInline(" ".to_string());
            }
            None => {}
        }
    }
}

fn in_table<'a>(node: &'a AstNode<'a>) -> bool {
    node.ancestors()
        .any(|ancestor| matches!(ancestor.data.borrow().value, NodeValue::TableCell))
}

fn next_text_starts_block<'a>(node: &'a AstNode<'a>) -> bool {
    node.next_sibling().is_some_and(|next| match &next.data.borrow().value {
        NodeValue::Text(text) => starts_block(text),
        _ => false,
    })
}

fn pin_spaces(text: &str, in_table: bool) -> Vec<Segment> {
    let mut segments = Vec::new();
    for (offset, c) in text.char_indices() {
        let pinned = c == ' ' && (in_table || starts_block(&text[offset + 1..]));
        push(&mut segments, pinned, &[c]);
    }
    segments
}

/// Whether `rest`, moved to the start of a line, would open a block.
fn starts_block(rest: &str) -> bool {
    let word = rest.split(' ').next().unwrap_or(rest);
    match word.chars().next() {
        Some(first @ ('-' | '+' | '=')) => word.chars().all(|c| c == first),
        Some('~') => word.starts_with("~~~"),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_openers() {
        assert!(starts_block("- item"));
        assert!(starts_block("--"));
        assert!(starts_block("+ more"));
        assert!(starts_block("=== x"));
        assert!(starts_block("~~~rust"));
        assert!(!starts_block("-dash"));
        assert!(!starts_block("~~strike~~"));
        assert!(!starts_block("word - x"));
        assert!(!starts_block(""));
    }

    #[test]
    fn test_pin_spaces() {
        assert_eq!(pin_spaces("a - b", false), vec![
            Segment::Text("a".to_string()),
            Segment::Verbatim(" ".to_string()),
            Segment::Text("- b".to_string()),
        ]);
        assert!(pin_spaces("a b", false).iter().all(|s| matches!(s, Segment::Text(_))));
        assert_eq!(pin_spaces("a b", true)[1], Segment::Verbatim(" ".to_string()));
    }
}
