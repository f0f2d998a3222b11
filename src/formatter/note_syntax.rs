//! Keep the vault's inline note syntax as written.
//!
//! The CommonMark writer escapes every `[`, `]`, `#`, `_` and `!` it meets in
//! text. In notes those characters also spell wiki links (`[[Note]]`), embeds
//! (`![[image.png]]`), tags (`#todo`), identifiers (`snake_case`) and plain
//! punctuation. Wherever reading the character back unescaped gives the same
//! document, it is moved into a raw inline node, which the writer emits
//! verbatim.

use comrak::Arena;
use comrak::nodes::{AstNode, NodeValue};

/// Characters that never start inline syntax inside a wiki link target.
const INERT_PUNCTUATION: &str = " .,-#|/:()'?+=%;";

#[derive(Debug, PartialEq, Eq)]
pub(super) enum Segment {
    Text(String),
    Verbatim(String),
}

/// Split every text node of `root` into escaped and verbatim runs.
pub(super) fn keep_note_syntax<'a>(arena: &'a Arena<AstNode<'a>>, root: &'a AstNode<'a>) {
    let texts: Vec<&'a AstNode<'a>> = root
        .descendants()
        .filter(|node| matches!(node.data.borrow().value, NodeValue::Text(_)))
        .collect();

    for node in texts {
        let segments = match &node.data.borrow().value {
            NodeValue::Text(text) => split_text(text, followed_by_bracket(node)),
            _ => continue,
        };
        replace_text(arena, node, segments);
    }
}

/// Swap `node` for `segments`, unless every segment is plain text.
pub(super) fn replace_text<'a>(arena: &'a Arena<AstNode<'a>>, node: &'a AstNode<'a>, segments: Vec<Segment>) {
    if !segments.iter().any(|segment| matches!(segment, Segment::Verbatim(_))) {
        return;
    }

    for segment in segments {
        let value = match segment {
            Segment::Text(text) => NodeValue::Text(text),
            Segment::Verbatim(raw) => NodeValue::HtmlInline(raw),
        };
        node.insert_before(arena.alloc(value.into()));
    }
    node.detach();
}

/// Whether the rendered output right after `node` may start with `[`.
fn followed_by_bracket<'a>(node: &'a AstNode<'a>) -> bool {
    match node.next_sibling() {
        None => false,
        Some(next) => match &next.data.borrow().value {
            NodeValue::SoftBreak | NodeValue::LineBreak => false,
            NodeValue::Text(text) => text.starts_with('['),
            _ => true,
        },
    }
}

fn split_text(text: &str, followed_by_bracket: bool) -> Vec<Segment> {
    let chars: Vec<char> = text.chars().collect();
    let mut segments = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        if let Some(len) = wiki_link_len(&chars[i..], followed_by_bracket) {
            push(&mut segments, true, &chars[i..i + len]);
            i += len;
            continue;
        }

        let prev = i.checked_sub(1).map(|p| chars[p]);
        let next = chars.get(i + 1).copied();
        let verbatim = match chars[i] {
            // A tag; `&#` would read back as a character reference
            '#' => prev != Some('&') && next.is_some_and(char::is_alphanumeric),
            // Intraword underscores can neither open nor close emphasis
            '_' => prev.is_some_and(char::is_alphanumeric) && next.is_some_and(char::is_alphanumeric),
            '!' => match next {
                Some(next) => next != '[',
                None => !followed_by_bracket,
            },
            _ => false,
        };
        push(&mut segments, verbatim, &chars[i..=i]);
        i += 1;
    }

    segments
}

pub(super) fn push(segments: &mut Vec<Segment>, verbatim: bool, chars: &[char]) {
    match segments.last_mut() {
        Some(Segment::Verbatim(run)) if verbatim => run.extend(chars),
        Some(Segment::Text(run)) if !verbatim => run.extend(chars),
        _ if verbatim => segments.push(Segment::Verbatim(chars.iter().collect())),
        _ => segments.push(Segment::Text(chars.iter().collect())),
    }
}

/// Length of the `[[target]]` or `![[target]]` at the start of `chars`, if
/// it can be written out unescaped.
fn wiki_link_len(chars: &[char], followed_by_bracket: bool) -> Option<usize> {
    let open = if chars.starts_with(&['!', '[', '[']) {
        3
    } else if chars.starts_with(&['[', '[']) {
        2
    } else {
        return None;
    };

    let rest = &chars[open..];
    let inner = rest.iter().position(|c| matches!(c, '[' | ']' | '\n'))?;
    if inner == 0 || !rest[inner..].starts_with(&[']', ']']) {
        return None;
    }

    let end = open + inner + 2;
    // `[[a]](b)` and `[[a]][b]` read back as links
    match chars.get(end) {
        Some('(' | '[') => return None,
        None if followed_by_bracket => return None,
        _ => {}
    }

    is_inert(&rest[..inner]).then_some(end)
}

fn is_inert(target: &[char]) -> bool {
    target.iter().enumerate().all(|(i, &c)| match c {
        '_' => {
            i > 0
                && target[i - 1].is_alphanumeric()
                && target.get(i + 1).is_some_and(|next| next.is_alphanumeric())
        }
        c => c.is_alphanumeric() || !c.is_ascii() || INERT_PUNCTUATION.contains(c),
    })
}
