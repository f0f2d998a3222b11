#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineEnding {
    Lf,
    Crlf,
}

/// Dominant line ending of `content`.
///
/// Mixed content resolves to whichever ending occurs more often; ties and
/// content without any newline resolve to LF.
pub fn detect_line_ending(content: &str) -> LineEnding {
    let crlf_count = content.matches("\r\n").count();
    let lf_count = content.matches('\n').count() - crlf_count;

    if crlf_count > lf_count {
        LineEnding::Crlf
    } else {
        LineEnding::Lf
    }
}

pub fn normalize_line_ending(content: &str, target: LineEnding) -> String {
    // Collapse to LF first so CRLF input never turns into CRCRLF
    let normalized = content.replace("\r\n", "\n");
    match target {
        LineEnding::Lf => normalized,
        LineEnding::Crlf => normalized.replace('\n', "\r\n"),
    }
}
