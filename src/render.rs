// Diff renderer: a pure presentation transform from unified-diff text to
// colorized terminal lines. No network or filesystem effects; the caller
// decides where the lines go.

use crossterm::style::Stylize;

/// Banner printed before the rendered diff.
pub const DIFF_HEADER: &str = "--- Diff Result ---";
/// Banner printed after the rendered diff.
pub const DIFF_FOOTER: &str = "--- End of Diff ---";

/// How a single diff line should be styled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Added,
    Removed,
    HunkHeader,
    Plain,
}

/// Classify one line of unified-diff text.
///
/// The `+++`/`---` file-header markers share a prefix with added/removed
/// lines and must stay unstyled, so they are checked first.
pub fn classify(line: &str) -> LineKind {
    if line.starts_with("+++") || line.starts_with("---") {
        LineKind::Plain
    } else if line.starts_with('+') {
        LineKind::Added
    } else if line.starts_with('-') {
        LineKind::Removed
    } else if line.starts_with("@@") {
        LineKind::HunkHeader
    } else {
        LineKind::Plain
    }
}

/// Render a unified diff as terminal lines: a bold banner, one styled
/// line per input line (order preserved), and a closing banner.
pub fn render(diff_text: &str) -> Vec<String> {
    let mut out = Vec::with_capacity(diff_text.len() / 16 + 2);
    out.push(DIFF_HEADER.cyan().bold().to_string());
    for line in diff_text.split('\n') {
        out.push(match classify(line) {
            LineKind::Added => line.green().to_string(),
            LineKind::Removed => line.red().to_string(),
            LineKind::HunkHeader => line.cyan().to_string(),
            LineKind::Plain => line.to_string(),
        });
    }
    out.push(DIFF_FOOTER.cyan().bold().to_string());
    out
}
