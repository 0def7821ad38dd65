//! Handles the display of pretty messages for errors.

use super::TreeError;

use crate::util::escape_byte;
use crate::PROGRAM;

/* Public */

pub fn pretty_error_message(err: &TreeError) -> String {
    match err {
        TreeError::Direct(msg) => format!("{PROGRAM}: error: {msg}"),
        TreeError::Io { .. } => format!("{PROGRAM}: error: {err}"),
        TreeError::Parse(err) => format!("{PROGRAM}: parse error: {err}"),
        TreeError::Ast(err) => format!("{PROGRAM}: internal error: {err}"),
        TreeError::Schema(err) => format!("{PROGRAM}: schema error: {err}"),
        TreeError::Eval(err) if err.is_internal() => format!("{PROGRAM}: internal error: {err}"),
        TreeError::Eval(err) => format!("{PROGRAM}: error: {err}"),
    }
}

/// Renders the line of `input` containing the 1-based position `line:col`,
/// followed by a line with a caret under that column.
///
/// Non-printable characters are shown escaped (`\t`, `\x01`, ...), so the caret
/// offset accounts for the extra width of every escape before the column.
pub fn source_context(input: &str, line: usize, col: usize) -> String {
    let text = input.split('\n').nth(line.saturating_sub(1)).unwrap_or("");

    let mut shown = String::new();
    let mut caret_offset = None;
    for (i, byte) in text.bytes().enumerate() {
        if i + 1 == col {
            caret_offset = Some(shown.len());
        }
        shown.push_str(&escape_byte(byte));
    }

    // A position just past the end of the line (e.g. at end of input).
    let caret_offset = caret_offset.unwrap_or(shown.len());

    format!("{shown}\n{}^", " ".repeat(caret_offset))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn caret_under_column() {
        assert_eq!(source_context("A(.a=B())", 1, 4), "A(.a=B())\n   ^");
    }

    #[test]
    fn caret_accounts_for_escapes() {
        assert_eq!(source_context("\tA(x", 1, 4), "\\tA(x\n    ^");
    }

    #[test]
    fn picks_requested_line() {
        assert_eq!(source_context("A(\n  .a=B(", 2, 3), "  .a=B(\n  ^");
    }
}
