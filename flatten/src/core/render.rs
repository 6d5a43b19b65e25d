//! Framing for the aggregate artifact.
//!
//! Downstream loaders parse the START/END markers, so the layout here is a
//! byte-exact contract:
//!
//! ```text
//! ================================================================================
//! FLATTENED CODEBASE
//! ================================================================================
//!
//! --- START OF FILE: src/app.ts ---
//! <content>
//! --- END OF FILE: src/app.ts ---
//!
//! ```

use std::borrow::Cow;

const RULE_WIDTH: usize = 80;
const TITLE: &str = "FLATTENED CODEBASE";

/// Artifact preamble, including the blank line before the first block.
pub fn render_header() -> String {
    let rule = "=".repeat(RULE_WIDTH);
    format!("{rule}\n{TITLE}\n{rule}\n\n")
}

/// One framed file block, followed by exactly one blank line.
///
/// Line endings are normalized to `\n` first. Non-empty content missing a
/// trailing newline then gets one appended; content already ending in `\n`
/// is left alone.
pub fn render_block(relative_path: &str, content: &str) -> String {
    let normalized = normalize_newlines(content);
    let content: &str = &normalized;
    let mut block = String::with_capacity(content.len() + relative_path.len() * 2 + 64);
    block.push_str(&start_marker(relative_path));
    block.push('\n');
    block.push_str(content);
    if needs_newline(content) {
        block.push('\n');
    }
    block.push_str(&end_marker(relative_path));
    block.push_str("\n\n");
    block
}

pub fn start_marker(relative_path: &str) -> String {
    format!("--- START OF FILE: {relative_path} ---")
}

pub fn end_marker(relative_path: &str) -> String {
    format!("--- END OF FILE: {relative_path} ---")
}

/// Convert `\r\n` and lone `\r` line endings to `\n`.
pub fn normalize_newlines(content: &str) -> Cow<'_, str> {
    if !content.contains('\r') {
        return Cow::Borrowed(content);
    }
    Cow::Owned(content.replace("\r\n", "\n").replace('\r', "\n"))
}

fn needs_newline(content: &str) -> bool {
    !content.is_empty() && !content.ends_with('\n')
}
