//! Line tokenizer for textarea input.

/// Splits raw multi-line text into trimmed, non-empty lines.
///
/// Handles `\r\n` line endings. Idempotent: re-tokenizing the joined
/// output yields the same lines.
pub fn tokenize(raw: &str) -> Vec<&str> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}

/// Splits raw text into blocks separated by one or more blank lines.
/// Each block holds its trimmed, non-empty lines.
pub fn split_blocks(raw: &str) -> Vec<Vec<&str>> {
    let mut blocks = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for line in raw.lines().map(str::trim) {
        if line.is_empty() {
            if !current.is_empty() {
                blocks.push(std::mem::take(&mut current));
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        blocks.push(current);
    }
    blocks
}

/// Joins the non-blank lines of `text` with single spaces. Used for fields
/// that must fit on one row of the textarea grammar.
pub fn single_line(text: &str) -> String {
    tokenize(text).join(" ")
}

/// Trims every line and drops blank ones, keeping line structure.
pub fn compact_lines(text: &str) -> String {
    tokenize(text).join("\n")
}
