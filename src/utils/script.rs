//! Helpers for writing shell scripts inline in Rust source.

/// Dedent an indented multi-line script.
///
/// Leading whitespace of the whole text is dropped, the indentation of the
/// first non-blank line after the first one is measured, and up to that many
/// leading spaces are removed from every following line. Whitespace-only
/// lines become empty so the script can still be emitted as a block literal.
///
/// ```
/// use ghaflow::utils::lines;
///
/// let script = lines("
///     cargo build
///     cargo test --all
/// ");
/// assert_eq!(script, "cargo build\ncargo test --all\n");
/// ```
pub fn lines(script: &str) -> String {
    let text = script.trim_start();
    let indent = text
        .split('\n')
        .skip(1)
        .find(|line| !line.trim().is_empty())
        .map(|line| line.len() - line.trim_start_matches(' ').len())
        .unwrap_or(0);

    text.split('\n')
        .enumerate()
        .map(|(index, line)| {
            if line.trim().is_empty() {
                ""
            } else if index == 0 {
                line
            } else {
                strip_spaces(line, indent)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn strip_spaces(line: &str, count: usize) -> &str {
    let available = line.len() - line.trim_start_matches(' ').len();
    &line[available.min(count)..]
}
