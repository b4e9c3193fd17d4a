//! Block-literal layout for multi-line `run:` scripts.
//!
//! Before encoding, every multi-line `run` string in the canonical value is
//! swapped for a marker that no string in the document contains. After
//! encoding, a `run:` line carrying a marker is replaced by a literal block
//! holding the original script. Any marker the encoder placed elsewhere (JSON
//! output, flow style) is restored as a double-quoted scalar. Lines without a
//! marker are never touched, so script text that happens to look like a
//! `run:` entry passes through unchanged.

use crate::core::error::FlowResult;
use regex::Regex;
use serde_yaml::Value;
use std::sync::OnceLock;

const MARKER_STEM: &str = "__ghaflow_block_";

fn marked_run_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r#"^( *)((?:- )*)run: (["']?)(__ghaflow_block_\d+__):(\d+)(["']?)$"#)
            .expect("marked run pattern is valid")
    })
}

fn marker_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r#"(["']?)(__ghaflow_block_\d+__):(\d+)(["']?)"#)
            .expect("marker pattern is valid")
    })
}

/// Scripts lifted out of a canonical value by [`mark_block_literals`].
#[derive(Debug, Clone, Default)]
pub struct BlockLiterals {
    marker: String,
    scripts: Vec<String>,
}

/// Replace every block-safe multi-line `run` string in `value` with a marker.
pub fn mark_block_literals(value: &mut Value) -> BlockLiterals {
    let mut blocks = BlockLiterals {
        marker: unused_marker(value),
        scripts: Vec::new(),
    };
    mark(value, &mut blocks);
    blocks
}

fn mark(value: &mut Value, blocks: &mut BlockLiterals) {
    match value {
        Value::Mapping(map) => {
            for (key, child) in map.iter_mut() {
                let script = match (key.as_str(), &*child) {
                    (Some("run"), Value::String(text))
                        if text.contains('\n') && is_block_safe(text) =>
                    {
                        Some(text.clone())
                    }
                    _ => None,
                };
                match script {
                    Some(script) => {
                        *child = Value::String(format!(
                            "{}:{}",
                            blocks.marker,
                            blocks.scripts.len()
                        ));
                        blocks.scripts.push(script);
                    }
                    None => mark(child, blocks),
                }
            }
        }
        Value::Sequence(items) => items.iter_mut().for_each(|item| mark(item, blocks)),
        Value::Tagged(tagged) => mark(&mut tagged.value, blocks),
        _ => {}
    }
}

fn unused_marker(value: &Value) -> String {
    let mut strings = Vec::new();
    collect_strings(value, &mut strings);
    (0usize..)
        .map(|n| format!("{}{}__", MARKER_STEM, n))
        .find(|marker| !strings.iter().any(|text| text.contains(marker.as_str())))
        .unwrap_or_default()
}

fn collect_strings<'v>(value: &'v Value, out: &mut Vec<&'v str>) {
    match value {
        Value::String(text) => out.push(text),
        Value::Mapping(map) => {
            for (key, child) in map {
                collect_strings(key, out);
                collect_strings(child, out);
            }
        }
        Value::Sequence(items) => items.iter().for_each(|item| collect_strings(item, out)),
        Value::Tagged(tagged) => collect_strings(&tagged.value, out),
        _ => {}
    }
}

impl BlockLiterals {
    pub fn is_empty(&self) -> bool {
        self.scripts.is_empty()
    }

    fn script(&self, marker: &str, index: &str) -> Option<&str> {
        if marker != self.marker {
            return None;
        }
        let index: usize = index.parse().ok()?;
        self.scripts.get(index).map(String::as_str)
    }

    /// Put the scripts back into `text`. `indent` is how much deeper than the
    /// `run` key the block content sits.
    pub fn restore(&self, text: &str, indent: usize) -> FlowResult<String> {
        if self.is_empty() {
            return Ok(text.to_string());
        }
        let quoted = self
            .scripts
            .iter()
            .map(serde_json::to_string)
            .collect::<Result<Vec<_>, _>>()?;

        let mut out = String::with_capacity(text.len());
        for line in text.split_inclusive('\n') {
            let (content, newline) = match line.strip_suffix('\n') {
                Some(content) => (content, true),
                None => (line, false),
            };
            if let Some(block) = self.block_line(content, indent) {
                out.push_str(&block);
                continue;
            }
            let restored = marker_pattern().replace_all(content, |caps: &regex::Captures| {
                match self.script(&caps[2], &caps[3]) {
                    Some(_) => caps[3]
                        .parse::<usize>()
                        .ok()
                        .and_then(|index| quoted.get(index))
                        .cloned()
                        .unwrap_or_else(|| caps[0].to_string()),
                    None => caps[0].to_string(),
                }
            });
            out.push_str(&restored);
            if newline {
                out.push('\n');
            }
        }
        Ok(out)
    }

    /// The literal block for one marked `run:` line, newline-terminated.
    fn block_line(&self, line: &str, indent: usize) -> Option<String> {
        let captures = marked_run_pattern().captures(line)?;
        if captures[3] != captures[6] {
            return None;
        }
        let script = self.script(&captures[4], &captures[5])?;
        Some(block_literal(&captures[1], &captures[2], script, indent))
    }
}

fn block_literal(lead: &str, dashes: &str, value: &str, indent: usize) -> String {
    let key_column = lead.len() + dashes.len();
    let pad = " ".repeat(key_column + indent.max(1));
    let body = value.trim_end_matches('\n');
    let trailing = value.len() - body.len();
    let chomp = match trailing {
        0 => "-",
        1 => "",
        _ => "+",
    };
    let first_content = body.split('\n').find(|l| !l.is_empty()).unwrap_or("");
    let indicator = if first_content.starts_with(' ') {
        indent.max(1).to_string()
    } else {
        String::new()
    };

    let mut block = format!("{}{}run: |{}{}\n", lead, dashes, indicator, chomp);
    for content in body.split('\n') {
        if !content.is_empty() {
            block.push_str(&pad);
            block.push_str(content);
        }
        block.push('\n');
    }
    for _ in 1..trailing {
        block.push('\n');
    }
    block
}

/// Whether a literal block reproduces `value` exactly.
fn is_block_safe(value: &str) -> bool {
    if value.trim().is_empty() {
        return false;
    }
    let printable = value.chars().all(|c| {
        c == '\n'
            || c == '\t'
            || !(c.is_control() || matches!(c, '\u{85}' | '\u{2028}' | '\u{2029}' | '\u{feff}'))
    });
    printable
        && value.split('\n').all(|line| {
            // Trailing blanks and whitespace-only lines are where decoders
            // disagree on literal content.
            line.is_empty() || !line.ends_with(|c: char| c == ' ' || c == '\t')
        })
}
