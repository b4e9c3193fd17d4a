//! Workflow serialisation.
//!
//! A workflow is validated, projected to a canonical [`serde_yaml::Value`]
//! (keys in schema order), has its multi-line scripts swapped for markers,
//! is handed to a pluggable [`Stringify`] encoder, gets the scripts back as
//! block literals and is finally prefixed with the header.

pub mod block;

pub use block::{mark_block_literals, BlockLiterals};

use crate::core::error::{FlowError, FlowResult};
use crate::core::workflow::Workflow;
use serde::Serialize;
use serde_yaml::Value;
use tracing::debug;

/// Comment block written at the top of every generated file.
pub const DEFAULT_HEADER: &str =
    "# Do not modify!\n# Generated by ghaflow; edit the workflow definition instead.\n";

pub const DEFAULT_INDENT: usize = 2;

/// Encoder seam. Receives the canonical projection and the indent width and
/// returns YAML-family text. Closures with the same shape implement it too.
///
/// Multi-line `run` scripts arrive as single-line marker strings; encoders
/// emit them like any other string scalar.
pub trait Stringify {
    fn stringify(&self, value: &Value, indent: usize) -> FlowResult<String>;
}

impl<F> Stringify for F
where
    F: Fn(&Value, usize) -> FlowResult<String>,
{
    fn stringify(&self, value: &Value, indent: usize) -> FlowResult<String> {
        self(value, indent)
    }
}

/// `serde_yaml` block-style output. The indent width is fixed at two.
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlStringify;

impl Stringify for YamlStringify {
    fn stringify(&self, value: &Value, _indent: usize) -> FlowResult<String> {
        Ok(serde_yaml::to_string(value)?)
    }
}

/// Pretty-printed JSON, which any YAML decoder also accepts.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonStringify;

impl Stringify for JsonStringify {
    fn stringify(&self, value: &Value, indent: usize) -> FlowResult<String> {
        let indent = " ".repeat(indent.max(1));
        let formatter = serde_json::ser::PrettyFormatter::with_indent(indent.as_bytes());
        let mut buffer = Vec::new();
        let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
        value.serialize(&mut serializer)?;
        String::from_utf8(buffer)
            .map_err(|err| FlowError::Json(serde::ser::Error::custom(err)))
    }
}

/// Output encoding selectable from configuration and the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Yaml,
    Json,
}

impl OutputFormat {
    pub fn stringify(self) -> Box<dyn Stringify> {
        match self {
            OutputFormat::Yaml => Box::new(YamlStringify),
            OutputFormat::Json => Box::new(JsonStringify),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "yaml" | "yml" => Ok(OutputFormat::Yaml),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("unknown output format `{}` (expected yaml or json)", other)),
        }
    }
}

/// Validate `workflow` and return its canonical plain-data projection.
///
/// Key order follows the schema declaration, never the order in which the
/// caller populated the workflow.
pub fn to_canonical(workflow: &Workflow) -> FlowResult<Value> {
    workflow.validate()?;
    Ok(serde_yaml::to_value(workflow)?)
}

/// Serialise with the default header and YAML encoder.
pub fn stringify(workflow: &Workflow) -> FlowResult<String> {
    Serializer::new(workflow).stringify_workflow()
}

pub struct Serializer<'a> {
    workflow: &'a Workflow,
    header: String,
    stringify: Box<dyn Stringify + 'a>,
    indent: usize,
}

impl<'a> Serializer<'a> {
    pub fn new(workflow: &'a Workflow) -> Self {
        Self {
            workflow,
            header: DEFAULT_HEADER.to_string(),
            stringify: Box::new(YamlStringify),
            indent: DEFAULT_INDENT,
        }
    }

    /// Replace the header.
    pub fn with_header(mut self, header: impl Into<String>) -> Self {
        self.header = header.into();
        self
    }

    pub fn with_stringify(mut self, stringify: impl Stringify + 'a) -> Self {
        self.stringify = Box::new(stringify);
        self
    }

    pub fn with_boxed_stringify(mut self, stringify: Box<dyn Stringify + 'a>) -> Self {
        self.stringify = stringify;
        self
    }

    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent.max(1);
        self
    }

    pub fn stringify_workflow(&self) -> FlowResult<String> {
        let mut canonical = to_canonical(self.workflow)?;
        let blocks = mark_block_literals(&mut canonical);
        let encoded = self.stringify.stringify(&canonical, self.indent)?;
        let rewritten = blocks.restore(&encoded, self.indent)?;
        let body = finish_body(rewritten)?;
        debug!(
            workflow = %self.workflow.name,
            bytes = body.len(),
            "serialised workflow"
        );
        Ok(format!("{}{}", comment_block(&self.header), body))
    }
}

/// Header lines not already comments are turned into comments so the output
/// still decodes to the same data.
fn comment_block(header: &str) -> String {
    header
        .lines()
        .map(|line| {
            if line.is_empty() || line.starts_with('#') {
                format!("{}\n", line)
            } else {
                format!("# {}\n", line)
            }
        })
        .collect()
}

/// Leave exactly one trailing newline, unless extra ones belong to a
/// keep-chomped block at the end of the document.
fn finish_body(body: String) -> FlowResult<String> {
    let trimmed = body.trim_end_matches('\n');
    let candidate = format!("{}\n", trimmed);
    if body.len() - trimmed.len() <= 1 {
        return Ok(candidate);
    }
    let original: Value = serde_yaml::from_str(&body)?;
    let shortened: Value = serde_yaml::from_str(&candidate)?;
    if original == shortened {
        Ok(candidate)
    } else {
        Ok(body)
    }
}
