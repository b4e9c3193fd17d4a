//! Building blocks for `${{ ... }}` workflow expressions.
//!
//! A [`Fragment`] is an unwrapped piece of expression text. Fragments are
//! produced by context accessors, [`raw`] literals and function helpers, are
//! combined with the logical operators below, and finally wrapped exactly once
//! into a [`WorkflowExpr`] by [`wrap`] or the [`template::expr`] builder.

pub mod functions;
pub mod template;

use crate::core::error::{FlowError, FlowResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Not;

/// Opening delimiter recognised by the CI platform.
pub const OPEN: &str = "${{";
/// Closing delimiter recognised by the CI platform.
pub const CLOSE: &str = "}}";

const WRAP_PREFIX: &str = "${{ ";
const WRAP_SUFFIX: &str = " }}";

/// Context namespaces a token path may start with.
pub const TOKEN_PREFIXES: &[&str] = &[
    "github", "env", "vars", "secrets", "matrix", "steps", "needs", "jobs", "runner", "job",
    "strategy", "inputs",
];

const OPERATOR_CHARS: &[char] = &['&', '|', '?', '!', '<', '>', '='];

/// How a fragment came to be. Normalisation and parenthesisation use the tag
/// instead of guessing from the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FragmentKind {
    /// Dotted context path such as `github.ref`.
    Token,
    /// Quoted string, number or boolean literal.
    Literal,
    /// Function call such as `contains(github.ref, 'x')`.
    Call,
    /// Operator composition or caller supplied expression text.
    Composed,
}

/// Unwrapped, immutable piece of expression text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fragment {
    inner: String,
    kind: FragmentKind,
}

impl Fragment {
    pub(crate) fn new(inner: impl Into<String>, kind: FragmentKind) -> Self {
        Self {
            inner: inner.into(),
            kind,
        }
    }

    /// Token for a context path whose namespace is known to be valid.
    pub(crate) fn context(path: impl Into<String>) -> Self {
        Self::new(path, FragmentKind::Token)
    }

    /// Accept caller supplied expression text, e.g. `github.run_attempt > 1`.
    ///
    /// Text that already carries the `${{` delimiter is rejected.
    pub fn expression(text: &str) -> FlowResult<Self> {
        reject_wrapped(text)?;
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(FlowError::EmptyExpression);
        }
        Ok(Self::new(trimmed, FragmentKind::Composed))
    }

    pub fn boolean(value: bool) -> Self {
        Self::new(value.to_string(), FragmentKind::Literal)
    }

    pub fn number(value: i64) -> Self {
        Self::new(value.to_string(), FragmentKind::Literal)
    }

    pub fn inner(&self) -> &str {
        &self.inner
    }

    pub fn kind(&self) -> FragmentKind {
        self.kind
    }

    pub fn into_inner(self) -> String {
        self.inner
    }

    /// Wrap this fragment into a complete `${{ ... }}` expression.
    pub fn wrap(&self) -> FlowResult<WorkflowExpr> {
        wrap(&self.inner)
    }

    /// `self && other`
    pub fn and(&self, other: &Fragment) -> Fragment {
        self.binary("&&", other)
    }

    /// `self || other`
    pub fn or(&self, other: &Fragment) -> Fragment {
        self.binary("||", other)
    }

    /// `self ?? other`
    pub fn coalesce(&self, other: &Fragment) -> Fragment {
        self.binary("??", other)
    }

    /// `self == other`
    pub fn equals(&self, other: &Fragment) -> Fragment {
        self.binary("==", other)
    }

    /// `self != other`
    pub fn not_equals(&self, other: &Fragment) -> Fragment {
        self.binary("!=", other)
    }

    /// `!self`
    pub fn negate(&self) -> Fragment {
        Fragment::new(format!("!{}", self.operand()), FragmentKind::Composed)
    }

    /// `(self)`; a fragment that is already one parenthesised group is kept.
    pub fn group(&self) -> Fragment {
        if is_single_group(&self.inner) {
            return self.clone();
        }
        Fragment::new(format!("({})", self.inner), FragmentKind::Composed)
    }

    fn binary(&self, operator: &str, other: &Fragment) -> Fragment {
        Fragment::new(
            format!("{} {} {}", self.operand(), operator, other.operand()),
            FragmentKind::Composed,
        )
    }

    /// Text of this fragment as an operand of a larger composition.
    ///
    /// Only composed fragments are inspected; the check is purely syntactic
    /// (any of `&|?!<>=` outside quotes) and is not a precedence parser.
    fn operand(&self) -> String {
        if self.kind == FragmentKind::Composed
            && !is_single_group(&self.inner)
            && has_operator(&self.inner)
        {
            format!("({})", self.inner)
        } else {
            self.inner.clone()
        }
    }
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.inner)
    }
}

impl Not for Fragment {
    type Output = Fragment;

    fn not(self) -> Fragment {
        self.negate()
    }
}

impl Not for &Fragment {
    type Output = Fragment;

    fn not(self) -> Fragment {
        self.negate()
    }
}

/// A complete expression of the exact shape `${{ <content> }}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct WorkflowExpr(String);

impl WorkflowExpr {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Content between the delimiters.
    pub fn inner(&self) -> &str {
        &self.0[WRAP_PREFIX.len()..self.0.len() - WRAP_SUFFIX.len()]
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for WorkflowExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for WorkflowExpr {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<WorkflowExpr> for String {
    fn from(expr: WorkflowExpr) -> Self {
        expr.0
    }
}

impl TryFrom<String> for WorkflowExpr {
    type Error = FlowError;

    /// Accepts only text [`wrap`] would produce: one delimiter pair around
    /// trimmed, non-empty content.
    fn try_from(value: String) -> FlowResult<Self> {
        let rewrapped = wrap(&unwrap(&value)?)?;
        if rewrapped.as_str() != value {
            return Err(FlowError::MalformedExpression { text: value });
        }
        Ok(rewrapped)
    }
}

/// Token fragment for a dotted context path such as `secrets.API_KEY`.
pub fn token(path: &str) -> FlowResult<Fragment> {
    if !is_token_path(path) {
        return Err(FlowError::InvalidTokenPrefix {
            path: path.to_string(),
            known: TOKEN_PREFIXES.join(", "),
        });
    }
    Ok(Fragment::context(path))
}

/// Quoted string literal; embedded single quotes are doubled.
pub fn raw(text: &str) -> Fragment {
    Fragment::new(quote(text), FragmentKind::Literal)
}

/// Wrap expression text in `${{ ... }}`.
///
/// Fails when the text already contains `${{` anywhere: nested expressions
/// are never valid and would otherwise only surface when the CI platform runs
/// the workflow.
pub fn wrap(text: &str) -> FlowResult<WorkflowExpr> {
    reject_wrapped(text)?;
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(FlowError::EmptyExpression);
    }
    Ok(WorkflowExpr([WRAP_PREFIX, trimmed, WRAP_SUFFIX].concat()))
}

/// Strip the delimiters produced by [`wrap`]; the match is whitespace exact.
pub fn unwrap(expr: &str) -> FlowResult<String> {
    if expr.len() < WRAP_PREFIX.len() + WRAP_SUFFIX.len()
        || !expr.starts_with(WRAP_PREFIX)
        || !expr.ends_with(WRAP_SUFFIX)
    {
        return Err(FlowError::MalformedExpression {
            text: expr.to_string(),
        });
    }
    Ok(expr[WRAP_PREFIX.len()..expr.len() - WRAP_SUFFIX.len()].to_string())
}

/// True when the first dotted segment is a known namespace, a member follows
/// and no segment is empty.
pub fn is_token_path(path: &str) -> bool {
    let mut segments = path.split('.');
    let known = segments
        .next()
        .is_some_and(|prefix| TOKEN_PREFIXES.contains(&prefix));
    let rest: Vec<&str> = segments.collect();
    known && !rest.is_empty() && rest.iter().all(|segment| !segment.is_empty())
}

pub(crate) fn quote(text: &str) -> String {
    format!("'{}'", text.replace('\'', "''"))
}

fn reject_wrapped(text: &str) -> FlowResult<()> {
    if text.contains(OPEN) {
        let inner = text
            .trim()
            .trim_start_matches(OPEN)
            .trim_end_matches(CLOSE)
            .trim()
            .to_string();
        return Err(FlowError::AlreadyWrapped {
            text: text.to_string(),
            inner,
        });
    }
    Ok(())
}

fn has_operator(text: &str) -> bool {
    let mut in_literal = false;
    for c in text.chars() {
        if c == '\'' {
            in_literal = !in_literal;
        } else if !in_literal && OPERATOR_CHARS.contains(&c) {
            return true;
        }
    }
    false
}

/// Whether the whole text is one `( ... )` group, ignoring parentheses in literals.
fn is_single_group(text: &str) -> bool {
    if !text.starts_with('(') || !text.ends_with(')') {
        return false;
    }
    let mut depth = 0usize;
    let mut in_literal = false;
    let last = text.len() - 1;
    for (i, c) in text.char_indices() {
        match c {
            '\'' => in_literal = !in_literal,
            '(' if !in_literal => depth += 1,
            ')' if !in_literal => {
                depth = depth.saturating_sub(1);
                if depth == 0 && i != last {
                    return false;
                }
            }
            _ => {}
        }
    }
    depth == 0
}
