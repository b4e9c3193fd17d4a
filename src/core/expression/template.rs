//! The `expr` builder: template text plus interpolated values, wrapped once.

use super::{is_token_path, quote, unwrap, wrap, Fragment, WorkflowExpr, OPEN};
use crate::core::error::{FlowError, FlowResult};

/// Interpolation slot marker used by [`expr`].
pub const SLOT: &str = "{}";

/// Anything that may be interpolated into an expression.
#[derive(Debug, Clone, PartialEq)]
pub enum ExprValue {
    Fragment(Fragment),
    Expr(WorkflowExpr),
    /// Token path, wrapped expression text or plain string.
    Str(String),
    Bool(bool),
    Int(i64),
    Float(f64),
    /// A value the caller did not have, e.g. a `None`.
    Undefined,
}

impl From<Fragment> for ExprValue {
    fn from(value: Fragment) -> Self {
        ExprValue::Fragment(value)
    }
}

impl From<&Fragment> for ExprValue {
    fn from(value: &Fragment) -> Self {
        ExprValue::Fragment(value.clone())
    }
}

impl From<WorkflowExpr> for ExprValue {
    fn from(value: WorkflowExpr) -> Self {
        ExprValue::Expr(value)
    }
}

impl From<&WorkflowExpr> for ExprValue {
    fn from(value: &WorkflowExpr) -> Self {
        ExprValue::Expr(value.clone())
    }
}

impl From<String> for ExprValue {
    fn from(value: String) -> Self {
        ExprValue::Str(value)
    }
}

impl From<&String> for ExprValue {
    fn from(value: &String) -> Self {
        ExprValue::Str(value.clone())
    }
}

impl From<&str> for ExprValue {
    fn from(value: &str) -> Self {
        ExprValue::Str(value.to_string())
    }
}

impl From<bool> for ExprValue {
    fn from(value: bool) -> Self {
        ExprValue::Bool(value)
    }
}

impl From<i32> for ExprValue {
    fn from(value: i32) -> Self {
        ExprValue::Int(i64::from(value))
    }
}

impl From<i64> for ExprValue {
    fn from(value: i64) -> Self {
        ExprValue::Int(value)
    }
}

impl From<u32> for ExprValue {
    fn from(value: u32) -> Self {
        ExprValue::Int(i64::from(value))
    }
}

impl From<f64> for ExprValue {
    fn from(value: f64) -> Self {
        ExprValue::Float(value)
    }
}

impl<T: Into<ExprValue>> From<Option<T>> for ExprValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(ExprValue::Undefined)
    }
}

impl ExprValue {
    /// Inner text for an `expr` interpolation: wrapped text is unwrapped,
    /// token paths pass through, any other string becomes a quoted literal.
    pub(crate) fn interpolation_inner(&self) -> FlowResult<Option<String>> {
        self.inner_with(|text| {
            if is_token_path(text) {
                text.to_string()
            } else {
                quote(text)
            }
        })
    }

    /// Inner text for a function argument.
    ///
    /// Best effort: a plain string that is neither a token path nor looks
    /// like a sub-expression (parentheses, an operator or whitespace) is
    /// quoted, anything else passes through. Use [`super::raw`] for literals
    /// the heuristic would misread.
    pub(crate) fn argument_inner(&self) -> FlowResult<Option<String>> {
        self.inner_with(|text| {
            if is_token_path(text) || looks_like_expression(text) {
                text.to_string()
            } else {
                quote(text)
            }
        })
    }

    fn inner_with(&self, plain: impl Fn(&str) -> String) -> FlowResult<Option<String>> {
        let inner = match self {
            ExprValue::Fragment(fragment) => fragment.inner().to_string(),
            ExprValue::Expr(expr) => expr.inner().to_string(),
            ExprValue::Str(text) if text.starts_with(OPEN) => unwrap(text)?,
            ExprValue::Str(text) => plain(text),
            ExprValue::Bool(value) => value.to_string(),
            ExprValue::Int(value) => value.to_string(),
            ExprValue::Float(value) => value.to_string(),
            ExprValue::Undefined => return Ok(None),
        };
        Ok(Some(inner))
    }
}

fn looks_like_expression(text: &str) -> bool {
    text.chars().any(|c| {
        matches!(c, '(' | ')' | '|' | '&' | '<' | '>' | '!' | '=') || c.is_whitespace()
    })
}

/// Build one wrapped expression from template text with `{}` slots.
///
/// ```
/// use ghaflow::core::context::github;
/// use ghaflow::core::expression::template::expr;
///
/// let check = expr("{} == {}", vec![github::ref_().into(), "main".into()]).unwrap();
/// assert_eq!(check.as_str(), "${{ github.ref == 'main' }}");
/// ```
pub fn expr(template: &str, values: Vec<ExprValue>) -> FlowResult<WorkflowExpr> {
    let parts: Vec<&str> = template.split(SLOT).collect();
    render(template, &parts, values)
}

/// Tagged-template form: `parts` surround the values, so
/// `parts.len() == values.len() + 1`.
pub fn expr_parts(parts: &[&str], values: Vec<ExprValue>) -> FlowResult<WorkflowExpr> {
    let template = parts.join(SLOT);
    render(&template, parts, values)
}

fn render(template: &str, parts: &[&str], values: Vec<ExprValue>) -> FlowResult<WorkflowExpr> {
    let slots = parts.len().saturating_sub(1);
    if values.len() > slots {
        return Err(FlowError::InterpolationCount {
            template: template.to_string(),
            expected: slots,
            got: values.len(),
        });
    }

    let mut inner = String::new();
    for (index, part) in parts.iter().enumerate() {
        inner.push_str(part);
        if index == slots {
            break;
        }
        let text = values
            .get(index)
            .map(ExprValue::interpolation_inner)
            .transpose()?
            .flatten()
            .ok_or_else(|| FlowError::UndefinedInterpolation {
                template: template.to_string(),
                index,
            })?;
        inner.push_str(&text);
    }
    wrap(&inner)
}

/// `expr!("{} && {}", a, b)` builds an expression from any [`ExprValue`] sources.
#[macro_export]
macro_rules! expr {
    ($template:expr $(, $value:expr)* $(,)?) => {
        $crate::core::expression::template::expr(
            $template,
            vec![$($crate::core::expression::template::ExprValue::from($value)),*],
        )
    };
}
