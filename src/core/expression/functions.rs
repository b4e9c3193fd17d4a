//! Built-in expression functions of the CI platform.
//!
//! Every helper returns an unwrapped call fragment such as
//! `contains(github.ref, 'develop')`; string arguments go through the
//! argument heuristic described on [`ExprValue`].

use super::template::ExprValue;
use super::{raw, Fragment, FragmentKind};
use crate::core::error::{FlowError, FlowResult};
use regex::Regex;
use std::sync::OnceLock;

fn placeholder_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\{\d+\}").expect("placeholder pattern is valid"))
}

fn call(name: &str, args: &[String]) -> Fragment {
    Fragment::new(format!("{}({})", name, args.join(", ")), FragmentKind::Call)
}

fn argument(function: &str, value: impl Into<ExprValue>) -> FlowResult<String> {
    value
        .into()
        .argument_inner()?
        .ok_or_else(|| FlowError::MissingArgument {
            function: function.to_string(),
        })
}

fn arguments<I, V>(function: &str, values: I) -> FlowResult<Vec<String>>
where
    I: IntoIterator<Item = V>,
    V: Into<ExprValue>,
{
    values
        .into_iter()
        .map(|value| argument(function, value))
        .collect()
}

/// `always()`
pub fn always() -> Fragment {
    call("always", &[])
}

/// `success()`
pub fn success() -> Fragment {
    call("success", &[])
}

/// `failure()`
pub fn failure() -> Fragment {
    call("failure", &[])
}

/// `cancelled()`
pub fn cancelled() -> Fragment {
    call("cancelled", &[])
}

/// `contains(search, item)`
pub fn contains(search: impl Into<ExprValue>, item: impl Into<ExprValue>) -> FlowResult<Fragment> {
    let args = [argument("contains", search)?, argument("contains", item)?];
    Ok(call("contains", &args))
}

/// `startsWith(value, prefix)`
pub fn starts_with(value: impl Into<ExprValue>, prefix: impl Into<ExprValue>) -> FlowResult<Fragment> {
    let args = [argument("startsWith", value)?, argument("startsWith", prefix)?];
    Ok(call("startsWith", &args))
}

/// `endsWith(value, suffix)`
pub fn ends_with(value: impl Into<ExprValue>, suffix: impl Into<ExprValue>) -> FlowResult<Fragment> {
    let args = [argument("endsWith", value)?, argument("endsWith", suffix)?];
    Ok(call("endsWith", &args))
}

/// `format('<template>', values...)`; the template needs at least one `{N}`.
pub fn format<I, V>(template: &str, values: I) -> FlowResult<Fragment>
where
    I: IntoIterator<Item = V>,
    V: Into<ExprValue>,
{
    if !placeholder_pattern().is_match(template) {
        return Err(FlowError::MissingPlaceholder {
            template: template.to_string(),
        });
    }
    let mut args = vec![raw(template).into_inner()];
    args.extend(arguments("format", values)?);
    Ok(call("format", &args))
}

/// `join(array, 'separator')`, separator defaulting to `,`.
pub fn join(array: impl Into<ExprValue>, separator: Option<&str>) -> FlowResult<Fragment> {
    let args = [
        argument("join", array)?,
        raw(separator.unwrap_or(",")).into_inner(),
    ];
    Ok(call("join", &args))
}

/// `toJSON(value)`
pub fn to_json(value: impl Into<ExprValue>) -> FlowResult<Fragment> {
    Ok(call("toJSON", &[argument("toJSON", value)?]))
}

/// `fromJSON(value)`
pub fn from_json(value: impl Into<ExprValue>) -> FlowResult<Fragment> {
    Ok(call("fromJSON", &[argument("fromJSON", value)?]))
}

/// `hashFiles(paths...)`; at least one path is required.
pub fn hash_files<I, V>(paths: I) -> FlowResult<Fragment>
where
    I: IntoIterator<Item = V>,
    V: Into<ExprValue>,
{
    let args = arguments("hashFiles", paths)?;
    if args.is_empty() {
        return Err(FlowError::MissingArgument {
            function: "hashFiles".to_string(),
        });
    }
    Ok(call("hashFiles", &args))
}
