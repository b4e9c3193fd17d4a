use super::child_path;
use crate::core::error::FlowResult;
use crate::core::expression::template::ExprValue;
use crate::core::expression::{token, Fragment, WorkflowExpr};
use std::fmt;

/// Open-ended path builder for payload-shaped data such as `github.event`.
///
/// Any single-segment member name is accepted, so nothing here checks the
/// path against the real payload shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PathProxy {
    path: String,
}

impl PathProxy {
    pub(crate) fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    /// Start a tree at an arbitrary context path; the namespace is validated.
    pub fn root(path: &str) -> FlowResult<Self> {
        token(path)?;
        Ok(Self::new(path))
    }

    /// One level deeper: `<path>.<name>`.
    pub fn get(&self, name: &str) -> FlowResult<PathProxy> {
        Ok(PathProxy::new(child_path(&self.path, name)?))
    }

    /// Several levels deeper at once, `at("pull_request.head.ref")`. Every
    /// dotted segment must be non-empty.
    pub fn at(&self, dotted: &str) -> FlowResult<PathProxy> {
        dotted
            .split('.')
            .try_fold(self.clone(), |proxy, segment| proxy.get(segment))
    }

    /// Array element: `<path>[index]`.
    pub fn index(&self, index: usize) -> PathProxy {
        PathProxy::new(format!("{}[{}]", self.path, index))
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn fragment(&self) -> Fragment {
        Fragment::context(self.path.clone())
    }

    pub fn wrap(&self) -> FlowResult<WorkflowExpr> {
        self.fragment().wrap()
    }
}

impl fmt::Display for PathProxy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)
    }
}

impl From<PathProxy> for Fragment {
    fn from(proxy: PathProxy) -> Self {
        proxy.fragment()
    }
}

impl From<&PathProxy> for Fragment {
    fn from(proxy: &PathProxy) -> Self {
        proxy.fragment()
    }
}

impl From<PathProxy> for ExprValue {
    fn from(proxy: PathProxy) -> Self {
        ExprValue::Fragment(proxy.fragment())
    }
}

impl From<&PathProxy> for ExprValue {
    fn from(proxy: &PathProxy) -> Self {
        ExprValue::Fragment(proxy.fragment())
    }
}
