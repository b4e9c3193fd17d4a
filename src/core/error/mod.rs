use std::fmt;
use std::path::PathBuf;

/// Broad grouping used when reporting authoring errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Expression,
    Validation,
    Serialization,
    Io,
    Config,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Every way building, validating or rendering a workflow can fail.
///
/// All of these are raised at the point of misuse and are never retried:
/// they describe a mistake in the workflow definition, not a transient
/// condition.
#[derive(Debug, thiserror::Error)]
pub enum FlowError {
    #[error("invalid token prefix in `{path}`: expected `<namespace>.<name>` with namespace one of {known}")]
    InvalidTokenPrefix { path: String, known: String },

    #[error("expression already wrapped: `{text}`. Did you mean to use `{inner}`? Use unwrap() to unwrap explicitly")]
    AlreadyWrapped { text: String, inner: String },

    #[error("cannot unwrap `{text}`: expression must start with \"${{{{ \" and end with \" }}}}\"")]
    MalformedExpression { text: String },

    #[error("cannot wrap an empty expression")]
    EmptyExpression,

    #[error("invalid name `{name}` under `{path}`: expected one non-empty path segment without whitespace, `.`, `${{{{` or `}}}}`")]
    InvalidContextName { path: String, name: String },

    #[error("interpolation #{index} in template `{template}` has no value")]
    UndefinedInterpolation { template: String, index: usize },

    #[error("template `{template}` has {expected} interpolation slot(s) but {got} value(s) were supplied")]
    InterpolationCount {
        template: String,
        expected: usize,
        got: usize,
    },

    #[error("format template `{template}` must contain placeholders like {{0}}")]
    MissingPlaceholder { template: String },

    #[error("{function}() requires at least one argument")]
    MissingArgument { function: String },

    #[error("invalid step (job={job} index={index}): {reason}")]
    InvalidStep {
        job: String,
        index: usize,
        reason: String,
    },

    #[error("invalid job `{job}`: {reason}")]
    InvalidJob { job: String, reason: String },

    #[error("job `{job}` needs unknown job `{needs}`")]
    UnknownJobDependency { job: String, needs: String },

    #[error("workflow `on` must specify at least one trigger")]
    EmptyTriggerSet,

    #[error("cannot load workflow definition {}: {message}", .path.display())]
    InvalidDefinition { path: PathBuf, message: String },

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration in {}: {message}", .path.display())]
    Config { path: PathBuf, message: String },
}

pub type FlowResult<T> = std::result::Result<T, FlowError>;

impl FlowError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            FlowError::InvalidTokenPrefix { .. }
            | FlowError::AlreadyWrapped { .. }
            | FlowError::MalformedExpression { .. }
            | FlowError::EmptyExpression
            | FlowError::InvalidContextName { .. }
            | FlowError::UndefinedInterpolation { .. }
            | FlowError::InterpolationCount { .. }
            | FlowError::MissingPlaceholder { .. }
            | FlowError::MissingArgument { .. } => ErrorCategory::Expression,
            FlowError::InvalidStep { .. }
            | FlowError::InvalidJob { .. }
            | FlowError::UnknownJobDependency { .. }
            | FlowError::EmptyTriggerSet
            | FlowError::InvalidDefinition { .. } => ErrorCategory::Validation,
            FlowError::Yaml(_) | FlowError::Json(_) => ErrorCategory::Serialization,
            FlowError::Io { .. } => ErrorCategory::Io,
            FlowError::Config { .. } => ErrorCategory::Config,
        }
    }

    /// Stable diagnostic code, e.g. `GHA-EXPR-002`.
    pub fn code(&self) -> &'static str {
        match self {
            FlowError::InvalidTokenPrefix { .. } => "GHA-EXPR-001",
            FlowError::AlreadyWrapped { .. } => "GHA-EXPR-002",
            FlowError::MalformedExpression { .. } => "GHA-EXPR-003",
            FlowError::EmptyExpression => "GHA-EXPR-004",
            FlowError::UndefinedInterpolation { .. } => "GHA-EXPR-005",
            FlowError::InterpolationCount { .. } => "GHA-EXPR-006",
            FlowError::InvalidContextName { .. } => "GHA-EXPR-007",
            FlowError::MissingPlaceholder { .. } => "GHA-FN-001",
            FlowError::MissingArgument { .. } => "GHA-FN-002",
            FlowError::InvalidStep { .. } => "GHA-WF-001",
            FlowError::InvalidJob { .. } => "GHA-WF-002",
            FlowError::UnknownJobDependency { .. } => "GHA-WF-003",
            FlowError::EmptyTriggerSet => "GHA-WF-004",
            FlowError::InvalidDefinition { .. } => "GHA-WF-005",
            FlowError::Yaml(_) => "GHA-RENDER-001",
            FlowError::Json(_) => "GHA-RENDER-002",
            FlowError::Io { .. } => "GHA-IO-001",
            FlowError::Config { .. } => "GHA-CONFIG-001",
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        FlowError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn invalid_step(job: &str, index: usize, reason: impl Into<String>) -> Self {
        FlowError::InvalidStep {
            job: job.to_string(),
            index,
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_job(job: &str, reason: impl Into<String>) -> Self {
        FlowError::InvalidJob {
            job: job.to_string(),
            reason: reason.into(),
        }
    }
}
