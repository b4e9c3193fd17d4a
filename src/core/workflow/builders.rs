//! Chained constructors for workflow documents.
//!
//! ```
//! use ghaflow::core::workflow::{Job, Step, Workflow};
//!
//! let workflow = Workflow::new("CI", ["push", "pull_request"]).with_job(
//!     "test",
//!     Job::runner("ubuntu-latest")
//!         .with_step(Step::uses("actions/checkout@v4"))
//!         .with_step(Step::run("cargo test")),
//! );
//! assert!(workflow.validate().is_ok());
//! ```

use super::schema::{
    Concurrency, Container, Count, Defaults, Environment, Flag, Job, Needs, Permissions,
    PullRequestTrigger, PushTrigger, RunsOn, Schedule, SecretsSpec, Step, Strategy, TriggerSpec,
    Triggers, Workflow, WorkflowDispatch,
};
use crate::core::expression::WorkflowExpr;
use indexmap::IndexMap;
use serde_yaml::Value;

impl From<WorkflowExpr> for Value {
    fn from(expr: WorkflowExpr) -> Self {
        Value::String(expr.into())
    }
}

impl From<&str> for Triggers {
    fn from(event: &str) -> Self {
        Triggers::Event(event.to_string())
    }
}

impl From<String> for Triggers {
    fn from(event: String) -> Self {
        Triggers::Event(event)
    }
}

impl From<Vec<String>> for Triggers {
    fn from(events: Vec<String>) -> Self {
        Triggers::Events(events)
    }
}

impl From<Vec<&str>> for Triggers {
    fn from(events: Vec<&str>) -> Self {
        Triggers::Events(events.into_iter().map(str::to_string).collect())
    }
}

impl<const N: usize> From<[&str; N]> for Triggers {
    fn from(events: [&str; N]) -> Self {
        Triggers::Events(events.into_iter().map(str::to_string).collect())
    }
}

impl From<TriggerSpec> for Triggers {
    fn from(spec: TriggerSpec) -> Self {
        Triggers::Spec(Box::new(spec))
    }
}

impl From<&str> for Needs {
    fn from(job: &str) -> Self {
        Needs::One(job.to_string())
    }
}

impl From<Vec<String>> for Needs {
    fn from(jobs: Vec<String>) -> Self {
        Needs::Many(jobs)
    }
}

impl<const N: usize> From<[&str; N]> for Needs {
    fn from(jobs: [&str; N]) -> Self {
        Needs::Many(jobs.into_iter().map(str::to_string).collect())
    }
}

impl From<&str> for Concurrency {
    fn from(group: &str) -> Self {
        Concurrency::Group(group.to_string())
    }
}

impl From<WorkflowExpr> for Concurrency {
    fn from(group: WorkflowExpr) -> Self {
        Concurrency::Group(group.into())
    }
}

impl From<&str> for Environment {
    fn from(name: &str) -> Self {
        Environment::Name(name.to_string())
    }
}

impl From<&str> for Container {
    fn from(image: &str) -> Self {
        Container::Image(image.to_string())
    }
}

fn strings<I, S>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    items.into_iter().map(Into::into).collect()
}

impl Workflow {
    pub fn new(name: impl Into<String>, on: impl Into<Triggers>) -> Self {
        Self {
            name: name.into(),
            run_name: None,
            on: on.into(),
            env: IndexMap::new(),
            permissions: None,
            concurrency: None,
            defaults: None,
            jobs: IndexMap::new(),
        }
    }

    pub fn with_run_name(mut self, run_name: impl Into<String>) -> Self {
        self.run_name = Some(run_name.into());
        self
    }

    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    pub fn with_permissions(mut self, permissions: Permissions) -> Self {
        self.permissions = Some(permissions);
        self
    }

    pub fn with_concurrency(mut self, concurrency: impl Into<Concurrency>) -> Self {
        self.concurrency = Some(concurrency.into());
        self
    }

    pub fn with_defaults(mut self, defaults: Defaults) -> Self {
        self.defaults = Some(defaults);
        self
    }

    /// Adds or replaces the job with this id; insertion order is kept.
    pub fn with_job(mut self, id: impl Into<String>, job: Job) -> Self {
        self.jobs.insert(id.into(), job);
        self
    }
}

impl TriggerSpec {
    pub fn with_push(mut self, push: PushTrigger) -> Self {
        self.push = Some(push);
        self
    }

    pub fn with_pull_request(mut self, pull_request: PullRequestTrigger) -> Self {
        self.pull_request = Some(pull_request);
        self
    }

    pub fn with_schedule(mut self, schedule: Schedule) -> Self {
        self.schedule = Some(schedule);
        self
    }

    pub fn with_workflow_dispatch(mut self, dispatch: WorkflowDispatch) -> Self {
        self.workflow_dispatch = Some(dispatch);
        self
    }

    /// Any event without a dedicated field, e.g. `("fork", Value::Null)`.
    pub fn with_event(mut self, event: impl Into<String>, settings: impl Into<Value>) -> Self {
        self.other.insert(event.into(), settings.into());
        self
    }
}

impl PushTrigger {
    pub fn branches<I, S>(branches: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            branches: strings(branches),
            ..Self::default()
        }
    }

    pub fn tags<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tags: strings(tags),
            ..Self::default()
        }
    }
}

impl PullRequestTrigger {
    pub fn branches<I, S>(branches: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            branches: strings(branches),
            ..Self::default()
        }
    }
}

impl Schedule {
    pub fn crons<I, S>(crons: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Schedule::Crons(strings(crons))
    }
}

impl Job {
    /// Runner job with no steps yet.
    pub fn runner(runs_on: impl Into<RunsOn>) -> Self {
        Self {
            runs_on: Some(runs_on.into()),
            steps: Some(Vec::new()),
            ..Self::default()
        }
    }

    /// Job that calls a reusable workflow.
    pub fn call(workflow: impl Into<String>) -> Self {
        Self {
            uses: Some(workflow.into()),
            ..Self::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_needs(mut self, needs: impl Into<Needs>) -> Self {
        self.needs = Some(needs.into());
        self
    }

    pub fn with_condition(mut self, condition: impl Into<String>) -> Self {
        self.condition = Some(condition.into());
        self
    }

    pub fn with_permissions(mut self, permissions: Permissions) -> Self {
        self.permissions = Some(permissions);
        self
    }

    pub fn with_environment(mut self, environment: impl Into<Environment>) -> Self {
        self.environment = Some(environment.into());
        self
    }

    pub fn with_concurrency(mut self, concurrency: impl Into<Concurrency>) -> Self {
        self.concurrency = Some(concurrency.into());
        self
    }

    pub fn with_output(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.outputs.insert(name.into(), value.into());
        self
    }

    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    pub fn with_defaults(mut self, defaults: Defaults) -> Self {
        self.defaults = Some(defaults);
        self
    }

    pub fn with_timeout_minutes(mut self, minutes: impl Into<Count>) -> Self {
        self.timeout_minutes = Some(minutes.into());
        self
    }

    pub fn with_continue_on_error(mut self, flag: impl Into<Flag>) -> Self {
        self.continue_on_error = Some(flag.into());
        self
    }

    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = Some(strategy);
        self
    }

    pub fn with_container(mut self, container: impl Into<Container>) -> Self {
        self.container = Some(container.into());
        self
    }

    pub fn with_service(mut self, name: impl Into<String>, service: impl Into<Container>) -> Self {
        self.services.insert(name.into(), service.into());
        self
    }

    /// Input passed to the called workflow.
    pub fn with_input(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.with.insert(name.into(), value.into());
        self
    }

    pub fn with_secrets(mut self, secrets: SecretsSpec) -> Self {
        self.secrets = Some(secrets);
        self
    }

    /// Appends a step, turning the job into a runner job if it was not one.
    pub fn with_step(mut self, step: Step) -> Self {
        self.steps.get_or_insert_with(Vec::new).push(step);
        self
    }
}

impl Step {
    /// Shell step. Multi-line scripts are emitted as block literals.
    pub fn run(script: impl Into<String>) -> Self {
        Self {
            run: Some(script.into()),
            ..Self::default()
        }
    }

    pub fn uses(action: impl Into<String>) -> Self {
        Self {
            uses: Some(action.into()),
            ..Self::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_condition(mut self, condition: impl Into<String>) -> Self {
        self.condition = Some(condition.into());
        self
    }

    pub fn with_input(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.with.insert(name.into(), value.into());
        self
    }

    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    pub fn with_shell(mut self, shell: impl Into<String>) -> Self {
        self.shell = Some(shell.into());
        self
    }

    pub fn with_working_directory(mut self, directory: impl Into<String>) -> Self {
        self.working_directory = Some(directory.into());
        self
    }

    pub fn with_continue_on_error(mut self, flag: impl Into<Flag>) -> Self {
        self.continue_on_error = Some(flag.into());
        self
    }

    pub fn with_timeout_minutes(mut self, minutes: impl Into<Count>) -> Self {
        self.timeout_minutes = Some(minutes.into());
        self
    }
}
