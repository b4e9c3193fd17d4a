//! Workflow object model: schema types, builders, normalisation and the
//! structural validator.

pub mod builders;
pub mod normalize;
pub mod schema;
pub mod validate;

pub use normalize::{machine_label, normalize_runs_on, normalize_schedule, RunnerLabel};
pub use schema::{
    CallOutput, CallSecret, Concurrency, ConcurrencySpec, Container, ContainerSpec, Count,
    CronEntry, Credentials, Defaults, EnvMap, Environment, EnvironmentSpec, Flag, Inherit,
    InputType, Job, JobKind, Labels, Machine, Matrix, Needs, Permissions, PermissionLevel,
    PermissionsAll, Port, PullRequestTrigger, PushTrigger, RunDefaults, RunnerSpec, RunsOn,
    Schedule, SecretsSpec, Step, StepKind, Strategy, TriggerSpec, Triggers, TypesTrigger, Workflow,
    WorkflowCall, WorkflowDispatch, WorkflowInput, WorkflowRun,
};
pub use validate::{validate_job, validate_step, validate_triggers, validate_workflow};
