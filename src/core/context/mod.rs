//! Typed accessors for the runtime contexts the CI platform exposes to
//! expressions.
//!
//! Every accessor is a pure function returning a token [`Fragment`] bound to
//! a dotted path, e.g. `github::sha()` is `github.sha` and
//! `steps::output("build", "digest")` is `steps.build.outputs.digest`.
//! Caller supplied names are path segments, not literals. They are inserted
//! verbatim once checked to be a single non-empty segment, so the dynamic
//! accessors return [`FlowResult`].

pub mod path;

pub use path::PathProxy;

use crate::core::error::{FlowError, FlowResult};
use crate::core::expression::{Fragment, OPEN};

macro_rules! leaves {
    ($prefix:literal { $($(#[$meta:meta])* $name:ident => $field:literal,)* }) => {
        $(
            $(#[$meta])*
            pub fn $name() -> Fragment {
                Fragment::context(concat!($prefix, ".", $field))
            }
        )*
    };
}

/// `<parent>.<name>`, provided `name` is one path segment.
pub(crate) fn child_path(parent: &str, name: &str) -> FlowResult<String> {
    let invalid = name.is_empty()
        || name.contains(OPEN)
        || name.contains("}}")
        || name.contains(|c: char| c == '.' || c.is_whitespace());
    if invalid {
        return Err(FlowError::InvalidContextName {
            path: parent.to_string(),
            name: name.to_string(),
        });
    }
    Ok(format!("{}.{}", parent, name))
}

fn member(prefix: &str, names: &[&str]) -> FlowResult<Fragment> {
    let path = names
        .iter()
        .try_fold(prefix.to_string(), |path, name| child_path(&path, name))?;
    Ok(Fragment::context(path))
}

/// `env.<name>`
pub fn env(name: &str) -> FlowResult<Fragment> {
    member("env", &[name])
}

/// `secrets.<name>`
pub fn secrets(name: &str) -> FlowResult<Fragment> {
    member("secrets", &[name])
}

/// `vars.<name>`
pub fn vars(name: &str) -> FlowResult<Fragment> {
    member("vars", &[name])
}

/// `inputs.<name>`
pub fn inputs(name: &str) -> FlowResult<Fragment> {
    member("inputs", &[name])
}

/// `matrix.<name>`
pub fn matrix(name: &str) -> FlowResult<Fragment> {
    member("matrix", &[name])
}

/// Workflow run metadata (`github.*`).
pub mod github {
    use super::{Fragment, PathProxy};

    leaves!("github" {
        action => "action",
        /// Composite actions only.
        action_path => "action_path",
        action_ref => "action_ref",
        action_repository => "action_repository",
        action_status => "action_status",
        actor => "actor",
        actor_id => "actor_id",
        api_url => "api_url",
        base_ref => "base_ref",
        env => "env",
        event_name => "event_name",
        event_path => "event_path",
        graphql_url => "graphql_url",
        head_ref => "head_ref",
        job => "job",
        path => "path",
        ref_ => "ref",
        ref_name => "ref_name",
        ref_protected => "ref_protected",
        ref_type => "ref_type",
        repository => "repository",
        repository_id => "repository_id",
        repository_owner => "repository_owner",
        repository_owner_id => "repository_owner_id",
        repository_url => "repositoryUrl",
        retention_days => "retention_days",
        run_id => "run_id",
        run_number => "run_number",
        run_attempt => "run_attempt",
        secret_source => "secret_source",
        server_url => "server_url",
        sha => "sha",
        token => "token",
        triggering_actor => "triggering_actor",
        workflow => "workflow",
        workflow_ref => "workflow_ref",
        workflow_sha => "workflow_sha",
        workspace => "workspace",
    });

    /// Root of the triggering event payload, `github.event`.
    pub fn event() -> PathProxy {
        PathProxy::new("github.event")
    }
}

/// Well-known event payload fields under `github.event`.
pub mod event {
    /// `github.event.pull_request.*`
    pub mod pull_request {
        use crate::core::expression::Fragment;

        leaves!("github.event.pull_request" {
            title => "title",
            number => "number",
            body => "body",
            draft => "draft",
            head_ref => "head.ref",
            head_sha => "head.sha",
            base_ref => "base.ref",
            base_sha => "base.sha",
        });
    }

    /// `github.event.merge_group.*`
    pub mod merge_group {
        use crate::core::expression::Fragment;

        leaves!("github.event.merge_group" {
            head_ref => "head_ref",
            base_ref => "base_ref",
            head_sha => "head_sha",
            base_sha => "base_sha",
        });
    }
}

/// Runner host information (`runner.*`).
pub mod runner {
    use super::Fragment;

    leaves!("runner" {
        name => "name",
        os => "os",
        arch => "arch",
        temp => "temp",
        tool_cache => "tool_cache",
        debug => "debug",
        environment => "environment",
    });
}

/// Current job information (`job.*`).
pub mod job {
    use super::Fragment;

    leaves!("job" {
        status => "status",
        container => "container",
        container_id => "container.id",
        container_network => "container.network",
    });

    /// `job.services.<service>.*`
    pub mod services {
        use super::super::member;
        use crate::core::error::FlowResult;
        use crate::core::expression::Fragment;

        pub fn id(service: &str) -> FlowResult<Fragment> {
            member("job.services", &[service, "id"])
        }

        pub fn network(service: &str) -> FlowResult<Fragment> {
            member("job.services", &[service, "network"])
        }

        pub fn ports(service: &str) -> FlowResult<Fragment> {
            member("job.services", &[service, "ports"])
        }
    }
}

/// Matrix strategy information (`strategy.*`).
pub mod strategy {
    use super::Fragment;

    leaves!("strategy" {
        fail_fast => "fail-fast",
        job_index => "job-index",
        job_total => "job-total",
        max_parallel => "max-parallel",
    });
}

/// Earlier steps of the current job (`steps.<id>.*`).
pub mod steps {
    use super::{member, FlowResult, Fragment};

    pub fn output(step: &str, name: &str) -> FlowResult<Fragment> {
        member("steps", &[step, "outputs", name])
    }

    pub fn outcome(step: &str) -> FlowResult<Fragment> {
        member("steps", &[step, "outcome"])
    }

    pub fn conclusion(step: &str) -> FlowResult<Fragment> {
        member("steps", &[step, "conclusion"])
    }
}

/// Jobs the current job depends on (`needs.<job>.*`).
pub mod needs {
    use super::{member, FlowResult, Fragment};

    pub fn output(job: &str, name: &str) -> FlowResult<Fragment> {
        member("needs", &[job, "outputs", name])
    }

    pub fn result(job: &str) -> FlowResult<Fragment> {
        member("needs", &[job, "result"])
    }
}

/// Jobs of a called workflow (`jobs.<job>.*`), available in `workflow_call` outputs.
pub mod jobs {
    use super::{member, FlowResult, Fragment};

    pub fn output(job: &str, name: &str) -> FlowResult<Fragment> {
        member("jobs", &[job, "outputs", name])
    }

    pub fn result(job: &str) -> FlowResult<Fragment> {
        member("jobs", &[job, "result"])
    }
}
