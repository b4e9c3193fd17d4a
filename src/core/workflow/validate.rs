//! Structural checks run before a workflow is serialised.
//!
//! Checks run in document order and stop at the first failure: triggers,
//! then each job (and its steps), then cross-job `needs` references.

use super::normalize::normalize_runs_on;
use super::schema::{Job, JobKind, Step, StepKind, Triggers, Workflow};
use crate::core::error::{FlowError, FlowResult};
use tracing::debug;

impl Workflow {
    pub fn validate(&self) -> FlowResult<()> {
        validate_workflow(self)
    }
}

pub fn validate_workflow(workflow: &Workflow) -> FlowResult<()> {
    validate_triggers(&workflow.on)?;
    for (job_id, job) in &workflow.jobs {
        validate_job(job_id, job)?;
    }
    validate_needs(workflow)?;
    debug!(
        workflow = %workflow.name,
        jobs = workflow.jobs.len(),
        "workflow passed validation"
    );
    Ok(())
}

pub fn validate_triggers(on: &Triggers) -> FlowResult<()> {
    let active = match on {
        Triggers::Event(name) => !name.trim().is_empty(),
        Triggers::Events(names) => names.iter().any(|name| !name.trim().is_empty()),
        Triggers::Spec(spec) => spec.has_active_trigger(),
    };
    if active {
        Ok(())
    } else {
        Err(FlowError::EmptyTriggerSet)
    }
}

pub fn validate_job(job_id: &str, job: &Job) -> FlowResult<()> {
    if job.steps.is_some() && job.uses.is_some() {
        return Err(FlowError::invalid_job(
            job_id,
            "cannot have both steps and uses",
        ));
    }
    match job.kind() {
        Some(JobKind::Runner) => validate_runner_job(job_id, job),
        Some(JobKind::ReusableCall) => validate_reusable_call(job_id, job),
        None => Err(FlowError::invalid_job(
            job_id,
            "must have steps (runner job) or uses (reusable workflow call)",
        )),
    }
}

fn validate_runner_job(job_id: &str, job: &Job) -> FlowResult<()> {
    let runs_on = job
        .runs_on
        .as_ref()
        .ok_or_else(|| FlowError::invalid_job(job_id, "runner job requires runs-on"))?;
    if normalize_runs_on(runs_on).is_none() {
        return Err(FlowError::invalid_job(
            job_id,
            "runs-on machine needs a group, labels or name",
        ));
    }
    if !job.with.is_empty() {
        return Err(FlowError::invalid_job(
            job_id,
            "with is only valid on reusable workflow calls",
        ));
    }
    if job.secrets.is_some() {
        return Err(FlowError::invalid_job(
            job_id,
            "secrets is only valid on reusable workflow calls",
        ));
    }

    let steps = job.steps.as_deref().unwrap_or_default();
    if steps.is_empty() {
        return Err(FlowError::invalid_job(
            job_id,
            "runner job must have at least one step",
        ));
    }
    for (index, step) in steps.iter().enumerate() {
        validate_step(job_id, index, step)?;
    }
    Ok(())
}

fn validate_reusable_call(job_id: &str, job: &Job) -> FlowResult<()> {
    let runner_only = [
        ("runs-on", job.runs_on.is_some()),
        ("environment", job.environment.is_some()),
        ("outputs", !job.outputs.is_empty()),
        ("defaults", job.defaults.is_some()),
        ("container", job.container.is_some()),
        ("services", !job.services.is_empty()),
    ];
    if let Some((field, _)) = runner_only.iter().find(|(_, present)| *present) {
        return Err(FlowError::invalid_job(
            job_id,
            format!("{} is not allowed on a reusable workflow call", field),
        ));
    }
    Ok(())
}

pub fn validate_step(job_id: &str, index: usize, step: &Step) -> FlowResult<()> {
    match step.kind() {
        Some(StepKind::Run) => {
            if !step.with.is_empty() {
                return Err(FlowError::invalid_step(
                    job_id,
                    index,
                    "with is only valid on uses steps",
                ));
            }
            Ok(())
        }
        Some(StepKind::Uses) => {
            if step.shell.is_some() {
                return Err(FlowError::invalid_step(
                    job_id,
                    index,
                    "shell is only valid on run steps",
                ));
            }
            if step.working_directory.is_some() {
                return Err(FlowError::invalid_step(
                    job_id,
                    index,
                    "working-directory is only valid on run steps",
                ));
            }
            Ok(())
        }
        None if step.run.is_some() => Err(FlowError::invalid_step(
            job_id,
            index,
            "cannot have both run and uses",
        )),
        None => Err(FlowError::invalid_step(
            job_id,
            index,
            "must have run or uses",
        )),
    }
}

fn validate_needs(workflow: &Workflow) -> FlowResult<()> {
    for (job_id, job) in &workflow.jobs {
        let Some(needs) = &job.needs else { continue };
        for name in needs.names() {
            if name == job_id {
                return Err(FlowError::invalid_job(job_id, "a job cannot need itself"));
            }
            if !workflow.jobs.contains_key(name) {
                return Err(FlowError::UnknownJobDependency {
                    job: job_id.clone(),
                    needs: name.to_string(),
                });
            }
        }
    }
    Ok(())
}
