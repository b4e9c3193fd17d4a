use ghaflow::core::workflow::{Inherit, Job, SecretsSpec, Step, Triggers, TriggerSpec, Workflow};
use ghaflow::FlowError;
use std::fs;
use tempfile::TempDir;

fn checkout() -> Step {
    Step::uses("actions/checkout@v4")
}

#[test]
fn test_step_exclusivity_reports_job_and_index() {
    let mut broken = Step::run("make");
    broken.uses = Some("actions/cache@v4".into());

    for (job_id, index) in [("build", 0usize), ("lint", 2), ("release-notes", 5)] {
        let mut job = Job::runner("ubuntu-latest");
        for _ in 0..index {
            job = job.with_step(checkout());
        }
        job = job.with_step(broken.clone());
        let workflow = Workflow::new("CI", "push").with_job(job_id, job);

        let err = workflow.validate().unwrap_err();
        match err {
            FlowError::InvalidStep { ref job, index: at, .. } => {
                assert_eq!(job, job_id);
                assert_eq!(at, index);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(
            err.to_string(),
            format!("invalid step (job={} index={}): cannot have both run and uses", job_id, index)
        );
    }
}

#[test]
fn test_step_with_neither_run_nor_uses() {
    let workflow = Workflow::new("CI", "push").with_job(
        "build",
        Job::runner("ubuntu-latest")
            .with_step(checkout())
            .with_step(Step::default().with_name("nothing")),
    );
    let err = workflow.validate().unwrap_err();
    assert_eq!(
        err.to_string(),
        "invalid step (job=build index=1): must have run or uses"
    );
}

#[test]
fn test_uses_step_rejects_run_only_fields() {
    let workflow = Workflow::new("CI", "push").with_job(
        "build",
        Job::runner("ubuntu-latest").with_step(checkout().with_shell("bash")),
    );
    assert!(workflow
        .validate()
        .unwrap_err()
        .to_string()
        .contains("shell is only valid on run steps"));
}

#[test]
fn test_first_failing_job_wins() {
    let workflow = Workflow::new("CI", "push")
        .with_job("a", Job::runner("ubuntu-latest").with_step(checkout()))
        .with_job("b", Job::runner("ubuntu-latest").with_step(Step::default()))
        .with_job("c", Job::default());
    let err = workflow.validate().unwrap_err();
    assert!(matches!(err, FlowError::InvalidStep { ref job, .. } if job == "b"));
}

#[test]
fn test_runner_job_without_steps() {
    let workflow = Workflow::new("CI", "push").with_job("build", Job::runner("ubuntu-latest"));
    assert_eq!(
        workflow.validate().unwrap_err().to_string(),
        "invalid job `build`: runner job must have at least one step"
    );
}

#[test]
fn test_reusable_call_shape() {
    let call = Job::call("octo/shared/.github/workflows/release.yml@v2")
        .with_input("version", "1.2.3")
        .with_secrets(SecretsSpec::Inherit(Inherit::Inherit));
    let workflow = Workflow::new("Release", "workflow_dispatch").with_job("release", call.clone());
    assert!(workflow.validate().is_ok());

    let workflow = Workflow::new("Release", "workflow_dispatch")
        .with_job("release", call.with_environment("production"));
    assert!(matches!(workflow.validate(), Err(FlowError::InvalidJob { .. })));
}

#[test]
fn test_runner_job_rejects_call_inputs() {
    let workflow = Workflow::new("CI", "push").with_job(
        "build",
        Job::runner("ubuntu-latest")
            .with_input("target", "x86_64")
            .with_step(checkout()),
    );
    assert!(workflow
        .validate()
        .unwrap_err()
        .to_string()
        .contains("with is only valid on reusable workflow calls"));
}

#[test]
fn test_empty_triggers() {
    for on in [
        Triggers::Event(" ".into()),
        Triggers::Events(vec![]),
        Triggers::Spec(Box::new(TriggerSpec::default())),
    ] {
        let mut workflow = Workflow::new("CI", "push")
            .with_job("build", Job::runner("ubuntu-latest").with_step(checkout()));
        workflow.on = on;
        assert!(matches!(workflow.validate(), Err(FlowError::EmptyTriggerSet)));
    }
}

#[test]
fn test_needs_must_name_existing_jobs() {
    let workflow = Workflow::new("CI", "push")
        .with_job("build", Job::runner("ubuntu-latest").with_step(checkout()))
        .with_job(
            "deploy",
            Job::runner("ubuntu-latest")
                .with_needs("publish")
                .with_step(checkout()),
        );
    assert_eq!(
        workflow.validate().unwrap_err().to_string(),
        "job `deploy` needs unknown job `publish`"
    );

    let workflow = Workflow::new("CI", "push").with_job(
        "loop",
        Job::runner("ubuntu-latest").with_needs("loop").with_step(checkout()),
    );
    assert!(workflow.validate().unwrap_err().to_string().contains("cannot need itself"));
}

#[test]
fn test_load_from_file_validates_definition() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("ci.yml");
    fs::write(
        &path,
        "name: CI\non: push\njobs:\n  build:\n    runs-on: ubuntu-latest\n    steps:\n      - run: make\n        uses: actions/checkout@v4\n",
    )
    .unwrap();
    let err = Workflow::load_from_file(&path).unwrap_err();
    assert!(matches!(err, FlowError::InvalidStep { index: 0, .. }));
}

#[test]
fn test_load_from_file_rejects_unknown_keys() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("ci.yml");
    fs::write(&path, "name: CI\non: push\ntypo: true\njobs: {}\n").unwrap();
    let err = Workflow::load_from_file(&path).unwrap_err();
    assert!(matches!(err, FlowError::InvalidDefinition { .. }));
    assert!(err.to_string().contains("ci.yml"));
}

#[test]
fn test_load_from_missing_file() {
    let err = Workflow::load_from_file(std::path::Path::new("/nonexistent/ci.yml")).unwrap_err();
    assert!(matches!(err, FlowError::Io { .. }));
}
