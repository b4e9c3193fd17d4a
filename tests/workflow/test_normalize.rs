use ghaflow::core::workflow::{
    Job, Labels, Machine, PushTrigger, RunnerSpec, RunsOn, Schedule, Step, TriggerSpec, Workflow,
};
use ghaflow::render::to_canonical;
use serde_yaml::Value;

fn yaml(text: &str) -> Value {
    serde_yaml::from_str(text).unwrap()
}

#[test]
fn test_schedule_list_becomes_cron_records() {
    let spec = TriggerSpec::default().with_schedule(Schedule::crons(["0 0 * * *", "30 6 * * 1"]));
    let value = serde_yaml::to_value(&spec).unwrap();
    assert_eq!(
        value,
        yaml("schedule:\n  - cron: '0 0 * * *'\n  - cron: '30 6 * * 1'\n")
    );
}

#[test]
fn test_schedule_forms_decode_to_the_same_records() {
    let forms = [
        "schedule:\n  - '0 0 * * *'\n  - '0 12 * * *'\n",
        "schedule:\n  - cron: '0 0 * * *'\n  - cron: '0 12 * * *'\n",
        "schedule:\n  cron:\n    - '0 0 * * *'\n    - '0 12 * * *'\n",
    ];
    let expected = yaml("schedule:\n  - cron: '0 0 * * *'\n  - cron: '0 12 * * *'\n");
    for form in forms {
        let spec: TriggerSpec = serde_yaml::from_str(form).unwrap();
        assert_eq!(serde_yaml::to_value(&spec).unwrap(), expected, "{}", form);
    }
}

#[test]
fn test_runs_on_machine_collapses_to_label() {
    let machine = Machine {
        name: Some("large".into()),
        group: None,
        labels: Some(Labels::Many(vec!["self-hosted".into(), "arm64".into()])),
    };
    let workflow = Workflow::new("CI", "push").with_job(
        "build",
        Job::runner(machine).with_step(Step::run("make")),
    );
    let canonical = to_canonical(&workflow).unwrap();
    assert_eq!(
        canonical["jobs"]["build"]["runs-on"],
        Value::String("self-hosted,arm64".into())
    );
}

#[test]
fn test_runs_on_list_mixes_labels_and_machines() {
    let runs_on = RunsOn::Many(vec![
        RunnerSpec::Label("ubuntu-latest".into()),
        RunnerSpec::Machine(Machine {
            group: Some("gpu".into()),
            ..Machine::default()
        }),
    ]);
    let value = serde_yaml::to_value(&runs_on).unwrap();
    assert_eq!(value, yaml("[ubuntu-latest, gpu]"));
}

#[test]
fn test_empty_machine_fails_to_serialise() {
    let runs_on = RunsOn::Machine(Machine::default());
    let err = serde_yaml::to_value(&runs_on).unwrap_err();
    assert!(err.to_string().contains("group, labels or name"));
}

#[test]
fn test_push_filters_use_kebab_case() {
    let mut push = PushTrigger::branches(["main"]);
    push.paths_ignore = vec!["docs/**".into()];
    let value = serde_yaml::to_value(TriggerSpec::default().with_push(push)).unwrap();
    assert_eq!(
        value,
        yaml("push:\n  branches: [main]\n  paths-ignore: ['docs/**']\n")
    );
}

#[test]
fn test_bare_trigger_keys_are_active() {
    let spec: TriggerSpec = serde_yaml::from_str("workflow_dispatch:\nfork:\n").unwrap();
    assert!(spec.has_active_trigger());
    assert_eq!(
        serde_yaml::to_value(&spec).unwrap(),
        yaml("workflow_dispatch: {}\nfork: null\n")
    );
}
