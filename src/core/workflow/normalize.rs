//! Authoring shorthands collapsed to the form the CI platform reads.

use super::schema::{CronEntry, Labels, Machine, RunnerSpec, RunsOn, Schedule};
use serde::Serialize;

/// Normalised `runs-on` value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum RunnerLabel {
    One(String),
    Many(Vec<String>),
}

/// Collapse a machine reference to one label: the group wins, then the
/// labels joined with `,`, then the name. `None` when all are missing.
pub fn machine_label(machine: &Machine) -> Option<String> {
    let labels = machine.labels.as_ref().map(|labels| match labels {
        Labels::One(label) => label.clone(),
        Labels::Many(labels) => labels.join(","),
    });
    machine
        .group
        .clone()
        .or(labels)
        .or_else(|| machine.name.clone())
        .filter(|label| !label.is_empty())
}

/// `None` when any machine in the value has nothing to collapse to.
pub fn normalize_runs_on(runs_on: &RunsOn) -> Option<RunnerLabel> {
    match runs_on {
        RunsOn::Label(label) => Some(RunnerLabel::One(label.clone())),
        RunsOn::Machine(machine) => machine_label(machine).map(RunnerLabel::One),
        RunsOn::Many(specs) => specs
            .iter()
            .map(|spec| match spec {
                RunnerSpec::Label(label) => Some(label.clone()),
                RunnerSpec::Machine(machine) => machine_label(machine),
            })
            .collect::<Option<Vec<_>>>()
            .map(RunnerLabel::Many),
    }
}

/// Every schedule form becomes a list of `{cron}` records, order kept.
pub fn normalize_schedule(schedule: &Schedule) -> Vec<CronEntry> {
    match schedule {
        Schedule::Crons(crons) | Schedule::Wrapped { cron: crons } => crons
            .iter()
            .map(|cron| CronEntry { cron: cron.clone() })
            .collect(),
        Schedule::Entries(entries) => entries.clone(),
    }
}
