use ghaflow::context::{self, event, github, job, jobs, needs, runner, steps, strategy, PathProxy};
use ghaflow::core::expression::{is_token_path, FragmentKind};
use ghaflow::{expr, FlowError};

#[test]
fn test_every_static_leaf_is_a_valid_token() {
    let leaves = [
        github::sha(),
        github::ref_(),
        github::ref_name(),
        github::repository_url(),
        github::workspace(),
        github::event_name(),
        event::pull_request::head_ref(),
        event::pull_request::number(),
        event::merge_group::head_sha(),
        runner::os(),
        runner::temp(),
        job::status(),
        job::container_network(),
        strategy::job_index(),
        strategy::max_parallel(),
    ];
    for leaf in leaves {
        assert!(is_token_path(leaf.inner()), "{}", leaf.inner());
        assert_eq!(leaf.kind(), FragmentKind::Token);
    }
}

#[test]
fn test_leaf_paths_use_platform_spelling() {
    assert_eq!(github::repository_url().inner(), "github.repositoryUrl");
    assert_eq!(strategy::job_total().inner(), "strategy.job-total");
    assert_eq!(
        event::pull_request::base_sha().inner(),
        "github.event.pull_request.base.sha"
    );
    assert_eq!(job::services::ports("redis").unwrap().inner(), "job.services.redis.ports");
}

#[test]
fn test_output_accessors() {
    assert_eq!(
        steps::output("build", "digest").unwrap().inner(),
        "steps.build.outputs.digest"
    );
    assert_eq!(steps::outcome("lint").unwrap().inner(), "steps.lint.outcome");
    assert_eq!(needs::output("build", "version").unwrap().inner(), "needs.build.outputs.version");
    assert_eq!(needs::result("build").unwrap().inner(), "needs.build.result");
    assert_eq!(jobs::output("publish", "url").unwrap().inner(), "jobs.publish.outputs.url");
}

#[test]
fn test_dynamic_namespaces_insert_names_verbatim() {
    assert_eq!(context::env("RUST_LOG").unwrap().inner(), "env.RUST_LOG");
    assert_eq!(context::secrets("NPM_TOKEN").unwrap().inner(), "secrets.NPM_TOKEN");
    assert_eq!(context::vars("REGION").unwrap().inner(), "vars.REGION");
    assert_eq!(context::inputs("tag").unwrap().inner(), "inputs.tag");
    assert_eq!(context::matrix("toolchain").unwrap().inner(), "matrix.toolchain");
}

#[test]
fn test_dynamic_names_are_validated() {
    let err = context::env("").unwrap_err();
    assert!(matches!(err, FlowError::InvalidContextName { .. }));
    assert_eq!(err.code(), "GHA-EXPR-007");
    assert!(context::secrets("${{ x }}").is_err());
    assert!(context::inputs("tag }}").is_err());
    assert!(steps::output("build", "").is_err());
    assert!(jobs::result("a.b").is_err());
    assert!(github::event().get("").is_err());
    assert!(github::event().at("pull_request..labels").is_err());
}

#[test]
fn test_event_payload_proxy() {
    let labels = github::event()
        .at("pull_request.labels")
        .unwrap()
        .index(0)
        .get("name")
        .unwrap();
    assert_eq!(labels.path(), "github.event.pull_request.labels[0].name");
    assert_eq!(
        labels.wrap().unwrap().as_str(),
        "${{ github.event.pull_request.labels[0].name }}"
    );
}

#[test]
fn test_proxy_root_validates_namespace() {
    let inputs = PathProxy::root("inputs.config").unwrap();
    assert_eq!(inputs.get("region").unwrap().to_string(), "inputs.config.region");
    assert!(matches!(
        PathProxy::root("payload.config"),
        Err(FlowError::InvalidTokenPrefix { .. })
    ));
}

#[test]
fn test_context_values_interpolate_into_expressions() {
    let cond = expr!(
        "{} == {} && {}",
        github::event().at("pull_request.draft").unwrap(),
        false,
        needs::result("build").unwrap()
    )
    .unwrap();
    assert_eq!(
        cond.as_str(),
        "${{ github.event.pull_request.draft == false && needs.build.result }}"
    );
}
