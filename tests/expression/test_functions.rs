use ghaflow::context::{github, runner};
use ghaflow::{expr, fns, raw, token, FlowError};

#[test]
fn test_contains_quotes_plain_item() {
    let fragment = fns::contains(token("github.ref").unwrap(), "develop").unwrap();
    assert_eq!(fragment.inner(), "contains(github.ref, 'develop')");
}

#[test]
fn test_format_without_placeholder_fails() {
    let err = fns::format("no placeholder", ["x"]).unwrap_err();
    assert!(matches!(err, FlowError::MissingPlaceholder { ref template } if template == "no placeholder"));
}

#[test]
fn test_format_quotes_template_and_passes_tokens() {
    let fragment = fns::format("{0}-{1}", [github::ref_name(), runner::os()]).unwrap();
    assert_eq!(fragment.inner(), "format('{0}-{1}', github.ref_name, runner.os)");
}

#[test]
fn test_string_prefix_helpers() {
    assert_eq!(
        fns::starts_with(github::ref_(), "refs/tags/").unwrap().inner(),
        "startsWith(github.ref, 'refs/tags/')"
    );
    assert_eq!(
        fns::ends_with(github::head_ref(), raw("-rc")).unwrap().inner(),
        "endsWith(github.head_ref, '-rc')"
    );
}

#[test]
fn test_join_default_separator() {
    let labels = github::event().at("pull_request.labels.*.name").unwrap();
    assert_eq!(
        fns::join(&labels, None).unwrap().inner(),
        "join(github.event.pull_request.labels.*.name, ',')"
    );
    assert_eq!(
        fns::join(&labels, Some(" | ")).unwrap().inner(),
        "join(github.event.pull_request.labels.*.name, ' | ')"
    );
}

#[test]
fn test_json_helpers_nest() {
    let parsed = fns::from_json(fns::to_json(github::event()).unwrap()).unwrap();
    assert_eq!(parsed.inner(), "fromJSON(toJSON(github.event))");
}

#[test]
fn test_hash_files_requires_a_path() {
    assert_eq!(
        fns::hash_files(["**/Cargo.lock", "rust-toolchain.toml"]).unwrap().inner(),
        "hashFiles('**/Cargo.lock', 'rust-toolchain.toml')"
    );
    let none: [&str; 0] = [];
    assert!(matches!(
        fns::hash_files(none),
        Err(FlowError::MissingArgument { ref function }) if function == "hashFiles"
    ));
}

#[test]
fn test_missing_argument_reports_function() {
    let absent: Option<&str> = None;
    let err = fns::contains(github::ref_(), absent).unwrap_err();
    assert_eq!(err.to_string(), "contains() requires at least one argument");
}

#[test]
fn test_status_functions_compose_into_conditions() {
    let cond = expr!("{} || {}", fns::failure(), fns::cancelled()).unwrap();
    assert_eq!(cond.as_str(), "${{ failure() || cancelled() }}");
    assert_eq!((!fns::cancelled()).inner(), "!cancelled()");
}
