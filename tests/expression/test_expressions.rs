use ghaflow::core::expression::{is_token_path, FragmentKind, TOKEN_PREFIXES};
use ghaflow::{expr, raw, token, unwrap, wrap, ExprValue, FlowError, Fragment, WorkflowExpr};
use insta::assert_snapshot;

#[test]
fn test_single_token_expression() {
    let out = expr("{}", vec![token("github.sha").unwrap().into()]).unwrap();
    assert_eq!(out.as_str(), "${{ github.sha }}");
}

#[test]
fn test_bare_string_is_auto_quoted() {
    let out = expr("github.ref_name == {}", vec!["main".into()]).unwrap();
    assert_eq!(out.as_str(), "${{ github.ref_name == 'main' }}");
}

#[test]
fn test_wrap_unwrap_round_trip_for_many_inners() {
    let inners = [
        "github.ref",
        "a && b",
        "contains(github.event.pull_request.labels.*.name, 'ci')",
        "format('{0}', github.sha)",
        "!cancelled()",
        "x}",
    ];
    for inner in inners {
        let wrapped = wrap(inner).unwrap();
        assert_eq!(unwrap(wrapped.as_str()).unwrap(), inner);
    }
}

#[test]
fn test_double_wrap_is_rejected() {
    for text in ["${{ x }}", "prefix ${{ github.ref }}", "${{"] {
        let err = wrap(text).unwrap_err();
        assert!(matches!(err, FlowError::AlreadyWrapped { .. }), "{}", text);
    }
    let err = wrap("${{ github.ref }}").unwrap_err();
    assert!(err.to_string().contains("github.ref"));
    assert!(err.to_string().contains("unwrap"));
}

#[test]
fn test_wrap_trims_and_rejects_blank() {
    assert_eq!(wrap("  github.ref \n").unwrap().as_str(), "${{ github.ref }}");
    assert!(matches!(wrap("   "), Err(FlowError::EmptyExpression)));
}

#[test]
fn test_unwrap_requires_exact_shape() {
    for text in ["github.ref", "${{github.ref}}", "${{ github.ref}}", "${{  }}x", "${{ }}"] {
        assert!(
            matches!(unwrap(text), Err(FlowError::MalformedExpression { .. })),
            "{}",
            text
        );
    }
    assert_eq!(unwrap("${{  }}").unwrap(), "");
}

#[test]
fn test_token_prefix_validation() {
    let err = token("notaprefix.foo").unwrap_err();
    assert!(matches!(err, FlowError::InvalidTokenPrefix { .. }));
    assert!(err.to_string().contains("notaprefix.foo"));
    assert_eq!(token("secrets.FOO").unwrap().inner(), "secrets.FOO");
    for prefix in TOKEN_PREFIXES {
        assert!(is_token_path(&format!("{}.x", prefix)));
        assert!(!is_token_path(prefix));
        assert!(!is_token_path(&format!("{}.", prefix)));
        assert!(!is_token_path(&format!("{}..x", prefix)));
        assert!(!is_token_path(&format!("{}.x.", prefix)));
    }
    assert!(token("github..x").is_err());
    assert!(token("github.event.").is_err());
}

#[test]
fn test_raw_doubles_quotes() {
    let literal = raw("it's");
    assert_eq!(literal.inner(), "'it''s'");
    assert_eq!(literal.kind(), FragmentKind::Literal);
}

#[test]
fn test_combinators_parenthesise_composed_operands() {
    let is_main = token("github.ref").unwrap().equals(&raw("refs/heads/main"));
    let is_push = token("github.event_name").unwrap().equals(&raw("push"));
    let both = is_main.and(&is_push);
    assert_snapshot!(
        both.inner(),
        @"(github.ref == 'refs/heads/main') && (github.event_name == 'push')"
    );
    let either = both.or(&token("inputs.force").unwrap());
    assert_snapshot!(
        either.wrap().unwrap().as_str(),
        @"${{ ((github.ref == 'refs/heads/main') && (github.event_name == 'push')) || inputs.force }}"
    );
}

#[test]
fn test_negation_and_grouping() {
    let flag = token("inputs.dry_run").unwrap();
    assert_eq!((!&flag).inner(), "!inputs.dry_run");
    let cond = flag.or(&token("vars.SKIP").unwrap());
    assert_eq!(cond.negate().inner(), "!(inputs.dry_run || vars.SKIP)");
    assert_eq!(cond.group().group().inner(), "(inputs.dry_run || vars.SKIP)");
}

#[test]
fn test_quoted_operators_do_not_force_parentheses() {
    let text = Fragment::expression("'a && b'").unwrap();
    assert_eq!(text.equals(&raw("x")).inner(), "'a && b' == 'x'");
}

#[test]
fn test_workflow_expr_serde_validates() {
    let expr: WorkflowExpr = serde_json::from_str("\"${{ github.sha }}\"").unwrap();
    assert_eq!(expr.inner(), "github.sha");
    assert!(serde_json::from_str::<WorkflowExpr>("\"github.sha\"").is_err());
    assert_eq!(serde_json::to_string(&expr).unwrap(), "\"${{ github.sha }}\"");

    for text in [
        "\"${{ ${{ github.sha }} }}\"",
        "\"${{  }}\"",
        "\"${{  github.sha }}\"",
        "\"${{ github.sha  }}\"",
    ] {
        assert!(serde_json::from_str::<WorkflowExpr>(text).is_err(), "{}", text);
    }
}

#[test]
fn test_expr_macro_with_option_values() {
    let present: Option<&str> = Some("release");
    let out = expr!("inputs.channel == {}", present).unwrap();
    assert_eq!(out.as_str(), "${{ inputs.channel == 'release' }}");

    let missing: Option<&str> = None;
    let err = expr!("inputs.channel == {}", missing).unwrap_err();
    assert!(matches!(err, FlowError::UndefinedInterpolation { index: 0, .. }));
    assert!(err.to_string().contains("inputs.channel == {}"));
}

#[test]
fn test_expr_value_from_wrapped_string() {
    let out = expr("{} && {}", vec![
        ExprValue::from("${{ github.ref == 'x' }}"),
        ExprValue::from(false),
    ])
    .unwrap();
    assert_eq!(out.as_str(), "${{ github.ref == 'x' && false }}");

    let err = expr("{}", vec![ExprValue::from("${{github.ref}}")]).unwrap_err();
    assert!(matches!(err, FlowError::MalformedExpression { .. }));
}
