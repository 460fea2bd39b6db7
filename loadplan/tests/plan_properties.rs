//! Property tests over randomly generated scenarios.

use loadplan::core::invariants::validate_invariants;
use loadplan::core::method::HttpMethod;
use loadplan::core::query::{count_kind, find_kind, login_sampler, target_sampler};
use loadplan::core::scenario::Parameter;
use loadplan::{NodeKind, PlanBuilder, PlanError, ScenarioSpec};
use proptest::prelude::*;

fn method_strategy() -> impl Strategy<Value = HttpMethod> {
    prop_oneof![
        Just(HttpMethod::Get),
        Just(HttpMethod::Post),
        Just(HttpMethod::Put),
        Just(HttpMethod::Delete),
        Just(HttpMethod::Patch),
        Just(HttpMethod::Head),
        Just(HttpMethod::Options),
    ]
}

prop_compose! {
    fn valid_spec()(
        thread_count in 1i64..500,
        ramp_up_seconds in 0i64..120,
        endpoint_path in "/[a-z]{1,12}(/[a-z]{1,8}){0,2}",
        method in method_strategy(),
        parameters in prop::collection::vec(("[a-z]{1,4}", "[A-Za-z0-9]{0,6}"), 0..5),
        body in prop::option::of("[ -~]{0,16}"),
    ) -> ScenarioSpec {
        let body_content_type = body
            .as_ref()
            .filter(|body| !body.is_empty())
            .map(|_| "application/json".to_string());
        ScenarioSpec {
            thread_count,
            ramp_up_seconds,
            endpoint_path,
            method,
            parameters: parameters
                .into_iter()
                .map(|(name, value)| Parameter::new(name, value))
                .collect(),
            csv_path: "users.csv".to_string(),
            body,
            body_content_type,
        }
    }
}

proptest! {
    #[test]
    fn build_is_deterministic(spec in valid_spec()) {
        let builder = PlanBuilder::default();
        let first = builder.build(&spec).expect("build");
        let second = builder.build(&spec.clone()).expect("build");
        prop_assert_eq!(first, second);
    }

    #[test]
    fn every_plan_satisfies_invariants(spec in valid_spec()) {
        let plan = PlanBuilder::default().build(&spec).expect("build");
        prop_assert!(validate_invariants(&plan).is_empty());

        let source = find_kind(&plan, NodeKind::DataSource).expect("data source");
        prop_assert_eq!(source.property("recycle"), Some("false"));
        prop_assert_eq!(source.property("stop_thread"), Some("true"));
    }

    #[test]
    fn token_nodes_follow_method(spec in valid_spec()) {
        let plan = PlanBuilder::default().build(&spec).expect("build");
        let login = login_sampler(&plan).expect("login");
        let target = target_sampler(&plan).expect("target");
        let expected = usize::from(spec.method.is_mutating());

        prop_assert_eq!(count_kind(login, NodeKind::TokenExtractor), expected);
        prop_assert_eq!(count_kind(target, NodeKind::HeaderInjector), expected);
        prop_assert_eq!(count_kind(&plan, NodeKind::TokenExtractor), expected);
        prop_assert_eq!(count_kind(&plan, NodeKind::HeaderInjector), expected);
    }

    #[test]
    fn raw_body_marking_follows_body(spec in valid_spec()) {
        let plan = PlanBuilder::default().build(&spec).expect("build");
        let target = target_sampler(&plan).expect("target");
        let has_body = spec.body.as_deref().is_some_and(|body| !body.is_empty());

        if spec.method.is_mutating() && has_body {
            prop_assert_eq!(target.property("post_body_raw"), Some("true"));
            let injector = find_kind(target, NodeKind::HeaderInjector).expect("injector");
            prop_assert_eq!(injector.entry("Content-Type"), Some("application/json"));
        } else {
            prop_assert_eq!(target.property("post_body_raw"), None);
            if let Some(injector) = find_kind(target, NodeKind::HeaderInjector) {
                prop_assert_eq!(injector.entry("Content-Type"), None);
            }
        }
    }

    #[test]
    fn parameters_attach_in_order(spec in valid_spec()) {
        let plan = PlanBuilder::default().build(&spec).expect("build");
        let target = target_sampler(&plan).expect("target");
        let attached: Vec<(String, String)> = target
            .entries()
            .iter()
            .map(|entry| (entry.name.clone(), entry.value.clone()))
            .collect();
        let expected: Vec<(String, String)> = spec
            .parameters
            .iter()
            .map(|param| (param.name.clone(), param.value.clone()))
            .collect();
        prop_assert_eq!(attached, expected);
    }

    #[test]
    fn non_positive_threads_never_build(threads in -1000i64..=0, spec in valid_spec()) {
        let spec = ScenarioSpec { thread_count: threads, ..spec };
        prop_assert_eq!(
            PlanBuilder::default().build(&spec),
            Err(PlanError::InvalidThreadCount(threads))
        );
    }
}
