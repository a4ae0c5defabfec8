//! Property-based tests for error tree normalization.
//!
//! Generated trees mix mappings, sequences, messages and scalars, with a small
//! message alphabet so deduplication is exercised on most cases.

use formerr::{
    flatten_error, process_structured_error, transform_errors, ErrorNode, TransformOptions,
};
use proptest::prelude::*;

/// A small message alphabet so duplicates are common.
fn message_strategy() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["required", "invalid", "too long", "taken"])
        .prop_map(str::to_string)
}

fn key_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-e]{1,2}").expect("valid regex")
}

fn node_strategy() -> impl Strategy<Value = ErrorNode> {
    let terminal = prop_oneof![
        4 => message_strategy().prop_map(ErrorNode::Leaf),
        1 => any::<i32>().prop_map(|n| ErrorNode::from(serde_json::json!(n))),
    ];
    terminal.prop_recursive(4, 48, 5, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..5).prop_map(ErrorNode::Sequence),
            prop::collection::vec((key_strategy(), inner), 0..5).prop_map(|entries| ErrorNode::mapping(entries)),
        ]
    })
}

fn top_level_strategy() -> impl Strategy<Value = ErrorNode> {
    prop::collection::vec((key_strategy(), node_strategy()), 0..6).prop_map(|entries| ErrorNode::mapping(entries))
}

fn preserve_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(key_strategy(), 0..3)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        ..ProptestConfig::default()
    })]

    #[test]
    fn prop_output_keys_subset_of_input(errors in top_level_strategy(), keep in preserve_strategy()) {
        let options = TransformOptions::new().preserve_keys(keep);
        let result = transform_errors(&errors, &options).unwrap();

        let input = errors.as_mapping().unwrap();
        let output = result.as_mapping().unwrap();
        for key in output.keys() {
            prop_assert!(input.contains_key(key));
        }
        for (key, value) in input {
            prop_assert_eq!(output.contains_key(key), value.is_container());
        }
    }

    #[test]
    fn prop_input_never_mutated(errors in top_level_strategy(), keep in preserve_strategy()) {
        let before = errors.clone();
        let options = TransformOptions::new().preserve_keys(keep);
        let _ = transform_errors(&errors, &options);
        prop_assert_eq!(errors, before);
    }

    #[test]
    fn prop_flatten_yields_leaf_or_empty(node in node_strategy()) {
        prop_assume!(node.is_container());
        match flatten_error(&node).unwrap() {
            ErrorNode::Leaf(joined) => {
                let parts: Vec<_> = joined.split(". ").collect();
                let mut unique = parts.clone();
                unique.sort();
                unique.dedup();
                prop_assert_eq!(parts.len(), unique.len());
                prop_assert!(joined.ends_with('.'));
            }
            other => prop_assert_eq!(other, ErrorNode::empty_sequence()),
        }
    }

    #[test]
    fn prop_structured_keeps_mapping_keys(node in node_strategy()) {
        let result = process_structured_error(&node).unwrap();
        match (&node, &result) {
            (ErrorNode::Mapping(input), ErrorNode::Mapping(output)) => {
                let input_keys: Vec<_> = input.keys().collect();
                let output_keys: Vec<_> = output.keys().collect();
                prop_assert_eq!(input_keys, output_keys);
            }
            (ErrorNode::Mapping(_), other) => {
                prop_assert!(false, "mapping became {:?}", other.kind());
            }
            (input, output) if input.is_message_list() => {
                prop_assert!(matches!(output, ErrorNode::Leaf(_)) || output == &ErrorNode::empty_sequence());
            }
            (input, output) => prop_assert_eq!(input.kind(), output.kind()),
        }
    }

    #[test]
    fn prop_parallel_is_equivalent(errors in top_level_strategy(), keep in preserve_strategy()) {
        let options = TransformOptions::new().preserve_keys(keep);
        let sequential = transform_errors(&errors, &options).unwrap();
        let parallel = transform_errors(&errors, &options.with_parallel(true)).unwrap();
        prop_assert_eq!(parallel, sequential);
    }
}
