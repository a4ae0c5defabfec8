//! Tests for sharing transformers and error trees across threads.

use formerr::{ErrorNode, ErrorTransformer, TransformOptions};
use serde_json::{json, Value};
use std::sync::Arc;
use std::thread;

#[test]
fn test_concurrent_transforms() {
    let transformer = Arc::new(ErrorTransformer::new(
        TransformOptions::new().preserve_key("rows"),
    ));

    let handles: Vec<_> = (0..10)
        .map(|i| {
            let transformer = Arc::clone(&transformer);
            thread::spawn(move || {
                let errors = ErrorNode::from(json!({
                    "name": [format!("Error {}", i)],
                    "rows": [{}, {"cell": [format!("Row {}", i)]}],
                }));
                let result = transformer.transform(&errors).unwrap();
                assert_eq!(
                    Value::from(result),
                    json!({
                        "name": format!("Error {}.", i),
                        "rows": [{}, {"cell": format!("Row {}.", i)}],
                    })
                );
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn test_shared_input_tree() {
    let errors = Arc::new(ErrorNode::from(json!({
        "tags": [{"a": ["x"]}, {"b": ["x", "y"]}],
    })));
    let transformer = Arc::new(ErrorTransformer::new(
        TransformOptions::new().with_parallel(true),
    ));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let errors = Arc::clone(&errors);
            let transformer = Arc::clone(&transformer);
            thread::spawn(move || transformer.transform(&errors).unwrap())
        })
        .collect();

    for handle in handles {
        let result = handle.join().unwrap();
        assert_eq!(Value::from(result), json!({"tags": "x. y."}));
    }
}
