//! Tests for sharing rule lists across threads.

use serde_json::json;
use std::sync::Arc;
use std::thread;
use vetting::rules::{is, length, required};
use vetting::{key, map, rules, validate, RuleSet};

#[test]
fn test_concurrent_validation() {
    let rules: Arc<RuleSet<serde_json::Value>> = Arc::new(rules![map([
        key("name", rules![required(), length(2, 20)]),
        key("email", rules![required(), is::email()]),
    ])]);

    let handles: Vec<_> = (0..10)
        .map(|i| {
            let rules = Arc::clone(&rules);
            thread::spawn(move || {
                let email = if i % 2 == 0 {
                    format!("user{}@example.com", i)
                } else {
                    format!("user{}", i)
                };
                let user = json!({"name": format!("User{}", i), "email": email});
                let result = validate(&user, &rules);
                assert_eq!(result.is_ok(), i % 2 == 0);
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn test_concurrent_rendering_is_deterministic() {
    let rules: Arc<RuleSet<serde_json::Value>> = Arc::new(rules![map([
        key("b", rules![required()]),
        key("a", rules![required()]),
        key("c", rules![required()]),
    ])]);

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let rules = Arc::clone(&rules);
            thread::spawn(move || {
                let error = validate(&json!({}), &rules).unwrap_err();
                error.to_string()
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(
            handle.join().unwrap(),
            "a: cannot be blank; b: cannot be blank; c: cannot be blank."
        );
    }
}
