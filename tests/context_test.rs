use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use serde_json::{json, Value};
use tokio_util::sync::CancellationToken;
use vetting::rules::{required, with_context};
use vetting::{
    each, field, key, map, nested, rules, validate_map_with_context, validate_struct,
    validate_struct_with_context, validate_with_context, RuleSet, Validatable, ValidationContext,
    ValidationError,
};

/// Maximum allowed length, read from the context.
struct MaxLen(usize);

fn bounded() -> RuleSet<String> {
    rules![with_context(|ctx: &ValidationContext, s: &String| {
        ctx.ensure_active()?;
        match ctx.value::<MaxLen>() {
            Some(MaxLen(max)) if s.len() > *max => {
                Err(ValidationError::rule("max_len", "too long"))
            }
            _ => Ok(()),
        }
    })]
}

struct Tag {
    label: String,
}

impl Validatable for Tag {
    fn validate(&self) -> Result<(), ValidationError> {
        validate_struct([field("Label", &self.label, bounded())])
    }

    fn validate_with_context(&self, ctx: &ValidationContext) -> Result<(), ValidationError> {
        validate_struct_with_context(ctx, [field("Label", &self.label, bounded())])
    }
}

struct Post {
    title: String,
    tags: Vec<Tag>,
}

impl Validatable for Post {
    fn validate(&self) -> Result<(), ValidationError> {
        validate_struct([
            field("Title", &self.title, bounded()),
            nested("Tags", &self.tags),
        ])
    }

    fn validate_with_context(&self, ctx: &ValidationContext) -> Result<(), ValidationError> {
        validate_struct_with_context(
            ctx,
            [
                field("Title", &self.title, bounded()),
                nested("Tags", &self.tags),
            ],
        )
    }
}

fn post() -> Post {
    Post {
        title: "hello".into(),
        tags: vec![
            Tag { label: "rust".into() },
            Tag {
                label: "validation".into(),
            },
        ],
    }
}

#[test]
fn test_without_context_nothing_is_bounded() {
    assert!(post().validate().is_ok());
}

#[test]
fn test_context_reaches_every_depth() {
    let ctx = ValidationContext::background().with_value(MaxLen(4));
    let error = post().validate_with_context(&ctx).unwrap_err();
    assert_eq!(
        error.to_string(),
        "Tags: (1: (Label: too long)); Title: too long."
    );
}

#[test]
fn test_swapping_context_value_changes_outcome() {
    let strict = ValidationContext::background().with_value(MaxLen(5));
    let relaxed = strict.with_value(MaxLen(20));

    assert!(post().validate_with_context(&strict).is_err());
    assert!(post().validate_with_context(&relaxed).is_ok());
}

#[test]
fn test_same_context_instance_is_seen_by_rules() {
    let ctx = ValidationContext::background().with_value(MaxLen(100));
    let expected = ctx.clone();
    let calls = Arc::new(AtomicUsize::new(0));
    let seen = Arc::clone(&calls);

    let rule = with_context(move |ctx: &ValidationContext, _: &Value| {
        assert!(ctx.same_values(&expected));
        seen.fetch_add(1, Ordering::SeqCst);
        Ok(())
    });

    let value = json!({"a": ["x", "y"], "b": "z"});
    let rule = Arc::new(rule);
    let items = each(rules![Arc::clone(&rule)]);
    let result = validate_with_context(
        &ctx,
        &value,
        &rules![map([
            key("a", rules![Arc::clone(&rule), items]),
            key("b", rules![Arc::clone(&rule)]),
        ])],
    );

    assert!(result.is_ok());
    assert_eq!(calls.load(Ordering::SeqCst), 4);
}

#[test]
fn test_cancellation_aborts_traversal() {
    let token = CancellationToken::new();
    let ctx = ValidationContext::background()
        .with_value(MaxLen(100))
        .with_cancellation(token.clone());
    token.cancel();

    let result = post().validate_with_context(&ctx);
    assert_eq!(result, Err(ValidationError::Cancelled));
}

#[test]
fn test_cancelled_child_does_not_cancel_parent() {
    let parent = ValidationContext::background();
    let child = parent.child();
    child.cancel();

    let title = "hello".to_string();
    let title_field = || field("Title", &title, bounded());
    let result = validate_struct_with_context(&parent, [title_field()]);
    assert!(result.is_ok());
    assert_eq!(
        validate_struct_with_context(&child, [title_field()]),
        Err(ValidationError::Cancelled)
    );
}

#[test]
fn test_map_with_context() {
    let mut settings = BTreeMap::new();
    settings.insert("name".to_string(), "a-long-name".to_string());
    settings.insert("owner".to_string(), String::new());

    let ctx = ValidationContext::background().with_value(MaxLen(5));
    let error = validate_map_with_context(
        &ctx,
        &settings,
        [
            key("name", bounded()),
            key("owner", rules![required()]),
        ],
    )
    .unwrap_err();

    assert_eq!(error.to_string(), "name: too long; owner: cannot be blank.");
}
