//! Unit tests for core types: display, errors and small value helpers.
mod common;
use experience::context::Namespace;
use experience::decoder::{RelationKind, TYPE_KEY};
use experience::node::{NodeKind, Spacer, Text, TextTransform};
use experience::prelude::*;
use experience::template::{Expression, PathRef, Template, render_value};
use serde_json::json;

#[test]
fn test_node_display() {
    let mut node = Node::new("n1", NodeKind::Spacer(Spacer {}));
    assert_eq!(format!("{}", node), "Spacer (n1)");
    node.name = Some("Gap".to_string());
    assert_eq!(format!("{}", node), "Spacer 'Gap' (n1)");
}

#[test]
fn test_relationship_kinds() {
    let one = PendingRelationship::one_to_one("a", RelationField::Carousel, "b");
    let many = PendingRelationship::one_to_many("a", RelationField::Children, vec![]);
    let back = PendingRelationship::many_to_one("a", RelationField::ActionScreen, "b");
    assert_eq!(one.kind(), RelationKind::OneToOne);
    assert_eq!(many.kind(), RelationKind::OneToMany);
    assert_eq!(back.kind(), RelationKind::ManyToOne);
    assert_eq!(back.kind().to_string(), "many-to-one");
    assert_eq!(RelationField::ActionScreen.to_string(), "action.screen");
    assert_eq!(TYPE_KEY, "__typeName");
}

#[test]
fn test_namespace_parsing() {
    assert_eq!(Namespace::parse("data"), Some(Namespace::Data));
    assert_eq!(Namespace::parse("url"), Some(Namespace::Url));
    assert_eq!(Namespace::parse("user"), Some(Namespace::User));
    assert_eq!(Namespace::parse("session"), None);
    assert_eq!(Namespace::User.to_string(), "user");
}

#[test]
fn test_template_parse_structure() {
    let template = Template::parse("{{ data }}").expect("bare namespace parses");
    assert_eq!(
        template.segments(),
        &[experience::template::Segment::Span(Expression::Path(PathRef {
            namespace: Namespace::Data,
            keys: vec![],
        }))]
    );

    let data = json!("whole value");
    let ctx = DataContext::new().with_data(&data);
    assert_eq!(evaluate("{{ data }}", &ctx).as_deref(), Some("whole value"));
    assert_eq!(evaluate("{{ url }}", &ctx), None);
}

#[test]
fn test_render_value() {
    assert_eq!(render_value(&json!(7)).as_deref(), Some("7"));
    assert_eq!(render_value(&json!(-1.25)).as_deref(), Some("-1.25"));
    assert_eq!(render_value(&json!({ "a": 1 })), None);
}

#[test]
fn test_text_transform() {
    let text = Text {
        text: "Hello {{ user.name }}".to_string(),
        text_alignment: Default::default(),
        line_limit: None,
        text_color: None,
        transform: TextTransform::Uppercase,
    };
    let user = ahash::AHashMap::from([("name".to_string(), json!("Ada"))]);
    let ctx = DataContext::new().with_user_info(&user);
    assert_eq!(text.interpolated(&ctx).as_deref(), Some("HELLO ADA"));
}

#[test]
fn test_error_display() {
    let err = DecodeError::InvalidNodeType {
        node_id: "n9".to_string(),
        type_name: "Hologram".to_string(),
    };
    assert!(err.to_string().contains("n9"));
    assert!(err.to_string().contains("Hologram"));

    let eval_err = EvaluationError::ArityMismatch {
        helper: "numberFormat".to_string(),
        expected: "1 to 2".to_string(),
        found: 3,
    };
    assert!(eval_err.to_string().contains("numberFormat"));
    assert!(eval_err.to_string().contains("1 to 2"));
    assert!(eval_err.to_string().contains('3'));

    let unresolved = EvaluationError::UnresolvedPath("data.missing".to_string());
    assert!(unresolved.to_string().contains("data.missing"));
}
