//! Tests for relationship resolution over a complete node index.
mod common;
use ahash::AHashMap;
use common::*;
use experience::node::{Action, Carousel, NodeKind, PageControl, Screen, Spacer};
use experience::prelude::*;
use experience::resolver;

fn index(nodes: Vec<Node>) -> AHashMap<NodeId, Node> {
    nodes.into_iter().map(|node| (node.id.clone(), node)).collect()
}

#[test]
fn test_zero_pending_remain_after_resolution() {
    let output = Decoder::default()
        .decode(SAMPLE_EXPERIENCE_JSON.as_bytes())
        .expect("Failed to decode");
    let pending = output.pending.len();

    let (_experience, report) = output.resolve();

    // The pending list is consumed; every entry was processed, resolvable or not.
    assert_eq!(report.processed, pending);
    assert_eq!(report.resolved, 12);
    assert_eq!(report.unresolved.len(), 2);
    assert!(!report.is_complete());
}

#[test]
fn test_one_to_many_preserves_order_and_drops_missing() {
    let mut nodes = index(vec![
        Node::new("parent", NodeKind::Spacer(Spacer {})),
        Node::new("c1", NodeKind::Spacer(Spacer {})),
        Node::new("c3", NodeKind::Spacer(Spacer {})),
    ]);
    let pending = vec![
        PendingRelationship::one_to_many(
            "parent",
            RelationField::Children,
            vec!["c1".to_string(), "c2".to_string(), "c3".to_string()],
        )
        .with_inverse(RelationField::Parent),
    ];

    let report = resolver::resolve(&mut nodes, pending);

    assert_eq!(nodes["parent"].children, vec!["c1", "c3"]);
    assert_eq!(nodes["c1"].parent.as_deref(), Some("parent"));
    assert_eq!(nodes["c3"].parent.as_deref(), Some("parent"));
    assert_eq!(report.resolved, 2);
    assert_eq!(
        report.unresolved,
        vec![UnresolvedReference {
            source: "parent".to_string(),
            field: RelationField::Children,
            target: "c2".to_string(),
        }]
    );
}

#[test]
fn test_one_to_one_sets_inverse() {
    let mut nodes = index(vec![
        Node::new("carousel", NodeKind::Carousel(Carousel::default())),
        Node::new("dots", NodeKind::PageControl(PageControl::default())),
    ]);
    let pending = vec![
        PendingRelationship::one_to_one("dots", RelationField::Carousel, "carousel")
            .with_inverse(RelationField::PageControl),
    ];

    let report = resolver::resolve(&mut nodes, pending);
    assert!(report.is_complete());

    match (&nodes["dots"].kind, &nodes["carousel"].kind) {
        (NodeKind::PageControl(control), NodeKind::Carousel(carousel)) => {
            assert_eq!(control.carousel.as_deref(), Some("carousel"));
            assert_eq!(carousel.page_control.as_deref(), Some("dots"));
        }
        other => panic!("Unexpected kinds {:?}", other),
    }
}

#[test]
fn test_many_to_one_appends_to_inverse_list() {
    let segue = |id: &str| {
        let mut node = Node::new(id, NodeKind::Spacer(Spacer {}));
        node.action = Some(Action::PerformSegue {
            screen: None,
            style: Default::default(),
        });
        node
    };
    let mut nodes = index(vec![
        Node::new("target", NodeKind::Screen(Screen::default())),
        segue("a"),
        segue("b"),
    ]);
    let pending = ["a", "b"]
        .into_iter()
        .map(|source| {
            PendingRelationship::many_to_one(source, RelationField::ActionScreen, "target")
                .with_inverse(RelationField::SegueSources)
        })
        .collect();

    resolver::resolve(&mut nodes, pending);

    match &nodes["target"].kind {
        NodeKind::Screen(screen) => assert_eq!(screen.segue_sources, vec!["a", "b"]),
        other => panic!("Expected a screen, found {:?}", other),
    }
    assert!(matches!(
        &nodes["a"].action,
        Some(Action::PerformSegue { screen: Some(target), .. }) if target == "target"
    ));
}

#[test]
fn test_reference_to_wrong_kind_is_unresolved() {
    let mut nodes = index(vec![
        Node::new("not-a-carousel", NodeKind::Spacer(Spacer {})),
        Node::new("dots", NodeKind::PageControl(PageControl::default())),
    ]);
    let pending = vec![
        PendingRelationship::one_to_one("dots", RelationField::Carousel, "not-a-carousel")
            .with_inverse(RelationField::PageControl),
    ];

    let report = resolver::resolve(&mut nodes, pending);

    assert_eq!(report.unresolved.len(), 1);
    assert!(matches!(
        &nodes["dots"].kind,
        NodeKind::PageControl(PageControl { carousel: None, .. })
    ));
}

#[test]
fn test_sample_document_wiring() {
    let (experience, _report) = decode_and_resolve(SAMPLE_EXPERIENCE_JSON.as_bytes());

    let carousel_children: Vec<&str> = experience
        .children_of("c1")
        .map(|node| node.id.as_str())
        .collect();
    assert_eq!(carousel_children, vec!["slide-2", "slide-1"]);

    assert_eq!(experience.parent_of("title").map(|n| n.id.as_str()), Some("stack"));
    assert_eq!(experience.parent_of("stack").map(|n| n.id.as_str()), Some("s1"));
    assert!(experience.parent_of("s1").is_none());

    match &experience.node("s2").expect("s2 exists").kind {
        NodeKind::Screen(screen) => assert_eq!(screen.segue_sources, vec!["title"]),
        other => panic!("Expected a screen, found {:?}", other),
    }
    match &experience.node("p2").expect("p2 exists").kind {
        NodeKind::PageControl(control) => assert!(control.carousel.is_none()),
        other => panic!("Expected a page control, found {:?}", other),
    }
}
