use super::{Action, Node, NodeId, NodeKind};
use std::fmt;

/// A reference-shaped field of a node that the resolver writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelationField {
    Children,
    Parent,
    /// Target screen of a `PerformSegue` action.
    ActionScreen,
    /// Inverse of `ActionScreen`, kept on the screen.
    SegueSources,
    /// The carousel observed by a page control.
    Carousel,
    /// Inverse of `Carousel`, kept on the carousel.
    PageControl,
}

impl RelationField {
    /// Whether a node of the given kind may be stored in this field.
    pub fn accepts(self, target: &NodeKind) -> bool {
        match self {
            RelationField::Children | RelationField::Parent => true,
            RelationField::ActionScreen => matches!(target, NodeKind::Screen(_)),
            RelationField::SegueSources => true,
            RelationField::Carousel => matches!(target, NodeKind::Carousel(_)),
            RelationField::PageControl => matches!(target, NodeKind::PageControl(_)),
        }
    }
}

impl fmt::Display for RelationField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RelationField::Children => "children",
            RelationField::Parent => "parent",
            RelationField::ActionScreen => "action.screen",
            RelationField::SegueSources => "segueSources",
            RelationField::Carousel => "carousel",
            RelationField::PageControl => "pageControl",
        };
        f.write_str(name)
    }
}

impl Node {
    /// Stores a single reference. Returns `false` when this node has no such field.
    pub(crate) fn assign_one(&mut self, field: RelationField, target: NodeId) -> bool {
        match (field, &mut self.kind) {
            (RelationField::Parent, _) => {
                self.parent = Some(target);
                true
            }
            (RelationField::ActionScreen, _) => match &mut self.action {
                Some(Action::PerformSegue { screen, .. }) => {
                    *screen = Some(target);
                    true
                }
                _ => false,
            },
            (RelationField::Carousel, NodeKind::PageControl(control)) => {
                control.carousel = Some(target);
                true
            }
            (RelationField::PageControl, NodeKind::Carousel(carousel)) => {
                carousel.page_control = Some(target);
                true
            }
            _ => false,
        }
    }

    /// Replaces a list-valued field. Returns `false` when this node has no such field.
    pub(crate) fn assign_many(&mut self, field: RelationField, targets: Vec<NodeId>) -> bool {
        match (field, &mut self.kind) {
            (RelationField::Children, _) => {
                self.children = targets;
                true
            }
            (RelationField::SegueSources, NodeKind::Screen(screen)) => {
                screen.segue_sources = targets;
                true
            }
            _ => false,
        }
    }

    /// Appends to a list-valued field. Returns `false` when this node has no such field.
    pub(crate) fn append(&mut self, field: RelationField, target: NodeId) -> bool {
        match (field, &mut self.kind) {
            (RelationField::Children, _) => {
                self.children.push(target);
                true
            }
            (RelationField::SegueSources, NodeKind::Screen(screen)) => {
                screen.segue_sources.push(target);
                true
            }
            _ => false,
        }
    }
}
