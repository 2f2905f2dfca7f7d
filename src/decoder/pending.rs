use crate::node::{NodeId, RelationField};
use std::fmt;

/// The cardinality of a deferred reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationKind {
    OneToOne,
    OneToMany,
    ManyToOne,
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelationKind::OneToOne => f.write_str("one-to-one"),
            RelationKind::OneToMany => f.write_str("one-to-many"),
            RelationKind::ManyToOne => f.write_str("many-to-one"),
        }
    }
}

/// Target ID(s) of a deferred reference, shaped by its cardinality.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelationTarget {
    OneToOne(NodeId),
    OneToMany(Vec<NodeId>),
    /// The inverse field on the target is a list the source is appended to.
    ManyToOne(NodeId),
}

/// An ID reference recorded during decoding and wired by the resolver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRelationship {
    pub source: NodeId,
    pub field: RelationField,
    pub target: RelationTarget,
    pub inverse: Option<RelationField>,
}

impl PendingRelationship {
    pub fn one_to_one(source: impl Into<NodeId>, field: RelationField, target: impl Into<NodeId>) -> Self {
        Self {
            source: source.into(),
            field,
            target: RelationTarget::OneToOne(target.into()),
            inverse: None,
        }
    }

    pub fn one_to_many(source: impl Into<NodeId>, field: RelationField, targets: Vec<NodeId>) -> Self {
        Self {
            source: source.into(),
            field,
            target: RelationTarget::OneToMany(targets),
            inverse: None,
        }
    }

    pub fn many_to_one(source: impl Into<NodeId>, field: RelationField, target: impl Into<NodeId>) -> Self {
        Self {
            source: source.into(),
            field,
            target: RelationTarget::ManyToOne(target.into()),
            inverse: None,
        }
    }

    pub fn with_inverse(mut self, inverse: RelationField) -> Self {
        self.inverse = Some(inverse);
        self
    }

    pub fn kind(&self) -> RelationKind {
        match self.target {
            RelationTarget::OneToOne(_) => RelationKind::OneToOne,
            RelationTarget::OneToMany(_) => RelationKind::OneToMany,
            RelationTarget::ManyToOne(_) => RelationKind::ManyToOne,
        }
    }
}
