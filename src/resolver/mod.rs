//! Wires the ID references recorded during decoding.
//!
//! Resolution runs exactly once, after the decoder has produced every node.
//! It takes the pending list by value, so the same list cannot be resolved
//! twice. A reference whose target is missing (or of the wrong kind) is not
//! an error: documents authored for other platforms may point at node kinds
//! this client never decodes. Such references are logged, reported, and
//! left unset.

use crate::decoder::{PendingRelationship, RelationTarget};
use crate::node::{Node, NodeId, RelationField};
use ahash::AHashMap;

/// A reference that could not be wired.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedReference {
    pub source: NodeId,
    pub field: RelationField,
    pub target: NodeId,
}

/// Summary of a resolution pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolutionReport {
    /// Relationships consumed, resolvable or not.
    pub processed: usize,
    /// Individual target links that were wired.
    pub resolved: usize,
    pub unresolved: Vec<UnresolvedReference>,
}

impl ResolutionReport {
    pub fn is_complete(&self) -> bool {
        self.unresolved.is_empty()
    }
}

/// Resolves every pending relationship against the node index, in order.
pub fn resolve(
    index: &mut AHashMap<NodeId, Node>,
    pending: Vec<PendingRelationship>,
) -> ResolutionReport {
    let mut report = ResolutionReport::default();

    for relationship in pending {
        report.processed += 1;
        tracing::trace!(
            source = %relationship.source,
            field = %relationship.field,
            kind = %relationship.kind(),
            "resolving relationship"
        );

        let PendingRelationship {
            source,
            field,
            target,
            inverse,
        } = relationship;

        match target {
            RelationTarget::OneToOne(target_id) => {
                if let Some(target_id) = lookup(index, &source, field, target_id, &mut report) {
                    assign_forward_one(index, &source, field, target_id.clone());
                    if let Some(inverse) = inverse {
                        set_inverse_one(index, &target_id, inverse, &source);
                    }
                    report.resolved += 1;
                }
            }
            RelationTarget::ManyToOne(target_id) => {
                if let Some(target_id) = lookup(index, &source, field, target_id, &mut report) {
                    assign_forward_one(index, &source, field, target_id.clone());
                    if let Some(inverse) = inverse
                        && let Some(target) = index.get_mut(&target_id)
                        && !target.append(inverse, source.clone())
                    {
                        tracing::warn!(target = %target_id, field = %inverse, "inverse list field not present on target");
                    }
                    report.resolved += 1;
                }
            }
            RelationTarget::OneToMany(target_ids) => {
                let resolved: Vec<NodeId> = target_ids
                    .into_iter()
                    .filter_map(|id| lookup(index, &source, field, id, &mut report))
                    .collect();

                if let Some(inverse) = inverse {
                    for target_id in &resolved {
                        set_inverse_one(index, target_id, inverse, &source);
                    }
                }
                report.resolved += resolved.len();

                if let Some(node) = index.get_mut(&source)
                    && !node.assign_many(field, resolved)
                {
                    tracing::warn!(source = %source, field = %field, "list field not present on source");
                }
            }
        }
    }

    tracing::debug!(
        processed = report.processed,
        resolved = report.resolved,
        unresolved = report.unresolved.len(),
        "resolved relationships"
    );
    report
}

/// Returns the target ID when it exists and fits the field, recording it as unresolved otherwise.
fn lookup(
    index: &AHashMap<NodeId, Node>,
    source: &NodeId,
    field: RelationField,
    target_id: NodeId,
    report: &mut ResolutionReport,
) -> Option<NodeId> {
    match index.get(&target_id) {
        Some(target) if field.accepts(&target.kind) => Some(target_id),
        found => {
            match found {
                Some(target) => tracing::warn!(
                    source = %source,
                    field = %field,
                    target = %target_id,
                    target_type = target.type_name(),
                    "reference points at a node of the wrong kind"
                ),
                None => tracing::warn!(
                    source = %source,
                    field = %field,
                    target = %target_id,
                    "unresolved reference"
                ),
            }
            report.unresolved.push(UnresolvedReference {
                source: source.clone(),
                field,
                target: target_id,
            });
            None
        }
    }
}

fn assign_forward_one(
    index: &mut AHashMap<NodeId, Node>,
    source: &NodeId,
    field: RelationField,
    target_id: NodeId,
) {
    if let Some(node) = index.get_mut(source)
        && !node.assign_one(field, target_id)
    {
        tracing::warn!(source = %source, field = %field, "field not present on source");
    }
}

fn set_inverse_one(
    index: &mut AHashMap<NodeId, Node>,
    target_id: &NodeId,
    inverse: RelationField,
    source: &NodeId,
) {
    if let Some(target) = index.get_mut(target_id)
        && !target.assign_one(inverse, source.clone())
    {
        tracing::warn!(target = %target_id, field = %inverse, "inverse field not present on target");
    }
}
