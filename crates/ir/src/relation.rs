//! Relation inference
//!
//! Schema authors declare a relation on one side only: a collection field
//! annotated `x-rel: one-to-many`. This module walks every such field and
//! marks the matching back-reference on the target definition as
//! `many-to-one`, so descriptor building never needs a two-sided lookup.
//!
//! ## Algorithm
//!
//! For every definition (the *source*) and every field of its flattened
//! shape:
//!
//! 1. skip fields that are not arrays of references or are not annotated
//!    one-to-many;
//! 2. resolve the item reference; skip if the target is not in the graph;
//! 3. name the back-reference: `x-mapped-by`, else the naming policy applied
//!    to the source name;
//! 4. on the flattened target, annotate the first field whose reference path
//!    equals the source's path as many-to-one. No field is ever created.
//!
//! Every skip is tolerated and counted in the [`InferenceReport`].

use crate::graph::{DefinitionId, RecordGraph};
use jpagen_core::{BackReferenceNaming, RelationKind};
use serde::Serialize;

// ============================================================================
// InferenceReport
// ============================================================================

/// One inverse relation written onto the graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InferredRelation {
    /// Definition owning the one-to-many field
    pub source: String,
    /// The one-to-many field
    pub field: String,
    /// Definition that received the many-to-one annotation
    pub target: String,
    /// Field on the target that was annotated
    pub inverse_field: String,
    /// Back-reference name the source expects (`mappedBy`)
    pub mapped_by: String,
}

/// A declared one-to-many relation left one-sided
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnresolvedRelation {
    pub source: String,
    pub field: String,
    pub target: String,
    pub reason: UnresolvedReason,
}

/// Why a relation stayed one-sided
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UnresolvedReason {
    /// The target definition is not in the graph
    MissingTarget,
    /// The target has no field referencing the source
    MissingBackReference,
    /// The target is a malformed composite
    MalformedTarget,
}

impl std::fmt::Display for UnresolvedReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            UnresolvedReason::MissingTarget => "target definition not found",
            UnresolvedReason::MissingBackReference => "no field on the target references the owner",
            UnresolvedReason::MalformedTarget => "target composition could not be flattened",
        };
        f.write_str(text)
    }
}

/// Outcome of one inference pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InferenceReport {
    pub inferred: Vec<InferredRelation>,
    pub unresolved: Vec<UnresolvedRelation>,
}

impl InferenceReport {
    /// Number of inverse relations written
    pub fn inferred_count(&self) -> usize {
        self.inferred.len()
    }

    /// Number of relations skipped for the given reason
    pub fn count(&self, reason: UnresolvedReason) -> usize {
        self.unresolved.iter().filter(|u| u.reason == reason).count()
    }

    pub fn missing_targets(&self) -> usize {
        self.count(UnresolvedReason::MissingTarget)
    }

    pub fn missing_back_references(&self) -> usize {
        self.count(UnresolvedReason::MissingBackReference)
    }

    pub fn is_clean(&self) -> bool {
        self.unresolved.is_empty()
    }

    /// Target field annotated as the inverse of `source.field`, if any
    pub fn inverse_field(&self, source: &str, field: &str) -> Option<&str> {
        self.inferred
            .iter()
            .find(|relation| relation.source == source && relation.field == field)
            .map(|relation| relation.inverse_field.as_str())
    }
}

// ============================================================================
// Inference
// ============================================================================

/// A pending many-to-one annotation found during the read phase
struct PlannedInverse {
    target: DefinitionId,
    inverse_field: String,
    relation: InferredRelation,
}

/// Annotate the inverse side of every declared one-to-many relation.
///
/// Sources whose own composition cannot be flattened are skipped here; the
/// descriptor builder reports them.
pub fn infer_relations(
    graph: &mut RecordGraph,
    naming: &dyn BackReferenceNaming,
) -> InferenceReport {
    let mut report = InferenceReport::default();
    let mut planned = Vec::new();

    // Read phase: only shared borrows of the graph.
    for source_id in graph.ids() {
        let source = graph.get(source_id);
        let Ok(source_shape) = source.flattened() else {
            continue;
        };
        let source_path = graph.path_of(source);

        for (field_name, field) in source_shape.fields() {
            let Some(item_ref) = field.item_reference() else {
                continue;
            };
            if field.annotations.relation() != Some(RelationKind::OneToMany) {
                continue;
            }

            let unresolved = |reason| UnresolvedRelation {
                source: source.name.clone(),
                field: field_name.to_string(),
                target: item_ref.name().to_string(),
                reason,
            };

            let Some(target_id) = graph.resolve(item_ref) else {
                tracing::debug!(
                    source = %source.name,
                    field = field_name,
                    target = item_ref.name(),
                    "one-to-many target missing, skipping"
                );
                report.unresolved.push(unresolved(UnresolvedReason::MissingTarget));
                continue;
            };

            let mapped_by = field
                .annotations
                .mapped_by()
                .map(str::to_string)
                .unwrap_or_else(|| naming.back_reference_name(&source.name));

            let target = graph.get(target_id);
            let Ok(target_shape) = target.flattened() else {
                report.unresolved.push(unresolved(UnresolvedReason::MalformedTarget));
                continue;
            };

            let back_reference = target_shape
                .fields()
                .find(|(_, candidate)| candidate.reference_target() == Some(&source_path));

            match back_reference {
                Some((inverse_field, _)) => {
                    if inverse_field != mapped_by {
                        tracing::debug!(
                            source = %source.name,
                            target = %target.name,
                            inverse_field,
                            mapped_by = %mapped_by,
                            "back-reference found under a different name"
                        );
                    }
                    planned.push(PlannedInverse {
                        target: target_id,
                        inverse_field: inverse_field.to_string(),
                        relation: InferredRelation {
                            source: source.name.clone(),
                            field: field_name.to_string(),
                            target: target.name.clone(),
                            inverse_field: inverse_field.to_string(),
                            mapped_by,
                        },
                    });
                }
                None => {
                    tracing::debug!(
                        source = %source.name,
                        field = field_name,
                        target = %target.name,
                        "no back-reference on target, relation stays one-sided"
                    );
                    report
                        .unresolved
                        .push(unresolved(UnresolvedReason::MissingBackReference));
                }
            }
        }
    }

    // Write phase: annotate the target fields.
    for plan in planned {
        let definition = graph.get_mut(plan.target);
        let inverse = definition
            .flattened_mut()
            .ok()
            .and_then(|shape| shape.fields.as_mut())
            .and_then(|fields| fields.get_mut(&plan.inverse_field));

        if let Some(field) = inverse {
            field.annotations.set_relation(RelationKind::OneToMany.inverse());
            report.inferred.push(plan.relation);
        }
    }

    tracing::debug!(
        inferred = report.inferred_count(),
        unresolved = report.unresolved.len(),
        "relation inference finished"
    );

    report
}

// ============================================================================
// Tests
// ============================================================================
