//! Embeddable classification
//!
//! A definition whose persistence kind is `Embeddable` is a value object:
//! fields referencing it are embedded rather than linked. The lookup is keyed
//! by full reference path so a referencing field classifies in O(1).

use crate::field::RefPath;
use crate::graph::RecordGraph;
use jpagen_core::EMBEDDABLE_MARKER;
use std::collections::HashSet;

/// Reference paths of every embeddable definition
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmbeddableLookup {
    paths: HashSet<RefPath>,
}

impl EmbeddableLookup {
    /// Classify every definition of the graph
    pub fn classify(graph: &RecordGraph) -> Self {
        let paths: HashSet<RefPath> = graph
            .definitions()
            .filter(|definition| {
                definition.effective_annotations().persistence_kind() == Some(EMBEDDABLE_MARKER)
            })
            .map(|definition| graph.path_of(definition))
            .collect();

        tracing::debug!(embeddables = paths.len(), "embeddable classification finished");
        Self { paths }
    }

    pub fn contains(&self, path: &RefPath) -> bool {
        self.paths.contains(path)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}
