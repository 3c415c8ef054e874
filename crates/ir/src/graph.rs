//! The record graph
//!
//! [`RecordGraph`] owns every [`Definition`] of one schema document in an
//! arena, addressed by [`DefinitionId`]. Relation inference takes `&mut` to
//! the whole graph rather than to individual definitions, so writing the
//! inverse side of a relation never aliases the side being read.

use crate::definition::Definition;
use crate::field::{RefPath, SCHEMA_REF_PREFIX};
use serde::Serialize;
use std::collections::HashMap;

// ============================================================================
// DefinitionId
// ============================================================================

/// Index of a definition inside its graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct DefinitionId(usize);

impl DefinitionId {
    pub fn index(self) -> usize {
        self.0
    }
}

// ============================================================================
// RecordGraph
// ============================================================================

/// All named definitions of one schema document, in document order
#[derive(Debug, Clone, Serialize)]
pub struct RecordGraph {
    definitions: Vec<Definition>,

    /// Prefix the document's references put before a definition name
    ref_prefix: String,

    #[serde(skip)]
    by_name: HashMap<String, DefinitionId>,
}

impl Default for RecordGraph {
    fn default() -> Self {
        Self {
            definitions: Vec::new(),
            ref_prefix: SCHEMA_REF_PREFIX.to_string(),
            by_name: HashMap::new(),
        }
    }
}

impl RecordGraph {
    /// Create an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different reference prefix than `#/components/schemas/`
    pub fn with_ref_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.set_ref_prefix(prefix);
        self
    }

    pub fn set_ref_prefix(&mut self, prefix: impl Into<String>) {
        self.ref_prefix = prefix.into();
    }

    pub fn ref_prefix(&self) -> &str {
        &self.ref_prefix
    }

    /// Reference path other fields of this document use to point at `definition`
    pub fn path_of(&self, definition: &Definition) -> RefPath {
        RefPath::new(format!("{}{}", self.ref_prefix, definition.name))
    }

    /// Build a graph from definitions in order
    pub fn from_definitions(definitions: impl IntoIterator<Item = Definition>) -> Self {
        let mut graph = Self::new();
        for definition in definitions {
            graph.insert(definition);
        }
        graph
    }

    // ========================================================================
    // Definition Management
    // ========================================================================

    /// Add a definition, replacing any existing one with the same name in place
    pub fn insert(&mut self, definition: Definition) -> DefinitionId {
        if let Some(&id) = self.by_name.get(&definition.name) {
            tracing::debug!(definition = %definition.name, "replacing duplicate definition");
            self.definitions[id.0] = definition;
            return id;
        }

        let id = DefinitionId(self.definitions.len());
        self.by_name.insert(definition.name.clone(), id);
        self.definitions.push(definition);
        id
    }

    /// Look up a definition id by name
    pub fn id_of(&self, name: &str) -> Option<DefinitionId> {
        self.by_name.get(name).copied()
    }

    /// Look up a definition id by reference path
    pub fn resolve(&self, path: &RefPath) -> Option<DefinitionId> {
        self.id_of(path.name())
    }

    pub fn get(&self, id: DefinitionId) -> &Definition {
        &self.definitions[id.0]
    }

    pub fn get_mut(&mut self, id: DefinitionId) -> &mut Definition {
        &mut self.definitions[id.0]
    }

    /// Get a definition by name
    pub fn by_name(&self, name: &str) -> Option<&Definition> {
        self.id_of(name).map(|id| self.get(id))
    }

    /// Get a mutable definition by name
    pub fn by_name_mut(&mut self, name: &str) -> Option<&mut Definition> {
        self.id_of(name).map(|id| self.get_mut(id))
    }

    /// All definitions in document order
    pub fn definitions(&self) -> impl Iterator<Item = &Definition> {
        self.definitions.iter()
    }

    /// All ids in document order
    pub fn ids(&self) -> impl Iterator<Item = DefinitionId> + use<> {
        (0..self.definitions.len()).map(DefinitionId)
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

// ============================================================================
// Tests
// ============================================================================
