//! Schema definitions and composition flattening
//!
//! A [`Definition`] is a named record of the schema. Its body is a
//! [`Shape`]: an ordered field map, a required-name set, annotations, and an
//! optional composition list. Composite definitions (built from several
//! branches, some of them plain references) are resolved to one concrete
//! field set by [`Shape::flatten`].

use crate::annotation::Annotations;
use crate::field::{Field, RefPath};
use indexmap::{IndexMap, IndexSet};
use jpagen_core::SchemaError;
use serde::{Deserialize, Serialize};

// ============================================================================
// Shape
// ============================================================================

/// The structural body of a definition or of an inline composition branch
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    /// Ordered field map; `None` when the schema declares no properties
    pub fields: Option<IndexMap<String, Field>>,

    /// Names of required fields
    #[serde(default)]
    pub required: IndexSet<String>,

    /// `x-` annotations
    #[serde(default)]
    pub annotations: Annotations,

    /// Composition branches (`allOf`)
    #[serde(default)]
    pub composition: Vec<Branch>,
}

/// One member of a composition list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Branch {
    /// Pure reference to another definition
    Reference(RefPath),
    /// Inline structural branch
    Inline(Shape),
}

impl Shape {
    /// Create an empty shape with an empty field map
    pub fn new() -> Self {
        Self {
            fields: Some(IndexMap::new()),
            ..Self::default()
        }
    }

    // ========================================================================
    // Builder methods
    // ========================================================================

    /// Add a field
    pub fn with_field(mut self, name: impl Into<String>, field: Field) -> Self {
        self.fields
            .get_or_insert_with(IndexMap::new)
            .insert(name.into(), field);
        self
    }

    /// Add a required field
    pub fn with_required_field(mut self, name: impl Into<String>, field: Field) -> Self {
        let name = name.into();
        self.required.insert(name.clone());
        self.with_field(name, field)
    }

    /// Add an annotation
    pub fn annotated(
        mut self,
        key: impl Into<String>,
        value: impl Into<crate::annotation::AnnotationValue>,
    ) -> Self {
        self.annotations.insert(key, value);
        self
    }

    /// Add a composition branch
    pub fn with_branch(mut self, branch: Branch) -> Self {
        self.composition.push(branch);
        self
    }

    // ========================================================================
    // Composition flattening
    // ========================================================================

    /// Whether flattening has work to do: no own fields, some branches
    pub fn is_composite(&self) -> bool {
        let no_fields = self.fields.as_ref().is_none_or(IndexMap::is_empty);
        no_fields && !self.composition.is_empty()
    }

    /// Resolve a composite shape to its inline branch.
    ///
    /// Non-composite shapes are returned unchanged, which makes flattening
    /// idempotent. The first inline branch that declares fields wins; a
    /// composite with no such branch, or whose inline branch is composite
    /// itself, is rejected.
    pub fn flatten(&self, definition: &str) -> Result<&Shape, SchemaError> {
        if !self.is_composite() {
            return Ok(self);
        }
        let index = self.inline_branch_index(definition)?;
        match &self.composition[index] {
            Branch::Inline(shape) => Ok(shape),
            Branch::Reference(_) => unreachable!("inline_branch_index returns inline branches"),
        }
    }

    /// Mutable counterpart of [`Shape::flatten`]
    pub fn flatten_mut(&mut self, definition: &str) -> Result<&mut Shape, SchemaError> {
        if !self.is_composite() {
            return Ok(self);
        }
        let index = self.inline_branch_index(definition)?;
        match &mut self.composition[index] {
            Branch::Inline(shape) => Ok(shape),
            Branch::Reference(_) => unreachable!("inline_branch_index returns inline branches"),
        }
    }

    fn inline_branch_index(&self, definition: &str) -> Result<usize, SchemaError> {
        let mut nested = false;

        for (index, branch) in self.composition.iter().enumerate() {
            let Branch::Inline(shape) = branch else {
                continue;
            };
            if !shape.composition.is_empty() {
                nested = true;
                continue;
            }
            if shape.fields.is_some() {
                return Ok(index);
            }
        }

        if nested {
            Err(SchemaError::NestedComposition {
                definition: definition.to_string(),
            })
        } else {
            Err(SchemaError::NoInlineBranch {
                definition: definition.to_string(),
            })
        }
    }

    /// Iterate fields in declared order
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Field)> {
        self.fields
            .iter()
            .flat_map(|fields| fields.iter().map(|(name, field)| (name.as_str(), field)))
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.as_ref().and_then(|fields| fields.get(name))
    }

    pub fn is_required(&self, name: &str) -> bool {
        self.required.contains(name)
    }
}

// ============================================================================
// Definition
// ============================================================================

/// A named schema record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Definition {
    /// Name, unique across the graph
    pub name: String,

    /// Structural body
    pub shape: Shape,
}

impl Definition {
    /// Create a definition with an empty field map
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_shape(name, Shape::new())
    }

    pub fn with_shape(name: impl Into<String>, shape: Shape) -> Self {
        Self {
            name: name.into(),
            shape,
        }
    }

    /// The concrete field set of this definition
    pub fn flattened(&self) -> Result<&Shape, SchemaError> {
        self.shape.flatten(&self.name)
    }

    /// Mutable access to the concrete field set
    pub fn flattened_mut(&mut self) -> Result<&mut Shape, SchemaError> {
        let Definition { name, shape } = self;
        shape.flatten_mut(name)
    }

    /// Definition-level annotations.
    ///
    /// Keys on the definition itself win; keys it does not carry are read
    /// from the flattened inline branch of a composite.
    pub fn effective_annotations(&self) -> Annotations {
        match self.flattened() {
            Ok(flat) if !std::ptr::eq(flat, &self.shape) => {
                self.shape.annotations.merged_over(&flat.annotations)
            }
            _ => self.shape.annotations.clone(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
