//! Loading record graphs from OpenAPI documents
//!
//! Only `components.schemas` is read. Each schema becomes a [`Definition`];
//! its `properties`, `required`, `allOf`, and `x-` extension keys map onto
//! the record graph model. JSON documents are supported.

use crate::annotation::{AnnotationValue, Annotations, keys};
use crate::definition::{Branch, Definition, Shape};
use crate::field::{ArrayItem, Field, FieldKind, Primitive, RefPath};
use crate::graph::RecordGraph;
use indexmap::IndexMap;
use jpagen_core::{EngineError, EngineResult};
use serde::Deserialize;
use std::path::Path;

// ============================================================================
// Raw document model
// ============================================================================

#[derive(Debug, Default, Deserialize)]
struct RawDocument {
    #[serde(default)]
    components: Option<RawComponents>,
}

#[derive(Debug, Default, Deserialize)]
struct RawComponents {
    #[serde(default)]
    schemas: Option<IndexMap<String, RawSchema>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSchema {
    #[serde(rename = "$ref")]
    reference: Option<String>,

    /// A string, or a list of strings in OpenAPI 3.1
    #[serde(rename = "type")]
    kind: Option<serde_json::Value>,

    format: Option<String>,

    properties: Option<IndexMap<String, RawSchema>>,

    items: Option<Box<RawSchema>>,

    all_of: Option<Vec<RawSchema>>,

    #[serde(default)]
    required: Vec<String>,

    /// Every other key; `x-` keys become annotations
    #[serde(flatten)]
    extra: IndexMap<String, serde_json::Value>,
}

impl RawSchema {
    /// First non-null type name
    fn type_name(&self) -> Option<String> {
        match self.kind.as_ref()? {
            serde_json::Value::String(name) => Some(name.clone()),
            serde_json::Value::Array(names) => names
                .iter()
                .filter_map(serde_json::Value::as_str)
                .find(|name| *name != "null")
                .map(str::to_string),
            _ => None,
        }
    }

    fn primitive(&self) -> Primitive {
        Primitive {
            kind: self.type_name(),
            format: self.format.clone(),
        }
    }

    fn annotations(&self) -> Annotations {
        self.extra
            .iter()
            .filter(|(key, _)| key.starts_with(keys::EXTENSION_PREFIX))
            .map(|(key, value)| (key.clone(), AnnotationValue::from(value.clone())))
            .collect()
    }

    /// `allOf: [{ $ref }]` wrapper used to attach extensions to a reference
    fn wrapped_reference(&self) -> Option<&str> {
        match self.all_of.as_deref() {
            Some([only]) => only.reference.as_deref(),
            _ => None,
        }
    }

    fn into_shape(self) -> Shape {
        let annotations = self.annotations();
        let fields = self.properties.map(|properties| {
            properties
                .into_iter()
                .map(|(name, property)| (name, property.into_field()))
                .collect()
        });
        let composition = self
            .all_of
            .unwrap_or_default()
            .into_iter()
            .map(|branch| match branch.reference {
                Some(reference) => Branch::Reference(RefPath::new(reference)),
                None => Branch::Inline(branch.into_shape()),
            })
            .collect();

        Shape {
            fields,
            required: self.required.into_iter().collect(),
            annotations,
            composition,
        }
    }

    fn into_field(self) -> Field {
        let annotations = self.annotations();

        let kind = if let Some(reference) = &self.reference {
            FieldKind::Reference(RefPath::new(reference.as_str()))
        } else if let Some(reference) = self.wrapped_reference() {
            FieldKind::Reference(RefPath::new(reference))
        } else if self.type_name().as_deref() == Some("array") {
            let item = match self.items.as_deref() {
                Some(RawSchema {
                    reference: Some(reference),
                    ..
                }) => ArrayItem::Reference(RefPath::new(reference.as_str())),
                Some(items) => ArrayItem::Primitive(items.primitive()),
                None => ArrayItem::Primitive(Primitive::default()),
            };
            FieldKind::Array(item)
        } else {
            FieldKind::Primitive(self.primitive())
        };

        Field { kind, annotations }
    }
}

// ============================================================================
// Load Functions
// ============================================================================

/// Load a record graph from an OpenAPI JSON file
pub fn load_graph(path: impl AsRef<Path>) -> EngineResult<RecordGraph> {
    let path = path.as_ref();

    let json = std::fs::read_to_string(path).map_err(|e| EngineError::FileRead {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    parse_graph(&json).map_err(|e| match e {
        EngineError::Json(je) => EngineError::schema_parse(path, je.to_string()),
        other => other,
    })
}

/// Parse a record graph from OpenAPI JSON text
pub fn parse_graph(json: &str) -> EngineResult<RecordGraph> {
    let document: RawDocument = serde_json::from_str(json)?;

    let Some(schemas) = document.components.and_then(|c| c.schemas) else {
        tracing::warn!("document has no components.schemas, nothing to generate");
        return Ok(RecordGraph::new());
    };

    let graph = RecordGraph::from_definitions(
        schemas
            .into_iter()
            .map(|(name, schema)| Definition::with_shape(name, schema.into_shape())),
    );

    tracing::debug!(definitions = graph.len(), "schema document parsed");
    Ok(graph)
}

// ============================================================================
// Tests
// ============================================================================
