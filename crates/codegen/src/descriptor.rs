//! # Entity Descriptors
//!
//! An [`EntityDescriptor`] is the fully resolved, renderer-ready shape of one
//! persistable definition. It is built from the annotated record graph after
//! relation inference and embeddable classification, and is never mutated
//! afterwards.
//!
//! ## Field rules
//!
//! Fields are processed in declared order:
//!
//! - a field annotated `x-ignore: true` is skipped (other values do not count)
//! - `required` comes from the definition's required-name set
//! - arrays of references and direct references resolve to the referenced
//!   definition's name; primitives map through [`jpagen_core::ScalarType`]
//! - a direct reference to an embeddable is `embedded`; otherwise the field's
//!   own `x-rel` label applies. A relation on scalar values is dropped with a
//!   warning, as is an unannotated array of entity references, which renders
//!   as a unidirectional one-to-many
//! - `mappedBy` of a one-to-many field: `x-mapped-by`, else the inverse field
//!   found by relation inference, else the naming policy
//! - column constraints are collected in a fixed clause order: nullability,
//!   uniqueness, column name

use jpagen_core::{BackReferenceNaming, PersistenceKind, RelationKind, SchemaError};
use jpagen_ir::{
    ArrayItem, Definition, EmbeddableLookup, Field, FieldKind, InferenceReport, RefPath,
};
use serde::Serialize;

use crate::java;

// ============================================================================
// Column constraints
// ============================================================================

/// One clause of a column constraint fragment
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "clause", content = "value", rename_all = "snake_case")]
pub enum ColumnClause {
    NotNullable,
    Unique,
    Name(String),
}

impl ColumnClause {
    /// Position of the clause inside a fragment
    fn rank(&self) -> u8 {
        match self {
            ColumnClause::NotNullable => 0,
            ColumnClause::Unique => 1,
            ColumnClause::Name(_) => 2,
        }
    }

    /// Human-readable label
    pub fn label(&self) -> String {
        match self {
            ColumnClause::NotNullable => "not nullable".to_string(),
            ColumnClause::Unique => "unique".to_string(),
            ColumnClause::Name(name) => format!("name = {name}"),
        }
    }

    /// JPA `@Column` attribute
    pub fn attribute(&self) -> String {
        match self {
            ColumnClause::NotNullable => "nullable = false".to_string(),
            ColumnClause::Unique => "unique = true".to_string(),
            ColumnClause::Name(name) => format!("name = \"{}\"", java::escape(name)),
        }
    }
}

/// Ordered, de-duplicated set of column clauses
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ColumnConstraints(Vec<ColumnClause>);

impl ColumnConstraints {
    pub fn new() -> Self {
        Self::default()
    }

    /// Derive the clauses of one field
    pub fn for_field(required: bool, field: &Field) -> Self {
        let mut constraints = Self::new();
        if required {
            constraints.insert(ColumnClause::NotNullable);
        }
        if field.annotations.is_unique() {
            constraints.insert(ColumnClause::Unique);
        }
        if let Some(name) = field.annotations.column_name() {
            constraints.insert(ColumnClause::Name(name.to_string()));
        }
        constraints
    }

    /// Insert a clause. Idempotent per clause kind; a second column name
    /// replaces the first. The fixed clause order is kept whatever the
    /// insertion order.
    pub fn insert(&mut self, clause: ColumnClause) {
        if let Some(existing) = self.0.iter_mut().find(|c| c.rank() == clause.rank()) {
            *existing = clause;
            return;
        }
        self.0.push(clause);
        self.0.sort_by_key(ColumnClause::rank);
    }

    pub fn clauses(&self) -> &[ColumnClause] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, clause: &ColumnClause) -> bool {
        self.0.contains(clause)
    }

    /// Human-readable summary, e.g. `not nullable, unique`
    pub fn summary(&self) -> String {
        self.0
            .iter()
            .map(ColumnClause::label)
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Rendering-ready fragment, e.g. `nullable = false, unique = true`
    pub fn fragment(&self) -> String {
        self.0
            .iter()
            .map(ColumnClause::attribute)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl std::fmt::Display for ColumnConstraints {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.fragment())
    }
}

// ============================================================================
// Descriptors
// ============================================================================

/// What a field's value (or each array item) is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    Scalar,
    /// Reference to an embeddable definition
    Embeddable,
    /// Reference to any other definition
    Definition,
}

/// Resolved field of an entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldDescriptor {
    pub name: String,
    pub required: bool,
    /// Referenced definition name, or the Java scalar type name
    pub type_name: String,
    /// Whether the schema declares an array
    pub collection: bool,
    pub element: ElementKind,
    pub relation: Option<RelationKind>,
    /// Back-reference field name, one-to-many only
    pub mapped_by: Option<String>,
    pub column: ColumnConstraints,
}

/// Superclass of a generated entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuperClass {
    /// Simple class name
    pub name: String,
    /// Fully qualified name to import, when one was given
    pub import: Option<String>,
}

impl SuperClass {
    /// Split an `x-extends` value. `com.acme.Base` imports `com.acme.Base`
    /// and extends `Base`; a bare `Base` needs no import.
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        match value.rsplit_once('.') {
            Some((_, simple)) => Self {
                name: simple.to_string(),
                import: Some(value.to_string()),
            },
            None => Self {
                name: value.to_string(),
                import: None,
            },
        }
    }
}

/// Renderer-ready representation of one persistable definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntityDescriptor {
    pub class_name: String,
    pub package_name: String,
    pub persistence_kind: PersistenceKind,
    pub superclass: Option<SuperClass>,
    pub table_name: Option<String>,
    pub unique_constraints: Vec<Vec<String>>,
    pub fields: Vec<FieldDescriptor>,
    /// Mapping problems found while building, reported by the pipeline
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl EntityDescriptor {
    /// Get a field descriptor by name
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }
}

// ============================================================================
// DescriptorBuilder
// ============================================================================

/// Builds entity descriptors from an annotated record graph.
///
/// Relation inference must already have run on the graph the definitions
/// come from. Its report, when given, supplies the `mappedBy` names.
#[derive(Clone, Copy)]
pub struct DescriptorBuilder<'a> {
    embeddables: &'a EmbeddableLookup,
    package_name: &'a str,
    naming: &'a dyn BackReferenceNaming,
    report: Option<&'a InferenceReport>,
}

impl<'a> DescriptorBuilder<'a> {
    pub fn new(
        embeddables: &'a EmbeddableLookup,
        package_name: &'a str,
        naming: &'a dyn BackReferenceNaming,
    ) -> Self {
        Self {
            embeddables,
            package_name,
            naming,
            report: None,
        }
    }

    /// Use the inverse fields found by relation inference
    pub fn with_report(mut self, report: &'a InferenceReport) -> Self {
        self.report = Some(report);
        self
    }

    /// Build the descriptor of one definition.
    ///
    /// Returns `Ok(None)` for definitions without a persistence-kind
    /// annotation; those are not entities. Fails only when a composite
    /// definition cannot be flattened.
    pub fn build(&self, definition: &Definition) -> Result<Option<EntityDescriptor>, SchemaError> {
        let annotations = definition.effective_annotations();
        let Some(kind) = annotations.persistence_kind() else {
            tracing::debug!(definition = %definition.name, "not persistable, skipping");
            return Ok(None);
        };

        let shape = definition.flattened()?;

        let mut warnings = Vec::new();
        let fields = shape
            .fields()
            .filter(|(name, field)| {
                let ignored = field.annotations.is_ignored();
                if ignored {
                    tracing::debug!(definition = %definition.name, field = name, "field ignored");
                }
                !ignored
            })
            .map(|(name, field)| {
                let required = shape.is_required(name);
                self.build_field(definition, name, field, required, &mut warnings)
            })
            .collect();

        Ok(Some(EntityDescriptor {
            class_name: definition.name.clone(),
            package_name: self.package_name.to_string(),
            persistence_kind: PersistenceKind::from_marker(kind),
            superclass: annotations.extends().map(SuperClass::parse),
            table_name: annotations.table_name().map(str::to_string),
            unique_constraints: annotations.unique_groups(),
            fields,
            warnings,
        }))
    }

    fn build_field(
        &self,
        owner: &Definition,
        name: &str,
        field: &Field,
        required: bool,
        warnings: &mut Vec<String>,
    ) -> FieldDescriptor {
        let (type_name, collection, element) = match &field.kind {
            FieldKind::Array(ArrayItem::Reference(path)) => {
                (path.name().to_string(), true, self.element_of(path))
            }
            FieldKind::Array(ArrayItem::Primitive(primitive)) => {
                (primitive.scalar().java_type().to_string(), true, ElementKind::Scalar)
            }
            FieldKind::Reference(path) => (path.name().to_string(), false, self.element_of(path)),
            FieldKind::Primitive(primitive) => (
                primitive.scalar().java_type().to_string(),
                false,
                ElementKind::Scalar,
            ),
        };

        let mut relation = match field.reference_target() {
            Some(path) if self.embeddables.contains(path) => Some(RelationKind::Embedded),
            _ => field.annotations.relation(),
        };

        if let Some(kind) = relation.filter(|_| element == ElementKind::Scalar) {
            tracing::warn!(
                definition = %owner.name,
                field = name,
                relation = %kind,
                "relation on scalar field dropped"
            );
            warnings.push(format!(
                "Field '{}.{name}' holds {type_name} values; relation '{kind}' ignored",
                owner.name
            ));
            relation = None;
        }
        if relation.is_none() && collection && element == ElementKind::Definition {
            warnings.push(format!(
                "Field '{}.{name}' lists {type_name} entities without x-rel; \
                 mapped as unidirectional one-to-many",
                owner.name
            ));
        }

        let mapped_by = (relation == Some(RelationKind::OneToMany))
            .then(|| self.mapped_by(owner, name, field));

        FieldDescriptor {
            name: name.to_string(),
            required,
            type_name,
            collection,
            element,
            relation,
            mapped_by,
            column: ColumnConstraints::for_field(required, field),
        }
    }

    fn element_of(&self, path: &RefPath) -> ElementKind {
        if self.embeddables.contains(path) {
            ElementKind::Embeddable
        } else {
            ElementKind::Definition
        }
    }

    /// `x-mapped-by` is taken verbatim; an inferred or policy name is
    /// converted the same way the renderer converts field names.
    fn mapped_by(&self, owner: &Definition, name: &str, field: &Field) -> String {
        if let Some(explicit) = field.annotations.mapped_by() {
            return explicit.to_string();
        }
        let back_reference = match self.report.and_then(|r| r.inverse_field(&owner.name, name)) {
            Some(inverse) => inverse.to_string(),
            None => self.naming.back_reference_name(&owner.name),
        };
        java::field_name(&back_reference)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use jpagen_core::LowerFirstNaming;
    use jpagen_ir::{Branch, RecordGraph, Shape, infer_relations, keys};

    fn build(graph: &RecordGraph, name: &str) -> Option<EntityDescriptor> {
        let lookup = EmbeddableLookup::classify(graph);
        DescriptorBuilder::new(&lookup, "com.acme.model", &LowerFirstNaming)
            .build(graph.by_name(name).unwrap())
            .unwrap()
    }

    /// Infer relations, then build with the inference report
    fn build_inferred(mut graph: RecordGraph, name: &str) -> EntityDescriptor {
        let report = infer_relations(&mut graph, &LowerFirstNaming);
        let lookup = EmbeddableLookup::classify(&graph);
        DescriptorBuilder::new(&lookup, "com.acme.model", &LowerFirstNaming)
            .with_report(&report)
            .build(graph.by_name(name).unwrap())
            .unwrap()
            .unwrap()
    }

    fn entity(name: &str, shape: Shape) -> Definition {
        Definition::with_shape(name, shape.annotated(keys::PERSIST, "Entity"))
    }

    fn single(shape: Shape) -> RecordGraph {
        RecordGraph::from_definitions(vec![Definition::with_shape(
            "User",
            shape.annotated(keys::PERSIST, "Entity"),
        )])
    }

    // ── column constraints ───────────────────────────────────────────────

    #[test]
    fn test_required_unique_summary() {
        let field = Field::primitive("string").annotated(keys::UNIQUE, true);
        let constraints = ColumnConstraints::for_field(true, &field);
        assert_eq!(constraints.summary(), "not nullable, unique");
        assert_eq!(constraints.fragment(), "nullable = false, unique = true");
    }

    #[test]
    fn test_required_only_summary() {
        let constraints = ColumnConstraints::for_field(true, &Field::primitive("string"));
        assert_eq!(constraints.summary(), "not nullable");
        assert_eq!(constraints.to_string(), "nullable = false");
    }

    #[test]
    fn test_clause_order_is_fixed() {
        let mut constraints = ColumnConstraints::new();
        constraints.insert(ColumnClause::Name("mail".into()));
        constraints.insert(ColumnClause::Unique);
        constraints.insert(ColumnClause::NotNullable);
        constraints.insert(ColumnClause::Unique);
        constraints.insert(ColumnClause::NotNullable);

        assert_eq!(
            constraints.clauses(),
            &[
                ColumnClause::NotNullable,
                ColumnClause::Unique,
                ColumnClause::Name("mail".into())
            ]
        );
        assert_eq!(
            constraints.fragment(),
            "nullable = false, unique = true, name = \"mail\""
        );
    }

    #[test]
    fn test_second_column_name_replaces_first() {
        let mut constraints = ColumnConstraints::new();
        constraints.insert(ColumnClause::Name("a".into()));
        constraints.insert(ColumnClause::Name("b".into()));
        assert_eq!(constraints.clauses(), &[ColumnClause::Name("b".into())]);
    }

    #[test]
    fn test_optional_plain_field_has_no_constraints() {
        let constraints = ColumnConstraints::for_field(false, &Field::primitive("string"));
        assert!(constraints.is_empty());
        assert_eq!(constraints.fragment(), "");
    }

    // ── superclass ───────────────────────────────────────────────────────

    #[test]
    fn test_superclass_parse() {
        assert_eq!(
            SuperClass::parse("com.acme.BaseEntity"),
            SuperClass {
                name: "BaseEntity".into(),
                import: Some("com.acme.BaseEntity".into())
            }
        );
        assert_eq!(
            SuperClass::parse("BaseEntity"),
            SuperClass {
                name: "BaseEntity".into(),
                import: None
            }
        );
    }

    // ── builder ──────────────────────────────────────────────────────────

    #[test]
    fn test_non_persistable_definition_yields_nothing() {
        let graph = RecordGraph::from_definitions(vec![Definition::new("Error")]);
        assert_eq!(build(&graph, "Error"), None);
    }

    #[test]
    fn test_blank_persistence_kind_defaults_to_entity() {
        let graph = RecordGraph::from_definitions(vec![Definition::with_shape(
            "User",
            Shape::new().annotated(keys::PERSIST, ""),
        )]);
        let entity = build(&graph, "User").unwrap();
        assert_eq!(entity.persistence_kind, PersistenceKind::Entity);
    }

    #[test]
    fn test_entity_level_metadata() {
        let groups = jpagen_ir::AnnotationValue::List(vec![
            jpagen_ir::AnnotationValue::List(vec!["first".into(), "last".into()]),
            "broken".into(),
        ]);
        let graph = single(
            Shape::new()
                .annotated(keys::TABLE, "users")
                .annotated(keys::EXTENDS, "com.acme.Auditable")
                .annotated(keys::UNIQUE, groups),
        );
        let entity = build(&graph, "User").unwrap();

        assert_eq!(entity.class_name, "User");
        assert_eq!(entity.package_name, "com.acme.model");
        assert_eq!(entity.table_name.as_deref(), Some("users"));
        assert_eq!(
            entity.superclass,
            Some(SuperClass {
                name: "Auditable".into(),
                import: Some("com.acme.Auditable".into())
            })
        );
        assert_eq!(
            entity.unique_constraints,
            vec![vec!["first".to_string(), "last".to_string()]]
        );
    }

    #[test]
    fn test_email_constraints() {
        let graph = single(
            Shape::new()
                .with_required_field(
                    "email",
                    Field::primitive("string").annotated(keys::UNIQUE, true),
                )
                .with_required_field("nickname", Field::primitive("string")),
        );
        let entity = build(&graph, "User").unwrap();

        let email = entity.field("email").unwrap();
        assert!(email.required);
        assert_eq!(email.column.summary(), "not nullable, unique");

        let nickname = entity.field("nickname").unwrap();
        assert_eq!(nickname.column.summary(), "not nullable");
    }

    #[test]
    fn test_ignored_fields_are_skipped() {
        let graph = single(
            Shape::new()
                .with_field("a", Field::primitive("string").annotated(keys::IGNORE, true))
                .with_field("b", Field::primitive("string").annotated(keys::IGNORE, "true"))
                .with_field("c", Field::primitive("string").annotated(keys::IGNORE, false)),
        );
        let entity = build(&graph, "User").unwrap();
        let names: Vec<&str> = entity.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["b", "c"]);
    }

    #[test]
    fn test_type_resolution() {
        let graph = single(
            Shape::new()
                .with_field("name", Field::primitive("string"))
                .with_field("age", Field::primitive("integer"))
                .with_field("balance", Field::primitive("number"))
                .with_field("active", Field::primitive("boolean"))
                .with_field("meta", Field::primitive("object"))
                .with_field("roles", Field::array_of("Role"))
                .with_field("manager", Field::reference("User"))
                .with_field("aliases", Field::array_of_primitive("string")),
        );
        let entity = build(&graph, "User").unwrap();
        let ty = |name: &str| {
            let f = entity.field(name).unwrap();
            (f.type_name.clone(), f.collection)
        };

        assert_eq!(ty("name"), ("String".to_string(), false));
        assert_eq!(ty("age"), ("Integer".to_string(), false));
        assert_eq!(ty("balance"), ("BigDecimal".to_string(), false));
        assert_eq!(ty("active"), ("Boolean".to_string(), false));
        assert_eq!(ty("meta"), ("Object".to_string(), false));
        assert_eq!(ty("roles"), ("Role".to_string(), true));
        assert_eq!(ty("manager"), ("User".to_string(), false));
        assert_eq!(ty("aliases"), ("String".to_string(), true));
    }

    #[test]
    fn test_embedded_reference() {
        let graph = RecordGraph::from_definitions(vec![
            Definition::with_shape(
                "Address",
                Shape::new()
                    .with_field("street", Field::primitive("string"))
                    .annotated(keys::PERSIST, "Embeddable"),
            ),
            Definition::with_shape(
                "Person",
                Shape::new()
                    .with_field(
                        "address",
                        Field::reference("Address").annotated(keys::RELATION, "many-to-one"),
                    )
                    .annotated(keys::PERSIST, "Entity"),
            ),
        ]);

        let person = build(&graph, "Person").unwrap();
        let address = person.field("address").unwrap();
        assert_eq!(address.relation, Some(RelationKind::Embedded));
        assert_eq!(address.type_name, "Address");

        let embeddable = build(&graph, "Address").unwrap();
        assert_eq!(embeddable.persistence_kind, PersistenceKind::Embeddable);
    }

    #[test]
    fn test_author_book_relations_end_to_end() {
        let mut graph = RecordGraph::from_definitions(vec![
            Definition::with_shape(
                "Author",
                Shape::new()
                    .with_field(
                        "books",
                        Field::array_of("Book").annotated(keys::RELATION, "one-to-many"),
                    )
                    .annotated(keys::PERSIST, "Entity"),
            ),
            Definition::with_shape(
                "Book",
                Shape::new()
                    .with_field("author", Field::reference("Author"))
                    .annotated(keys::PERSIST, "Entity"),
            ),
        ]);
        infer_relations(&mut graph, &LowerFirstNaming);

        let author = build(&graph, "Author").unwrap();
        let books = author.field("books").unwrap();
        assert_eq!(books.relation, Some(RelationKind::OneToMany));
        assert_eq!(books.mapped_by.as_deref(), Some("author"));
        assert!(books.collection);

        let book = build(&graph, "Book").unwrap();
        let back = book.field("author").unwrap();
        assert_eq!(back.relation, Some(RelationKind::ManyToOne));
        assert_eq!(back.mapped_by, None);
    }

    #[test]
    fn test_self_reference_maps_by_inferred_field() {
        let graph = RecordGraph::from_definitions(vec![entity(
            "Category",
            Shape::new()
                .with_field("parent", Field::reference("Category"))
                .with_field(
                    "children",
                    Field::array_of("Category").annotated(keys::RELATION, "one-to-many"),
                ),
        )]);

        let category = build_inferred(graph, "Category");

        let children = category.field("children").unwrap();
        assert_eq!(children.mapped_by.as_deref(), Some("parent"));
        assert_eq!(
            category.field("parent").unwrap().relation,
            Some(RelationKind::ManyToOne)
        );
    }

    #[test]
    fn test_back_reference_named_differently_from_owner() {
        let graph = RecordGraph::from_definitions(vec![
            entity(
                "blog-post",
                Shape::new().with_field(
                    "comments",
                    Field::array_of("Comment").annotated(keys::RELATION, "one-to-many"),
                ),
            ),
            entity(
                "Comment",
                Shape::new().with_field("post", Field::reference("blog-post")),
            ),
        ]);

        let post = build_inferred(graph, "blog-post");
        assert_eq!(post.field("comments").unwrap().mapped_by.as_deref(), Some("post"));
    }

    #[test]
    fn test_inferred_inverse_uses_java_field_name() {
        let graph = RecordGraph::from_definitions(vec![
            entity(
                "Author",
                Shape::new().with_field(
                    "books",
                    Field::array_of("Book").annotated(keys::RELATION, "one-to-many"),
                ),
            ),
            entity(
                "Book",
                Shape::new().with_field("written-by", Field::reference("Author")),
            ),
        ]);

        let author = build_inferred(graph, "Author");
        assert_eq!(
            author.field("books").unwrap().mapped_by.as_deref(),
            Some("writtenBy")
        );
    }

    #[test]
    fn test_policy_fallback_without_back_reference() {
        let graph = RecordGraph::from_definitions(vec![
            entity(
                "blog-post",
                Shape::new().with_field(
                    "tags",
                    Field::array_of("Tag").annotated(keys::RELATION, "one-to-many"),
                ),
            ),
            entity("Tag", Shape::new().with_field("label", Field::primitive("string"))),
        ]);

        let post = build_inferred(graph, "blog-post");
        assert_eq!(post.field("tags").unwrap().mapped_by.as_deref(), Some("blogPost"));
    }

    #[test]
    fn test_explicit_mapped_by_is_kept_verbatim() {
        let graph = RecordGraph::from_definitions(vec![
            entity(
                "Author",
                Shape::new().with_field(
                    "books",
                    Field::array_of("Book")
                        .annotated(keys::RELATION, "one-to-many")
                        .annotated(keys::MAPPED_BY, "writer"),
                ),
            ),
            entity("Book", Shape::new().with_field("author", Field::reference("Author"))),
        ]);

        let author = build_inferred(graph, "Author");
        assert_eq!(author.field("books").unwrap().mapped_by.as_deref(), Some("writer"));
    }

    #[test]
    fn test_relation_on_scalars_is_dropped_with_warning() {
        let graph = single(
            Shape::new().with_field(
                "aliases",
                Field::array_of_primitive("string").annotated(keys::RELATION, "one-to-many"),
            ),
        );
        let user = build(&graph, "User").unwrap();

        let aliases = user.field("aliases").unwrap();
        assert_eq!(aliases.relation, None);
        assert_eq!(aliases.mapped_by, None);
        assert_eq!(aliases.element, ElementKind::Scalar);
        assert_eq!(user.warnings.len(), 1);
        assert!(user.warnings[0].contains("User.aliases"));
    }

    #[test]
    fn test_collection_element_kinds() {
        let graph = RecordGraph::from_definitions(vec![
            Definition::with_shape(
                "Address",
                Shape::new().annotated(keys::PERSIST, "Embeddable"),
            ),
            entity(
                "Person",
                Shape::new()
                    .with_field("addresses", Field::array_of("Address"))
                    .with_field("friends", Field::array_of("Person")),
            ),
        ]);
        let person = build(&graph, "Person").unwrap();

        assert_eq!(person.field("addresses").unwrap().element, ElementKind::Embeddable);
        let friends = person.field("friends").unwrap();
        assert_eq!(friends.element, ElementKind::Definition);
        assert_eq!(friends.relation, None);
        assert_eq!(person.warnings.len(), 1);
        assert!(person.warnings[0].contains("Person.friends"));
    }

    #[test]
    fn test_composite_definition_uses_inline_branch() {
        let inline = Shape::new().with_required_field("breed", Field::primitive("string"));
        let shape = Shape::default()
            .with_branch(Branch::Reference(RefPath::component("Pet")))
            .with_branch(Branch::Inline(inline))
            .annotated(keys::PERSIST, "Entity");
        let graph = RecordGraph::from_definitions(vec![Definition::with_shape("Dog", shape)]);

        let dog = build(&graph, "Dog").unwrap();
        assert_eq!(dog.fields.len(), 1);
        assert!(dog.fields[0].required);
    }

    #[test]
    fn test_malformed_composite_fails() {
        let shape = Shape::default()
            .with_branch(Branch::Reference(RefPath::component("Pet")))
            .annotated(keys::PERSIST, "Entity");
        let graph = RecordGraph::from_definitions(vec![Definition::with_shape("Dog", shape)]);
        let lookup = EmbeddableLookup::classify(&graph);

        let err = DescriptorBuilder::new(&lookup, "p", &LowerFirstNaming)
            .build(graph.by_name("Dog").unwrap())
            .unwrap_err();
        assert_eq!(err.definition(), "Dog");
    }
}
