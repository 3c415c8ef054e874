//! # JPA Entity Renderer
//!
//! Turns one [`EntityDescriptor`] into a Java class:
//!
//! - `package` line and the default wildcard imports, plus the superclass
//!   import when `x-extends` was fully qualified
//! - `@Entity` / `@Embeddable` / ..., then `@Table` when a table name or
//!   unique groups are present
//! - Lombok `@Getter @Setter @NoArgsConstructor`
//! - one private field per descriptor field, annotated by relation kind
//!
//! ## Field Annotations
//!
//! | relation       | annotations                         | type      |
//! |----------------|-------------------------------------|-----------|
//! | embedded       | `@Embedded`                         | `T`       |
//! | one-to-many    | `@OneToMany(mappedBy = "...")`      | `List<T>` |
//! | many-to-one    | `@ManyToOne` + `@JoinColumn(...)`   | `T`       |
//! | one-to-one     | `@OneToOne` + `@JoinColumn(...)`    | `T`       |
//! | many-to-many   | `@ManyToMany`                       | `List<T>` |
//! | none, entities | `@OneToMany` (unidirectional)       | `List<T>` |
//! | none, values   | `@ElementCollection` + `@Column`    | `List<T>` |
//! | none           | `@Column(...)`                      | `T`       |
//!
//! `@JoinColumn` and `@Column` are only written when the column fragment is
//! non-empty. An element collection of embeddables gets no `@Column`.

use jpagen_core::{EngineError, EngineResult, RelationKind};

use crate::descriptor::{
    ColumnClause, ColumnConstraints, ElementKind, EntityDescriptor, FieldDescriptor,
};
use crate::java::{
    DEFAULT_IMPORTS, class_name, escape, field_name, is_java_identifier, source_path,
};
use crate::{EntityRenderer, GeneratedFile};

const INDENT: &str = "    ";

// ============================================================================
// JpaRenderer
// ============================================================================

/// Renders JPA entities with Lombok accessors
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JpaRenderer;

impl JpaRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl EntityRenderer for JpaRenderer {
    fn render(&self, entity: &EntityDescriptor) -> EngineResult<GeneratedFile> {
        let class = class_name(&entity.class_name);
        if !is_java_identifier(&class) {
            return Err(EngineError::render(
                &entity.class_name,
                format!("'{class}' is not a valid Java class name"),
            ));
        }

        let mut content = String::with_capacity(1024);

        // Header
        content.push_str(&format!("package {};\n\n", entity.package_name));
        content.push_str(&render_imports(entity));
        content.push('\n');

        // Class annotations
        content.push_str(&format!("@{}\n", entity.persistence_kind.annotation()));
        if let Some(table) = render_table(entity) {
            content.push_str(&table);
        }
        content.push_str("@Getter\n@Setter\n@NoArgsConstructor\n");

        // Class body
        match &entity.superclass {
            Some(superclass) => content.push_str(&format!(
                "public class {class} extends {} {{\n",
                superclass.name
            )),
            None => content.push_str(&format!("public class {class} {{\n")),
        }

        for field in &entity.fields {
            content.push('\n');
            content.push_str(&render_field(&entity.class_name, field)?);
        }

        content.push_str("}\n");

        Ok(GeneratedFile::new(
            source_path(&entity.package_name, &class),
            content,
        ))
    }
}

// ============================================================================
// Class level
// ============================================================================

fn render_imports(entity: &EntityDescriptor) -> String {
    let mut out = String::with_capacity(160);
    for import in DEFAULT_IMPORTS {
        out.push_str(&format!("import {import};\n"));
    }
    if let Some(import) = entity.superclass.as_ref().and_then(|s| s.import.as_deref()) {
        out.push_str(&format!("import {import};\n"));
    }
    out
}

/// `@Table(...)`, or nothing when there is neither a name nor a unique group
fn render_table(entity: &EntityDescriptor) -> Option<String> {
    if entity.table_name.is_none() && entity.unique_constraints.is_empty() {
        return None;
    }

    let mut attributes = Vec::new();
    if let Some(name) = &entity.table_name {
        attributes.push(format!("name = \"{}\"", escape(name)));
    }

    if entity.unique_constraints.is_empty() {
        return Some(format!("@Table({})\n", attributes.join(", ")));
    }

    let groups = entity
        .unique_constraints
        .iter()
        .map(|group| {
            let columns = group
                .iter()
                .map(|column| format!("\"{}\"", escape(column)))
                .collect::<Vec<_>>()
                .join(", ");
            format!("{INDENT}@UniqueConstraint(columnNames = {{{columns}}})")
        })
        .collect::<Vec<_>>()
        .join(",\n");
    attributes.push("uniqueConstraints = {".to_string());

    Some(format!("@Table({}\n{groups}\n}})\n", attributes.join(", ")))
}

// ============================================================================
// Field level
// ============================================================================

fn render_field(owner: &str, field: &FieldDescriptor) -> EngineResult<String> {
    let identifier = field_name(&field.name);
    if !is_java_identifier(&identifier) {
        return Err(EngineError::render(
            owner,
            format!("field '{}' has no valid Java identifier", field.name),
        ));
    }

    // A renamed field keeps its schema name as the column name.
    let mut column = field.column.clone();
    if identifier != field.name
        && !column
            .clauses()
            .iter()
            .any(|clause| matches!(clause, ColumnClause::Name(_)))
    {
        column.insert(ColumnClause::Name(field.name.clone()));
    }

    let element = class_name(&field.type_name);
    let java_type = if field.collection || field.relation.is_some_and(|k| k.is_to_many()) {
        format!("List<{element}>")
    } else {
        element
    };

    let annotations = match field.relation {
        Some(RelationKind::Embedded) => vec!["@Embedded".to_string()],
        Some(RelationKind::OneToMany) => match &field.mapped_by {
            Some(mapped_by) => {
                vec![format!("@OneToMany(mappedBy = \"{}\")", escape(mapped_by))]
            }
            None => vec!["@OneToMany".to_string()],
        },
        Some(kind @ (RelationKind::ManyToOne | RelationKind::OneToOne)) => {
            let mut annotations = vec![format!("@{}", annotation_name(kind))];
            annotations.extend(column_annotation("JoinColumn", &column));
            annotations
        }
        Some(RelationKind::ManyToMany) => vec!["@ManyToMany".to_string()],
        None if field.collection => match field.element {
            ElementKind::Definition => vec!["@OneToMany".to_string()],
            ElementKind::Embeddable => vec!["@ElementCollection".to_string()],
            ElementKind::Scalar => {
                let mut annotations = vec!["@ElementCollection".to_string()];
                annotations.extend(column_annotation("Column", &column));
                annotations
            }
        },
        None => column_annotation("Column", &column).into_iter().collect(),
    };

    let mut out = String::with_capacity(128);
    for annotation in annotations {
        out.push_str(&format!("{INDENT}{annotation}\n"));
    }
    out.push_str(&format!("{INDENT}private {java_type} {identifier};\n"));
    Ok(out)
}

fn column_annotation(name: &str, column: &ColumnConstraints) -> Option<String> {
    (!column.is_empty()).then(|| format!("@{name}({column})"))
}

fn annotation_name(kind: RelationKind) -> &'static str {
    match kind {
        RelationKind::Embedded => "Embedded",
        RelationKind::OneToOne => "OneToOne",
        RelationKind::OneToMany => "OneToMany",
        RelationKind::ManyToOne => "ManyToOne",
        RelationKind::ManyToMany => "ManyToMany",
    }
}

// ============================================================================
// Tests
// ============================================================================
