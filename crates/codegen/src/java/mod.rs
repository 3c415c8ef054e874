//! # Java Source Generation
//!
//! Renders [`EntityDescriptor`](crate::EntityDescriptor)s as JPA-annotated
//! Java classes with Lombok accessors.
//!
//! ## Generated Files
//!
//! One file per descriptor, at `<package as directories>/<ClassName>.java`.
//!
//! ## Naming
//!
//! Schema names are used verbatim when they are valid Java identifiers.
//! Anything else is converted with `heck` (`line-item` → `LineItem` for
//! classes, `first-name` → `firstName` for fields); a converted field keeps
//! its schema name as the column name.

pub mod entity;

pub use entity::JpaRenderer;

use heck::{ToLowerCamelCase, ToUpperCamelCase};
use std::path::PathBuf;

/// Imports every generated class starts with
pub const DEFAULT_IMPORTS: &[&str] = &[
    "jakarta.persistence.*",
    "java.util.*",
    "java.time.*",
    "java.math.*",
    "lombok.*",
];

const RESERVED: &[&str] = &[
    "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char", "class", "const",
    "continue", "default", "do", "double", "else", "enum", "extends", "final", "finally", "float",
    "for", "goto", "if", "implements", "import", "instanceof", "int", "interface", "long",
    "native", "new", "package", "private", "protected", "public", "return", "short", "static",
    "strictfp", "super", "switch", "synchronized", "this", "throw", "throws", "transient", "try",
    "void", "volatile", "while", "true", "false", "null", "record", "var", "yield",
];

// ============================================================================
// Naming helpers
// ============================================================================

/// Whether `name` can be used as a Java identifier as-is
pub fn is_java_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first.is_alphabetic() || first == '_' || first == '$')
        && chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
        && !RESERVED.contains(&name)
}

/// Class name for a definition name (e.g. "line-item" → "LineItem")
pub fn class_name(name: &str) -> String {
    if is_java_identifier(name) {
        name.to_string()
    } else {
        name.to_upper_camel_case()
    }
}

/// Field identifier for a schema property name (e.g. "first-name" → "firstName")
pub fn field_name(name: &str) -> String {
    if is_java_identifier(name) {
        return name.to_string();
    }
    let converted = name.to_lower_camel_case();
    if RESERVED.contains(&converted.as_str()) {
        format!("{converted}_")
    } else {
        converted
    }
}

/// Escape a value for use inside a Java string literal
pub fn escape(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Relative path of a class file: `com.acme.model` + `Book` → `com/acme/model/Book.java`
pub fn source_path(package_name: &str, class_name: &str) -> PathBuf {
    let mut path: PathBuf = package_name
        .split('.')
        .filter(|segment| !segment.is_empty())
        .collect();
    path.push(format!("{class_name}.java"));
    path
}

// ============================================================================
// Tests
// ============================================================================
