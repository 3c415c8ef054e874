//! Core traits for jpagen
//!
//! This module defines the policy seams the resolution engine is generic
//! over. Callers plug in their own implementation where the schema-authoring
//! convention differs from the default.

// ============================================================================
// BackReferenceNaming Trait
// ============================================================================

/// Policy that names the back-reference field of a one-to-many relation
///
/// When a one-to-many field carries no explicit `x-mapped-by` annotation, the
/// field on the target that points back at the owner is assumed to be named
/// by this policy, applied to the owning definition's name.
///
/// # Example
///
/// ```rust
/// use jpagen_core::{BackReferenceNaming, LowerFirstNaming};
///
/// assert_eq!(LowerFirstNaming.back_reference_name("Author"), "author");
///
/// let snake = |name: &str| name.to_lowercase() + "_ref";
/// assert_eq!(snake.back_reference_name("Author"), "author_ref");
/// ```
pub trait BackReferenceNaming {
    /// Field name the target uses to point back at `owner`
    fn back_reference_name(&self, owner: &str) -> String;
}

/// Default policy: lower-case the first character, leave the rest untouched.
///
/// `BlogPost` becomes `blogPost`, `URL` becomes `uRL`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LowerFirstNaming;

impl BackReferenceNaming for LowerFirstNaming {
    fn back_reference_name(&self, owner: &str) -> String {
        let mut chars = owner.chars();
        match chars.next() {
            None => String::new(),
            Some(first) => first.to_lowercase().chain(chars).collect(),
        }
    }
}

impl<F> BackReferenceNaming for F
where
    F: Fn(&str) -> String,
{
    fn back_reference_name(&self, owner: &str) -> String {
        self(owner)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lower_first_naming() {
        assert_eq!(LowerFirstNaming.back_reference_name("Author"), "author");
        assert_eq!(LowerFirstNaming.back_reference_name("BlogPost"), "blogPost");
        assert_eq!(LowerFirstNaming.back_reference_name("URL"), "uRL");
        assert_eq!(LowerFirstNaming.back_reference_name("x"), "x");
        assert_eq!(LowerFirstNaming.back_reference_name(""), "");
    }

    #[test]
    fn test_closure_naming() {
        let policy = |owner: &str| format!("{}Ref", owner.to_lowercase());
        assert_eq!(policy.back_reference_name("Author"), "authorRef");
    }

    #[test]
    fn test_naming_as_trait_object() {
        let policy: &dyn BackReferenceNaming = &LowerFirstNaming;
        assert_eq!(policy.back_reference_name("Order"), "order");
    }
}
