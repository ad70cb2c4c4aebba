//! Flat metadata extracted from one declaration

use crate::declaration::{SourceLocation, TypeKind};

/// Immutable facts about one annotated declaration, ready for grouping
///
/// For type-level generation the container is the annotated type itself, so
/// `container_id` and `member_type_id` name the same type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedRecord {
    /// Fully qualified name of the enclosing type
    pub container_id: String,

    /// Simple name of the enclosing type, for display only
    pub container_name: String,

    pub container_kind: TypeKind,

    pub member_name: String,

    /// Fully qualified type reference of the member
    pub member_type_id: String,

    /// `None` for the global namespace
    pub namespace_name: Option<String>,

    /// Requested output name with its quote delimiters already stripped
    pub override_name: Option<String>,

    pub is_static: bool,

    pub location: Option<SourceLocation>,
}
