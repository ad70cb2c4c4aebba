//! Metadata extraction: one declaration in, one record or one diagnostic out

use crate::config::GeneratorKind;
use crate::declaration::{AnnotatedDeclaration, DeclarationKind};
use crate::diagnostic::{Diagnostic, DiagnosticId};
use crate::naming::simple_name;
use crate::record::ExtractedRecord;
use crate::scan::MarkerSet;

/// Strip the quote delimiters from a raw string-literal argument.
///
/// Exactly one leading and one trailing `"` are removed; escape sequences
/// inside the literal are left as written. Returns `None` when the argument
/// is not wrapped in quotes.
///
/// # Examples
///
/// ```
/// use partialgen_core::strip_override_literal;
///
/// assert_eq!(strip_override_literal("\"customName\""), Some("customName"));
/// assert_eq!(strip_override_literal("customName"), None);
/// assert_eq!(strip_override_literal("\""), None);
/// ```
pub fn strip_override_literal(raw: &str) -> Option<&str> {
    if raw.len() >= 2 && raw.starts_with('"') && raw.ends_with('"') {
        Some(&raw[1..raw.len() - 1])
    } else {
        None
    }
}

/// Map one annotated declaration to an [`ExtractedRecord`]
///
/// Declarations whose symbols the host could not resolve, or whose override
/// argument is malformed, produce a [`Diagnostic`] instead.
pub fn extract(
    decl: &AnnotatedDeclaration,
    kind: GeneratorKind,
    markers: &MarkerSet,
) -> Result<ExtractedRecord, Diagnostic> {
    let override_name = override_argument(decl, markers)?;

    if decl.name.trim().is_empty() {
        return Err(
            Diagnostic::new(DiagnosticId::UnresolvedSymbol, "declaration has no name")
                .for_declaration(decl),
        );
    }

    let type_ref = decl
        .type_ref
        .as_deref()
        .map(str::trim)
        .filter(|type_ref| !type_ref.is_empty())
        .ok_or_else(|| {
            Diagnostic::new(
                DiagnosticId::UnresolvedSymbol,
                "type reference could not be resolved",
            )
            .for_declaration(decl)
        })?;

    let namespace_name = decl.namespace_name().map(str::to_string);

    match (kind, decl.kind) {
        (GeneratorKind::Accessor, DeclarationKind::Field | DeclarationKind::Property) => {
            let container = decl.container.as_ref().ok_or_else(|| {
                Diagnostic::new(
                    DiagnosticId::UnresolvedSymbol,
                    "containing type could not be resolved",
                )
                .for_declaration(decl)
            })?;
            if container.qualified_name.trim().is_empty() {
                return Err(Diagnostic::new(
                    DiagnosticId::UnresolvedSymbol,
                    "containing type has no qualified name",
                )
                .for_declaration(decl));
            }

            let container_name = if container.name.trim().is_empty() {
                simple_name(&container.qualified_name).to_string()
            } else {
                container.name.clone()
            };

            Ok(ExtractedRecord {
                container_id: container.qualified_name.clone(),
                container_name,
                container_kind: container.kind,
                member_name: decl.name.clone(),
                member_type_id: type_ref.to_string(),
                namespace_name,
                override_name,
                is_static: decl.is_static,
                location: decl.location.clone(),
            })
        }
        (GeneratorKind::Loader, DeclarationKind::Type) => {
            if decl.container.is_some() {
                return Err(Diagnostic::new(
                    DiagnosticId::UnsupportedTarget,
                    "nested types cannot be reopened at namespace level",
                )
                .for_declaration(decl));
            }

            Ok(ExtractedRecord {
                container_id: type_ref.to_string(),
                container_name: decl.name.clone(),
                container_kind: decl.type_kind.unwrap_or_default(),
                member_name: decl.name.clone(),
                member_type_id: type_ref.to_string(),
                namespace_name,
                override_name,
                is_static: false,
                location: decl.location.clone(),
            })
        }
        (kind, declaration_kind) => Err(Diagnostic::new(
            DiagnosticId::UnsupportedTarget,
            format!("{kind} generator does not apply to {declaration_kind:?} declarations"),
        )
        .for_declaration(decl)),
    }
}

/// Effective override from the first argument of the first marker attribute
fn override_argument(
    decl: &AnnotatedDeclaration,
    markers: &MarkerSet,
) -> Result<Option<String>, Diagnostic> {
    let Some(raw) = markers
        .find(decl)
        .and_then(|attribute| attribute.arguments.first())
    else {
        return Ok(None);
    };

    strip_override_literal(raw)
        .map(|name| Some(name.to_string()))
        .ok_or_else(|| {
            Diagnostic::new(
                DiagnosticId::MalformedOverride,
                format!("override argument {raw} is not a quoted string literal"),
            )
            .for_declaration(decl)
        })
}
