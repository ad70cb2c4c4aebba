//! Read-only accessor members forwarding to annotated fields

use super::{
    EmissionTemplate, SourceWriter, duplicate_diagnostic, in_namespace, located, name_diagnostic,
    write_marker_attribute,
};
use crate::config::{GeneratorConfig, GeneratorKind};
use crate::diagnostic::{Diagnostic, DiagnosticId};
use crate::error::GenResult;
use crate::group::{GroupKey, OutputGroup};
use crate::naming::resolve_name;
use crate::record::ExtractedRecord;
use std::collections::HashSet;

/// Emits one reopened container per group with one expression-bodied
/// accessor per record:
///
/// ```text
/// namespace Game
/// {
///     partial class Player
///     {
///         public int Health => _health;
///     }
/// }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct AccessorTemplate;

impl EmissionTemplate for AccessorTemplate {
    fn kind(&self) -> GeneratorKind {
        GeneratorKind::Accessor
    }

    fn group_key(&self, record: &ExtractedRecord) -> GroupKey {
        GroupKey::Container(record.container_id.clone())
    }

    fn emit_group(
        &self,
        group: &OutputGroup,
        writer: &mut SourceWriter,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> GenResult<usize> {
        let Some((container_name, container_kind)) = group.container() else {
            return Ok(0);
        };

        let mut seen = HashSet::new();
        let mut members = Vec::with_capacity(group.len());
        for record in &group.records {
            match resolve_name(&record.member_name, record.override_name.as_deref()) {
                Ok(name) if name == container_name => {
                    diagnostics.push(enclosing_name_diagnostic(&name, record));
                }
                Ok(name) => {
                    if seen.insert(name.clone()) {
                        members.push((name, record));
                    } else {
                        diagnostics.push(duplicate_diagnostic(&name, record));
                    }
                }
                Err(error) => diagnostics.push(name_diagnostic(&error, record)),
            }
        }

        if members.is_empty() {
            return Ok(0);
        }

        let header = format!("{} {container_name}", container_kind.partial_keyword());
        in_namespace(writer, group.namespace(), |w| {
            w.block(&header, |w| {
                for (name, record) in &members {
                    w.line(&accessor_line(name, record));
                }
                Ok(())
            })
        })?;

        Ok(members.len())
    }

    fn marker_declaration(&self, config: &GeneratorConfig) -> GenResult<String> {
        write_marker_attribute(
            config,
            "global::System.AttributeTargets.Field | global::System.AttributeTargets.Property",
            "name",
            "Name",
        )
    }
}

/// Members may not share the name of their enclosing type
fn enclosing_name_diagnostic(name: &str, record: &ExtractedRecord) -> Diagnostic {
    located(
        Diagnostic::new(
            DiagnosticId::InvalidIdentifier,
            format!("`{name}` is the name of its enclosing type"),
        ),
        record,
    )
}

fn accessor_line(name: &str, record: &ExtractedRecord) -> String {
    let modifiers = if record.is_static {
        "public static"
    } else {
        "public"
    };
    format!(
        "{modifiers} {} {name} => {};",
        record.member_type_id, record.member_name
    )
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;
    use crate::declaration::TypeKind;
    use crate::group::group_records;

    fn record(member: &str, ty: &str, namespace: Option<&str>) -> ExtractedRecord {
        ExtractedRecord {
            container_id: "Game.Player".into(),
            container_name: "Player".into(),
            container_kind: TypeKind::Class,
            member_name: member.into(),
            member_type_id: ty.into(),
            namespace_name: namespace.map(str::to_string),
            override_name: None,
            is_static: false,
            location: None,
        }
    }

    fn render(records: Vec<ExtractedRecord>) -> (String, usize, Vec<Diagnostic>) {
        let template = AccessorTemplate;
        let groups = group_records(records, |r| template.group_key(r));
        let mut writer = SourceWriter::new(4);
        let mut diagnostics = Vec::new();
        let count = template
            .emit_group(&groups[0], &mut writer, &mut diagnostics)
            .unwrap();
        (writer.finish("test").unwrap(), count, diagnostics)
    }

    #[test]
    fn emit_group___player_fields___renders_accessors_in_order() {
        let (text, count, diagnostics) = render(vec![
            record("_health", "int", Some("Game")),
            record("_name", "string", Some("Game")),
        ]);

        assert_eq!(count, 2);
        assert!(diagnostics.is_empty());
        assert_eq!(
            text,
            "namespace Game\n\
             {\n\
             \x20   partial class Player\n\
             \x20   {\n\
             \x20       public int Health => _health;\n\
             \x20       public string Name => _name;\n\
             \x20   }\n\
             }\n"
        );
    }

    #[test]
    fn emit_group___global_namespace___has_no_namespace_block() {
        let (text, _, _) = render(vec![record("_health", "int", None)]);

        assert_eq!(
            text,
            "partial class Player\n{\n    public int Health => _health;\n}\n"
        );
    }

    #[test]
    fn emit_group___override___used_verbatim() {
        let mut custom = record("_health", "int", None);
        custom.override_name = Some("customName".into());

        let (text, _, _) = render(vec![custom]);

        assert!(text.contains("public int customName => _health;"));
    }

    #[test]
    fn emit_group___static_member___emits_static_accessor() {
        let mut counter = record("_count", "int", None);
        counter.is_static = true;

        let (text, _, _) = render(vec![counter]);

        assert!(text.contains("public static int Count => _count;"));
    }

    #[test]
    fn emit_group___struct_container___reopens_struct() {
        let mut field = record("_x", "float", None);
        field.container_kind = TypeKind::RecordStruct;

        let (text, _, _) = render(vec![field]);

        assert!(text.starts_with("partial record struct Player\n"));
    }

    #[test]
    fn emit_group___trailing_underscore___drops_it() {
        let (text, _, _) = render(vec![record("trailing_", "int", None)]);

        assert!(text.contains("public int trailing => trailing_;"));
    }

    #[test]
    fn emit_group___duplicate_name___keeps_first_and_warns() {
        let (text, count, diagnostics) = render(vec![
            record("_health", "int", None),
            record("__health", "long", None),
        ]);

        assert_eq!(count, 1);
        assert!(text.contains("public int Health => _health;"));
        assert!(!text.contains("__health"));
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].id, DiagnosticId::DuplicateName);
        assert_eq!(diagnostics[0].member.as_deref(), Some("__health"));
    }

    #[test]
    fn emit_group___invalid_names___skip_member_with_diagnostics() {
        let mut keyword = record("_kind", "int", None);
        keyword.override_name = Some("class".into());

        let (text, count, diagnostics) = render(vec![
            record("_", "int", None),
            record("Health", "int", None),
            keyword,
            record("_ok", "bool", None),
        ]);

        assert_eq!(count, 1);
        assert!(text.contains("public bool Ok => _ok;"));
        let ids: Vec<_> = diagnostics.iter().map(|d| d.id).collect();
        assert_eq!(
            ids,
            vec![
                DiagnosticId::EmptyName,
                DiagnosticId::SelfReference,
                DiagnosticId::InvalidIdentifier
            ]
        );
    }

    #[test]
    fn emit_group___name_of_enclosing_type___is_rejected() {
        let (_, count, diagnostics) = render(vec![
            record("_player", "int", None),
            record("_level", "int", None),
        ]);

        assert_eq!(count, 1);
        assert_eq!(diagnostics[0].id, DiagnosticId::InvalidIdentifier);
        assert_eq!(diagnostics[0].member.as_deref(), Some("_player"));
    }

    #[test]
    fn emit_group___nothing_emittable___writes_nothing() {
        let template = AccessorTemplate;
        let groups = group_records(vec![record("_", "int", Some("Game"))], |r| {
            template.group_key(r)
        });
        let mut writer = SourceWriter::new(4);
        let mut diagnostics = Vec::new();

        let count = template
            .emit_group(&groups[0], &mut writer, &mut diagnostics)
            .unwrap();

        assert_eq!(count, 0);
        assert!(writer.is_empty());
        assert_eq!(diagnostics.len(), 1);
    }

    #[test]
    fn marker_declaration___declares_expose_attribute() {
        let text = AccessorTemplate
            .marker_declaration(&GeneratorConfig::default())
            .unwrap();

        assert!(text.starts_with("// <auto-generated/>\n"));
        assert!(text.contains("namespace Partialgen\n{"));
        assert!(text.contains("internal sealed class ExposeAttribute : global::System.Attribute"));
        assert!(text.contains("global::System.AttributeTargets.Field | global::System.AttributeTargets.Property"));
        assert!(text.contains("public ExposeAttribute(string name)"));
        assert!(text.contains("public string Name { get; }"));
    }

    #[test]
    fn marker_declaration___global_namespace___has_no_namespace_block() {
        let config = GeneratorConfig {
            marker_namespace: String::new(),
            ..GeneratorConfig::default()
        };

        let text = AccessorTemplate.marker_declaration(&config).unwrap();

        assert!(!text.contains("namespace"));
        assert!(text.contains("\ninternal sealed class ExposeAttribute"));
    }
}
