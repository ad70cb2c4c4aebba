//! Static factories that load annotated types from text or bytes

use super::{
    EmissionTemplate, SourceWriter, duplicate_diagnostic, in_namespace, name_diagnostic,
    write_marker_attribute,
};
use crate::config::{GeneratorConfig, GeneratorKind, LoaderConfig};
use crate::diagnostic::Diagnostic;
use crate::error::GenResult;
use crate::group::{GroupKey, OutputGroup};
use crate::naming::resolve_name;
use crate::record::ExtractedRecord;
use std::collections::HashSet;

/// Emits, per annotated type, a reopened declaration with two factories:
///
/// ```text
/// partial struct Config
/// {
///     public static Config Load(string path)
///     {
///         return Deserialize<Config>(ReadAllText(path));
///     }
///
///     public static Config Load(byte[] bytes)
///     {
///         return Deserialize<Config>(bytes);
///     }
/// }
/// ```
///
/// The content loader and deserializer are only referenced by name.
#[derive(Debug, Clone)]
pub struct LoaderTemplate {
    config: LoaderConfig,
}

impl LoaderTemplate {
    pub fn new(config: LoaderConfig) -> Self {
        Self { config }
    }

    fn write_type(&self, w: &mut SourceWriter, method: &str, record: &ExtractedRecord) -> GenResult<()> {
        let ty = &record.member_type_id;
        let deserializer = &self.config.deserializer;
        let header = format!(
            "{} {}",
            record.container_kind.partial_keyword(),
            record.container_name
        );

        w.block(&header, |w| {
            w.block(&format!("public static {ty} {method}(string path)"), |w| {
                w.line(&format!(
                    "return {deserializer}<{ty}>({}(path));",
                    self.config.content_loader
                ));
                Ok(())
            })?;
            w.blank();
            w.block(&format!("public static {ty} {method}(byte[] bytes)"), |w| {
                w.line(&format!("return {deserializer}<{ty}>(bytes);"));
                Ok(())
            })
        })
    }
}

impl Default for LoaderTemplate {
    fn default() -> Self {
        Self::new(LoaderConfig::default())
    }
}

impl EmissionTemplate for LoaderTemplate {
    fn kind(&self) -> GeneratorKind {
        GeneratorKind::Loader
    }

    fn group_key(&self, record: &ExtractedRecord) -> GroupKey {
        GroupKey::Namespace(record.namespace_name.clone())
    }

    fn emit_group(
        &self,
        group: &OutputGroup,
        writer: &mut SourceWriter,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> GenResult<usize> {
        let mut seen = HashSet::new();
        let mut types = Vec::with_capacity(group.len());
        for record in &group.records {
            let requested = record
                .override_name
                .as_deref()
                .unwrap_or(&self.config.method_name);
            let method = match resolve_name(&record.container_name, Some(requested)) {
                Ok(method) => method,
                Err(error) => {
                    diagnostics.push(name_diagnostic(&error, record));
                    continue;
                }
            };
            if seen.insert(record.container_id.as_str()) {
                types.push((method, record));
            } else {
                diagnostics.push(duplicate_diagnostic(&method, record));
            }
        }

        if types.is_empty() {
            return Ok(0);
        }

        in_namespace(writer, group.namespace(), |w| {
            for (position, (method, record)) in types.iter().enumerate() {
                if position > 0 {
                    w.blank();
                }
                self.write_type(w, method, record)?;
            }
            Ok(())
        })?;

        Ok(types.len())
    }

    fn marker_declaration(&self, config: &GeneratorConfig) -> GenResult<String> {
        write_marker_attribute(
            config,
            "global::System.AttributeTargets.Class | global::System.AttributeTargets.Struct",
            "methodName",
            "MethodName",
        )
    }
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;
    use crate::declaration::TypeKind;
    use crate::diagnostic::DiagnosticId;
    use crate::group::group_records;

    fn record(name: &str, qualified: &str, namespace: Option<&str>, kind: TypeKind) -> ExtractedRecord {
        ExtractedRecord {
            container_id: qualified.into(),
            container_name: name.into(),
            container_kind: kind,
            member_name: name.into(),
            member_type_id: qualified.into(),
            namespace_name: namespace.map(str::to_string),
            override_name: None,
            is_static: false,
            location: None,
        }
    }

    fn render(
        template: &LoaderTemplate,
        records: Vec<ExtractedRecord>,
    ) -> (Vec<String>, Vec<Diagnostic>) {
        let groups = group_records(records, |r| template.group_key(r));
        let mut diagnostics = Vec::new();
        let texts = groups
            .iter()
            .map(|group| {
                let mut writer = SourceWriter::new(4);
                template
                    .emit_group(group, &mut writer, &mut diagnostics)
                    .unwrap();
                writer.finish("test").unwrap()
            })
            .collect();
        (texts, diagnostics)
    }

    #[test]
    fn emit_group___global_struct___renders_both_loaders() {
        let (texts, diagnostics) = render(
            &LoaderTemplate::default(),
            vec![record("Config", "Config", None, TypeKind::Struct)],
        );

        assert!(diagnostics.is_empty());
        assert_eq!(
            texts[0],
            "partial struct Config\n\
             {\n\
             \x20   public static Config Load(string path)\n\
             \x20   {\n\
             \x20       return global::System.Text.Json.JsonSerializer.Deserialize<Config>(global::System.IO.File.ReadAllText(path));\n\
             \x20   }\n\
             \n\
             \x20   public static Config Load(byte[] bytes)\n\
             \x20   {\n\
             \x20       return global::System.Text.Json.JsonSerializer.Deserialize<Config>(bytes);\n\
             \x20   }\n\
             }\n"
        );
    }

    #[test]
    fn emit_group___namespace___wraps_every_type_of_the_group() {
        let (texts, _) = render(
            &LoaderTemplate::default(),
            vec![
                record("Save", "Game.Save", Some("Game"), TypeKind::Class),
                record("Level", "Game.Level", Some("Game"), TypeKind::Record),
            ],
        );

        assert_eq!(texts.len(), 1);
        let text = &texts[0];
        assert!(text.starts_with("namespace Game\n{\n    partial class Save\n"));
        assert!(text.contains("\n\n    partial record Level\n"));
        assert!(text.contains("public static Game.Level Load(byte[] bytes)"));
        assert_eq!(text.matches("namespace Game").count(), 1);
    }

    #[test]
    fn emit_group___custom_collaborators___are_referenced() {
        let template = LoaderTemplate::new(LoaderConfig {
            method_name: "FromJson".into(),
            content_loader: "Io.ReadText".into(),
            deserializer: "Codec.Decode".into(),
        });

        let (texts, _) = render(&template, vec![record("Config", "Config", None, TypeKind::Class)]);

        assert!(texts[0].contains("public static Config FromJson(string path)"));
        assert!(texts[0].contains("return Codec.Decode<Config>(Io.ReadText(path));"));
        assert!(texts[0].contains("return Codec.Decode<Config>(bytes);"));
    }

    #[test]
    fn emit_group___override___renames_factories() {
        let mut config = record("Config", "Config", None, TypeKind::Class);
        config.override_name = Some("Read".into());

        let (texts, _) = render(&LoaderTemplate::default(), vec![config]);

        assert!(texts[0].contains("public static Config Read(string path)"));
        assert!(texts[0].contains("public static Config Read(byte[] bytes)"));
    }

    #[test]
    fn emit_group___override_matching_type_name___is_rejected() {
        let mut config = record("Config", "Config", None, TypeKind::Class);
        config.override_name = Some("Config".into());

        let (texts, diagnostics) = render(&LoaderTemplate::default(), vec![config]);

        assert!(texts[0].is_empty());
        assert_eq!(diagnostics[0].id, DiagnosticId::SelfReference);
    }

    #[test]
    fn emit_group___repeated_type___emitted_once() {
        let (texts, diagnostics) = render(
            &LoaderTemplate::default(),
            vec![
                record("Config", "Config", None, TypeKind::Class),
                record("Config", "Config", None, TypeKind::Class),
            ],
        );

        assert_eq!(texts[0].matches("partial class Config").count(), 1);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].id, DiagnosticId::DuplicateName);
    }

    #[test]
    fn marker_declaration___declares_loadable_attribute() {
        let config = GeneratorConfig::new(GeneratorKind::Loader);

        let text = LoaderTemplate::default().marker_declaration(&config).unwrap();

        assert!(text.contains("internal sealed class JsonLoadableAttribute"));
        assert!(text.contains("global::System.AttributeTargets.Class | global::System.AttributeTargets.Struct"));
        assert!(text.contains("public JsonLoadableAttribute(string methodName)"));
        assert!(text.contains("MethodName = methodName;"));
    }
}
