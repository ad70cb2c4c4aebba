//! Emission templates.
//!
//! A template decides how records are grouped and how one group is rendered.
//! The pipeline owns unit assembly, so templates only ever write complete,
//! balanced blocks into the [`SourceWriter`] they are given.
//!
//! - [`AccessorTemplate`]: read-only accessors, one reopened container per group
//! - [`LoaderTemplate`]: static `Load(path)` / `Load(bytes)` factories, grouped by namespace

mod accessor;
mod loader;
mod writer;

pub use accessor::AccessorTemplate;
pub use loader::LoaderTemplate;
pub use writer::SourceWriter;

use crate::config::{GeneratorConfig, GeneratorKind};
use crate::diagnostic::{Diagnostic, DiagnosticId};
use crate::error::GenResult;
use crate::group::{GroupKey, OutputGroup};
use crate::naming::NameError;
use crate::record::ExtractedRecord;

/// First line of every published unit
pub const AUTO_GENERATED_HEADER: &str = "// <auto-generated/>";

/// A pluggable output shape
pub trait EmissionTemplate: Send + Sync {
    fn kind(&self) -> GeneratorKind;

    /// Grouping key for one record
    fn group_key(&self, record: &ExtractedRecord) -> GroupKey;

    /// Render one group at depth 0 of `writer`
    ///
    /// Returns the number of members written. Records that cannot be emitted
    /// are reported through `diagnostics`; when none survive, nothing is written.
    fn emit_group(
        &self,
        group: &OutputGroup,
        writer: &mut SourceWriter,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> GenResult<usize>;

    /// Fixed text declaring the marker attribute itself
    fn marker_declaration(&self, config: &GeneratorConfig) -> GenResult<String>;
}

/// Build the template selected by `config.kind`
pub fn template_for(config: &GeneratorConfig) -> Box<dyn EmissionTemplate> {
    match config.kind {
        GeneratorKind::Accessor => Box::new(AccessorTemplate),
        GeneratorKind::Loader => Box::new(LoaderTemplate::new(config.loader.clone())),
    }
}

/// Run `body` inside `namespace <name>` when a namespace is present
pub(crate) fn in_namespace<F>(
    writer: &mut SourceWriter,
    namespace: Option<&str>,
    body: F,
) -> GenResult<()>
where
    F: FnOnce(&mut SourceWriter) -> GenResult<()>,
{
    match namespace {
        Some(namespace) => writer.block(&format!("namespace {namespace}"), body),
        None => body(writer),
    }
}

pub(crate) fn name_diagnostic(error: &NameError, record: &ExtractedRecord) -> Diagnostic {
    let id = match error {
        NameError::Empty { .. } => DiagnosticId::EmptyName,
        NameError::InvalidIdentifier { .. } => DiagnosticId::InvalidIdentifier,
        NameError::SelfReference { .. } => DiagnosticId::SelfReference,
    };
    located(Diagnostic::new(id, error.to_string()), record)
}

pub(crate) fn duplicate_diagnostic(name: &str, record: &ExtractedRecord) -> Diagnostic {
    located(
        Diagnostic::new(
            DiagnosticId::DuplicateName,
            format!(
                "`{name}` is already generated in {}; skipping",
                record.container_id
            ),
        ),
        record,
    )
}

fn located(diagnostic: Diagnostic, record: &ExtractedRecord) -> Diagnostic {
    let mut diagnostic = diagnostic.for_member(record.member_name.clone());
    diagnostic.location = record.location.clone();
    diagnostic
}

/// Marker attribute class shared by both templates
pub(crate) fn write_marker_attribute(
    config: &GeneratorConfig,
    targets: &str,
    parameter: &str,
    property: &str,
) -> GenResult<String> {
    let attribute = config.marker_attribute_name();
    let mut writer = SourceWriter::new(config.indent_width);
    writer.line(AUTO_GENERATED_HEADER);
    writer.blank();

    let namespace = Some(config.marker_namespace.as_str()).filter(|ns| !ns.is_empty());
    in_namespace(&mut writer, namespace, |w| {
        w.line(&format!(
            "[global::System.AttributeUsage({targets}, Inherited = false, AllowMultiple = false)]"
        ));
        w.block(
            &format!("internal sealed class {attribute} : global::System.Attribute"),
            |w| {
                w.block(&format!("public {attribute}()"), |_| Ok(()))?;
                w.blank();
                w.block(&format!("public {attribute}(string {parameter})"), |w| {
                    w.line(&format!("{property} = {parameter};"));
                    Ok(())
                })?;
                w.blank();
                w.line(&format!("public string {property} {{ get; }}"));
                Ok(())
            },
        )
    })?;

    writer.finish(&config.marker_hint())
}
