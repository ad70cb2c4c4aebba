//! One generation pass: scan, extract, group, emit, publish

use crate::cancel::CancellationToken;
use crate::config::{GeneratorConfig, GeneratorKind, UnitMode};
use crate::declaration::AnnotatedDeclaration;
use crate::diagnostic::{Diagnostic, Severity};
use crate::emit::{AUTO_GENERATED_HEADER, EmissionTemplate, SourceWriter, template_for};
use crate::error::GenResult;
use crate::extract::extract;
use crate::group::{OutputGroup, group_records};
use crate::publish::{BuildSink, GeneratedUnit};
use crate::scan::{MarkerSet, scan};
use serde::Serialize;
use tracing::{debug, info, warn};

/// Summary of a completed pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PassReport {
    pub kind: GeneratorKind,

    /// Declarations inspected
    pub scanned: usize,

    /// Declarations carrying the marker
    pub selected: usize,

    /// Records that made it through extraction
    pub extracted: usize,

    pub groups: usize,

    pub members_emitted: usize,

    /// Logical names published, marker unit first
    pub units: Vec<String>,

    pub diagnostics: Vec<Diagnostic>,
}

impl PassReport {
    pub fn error_count(&self) -> usize {
        self.count(Severity::Error)
    }

    pub fn warning_count(&self) -> usize {
        self.count(Severity::Warning)
    }

    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    fn count(&self, severity: Severity) -> usize {
        self.diagnostics
            .iter()
            .filter(|diagnostic| diagnostic.severity == severity)
            .count()
    }
}

/// A configured generator instance
///
/// Holds no state between passes; every call to [`Generator::run`] is a pure
/// function of the declarations it is given.
pub struct Generator {
    config: GeneratorConfig,
    markers: MarkerSet,
    template: Box<dyn EmissionTemplate>,
}

impl std::fmt::Debug for Generator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Generator")
            .field("kind", &self.template.kind())
            .field("markers", &self.markers)
            .finish()
    }
}

impl Generator {
    /// Validate `config` and build the matching template
    pub fn new(config: GeneratorConfig) -> GenResult<Self> {
        config.validate()?;
        Ok(Self {
            markers: MarkerSet::from_config(&config),
            template: template_for(&config),
            config,
        })
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn markers(&self) -> &MarkerSet {
        &self.markers
    }

    /// The fixed unit declaring the marker attribute
    pub fn marker_unit(&self) -> GenResult<GeneratedUnit> {
        Ok(GeneratedUnit::new(
            self.config.marker_hint(),
            self.template.marker_declaration(&self.config)?,
        ))
    }

    /// Run a pass and publish its units to `sink`
    ///
    /// Units are fully rendered and announced through
    /// [`BuildSink::begin_pass`] before the first one is published, so a
    /// cancelled or rejected pass leaves the sink untouched.
    pub fn run(
        &self,
        declarations: &[AnnotatedDeclaration],
        sink: &mut dyn BuildSink,
        cancel: &CancellationToken,
    ) -> GenResult<PassReport> {
        let (units, report) = self.render(declarations, cancel)?;

        let names: Vec<&str> = report.units.iter().map(String::as_str).collect();
        sink.begin_pass(&names)?;

        for unit in units {
            debug!(unit = %unit.logical_name, bytes = unit.text.len(), "publishing unit");
            sink.add_source(unit)?;
        }

        info!(
            kind = %report.kind,
            members = report.members_emitted,
            units = report.units.len(),
            errors = report.error_count(),
            warnings = report.warning_count(),
            "generation pass complete"
        );
        Ok(report)
    }

    /// Run a pass without publishing: marker unit first, then generated units
    #[tracing::instrument(level = "debug", skip_all, fields(kind = %self.config.kind))]
    pub fn render(
        &self,
        declarations: &[AnnotatedDeclaration],
        cancel: &CancellationToken,
    ) -> GenResult<(Vec<GeneratedUnit>, PassReport)> {
        cancel.check()?;

        let kind = self.config.kind;
        let selected = scan(declarations, &self.markers);
        debug!(
            scanned = declarations.len(),
            selected = selected.len(),
            "scanned declarations"
        );

        let mut diagnostics = Vec::new();
        let mut records = Vec::with_capacity(selected.len());
        for decl in &selected {
            match extract(decl, kind, &self.markers) {
                Ok(record) => records.push(record),
                Err(diagnostic) => diagnostics.push(diagnostic),
            }
        }
        let extracted = records.len();

        let groups = group_records(records, |record| self.template.group_key(record));
        debug!(records = extracted, groups = groups.len(), "grouped records");

        let mut units = vec![self.marker_unit()?];
        let mut members_emitted = 0;
        match self.config.unit_mode {
            UnitMode::Single => {
                let hint = self.config.output_hint().to_string();
                let mut unit = self.unit_writer();
                for group in &groups {
                    cancel.check()?;
                    if let Some((body, count)) = self.emit(group, &hint, &mut diagnostics)? {
                        unit.blank();
                        unit.append(&body);
                        members_emitted += count;
                    }
                }
                let text = unit.finish(&hint)?;
                units.push(GeneratedUnit::new(hint, text));
            }
            UnitMode::PerGroup => {
                for group in &groups {
                    cancel.check()?;
                    let hint = group.unit_hint(kind);
                    if let Some((body, count)) = self.emit(group, &hint, &mut diagnostics)? {
                        let mut unit = self.unit_writer();
                        unit.blank();
                        unit.append(&body);
                        units.push(GeneratedUnit::new(hint.clone(), unit.finish(&hint)?));
                        members_emitted += count;
                    }
                }
            }
        }

        cancel.check()?;

        for diagnostic in &diagnostics {
            warn!(code = diagnostic.id.code(), "{diagnostic}");
        }

        let report = PassReport {
            kind,
            scanned: declarations.len(),
            selected: selected.len(),
            extracted,
            groups: groups.len(),
            members_emitted,
            units: units.iter().map(|unit| unit.logical_name.clone()).collect(),
            diagnostics,
        };
        Ok((units, report))
    }

    /// Render one group on its own; `None` when nothing in it was emittable
    fn emit(
        &self,
        group: &OutputGroup,
        hint: &str,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> GenResult<Option<(String, usize)>> {
        let mut body = SourceWriter::new(self.config.indent_width);
        let count = self.template.emit_group(group, &mut body, diagnostics)?;
        if count == 0 {
            return Ok(None);
        }
        Ok(Some((body.finish(hint)?, count)))
    }

    fn unit_writer(&self) -> SourceWriter {
        let mut writer = SourceWriter::new(self.config.indent_width);
        writer.line(AUTO_GENERATED_HEADER);
        writer
    }
}
