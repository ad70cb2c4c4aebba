//! Generation pass command

use crate::manifest::Manifest;
use crate::sink::DirectorySink;
use anyhow::{Context, Result};
use partialgen_core::{
    BuildSink, CancellationToken, DeclarationIndex, GeneratorConfig, GeneratorKind, Generator,
    LogLevel, PassReport, UnitMode,
};
use partialgen_logging::ReloadHandle;
use std::path::Path;

/// Options for `partialgen generate`
#[derive(Debug, Clone, Default)]
pub struct GenerateArgs {
    pub input: String,
    pub output: String,
    pub manifest: Option<String>,
    pub kind: Option<String>,
    pub per_group: bool,
    pub strict: bool,
    pub verbose: bool,
    pub report: Option<String>,
}

/// Generate command implementation
pub fn run(args: &GenerateArgs) -> Result<PassReport> {
    let manifest = Manifest::load(args.manifest.as_deref())?;
    let config = resolve_config(manifest, args.kind.as_deref(), args.per_group)?;

    let level = if args.verbose {
        LogLevel::Debug
    } else {
        config.log_level().context("Invalid log level in manifest")?
    };
    apply_log_level(level);

    let bytes = std::fs::read(&args.input)
        .with_context(|| format!("Failed to read declaration index: {}", args.input))?;
    let index = DeclarationIndex::from_json(&bytes)
        .with_context(|| format!("Failed to parse declaration index: {}", args.input))?;

    let generator = Generator::new(config).context("Invalid generator configuration")?;
    let mut sink = DirectorySink::create(&args.output)
        .with_context(|| format!("Failed to create output directory: {}", args.output))?;

    println!(
        "Generating {} units from {} declarations into {}",
        generator.config().kind,
        index.len(),
        args.output
    );

    let report = generator.run(&index.declarations, &mut sink, &CancellationToken::new())?;

    for diagnostic in &report.diagnostics {
        eprintln!("{diagnostic}");
    }
    print_summary(&report, &sink);

    if let Some(path) = &args.report {
        write_report(&report, path)?;
    }

    if args.strict && report.has_errors() {
        anyhow::bail!(
            "{} error diagnostic(s) reported in strict mode",
            report.error_count()
        );
    }

    Ok(report)
}

/// Marker command implementation
pub fn marker(kind: Option<&str>, manifest: Option<&str>, output: Option<&str>) -> Result<()> {
    let config = resolve_config(Manifest::load(manifest)?, kind, false)?;
    let generator = Generator::new(config).context("Invalid generator configuration")?;
    let unit = generator.marker_unit()?;

    match output {
        Some(dir) => {
            let name = unit.logical_name.clone();
            let mut sink = DirectorySink::create(dir)
                .with_context(|| format!("Failed to create output directory: {dir}"))?;
            sink.add_source(unit)?;
            println!("✓ {}", Path::new(dir).join(name).display());
        }
        None => print!("{}", unit.text),
    }

    Ok(())
}

/// Apply command-line overrides on top of the manifest's generator section
pub fn resolve_config(
    manifest: Manifest,
    kind: Option<&str>,
    per_group: bool,
) -> Result<GeneratorConfig> {
    manifest.validate()?;
    let mut config = manifest.generator;

    if let Some(kind) = kind {
        config.kind = kind.parse::<GeneratorKind>()?;
    }
    if per_group {
        config.unit_mode = UnitMode::PerGroup;
    }

    Ok(config)
}

fn apply_log_level(level: LogLevel) {
    if let Err(e) = ReloadHandle::global().reload_level(level) {
        tracing::debug!(error = %e, "log level not applied");
    }
}

fn print_summary(report: &PassReport, sink: &DirectorySink) {
    println!(
        "✓ Members: {} in {} groups ({} of {} declarations marked)",
        report.members_emitted, report.groups, report.selected, report.scanned
    );
    println!(
        "✓ Units: {} written, {} unchanged, {} removed",
        sink.written().len(),
        sink.unchanged().len(),
        sink.removed().len()
    );
    if !report.diagnostics.is_empty() {
        println!(
            "! Diagnostics: {} errors, {} warnings",
            report.error_count(),
            report.warning_count()
        );
    }
}

fn write_report(report: &PassReport, path: &str) -> Result<()> {
    let json = serde_json::to_string_pretty(report).context("Failed to serialize report")?;
    std::fs::write(path, json).with_context(|| format!("Failed to write report: {path}"))?;
    Ok(())
}
