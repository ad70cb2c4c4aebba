//! partialgen-core - Declaration-driven generation of partial type members
//!
//! This crate implements one generation pass over a set of annotated declarations
//! supplied by a host build:
//!
//! ```text
//! DeclarationIndex
//!     ↓
//!  [scan]      marker attribute filter
//!     ↓
//!  [extract]   AnnotatedDeclaration → ExtractedRecord | Diagnostic
//!     ↓
//!  [group]     OutputGroup per container / namespace
//!     ↓
//!  [emit]      EmissionTemplate + SourceWriter
//!     ↓
//!  [publish]   BuildSink (marker unit + generated unit)
//! ```
//!
//! - [`Generator`] drives a pass end to end
//! - [`GeneratorConfig`] selects the template and naming of the published units
//! - [`Diagnostic`] reports per-declaration problems without failing the pass
//! - [`GenError`] covers the failures that abort a pass

mod cancel;
mod config;
mod declaration;
mod diagnostic;
pub mod emit;
mod error;
mod extract;
mod group;
pub mod naming;
mod pipeline;
mod publish;
mod record;
mod scan;

pub use cancel::CancellationToken;
pub use config::{GeneratorConfig, GeneratorKind, LoaderConfig, UnitMode};
pub use declaration::{
    AnnotatedDeclaration, AttributeUsage, ContainerSymbol, DeclarationIndex, DeclarationKind,
    SourceLocation, TypeKind,
};
pub use diagnostic::{Diagnostic, DiagnosticId, Severity};
pub use error::{GenError, GenResult};
pub use extract::{extract, strip_override_literal};
pub use group::{GroupKey, OutputGroup, group_records};
pub use pipeline::{Generator, PassReport};
pub use publish::{BuildSink, GeneratedUnit, MemorySink};
pub use record::ExtractedRecord;
pub use scan::{MarkerSet, scan};

/// Log levels understood by the partialgen tools
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
    Off,
}

impl std::str::FromStr for LogLevel {
    type Err = GenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            "off" => Ok(LogLevel::Off),
            other => Err(GenError::Config(format!("unknown log level: {other}"))),
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Trace => write!(f, "TRACE"),
            LogLevel::Debug => write!(f, "DEBUG"),
            LogLevel::Info => write!(f, "INFO"),
            LogLevel::Warn => write!(f, "WARN"),
            LogLevel::Error => write!(f, "ERROR"),
            LogLevel::Off => write!(f, "OFF"),
        }
    }
}

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        BuildSink, CancellationToken, DeclarationIndex, Diagnostic, GenError, GenResult,
        GeneratedUnit, Generator, GeneratorConfig, GeneratorKind, LogLevel, MemorySink,
        PassReport,
    };
}
