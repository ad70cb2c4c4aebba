//! Per-declaration diagnostics reported by a pass

use crate::declaration::{AnnotatedDeclaration, SourceLocation};
use serde::Serialize;

/// How serious a diagnostic is
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// Stable diagnostic identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DiagnosticId {
    /// Container or type reference could not be resolved
    UnresolvedSymbol,
    /// Override argument is not a delimiter-wrapped string literal
    MalformedOverride,
    /// Declaration kind does not fit the generator kind
    UnsupportedTarget,
    /// Derived or overridden name is empty
    EmptyName,
    /// Derived or overridden name is not a usable identifier
    InvalidIdentifier,
    /// Generated member would shadow the member it forwards to
    SelfReference,
    /// Another member of the same group already uses the generated name
    DuplicateName,
}

impl DiagnosticId {
    pub fn code(self) -> &'static str {
        match self {
            DiagnosticId::UnresolvedSymbol => "PG0001",
            DiagnosticId::MalformedOverride => "PG0002",
            DiagnosticId::UnsupportedTarget => "PG0003",
            DiagnosticId::EmptyName => "PG0004",
            DiagnosticId::InvalidIdentifier => "PG0005",
            DiagnosticId::SelfReference => "PG0006",
            DiagnosticId::DuplicateName => "PG0007",
        }
    }

    pub fn severity(self) -> Severity {
        match self {
            DiagnosticId::DuplicateName => Severity::Warning,
            _ => Severity::Error,
        }
    }
}

/// A problem attached to one declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub id: DiagnosticId,
    pub severity: Severity,
    pub message: String,

    /// Name of the offending member or type
    pub member: Option<String>,

    pub location: Option<SourceLocation>,
}

impl Diagnostic {
    pub fn new(id: DiagnosticId, message: impl Into<String>) -> Self {
        Self {
            id,
            severity: id.severity(),
            message: message.into(),
            member: None,
            location: None,
        }
    }

    /// Attach the member name and location of `decl`
    pub fn for_declaration(mut self, decl: &AnnotatedDeclaration) -> Self {
        self.member = Some(decl.name.clone());
        self.location = decl.location.clone();
        self
    }

    pub fn for_member(mut self, member: impl Into<String>) -> Self {
        self.member = Some(member.into());
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}[{}]", self.severity, self.id.code())?;
        if let Some(location) = &self.location {
            write!(f, " {location}")?;
        }
        if let Some(member) = &self.member {
            write!(f, " `{member}`")?;
        }
        write!(f, ": {}", self.message)
    }
}
