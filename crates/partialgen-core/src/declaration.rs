//! Declarations supplied by the host's semantic index

use crate::error::GenResult;
use serde::{Deserialize, Serialize};

/// The set of declarations visible to one generation pass, in discovery order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeclarationIndex {
    #[serde(default)]
    pub declarations: Vec<AnnotatedDeclaration>,
}

impl DeclarationIndex {
    pub fn new(declarations: Vec<AnnotatedDeclaration>) -> Self {
        Self { declarations }
    }

    /// Parse an index from JSON bytes
    ///
    /// Empty input is treated as an empty index.
    pub fn from_json(bytes: &[u8]) -> GenResult<Self> {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        Ok(serde_json::from_slice(bytes)?)
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }
}

/// What kind of symbol a declaration names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DeclarationKind {
    Field,
    Property,
    Type,
}

/// Shape of a type declaration, which decides the reopening keyword
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TypeKind {
    #[default]
    Class,
    Struct,
    Record,
    RecordStruct,
}

impl TypeKind {
    /// Keyword sequence used to reopen a type of this kind
    pub fn partial_keyword(self) -> &'static str {
        match self {
            TypeKind::Class => "partial class",
            TypeKind::Struct => "partial struct",
            TypeKind::Record => "partial record",
            TypeKind::RecordStruct => "partial record struct",
        }
    }
}

/// The enclosing type of a member declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerSymbol {
    /// Fully qualified name, unique across the build
    pub qualified_name: String,

    /// Simple name used when reopening the type
    pub name: String,

    #[serde(default)]
    pub kind: TypeKind,
}

/// One attribute application with its raw constructor arguments
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeUsage {
    /// Attribute name as resolved by the host
    pub name: String,

    /// Constructor arguments as written in source; string literals keep their quotes
    #[serde(default)]
    pub arguments: Vec<String>,
}

/// Position of a declaration in host source, for diagnostics only
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLocation {
    pub file: String,
    pub line: u32,
    #[serde(default)]
    pub column: u32,
}

impl std::fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}

/// A field, property or type carrying attributes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotatedDeclaration {
    pub kind: DeclarationKind,

    /// Member name, or the simple type name for type declarations
    pub name: String,

    /// Set for type declarations
    #[serde(default)]
    pub type_kind: Option<TypeKind>,

    /// Fully qualified type reference; `None` when the host could not resolve it
    #[serde(default)]
    pub type_ref: Option<String>,

    /// Enclosing type; `None` when unresolved or for top-level types
    #[serde(default)]
    pub container: Option<ContainerSymbol>,

    /// Containing namespace; `None` for the global namespace
    #[serde(default)]
    pub namespace: Option<String>,

    #[serde(default)]
    pub is_static: bool,

    #[serde(default)]
    pub attributes: Vec<AttributeUsage>,

    #[serde(default)]
    pub location: Option<SourceLocation>,
}

impl AnnotatedDeclaration {
    fn new(kind: DeclarationKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            type_kind: None,
            type_ref: None,
            container: None,
            namespace: None,
            is_static: false,
            attributes: Vec::new(),
            location: None,
        }
    }

    /// A field declaration with a resolved type
    pub fn field(name: impl Into<String>, type_ref: impl Into<String>) -> Self {
        Self {
            type_ref: Some(type_ref.into()),
            ..Self::new(DeclarationKind::Field, name)
        }
    }

    /// A property declaration with a resolved type
    pub fn property(name: impl Into<String>, type_ref: impl Into<String>) -> Self {
        Self {
            type_ref: Some(type_ref.into()),
            ..Self::new(DeclarationKind::Property, name)
        }
    }

    /// A type declaration; `qualified_name` doubles as its type reference
    pub fn type_decl(
        name: impl Into<String>,
        qualified_name: impl Into<String>,
        kind: TypeKind,
    ) -> Self {
        Self {
            type_kind: Some(kind),
            type_ref: Some(qualified_name.into()),
            ..Self::new(DeclarationKind::Type, name)
        }
    }

    pub fn in_container(
        mut self,
        qualified_name: impl Into<String>,
        name: impl Into<String>,
        kind: TypeKind,
    ) -> Self {
        self.container = Some(ContainerSymbol {
            qualified_name: qualified_name.into(),
            name: name.into(),
            kind,
        });
        self
    }

    pub fn in_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    pub fn with_attribute<I, S>(mut self, name: impl Into<String>, arguments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.attributes.push(AttributeUsage {
            name: name.into(),
            arguments: arguments.into_iter().map(Into::into).collect(),
        });
        self
    }

    pub fn with_static(mut self, is_static: bool) -> Self {
        self.is_static = is_static;
        self
    }

    pub fn at(mut self, file: impl Into<String>, line: u32, column: u32) -> Self {
        self.location = Some(SourceLocation {
            file: file.into(),
            line,
            column,
        });
        self
    }

    /// Namespace with the empty string folded into the global namespace
    pub fn namespace_name(&self) -> Option<&str> {
        self.namespace.as_deref().filter(|ns| !ns.trim().is_empty())
    }
}
