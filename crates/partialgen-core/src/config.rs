//! Generator configuration

use crate::LogLevel;
use crate::error::{GenError, GenResult};
use crate::naming::is_valid_identifier;
use serde::{Deserialize, Serialize};

/// Which emission template a generator runs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeneratorKind {
    /// Read-only accessors forwarding to annotated fields and properties
    #[default]
    Accessor,

    /// Static factories that load annotated types from a path or a byte buffer
    Loader,
}

impl GeneratorKind {
    pub fn default_marker_name(self) -> &'static str {
        match self {
            GeneratorKind::Accessor => "Expose",
            GeneratorKind::Loader => "JsonLoadable",
        }
    }

    pub fn default_output_hint(self) -> &'static str {
        match self {
            GeneratorKind::Accessor => "Partialgen.Accessors.g.cs",
            GeneratorKind::Loader => "Partialgen.Loaders.g.cs",
        }
    }

    /// Suffix of per-group logical names
    pub fn unit_suffix(self) -> &'static str {
        match self {
            GeneratorKind::Accessor => "Accessors.g.cs",
            GeneratorKind::Loader => "Loaders.g.cs",
        }
    }
}

impl std::str::FromStr for GeneratorKind {
    type Err = GenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "accessor" | "accessors" => Ok(GeneratorKind::Accessor),
            "loader" | "loaders" => Ok(GeneratorKind::Loader),
            other => Err(GenError::Config(format!("unknown generator kind: {other}"))),
        }
    }
}

impl std::fmt::Display for GeneratorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GeneratorKind::Accessor => write!(f, "accessor"),
            GeneratorKind::Loader => write!(f, "loader"),
        }
    }
}

/// How emitted groups are split into published units
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitMode {
    /// All groups concatenated into one unit
    #[default]
    Single,

    /// One unit per output group
    PerGroup,
}

/// Call targets referenced by generated static loaders
///
/// The generator only writes these names into the output; it never calls them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoaderConfig {
    /// Name of the generated factory operations
    #[serde(default = "default_method_name")]
    pub method_name: String,

    /// Fully qualified `readAllText(path) -> text` function
    #[serde(default = "default_content_loader")]
    pub content_loader: String,

    /// Fully qualified generic `deserialize<T>(text | bytes) -> T` function
    #[serde(default = "default_deserializer")]
    pub deserializer: String,
}

fn default_method_name() -> String {
    "Load".to_string()
}

fn default_content_loader() -> String {
    "global::System.IO.File.ReadAllText".to_string()
}

fn default_deserializer() -> String {
    "global::System.Text.Json.JsonSerializer.Deserialize".to_string()
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            method_name: default_method_name(),
            content_loader: default_content_loader(),
            deserializer: default_deserializer(),
        }
    }
}

/// Configuration for one generator instance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    #[serde(default)]
    pub kind: GeneratorKind,

    /// Marker attribute name without the `Attribute` suffix (default depends on `kind`)
    #[serde(default)]
    pub marker_name: Option<String>,

    /// Namespace the marker attribute is declared in
    #[serde(default = "default_marker_namespace")]
    pub marker_namespace: String,

    /// Additional attribute names accepted as the marker
    #[serde(default)]
    pub extra_markers: Vec<String>,

    #[serde(default)]
    pub unit_mode: UnitMode,

    /// Logical name of the generated unit in single-unit mode (default depends on `kind`)
    #[serde(default)]
    pub output_hint: Option<String>,

    /// Spaces per block level
    #[serde(default = "default_indent_width")]
    pub indent_width: usize,

    #[serde(default)]
    pub loader: LoaderConfig,

    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_marker_namespace() -> String {
    "Partialgen".to_string()
}

fn default_indent_width() -> usize {
    4
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self::new(GeneratorKind::default())
    }
}

impl GeneratorConfig {
    /// Create a configuration with defaults for `kind`
    pub fn new(kind: GeneratorKind) -> Self {
        Self {
            kind,
            marker_name: None,
            marker_namespace: default_marker_namespace(),
            extra_markers: Vec::new(),
            unit_mode: UnitMode::default(),
            output_hint: None,
            indent_width: default_indent_width(),
            loader: LoaderConfig::default(),
            log_level: default_log_level(),
        }
    }

    /// Create configuration from JSON bytes
    pub fn from_json(bytes: &[u8]) -> GenResult<Self> {
        if bytes.is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Marker name without the `Attribute` suffix
    pub fn marker_name(&self) -> &str {
        let name = self
            .marker_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| self.kind.default_marker_name());
        match name.strip_suffix("Attribute") {
            Some(stripped) if !stripped.is_empty() => stripped,
            _ => name,
        }
    }

    /// Name of the attribute class declared by the marker unit
    pub fn marker_attribute_name(&self) -> String {
        format!("{}Attribute", self.marker_name())
    }

    /// Logical name of the marker declaration unit
    pub fn marker_hint(&self) -> String {
        format!("{}.g.cs", self.marker_attribute_name())
    }

    /// Logical name of the generated unit in single-unit mode
    pub fn output_hint(&self) -> &str {
        self.output_hint
            .as_deref()
            .filter(|hint| !hint.trim().is_empty())
            .unwrap_or_else(|| self.kind.default_output_hint())
    }

    pub fn log_level(&self) -> GenResult<LogLevel> {
        self.log_level.parse()
    }

    /// Check the configuration for values that would produce unusable output
    pub fn validate(&self) -> GenResult<()> {
        if !is_valid_identifier(self.marker_name()) {
            return Err(GenError::Config(format!(
                "marker name is not a valid identifier: {}",
                self.marker_name()
            )));
        }

        if !self.marker_namespace.is_empty()
            && !self.marker_namespace.split('.').all(is_valid_identifier)
        {
            return Err(GenError::Config(format!(
                "marker namespace is not a valid namespace: {}",
                self.marker_namespace
            )));
        }

        if self.indent_width == 0 || self.indent_width > 16 {
            return Err(GenError::Config(format!(
                "indent width must be between 1 and 16, got {}",
                self.indent_width
            )));
        }

        validate_hint(self.output_hint())?;

        if self.kind == GeneratorKind::Loader {
            if !is_valid_identifier(&self.loader.method_name) {
                return Err(GenError::Config(format!(
                    "loader method name is not a valid identifier: {}",
                    self.loader.method_name
                )));
            }
            if self.loader.content_loader.trim().is_empty() {
                return Err(GenError::Config("content loader cannot be empty".into()));
            }
            if self.loader.deserializer.trim().is_empty() {
                return Err(GenError::Config("deserializer cannot be empty".into()));
            }
        }

        self.log_level()?;

        Ok(())
    }
}

/// Logical names become file names in directory sinks
fn validate_hint(hint: &str) -> GenResult<()> {
    if hint.contains(['/', '\\']) || hint.starts_with('.') {
        return Err(GenError::Config(format!(
            "output hint must be a plain file name: {hint}"
        )));
    }
    Ok(())
}
