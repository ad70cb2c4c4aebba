//! Manifest parsing and validation

use anyhow::{Context, Result};
use partialgen_core::{GeneratorConfig, UnitMode};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Manifest looked up in the working directory when none is given
pub const DEFAULT_MANIFEST: &str = "partialgen.toml";

/// partialgen.toml manifest structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub generator: GeneratorConfig,
}

impl Manifest {
    /// Load manifest from a file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read manifest: {:?}", path.as_ref()))?;

        Self::from_str(&content)
    }

    /// Parse manifest from string
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse manifest")
    }

    /// Load the manifest at `path`, or `./partialgen.toml` if present, or defaults
    pub fn load(path: Option<&str>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None if Path::new(DEFAULT_MANIFEST).is_file() => Self::from_file(DEFAULT_MANIFEST),
            None => Ok(Self::default()),
        }
    }

    /// Validate the manifest
    pub fn validate(&self) -> Result<()> {
        self.generator
            .validate()
            .context("Invalid [generator] section")?;

        for marker in &self.generator.extra_markers {
            if marker.trim().is_empty() {
                anyhow::bail!("Extra marker names cannot be empty");
            }
        }

        Ok(())
    }
}

/// Check command implementation
pub fn check(manifest_path: Option<String>) -> Result<()> {
    let path = manifest_path.unwrap_or_else(|| DEFAULT_MANIFEST.to_string());

    println!("Checking manifest: {}", path);

    let manifest = Manifest::from_file(&path)?;
    manifest.validate()?;

    let generator = &manifest.generator;
    println!("✓ Generator: {}", generator.kind);
    if generator.marker_namespace.is_empty() {
        println!("✓ Marker: {}", generator.marker_attribute_name());
    } else {
        println!(
            "✓ Marker: {}.{}",
            generator.marker_namespace,
            generator.marker_attribute_name()
        );
    }
    println!("✓ Extra markers: {}", generator.extra_markers.len());
    match generator.unit_mode {
        UnitMode::Single => println!("✓ Output: {}", generator.output_hint()),
        UnitMode::PerGroup => println!("✓ Output: one unit per group"),
    }
    println!("\nManifest is valid!");

    Ok(())
}
