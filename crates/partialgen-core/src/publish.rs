//! Publishing generated units to the host build

use crate::error::GenResult;
use sha2::{Digest, Sha256};

/// Generated text registered under a stable logical name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedUnit {
    pub logical_name: String,
    pub text: String,
}

impl GeneratedUnit {
    pub fn new(logical_name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            logical_name: logical_name.into(),
            text: text.into(),
        }
    }

    /// Hex-encoded SHA-256 of the text
    pub fn digest(&self) -> String {
        hex::encode(Sha256::digest(self.text.as_bytes()))
    }
}

/// Build-side receiver of generated units
///
/// Adding a unit whose logical name was already added replaces the earlier
/// content.
pub trait BuildSink {
    /// Announce every logical name of a pass before its first `add_source`
    ///
    /// An error here aborts the pass with nothing published. Failures inside
    /// `add_source` can still leave earlier units of the pass published.
    fn begin_pass(&mut self, _logical_names: &[&str]) -> GenResult<()> {
        Ok(())
    }

    fn add_source(&mut self, unit: GeneratedUnit) -> GenResult<()>;
}

/// In-memory sink that keeps units in first-registration order
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    units: Vec<GeneratedUnit>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, logical_name: &str) -> Option<&str> {
        self.units
            .iter()
            .find(|unit| unit.logical_name == logical_name)
            .map(|unit| unit.text.as_str())
    }

    pub fn names(&self) -> Vec<&str> {
        self.units
            .iter()
            .map(|unit| unit.logical_name.as_str())
            .collect()
    }

    pub fn units(&self) -> &[GeneratedUnit] {
        &self.units
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

impl BuildSink for MemorySink {
    fn add_source(&mut self, unit: GeneratedUnit) -> GenResult<()> {
        match self
            .units
            .iter_mut()
            .find(|existing| existing.logical_name == unit.logical_name)
        {
            Some(existing) => existing.text = unit.text,
            None => self.units.push(unit),
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "publish/publish_tests.rs"]
mod publish_tests;
