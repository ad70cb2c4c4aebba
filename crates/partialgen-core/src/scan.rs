//! Selection of declarations carrying the marker attribute

use crate::config::GeneratorConfig;
use crate::declaration::{AnnotatedDeclaration, AttributeUsage};

/// Attribute names accepted as the marker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerSet {
    names: Vec<String>,
}

impl MarkerSet {
    /// Accept exactly `names`
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = Self { names: Vec::new() };
        for name in names {
            set.insert(name.into());
        }
        set
    }

    /// Accept the configured marker in short, suffixed and namespace-qualified
    /// forms, plus any extra aliases
    pub fn from_config(config: &GeneratorConfig) -> Self {
        let short = config.marker_name().to_string();
        let suffixed = config.marker_attribute_name();
        let mut names = vec![short.clone(), suffixed.clone()];
        if !config.marker_namespace.is_empty() {
            names.push(format!("{}.{}", config.marker_namespace, short));
            names.push(format!("{}.{}", config.marker_namespace, suffixed));
        }
        names.extend(config.extra_markers.iter().cloned());
        Self::new(names)
    }

    fn insert(&mut self, name: String) {
        let name = normalize(&name).to_string();
        if !name.is_empty() && !self.names.contains(&name) {
            self.names.push(name);
        }
    }

    pub fn contains(&self, attribute_name: &str) -> bool {
        let name = normalize(attribute_name);
        self.names.iter().any(|known| known == name)
    }

    /// First attribute on `decl` that is a marker
    pub fn find<'a>(&self, decl: &'a AnnotatedDeclaration) -> Option<&'a AttributeUsage> {
        decl.attributes
            .iter()
            .find(|attribute| self.contains(&attribute.name))
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }
}

fn normalize(name: &str) -> &str {
    let name = name.trim();
    name.strip_prefix("global::").unwrap_or(name)
}

/// Select the declarations that carry a marker attribute, in discovery order
pub fn scan<'a>(
    declarations: &'a [AnnotatedDeclaration],
    markers: &MarkerSet,
) -> Vec<&'a AnnotatedDeclaration> {
    declarations
        .iter()
        .filter(|decl| markers.find(decl).is_some())
        .collect()
}
