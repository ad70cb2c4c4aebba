//! Directory-backed build sink

use partialgen_core::{BuildSink, GenError, GenResult, GeneratedUnit};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File in the output directory listing the units of the last pass
pub const UNIT_LISTING: &str = ".partialgen-units";

/// Writes each unit to `<root>/<logical name>`
///
/// A unit whose file already holds identical content is left untouched so
/// incremental host builds see no modification. Units published by an
/// earlier pass but missing from the current one are deleted when the pass
/// begins.
#[derive(Debug)]
pub struct DirectorySink {
    root: PathBuf,
    previous: Vec<String>,
    written: Vec<String>,
    unchanged: Vec<String>,
    removed: Vec<String>,
}

impl DirectorySink {
    /// Create the sink, creating `root` if needed
    pub fn create(root: impl AsRef<Path>) -> GenResult<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root)?;
        let previous = read_listing(&root.join(UNIT_LISTING))?;
        Ok(Self {
            root,
            previous,
            written: Vec::new(),
            unchanged: Vec::new(),
            removed: Vec::new(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Logical names whose files were created or rewritten
    pub fn written(&self) -> &[String] {
        &self.written
    }

    /// Logical names whose files already matched
    pub fn unchanged(&self) -> &[String] {
        &self.unchanged
    }

    /// Stale units deleted at the start of the pass
    pub fn removed(&self) -> &[String] {
        &self.removed
    }

    fn path_for(&self, logical_name: &str) -> GenResult<PathBuf> {
        if logical_name.is_empty()
            || logical_name.contains(['/', '\\'])
            || logical_name == "."
            || logical_name == ".."
            || logical_name == UNIT_LISTING
        {
            return Err(GenError::Sink(format!(
                "logical name is not a plain file name: {logical_name:?}"
            )));
        }
        Ok(self.root.join(logical_name))
    }

    fn record(list: &mut Vec<String>, logical_name: &str) {
        if !list.iter().any(|name| name == logical_name) {
            list.push(logical_name.to_string());
        }
    }
}

fn read_listing(path: &Path) -> GenResult<Vec<String>> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
        Err(e) => Err(e.into()),
    }
}

fn file_digest(path: &Path) -> Option<String> {
    let existing = fs::read(path).ok()?;
    Some(hex::encode(Sha256::digest(&existing)))
}

impl BuildSink for DirectorySink {
    fn begin_pass(&mut self, logical_names: &[&str]) -> GenResult<()> {
        for name in logical_names {
            self.path_for(name)?;
        }

        for stale in &self.previous {
            if logical_names.contains(&stale.as_str()) {
                continue;
            }
            let Ok(path) = self.path_for(stale) else {
                debug!(unit = %stale, "ignoring invalid name in unit listing");
                continue;
            };
            match fs::remove_file(&path) {
                Ok(()) => {
                    debug!(unit = %stale, "stale unit removed");
                    self.removed.push(stale.clone());
                }
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            }
        }

        let mut listing = logical_names.join("\n");
        listing.push('\n');
        fs::write(self.root.join(UNIT_LISTING), listing)?;
        self.previous = logical_names.iter().map(|name| name.to_string()).collect();
        Ok(())
    }

    fn add_source(&mut self, unit: GeneratedUnit) -> GenResult<()> {
        let path = self.path_for(&unit.logical_name)?;

        if file_digest(&path).is_some_and(|digest| digest == unit.digest()) {
            debug!(unit = %unit.logical_name, "unit unchanged, skipping write");
            self.written.retain(|name| name != &unit.logical_name);
            Self::record(&mut self.unchanged, &unit.logical_name);
            return Ok(());
        }

        fs::write(&path, unit.text.as_bytes())?;
        debug!(unit = %unit.logical_name, path = %path.display(), "unit written");
        self.unchanged.retain(|name| name != &unit.logical_name);
        Self::record(&mut self.written, &unit.logical_name);
        Ok(())
    }
}
