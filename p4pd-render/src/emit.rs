//! # Template Directory Emission
//!
//! Every file under the template directory is a template, except hidden
//! files, `*.cache` files and editor backups (`*~`). Each one is rendered
//! with the same context and written to the same relative path under the
//! destination directory.

use crate::error::{RenderError, Result};
use crate::functions::register_functions;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use tera::Tera;
use walkdir::WalkDir;

/// File names that are never treated as templates
pub const IGNORE_PATTERN: &str = r"^\..*|.*\.cache$|.*~$";

/// Matches template file names to skip
#[derive(Debug, Clone)]
pub struct IgnoreFilter {
    pattern: Regex,
}

impl IgnoreFilter {
    pub fn new() -> Result<Self> {
        Ok(Self {
            pattern: Regex::new(IGNORE_PATTERN)?,
        })
    }

    /// Only the file name is matched, not its directory
    pub fn is_ignored(&self, file_name: &str) -> bool {
        self.pattern.is_match(file_name)
    }
}

/// Templates loaded from one directory, keyed by relative path
pub struct TemplateSet {
    tera: Tera,
    names: Vec<String>,
}

impl TemplateSet {
    /// Load every template under `dir`
    pub fn from_dir(dir: &Path) -> Result<Self> {
        if !dir.is_dir() {
            return Err(RenderError::InvalidPath {
                path: dir.to_path_buf(),
                reason: "is not a valid directory",
            });
        }

        let filter = IgnoreFilter::new()?;
        let mut sources = Vec::new();

        for entry in WalkDir::new(dir).sort_by_file_name() {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            let file_name = entry.file_name().to_string_lossy();
            if filter.is_ignored(&file_name) {
                tracing::trace!("skipping {}", entry.path().display());
                continue;
            }

            let relative = entry.path().strip_prefix(dir).unwrap_or(entry.path());
            let name = relative.to_string_lossy().into_owned();
            let source = fs::read_to_string(entry.path())?;
            sources.push((name, source));
        }

        let mut tera = Tera::default();
        // Generated sources are C and Thrift, never HTML
        tera.autoescape_on(Vec::new());
        register_functions(&mut tera);

        let names = sources.iter().map(|(name, _)| name.clone()).collect();
        tera.add_raw_templates(sources)?;

        tracing::debug!("loaded templates from {}", dir.display());
        Ok(Self { tera, names })
    }

    /// Relative template paths in walk order
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Render every template into `dest`, returning the written paths
    pub fn render_to(&self, context: &tera::Context, dest: &Path) -> Result<Vec<PathBuf>> {
        if !dest.is_dir() {
            return Err(RenderError::InvalidPath {
                path: dest.to_path_buf(),
                reason: "is not a valid directory",
            });
        }

        let mut written = Vec::with_capacity(self.names.len());
        for name in &self.names {
            let target = dest.join(name);
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }

            let output = self.tera.render(name, context)?;
            fs::write(&target, output)?;
            tracing::debug!("wrote {}", target.display());
            written.push(target);
        }

        tracing::info!("rendered {} files into {}", written.len(), dest.display());
        Ok(written)
    }
}
