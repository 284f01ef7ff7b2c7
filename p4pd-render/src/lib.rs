//! PD Source Rendering
//!
//! Turn a loaded [`Model`] into generated PD sources by rendering a
//! directory of `tera` templates.
//!
//! ## Example
//!
//! ```rust,no_run
//! use p4pd_model::GeneratorConfig;
//! use std::path::Path;
//!
//! let model = p4pd_loader::load_file("router.json").unwrap();
//! let config = GeneratorConfig::new("router").unwrap();
//! p4pd_render::generate(&model, &config, Path::new("templates"), Path::new("gen")).unwrap();
//! ```

pub mod error;
pub mod context;
pub mod functions;
pub mod emit;

pub use error::{RenderError, Result};
pub use context::RenderContext;
pub use functions::register_functions;
pub use emit::{IgnoreFilter, TemplateSet, IGNORE_PATTERN};

use p4pd_model::{GeneratorConfig, Model};
use std::path::{Path, PathBuf};

/// Render every template under `templates` into `dest`
pub fn generate(
    model: &Model,
    config: &GeneratorConfig,
    templates: &Path,
    dest: &Path,
) -> Result<Vec<PathBuf>> {
    let context = RenderContext::new(model, config)?.to_tera()?;
    let templates = TemplateSet::from_dir(templates)?;
    templates.render_to(&context, dest)
}
