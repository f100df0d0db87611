//! Script module assembly.
//!
//! Modules are concatenated in the order of [`MODULE_ORDER`]. That order is
//! a correctness contract, not cosmetics: later modules reference globals
//! defined by earlier ones, so the list is hand-maintained and the assembler
//! never reorders, deduplicates, or skips entries.

use std::path::Path;

use chempack_shared::{ChempackError, Result};
use tracing::debug;

/// Script modules in dependency order. `engine.js` defines the conversion
/// engine globals every UI module expects; `molar_mass.js` feeds
/// `equation_balancer.js`; the UI modules come last.
pub const MODULE_ORDER: &[&str] = &[
    "engine.js",
    "molar_mass.js",
    "equation_balancer.js",
    "ui_converter.js",
    "ui_molar.js",
    "ui_periodic.js",
    "ui_constants.js",
    "ui_favorites.js",
    "ui_library.js",
    "ui_balancer.js",
];

/// Output of a successful module assembly.
#[derive(Debug, Clone)]
pub struct AssembledModules {
    /// All module sources concatenated in declared order.
    pub source: String,
    /// Number of modules loaded.
    pub count: usize,
}

/// Load every module in [`MODULE_ORDER`] from `modules_dir` and concatenate
/// them, separated by one blank line. A missing module is fatal.
pub fn assemble_modules(modules_dir: &Path) -> Result<AssembledModules> {
    let mut sources = Vec::with_capacity(MODULE_ORDER.len());

    for name in MODULE_ORDER {
        let path = modules_dir.join(name);
        if !path.exists() {
            return Err(ChempackError::missing_source("script module", path));
        }
        let text =
            std::fs::read_to_string(&path).map_err(|e| ChempackError::io(&path, e))?;
        debug!(module = name, bytes = text.len(), "loaded script module");
        sources.push(text);
    }

    Ok(AssembledModules {
        count: sources.len(),
        source: sources.join("\n\n"),
    })
}
