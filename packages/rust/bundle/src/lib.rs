//! Single-file document bundling for chempack.
//!
//! Takes the HTML shell, the stylesheet, the ordered script modules, and the
//! three encoded datasets, and produces one self-contained document:
//! - [`assembler`] concatenates the script modules in dependency order
//! - [`rewriter`] performs the structural substitutions on the shell
//! - [`verify`] re-parses the result and checks the bundling postconditions
//!
//! Every substitution is anchored on an explicit marker and verified to have
//! matched; a shell that drifted from the expected template aborts the run
//! before anything is written.

pub mod assembler;
mod bootstrap;
pub mod rewriter;
pub mod verify;

pub use assembler::{AssembledModules, MODULE_ORDER, assemble_modules};
pub use rewriter::{InlineData, MANIFEST_BEGIN, MANIFEST_END, rewrite_shell};
pub use verify::verify_document;
