//! Pipeline orchestration: the `extract` and `bundle` stage entry points,
//! plus the atomic artifact writer both stages share.

pub mod pipeline;
pub mod writer;

pub use pipeline::{
    BundleReport, ExtractReport, ProgressReporter, SilentProgress, run_bundle, run_extract,
};
pub use writer::{ArtifactMeta, write_artifact};
