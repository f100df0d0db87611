//! Shared types, error model, and configuration for chempack.
//!
//! This crate is the foundation depended on by all other chempack crates.
//! It provides:
//! - [`ChempackError`] — the unified error type
//! - Canonical record types ([`UnitRecord`], [`ElementRecord`], [`ConstantRecord`], …)
//! - Deterministic JSON encoding ([`encode::to_compact_json`], [`encode::to_inline_json`])
//! - Configuration ([`AppConfig`], config loading)

pub mod config;
pub mod encode;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, OutputConfig, SourcesConfig, WebConfig, config_file_path, init_config,
    load_config, load_config_from,
};
pub use encode::{to_compact_json, to_inline_json};
pub use error::{ChempackError, Result};
pub use types::{
    ConstantRecord, DerivedUnitRecord, DimensionVector, ElementRecord, PrefixRecord,
    SymbolMap, UnitRecord, UnitsDataset,
};
