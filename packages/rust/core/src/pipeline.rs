//! The two pipeline stages: workbooks to dataset files, dataset files plus
//! web assets to the bundled document.

use std::path::Path;
use std::time::Instant;

use tracing::{info, instrument};

use chempack_bundle::{InlineData, assemble_modules, rewrite_shell, verify_document};
use chempack_extract::{ExtractSummary, extract_all};
use chempack_shared::{AppConfig, ChempackError, Result, to_compact_json, to_inline_json};

use crate::writer::{ArtifactMeta, write_artifact};

/// Progress callback for reporting stage status.
pub trait ProgressReporter: Send + Sync {
    /// Called when entering a new phase.
    fn phase(&self, name: &str);
    /// Called after each output file lands on disk.
    fn artifact_written(&self, meta: &ArtifactMeta);
}

/// No-op progress reporter for headless/test usage.
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn phase(&self, _name: &str) {}
    fn artifact_written(&self, _meta: &ArtifactMeta) {}
}

/// Result of the extract stage.
#[derive(Debug)]
pub struct ExtractReport {
    /// The three dataset files, in write order.
    pub artifacts: Vec<ArtifactMeta>,
    /// Kept/skipped tallies per table.
    pub summary: ExtractSummary,
    /// Total elapsed time.
    pub elapsed: std::time::Duration,
}

/// Result of the bundle stage.
#[derive(Debug)]
pub struct BundleReport {
    /// The bundled document file.
    pub artifact: ArtifactMeta,
    /// Number of script modules inlined.
    pub module_count: usize,
    /// Total elapsed time.
    pub elapsed: std::time::Duration,
}

/// Run the extract stage: read the three workbooks, validate rows, and
/// write the three dataset files.
#[instrument(skip_all)]
pub fn run_extract(
    config: &AppConfig,
    progress: &dyn ProgressReporter,
) -> Result<ExtractReport> {
    let start = Instant::now();

    progress.phase("Reading workbooks");
    let data = extract_all(&config.sources)?;

    progress.phase("Encoding datasets");
    let units_json = to_compact_json(&data.units)?;
    let periodic_json = to_compact_json(&data.elements)?;
    let constants_json = to_compact_json(&data.constants)?;

    progress.phase("Writing data files");
    let outputs = [
        (config.output.units_data_path(), units_json),
        (config.output.periodic_table_path(), periodic_json),
        (config.output.constants_path(), constants_json),
    ];

    let mut artifacts = Vec::with_capacity(outputs.len());
    for (path, content) in &outputs {
        let meta = write_artifact(path, content)?;
        progress.artifact_written(&meta);
        artifacts.push(meta);
    }

    let report = ExtractReport {
        artifacts,
        summary: data.summary,
        elapsed: start.elapsed(),
    };

    info!(
        units = report.summary.units.kept,
        prefixes = report.summary.prefixes.kept,
        derived = report.summary.derived.kept,
        elements = report.summary.elements.kept,
        constants = report.summary.constants.kept,
        skipped = report.summary.total_skipped(),
        elapsed_ms = report.elapsed.as_millis(),
        "extract stage complete"
    );

    Ok(report)
}

/// Run the bundle stage: inline stylesheet, modules, and datasets into the
/// shell, verify the result, and write the bundled document.
#[instrument(skip_all)]
pub fn run_bundle(
    config: &AppConfig,
    progress: &dyn ProgressReporter,
) -> Result<BundleReport> {
    let start = Instant::now();

    progress.phase("Loading data files");
    let data = InlineData {
        units_json: load_dataset(&config.output.units_data_path())?,
        periodic_json: load_dataset(&config.output.periodic_table_path())?,
        constants_json: load_dataset(&config.output.constants_path())?,
    };

    progress.phase("Reading web assets");
    let shell = read_text(&config.web.shell, "shell document")?;
    let stylesheet = read_text(&config.web.stylesheet, "stylesheet")?;

    progress.phase("Assembling script modules");
    let modules = assemble_modules(&config.web.modules_dir)?;

    progress.phase("Rewriting shell");
    let html = rewrite_shell(&shell, &stylesheet, &modules.source, &data)?;
    verify_document(&html)?;

    progress.phase("Writing bundle");
    let artifact = write_artifact(&config.output.bundle, &html)?;
    progress.artifact_written(&artifact);

    let report = BundleReport {
        artifact,
        module_count: modules.count,
        elapsed: start.elapsed(),
    };

    info!(
        path = %report.artifact.path.display(),
        size_bytes = report.artifact.size_bytes,
        modules = report.module_count,
        elapsed_ms = report.elapsed.as_millis(),
        "bundle stage complete"
    );

    Ok(report)
}

/// Read a dataset file and re-encode it inline-script-safe.
///
/// The content is round-tripped through `serde_json::Value` so a corrupt or
/// hand-edited file fails here, not in the browser.
fn load_dataset(path: &Path) -> Result<String> {
    let content = read_text(path, "dataset file (run `chempack extract` first)")?;
    let value: serde_json::Value = serde_json::from_str(&content).map_err(|e| {
        ChempackError::encoding(format!("invalid dataset file {}: {e}", path.display()))
    })?;
    to_inline_json(&value)
}

fn read_text(path: &Path, what: &str) -> Result<String> {
    if !path.exists() {
        return Err(ChempackError::missing_source(what, path));
    }
    std::fs::read_to_string(path).map_err(|e| ChempackError::io(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    use chempack_bundle::MODULE_ORDER;
    use chempack_shared::{OutputConfig, SourcesConfig, WebConfig};

    fn temp_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("chempack-{tag}-{}", uuid::Uuid::now_v7()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    const SHELL: &str = r#"<!DOCTYPE html>
<html>
<head>
<link rel="stylesheet" href="index.css">
</head>
<body>
<!-- scripts:manifest -->
<!-- /scripts:manifest -->
<script src="js/engine.js"></script>
</body>
</html>
"#;

    fn bundle_config(dir: &Path) -> AppConfig {
        AppConfig {
            sources: SourcesConfig::default(),
            web: WebConfig {
                shell: dir.join("index.html"),
                stylesheet: dir.join("index.css"),
                modules_dir: dir.join("js"),
            },
            output: OutputConfig {
                data_dir: dir.join("data"),
                bundle: dir.join("index_bundle.html"),
            },
        }
    }

    fn seed_bundle_inputs(dir: &Path) {
        std::fs::write(dir.join("index.html"), SHELL).unwrap();
        std::fs::write(dir.join("index.css"), "body { margin: 0; }").unwrap();

        let js = dir.join("js");
        std::fs::create_dir_all(&js).unwrap();
        for name in MODULE_ORDER {
            std::fs::write(js.join(name), format!("// {name}")).unwrap();
        }

        let data = dir.join("data");
        std::fs::create_dir_all(&data).unwrap();
        std::fs::write(
            data.join("units_data.json"),
            r#"{"units":{},"prefixes":{},"derived":{}}"#,
        )
        .unwrap();
        std::fs::write(data.join("periodic_table.json"), "[]").unwrap();
        std::fs::write(data.join("constants.json"), "[]").unwrap();
    }

    #[test]
    fn extract_with_missing_workbook_fails() {
        let dir = temp_dir("pipeline-extract");
        let mut config = bundle_config(&dir);
        config.sources.units_workbook = dir.join("units_database.xlsx");

        let err = run_extract(&config, &SilentProgress).unwrap_err();
        assert!(matches!(err, ChempackError::MissingSource { .. }));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn bundle_produces_self_contained_document() {
        let dir = temp_dir("pipeline-bundle");
        seed_bundle_inputs(&dir);
        let config = bundle_config(&dir);

        let report = run_bundle(&config, &SilentProgress).unwrap();
        assert_eq!(report.module_count, MODULE_ORDER.len());

        let html = std::fs::read_to_string(&report.artifact.path).unwrap();
        assert!(html.contains("const __UNITS_DATA__"));
        assert!(html.contains("// engine.js"));
        assert!(!html.contains("<script src=\"js/"));
        verify_document(&html).unwrap();

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn bundle_without_dataset_files_points_at_extract() {
        let dir = temp_dir("pipeline-nodata");
        seed_bundle_inputs(&dir);
        std::fs::remove_file(dir.join("data").join("units_data.json")).unwrap();
        let config = bundle_config(&dir);

        let err = run_bundle(&config, &SilentProgress).unwrap_err();
        assert!(matches!(err, ChempackError::MissingSource { .. }));
        assert!(err.to_string().contains("chempack extract"));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn bundle_with_corrupt_dataset_fails() {
        let dir = temp_dir("pipeline-corrupt");
        seed_bundle_inputs(&dir);
        std::fs::write(dir.join("data").join("constants.json"), "not json").unwrap();
        let config = bundle_config(&dir);

        let err = run_bundle(&config, &SilentProgress).unwrap_err();
        assert!(matches!(err, ChempackError::Encoding { .. }));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn bundle_preserves_dataset_key_order() {
        let dir = temp_dir("pipeline-order");
        seed_bundle_inputs(&dir);
        std::fs::write(
            dir.join("data").join("units_data.json"),
            r#"{"units":{"zeta":{"f":1},"alpha":{"f":2}},"prefixes":{},"derived":{}}"#,
        )
        .unwrap();
        let config = bundle_config(&dir);

        let report = run_bundle(&config, &SilentProgress).unwrap();
        let html = std::fs::read_to_string(&report.artifact.path).unwrap();
        let zeta = html.find("\"zeta\"").unwrap();
        let alpha = html.find("\"alpha\"").unwrap();
        assert!(zeta < alpha);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn phases_reported_in_order() {
        struct Recording(std::sync::Mutex<Vec<String>>);
        impl ProgressReporter for Recording {
            fn phase(&self, name: &str) {
                self.0.lock().unwrap().push(name.to_string());
            }
            fn artifact_written(&self, _meta: &ArtifactMeta) {}
        }

        let dir = temp_dir("pipeline-phases");
        seed_bundle_inputs(&dir);
        let config = bundle_config(&dir);

        let progress = Recording(std::sync::Mutex::new(Vec::new()));
        run_bundle(&config, &progress).unwrap();

        let phases = progress.0.into_inner().unwrap();
        assert_eq!(
            phases,
            vec![
                "Loading data files",
                "Reading web assets",
                "Assembling script modules",
                "Rewriting shell",
                "Writing bundle",
            ]
        );

        let _ = std::fs::remove_dir_all(&dir);
    }
}
