//! Pipeline configuration for chempack.
//!
//! Project config lives at `./chempack.toml` next to the spreadsheet and web
//! sources. Every field has a default matching the conventional project
//! layout, so both commands run with no file and no flags at all.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ChempackError, Result};

/// Default configuration file name, resolved against the working directory.
const CONFIG_FILE_NAME: &str = "chempack.toml";

// ---------------------------------------------------------------------------
// Config structs (matching chempack.toml schema)
// ---------------------------------------------------------------------------

/// Top-level pipeline config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Spreadsheet inputs.
    #[serde(default)]
    pub sources: SourcesConfig,

    /// Web assets consumed by the bundle stage.
    #[serde(default)]
    pub web: WebConfig,

    /// Output locations.
    #[serde(default)]
    pub output: OutputConfig,
}

/// `[sources]` section — the three input workbooks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourcesConfig {
    /// Workbook holding the units, SI-prefix, and derived-unit tables.
    #[serde(default = "default_units_workbook")]
    pub units_workbook: PathBuf,

    /// Workbook holding the periodic table.
    #[serde(default = "default_periodic_workbook")]
    pub periodic_workbook: PathBuf,

    /// Workbook holding the engineering constants table.
    #[serde(default = "default_constants_workbook")]
    pub constants_workbook: PathBuf,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            units_workbook: default_units_workbook(),
            periodic_workbook: default_periodic_workbook(),
            constants_workbook: default_constants_workbook(),
        }
    }
}

fn default_units_workbook() -> PathBuf {
    "units_database.xlsx".into()
}
fn default_periodic_workbook() -> PathBuf {
    "periodic_table.xlsx".into()
}
fn default_constants_workbook() -> PathBuf {
    "engineering_constants.xlsx".into()
}

/// `[web]` section — shell, stylesheet, and script modules.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebConfig {
    /// The HTML shell document to rewrite.
    #[serde(default = "default_shell")]
    pub shell: PathBuf,

    /// Stylesheet inlined into the shell.
    #[serde(default = "default_stylesheet")]
    pub stylesheet: PathBuf,

    /// Directory holding the script modules.
    #[serde(default = "default_modules_dir")]
    pub modules_dir: PathBuf,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            shell: default_shell(),
            stylesheet: default_stylesheet(),
            modules_dir: default_modules_dir(),
        }
    }
}

fn default_shell() -> PathBuf {
    "index.html".into()
}
fn default_stylesheet() -> PathBuf {
    "index.css".into()
}
fn default_modules_dir() -> PathBuf {
    "js".into()
}

/// `[output]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory receiving the three JSON dataset files.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Path of the bundled single-file document.
    #[serde(default = "default_bundle")]
    pub bundle: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            bundle: default_bundle(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    "data".into()
}
fn default_bundle() -> PathBuf {
    "index_bundle.html".into()
}

impl OutputConfig {
    /// Path of the units dataset file.
    pub fn units_data_path(&self) -> PathBuf {
        self.data_dir.join("units_data.json")
    }

    /// Path of the elements dataset file.
    pub fn periodic_table_path(&self) -> PathBuf {
        self.data_dir.join("periodic_table.json")
    }

    /// Path of the constants dataset file.
    pub fn constants_path(&self) -> PathBuf {
        self.data_dir.join("constants.json")
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config file (`./chempack.toml`).
pub fn config_file_path() -> PathBuf {
    PathBuf::from(CONFIG_FILE_NAME)
}

/// Load the pipeline config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path();

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the pipeline config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| ChempackError::io(path, e))?;

    toml::from_str(&content).map_err(|e| {
        ChempackError::config(format!("failed to parse {}: {e}", path.display()))
    })
}

/// Write a default config file in the working directory.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let path = config_file_path();
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| ChempackError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| ChempackError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}
