//! Workbook loading and the extraction stage entry point.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use calamine::{Data, Range, Reader, Xlsx, open_workbook};
use chempack_shared::{
    ChempackError, ConstantRecord, ElementRecord, Result, SourcesConfig, UnitsDataset,
};
use tracing::{info, instrument};

use crate::extractor::{
    CONSTANTS_SHEET, DERIVED_SHEET, ELEMENTS_SHEET, PREFIXES_SHEET, TableCounts, UNITS_SHEET,
    constants_table, derived_table, elements_table, prefixes_table, units_table,
};

/// Kept/skipped tallies for every table of one extraction run.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExtractSummary {
    pub units: TableCounts,
    pub prefixes: TableCounts,
    pub derived: TableCounts,
    pub elements: TableCounts,
    pub constants: TableCounts,
}

impl ExtractSummary {
    /// Total number of rows skipped across all tables.
    pub fn total_skipped(&self) -> usize {
        self.units.skipped
            + self.prefixes.skipped
            + self.derived.skipped
            + self.elements.skipped
            + self.constants.skipped
    }
}

/// All record collections produced by one extraction run.
#[derive(Debug, Clone)]
pub struct ExtractedData {
    pub units: UnitsDataset,
    pub elements: Vec<ElementRecord>,
    pub constants: Vec<ConstantRecord>,
    pub summary: ExtractSummary,
}

fn open(path: &Path) -> Result<Xlsx<BufReader<File>>> {
    if !path.exists() {
        return Err(ChempackError::missing_source("workbook", path));
    }
    open_workbook(path)
        .map_err(|e| ChempackError::missing_source(format!("workbook ({e})"), path))
}

fn sheet_range(
    workbook: &mut Xlsx<BufReader<File>>,
    path: &Path,
    name: &str,
) -> Result<Range<Data>> {
    workbook
        .worksheet_range(name)
        .map_err(|e| ChempackError::missing_source(format!("worksheet '{name}' ({e})"), path))
}

/// Run the extraction stage over the three source workbooks.
///
/// A structurally absent workbook or worksheet aborts the whole run; rows
/// that fail validation are skipped and tallied in the summary.
#[instrument(skip_all)]
pub fn extract_all(sources: &SourcesConfig) -> Result<ExtractedData> {
    let mut summary = ExtractSummary::default();

    let units_path = sources.units_workbook.as_path();
    let mut units_wb = open(units_path)?;
    let (units, units_counts) = units_table(&sheet_range(&mut units_wb, units_path, UNITS_SHEET)?)?;
    let (prefixes, prefix_counts) =
        prefixes_table(&sheet_range(&mut units_wb, units_path, PREFIXES_SHEET)?)?;
    let (derived, derived_counts) =
        derived_table(&sheet_range(&mut units_wb, units_path, DERIVED_SHEET)?)?;
    summary.units = units_counts;
    summary.prefixes = prefix_counts;
    summary.derived = derived_counts;
    info!(
        units = units_counts.kept,
        prefixes = prefix_counts.kept,
        derived = derived_counts.kept,
        path = %units_path.display(),
        "units workbook extracted"
    );

    let periodic_path = sources.periodic_workbook.as_path();
    let mut periodic_wb = open(periodic_path)?;
    let (elements, element_counts) =
        elements_table(&sheet_range(&mut periodic_wb, periodic_path, ELEMENTS_SHEET)?)?;
    summary.elements = element_counts;
    info!(
        elements = element_counts.kept,
        path = %periodic_path.display(),
        "periodic table extracted"
    );

    let constants_path = sources.constants_workbook.as_path();
    let mut constants_wb = open(constants_path)?;
    let (constants, constant_counts) =
        constants_table(&sheet_range(&mut constants_wb, constants_path, CONSTANTS_SHEET)?)?;
    summary.constants = constant_counts;
    info!(
        constants = constant_counts.kept,
        path = %constants_path.display(),
        "constants workbook extracted"
    );

    Ok(ExtractedData {
        units: UnitsDataset {
            units,
            prefixes,
            derived,
        },
        elements,
        constants,
        summary,
    })
}
