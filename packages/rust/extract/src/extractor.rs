//! Per-table extraction over worksheet ranges.
//!
//! Each table extractor takes the sheet's full cell range, resolves its
//! columns from the header row, and folds the remaining rows through the
//! validators, accumulating records in source row order. Invalid rows are
//! counted and logged; only structural problems (no header row, missing
//! required header) abort.

use calamine::{Data, Range};
use chempack_shared::{
    ChempackError, ConstantRecord, DerivedUnitRecord, ElementRecord, PrefixRecord, Result,
    SymbolMap, UnitRecord,
};
use tracing::warn;

use crate::columns::{
    ConstantColumns, DerivedColumns, ElementColumns, PrefixColumns, UnitColumns,
};
use crate::validate::{self, ConstantOutcome, RowOutcome};

/// Worksheet holding the main units table.
pub const UNITS_SHEET: &str = "units_database";
/// Worksheet holding the SI prefixes.
pub const PREFIXES_SHEET: &str = "SI_prefixes";
/// Worksheet holding the derived units.
pub const DERIVED_SHEET: &str = "derived_units";
/// Worksheet holding the periodic table.
pub const ELEMENTS_SHEET: &str = "periodic_table";
/// Worksheet holding the engineering constants.
pub const CONSTANTS_SHEET: &str = "engineering_constants";

/// Kept/skipped row tally for one table.
#[derive(Debug, Clone, Copy, Default)]
pub struct TableCounts {
    /// Records accumulated (after duplicate-key replacement).
    pub kept: usize,
    /// Rows with a key cell that failed validation.
    pub skipped: usize,
}

fn header_row<'r>(sheet: &'static str, range: &'r Range<Data>) -> Result<&'r [Data]> {
    range.rows().next().ok_or_else(|| {
        ChempackError::missing_source("header row", format!("sheet '{sheet}'"))
    })
}

fn log_skip(sheet: &'static str, row_number: usize) {
    // row_number is 1-based including the header, matching what a user sees
    // in their spreadsheet application.
    warn!(sheet, row = row_number, "row skipped: failed validation");
}

/// Extract the units table.
pub fn units_table(range: &Range<Data>) -> Result<(SymbolMap<UnitRecord>, TableCounts)> {
    let cols = UnitColumns::resolve(UNITS_SHEET, header_row(UNITS_SHEET, range)?)?;

    let mut units = SymbolMap::new();
    let mut counts = TableCounts::default();
    for (idx, row) in range.rows().skip(1).enumerate() {
        match validate::unit_row(&cols, row) {
            RowOutcome::Record((symbol, record)) => units.insert(symbol, record),
            RowOutcome::Blank => {}
            RowOutcome::Invalid => {
                counts.skipped += 1;
                log_skip(UNITS_SHEET, idx + 2);
            }
        }
    }
    counts.kept = units.len();
    Ok((units, counts))
}

/// Extract the SI-prefixes table.
pub fn prefixes_table(range: &Range<Data>) -> Result<(SymbolMap<PrefixRecord>, TableCounts)> {
    let cols = PrefixColumns::resolve(PREFIXES_SHEET, header_row(PREFIXES_SHEET, range)?)?;

    let mut prefixes = SymbolMap::new();
    let mut counts = TableCounts::default();
    for (idx, row) in range.rows().skip(1).enumerate() {
        match validate::prefix_row(&cols, row) {
            RowOutcome::Record((symbol, record)) => prefixes.insert(symbol, record),
            RowOutcome::Blank => {}
            RowOutcome::Invalid => {
                counts.skipped += 1;
                log_skip(PREFIXES_SHEET, idx + 2);
            }
        }
    }
    counts.kept = prefixes.len();
    Ok((prefixes, counts))
}

/// Extract the derived-units table.
pub fn derived_table(range: &Range<Data>) -> Result<(SymbolMap<DerivedUnitRecord>, TableCounts)> {
    let cols = DerivedColumns::resolve(DERIVED_SHEET, header_row(DERIVED_SHEET, range)?)?;

    let mut derived = SymbolMap::new();
    let mut counts = TableCounts::default();
    for (idx, row) in range.rows().skip(1).enumerate() {
        match validate::derived_row(&cols, row) {
            RowOutcome::Record((symbol, record)) => derived.insert(symbol, record),
            RowOutcome::Blank => {}
            RowOutcome::Invalid => {
                counts.skipped += 1;
                log_skip(DERIVED_SHEET, idx + 2);
            }
        }
    }
    counts.kept = derived.len();
    Ok((derived, counts))
}

/// Extract the periodic table, preserving source row order.
pub fn elements_table(range: &Range<Data>) -> Result<(Vec<ElementRecord>, TableCounts)> {
    let cols = ElementColumns::resolve(ELEMENTS_SHEET, header_row(ELEMENTS_SHEET, range)?)?;

    let mut elements = Vec::new();
    let mut counts = TableCounts::default();
    for (idx, row) in range.rows().skip(1).enumerate() {
        match validate::element_row(&cols, row) {
            RowOutcome::Record(record) => elements.push(record),
            RowOutcome::Blank => {}
            RowOutcome::Invalid => {
                counts.skipped += 1;
                log_skip(ELEMENTS_SHEET, idx + 2);
            }
        }
    }
    counts.kept = elements.len();
    Ok((elements, counts))
}

/// Extract the constants table, preserving source row order.
///
/// The "current category" is a fold accumulator: header rows replace it and
/// emit nothing; data rows with a blank category cell inherit it.
pub fn constants_table(range: &Range<Data>) -> Result<(Vec<ConstantRecord>, TableCounts)> {
    let cols = ConstantColumns::resolve(CONSTANTS_SHEET, header_row(CONSTANTS_SHEET, range)?)?;

    let mut constants = Vec::new();
    let mut counts = TableCounts::default();
    let mut current_category = String::from("General");

    for (idx, row) in range.rows().skip(1).enumerate() {
        match validate::constant_row(&cols, row, &current_category) {
            ConstantOutcome::Record(record) => constants.push(record),
            ConstantOutcome::Header(label) => current_category = label,
            ConstantOutcome::Blank => {}
            ConstantOutcome::Invalid => {
                counts.skipped += 1;
                log_skip(CONSTANTS_SHEET, idx + 2);
            }
        }
    }
    counts.kept = constants.len();
    Ok((constants, counts))
}
