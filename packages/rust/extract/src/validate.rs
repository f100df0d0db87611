//! Pure per-row validators.
//!
//! Each validator takes one raw cell row plus the resolved column map and
//! returns a [`RowOutcome`] — a canonical record, `Blank` (the key cell is
//! empty, so this is not a data row), or `Invalid` (key present but the row
//! fails validation and must be skipped). Validators are total: no cell
//! content can make them panic.
//!
//! Numeric fields accept only natively numeric cells (integer or float);
//! anything else is treated as absent. Only the primary `factor`/`value`
//! field escalates absence to `Invalid` — every other numeric field
//! degrades to null, and dimension slots degrade to 0.

use calamine::Data;
use chempack_shared::{ConstantRecord, DerivedUnitRecord, ElementRecord, PrefixRecord, UnitRecord};

use crate::columns::{ConstantColumns, DerivedColumns, ElementColumns, PrefixColumns, UnitColumns};

/// Result of validating one row.
#[derive(Debug)]
pub enum RowOutcome<T> {
    /// A canonical record.
    Record(T),
    /// The key cell is empty — not a data row.
    Blank,
    /// The key cell is present but the row fails validation.
    Invalid,
}

/// Result of validating one constants-table row, which may also be a
/// category header that updates the fold accumulator without emitting.
#[derive(Debug)]
pub enum ConstantOutcome {
    Record(ConstantRecord),
    /// Category header row: the new "current category" value.
    Header(String),
    Blank,
    Invalid,
}

// ---------------------------------------------------------------------------
// Cell readers
// ---------------------------------------------------------------------------

/// Trimmed text of a single cell; `None` when empty or an error cell.
/// Non-string cells are coerced to their display form.
pub(crate) fn cell_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty | Data::Error(_) => None,
        Data::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        other => Some(other.to_string()),
    }
}

/// Trimmed text at `idx`; `None` when the cell is empty or out of range.
pub(crate) fn text(row: &[Data], idx: usize) -> Option<String> {
    row.get(idx).and_then(cell_text)
}

/// Numeric value at `idx`, only when the cell's native type is numeric.
pub(crate) fn cell_number(row: &[Data], idx: usize) -> Option<f64> {
    match row.get(idx) {
        Some(Data::Float(f)) => Some(*f),
        Some(Data::Int(i)) => Some(*i as f64),
        _ => None,
    }
}

/// Integer value at `idx`, only when the cell's native type is numeric.
fn cell_integer(row: &[Data], idx: usize) -> Option<i64> {
    cell_number(row, idx).map(|f| f as i64)
}

/// Whether the cell at `idx` is empty (or whitespace-only text).
fn blank(row: &[Data], idx: usize) -> bool {
    match row.get(idx) {
        None | Some(Data::Empty) => true,
        Some(Data::String(s)) => s.trim().is_empty(),
        _ => false,
    }
}

// ---------------------------------------------------------------------------
// Row validators
// ---------------------------------------------------------------------------

/// Validate one row of the units table.
pub(crate) fn unit_row(cols: &UnitColumns, row: &[Data]) -> RowOutcome<(String, UnitRecord)> {
    let Some(symbol) = text(row, cols.symbol) else {
        return RowOutcome::Blank;
    };
    let Some(factor) = cell_number(row, cols.factor) else {
        return RowOutcome::Invalid;
    };
    if !factor.is_finite() {
        return RowOutcome::Invalid;
    }

    let name = text(row, cols.name).unwrap_or_else(|| symbol.clone());
    let record = UnitRecord {
        name,
        factor,
        dim: cols.dim.read(row),
    };
    RowOutcome::Record((symbol, record))
}

/// Validate one row of the SI-prefixes table.
pub(crate) fn prefix_row(cols: &PrefixColumns, row: &[Data]) -> RowOutcome<(String, PrefixRecord)> {
    let Some(symbol) = text(row, cols.symbol) else {
        return RowOutcome::Blank;
    };
    let Some(factor) = cell_number(row, cols.factor) else {
        return RowOutcome::Invalid;
    };
    if !factor.is_finite() {
        return RowOutcome::Invalid;
    }

    let name = text(row, cols.name).unwrap_or_else(|| symbol.clone());
    RowOutcome::Record((symbol, PrefixRecord { name, factor }))
}

/// Validate one row of the derived-units table.
///
/// The factor is optional here (defaults to 1.0), so no cell content can
/// reject a row once its symbol is present.
pub(crate) fn derived_row(
    cols: &DerivedColumns,
    row: &[Data],
) -> RowOutcome<(String, DerivedUnitRecord)> {
    let Some(symbol) = text(row, cols.symbol) else {
        return RowOutcome::Blank;
    };

    let record = DerivedUnitRecord {
        name: text(row, cols.name).unwrap_or_else(|| symbol.clone()),
        expr: text(row, cols.expr).unwrap_or_default(),
        dim: cols.dim.read(row),
        factor: cell_number(row, cols.factor).unwrap_or(1.0),
    };
    RowOutcome::Record((symbol, record))
}

/// Validate one row of the periodic table.
pub(crate) fn element_row(cols: &ElementColumns, row: &[Data]) -> RowOutcome<ElementRecord> {
    if blank(row, cols.z) {
        return RowOutcome::Blank;
    }
    let Some(z) = cell_integer(row, cols.z) else {
        return RowOutcome::Invalid;
    };
    if z <= 0 {
        return RowOutcome::Invalid;
    }
    let Some(symbol) = text(row, cols.symbol) else {
        return RowOutcome::Invalid;
    };

    let record = ElementRecord {
        z,
        name: text(row, cols.name).unwrap_or_else(|| symbol.clone()),
        symbol,
        weight: cell_number(row, cols.weight),
        category: text(row, cols.category).unwrap_or_else(|| "Unknown".to_string()),
        period: cell_integer(row, cols.period),
        group: cell_integer(row, cols.group),
        block: text(row, cols.block),
        phase: text(row, cols.phase),
        melt_k: cell_number(row, cols.melt_k),
        boil_k: cell_number(row, cols.boil_k),
        density: cell_number(row, cols.density),
        electronegativity: cell_number(row, cols.electronegativity),
    };
    RowOutcome::Record(record)
}

/// Validate one row of the constants table.
///
/// `current_category` is the fold accumulator threaded through row
/// processing: a header row (key present, name and value cells both empty)
/// replaces it, and a data row with a blank category cell inherits it.
/// The header label is taken from the header row's category cell when
/// present, else from its key cell.
pub(crate) fn constant_row(
    cols: &ConstantColumns,
    row: &[Data],
    current_category: &str,
) -> ConstantOutcome {
    let Some(symbol) = text(row, cols.symbol) else {
        return ConstantOutcome::Blank;
    };

    if blank(row, cols.name) && blank(row, cols.value) {
        let label = text(row, cols.category).unwrap_or(symbol);
        return ConstantOutcome::Header(label);
    }

    let Some(name) = text(row, cols.name) else {
        return ConstantOutcome::Invalid;
    };
    let Some(value) = cell_number(row, cols.value) else {
        return ConstantOutcome::Invalid;
    };
    if !value.is_finite() {
        return ConstantOutcome::Invalid;
    }

    ConstantOutcome::Record(ConstantRecord {
        symbol,
        name,
        value,
        unit: text(row, cols.unit).unwrap_or_default(),
        category: text(row, cols.category).unwrap_or_else(|| current_category.to_string()),
        uncertainty: text(row, cols.uncertainty).unwrap_or_default(),
    })
}
