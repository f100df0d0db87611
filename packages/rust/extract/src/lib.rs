//! Spreadsheet extraction for chempack.
//!
//! Turns the three source workbooks into validated, canonical record
//! collections:
//! - units, SI prefixes, and derived units (one workbook, three sheets)
//! - periodic-table elements
//! - engineering constants
//!
//! Structure:
//! - [`columns`] resolves semantic fields to column indices by header name
//!   once per sheet (a missing sheet or header is fatal — structural drift,
//!   not a data-quality issue)
//! - [`validate`] holds the pure, total per-row validators — malformed rows
//!   are skipped and counted, never fatal
//! - [`extractor`] iterates sheet ranges and accumulates collections in
//!   source row order
//! - [`workbook`] opens the `.xlsx` files and runs the whole stage

mod columns;
pub mod extractor;
pub mod validate;
pub mod workbook;

pub use extractor::{
    CONSTANTS_SHEET, DERIVED_SHEET, ELEMENTS_SHEET, PREFIXES_SHEET, TableCounts, UNITS_SHEET,
};
pub use workbook::{ExtractSummary, ExtractedData, extract_all};
