//! Header-name column resolution.
//!
//! Fields are resolved to column indices by header name once per sheet, so
//! the pipeline survives column reordering in the source spreadsheets. A
//! required header that is absent aborts the run — the sheet has drifted
//! from the wire contract and silently extracting garbage would be worse.
//!
//! Matching is case-insensitive on the trimmed header text.

use calamine::Data;
use chempack_shared::{ChempackError, DimensionVector, Result};

use crate::validate::cell_text;

/// Lowercased header text → column index for one sheet.
pub(crate) struct ColumnIndex {
    sheet: &'static str,
    by_name: Vec<(String, usize)>,
}

impl ColumnIndex {
    pub(crate) fn from_header(sheet: &'static str, header: &[Data]) -> Self {
        let by_name = header
            .iter()
            .enumerate()
            .filter_map(|(idx, cell)| {
                cell_text(cell).map(|text| (text.to_lowercase(), idx))
            })
            .collect();
        Self { sheet, by_name }
    }

    fn require(&self, header: &str) -> Result<usize> {
        let wanted = header.to_lowercase();
        self.by_name
            .iter()
            .find(|(name, _)| *name == wanted)
            .map(|(_, idx)| *idx)
            .ok_or_else(|| {
                ChempackError::missing_source(
                    format!("required header '{header}'"),
                    format!("sheet '{}'", self.sheet),
                )
            })
    }
}

/// The seven dimension-exponent columns, in `M,L,T,Th,N,I,J` order.
pub(crate) struct DimColumns([usize; 7]);

impl DimColumns {
    const HEADERS: [&'static str; 7] = ["M", "L", "T", "Th", "N", "I", "J"];

    fn resolve(index: &ColumnIndex) -> Result<Self> {
        let mut slots = [0usize; 7];
        for (slot, header) in slots.iter_mut().zip(Self::HEADERS) {
            *slot = index.require(header)?;
        }
        Ok(Self(slots))
    }

    /// Read the dimension vector from a data row; blank slots become 0.
    pub(crate) fn read(&self, row: &[Data]) -> DimensionVector {
        let get = |i: usize| crate::validate::cell_number(row, self.0[i]).unwrap_or(0.0);
        DimensionVector {
            mass: get(0),
            length: get(1),
            time: get(2),
            temperature: get(3),
            amount: get(4),
            current: get(5),
            luminosity: get(6),
        }
    }
}

pub(crate) struct UnitColumns {
    pub symbol: usize,
    pub name: usize,
    pub factor: usize,
    pub dim: DimColumns,
}

impl UnitColumns {
    pub(crate) fn resolve(sheet: &'static str, header: &[Data]) -> Result<Self> {
        let index = ColumnIndex::from_header(sheet, header);
        Ok(Self {
            symbol: index.require("symbol")?,
            name: index.require("name")?,
            factor: index.require("factor")?,
            dim: DimColumns::resolve(&index)?,
        })
    }
}

#[derive(Debug)]
pub(crate) struct PrefixColumns {
    pub name: usize,
    pub symbol: usize,
    pub factor: usize,
}

impl PrefixColumns {
    pub(crate) fn resolve(sheet: &'static str, header: &[Data]) -> Result<Self> {
        let index = ColumnIndex::from_header(sheet, header);
        Ok(Self {
            name: index.require("name")?,
            symbol: index.require("symbol")?,
            factor: index.require("factor")?,
        })
    }
}

pub(crate) struct DerivedColumns {
    pub symbol: usize,
    pub name: usize,
    pub expr: usize,
    pub dim: DimColumns,
    pub factor: usize,
}

impl DerivedColumns {
    pub(crate) fn resolve(sheet: &'static str, header: &[Data]) -> Result<Self> {
        let index = ColumnIndex::from_header(sheet, header);
        Ok(Self {
            symbol: index.require("symbol")?,
            name: index.require("name")?,
            expr: index.require("expression")?,
            dim: DimColumns::resolve(&index)?,
            factor: index.require("factor")?,
        })
    }
}

pub(crate) struct ElementColumns {
    pub z: usize,
    pub symbol: usize,
    pub name: usize,
    pub weight: usize,
    pub category: usize,
    pub period: usize,
    pub group: usize,
    pub block: usize,
    pub phase: usize,
    pub melt_k: usize,
    pub boil_k: usize,
    pub density: usize,
    pub electronegativity: usize,
}

impl ElementColumns {
    pub(crate) fn resolve(sheet: &'static str, header: &[Data]) -> Result<Self> {
        let index = ColumnIndex::from_header(sheet, header);
        Ok(Self {
            z: index.require("Z")?,
            symbol: index.require("symbol")?,
            name: index.require("name")?,
            weight: index.require("atomic_weight")?,
            category: index.require("category")?,
            period: index.require("period")?,
            group: index.require("group")?,
            block: index.require("block")?,
            phase: index.require("phase")?,
            melt_k: index.require("melt_K")?,
            boil_k: index.require("boil_K")?,
            density: index.require("density")?,
            electronegativity: index.require("electronegativity")?,
        })
    }
}

pub(crate) struct ConstantColumns {
    pub symbol: usize,
    pub name: usize,
    pub value: usize,
    pub uncertainty: usize,
    pub unit: usize,
    pub category: usize,
}

impl ConstantColumns {
    pub(crate) fn resolve(sheet: &'static str, header: &[Data]) -> Result<Self> {
        let index = ColumnIndex::from_header(sheet, header);
        Ok(Self {
            symbol: index.require("symbol")?,
            name: index.require("name")?,
            value: index.require("value")?,
            uncertainty: index.require("uncertainty")?,
            unit: index.require("unit")?,
            category: index.require("category")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(names: &[&str]) -> Vec<Data> {
        names.iter().map(|n| Data::String((*n).to_string())).collect()
    }

    #[test]
    fn resolves_regardless_of_column_order() {
        let row = header(&["factor", "M", "L", "T", "Th", "N", "I", "J", "name", "symbol"]);
        let cols = UnitColumns::resolve("units_database", &row).expect("resolve");
        assert_eq!(cols.factor, 0);
        assert_eq!(cols.name, 8);
        assert_eq!(cols.symbol, 9);
    }

    #[test]
    fn header_match_is_case_insensitive() {
        let row = header(&["Name", "SYMBOL", "Factor"]);
        let cols = PrefixColumns::resolve("SI_prefixes", &row).expect("resolve");
        assert_eq!(cols.name, 0);
        assert_eq!(cols.symbol, 1);
        assert_eq!(cols.factor, 2);
    }

    #[test]
    fn missing_required_header_is_fatal() {
        let row = header(&["symbol", "name"]);
        let err = PrefixColumns::resolve("SI_prefixes", &row).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("required header 'factor'"));
        assert!(msg.contains("SI_prefixes"));
    }

    #[test]
    fn extra_columns_are_ignored() {
        let row = header(&["symbol", "name", "value", "uncertainty", "unit", "notes", "category"]);
        let cols = ConstantColumns::resolve("engineering_constants", &row).expect("resolve");
        assert_eq!(cols.category, 6);
    }

    #[test]
    fn dim_columns_read_blanks_as_zero() {
        let row = header(&["symbol", "name", "factor", "M", "L", "T", "Th", "N", "I", "J"]);
        let cols = UnitColumns::resolve("units_database", &row).expect("resolve");

        let mut data = vec![Data::Empty; 10];
        data[0] = Data::String("Pa".into());
        data[3] = Data::Float(1.0);
        data[4] = Data::Float(-1.0);
        let dim = cols.dim.read(&data);
        assert_eq!(dim.mass, 1.0);
        assert_eq!(dim.length, -1.0);
        assert_eq!(dim.time, 0.0);
        assert_eq!(dim.luminosity, 0.0);
    }
}
