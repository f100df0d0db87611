//! Canonical record types for the chempack reference datasets.
//!
//! Each record is the validated, typed representation of one spreadsheet
//! row, independent of the source column layout. Records are immutable once
//! produced; the JSON files written from them are a derived cache that is
//! rebuilt whole on every run.
//!
//! Serialization preserves source row order: maps keyed by symbol are backed
//! by [`SymbolMap`], which serializes as a JSON object in insertion order.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

// ---------------------------------------------------------------------------
// SymbolMap
// ---------------------------------------------------------------------------

/// An insertion-ordered map keyed by unit/prefix symbol.
///
/// Serializes as a JSON object whose key order is the order symbols were
/// first inserted (source row order). Re-inserting an existing symbol
/// replaces the record in place without moving the key — the same behavior
/// a plain dict insert has in the consuming runtime.
#[derive(Debug, Clone)]
pub struct SymbolMap<R>(Vec<(String, R)>);

impl<R> Default for SymbolMap<R> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<R> SymbolMap<R> {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Insert or replace the record for `symbol`, keeping first-insert order.
    pub fn insert(&mut self, symbol: String, record: R) {
        if let Some(slot) = self.0.iter_mut().find(|(k, _)| *k == symbol) {
            slot.1 = record;
        } else {
            self.0.push((symbol, record));
        }
    }

    pub fn get(&self, symbol: &str) -> Option<&R> {
        self.0.iter().find(|(k, _)| k == symbol).map(|(_, r)| r)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &R)> {
        self.0.iter().map(|(k, r)| (k.as_str(), r))
    }
}

impl<R: Serialize> Serialize for SymbolMap<R> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, record) in &self.0 {
            map.serialize_entry(key, record)?;
        }
        map.end()
    }
}

// ---------------------------------------------------------------------------
// DimensionVector
// ---------------------------------------------------------------------------

/// Exponent tuple over the seven base physical dimensions.
///
/// Every component is always present in the JSON output; blank source cells
/// become 0 because the exponents participate in arithmetic downstream.
/// Integral exponents serialize without a fractional part (`1`, not `1.0`),
/// matching how integer spreadsheet cells round-trip.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct DimensionVector {
    /// Mass.
    #[serde(rename = "M", serialize_with = "ser_exponent")]
    pub mass: f64,
    /// Length.
    #[serde(rename = "L", serialize_with = "ser_exponent")]
    pub length: f64,
    /// Time.
    #[serde(rename = "T", serialize_with = "ser_exponent")]
    pub time: f64,
    /// Temperature.
    #[serde(rename = "Th", serialize_with = "ser_exponent")]
    pub temperature: f64,
    /// Amount of substance.
    #[serde(rename = "N", serialize_with = "ser_exponent")]
    pub amount: f64,
    /// Electric current.
    #[serde(rename = "I", serialize_with = "ser_exponent")]
    pub current: f64,
    /// Luminous intensity.
    #[serde(rename = "J", serialize_with = "ser_exponent")]
    pub luminosity: f64,
}

fn ser_exponent<S: Serializer>(value: &f64, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    if value.fract() == 0.0 && value.abs() <= i64::MAX as f64 {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}

// ---------------------------------------------------------------------------
// Units dataset records
// ---------------------------------------------------------------------------

/// One measurement unit, keyed externally by its symbol.
#[derive(Debug, Clone, Serialize)]
pub struct UnitRecord {
    /// Display name; falls back to the symbol when the name cell is blank.
    pub name: String,
    /// Conversion factor to the coherent SI unit of the same dimension.
    pub factor: f64,
    pub dim: DimensionVector,
}

/// One SI prefix, keyed externally by its symbol.
#[derive(Debug, Clone, Serialize)]
pub struct PrefixRecord {
    pub name: String,
    pub factor: f64,
}

/// One derived unit with its free-text composition expression.
#[derive(Debug, Clone, Serialize)]
pub struct DerivedUnitRecord {
    pub name: String,
    /// Composition string (e.g. `kg·m/s²`); empty when the cell is blank.
    pub expr: String,
    pub dim: DimensionVector,
    /// Defaults to 1.0 when the factor cell is absent.
    pub factor: f64,
}

/// The `units_data.json` top-level object.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UnitsDataset {
    pub units: SymbolMap<UnitRecord>,
    pub prefixes: SymbolMap<PrefixRecord>,
    pub derived: SymbolMap<DerivedUnitRecord>,
}

// ---------------------------------------------------------------------------
// ElementRecord
// ---------------------------------------------------------------------------

/// One periodic-table element.
///
/// Numeric fields are null unless the source cell is natively numeric;
/// nulls are emitted explicitly so consumers see a fixed field set.
#[derive(Debug, Clone, Serialize)]
pub struct ElementRecord {
    /// Atomic number.
    #[serde(rename = "Z")]
    pub z: i64,
    pub symbol: String,
    /// Falls back to the symbol when the name cell is blank.
    pub name: String,
    pub weight: Option<f64>,
    /// Defaults to `"Unknown"` when the cell is blank.
    pub category: String,
    pub period: Option<i64>,
    pub group: Option<i64>,
    pub block: Option<String>,
    pub phase: Option<String>,
    #[serde(rename = "melt_K")]
    pub melt_k: Option<f64>,
    #[serde(rename = "boil_K")]
    pub boil_k: Option<f64>,
    pub density: Option<f64>,
    pub electronegativity: Option<f64>,
}

// ---------------------------------------------------------------------------
// ConstantRecord
// ---------------------------------------------------------------------------

/// One physical/engineering constant.
///
/// `category` is either the row's own category cell or the nearest preceding
/// category-header value in source order (see the extractor's fold).
#[derive(Debug, Clone, Serialize)]
pub struct ConstantRecord {
    pub symbol: String,
    pub name: String,
    pub value: f64,
    /// Empty string when the unit cell is blank (dimensionless constants).
    pub unit: String,
    pub category: String,
    /// Free-text uncertainty; empty when the cell is blank.
    pub uncertainty: String,
}
