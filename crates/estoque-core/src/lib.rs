//! # estoque-core
//!
//! Core domain model and aggregation logic for the estoque reporting
//! pipeline.
//!
//! This crate provides:
//! - Domain types: [`InventoryRow`], [`CoverageBand`], [`CoverageReport`],
//!   [`BandReport`]
//! - The positivity filter and the two aggregators (weighted coverage per
//!   branch, order balance per branch and band)
//! - Error types
//!
//! ## Example
//!
//! ```rust
//! use estoque_core::{band_distribution, coverage_by_filial, filter_valid, InventoryRow};
//!
//! let rows = vec![
//!     InventoryRow::new("A", 10.0, 100.0, "SKU-1", 50.0),
//!     InventoryRow::new("A", 20.0, 300.0, "SKU-2", 70.0),
//! ];
//! let valid = filter_valid(&rows);
//! let cobertura = coverage_by_filial(&valid).unwrap();
//! assert_eq!(cobertura.rows[0].dias_cobertura, 17.5);
//! let faixas = band_distribution(&valid);
//! assert_eq!(faixas.rows[0].total, 120.0);
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

mod aggregate;
mod band;

pub use aggregate::{band_distribution, coverage_by_filial, filter_valid, round2};
pub use band::CoverageBand;

// ============================================================================
// Type Aliases
// ============================================================================

/// Branch identifier (the `Filial` column of the source extract)
pub type Filial = String;

// ============================================================================
// Input Rows
// ============================================================================

/// One normalized record of the inventory extract.
///
/// `mercadoria` is carried through untouched; aggregation only reads the
/// branch and the three numeric fields.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InventoryRow {
    /// Branch owning this row
    pub filial: Filial,
    /// Days the current stock is expected to last
    pub cobertura_dias: f64,
    /// Stock value, used as the weight for average coverage
    pub valor_estoque: f64,
    /// Merchandise identifier (passthrough)
    pub mercadoria: String,
    /// Open order balance not yet received
    pub saldo_pedido: f64,
}

impl InventoryRow {
    pub fn new(
        filial: impl Into<String>,
        cobertura_dias: f64,
        valor_estoque: f64,
        mercadoria: impl Into<String>,
        saldo_pedido: f64,
    ) -> Self {
        Self {
            filial: filial.into(),
            cobertura_dias,
            valor_estoque,
            mercadoria: mercadoria.into(),
            saldo_pedido,
        }
    }
}

// ============================================================================
// Reports
// ============================================================================

/// One branch of the weighted-coverage report.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CoverageRow {
    pub filial: Filial,
    /// Weighted mean of coverage days, weight = stock value, rounded to 2dp
    pub dias_cobertura: f64,
    /// Sum of open order balance, rounded to 2dp
    pub saldo_pedido_total: f64,
}

/// Per-branch weighted coverage and total order balance.
///
/// One row per distinct branch present after filtering, in alphabetical
/// branch order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CoverageReport {
    pub rows: Vec<CoverageRow>,
}

impl CoverageReport {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// One branch of the band-distribution report.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BandRow {
    pub filial: Filial,
    /// Order balance summed per band, indexed by [`CoverageBand::index`];
    /// combinations absent from the data hold 0
    pub por_faixa: [f64; CoverageBand::COUNT],
    /// Row-wise sum across the five bands
    pub total: f64,
}

impl BandRow {
    /// Balance accumulated in one band.
    pub fn get(&self, band: CoverageBand) -> f64 {
        self.por_faixa[band.index()]
    }
}

/// Per-branch order balance pivoted across coverage bands.
///
/// `observed` records which bands have at least one source row anywhere in
/// the data; only those become workbook columns.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BandReport {
    pub rows: Vec<BandRow>,
    observed: [bool; CoverageBand::COUNT],
}

impl BandReport {
    pub(crate) fn new(rows: Vec<BandRow>, observed: [bool; CoverageBand::COUNT]) -> Self {
        Self { rows, observed }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Bands with at least one source row, in the fixed band order.
    pub fn bands_present(&self) -> Vec<CoverageBand> {
        CoverageBand::ALL
            .into_iter()
            .filter(|b| self.observed[b.index()])
            .collect()
    }
}

// ============================================================================
// Errors
// ============================================================================

/// Aggregation error
#[derive(Debug, Error)]
pub enum AggregateError {
    /// A branch has zero total stock value, so the weighted mean of its
    /// coverage days is undefined. The run fails whole rather than emitting
    /// a sentinel cell.
    #[error("filial '{0}' has zero total stock value; weighted coverage is undefined")]
    ZeroWeight(Filial),
}

/// Rendering error
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Format error: {0}")]
    Format(String),
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn band_row_lookup() {
        let mut por_faixa = [0.0; CoverageBand::COUNT];
        por_faixa[CoverageBand::Ate15.index()] = 50.0;
        let row = BandRow {
            filial: "A".into(),
            por_faixa,
            total: 50.0,
        };
        assert_eq!(row.get(CoverageBand::Ate15), 50.0);
        assert_eq!(row.get(CoverageBand::Acima60), 0.0);
    }

    #[test]
    fn bands_present_follows_fixed_order() {
        let mut observed = [false; CoverageBand::COUNT];
        observed[CoverageBand::Acima60.index()] = true;
        observed[CoverageBand::Ate15.index()] = true;
        let report = BandReport::new(Vec::new(), observed);
        assert_eq!(
            report.bands_present(),
            vec![CoverageBand::Ate15, CoverageBand::Acima60]
        );
    }
}
