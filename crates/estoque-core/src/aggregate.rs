//! Row filtering and the two report aggregators.
//!
//! Grouping is explicit: one `BTreeMap` keyed by branch accumulates running
//! sums, then one record per key is emitted. The `BTreeMap` makes row order
//! alphabetical and byte-stable across runs.

use std::collections::BTreeMap;

use tracing::debug;

use crate::{
    AggregateError, BandReport, BandRow, CoverageBand, CoverageReport, CoverageRow, InventoryRow,
};

/// Keep only rows with positive coverage and positive order balance.
///
/// Returns an owned copy; the input is never aliased or mutated. An empty
/// result is valid and yields empty reports downstream.
pub fn filter_valid(rows: &[InventoryRow]) -> Vec<InventoryRow> {
    let valid: Vec<InventoryRow> = rows
        .iter()
        .filter(|r| r.cobertura_dias > 0.0 && r.saldo_pedido > 0.0)
        .cloned()
        .collect();
    debug!(total = rows.len(), kept = valid.len(), "filtered rows");
    valid
}

/// Round to 2 decimal places for display.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[derive(Default)]
struct CoverageAcc {
    weighted_sum: f64,
    weight_sum: f64,
    saldo_sum: f64,
}

/// Weighted-average coverage and total order balance per branch.
///
/// For each branch: `sum(cobertura_dias * valor_estoque) / sum(valor_estoque)`
/// and `sum(saldo_pedido)`, both rounded to 2 decimal places. A branch whose
/// rows carry zero total stock value has no defined weighted mean and fails
/// the whole run with [`AggregateError::ZeroWeight`].
pub fn coverage_by_filial(rows: &[InventoryRow]) -> Result<CoverageReport, AggregateError> {
    let mut groups: BTreeMap<&str, CoverageAcc> = BTreeMap::new();
    for row in rows {
        let acc = groups.entry(row.filial.as_str()).or_default();
        acc.weighted_sum += row.cobertura_dias * row.valor_estoque;
        acc.weight_sum += row.valor_estoque;
        acc.saldo_sum += row.saldo_pedido;
    }

    let mut report = CoverageReport::default();
    for (filial, acc) in groups {
        if acc.weight_sum == 0.0 {
            return Err(AggregateError::ZeroWeight(filial.to_string()));
        }
        report.rows.push(CoverageRow {
            filial: filial.to_string(),
            dias_cobertura: round2(acc.weighted_sum / acc.weight_sum),
            saldo_pedido_total: round2(acc.saldo_sum),
        });
    }
    debug!(filiais = report.rows.len(), "coverage aggregated");
    Ok(report)
}

/// Order balance per branch and coverage band, pivoted wide.
///
/// Each row is labeled with its band, balances are summed per
/// `(branch, band)`, and the pivot is materialized over the full cross
/// product of observed branches and the fixed band set with explicit zero
/// fill. `total` is the row sum across the five bands.
pub fn band_distribution(rows: &[InventoryRow]) -> BandReport {
    let mut groups: BTreeMap<&str, [f64; CoverageBand::COUNT]> = BTreeMap::new();
    let mut observed = [false; CoverageBand::COUNT];

    for row in rows {
        let band = CoverageBand::classify(row.cobertura_dias);
        observed[band.index()] = true;
        let cells = groups
            .entry(row.filial.as_str())
            .or_insert([0.0; CoverageBand::COUNT]);
        cells[band.index()] += row.saldo_pedido;
    }

    let rows = groups
        .into_iter()
        .map(|(filial, por_faixa)| BandRow {
            filial: filial.to_string(),
            total: por_faixa.iter().sum(),
            por_faixa,
        })
        .collect::<Vec<_>>();
    debug!(filiais = rows.len(), "band distribution aggregated");
    BandReport::new(rows, observed)
}
