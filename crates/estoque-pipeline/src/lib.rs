//! # estoque-pipeline
//!
//! Stateless composition of the reporting stages: positivity filter,
//! coverage aggregator, band aggregator, workbook renderer. One invocation
//! owns no state beyond its inputs and outputs; running twice on the same
//! input yields identical reports.
//!
//! [`process`] starts from normalized rows; [`process_bytes`] additionally
//! ingests a raw xlsx buffer first. Any stage failure is terminal for the
//! invocation, no partial reports are produced.

use estoque_core::{
    band_distribution, coverage_by_filial, filter_valid, AggregateError, BandReport,
    CoverageReport, InventoryRow, RenderError,
};
use estoque_ingest::IngestError;
use estoque_render::ExcelRenderer;
use thiserror::Error;
use tracing::info;

/// Pipeline error, one variant per stage
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Ingest(#[from] IngestError),

    #[error(transparent)]
    Aggregate(#[from] AggregateError),

    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Everything one invocation produces.
#[derive(Clone, Debug)]
pub struct ReportBundle {
    pub cobertura: CoverageReport,
    pub faixas: BandReport,
    /// Complete xlsx workbook, ready for download or disk
    pub workbook: Vec<u8>,
}

/// Run the full pipeline over normalized rows.
///
/// Rows failing the positivity constraints are dropped first; an input that
/// filters down to nothing yields structurally valid empty reports and a
/// header-only workbook, not an error.
pub fn process(rows: &[InventoryRow]) -> Result<ReportBundle, PipelineError> {
    let valid = filter_valid(rows);
    let cobertura = coverage_by_filial(&valid)?;
    let faixas = band_distribution(&valid);
    let workbook = ExcelRenderer::new().render_to_bytes(&cobertura, &faixas)?;
    info!(
        filiais = cobertura.rows.len(),
        bytes = workbook.len(),
        "reports generated"
    );
    Ok(ReportBundle {
        cobertura,
        faixas,
        workbook,
    })
}

/// Ingest a raw xlsx buffer (first sheet, headers on row 1) and run the
/// full pipeline.
pub fn process_bytes(xlsx: &[u8]) -> Result<ReportBundle, PipelineError> {
    let rows = estoque_ingest::read_xlsx_bytes(xlsx)?;
    process(&rows)
}
