//! # estoque-render
//!
//! Workbook export backend: serializes a [`CoverageReport`] and a
//! [`BandReport`] into one two-sheet xlsx artifact, built entirely in
//! memory.
//!
//! [`CoverageReport`]: estoque_core::CoverageReport
//! [`BandReport`]: estoque_core::BandReport

mod excel;

pub use excel::ExcelRenderer;

/// Sheet holding the per-branch weighted coverage report.
pub const SHEET_COBERTURA: &str = "Cobertura Média";

/// Sheet holding the per-branch band distribution report.
pub const SHEET_FAIXAS: &str = "Distribuição por Faixa";

/// Suggested download filename for the exported workbook.
pub const SUGGESTED_FILENAME: &str = "relatorio_estoque.xlsx";

/// MIME type of the exported workbook.
pub const XLSX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
