//! # estoque-ingest
//!
//! Reads an inventory extract (xlsx, first sheet, headers on row 1),
//! validates that the required columns are present and coerces the numeric
//! columns at ingestion, producing normalized [`InventoryRow`]s.
//!
//! Column names are matched by exact string equality (case- and
//! accent-sensitive) against the source vocabulary in [`REQUIRED_COLUMNS`];
//! column order is arbitrary and extra columns are ignored. A missing
//! required column or a non-numeric cell in a numeric column fails the whole
//! run, no partial processing.

use std::io::Cursor;
use std::path::Path;

use calamine::{open_workbook, Data, Range, Reader, Xlsx};
use estoque_core::InventoryRow;
use thiserror::Error;
use tracing::debug;

/// Required source columns, in the order they map to [`InventoryRow`] fields.
pub const REQUIRED_COLUMNS: [&str; 5] = [
    "Filial",
    "Cobertura Atual",
    "Vlr Estoque Tmk",
    "Mercadoria",
    "Saldo Pedido",
];

/// Ingestion error
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to read spreadsheet: {0}")]
    Spreadsheet(#[from] calamine::XlsxError),

    #[error("workbook has no sheets")]
    NoSheet,

    #[error("missing required columns {missing:?}; the extract must contain {required:?}")]
    MissingColumns {
        required: Vec<String>,
        missing: Vec<String>,
    },

    #[error("non-numeric value '{value}' in column '{column}' at row {row}")]
    NonNumeric {
        column: &'static str,
        row: usize,
        value: String,
    },
}

/// Source column positions after validation.
struct ColumnMap {
    filial: usize,
    cobertura: usize,
    estoque: usize,
    mercadoria: usize,
    saldo: usize,
}

/// Read and normalize the first sheet of an xlsx file.
pub fn read_xlsx(path: impl AsRef<Path>) -> Result<Vec<InventoryRow>, IngestError> {
    let mut workbook: Xlsx<_> = open_workbook(path.as_ref())?;
    let range = first_sheet(&mut workbook)?;
    rows_from_range(&range)
}

/// Read and normalize the first sheet of an in-memory xlsx buffer.
pub fn read_xlsx_bytes(bytes: &[u8]) -> Result<Vec<InventoryRow>, IngestError> {
    let mut workbook = Xlsx::new(Cursor::new(bytes))?;
    let range = first_sheet(&mut workbook)?;
    rows_from_range(&range)
}

/// Validate the schema of an xlsx file without materializing any rows.
pub fn validate_xlsx(path: impl AsRef<Path>) -> Result<(), IngestError> {
    let mut workbook: Xlsx<_> = open_workbook(path.as_ref())?;
    let range = first_sheet(&mut workbook)?;
    map_columns(&range).map(|_| ())
}

fn first_sheet<R>(workbook: &mut Xlsx<R>) -> Result<Range<Data>, IngestError>
where
    R: std::io::Read + std::io::Seek,
{
    match workbook.worksheet_range_at(0) {
        Some(range) => Ok(range?),
        None => Err(IngestError::NoSheet),
    }
}

/// Normalize a parsed cell range into inventory rows.
///
/// Row 1 is the header row. Rows whose five required cells are all empty are
/// skipped; trailing blank rows are common in real extracts.
pub fn rows_from_range(range: &Range<Data>) -> Result<Vec<InventoryRow>, IngestError> {
    let columns = map_columns(range)?;
    let mut rows = Vec::new();

    for (i, cells) in range.rows().enumerate().skip(1) {
        // 1-based spreadsheet row for error messages
        let row_number = i + 1;
        if is_blank(cells, &columns) {
            continue;
        }
        rows.push(InventoryRow {
            filial: text(cells, columns.filial),
            cobertura_dias: numeric(cells, columns.cobertura, "Cobertura Atual", row_number)?,
            valor_estoque: numeric(cells, columns.estoque, "Vlr Estoque Tmk", row_number)?,
            mercadoria: text(cells, columns.mercadoria),
            saldo_pedido: numeric(cells, columns.saldo, "Saldo Pedido", row_number)?,
        });
    }

    debug!(rows = rows.len(), "extract normalized");
    Ok(rows)
}

fn map_columns(range: &Range<Data>) -> Result<ColumnMap, IngestError> {
    let headers: Vec<String> = range
        .rows()
        .next()
        .map(|row| row.iter().map(|c| c.to_string()).collect())
        .unwrap_or_default();

    let find = |name: &str| headers.iter().position(|h| h == name);

    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|&&name| find(name).is_none())
        .map(|&name| name.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(IngestError::MissingColumns {
            required: REQUIRED_COLUMNS.iter().map(|&n| n.to_string()).collect(),
            missing,
        });
    }

    // Positions exist after the check above
    Ok(ColumnMap {
        filial: find("Filial").unwrap_or_default(),
        cobertura: find("Cobertura Atual").unwrap_or_default(),
        estoque: find("Vlr Estoque Tmk").unwrap_or_default(),
        mercadoria: find("Mercadoria").unwrap_or_default(),
        saldo: find("Saldo Pedido").unwrap_or_default(),
    })
}

fn is_blank(cells: &[Data], columns: &ColumnMap) -> bool {
    [
        columns.filial,
        columns.cobertura,
        columns.estoque,
        columns.mercadoria,
        columns.saldo,
    ]
    .iter()
    .all(|&idx| matches!(cells.get(idx), None | Some(Data::Empty)))
}

fn text(cells: &[Data], idx: usize) -> String {
    cells.get(idx).map(|c| c.to_string()).unwrap_or_default()
}

fn numeric(
    cells: &[Data],
    idx: usize,
    column: &'static str,
    row: usize,
) -> Result<f64, IngestError> {
    match cells.get(idx) {
        Some(Data::Float(f)) => Ok(*f),
        Some(Data::Int(i)) => Ok(*i as f64),
        other => Err(IngestError::NonNumeric {
            column,
            row,
            value: other.map(|c| c.to_string()).unwrap_or_default(),
        }),
    }
}
