//! Excel report renderer
//!
//! Generates the two-sheet workbook:
//! - Cobertura Média: one row per branch with weighted coverage days and
//!   total order balance, no row index
//! - Distribuição por Faixa: order balance per branch and coverage band,
//!   branch as the leading label column, TOTAL as the last column
//!
//! Band columns are emitted in the fixed band order; a band with no source
//! row anywhere in the data is omitted.

use estoque_core::{BandReport, CoverageReport, RenderError};
use rust_xlsxwriter::{Format, FormatAlign, FormatBorder, Workbook};
use tracing::debug;

use crate::{SHEET_COBERTURA, SHEET_FAIXAS};

/// Excel report renderer
#[derive(Clone, Debug)]
pub struct ExcelRenderer {
    /// Currency prefix for balance cells
    pub currency: String,
}

impl Default for ExcelRenderer {
    fn default() -> Self {
        Self {
            currency: "R$".into(),
        }
    }
}

struct ExcelFormats {
    header: Format,
    text: Format,
    number: Format,
    currency: Format,
}

impl ExcelRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set currency prefix
    pub fn currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    /// Generate workbook bytes.
    ///
    /// The buffer is built atomically in memory; on error nothing is
    /// produced, on success the bytes are a complete workbook.
    pub fn render_to_bytes(
        &self,
        cobertura: &CoverageReport,
        faixas: &BandReport,
    ) -> Result<Vec<u8>, RenderError> {
        let mut workbook = Workbook::new();
        let formats = self.create_formats();

        self.add_coverage_sheet(&mut workbook, cobertura, &formats)?;
        self.add_band_sheet(&mut workbook, faixas, &formats)?;

        let buffer = workbook
            .save_to_buffer()
            .map_err(|e| RenderError::Format(format!("Failed to create Excel: {e}")))?;
        debug!(bytes = buffer.len(), "workbook rendered");
        Ok(buffer)
    }

    /// Create reusable formats
    fn create_formats(&self) -> ExcelFormats {
        let header = Format::new()
            .set_bold()
            .set_align(FormatAlign::Center)
            .set_background_color(0x4472C4)
            .set_font_color(0xFFFFFF)
            .set_border(FormatBorder::Thin);

        let text = Format::new().set_border(FormatBorder::Thin);

        let number = Format::new()
            .set_num_format("#,##0.00")
            .set_border(FormatBorder::Thin);

        let currency = Format::new()
            .set_num_format(&format!("\"{}\" #,##0.00", self.currency))
            .set_border(FormatBorder::Thin);

        ExcelFormats {
            header,
            text,
            number,
            currency,
        }
    }

    /// Add the Cobertura Média sheet
    fn add_coverage_sheet(
        &self,
        workbook: &mut Workbook,
        cobertura: &CoverageReport,
        formats: &ExcelFormats,
    ) -> Result<(), RenderError> {
        let sheet = workbook.add_worksheet();
        sheet
            .set_name(SHEET_COBERTURA)
            .map_err(|e| RenderError::Format(e.to_string()))?;

        let headers = ["Filial", "Dias de Cobertura", "Saldo Pedido Total"];
        for (col, header) in headers.iter().enumerate() {
            sheet
                .write_with_format(0, col as u16, *header, &formats.header)
                .map_err(|e| RenderError::Format(e.to_string()))?;
        }

        sheet.set_column_width(0, 15).ok();
        sheet.set_column_width(1, 18).ok();
        sheet.set_column_width(2, 18).ok();

        for (i, row) in cobertura.rows.iter().enumerate() {
            let r = (i + 1) as u32;
            sheet
                .write_with_format(r, 0, &row.filial, &formats.text)
                .map_err(|e| RenderError::Format(e.to_string()))?;
            sheet
                .write_with_format(r, 1, row.dias_cobertura, &formats.number)
                .map_err(|e| RenderError::Format(e.to_string()))?;
            sheet
                .write_with_format(r, 2, row.saldo_pedido_total, &formats.currency)
                .map_err(|e| RenderError::Format(e.to_string()))?;
        }

        sheet.set_freeze_panes(1, 0).ok();
        Ok(())
    }

    /// Add the Distribuição por Faixa sheet
    fn add_band_sheet(
        &self,
        workbook: &mut Workbook,
        faixas: &BandReport,
        formats: &ExcelFormats,
    ) -> Result<(), RenderError> {
        let sheet = workbook.add_worksheet();
        sheet
            .set_name(SHEET_FAIXAS)
            .map_err(|e| RenderError::Format(e.to_string()))?;

        let bands = faixas.bands_present();

        // Leading label column keeps the source grouping key name
        sheet
            .write_with_format(0, 0, "filial", &formats.header)
            .map_err(|e| RenderError::Format(e.to_string()))?;
        for (i, band) in bands.iter().enumerate() {
            sheet
                .write_with_format(0, (i + 1) as u16, band.label(), &formats.header)
                .map_err(|e| RenderError::Format(e.to_string()))?;
        }
        let total_col = (bands.len() + 1) as u16;
        sheet
            .write_with_format(0, total_col, "TOTAL", &formats.header)
            .map_err(|e| RenderError::Format(e.to_string()))?;

        sheet.set_column_width(0, 15).ok();
        for col in 1..=total_col {
            sheet.set_column_width(col, 16).ok();
        }

        for (i, row) in faixas.rows.iter().enumerate() {
            let r = (i + 1) as u32;
            sheet
                .write_with_format(r, 0, &row.filial, &formats.text)
                .map_err(|e| RenderError::Format(e.to_string()))?;
            for (j, band) in bands.iter().enumerate() {
                sheet
                    .write_with_format(r, (j + 1) as u16, row.get(*band), &formats.currency)
                    .map_err(|e| RenderError::Format(e.to_string()))?;
            }
            sheet
                .write_with_format(r, total_col, row.total, &formats.currency)
                .map_err(|e| RenderError::Format(e.to_string()))?;
        }

        sheet.set_freeze_panes(1, 0).ok();
        Ok(())
    }
}
