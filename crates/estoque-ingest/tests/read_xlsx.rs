//! File-level ingestion tests: real xlsx files written to disk and read back.

use estoque_ingest::{read_xlsx, read_xlsx_bytes, validate_xlsx, IngestError};
use pretty_assertions::assert_eq;
use rust_xlsxwriter::Workbook;

fn extract_workbook() -> Workbook {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    let headers = [
        "Filial",
        "Cobertura Atual",
        "Vlr Estoque Tmk",
        "Mercadoria",
        "Saldo Pedido",
    ];
    for (col, header) in headers.iter().enumerate() {
        sheet.write(0, col as u16, *header).unwrap();
    }
    sheet.write(1, 0, "SP-01").unwrap();
    sheet.write(1, 1, 12.5).unwrap();
    sheet.write(1, 2, 1000.0).unwrap();
    sheet.write(1, 3, "Parafuso M8").unwrap();
    sheet.write(1, 4, 80.0).unwrap();
    workbook
}

#[test]
fn reads_rows_from_a_file_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("analise.xlsx");
    extract_workbook().save(&path).unwrap();

    let rows = read_xlsx(&path).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].filial, "SP-01");
    assert_eq!(rows[0].cobertura_dias, 12.5);
    assert_eq!(rows[0].valor_estoque, 1000.0);
    assert_eq!(rows[0].mercadoria, "Parafuso M8");
    assert_eq!(rows[0].saldo_pedido, 80.0);
}

#[test]
fn bytes_and_file_ingestion_agree() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("analise.xlsx");
    let mut workbook = extract_workbook();
    workbook.save(&path).unwrap();
    let bytes = workbook.save_to_buffer().unwrap();

    assert_eq!(read_xlsx(&path).unwrap(), read_xlsx_bytes(&bytes).unwrap());
}

#[test]
fn validate_accepts_a_well_formed_extract() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("analise.xlsx");
    extract_workbook().save(&path).unwrap();
    assert!(validate_xlsx(&path).is_ok());
}

#[test]
fn validate_rejects_a_missing_column() {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    for (col, header) in ["Filial", "Cobertura Atual", "Mercadoria"].iter().enumerate() {
        sheet.write(0, col as u16, *header).unwrap();
    }
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("incompleto.xlsx");
    workbook.save(&path).unwrap();

    let err = validate_xlsx(&path).unwrap_err();
    match err {
        IngestError::MissingColumns { missing, .. } => {
            assert_eq!(
                missing,
                vec!["Vlr Estoque Tmk".to_string(), "Saldo Pedido".to_string()]
            );
        }
        other => panic!("expected MissingColumns, got {other}"),
    }
}

#[test]
fn first_sheet_is_used_when_several_exist() {
    let mut workbook = extract_workbook();
    let second = workbook.add_worksheet();
    second.write(0, 0, "outra aba").unwrap();
    let bytes = workbook.save_to_buffer().unwrap();

    let rows = read_xlsx_bytes(&bytes).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].filial, "SP-01");
}
