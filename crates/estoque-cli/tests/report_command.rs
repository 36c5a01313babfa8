//! CLI integration tests
//!
//! Spawn the built binary against real xlsx fixtures and verify exit codes
//! and produced artifacts. Exit code contract: 0 on success, nonzero on any
//! ingestion or aggregation failure.

use std::path::Path;
use std::process::Command;

use rust_xlsxwriter::Workbook;

fn estoque_binary() -> &'static str {
    env!("CARGO_BIN_EXE_estoque")
}

fn write_extract(path: &Path, rows: &[(&str, f64, f64, &str, f64)]) {
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
    for (i, (filial, cobertura, estoque, mercadoria, saldo)) in rows.iter().enumerate() {
        let r = (i + 1) as u32;
        sheet.write(r, 0, *filial).unwrap();
        sheet.write(r, 1, *cobertura).unwrap();
        sheet.write(r, 2, *estoque).unwrap();
        sheet.write(r, 3, *mercadoria).unwrap();
        sheet.write(r, 4, *saldo).unwrap();
    }
    workbook.save(path).unwrap();
}

#[test]
fn report_writes_the_workbook_and_exits_0() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("analise.xlsx");
    let output = dir.path().join("relatorio.xlsx");
    write_extract(
        &input,
        &[
            ("A", 10.0, 100.0, "SKU-1", 50.0),
            ("A", 20.0, 300.0, "SKU-2", 70.0),
        ],
    );

    let status = Command::new(estoque_binary())
        .arg("report")
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .status()
        .expect("failed to execute estoque");

    assert_eq!(status.code(), Some(0));
    let bytes = std::fs::read(&output).unwrap();
    assert!(bytes.len() > 100);
    assert_eq!(&bytes[0..2], b"PK");
}

#[test]
fn check_accepts_a_valid_extract() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("analise.xlsx");
    write_extract(&input, &[("A", 10.0, 100.0, "SKU-1", 50.0)]);

    let status = Command::new(estoque_binary())
        .arg("check")
        .arg(&input)
        .status()
        .expect("failed to execute estoque");
    assert_eq!(status.code(), Some(0));
}

#[test]
fn check_rejects_an_extract_with_missing_columns() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("incompleto.xlsx");

    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    for (col, header) in ["Filial", "Mercadoria"].iter().enumerate() {
        sheet.write(0, col as u16, *header).unwrap();
    }
    workbook.save(&input).unwrap();

    let status = Command::new(estoque_binary())
        .arg("check")
        .arg(&input)
        .status()
        .expect("failed to execute estoque");
    assert_ne!(status.code(), Some(0));
}

#[test]
fn report_fails_whole_on_non_numeric_cells() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("ruim.xlsx");
    let output = dir.path().join("relatorio.xlsx");

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
    sheet.write(1, 0, "A").unwrap();
    sheet.write(1, 1, "quinze dias").unwrap();
    sheet.write(1, 2, 100.0).unwrap();
    sheet.write(1, 3, "SKU").unwrap();
    sheet.write(1, 4, 50.0).unwrap();
    workbook.save(&input).unwrap();

    let status = Command::new(estoque_binary())
        .arg("report")
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .status()
        .expect("failed to execute estoque");

    assert_ne!(status.code(), Some(0));
    // Terminal failure: no partial artifact
    assert!(!output.exists());
}
