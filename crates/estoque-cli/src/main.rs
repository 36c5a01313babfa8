//! estoque CLI - Inventory Coverage Reporting
//!
//! Command-line interface for validating inventory extracts and generating
//! the coverage/band-distribution workbook.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use estoque_core::CoverageBand;
use estoque_render::SUGGESTED_FILENAME;

#[derive(Parser)]
#[command(name = "estoque")]
#[command(author, version, about = "Inventory coverage reporting", long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the schema of an extract without generating reports
    Check {
        /// Input file path (xlsx, first sheet)
        #[arg(value_name = "FILE")]
        file: std::path::PathBuf,
    },

    /// Generate the coverage and band-distribution workbook
    Report {
        /// Input file path (xlsx, first sheet)
        #[arg(value_name = "FILE")]
        file: std::path::PathBuf,

        /// Output workbook path
        #[arg(short, long, default_value = SUGGESTED_FILENAME)]
        output: std::path::PathBuf,

        /// Print the coverage table to stdout as well
        #[arg(long)]
        print: bool,
    },
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Check { file } => {
            estoque_ingest::validate_xlsx(&file)
                .with_context(|| format!("invalid extract: {}", file.display()))?;
            println!("OK: {} has all required columns", file.display());
        }
        Commands::Report {
            file,
            output,
            print,
        } => {
            let rows = estoque_ingest::read_xlsx(&file)
                .with_context(|| format!("failed to read {}", file.display()))?;
            info!(rows = rows.len(), input = %file.display(), "extract loaded");

            let bundle = estoque_pipeline::process(&rows)?;
            std::fs::write(&output, &bundle.workbook)
                .with_context(|| format!("failed to write {}", output.display()))?;
            println!(
                "Wrote {} ({} filiais, {} bytes)",
                output.display(),
                bundle.cobertura.rows.len(),
                bundle.workbook.len()
            );

            if print {
                print_coverage(&bundle);
            }
        }
    }

    Ok(())
}

fn print_coverage(bundle: &estoque_pipeline::ReportBundle) {
    println!("\n{:<12} {:>18} {:>20}", "Filial", "Dias de Cobertura", "Saldo Pedido Total");
    for row in &bundle.cobertura.rows {
        println!(
            "{:<12} {:>18.2} {:>20.2}",
            row.filial, row.dias_cobertura, row.saldo_pedido_total
        );
    }

    let bands = bundle.faixas.bands_present();
    if bands.is_empty() {
        return;
    }
    let labels: Vec<&str> = bands.iter().map(CoverageBand::label).collect();
    println!("\nDistribuição por faixa ({})", labels.join(", "));
    for row in &bundle.faixas.rows {
        let cells: Vec<String> = bands.iter().map(|b| format!("{:.2}", row.get(*b))).collect();
        println!("{:<12} {}  TOTAL {:.2}", row.filial, cells.join("  "), row.total);
    }
}
