use clap::Args;
use serde::Deserialize;
use serde_json::Value;

use rust_decimal::Decimal;
use seller_finance_core::imports::{allocate, calculate_import, AllocationBasis, ImportSimulation, ProductLine};
use seller_finance_core::tax::TaxRegimeTable;

use crate::input;

/// Standalone allocator input.
#[derive(Deserialize)]
struct AllocationFile {
    total_cost: Decimal,
    #[serde(default)]
    basis: AllocationBasis,
    product_lines: Vec<ProductLine>,
}

/// Arguments for the import simulation
#[derive(Args)]
pub struct ImportSimArgs {
    /// Path to JSON/YAML input file with the simulation
    #[arg(long)]
    pub input: Option<String>,

    /// Optional custom tax regime table (JSON/YAML); defaults to the
    /// built-in Simples Nacional trade annex
    #[arg(long)]
    pub table: Option<String>,
}

/// Arguments for the standalone allocator
#[derive(Args)]
pub struct AllocateArgs {
    /// Path to JSON/YAML input file with {total_cost, basis, product_lines}
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_import_sim(args: ImportSimArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let simulation: ImportSimulation = if let Some(ref path) = args.input {
        input::file::read_input(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        return Err("--input <file> or stdin required for the import simulation".into());
    };

    let regime: TaxRegimeTable = match args.table {
        Some(ref path) => input::file::read_input(path)?,
        None => TaxRegimeTable::simples_nacional_comercio(),
    };

    let result = calculate_import(&simulation, &regime)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_allocate(args: AllocateArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let file: AllocationFile = if let Some(ref path) = args.input {
        input::file::read_input(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        return Err("--input <file> or stdin required for allocation".into());
    };

    let allocations = allocate(file.total_cost, &file.product_lines, file.basis)?;
    Ok(serde_json::json!({
        "total_cost": file.total_cost,
        "basis": file.basis,
        "allocations": allocations,
    }))
}
