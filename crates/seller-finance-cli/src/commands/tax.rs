use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use seller_finance_core::tax::TaxRegimeTable;

use crate::input;

/// Arguments for tax-tier resolution
#[derive(Args)]
pub struct TaxTierArgs {
    /// Annual turnover to resolve, e.g. 840000.00
    #[arg(long)]
    pub turnover: Decimal,

    /// Optional custom tax regime table (JSON/YAML); defaults to the
    /// built-in Simples Nacional trade annex
    #[arg(long)]
    pub table: Option<String>,
}

pub fn run_tax_tier(args: TaxTierArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let regime: TaxRegimeTable = match args.table {
        Some(ref path) => input::file::read_input(path)?,
        None => TaxRegimeTable::simples_nacional_comercio(),
    };

    let tier = regime.resolve(args.turnover)?;
    Ok(serde_json::json!({
        "regime": regime.name,
        "turnover": args.turnover,
        "tier": tier,
    }))
}
