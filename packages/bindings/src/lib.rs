use napi::Result as NapiResult;
use napi_derive::napi;
use rust_decimal::Decimal;
use serde::Deserialize;

use seller_finance_core::channel::ChannelConfig;
use seller_finance_core::imports::{AllocationBasis, ImportSimulation, ProductLine};
use seller_finance_core::tax::TaxRegimeTable;
use seller_finance_core::types::Product;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Input shapes shared with the route layer
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct ChannelEvaluationInput {
    product: Product,
    channel: ChannelConfig,
}

#[derive(Deserialize)]
struct ChannelSummaryInput {
    product: Product,
    channels: Vec<ChannelConfig>,
}

#[derive(Deserialize)]
struct TaxTierInput {
    turnover: Decimal,
    #[serde(default)]
    table: Option<TaxRegimeTable>,
}

#[derive(Deserialize)]
struct ImportInput {
    simulation: ImportSimulation,
    #[serde(default)]
    table: Option<TaxRegimeTable>,
}

#[derive(Deserialize)]
struct AllocationInput {
    total_cost: Decimal,
    #[serde(default)]
    basis: AllocationBasis,
    product_lines: Vec<ProductLine>,
}

// ---------------------------------------------------------------------------
// Channel profitability
// ---------------------------------------------------------------------------

#[napi]
pub fn evaluate_channel_profitability(input_json: String) -> NapiResult<String> {
    let input: ChannelEvaluationInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = seller_finance_core::channel::evaluate_channel(&input.product, &input.channel)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn break_even_price(input_json: String) -> NapiResult<String> {
    let input: ChannelEvaluationInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let price = seller_finance_core::channel::break_even_price(&input.product, &input.channel)
        .map_err(to_napi_error)?;
    serde_json::to_string(&serde_json::json!({
        "channel_type": input.channel.channel_type,
        "break_even_price": price,
    }))
    .map_err(to_napi_error)
}

#[napi]
pub fn summarize_channels(input_json: String) -> NapiResult<String> {
    let input: ChannelSummaryInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = seller_finance_core::channel::summarize_channels(&input.product, &input.channels)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Tax tiers
// ---------------------------------------------------------------------------

#[napi]
pub fn resolve_tax_tier(input_json: String) -> NapiResult<String> {
    let input: TaxTierInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let regime = input
        .table
        .unwrap_or_else(TaxRegimeTable::simples_nacional_comercio);
    let tier = regime.resolve(input.turnover).map_err(to_napi_error)?;
    serde_json::to_string(&tier).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Import simulation
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_import_simulation(input_json: String) -> NapiResult<String> {
    let input: ImportInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let regime = input
        .table
        .unwrap_or_else(TaxRegimeTable::simples_nacional_comercio);
    let output = seller_finance_core::imports::calculate_import(&input.simulation, &regime)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn allocate_landed_cost(input_json: String) -> NapiResult<String> {
    let input: AllocationInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let allocations =
        seller_finance_core::imports::allocate(input.total_cost, &input.product_lines, input.basis)
            .map_err(to_napi_error)?;
    serde_json::to_string(&allocations).map_err(to_napi_error)
}
