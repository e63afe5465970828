use clap::Args;
use serde::Deserialize;
use serde_json::Value;

use seller_finance_core::channel::{
    break_even_price, evaluate_channel, summarize_channels, ChannelConfig,
};
use seller_finance_core::types::Product;

use crate::input;

/// A product plus one channel configuration, as exported by the catalog.
#[derive(Deserialize)]
struct ChannelEvaluationFile {
    product: Product,
    channel: ChannelConfig,
}

/// A product plus every channel configuration it sells through.
#[derive(Deserialize)]
struct ChannelSummaryFile {
    product: Product,
    channels: Vec<ChannelConfig>,
}

/// Arguments for single-channel profitability
#[derive(Args)]
pub struct ChannelProfitArgs {
    /// Path to JSON/YAML input file with {product, channel}
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for break-even pricing
#[derive(Args)]
pub struct BreakEvenArgs {
    /// Path to JSON/YAML input file with {product, channel}
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for the multi-channel summary
#[derive(Args)]
pub struct ChannelSummaryArgs {
    /// Path to JSON/YAML input file with {product, channels}
    #[arg(long)]
    pub input: Option<String>,
}

fn read_evaluation(input: &Option<String>) -> Result<ChannelEvaluationFile, Box<dyn std::error::Error>> {
    if let Some(path) = input {
        input::file::read_input(path)
    } else if let Some(data) = input::stdin::read_stdin()? {
        Ok(serde_json::from_value(data)?)
    } else {
        Err("--input <file> or stdin required with {product, channel}".into())
    }
}

pub fn run_channel_profit(args: ChannelProfitArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let file = read_evaluation(&args.input)?;
    let result = evaluate_channel(&file.product, &file.channel)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_break_even(args: BreakEvenArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let file = read_evaluation(&args.input)?;
    let price = break_even_price(&file.product, &file.channel)?;
    Ok(serde_json::json!({
        "channel_type": file.channel.channel_type,
        "break_even_price": price,
    }))
}

pub fn run_channel_summary(args: ChannelSummaryArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let file: ChannelSummaryFile = if let Some(ref path) = args.input {
        input::file::read_input(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        return Err("--input <file> or stdin required with {product, channels}".into());
    };
    let result = summarize_channels(&file.product, &file.channels)?;
    Ok(serde_json::to_value(result)?)
}
