use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::channel::schedule::{fee_schedule, ChannelType, FeeKind, FeeSource, FeeTerm};
use crate::error::SellerFinanceError;
use crate::types::{round_money, with_metadata, ComputationOutput, Money, Percent, Product, Rate};
use crate::SellerFinanceResult;

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

/// Per-channel sale configuration, as persisted by the catalog layer.
/// Percentage fields are percentage points (5 = 5%).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelConfig {
    pub channel_type: ChannelType,
    pub enabled: bool,
    pub sale_price: Money,
    pub commission_percent: Percent,
    pub fixed_fee: Money,
    pub other_percent: Percent,
    pub other_value: Money,
    pub ads_percent: Percent,
    pub shipping_cost: Money,
    pub packaging_cost: Money,
    pub financial_cost_percent: Percent,
    pub marketing_cost_percent: Percent,
    /// Channel-native listing identifier. Opaque; never used in calculation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub listing_id: Option<String>,
    /// SKU as registered on the channel. Opaque; never used in calculation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel_sku: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelProfitabilityResult {
    /// Gross margin ratio: (sale_price - base_cost) / sale_price.
    /// Deliberately a different basis from net_profit; the back office
    /// shows both as distinct signals.
    pub margin: Rate,
    pub net_profit: Money,
    /// Sale price at which net profit is zero. None when the percentage
    /// fees alone consume the whole price.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub break_even_price: Option<Money>,
    pub gross_profit: Money,
    pub commission: Money,
    pub other_costs: Money,
}

/// One evaluated channel inside a portfolio summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelResultEntry {
    pub channel_type: ChannelType,
    pub result: ChannelProfitabilityResult,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelPortfolioSummary {
    pub enabled_channels: usize,
    pub evaluated: Vec<ChannelResultEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub best_channel: Option<ChannelType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub best_net_profit: Option<Money>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Evaluate one product + channel configuration.
///
/// A disabled or unpriced channel is a normal state in the data, not an
/// error: it yields a zero result with a warning. An infeasible break-even
/// likewise degrades to `None` here; callers that need the typed error use
/// [`break_even_price`].
pub fn evaluate_channel(
    product: &Product,
    config: &ChannelConfig,
) -> SellerFinanceResult<ComputationOutput<ChannelProfitabilityResult>> {
    let (result, warnings) = evaluate_config(product, config)?;

    let assumptions = serde_json::json!({
        "margin_basis": "(sale_price - base_cost) / sale_price",
        "percent_fields": "percentage points of sale price",
        "rounding": "2 dp, half-even, presented values only",
    });

    Ok(with_metadata(
        "Channel profitability (declarative fee schedule netting)",
        &assumptions,
        warnings,
        result,
    ))
}

/// Minimum sale price at which net profit for the channel is zero.
///
/// Linear in the sale price once every percentage is a fixed fraction of
/// it: fixed cost base divided by (1 - percentage load).
pub fn break_even_price(product: &Product, config: &ChannelConfig) -> SellerFinanceResult<Money> {
    let schedule = fee_schedule(&config.channel_type)?;
    validate(product, config)?;
    break_even_from_schedule(product, config, &schedule).map(round_money)
}

/// Evaluate a product across its channel configurations. Disabled channels
/// are excluded from the summary entirely.
pub fn summarize_channels(
    product: &Product,
    configs: &[ChannelConfig],
) -> SellerFinanceResult<ComputationOutput<ChannelPortfolioSummary>> {
    let mut warnings: Vec<String> = Vec::new();
    let mut evaluated: Vec<ChannelResultEntry> = Vec::new();

    for config in configs.iter().filter(|c| c.enabled) {
        let (result, channel_warnings) = evaluate_config(product, config)?;
        for w in channel_warnings {
            warnings.push(format!("{}: {}", config.channel_type, w));
        }
        evaluated.push(ChannelResultEntry {
            channel_type: config.channel_type.clone(),
            result,
        });
    }

    if evaluated.is_empty() {
        warnings.push("No enabled channels to summarize".into());
    }

    // First channel wins ties.
    let best = evaluated.iter().fold(None::<&ChannelResultEntry>, |acc, e| match acc {
        Some(current) if current.result.net_profit >= e.result.net_profit => Some(current),
        _ => Some(e),
    });

    let summary = ChannelPortfolioSummary {
        enabled_channels: evaluated.len(),
        best_channel: best.map(|e| e.channel_type.clone()),
        best_net_profit: best.map(|e| e.result.net_profit),
        evaluated,
    };

    let assumptions = serde_json::json!({
        "disabled_channels": "excluded from aggregates",
        "best_channel": "highest net profit, first wins ties",
    });

    Ok(with_metadata(
        "Channel portfolio summary",
        &assumptions,
        warnings,
        summary,
    ))
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

const HUNDRED: Decimal = dec!(100);

fn evaluate_config(
    product: &Product,
    config: &ChannelConfig,
) -> SellerFinanceResult<(ChannelProfitabilityResult, Vec<String>)> {
    let schedule = fee_schedule(&config.channel_type)?;
    let mut warnings: Vec<String> = Vec::new();

    if !config.enabled || config.sale_price <= Decimal::ZERO {
        warnings.push(format!(
            "Channel {} is disabled or has no sale price; returning zero result",
            config.channel_type
        ));
        return Ok((
            ChannelProfitabilityResult {
                margin: Decimal::ZERO,
                net_profit: Decimal::ZERO,
                break_even_price: None,
                gross_profit: Decimal::ZERO,
                commission: Decimal::ZERO,
                other_costs: Decimal::ZERO,
            },
            warnings,
        ));
    }

    validate(product, config)?;

    let mut commission = Decimal::ZERO;
    let mut other_costs = Decimal::ZERO;

    for fee_term in &schedule {
        let amount = term_amount(product, config, fee_term);
        if fee_term.source == FeeSource::CommissionPercent {
            commission += amount;
        } else {
            other_costs += amount;
        }
    }

    let gross_profit = config.sale_price - product.base_cost;
    let net_profit = gross_profit - commission - other_costs;
    let margin = gross_profit / config.sale_price;

    let break_even = match break_even_from_schedule(product, config, &schedule) {
        Ok(price) => Some(round_money(price)),
        Err(SellerFinanceError::InfeasibleChannel { fee_load }) => {
            warnings.push(format!(
                "Percentage fees total {fee_load}% of price; break-even is undefined"
            ));
            None
        }
        Err(other) => return Err(other),
    };

    Ok((
        ChannelProfitabilityResult {
            margin,
            net_profit: round_money(net_profit),
            break_even_price: break_even,
            gross_profit: round_money(gross_profit),
            commission: round_money(commission),
            other_costs: round_money(other_costs),
        },
        warnings,
    ))
}

/// Amount a single fee term contributes, at full precision.
fn term_amount(product: &Product, config: &ChannelConfig, fee_term: &FeeTerm) -> Decimal {
    let field = source_value(config, fee_term.source);
    match fee_term.kind {
        FeeKind::PercentOfPrice => config.sale_price * field / HUNDRED,
        FeeKind::PercentOfCost => product.base_cost * field / HUNDRED,
        FeeKind::Fixed | FeeKind::CostValue => field,
    }
}

fn source_value(config: &ChannelConfig, source: FeeSource) -> Decimal {
    match source {
        FeeSource::CommissionPercent => config.commission_percent,
        FeeSource::OtherPercent => config.other_percent,
        FeeSource::AdsPercent => config.ads_percent,
        FeeSource::FinancialCostPercent => config.financial_cost_percent,
        FeeSource::MarketingCostPercent => config.marketing_cost_percent,
        FeeSource::FixedFee => config.fixed_fee,
        FeeSource::OtherValue => config.other_value,
        FeeSource::ShippingCost => config.shipping_cost,
        FeeSource::PackagingCost => config.packaging_cost,
    }
}

/// Solve net profit == 0 for the sale price. The price-independent terms
/// form the numerator; the percentage-of-price load forms the denominator.
fn break_even_from_schedule(
    product: &Product,
    config: &ChannelConfig,
    schedule: &[FeeTerm],
) -> SellerFinanceResult<Money> {
    let mut fixed_base = product.base_cost;
    let mut percent_load = Decimal::ZERO;

    for fee_term in schedule {
        let field = source_value(config, fee_term.source);
        match fee_term.kind {
            FeeKind::PercentOfPrice => percent_load += field,
            FeeKind::PercentOfCost => fixed_base += product.base_cost * field / HUNDRED,
            FeeKind::Fixed | FeeKind::CostValue => fixed_base += field,
        }
    }

    let denominator = Decimal::ONE - percent_load / HUNDRED;
    if denominator <= Decimal::ZERO {
        return Err(SellerFinanceError::InfeasibleChannel {
            fee_load: percent_load,
        });
    }

    Ok(fixed_base / denominator)
}

fn validate(product: &Product, config: &ChannelConfig) -> SellerFinanceResult<()> {
    if product.base_cost < Decimal::ZERO {
        return Err(SellerFinanceError::InvalidInput {
            field: "base_cost".into(),
            reason: "Base cost cannot be negative".into(),
        });
    }

    let amounts = [
        ("commission_percent", config.commission_percent),
        ("fixed_fee", config.fixed_fee),
        ("other_percent", config.other_percent),
        ("other_value", config.other_value),
        ("ads_percent", config.ads_percent),
        ("shipping_cost", config.shipping_cost),
        ("packaging_cost", config.packaging_cost),
        ("financial_cost_percent", config.financial_cost_percent),
        ("marketing_cost_percent", config.marketing_cost_percent),
    ];
    for (field, value) in amounts {
        if value < Decimal::ZERO {
            return Err(SellerFinanceError::InvalidInput {
                field: field.into(),
                reason: "Fee fields cannot be negative".into(),
            });
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
