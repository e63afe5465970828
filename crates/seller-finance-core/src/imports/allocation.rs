use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::SellerFinanceError;
use crate::types::{truncate_money, Money};
use crate::SellerFinanceResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// How shipment-level costs are spread across product lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AllocationBasis {
    /// Proportional to declared line value (unit price x quantity).
    #[default]
    ByValue,
    /// Proportional to total line weight.
    ByWeight,
    /// Proportional to unit count.
    ByQuantity,
}

/// One SKU line inside a shipment. Owned by a single simulation; never
/// shared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductLine {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub unit_price_foreign: Money,
    pub quantity: u32,
    pub weight_kg: Decimal,
}

impl ProductLine {
    /// Declared value of the whole line, in foreign currency.
    pub fn line_value(&self) -> Money {
        self.unit_price_foreign * Decimal::from(self.quantity)
    }
}

// ---------------------------------------------------------------------------
// Allocation
// ---------------------------------------------------------------------------

/// Distribute a shipment-level cost across product lines proportionally to
/// the chosen basis.
///
/// Every line except the last (in input order) is truncated to 2 decimals;
/// the last line absorbs the residual, so the returned amounts sum to
/// `total_cost` exactly, not approximately. Input order is therefore part
/// of the contract.
pub fn allocate(
    total_cost: Money,
    lines: &[ProductLine],
    basis: AllocationBasis,
) -> SellerFinanceResult<Vec<Money>> {
    if lines.is_empty() {
        return Err(SellerFinanceError::EmptyShipment(
            "shipment has no product lines".into(),
        ));
    }
    if total_cost < Decimal::ZERO {
        return Err(SellerFinanceError::InvalidInput {
            field: "total_cost".into(),
            reason: "Cost to allocate cannot be negative".into(),
        });
    }
    validate_lines(lines)?;

    let weights: Vec<Decimal> = lines.iter().map(|line| basis_weight(line, basis)).collect();
    let weight_sum: Decimal = weights.iter().sum();
    if weight_sum.is_zero() {
        return Err(SellerFinanceError::EmptyShipment(format!(
            "allocation weights sum to zero for basis {basis:?}"
        )));
    }

    let mut allocations = Vec::with_capacity(lines.len());
    let mut allocated_so_far = Decimal::ZERO;

    for weight in weights.iter().take(weights.len() - 1) {
        let share = truncate_money(total_cost * weight / weight_sum);
        allocated_so_far += share;
        allocations.push(share);
    }
    // Last line absorbs the rounding residual.
    allocations.push(total_cost - allocated_so_far);

    Ok(allocations)
}

fn basis_weight(line: &ProductLine, basis: AllocationBasis) -> Decimal {
    let quantity = Decimal::from(line.quantity);
    match basis {
        AllocationBasis::ByValue => line.unit_price_foreign * quantity,
        AllocationBasis::ByWeight => line.weight_kg * quantity,
        AllocationBasis::ByQuantity => quantity,
    }
}

fn validate_lines(lines: &[ProductLine]) -> SellerFinanceResult<()> {
    for (i, line) in lines.iter().enumerate() {
        if line.quantity < 1 {
            return Err(SellerFinanceError::InvalidInput {
                field: format!("product_lines[{i}].quantity"),
                reason: "Quantity must be at least 1".into(),
            });
        }
        if line.unit_price_foreign < Decimal::ZERO {
            return Err(SellerFinanceError::InvalidInput {
                field: format!("product_lines[{i}].unit_price_foreign"),
                reason: "Unit price cannot be negative".into(),
            });
        }
        if line.weight_kg < Decimal::ZERO {
            return Err(SellerFinanceError::InvalidInput {
                field: format!("product_lines[{i}].weight_kg"),
                reason: "Weight cannot be negative".into(),
            });
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
