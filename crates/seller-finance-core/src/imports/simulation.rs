use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::SellerFinanceError;
use crate::fx;
use crate::imports::allocation::{allocate, AllocationBasis, ProductLine};
use crate::tax::{TaxRegimeTable, TaxTierResolution};
use crate::types::{round_money, with_metadata, ComputationOutput, Currency, Money, Rate};
use crate::SellerFinanceResult;

const HUNDRED: Decimal = dec!(100);

// ---------------------------------------------------------------------------
// Input types
// ---------------------------------------------------------------------------

/// What a declared import tax is charged against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaxBasis {
    /// Percentage of CFR in local currency.
    CfrPercent,
    /// Percentage of FOB in local currency.
    FobPercent,
    /// Flat amount already in local currency.
    FixedAmount,
}

/// A named tax line declared on the simulation (II, IPI, ICMS, and so on).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportTax {
    pub name: String,
    pub basis: TaxBasis,
    /// Percentage points for the percent bases, a local-currency amount
    /// for `FixedAmount`.
    pub value: Decimal,
}

/// A named local-currency expense outside the tax schedule (broker,
/// storage, local haulage).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdditionalExpense {
    pub name: String,
    pub amount: Money,
}

/// Full configuration of one landed-cost simulation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSimulation {
    #[serde(default)]
    pub foreign_currency: Currency,
    /// Local currency per unit of foreign currency.
    pub fx_rate: Decimal,
    pub freight_foreign: Money,
    /// The seller's declared annual turnover; context for the tax tier,
    /// not derived from the shipment.
    pub declared_turnover: Money,
    #[serde(default)]
    pub taxes: Vec<ImportTax>,
    #[serde(default)]
    pub additional_expenses: Vec<AdditionalExpense>,
    pub product_lines: Vec<ProductLine>,
    #[serde(default)]
    pub allocation_basis: AllocationBasis,
}

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// Landed cost attributed to one product line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineCost {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub quantity: u32,
    pub allocated_cost: Money,
    /// allocated_cost / quantity, rounded for presentation. Derived; the
    /// additivity invariant binds `allocated_cost`, not this field.
    pub unit_cost: Money,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportCalculationResult {
    pub fob_foreign: Money,
    pub fob_local: Money,
    pub freight_foreign: Money,
    pub freight_local: Money,
    pub cfr_foreign: Money,
    pub cfr_local: Money,
    pub total_taxes: Money,
    pub total_expenses: Money,
    pub total_landed_cost: Money,
    /// total_landed_cost / fob_local. None when the shipment has no
    /// declared value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost_multiplier: Option<Rate>,
    pub tax_tier: TaxTierResolution,
    pub lines: Vec<LineCost>,
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Run a full landed-cost simulation: convert, tier, tax, total, allocate.
///
/// Monetary values are rounded to 2 decimals at the currency-conversion
/// boundary, so every downstream identity holds exactly in the presented
/// figures: CFR = FOB + freight, landed = CFR + taxes + expenses, and the
/// per-line allocations sum to the landed total.
pub fn calculate_import(
    simulation: &ImportSimulation,
    regime: &TaxRegimeTable,
) -> SellerFinanceResult<ComputationOutput<ImportCalculationResult>> {
    let mut warnings: Vec<String> = Vec::new();

    if simulation.product_lines.is_empty() {
        return Err(SellerFinanceError::EmptyShipment(
            "simulation has no product lines".into(),
        ));
    }
    validate(simulation)?;

    // 1. FOB and freight into local currency.
    let fob_foreign_full: Decimal = simulation
        .product_lines
        .iter()
        .map(|line| line.line_value())
        .sum();
    let fob_local = round_money(fx::convert(fob_foreign_full, simulation.fx_rate)?);
    let freight_local = round_money(fx::convert(
        simulation.freight_foreign,
        simulation.fx_rate,
    )?);

    let fob_foreign = round_money(fob_foreign_full);
    let freight_foreign = round_money(simulation.freight_foreign);

    // 2. CFR in both currencies.
    let cfr_foreign = fob_foreign + freight_foreign;
    let cfr_local = fob_local + freight_local;

    if simulation.freight_foreign.is_zero() {
        warnings.push("Freight is zero; CFR equals FOB".into());
    }

    // 3. Tax tier for the declared turnover.
    let tax_tier = regime.resolve(simulation.declared_turnover)?;

    // 4. Declared taxes and additional expenses.
    let taxes_full: Decimal = simulation
        .taxes
        .iter()
        .map(|tax| match tax.basis {
            TaxBasis::CfrPercent => cfr_local * tax.value / HUNDRED,
            TaxBasis::FobPercent => fob_local * tax.value / HUNDRED,
            TaxBasis::FixedAmount => tax.value,
        })
        .sum();
    let total_taxes = round_money(taxes_full);
    if simulation.taxes.is_empty() {
        warnings.push("No import taxes declared".into());
    }

    let expenses_full: Decimal = simulation
        .additional_expenses
        .iter()
        .map(|expense| expense.amount)
        .sum();
    let total_expenses = round_money(expenses_full);

    // 5. Landed total.
    let total_landed_cost = cfr_local + total_taxes + total_expenses;

    // 6. Allocate back to lines and derive unit costs.
    let allocations = allocate(
        total_landed_cost,
        &simulation.product_lines,
        simulation.allocation_basis,
    )?;
    let lines: Vec<LineCost> = simulation
        .product_lines
        .iter()
        .zip(allocations)
        .map(|(line, allocated_cost)| LineCost {
            description: line.description.clone(),
            quantity: line.quantity,
            allocated_cost,
            unit_cost: round_money(allocated_cost / Decimal::from(line.quantity)),
        })
        .collect();

    let cost_multiplier = if fob_local.is_zero() {
        None
    } else {
        Some(total_landed_cost / fob_local)
    };

    let result = ImportCalculationResult {
        fob_foreign,
        fob_local,
        freight_foreign,
        freight_local,
        cfr_foreign,
        cfr_local,
        total_taxes,
        total_expenses,
        total_landed_cost,
        cost_multiplier,
        tax_tier,
        lines,
    };

    let assumptions = serde_json::json!({
        "allocation_basis": simulation.allocation_basis,
        "tax_regime": regime.name,
        "rounding_boundary": "currency conversion, 2 dp half-even",
        "residual": "last line in input order absorbs it",
    });

    Ok(with_metadata(
        "Import landed-cost simulation (FOB -> CFR -> landed, proportional allocation)",
        &assumptions,
        warnings,
        result,
    ))
}

fn validate(simulation: &ImportSimulation) -> SellerFinanceResult<()> {
    if simulation.freight_foreign < Decimal::ZERO {
        return Err(SellerFinanceError::InvalidInput {
            field: "freight_foreign".into(),
            reason: "Freight cannot be negative".into(),
        });
    }
    for (i, tax) in simulation.taxes.iter().enumerate() {
        if tax.value < Decimal::ZERO {
            return Err(SellerFinanceError::InvalidInput {
                field: format!("taxes[{i}].value"),
                reason: "Tax values cannot be negative".into(),
            });
        }
    }
    for (i, expense) in simulation.additional_expenses.iter().enumerate() {
        if expense.amount < Decimal::ZERO {
            return Err(SellerFinanceError::InvalidInput {
                field: format!("additional_expenses[{i}].amount"),
                reason: "Expense amounts cannot be negative".into(),
            });
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
