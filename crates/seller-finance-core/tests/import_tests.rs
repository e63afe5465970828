use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use seller_finance_core::imports::{
    allocate, calculate_import, AdditionalExpense, AllocationBasis, ImportSimulation, ImportTax,
    ProductLine, TaxBasis,
};
use seller_finance_core::tax::TaxRegimeTable;
use seller_finance_core::types::Currency;
use seller_finance_core::SellerFinanceError;

// ===========================================================================
// Import simulation tests
// ===========================================================================

fn line(description: &str, price: Decimal, quantity: u32, weight: Decimal) -> ProductLine {
    ProductLine {
        description: Some(description.into()),
        unit_price_foreign: price,
        quantity,
        weight_kg: weight,
    }
}

fn electronics_shipment() -> ImportSimulation {
    ImportSimulation {
        foreign_currency: Currency::USD,
        fx_rate: dec!(5.3270),
        freight_foreign: dec!(480.00),
        declared_turnover: dec!(840_000),
        taxes: vec![
            ImportTax {
                name: "II".into(),
                basis: TaxBasis::CfrPercent,
                value: dec!(16),
            },
            ImportTax {
                name: "ICMS".into(),
                basis: TaxBasis::CfrPercent,
                value: dec!(18),
            },
            ImportTax {
                name: "siscomex".into(),
                basis: TaxBasis::FixedAmount,
                value: dec!(154.23),
            },
        ],
        additional_expenses: vec![
            AdditionalExpense {
                name: "customs broker".into(),
                amount: dec!(800.00),
            },
            AdditionalExpense {
                name: "port storage".into(),
                amount: dec!(412.77),
            },
        ],
        product_lines: vec![
            line("bt earbuds", dec!(7.80), 500, dec!(0.05)),
            line("smart plug", dec!(4.15), 300, dec!(0.09)),
            line("gan charger", dec!(11.20), 120, dec!(0.14)),
        ],
        allocation_basis: AllocationBasis::ByValue,
    }
}

#[test]
fn landed_cost_identities_hold_for_a_real_shipment() {
    let regime = TaxRegimeTable::simples_nacional_comercio();
    let r = calculate_import(&electronics_shipment(), &regime)
        .unwrap()
        .result;

    // Presented identities are exact, not approximate.
    assert_eq!(r.cfr_foreign, r.fob_foreign + r.freight_foreign);
    assert_eq!(r.cfr_local, r.fob_local + r.freight_local);
    assert_eq!(
        r.total_landed_cost,
        r.cfr_local + r.total_taxes + r.total_expenses
    );

    let allocated: Decimal = r.lines.iter().map(|l| l.allocated_cost).sum();
    assert_eq!(allocated, r.total_landed_cost);

    // Landed cost strictly exceeds CFR once taxes and expenses land.
    assert!(r.total_landed_cost > r.cfr_local);
    assert!(r.cost_multiplier.unwrap() > Decimal::ONE);
}

#[test]
fn additivity_survives_every_allocation_basis() {
    let regime = TaxRegimeTable::simples_nacional_comercio();

    for basis in [
        AllocationBasis::ByValue,
        AllocationBasis::ByWeight,
        AllocationBasis::ByQuantity,
    ] {
        let mut simulation = electronics_shipment();
        simulation.allocation_basis = basis;

        let r = calculate_import(&simulation, &regime).unwrap().result;
        let allocated: Decimal = r.lines.iter().map(|l| l.allocated_cost).sum();
        assert_eq!(allocated, r.total_landed_cost, "basis {basis:?}");
    }
}

#[test]
fn engine_and_standalone_allocator_agree() {
    let regime = TaxRegimeTable::simples_nacional_comercio();
    let simulation = electronics_shipment();
    let r = calculate_import(&simulation, &regime).unwrap().result;

    let standalone = allocate(
        r.total_landed_cost,
        &simulation.product_lines,
        AllocationBasis::ByValue,
    )
    .unwrap();
    let from_engine: Vec<Decimal> = r.lines.iter().map(|l| l.allocated_cost).collect();
    assert_eq!(standalone, from_engine);
}

#[test]
fn tier_resolution_rides_along_with_the_result() {
    let regime = TaxRegimeTable::simples_nacional_comercio();
    let r = calculate_import(&electronics_shipment(), &regime)
        .unwrap()
        .result;

    // 840_000 sits in the 720k..1.8M bracket.
    assert_eq!(r.tax_tier.bracket_index, 3);
    assert_eq!(r.tax_tier.base_rate, dec!(0.107));
    assert_eq!(r.tax_tier.st_reduction, dec!(0.335));
}

#[test]
fn first_failure_aborts_with_no_partial_result() {
    let regime = TaxRegimeTable::simples_nacional_comercio();

    let mut bad_turnover = electronics_shipment();
    bad_turnover.declared_turnover = dec!(9_999_999);
    assert!(matches!(
        calculate_import(&bad_turnover, &regime),
        Err(SellerFinanceError::OutOfRange { .. })
    ));

    let mut bad_rate = electronics_shipment();
    bad_rate.fx_rate = dec!(-5);
    assert!(matches!(
        calculate_import(&bad_rate, &regime),
        Err(SellerFinanceError::InvalidInput { .. })
    ));

    let mut empty = electronics_shipment();
    empty.product_lines.clear();
    assert!(matches!(
        calculate_import(&empty, &regime),
        Err(SellerFinanceError::EmptyShipment(_))
    ));
}

#[test]
fn repeated_runs_are_bit_identical() {
    let regime = TaxRegimeTable::simples_nacional_comercio();
    let simulation = electronics_shipment();

    let first = serde_json::to_string(&calculate_import(&simulation, &regime).unwrap()).unwrap();
    let second = serde_json::to_string(&calculate_import(&simulation, &regime).unwrap()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn simulation_round_trips_through_serde() {
    let simulation = electronics_shipment();
    let json = serde_json::to_string(&simulation).unwrap();
    let back: ImportSimulation = serde_json::from_str(&json).unwrap();
    assert_eq!(back, simulation);
}

#[test]
fn allocation_basis_defaults_to_value_when_omitted() {
    let json = r#"{
        "fx_rate": "5.00",
        "freight_foreign": "100",
        "declared_turnover": "150000",
        "product_lines": [
            {"unit_price_foreign": "10", "quantity": 10, "weight_kg": "0.5"}
        ]
    }"#;
    let simulation: ImportSimulation = serde_json::from_str(json).unwrap();
    assert_eq!(simulation.allocation_basis, AllocationBasis::ByValue);
    assert!(simulation.taxes.is_empty());
    assert_eq!(simulation.foreign_currency, Currency::USD);
}
