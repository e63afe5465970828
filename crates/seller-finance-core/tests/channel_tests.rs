use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use seller_finance_core::channel::{
    break_even_price, evaluate_channel, summarize_channels, ChannelConfig, ChannelType,
};
use seller_finance_core::types::Product;
use seller_finance_core::SellerFinanceError;

// ===========================================================================
// Channel profitability tests
// ===========================================================================

fn imported_gadget() -> Product {
    Product {
        id: "GAD-042".into(),
        base_cost: dec!(450.00),
        weight_kg: Some(dec!(1.2)),
        dimensions: None,
        tax_percent: dec!(4),
    }
}

fn config(channel_type: ChannelType) -> ChannelConfig {
    ChannelConfig {
        channel_type,
        enabled: true,
        sale_price: dec!(699.90),
        commission_percent: Decimal::ZERO,
        fixed_fee: Decimal::ZERO,
        other_percent: dec!(3),
        other_value: Decimal::ZERO,
        ads_percent: dec!(5),
        shipping_cost: Decimal::ZERO,
        packaging_cost: dec!(15),
        financial_cost_percent: Decimal::ZERO,
        marketing_cost_percent: Decimal::ZERO,
        listing_id: Some("MLB123456789".into()),
        channel_sku: None,
    }
}

#[test]
fn reference_listing_profitability() {
    let out = evaluate_channel(&imported_gadget(), &config(ChannelType::MercadoLivre)).unwrap();
    let r = &out.result;

    assert_eq!(r.other_costs, dec!(70.99));
    assert_eq!(r.net_profit, dec!(178.91));
    assert_eq!(r.gross_profit, dec!(249.90));
    assert_eq!(r.margin.round_dp(3), dec!(0.357));
}

#[test]
fn break_even_matches_the_closed_form() {
    // (450 + 15) / (1 - 0.08)
    let be = break_even_price(&imported_gadget(), &config(ChannelType::MercadoLivre)).unwrap();
    assert_eq!(be, dec!(505.43));

    // At the break-even price, net profit is within a rounding cent of zero.
    let mut at_be = config(ChannelType::MercadoLivre);
    at_be.sale_price = be;
    let r = evaluate_channel(&imported_gadget(), &at_be).unwrap().result;
    assert!(r.net_profit.abs() <= dec!(0.01), "net at break-even: {}", r.net_profit);
}

#[test]
fn margin_is_a_gross_metric_independent_of_fees() {
    // Same price and cost, wildly different fee loads: margin must not move.
    let mut lean = config(ChannelType::Shopee);
    lean.commission_percent = dec!(2);
    let mut heavy = config(ChannelType::Shopee);
    heavy.commission_percent = dec!(19);

    let lean_result = evaluate_channel(&imported_gadget(), &lean).unwrap().result;
    let heavy_result = evaluate_channel(&imported_gadget(), &heavy).unwrap().result;

    assert_eq!(lean_result.margin, heavy_result.margin);
    assert!(lean_result.net_profit > heavy_result.net_profit);
}

#[test]
fn fee_overload_is_infeasible_for_break_even_only() {
    let mut overloaded = config(ChannelType::Amazon);
    overloaded.commission_percent = dec!(90);
    overloaded.ads_percent = dec!(15);

    assert!(matches!(
        break_even_price(&imported_gadget(), &overloaded),
        Err(SellerFinanceError::InfeasibleChannel { .. })
    ));

    let out = evaluate_channel(&imported_gadget(), &overloaded).unwrap();
    assert!(out.result.net_profit < Decimal::ZERO);
    assert_eq!(out.result.break_even_price, None);
}

#[test]
fn legacy_channel_rows_are_rejected_by_name() {
    let mut legacy = config(ChannelType::Other("extinct-marketplace".into()));
    legacy.enabled = true;

    let err = evaluate_channel(&imported_gadget(), &legacy).unwrap_err();
    match err {
        SellerFinanceError::UnsupportedChannel { channel } => {
            assert_eq!(channel, "extinct-marketplace");
        }
        other => panic!("Expected UnsupportedChannel, got {other:?}"),
    }
}

// ===========================================================================
// Portfolio summary tests
// ===========================================================================

#[test]
fn portfolio_summary_over_mixed_channels() {
    let product = imported_gadget();

    let mut ml = config(ChannelType::MercadoLivre);
    ml.commission_percent = dec!(16);

    let mut own = config(ChannelType::OwnSite);
    own.sale_price = dec!(649.90);
    own.financial_cost_percent = dec!(2);

    let mut disabled = config(ChannelType::Shopee);
    disabled.enabled = false;

    let out = summarize_channels(&product, &[ml, own, disabled]).unwrap();
    let summary = &out.result;

    assert_eq!(summary.enabled_channels, 2);
    // ML nets 178.908 - 16% of 699.90 = 66.92; own site nets more.
    assert_eq!(summary.best_channel, Some(ChannelType::OwnSite));

    let best = summary.best_net_profit.unwrap();
    for entry in &summary.evaluated {
        assert!(entry.result.net_profit <= best);
    }
}

#[test]
fn summary_results_match_individual_evaluations() {
    let product = imported_gadget();
    let ml = config(ChannelType::MercadoLivre);

    let individual = evaluate_channel(&product, &ml).unwrap().result;
    let summary = summarize_channels(&product, &[ml]).unwrap().result;

    assert_eq!(summary.evaluated[0].result, individual);
}
