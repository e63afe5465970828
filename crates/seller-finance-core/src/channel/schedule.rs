use serde::{Deserialize, Serialize};

use crate::error::SellerFinanceError;
use crate::SellerFinanceResult;

// ---------------------------------------------------------------------------
// Channel variants
// ---------------------------------------------------------------------------

/// The sales channels the back office knows how to price. `Other` exists so
/// configs imported from older data still deserialize; it is rejected the
/// moment a fee schedule is requested for it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChannelType {
    /// The seller's own storefront. No marketplace commission; payment
    /// gateway costs come in through the financial-cost percentage.
    OwnSite,
    MercadoLivre,
    /// Mercado Livre with marketplace warehouse fulfilment.
    MercadoLivreFull,
    Shopee,
    Amazon,
    /// Amazon with FBA fulfilment.
    AmazonFba,
    Magalu,
    Other(String),
}

impl std::fmt::Display for ChannelType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::OwnSite => "own site",
            Self::MercadoLivre => "Mercado Livre",
            Self::MercadoLivreFull => "Mercado Livre Full",
            Self::Shopee => "Shopee",
            Self::Amazon => "Amazon",
            Self::AmazonFba => "Amazon FBA",
            Self::Magalu => "Magalu",
            Self::Other(name) => name,
        };
        write!(f, "{}", s)
    }
}

// ---------------------------------------------------------------------------
// Fee terms
// ---------------------------------------------------------------------------

/// How a fee term turns a configuration field into an amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeeKind {
    /// Field is a percentage of the sale price.
    PercentOfPrice,
    /// Field is a percentage of the product's base cost.
    PercentOfCost,
    /// Field is a flat amount charged by the channel.
    Fixed,
    /// Field is a flat cost borne by the seller.
    CostValue,
}

/// Which `ChannelConfig` field a fee term reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeeSource {
    CommissionPercent,
    OtherPercent,
    AdsPercent,
    FinancialCostPercent,
    MarketingCostPercent,
    FixedFee,
    OtherValue,
    ShippingCost,
    PackagingCost,
}

/// One entry in a channel's ordered fee schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeTerm {
    pub kind: FeeKind,
    pub source: FeeSource,
}

const fn term(kind: FeeKind, source: FeeSource) -> FeeTerm {
    FeeTerm { kind, source }
}

/// Fee terms for seller-fulfilled marketplace channels, in netting order:
/// commission first, then flat fees and seller costs, then the
/// price-percentage overheads.
const MARKETPLACE_TERMS: [FeeTerm; 9] = [
    term(FeeKind::PercentOfPrice, FeeSource::CommissionPercent),
    term(FeeKind::Fixed, FeeSource::FixedFee),
    term(FeeKind::CostValue, FeeSource::PackagingCost),
    term(FeeKind::CostValue, FeeSource::ShippingCost),
    term(FeeKind::CostValue, FeeSource::OtherValue),
    term(FeeKind::PercentOfPrice, FeeSource::OtherPercent),
    term(FeeKind::PercentOfPrice, FeeSource::AdsPercent),
    term(FeeKind::PercentOfPrice, FeeSource::FinancialCostPercent),
    term(FeeKind::PercentOfPrice, FeeSource::MarketingCostPercent),
];

/// Warehouse-fulfilled terms: identical to the marketplace list except the
/// other-percent field, which covers storage and inventory cover and is
/// charged on the inventory value, not the sale price.
const WAREHOUSE_TERMS: [FeeTerm; 9] = [
    term(FeeKind::PercentOfPrice, FeeSource::CommissionPercent),
    term(FeeKind::Fixed, FeeSource::FixedFee),
    term(FeeKind::CostValue, FeeSource::PackagingCost),
    term(FeeKind::CostValue, FeeSource::ShippingCost),
    term(FeeKind::CostValue, FeeSource::OtherValue),
    term(FeeKind::PercentOfCost, FeeSource::OtherPercent),
    term(FeeKind::PercentOfPrice, FeeSource::AdsPercent),
    term(FeeKind::PercentOfPrice, FeeSource::FinancialCostPercent),
    term(FeeKind::PercentOfPrice, FeeSource::MarketingCostPercent),
];

/// Own-site terms: identical netting, minus the marketplace commission.
const OWN_SITE_TERMS: [FeeTerm; 8] = [
    term(FeeKind::Fixed, FeeSource::FixedFee),
    term(FeeKind::CostValue, FeeSource::PackagingCost),
    term(FeeKind::CostValue, FeeSource::ShippingCost),
    term(FeeKind::CostValue, FeeSource::OtherValue),
    term(FeeKind::PercentOfPrice, FeeSource::OtherPercent),
    term(FeeKind::PercentOfPrice, FeeSource::AdsPercent),
    term(FeeKind::PercentOfPrice, FeeSource::FinancialCostPercent),
    term(FeeKind::PercentOfPrice, FeeSource::MarketingCostPercent),
];

/// The ordered fee terms a channel variant applies. Adding a channel means
/// adding a variant and a term list here, not new arithmetic in the
/// calculator.
pub fn fee_schedule(channel: &ChannelType) -> SellerFinanceResult<Vec<FeeTerm>> {
    match channel {
        ChannelType::OwnSite => Ok(OWN_SITE_TERMS.to_vec()),
        ChannelType::MercadoLivre
        | ChannelType::Shopee
        | ChannelType::Amazon
        | ChannelType::Magalu => Ok(MARKETPLACE_TERMS.to_vec()),
        ChannelType::MercadoLivreFull | ChannelType::AmazonFba => Ok(WAREHOUSE_TERMS.to_vec()),
        ChannelType::Other(name) => Err(SellerFinanceError::UnsupportedChannel {
            channel: name.clone(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seller_fulfilled_marketplaces_share_the_full_term_list() {
        let ml = fee_schedule(&ChannelType::MercadoLivre).unwrap();
        let shopee = fee_schedule(&ChannelType::Shopee).unwrap();
        assert_eq!(ml, shopee);
        assert_eq!(ml.len(), 9);
    }

    #[test]
    fn warehouse_variants_charge_other_percent_on_cost() {
        for channel in [ChannelType::MercadoLivreFull, ChannelType::AmazonFba] {
            let schedule = fee_schedule(&channel).unwrap();
            let other = schedule
                .iter()
                .find(|t| t.source == FeeSource::OtherPercent)
                .unwrap();
            assert_eq!(other.kind, FeeKind::PercentOfCost);
        }

        // Seller-fulfilled listings keep it price-based.
        let ml = fee_schedule(&ChannelType::MercadoLivre).unwrap();
        let other = ml
            .iter()
            .find(|t| t.source == FeeSource::OtherPercent)
            .unwrap();
        assert_eq!(other.kind, FeeKind::PercentOfPrice);
    }

    #[test]
    fn own_site_has_no_commission_term() {
        let schedule = fee_schedule(&ChannelType::OwnSite).unwrap();
        assert!(schedule
            .iter()
            .all(|t| t.source != FeeSource::CommissionPercent));
    }

    #[test]
    fn commission_is_netted_first_on_marketplaces() {
        let schedule = fee_schedule(&ChannelType::Shopee).unwrap();
        assert_eq!(schedule[0].source, FeeSource::CommissionPercent);
        assert_eq!(schedule[0].kind, FeeKind::PercentOfPrice);
    }

    #[test]
    fn unknown_channels_are_rejected() {
        let err = fee_schedule(&ChannelType::Other("aliexpress".into())).unwrap_err();
        match err {
            SellerFinanceError::UnsupportedChannel { channel } => {
                assert_eq!(channel, "aliexpress");
            }
            other => panic!("Expected UnsupportedChannel, got {other:?}"),
        }
    }
}
