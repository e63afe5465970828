use rust_decimal::Decimal;

use crate::error::SellerFinanceError;
use crate::types::Money;
use crate::SellerFinanceResult;

/// Convert a foreign-currency amount to local currency at a
/// simulation-fixed rate.
///
/// The product is returned at full precision; rounding belongs to the
/// caller presenting the value.
pub fn convert(amount_foreign: Money, fx_rate: Decimal) -> SellerFinanceResult<Money> {
    if fx_rate <= Decimal::ZERO {
        return Err(SellerFinanceError::InvalidInput {
            field: "fx_rate".into(),
            reason: "Exchange rate must be positive".into(),
        });
    }
    if amount_foreign < Decimal::ZERO {
        return Err(SellerFinanceError::InvalidInput {
            field: "amount_foreign".into(),
            reason: "Amount to convert cannot be negative".into(),
        });
    }

    Ok(amount_foreign * fx_rate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn converts_at_full_precision() {
        // 123.45 USD at 5.1234 BRL/USD
        let local = convert(dec!(123.45), dec!(5.1234)).unwrap();
        assert_eq!(local, dec!(632.483730));
    }

    #[test]
    fn zero_amount_converts_to_zero() {
        assert_eq!(convert(Decimal::ZERO, dec!(5.00)).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn rejects_non_positive_rate() {
        for rate in [Decimal::ZERO, dec!(-1.5)] {
            let err = convert(dec!(100), rate).unwrap_err();
            match err {
                SellerFinanceError::InvalidInput { field, .. } => assert_eq!(field, "fx_rate"),
                other => panic!("Expected InvalidInput, got {other:?}"),
            }
        }
    }

    #[test]
    fn rejects_negative_amount() {
        let err = convert(dec!(-10), dec!(5)).unwrap_err();
        assert!(matches!(
            err,
            SellerFinanceError::InvalidInput { .. }
        ));
    }
}
