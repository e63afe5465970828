use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::SellerFinanceError;
use crate::types::{Money, Rate};
use crate::SellerFinanceResult;

/// Smallest representable monetary unit; consecutive brackets must be
/// exactly one of these apart.
const CENT: Decimal = dec!(0.01);

/// Annual turnover below this threshold gets the larger tax-substitution
/// reduction.
const ST_THRESHOLD: Decimal = dec!(360_000);

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// One progressive turnover bracket: an inclusive revenue range, its nominal
/// rate, and the deduction constant that smooths the effective rate across
/// the bracket boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    pub range_start: Money,
    pub range_end: Money,
    pub base_rate: Rate,
    pub deduction: Money,
}

/// A validated progressive tax table. Construction checks the structural
/// invariants once; `resolve` can then trust the bracket list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TaxRegimeTableRaw")]
pub struct TaxRegimeTable {
    pub name: String,
    pub valid_from: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid_through: Option<NaiveDate>,
    brackets: Vec<TaxBracket>,
}

/// Wire shape for regime tables. Deserialization funnels through
/// [`TaxRegimeTable::new`], so injected tables get the same structural
/// validation as built-in ones.
#[derive(Deserialize)]
struct TaxRegimeTableRaw {
    name: String,
    valid_from: NaiveDate,
    #[serde(default)]
    valid_through: Option<NaiveDate>,
    brackets: Vec<TaxBracket>,
}

impl TryFrom<TaxRegimeTableRaw> for TaxRegimeTable {
    type Error = SellerFinanceError;

    fn try_from(raw: TaxRegimeTableRaw) -> Result<Self, Self::Error> {
        Self::new(raw.name, raw.valid_from, raw.valid_through, raw.brackets)
    }
}

/// Result of resolving a turnover against a regime table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxTierResolution {
    /// Zero-based index into the regime table.
    pub bracket_index: usize,
    pub range_start: Money,
    pub range_end: Money,
    pub base_rate: Rate,
    pub deduction: Money,
    /// De-aliased average rate implied by the progressive schedule:
    /// (turnover * base_rate - deduction) / turnover.
    pub effective_rate: Rate,
    /// Reduction factor applied to the portion of turnover under tax
    /// substitution.
    pub st_reduction: Rate,
}

// ---------------------------------------------------------------------------
// Table construction and lookup
// ---------------------------------------------------------------------------

impl TaxRegimeTable {
    /// Build a table from caller-supplied brackets, validating contiguity,
    /// ordering, and rate monotonicity up front.
    pub fn new(
        name: impl Into<String>,
        valid_from: NaiveDate,
        valid_through: Option<NaiveDate>,
        brackets: Vec<TaxBracket>,
    ) -> SellerFinanceResult<Self> {
        if brackets.is_empty() {
            return Err(SellerFinanceError::InvalidInput {
                field: "brackets".into(),
                reason: "A regime table needs at least one bracket".into(),
            });
        }

        for (i, b) in brackets.iter().enumerate() {
            if b.range_start < Decimal::ZERO || b.range_end <= b.range_start {
                return Err(SellerFinanceError::InvalidInput {
                    field: format!("brackets[{i}]"),
                    reason: "Bracket range must satisfy 0 <= start < end".into(),
                });
            }
            if b.base_rate <= Decimal::ZERO || b.base_rate >= Decimal::ONE {
                return Err(SellerFinanceError::InvalidInput {
                    field: format!("brackets[{i}].base_rate"),
                    reason: "Base rate must be a fraction in (0, 1)".into(),
                });
            }
            if b.deduction < Decimal::ZERO {
                return Err(SellerFinanceError::InvalidInput {
                    field: format!("brackets[{i}].deduction"),
                    reason: "Deduction cannot be negative".into(),
                });
            }
            if i > 0 {
                let prev = &brackets[i - 1];
                if b.range_start != prev.range_end + CENT {
                    return Err(SellerFinanceError::InvalidInput {
                        field: format!("brackets[{i}].range_start"),
                        reason: "Brackets must be contiguous (start = previous end + 0.01)"
                            .into(),
                    });
                }
                if b.base_rate < prev.base_rate {
                    return Err(SellerFinanceError::InvalidInput {
                        field: format!("brackets[{i}].base_rate"),
                        reason: "Base rates must not decrease across brackets".into(),
                    });
                }
            }
        }

        Ok(Self {
            name: name.into(),
            valid_from,
            valid_through,
            brackets,
        })
    }

    /// The Simples Nacional trade annex used by the back office: five
    /// brackets up to the 3,600,000.00 regime ceiling.
    pub fn simples_nacional_comercio() -> Self {
        let brackets = vec![
            TaxBracket {
                range_start: dec!(0.00),
                range_end: dec!(180_000.00),
                base_rate: dec!(0.04),
                deduction: dec!(0),
            },
            TaxBracket {
                range_start: dec!(180_000.01),
                range_end: dec!(360_000.00),
                base_rate: dec!(0.073),
                deduction: dec!(5_940),
            },
            TaxBracket {
                range_start: dec!(360_000.01),
                range_end: dec!(720_000.00),
                base_rate: dec!(0.095),
                deduction: dec!(13_860),
            },
            TaxBracket {
                range_start: dec!(720_000.01),
                range_end: dec!(1_800_000.00),
                base_rate: dec!(0.107),
                deduction: dec!(22_500),
            },
            TaxBracket {
                range_start: dec!(1_800_000.01),
                range_end: dec!(3_600_000.00),
                base_rate: dec!(0.143),
                deduction: dec!(87_300),
            },
        ];

        Self {
            name: "Simples Nacional — Anexo I (Comércio)".into(),
            valid_from: NaiveDate::from_ymd_opt(2018, 1, 1).unwrap(),
            valid_through: None,
            brackets,
        }
    }

    /// Highest turnover the regime covers.
    pub fn ceiling(&self) -> Money {
        self.brackets
            .last()
            .map(|b| b.range_end)
            .unwrap_or(Decimal::ZERO)
    }

    pub fn brackets(&self) -> &[TaxBracket] {
        &self.brackets
    }

    /// Resolve an annual turnover to its bracket and effective rate.
    ///
    /// Turnover above the last bracket's end is an error, never an
    /// extrapolation: the regime simply does not apply there.
    pub fn resolve(&self, turnover: Money) -> SellerFinanceResult<TaxTierResolution> {
        if turnover <= Decimal::ZERO {
            return Err(SellerFinanceError::InvalidInput {
                field: "turnover".into(),
                reason: "Turnover must be positive".into(),
            });
        }

        for (i, b) in self.brackets.iter().enumerate() {
            if turnover >= b.range_start && turnover <= b.range_end {
                let effective_rate = (turnover * b.base_rate - b.deduction) / turnover;
                return Ok(TaxTierResolution {
                    bracket_index: i,
                    range_start: b.range_start,
                    range_end: b.range_end,
                    base_rate: b.base_rate,
                    deduction: b.deduction,
                    effective_rate,
                    st_reduction: st_reduction_factor(turnover),
                });
            }
        }

        Err(SellerFinanceError::OutOfRange {
            turnover,
            ceiling: self.ceiling(),
        })
    }
}

/// Reduction factor for the turnover portion under tax substitution
/// ("ICMS ST"). A step function: 34% below 360,000, 33.5% from the
/// threshold up. Not interpolated.
pub fn st_reduction_factor(turnover: Money) -> Rate {
    if turnover < ST_THRESHOLD {
        dec!(0.34)
    } else {
        dec!(0.335)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
