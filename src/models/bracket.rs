//! Bracket tier model and table validation.
//!
//! This module defines the [`BracketTier`] used by both the social-security
//! and the income-tax tables, and [`validate_bracket_table`], which rejects
//! tables the evaluator cannot safely trust.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// One tier of a progressive bracket table.
///
/// Rates are percentages (`7.5` means 7.5%). For social-security tiers the
/// `deduction` is zero; for income-tax tiers it is the statutory amount to
/// subtract from the gross tax of the matched tier.
///
/// # Example
///
/// ```
/// use payroll_engine::models::BracketTier;
/// use rust_decimal::Decimal;
///
/// let tier = BracketTier::new(1, Decimal::ZERO, Some(Decimal::from(1000)), Decimal::new(75, 1));
/// assert!(tier.contains(Decimal::from(1000)));
/// assert!(!tier.contains(Decimal::from(1001)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketTier {
    /// The 1-based ordinal of the tier within its table.
    pub index: u32,
    /// The lower bound of the tier.
    pub lower: Decimal,
    /// The upper bound of the tier; `None` for an unbounded top tier.
    #[serde(default)]
    pub upper: Option<Decimal>,
    /// The tier rate as a percentage.
    pub rate: Decimal,
    /// Amount subtracted from the gross tax (income-tax tables only).
    #[serde(default)]
    pub deduction: Decimal,
}

impl BracketTier {
    /// Creates a tier with no amount to subtract.
    pub fn new(index: u32, lower: Decimal, upper: Option<Decimal>, rate: Decimal) -> Self {
        Self {
            index,
            lower,
            upper,
            rate,
            deduction: Decimal::ZERO,
        }
    }

    /// Sets the amount to subtract for an income-tax tier.
    pub fn with_deduction(mut self, deduction: Decimal) -> Self {
        self.deduction = deduction;
        self
    }

    /// Returns true if `amount` lies within `[lower, upper]`.
    pub fn contains(&self, amount: Decimal) -> bool {
        amount >= self.lower && self.upper.is_none_or(|upper| amount <= upper)
    }

    /// Returns the portion of `amount` above `lower` and at or below `upper`.
    pub fn slice_of(&self, amount: Decimal) -> Decimal {
        let top = match self.upper {
            Some(upper) if upper < amount => upper,
            _ => amount,
        };
        top.saturating_sub(self.lower).max(Decimal::ZERO)
    }
}

/// Largest gap between consecutive tiers still treated as contiguous.
///
/// Statutory tables commonly start the next tier one cent above the previous
/// upper bound (e.g. `1412.00` then `1412.01`).
pub const MAX_TIER_GAP: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Checks the fields of each tier without looking at its neighbours.
///
/// This is the shape check the pure evaluator relies on: no negative
/// bounds or rates, and `upper` not below `lower`.
pub fn check_tier_shape(table: &str, tiers: &[BracketTier]) -> EngineResult<()> {
    for tier in tiers {
        let defect = if tier.lower < Decimal::ZERO {
            Some("has a negative lower bound")
        } else if tier.upper.is_some_and(|upper| upper < tier.lower) {
            Some("has an upper bound below its lower bound")
        } else if tier.rate < Decimal::ZERO {
            Some("has a negative rate")
        } else if tier.deduction < Decimal::ZERO {
            Some("has a negative deduction")
        } else {
            None
        };

        if let Some(defect) = defect {
            return Err(EngineError::InvalidBracketTable {
                table: table.to_string(),
                message: format!("tier {} {}", tier.index, defect),
            });
        }
    }
    Ok(())
}

/// Validates that a bracket table is well formed.
///
/// A valid table is non-empty, its indices run `1..=n` in order, each tier
/// passes [`check_tier_shape`], consecutive tiers neither overlap nor leave a
/// gap wider than [`MAX_TIER_GAP`], and only the last tier may be unbounded.
/// Two tiers may share a boundary value.
///
/// # Example
///
/// ```
/// use payroll_engine::models::{BracketTier, validate_bracket_table};
/// use rust_decimal::Decimal;
///
/// let tiers = vec![
///     BracketTier::new(1, Decimal::ZERO, Some(Decimal::from(1000)), Decimal::new(75, 1)),
///     BracketTier::new(2, Decimal::from(1000), None, Decimal::from(9)),
/// ];
/// assert!(validate_bracket_table("social_security_tiers", &tiers).is_ok());
/// ```
pub fn validate_bracket_table(table: &str, tiers: &[BracketTier]) -> EngineResult<()> {
    let invalid = |message: String| EngineError::InvalidBracketTable {
        table: table.to_string(),
        message,
    };

    if tiers.is_empty() {
        return Err(invalid("table has no tiers".to_string()));
    }

    check_tier_shape(table, tiers)?;

    for (position, tier) in tiers.iter().enumerate() {
        let expected = position as u32 + 1;
        if tier.index != expected {
            return Err(invalid(format!(
                "tier at position {} has index {}, expected {}",
                expected, tier.index, expected
            )));
        }
    }

    for pair in tiers.windows(2) {
        let (previous, next) = (&pair[0], &pair[1]);
        let Some(previous_upper) = previous.upper else {
            return Err(invalid(format!(
                "tier {} is unbounded but is not the last tier",
                previous.index
            )));
        };
        if next.lower < previous_upper {
            return Err(invalid(format!(
                "tier {} overlaps tier {}",
                next.index, previous.index
            )));
        }
        if next.lower - previous_upper > MAX_TIER_GAP {
            return Err(invalid(format!(
                "gap between tier {} and tier {}",
                previous.index, next.index
            )));
        }
    }

    Ok(())
}
