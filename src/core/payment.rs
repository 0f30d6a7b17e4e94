//! Payment calculation from designation and worked days.
//!
//! The designation is free text; its category is the first rate tier whose
//! keyword appears in it, ignoring case.

use crate::{
    config::{RateTable, RateTier, UnrecognizedPolicy},
    errors::{Error, Result},
};

/// Finds the rate tier for a designation, if any.
#[must_use]
pub fn resolve_tier<'a>(rates: &'a RateTable, designation: &str) -> Option<&'a RateTier> {
    let designation = designation.to_uppercase();
    rates
        .tiers
        .iter()
        .find(|tier| designation.contains(&tier.keyword.to_uppercase()))
}

/// Largest amount a line or order total may reach; amounts are stored as `i64`.
pub const MAX_AMOUNT: u64 = i64::MAX.unsigned_abs();

/// Amount payable for `days` worked under `designation`.
///
/// Unrecognized designations pay zero, as do zero days. A product past
/// [`MAX_AMOUNT`] is clamped to it; [`line_amount`] rejects it instead.
#[must_use]
pub fn calculate(rates: &RateTable, designation: &str, days: u32) -> u64 {
    resolve_tier(rates, designation).map_or(0, |tier| {
        u64::from(days).saturating_mul(tier.daily_rate).min(MAX_AMOUNT)
    })
}

/// Like [`calculate`], but honors the table's [`UnrecognizedPolicy`].
///
/// # Errors
/// - `Error::UnrecognizedDesignation` when no tier matches and the policy is
///   [`UnrecognizedPolicy::Reject`]
/// - `Error::Validation` when the amount exceeds [`MAX_AMOUNT`]
pub fn line_amount(rates: &RateTable, designation: &str, days: u32) -> Result<u64> {
    match resolve_tier(rates, designation) {
        Some(tier) => u64::from(days)
            .checked_mul(tier.daily_rate)
            .filter(|amount| *amount <= MAX_AMOUNT)
            .ok_or_else(|| {
                Error::validation(format!(
                    "{days} days at {} per day for {designation} is too large an amount",
                    tier.daily_rate
                ))
            }),
        None => match rates.unrecognized {
            UnrecognizedPolicy::Zero => Ok(0),
            UnrecognizedPolicy::Reject => Err(Error::UnrecognizedDesignation {
                designation: designation.to_string(),
            }),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calculate_lecturer_and_tgt() {
        let rates = RateTable::default();
        assert_eq!(calculate(&rates, "LECTURER ENGLISH", 10), 14450);
        assert_eq!(calculate(&rates, "TGT MATH", 10), 14030);
    }

    #[test]
    fn test_calculate_unrecognized_is_zero() {
        let rates = RateTable::default();
        assert_eq!(calculate(&rates, "PRINCIPAL", 5), 0);
        assert_eq!(calculate(&rates, "", 5), 0);
    }

    #[test]
    fn test_calculate_zero_days() {
        let rates = RateTable::default();
        for designation in ["LECTURER HINDI", "TGT PET", "PRINCIPAL"] {
            assert_eq!(calculate(&rates, designation, 0), 0);
        }
    }

    #[test]
    fn test_calculate_is_case_insensitive() {
        let rates = RateTable::default();
        assert_eq!(calculate(&rates, "Lecturer History", 2), 2890);
        assert_eq!(calculate(&rates, "tgt special education teacher", 1), 1403);
    }

    #[test]
    fn test_lecturer_tier_checked_first() {
        let rates = RateTable::default();
        // Both keywords present: the first tier wins.
        assert_eq!(calculate(&rates, "TGT PROMOTED LECTURER", 1), 1445);
    }

    #[test]
    fn test_line_amount_policy() {
        let mut rates = RateTable::default();
        assert_eq!(line_amount(&rates, "PRINCIPAL", 4).ok(), Some(0));

        rates.unrecognized = UnrecognizedPolicy::Reject;
        assert!(matches!(
            line_amount(&rates, "PRINCIPAL", 4),
            Err(Error::UnrecognizedDesignation { designation }) if designation == "PRINCIPAL"
        ));
        assert_eq!(line_amount(&rates, "TGT MATH", 4).ok(), Some(5612));
    }

    #[test]
    fn test_oversized_rate_does_not_overflow() {
        let mut rates = RateTable::default();
        rates.tiers[0].daily_rate = u64::MAX / 2;

        assert_eq!(calculate(&rates, "LECTURER HINDI", 3), MAX_AMOUNT);
        assert!(matches!(
            line_amount(&rates, "LECTURER HINDI", 3),
            Err(Error::Validation { .. })
        ));
        // Past the storable range even without wrapping.
        rates.tiers[0].daily_rate = MAX_AMOUNT;
        assert!(matches!(
            line_amount(&rates, "LECTURER HINDI", 2),
            Err(Error::Validation { .. })
        ));
        assert_eq!(line_amount(&rates, "LECTURER HINDI", 1).ok(), Some(MAX_AMOUNT));
    }
}
