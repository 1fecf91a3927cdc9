//! Expense records: one shared cost with a payer and a set of sharers.
//!
//! Amounts are whole numbers in the smallest currency unit (won in the
//! original domain). There are no fractional sub-units anywhere.

use serde::{Deserialize, Serialize};

use crate::{GroupSplitError, ParticipantId, Result};

/// One shared-cost entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseRecord {
    /// Free-text label. Display only; never used in computation.
    pub description: String,
    /// Total cost in the smallest currency unit. Must be positive.
    pub amount: u64,
    /// The participant who fronted the money.
    pub paid_by: ParticipantId,
    /// Participants sharing the cost. May or may not include `paid_by`.
    pub split_among: Vec<ParticipantId>,
}

impl ExpenseRecord {
    #[must_use]
    pub fn new(
        description: impl Into<String>,
        amount: u64,
        paid_by: impl Into<ParticipantId>,
        split_among: impl IntoIterator<Item = impl Into<ParticipantId>>,
    ) -> Self {
        Self {
            description: description.into(),
            amount,
            paid_by: paid_by.into(),
            split_among: split_among.into_iter().map(Into::into).collect(),
        }
    }

    /// Check the record's structural invariants.
    ///
    /// `index` is the record's position in the caller's list and is only
    /// used to locate the offending entry in the error.
    ///
    /// # Errors
    /// Returns [`GroupSplitError::InvalidRecord`] when the amount is zero or
    /// does not fit a signed balance, or when nobody shares the cost.
    pub fn validate(&self, index: usize) -> Result<()> {
        if self.amount == 0 {
            return Err(GroupSplitError::InvalidRecord {
                index,
                reason: "amount must be positive".into(),
            });
        }
        if i64::try_from(self.amount).is_err() {
            return Err(GroupSplitError::InvalidRecord {
                index,
                reason: format!("amount {} exceeds the supported range", self.amount),
            });
        }
        if self.split_among.is_empty() {
            return Err(GroupSplitError::InvalidRecord {
                index,
                reason: "at least one participant must share the cost".into(),
            });
        }
        Ok(())
    }

    /// Per-head share, rounded half up.
    ///
    /// This is the one rounding rule for both display ("1 person: 3,334")
    /// and balance accounting. Returns `None` when `split_among` is empty.
    #[must_use]
    pub fn per_head_share(&self) -> Option<u64> {
        round_half_up_div(self.amount, self.split_among.len() as u64)
    }

    /// Whether the amount divides evenly among the sharers.
    #[must_use]
    pub fn splits_evenly(&self) -> bool {
        let count = self.split_among.len() as u64;
        count != 0 && self.amount % count == 0
    }
}

/// `amount / count` rounded half up (`2.5 -> 3`, `3333.67 -> 3334`).
///
/// Returns `None` for a zero divisor.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn round_half_up_div(amount: u64, count: u64) -> Option<u64> {
    if count == 0 {
        return None;
    }
    // (2a + n) / 2n in u128 so large amounts cannot overflow.
    let numerator = 2 * u128::from(amount) + u128::from(count);
    let denominator = 2 * u128::from(count);
    // Quotient is at most `amount`, so it fits back into u64.
    Some((numerator / denominator) as u64)
}

/// Test helpers.
#[cfg(any(test, feature = "test-helpers"))]
impl ExpenseRecord {
    /// Record with a generated description, for fixtures.
    pub fn dummy(amount: u64, paid_by: &str, split_among: &[&str]) -> Self {
        Self::new(
            format!("{paid_by} paid {amount}"),
            amount,
            paid_by,
            split_among.iter().copied(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounding_is_half_up() {
        assert_eq!(round_half_up_div(30_000, 3), Some(10_000));
        assert_eq!(round_half_up_div(10_001, 3), Some(3_334));
        assert_eq!(round_half_up_div(10_000, 3), Some(3_333));
        assert_eq!(round_half_up_div(5, 2), Some(3));
        assert_eq!(round_half_up_div(7, 2), Some(4));
        assert_eq!(round_half_up_div(1, 3), Some(0));
        assert_eq!(round_half_up_div(2, 3), Some(1));
        assert_eq!(round_half_up_div(u64::MAX, 1), Some(u64::MAX));
    }

    #[test]
    fn rounding_zero_divisor() {
        assert_eq!(round_half_up_div(100, 0), None);
    }

    #[test]
    fn per_head_share_uses_split_count() {
        let record = ExpenseRecord::dummy(10_001, "A", &["A", "B", "C"]);
        assert_eq!(record.per_head_share(), Some(3_334));
        assert!(!record.splits_evenly());

        let even = ExpenseRecord::dummy(30_000, "A", &["A", "B", "C"]);
        assert!(even.splits_evenly());
    }

    #[test]
    fn validate_accepts_well_formed() {
        let record = ExpenseRecord::dummy(5_000, "A", &["A"]);
        assert!(record.validate(0).is_ok());
    }

    #[test]
    fn validate_rejects_zero_amount() {
        let record = ExpenseRecord::dummy(0, "A", &["A", "B"]);
        let err = record.validate(3).unwrap_err();
        assert!(
            matches!(err, GroupSplitError::InvalidRecord { index: 3, .. }),
            "Got: {err:?}"
        );
    }

    #[test]
    fn validate_rejects_empty_split() {
        let record = ExpenseRecord::dummy(1_000, "A", &[]);
        assert!(matches!(
            record.validate(0),
            Err(GroupSplitError::InvalidRecord { .. })
        ));
        assert_eq!(record.per_head_share(), None);
        assert!(!record.splits_evenly());
    }

    #[test]
    fn validate_rejects_amount_beyond_balance_range() {
        let record = ExpenseRecord::dummy(u64::MAX, "A", &["B"]);
        assert!(record.validate(0).is_err());
    }

    #[test]
    fn serde_uses_camel_case() {
        let record = ExpenseRecord::dummy(100, "A", &["B"]);
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"paidBy\":\"A\""), "Got: {json}");
        assert!(json.contains("\"splitAmong\":[\"B\"]"), "Got: {json}");
    }
}
