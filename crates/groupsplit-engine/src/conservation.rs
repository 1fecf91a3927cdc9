//! Balance conservation checks.
//!
//! Invariant after computing balances:
//! ```text
//! Σ balances == Σ(paid) - Σ(share × sharers)
//! ```
//! The right-hand side is zero when every record splits evenly; otherwise it
//! is the rounding slack left by round-half-up shares. Settlements must then
//! move the balances to zero, apart from that slack.

use groupsplit_types::{
    Balances, ExpenseRecord, GroupSplitError, Result, Settlement, apply_settlements,
};

/// Tracks what was paid and what was charged, and checks computed balances
/// against it.
#[derive(Debug, Clone, Default)]
pub struct Conservation {
    /// Total fronted by payers.
    paid: i128,
    /// Total charged to sharers (share × sharer count, per record).
    charged: i128,
    /// Sum of `|amount - share × sharers|` over records.
    slack_bound: u128,
}

impl Conservation {
    /// Create an empty tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Tracker pre-loaded with every record in `records`.
    ///
    /// # Errors
    /// Returns [`GroupSplitError::InvalidRecord`] for a record with no sharers.
    pub fn from_records(records: &[ExpenseRecord]) -> Result<Self> {
        let mut conservation = Self::new();
        for (index, record) in records.iter().enumerate() {
            conservation.record(index, record)?;
        }
        Ok(conservation)
    }

    /// Account for one record.
    pub fn record(&mut self, index: usize, record: &ExpenseRecord) -> Result<()> {
        let share = record
            .per_head_share()
            .ok_or_else(|| GroupSplitError::InvalidRecord {
                index,
                reason: "at least one participant must share the cost".into(),
            })?;
        let charged = i128::from(share) * record.split_among.len() as i128;
        let paid = i128::from(record.amount);
        self.paid += paid;
        self.charged += charged;
        self.slack_bound += (paid - charged).unsigned_abs();
        Ok(())
    }

    /// Expected sum of all balances: paid - charged.
    #[must_use]
    pub fn expected_total(&self) -> i128 {
        self.paid - self.charged
    }

    /// Upper bound on `|expected_total|`; zero iff every record split evenly.
    #[must_use]
    pub fn slack_bound(&self) -> u128 {
        self.slack_bound
    }

    /// Verify that `balances` sum to exactly the expected total.
    ///
    /// # Errors
    /// Returns [`GroupSplitError::ConservationViolation`] on mismatch.
    pub fn verify(&self, balances: &Balances) -> Result<()> {
        let actual = balances.total();
        let expected = self.expected_total();
        if actual != expected {
            return Err(GroupSplitError::ConservationViolation {
                reason: format!(
                    "balances sum to {actual}, expected {expected} \
                     (paid={}, charged={})",
                    self.paid, self.charged
                ),
            });
        }
        Ok(())
    }
}

/// Verify that `settlements` are a sound netting of `balances`.
///
/// Checks:
/// - no zero-amount transfer and no self-transfer;
/// - at most `max(0, N - 1)` transfers for `N` non-zero participants;
/// - after replaying every transfer, each participant is at zero, except
///   rounding slack, which stays on the side matching the sign of the total.
///
/// # Errors
/// Returns [`GroupSplitError::ConservationViolation`] describing the first
/// failed check, or `BalanceOverflow` if replay leaves the `i64` range.
pub fn verify_settlements(balances: &Balances, settlements: &[Settlement]) -> Result<()> {
    if let Some(bad) = settlements.iter().find(|s| s.amount == 0 || s.from == s.to) {
        return Err(GroupSplitError::ConservationViolation {
            reason: format!("degenerate transfer {bad}"),
        });
    }

    let limit = balances.non_zero_count().saturating_sub(1);
    if settlements.len() > limit {
        return Err(GroupSplitError::ConservationViolation {
            reason: format!(
                "{} transfers for {} non-zero participants",
                settlements.len(),
                balances.non_zero_count()
            ),
        });
    }

    let after = apply_settlements(balances, settlements)?;
    let total = balances.total();
    if after.total() != total {
        return Err(GroupSplitError::ConservationViolation {
            reason: format!("replay changed total from {total} to {}", after.total()),
        });
    }
    let misplaced = after
        .iter()
        .find(|(_, left)| *left != 0 && i128::from(*left).signum() != total.signum());
    if let Some((id, left)) = misplaced {
        return Err(GroupSplitError::ConservationViolation {
            reason: format!("{id} left at {left} after settlement (total {total})"),
        });
    }
    Ok(())
}
