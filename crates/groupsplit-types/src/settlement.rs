//! Settlement instructions produced by netting.
//!
//! A [`Settlement`] is one directed transfer: `from` pays `to`. The list is
//! recomputed on every call and never persisted by the engine.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Balances, GroupSplitError, ParticipantId, Result};

/// One "A owes B amount" instruction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Settlement {
    /// The debtor who pays.
    pub from: ParticipantId,
    /// The creditor who receives.
    pub to: ParticipantId,
    /// Always positive.
    pub amount: u64,
}

impl fmt::Display for Settlement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}: {}", self.from, self.to, self.amount)
    }
}

/// Replay `settlements` against a balance snapshot.
///
/// The payer's balance rises by `amount` (debt paid down) and the
/// receiver's falls by `amount` (credit collected). Participants absent
/// from `balances` are appended.
///
/// # Errors
/// Returns [`GroupSplitError::BalanceOverflow`] if a replayed transfer
/// leaves the `i64` range.
pub fn apply_settlements(balances: &Balances, settlements: &[Settlement]) -> Result<Balances> {
    let mut after = balances.clone();
    for settlement in settlements {
        let amount = i64::try_from(settlement.amount).map_err(|_| {
            GroupSplitError::BalanceOverflow {
                participant: settlement.from.to_string(),
            }
        })?;
        let from = after.entry(&settlement.from);
        *from = from
            .checked_add(amount)
            .ok_or_else(|| GroupSplitError::BalanceOverflow {
                participant: settlement.from.to_string(),
            })?;
        let to = after.entry(&settlement.to);
        *to = to
            .checked_sub(amount)
            .ok_or_else(|| GroupSplitError::BalanceOverflow {
                participant: settlement.to.to_string(),
            })?;
    }
    Ok(after)
}
