//! Greedy debt netting.
//!
//! Reduces a balance map to point-to-point transfers:
//!
//! 1. Split participants into creditors (`> 0`) and debtors (`< 0`); zero
//!    balances drop out.
//! 2. Pick the largest remaining creditor and the largest remaining debtor.
//!    Ties go to the participant seen first in the balance map.
//! 3. Transfer `min(credit, debt)` from the debtor to the creditor.
//! 4. Drop whichever side reached zero; repeat while both sides are non-empty.
//!
//! Each round retires at least one participant, so `N` non-zero
//! participants yield at most `N - 1` transfers. This is not the global
//! minimum (that problem is NP-hard), but it is reproducible.

use groupsplit_types::{Balances, ExpenseRecord, ParticipantId, Result, Settlement};

use crate::{balances::compute_balances, determinism::compute_settlement_root};

/// Compute the transfers that settle `records`.
///
/// Returns an empty list for empty input or when everyone is already even.
///
/// # Errors
/// Same as [`compute_balances`]: invalid records are rejected before any
/// netting happens.
pub fn compute_settlements(records: &[ExpenseRecord]) -> Result<Vec<Settlement>> {
    let balances = compute_balances(records)?;
    let settlements = settle_balances(&balances);

    // Callers recompute on every edit; the root is only hashed when debug
    // output is enabled.
    tracing::debug!(
        records = records.len(),
        participants = balances.len(),
        transfers = settlements.len(),
        residual = %balances.total(),
        settlement_root = hex::encode(compute_settlement_root(&settlements)),
        "Settlement computed"
    );

    Ok(settlements)
}

/// Greedy largest-creditor / largest-debtor matching over `balances`.
///
/// Never emits a zero amount or a self-transfer. If the balances do not sum
/// to zero (rounding slack), the leftover stays on one side unmatched.
#[must_use]
pub fn settle_balances(balances: &Balances) -> Vec<Settlement> {
    let mut creditors: Vec<(&ParticipantId, u64)> = balances
        .iter()
        .filter(|(_, b)| *b > 0)
        .map(|(id, b)| (id, b.unsigned_abs()))
        .collect();
    let mut debtors: Vec<(&ParticipantId, u64)> = balances
        .iter()
        .filter(|(_, b)| *b < 0)
        .map(|(id, b)| (id, b.unsigned_abs()))
        .collect();

    let mut settlements = Vec::with_capacity(creditors.len() + debtors.len());

    while let (Some(ci), Some(di)) = (largest(&creditors), largest(&debtors)) {
        let (creditor, credit) = creditors[ci];
        let (debtor, debt) = debtors[di];
        let amount = credit.min(debt);

        tracing::debug!(
            from = %debtor,
            to = %creditor,
            amount,
            "Transfer matched"
        );

        settlements.push(Settlement {
            from: debtor.clone(),
            to: creditor.clone(),
            amount,
        });

        creditors[ci].1 -= amount;
        debtors[di].1 -= amount;
        // `Vec::remove` keeps first-seen order for later tie-breaks.
        if creditors[ci].1 == 0 {
            creditors.remove(ci);
        }
        if debtors[di].1 == 0 {
            debtors.remove(di);
        }
    }

    if let Some((id, left)) = creditors.first().or(debtors.first()) {
        tracing::debug!(
            participant = %id,
            left,
            "Rounding slack left unmatched"
        );
    }

    settlements
}

/// Index of the largest remaining amount; the earliest entry wins ties.
fn largest(side: &[(&ParticipantId, u64)]) -> Option<usize> {
    let mut best: Option<(usize, u64)> = None;
    for (idx, &(_, amount)) in side.iter().enumerate() {
        if best.is_none_or(|(_, top)| amount > top) {
            best = Some((idx, amount));
        }
    }
    best.map(|(idx, _)| idx)
}
