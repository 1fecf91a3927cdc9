//! Net balance computation.
//!
//! For every record the payer is credited the full amount and every sharer
//! (the payer included, when listed) is debited the per-head share. The
//! share is rounded half up; the remainder is not redistributed.

use groupsplit_types::{Balances, ExpenseRecord, GroupSplitError, ParticipantId, Result};

/// Validate every record before any arithmetic happens.
///
/// # Errors
/// Returns the first [`GroupSplitError::InvalidRecord`] in list order.
pub fn validate_records(records: &[ExpenseRecord]) -> Result<()> {
    records
        .iter()
        .enumerate()
        .try_for_each(|(index, record)| record.validate(index))
}

/// Compute each participant's net balance over `records`.
///
/// Participants appear in first-seen order (payer before sharers, record by
/// record). A participant whose debits and credits cancel is kept with a
/// zero balance. An empty slice yields empty balances.
///
/// # Errors
/// - `InvalidRecord` if any record has a zero amount or no sharers; nothing
///   is computed in that case.
/// - `BalanceOverflow` if a running balance leaves the `i64` range.
pub fn compute_balances(records: &[ExpenseRecord]) -> Result<Balances> {
    validate_records(records)?;

    let mut balances = Balances::new();
    for (index, record) in records.iter().enumerate() {
        let amount = to_signed(record.amount, index)?;
        let share = record
            .per_head_share()
            .ok_or_else(|| GroupSplitError::InvalidRecord {
                index,
                reason: "at least one participant must share the cost".into(),
            })
            .and_then(|share| to_signed(share, index))?;

        adjust(&mut balances, &record.paid_by, amount)?;
        for sharer in &record.split_among {
            adjust(&mut balances, sharer, -share)?;
        }

        tracing::trace!(
            record = index,
            payer = %record.paid_by,
            amount = record.amount,
            sharers = record.split_among.len(),
            share,
            "Record applied"
        );
    }

    Ok(balances)
}

fn adjust(balances: &mut Balances, participant: &ParticipantId, delta: i64) -> Result<()> {
    let slot = balances.entry(participant);
    *slot = slot
        .checked_add(delta)
        .ok_or_else(|| GroupSplitError::BalanceOverflow {
            participant: participant.to_string(),
        })?;
    Ok(())
}

fn to_signed(value: u64, index: usize) -> Result<i64> {
    i64::try_from(value).map_err(|_| GroupSplitError::InvalidRecord {
        index,
        reason: format!("amount {value} exceeds the supported range"),
    })
}
