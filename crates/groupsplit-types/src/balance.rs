//! Net balance tracking.
//!
//! Positive = the participant is owed money overall; negative = the
//! participant owes money overall. Entries keep first-seen order, which is
//! what makes netting tie-breaks reproducible.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::ParticipantId;

/// Participant → signed net amount, iterated in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<(ParticipantId, i64)>", into = "Vec<(ParticipantId, i64)>")]
pub struct Balances {
    entries: Vec<(ParticipantId, i64)>,
    index: HashMap<ParticipantId, usize>,
}

impl Balances {
    /// Create an empty balance map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mutable slot for `participant`, appended with zero on first sight.
    pub fn entry(&mut self, participant: &ParticipantId) -> &mut i64 {
        let idx = match self.index.get(participant) {
            Some(&idx) => idx,
            None => {
                let idx = self.entries.len();
                self.entries.push((participant.clone(), 0));
                self.index.insert(participant.clone(), idx);
                idx
            }
        };
        &mut self.entries[idx].1
    }

    /// Net balance of `participant`, `None` if never seen.
    #[must_use]
    pub fn get(&self, participant: &ParticipantId) -> Option<i64> {
        self.index.get(participant).map(|&idx| self.entries[idx].1)
    }

    /// Iterate `(participant, balance)` in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&ParticipantId, i64)> {
        self.entries.iter().map(|(id, balance)| (id, *balance))
    }

    /// Number of participants tracked (including zero balances).
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all balances. Zero when every record split evenly; otherwise
    /// off by the accumulated rounding slack.
    #[must_use]
    pub fn total(&self) -> i128 {
        self.entries.iter().map(|(_, b)| i128::from(*b)).sum()
    }

    /// Number of participants with a non-zero balance.
    #[must_use]
    pub fn non_zero_count(&self) -> usize {
        self.entries.iter().filter(|(_, b)| *b != 0).count()
    }

    /// Whether every participant is settled.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.entries.iter().all(|(_, b)| *b == 0)
    }
}

impl From<Vec<(ParticipantId, i64)>> for Balances {
    fn from(entries: Vec<(ParticipantId, i64)>) -> Self {
        let mut balances = Self::new();
        for (id, amount) in entries {
            *balances.entry(&id) += amount;
        }
        balances
    }
}

impl From<Balances> for Vec<(ParticipantId, i64)> {
    fn from(balances: Balances) -> Self {
        balances.entries
    }
}

impl FromIterator<(ParticipantId, i64)> for Balances {
    fn from_iter<T: IntoIterator<Item = (ParticipantId, i64)>>(iter: T) -> Self {
        Self::from(iter.into_iter().collect::<Vec<_>>())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pid(s: &str) -> ParticipantId {
        ParticipantId::from(s)
    }

    #[test]
    fn default_is_empty() {
        let balances = Balances::default();
        assert!(balances.is_empty());
        assert_eq!(balances.total(), 0);
        assert!(balances.is_settled());
    }

    #[test]
    fn keeps_first_seen_order() {
        let mut balances = Balances::new();
        *balances.entry(&pid("C")) -= 10;
        *balances.entry(&pid("A")) += 20;
        *balances.entry(&pid("C")) -= 10;
        *balances.entry(&pid("B")) += 0;

        let order: Vec<&str> = balances.iter().map(|(id, _)| id.as_str()).collect();
        assert_eq!(order, vec!["C", "A", "B"]);
        assert_eq!(balances.get(&pid("C")), Some(-20));
        assert_eq!(balances.get(&pid("Z")), None);
        assert_eq!(balances.non_zero_count(), 2);
        assert_eq!(balances.total(), 0);
    }

    #[test]
    fn from_iter_merges_duplicates() {
        let balances: Balances = [(pid("A"), 5), (pid("B"), -3), (pid("A"), -5)]
            .into_iter()
            .collect();
        assert_eq!(balances.len(), 2);
        assert_eq!(balances.get(&pid("A")), Some(0));
    }

    #[test]
    fn serde_keeps_order() {
        let balances: Balances = [(pid("B"), -7), (pid("A"), 7)].into_iter().collect();
        let json = serde_json::to_string(&balances).unwrap();
        assert_eq!(json, r#"[["B",-7],["A",7]]"#);
        let back: Balances = serde_json::from_str(&json).unwrap();
        assert_eq!(balances, back);
    }
}
