//! Session and item records.

use chrono::{DateTime, Utc};
use groupsplit_types::{ExpenseRecord, GroupId, ItemId, SessionId};
use serde::{Deserialize, Serialize};

/// One expense item: a validated record plus its identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseItem {
    pub id: ItemId,
    #[serde(flatten)]
    pub record: ExpenseRecord,
    pub created_at: DateTime<Utc>,
}

impl ExpenseItem {
    #[must_use]
    pub fn new(record: ExpenseRecord) -> Self {
        Self {
            id: ItemId::new(),
            record,
            created_at: Utc::now(),
        }
    }
}

/// A named group of expenses settled together (e.g. "summer camp").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseSession {
    pub id: SessionId,
    pub group_id: GroupId,
    pub title: String,
    pub items: Vec<ExpenseItem>,
    pub created_at: DateTime<Utc>,
}

impl ExpenseSession {
    #[must_use]
    pub fn new(group_id: GroupId, title: impl Into<String>) -> Self {
        Self {
            id: SessionId::new(),
            group_id,
            title: title.into(),
            items: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// The session's records, in insertion order.
    #[must_use]
    pub fn records(&self) -> Vec<ExpenseRecord> {
        self.items.iter().map(|item| item.record.clone()).collect()
    }

    /// Sum of all item amounts.
    #[must_use]
    pub fn total_amount(&self) -> u128 {
        self.items
            .iter()
            .map(|item| u128::from(item.record.amount))
            .sum()
    }
}
