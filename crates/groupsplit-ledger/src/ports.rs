//! Injected collaborators: session storage and user notifications.

use std::{
    collections::HashMap,
    sync::{Mutex, PoisonError},
};

use groupsplit_types::{GroupId, GroupSplitError, Result};

use crate::ExpenseSession;

/// Loads and saves the full session list of a group.
pub trait SessionStore: Send + Sync {
    /// Sessions previously saved for `group_id`; empty if none.
    fn load(&self, group_id: &GroupId) -> Result<Vec<ExpenseSession>>;

    /// Replace the saved session list for `group_id`.
    fn save(&self, group_id: &GroupId, sessions: &[ExpenseSession]) -> Result<()>;
}

/// Delivers short user-facing messages.
pub trait Notifier: Send + Sync {
    fn success(&self, message: &str);

    fn error(&self, message: &str);
}

// ---------------------------------------------------------------------------
// MemoryStore
// ---------------------------------------------------------------------------

/// In-process store keeping one JSON document per group, the same shape a
/// browser key-value store would hold.
#[derive(Debug, Default)]
pub struct MemoryStore {
    documents: Mutex<HashMap<GroupId, String>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw stored document for `group_id`.
    #[must_use]
    pub fn document(&self, group_id: &GroupId) -> Option<String> {
        self.documents
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(group_id)
            .cloned()
    }

    /// Overwrite the raw document for `group_id` (for seeding and recovery).
    pub fn put_document(&self, group_id: &GroupId, document: impl Into<String>) {
        self.documents
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(group_id.clone(), document.into());
    }
}

impl SessionStore for MemoryStore {
    fn load(&self, group_id: &GroupId) -> Result<Vec<ExpenseSession>> {
        match self.document(group_id) {
            Some(json) => serde_json::from_str(&json).map_err(|e| {
                GroupSplitError::Storage(format!("corrupt document for {group_id}: {e}"))
            }),
            None => Ok(Vec::new()),
        }
    }

    fn save(&self, group_id: &GroupId, sessions: &[ExpenseSession]) -> Result<()> {
        let json = serde_json::to_string(sessions)?;
        self.put_document(group_id, json);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Notifiers
// ---------------------------------------------------------------------------

/// Notifier that writes every message to the tracing log.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn success(&self, message: &str) {
        tracing::info!(notice = message, "success");
    }

    fn error(&self, message: &str) {
        tracing::warn!(notice = message, "error");
    }
}

/// A captured notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Error(String),
}

/// Notifier that keeps every message, in order.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All notices so far.
    #[must_use]
    pub fn notices(&self) -> Vec<Notice> {
        self.notices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// The most recent notice, if any.
    #[must_use]
    pub fn last(&self) -> Option<Notice> {
        self.notices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }

    fn push(&self, notice: Notice) {
        self.notices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notice);
    }
}

impl Notifier for RecordingNotifier {
    fn success(&self, message: &str) {
        self.push(Notice::Success(message.to_string()));
    }

    fn error(&self, message: &str) {
        self.push(Notice::Error(message.to_string()));
    }
}

impl<T: Notifier + ?Sized> Notifier for &T {
    fn success(&self, message: &str) {
        (**self).success(message);
    }

    fn error(&self, message: &str) {
        (**self).error(message);
    }
}

impl<T: SessionStore + ?Sized> SessionStore for &T {
    fn load(&self, group_id: &GroupId) -> Result<Vec<ExpenseSession>> {
        (**self).load(group_id)
    }

    fn save(&self, group_id: &GroupId, sessions: &[ExpenseSession]) -> Result<()> {
        (**self).save(group_id, sessions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_store_loads_nothing() {
        let store = MemoryStore::new();
        assert!(store.load(&GroupId::new("g")).unwrap().is_empty());
    }

    #[test]
    fn save_then_load() {
        let store = MemoryStore::new();
        let group = GroupId::new("g");
        let sessions = vec![ExpenseSession::new(group.clone(), "camp")];
        store.save(&group, &sessions).unwrap();
        assert_eq!(store.load(&group).unwrap(), sessions);
        assert!(store.load(&GroupId::new("other")).unwrap().is_empty());
    }

    #[test]
    fn corrupt_document_is_storage_error() {
        let store = MemoryStore::new();
        let group = GroupId::new("g");
        store.put_document(&group, "{broken");
        assert!(matches!(
            store.load(&group),
            Err(GroupSplitError::Storage(_))
        ));
    }

    #[test]
    fn recording_notifier_keeps_order() {
        let notifier = RecordingNotifier::new();
        notifier.success("a");
        notifier.error("b");
        assert_eq!(
            notifier.notices(),
            vec![Notice::Success("a".into()), Notice::Error("b".into())]
        );
        assert_eq!(notifier.last(), Some(Notice::Error("b".into())));
    }
}
