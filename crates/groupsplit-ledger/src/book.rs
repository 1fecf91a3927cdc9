//! The per-group session book.
//!
//! Mutations follow one pattern:
//! 1. Validate the request against the current sessions and the caps
//! 2. Build the next session list
//! 3. Save it through the store
//! 4. Commit in memory and notify success
//!
//! Any failure notifies an error and leaves both the store and the book
//! untouched.

use groupsplit_engine::{compute_balances, compute_settlements};
use groupsplit_types::{
    Balances, ExpenseRecord, GroupId, GroupSplitError, ItemId, LedgerConfig, Result, SessionId,
    Settlement,
};

use crate::{ExpenseItem, ExpenseSession, Notifier, SessionStore};

/// Sessions of one group, backed by a [`SessionStore`] and reporting
/// through a [`Notifier`].
pub struct SessionBook<S, N> {
    group_id: GroupId,
    config: LedgerConfig,
    store: S,
    notifier: N,
    sessions: Vec<ExpenseSession>,
}

impl<S: SessionStore, N: Notifier> SessionBook<S, N> {
    /// Load the group's sessions from `store`.
    ///
    /// # Errors
    /// - `Configuration` if `config` has a zero cap
    /// - `Storage` if the stored document cannot be read
    pub fn open(group_id: GroupId, store: S, notifier: N, config: LedgerConfig) -> Result<Self> {
        config.validate()?;
        let sessions = store.load(&group_id)?;
        tracing::debug!(
            group = %group_id,
            sessions = sessions.len(),
            "Session book opened"
        );
        Ok(Self {
            group_id,
            config,
            store,
            notifier,
            sessions,
        })
    }

    #[must_use]
    pub fn group_id(&self) -> &GroupId {
        &self.group_id
    }

    #[must_use]
    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    /// All sessions, oldest first.
    #[must_use]
    pub fn sessions(&self) -> &[ExpenseSession] {
        &self.sessions
    }

    #[must_use]
    pub fn session(&self, session_id: SessionId) -> Option<&ExpenseSession> {
        self.sessions.iter().find(|s| s.id == session_id)
    }

    /// Whether another session fits under the cap.
    #[must_use]
    pub fn can_create_session(&self) -> bool {
        self.sessions.len() < self.config.max_sessions
    }

    /// Whether another item fits in `session_id`. `false` for unknown sessions.
    #[must_use]
    pub fn can_add_item(&self, session_id: SessionId) -> bool {
        self.session(session_id)
            .is_some_and(|s| s.items.len() < self.config.max_items_per_session)
    }

    // -----------------------------------------------------------------
    // Mutations
    // -----------------------------------------------------------------

    /// Create an empty session titled `title` (trimmed).
    ///
    /// # Errors
    /// `InvalidSession` for a blank title, `SessionLimitReached` at the cap,
    /// or the store's error.
    pub fn create_session(&mut self, title: &str) -> Result<SessionId> {
        let result = self.try_create_session(title);
        self.report(result, |_| format!("\"{}\" session created", title.trim()))
    }

    fn try_create_session(&mut self, title: &str) -> Result<SessionId> {
        let title = title.trim();
        if title.is_empty() {
            return Err(GroupSplitError::InvalidSession {
                reason: "Enter a session name".into(),
            });
        }
        if !self.can_create_session() {
            return Err(GroupSplitError::SessionLimitReached {
                max: self.config.max_sessions,
            });
        }

        let session = ExpenseSession::new(self.group_id.clone(), title);
        let id = session.id;
        let mut next = self.sessions.clone();
        next.push(session);
        self.commit(next)?;

        tracing::info!(group = %self.group_id, session = %id, title, "Session created");
        Ok(id)
    }

    /// Append `record` to a session.
    ///
    /// The description is trimmed and must be non-blank; the record must
    /// pass engine validation and stay within the sharer cap.
    ///
    /// # Errors
    /// `SessionNotFound`, `InvalidRecord`, `InvalidSession`,
    /// `ItemLimitReached`, or the store's error.
    pub fn add_item(&mut self, session_id: SessionId, record: ExpenseRecord) -> Result<ItemId> {
        let description = record.description.trim().to_string();
        let result = self.try_add_item(session_id, record);
        self.report(result, |_| format!("\"{description}\" item added"))
    }

    fn try_add_item(&mut self, session_id: SessionId, mut record: ExpenseRecord) -> Result<ItemId> {
        let pos = self.position(session_id)?;
        let index = self.sessions[pos].items.len();

        record.description = record.description.trim().to_string();
        if record.description.is_empty() {
            return Err(GroupSplitError::InvalidSession {
                reason: "Enter an item description".into(),
            });
        }
        if record.paid_by.as_str().trim().is_empty() {
            return Err(GroupSplitError::InvalidSession {
                reason: "Select who paid".into(),
            });
        }
        record.validate(index)?;
        if record.split_among.len() > self.config.max_participants {
            return Err(GroupSplitError::InvalidSession {
                reason: format!(
                    "At most {} participants can share one item",
                    self.config.max_participants
                ),
            });
        }
        if index >= self.config.max_items_per_session {
            return Err(GroupSplitError::ItemLimitReached {
                max: self.config.max_items_per_session,
            });
        }

        let item = ExpenseItem::new(record);
        let id = item.id;
        let mut next = self.sessions.clone();
        next[pos].items.push(item);
        self.commit(next)?;

        tracing::info!(session = %session_id, item = %id, "Item added");
        Ok(id)
    }

    /// Remove one item from a session.
    ///
    /// # Errors
    /// `SessionNotFound`, `ItemNotFound`, or the store's error.
    pub fn remove_item(&mut self, session_id: SessionId, item_id: ItemId) -> Result<()> {
        let result = self.try_remove_item(session_id, item_id);
        self.report(result, |_| "Item deleted".to_string())
    }

    fn try_remove_item(&mut self, session_id: SessionId, item_id: ItemId) -> Result<()> {
        let pos = self.position(session_id)?;
        let item_pos = self.sessions[pos]
            .items
            .iter()
            .position(|item| item.id == item_id)
            .ok_or(GroupSplitError::ItemNotFound(item_id))?;

        let mut next = self.sessions.clone();
        next[pos].items.remove(item_pos);
        self.commit(next)?;

        tracing::info!(session = %session_id, item = %item_id, "Item removed");
        Ok(())
    }

    /// Delete a session and all its items.
    ///
    /// # Errors
    /// `SessionNotFound` or the store's error.
    pub fn delete_session(&mut self, session_id: SessionId) -> Result<()> {
        let result = self.try_delete_session(session_id);
        self.report(result, |title| format!("\"{title}\" session deleted"))
            .map(|_| ())
    }

    fn try_delete_session(&mut self, session_id: SessionId) -> Result<String> {
        let pos = self.position(session_id)?;
        let mut next = self.sessions.clone();
        let removed = next.remove(pos);
        self.commit(next)?;

        tracing::info!(group = %self.group_id, session = %session_id, "Session deleted");
        Ok(removed.title)
    }

    // -----------------------------------------------------------------
    // Derived views
    // -----------------------------------------------------------------

    /// Net balances of a session's participants.
    ///
    /// # Errors
    /// `SessionNotFound`, or an engine error for a stored record that no
    /// longer validates.
    pub fn balances(&self, session_id: SessionId) -> Result<Balances> {
        let session = self.lookup(session_id)?;
        compute_balances(&session.records())
    }

    /// Transfers that settle a session. Empty when everyone is even.
    ///
    /// # Errors
    /// Same as [`Self::balances`].
    pub fn settlements(&self, session_id: SessionId) -> Result<Vec<Settlement>> {
        let session = self.lookup(session_id)?;
        compute_settlements(&session.records())
    }

    // -----------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------

    fn position(&self, session_id: SessionId) -> Result<usize> {
        self.sessions
            .iter()
            .position(|s| s.id == session_id)
            .ok_or(GroupSplitError::SessionNotFound(session_id))
    }

    fn lookup(&self, session_id: SessionId) -> Result<&ExpenseSession> {
        self.session(session_id)
            .ok_or(GroupSplitError::SessionNotFound(session_id))
    }

    /// Save first; only a successful save replaces the in-memory list.
    fn commit(&mut self, next: Vec<ExpenseSession>) -> Result<()> {
        self.store.save(&self.group_id, &next)?;
        self.sessions = next;
        Ok(())
    }

    fn report<T>(&self, result: Result<T>, success: impl FnOnce(&T) -> String) -> Result<T> {
        match &result {
            Ok(value) => self.notifier.success(&success(value)),
            Err(err) => {
                tracing::warn!(group = %self.group_id, error = %err, "Session operation rejected");
                self.notifier.error(&err.user_message());
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MemoryStore, Notice, RecordingNotifier};

    fn book(config: LedgerConfig) -> SessionBook<MemoryStore, RecordingNotifier> {
        SessionBook::open(
            GroupId::new("crew"),
            MemoryStore::new(),
            RecordingNotifier::new(),
            config,
        )
        .unwrap()
    }

    #[test]
    fn create_trims_title_and_notifies() {
        let mut b = book(LedgerConfig::default());
        let id = b.create_session("  summer camp ").unwrap();
        assert_eq!(b.session(id).unwrap().title, "summer camp");
        assert_eq!(
            b.notifier.last(),
            Some(Notice::Success("\"summer camp\" session created".into()))
        );
    }

    #[test]
    fn blank_title_rejected() {
        let mut b = book(LedgerConfig::default());
        let err = b.create_session("   ").unwrap_err();
        assert!(matches!(err, GroupSplitError::InvalidSession { .. }));
        assert!(b.sessions().is_empty());
        assert_eq!(
            b.notifier.last(),
            Some(Notice::Error("Enter a session name".into()))
        );
    }

    #[test]
    fn session_cap_enforced() {
        let mut b = book(LedgerConfig {
            max_sessions: 2,
            ..LedgerConfig::default()
        });
        b.create_session("one").unwrap();
        b.create_session("two").unwrap();
        assert!(!b.can_create_session());
        let err = b.create_session("three").unwrap_err();
        assert!(matches!(err, GroupSplitError::SessionLimitReached { max: 2 }));
        assert_eq!(b.sessions().len(), 2);
    }

    #[test]
    fn item_cap_enforced() {
        let mut b = book(LedgerConfig {
            max_items_per_session: 1,
            ..LedgerConfig::default()
        });
        let s = b.create_session("camp").unwrap();
        assert!(b.can_add_item(s));
        b.add_item(s, ExpenseRecord::dummy(100, "A", &["B"])).unwrap();
        assert!(!b.can_add_item(s));
        let err = b
            .add_item(s, ExpenseRecord::dummy(100, "A", &["B"]))
            .unwrap_err();
        assert!(matches!(err, GroupSplitError::ItemLimitReached { max: 1 }));
    }

    #[test]
    fn invalid_items_rejected() {
        let mut b = book(LedgerConfig {
            max_participants: 2,
            ..LedgerConfig::default()
        });
        let s = b.create_session("camp").unwrap();

        let blank = ExpenseRecord::new("  ", 100, "A", ["B"]);
        assert!(matches!(
            b.add_item(s, blank),
            Err(GroupSplitError::InvalidSession { .. })
        ));
        let no_payer = ExpenseRecord::new("water", 100, "", ["B"]);
        assert!(b.add_item(s, no_payer).is_err());
        let zero = ExpenseRecord::dummy(0, "A", &["B"]);
        assert!(matches!(
            b.add_item(s, zero),
            Err(GroupSplitError::InvalidRecord { .. })
        ));
        let crowd = ExpenseRecord::dummy(300, "A", &["A", "B", "C"]);
        assert!(b.add_item(s, crowd).is_err());

        assert!(b.session(s).unwrap().items.is_empty());
    }

    #[test]
    fn unknown_session_and_item() {
        let mut b = book(LedgerConfig::default());
        let ghost = SessionId::new();
        assert!(!b.can_add_item(ghost));
        assert!(matches!(
            b.add_item(ghost, ExpenseRecord::dummy(1, "A", &["A"])),
            Err(GroupSplitError::SessionNotFound(_))
        ));
        assert!(matches!(
            b.delete_session(ghost),
            Err(GroupSplitError::SessionNotFound(_))
        ));
        let s = b.create_session("camp").unwrap();
        assert!(matches!(
            b.remove_item(s, ItemId::new()),
            Err(GroupSplitError::ItemNotFound(_))
        ));
        assert!(matches!(
            b.settlements(ghost),
            Err(GroupSplitError::SessionNotFound(_))
        ));
    }

    #[test]
    fn remove_and_delete() {
        let mut b = book(LedgerConfig::default());
        let s = b.create_session("camp").unwrap();
        let item = b
            .add_item(s, ExpenseRecord::dummy(100, "A", &["B"]))
            .unwrap();
        b.remove_item(s, item).unwrap();
        assert!(b.session(s).unwrap().items.is_empty());

        b.delete_session(s).unwrap();
        assert!(b.session(s).is_none());
        assert_eq!(
            b.notifier.last(),
            Some(Notice::Success("\"camp\" session deleted".into()))
        );
    }

    #[test]
    fn settlements_follow_items() {
        let mut b = book(LedgerConfig::default());
        let s = b.create_session("camp").unwrap();
        assert!(b.settlements(s).unwrap().is_empty());

        b.add_item(s, ExpenseRecord::dummy(30_000, "A", &["A", "B", "C"]))
            .unwrap();
        let transfers = b.settlements(s).unwrap();
        assert_eq!(transfers.len(), 2);
        assert_eq!(transfers[0].to_string(), "B -> A: 10000");
        assert_eq!(b.balances(s).unwrap().total(), 0);
    }
}
