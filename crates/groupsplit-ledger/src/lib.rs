//! # groupsplit-ledger
//!
//! Expense sessions for a dance group: named lists of expense items with
//! per-session settlement.
//!
//! ## Architecture
//!
//! A [`SessionBook`] owns the in-memory sessions of one group and talks to
//! two injected ports:
//! 1. [`SessionStore`]: load and save the group's session list
//! 2. [`Notifier`]: report success / failure messages to the user
//!
//! Every mutation validates first, saves through the store, and only then
//! commits in memory, so a failed save leaves the book unchanged.
//! Balances and settlements are delegated to `groupsplit-engine` over the
//! session's records in insertion order.

pub mod book;
pub mod ports;
pub mod session;

pub use book::SessionBook;
pub use ports::{MemoryStore, Notice, Notifier, RecordingNotifier, SessionStore, TracingNotifier};
pub use session::{ExpenseItem, ExpenseSession};
