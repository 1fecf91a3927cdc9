//! # groupsplit-engine
//!
//! **Pure deterministic settlement engine for GroupSplit.**
//!
//! The engine takes a snapshot of expense records and produces per-participant
//! net balances plus a short list of point-to-point transfers that zero them
//! out. It has:
//!
//! - **Zero side effects**: no storage, no notifications, no held state
//! - **Deterministic output**: same records in the same order -> same transfers
//! - **Fail-fast validation**: an invalid record rejects the whole call
//!
//! ```text
//! compute_balances(&[ExpenseRecord])    -> Balances
//! compute_settlements(&[ExpenseRecord]) -> Vec<Settlement>
//! ```

pub mod balances;
pub mod conservation;
pub mod determinism;
pub mod netting;

pub use balances::{compute_balances, validate_records};
pub use conservation::{Conservation, verify_settlements};
pub use determinism::{compute_settlement_root, verify_settlement_root};
pub use netting::{compute_settlements, settle_balances};
