//! # groupsplit-types
//!
//! Shared types, errors, and configuration for the **GroupSplit** expense
//! settlement engine.
//!
//! This crate is the leaf dependency of the workspace; every other crate
//! depends on it. It defines:
//!
//! - **Identifiers**: [`ParticipantId`], [`GroupId`], [`SessionId`], [`ItemId`]
//! - **Expense model**: [`ExpenseRecord`], [`round_half_up_div`]
//! - **Balance model**: [`Balances`]
//! - **Settlement model**: [`Settlement`], [`apply_settlements`]
//! - **Configuration**: [`LedgerConfig`]
//! - **Errors**: [`GroupSplitError`] with `GS_ERR_` prefix codes
//! - **Constants**: default ledger caps

pub mod balance;
pub mod config;
pub mod constants;
pub mod error;
pub mod expense;
pub mod ids;
pub mod settlement;

// Re-export all primary types at crate root for ergonomic imports:
//   use groupsplit_types::{ExpenseRecord, Balances, Settlement, ...};

pub use balance::*;
pub use config::*;
pub use error::*;
pub use expense::*;
pub use ids::*;
pub use settlement::*;

// Constants are accessed via `groupsplit_types::constants::FOO`
// (not re-exported to avoid name collisions).
