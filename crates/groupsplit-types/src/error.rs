//! Error types for the GroupSplit settlement engine.
//!
//! All errors use the `GS_ERR_` prefix convention for easy grepping in logs.
//! Error codes are grouped by subsystem:
//! - 1xx: Expense record errors
//! - 2xx: Balance / conservation errors
//! - 3xx: Session ledger errors
//! - 9xx: General / internal errors
//!
//! An empty record list is never an error: it is the "no expenses yet"
//! state and yields empty balances and no settlements.

use thiserror::Error;

use crate::{ItemId, SessionId};

/// Central error enum for all GroupSplit operations.
#[derive(Debug, Error)]
pub enum GroupSplitError {
    // =================================================================
    // Record Errors (1xx)
    // =================================================================
    /// An expense record failed validation (zero amount, no sharers, ...).
    #[error("GS_ERR_100: Invalid record at index {index}: {reason}")]
    InvalidRecord { index: usize, reason: String },

    // =================================================================
    // Balance Errors (2xx)
    // =================================================================
    /// A balance accumulation left the `i64` range.
    #[error("GS_ERR_200: Balance overflow for participant {participant}")]
    BalanceOverflow { participant: String },

    /// Balances or settlements do not net out as required.
    #[error("GS_ERR_201: Conservation violation: {reason}")]
    ConservationViolation { reason: String },

    // =================================================================
    // Session Errors (3xx)
    // =================================================================
    /// The requested session does not exist in this group.
    #[error("GS_ERR_300: Session not found: {0}")]
    SessionNotFound(SessionId),

    /// The requested item does not exist in the session.
    #[error("GS_ERR_301: Item not found: {0}")]
    ItemNotFound(ItemId),

    /// The group already holds the maximum number of sessions.
    #[error("GS_ERR_302: Session limit reached ({max})")]
    SessionLimitReached { max: usize },

    /// The session already holds the maximum number of items.
    #[error("GS_ERR_303: Item limit reached ({max} per session)")]
    ItemLimitReached { max: usize },

    /// Session input failed validation (blank title, oversized split, ...).
    #[error("GS_ERR_304: Invalid session input: {reason}")]
    InvalidSession { reason: String },

    // =================================================================
    // General / Internal (9xx)
    // =================================================================
    /// Configuration error (invalid values, unparsable file).
    #[error("GS_ERR_900: Configuration error: {0}")]
    Configuration(String),

    /// Serialization / deserialization error.
    #[error("GS_ERR_901: Serialization error: {0}")]
    Serialization(String),

    /// The session store failed to load or save.
    #[error("GS_ERR_902: Storage error: {0}")]
    Storage(String),
}

impl GroupSplitError {
    /// Short user-facing message, suitable for a toast.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidRecord { reason, .. } => reason.clone(),
            Self::SessionLimitReached { max } => {
                format!("At most {max} sessions can be created")
            }
            Self::ItemLimitReached { max } => {
                format!("At most {max} items can be added per session")
            }
            Self::InvalidSession { reason } => reason.clone(),
            Self::SessionNotFound(_) => "Session no longer exists".to_string(),
            Self::ItemNotFound(_) => "Item no longer exists".to_string(),
            other => other.to_string(),
        }
    }
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, GroupSplitError>;

impl From<serde_json::Error> for GroupSplitError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
