//! Configuration for the session ledger.
//!
//! The engine itself has no knobs; only the ledger's caps are configurable.

use serde::{Deserialize, Serialize};

use crate::{GroupSplitError, Result, constants};

/// Per-group caps enforced by the session ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// Maximum number of sessions a group may hold.
    pub max_sessions: usize,
    /// Maximum number of expense items per session.
    pub max_items_per_session: usize,
    /// Maximum number of sharers on one expense item.
    pub max_participants: usize,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            max_sessions: constants::DEFAULT_MAX_SESSIONS,
            max_items_per_session: constants::DEFAULT_MAX_ITEMS_PER_SESSION,
            max_participants: constants::DEFAULT_MAX_PARTICIPANTS,
        }
    }
}

impl LedgerConfig {
    /// Parse a JSON config document. Missing fields take their defaults.
    ///
    /// # Errors
    /// Returns [`GroupSplitError::Configuration`] on malformed JSON or
    /// invalid values.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| GroupSplitError::Configuration(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Every cap must be at least one.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("max_sessions", self.max_sessions),
            ("max_items_per_session", self.max_items_per_session),
            ("max_participants", self.max_participants),
        ] {
            if value == 0 {
                return Err(GroupSplitError::Configuration(format!(
                    "{name} must be greater than zero"
                )));
            }
        }
        Ok(())
    }
}
