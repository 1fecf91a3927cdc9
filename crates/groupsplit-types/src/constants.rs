//! System-wide constants for GroupSplit.

/// Default maximum number of expense sessions per group.
pub const DEFAULT_MAX_SESSIONS: usize = 10;

/// Default maximum number of expense items per session.
pub const DEFAULT_MAX_ITEMS_PER_SESSION: usize = 20;

/// Default maximum number of sharers on a single expense item.
pub const DEFAULT_MAX_PARTICIPANTS: usize = 20;

