//! Search triggers and outcomes.

use crate::client::FailureKind;

/// What started a search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Trigger {
    /// Explicit submission of the current input.
    Submit,
    /// Click on a history shortcut; replaces the input first.
    History(String),
    /// Debounced search after the input went quiet.
    Auto,
}

impl Trigger {
    #[must_use]
    pub fn is_auto(&self) -> bool {
        matches!(self, Self::Auto)
    }
}

/// How a search resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// The profile was rendered and recorded in the history.
    Found {
        /// Identifier as typed, trimmed.
        identifier: String,
        /// Number of repositories rendered.
        repositories: usize,
    },

    /// The trimmed input was blank; no request was made.
    EmptyInput,

    /// An automatic search was not allowed to start.
    Suppressed,

    /// The profile request failed.
    Failed(FailureKind),
}
