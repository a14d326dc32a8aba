//! Fixed-length window of previously chosen states.

use crate::core_types::Severity;

/// The last `N` states of a chain, oldest first.
///
/// Histories are plain values. Advancing one returns a new window with the
/// oldest entry dropped; the old window is left untouched, so a step can be
/// computed in full before any state is committed.
///
/// # Example
/// ```
/// use weather_gen_core::{markov::History, Severity};
///
/// let history = History::new([Severity::Absent, Severity::Light]);
/// let advanced = history.advance(Severity::Moderate);
///
/// assert_eq!(advanced.states(), [Severity::Light, Severity::Moderate]);
/// assert_eq!(history.current(), Severity::Light);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct History<const N: usize> {
    states: [Severity; N],
}

impl<const N: usize> History<N> {
    #[must_use]
    pub const fn new(states: [Severity; N]) -> Self {
        Self { states }
    }

    /// Window filled with a single state.
    #[must_use]
    pub const fn filled(state: Severity) -> Self {
        Self { states: [state; N] }
    }

    /// Shift `next` in as the newest entry, dropping the oldest.
    #[must_use]
    pub fn advance(self, next: Severity) -> Self {
        let mut states = self.states;
        if let Some((_, rest)) = self.states.split_first() {
            states[..rest.len()].copy_from_slice(rest);
        }
        if let Some(newest) = states.last_mut() {
            *newest = next;
        }
        Self { states }
    }

    /// States oldest first
    pub const fn states(&self) -> [Severity; N] {
        self.states
    }

    pub fn latest(&self) -> Option<Severity> {
        self.states.last().copied()
    }
}

impl History<2> {
    /// The state before the current one.
    #[inline]
    pub const fn previous(&self) -> Severity {
        self.states[0]
    }

    /// The most recent state.
    #[inline]
    pub const fn current(&self) -> Severity {
        self.states[1]
    }
}

impl<const N: usize> Default for History<N> {
    fn default() -> Self {
        Self::filled(Severity::Absent)
    }
}
