//! Debounced search suggestions.
//!
//! Typing into the search box must not fire one request per keystroke.
//! [`SearchSession`] implements a trailing-edge debounce: every keystroke
//! re-arms a deadline, and only once the deadline passes without further
//! input does [`SearchSession::poll`] hand out a suggestion request. Each
//! request carries a sequence number; responses for any sequence other
//! than the latest are dropped, so a slow early response can never
//! overwrite the results of a later query.

use std::time::{Duration, Instant};

use crate::card::MediaCard;

/// Default quiet period before a suggestion request fires.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// A suggestion request due for dispatch.
///
/// The caller performs the fetch and reports back with the same `seq`
/// via [`SearchSession::apply`] or [`SearchSession::apply_failure`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionRequest {
    /// Sequence number guarding against stale responses.
    pub seq: u64,
    /// Query text at the time the deadline expired.
    pub query: String,
}

/// Debounce and stale-response bookkeeping for one search box.
///
/// The session never performs I/O and never reads the wall clock; the
/// caller passes `Instant`s into [`on_input`](Self::on_input) and
/// [`poll`](Self::poll), which keeps the timing fully deterministic
/// under test.
#[derive(Debug)]
pub struct SearchSession {
    query: String,
    delay: Duration,
    deadline: Option<Instant>,
    latest_seq: u64,
    suggestions: Vec<MediaCard>,
    visible: bool,
}

impl SearchSession {
    /// Creates a session with the given quiet period.
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self {
            query: String::new(),
            delay,
            deadline: None,
            latest_seq: 0,
            suggestions: Vec::new(),
            visible: false,
        }
    }

    /// Current query text.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Current suggestion rows, newest response first in feed order.
    #[must_use]
    pub fn suggestions(&self) -> &[MediaCard] {
        &self.suggestions
    }

    /// Whether the suggestion dropdown should be drawn.
    #[must_use]
    pub fn suggestions_visible(&self) -> bool {
        self.visible && !self.suggestions.is_empty()
    }

    /// Whether a deadline is armed and a request will fire once it passes.
    #[must_use]
    pub fn pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Records the query text after a keystroke at time `now`.
    ///
    /// A query with visible characters re-arms the deadline `delay` from
    /// `now`. Text that is empty or whitespace-only cancels any armed
    /// deadline, drops current suggestions, and invalidates in-flight
    /// responses.
    pub fn on_input(&mut self, text: &str, now: Instant) {
        self.query = text.to_string();
        if self.query.trim().is_empty() {
            self.deadline = None;
            self.suggestions.clear();
            self.visible = false;
            self.latest_seq = self.latest_seq.wrapping_add(1);
        } else {
            self.deadline = now.checked_add(self.delay);
            self.visible = true;
        }
    }

    /// Returns a due suggestion request, if the deadline has passed.
    ///
    /// Issuing a request bumps the sequence number, so any response still
    /// in flight for an earlier request becomes stale.
    pub fn poll(&mut self, now: Instant) -> Option<SuggestionRequest> {
        let deadline = self.deadline?;
        if now < deadline {
            return None;
        }
        self.deadline = None;
        self.latest_seq = self.latest_seq.wrapping_add(1);
        Some(SuggestionRequest {
            seq: self.latest_seq,
            query: self.query.clone(),
        })
    }

    /// Stores fetched suggestions if `seq` is still the latest request.
    ///
    /// Stale responses are dropped without touching current suggestions.
    pub fn apply(&mut self, seq: u64, results: Vec<MediaCard>) {
        if seq != self.latest_seq {
            tracing::debug!(seq, latest = self.latest_seq, "dropping stale suggestions");
            return;
        }
        self.suggestions = results;
    }

    /// Records a failed suggestion fetch.
    ///
    /// A failed fetch for the latest request clears the dropdown rather
    /// than leaving suggestions for an older query on screen.
    pub fn apply_failure(&mut self, seq: u64) {
        if seq != self.latest_seq {
            return;
        }
        self.suggestions.clear();
    }

    /// Hides the dropdown without clearing the query text.
    pub fn dismiss(&mut self) {
        self.visible = false;
    }

    /// Commits the current query for a full search.
    ///
    /// Cancels any armed deadline, invalidates in-flight suggestion
    /// responses, hides the dropdown, and returns the trimmed query.
    /// Returns `None` when the trimmed query is empty.
    pub fn submit(&mut self) -> Option<String> {
        let trimmed = self.query.trim();
        if trimmed.is_empty() {
            return None;
        }
        let committed = trimmed.to_string();
        self.deadline = None;
        self.latest_seq = self.latest_seq.wrapping_add(1);
        self.visible = false;
        Some(committed)
    }

    /// Resets the session to its initial state.
    pub fn clear(&mut self) {
        self.query.clear();
        self.deadline = None;
        self.suggestions.clear();
        self.visible = false;
        self.latest_seq = self.latest_seq.wrapping_add(1);
    }
}

impl Default for SearchSession {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}
