//! Dashboard TUI view state.
//!
//! Wraps the pure [`DashboardState`] and [`SearchSession`] cores with
//! purely visual concerns: grid cursor, input focus, detail overlay slot,
//! and the status line. No I/O happens here.

use std::time::Duration;

use mediadash_core::card::{DetailCard, MediaCard};
use mediadash_core::dashboard::DashboardState;
use mediadash_core::search::SearchSession;

/// Which surface receives key input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// Result grid navigation.
    Grid,
    /// Search box text entry.
    Search,
}

/// What happened after a cursor-down at the last row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorMove {
    /// The cursor moved (or stayed) within the grid.
    Within,
    /// The cursor hit the end and more pages are available.
    NeedsMore,
}

/// View state for the dashboard TUI.
#[derive(Debug)]
pub struct DashboardViewState {
    /// Browse/search state machine.
    pub dashboard: DashboardState,
    /// Debounced suggestion session.
    pub search: SearchSession,
    /// Active input surface.
    pub focus: Focus,
    /// Grid cursor row.
    pub cursor: usize,
    /// Highlighted suggestion row, when the dropdown is being navigated.
    pub suggestion_cursor: Option<usize>,
    /// Detail overlay content, when open.
    pub detail: Option<DetailCard>,
    /// Whether a detail fetch is in flight.
    pub detail_loading: bool,
    /// Status line text.
    pub status: String,
}

impl DashboardViewState {
    /// Creates a fresh view state with the given debounce delay.
    #[must_use]
    pub fn new(debounce: Duration) -> Self {
        Self {
            dashboard: DashboardState::new(),
            search: SearchSession::new(debounce),
            focus: Focus::Grid,
            cursor: 0,
            suggestion_cursor: None,
            detail: None,
            detail_loading: false,
            status: String::new(),
        }
    }

    /// Row currently under the cursor.
    #[must_use]
    pub fn current_card(&self) -> Option<&MediaCard> {
        self.dashboard.displayed().get(self.cursor)
    }

    /// Moves the cursor up one row.
    pub const fn move_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Moves the cursor down one row.
    ///
    /// Moving past the last row while more pages are available reports
    /// [`CursorMove::NeedsMore`] so the caller can start an append run.
    pub fn move_down(&mut self) -> CursorMove {
        let len = self.dashboard.displayed().len();
        if self.cursor.saturating_add(1) < len {
            self.cursor = self.cursor.saturating_add(1);
            CursorMove::Within
        } else if self.dashboard.has_more() {
            CursorMove::NeedsMore
        } else {
            CursorMove::Within
        }
    }

    /// Clamps the cursor after the displayed collection changed.
    pub fn clamp_cursor(&mut self) {
        let len = self.dashboard.displayed().len();
        if len == 0 {
            self.cursor = 0;
        } else if self.cursor >= len {
            self.cursor = len.saturating_sub(1);
        }
    }

    /// Resets the cursor to the top of the grid.
    pub const fn reset_cursor(&mut self) {
        self.cursor = 0;
    }

    /// Sets the status line.
    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
    }

    /// Moves the suggestion highlight down, entering the dropdown at the
    /// first row. Stays on the last row at the bottom.
    pub fn suggestion_down(&mut self) {
        let len = self.search.suggestions().len();
        if !self.search.suggestions_visible() || len == 0 {
            return;
        }
        self.suggestion_cursor = Some(match self.suggestion_cursor {
            None => 0,
            Some(row) => row.saturating_add(1).min(len.saturating_sub(1)),
        });
    }

    /// Moves the suggestion highlight up, leaving the dropdown past the
    /// first row.
    pub const fn suggestion_up(&mut self) {
        self.suggestion_cursor = match self.suggestion_cursor {
            None | Some(0) => None,
            Some(row) => Some(row.saturating_sub(1)),
        };
    }

    /// Suggestion row currently highlighted.
    #[must_use]
    pub fn selected_suggestion(&self) -> Option<&MediaCard> {
        self.suggestion_cursor
            .and_then(|row| self.search.suggestions().get(row))
    }

    /// Drops the suggestion highlight.
    pub const fn clear_suggestion_cursor(&mut self) {
        self.suggestion_cursor = None;
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use mediadash_api::tmdb::MediaKind;
    use mediadash_core::aggregate::AggregateOutcome;

    use super::*;

    fn make_card(id: u64) -> MediaCard {
        MediaCard {
            id,
            kind: MediaKind::Movie,
            title: format!("Title {id}"),
            date: None,
            overview: String::new(),
            popularity: 10.0,
            vote_average: 7.0,
            vote_count: 50,
            poster_path: None,
        }
    }

    fn state_with_rows(ids: &[u64], has_more: bool) -> DashboardViewState {
        let mut state = DashboardViewState::new(Duration::from_millis(300));
        let plan = state.dashboard.refresh();
        state.dashboard.apply_browse(
            plan.generation,
            plan.append,
            AggregateOutcome {
                items: ids.iter().copied().map(make_card).collect(),
                last_page: 1,
                has_more,
            },
        );
        state
    }

    #[test]
    fn test_cursor_moves_within_grid() {
        // Arrange
        let mut state = state_with_rows(&[1, 2, 3], false);

        // Act & Assert
        assert_eq!(state.move_down(), CursorMove::Within);
        assert_eq!(state.move_down(), CursorMove::Within);
        assert_eq!(state.cursor, 2);
        assert_eq!(state.current_card().unwrap().id, 3);

        // Last row without more pages: cursor pinned
        assert_eq!(state.move_down(), CursorMove::Within);
        assert_eq!(state.cursor, 2);

        state.move_up();
        assert_eq!(state.cursor, 1);
    }

    #[test]
    fn test_cursor_past_end_requests_more() {
        // Arrange
        let mut state = state_with_rows(&[1, 2], true);
        let _ = state.move_down();

        // Act & Assert: at the last row with pages remaining
        assert_eq!(state.move_down(), CursorMove::NeedsMore);
        assert_eq!(state.cursor, 1);
    }

    #[test]
    fn test_clamp_cursor_after_shrink() {
        // Arrange: cursor deep in the grid, then the view switches to a
        // shorter collection
        let mut state = state_with_rows(&[1, 2, 3, 4], false);
        state.cursor = 3;
        let search = state.dashboard.begin_search(String::from("x"));
        state.dashboard.apply_search(search.generation, vec![make_card(9)]);

        // Act
        state.clamp_cursor();

        // Assert
        assert_eq!(state.cursor, 0);
        assert_eq!(state.current_card().unwrap().id, 9);
    }

    #[test]
    fn test_move_up_at_top_stays() {
        // Arrange
        let mut state = state_with_rows(&[1], false);

        // Act
        state.move_up();

        // Assert
        assert_eq!(state.cursor, 0);
    }

    fn state_with_suggestions(ids: &[u64]) -> DashboardViewState {
        let mut state = DashboardViewState::new(Duration::from_millis(300));
        let t0 = std::time::Instant::now();
        state.search.on_input("ti", t0);
        let request = state.search.poll(t0 + Duration::from_millis(300)).unwrap();
        state
            .search
            .apply(request.seq, ids.iter().copied().map(make_card).collect());
        state
    }

    #[test]
    fn test_suggestion_cursor_enters_and_clamps() {
        // Arrange
        let mut state = state_with_suggestions(&[1, 2, 3]);
        assert_eq!(state.suggestion_cursor, None);

        // Act & Assert: down enters at the first row, then walks and clamps
        state.suggestion_down();
        assert_eq!(state.suggestion_cursor, Some(0));
        state.suggestion_down();
        state.suggestion_down();
        assert_eq!(state.suggestion_cursor, Some(2));
        state.suggestion_down();
        assert_eq!(state.suggestion_cursor, Some(2));
    }

    #[test]
    fn test_suggestion_cursor_up_leaves_dropdown() {
        // Arrange
        let mut state = state_with_suggestions(&[1, 2]);
        state.suggestion_down();
        state.suggestion_down();
        assert_eq!(state.suggestion_cursor, Some(1));

        // Act & Assert: up past the first row drops the highlight
        state.suggestion_up();
        assert_eq!(state.suggestion_cursor, Some(0));
        state.suggestion_up();
        assert_eq!(state.suggestion_cursor, None);
    }

    #[test]
    fn test_selected_suggestion_returns_highlighted_row() {
        // Arrange
        let mut state = state_with_suggestions(&[7, 8, 9]);
        state.suggestion_down();
        state.suggestion_down();

        // Act
        let selected = state.selected_suggestion();

        // Assert
        assert_eq!(selected.unwrap().id, 8);
    }

    #[test]
    fn test_suggestion_cursor_ignores_empty_dropdown() {
        // Arrange
        let mut state = DashboardViewState::new(Duration::from_millis(300));

        // Act
        state.suggestion_down();

        // Assert
        assert_eq!(state.suggestion_cursor, None);
        assert!(state.selected_suggestion().is_none());
    }
}
