//! Dashboard browse/search state machine.
//!
//! [`DashboardState`] owns what the grid currently shows: the active media
//! kind, category, browse vs. search mode, accumulated items, and paging
//! position. It performs no I/O; every operation that needs data returns a
//! [`FetchPlan`] describing the fetch the caller must run, and completions
//! are fed back through `apply_*` methods. Each plan carries a generation
//! number; a completion whose generation no longer matches is dropped, so
//! a slow fetch for an abandoned tab can never clobber the current view.

use mediadash_api::tmdb::{Category, MediaKind};

use crate::aggregate::AggregateOutcome;
use crate::card::MediaCard;

/// What the grid is currently displaying.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    /// Category browsing for the active kind.
    Browsing,
    /// Committed search results.
    Searching,
}

/// Load activity for status display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadPhase {
    /// No fetch in flight.
    Idle,
    /// Fresh load replacing the grid.
    Initial,
    /// Load-more appending to the grid.
    More,
}

/// A browse fetch the caller must run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchPlan {
    /// Generation guarding the completion against view changes.
    pub generation: u64,
    /// Media kind to fetch.
    pub kind: MediaKind,
    /// Category to fetch.
    pub category: Category,
    /// First page of the aggregation run.
    pub start_page: u32,
    /// Whether results extend the grid instead of replacing it.
    pub append: bool,
}

/// A committed-search fetch the caller must run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPlan {
    /// Generation guarding the completion against newer searches.
    pub generation: u64,
    /// Media kind to search.
    pub kind: MediaKind,
    /// Committed query text.
    pub query: String,
}

/// Browse/search view state for one dashboard.
#[derive(Debug)]
pub struct DashboardState {
    kind: MediaKind,
    category: Category,
    mode: ViewMode,
    browse_items: Vec<MediaCard>,
    search_results: Vec<MediaCard>,
    search_query: String,
    current_page: u32,
    has_more: bool,
    phase: LoadPhase,
    generation: u64,
    search_generation: u64,
}

impl DashboardState {
    /// Creates a state showing popular movies with an empty grid.
    #[must_use]
    pub fn new() -> Self {
        Self {
            kind: MediaKind::Movie,
            category: Category::Popular,
            mode: ViewMode::Browsing,
            browse_items: Vec::new(),
            search_results: Vec::new(),
            search_query: String::new(),
            current_page: 0,
            has_more: false,
            phase: LoadPhase::Idle,
            generation: 0,
            search_generation: 0,
        }
    }

    /// Active media kind.
    #[must_use]
    pub fn kind(&self) -> MediaKind {
        self.kind
    }

    /// Active category.
    #[must_use]
    pub fn category(&self) -> Category {
        self.category
    }

    /// Current view mode.
    #[must_use]
    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    /// Current load activity.
    #[must_use]
    pub fn phase(&self) -> LoadPhase {
        self.phase
    }

    /// Whether more browse pages can be requested.
    #[must_use]
    pub fn has_more(&self) -> bool {
        self.mode == ViewMode::Browsing && self.has_more
    }

    /// Committed query text, empty outside search mode.
    #[must_use]
    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    /// Rows the grid should display for the current mode.
    #[must_use]
    pub fn displayed(&self) -> &[MediaCard] {
        match self.mode {
            ViewMode::Browsing => &self.browse_items,
            ViewMode::Searching => &self.search_results,
        }
    }

    /// Starts a fresh load of the active kind and category.
    ///
    /// Clears the grid, leaves search mode, and invalidates any browse
    /// fetch still in flight.
    pub fn refresh(&mut self) -> FetchPlan {
        self.mode = ViewMode::Browsing;
        self.browse_items.clear();
        self.current_page = 0;
        self.has_more = false;
        self.phase = LoadPhase::Initial;
        self.generation = self.generation.wrapping_add(1);
        FetchPlan {
            generation: self.generation,
            kind: self.kind,
            category: self.category,
            start_page: 1,
            append: false,
        }
    }

    /// Switches the media kind tab and reloads.
    ///
    /// The category is preserved across the switch. Selecting the already
    /// active kind while browsing is a no-op.
    pub fn set_kind(&mut self, kind: MediaKind) -> Option<FetchPlan> {
        if kind == self.kind && self.mode == ViewMode::Browsing {
            return None;
        }
        self.kind = kind;
        Some(self.refresh())
    }

    /// Switches the category tab and reloads.
    ///
    /// Selecting the already active category while browsing is a no-op.
    pub fn set_category(&mut self, category: Category) -> Option<FetchPlan> {
        if category == self.category && self.mode == ViewMode::Browsing {
            return None;
        }
        self.category = category;
        Some(self.refresh())
    }

    /// Advances to the next category in the fixed cycle and reloads.
    pub fn cycle_category(&mut self) -> FetchPlan {
        self.category = self.category.next();
        self.refresh()
    }

    /// Requests the next run of pages, appending to the grid.
    ///
    /// Returns `None` while searching, while a fetch is in flight, or
    /// when no pages remain.
    pub fn load_more(&mut self) -> Option<FetchPlan> {
        if self.mode != ViewMode::Browsing || self.phase != LoadPhase::Idle || !self.has_more {
            return None;
        }
        self.phase = LoadPhase::More;
        self.generation = self.generation.wrapping_add(1);
        Some(FetchPlan {
            generation: self.generation,
            kind: self.kind,
            category: self.category,
            start_page: self.current_page.saturating_add(1),
            append: true,
        })
    }

    /// Applies a completed browse fetch.
    ///
    /// Completions for a generation other than the latest are dropped.
    pub fn apply_browse(&mut self, generation: u64, append: bool, outcome: AggregateOutcome) {
        if generation != self.generation {
            tracing::debug!(generation, latest = self.generation, "dropping stale browse result");
            return;
        }
        if append {
            self.browse_items.extend(outcome.items);
        } else {
            self.browse_items = outcome.items;
        }
        self.current_page = outcome.last_page;
        self.has_more = outcome.has_more;
        self.phase = LoadPhase::Idle;
    }

    /// Records a failed browse fetch for the latest generation.
    ///
    /// The grid keeps whatever it already had; further load-more requests
    /// are suppressed until the next refresh.
    pub fn browse_failed(&mut self, generation: u64) {
        if generation != self.generation {
            return;
        }
        self.has_more = false;
        self.phase = LoadPhase::Idle;
    }

    /// Enters search mode for a committed query.
    pub fn begin_search(&mut self, query: String) -> SearchPlan {
        self.mode = ViewMode::Searching;
        self.search_results.clear();
        self.search_query.clone_from(&query);
        self.phase = LoadPhase::Initial;
        self.search_generation = self.search_generation.wrapping_add(1);
        SearchPlan {
            generation: self.search_generation,
            kind: self.kind,
            query,
        }
    }

    /// Applies completed search results.
    ///
    /// Results for a generation other than the latest search are dropped.
    pub fn apply_search(&mut self, generation: u64, results: Vec<MediaCard>) {
        if generation != self.search_generation {
            tracing::debug!(generation, latest = self.search_generation, "dropping stale search result");
            return;
        }
        if self.mode != ViewMode::Searching {
            return;
        }
        self.search_results = results;
        self.phase = LoadPhase::Idle;
    }

    /// Records a failed search fetch for the latest search generation.
    pub fn search_failed(&mut self, generation: u64) {
        if generation != self.search_generation {
            return;
        }
        if self.mode == ViewMode::Searching {
            self.phase = LoadPhase::Idle;
        }
    }

    /// Leaves search mode, restoring the previous browse grid.
    ///
    /// The browse items, paging position, and `has_more` flag survive a
    /// search round-trip, so no refetch is needed.
    pub fn clear_search(&mut self) {
        self.mode = ViewMode::Browsing;
        self.search_results.clear();
        self.search_query.clear();
        self.search_generation = self.search_generation.wrapping_add(1);
        if self.phase == LoadPhase::Initial {
            self.phase = LoadPhase::Idle;
        }
    }
}

impl Default for DashboardState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::indexing_slicing)]

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

    fn outcome(ids: &[u64], last_page: u32, has_more: bool) -> AggregateOutcome {
        AggregateOutcome {
            items: ids.iter().copied().map(make_card).collect(),
            last_page,
            has_more,
        }
    }

    #[test]
    fn test_refresh_plans_first_page() {
        // Arrange
        let mut state = DashboardState::new();

        // Act
        let plan = state.refresh();

        // Assert
        assert_eq!(plan.start_page, 1);
        assert!(!plan.append);
        assert_eq!(plan.kind, MediaKind::Movie);
        assert_eq!(plan.category, Category::Popular);
        assert_eq!(state.phase(), LoadPhase::Initial);
    }

    #[test]
    fn test_apply_browse_fills_grid() {
        // Arrange
        let mut state = DashboardState::new();
        let plan = state.refresh();

        // Act
        state.apply_browse(plan.generation, plan.append, outcome(&[1, 2, 3], 2, true));

        // Assert
        assert_eq!(state.displayed().len(), 3);
        assert!(state.has_more());
        assert_eq!(state.phase(), LoadPhase::Idle);
    }

    #[test]
    fn test_kind_switch_preserves_category() {
        // Arrange
        let mut state = DashboardState::new();
        let plan = state.set_category(Category::Upcoming).unwrap();
        state.apply_browse(plan.generation, plan.append, outcome(&[1], 1, false));

        // Act
        let plan = state.set_kind(MediaKind::Tv).unwrap();

        // Assert: category carried over, grid cleared for the reload
        assert_eq!(plan.kind, MediaKind::Tv);
        assert_eq!(plan.category, Category::Upcoming);
        assert!(state.displayed().is_empty());
    }

    #[test]
    fn test_reselecting_active_tab_is_noop() {
        // Arrange
        let mut state = DashboardState::new();
        let plan = state.refresh();
        state.apply_browse(plan.generation, plan.append, outcome(&[1, 2], 1, false));

        // Act & Assert: no reload, grid untouched
        assert!(state.set_kind(MediaKind::Movie).is_none());
        assert!(state.set_category(Category::Popular).is_none());
        assert_eq!(state.displayed().len(), 2);
    }

    #[test]
    fn test_stale_browse_completion_is_dropped() {
        // Arrange: a movie fetch is in flight when the user switches to TV
        let mut state = DashboardState::new();
        let movie_plan = state.refresh();
        let tv_plan = state.set_kind(MediaKind::Tv).unwrap();

        // Act: the abandoned movie fetch completes first
        state.apply_browse(movie_plan.generation, false, outcome(&[1, 2], 1, false));

        // Assert: nothing landed in the TV view
        assert!(state.displayed().is_empty());

        // The current fetch still applies
        state.apply_browse(tv_plan.generation, false, outcome(&[9], 1, false));
        assert_eq!(state.displayed().len(), 1);
        assert_eq!(state.displayed()[0].id, 9);
    }

    #[test]
    fn test_load_more_appends() {
        // Arrange
        let mut state = DashboardState::new();
        let plan = state.refresh();
        state.apply_browse(plan.generation, plan.append, outcome(&[1, 2], 3, true));

        // Act
        let more = state.load_more().unwrap();
        state.apply_browse(more.generation, more.append, outcome(&[3, 4], 5, false));

        // Assert: appended after the existing rows, starting past page 3
        assert_eq!(more.start_page, 4);
        assert!(more.append);
        let ids: Vec<u64> = state.displayed().iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
        assert!(!state.has_more());
    }

    #[test]
    fn test_load_more_blocked_while_loading_or_exhausted() {
        // Arrange
        let mut state = DashboardState::new();
        let plan = state.refresh();

        // Act & Assert: in-flight initial load blocks load-more
        assert!(state.load_more().is_none());

        // Exhausted feed blocks load-more
        state.apply_browse(plan.generation, plan.append, outcome(&[1], 1, false));
        assert!(state.load_more().is_none());
    }

    #[test]
    fn test_browse_failure_keeps_existing_rows() {
        // Arrange
        let mut state = DashboardState::new();
        let plan = state.refresh();
        state.apply_browse(plan.generation, plan.append, outcome(&[1, 2], 2, true));
        let more = state.load_more().unwrap();

        // Act
        state.browse_failed(more.generation);

        // Assert: rows survive, further paging is suppressed
        assert_eq!(state.displayed().len(), 2);
        assert!(!state.has_more());
        assert_eq!(state.phase(), LoadPhase::Idle);
    }

    #[test]
    fn test_search_roundtrip_restores_browse_grid() {
        // Arrange
        let mut state = DashboardState::new();
        let plan = state.refresh();
        state.apply_browse(plan.generation, plan.append, outcome(&[1, 2], 2, true));

        // Act: search, then leave search mode
        let search = state.begin_search(String::from("dune"));
        state.apply_search(search.generation, vec![make_card(42)]);
        assert_eq!(state.mode(), ViewMode::Searching);
        assert_eq!(state.displayed()[0].id, 42);
        state.clear_search();

        // Assert: browse grid and paging come back without a refetch
        assert_eq!(state.mode(), ViewMode::Browsing);
        let ids: Vec<u64> = state.displayed().iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 2]);
        assert!(state.has_more());
        assert!(state.search_query().is_empty());
    }

    #[test]
    fn test_stale_search_completion_is_dropped() {
        // Arrange: two searches in quick succession
        let mut state = DashboardState::new();
        let first = state.begin_search(String::from("du"));
        let second = state.begin_search(String::from("dune"));

        // Act: the older search completes last
        state.apply_search(second.generation, vec![make_card(1)]);
        state.apply_search(first.generation, vec![make_card(2), make_card(3)]);

        // Assert
        assert_eq!(state.displayed().len(), 1);
        assert_eq!(state.displayed()[0].id, 1);
    }

    #[test]
    fn test_search_completion_after_clear_is_dropped() {
        // Arrange: search abandoned before its fetch lands
        let mut state = DashboardState::new();
        let plan = state.refresh();
        state.apply_browse(plan.generation, plan.append, outcome(&[1], 1, false));
        let search = state.begin_search(String::from("dune"));
        state.clear_search();

        // Act
        state.apply_search(search.generation, vec![make_card(42)]);

        // Assert: still browsing, search rows discarded
        assert_eq!(state.mode(), ViewMode::Browsing);
        assert_eq!(state.displayed()[0].id, 1);
    }

    #[test]
    fn test_category_cycle_reloads() {
        // Arrange
        let mut state = DashboardState::new();

        // Act
        let plan = state.cycle_category();

        // Assert
        assert_eq!(plan.category, Category::Recent);
        assert_eq!(state.category(), Category::Recent);

        let plan = state.cycle_category();
        assert_eq!(plan.category, Category::Upcoming);
        let plan = state.cycle_category();
        assert_eq!(plan.category, Category::Popular);
    }

    #[test]
    fn test_search_plan_carries_active_kind() {
        // Arrange
        let mut state = DashboardState::new();
        let _ = state.set_kind(MediaKind::Tv);

        // Act
        let search = state.begin_search(String::from("dragon"));

        // Assert
        assert_eq!(search.kind, MediaKind::Tv);
        assert_eq!(search.query, "dragon");
    }
}
