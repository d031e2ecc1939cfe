//! Dashboard TUI main loop.
//!
//! The loop is async: it draws, polls crossterm with a short timeout (the
//! tick doubles as the debounce clock), and drains a channel of completed
//! fetch events. Fetches run as spawned tasks; the state machines guard
//! against stale completions, so the loop applies whatever arrives and
//! redraws.

use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::sync::mpsc;

use mediadash_api::tmdb::{
    Category, CategoryWindows, DiscoverParams, LocalMediaApi, MediaKind, SearchParams, TmdbClient,
};
use mediadash_core::aggregate::{AggregateOptions, AggregateOutcome, aggregate};
use mediadash_core::card::{DetailCard, MediaCard};
use mediadash_core::dashboard::{FetchPlan, SearchPlan};
use mediadash_core::search::SuggestionRequest;

use super::state::{CursorMove, DashboardViewState, Focus};
use super::ui;
use crate::config::AppConfig;
use crate::source::DiscoverSource;

/// Crossterm poll timeout; also the debounce clock resolution.
const TICK: Duration = Duration::from_millis(50);

/// A completed fetch reported back to the event loop.
enum FetchEvent {
    /// One aggregation run finished.
    Browse {
        /// Generation the run was planned under.
        generation: u64,
        /// Whether the run extends the grid.
        append: bool,
        /// Run outcome or failure.
        result: Result<AggregateOutcome>,
    },
    /// A committed search finished.
    Search {
        /// Search generation the fetch was planned under.
        generation: u64,
        /// Result rows or failure.
        result: Result<Vec<MediaCard>>,
    },
    /// A suggestion fetch finished.
    Suggestions {
        /// Sequence number of the originating request.
        seq: u64,
        /// Suggestion rows or failure.
        result: Result<Vec<MediaCard>>,
    },
    /// A detail fetch finished.
    Details {
        /// Detail record or failure.
        result: Result<DetailCard>,
    },
}

/// Shared context for spawning fetch tasks.
struct FetchContext {
    client: Arc<TmdbClient>,
    tx: mpsc::UnboundedSender<FetchEvent>,
    windows: CategoryWindows,
    min_popularity: f64,
    options: AggregateOptions,
    suggestion_limit: usize,
    language: String,
}

impl FetchContext {
    /// Spawns one aggregation run for a browse plan.
    fn spawn_browse(&self, plan: FetchPlan) {
        let client = Arc::clone(&self.client);
        let tx = self.tx.clone();
        let windows = self.windows;
        let floor = self.min_popularity;
        let options = self.options;
        tokio::spawn(async move {
            let params = DiscoverParams::new(plan.category).windows(windows);
            let source = DiscoverSource::new(client, plan.kind, params);
            let result = aggregate(&source, plan.start_page, options, |card| {
                card.popularity >= floor
            })
            .await;
            let _ = tx.send(FetchEvent::Browse {
                generation: plan.generation,
                append: plan.append,
                result,
            });
        });
    }

    /// Spawns a committed-search fetch.
    fn spawn_search(&self, plan: SearchPlan) {
        let client = Arc::clone(&self.client);
        let tx = self.tx.clone();
        let language = self.language.clone();
        tokio::spawn(async move {
            let params = SearchParams::new(&plan.query).language(&language);
            let result = search_cards(&client, plan.kind, &params, None).await;
            let _ = tx.send(FetchEvent::Search {
                generation: plan.generation,
                result,
            });
        });
    }

    /// Spawns a suggestion fetch for a due debounce request.
    fn spawn_suggestions(&self, request: SuggestionRequest, kind: MediaKind) {
        let client = Arc::clone(&self.client);
        let tx = self.tx.clone();
        let language = self.language.clone();
        let limit = self.suggestion_limit;
        tokio::spawn(async move {
            let params = SearchParams::new(&request.query).language(&language);
            let result = search_cards(&client, kind, &params, Some(limit)).await;
            let _ = tx.send(FetchEvent::Suggestions {
                seq: request.seq,
                result,
            });
        });
    }

    /// Spawns a detail fetch for the selected row.
    fn spawn_details(&self, kind: MediaKind, id: u64) {
        let client = Arc::clone(&self.client);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = match kind {
                MediaKind::Movie => client
                    .movie_details(id)
                    .await
                    .map(|details| DetailCard::from(&details)),
                MediaKind::Tv => client
                    .tv_details(id)
                    .await
                    .map(|details| DetailCard::from(&details)),
            };
            let _ = tx.send(FetchEvent::Details { result });
        });
    }
}

/// Runs one search request and converts the rows, truncating to `limit`.
async fn search_cards(
    client: &TmdbClient,
    kind: MediaKind,
    params: &SearchParams,
    limit: Option<usize>,
) -> Result<Vec<MediaCard>> {
    let mut cards: Vec<MediaCard> = match kind {
        MediaKind::Movie => client
            .search_movies(params)
            .await?
            .results
            .iter()
            .map(MediaCard::from)
            .collect(),
        MediaKind::Tv => client
            .search_tv(params)
            .await?
            .results
            .iter()
            .map(MediaCard::from)
            .collect(),
    };
    if let Some(limit) = limit {
        cards.truncate(limit);
    }
    Ok(cards)
}

/// Runs the dashboard TUI until the user quits.
///
/// # Errors
///
/// Returns an error if terminal setup, drawing, or event handling fails.
pub async fn run_dashboard(
    client: Arc<TmdbClient>,
    config: &AppConfig,
    kind: MediaKind,
    category: Category,
) -> Result<()> {
    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    crossterm::execute!(stdout, EnterAlternateScreen)
        .context("failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("failed to create terminal")?;

    let (tx, rx) = mpsc::unbounded_channel();
    let ctx = FetchContext {
        client,
        tx,
        windows: config.windows,
        min_popularity: config.browse.min_popularity,
        options: AggregateOptions {
            min_results: config.browse.min_results,
            max_attempts: config.browse.max_page_advance,
        },
        suggestion_limit: config.browse.suggestion_limit,
        language: config.api.language.clone(),
    };

    let mut state =
        DashboardViewState::new(Duration::from_millis(config.browse.debounce_ms));
    let _ = state.dashboard.set_kind(kind);
    let _ = state.dashboard.set_category(category);
    let plan = state.dashboard.refresh();
    ctx.spawn_browse(plan);

    let result = run_event_loop(&mut terminal, &mut state, &ctx, rx).await;

    // Cleanup (always attempt even if event loop failed)
    disable_raw_mode().context("failed to disable raw mode")?;
    crossterm::execute!(io::stdout(), LeaveAlternateScreen)
        .context("failed to leave alternate screen")?;

    result
}

/// Main event loop.
async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    state: &mut DashboardViewState,
    ctx: &FetchContext,
    mut rx: mpsc::UnboundedReceiver<FetchEvent>,
) -> Result<()> {
    loop {
        terminal
            .draw(|frame| ui::draw(frame, state))
            .context("failed to draw TUI")?;

        while let Ok(fetch) = rx.try_recv() {
            apply_fetch_event(state, fetch);
        }

        if let Some(request) = state.search.poll(Instant::now()) {
            ctx.spawn_suggestions(request, state.dashboard.kind());
        }

        if event::poll(TICK).context("failed to poll events")?
            && let Event::Key(key) = event::read().context("failed to read event")?
            && key.kind == KeyEventKind::Press
        {
            let quit = match state.focus {
                Focus::Search => handle_search_input(state, ctx, key.code),
                Focus::Grid => handle_grid_input(state, ctx, key.code, key.modifiers),
            };
            if quit {
                return Ok(());
            }
        }
    }
}

/// Applies a completed fetch to the view state.
fn apply_fetch_event(state: &mut DashboardViewState, fetch: FetchEvent) {
    match fetch {
        FetchEvent::Browse {
            generation,
            append,
            result,
        } => match result {
            Ok(outcome) => {
                state.dashboard.apply_browse(generation, append, outcome);
                if !append {
                    state.reset_cursor();
                }
                state.clamp_cursor();
                state.set_status(format!("{} items", state.dashboard.displayed().len()));
            }
            Err(err) => {
                state.dashboard.browse_failed(generation);
                state.set_status(format!("Load failed: {err}"));
            }
        },
        FetchEvent::Search { generation, result } => match result {
            Ok(results) => {
                state.dashboard.apply_search(generation, results);
                state.reset_cursor();
                state.set_status(format!("{} results", state.dashboard.displayed().len()));
            }
            Err(err) => {
                state.dashboard.search_failed(generation);
                state.set_status(format!("Search failed: {err}"));
            }
        },
        FetchEvent::Suggestions { seq, result } => {
            state.clear_suggestion_cursor();
            match result {
                Ok(results) => state.search.apply(seq, results),
                // Failed suggestion fetches are silent: no suggestions shown
                Err(_) => state.search.apply_failure(seq),
            }
        }
        FetchEvent::Details { result } => {
            state.detail_loading = false;
            match result {
                Ok(card) => state.detail = Some(card),
                Err(err) => state.set_status(format!("Details failed: {err}")),
            }
        }
    }
}

/// Handles key input while the search box has focus. Returns `true` to quit.
fn handle_search_input(state: &mut DashboardViewState, ctx: &FetchContext, key: KeyCode) -> bool {
    match key {
        KeyCode::Esc => {
            state.search.dismiss();
            state.clear_suggestion_cursor();
            state.focus = Focus::Grid;
        }
        KeyCode::Up => state.suggestion_up(),
        KeyCode::Down => state.suggestion_down(),
        KeyCode::Enter => {
            // A highlighted suggestion replaces the typed text before the
            // commit, so the search runs for the picked title.
            if let Some(title) = state.selected_suggestion().map(|card| card.title.clone()) {
                state.search.on_input(&title, Instant::now());
            }
            state.clear_suggestion_cursor();
            if let Some(query) = state.search.submit() {
                let plan = state.dashboard.begin_search(query);
                ctx.spawn_search(plan);
                state.reset_cursor();
                state.focus = Focus::Grid;
            }
        }
        KeyCode::Backspace => {
            let mut text = state.search.query().to_string();
            text.pop();
            state.clear_suggestion_cursor();
            state.search.on_input(&text, Instant::now());
        }
        KeyCode::Char(c) => {
            let mut text = state.search.query().to_string();
            text.push(c);
            state.clear_suggestion_cursor();
            state.search.on_input(&text, Instant::now());
        }
        _ => {}
    }
    false
}

/// Handles key input while the grid has focus. Returns `true` to quit.
fn handle_grid_input(
    state: &mut DashboardViewState,
    ctx: &FetchContext,
    key: KeyCode,
    modifiers: KeyModifiers,
) -> bool {
    match key {
        KeyCode::Char('q') => return true,
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => return true,
        KeyCode::Esc => {
            if state.detail.is_some() {
                state.detail = None;
            } else if state.search.suggestions_visible() {
                state.search.dismiss();
                state.clear_suggestion_cursor();
            } else if !state.search.query().is_empty()
                || !state.dashboard.search_query().is_empty()
            {
                state.search.clear();
                state.dashboard.clear_search();
                state.clamp_cursor();
            }
        }
        KeyCode::Tab => {
            let next = match state.dashboard.kind() {
                MediaKind::Movie => MediaKind::Tv,
                MediaKind::Tv => MediaKind::Movie,
            };
            switch_kind(state, ctx, next);
        }
        KeyCode::Char('m') => switch_kind(state, ctx, MediaKind::Movie),
        KeyCode::Char('t') => switch_kind(state, ctx, MediaKind::Tv),
        KeyCode::Char('c') => {
            let plan = state.dashboard.cycle_category();
            ctx.spawn_browse(plan);
            state.reset_cursor();
        }
        KeyCode::Char('/') => {
            state.focus = Focus::Search;
        }
        KeyCode::Up | KeyCode::Char('k') => state.move_up(),
        KeyCode::Down | KeyCode::Char('j') => {
            if state.move_down() == CursorMove::NeedsMore
                && let Some(plan) = state.dashboard.load_more()
            {
                ctx.spawn_browse(plan);
            }
        }
        KeyCode::Enter => {
            if state.detail.is_none()
                && let Some(card) = state.current_card()
            {
                let (kind, id) = (card.kind, card.id);
                state.detail_loading = true;
                ctx.spawn_details(kind, id);
            }
        }
        _ => {}
    }
    false
}

/// Switches to `kind`, starting a reload when the tab actually changed.
fn switch_kind(state: &mut DashboardViewState, ctx: &FetchContext, kind: MediaKind) {
    if let Some(plan) = state.dashboard.set_kind(kind) {
        ctx.spawn_browse(plan);
        state.reset_cursor();
    }
}
