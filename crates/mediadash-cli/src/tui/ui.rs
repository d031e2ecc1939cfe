//! TUI rendering logic for the dashboard.

use mediadash_api::tmdb::{Category, ImageSize, MediaKind, format_date, format_rating, image_url};
use mediadash_core::dashboard::{LoadPhase, ViewMode};
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Block, Borders, Clear, List, ListItem, ListState, Paragraph, Row, Table, TableState, Wrap,
};

use super::state::{DashboardViewState, Focus};

/// Draws the dashboard UI.
#[allow(clippy::indexing_slicing)]
pub fn draw(frame: &mut Frame, state: &DashboardViewState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // header: tabs + category + search
            Constraint::Min(5),    // result grid
            Constraint::Length(3), // footer
        ])
        .split(frame.area());

    draw_header(frame, chunks[0], state);
    draw_grid(frame, chunks[1], state);
    draw_footer(frame, chunks[2], state);

    if state.search.suggestions_visible() {
        draw_suggestions(frame, chunks[0], state);
    }

    if state.detail.is_some() || state.detail_loading {
        draw_detail_overlay(frame, state);
    }
}

/// Draws the header: kind tabs, category, and the search box.
#[allow(clippy::indexing_slicing)]
fn draw_header(frame: &mut Frame, area: Rect, state: &DashboardViewState) {
    let header_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    let tab_spans = |kind: MediaKind, label: &str| {
        if state.dashboard.kind() == kind {
            Span::styled(
                format!(" {label} "),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            Span::raw(format!(" {label} "))
        }
    };

    let category_spans: Vec<Span> = [Category::Popular, Category::Recent, Category::Upcoming]
        .iter()
        .map(|&cat| {
            if state.dashboard.category() == cat {
                Span::styled(
                    format!(" {cat} "),
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                Span::raw(format!(" {cat} "))
            }
        })
        .collect();

    let mut spans = vec![
        tab_spans(MediaKind::Movie, "Movies"),
        tab_spans(MediaKind::Tv, "TV"),
        Span::raw(" \u{2502} "),
    ];
    spans.extend(category_spans);

    let tabs = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL).title(" mediadash "));
    frame.render_widget(tabs, header_chunks[0]);

    let search_style = if state.focus == Focus::Search {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let search = Paragraph::new(state.search.query().to_string())
        .style(search_style)
        .block(Block::default().borders(Borders::ALL).title(" Search: / "));
    frame.render_widget(search, header_chunks[1]);
}

/// Draws the result grid table.
fn draw_grid(frame: &mut Frame, area: Rect, state: &DashboardViewState) {
    let rows: Vec<Row> = state
        .dashboard
        .displayed()
        .iter()
        .map(|card| {
            Row::new(vec![
                card.title.clone(),
                card.date
                    .as_deref()
                    .map_or_else(|| String::from("N/A"), format_date),
                format_rating(card.vote_average),
                format!("{:.0}", card.popularity),
            ])
        })
        .collect();

    let title = match state.dashboard.mode() {
        ViewMode::Searching => format!(" Results for \"{}\" ", state.dashboard.search_query()),
        ViewMode::Browsing => format!(
            " {} / {} ",
            state.dashboard.kind(),
            state.dashboard.category()
        ),
    };

    if rows.is_empty() {
        let placeholder = match state.dashboard.phase() {
            LoadPhase::Idle => "No data",
            LoadPhase::Initial | LoadPhase::More => "Loading...",
        };
        let empty = Paragraph::new(placeholder)
            .block(Block::default().borders(Borders::ALL).title(title));
        frame.render_widget(empty, area);
        return;
    }

    let table = Table::new(
        rows,
        [
            Constraint::Percentage(50),
            Constraint::Percentage(22),
            Constraint::Percentage(12),
            Constraint::Percentage(16),
        ],
    )
    .header(
        Row::new(vec!["Title", "Date", "Rating", "Popularity"])
            .style(Style::default().add_modifier(Modifier::BOLD)),
    )
    .row_highlight_style(
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )
    .highlight_symbol("\u{25b8} ")
    .block(Block::default().borders(Borders::ALL).title(title));

    let mut table_state = TableState::default().with_selected(Some(state.cursor));
    frame.render_stateful_widget(table, area, &mut table_state);
}

/// Draws the suggestion dropdown under the search box.
#[allow(clippy::indexing_slicing)]
fn draw_suggestions(frame: &mut Frame, header_area: Rect, state: &DashboardViewState) {
    let header_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(header_area);
    let anchor = header_chunks[1];

    let count = state.search.suggestions().len();
    let height = u16::try_from(count).unwrap_or(u16::MAX).saturating_add(2);
    let area = Rect {
        x: anchor.x,
        y: anchor.y.saturating_add(anchor.height),
        width: anchor.width,
        height,
    }
    .intersection(frame.area());

    let items: Vec<ListItem> = state
        .search
        .suggestions()
        .iter()
        .map(|card| {
            let year = card
                .date
                .as_deref()
                .and_then(|d| d.get(..4))
                .unwrap_or("----");
            ListItem::new(format!("{} ({year})", card.title))
        })
        .collect();

    let list = List::new(items)
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("\u{25b8} ")
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow))
                .title(" Suggestions "),
        );

    frame.render_widget(Clear, area);
    let mut list_state = ListState::default().with_selected(state.suggestion_cursor);
    frame.render_stateful_widget(list, area, &mut list_state);
}

/// Draws the centered detail overlay.
fn draw_detail_overlay(frame: &mut Frame, state: &DashboardViewState) {
    let area = centered_rect(70, 70, frame.area());
    frame.render_widget(Clear, area);

    let Some(detail) = &state.detail else {
        let loading = Paragraph::new("Loading...")
            .block(Block::default().borders(Borders::ALL).title(" Details "));
        frame.render_widget(loading, area);
        return;
    };

    let mut lines: Vec<Line> = vec![Line::from(Span::styled(
        detail.title.clone(),
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    ))];

    if let Some(tagline) = &detail.tagline {
        lines.push(Line::from(Span::styled(
            tagline.clone(),
            Style::default().add_modifier(Modifier::ITALIC),
        )));
    }
    lines.push(Line::raw(""));

    lines.push(Line::raw(format!(
        "Date: {}",
        detail
            .date
            .as_deref()
            .map_or_else(|| String::from("N/A"), format_date)
    )));
    lines.push(Line::raw(format!(
        "Rating: {} ({} votes)",
        format_rating(detail.vote_average),
        detail.vote_count
    )));
    if let Some(status) = &detail.status {
        lines.push(Line::raw(format!("Status: {status}")));
    }
    if let Some(runtime) = detail.runtime_minutes {
        lines.push(Line::raw(format!("Runtime: {runtime} min")));
    }
    if let (Some(seasons), Some(episodes)) = (detail.seasons, detail.episodes) {
        lines.push(Line::raw(format!(
            "Seasons: {seasons}  Episodes: {episodes}"
        )));
    }
    if !detail.genres.is_empty() {
        lines.push(Line::raw(format!("Genres: {}", detail.genres.join(", "))));
    }
    if !detail.production_companies.is_empty() {
        lines.push(Line::raw(format!(
            "Production: {}",
            detail.production_companies.join(", ")
        )));
    }
    if detail.poster_path.is_some() {
        lines.push(Line::raw(format!(
            "Poster: {}",
            image_url(detail.poster_path.as_deref(), ImageSize::Original)
        )));
    }
    lines.push(Line::raw(""));
    lines.push(Line::raw(detail.overview.clone()));

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title(" Details "));
    frame.render_widget(paragraph, area);
}

/// Draws the footer with key hints and the status line.
fn draw_footer(frame: &mut Frame, area: Rect, state: &DashboardViewState) {
    let help_text = if state.focus == Focus::Search {
        "Type to search | \u{2191}\u{2193}: pick suggestion | Enter: submit | Esc: back to grid"
    } else if state.detail.is_some() {
        "Esc: close details  q: quit"
    } else {
        "Tab/m/t: kind  c: category  /: search  \u{2191}\u{2193}/j/k: move  Enter: details  Esc: clear  q: quit"
    };

    let text = if state.status.is_empty() {
        String::from(help_text)
    } else {
        format!("{help_text}  \u{2502}  {}", state.status)
    };

    let footer = Paragraph::new(text).block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, area);
}

/// Computes a centered rect occupying the given percentages of `area`.
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(100u16.saturating_sub(percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage(100u16.saturating_sub(percent_y) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(100u16.saturating_sub(percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage(100u16.saturating_sub(percent_x) / 2),
        ])
        .split(vertical.get(1).copied().unwrap_or(area));

    horizontal.get(1).copied().unwrap_or(area)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use std::time::Duration;

    use mediadash_api::tmdb::MediaKind;
    use mediadash_core::card::DetailCard;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use ratatui::buffer::Cell;

    use super::*;

    fn render_text(state: &DashboardViewState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|frame| draw(frame, state)).unwrap();
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(Cell::symbol)
            .collect()
    }

    #[test]
    fn test_detail_overlay_shows_poster_url() {
        // Arrange
        let mut state = DashboardViewState::new(Duration::from_millis(300));
        state.detail = Some(DetailCard {
            id: 42,
            kind: MediaKind::Movie,
            title: String::from("Dune"),
            date: Some(String::from("2024-03-01")),
            overview: String::from("Desert planet."),
            tagline: None,
            status: Some(String::from("Released")),
            genres: Vec::new(),
            production_companies: Vec::new(),
            runtime_minutes: Some(166),
            seasons: None,
            episodes: None,
            vote_average: 8.0,
            vote_count: 1000,
            poster_path: Some(String::from("/abc123.jpg")),
        });

        // Act
        let text = render_text(&state);

        // Assert
        assert!(text.contains("Poster: https://image.tmdb.org/t/p/original/abc123.jpg"));
    }

    #[test]
    fn test_detail_overlay_without_poster_omits_line() {
        // Arrange
        let mut state = DashboardViewState::new(Duration::from_millis(300));
        state.detail = Some(DetailCard {
            id: 42,
            kind: MediaKind::Movie,
            title: String::from("Dune"),
            date: None,
            overview: String::new(),
            tagline: None,
            status: None,
            genres: Vec::new(),
            production_companies: Vec::new(),
            runtime_minutes: None,
            seasons: None,
            episodes: None,
            vote_average: 8.0,
            vote_count: 1000,
            poster_path: None,
        });

        // Act
        let text = render_text(&state);

        // Assert
        assert!(!text.contains("Poster:"));
    }
}
