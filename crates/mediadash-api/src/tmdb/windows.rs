//! Per-category discover date windows.
//!
//! The recently-released lookback and the upcoming horizon differ
//! between movies and TV. The asymmetry is intentional per-category
//! tuning, so it is carried as configuration data rather than
//! hard-coded in the query builder.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use super::types::MediaKind;

/// Date window for a discover query. `None` bounds are open-ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    /// Earliest release date (inclusive).
    pub from: Option<NaiveDate>,
    /// Latest release date (inclusive).
    pub to: Option<NaiveDate>,
}

/// Per-category date window configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryWindows {
    /// Lookback for recently-released movies, in days.
    pub movie_recent_days: u64,
    /// Lookback for recently-released TV series, in days.
    pub tv_recent_days: u64,
    /// Forward horizon for upcoming movies, in days. `None` is unbounded.
    pub movie_upcoming_days: Option<u64>,
    /// Forward horizon for upcoming TV series, in days. `None` is unbounded.
    pub tv_upcoming_days: Option<u64>,
}

impl Default for CategoryWindows {
    fn default() -> Self {
        Self {
            movie_recent_days: 60,
            tv_recent_days: 30,
            movie_upcoming_days: None,
            tv_upcoming_days: Some(365),
        }
    }
}

impl CategoryWindows {
    /// Window for the recently-released feed: `[today - lookback, today]`.
    #[must_use]
    pub fn recent_window(&self, kind: MediaKind, today: NaiveDate) -> DateWindow {
        let lookback = match kind {
            MediaKind::Movie => self.movie_recent_days,
            MediaKind::Tv => self.tv_recent_days,
        };
        DateWindow {
            from: today.checked_sub_days(Days::new(lookback)),
            to: Some(today),
        }
    }

    /// Window for the upcoming feed: `[tomorrow, tomorrow + horizon]`,
    /// open-ended when no horizon is configured.
    #[must_use]
    pub fn upcoming_window(&self, kind: MediaKind, today: NaiveDate) -> DateWindow {
        let horizon = match kind {
            MediaKind::Movie => self.movie_upcoming_days,
            MediaKind::Tv => self.tv_upcoming_days,
        };
        let tomorrow = today.checked_add_days(Days::new(1));
        DateWindow {
            from: tomorrow,
            to: horizon
                .and_then(|days| tomorrow.and_then(|t| t.checked_add_days(Days::new(days)))),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_movie_recent_window_is_sixty_days() {
        // Arrange
        let windows = CategoryWindows::default();
        let today = date(2024, 6, 15);

        // Act
        let window = windows.recent_window(MediaKind::Movie, today);

        // Assert
        assert_eq!(window.from, Some(date(2024, 4, 16)));
        assert_eq!(window.to, Some(today));
    }

    #[test]
    fn test_tv_recent_window_is_thirty_days() {
        // Arrange
        let windows = CategoryWindows::default();
        let today = date(2024, 6, 15);

        // Act
        let window = windows.recent_window(MediaKind::Tv, today);

        // Assert
        assert_eq!(window.from, Some(date(2024, 5, 16)));
        assert_eq!(window.to, Some(today));
    }

    #[test]
    fn test_movie_upcoming_window_is_open_ended() {
        // Arrange
        let windows = CategoryWindows::default();
        let today = date(2024, 6, 15);

        // Act
        let window = windows.upcoming_window(MediaKind::Movie, today);

        // Assert
        assert_eq!(window.from, Some(date(2024, 6, 16)));
        assert_eq!(window.to, None);
    }

    #[test]
    fn test_tv_upcoming_window_is_one_year() {
        // Arrange
        let windows = CategoryWindows::default();
        let today = date(2024, 6, 15);

        // Act
        let window = windows.upcoming_window(MediaKind::Tv, today);

        // Assert
        assert_eq!(window.from, Some(date(2024, 6, 16)));
        assert_eq!(window.to, Some(date(2025, 6, 16)));
    }

    #[test]
    fn test_windows_are_configurable() {
        // Arrange
        let windows = CategoryWindows {
            movie_recent_days: 7,
            tv_recent_days: 7,
            movie_upcoming_days: Some(14),
            tv_upcoming_days: None,
        };
        let today = date(2024, 6, 15);

        // Act
        let recent = windows.recent_window(MediaKind::Movie, today);
        let upcoming = windows.upcoming_window(MediaKind::Tv, today);

        // Assert
        assert_eq!(recent.from, Some(date(2024, 6, 8)));
        assert_eq!(upcoming.to, None);
    }

    #[test]
    fn test_serde_round_trip() {
        // Arrange
        let windows = CategoryWindows::default();

        // Act
        let json = serde_json::to_string(&windows).unwrap();
        let parsed: CategoryWindows = serde_json::from_str(&json).unwrap();

        // Assert
        assert_eq!(parsed, windows);
    }
}
