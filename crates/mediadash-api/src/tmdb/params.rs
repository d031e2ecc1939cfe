//! Request parameters and query-string construction.

use chrono::{NaiveDate, Utc};

use super::types::{Category, MediaKind};
use super::windows::CategoryWindows;

/// Original-language filter applied to every discover and search query.
const ORIGINAL_LANGUAGE: &str = "en";

/// Origin-country filter applied to every discover query.
const ORIGIN_COUNTRIES: &str = "US|GB|CA";

/// Returns the release-date field name for a media kind.
const fn date_field(kind: MediaKind) -> &'static str {
    match kind {
        MediaKind::Movie => "primary_release_date",
        MediaKind::Tv => "first_air_date",
    }
}

/// Parameters for `discover/movie` and `discover/tv` endpoints.
#[derive(Debug, Clone)]
pub struct DiscoverParams {
    /// Browse category.
    pub category: Category,
    /// Result page (1-based, default: 1).
    pub page: u32,
    /// Reference date for recent/upcoming windows (default: today, UTC).
    pub today: NaiveDate,
    /// Per-category date window configuration.
    pub windows: CategoryWindows,
}

impl DiscoverParams {
    /// Creates new discover params for the given category.
    #[must_use]
    pub fn new(category: Category) -> Self {
        Self {
            category,
            page: 1,
            today: Utc::now().date_naive(),
            windows: CategoryWindows::default(),
        }
    }

    /// Sets the result page.
    #[must_use]
    pub const fn page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    /// Sets the reference date (fixed in tests for determinism).
    #[must_use]
    pub const fn today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    /// Sets the date window configuration.
    #[must_use]
    pub const fn windows(mut self, windows: CategoryWindows) -> Self {
        self.windows = windows;
        self
    }

    /// Builds the query pairs for the discover endpoint of `kind`.
    ///
    /// Movies and TV use different parameter names for the origin-country
    /// filter and the release-date field, so the kind is resolved here.
    #[must_use]
    pub fn to_query(&self, kind: MediaKind) -> Vec<(String, String)> {
        let origin_key = match kind {
            MediaKind::Movie => "with_origin_country",
            MediaKind::Tv => "origin_country",
        };
        let field = date_field(kind);

        let mut query: Vec<(String, String)> = vec![
            (
                String::from("with_original_language"),
                String::from(ORIGINAL_LANGUAGE),
            ),
            (String::from(origin_key), String::from(ORIGIN_COUNTRIES)),
        ];

        match self.category {
            Category::Popular => {
                query.push((String::from("sort_by"), String::from("popularity.desc")));
            }
            Category::Recent => {
                let window = self.windows.recent_window(kind, self.today);
                if let Some(to) = window.to {
                    query.push((format!("{field}.lte"), to.format("%Y-%m-%d").to_string()));
                }
                if let Some(from) = window.from {
                    query.push((format!("{field}.gte"), from.format("%Y-%m-%d").to_string()));
                }
                query.push((String::from("sort_by"), format!("{field}.desc")));
            }
            Category::Upcoming => {
                let window = self.windows.upcoming_window(kind, self.today);
                if let Some(from) = window.from {
                    query.push((format!("{field}.gte"), from.format("%Y-%m-%d").to_string()));
                }
                if let Some(to) = window.to {
                    query.push((format!("{field}.lte"), to.format("%Y-%m-%d").to_string()));
                }
                query.push((String::from("sort_by"), format!("{field}.asc")));
            }
        }

        query.push((String::from("page"), self.page.to_string()));
        query
    }
}

/// Parameters for `search/movie` and `search/tv` endpoints.
#[derive(Debug, Clone)]
pub struct SearchParams {
    /// Search query text (required).
    pub query: String,
    /// Result page (1-based, default: 1).
    pub page: u32,
    /// Response language (default: "en").
    pub language: String,
    /// Include adult content (default: false).
    pub include_adult: bool,
}

impl SearchParams {
    /// Creates new search params with the given query text.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            page: 1,
            language: String::from("en"),
            include_adult: false,
        }
    }

    /// Sets the result page.
    #[must_use]
    pub const fn page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    /// Sets the response language.
    #[must_use]
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Builds the query pairs for a search endpoint.
    #[must_use]
    pub fn to_query(&self) -> Vec<(String, String)> {
        vec![
            (String::from("query"), self.query.clone()),
            (
                String::from("with_original_language"),
                String::from(ORIGINAL_LANGUAGE),
            ),
            (String::from("language"), self.language.clone()),
            (String::from("page"), self.page.to_string()),
            (
                String::from("include_adult"),
                self.include_adult.to_string(),
            ),
        ]
    }
}
