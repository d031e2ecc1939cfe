//! TMDB API response types and media classification enums.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

/// Media kind served by the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaKind {
    /// Feature films (`/discover/movie`, `/search/movie`, `/movie/{id}`).
    Movie,
    /// TV series (`/discover/tv`, `/search/tv`, `/tv/{id}`).
    Tv,
}

impl MediaKind {
    /// Stable string form used in CLI arguments and config files.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Movie => "movie",
            Self::Tv => "tv",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediaKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "movie" => Ok(Self::Movie),
            "tv" => Ok(Self::Tv),
            other => Err(anyhow::anyhow!("unknown media kind: {other}")),
        }
    }
}

/// Browse category for discover feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// All-time popular, sorted by popularity descending.
    Popular,
    /// Recently released, sorted by release date descending.
    Recent,
    /// Not yet released, sorted by release date ascending.
    Upcoming,
}

impl Category {
    /// Stable string form used in CLI arguments and config files.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Popular => "popular",
            Self::Recent => "recent",
            Self::Upcoming => "upcoming",
        }
    }

    /// Cycles to the next category (popular -> recent -> upcoming -> popular).
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Popular => Self::Recent,
            Self::Recent => Self::Upcoming,
            Self::Upcoming => Self::Popular,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "popular" => Ok(Self::Popular),
            "recent" => Ok(Self::Recent),
            "upcoming" => Ok(Self::Upcoming),
            other => Err(anyhow::anyhow!("unknown category: {other}")),
        }
    }
}

/// One page of a paginated TMDB response.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbPage<T> {
    /// Current page number (1-based).
    pub page: u32,
    /// Results on this page, in API order.
    pub results: Vec<T>,
    /// Total number of pages.
    pub total_pages: u32,
    /// Total number of results across all pages.
    pub total_results: u32,
}

/// A movie record from discover or search feeds.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbMovie {
    /// TMDB movie ID.
    pub id: u64,
    /// Localized title.
    pub title: String,
    /// Original title.
    #[serde(default)]
    pub original_title: String,
    /// Original language (ISO 639-1).
    #[serde(default)]
    pub original_language: String,
    /// Release date (YYYY-MM-DD or null).
    pub release_date: Option<String>,
    /// Overview text.
    pub overview: Option<String>,
    /// Popularity score.
    #[serde(default)]
    pub popularity: f64,
    /// Vote average (0-10).
    #[serde(default)]
    pub vote_average: f64,
    /// Vote count.
    #[serde(default)]
    pub vote_count: u32,
    /// Genre IDs.
    #[serde(default)]
    pub genre_ids: Vec<u32>,
    /// Adult flag.
    #[serde(default)]
    pub adult: bool,
    /// Poster image path.
    pub poster_path: Option<String>,
    /// Backdrop image path.
    pub backdrop_path: Option<String>,
}

/// A TV series record from discover or search feeds.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbTvShow {
    /// TMDB series ID.
    pub id: u64,
    /// Localized name.
    pub name: String,
    /// Original name.
    #[serde(default)]
    pub original_name: String,
    /// Original language (ISO 639-1).
    #[serde(default)]
    pub original_language: String,
    /// Origin countries (ISO 3166-1).
    #[serde(default)]
    pub origin_country: Vec<String>,
    /// First air date (YYYY-MM-DD or null).
    pub first_air_date: Option<String>,
    /// Overview text.
    pub overview: Option<String>,
    /// Popularity score.
    #[serde(default)]
    pub popularity: f64,
    /// Vote average (0-10).
    #[serde(default)]
    pub vote_average: f64,
    /// Vote count.
    #[serde(default)]
    pub vote_count: u32,
    /// Genre IDs.
    #[serde(default)]
    pub genre_ids: Vec<u32>,
    /// Poster image path.
    pub poster_path: Option<String>,
    /// Backdrop image path.
    pub backdrop_path: Option<String>,
}

/// Response from the `movie/{id}` endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbMovieDetails {
    /// TMDB movie ID.
    pub id: u64,
    /// Localized title.
    pub title: String,
    /// Release date.
    pub release_date: Option<String>,
    /// Overview text.
    pub overview: Option<String>,
    /// Tagline.
    pub tagline: Option<String>,
    /// Release status (e.g. "Released", "Post Production").
    pub status: Option<String>,
    /// Runtime in minutes.
    pub runtime: Option<u32>,
    /// Production budget in USD.
    #[serde(default)]
    pub budget: u64,
    /// Box office revenue in USD.
    #[serde(default)]
    pub revenue: u64,
    /// Popularity score.
    #[serde(default)]
    pub popularity: f64,
    /// Vote average (0-10).
    #[serde(default)]
    pub vote_average: f64,
    /// Vote count.
    #[serde(default)]
    pub vote_count: u32,
    /// Genres.
    #[serde(default)]
    pub genres: Vec<TmdbGenre>,
    /// Production companies.
    #[serde(default)]
    pub production_companies: Vec<TmdbProductionCompany>,
    /// Poster image path.
    pub poster_path: Option<String>,
}

/// Response from the `tv/{id}` endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbTvDetails {
    /// TMDB series ID.
    pub id: u64,
    /// Localized name.
    pub name: String,
    /// First air date.
    pub first_air_date: Option<String>,
    /// Last air date.
    pub last_air_date: Option<String>,
    /// Overview text.
    pub overview: Option<String>,
    /// Tagline.
    pub tagline: Option<String>,
    /// Series status (e.g. "Returning Series", "Ended").
    pub status: Option<String>,
    /// Typical episode runtimes in minutes.
    #[serde(default)]
    pub episode_run_time: Vec<u32>,
    /// Total number of seasons.
    #[serde(default)]
    pub number_of_seasons: u32,
    /// Total number of episodes.
    #[serde(default)]
    pub number_of_episodes: u32,
    /// Popularity score.
    #[serde(default)]
    pub popularity: f64,
    /// Vote average (0-10).
    #[serde(default)]
    pub vote_average: f64,
    /// Vote count.
    #[serde(default)]
    pub vote_count: u32,
    /// Genres.
    #[serde(default)]
    pub genres: Vec<TmdbGenre>,
    /// Production companies.
    #[serde(default)]
    pub production_companies: Vec<TmdbProductionCompany>,
    /// Poster image path.
    pub poster_path: Option<String>,
}

/// Genre entry.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbGenre {
    /// Genre ID.
    pub id: u32,
    /// Genre name.
    pub name: String,
}

/// Production company entry.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbProductionCompany {
    /// Company ID.
    pub id: u64,
    /// Company name.
    pub name: String,
    /// Logo image path.
    pub logo_path: Option<String>,
}

/// TMDB API error response body.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct TmdbErrorResponse {
    /// TMDB error code.
    pub status_code: u32,
    /// Error message.
    pub status_message: String,
}
