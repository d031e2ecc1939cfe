//! Normalized display rows for grid and detail rendering.
//!
//! Movie and TV responses carry different field names (`title` vs `name`,
//! `release_date` vs `first_air_date`); the UI works on a single row shape.

use mediadash_api::tmdb::{MediaKind, TmdbMovie, TmdbMovieDetails, TmdbTvDetails, TmdbTvShow};

/// A single grid row, built from either a movie or a TV record.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaCard {
    /// TMDB record ID.
    pub id: u64,
    /// Media kind this row was built from.
    pub kind: MediaKind,
    /// Display title.
    pub title: String,
    /// Release / first-air date (YYYY-MM-DD), if known.
    pub date: Option<String>,
    /// Overview text.
    pub overview: String,
    /// Popularity score (drives the low-signal filter).
    pub popularity: f64,
    /// Vote average (0-10).
    pub vote_average: f64,
    /// Vote count.
    pub vote_count: u32,
    /// Poster image path.
    pub poster_path: Option<String>,
}

impl From<&TmdbMovie> for MediaCard {
    fn from(movie: &TmdbMovie) -> Self {
        Self {
            id: movie.id,
            kind: MediaKind::Movie,
            title: movie.title.clone(),
            date: movie.release_date.clone(),
            overview: movie.overview.clone().unwrap_or_default(),
            popularity: movie.popularity,
            vote_average: movie.vote_average,
            vote_count: movie.vote_count,
            poster_path: movie.poster_path.clone(),
        }
    }
}

impl From<&TmdbTvShow> for MediaCard {
    fn from(show: &TmdbTvShow) -> Self {
        Self {
            id: show.id,
            kind: MediaKind::Tv,
            title: show.name.clone(),
            date: show.first_air_date.clone(),
            overview: show.overview.clone().unwrap_or_default(),
            popularity: show.popularity,
            vote_average: show.vote_average,
            vote_count: show.vote_count,
            poster_path: show.poster_path.clone(),
        }
    }
}

/// Detail overlay content, built from either detail response.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailCard {
    /// TMDB record ID.
    pub id: u64,
    /// Media kind this record was built from.
    pub kind: MediaKind,
    /// Display title.
    pub title: String,
    /// Release / first-air date (YYYY-MM-DD), if known.
    pub date: Option<String>,
    /// Overview text.
    pub overview: String,
    /// Tagline, if any.
    pub tagline: Option<String>,
    /// Release/production status.
    pub status: Option<String>,
    /// Genre names.
    pub genres: Vec<String>,
    /// Production company names.
    pub production_companies: Vec<String>,
    /// Movie runtime in minutes.
    pub runtime_minutes: Option<u32>,
    /// Season count (TV only).
    pub seasons: Option<u32>,
    /// Episode count (TV only).
    pub episodes: Option<u32>,
    /// Vote average (0-10).
    pub vote_average: f64,
    /// Vote count.
    pub vote_count: u32,
    /// Poster image path.
    pub poster_path: Option<String>,
}

impl From<&TmdbMovieDetails> for DetailCard {
    fn from(details: &TmdbMovieDetails) -> Self {
        Self {
            id: details.id,
            kind: MediaKind::Movie,
            title: details.title.clone(),
            date: details.release_date.clone(),
            overview: details.overview.clone().unwrap_or_default(),
            tagline: details.tagline.clone().filter(|t| !t.is_empty()),
            status: details.status.clone(),
            genres: details.genres.iter().map(|g| g.name.clone()).collect(),
            production_companies: details
                .production_companies
                .iter()
                .map(|c| c.name.clone())
                .collect(),
            runtime_minutes: details.runtime,
            seasons: None,
            episodes: None,
            vote_average: details.vote_average,
            vote_count: details.vote_count,
            poster_path: details.poster_path.clone(),
        }
    }
}

impl From<&TmdbTvDetails> for DetailCard {
    fn from(details: &TmdbTvDetails) -> Self {
        Self {
            id: details.id,
            kind: MediaKind::Tv,
            title: details.name.clone(),
            date: details.first_air_date.clone(),
            overview: details.overview.clone().unwrap_or_default(),
            tagline: details.tagline.clone().filter(|t| !t.is_empty()),
            status: details.status.clone(),
            genres: details.genres.iter().map(|g| g.name.clone()).collect(),
            production_companies: details
                .production_companies
                .iter()
                .map(|c| c.name.clone())
                .collect(),
            runtime_minutes: details.episode_run_time.first().copied(),
            seasons: Some(details.number_of_seasons),
            episodes: Some(details.number_of_episodes),
            vote_average: details.vote_average,
            vote_count: details.vote_count,
            poster_path: details.poster_path.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    fn make_movie() -> TmdbMovie {
        TmdbMovie {
            id: 42,
            title: String::from("Blade Runner"),
            original_title: String::from("Blade Runner"),
            original_language: String::from("en"),
            release_date: Some(String::from("1982-06-25")),
            overview: Some(String::from("A blade runner must pursue replicants.")),
            popularity: 85.3,
            vote_average: 7.9,
            vote_count: 13000,
            genre_ids: vec![878],
            adult: false,
            poster_path: Some(String::from("/poster.jpg")),
            backdrop_path: None,
        }
    }

    #[test]
    fn test_movie_card_fields() {
        // Arrange
        let movie = make_movie();

        // Act
        let card = MediaCard::from(&movie);

        // Assert
        assert_eq!(card.id, 42);
        assert_eq!(card.kind, MediaKind::Movie);
        assert_eq!(card.title, "Blade Runner");
        assert_eq!(card.date.as_deref(), Some("1982-06-25"));
        assert!((card.popularity - 85.3).abs() < f64::EPSILON);
    }

    #[test]
    fn test_tv_card_uses_name_and_first_air_date() {
        // Arrange
        let show = TmdbTvShow {
            id: 7,
            name: String::from("Severance"),
            original_name: String::from("Severance"),
            original_language: String::from("en"),
            origin_country: vec![String::from("US")],
            first_air_date: Some(String::from("2022-02-17")),
            overview: None,
            popularity: 120.0,
            vote_average: 8.3,
            vote_count: 2500,
            genre_ids: vec![18],
            poster_path: None,
            backdrop_path: None,
        };

        // Act
        let card = MediaCard::from(&show);

        // Assert
        assert_eq!(card.kind, MediaKind::Tv);
        assert_eq!(card.title, "Severance");
        assert_eq!(card.date.as_deref(), Some("2022-02-17"));
        assert!(card.overview.is_empty());
    }

    #[test]
    fn test_detail_card_empty_tagline_is_none() {
        // Arrange
        let details = TmdbMovieDetails {
            id: 1,
            title: String::from("Test"),
            release_date: None,
            overview: None,
            tagline: Some(String::new()),
            status: Some(String::from("Released")),
            runtime: Some(120),
            budget: 0,
            revenue: 0,
            popularity: 1.0,
            vote_average: 6.0,
            vote_count: 10,
            genres: vec![],
            production_companies: vec![],
            poster_path: None,
        };

        // Act
        let card = DetailCard::from(&details);

        // Assert
        assert_eq!(card.tagline, None);
        assert_eq!(card.runtime_minutes, Some(120));
        assert_eq!(card.seasons, None);
    }
}
