//! `MediaApi` trait definition.
#![allow(clippy::future_not_send)]

use anyhow::Result;

use super::params::{DiscoverParams, SearchParams};
use super::types::{TmdbMovie, TmdbMovieDetails, TmdbPage, TmdbTvDetails, TmdbTvShow};

/// TMDB API trait.
///
/// Abstracts API operations for mock substitution in tests.
/// Uses `trait_variant::make` to generate a `Send`-bound async trait.
#[allow(clippy::module_name_repetitions)]
#[trait_variant::make(MediaApi: Send)]
pub trait LocalMediaApi {
    /// Fetches one page of the movie discover feed.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn discover_movies(&self, params: &DiscoverParams) -> Result<TmdbPage<TmdbMovie>>;

    /// Fetches one page of the TV discover feed.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn discover_tv(&self, params: &DiscoverParams) -> Result<TmdbPage<TmdbTvShow>>;

    /// Searches for movies by text.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn search_movies(&self, params: &SearchParams) -> Result<TmdbPage<TmdbMovie>>;

    /// Searches for TV series by text.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn search_tv(&self, params: &SearchParams) -> Result<TmdbPage<TmdbTvShow>>;

    /// Fetches movie details by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn movie_details(&self, movie_id: u64) -> Result<TmdbMovieDetails>;

    /// Fetches TV series details by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn tv_details(&self, series_id: u64) -> Result<TmdbTvDetails>;
}
