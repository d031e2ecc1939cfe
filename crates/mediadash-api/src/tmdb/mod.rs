//! TMDB API client module.
//!
//! Handles HTTP requests to the TMDB API v3 endpoints for discover
//! feeds, text search, and movie/TV detail lookups.

mod api;
mod client;
mod format;
mod image;
mod params;
mod types;
mod windows;

#[allow(clippy::module_name_repetitions)]
pub use api::{LocalMediaApi, MediaApi};
#[allow(clippy::module_name_repetitions)]
pub use client::{TmdbClient, TmdbClientBuilder};
pub use format::{format_date, format_rating};
pub use image::{FALLBACK_POSTER, ImageSize, image_url};
pub use params::{DiscoverParams, SearchParams};
#[allow(clippy::module_name_repetitions)]
pub use types::{
    Category, MediaKind, TmdbGenre, TmdbMovie, TmdbMovieDetails, TmdbPage, TmdbProductionCompany,
    TmdbTvDetails, TmdbTvShow,
};
pub use windows::{CategoryWindows, DateWindow};
