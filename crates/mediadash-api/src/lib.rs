//! API client library for mediadash.
//!
//! Provides a typed client for the TMDB v3 API: discover feeds,
//! text search, and detail lookups for movies and TV series.

/// TMDB API client.
pub mod tmdb;
