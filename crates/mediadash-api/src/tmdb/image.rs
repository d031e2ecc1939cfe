//! Image URL resolution for TMDB poster/backdrop paths.

/// TMDB image CDN base URL.
const IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/";

/// Fallback asset served when a record has no poster path.
pub const FALLBACK_POSTER: &str = "assets/not-found.png";

/// Requested image width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageSize {
    /// 200px wide (suggestion thumbnails).
    W200,
    /// 500px wide (grid posters).
    #[default]
    W500,
    /// Original resolution (detail view).
    Original,
}

impl ImageSize {
    /// CDN path segment for this size.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::W200 => "w200",
            Self::W500 => "w500",
            Self::Original => "original",
        }
    }
}

/// Resolves a TMDB image path to a display URL.
///
/// Returns the fallback asset when the path is absent; a failed image
/// load on the consumer side falls back to the same asset.
#[must_use]
pub fn image_url(path: Option<&str>, size: ImageSize) -> String {
    path.map_or_else(
        || String::from(FALLBACK_POSTER),
        |p| format!("{IMAGE_BASE_URL}{}{p}", size.as_str()),
    )
}
