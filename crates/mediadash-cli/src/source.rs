//! Adapter bridging the TMDB discover endpoints to the page aggregator.

use std::sync::Arc;

use anyhow::Result;
use mediadash_api::tmdb::{DiscoverParams, LocalMediaApi, MediaKind, TmdbClient};
use mediadash_core::aggregate::{Page, PageSource};
use mediadash_core::card::MediaCard;

/// One discover feed (kind + category + windows) as a [`PageSource`].
#[derive(Debug)]
pub struct DiscoverSource {
    client: Arc<TmdbClient>,
    kind: MediaKind,
    params: DiscoverParams,
}

impl DiscoverSource {
    /// Creates a source over the given feed.
    #[must_use]
    pub const fn new(client: Arc<TmdbClient>, kind: MediaKind, params: DiscoverParams) -> Self {
        Self {
            client,
            kind,
            params,
        }
    }
}

impl PageSource for DiscoverSource {
    async fn fetch_page(&self, number: u32) -> Result<Page> {
        let params = self.params.clone().page(number);
        match self.kind {
            MediaKind::Movie => {
                let page = self.client.discover_movies(&params).await?;
                Ok(Page {
                    number: page.page,
                    total_pages: page.total_pages,
                    items: page.results.iter().map(MediaCard::from).collect(),
                })
            }
            MediaKind::Tv => {
                let page = self.client.discover_tv(&params).await?;
                Ok(Page {
                    number: page.page,
                    total_pages: page.total_pages,
                    items: page.results.iter().map(MediaCard::from).collect(),
                })
            }
        }
    }
}
