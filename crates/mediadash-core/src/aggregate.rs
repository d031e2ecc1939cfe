//! Bounded page aggregation.
//!
//! The discover feeds can return many items below the popularity floor,
//! especially for sparse categories such as upcoming releases, so fetching
//! exactly one page often yields a visually empty grid. One aggregation
//! run keeps fetching consecutive pages until a minimum result count is
//! reached, pages run out, or the attempt budget is spent.

use anyhow::{Context, Result};
use tracing::instrument;

use crate::card::MediaCard;

/// One fetched page of a remote paginated feed.
#[derive(Debug, Clone)]
pub struct Page {
    /// Page number as reported by the feed (1-based).
    pub number: u32,
    /// Total number of pages in the feed.
    pub total_pages: u32,
    /// Items on this page, in feed order.
    pub items: Vec<MediaCard>,
}

/// A paginated feed that can be fetched one page at a time.
///
/// Abstracts the remote source for mock substitution in tests.
/// Uses `trait_variant::make` to generate a `Send`-bound async trait.
#[trait_variant::make(PageSource: Send)]
pub trait LocalPageSource {
    /// Fetches the page with the given number.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying request fails.
    async fn fetch_page(&self, number: u32) -> Result<Page>;
}

/// Tuning for one aggregation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AggregateOptions {
    /// Stop backfilling once this many items qualify.
    pub min_results: usize,
    /// Maximum number of backfill fetches beyond the first page.
    pub max_attempts: u32,
}

impl Default for AggregateOptions {
    fn default() -> Self {
        Self {
            min_results: 12,
            max_attempts: 5,
        }
    }
}

/// Result of one aggregation run.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateOutcome {
    /// Qualifying items in fetch order.
    pub items: Vec<MediaCard>,
    /// The page number actually reached.
    pub last_page: u32,
    /// Whether pages remain beyond `last_page`.
    pub has_more: bool,
}

/// Runs one aggregation: fetches `start_page`, then consecutive pages while
/// fewer than `min_results` items pass `keep`, pages remain, and the
/// attempt budget holds. Page fetches are strictly sequential; the
/// continuation condition depends on the previous page's totals.
///
/// Items are accumulated in fetch order, never re-sorted and never
/// deduplicated against earlier pages. At most `max_attempts + 1` fetches
/// are issued per run.
///
/// A failed page fetch aborts the whole run: the caller treats partial
/// accumulation as discarded and reports no further pages.
///
/// # Errors
///
/// Returns an error if any page fetch fails.
#[instrument(skip_all, fields(start_page = start_page))]
pub async fn aggregate(
    source: &(impl PageSource + Sync),
    start_page: u32,
    options: AggregateOptions,
    keep: impl Fn(&MediaCard) -> bool,
) -> Result<AggregateOutcome> {
    let mut page = source
        .fetch_page(start_page)
        .await
        .with_context(|| format!("page fetch failed on page {start_page}"))?;

    let fetched = std::mem::take(&mut page.items);
    let mut items: Vec<MediaCard> = fetched.into_iter().filter(&keep).collect();

    let mut attempts: u32 = 0;
    while items.len() < options.min_results
        && page.number < page.total_pages
        && attempts < options.max_attempts
    {
        attempts = attempts.checked_add(1).context("attempt counter overflow")?;
        let next = page.number.checked_add(1).context("page number overflow")?;

        tracing::debug!(
            page = next,
            collected = items.len(),
            attempts = attempts,
            "backfilling sparse page"
        );

        page = source
            .fetch_page(next)
            .await
            .with_context(|| format!("page fetch failed on backfill page {next}"))?;
        let fetched = std::mem::take(&mut page.items);
        items.extend(fetched.into_iter().filter(&keep));
    }

    let has_more = page.number < page.total_pages;
    tracing::debug!(
        collected = items.len(),
        last_page = page.number,
        has_more = has_more,
        "aggregation run completed"
    );

    Ok(AggregateOutcome {
        items,
        last_page: page.number,
        has_more,
    })
}
