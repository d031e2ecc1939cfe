//! mediadash - terminal media-browsing dashboard over TMDB.

/// Application configuration (TOML).
mod config;
/// Discover-feed adapter for the aggregator.
mod source;
/// Terminal UI components.
mod tui;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tracing::instrument;
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt;

use crate::config::{AppConfig, resolve_config_path};
use crate::source::DiscoverSource;
use crate::tui::run_dashboard;
use mediadash_api::tmdb::{
    Category, DiscoverParams, ImageSize, LocalMediaApi, MediaKind, SearchParams, TmdbClient,
    format_date, format_rating, image_url,
};
use mediadash_core::aggregate::{AggregateOptions, aggregate};
use mediadash_core::card::{DetailCard, MediaCard};

/// CLI argument parser.
#[derive(Parser)]
#[command(about, version)]
struct Cli {
    /// Override config directory.
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// TMDB bearer access token. Falls back to config, then `TMDB_ACCESS_TOKEN`.
    #[arg(long, global = true)]
    token: Option<String>,

    /// Subcommand to run.
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Full-screen dashboard TUI.
    Browse(BrowseArgs),
    /// One aggregation run over a discover feed, printed as a table.
    Discover(DiscoverArgs),
    /// Text search, printed as a table.
    Search(SearchArgs),
    /// Detail record for a single movie or TV series.
    Details(DetailsArgs),
}

/// Arguments for the `browse` subcommand.
#[derive(clap::Args)]
struct BrowseArgs {
    /// Media kind to open on (movie or tv).
    #[arg(long, default_value = "movie")]
    kind: MediaKind,
    /// Category to open on (popular, recent, or upcoming).
    #[arg(long, default_value = "popular")]
    category: Category,
}

/// Arguments for the `discover` subcommand.
#[derive(clap::Args)]
struct DiscoverArgs {
    /// Media kind (movie or tv).
    #[arg(long, default_value = "movie")]
    kind: MediaKind,
    /// Category (popular, recent, or upcoming).
    #[arg(long, default_value = "popular")]
    category: Category,
    /// First page of the run.
    #[arg(long, default_value_t = 1)]
    page: u32,
}

/// Arguments for the `search` subcommand.
#[derive(clap::Args)]
struct SearchArgs {
    /// Media kind (movie or tv).
    #[arg(long, default_value = "movie")]
    kind: MediaKind,
    /// Search query text.
    #[arg(long, required = true)]
    query: String,
    /// Result page.
    #[arg(long, default_value_t = 1)]
    page: u32,
}

/// Arguments for the `details` subcommand.
#[derive(clap::Args)]
struct DetailsArgs {
    /// Media kind (movie or tv).
    #[arg(long, default_value = "movie")]
    kind: MediaKind,
    /// TMDB record ID.
    #[arg(long, required = true)]
    id: u64,
}

/// Loads config from `--dir` or the default location.
fn load_config(dir: Option<&PathBuf>) -> Result<AppConfig> {
    let config_path = resolve_config_path(dir).context("failed to resolve config path")?;
    AppConfig::load(&config_path).context("failed to load config")
}

/// Resolves the access token: `--token`, then config, then env.
fn resolve_token(cli_token: Option<&str>, config: &AppConfig) -> Result<String> {
    if let Some(token) = cli_token {
        return Ok(token.to_string());
    }
    if !config.api.access_token.is_empty() {
        return Ok(config.api.access_token.clone());
    }
    if let Ok(token) = std::env::var("TMDB_ACCESS_TOKEN")
        && !token.is_empty()
    {
        return Ok(token);
    }
    bail!(
        "no access token: pass --token, set [api] access_token in config.toml, \
         or export TMDB_ACCESS_TOKEN"
    )
}

/// Builds a `TmdbClient` with the resolved token.
///
/// # Errors
///
/// Returns an error if no token is available or the client fails to build.
#[instrument(skip_all)]
fn build_client(cli_token: Option<&str>, config: &AppConfig) -> Result<TmdbClient> {
    let api_token = resolve_token(cli_token, config)?;

    TmdbClient::builder()
        .api_token(api_token)
        .user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ))
        .build()
        .context("failed to build TMDB client")
}

/// Prints grid rows as a table.
fn print_cards(cards: &[MediaCard]) {
    tracing::info!("ID\tTitle\t\t\tDate\t\tRating\tPopularity");
    for card in cards {
        tracing::info!(
            "{}\t{}\t{}\t{}\t{:.0}",
            card.id,
            card.title,
            card.date.as_deref().map_or_else(
                || String::from("-"),
                |d| format_date(d)
            ),
            format_rating(card.vote_average),
            card.popularity,
        );
    }
}

/// Runs the `browse` subcommand.
///
/// # Errors
///
/// Returns an error if the client fails to build or the TUI fails.
#[instrument(skip_all)]
async fn run_browse(args: &BrowseArgs, cli: &Cli) -> Result<()> {
    let config = load_config(cli.dir.as_ref())?;
    let client = Arc::new(build_client(cli.token.as_deref(), &config)?);
    run_dashboard(client, &config, args.kind, args.category).await
}

/// Runs the `discover` subcommand.
///
/// # Errors
///
/// Returns an error if the client fails to build or any page fetch fails.
#[instrument(skip_all)]
async fn run_discover(args: &DiscoverArgs, cli: &Cli) -> Result<()> {
    let config = load_config(cli.dir.as_ref())?;
    let client = Arc::new(build_client(cli.token.as_deref(), &config)?);

    let params = DiscoverParams::new(args.category).windows(config.windows);
    let source = DiscoverSource::new(client, args.kind, params);
    let options = AggregateOptions {
        min_results: config.browse.min_results,
        max_attempts: config.browse.max_page_advance,
    };
    let floor = config.browse.min_popularity;

    let outcome = aggregate(&source, args.page, options, |card| {
        card.popularity >= floor
    })
    .await
    .context("discover run failed")?;

    print_cards(&outcome.items);
    tracing::info!(
        "Total: {} items through page {}{}",
        outcome.items.len(),
        outcome.last_page,
        if outcome.has_more { " (more available)" } else { "" },
    );

    Ok(())
}

/// Runs the `search` subcommand.
///
/// # Errors
///
/// Returns an error if the client fails to build or the request fails.
#[instrument(skip_all)]
async fn run_search(args: &SearchArgs, cli: &Cli) -> Result<()> {
    let config = load_config(cli.dir.as_ref())?;
    let client = build_client(cli.token.as_deref(), &config)?;

    let params = SearchParams::new(&args.query)
        .language(&config.api.language)
        .page(args.page);

    let cards: Vec<MediaCard> = match args.kind {
        MediaKind::Movie => {
            let page = client
                .search_movies(&params)
                .await
                .context("search/movie request failed")?;
            tracing::info!("Total results: {}", page.total_results);
            page.results.iter().map(MediaCard::from).collect()
        }
        MediaKind::Tv => {
            let page = client
                .search_tv(&params)
                .await
                .context("search/tv request failed")?;
            tracing::info!("Total results: {}", page.total_results);
            page.results.iter().map(MediaCard::from).collect()
        }
    };

    print_cards(&cards);

    Ok(())
}

/// Runs the `details` subcommand.
///
/// # Errors
///
/// Returns an error if the client fails to build or the request fails.
#[instrument(skip_all)]
async fn run_details(args: &DetailsArgs, cli: &Cli) -> Result<()> {
    let config = load_config(cli.dir.as_ref())?;
    let client = build_client(cli.token.as_deref(), &config)?;

    let detail: DetailCard = match args.kind {
        MediaKind::Movie => {
            let details = client
                .movie_details(args.id)
                .await
                .context("movie details request failed")?;
            DetailCard::from(&details)
        }
        MediaKind::Tv => {
            let details = client
                .tv_details(args.id)
                .await
                .context("tv details request failed")?;
            DetailCard::from(&details)
        }
    };

    tracing::info!("ID: {}", detail.id);
    tracing::info!("Title: {}", detail.title);
    if let Some(tagline) = &detail.tagline {
        tracing::info!("Tagline: {tagline}");
    }
    tracing::info!(
        "Date: {}",
        detail
            .date
            .as_deref()
            .map_or_else(|| String::from("-"), format_date)
    );
    tracing::info!("Status: {}", detail.status.as_deref().unwrap_or("-"));
    tracing::info!(
        "Rating: {} ({} votes)",
        format_rating(detail.vote_average),
        detail.vote_count
    );
    if let Some(runtime) = detail.runtime_minutes {
        tracing::info!("Runtime: {runtime} min");
    }
    if let (Some(seasons), Some(episodes)) = (detail.seasons, detail.episodes) {
        tracing::info!("Seasons: {seasons}  Episodes: {episodes}");
    }
    if !detail.genres.is_empty() {
        tracing::info!("Genres: {}", detail.genres.join(", "));
    }
    if !detail.production_companies.is_empty() {
        tracing::info!("Production: {}", detail.production_companies.join(", "));
    }
    tracing::info!(
        "Poster: {}",
        image_url(detail.poster_path.as_deref(), ImageSize::Original)
    );
    tracing::info!("---");
    tracing::info!("{}", detail.overview);

    Ok(())
}

/// Entry point.
///
/// # Errors
///
/// Returns an error if subcommand execution fails.
#[tokio::main]
async fn main() -> Result<()> {
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();
    match &cli.command {
        Commands::Browse(args) => run_browse(args, &cli).await,
        Commands::Discover(args) => run_discover(args, &cli).await,
        Commands::Search(args) => run_search(args, &cli).await,
        Commands::Details(args) => run_details(args, &cli).await,
    }
}
