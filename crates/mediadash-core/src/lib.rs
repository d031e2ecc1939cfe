//! Core logic for mediadash.
//!
//! Three independent pieces composed by the dashboard UI:
//!
//! - [`aggregate`](aggregate::aggregate) - bounded backfill over a remote
//!   paginated feed until a minimum result density is reached.
//! - [`SearchSession`](search::SearchSession) - trailing-edge debounce for
//!   search suggestions with stale-response suppression.
//! - [`DashboardState`](dashboard::DashboardState) - explicit state machine
//!   over media kind, category, and browse/search mode.

/// Bounded page aggregation.
pub mod aggregate;
/// Normalized display rows.
pub mod card;
/// Dashboard browse/search state machine.
pub mod dashboard;
/// Debounced search suggestions.
pub mod search;
