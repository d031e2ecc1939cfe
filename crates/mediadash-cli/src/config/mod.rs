//! Application configuration module.
//!
//! Manages TOML-based config files for the API access token and
//! browse tuning (popularity floor, page budget, debounce delay).

#[allow(clippy::module_inception)]
mod config;
mod paths;

#[allow(clippy::module_name_repetitions)]
pub use config::AppConfig;
pub use paths::resolve_config_path;
