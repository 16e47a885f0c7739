//! AlphaScreen Runner: screen orchestration on top of `alphascreen-core`.
//!
//! - TOML screen configuration
//! - Batch screening with bounded fan-out and a rejection tally
//! - CSV/JSON export of ranked results
//! - Favorites store (JSON file or in-memory)

pub mod config;
pub mod export;
pub mod favorites;
pub mod screener;

pub use config::{ConfigError, ScreenConfig};
pub use export::{export_csv, export_json, write_export, ExportFormat};
pub use favorites::{
    add_favorite, remove_favorite, FavoritesError, FavoritesStore, JsonFavoritesStore,
    MemoryFavoritesStore,
};
pub use screener::{
    parse_tickers, run_screen, run_screen_at, RejectedTicker, ScreenError, ScreenReport,
};
