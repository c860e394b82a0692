//! Watchlist Store
//!
//! Ordered, user-curated collections of tracked items for the dashboard:
//! US stocks, crypto, Korean stocks, and weather cities. All four kinds
//! share one schema shape (key, display name, active flag, display order)
//! and one generic repository; per-kind differences such as delete
//! semantics and uniqueness scope live in static kind descriptors.

pub mod db;
pub mod error;
pub mod kind;
pub mod models;
pub mod repository;
pub mod seed;

pub use db::WatchlistDb;
pub use error::StoreError;
pub use kind::{DeleteMode, TickerKind, UniquenessScope, CRYPTO, KOREAN_STOCKS, STOCKS, WEATHER_CITIES};
pub use models::{NewTicker, Ticker, TickerRef, TickerUpdate};
pub use repository::TickerRepository;
