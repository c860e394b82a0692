use serde::{Deserialize, Serialize};

/// One watchlist row, unified across entity kinds.
///
/// `key`, `name` and `extra` map onto kind-specific columns (`symbol` /
/// `company_name` / `sector` for stocks, `city_code` / `city_name` /
/// `english_name` for weather cities, ...); the repository aliases them in
/// SQL so every kind decodes into this one shape.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Ticker {
    pub id: i64,
    pub key: String,
    pub name: String,
    pub extra: Option<String>,
    pub is_active: bool,
    pub display_order: i64,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// Input for `TickerRepository::add`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewTicker {
    pub key: String,
    pub name: String,
    pub extra: Option<String>,
}

/// Mutable fields for `TickerRepository::update`. The key and the display
/// order are immutable after creation (the order only moves via reorder).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TickerUpdate {
    pub name: String,
    /// `None` leaves the stored value unchanged; a blank string clears it
    /// (rejected for kinds that require the field).
    pub extra: Option<String>,
    /// `None` leaves the active flag unchanged.
    pub is_active: Option<bool>,
}

/// Addresses one row by surrogate id or business key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickerRef {
    Id(i64),
    Key(String),
}

impl TickerRef {
    /// Short form for error messages.
    pub fn describe(&self) -> String {
        match self {
            TickerRef::Id(id) => format!("id {}", id),
            TickerRef::Key(key) => format!("key '{}'", key),
        }
    }
}

impl From<i64> for TickerRef {
    fn from(id: i64) -> Self {
        TickerRef::Id(id)
    }
}

impl From<&str> for TickerRef {
    fn from(key: &str) -> Self {
        TickerRef::Key(key.to_string())
    }
}

impl From<String> for TickerRef {
    fn from(key: String) -> Self {
        TickerRef::Key(key)
    }
}
