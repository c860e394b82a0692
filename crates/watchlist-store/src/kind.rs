//! Entity-kind descriptors for the four watchlist collections.
//!
//! Everything that differs between the collections is data here, not code:
//! table and column names, delete semantics, uniqueness scope, key
//! normalization. The repository reads these descriptors and runs one code
//! path for all kinds.

/// How `delete` treats a row of this kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteMode {
    /// Set `is_active = 0`; the row stays in storage and its key becomes
    /// reusable by a later add.
    Soft,
    /// Remove the row outright.
    Hard,
}

/// Which rows the add-time duplicate check runs against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniquenessScope {
    /// Only active rows conflict; a soft-deleted key may be re-added.
    ActiveOnly,
    /// Any row conflicts.
    AllRows,
}

/// Static description of one watchlist collection.
#[derive(Debug)]
pub struct TickerKind {
    /// Human label used in error messages and logs.
    pub label: &'static str,
    pub table: &'static str,
    /// Business-key column (symbol / ticker_code / city_code).
    pub key_column: &'static str,
    /// Display-name column.
    pub name_column: &'static str,
    /// Optional metadata column (sector / coin_id / english_name).
    pub extra_column: Option<&'static str>,
    /// Whether the metadata column must be non-blank on add.
    pub extra_required: bool,
    /// Keys are uppercased before every check and write.
    pub uppercase_keys: bool,
    pub delete_mode: DeleteMode,
    pub uniqueness: UniquenessScope,
}

/// US stock tickers (Yahoo Finance symbols).
pub static STOCKS: TickerKind = TickerKind {
    label: "stock ticker",
    table: "stock_tickers",
    key_column: "symbol",
    name_column: "company_name",
    extra_column: Some("sector"),
    extra_required: false,
    uppercase_keys: true,
    delete_mode: DeleteMode::Soft,
    uniqueness: UniquenessScope::ActiveOnly,
};

/// Crypto tickers (CoinMarketCap symbols, with the site's coin id kept
/// alongside for chart links).
pub static CRYPTO: TickerKind = TickerKind {
    label: "crypto ticker",
    table: "crypto_tickers",
    key_column: "symbol",
    name_column: "name",
    extra_column: Some("coin_id"),
    extra_required: false,
    uppercase_keys: true,
    delete_mode: DeleteMode::Soft,
    uniqueness: UniquenessScope::ActiveOnly,
};

/// Korean stock tickers (six-digit KRX codes; codes are numeric so no case
/// normalization applies).
pub static KOREAN_STOCKS: TickerKind = TickerKind {
    label: "korean stock ticker",
    table: "korean_stock_tickers",
    key_column: "ticker_code",
    name_column: "ticker_name",
    extra_column: None,
    extra_required: false,
    uppercase_keys: false,
    delete_mode: DeleteMode::Hard,
    uniqueness: UniquenessScope::AllRows,
};

/// Weather cities (OpenWeatherMap query codes; the English name drives the
/// weather lookup and is required).
pub static WEATHER_CITIES: TickerKind = TickerKind {
    label: "weather city",
    table: "weather_cities",
    key_column: "city_code",
    name_column: "city_name",
    extra_column: Some("english_name"),
    extra_required: true,
    uppercase_keys: false,
    delete_mode: DeleteMode::Hard,
    uniqueness: UniquenessScope::AllRows,
};
