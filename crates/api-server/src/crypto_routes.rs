//! Crypto Watchlist Routes
//!
//! Same contract as the stock routes over the crypto collection; rows carry
//! a chart-site coin id next to the symbol.

use axum::{
    extract::{Path, State},
    routing::{delete, get, post, put},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use watchlist_store::{NewTicker, Ticker, TickerRef, TickerUpdate};

use crate::request_id::RequestId;
use crate::{ApiResponse, AppError, AppState};

/// Wire shape of one crypto row.
#[derive(Debug, Serialize)]
pub struct CryptoTicker {
    pub id: i64,
    pub symbol: String,
    pub name: String,
    pub coin_id: Option<String>,
    pub is_active: bool,
    pub display_order: i64,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl From<Ticker> for CryptoTicker {
    fn from(t: Ticker) -> Self {
        Self {
            id: t.id,
            symbol: t.key,
            name: t.name,
            coin_id: t.extra,
            is_active: t.is_active,
            display_order: t.display_order,
            created_at: t.created_at,
            updated_at: t.updated_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AddCryptoRequest {
    pub symbol: String,
    pub name: String,
    pub coin_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateCryptoRequest {
    pub name: String,
    pub coin_id: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct ReorderCryptoRequest {
    pub tickers: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ReorderResponse {
    pub updated: u64,
}

pub fn crypto_routes() -> Router<AppState> {
    Router::new()
        .route("/api/crypto/tickers", get(list_crypto))
        .route("/api/crypto/tickers", post(add_crypto))
        .route("/api/crypto/tickers/reorder", put(reorder_crypto))
        .route("/api/crypto/tickers/:symbol", put(update_crypto))
        .route("/api/crypto/tickers/:symbol", delete(delete_crypto))
}

async fn list_crypto(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
) -> Json<ApiResponse<Vec<CryptoTicker>>> {
    let tickers = match state.crypto().list().await {
        Ok(rows) => rows.into_iter().map(CryptoTicker::from).collect(),
        Err(e) => {
            tracing::warn!(
                request_id = %request_id.0,
                "Crypto list unavailable, serving empty: {}",
                e
            );
            Vec::new()
        }
    };

    Json(ApiResponse::success(tickers))
}

async fn add_crypto(
    State(state): State<AppState>,
    Json(req): Json<AddCryptoRequest>,
) -> Result<Json<ApiResponse<CryptoTicker>>, AppError> {
    let created = state
        .crypto()
        .add(NewTicker {
            key: req.symbol,
            name: req.name,
            extra: req.coin_id,
        })
        .await?;

    Ok(Json(ApiResponse::success(created.into())))
}

async fn update_crypto(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
    Json(req): Json<UpdateCryptoRequest>,
) -> Result<Json<ApiResponse<CryptoTicker>>, AppError> {
    let updated = state
        .crypto()
        .update(
            TickerRef::Key(symbol),
            TickerUpdate {
                name: req.name,
                extra: req.coin_id,
                is_active: req.is_active,
            },
        )
        .await?;

    Ok(Json(ApiResponse::success(updated.into())))
}

async fn delete_crypto(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
) -> Result<Json<ApiResponse<CryptoTicker>>, AppError> {
    let removed = state.crypto().delete(TickerRef::Key(symbol)).await?;
    Ok(Json(ApiResponse::success(removed.into())))
}

async fn reorder_crypto(
    State(state): State<AppState>,
    Json(req): Json<ReorderCryptoRequest>,
) -> Result<Json<ApiResponse<ReorderResponse>>, AppError> {
    let refs: Vec<TickerRef> = req.tickers.into_iter().map(TickerRef::Key).collect();
    let updated = state.crypto().reorder(&refs).await?;

    Ok(Json(ApiResponse::success(ReorderResponse { updated })))
}
