//! Korean Stock Watchlist Routes
//!
//! KRX codes are numeric, so rows are addressed by id instead of by key.
//! Deletes here remove the row outright; there is no inactive archive for
//! this collection.

use axum::{
    extract::{Path, State},
    routing::{delete, get, post, put},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use watchlist_store::{NewTicker, Ticker, TickerRef, TickerUpdate};

use crate::request_id::RequestId;
use crate::{ApiResponse, AppError, AppState};

/// Wire shape of one Korean stock row.
#[derive(Debug, Serialize)]
pub struct KoreanStockTicker {
    pub id: i64,
    pub ticker_code: String,
    pub ticker_name: String,
    pub is_active: bool,
    pub display_order: i64,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl From<Ticker> for KoreanStockTicker {
    fn from(t: Ticker) -> Self {
        Self {
            id: t.id,
            ticker_code: t.key,
            ticker_name: t.name,
            is_active: t.is_active,
            display_order: t.display_order,
            created_at: t.created_at,
            updated_at: t.updated_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AddKoreanStockRequest {
    pub ticker_code: String,
    pub ticker_name: String,
}

/// Body for updating a row; the ticker code is immutable.
#[derive(Debug, Deserialize)]
pub struct UpdateKoreanStockRequest {
    pub ticker_name: String,
    pub is_active: Option<bool>,
}

/// Desired ordering as row ids, first id renders first.
#[derive(Debug, Deserialize)]
pub struct ReorderKoreanStocksRequest {
    #[serde(alias = "tickerIds")]
    pub ticker_ids: Vec<i64>,
}

#[derive(Debug, Serialize)]
pub struct ReorderResponse {
    pub updated: u64,
}

pub fn korean_stock_routes() -> Router<AppState> {
    Router::new()
        .route("/api/korean-stocks/tickers", get(list_korean_stocks))
        .route("/api/korean-stocks/tickers", post(add_korean_stock))
        .route("/api/korean-stocks/tickers/reorder", put(reorder_korean_stocks))
        .route("/api/korean-stocks/tickers/:id", put(update_korean_stock))
        .route("/api/korean-stocks/tickers/:id", delete(delete_korean_stock))
}

async fn list_korean_stocks(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
) -> Json<ApiResponse<Vec<KoreanStockTicker>>> {
    let tickers = match state.korean_stocks().list().await {
        Ok(rows) => rows.into_iter().map(KoreanStockTicker::from).collect(),
        Err(e) => {
            tracing::warn!(
                request_id = %request_id.0,
                "Korean stock list unavailable, serving empty: {}",
                e
            );
            Vec::new()
        }
    };

    Json(ApiResponse::success(tickers))
}

async fn add_korean_stock(
    State(state): State<AppState>,
    Json(req): Json<AddKoreanStockRequest>,
) -> Result<Json<ApiResponse<KoreanStockTicker>>, AppError> {
    let created = state
        .korean_stocks()
        .add(NewTicker {
            key: req.ticker_code,
            name: req.ticker_name,
            extra: None,
        })
        .await?;

    Ok(Json(ApiResponse::success(created.into())))
}

async fn update_korean_stock(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateKoreanStockRequest>,
) -> Result<Json<ApiResponse<KoreanStockTicker>>, AppError> {
    let updated = state
        .korean_stocks()
        .update(
            TickerRef::Id(id),
            TickerUpdate {
                name: req.ticker_name,
                extra: None,
                is_active: req.is_active,
            },
        )
        .await?;

    Ok(Json(ApiResponse::success(updated.into())))
}

async fn delete_korean_stock(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<KoreanStockTicker>>, AppError> {
    let removed = state.korean_stocks().delete(TickerRef::Id(id)).await?;
    Ok(Json(ApiResponse::success(removed.into())))
}

async fn reorder_korean_stocks(
    State(state): State<AppState>,
    Json(req): Json<ReorderKoreanStocksRequest>,
) -> Result<Json<ApiResponse<ReorderResponse>>, AppError> {
    let refs: Vec<TickerRef> = req.ticker_ids.into_iter().map(TickerRef::Id).collect();
    let updated = state.korean_stocks().reorder(&refs).await?;

    Ok(Json(ApiResponse::success(ReorderResponse { updated })))
}
