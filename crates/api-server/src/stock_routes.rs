//! Stock Watchlist Routes
//!
//! CRUD and drag-and-drop reordering for the US stock list. The list feed
//! is dashboard-facing: a storage failure there degrades to an empty list
//! instead of breaking the whole board.

use axum::{
    extract::{Path, State},
    routing::{delete, get, post, put},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use watchlist_store::{NewTicker, Ticker, TickerRef, TickerUpdate};

use crate::request_id::RequestId;
use crate::{ApiResponse, AppError, AppState};

/// Wire shape of one stock row.
#[derive(Debug, Serialize)]
pub struct StockTicker {
    pub id: i64,
    pub symbol: String,
    pub company_name: String,
    pub sector: Option<String>,
    pub is_active: bool,
    pub display_order: i64,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl From<Ticker> for StockTicker {
    fn from(t: Ticker) -> Self {
        Self {
            id: t.id,
            symbol: t.key,
            company_name: t.name,
            sector: t.extra,
            is_active: t.is_active,
            display_order: t.display_order,
            created_at: t.created_at,
            updated_at: t.updated_at,
        }
    }
}

/// Body for adding a stock.
#[derive(Debug, Deserialize)]
pub struct AddStockRequest {
    pub symbol: String,
    pub company_name: String,
    pub sector: Option<String>,
}

/// Body for updating a stock; the symbol in the path is immutable.
#[derive(Debug, Deserialize)]
pub struct UpdateStockRequest {
    pub company_name: String,
    pub sector: Option<String>,
    pub is_active: Option<bool>,
}

/// Desired ordering, first symbol renders first. A subset is allowed.
#[derive(Debug, Deserialize)]
pub struct ReorderStocksRequest {
    pub tickers: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ReorderResponse {
    pub updated: u64,
}

pub fn stock_routes() -> Router<AppState> {
    Router::new()
        .route("/api/stocks/tickers", get(list_stocks))
        .route("/api/stocks/tickers", post(add_stock))
        .route("/api/stocks/tickers/reorder", put(reorder_stocks))
        .route("/api/stocks/tickers/:symbol", put(update_stock))
        .route("/api/stocks/tickers/:symbol", delete(delete_stock))
}

async fn list_stocks(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
) -> Json<ApiResponse<Vec<StockTicker>>> {
    let tickers = match state.stocks().list().await {
        Ok(rows) => rows.into_iter().map(StockTicker::from).collect(),
        Err(e) => {
            tracing::warn!(
                request_id = %request_id.0,
                "Stock list unavailable, serving empty: {}",
                e
            );
            Vec::new()
        }
    };

    Json(ApiResponse::success(tickers))
}

async fn add_stock(
    State(state): State<AppState>,
    Json(req): Json<AddStockRequest>,
) -> Result<Json<ApiResponse<StockTicker>>, AppError> {
    let created = state
        .stocks()
        .add(NewTicker {
            key: req.symbol,
            name: req.company_name,
            extra: req.sector,
        })
        .await?;

    Ok(Json(ApiResponse::success(created.into())))
}

async fn update_stock(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
    Json(req): Json<UpdateStockRequest>,
) -> Result<Json<ApiResponse<StockTicker>>, AppError> {
    let updated = state
        .stocks()
        .update(
            TickerRef::Key(symbol),
            TickerUpdate {
                name: req.company_name,
                extra: req.sector,
                is_active: req.is_active,
            },
        )
        .await?;

    Ok(Json(ApiResponse::success(updated.into())))
}

async fn delete_stock(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
) -> Result<Json<ApiResponse<StockTicker>>, AppError> {
    let removed = state.stocks().delete(TickerRef::Key(symbol)).await?;
    Ok(Json(ApiResponse::success(removed.into())))
}

async fn reorder_stocks(
    State(state): State<AppState>,
    Json(req): Json<ReorderStocksRequest>,
) -> Result<Json<ApiResponse<ReorderResponse>>, AppError> {
    let refs: Vec<TickerRef> = req.tickers.into_iter().map(TickerRef::Key).collect();
    let updated = state.stocks().reorder(&refs).await?;

    Ok(Json(ApiResponse::success(ReorderResponse { updated })))
}
