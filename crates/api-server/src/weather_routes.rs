//! Weather City Routes
//!
//! The weather board tracks cities instead of tickers but shares the exact
//! storage shape. The English name is required because it is the query the
//! weather provider understands; the city code stays immutable and rows are
//! addressed by id.

use axum::{
    extract::{Path, State},
    routing::{delete, get, post, put},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use watchlist_store::{NewTicker, Ticker, TickerRef, TickerUpdate};

use crate::request_id::RequestId;
use crate::{ApiResponse, AppError, AppState};

/// Wire shape of one weather city row.
#[derive(Debug, Serialize)]
pub struct WeatherCity {
    pub id: i64,
    pub city_code: String,
    pub city_name: String,
    pub english_name: Option<String>,
    pub is_active: bool,
    pub display_order: i64,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl From<Ticker> for WeatherCity {
    fn from(t: Ticker) -> Self {
        Self {
            id: t.id,
            city_code: t.key,
            city_name: t.name,
            english_name: t.extra,
            is_active: t.is_active,
            display_order: t.display_order,
            created_at: t.created_at,
            updated_at: t.updated_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AddCityRequest {
    pub city_code: String,
    pub city_name: String,
    pub english_name: Option<String>,
}

/// Body for updating a city; omitting `english_name` keeps the stored one.
#[derive(Debug, Deserialize)]
pub struct UpdateCityRequest {
    pub city_name: String,
    pub english_name: Option<String>,
    pub is_active: Option<bool>,
}

/// Desired ordering as row ids, first id renders first.
#[derive(Debug, Deserialize)]
pub struct ReorderCitiesRequest {
    pub city_ids: Vec<i64>,
}

#[derive(Debug, Serialize)]
pub struct ReorderResponse {
    pub updated: u64,
}

pub fn weather_routes() -> Router<AppState> {
    Router::new()
        .route("/api/weather/cities", get(list_cities))
        .route("/api/weather/cities", post(add_city))
        .route("/api/weather/cities/reorder", put(reorder_cities))
        .route("/api/weather/cities/:id", put(update_city))
        .route("/api/weather/cities/:id", delete(delete_city))
}

async fn list_cities(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
) -> Json<ApiResponse<Vec<WeatherCity>>> {
    let cities = match state.weather_cities().list().await {
        Ok(rows) => rows.into_iter().map(WeatherCity::from).collect(),
        Err(e) => {
            tracing::warn!(
                request_id = %request_id.0,
                "City list unavailable, serving empty: {}",
                e
            );
            Vec::new()
        }
    };

    Json(ApiResponse::success(cities))
}

async fn add_city(
    State(state): State<AppState>,
    Json(req): Json<AddCityRequest>,
) -> Result<Json<ApiResponse<WeatherCity>>, AppError> {
    let created = state
        .weather_cities()
        .add(NewTicker {
            key: req.city_code,
            name: req.city_name,
            extra: req.english_name,
        })
        .await?;

    Ok(Json(ApiResponse::success(created.into())))
}

async fn update_city(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateCityRequest>,
) -> Result<Json<ApiResponse<WeatherCity>>, AppError> {
    let updated = state
        .weather_cities()
        .update(
            TickerRef::Id(id),
            TickerUpdate {
                name: req.city_name,
                extra: req.english_name,
                is_active: req.is_active,
            },
        )
        .await?;

    Ok(Json(ApiResponse::success(updated.into())))
}

async fn delete_city(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<WeatherCity>>, AppError> {
    let removed = state.weather_cities().delete(TickerRef::Id(id)).await?;
    Ok(Json(ApiResponse::success(removed.into())))
}

async fn reorder_cities(
    State(state): State<AppState>,
    Json(req): Json<ReorderCitiesRequest>,
) -> Result<Json<ApiResponse<ReorderResponse>>, AppError> {
    let refs: Vec<TickerRef> = req.city_ids.into_iter().map(TickerRef::Id).collect();
    let updated = state.weather_cities().reorder(&refs).await?;

    Ok(Json(ApiResponse::success(ReorderResponse { updated })))
}
