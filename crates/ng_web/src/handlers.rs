use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use ng_core::Error;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

use crate::AppState;

/// JSON error envelope: `{"detail": "..."}` with a meaningful status.
pub struct ApiError {
    status: StatusCode,
    detail: String,
}

impl ApiError {
    fn not_found(detail: String) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            detail,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "detail": self.detail }))).into_response()
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        let status = match err {
            Error::Database(_) | Error::Io(_) | Error::Serialization(_) | Error::External(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            _ => StatusCode::BAD_REQUEST,
        };
        Self {
            status,
            detail: err.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct FetchNewsParams {
    pub api_key: Option<String>,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default = "default_country")]
    pub country: String,
}

#[derive(Debug, Deserialize)]
pub struct CategoryParams {
    pub category: String,
    #[serde(default = "default_category_limit")]
    pub limit: i64,
}

#[derive(Debug, Deserialize)]
pub struct AllParams {
    #[serde(default = "default_all_limit")]
    pub limit: i64,
}

fn default_category() -> String {
    "business".to_string()
}

fn default_country() -> String {
    "us".to_string()
}

fn default_category_limit() -> i64 {
    20
}

fn default_all_limit() -> i64 {
    100
}

pub async fn root() -> impl IntoResponse {
    Json(json!({
        "message": "News ingestion API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "fetch_news": "GET /fetch_news?category=business&country=us",
            "get_articles_by_category": "GET /articles?category=business&limit=20",
            "get_all_articles": "GET /articles/all?limit=100"
        }
    }))
}

/// On-demand fetch → score → store for one category, synchronous with the
/// request. Fetch failures come back as a 400 with the error message.
pub async fn fetch_news(
    State(state): State<Arc<AppState>>,
    Query(params): Query<FetchNewsParams>,
) -> Result<impl IntoResponse, ApiError> {
    let report = state
        .manager
        .ingest(&params.category, &params.country, params.api_key.as_deref())
        .await?;

    Ok(Json(json!({
        "status": "success",
        "count": report.fetched,
        "saved_to_db": report.saved,
        "articles": report.articles,
        "category": params.category,
        "country": params.country,
    })))
}

pub async fn articles_by_category(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CategoryParams>,
) -> Result<impl IntoResponse, ApiError> {
    let articles = state.store.by_category(&params.category, params.limit).await?;

    if articles.is_empty() {
        return Err(ApiError::not_found(format!(
            "No articles found for category: {}",
            params.category
        )));
    }

    Ok(Json(json!({
        "status": "success",
        "category": params.category,
        "count": articles.len(),
        "articles": articles,
    })))
}

pub async fn all_articles(
    State(state): State<Arc<AppState>>,
    Query(params): Query<AllParams>,
) -> Result<impl IntoResponse, ApiError> {
    let articles = state.store.all(params.limit).await?;

    if articles.is_empty() {
        return Err(ApiError::not_found("No articles found in database".to_string()));
    }

    Ok(Json(json!({
        "status": "success",
        "count": articles.len(),
        "articles": articles,
    })))
}

pub async fn healthz() -> impl IntoResponse {
    Json(json!({ "status": "healthy" }))
}
