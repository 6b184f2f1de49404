use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

pub mod handlers;
pub mod state;

pub use state::AppState;

pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::permissive();

    Router::new()
        .route("/", get(handlers::root))
        .route("/fetch_news", get(handlers::fetch_news))
        .route("/articles", get(handlers::articles_by_category))
        .route("/articles/all", get(handlers::all_articles))
        .route("/healthz", get(handlers::healthz))
        .layer(cors)
        .with_state(Arc::new(state))
}

pub mod prelude {
    pub use crate::AppState;
    pub use ng_core::{Error, Result, StoredArticle};
}
