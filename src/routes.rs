// routes.rs
use axum::{
    routing::{get, post},
    Router,
};
use http::{header::CONTENT_TYPE, HeaderValue, Method};
use sqlx::PgPool;
use tower_http::cors::CorsLayer;

use crate::handlers;

pub fn create_routes(pool: PgPool, client_url: &str) -> Router {
    Router::new()
        .route(
            "/polls",
            post(handlers::create_poll).get(handlers::list_polls),
        )
        .route(
            "/polls/{id}",
            get(handlers::get_poll).delete(handlers::delete_poll),
        )
        .route("/options/{id}/vote", post(handlers::vote))
        .layer(cors_layer(client_url))
        .with_state(pool)
}

/// Cross-origin access is limited to the single configured client origin.
/// Every other origin is denied.
fn cors_layer(client_url: &str) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(allowed_origin(client_url))
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([CONTENT_TYPE])
}

fn allowed_origin(client_url: &str) -> HeaderValue {
    client_url
        .parse()
        .expect("CLIENT_URL must be a valid origin")
}
