//! # foodhub-api
//!
//! HTTP boundary for FoodHub order placement and status tracking.
//!
//! Handlers parse JSON into `foodhub-core` request types, call the
//! `OrderService` from `foodhub-db` and map `OrderError` onto status codes.
//! No order rules live here.

pub mod config;
pub mod error;
pub mod routes;

use std::time::Duration;

use axum::http::StatusCode;
use axum::routing::{get, put};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

pub use config::{ApiConfig, ConfigError};
pub use error::{ApiError, ErrorCode};
pub use routes::AppState;

/// Creates the Axum application router with all routes and shared state.
///
/// A request still running after `request_timeout` is answered with
/// `408 Request Timeout`; its handler future is dropped, which rolls back
/// any open transaction.
pub fn create_app(state: AppState, request_timeout: Duration) -> Router {
    Router::new()
        .route("/health", get(routes::health::check))
        .route(
            "/api/orders",
            get(routes::orders::list).post(routes::orders::create),
        )
        .route("/api/order", get(routes::orders::get))
        .route("/api/order/items", get(routes::orders::items))
        .route("/api/order/status", put(routes::orders::update_status))
        .with_state(state)
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}
