//! HTTP API layer with Axum routes and middleware.
//!
//! This crate provides:
//! - REST API routes for the sales report and product-code lookup
//! - Authentication middleware
//! - JSON error responses

pub mod error;
pub mod middleware;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use chrono_tz::Tz;
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use saleslens_core::reports::{RangeResolver, SalesReportService};
use saleslens_db::SalesReportRepository;
use saleslens_shared::JwtService;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: Arc<DatabaseConnection>,
    /// JWT service for token operations.
    pub jwt_service: Arc<JwtService>,
    /// Time zone report days are aligned to.
    pub report_timezone: Tz,
}

impl AppState {
    /// Report service over the database-backed record store.
    #[must_use]
    pub fn report_service(&self) -> SalesReportService<SalesReportRepository> {
        SalesReportService::new(
            Arc::new(SalesReportRepository::new((*self.db).clone())),
            RangeResolver::new(self.report_timezone),
        )
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes_with_state(state.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
