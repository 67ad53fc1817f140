//! Product routes.

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use serde::Deserialize;
use tracing::debug;

use crate::{AppState, error::ApiError, middleware::AuthUser};
use saleslens_core::reports::CodeLookupResult;

/// Creates the product routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new().route("/products/search-by-code", get(search_by_code))
}

/// Query parameters for the product-code lookup.
#[derive(Debug, Default, Deserialize)]
pub struct CodeLookupQuery {
    /// Product code to match exactly.
    pub code: Option<String>,
}

/// GET /products/search-by-code
///
/// Lists every batch of a product code with summed quantities. Any
/// authenticated user may call it.
async fn search_by_code(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<CodeLookupQuery>,
) -> Result<Json<CodeLookupResult>, ApiError> {
    let result = state
        .report_service()
        .lookup_by_code(query.code.as_deref())
        .await?;

    debug!(
        user_id = %auth.user_id(),
        batches = result.records.len(),
        "Product code lookup"
    );

    Ok(Json(result))
}
