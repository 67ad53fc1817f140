//! Sales report routes.

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use serde::Deserialize;
use tracing::{info, warn};

use crate::{AppState, error::ApiError, middleware::AuthUser};
use saleslens_core::reports::{ReportRequest, SalesReport};
use saleslens_shared::{AppError, Role};

/// Creates the report routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new().route("/reports/sales", get(get_sales_report))
}

/// Query parameters for the sales report.
#[derive(Debug, Default, Deserialize)]
pub struct SalesReportQuery {
    /// First day of the window (inclusive).
    pub start_date: Option<String>,
    /// Last day of the window (inclusive).
    pub end_date: Option<String>,
}

/// GET /reports/sales
///
/// Admin only. The role is checked before any record is read.
async fn get_sales_report(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<SalesReportQuery>,
) -> Result<Json<SalesReport>, ApiError> {
    if !auth.has_role(Role::Admin) {
        warn!(user_id = %auth.user_id(), role = %auth.role(), "Sales report denied");
        return Err(AppError::Forbidden(
            "Only administrators can view sales reports".to_string(),
        )
        .into());
    }

    let request = ReportRequest {
        start_date: query.start_date,
        end_date: query.end_date,
    };

    let report = state.report_service().build_report(&request).await?;

    info!(
        user_id = %auth.user_id(),
        transactions = report.total_transactions,
        products = report.products.len(),
        "Sales report generated"
    );

    Ok(Json(report))
}
