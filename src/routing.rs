//! Application router configuration.

use axum::{
    Json, Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use tower_http::cors::CorsLayer;

use crate::{
    AppState,
    category::get_categories_endpoint,
    endpoints,
    expense::{
        create_expense_endpoint, delete_expense_endpoint, get_expense_endpoint,
        get_expenses_endpoint, update_expense_endpoint,
    },
    response::ApiResponse,
    summary::get_summary_endpoint,
};

/// Return a router with all the app's routes.
///
/// Cross-origin requests are allowed from any origin so that a browser
/// front-end served from elsewhere can call the API.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            endpoints::EXPENSES,
            get(get_expenses_endpoint).post(create_expense_endpoint),
        )
        .route(
            endpoints::EXPENSE,
            get(get_expense_endpoint)
                .put(update_expense_endpoint)
                .delete(delete_expense_endpoint),
        )
        .route(endpoints::CATEGORIES, get(get_categories_endpoint))
        .route(endpoints::SUMMARY, get(get_summary_endpoint))
        .route(endpoints::HEALTH, get(get_health))
        .fallback(get_404_not_found)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Report that the server is up.
async fn get_health() -> Json<ApiResponse> {
    Json(ApiResponse::message("Expense Tracker API is running"))
}

async fn get_404_not_found() -> Response {
    (StatusCode::NOT_FOUND, Json(ApiResponse::error("Not found"))).into_response()
}
