//! Defines the endpoint for fetching a single expense.

use axum::{
    Json,
    extract::{Path, State, rejection::PathRejection},
    response::{IntoResponse, Response},
};

use crate::{
    Error,
    database_id::ExpenseId,
    db::with_transaction,
    expense::{ExpenseState, domain::get_expense, state::expense_id},
    response::ApiResponse,
};

/// A route handler for getting an expense by its ID.
pub async fn get_expense_endpoint(
    State(state): State<ExpenseState>,
    path: Result<Path<ExpenseId>, PathRejection>,
) -> Result<Response, Error> {
    let expense_id = expense_id(path)?;

    let expense = with_transaction(&state.db_connection, |transaction| {
        get_expense(expense_id, transaction)
    })?;

    Ok(Json(ApiResponse::data(expense)).into_response())
}
