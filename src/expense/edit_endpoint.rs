//! Defines the endpoint for partially updating an expense.

use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    response::{IntoResponse, Response},
};

use crate::{
    Error,
    database_id::ExpenseId,
    db::with_transaction,
    expense::{
        ExpensePayload, ExpenseState,
        domain::{get_expense, update_expense},
        state::{expense_id, expense_payload},
        validation::validate_expense_update,
    },
    response::ApiResponse,
};

/// A route handler for updating the fields present in the request body.
///
/// The expense must exist before the body is validated, so an unknown ID is
/// always a `404 Not Found` even when the body is invalid.
pub async fn update_expense_endpoint(
    State(state): State<ExpenseState>,
    path: Result<Path<ExpenseId>, PathRejection>,
    body: Result<Json<ExpensePayload>, JsonRejection>,
) -> Result<Response, Error> {
    let expense_id = expense_id(path)?;

    let expense = with_transaction(&state.db_connection, |transaction| {
        get_expense(expense_id, transaction)?;
        let payload = expense_payload(body)?;
        let update = validate_expense_update(&payload, transaction)?;
        update_expense(expense_id, &update, transaction)
    })?;

    tracing::info!("Updated expense {expense_id}");

    let response = ApiResponse::data(expense).with_message("Expense updated successfully");

    Ok(Json(response).into_response())
}
