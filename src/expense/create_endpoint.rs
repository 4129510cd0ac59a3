//! Defines the endpoint for recording a new expense.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{
    Error,
    db::with_transaction,
    expense::{
        ExpensePayload, ExpenseState, domain::create_expense, state::expense_payload,
        validation::validate_new_expense,
    },
    response::ApiResponse,
};

/// A route handler for creating a new expense.
///
/// Responds with `201 Created` and the stored expense, or `400 Bad Request`
/// listing every validation error.
pub async fn create_expense_endpoint(
    State(state): State<ExpenseState>,
    body: Result<Json<ExpensePayload>, JsonRejection>,
) -> Result<Response, Error> {
    let payload = expense_payload(body)?;

    let expense = with_transaction(&state.db_connection, |transaction| {
        let new_expense = validate_new_expense(&payload, transaction)?;
        create_expense(new_expense, transaction)
    })?;

    tracing::info!("Created expense {}", expense.id);

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::data(expense).with_message("Expense added successfully")),
    )
        .into_response())
}
