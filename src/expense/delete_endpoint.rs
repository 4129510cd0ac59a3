//! Defines the endpoint for deleting an expense.

use axum::{
    Json,
    extract::{Path, State, rejection::PathRejection},
    response::{IntoResponse, Response},
};

use crate::{
    Error,
    database_id::ExpenseId,
    db::with_transaction,
    expense::{ExpenseState, domain::delete_expense, state::expense_id},
    response::ApiResponse,
};

/// A route handler for deleting an expense.
pub async fn delete_expense_endpoint(
    State(state): State<ExpenseState>,
    path: Result<Path<ExpenseId>, PathRejection>,
) -> Result<Response, Error> {
    let expense_id = expense_id(path)?;

    with_transaction(&state.db_connection, |transaction| {
        delete_expense(expense_id, transaction)
    })?;

    tracing::info!("Deleted expense {expense_id}");

    Ok(Json(ApiResponse::message("Expense deleted successfully")).into_response())
}

#[cfg(test)]
mod delete_expense_endpoint_tests {
    use axum::{
        extract::{Path, State},
        http::StatusCode,
    };
    use serde_json::json;

    use crate::{
        Error,
        expense::{Expense, ExpenseDate, ExpenseState, domain::create_expense},
        test_utils::{assert_status, get_test_db_connection, parse_json_body},
    };

    use super::delete_expense_endpoint;

    #[tokio::test]
    async fn deletes_expense() {
        let state = ExpenseState {
            db_connection: get_test_db_connection(),
        };
        let expense = {
            let connection = state.db_connection.lock().unwrap();
            create_expense(
                Expense::build(10.0, ExpenseDate::new_unchecked("2025-10-04")),
                &connection,
            )
            .unwrap()
        };

        let response = delete_expense_endpoint(State(state.clone()), Ok(Path(expense.id)))
            .await
            .expect("Could not delete expense");

        assert_status(&response, StatusCode::OK);
        assert_eq!(
            parse_json_body(response).await,
            json!({"success": true, "message": "Expense deleted successfully"})
        );

        let result = delete_expense_endpoint(State(state), Ok(Path(expense.id))).await;
        assert_eq!(result.err(), Some(Error::NotFound));
    }
}
