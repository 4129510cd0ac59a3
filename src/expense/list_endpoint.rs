//! Defines the endpoint for listing expenses.

use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
    response::{IntoResponse, Response},
};

use crate::{
    Error,
    db::with_transaction,
    expense::{
        ExpenseState,
        query::{ExpenseFilter, QueryParams, SortOrder, query_expenses, query_params},
    },
    response::ApiResponse,
};

/// A route handler for listing the expenses that match the query filters,
/// newest first.
///
/// When a filter is given more than once, the first value is used.
pub async fn get_expenses_endpoint(
    State(state): State<ExpenseState>,
    query: Result<Query<QueryParams>, QueryRejection>,
) -> Result<Response, Error> {
    let filter = ExpenseFilter::from_query_params(&query_params(query)?);
    tracing::debug!("Listing expenses with {filter:?}");

    let expenses = with_transaction(&state.db_connection, |transaction| {
        query_expenses(&filter, SortOrder::NewestFirst, transaction)
    })?;

    let count = expenses.len();

    Ok(Json(ApiResponse::data(expenses).with_count(count)).into_response())
}

#[cfg(test)]
mod get_expenses_endpoint_tests {
    use axum::{
        extract::{Query, State, rejection::QueryRejection},
        http::StatusCode,
        response::IntoResponse,
    };

    use crate::{
        category::CategoryName,
        expense::{Expense, ExpenseDate, ExpenseState, domain::create_expense, query::QueryParams},
        test_utils::{
            assert_status, count_error_events, get_test_db_connection, parse_json_body,
        },
    };

    use super::get_expenses_endpoint;

    fn get_state_with_expenses() -> ExpenseState {
        let state = ExpenseState {
            db_connection: get_test_db_connection(),
        };

        {
            let connection = state.db_connection.lock().unwrap();
            for (amount, date, category) in [
                (10.0, "2025-01-05", "food"),
                (20.0, "2025-02-10", "bills"),
                (30.0, "2025-03-15", "food"),
            ] {
                create_expense(
                    Expense::build(amount, ExpenseDate::new_unchecked(date))
                        .category(CategoryName::new_unchecked(category)),
                    &connection,
                )
                .unwrap();
            }
        }

        state
    }

    fn query(pairs: &[(&str, &str)]) -> Result<Query<QueryParams>, QueryRejection> {
        Ok(Query(
            pairs
                .iter()
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .collect(),
        ))
    }

    #[tokio::test]
    async fn lists_newest_first_with_count() {
        let state = get_state_with_expenses();

        let response = get_expenses_endpoint(State(state), query(&[]))
            .await
            .expect("Could not list expenses");

        assert_status(&response, StatusCode::OK);
        let body = parse_json_body(response).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["count"], 3);
        assert_eq!(body["data"][0]["date"], "2025-03-15");
        assert_eq!(body["data"][2]["date"], "2025-01-05");
    }

    #[tokio::test]
    async fn applies_filters() {
        let state = get_state_with_expenses();

        let response = get_expenses_endpoint(
            State(state),
            query(&[("category", "food"), ("start_date", "2025-02-01")]),
        )
        .await
        .unwrap();

        let body = parse_json_body(response).await;
        assert_eq!(body["count"], 1);
        assert_eq!(body["data"][0]["amount"], 30.0);
    }

    #[tokio::test]
    async fn repeated_filter_uses_first_value() {
        let state = get_state_with_expenses();

        let response = get_expenses_endpoint(
            State(state),
            query(&[("category", "bills"), ("category", "food")]),
        )
        .await
        .unwrap();

        let body = parse_json_body(response).await;
        assert_eq!(body["count"], 1);
        assert_eq!(body["data"][0]["category"], "bills");
    }

    #[tokio::test]
    async fn empty_result_is_still_success() {
        let state = ExpenseState {
            db_connection: get_test_db_connection(),
        };

        let response = get_expenses_endpoint(State(state), query(&[]))
            .await
            .unwrap();

        let body = parse_json_body(response).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["count"], 0);
        assert_eq!(body["data"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn sql_failure_is_logged_once() {
        let state = get_state_with_expenses();
        state
            .db_connection
            .lock()
            .unwrap()
            .execute("DROP TABLE expenses", ())
            .unwrap();

        let (response, error_count) = count_error_events(async {
            get_expenses_endpoint(State(state), query(&[]))
                .await
                .into_response()
        })
        .await;

        assert_status(&response, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(error_count, 1);
    }
}
