//! Defines the endpoint for the spending summary report.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Query, State, rejection::QueryRejection},
    response::{IntoResponse, Response},
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    db::with_transaction,
    expense::{ExpenseFilter, QueryParams, SortOrder, first_value, query_expenses, query_params},
    response::ApiResponse,
    summary::{GroupBy, summarize},
};

/// The state needed for the summary report.
#[derive(Debug, Clone)]
pub struct SummaryEndpointState {
    /// The database connection for reading expenses.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for SummaryEndpointState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The query parameters of the summary report.
#[derive(Debug, Default, PartialEq)]
pub struct SummaryQuery {
    /// One of `total`, `category` or `month`. Anything else means `total`.
    pub group_by: Option<String>,
    /// Only include expenses dated on or after this date.
    pub start_date: Option<String>,
    /// Only include expenses dated on or before this date.
    pub end_date: Option<String>,
}

impl SummaryQuery {
    /// Read the summary parameters from query string pairs, keeping the first
    /// value of a repeated key.
    pub fn from_query_params(params: &[(String, String)]) -> Self {
        Self {
            group_by: first_value(params, "group_by"),
            start_date: first_value(params, "start_date"),
            end_date: first_value(params, "end_date"),
        }
    }
}

/// A route handler for summarizing the expenses in a date range.
pub async fn get_summary_endpoint(
    State(state): State<SummaryEndpointState>,
    query: Result<Query<QueryParams>, QueryRejection>,
) -> Result<Response, Error> {
    let query = SummaryQuery::from_query_params(&query_params(query)?);
    let group_by = query.group_by.as_deref().map(GroupBy::from).unwrap_or_default();
    let filter = ExpenseFilter {
        category: None,
        start_date: query.start_date,
        end_date: query.end_date,
    };

    let expenses = with_transaction(&state.db_connection, |transaction| {
        query_expenses(&filter, SortOrder::Inserted, transaction)
    })?;

    tracing::debug!(
        "Summarizing {} expenses with {filter:?} grouped by {group_by:?}",
        expenses.len()
    );

    Ok(Json(ApiResponse::data(summarize(&expenses, group_by))).into_response())
}

#[cfg(test)]
mod get_summary_endpoint_tests {
    use axum::{
        extract::{Query, State, rejection::QueryRejection},
        http::StatusCode,
    };
    use serde_json::json;

    use crate::{
        category::CategoryName,
        expense::{Expense, ExpenseDate, QueryParams, create_expense},
        test_utils::{assert_status, get_test_db_connection, parse_json_body},
    };

    use super::{SummaryEndpointState, SummaryQuery, get_summary_endpoint};

    fn get_state_with_expenses() -> SummaryEndpointState {
        let state = SummaryEndpointState {
            db_connection: get_test_db_connection(),
        };

        {
            let connection = state.db_connection.lock().unwrap();
            for (amount, date, category) in [
                (10.0, "2025-01-05", "food"),
                (20.0, "2025-02-10", "bills"),
                (30.0, "2025-02-15", "food"),
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

    fn pairs(pairs: &[(&str, &str)]) -> QueryParams {
        pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect()
    }

    fn query(params: &[(&str, &str)]) -> Result<Query<QueryParams>, QueryRejection> {
        Ok(Query(pairs(params)))
    }

    #[test]
    fn reads_first_value_of_each_parameter() {
        let params = pairs(&[
            ("start_date", "2025-02-01"),
            ("group_by", "month"),
            ("start_date", "2024-01-01"),
        ]);

        assert_eq!(
            SummaryQuery::from_query_params(&params),
            SummaryQuery {
                group_by: Some("month".to_owned()),
                start_date: Some("2025-02-01".to_owned()),
                end_date: None,
            }
        );
    }

    #[tokio::test]
    async fn defaults_to_total() {
        let state = get_state_with_expenses();

        let response = get_summary_endpoint(State(state), query(&[]))
            .await
            .expect("Could not get summary");

        assert_status(&response, StatusCode::OK);
        assert_eq!(
            parse_json_body(response).await,
            json!({"success": true, "data": {"total": 60.0, "count": 3}})
        );
    }

    #[tokio::test]
    async fn groups_by_category() {
        let state = get_state_with_expenses();

        let response = get_summary_endpoint(State(state), query(&[("group_by", "category")]))
            .await
            .unwrap();

        let body = parse_json_body(response).await;
        assert_eq!(body["data"]["by_category"]["food"], json!({"total": 40.0, "count": 2}));
        assert_eq!(body["data"]["by_category"]["bills"], json!({"total": 20.0, "count": 1}));
    }

    #[tokio::test]
    async fn applies_date_range() {
        let state = get_state_with_expenses();

        let response = get_summary_endpoint(
            State(state),
            query(&[
                ("group_by", "month"),
                ("start_date", "2025-02-01"),
                ("end_date", "2025-02-28"),
            ]),
        )
        .await
        .unwrap();

        let body = parse_json_body(response).await;
        assert_eq!(body["data"]["total"], 50.0);
        assert_eq!(body["data"]["count"], 2);
        assert_eq!(
            body["data"]["by_month"],
            json!({"2025-02": {"total": 50.0, "count": 2}})
        );
    }

    #[tokio::test]
    async fn repeated_start_date_uses_first_value() {
        let state = get_state_with_expenses();

        let response = get_summary_endpoint(
            State(state),
            query(&[("start_date", "2025-02-12"), ("start_date", "2025-01-01")]),
        )
        .await
        .unwrap();

        let body = parse_json_body(response).await;
        assert_eq!(body["data"]["total"], 30.0);
        assert_eq!(body["data"]["count"], 1);
    }

    #[tokio::test]
    async fn unknown_group_by_is_total() {
        let state = get_state_with_expenses();

        let response = get_summary_endpoint(State(state), query(&[("group_by", "week")]))
            .await
            .unwrap();

        let body = parse_json_body(response).await;
        assert!(body["data"].get("by_category").is_none());
        assert!(body["data"].get("by_month").is_none());
    }
}
