//! Expense Tracker is a small JSON API for recording personal expenses.
//!
//! Clients create, read, update and delete expenses, list the predefined
//! spending categories, and request summaries of their spending grouped by
//! category or month. Everything is stored in a single SQLite database file.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use tokio::signal;

mod app_state;
mod category;
mod database_id;
mod db;
mod endpoints;
mod expense;
mod logging;
mod response;
mod routing;
mod summary;
#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use category::{Category, CategoryName, DEFAULT_CATEGORIES, get_all_categories};
pub use database_id::{CategoryId, DatabaseId, ExpenseId};
pub use db::{initialize as initialize_db, with_transaction};
pub use endpoints::format_endpoint;
pub use expense::{
    Expense, ExpenseDate, ExpenseFilter, ExpensePayload, ExpenseUpdate, NewExpense,
    create_expense, delete_expense, get_expense, update_expense, validate_expense,
    validate_expense_update, validate_new_expense,
};
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use routing::build_router;
pub use summary::{Bucket, Buckets, GroupBy, SummaryResult, summarize};

use crate::response::ApiResponse;

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// An expense payload broke one or more field rules.
    ///
    /// Every violation is collected so the client can fix them all in one
    /// round trip. The messages are shown to the client verbatim.
    #[error("invalid expense: {}", .0.join("; "))]
    Validation(Vec<String>),

    /// The request body is not a JSON object.
    ///
    /// Callers should pass in the reason the body was rejected, it is shown
    /// to the client.
    #[error("invalid JSON body: {0}")]
    InvalidJson(String),

    /// The query string could not be read.
    ///
    /// Callers should pass in the reason the query was rejected, it is shown
    /// to the client.
    #[error("invalid query string: {0}")]
    InvalidQuery(String),

    /// An update request did not contain any of the updatable fields.
    #[error("No fields to update")]
    NoFieldsToUpdate,

    /// A date string could not be parsed as an ISO 8601 date or date-time.
    #[error("\"{0}\" is not an ISO 8601 date")]
    InvalidDate(String),

    /// The requested resource was not found.
    ///
    /// For HTTP request handlers, the client should check that the ID is
    /// correct and that the expense has not already been deleted.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => Error::SqlError(error),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::Validation(errors) => {
                tracing::debug!("Validation errors: {errors:?}");
                (StatusCode::BAD_REQUEST, Json(ApiResponse::errors(errors))).into_response()
            }
            Error::InvalidJson(reason) | Error::InvalidQuery(reason) => {
                (StatusCode::BAD_REQUEST, Json(ApiResponse::error(&reason))).into_response()
            }
            Error::NoFieldsToUpdate => (
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::error("No fields to update")),
            )
                .into_response(),
            Error::NotFound => (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::error("Expense not found")),
            )
                .into_response(),
            // Any errors that are not handled above are not intended to be shown to the client.
            // This is the one place server errors are logged, the request span adds the context.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ApiResponse::error(
                        "An unexpected error occurred, check the server logs for more details.",
                    )),
                )
                    .into_response()
            }
        }
    }
}
