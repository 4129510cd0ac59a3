//! Shared state and request helpers for the expense endpoints.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{
        FromRef, Path,
        rejection::{JsonRejection, PathRejection},
    },
};
use rusqlite::Connection;

use crate::{AppState, Error, database_id::ExpenseId, expense::ExpensePayload};

/// The state needed to manage expenses.
#[derive(Debug, Clone)]
pub struct ExpenseState {
    /// The database connection for managing expenses.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for ExpenseState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Treat an expense ID that is not an integer as an expense that does not exist.
pub(super) fn expense_id(
    path: Result<Path<ExpenseId>, PathRejection>,
) -> Result<ExpenseId, Error> {
    path.map(|Path(expense_id)| expense_id).map_err(|rejection| {
        tracing::debug!("Rejected expense ID: {rejection}");
        Error::NotFound
    })
}

/// Unwrap a JSON body, turning a malformed body into an [Error::InvalidJson].
pub(super) fn expense_payload(
    body: Result<Json<ExpensePayload>, JsonRejection>,
) -> Result<ExpensePayload, Error> {
    body.map(|Json(payload)| payload)
        .map_err(|rejection| Error::InvalidJson(rejection.body_text()))
}
