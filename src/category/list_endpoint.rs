//! Category listing endpoint.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use rusqlite::Connection;

use crate::{
    AppState, Error, category::get_all_categories, db::with_transaction, response::ApiResponse,
};

/// The state needed for listing categories.
#[derive(Debug, Clone)]
pub struct CategoriesEndpointState {
    /// The database connection for reading categories.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CategoriesEndpointState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// List every category, sorted by name.
pub async fn get_categories_endpoint(
    State(state): State<CategoriesEndpointState>,
) -> Result<Response, Error> {
    let categories = with_transaction(&state.db_connection, |transaction| {
        get_all_categories(transaction)
    })?;

    Ok(Json(ApiResponse::data(categories)).into_response())
}
