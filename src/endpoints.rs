//! The API endpoints URIs.
//!
//! For endpoints that take a parameter, e.g., '/api/expenses/{expense_id}', use [format_endpoint].

/// The route to list and create expenses.
pub const EXPENSES: &str = "/api/expenses";
/// The route to get, update and delete a single expense.
pub const EXPENSE: &str = "/api/expenses/{expense_id}";
/// The route to list the spending categories.
pub const CATEGORIES: &str = "/api/categories";
/// The route for the spending summary report.
pub const SUMMARY: &str = "/api/reports/summary";
/// The route for checking that the server is up.
pub const HEALTH: &str = "/api/health";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/api/expenses/{expense_id}', '{expense_id}' is the parameter.
///
/// This function assumes that an endpoint path only contains ASCII characters
/// and a single parameter.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, id: i64) -> String {
    let Some(param_start) = endpoint_path.find('{') else {
        return endpoint_path.to_owned();
    };

    let param_end = endpoint_path[param_start..]
        .find('}')
        .map_or(endpoint_path.len(), |end| param_start + end + 1);

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        id,
        &endpoint_path[param_end..]
    )
}
