//! Recording, listing, updating and deleting expenses.

mod create_endpoint;
mod date;
mod delete_endpoint;
mod domain;
mod edit_endpoint;
mod get_endpoint;
mod list_endpoint;
mod query;
mod state;
mod validation;

pub use create_endpoint::create_expense_endpoint;
pub use date::ExpenseDate;
pub use delete_endpoint::delete_expense_endpoint;
pub use domain::{
    Expense, ExpenseUpdate, NewExpense, create_expense, create_expense_table, delete_expense,
    get_expense, update_expense,
};
pub use edit_endpoint::update_expense_endpoint;
pub use get_endpoint::get_expense_endpoint;
pub use list_endpoint::get_expenses_endpoint;
pub use query::ExpenseFilter;
pub(crate) use query::{QueryParams, SortOrder, first_value, query_expenses, query_params};
pub use state::ExpenseState;
pub use validation::{
    ExpensePayload, validate_expense, validate_expense_update, validate_new_expense,
};
