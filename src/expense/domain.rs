//! Defines the core data models and database queries for expenses.

use rusqlite::{Connection, Row, ToSql};
use serde::{Deserialize, Serialize};

use crate::{Error, category::CategoryName, database_id::ExpenseId, expense::ExpenseDate};

// ============================================================================
// MODELS
// ============================================================================

/// A record of money spent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// The ID of the expense, assigned by the database.
    pub id: ExpenseId,
    /// How much was spent. Always greater than zero.
    pub amount: f64,
    /// When the money was spent.
    pub date: ExpenseDate,
    /// A free text description of the expense.
    pub note: String,
    /// The name of the category the expense is filed under.
    pub category: CategoryName,
    /// When the expense was recorded, in UTC (`YYYY-MM-DD HH:MM:SS`).
    ///
    /// Set by the database on insert and never changed afterwards.
    pub created_at: String,
}

impl Expense {
    /// Create a new expense.
    ///
    /// Shortcut for [NewExpense] for discoverability.
    pub fn build(amount: f64, date: ExpenseDate) -> NewExpense {
        NewExpense {
            amount,
            date,
            note: String::new(),
            category: CategoryName::default(),
        }
    }
}

/// The fields needed to insert an expense.
///
/// Use [Expense::build] to get a builder with the default note and category.
///
/// # Examples
///
/// ```ignore
/// use crate::expense::{Expense, ExpenseDate};
///
/// let new_expense = Expense::build(25.5, ExpenseDate::parse("2025-10-04").unwrap())
///     .note("Lunch")
///     .category(CategoryName::new_unchecked("food"));
/// ```
#[derive(Debug, PartialEq, Clone)]
pub struct NewExpense {
    /// The amount spent, greater than zero.
    pub amount: f64,
    /// When the money was spent.
    pub date: ExpenseDate,
    /// Defaults to an empty string.
    pub note: String,
    /// Defaults to "other".
    pub category: CategoryName,
}

impl NewExpense {
    /// Set the note for the expense.
    pub fn note(mut self, note: &str) -> Self {
        self.note = note.to_owned();
        self
    }

    /// Set the category for the expense.
    pub fn category(mut self, category: CategoryName) -> Self {
        self.category = category;
        self
    }
}

/// A partial update to an expense.
///
/// `None` means the field was absent from the request and keeps its current
/// value; `Some` means the field is overwritten.
#[derive(Debug, Default, PartialEq, Clone)]
pub struct ExpenseUpdate {
    /// The new amount, greater than zero.
    pub amount: Option<f64>,
    /// The new date.
    pub date: Option<ExpenseDate>,
    /// The new note.
    pub note: Option<String>,
    /// The new category.
    pub category: Option<CategoryName>,
}

impl ExpenseUpdate {
    /// Whether the update would not change any field.
    pub fn is_empty(&self) -> bool {
        self.amount.is_none()
            && self.date.is_none()
            && self.note.is_none()
            && self.category.is_none()
    }
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

const EXPENSE_COLUMNS: &str = "id, amount, date, note, category, created_at";

/// Create a new expense in the database.
///
/// The category name is not checked here, callers should validate it first
/// (see [crate::expense::validate_new_expense]).
///
/// # Errors
/// This function will return a [Error::SqlError] if there is some SQL error.
pub fn create_expense(new_expense: NewExpense, connection: &Connection) -> Result<Expense, Error> {
    let expense = connection
        .prepare(&format!(
            "INSERT INTO expenses (amount, date, note, category)
             VALUES (?1, ?2, ?3, ?4)
             RETURNING {EXPENSE_COLUMNS}"
        ))?
        .query_row(
            (
                new_expense.amount,
                &new_expense.date,
                &new_expense.note,
                &new_expense.category,
            ),
            map_expense_row,
        )?;

    Ok(expense)
}

/// Retrieve an expense from the database by its `id`.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `id` does not refer to a valid expense,
/// - or [Error::SqlError] there is some other SQL error.
pub fn get_expense(id: ExpenseId, connection: &Connection) -> Result<Expense, Error> {
    let expense = connection
        .prepare(&format!("SELECT {EXPENSE_COLUMNS} FROM expenses WHERE id = :id"))?
        .query_row(&[(":id", &id)], map_expense_row)?;

    Ok(expense)
}

/// Overwrite the fields that are present in `update` and return the updated expense.
///
/// Only the present fields appear in the `SET` clause, every other column
/// keeps its value.
///
/// # Errors
/// This function will return a:
/// - [Error::NoFieldsToUpdate] if `update` has no fields set,
/// - [Error::NotFound] if `id` does not refer to a valid expense,
/// - or [Error::SqlError] there is some other SQL error.
pub fn update_expense(
    id: ExpenseId,
    update: &ExpenseUpdate,
    connection: &Connection,
) -> Result<Expense, Error> {
    let mut assignments = Vec::new();
    let mut params: Vec<&dyn ToSql> = Vec::new();

    if let Some(amount) = &update.amount {
        assignments.push("amount = ?");
        params.push(amount);
    }

    if let Some(date) = &update.date {
        assignments.push("date = ?");
        params.push(date);
    }

    if let Some(note) = &update.note {
        assignments.push("note = ?");
        params.push(note);
    }

    if let Some(category) = &update.category {
        assignments.push("category = ?");
        params.push(category);
    }

    if assignments.is_empty() {
        return Err(Error::NoFieldsToUpdate);
    }

    params.push(&id);

    let query = format!(
        "UPDATE expenses SET {} WHERE id = ? RETURNING {EXPENSE_COLUMNS}",
        assignments.join(", ")
    );

    let expense = connection
        .prepare(&query)?
        .query_row(params.as_slice(), map_expense_row)?;

    Ok(expense)
}

/// Delete an expense by ID.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `id` does not refer to a valid expense,
/// - or [Error::SqlError] there is some other SQL error.
pub fn delete_expense(id: ExpenseId, connection: &Connection) -> Result<(), Error> {
    let rows_affected =
        connection.execute("DELETE FROM expenses WHERE id = :id", &[(":id", &id)])?;

    if rows_affected == 0 {
        return Err(Error::NotFound);
    }

    Ok(())
}

/// Create the expense table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_expense_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS expenses (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            amount REAL NOT NULL,
            date TEXT NOT NULL,
            note TEXT NOT NULL DEFAULT '',
            category TEXT NOT NULL DEFAULT 'other',
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        );

        CREATE INDEX IF NOT EXISTS idx_expenses_date ON expenses(date);",
    )?;

    Ok(())
}

/// Map a database row to an Expense.
///
/// The row must contain the columns in the order of `EXPENSE_COLUMNS`.
pub fn map_expense_row(row: &Row) -> Result<Expense, rusqlite::Error> {
    Ok(Expense {
        id: row.get(0)?,
        amount: row.get(1)?,
        date: row.get(2)?,
        note: row.get(3)?,
        category: row.get(4)?,
        created_at: row.get(5)?,
    })
}

// ============================================================================
// TESTS
// ============================================================================
