//! Storage primitives: schema setup and scoped transactions.

use std::sync::Mutex;

use rusqlite::{Connection, Transaction, TransactionBehavior};

use crate::{
    Error,
    category::{create_category_table, seed_default_categories},
    expense::create_expense_table,
};

/// Create the application tables if they do not exist and seed the default
/// categories.
///
/// This function is idempotent and is intended to be called every time the
/// server starts.
///
/// # Errors
/// Returns an [Error::SqlError] if a table cannot be created or if the seed
/// categories cannot be inserted.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    let transaction = Transaction::new_unchecked(connection, TransactionBehavior::Exclusive)?;

    create_expense_table(&transaction)?;
    create_category_table(&transaction)?;
    seed_default_categories(&transaction)?;

    transaction.commit()?;

    Ok(())
}

/// Run `operation` inside a database transaction.
///
/// The lock on `db_connection` is held for the duration of the call. The
/// transaction is committed if `operation` returns `Ok` and rolled back if it
/// returns an error (rusqlite rolls back a transaction when it is dropped
/// without being committed).
///
/// # Errors
/// Returns:
/// - [Error::DatabaseLockError] if the connection lock is poisoned,
/// - any error returned by `operation`,
/// - or [Error::SqlError] if the transaction cannot be started or committed.
pub fn with_transaction<T, F>(db_connection: &Mutex<Connection>, operation: F) -> Result<T, Error>
where
    F: FnOnce(&Transaction) -> Result<T, Error>,
{
    let mut connection = db_connection.lock().map_err(|_| Error::DatabaseLockError)?;

    let transaction = connection.transaction()?;
    let value = operation(&transaction)?;
    transaction.commit()?;

    Ok(value)
}
