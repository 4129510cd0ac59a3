//! Validation of expense payloads sent by clients.
//!
//! Payload fields are kept as raw JSON so that every rule can be checked and
//! reported together, instead of stopping at the first field that fails to
//! deserialize.

use rusqlite::Connection;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

use crate::{
    Error,
    category::{CategoryName, find_category_name},
    expense::{ExpenseDate, ExpenseUpdate, NewExpense},
};

pub(crate) const AMOUNT_REQUIRED: &str = "Amount is required";
pub(crate) const AMOUNT_NOT_A_NUMBER: &str = "Amount must be a valid number";
pub(crate) const AMOUNT_NOT_POSITIVE: &str = "Amount must be greater than 0";
pub(crate) const DATE_REQUIRED: &str = "Date is required";
pub(crate) const INVALID_DATE_FORMAT: &str = "Invalid date format. Use ISO format (YYYY-MM-DD)";
pub(crate) const NOTE_NOT_TEXT: &str = "Note must be a string";

/// The JSON body of a request to create or update an expense.
///
/// Each field is `None` when the key is absent from the body and `Some` when
/// it is present, including when its value is `null`. Only JSON objects can
/// be deserialized into a payload, unknown keys are ignored.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ExpensePayload {
    /// A number or numeric string.
    pub amount: Option<Value>,
    /// An ISO 8601 date or date-time string.
    pub date: Option<Value>,
    /// A string, `null` clears the note.
    pub note: Option<Value>,
    /// The name of an existing category, `null` or empty means "other".
    pub category: Option<Value>,
}

impl<'de> Deserialize<'de> for ExpensePayload {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let mut fields = Map::<String, Value>::deserialize(deserializer)?;

        Ok(Self {
            amount: fields.remove("amount"),
            date: fields.remove("date"),
            note: fields.remove("note"),
            category: fields.remove("category"),
        })
    }
}

/// Check `payload` and return every rule it breaks.
///
/// When `is_update` is `false` the amount and date are required. When it is
/// `true` absent fields are skipped. An empty list means the payload is valid.
///
/// # Errors
/// Returns an [Error::SqlError] if the category lookup fails.
pub fn validate_expense(
    payload: &ExpensePayload,
    is_update: bool,
    connection: &Connection,
) -> Result<Vec<String>, Error> {
    let result = if is_update {
        validate_expense_update(payload, connection).map(|_| ())
    } else {
        validate_new_expense(payload, connection).map(|_| ())
    };

    match result {
        Ok(()) => Ok(Vec::new()),
        Err(Error::Validation(errors)) => Ok(errors),
        Err(error) => Err(error),
    }
}

/// Validate a payload for creating an expense.
///
/// A missing note defaults to an empty string, and a missing, `null` or empty
/// category defaults to "other".
///
/// # Errors
/// This function will return a:
/// - [Error::Validation] listing every broken rule,
/// - or [Error::SqlError] if the category lookup fails.
pub fn validate_new_expense(
    payload: &ExpensePayload,
    connection: &Connection,
) -> Result<NewExpense, Error> {
    let mut errors = Vec::new();

    let amount = match &payload.amount {
        Some(value) => record(check_amount(value), &mut errors),
        None => {
            errors.push(AMOUNT_REQUIRED.to_owned());
            None
        }
    };

    let date = match &payload.date {
        Some(value) => record(check_date(value), &mut errors),
        None => {
            errors.push(DATE_REQUIRED.to_owned());
            None
        }
    };

    let category = match &payload.category {
        Some(value) => record(check_category(value, connection)?, &mut errors),
        None => Some(CategoryName::default()),
    };

    let note = match &payload.note {
        Some(value) => record(check_note(value), &mut errors),
        None => Some(String::new()),
    };

    match (amount, date, category, note) {
        (Some(amount), Some(date), Some(category), Some(note)) if errors.is_empty() => {
            Ok(NewExpense {
                amount,
                date,
                note,
                category,
            })
        }
        _ => Err(Error::Validation(errors)),
    }
}

/// Validate a payload for a partial update of an expense.
///
/// Only the fields present in the payload are checked and end up in the
/// returned [ExpenseUpdate]. A `null` or empty category resets the category
/// to "other", and a `null` note clears the note.
///
/// # Errors
/// This function will return a:
/// - [Error::Validation] listing every broken rule,
/// - or [Error::SqlError] if the category lookup fails.
pub fn validate_expense_update(
    payload: &ExpensePayload,
    connection: &Connection,
) -> Result<ExpenseUpdate, Error> {
    let mut errors = Vec::new();

    let amount = payload
        .amount
        .as_ref()
        .and_then(|value| record(check_amount(value), &mut errors));

    let date = payload
        .date
        .as_ref()
        .and_then(|value| record(check_date(value), &mut errors));

    let category = match &payload.category {
        Some(value) => record(check_category(value, connection)?, &mut errors),
        None => None,
    };

    let note = payload
        .note
        .as_ref()
        .and_then(|value| record(check_note(value), &mut errors));

    if !errors.is_empty() {
        return Err(Error::Validation(errors));
    }

    Ok(ExpenseUpdate {
        amount,
        date,
        note,
        category,
    })
}

/// Push the error message of a failed check onto `errors`.
fn record<T, E: ToString>(check: Result<T, E>, errors: &mut Vec<String>) -> Option<T> {
    check.map_err(|error| errors.push(error.to_string())).ok()
}

/// Accepts JSON numbers and numeric strings such as "12.50".
fn check_amount(value: &Value) -> Result<f64, &'static str> {
    let amount = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|amount| amount.is_finite())
    .ok_or(AMOUNT_NOT_A_NUMBER)?;

    if amount <= 0.0 {
        return Err(AMOUNT_NOT_POSITIVE);
    }

    Ok(amount)
}

fn check_date(value: &Value) -> Result<ExpenseDate, &'static str> {
    match value {
        Value::String(text) => ExpenseDate::parse(text).map_err(|_| INVALID_DATE_FORMAT),
        _ => Err(INVALID_DATE_FORMAT),
    }
}

fn check_note(value: &Value) -> Result<String, &'static str> {
    match value {
        Value::String(text) => Ok(text.clone()),
        Value::Null => Ok(String::new()),
        _ => Err(NOTE_NOT_TEXT),
    }
}

/// Resolve a category against the categories table.
///
/// The outer result carries database errors, the inner one the validation
/// message for an unknown category.
fn check_category(
    value: &Value,
    connection: &Connection,
) -> Result<Result<CategoryName, String>, Error> {
    let name = match value {
        Value::Null => return Ok(Ok(CategoryName::default())),
        Value::String(name) if name.is_empty() => return Ok(Ok(CategoryName::default())),
        Value::String(name) => name,
        other => return Ok(Err(format!("Invalid category: {other}"))),
    };

    Ok(find_category_name(name, connection)?.ok_or_else(|| format!("Invalid category: {name}")))
}
