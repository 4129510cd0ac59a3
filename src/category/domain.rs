//! Core category domain types.

use std::fmt::Display;

use rusqlite::{
    ToSql,
    types::{FromSql, FromSqlResult, ToSqlOutput, ValueRef},
};
use serde::{Deserialize, Serialize};

use crate::CategoryId;

/// A non-empty category name, e.g. "food" or "bills".
///
/// Expenses refer to categories by name rather than by ID. A name is only
/// checked against the categories table at the API boundary (see
/// [crate::expense::validate_expense]); expenses that already hold a name are
/// never re-checked, so removing a category would leave the name on those
/// expenses untouched.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct CategoryName(String);

impl CategoryName {
    /// The category that expenses without a category are filed under.
    pub const DEFAULT: &'static str = "other";

    /// Create a category name without validation.
    ///
    /// The caller should ensure that the string is not empty.
    pub fn new_unchecked(name: &str) -> Self {
        Self(name.to_owned())
    }
}

impl Default for CategoryName {
    fn default() -> Self {
        Self::new_unchecked(Self::DEFAULT)
    }
}

impl AsRef<str> for CategoryName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for CategoryName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl ToSql for CategoryName {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        self.0.to_sql()
    }
}

impl FromSql for CategoryName {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        String::column_result(value).map(Self)
    }
}

/// A category for grouping expenses, displayed with its own color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct Category {
    /// The ID of the category, assigned by the database.
    pub id: CategoryId,
    /// The unique name that expenses refer to the category by.
    pub name: CategoryName,
    /// A hex color code, e.g. "#ef4444".
    pub color: String,
}
