//! ISO 8601 dates as entered by the client.

use std::fmt::Display;

use rusqlite::{
    ToSql,
    types::{FromSql, FromSqlResult, ToSqlOutput, ValueRef},
};
use serde::{Deserialize, Serialize};
use time::{
    Date, Time, UtcOffset, format_description::BorrowedFormatItem, macros::format_description,
};

use crate::Error;

const DATE_FORMAT: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");
const TIME_FORMAT: &[BorrowedFormatItem<'_>] = format_description!(
    "[hour][optional [:[minute][optional [:[second][optional [.[subsecond]]]]]]]"
);
const OFFSET_FORMAT: &[BorrowedFormatItem<'_>] = format_description!(
    "[offset_hour sign:mandatory][optional [[optional [:]][offset_minute]]]"
);

/// The date of an expense, stored exactly as the client sent it.
///
/// The string is either a calendar date (`2025-10-04`) or a date-time
/// (`2025-10-04T09`, `2025-10-04T09:30`, `2025-10-04 09:30:00.250`,
/// `2025-10-04T09:30:00Z`, `2025-10-04T09:30:00+13:00`, `2025-10-04T09:30+0530`,
/// `2025-10-04T09:30-05`). Only the extended format with hyphens is
/// accepted, so the first seven characters are always the `YYYY-MM` month and
/// plain string comparison orders dates chronologically.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpenseDate(String);

impl ExpenseDate {
    /// Parse an ISO 8601 date or date-time.
    ///
    /// # Errors
    ///
    /// Returns an [Error::InvalidDate] if `raw` is not a valid date or date-time.
    pub fn parse(raw: &str) -> Result<Self, Error> {
        let invalid = || Error::InvalidDate(raw.to_owned());

        let (date_part, rest) = raw.split_at_checked(10).ok_or_else(invalid)?;
        Date::parse(date_part, DATE_FORMAT).map_err(|_| invalid())?;

        if rest.is_empty() {
            return Ok(Self(raw.to_owned()));
        }

        let time_part = rest.strip_prefix(['T', ' ']).ok_or_else(invalid)?;
        let (time_part, offset) = split_offset(time_part);
        Time::parse(time_part, TIME_FORMAT).map_err(|_| invalid())?;

        match offset {
            None | Some("Z") => {}
            Some(offset) => {
                UtcOffset::parse(offset, OFFSET_FORMAT).map_err(|_| invalid())?;
            }
        }

        Ok(Self(raw.to_owned()))
    }

    /// Create a date without validation.
    ///
    /// The caller should ensure that the string is a valid ISO 8601 date.
    pub fn new_unchecked(raw: &str) -> Self {
        Self(raw.to_owned())
    }

    /// The `YYYY-MM` month the date falls in.
    pub fn month(&self) -> &str {
        self.0.get(..7).unwrap_or(&self.0)
    }
}

/// Split a trailing `Z` or `±HH:MM` UTC offset from a time string.
fn split_offset(time: &str) -> (&str, Option<&str>) {
    if let Some(time) = time.strip_suffix('Z') {
        return (time, Some("Z"));
    }

    match time.find(['+', '-']) {
        Some(offset_start) => (&time[..offset_start], Some(&time[offset_start..])),
        None => (time, None),
    }
}

impl AsRef<str> for ExpenseDate {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for ExpenseDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl ToSql for ExpenseDate {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        self.0.to_sql()
    }
}

impl FromSql for ExpenseDate {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        String::column_result(value).map(Self)
    }
}
