//! Filtered expense queries shared by the listing and summary endpoints.

use axum::extract::{Query, rejection::QueryRejection};
use rusqlite::{Connection, ToSql};

use crate::{Error, expense::Expense};

use super::domain::map_expense_row;

/// The key-value pairs of a query string, in the order they were given.
pub(crate) type QueryParams = Vec<(String, String)>;

/// Unwrap the query string pairs, turning an unreadable query string into an
/// [Error::InvalidQuery].
pub(crate) fn query_params(
    query: Result<Query<QueryParams>, QueryRejection>,
) -> Result<QueryParams, Error> {
    query
        .map(|Query(params)| params)
        .map_err(|rejection| Error::InvalidQuery(rejection.body_text()))
}

/// The value of the first occurrence of `key` in `params`.
///
/// Repeated keys are allowed, only the first value counts.
pub(crate) fn first_value(params: &[(String, String)], key: &str) -> Option<String> {
    params
        .iter()
        .find_map(|(name, value)| (name == key).then(|| value.clone()))
}

/// Optional filters for selecting expenses.
///
/// Filters that are `None` or an empty string are ignored, the rest are
/// combined with AND.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ExpenseFilter {
    /// Only include expenses with exactly this category name.
    pub category: Option<String>,
    /// Only include expenses dated on or after this date.
    pub start_date: Option<String>,
    /// Only include expenses dated on or before this date.
    pub end_date: Option<String>,
}

impl ExpenseFilter {
    /// Read the `category`, `start_date` and `end_date` filters from query
    /// string pairs, ignoring any other keys.
    pub fn from_query_params(params: &[(String, String)]) -> Self {
        Self {
            category: first_value(params, "category"),
            start_date: first_value(params, "start_date"),
            end_date: first_value(params, "end_date"),
        }
    }
}

/// The order to sort expenses in a query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum SortOrder {
    /// Latest date first, with expenses on the same date newest insert first.
    NewestFirst,
    /// The order the expenses were inserted in.
    Inserted,
}

/// Get every expense matching `filter`.
///
/// Dates are compared as strings. Because dates are stored in ISO 8601
/// extended format this matches chronological order, and both bounds are
/// inclusive. Note that an end date such as `2025-01-31` excludes date-times
/// later on that day (e.g. `2025-01-31T10:00`), since they sort after it.
///
/// # Errors
/// Returns [Error::SqlError] if the query cannot be prepared or a row cannot
/// be mapped to an [Expense].
pub(crate) fn query_expenses(
    filter: &ExpenseFilter,
    sort_order: SortOrder,
    connection: &Connection,
) -> Result<Vec<Expense>, Error> {
    let mut conditions = Vec::new();
    let mut params: Vec<&dyn ToSql> = Vec::new();

    if let Some(category) = non_empty(&filter.category) {
        conditions.push("category = ?");
        params.push(category);
    }

    if let Some(start_date) = non_empty(&filter.start_date) {
        conditions.push("date >= ?");
        params.push(start_date);
    }

    if let Some(end_date) = non_empty(&filter.end_date) {
        conditions.push("date <= ?");
        params.push(end_date);
    }

    let where_clause = if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    };

    let order_clause = match sort_order {
        SortOrder::NewestFirst => "ORDER BY date DESC, id DESC",
        SortOrder::Inserted => "ORDER BY id ASC",
    };

    let query = format!(
        "SELECT id, amount, date, note, category, created_at FROM expenses {where_clause} {order_clause}"
    );

    connection
        .prepare(&query)?
        .query_map(params.as_slice(), map_expense_row)?
        .map(|expense_result| expense_result.map_err(Error::SqlError))
        .collect()
}

fn non_empty(value: &Option<String>) -> Option<&String> {
    value.as_ref().filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;

    use crate::{
        category::CategoryName,
        db::initialize,
        expense::{Expense, ExpenseDate, create_expense},
    };

    use super::{ExpenseFilter, SortOrder, first_value, query_expenses};

    fn get_test_connection() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        conn
    }

    fn insert(amount: f64, date: &str, category: &str, conn: &Connection) -> Expense {
        create_expense(
            Expense::build(amount, ExpenseDate::parse(date).unwrap())
                .category(CategoryName::new_unchecked(category)),
            conn,
        )
        .expect("Could not create expense")
    }

    fn dates(expenses: &[Expense]) -> Vec<&str> {
        expenses.iter().map(|expense| expense.date.as_ref()).collect()
    }

    #[test]
    fn no_filters_returns_everything() {
        let conn = get_test_connection();
        insert(1.0, "2025-01-01", "food", &conn);
        insert(2.0, "2025-02-01", "bills", &conn);

        let got = query_expenses(&ExpenseFilter::default(), SortOrder::NewestFirst, &conn).unwrap();

        assert_eq!(got.len(), 2);
    }

    #[test]
    fn date_range_is_inclusive() {
        let conn = get_test_connection();
        insert(1.0, "2024-12-31", "food", &conn);
        insert(2.0, "2025-01-01", "food", &conn);
        insert(3.0, "2025-01-15", "food", &conn);
        insert(4.0, "2025-01-31", "food", &conn);
        insert(5.0, "2025-02-01", "food", &conn);
        let filter = ExpenseFilter {
            start_date: Some("2025-01-01".to_owned()),
            end_date: Some("2025-01-31".to_owned()),
            ..Default::default()
        };

        let got = query_expenses(&filter, SortOrder::NewestFirst, &conn).unwrap();

        assert_eq!(dates(&got), ["2025-01-31", "2025-01-15", "2025-01-01"]);
    }

    #[test]
    fn filters_by_exact_category() {
        let conn = get_test_connection();
        insert(1.0, "2025-01-01", "food", &conn);
        insert(2.0, "2025-01-02", "bills", &conn);
        insert(3.0, "2025-01-03", "food", &conn);
        let filter = ExpenseFilter {
            category: Some("food".to_owned()),
            ..Default::default()
        };

        let got = query_expenses(&filter, SortOrder::NewestFirst, &conn).unwrap();

        assert_eq!(got.len(), 2);
        assert!(got.iter().all(|expense| expense.category.as_ref() == "food"));
    }

    #[test]
    fn combines_filters_with_and() {
        let conn = get_test_connection();
        insert(1.0, "2025-01-01", "food", &conn);
        insert(2.0, "2025-03-01", "food", &conn);
        insert(3.0, "2025-03-02", "bills", &conn);
        let filter = ExpenseFilter {
            category: Some("food".to_owned()),
            start_date: Some("2025-02-01".to_owned()),
            end_date: None,
        };

        let got = query_expenses(&filter, SortOrder::NewestFirst, &conn).unwrap();

        assert_eq!(dates(&got), ["2025-03-01"]);
    }

    #[test]
    fn empty_strings_are_ignored() {
        let conn = get_test_connection();
        insert(1.0, "2025-01-01", "food", &conn);
        insert(2.0, "2025-01-02", "bills", &conn);
        let filter = ExpenseFilter {
            category: Some(String::new()),
            start_date: Some(String::new()),
            end_date: Some(String::new()),
        };

        let got = query_expenses(&filter, SortOrder::NewestFirst, &conn).unwrap();

        assert_eq!(got.len(), 2);
    }

    #[test]
    fn newest_first_breaks_ties_by_latest_insert() {
        let conn = get_test_connection();
        let first = insert(1.0, "2025-01-01", "food", &conn);
        let second = insert(2.0, "2025-01-02", "food", &conn);
        let third = insert(3.0, "2025-01-02", "food", &conn);

        let got = query_expenses(&ExpenseFilter::default(), SortOrder::NewestFirst, &conn).unwrap();

        let ids: Vec<_> = got.iter().map(|expense| expense.id).collect();
        assert_eq!(ids, [third.id, second.id, first.id]);
    }

    #[test]
    fn inserted_order_is_by_id() {
        let conn = get_test_connection();
        let first = insert(1.0, "2025-03-01", "food", &conn);
        let second = insert(2.0, "2025-01-01", "food", &conn);

        let got = query_expenses(&ExpenseFilter::default(), SortOrder::Inserted, &conn).unwrap();

        let ids: Vec<_> = got.iter().map(|expense| expense.id).collect();
        assert_eq!(ids, [first.id, second.id]);
    }

    #[test]
    fn repeated_query_key_uses_first_value() {
        let params = vec![
            ("category".to_owned(), "food".to_owned()),
            ("category".to_owned(), "bills".to_owned()),
            ("start_date".to_owned(), "2025-01-01".to_owned()),
            ("page".to_owned(), "2".to_owned()),
        ];

        let filter = ExpenseFilter::from_query_params(&params);

        assert_eq!(
            filter,
            ExpenseFilter {
                category: Some("food".to_owned()),
                start_date: Some("2025-01-01".to_owned()),
                end_date: None,
            }
        );
        assert_eq!(first_value(&params, "end_date"), None);
    }
}
