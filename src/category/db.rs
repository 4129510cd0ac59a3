//! Database operations for categories.

use rusqlite::{Connection, OptionalExtension, Row};

use crate::{
    Error,
    category::{Category, CategoryName},
};

/// The categories every database starts with, as `(name, hex color)` pairs.
pub const DEFAULT_CATEGORIES: [(&str, &str); 7] = [
    ("food", "#ef4444"),
    ("travel", "#3b82f6"),
    ("bills", "#f59e0b"),
    ("entertainment", "#8b5cf6"),
    ("shopping", "#ec4899"),
    ("health", "#10b981"),
    ("other", "#6b7280"),
];

/// Initialize the category table.
pub fn create_category_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS categories (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT UNIQUE NOT NULL,
            color TEXT NOT NULL DEFAULT '#6b7280'
        )",
        (),
    )?;

    Ok(())
}

/// Insert [DEFAULT_CATEGORIES], skipping any category whose name already exists.
pub fn seed_default_categories(connection: &Connection) -> Result<(), rusqlite::Error> {
    let mut statement =
        connection.prepare("INSERT OR IGNORE INTO categories (name, color) VALUES (?1, ?2)")?;

    for (name, color) in DEFAULT_CATEGORIES {
        statement.execute((name, color))?;
    }

    Ok(())
}

/// Retrieve all categories ordered alphabetically by name.
pub fn get_all_categories(connection: &Connection) -> Result<Vec<Category>, Error> {
    connection
        .prepare("SELECT id, name, color FROM categories ORDER BY name ASC;")?
        .query_map([], map_row)?
        .map(|maybe_category| maybe_category.map_err(|error| error.into()))
        .collect()
}

/// Look up a category by its exact (case-sensitive) name.
///
/// Returns `None` if no category has that name.
pub fn find_category_name(
    name: &str,
    connection: &Connection,
) -> Result<Option<CategoryName>, Error> {
    connection
        .prepare("SELECT name FROM categories WHERE name = :name;")?
        .query_row(&[(":name", name)], |row| row.get(0))
        .optional()
        .map_err(|error| error.into())
}

fn map_row(row: &Row) -> Result<Category, rusqlite::Error> {
    Ok(Category {
        id: row.get(0)?,
        name: row.get(1)?,
        color: row.get(2)?,
    })
}
